// ==========================================
// 冷柜/饮水机工厂生产看板 - 型号/类别管理 API
// ==========================================
// 职责: 新增型号、启用/停用型号、新增类别、列表查询
// 红线: 型号不删除; 停用只影响录入选项与计划汇总
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::registry::{Category, ProductModel, RegistrySnapshot};
use crate::domain::types::{ModelId, ProductLine};
use crate::repository::registry_repo::RegistryRepository;

// ==========================================
// RegistryApi - 型号/类别管理 API
// ==========================================
pub struct RegistryApi {
    registry: Arc<dyn RegistryRepository>,
}

impl RegistryApi {
    pub fn new(registry: Arc<dyn RegistryRepository>) -> Self {
        Self { registry }
    }

    /// 新增型号 (默认启用)
    ///
    /// # 返回
    /// - Err(InvalidInput): 型号为空
    /// - Err(BusinessRuleViolation): 型号已存在
    pub fn add_model(&self, line: ProductLine, model_id: &str) -> ApiResult<ProductModel> {
        let id = ModelId::new(model_id);
        if id.is_blank() {
            return Err(ApiError::InvalidInput("型号不能为空".to_string()));
        }
        let model = ProductModel::new(id, line);
        self.registry.insert_model(&model)?;
        tracing::info!(model = %model.model_id, line = %line, "新增型号");
        Ok(model)
    }

    /// 启用/停用型号
    pub fn set_model_active(&self, model_id: &ModelId, active: bool) -> ApiResult<()> {
        self.registry.set_model_active(model_id, active)?;
        tracing::info!(model = %model_id, active = active, "型号状态已变更");
        Ok(())
    }

    /// 新增类别
    ///
    /// # 返回
    /// - Ok(true): 已新增
    /// - Ok(false): 同产品线下已存在
    pub fn add_category(&self, line: ProductLine, name: &str) -> ApiResult<bool> {
        let category = Category::new(name, line);
        if category.name.is_empty() {
            return Err(ApiError::InvalidInput("类别名称不能为空".to_string()));
        }
        if self.snapshot()?.category_allowed(&category.name, line) {
            return Ok(false);
        }
        self.registry.insert_category(&category)?;
        Ok(true)
    }

    pub fn list_models(&self) -> ApiResult<Vec<ProductModel>> {
        Ok(self.registry.list_models()?)
    }

    pub fn list_categories(&self) -> ApiResult<Vec<Category>> {
        Ok(self.registry.list_categories()?)
    }

    pub fn snapshot(&self) -> ApiResult<RegistrySnapshot> {
        Ok(self.registry.snapshot()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::registry_repo::InMemoryRegistryRepository;

    fn api() -> RegistryApi {
        let repo = Arc::new(InMemoryRegistryRepository::new());
        repo.seed_defaults().unwrap();
        RegistryApi::new(repo)
    }

    #[test]
    fn test_add_model_and_duplicate() {
        let api = api();
        let m = api.add_model(ProductLine::ChestFreezer, " CF-Model-300 ").unwrap();
        assert_eq!(m.model_id.as_str(), "CF-Model-300");
        assert!(m.active);

        let err = api
            .add_model(ProductLine::ChestFreezer, "CF-Model-300")
            .unwrap_err();
        assert!(matches!(err, ApiError::BusinessRuleViolation(_)));
        assert!(matches!(
            api.add_model(ProductLine::WaterDispenser, "  "),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_set_model_active_unknown() {
        let api = api();
        let err = api
            .set_model_active(&ModelId::from("nope"), false)
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_add_category() {
        let api = api();
        assert!(api.add_category(ProductLine::PartsSupply, "Compressor Brackets").unwrap());
        assert!(!api.add_category(ProductLine::PartsSupply, "Compressor Brackets").unwrap());
        assert_eq!(api.list_categories().unwrap().len(), 4);
    }
}
