// ==========================================
// 冷柜/饮水机工厂生产看板 - 型号/类别注册表
// ==========================================
// 职责: 型号 → 产品线归属, 类别 → 产品线归属
// 红线: 型号只停用不删除 (停用只影响录入选项与计划汇总)
// ==========================================

use crate::domain::types::{ModelId, ProductLine};
use serde::{Deserialize, Serialize};

// ==========================================
// ProductModel - 产品型号
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductModel {
    pub model_id: ModelId,
    pub line: ProductLine,
    pub active: bool,
}

impl ProductModel {
    pub fn new(model_id: impl Into<ModelId>, line: ProductLine) -> Self {
        Self {
            model_id: model_id.into(),
            line,
            active: true,
        }
    }
}

// ==========================================
// Category - 产品类别
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub line: ProductLine,
}

impl Category {
    pub fn new(name: impl Into<String>, line: ProductLine) -> Self {
        Self {
            name: name.into().trim().to_string(),
            line,
        }
    }
}

/// 出厂预置型号
pub fn default_models() -> Vec<ProductModel> {
    vec![
        ProductModel::new("CRF-Part-A", ProductLine::PartsSupply),
        ProductModel::new("CRF-Part-B", ProductLine::PartsSupply),
        ProductModel::new("CF-Model-100", ProductLine::ChestFreezer),
        ProductModel::new("CF-Model-200", ProductLine::ChestFreezer),
        ProductModel::new("WD-Model-A", ProductLine::WaterDispenser),
        ProductModel::new("WD-Model-B", ProductLine::WaterDispenser),
    ]
}

/// 出厂预置类别
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(ProductLine::ChestFreezer.label(), ProductLine::ChestFreezer),
        Category::new(ProductLine::WaterDispenser.label(), ProductLine::WaterDispenser),
        Category::new(ProductLine::PartsSupply.label(), ProductLine::PartsSupply),
    ]
}

// ==========================================
// RegistrySnapshot - 注册表快照
// ==========================================
// 用途: 报表/录入校验时一次性读取,引擎只读快照
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    models: Vec<ProductModel>,
    categories: Vec<Category>,
}

impl RegistrySnapshot {
    pub fn new(models: Vec<ProductModel>, categories: Vec<Category>) -> Self {
        Self { models, categories }
    }

    pub fn models(&self) -> &[ProductModel] {
        &self.models
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn find_model(&self, model_id: &ModelId) -> Option<&ProductModel> {
        self.models.iter().find(|m| &m.model_id == model_id)
    }

    pub fn line_of(&self, model_id: &ModelId) -> Option<ProductLine> {
        self.find_model(model_id).map(|m| m.line)
    }

    /// 指定产品线的型号 (注册顺序)
    pub fn models_of<'a>(
        &'a self,
        lines: &'a [ProductLine],
    ) -> impl Iterator<Item = &'a ProductModel> + 'a {
        self.models.iter().filter(move |m| lines.contains(&m.line))
    }

    /// 指定产品线的启用型号
    pub fn active_models_of<'a>(
        &'a self,
        lines: &'a [ProductLine],
    ) -> impl Iterator<Item = &'a ProductModel> + 'a {
        self.models_of(lines).filter(|m| m.active)
    }

    /// 全部启用型号 (计划录入表单顺序: 冷柜 → 饮水机 → CRF)
    pub fn plan_form_models(&self) -> Vec<&ProductModel> {
        [
            ProductLine::ChestFreezer,
            ProductLine::WaterDispenser,
            ProductLine::PartsSupply,
        ]
        .into_iter()
        .flat_map(|line| self.models.iter().filter(move |m| m.line == line && m.active))
        .collect()
    }

    /// 全部已知型号 (含停用),按型号排序去重
    pub fn all_model_ids_sorted(&self) -> Vec<ModelId> {
        let mut ids: Vec<ModelId> = self.models.iter().map(|m| m.model_id.clone()).collect();
        ids.sort();
        ids.dedup();
        ids
    }

    pub fn categories_of(&self, line: ProductLine) -> impl Iterator<Item = &Category> + '_ {
        self.categories.iter().filter(move |c| c.line == line)
    }

    pub fn category_allowed(&self, name: &str, line: ProductLine) -> bool {
        let name = name.trim();
        self.categories_of(line).any(|c| c.name == name)
    }
}
