// ==========================================
// 冷柜/饮水机工厂生产看板 - 型号/类别注册表仓储
// ==========================================
// 红线: 型号不删除, 只切换 active
// 红线: 型号标识全局唯一
// ==========================================

mod memory;
mod sqlite;


pub use memory::InMemoryRegistryRepository;
pub use sqlite::SqliteRegistryRepository;

use crate::domain::registry::{
    default_categories, default_models, Category, ProductModel, RegistrySnapshot,
};
use crate::domain::types::ModelId;
use crate::repository::error::RepositoryResult;

// ==========================================
// RegistryRepository - 注册表仓储接口
// ==========================================
pub trait RegistryRepository: Send + Sync {
    /// 新增型号
    ///
    /// # 返回
    /// - `Err(UniqueConstraintViolation)`: 型号已存在
    fn insert_model(&self, model: &ProductModel) -> RepositoryResult<()>;

    /// 启用/停用型号
    ///
    /// # 返回
    /// - `Err(NotFound)`: 型号不存在
    fn set_model_active(&self, model_id: &ModelId, active: bool) -> RepositoryResult<()>;

    /// 全部型号 (注册顺序)
    fn list_models(&self) -> RepositoryResult<Vec<ProductModel>>;

    /// 新增类别, 已存在时忽略
    fn insert_category(&self, category: &Category) -> RepositoryResult<()>;

    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;

    /// 一次性读取快照 (引擎只读)
    fn snapshot(&self) -> RepositoryResult<RegistrySnapshot> {
        Ok(RegistrySnapshot::new(
            self.list_models()?,
            self.list_categories()?,
        ))
    }

    /// 注册表为空时写入预置型号与类别
    ///
    /// # 返回
    /// - `Ok(true)`: 已写入
    /// - `Ok(false)`: 已有数据, 未改动
    fn seed_defaults(&self) -> RepositoryResult<bool> {
        if !self.list_models()?.is_empty() {
            return Ok(false);
        }
        for model in default_models() {
            self.insert_model(&model)?;
        }
        for category in default_categories() {
            self.insert_category(&category)?;
        }
        Ok(true)
    }
}
