// ==========================================
// 冷柜/饮水机工厂生产看板 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽存储细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod plan_repo;
pub mod production_log_repo;
pub mod registry_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use plan_repo::{InMemoryPlanRepository, PlanRepository, SqlitePlanRepository};
pub use production_log_repo::{
    InMemoryProductionLog, ProductionLogRepository, SqliteProductionLog,
};
pub use registry_repo::{
    InMemoryRegistryRepository, RegistryRepository, SqliteRegistryRepository,
};
