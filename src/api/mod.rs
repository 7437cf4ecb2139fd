// ==========================================
// 冷柜/饮水机工厂生产看板 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令行/界面调用
// 红线: 注册表成员关系在 API 边界校验
// ==========================================

pub mod entry_api;
pub mod error;
pub mod plan_api;
pub mod registry_api;
pub mod report_api;
pub mod validator;

// 重导出核心类型
pub use entry_api::{EntryApi, EntryOptions};
pub use error::{ApiError, ApiResult, EntryViolation};
pub use plan_api::PlanApi;
pub use registry_api::RegistryApi;
pub use report_api::ReportApi;
pub use validator::EntryValidator;
