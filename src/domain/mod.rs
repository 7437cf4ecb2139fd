// ==========================================
// 冷柜/饮水机工厂生产看板 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、显示规则
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod layout;
pub mod plan;
pub mod production;
pub mod registry;
pub mod report;
pub mod types;

// 重导出核心类型
pub use layout::{Division, DivisionKind, LayoutConfig, PlantLayout};
pub use plan::{PlanFormRow, PlanGranularity, PlanSource, ResolvedTarget};
pub use production::{DateScope, EventFilter, ProductionEvent, StagedEntry};
pub use registry::{Category, ProductModel, RegistrySnapshot};
pub use report::{
    ActualSource, CellTone, DailyAchievementReport, DailyAchievementRow, ModelTotal,
    MonthlyReport, MonthlyReportRow, VarianceSign, WipReport, WipRow, WipRowKind,
};
pub use types::{AreaId, ModelId, Period, ProductLine};
