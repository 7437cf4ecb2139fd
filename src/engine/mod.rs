// ==========================================
// 冷柜/饮水机工厂生产看板 - 引擎层
// ==========================================
// 职责: 计划取值、区域汇总、WIP 推导、达成率评分、报表对账
// 红线: Engine 不拼 SQL, 不写存储
// ==========================================

pub mod achievement;
pub mod aggregation;
pub mod plan_resolver;
pub mod reconciliation;
pub mod wip;

// 重导出核心引擎
pub use plan_resolver::{DailyLookupTier, MonthlyLookupTier, PlanResolver};
pub use reconciliation::{ActualSourceTier, ReconciliationEngine};
