// ==========================================
// 冷柜/饮水机工厂生产看板 - 核心库
// ==========================================
// 职责: 生产录入、计划录入、计划与实绩对账 (WIP / 日达成 / 月度)
// 技术栈: Rust + SQLite (可选) + 内存存储 (默认)
// 系统定位: 看板计算核心, 界面与图表在外部
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 计划 / 生产记录 / 型号注册表
pub mod repository;

// 引擎层 - 计划查找与对账
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态装配
pub mod app;

// 报表导出
pub mod export;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::layout::{Division, DivisionKind, PlantLayout};
pub use domain::types::{AreaId, ModelId, Period, ProductLine};

// 报表
pub use domain::report::{DailyAchievementReport, MonthlyReport, WipReport};

// 引擎
pub use engine::ReconciliationEngine;

// API
pub use api::{ApiError, ApiResult, EntryApi, PlanApi, RegistryApi, ReportApi};

// 应用
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "CR Plant Dashboard";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
