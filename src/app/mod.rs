// ==========================================
// 冷柜/饮水机工厂生产看板 - 应用层
// ==========================================
// 职责: 组装存储/配置/API, 供命令行调用
// ==========================================

pub mod demo;
pub mod state;

// 重导出
pub use demo::{seed_demo, DemoSummary};
pub use state::{get_default_db_path, AppState};
