// ==========================================
// 冷柜/饮水机工厂生产看板 - 配置层
// ==========================================
// 职责: 系统配置管理 (口令/布局/语言)
// 存储: config_kv 表
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager, DEFAULT_LOCALE, DEFAULT_PLAN_PASSWORD};
