// ==========================================
// 冷柜/饮水机工厂生产看板 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::layout::{LayoutConfig, PlantLayout};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

const GLOBAL_SCOPE: &str = "global";

/// 计划录入默认口令
pub const DEFAULT_PLAN_PASSWORD: &str = "admin";

/// 默认界面语言
pub const DEFAULT_LOCALE: &str = "en";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        crate::db::ensure_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager (表结构由调用方保证)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 从 config_kv 表读取配置值 (scope_id='global')
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入配置值 (存在则覆盖)
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![GLOBAL_SCOPE, key, value],
        )?;

        tracing::debug!(key = key, "配置已更新");
        Ok(())
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 获取所有配置的快照 (JSON 格式, 键有序)
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;
        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            // 口令不进入快照
            if key == config_keys::PLAN_PASSWORD {
                continue;
            }
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    // ===== 计划录入 =====

    pub fn get_plan_password(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::PLAN_PASSWORD, DEFAULT_PLAN_PASSWORD)
    }

    // ===== 工厂布局 =====

    /// 是否将 CRF 纳入冷柜 WIP 流水线 (默认否)
    pub fn get_crf_in_cf_pipeline(&self) -> Result<bool, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::CRF_IN_CF_PIPELINE, "false")?;
        Ok(matches!(
            value.trim().to_lowercase().as_str(),
            "true" | "1" | "yes"
        ))
    }

    /// 读取布局配置
    ///
    /// # 说明
    /// - plant_layout 不存在时使用出厂布局
    /// - crf_in_cf_pipeline 键存在时覆盖布局 JSON 中的同名字段
    pub fn get_layout_config(&self) -> Result<LayoutConfig, Box<dyn Error>> {
        let mut config = match self.get_config_value(config_keys::PLANT_LAYOUT)? {
            Some(raw) => serde_json::from_str::<LayoutConfig>(&raw)?,
            None => LayoutConfig::default(),
        };

        if self
            .get_config_value(config_keys::CRF_IN_CF_PIPELINE)?
            .is_some()
        {
            config.crf_in_cf_pipeline = self.get_crf_in_cf_pipeline()?;
        }
        Ok(config)
    }

    /// 读取并校验工厂布局
    pub fn get_plant_layout(&self) -> Result<PlantLayout, Box<dyn Error>> {
        let config = self.get_layout_config()?;
        Ok(PlantLayout::from_config(&config)?)
    }

    pub fn set_layout_config(&self, config: &LayoutConfig) -> Result<(), Box<dyn Error>> {
        // 先校验再落库
        PlantLayout::from_config(config)?;
        let raw = serde_json::to_string(config)?;
        self.set_config_value(config_keys::PLANT_LAYOUT, &raw)
    }

    // ===== 界面 =====

    pub fn get_locale(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::LOCALE, DEFAULT_LOCALE)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 计划录入口令
    pub const PLAN_PASSWORD: &str = "plan_password";

    // 工厂布局
    pub const PLANT_LAYOUT: &str = "plant_layout"; // LayoutConfig (JSON)
    pub const CRF_IN_CF_PIPELINE: &str = "crf_in_cf_pipeline";

    // 界面语言 (en / zh-CN)
    pub const LOCALE: &str = "locale";
}
