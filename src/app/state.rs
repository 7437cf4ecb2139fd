// ==========================================
// 冷柜/饮水机工厂生产看板 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 存储: 内存 (默认, 进程退出即丢失) / SQLite 文件
// ==========================================

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::api::error::config_error;
use crate::api::{ApiError, ApiResult, EntryApi, PlanApi, RegistryApi, ReportApi};
use crate::config::config_manager::ConfigManager;
use crate::domain::layout::PlantLayout;
use crate::repository::{
    InMemoryPlanRepository, InMemoryProductionLog, InMemoryRegistryRepository, PlanRepository,
    ProductionLogRepository, RegistryRepository, SqlitePlanRepository, SqliteProductionLog,
    SqliteRegistryRepository,
};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径 (内存模式为 None)
    pub db_path: Option<String>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 工厂布局 (启动时从配置加载)
    pub layout: Arc<PlantLayout>,

    /// 生产录入API
    pub entry_api: Arc<EntryApi>,

    /// 计划录入API
    pub plan_api: Arc<PlanApi>,

    /// 型号/类别管理API
    pub registry_api: Arc<RegistryApi>,

    /// 报表API
    pub report_api: Arc<ReportApi>,
}

impl AppState {
    /// 内存存储 (生产记录与计划不落盘)
    pub fn in_memory() -> ApiResult<Self> {
        tracing::info!("初始化AppState (内存存储)");

        // config_kv 使用内存 SQLite
        let conn = open_connection(None)?;
        let config_manager = Arc::new(ConfigManager::from_connection(Arc::new(Mutex::new(conn))));

        Self::assemble(
            None,
            config_manager,
            Arc::new(InMemoryPlanRepository::new()),
            Arc::new(InMemoryProductionLog::new()),
            Arc::new(InMemoryRegistryRepository::new()),
        )
    }

    /// SQLite 文件存储
    pub fn with_sqlite(db_path: &str) -> ApiResult<Self> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        // 创建数据库连接（共享连接）
        let conn = Arc::new(Mutex::new(open_connection(Some(db_path))?));
        let config_manager = Arc::new(ConfigManager::from_connection(conn.clone()));

        Self::assemble(
            Some(db_path.to_string()),
            config_manager,
            Arc::new(SqlitePlanRepository::new(conn.clone())),
            Arc::new(SqliteProductionLog::new(conn.clone())),
            Arc::new(SqliteRegistryRepository::new(conn)),
        )
    }

    fn assemble(
        db_path: Option<String>,
        config_manager: Arc<ConfigManager>,
        plans: Arc<dyn PlanRepository>,
        log: Arc<dyn ProductionLogRepository>,
        registry: Arc<dyn RegistryRepository>,
    ) -> ApiResult<Self> {
        if registry.seed_defaults()? {
            tracing::info!("注册表为空, 已写入预置型号与类别");
        }

        let layout = Arc::new(config_manager.get_plant_layout().map_err(config_error)?);
        tracing::debug!(
            areas = layout.all_areas().len(),
            crf_in_cf_pipeline = layout.crf_in_cf_pipeline(),
            "工厂布局已加载"
        );

        let entry_api = Arc::new(EntryApi::new(log.clone(), registry.clone(), layout.clone()));
        let plan_api = Arc::new(PlanApi::new(
            plans.clone(),
            registry.clone(),
            config_manager.clone(),
        ));
        let registry_api = Arc::new(RegistryApi::new(registry.clone()));
        let report_api = Arc::new(ReportApi::new(log, plans, registry, layout.clone()));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            config_manager,
            layout,
            entry_api,
            plan_api,
            registry_api,
            report_api,
        })
    }

    /// 界面语言 (读取失败时回退默认值)
    pub fn locale(&self) -> String {
        self.config_manager.get_locale().unwrap_or_else(|e| {
            tracing::warn!("读取界面语言失败: {}, 使用默认值", e);
            crate::config::DEFAULT_LOCALE.to_string()
        })
    }
}

fn open_connection(db_path: Option<&str>) -> ApiResult<Connection> {
    let conn = match db_path {
        Some(path) => crate::db::open_sqlite_connection(path),
        None => crate::db::open_in_memory_connection(),
    }
    .map_err(|e| ApiError::DatabaseConnectionError(e.to_string()))?;

    crate::db::ensure_schema(&conn)
        .map_err(|e| ApiError::DatabaseError(format!("数据库表结构初始化失败: {}", e)))?;
    Ok(conn)
}

// ==========================================
// 辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// # 返回
/// - 环境变量 CR_PLANT_DASHBOARD_DB_PATH (若设置)
/// - 否则: 用户数据目录/cr-plant-dashboard/cr_plant_dashboard.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试）
    if let Ok(path) = std::env::var("CR_PLANT_DASHBOARD_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./cr_plant_dashboard.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("cr-plant-dashboard");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("cr_plant_dashboard.db");
        }
    }

    path.to_string_lossy().to_string()
}
