// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用测试环境
// ==========================================

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::ops::Deref;
use tempfile::NamedTempFile;

use cr_plant_dashboard::api::{ApiError, ApiResult};
use cr_plant_dashboard::app::AppState;
use cr_plant_dashboard::domain::types::{AreaId, ModelId, Period};

/// API测试环境
///
/// 包含 AppState; SQLite 模式下持有临时文件
pub struct ApiTestEnv {
    pub state: AppState,

    // 临时文件（确保生命周期）
    _temp_file: Option<NamedTempFile>,
}

impl ApiTestEnv {
    /// 内存存储环境
    pub fn new() -> ApiResult<Self> {
        cr_plant_dashboard::logging::init_test();
        Ok(Self {
            state: AppState::in_memory()?,
            _temp_file: None,
        })
    }

    /// 临时 SQLite 文件环境
    pub fn with_sqlite() -> ApiResult<Self> {
        cr_plant_dashboard::logging::init_test();
        let temp_file =
            NamedTempFile::new().map_err(|e| ApiError::InternalError(e.to_string()))?;
        let db_path = temp_file.path().to_string_lossy().to_string();
        Ok(Self {
            state: AppState::with_sqlite(&db_path)?,
            _temp_file: Some(temp_file),
        })
    }

    /// 重新打开同一数据库文件 (验证持久化)
    pub fn reopen(&self) -> ApiResult<AppState> {
        let path = self
            .state
            .db_path
            .clone()
            .ok_or_else(|| ApiError::InvalidInput("内存环境无法重开".to_string()))?;
        AppState::with_sqlite(&path)
    }
}

impl Deref for ApiTestEnv {
    type Target = AppState;

    fn deref(&self) -> &AppState {
        &self.state
    }
}

// ==========================================
// 常用值
// ==========================================

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("非法日期")
}

pub fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(hour, minute, 0).expect("非法时间"))
}

pub fn period(y: i32, m: u32) -> Period {
    Period::new(y, m).expect("非法月份")
}

pub fn area(name: &str) -> AreaId {
    AreaId::from(name)
}

pub fn model(id: &str) -> ModelId {
    ModelId::from(id)
}
