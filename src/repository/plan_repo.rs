// ==========================================
// 冷柜/饮水机工厂生产看板 - 计划数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑 (取值层级由引擎决定)
// 红线: 未保存的 (期间, 型号) 必须查不到, 不得返回 0
// ==========================================
// 存储边界: 内存实现 (默认, 进程内有效) / SQLite 实现 (文件持久化)
// ==========================================

mod memory;
mod sqlite;


pub use memory::InMemoryPlanRepository;
pub use sqlite::SqlitePlanRepository;

use crate::domain::plan::PlanGranularity;
use crate::domain::types::{ModelId, Period};
use crate::repository::error::RepositoryResult;
use chrono::NaiveDate;
use std::collections::BTreeMap;

// ==========================================
// PlanRepository - 计划仓储接口
// ==========================================
pub trait PlanRepository: Send + Sync {
    /// 批量写入月计划 (整体覆写), 原子执行
    ///
    /// # 参数
    /// - `period`: 计划月份
    /// - `entries`: (型号, 数量) 列表
    /// - `update_defaults`: 是否同时刷新型号的月计划默认值
    ///
    /// # 返回
    /// - `Ok(n)`: 写入条数
    fn save_monthly(
        &self,
        period: Period,
        entries: &[(ModelId, u32)],
        update_defaults: bool,
    ) -> RepositoryResult<usize>;

    /// 批量写入日计划 (整体覆写), 原子执行
    fn save_daily(
        &self,
        date: NaiveDate,
        entries: &[(ModelId, u32)],
        update_defaults: bool,
    ) -> RepositoryResult<usize>;

    /// 查询指定月份的月计划
    fn find_monthly(&self, period: Period, model: &ModelId) -> RepositoryResult<Option<u32>>;

    /// 查询指定日期的日计划
    fn find_daily(&self, date: NaiveDate, model: &ModelId) -> RepositoryResult<Option<u32>>;

    /// 查询型号最近一次保存的计划值
    fn find_default(
        &self,
        model: &ModelId,
        granularity: PlanGranularity,
    ) -> RepositoryResult<Option<u32>>;

    /// 指定月份的全部月计划
    fn list_monthly(&self, period: Period) -> RepositoryResult<BTreeMap<ModelId, u32>>;

    /// 指定日期的全部日计划
    fn list_daily(&self, date: NaiveDate) -> RepositoryResult<BTreeMap<ModelId, u32>>;
}
