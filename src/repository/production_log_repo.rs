// ==========================================
// 冷柜/饮水机工厂生产看板 - 生产记录仓储
// ==========================================
// 红线: 只追加,不修改,不删除
// 红线: 批量追加为原子操作 (全部成功或全部失败)
// ==========================================
// 存储边界: 内存实现 (默认) / SQLite 实现
// ==========================================

mod memory;
mod sqlite;

#[cfg(test)]
mod tests;

pub use memory::InMemoryProductionLog;
pub use sqlite::SqliteProductionLog;

use crate::domain::production::{EventFilter, ProductionEvent};
use crate::repository::error::{RepositoryError, RepositoryResult};

// ==========================================
// ProductionLogRepository - 生产记录仓储接口
// ==========================================
pub trait ProductionLogRepository: Send + Sync {
    /// 追加单条记录
    fn append(&self, event: &ProductionEvent) -> RepositoryResult<()> {
        self.append_batch(std::slice::from_ref(event)).map(|_| ())
    }

    /// 原子追加一批记录
    ///
    /// # 返回
    /// - `Ok(n)`: 追加条数
    /// - `Err(ValidationError)`: 任一记录非法, 整批不写入
    fn append_batch(&self, events: &[ProductionEvent]) -> RepositoryResult<usize>;

    /// 按条件过滤 (按追加顺序返回)
    fn query(&self, filter: &EventFilter) -> RepositoryResult<Vec<ProductionEvent>>;

    /// 记录总数
    fn count(&self) -> RepositoryResult<usize>;
}

/// 追加前的整批校验
pub(crate) fn validate_batch(events: &[ProductionEvent]) -> RepositoryResult<()> {
    for event in events {
        event.validate().map_err(RepositoryError::ValidationError)?;
    }
    Ok(())
}
