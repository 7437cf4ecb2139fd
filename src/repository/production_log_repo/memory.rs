use super::{validate_batch, ProductionLogRepository};
use crate::domain::production::{EventFilter, ProductionEvent};
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::sync::{Mutex, MutexGuard};

// ==========================================
// InMemoryProductionLog - 内存生产记录
// ==========================================
// 进程生命周期内单调增长
#[derive(Debug, Default)]
pub struct InMemoryProductionLog {
    events: Mutex<Vec<ProductionEvent>>,
}

impl InMemoryProductionLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Vec<ProductionEvent>>> {
        self.events
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl ProductionLogRepository for InMemoryProductionLog {
    fn append_batch(&self, events: &[ProductionEvent]) -> RepositoryResult<usize> {
        validate_batch(events)?;
        let mut log = self.lock()?;
        log.extend_from_slice(events);
        Ok(events.len())
    }

    fn query(&self, filter: &EventFilter) -> RepositoryResult<Vec<ProductionEvent>> {
        let log = self.lock()?;
        Ok(log.iter().filter(|e| filter.matches(e)).cloned().collect())
    }

    fn count(&self) -> RepositoryResult<usize> {
        Ok(self.lock()?.len())
    }
}
