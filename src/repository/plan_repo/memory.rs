use super::PlanRepository;
use crate::domain::plan::PlanGranularity;
use crate::domain::types::{ModelId, Period};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct PlanTables {
    monthly: HashMap<Period, BTreeMap<ModelId, u32>>,
    daily: HashMap<NaiveDate, BTreeMap<ModelId, u32>>,
    defaults: HashMap<(ModelId, PlanGranularity), u32>,
}

// ==========================================
// InMemoryPlanRepository - 内存计划仓储
// ==========================================
// 进程退出即丢失
#[derive(Debug, Default)]
pub struct InMemoryPlanRepository {
    tables: Mutex<PlanTables>,
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, PlanTables>> {
        self.tables
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl PlanRepository for InMemoryPlanRepository {
    fn save_monthly(
        &self,
        period: Period,
        entries: &[(ModelId, u32)],
        update_defaults: bool,
    ) -> RepositoryResult<usize> {
        let mut tables = self.lock()?;
        for (model, qty) in entries {
            tables
                .monthly
                .entry(period)
                .or_default()
                .insert(model.clone(), *qty);
            if update_defaults {
                tables
                    .defaults
                    .insert((model.clone(), PlanGranularity::Monthly), *qty);
            }
        }
        Ok(entries.len())
    }

    fn save_daily(
        &self,
        date: NaiveDate,
        entries: &[(ModelId, u32)],
        update_defaults: bool,
    ) -> RepositoryResult<usize> {
        let mut tables = self.lock()?;
        for (model, qty) in entries {
            tables
                .daily
                .entry(date)
                .or_default()
                .insert(model.clone(), *qty);
            if update_defaults {
                tables
                    .defaults
                    .insert((model.clone(), PlanGranularity::Daily), *qty);
            }
        }
        Ok(entries.len())
    }

    fn find_monthly(&self, period: Period, model: &ModelId) -> RepositoryResult<Option<u32>> {
        let tables = self.lock()?;
        Ok(tables
            .monthly
            .get(&period)
            .and_then(|m| m.get(model))
            .copied())
    }

    fn find_daily(&self, date: NaiveDate, model: &ModelId) -> RepositoryResult<Option<u32>> {
        let tables = self.lock()?;
        Ok(tables.daily.get(&date).and_then(|m| m.get(model)).copied())
    }

    fn find_default(
        &self,
        model: &ModelId,
        granularity: PlanGranularity,
    ) -> RepositoryResult<Option<u32>> {
        let tables = self.lock()?;
        Ok(tables.defaults.get(&(model.clone(), granularity)).copied())
    }

    fn list_monthly(&self, period: Period) -> RepositoryResult<BTreeMap<ModelId, u32>> {
        let tables = self.lock()?;
        Ok(tables.monthly.get(&period).cloned().unwrap_or_default())
    }

    fn list_daily(&self, date: NaiveDate) -> RepositoryResult<BTreeMap<ModelId, u32>> {
        let tables = self.lock()?;
        Ok(tables.daily.get(&date).cloned().unwrap_or_default())
    }
}
