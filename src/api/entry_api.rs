// ==========================================
// 冷柜/饮水机工厂生产看板 - 生产录入 API
// ==========================================
// 职责: 录入选项、暂存列表、批量提交、记录查询
// 红线: 同批次共享同一分钟时间戳
// 红线: 整批校验通过后才写入, 失败不产生任何记录
// ==========================================

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::EntryValidator;
use crate::domain::layout::PlantLayout;
use crate::domain::production::{EventFilter, ProductionEvent, StagedEntry};
use crate::domain::types::{AreaId, ModelId, ProductLine};
use crate::repository::production_log_repo::ProductionLogRepository;
use crate::repository::registry_repo::RegistryRepository;

// ==========================================
// EntryOptions - 区域录入选项
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryOptions {
    pub area: AreaId,
    pub line: ProductLine,
    pub categories: Vec<String>,
    /// 仅启用型号
    pub models: Vec<ModelId>,
}

// ==========================================
// EntryApi - 生产录入 API
// ==========================================
pub struct EntryApi {
    log: Arc<dyn ProductionLogRepository>,
    registry: Arc<dyn RegistryRepository>,
    validator: EntryValidator,
    // 区域 → 待提交列表 ("加入列表" 后暂存)
    pending: Mutex<HashMap<AreaId, Vec<StagedEntry>>>,
}

impl EntryApi {
    pub fn new(
        log: Arc<dyn ProductionLogRepository>,
        registry: Arc<dyn RegistryRepository>,
        layout: Arc<PlantLayout>,
    ) -> Self {
        Self {
            log,
            registry,
            validator: EntryValidator::new(layout),
            pending: Mutex::new(HashMap::new()),
        }
    }

    fn lock_pending(&self) -> ApiResult<MutexGuard<'_, HashMap<AreaId, Vec<StagedEntry>>>> {
        self.pending
            .lock()
            .map_err(|e| ApiError::InternalError(format!("暂存列表锁获取失败: {}", e)))
    }

    // ==========================================
    // 录入选项
    // ==========================================

    /// 区域可选的类别与启用型号
    pub fn entry_options(&self, area: &AreaId) -> ApiResult<EntryOptions> {
        let line = self.validator.validate_area(area)?;
        let snapshot = self.registry.snapshot()?;

        Ok(EntryOptions {
            area: area.clone(),
            line,
            categories: snapshot.categories_of(line).map(|c| c.name.clone()).collect(),
            models: snapshot
                .active_models_of(&[line])
                .map(|m| m.model_id.clone())
                .collect(),
        })
    }

    // ==========================================
    // 暂存列表
    // ==========================================

    /// 加入待提交列表 (逐行校验)
    ///
    /// # 返回
    /// - Ok(usize): 该区域待提交行数
    pub fn stage_entry(&self, area: &AreaId, entry: StagedEntry) -> ApiResult<usize> {
        let snapshot = self.registry.snapshot()?;
        self.validator
            .validate_batch(area, std::slice::from_ref(&entry), &snapshot)?;

        let mut pending = self.lock_pending()?;
        let list = pending.entry(area.clone()).or_default();
        list.push(entry);
        Ok(list.len())
    }

    pub fn pending_entries(&self, area: &AreaId) -> ApiResult<Vec<StagedEntry>> {
        let pending = self.lock_pending()?;
        Ok(pending.get(area).cloned().unwrap_or_default())
    }

    /// 清空待提交列表, 返回丢弃行数
    pub fn discard_pending(&self, area: &AreaId) -> ApiResult<usize> {
        let mut pending = self.lock_pending()?;
        Ok(pending.remove(area).map(|l| l.len()).unwrap_or(0))
    }

    /// 提交待提交列表
    ///
    /// 提交失败时列表保留, 成功后清空
    pub fn commit_pending(&self, area: &AreaId) -> ApiResult<Vec<ProductionEvent>> {
        let mut pending = self.lock_pending()?;
        let batch = pending.get(area).cloned().unwrap_or_default();
        let events = self.submit_entries(area, &batch)?;
        pending.remove(area);
        Ok(events)
    }

    // ==========================================
    // 批量提交
    // ==========================================

    /// 批量提交 (当前时间)
    pub fn submit_entries(
        &self,
        area: &AreaId,
        batch: &[StagedEntry],
    ) -> ApiResult<Vec<ProductionEvent>> {
        self.submit_entries_at(area, batch, Local::now().naive_local())
    }

    /// 批量提交 (指定时间, 截断到分钟)
    ///
    /// # 返回
    /// - Ok(Vec<ProductionEvent>): 已写入记录 (空批次返回空列表)
    /// - Err(ValidationError / EntryValidationError): 整批拒绝
    pub fn submit_entries_at(
        &self,
        area: &AreaId,
        batch: &[StagedEntry],
        recorded_at: NaiveDateTime,
    ) -> ApiResult<Vec<ProductionEvent>> {
        let snapshot = self.registry.snapshot()?;
        let line = self.validator.validate_batch(area, batch, &snapshot)?;

        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let events: Vec<ProductionEvent> = batch
            .iter()
            .map(|entry| ProductionEvent::from_staged(area, entry, recorded_at))
            .collect();
        self.log.append_batch(&events)?;

        tracing::info!(
            area = %area,
            line = %line,
            count = events.len(),
            "生产记录已提交"
        );
        Ok(events)
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn query_events(&self, filter: &EventFilter) -> ApiResult<Vec<ProductionEvent>> {
        Ok(self.log.query(filter)?)
    }

    pub fn event_count(&self) -> ApiResult<usize> {
        Ok(self.log.count()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::production_log_repo::InMemoryProductionLog;
    use crate::repository::registry_repo::InMemoryRegistryRepository;
    use chrono::NaiveDate;

    fn api() -> EntryApi {
        let registry = Arc::new(InMemoryRegistryRepository::new());
        registry.seed_defaults().unwrap();
        EntryApi::new(
            Arc::new(InMemoryProductionLog::new()),
            registry,
            Arc::new(PlantLayout::default()),
        )
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 3)
            .unwrap()
            .and_hms_opt(14, 7, 42)
            .unwrap()
    }

    #[test]
    fn test_submit_shares_minute_timestamp() {
        let api = api();
        let area = AreaId::from("CF Final Line");
        let batch = vec![
            StagedEntry::new("Ravi", "Chest Freezer", "CF-Model-100", 4),
            StagedEntry::new("Ravi", "Chest Freezer", "CF-Model-200", 6),
        ];
        let events = api.submit_entries_at(&area, &batch, at()).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].recorded_at, events[1].recorded_at);
        assert_eq!(events[0].recorded_at_text(), "2025-11-03 14:07");
        assert_eq!(events[1].quantity, 6);
        assert_ne!(events[0].event_id, events[1].event_id);
        assert_eq!(api.event_count().unwrap(), 2);
    }

    #[test]
    fn test_invalid_row_rejects_batch() {
        let api = api();
        let area = AreaId::from("CF Final Line");
        let batch = vec![
            StagedEntry::new("Ravi", "Chest Freezer", "CF-Model-100", 4),
            StagedEntry::new("Ravi", "Chest Freezer", "CF-Model-100", 0),
        ];
        let err = api.submit_entries_at(&area, &batch, at()).unwrap_err();
        assert!(matches!(err, ApiError::EntryValidationError { .. }));
        assert_eq!(api.event_count().unwrap(), 0);
    }

    #[test]
    fn test_empty_batch_writes_nothing() {
        let api = api();
        let events = api
            .submit_entries_at(&AreaId::from("CRF"), &[], at())
            .unwrap();
        assert!(events.is_empty());
        assert_eq!(api.event_count().unwrap(), 0);
    }

    #[test]
    fn test_stage_and_commit() {
        let api = api();
        let area = AreaId::from("WD Final Line");
        api.stage_entry(&area, StagedEntry::new("Meera", "Water Dispenser", "WD-Model-A", 2))
            .unwrap();
        let n = api
            .stage_entry(&area, StagedEntry::new("Meera", "Water Dispenser", "WD-Model-B", 3))
            .unwrap();
        assert_eq!(n, 2);

        // 非法行不进入列表
        assert!(api
            .stage_entry(&area, StagedEntry::new("Meera", "Water Dispenser", "CF-Model-100", 1))
            .is_err());
        assert_eq!(api.pending_entries(&area).unwrap().len(), 2);

        let events = api.commit_pending(&area).unwrap();
        assert_eq!(events.len(), 2);
        assert!(api.pending_entries(&area).unwrap().is_empty());
    }

    #[test]
    fn test_discard_pending() {
        let api = api();
        let area = AreaId::from("CRF");
        api.stage_entry(&area, StagedEntry::new("Ravi", "CRF Parts", "CRF-Part-A", 10))
            .unwrap();
        assert_eq!(api.discard_pending(&area).unwrap(), 1);
        assert_eq!(api.discard_pending(&area).unwrap(), 0);
    }

    #[test]
    fn test_entry_options_per_area() {
        let api = api();
        let opts = api.entry_options(&AreaId::from("CRF")).unwrap();
        assert_eq!(opts.line, ProductLine::PartsSupply);
        assert_eq!(opts.categories, vec!["CRF Parts".to_string()]);
        assert_eq!(
            opts.models,
            vec![ModelId::from("CRF-Part-A"), ModelId::from("CRF-Part-B")]
        );
        assert!(api.entry_options(&AreaId::from("Paint Shop")).is_err());
    }
}
