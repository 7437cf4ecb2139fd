// ==========================================
// 测试数据构造器
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

use cr_plant_dashboard::api::ApiResult;
use cr_plant_dashboard::app::AppState;
use cr_plant_dashboard::domain::production::StagedEntry;
use cr_plant_dashboard::domain::types::{AreaId, ModelId, Period};

// ==========================================
// EntryBuilder - 录入行
// ==========================================
pub struct EntryBuilder {
    supervisor: String,
    category: String,
    model: String,
    quantity: u32,
}

impl EntryBuilder {
    /// 冷柜录入行 (类别 Chest Freezer)
    pub fn cf(model: &str, quantity: u32) -> Self {
        Self::new("Chest Freezer", model, quantity)
    }

    /// 饮水机录入行 (类别 Water Dispenser)
    pub fn wd(model: &str, quantity: u32) -> Self {
        Self::new("Water Dispenser", model, quantity)
    }

    /// CRF 零部件录入行 (类别 CRF Parts)
    pub fn crf(model: &str, quantity: u32) -> Self {
        Self::new("CRF Parts", model, quantity)
    }

    pub fn new(category: &str, model: &str, quantity: u32) -> Self {
        Self {
            supervisor: "Test Supervisor".to_string(),
            category: category.to_string(),
            model: model.to_string(),
            quantity,
        }
    }

    pub fn supervisor(mut self, name: &str) -> Self {
        self.supervisor = name.to_string();
        self
    }

    pub fn category(mut self, name: &str) -> Self {
        self.category = name.to_string();
        self
    }

    pub fn build(self) -> StagedEntry {
        StagedEntry::new(self.supervisor, self.category, ModelId::new(self.model), self.quantity)
    }
}

// ==========================================
// ScenarioBuilder - 计划 + 录入场景
// ==========================================
#[derive(Default)]
pub struct ScenarioBuilder {
    monthly: Vec<(Period, BTreeMap<ModelId, u32>)>,
    daily: Vec<(NaiveDate, BTreeMap<ModelId, u32>)>,
    batches: Vec<(AreaId, NaiveDateTime, Vec<StagedEntry>)>,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn monthly_plan(mut self, period: Period, entries: &[(&str, u32)]) -> Self {
        self.monthly.push((period, to_map(entries)));
        self
    }

    pub fn daily_plan(mut self, date: NaiveDate, entries: &[(&str, u32)]) -> Self {
        self.daily.push((date, to_map(entries)));
        self
    }

    pub fn batch(mut self, area: &str, at: NaiveDateTime, entries: Vec<EntryBuilder>) -> Self {
        self.batches.push((
            AreaId::from(area),
            at,
            entries.into_iter().map(EntryBuilder::build).collect(),
        ));
        self
    }

    /// 写入 AppState (计划先于录入), 返回写入的生产记录数
    pub fn apply(self, state: &AppState) -> ApiResult<usize> {
        for (period, entries) in &self.monthly {
            state.plan_api.save_monthly_plan(*period, entries)?;
        }
        for (date, entries) in &self.daily {
            state.plan_api.save_daily_plan(*date, entries)?;
        }
        let mut events = 0;
        for (area, at, batch) in &self.batches {
            events += state.entry_api.submit_entries_at(area, batch, *at)?.len();
        }
        Ok(events)
    }
}

fn to_map(entries: &[(&str, u32)]) -> BTreeMap<ModelId, u32> {
    entries
        .iter()
        .map(|(m, q)| (ModelId::from(*m), *q))
        .collect()
}
