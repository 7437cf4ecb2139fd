// ==========================================
// 冷柜/饮水机工厂生产看板 - 生产记录领域模型
// ==========================================
// 红线: 生产记录只追加,不修改、不删除
// 红线: 数量 > 0, 班组长非空
// ==========================================

use crate::domain::types::{truncate_to_minute, AreaId, ModelId, Period, ENTRY_TS_FORMAT};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// StagedEntry - 待提交录入行
// ==========================================
// 用途: 录入界面"加入列表"后暂存,批量提交时生成 ProductionEvent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedEntry {
    pub supervisor: String,
    pub category: String,
    pub model: ModelId,
    pub quantity: u32,
}

impl StagedEntry {
    pub fn new(
        supervisor: impl Into<String>,
        category: impl Into<String>,
        model: impl Into<ModelId>,
        quantity: u32,
    ) -> Self {
        Self {
            supervisor: supervisor.into(),
            category: category.into(),
            model: model.into(),
            quantity,
        }
    }
}

// ==========================================
// ProductionEvent - 生产记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionEvent {
    pub event_id: String,
    pub recorded_at: NaiveDateTime, // 分钟粒度
    pub area: AreaId,
    pub supervisor: String,
    pub category: String,
    pub model: ModelId,
    pub quantity: u32,
}

impl ProductionEvent {
    /// 由暂存行生成生产记录 (同批次共享时间戳)
    pub fn from_staged(area: &AreaId, entry: &StagedEntry, recorded_at: NaiveDateTime) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            recorded_at: truncate_to_minute(recorded_at),
            area: area.clone(),
            supervisor: entry.supervisor.trim().to_string(),
            category: entry.category.trim().to_string(),
            model: entry.model.clone(),
            quantity: entry.quantity,
        }
    }

    /// 报表日期 (取时间戳的日历日)
    pub fn report_date(&self) -> NaiveDate {
        self.recorded_at.date()
    }

    pub fn recorded_at_text(&self) -> String {
        self.recorded_at.format(ENTRY_TS_FORMAT).to_string()
    }

    /// 记录级不变量校验
    ///
    /// # 返回
    /// - `Ok(())`: 合法
    /// - `Err(String)`: 违规原因
    pub fn validate(&self) -> Result<(), String> {
        if self.supervisor.trim().is_empty() {
            return Err("班组长姓名不能为空".to_string());
        }
        if self.quantity == 0 {
            return Err(format!("生产数量必须大于 0 (model={})", self.model));
        }
        if self.model.is_blank() {
            return Err("型号不能为空".to_string());
        }
        Ok(())
    }
}

// ==========================================
// DateScope - 日期范围
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateScope {
    Day(NaiveDate),
    Month(Period),
    Range { from: NaiveDate, to: NaiveDate },
}

impl DateScope {
    /// 闭区间边界
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        match self {
            DateScope::Day(d) => (*d, *d),
            DateScope::Month(p) => (p.first_day(), p.last_day()),
            DateScope::Range { from, to } => (*from, *to),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let (from, to) = self.bounds();
        date >= from && date <= to
    }
}

// ==========================================
// EventFilter - 生产记录查询条件
// ==========================================
// 纯过滤,不做聚合; None 表示不限
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    pub dates: Option<DateScope>,
    pub areas: Option<Vec<AreaId>>,
    pub models: Option<Vec<ModelId>>,
    pub categories: Option<Vec<String>>,
}

impl EventFilter {
    pub fn on_day(date: NaiveDate) -> Self {
        Self {
            dates: Some(DateScope::Day(date)),
            ..Self::default()
        }
    }

    pub fn in_month(period: Period) -> Self {
        Self {
            dates: Some(DateScope::Month(period)),
            ..Self::default()
        }
    }

    pub fn with_areas(mut self, areas: Vec<AreaId>) -> Self {
        self.areas = Some(areas);
        self
    }

    pub fn with_area(self, area: Option<&AreaId>) -> Self {
        match area {
            Some(a) => self.with_areas(vec![a.clone()]),
            None => self,
        }
    }

    pub fn with_models(mut self, models: Vec<ModelId>) -> Self {
        self.models = Some(models);
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn matches(&self, event: &ProductionEvent) -> bool {
        if let Some(scope) = &self.dates {
            if !scope.contains(event.report_date()) {
                return false;
            }
        }
        if let Some(areas) = &self.areas {
            if !areas.contains(&event.area) {
                return false;
            }
        }
        if let Some(models) = &self.models {
            if !models.contains(&event.model) {
                return false;
            }
        }
        if let Some(categories) = &self.categories {
            if !categories.iter().any(|c| c == &event.category) {
                return false;
            }
        }
        true
    }
}
