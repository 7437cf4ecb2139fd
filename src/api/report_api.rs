// ==========================================
// 冷柜/饮水机工厂生产看板 - 报表 API
// ==========================================
// 职责: WIP 看板 / 日达成 / 月度计划实绩
// 红线: 报表只读, 不写任何存储
// ==========================================

use chrono::NaiveDate;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::layout::{DivisionKind, PlantLayout};
use crate::domain::production::EventFilter;
use crate::domain::report::{DailyAchievementReport, MonthlyReport, WipReport};
use crate::domain::types::{AreaId, Period};
use crate::engine::reconciliation::ReconciliationEngine;
use crate::repository::plan_repo::PlanRepository;
use crate::repository::production_log_repo::ProductionLogRepository;
use crate::repository::registry_repo::RegistryRepository;

// ==========================================
// ReportApi - 报表 API
// ==========================================
pub struct ReportApi {
    log: Arc<dyn ProductionLogRepository>,
    plans: Arc<dyn PlanRepository>,
    registry: Arc<dyn RegistryRepository>,
    layout: Arc<PlantLayout>,
    engine: ReconciliationEngine,
}

impl ReportApi {
    pub fn new(
        log: Arc<dyn ProductionLogRepository>,
        plans: Arc<dyn PlanRepository>,
        registry: Arc<dyn RegistryRepository>,
        layout: Arc<PlantLayout>,
    ) -> Self {
        Self {
            log,
            plans,
            registry,
            layout,
            engine: ReconciliationEngine::new(),
        }
    }

    fn check_area(&self, area: Option<&AreaId>) -> ApiResult<()> {
        match area {
            Some(a) if !self.layout.is_known_area(a) => {
                Err(ApiError::InvalidInput(format!("未知生产区域: {}", a)))
            }
            _ => Ok(()),
        }
    }

    /// 事业部 WIP 看板
    pub fn get_wip_report(&self, kind: DivisionKind, date: NaiveDate) -> ApiResult<WipReport> {
        let division = self.layout.division(kind);
        let events = self
            .log
            .query(&EventFilter::on_day(date).with_areas(division.areas.clone()))?;
        let registry = self.registry.snapshot()?;

        Ok(self
            .engine
            .wip_report(&division, date, &events, &registry, self.plans.as_ref())?)
    }

    /// 日达成报表 (区域为 None 表示全部区域)
    pub fn get_daily_achievement(
        &self,
        date: NaiveDate,
        area: Option<&AreaId>,
    ) -> ApiResult<DailyAchievementReport> {
        self.check_area(area)?;
        let events = self
            .log
            .query(&EventFilter::on_day(date).with_area(area))?;

        Ok(self
            .engine
            .daily_achievement(date, area, &events, self.plans.as_ref())?)
    }

    /// 月度计划实绩报表 (区域为 None 表示全部区域)
    pub fn get_monthly_report(
        &self,
        period: Period,
        area: Option<&AreaId>,
    ) -> ApiResult<MonthlyReport> {
        self.check_area(area)?;
        let events = self
            .log
            .query(&EventFilter::in_month(period).with_area(area))?;
        let registry = self.registry.snapshot()?;

        Ok(self.engine.monthly_report(
            period,
            area,
            &events,
            &registry,
            &self.layout,
            self.plans.as_ref(),
        )?)
    }

    pub fn layout(&self) -> &PlantLayout {
        &self.layout
    }
}
