// ==========================================
// 冷柜/饮水机工厂生产看板 - 计划实绩对账引擎
// ==========================================
// 红线: 引擎无状态, 不写任何存储
// 红线: 计划缺失以 None 贯穿全流程, 仅在展示层显示 N/A
// ==========================================
// 职责: WIP 看板 / 日达成 / 月度计划实绩 三类报表
// 输入: 事业部 + 日期/月份 + 生产记录 + 计划仓储 + 注册表快照
// 输出: WipReport / DailyAchievementReport / MonthlyReport
// ==========================================

use crate::domain::layout::{Division, PlantLayout};
use crate::domain::production::ProductionEvent;
use crate::domain::registry::RegistrySnapshot;
use crate::domain::report::{
    ActualSource, DailyAchievementReport, DailyAchievementRow, ModelTotal, MonthlyReport,
    MonthlyReportRow, WipReport, WipRow, WipRowKind,
};
use crate::domain::types::{AreaId, ModelId, Period, ProductLine};
use crate::engine::achievement::{
    achievement_tone, per_day_achievement, ratio_achievement, variance, wip_tone,
};
use crate::engine::aggregation::{area_actual, has_activity, sum_plans};
use crate::engine::plan_resolver::PlanResolver;
use crate::engine::wip::interleave;
use crate::repository::error::RepositoryResult;
use crate::repository::plan_repo::PlanRepository;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::instrument;

// ==========================================
// ActualSourceTier - 月度实绩取数层级
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActualSourceTier {
    TerminalArea, // 产品线末道工序
    AllAreas,     // 全部区域
}

impl ActualSourceTier {
    /// 末道工序为 0 时回退到全部区域
    pub const CHAIN: [ActualSourceTier; 2] =
        [ActualSourceTier::TerminalArea, ActualSourceTier::AllAreas];

    pub fn source(&self) -> ActualSource {
        match self {
            ActualSourceTier::TerminalArea => ActualSource::TerminalArea,
            ActualSourceTier::AllAreas => ActualSource::AllAreas,
        }
    }

    /// 型号在给定记录中的实绩
    pub fn actual(
        &self,
        model: &ModelId,
        line: Option<ProductLine>,
        events: &[ProductionEvent],
        layout: &PlantLayout,
    ) -> i64 {
        let of_model = events.iter().filter(|e| &e.model == model);
        match self {
            ActualSourceTier::TerminalArea => {
                let terminal = match line.and_then(|l| layout.terminal_area(l)) {
                    Some(area) => area,
                    None => return 0,
                };
                of_model
                    .filter(|e| &e.area == terminal)
                    .map(|e| i64::from(e.quantity))
                    .sum()
            }
            ActualSourceTier::AllAreas => of_model.map(|e| i64::from(e.quantity)).sum(),
        }
    }

    /// 按层级顺序取第一个非 0 实绩; 全部为 0 时取最后一层
    pub fn resolve(
        model: &ModelId,
        line: Option<ProductLine>,
        events: &[ProductionEvent],
        layout: &PlantLayout,
    ) -> (i64, ActualSource) {
        let mut last = (0, ActualSource::AllAreas);
        for tier in Self::CHAIN {
            let actual = tier.actual(model, line, events, layout);
            last = (actual, tier.source());
            if actual != 0 {
                break;
            }
        }
        last
    }
}

// ==========================================
// ReconciliationEngine - 对账引擎
// ==========================================
pub struct ReconciliationEngine {
    // 无状态引擎
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconciliationEngine {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // WIP 看板
    // ==========================================

    /// 生成事业部 WIP 看板
    ///
    /// 步骤:
    /// 1) 区域当日实绩 (事业部产品线型号)
    /// 2) 事业部月计划汇总 (启用型号, 各区域同值)
    /// 3) 相邻区域 WIP 差值
    /// 4) 区域行按日目标评分
    /// 5) 区域行与 WIP 行交错排列
    #[instrument(skip(self, events, registry, plans), fields(division = %division.kind, date = %date))]
    pub fn wip_report(
        &self,
        division: &Division,
        date: NaiveDate,
        events: &[ProductionEvent],
        registry: &RegistrySnapshot,
        plans: &dyn PlanRepository,
    ) -> RepositoryResult<WipReport> {
        let period = Period::of(date);
        let days_in_month = period.days_in_month();

        // 步骤 2
        let resolver = PlanResolver::new(plans);
        let mut resolved = Vec::new();
        for model in registry.active_models_of(&division.lines) {
            let target = resolver.resolve_monthly(period, &model.model_id)?;
            resolved.push(target.map(|t| t.qty));
        }
        let division_plan = sum_plans(resolved);

        // 步骤 1 + 4
        let area_rows: Vec<WipRow> = division
            .areas
            .iter()
            .map(|area| {
                let actual = area_actual(area, date, division, events, registry);
                WipRow {
                    label: area.to_string(),
                    kind: WipRowKind::Area,
                    areas: vec![area.clone()],
                    plan: division_plan,
                    actual,
                    achievement_pct: per_day_achievement(division_plan, actual, days_in_month),
                    tone: wip_tone(division_plan, actual, days_in_month),
                }
            })
            .collect();

        // 步骤 3 + 5
        let rows = interleave(area_rows, |plan, actual| {
            wip_tone(plan, actual, days_in_month)
        });

        let activity = has_activity(date, division, events);
        tracing::debug!(
            rows = rows.len(),
            plan = ?division_plan,
            has_activity = activity,
            "WIP 看板生成完成"
        );

        Ok(WipReport {
            division: division.kind,
            date,
            period,
            days_in_month,
            has_activity: activity,
            rows,
        })
    }

    // ==========================================
    // 日达成报表
    // ==========================================

    /// 按 (型号, 区域) 汇总当日实绩, 对比日计划
    ///
    /// `events` 须已按日期与区域过滤
    #[instrument(skip(self, events, plans), fields(date = %date, count = events.len()))]
    pub fn daily_achievement(
        &self,
        date: NaiveDate,
        area_filter: Option<&AreaId>,
        events: &[ProductionEvent],
        plans: &dyn PlanRepository,
    ) -> RepositoryResult<DailyAchievementReport> {
        let mut grouped: BTreeMap<(ModelId, AreaId), i64> = BTreeMap::new();
        for event in events.iter().filter(|e| e.report_date() == date) {
            if area_filter.map_or(false, |a| a != &event.area) {
                continue;
            }
            *grouped
                .entry((event.model.clone(), event.area.clone()))
                .or_insert(0) += i64::from(event.quantity);
        }

        let resolver = PlanResolver::new(plans);
        let mut rows = Vec::with_capacity(grouped.len());
        let mut totals: BTreeMap<ModelId, i64> = BTreeMap::new();
        for ((model, area), actual) in grouped {
            let plan = resolver.resolve_daily(date, &model)?.map(|t| t.qty);
            let pct = ratio_achievement(plan.map(i64::from), actual);
            *totals.entry(model.clone()).or_insert(0) += actual;
            rows.push(DailyAchievementRow {
                model,
                area,
                plan,
                actual,
                achievement_pct: pct,
                tone: achievement_tone(pct),
            });
        }

        let totals_by_model = totals
            .into_iter()
            .map(|(model, actual)| ModelTotal { model, actual })
            .collect();

        Ok(DailyAchievementReport {
            date,
            area_filter: area_filter.cloned(),
            rows,
            totals_by_model,
        })
    }

    // ==========================================
    // 月度计划实绩报表
    // ==========================================

    /// 按全部已知型号 (含停用) 对比月计划与月实绩
    ///
    /// # 规则
    /// - 当月 (区域过滤后) 无记录 → 空报表
    /// - 实绩取末道工序, 为 0 时汇总全部区域
    /// - 计划缺失或为 0 且实绩为 0 的型号不出行
    /// - 类别取该型号当月首条记录的类别
    #[instrument(skip(self, events, registry, layout, plans), fields(period = %period, count = events.len()))]
    pub fn monthly_report(
        &self,
        period: Period,
        area_filter: Option<&AreaId>,
        events: &[ProductionEvent],
        registry: &RegistrySnapshot,
        layout: &PlantLayout,
        plans: &dyn PlanRepository,
    ) -> RepositoryResult<MonthlyReport> {
        let in_scope: Vec<ProductionEvent> = events
            .iter()
            .filter(|e| period.contains(e.report_date()))
            .filter(|e| area_filter.map_or(true, |a| a == &e.area))
            .cloned()
            .collect();

        let mut rows = Vec::new();
        if in_scope.is_empty() {
            tracing::debug!("当月无生产记录, 月报为空");
            return Ok(MonthlyReport {
                period,
                area_filter: area_filter.cloned(),
                rows,
            });
        }

        let resolver = PlanResolver::new(plans);
        for model in registry.all_model_ids_sorted() {
            let planned = resolver.resolve_monthly(period, &model)?.map(|t| t.qty);
            let line = registry.line_of(&model);
            let (actual, actual_source) =
                ActualSourceTier::resolve(&model, line, &in_scope, layout);

            if planned.unwrap_or(0) == 0 && actual == 0 {
                continue;
            }

            let category = in_scope
                .iter()
                .find(|e| e.model == model)
                .map(|e| e.category.clone());
            let (variance, variance_sign) = match variance(planned, actual) {
                Some((v, sign)) => (Some(v), Some(sign)),
                None => (None, None),
            };

            rows.push(MonthlyReportRow {
                model,
                category,
                planned,
                actual,
                actual_source,
                variance,
                variance_sign,
            });
        }

        Ok(MonthlyReport {
            period,
            area_filter: area_filter.cloned(),
            rows,
        })
    }
}
