// ==========================================
// 冷柜/饮水机工厂生产看板 - 计划取值引擎
// ==========================================
// 红线: 取值层级为显式有序列表, 命中即返回
// 红线: 全部层级未命中返回 None, 不返回 0
// ==========================================
// 月计划层级: 指定月份 → 型号默认值 → 缺失
// 日计划层级: 指定日期 → 缺失 (不跨日期回退)
// ==========================================

use crate::domain::plan::{PlanGranularity, PlanSource, ResolvedTarget};
use crate::domain::types::{ModelId, Period};
use crate::repository::error::RepositoryResult;
use crate::repository::plan_repo::PlanRepository;
use chrono::NaiveDate;

// ==========================================
// MonthlyLookupTier - 月计划取值层级
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthlyLookupTier {
    PeriodEntry,
    ModelDefault,
}

impl MonthlyLookupTier {
    /// 默认层级顺序
    pub const CHAIN: [MonthlyLookupTier; 2] =
        [MonthlyLookupTier::PeriodEntry, MonthlyLookupTier::ModelDefault];

    pub fn source(&self) -> PlanSource {
        match self {
            MonthlyLookupTier::PeriodEntry => PlanSource::PeriodEntry,
            MonthlyLookupTier::ModelDefault => PlanSource::ModelDefault,
        }
    }

    /// 单层查找
    pub fn lookup(
        &self,
        plans: &dyn PlanRepository,
        period: Period,
        model: &ModelId,
    ) -> RepositoryResult<Option<u32>> {
        match self {
            MonthlyLookupTier::PeriodEntry => plans.find_monthly(period, model),
            MonthlyLookupTier::ModelDefault => {
                plans.find_default(model, PlanGranularity::Monthly)
            }
        }
    }
}

// ==========================================
// DailyLookupTier - 日计划取值层级
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyLookupTier {
    DateEntry,
}

impl DailyLookupTier {
    pub const CHAIN: [DailyLookupTier; 1] = [DailyLookupTier::DateEntry];

    pub fn source(&self) -> PlanSource {
        match self {
            DailyLookupTier::DateEntry => PlanSource::DateEntry,
        }
    }

    pub fn lookup(
        &self,
        plans: &dyn PlanRepository,
        date: NaiveDate,
        model: &ModelId,
    ) -> RepositoryResult<Option<u32>> {
        match self {
            DailyLookupTier::DateEntry => plans.find_daily(date, model),
        }
    }
}

// ==========================================
// PlanResolver - 计划取值器
// ==========================================
pub struct PlanResolver<'a> {
    plans: &'a dyn PlanRepository,
}

impl<'a> PlanResolver<'a> {
    pub fn new(plans: &'a dyn PlanRepository) -> Self {
        Self { plans }
    }

    /// 按默认层级解析月计划
    pub fn resolve_monthly(
        &self,
        period: Period,
        model: &ModelId,
    ) -> RepositoryResult<Option<ResolvedTarget>> {
        self.resolve_monthly_with(&MonthlyLookupTier::CHAIN, period, model)
    }

    /// 按指定层级解析月计划
    pub fn resolve_monthly_with(
        &self,
        tiers: &[MonthlyLookupTier],
        period: Period,
        model: &ModelId,
    ) -> RepositoryResult<Option<ResolvedTarget>> {
        for tier in tiers {
            if let Some(qty) = tier.lookup(self.plans, period, model)? {
                return Ok(Some(ResolvedTarget {
                    qty,
                    source: tier.source(),
                }));
            }
        }
        Ok(None)
    }

    pub fn resolve_daily(
        &self,
        date: NaiveDate,
        model: &ModelId,
    ) -> RepositoryResult<Option<ResolvedTarget>> {
        for tier in DailyLookupTier::CHAIN {
            if let Some(qty) = tier.lookup(self.plans, date, model)? {
                return Ok(Some(ResolvedTarget {
                    qty,
                    source: tier.source(),
                }));
            }
        }
        Ok(None)
    }
}
