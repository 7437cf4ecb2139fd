// ==========================================
// 冷柜/饮水机工厂生产看板 - 区域汇总
// ==========================================
// 职责: 区域实绩汇总 / 事业部计划汇总
// 红线: 实绩为整数且 ≥ 0, 永不缺失
// 红线: 计划全部缺失 → 缺失; 否则缺失项按 0 计
// ==========================================

use crate::domain::layout::Division;
use crate::domain::production::ProductionEvent;
use crate::domain::registry::RegistrySnapshot;
use crate::domain::types::AreaId;
use chrono::NaiveDate;

/// 区域当日实绩
///
/// 只统计型号归属事业部产品线的记录 (含已停用型号的历史记录)
pub fn area_actual(
    area: &AreaId,
    date: NaiveDate,
    division: &Division,
    events: &[ProductionEvent],
    registry: &RegistrySnapshot,
) -> i64 {
    events
        .iter()
        .filter(|e| &e.area == area && e.report_date() == date)
        .filter(|e| {
            registry
                .line_of(&e.model)
                .map(|line| division.covers_line(line))
                .unwrap_or(false)
        })
        .map(|e| i64::from(e.quantity))
        .sum()
}

/// 事业部计划汇总
///
/// # 规则
/// - 无型号或全部缺失 → None
/// - 否则缺失项按 0 计
pub fn sum_plans<I>(plans: I) -> Option<i64>
where
    I: IntoIterator<Item = Option<u32>>,
{
    plans.into_iter().fold(None, |acc, p| match (acc, p) {
        (acc, None) => acc,
        (None, Some(q)) => Some(i64::from(q)),
        (Some(total), Some(q)) => Some(total + i64::from(q)),
    })
}

/// 当日事业部区域内是否有任何记录
pub fn has_activity(date: NaiveDate, division: &Division, events: &[ProductionEvent]) -> bool {
    events
        .iter()
        .any(|e| e.report_date() == date && division.covers_area(&e.area))
}
