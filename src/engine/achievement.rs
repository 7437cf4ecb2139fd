// ==========================================
// 冷柜/饮水机工厂生产看板 - 达成率评分
// ==========================================
// 红线: 计划缺失 → 达成率缺失 (不是 0%)
// 红线: 目标为 0 时: 实绩 0 → 0%, 实绩 > 0 → 100%
// 红线: 达成率无上限
// ==========================================

use crate::domain::report::{CellTone, VarianceSign};

/// 目标为 0 时的达成率
fn zero_target_pct(actual: i64) -> f64 {
    if actual == 0 {
        0.0
    } else {
        100.0
    }
}

/// 月计划折算日目标后的达成率 (WIP 看板区域行)
///
/// per_day = plan / days_in_month
pub fn per_day_achievement(plan: Option<i64>, actual: i64, days_in_month: u32) -> Option<f64> {
    let plan = plan?;
    if days_in_month == 0 {
        return None;
    }
    let per_day = plan as f64 / days_in_month as f64;
    if per_day == 0.0 {
        return Some(zero_target_pct(actual));
    }
    Some(actual as f64 / per_day * 100.0)
}

/// 实绩 / 目标 的达成率 (日达成报表, 不折算)
pub fn ratio_achievement(plan: Option<i64>, actual: i64) -> Option<f64> {
    let plan = plan?;
    if plan == 0 {
        return Some(zero_target_pct(actual));
    }
    Some(actual as f64 / plan as f64 * 100.0)
}

/// WIP 看板色调
///
/// 规则 (顺序执行):
/// 1) 计划缺失或 ≤ 0 → Muted
/// 2) 日目标 > 0 且实绩 ≥ 日目标 → Achieved
/// 3) 实绩为 0 → Muted
/// 4) 其他 → Behind
pub fn wip_tone(plan: Option<i64>, actual: i64, days_in_month: u32) -> CellTone {
    let plan = match plan {
        Some(p) if p > 0 => p,
        _ => return CellTone::Muted,
    };
    let per_day = if days_in_month > 0 {
        plan as f64 / days_in_month as f64
    } else {
        0.0
    };
    if per_day > 0.0 && actual as f64 >= per_day {
        CellTone::Achieved
    } else if actual == 0 {
        CellTone::Muted
    } else {
        CellTone::Behind
    }
}

/// 日达成色调 (按达成率分档)
pub fn achievement_tone(pct: Option<f64>) -> CellTone {
    match pct {
        None => CellTone::Muted,
        Some(v) if v >= 100.0 => CellTone::Achieved,
        Some(v) if v >= 90.0 => CellTone::Near,
        Some(v) if v >= 75.0 => CellTone::Behind,
        Some(_) => CellTone::Critical,
    }
}

/// 月度差异 (实绩 - 计划); 计划缺失时无差异
pub fn variance(planned: Option<u32>, actual: i64) -> Option<(i64, VarianceSign)> {
    let planned = planned?;
    let v = actual - i64::from(planned);
    Some((v, VarianceSign::of(v)))
}
