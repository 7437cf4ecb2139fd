// ==========================================
// 冷柜/饮水机工厂生产看板 - WIP 推导
// ==========================================
// 红线: WIP 实绩 = 上游实绩 - 下游实绩, 可为负, 不截断
// 红线: WIP 计划 = 上游计划 - 下游计划 (一侧缺失按 0, 两侧缺失 → 缺失)
// ==========================================
// 行顺序: [区域1, WIP(1→2), 区域2, ..., 区域n]
// ==========================================

use crate::domain::report::{wip_label, CellTone, WipRow, WipRowKind};

/// WIP 计划差值
pub fn wip_plan(upstream: Option<i64>, downstream: Option<i64>) -> Option<i64> {
    match (upstream, downstream) {
        (None, None) => None,
        (up, down) => Some(up.unwrap_or(0) - down.unwrap_or(0)),
    }
}

/// WIP 实绩差值
pub fn wip_actual(upstream: i64, downstream: i64) -> i64 {
    upstream - downstream
}

/// 由相邻区域行生成 WIP 行
///
/// 达成率不对 WIP 行计算; 色调按 WIP 看板规则由调用方给出
pub fn derive_wip_row<F>(upstream: &WipRow, downstream: &WipRow, tone_of: F) -> WipRow
where
    F: Fn(Option<i64>, i64) -> CellTone,
{
    let (up_area, down_area) = (&upstream.areas[0], &downstream.areas[0]);
    let plan = wip_plan(upstream.plan, downstream.plan);
    let actual = wip_actual(upstream.actual, downstream.actual);
    WipRow {
        label: wip_label(up_area, down_area),
        kind: WipRowKind::Wip,
        areas: vec![up_area.clone(), down_area.clone()],
        plan,
        actual,
        achievement_pct: None,
        tone: tone_of(plan, actual),
    }
}

/// 区域行之间插入 WIP 行
pub fn interleave<F>(area_rows: Vec<WipRow>, tone_of: F) -> Vec<WipRow>
where
    F: Fn(Option<i64>, i64) -> CellTone,
{
    let mut rows = Vec::with_capacity(area_rows.len().saturating_mul(2));
    for (i, row) in area_rows.iter().enumerate() {
        if i > 0 {
            rows.push(derive_wip_row(&area_rows[i - 1], row, &tone_of));
        }
        rows.push(row.clone());
    }
    rows
}
