// ==========================================
// 冷柜/饮水机工厂生产看板 - 演示数据
// ==========================================
// 用途: 命令行 seed-demo, 生成一个月计划 + 指定日期的录入批次
// ==========================================

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::api::ApiResult;
use crate::app::state::AppState;
use crate::domain::layout::{
    AREA_CABINET_FOAMING, AREA_CF_FINAL_LINE, AREA_CRF, AREA_DOOR_FOAMING, AREA_PRE_ASSEMBLY,
    AREA_WD_FINAL_LINE,
};
use crate::domain::production::StagedEntry;
use crate::domain::types::{AreaId, ModelId, Period};

/// 演示数据写入结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoSummary {
    pub period: Period,
    pub date: NaiveDate,
    pub monthly_plans: usize,
    pub daily_plans: usize,
    pub events: usize,
}

const MONTHLY_TARGETS: [(&str, u32); 6] = [
    ("CF-Model-100", 300),
    ("CF-Model-200", 240),
    ("WD-Model-A", 150),
    ("WD-Model-B", 90),
    ("CRF-Part-A", 600),
    ("CRF-Part-B", 450),
];

/// 写入演示计划与录入 (以 date 所在月份为计划月份)
pub fn seed_demo(state: &AppState, date: NaiveDate) -> ApiResult<DemoSummary> {
    let period = Period::of(date);

    let monthly: BTreeMap<ModelId, u32> = MONTHLY_TARGETS
        .iter()
        .map(|(m, q)| (ModelId::from(*m), *q))
        .collect();
    let monthly_plans = state.plan_api.save_monthly_plan(period, &monthly)?;

    // 日计划只覆盖冷柜型号, 其余型号日达成显示 N/A
    let daily: BTreeMap<ModelId, u32> = [("CF-Model-100", 10), ("CF-Model-200", 8)]
        .iter()
        .map(|(m, q)| (ModelId::from(*m), *q))
        .collect();
    let daily_plans = state.plan_api.save_daily_plan(date, &daily)?;

    let cf = |model: &str, qty: u32| StagedEntry::new("Demo Supervisor", "Chest Freezer", model, qty);
    let batches: Vec<(&str, u32, Vec<StagedEntry>)> = vec![
        (
            AREA_CRF,
            7,
            vec![
                StagedEntry::new("Demo Supervisor", "CRF Parts", "CRF-Part-A", 22),
                StagedEntry::new("Demo Supervisor", "CRF Parts", "CRF-Part-B", 15),
            ],
        ),
        (AREA_PRE_ASSEMBLY, 8, vec![cf("CF-Model-100", 12), cf("CF-Model-200", 9)]),
        (AREA_CABINET_FOAMING, 10, vec![cf("CF-Model-100", 11), cf("CF-Model-200", 7)]),
        (AREA_DOOR_FOAMING, 12, vec![cf("CF-Model-100", 9), cf("CF-Model-200", 8)]),
        (AREA_CF_FINAL_LINE, 15, vec![cf("CF-Model-100", 9), cf("CF-Model-200", 6)]),
        (
            AREA_WD_FINAL_LINE,
            16,
            vec![
                StagedEntry::new("Demo Supervisor", "Water Dispenser", "WD-Model-A", 5),
                StagedEntry::new("Demo Supervisor", "Water Dispenser", "WD-Model-B", 2),
            ],
        ),
    ];

    let mut events = 0;
    for (area, hour, batch) in batches {
        let at = date.and_time(NaiveTime::from_hms_opt(hour, 30, 0).unwrap_or(NaiveTime::MIN));
        events += state
            .entry_api
            .submit_entries_at(&AreaId::from(area), &batch, at)?
            .len();
    }

    tracing::info!(
        period = %period,
        date = %date,
        events = events,
        "演示数据已写入"
    );

    Ok(DemoSummary {
        period,
        date,
        monthly_plans,
        daily_plans,
        events,
    })
}
