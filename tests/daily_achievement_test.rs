// ==========================================
// 日达成报表集成测试
// ==========================================
// 测试范围:
// 1. 按 (型号, 区域) 汇总当日实绩
// 2. 日计划缺失 → 达成率 N/A
// 3. 零目标规则
// 4. 区域过滤
// 5. 型号汇总 (图表数据)
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use helpers::test_data_builder::{EntryBuilder, ScenarioBuilder};

use cr_plant_dashboard::api::ApiError;
use cr_plant_dashboard::domain::report::{format_achievement, CellTone};

fn scenario() -> ScenarioBuilder {
    let d = day(2025, 11, 3);
    ScenarioBuilder::new()
        .daily_plan(d, &[("CF-Model-100", 10), ("CF-Model-200", 0)])
        .batch(
            "Pre-Assembly",
            at(d, 8, 0),
            vec![EntryBuilder::cf("CF-Model-100", 6), EntryBuilder::cf("CF-Model-200", 3)],
        )
        // 同区域第二批次累加
        .batch("Pre-Assembly", at(d, 13, 5), vec![EntryBuilder::cf("CF-Model-100", 3)])
        .batch("CF Final Line", at(d, 17, 0), vec![EntryBuilder::cf("CF-Model-100", 12)])
        .batch("WD Final Line", at(d, 17, 30), vec![EntryBuilder::wd("WD-Model-A", 4)])
        // 次日记录不计入
        .batch(
            "Pre-Assembly",
            at(day(2025, 11, 4), 8, 0),
            vec![EntryBuilder::cf("CF-Model-100", 50)],
        )
}

#[test]
fn test_全部区域日达成() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    scenario().apply(&env).expect("场景写入失败");

    let report = env
        .report_api
        .get_daily_achievement(day(2025, 11, 3), None)
        .expect("日达成报表生成失败");

    let keys: Vec<(String, String, i64)> = report
        .rows
        .iter()
        .map(|r| (r.model.to_string(), r.area.to_string(), r.actual))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("CF-Model-100".to_string(), "CF Final Line".to_string(), 12),
            ("CF-Model-100".to_string(), "Pre-Assembly".to_string(), 9),
            ("CF-Model-200".to_string(), "Pre-Assembly".to_string(), 3),
            ("WD-Model-A".to_string(), "WD Final Line".to_string(), 4),
        ]
    );

    // 实绩 12 / 计划 10 → 120%
    assert_eq!(format_achievement(report.rows[0].achievement_pct), "120.0%");
    assert_eq!(report.rows[0].tone, CellTone::Achieved);

    // 实绩 9 / 计划 10 → 90%
    assert_eq!(format_achievement(report.rows[1].achievement_pct), "90.0%");
    assert_eq!(report.rows[1].tone, CellTone::Near);

    // 计划 0, 实绩 3 → 100%
    assert_eq!(report.rows[2].plan, Some(0));
    assert_eq!(report.rows[2].achievement_pct, Some(100.0));

    // 无日计划 → N/A
    assert_eq!(report.rows[3].plan, None);
    assert_eq!(format_achievement(report.rows[3].achievement_pct), "N/A");
    assert_eq!(report.rows[3].tone, CellTone::Muted);

    let totals: Vec<(String, i64)> = report
        .totals_by_model
        .iter()
        .map(|t| (t.model.to_string(), t.actual))
        .collect();
    assert_eq!(
        totals,
        vec![
            ("CF-Model-100".to_string(), 21),
            ("CF-Model-200".to_string(), 3),
            ("WD-Model-A".to_string(), 4),
        ]
    );
}

#[test]
fn test_区域过滤() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    scenario().apply(&env).expect("场景写入失败");

    let pre = area("Pre-Assembly");
    let report = env
        .report_api
        .get_daily_achievement(day(2025, 11, 3), Some(&pre))
        .expect("日达成报表生成失败");

    assert_eq!(report.area_filter, Some(pre.clone()));
    assert_eq!(report.rows.len(), 2);
    assert!(report.rows.iter().all(|r| r.area == pre));
}

#[test]
fn test_未知区域过滤() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let err = env
        .report_api
        .get_daily_achievement(day(2025, 11, 3), Some(&area("Nowhere")))
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn test_无记录日期为空报表() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    scenario().apply(&env).expect("场景写入失败");

    let report = env
        .report_api
        .get_daily_achievement(day(2025, 11, 5), None)
        .expect("日达成报表生成失败");
    assert!(report.rows.is_empty());
    assert!(report.totals_by_model.is_empty());
}
