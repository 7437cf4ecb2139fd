// ==========================================
// 型号停用集成测试
// ==========================================
// 测试范围:
// 1. 停用型号从录入选项与计划表单中移除
// 2. 停用型号的新录入被拒绝
// 3. 历史记录仍计入报表实绩
// 4. 停用型号的计划不计入事业部计划汇总
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use helpers::test_data_builder::{EntryBuilder, ScenarioBuilder};

use cr_plant_dashboard::api::ApiError;
use cr_plant_dashboard::domain::layout::DivisionKind;
use cr_plant_dashboard::domain::types::ProductLine;

#[test]
fn test_停用后录入选项移除_历史仍计入() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let d = day(2025, 11, 3);
    ScenarioBuilder::new()
        .monthly_plan(period(2025, 11), &[("WD-Model-A", 150), ("WD-Model-B", 90)])
        .batch(
            "WD Final Line",
            at(d, 9, 0),
            vec![EntryBuilder::wd("WD-Model-A", 5), EntryBuilder::wd("WD-Model-B", 2)],
        )
        .apply(&env)
        .expect("场景写入失败");

    env.registry_api
        .set_model_active(&model("WD-Model-B"), false)
        .expect("停用失败");

    // 录入选项
    let options = env
        .entry_api
        .entry_options(&area("WD Final Line"))
        .expect("读取录入选项失败");
    assert_eq!(options.models, vec![model("WD-Model-A")]);

    // 计划表单
    let form = env
        .plan_api
        .monthly_form_defaults(period(2025, 11))
        .expect("读取预填失败");
    assert!(form.iter().all(|r| r.model != model("WD-Model-B")));

    // 新录入被拒绝
    let err = env
        .entry_api
        .submit_entries_at(
            &area("WD Final Line"),
            &[EntryBuilder::wd("WD-Model-B", 1).build()],
            at(d, 10, 0),
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::EntryValidationError { .. }));

    // WIP 看板: 实绩含停用型号, 计划只汇总启用型号
    let wip = env
        .report_api
        .get_wip_report(DivisionKind::Wd, d)
        .expect("WIP 看板生成失败");
    assert_eq!(wip.rows[0].actual, 7);
    assert_eq!(wip.rows[0].plan, Some(150));

    // 月报: 停用型号仍出行
    let monthly = env
        .report_api
        .get_monthly_report(period(2025, 11), None)
        .expect("月报生成失败");
    let wd_b = monthly
        .rows
        .iter()
        .find(|r| r.model == model("WD-Model-B"))
        .expect("停用型号应保留在月报中");
    assert_eq!((wd_b.planned, wd_b.actual), (Some(90), 2));

    // 日达成: 停用型号仍出行
    let daily = env
        .report_api
        .get_daily_achievement(d, None)
        .expect("日达成报表生成失败");
    assert!(daily.rows.iter().any(|r| r.model == model("WD-Model-B")));
}

#[test]
fn test_重新启用() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let m = model("CF-Model-200");
    env.registry_api.set_model_active(&m, false).expect("停用失败");
    env.registry_api.set_model_active(&m, true).expect("启用失败");

    let options = env
        .entry_api
        .entry_options(&area("Pre-Assembly"))
        .expect("读取录入选项失败");
    assert!(options.models.contains(&m));
}

#[test]
fn test_新增型号与类别() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.registry_api
        .add_model(ProductLine::WaterDispenser, "WD-Model-C")
        .expect("新增型号失败");
    assert!(env
        .registry_api
        .add_category(ProductLine::WaterDispenser, "WD Premium")
        .expect("新增类别失败"));

    let events = env
        .entry_api
        .submit_entries_at(
            &area("WD Final Line"),
            &[EntryBuilder::wd("WD-Model-C", 3).category("WD Premium").build()],
            at(day(2025, 11, 3), 11, 0),
        )
        .expect("提交失败");
    assert_eq!(events.len(), 1);

    // 新型号可保存计划
    env.plan_api
        .set_monthly_target(period(2025, 11), &model("WD-Model-C"), 30)
        .expect("保存计划失败");
    assert_eq!(
        env.plan_api
            .get_monthly_target(period(2025, 11), &model("WD-Model-C"))
            .expect("查询失败"),
        Some(30)
    );
}
