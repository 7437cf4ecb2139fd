// ==========================================
// 计划录入与查找集成测试
// ==========================================
// 测试范围:
// 1. 月计划: 指定月份 → 型号默认值 → 缺失
// 2. 日计划: 仅指定日期
// 3. 整体覆写
// 4. 口令校验
// 5. 内存 / SQLite 两种存储行为一致
// ==========================================

mod helpers;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use helpers::api_test_helper::*;

use cr_plant_dashboard::api::{ApiError, PlanApi};
use cr_plant_dashboard::db::{ensure_schema, open_in_memory_connection};
use cr_plant_dashboard::domain::plan::PlanSource;
use cr_plant_dashboard::engine::PlanResolver;
use cr_plant_dashboard::repository::{
    InMemoryPlanRepository, InMemoryRegistryRepository, PlanRepository, RegistryRepository,
    SqlitePlanRepository,
};

fn plan_stores() -> Vec<(&'static str, Arc<dyn PlanRepository>)> {
    let conn = open_in_memory_connection().expect("无法打开内存数据库");
    ensure_schema(&conn).expect("建表失败");
    vec![
        ("memory", Arc::new(InMemoryPlanRepository::new()) as Arc<dyn PlanRepository>),
        (
            "sqlite",
            Arc::new(SqlitePlanRepository::new(Arc::new(Mutex::new(conn)))) as Arc<dyn PlanRepository>,
        ),
    ]
}

#[test]
fn test_未保存月份且无默认值_返回缺失() {
    for (name, plans) in plan_stores() {
        let m = model("CF-Model-100");
        plans
            .save_monthly(period(2025, 11), &[(m.clone(), 300)], false)
            .expect("保存失败");

        let resolver = PlanResolver::new(plans.as_ref());
        let nov = resolver
            .resolve_monthly(period(2025, 11), &m)
            .expect("查询失败");
        assert_eq!(nov.map(|t| t.qty), Some(300), "{}", name);

        let dec = resolver
            .resolve_monthly(period(2025, 12), &m)
            .expect("查询失败");
        assert_eq!(dec, None, "{}", name);
    }
}

#[test]
fn test_保存零计划_与缺失不同() {
    for (name, plans) in plan_stores() {
        let m = model("WD-Model-B");
        plans
            .save_monthly(period(2025, 11), &[(m.clone(), 0)], true)
            .expect("保存失败");

        assert_eq!(
            plans.find_monthly(period(2025, 11), &m).expect("查询失败"),
            Some(0),
            "{}",
            name
        );
        assert_eq!(
            plans
                .find_monthly(period(2025, 11), &model("WD-Model-A"))
                .expect("查询失败"),
            None,
            "{}",
            name
        );
    }
}

#[test]
fn test_api_保存后默认值兜底() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let m = model("CF-Model-200");

    env.plan_api
        .set_monthly_target(period(2025, 11), &m, 240)
        .expect("保存失败");
    env.plan_api
        .set_monthly_target(period(2025, 12), &m, 260)
        .expect("保存失败");

    // 11 月仍取 11 月的值
    let nov = env
        .plan_api
        .resolve_monthly(period(2025, 11), &m)
        .expect("查询失败")
        .expect("应有计划");
    assert_eq!((nov.qty, nov.source), (240, PlanSource::PeriodEntry));

    // 未保存的 2026-01 取最近一次保存的值
    let jan = env
        .plan_api
        .resolve_monthly(period(2026, 1), &m)
        .expect("查询失败")
        .expect("应有默认值");
    assert_eq!((jan.qty, jan.source), (260, PlanSource::ModelDefault));
}

#[test]
fn test_日计划仅指定日期() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let d = day(2025, 11, 3);
    let mut entries = BTreeMap::new();
    entries.insert(model("CF-Model-100"), 10);
    entries.insert(model("CF-Model-200"), 8);
    assert_eq!(env.plan_api.save_daily_plan(d, &entries).expect("保存失败"), 2);

    assert_eq!(
        env.plan_api
            .get_daily_target(d, &model("CF-Model-100"))
            .expect("查询失败"),
        Some(10)
    );
    assert_eq!(
        env.plan_api
            .get_daily_target(day(2025, 11, 4), &model("CF-Model-100"))
            .expect("查询失败"),
        None
    );

    // 表单预填可带出默认值, 但对账查找不使用
    let rows = env
        .plan_api
        .daily_form_defaults(day(2025, 11, 4))
        .expect("读取预填失败");
    let cf100 = rows
        .iter()
        .find(|r| r.model == model("CF-Model-100"))
        .expect("缺少型号");
    assert_eq!((cf100.qty, cf100.source), (10, Some(PlanSource::ModelDefault)));
}

#[test]
fn test_同月重复保存_整体覆写() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let m = model("CRF-Part-A");
    env.plan_api
        .set_monthly_target(period(2025, 11), &m, 600)
        .expect("保存失败");
    env.plan_api
        .set_monthly_target(period(2025, 11), &m, 550)
        .expect("保存失败");

    assert_eq!(
        env.plan_api
            .get_monthly_target(period(2025, 11), &m)
            .expect("查询失败"),
        Some(550)
    );
}

#[test]
fn test_未注册型号拒绝() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    let err = env
        .plan_api
        .set_monthly_target(period(2025, 11), &model("XX-999"), 1)
        .unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));
    assert_eq!(
        env.plan_api
            .get_monthly_target(period(2025, 11), &model("XX-999"))
            .expect("查询失败"),
        None
    );
}

#[test]
fn test_口令校验与配置() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    assert!(env.plan_api.verify_access("admin").is_ok());

    env.config_manager
        .set_config_value(cr_plant_dashboard::config::config_keys::PLAN_PASSWORD, "s3cret")
        .expect("配置写入失败");
    assert!(matches!(
        env.plan_api.verify_access("admin"),
        Err(ApiError::Unauthorized(_))
    ));
    assert!(env.plan_api.verify_access("s3cret").is_ok());
}

#[test]
fn test_plan_api_可装配任意存储() {
    let registry = Arc::new(InMemoryRegistryRepository::new());
    registry.seed_defaults().expect("预置失败");
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    for (name, plans) in plan_stores() {
        let api = PlanApi::new(plans, registry.clone(), env.config_manager.clone());
        api.set_daily_target(day(2025, 11, 3), &model("WD-Model-A"), 12)
            .expect("保存失败");
        assert_eq!(
            api.get_daily_target(day(2025, 11, 3), &model("WD-Model-A"))
                .expect("查询失败"),
            Some(12),
            "{}",
            name
        );
    }
}
