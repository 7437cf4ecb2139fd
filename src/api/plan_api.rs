// ==========================================
// 冷柜/饮水机工厂生产看板 - 计划录入 API
// ==========================================
// 职责: 口令校验、月/日计划读写、表单预填
// 红线: 批量保存先校验全部型号, 任一未注册 → 整批拒绝
// 红线: 查询计划时缺失返回 None, 不返回 0
// ==========================================

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::error::{config_error, ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::plan::{PlanFormRow, PlanGranularity, PlanSource, ResolvedTarget};
use crate::domain::registry::RegistrySnapshot;
use crate::domain::types::{ModelId, Period};
use crate::engine::plan_resolver::PlanResolver;
use crate::repository::plan_repo::PlanRepository;
use crate::repository::registry_repo::RegistryRepository;

// ==========================================
// PlanApi - 计划录入 API
// ==========================================
pub struct PlanApi {
    plans: Arc<dyn PlanRepository>,
    registry: Arc<dyn RegistryRepository>,
    config_manager: Arc<ConfigManager>,
}

impl PlanApi {
    pub fn new(
        plans: Arc<dyn PlanRepository>,
        registry: Arc<dyn RegistryRepository>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            plans,
            registry,
            config_manager,
        }
    }

    // ==========================================
    // 访问控制
    // ==========================================

    /// 校验计划录入口令 (单一共享口令)
    pub fn verify_access(&self, password: &str) -> ApiResult<()> {
        let expected = self
            .config_manager
            .get_plan_password()
            .map_err(config_error)?;
        if password == expected {
            Ok(())
        } else {
            tracing::warn!("计划录入口令错误");
            Err(ApiError::Unauthorized("计划录入口令错误".to_string()))
        }
    }

    // ==========================================
    // 单型号读写
    // ==========================================

    /// 设置月计划 (同时刷新型号月计划默认值)
    pub fn set_monthly_target(&self, period: Period, model: &ModelId, qty: u32) -> ApiResult<()> {
        let snapshot = self.registry.snapshot()?;
        ensure_known_models(&snapshot, std::iter::once(model))?;
        self.plans
            .save_monthly(period, &[(model.clone(), qty)], true)?;
        Ok(())
    }

    /// 设置日计划 (同时刷新型号日计划默认值)
    pub fn set_daily_target(&self, date: NaiveDate, model: &ModelId, qty: u32) -> ApiResult<()> {
        let snapshot = self.registry.snapshot()?;
        ensure_known_models(&snapshot, std::iter::once(model))?;
        self.plans.save_daily(date, &[(model.clone(), qty)], true)?;
        Ok(())
    }

    /// 月计划 (指定月份 → 型号默认值 → 缺失)
    pub fn get_monthly_target(&self, period: Period, model: &ModelId) -> ApiResult<Option<u32>> {
        Ok(self.resolve_monthly(period, model)?.map(|t| t.qty))
    }

    /// 月计划及其来源层级
    pub fn resolve_monthly(
        &self,
        period: Period,
        model: &ModelId,
    ) -> ApiResult<Option<ResolvedTarget>> {
        Ok(PlanResolver::new(self.plans.as_ref()).resolve_monthly(period, model)?)
    }

    /// 日计划 (仅指定日期)
    pub fn get_daily_target(&self, date: NaiveDate, model: &ModelId) -> ApiResult<Option<u32>> {
        Ok(PlanResolver::new(self.plans.as_ref())
            .resolve_daily(date, model)?
            .map(|t| t.qty))
    }

    // ==========================================
    // 批量保存
    // ==========================================

    /// 保存月计划表单
    ///
    /// # 返回
    /// - Ok(usize): 保存条数
    /// - Err(ValidationError): 存在未注册型号, 未写入任何数据
    pub fn save_monthly_plan(
        &self,
        period: Period,
        entries: &BTreeMap<ModelId, u32>,
    ) -> ApiResult<usize> {
        let snapshot = self.registry.snapshot()?;
        ensure_known_models(&snapshot, entries.keys())?;

        let rows: Vec<(ModelId, u32)> = entries.iter().map(|(m, q)| (m.clone(), *q)).collect();
        let saved = self.plans.save_monthly(period, &rows, true)?;
        tracing::info!(period = %period, count = saved, "月计划已保存");
        Ok(saved)
    }

    /// 保存日计划表单
    pub fn save_daily_plan(
        &self,
        date: NaiveDate,
        entries: &BTreeMap<ModelId, u32>,
    ) -> ApiResult<usize> {
        let snapshot = self.registry.snapshot()?;
        ensure_known_models(&snapshot, entries.keys())?;

        let rows: Vec<(ModelId, u32)> = entries.iter().map(|(m, q)| (m.clone(), *q)).collect();
        let saved = self.plans.save_daily(date, &rows, true)?;
        tracing::info!(date = %date, count = saved, "日计划已保存");
        Ok(saved)
    }

    // ==========================================
    // 表单预填
    // ==========================================

    /// 月计划表单预填值 (指定月份 → 默认值 → 0), 仅含启用型号
    pub fn monthly_form_defaults(&self, period: Period) -> ApiResult<Vec<PlanFormRow>> {
        let snapshot = self.registry.snapshot()?;
        let mut rows = Vec::new();
        for model in snapshot.plan_form_models() {
            let id = &model.model_id;
            let row = match self.plans.find_monthly(period, id)? {
                Some(qty) => form_row(id, Some(qty), PlanSource::PeriodEntry),
                None => form_row(
                    id,
                    self.plans.find_default(id, PlanGranularity::Monthly)?,
                    PlanSource::ModelDefault,
                ),
            };
            rows.push(row);
        }
        Ok(rows)
    }

    /// 日计划表单预填值 (指定日期 → 默认值 → 0), 仅含启用型号
    pub fn daily_form_defaults(&self, date: NaiveDate) -> ApiResult<Vec<PlanFormRow>> {
        let snapshot = self.registry.snapshot()?;
        let mut rows = Vec::new();
        for model in snapshot.plan_form_models() {
            let id = &model.model_id;
            let row = match self.plans.find_daily(date, id)? {
                Some(qty) => form_row(id, Some(qty), PlanSource::DateEntry),
                None => form_row(
                    id,
                    self.plans.find_default(id, PlanGranularity::Daily)?,
                    PlanSource::ModelDefault,
                ),
            };
            rows.push(row);
        }
        Ok(rows)
    }
}

fn form_row(model: &ModelId, qty: Option<u32>, source: PlanSource) -> PlanFormRow {
    PlanFormRow {
        model: model.clone(),
        qty: qty.unwrap_or(0),
        source: qty.map(|_| source),
    }
}

/// 型号必须已注册 (含停用型号)
fn ensure_known_models<'a, I>(snapshot: &RegistrySnapshot, models: I) -> ApiResult<()>
where
    I: IntoIterator<Item = &'a ModelId>,
{
    let unknown: Vec<String> = models
        .into_iter()
        .filter(|m| snapshot.find_model(m).is_none())
        .map(|m| m.to_string())
        .collect();
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(ApiError::ValidationError(format!(
            "未注册型号: {}",
            unknown.join(", ")
        )))
    }
}
