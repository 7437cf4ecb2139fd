// ==========================================
// 冷柜/饮水机工厂生产看板 - 报表领域模型
// ==========================================
// 职责: WIP 看板 / 日达成 / 月度计划实绩 三类报表的行结构与显示规则
// 红线: 计划缺失显示 N/A, 不显示 0
// 红线: WIP 实绩可为负, 不截断
// ==========================================

use crate::domain::layout::DivisionKind;
use crate::domain::types::{AreaId, ModelId, Period};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 缺失值显示文本
pub const NOT_AVAILABLE: &str = "N/A";

// ==========================================
// CellTone - 单元格色调
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellTone {
    Achieved, // 达成 (绿)
    Near,     // 接近 (浅绿)
    Behind,   // 落后 (黄)
    Critical, // 严重落后 (红)
    Muted,    // 无计划/无产出 (灰)
}

// ==========================================
// WIP 看板
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WipRowKind {
    Area,
    Wip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WipRow {
    pub label: String,
    pub kind: WipRowKind,
    /// 区域行: [区域]; WIP 行: [上游, 下游]
    pub areas: Vec<AreaId>,
    /// 月计划汇总 (WIP 行为上下游差值, 可为负)
    pub plan: Option<i64>,
    /// 当日实绩 (WIP 行为上下游差值, 可为负)
    pub actual: i64,
    pub achievement_pct: Option<f64>,
    pub tone: CellTone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WipReport {
    pub division: DivisionKind,
    pub date: NaiveDate,
    pub period: Period,
    pub days_in_month: u32,
    /// 当日该事业部是否有任何生产记录
    pub has_activity: bool,
    pub rows: Vec<WipRow>,
}

impl WipReport {
    pub fn area_rows(&self) -> impl Iterator<Item = &WipRow> {
        self.rows.iter().filter(|r| r.kind == WipRowKind::Area)
    }

    pub fn wip_rows(&self) -> impl Iterator<Item = &WipRow> {
        self.rows.iter().filter(|r| r.kind == WipRowKind::Wip)
    }

    pub fn row(&self, label: &str) -> Option<&WipRow> {
        self.rows.iter().find(|r| r.label == label)
    }
}

/// WIP 行标签
pub fn wip_label(upstream: &AreaId, downstream: &AreaId) -> String {
    format!("WIP ({} → {})", upstream, downstream)
}

// ==========================================
// 日达成报表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAchievementRow {
    pub model: ModelId,
    pub area: AreaId,
    pub plan: Option<u32>,
    pub actual: i64,
    pub achievement_pct: Option<f64>,
    pub tone: CellTone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelTotal {
    pub model: ModelId,
    pub actual: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAchievementReport {
    pub date: NaiveDate,
    pub area_filter: Option<AreaId>,
    pub rows: Vec<DailyAchievementRow>,
    /// 按型号汇总实绩 (图表数据)
    pub totals_by_model: Vec<ModelTotal>,
}

// ==========================================
// 月度计划实绩报表
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActualSource {
    TerminalArea, // 取末道工序实绩
    AllAreas,     // 末道为 0 时汇总全部区域
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VarianceSign {
    Negative,    // 欠产 (红)
    NonNegative, // 达成或超产 (绿)
}

impl VarianceSign {
    pub fn of(variance: i64) -> Self {
        if variance < 0 {
            VarianceSign::Negative
        } else {
            VarianceSign::NonNegative
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReportRow {
    pub model: ModelId,
    pub category: Option<String>,
    pub planned: Option<u32>,
    pub actual: i64,
    pub actual_source: ActualSource,
    /// 实绩 - 计划; 计划缺失时为 None
    pub variance: Option<i64>,
    pub variance_sign: Option<VarianceSign>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub period: Period,
    pub area_filter: Option<AreaId>,
    pub rows: Vec<MonthlyReportRow>,
}

// ==========================================
// 显示格式
// ==========================================

pub fn format_plan(plan: Option<i64>) -> String {
    match plan {
        Some(v) => v.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_achievement(pct: Option<f64>) -> String {
    match pct {
        Some(v) => format!("{:.1}%", v),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_variance(variance: Option<i64>) -> String {
    match variance {
        Some(v) if v > 0 => format!("+{}", v),
        Some(v) => v.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}
