// ==========================================
// 冷柜/饮水机工厂生产看板 - 计划领域模型
// ==========================================
// 红线: "未设定计划" 与 "计划为 0" 语义不同, 不得互相转换
// 红线: 计划按 (期间, 型号) 整体覆写, 不保留历史
// ==========================================

use crate::domain::types::ModelId;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// PlanGranularity - 计划粒度
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanGranularity {
    Monthly, // 月计划 (YYYY-MM)
    Daily,   // 日计划 (YYYY-MM-DD)
}

impl PlanGranularity {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PlanGranularity::Monthly => "MONTHLY",
            PlanGranularity::Daily => "DAILY",
        }
    }
}

impl fmt::Display for PlanGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

// ==========================================
// PlanSource - 计划取值来源层级
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanSource {
    PeriodEntry,  // 指定月份的计划
    ModelDefault, // 型号最近一次保存的月计划
    DateEntry,    // 指定日期的日计划
}

// ==========================================
// ResolvedTarget - 解析后的计划值
// ==========================================
// 查不到时整体为 None (不产生 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTarget {
    pub qty: u32,
    pub source: PlanSource,
}

// ==========================================
// PlanFormRow - 计划录入表单预填行
// ==========================================
// 仅用于界面预填, 不参与对账计算
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFormRow {
    pub model: ModelId,
    pub qty: u32,
    pub source: Option<PlanSource>, // None 表示无任何记录, 预填 0
}
