// ==========================================
// 冷柜/饮水机工厂生产看板 - 报表导出
// ==========================================
// 职责: 报表 → CSV / 纯文本表格 (命令行输出)
// 红线: 单元格使用统一显示格式, 缺失值输出本地化的 N/A
// 红线: 表头按显式传入的语言翻译
// 红线: 月报差异必须带正负标记 (NEGATIVE / NON_NEGATIVE)
// ==========================================

pub mod csv_export;
pub mod text_table;

use thiserror::Error;

use crate::domain::layout::DivisionKind;
use crate::domain::report::{
    format_achievement, format_plan, format_variance, ActualSource, CellTone, VarianceSign,
};
use crate::i18n::tr;

pub use csv_export::{daily_to_csv, monthly_to_csv, wip_to_csv};
pub use text_table::{render_daily, render_monthly, render_wip};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("输出写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("输出编码失败: {0}")]
    Encoding(String),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// 事业部显示名
pub fn division_label(kind: DivisionKind, locale: &str) -> String {
    let key = match kind {
        DivisionKind::Crf => "division.crf",
        DivisionKind::CfAssembly => "division.cf_assembly",
        DivisionKind::Wd => "division.wd",
    };
    tr(locale, key)
}

/// 实绩口径显示名
pub fn source_label(source: ActualSource, locale: &str) -> String {
    let key = match source {
        ActualSource::TerminalArea => "report.source.terminal_area",
        ActualSource::AllAreas => "report.source.all_areas",
    };
    tr(locale, key)
}

/// 色调代码 (与 JSON 序列化一致)
pub fn tone_code(tone: CellTone) -> &'static str {
    match tone {
        CellTone::Achieved => "ACHIEVED",
        CellTone::Near => "NEAR",
        CellTone::Behind => "BEHIND",
        CellTone::Critical => "CRITICAL",
        CellTone::Muted => "MUTED",
    }
}

/// 正负标记代码 (与 JSON 序列化一致)
pub fn sign_code(sign: VarianceSign) -> &'static str {
    match sign {
        VarianceSign::Negative => "NEGATIVE",
        VarianceSign::NonNegative => "NON_NEGATIVE",
    }
}

// ==========================================
// 单元格文本
// ==========================================

pub fn not_available(locale: &str) -> String {
    tr(locale, "report.not_available")
}

pub fn plan_cell(plan: Option<i64>, locale: &str) -> String {
    match plan {
        Some(_) => format_plan(plan),
        None => not_available(locale),
    }
}

pub fn achievement_cell(pct: Option<f64>, locale: &str) -> String {
    match pct {
        Some(_) => format_achievement(pct),
        None => not_available(locale),
    }
}

pub fn variance_cell(variance: Option<i64>, locale: &str) -> String {
    match variance {
        Some(_) => format_variance(variance),
        None => not_available(locale),
    }
}

pub fn sign_cell(sign: Option<VarianceSign>, locale: &str) -> String {
    match sign {
        Some(s) => sign_code(s).to_string(),
        None => not_available(locale),
    }
}

pub fn category_cell(category: Option<&str>, locale: &str) -> String {
    match category {
        Some(c) => c.to_string(),
        None => not_available(locale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_follow_locale() {
        assert_eq!(division_label(DivisionKind::Wd, "en"), "WD Division");
        assert_eq!(division_label(DivisionKind::Wd, "zh-CN"), "饮水机事业部");
        assert_eq!(source_label(ActualSource::AllAreas, "en"), "All areas");
    }

    #[test]
    fn test_tone_code_matches_serde() {
        let json = serde_json::to_string(&CellTone::Critical).unwrap();
        assert_eq!(json, format!("\"{}\"", tone_code(CellTone::Critical)));

        let json = serde_json::to_string(&VarianceSign::NonNegative).unwrap();
        assert_eq!(json, format!("\"{}\"", sign_code(VarianceSign::NonNegative)));
    }

    #[test]
    fn test_absent_cells_use_locale_text() {
        assert_eq!(plan_cell(None, "en"), tr("en", "report.not_available"));
        assert_eq!(plan_cell(Some(0), "en"), "0");
        assert_eq!(achievement_cell(Some(90.0), "zh-CN"), "90.0%");
        assert_eq!(variance_cell(Some(-2), "en"), "-2");
        assert_eq!(sign_cell(None, "zh-CN"), tr("zh-CN", "report.not_available"));
        assert_eq!(sign_cell(Some(VarianceSign::Negative), "en"), "NEGATIVE");
        assert_eq!(category_cell(None, "en"), "N/A");
    }
}
