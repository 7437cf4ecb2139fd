// ==========================================
// 报表 CSV 导出
// ==========================================
// 单元格与界面显示一致: 缺失值为 N/A, 达成率保留一位小数, 差异带正号
// ==========================================

use std::io::Write;

use crate::domain::report::{DailyAchievementReport, MonthlyReport, WipReport};
use crate::export::{
    achievement_cell, category_cell, plan_cell, sign_cell, source_label, tone_code,
    variance_cell, ExportError, ExportResult,
};
use crate::i18n::tr;

fn headers(locale: &str, keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| tr(locale, k)).collect()
}

fn finish<W: Write>(mut wtr: csv::Writer<W>) -> ExportResult<W> {
    wtr.flush()?;
    wtr.into_inner()
        .map_err(|e| ExportError::Io(std::io::Error::new(e.error().kind(), e.error().to_string())))
}

fn into_string(bytes: Vec<u8>) -> ExportResult<String> {
    String::from_utf8(bytes).map_err(|e| ExportError::Encoding(e.to_string()))
}

/// WIP 看板 → CSV
pub fn write_wip_csv<W: Write>(out: W, report: &WipReport, locale: &str) -> ExportResult<W> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(headers(
        locale,
        &[
            "report.wip.area",
            "report.wip.plan_monthly",
            "report.wip.act_day",
            "report.wip.achievement",
            "report.wip.tone",
        ],
    ))?;

    for row in &report.rows {
        wtr.write_record([
            row.label.clone(),
            plan_cell(row.plan, locale),
            row.actual.to_string(),
            achievement_cell(row.achievement_pct, locale),
            tone_code(row.tone).to_string(),
        ])?;
    }
    finish(wtr)
}

/// 日达成报表 → CSV
pub fn write_daily_csv<W: Write>(
    out: W,
    report: &DailyAchievementReport,
    locale: &str,
) -> ExportResult<W> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(headers(
        locale,
        &[
            "report.daily.model",
            "report.daily.area",
            "report.daily.plan_day",
            "report.daily.actual",
            "report.daily.achievement",
            "report.wip.tone",
        ],
    ))?;

    for row in &report.rows {
        wtr.write_record([
            row.model.to_string(),
            row.area.to_string(),
            plan_cell(row.plan.map(i64::from), locale),
            row.actual.to_string(),
            achievement_cell(row.achievement_pct, locale),
            tone_code(row.tone).to_string(),
        ])?;
    }
    finish(wtr)
}

/// 月度计划实绩 → CSV
pub fn write_monthly_csv<W: Write>(
    out: W,
    report: &MonthlyReport,
    locale: &str,
) -> ExportResult<W> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(headers(
        locale,
        &[
            "report.monthly.model",
            "report.monthly.category",
            "report.monthly.planned",
            "report.monthly.actual",
            "report.monthly.variance",
            "report.monthly.sign",
            "report.monthly.source",
        ],
    ))?;

    for row in &report.rows {
        wtr.write_record([
            row.model.to_string(),
            category_cell(row.category.as_deref(), locale),
            plan_cell(row.planned.map(i64::from), locale),
            row.actual.to_string(),
            variance_cell(row.variance, locale),
            sign_cell(row.variance_sign, locale),
            source_label(row.actual_source, locale),
        ])?;
    }
    finish(wtr)
}

pub fn wip_to_csv(report: &WipReport, locale: &str) -> ExportResult<String> {
    into_string(write_wip_csv(Vec::new(), report, locale)?)
}

pub fn daily_to_csv(report: &DailyAchievementReport, locale: &str) -> ExportResult<String> {
    into_string(write_daily_csv(Vec::new(), report, locale)?)
}

pub fn monthly_to_csv(report: &MonthlyReport, locale: &str) -> ExportResult<String> {
    into_string(write_monthly_csv(Vec::new(), report, locale)?)
}
