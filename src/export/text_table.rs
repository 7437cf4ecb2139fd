// ==========================================
// 纯文本表格 (命令行输出)
// ==========================================

use std::fmt::Write as _;

use crate::domain::report::{DailyAchievementReport, MonthlyReport, WipReport};
use crate::export::{
    achievement_cell, category_cell, division_label, plan_cell, sign_cell, source_label,
    tone_code, variance_cell,
};
use crate::i18n::{tr, tr_with_args};

/// 等宽对齐 (按字符数, 不考虑全角宽度)
fn render_table(headers: Vec<String>, rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let mut push_line = |cells: &[String]| {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect();
        let _ = writeln!(out, "{}", line.join(" | ").trim_end());
    };

    push_line(&headers);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&rule);
    for row in &rows {
        push_line(row);
    }
    out
}

pub fn render_wip(report: &WipReport, locale: &str) -> String {
    let division = division_label(report.division, locale);
    let date = report.date.to_string();
    let mut out = tr_with_args(
        locale,
        "report.wip.title",
        &[("division", division.as_str()), ("date", date.as_str())],
    );
    out.push('\n');

    if !report.has_activity {
        out.push_str(&tr_with_args(
            locale,
            "report.wip.empty",
            &[("division", division.as_str())],
        ));
        out.push('\n');
    }

    let headers = [
        "report.wip.area",
        "report.wip.plan_monthly",
        "report.wip.act_day",
        "report.wip.achievement",
        "report.wip.tone",
    ]
    .iter()
    .map(|k| tr(locale, k))
    .collect();
    let rows = report
        .rows
        .iter()
        .map(|r| {
            vec![
                r.label.clone(),
                plan_cell(r.plan, locale),
                r.actual.to_string(),
                achievement_cell(r.achievement_pct, locale),
                tone_code(r.tone).to_string(),
            ]
        })
        .collect();
    out.push_str(&render_table(headers, rows));
    out
}

pub fn render_daily(report: &DailyAchievementReport, locale: &str) -> String {
    let date = report.date.to_string();
    let mut out = tr_with_args(locale, "report.daily.title", &[("date", date.as_str())]);
    out.push('\n');

    if report.rows.is_empty() {
        out.push_str(&tr(locale, "report.daily.empty"));
        out.push('\n');
        return out;
    }

    let headers = [
        "report.daily.model",
        "report.daily.area",
        "report.daily.plan_day",
        "report.daily.actual",
        "report.daily.achievement",
        "report.wip.tone",
    ]
    .iter()
    .map(|k| tr(locale, k))
    .collect();
    let rows = report
        .rows
        .iter()
        .map(|r| {
            vec![
                r.model.to_string(),
                r.area.to_string(),
                plan_cell(r.plan.map(i64::from), locale),
                r.actual.to_string(),
                achievement_cell(r.achievement_pct, locale),
                tone_code(r.tone).to_string(),
            ]
        })
        .collect();
    out.push_str(&render_table(headers, rows));

    out.push('\n');
    out.push_str(&tr(locale, "report.daily.totals"));
    out.push('\n');
    let totals = report
        .totals_by_model
        .iter()
        .map(|t| vec![t.model.to_string(), t.actual.to_string()])
        .collect();
    out.push_str(&render_table(
        vec![tr(locale, "report.daily.model"), tr(locale, "report.daily.actual")],
        totals,
    ));
    out
}

pub fn render_monthly(report: &MonthlyReport, locale: &str) -> String {
    let period = report.period.to_string();
    let mut out = tr_with_args(locale, "report.monthly.title", &[("period", period.as_str())]);
    out.push('\n');

    if report.rows.is_empty() {
        out.push_str(&tr(locale, "report.monthly.empty"));
        out.push('\n');
        return out;
    }

    let headers = [
        "report.monthly.model",
        "report.monthly.category",
        "report.monthly.planned",
        "report.monthly.actual",
        "report.monthly.variance",
        "report.monthly.sign",
        "report.monthly.source",
    ]
    .iter()
    .map(|k| tr(locale, k))
    .collect();
    let rows = report
        .rows
        .iter()
        .map(|r| {
            vec![
                r.model.to_string(),
                category_cell(r.category.as_deref(), locale),
                plan_cell(r.planned.map(i64::from), locale),
                r.actual.to_string(),
                variance_cell(r.variance, locale),
                sign_cell(r.variance_sign, locale),
                source_label(r.actual_source, locale),
            ]
        })
        .collect();
    out.push_str(&render_table(headers, rows));
    out
}
