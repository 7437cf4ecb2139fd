// ==========================================
// 冷柜/饮水机工厂生产看板 - 命令行入口
// ==========================================
// 用法:
//   cr-plant-dashboard [--db PATH | --memory] [--format table|csv|json] [--lang LOCALE] <命令>
//
// 命令:
//   seed-demo [YYYY-MM-DD]         写入演示计划与录入
//   wip <division> <YYYY-MM-DD>    事业部 WIP 看板 (crf / cf / wd)
//   daily <YYYY-MM-DD> [area]      日达成报表
//   monthly <YYYY-MM> [area]       月度计划实绩报表
//
// 日志输出到 stderr, 报表输出到 stdout
// ==========================================

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use cr_plant_dashboard::api::validator::{parse_area_filter, parse_date, parse_division, parse_period};
use cr_plant_dashboard::app::{get_default_db_path, seed_demo, AppState};
use cr_plant_dashboard::export;
use cr_plant_dashboard::i18n::{normalize_locale, tr_with_args};
use cr_plant_dashboard::logging;

#[derive(Parser, Debug)]
#[command(name = "cr-plant-dashboard", version, about = "冷柜/饮水机工厂计划实绩与 WIP 看板", long_about = None)]
struct Cli {
    /// SQLite 数据库路径 (默认: 用户数据目录)
    #[arg(long, conflicts_with = "memory")]
    db: Option<String>,
    /// 使用内存存储 (进程结束即丢弃)
    #[arg(long)]
    memory: bool,
    /// 输出格式
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// 报表语言 (en / zh-CN), 默认取配置
    #[arg(long)]
    lang: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// 写入演示计划与录入
    SeedDemo {
        /// 演示日期 (YYYY-MM-DD), 默认今天
        date: Option<String>,
    },
    /// 事业部 WIP 看板
    Wip {
        /// crf / cf / wd
        division: String,
        /// YYYY-MM-DD
        date: String,
    },
    /// 日达成报表
    Daily {
        /// YYYY-MM-DD
        date: String,
        area: Option<String>,
    },
    /// 月度计划实绩报表
    Monthly {
        /// YYYY-MM
        period: String,
        area: Option<String>,
    },
}

impl Cli {
    fn open_state(&self) -> anyhow::Result<AppState> {
        if self.memory {
            return Ok(AppState::in_memory()?);
        }
        let path = self.db.clone().unwrap_or_else(get_default_db_path);
        AppState::with_sqlite(&path).with_context(|| format!("无法打开数据库: {}", path))
    }
}

fn emit<T: Serialize>(
    format: OutputFormat,
    report: &T,
    table: impl FnOnce() -> String,
    csv: impl FnOnce() -> export::ExportResult<String>,
) -> anyhow::Result<()> {
    let text = match format {
        OutputFormat::Table => table(),
        OutputFormat::Csv => csv()?,
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
    };
    print!("{}", text);
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let state = cli.open_state()?;
    let locale = normalize_locale(cli.lang.as_deref().unwrap_or(&state.locale())).to_string();
    let layout = state.report_api.layout();

    match &cli.command {
        Commands::SeedDemo { date } => {
            let date = match date {
                Some(raw) => parse_date(raw)?,
                None => Local::now().date_naive(),
            };
            let summary = seed_demo(&state, date)?;
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                let events = summary.events.to_string();
                let monthly = summary.monthly_plans.to_string();
                let daily = summary.daily_plans.to_string();
                let date = summary.date.to_string();
                println!(
                    "{}",
                    tr_with_args(
                        &locale,
                        "demo.seeded",
                        &[
                            ("events", events.as_str()),
                            ("monthly", monthly.as_str()),
                            ("daily", daily.as_str()),
                            ("date", date.as_str()),
                        ],
                    )
                );
            }
        }
        Commands::Wip { division, date } => {
            let report = state
                .report_api
                .get_wip_report(parse_division(division)?, parse_date(date)?)?;
            emit(
                cli.format,
                &report,
                || export::render_wip(&report, &locale),
                || export::wip_to_csv(&report, &locale),
            )?;
        }
        Commands::Daily { date, area } => {
            let area = parse_area_filter(layout, area.as_deref())?;
            let report = state
                .report_api
                .get_daily_achievement(parse_date(date)?, area.as_ref())?;
            emit(
                cli.format,
                &report,
                || export::render_daily(&report, &locale),
                || export::daily_to_csv(&report, &locale),
            )?;
        }
        Commands::Monthly { period, area } => {
            let area = parse_area_filter(layout, area.as_deref())?;
            let report = state
                .report_api
                .get_monthly_report(parse_period(period)?, area.as_ref())?;
            emit(
                cli.format,
                &report,
                || export::render_monthly(&report, &locale),
                || export::monthly_to_csv(&report, &locale),
            )?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init();

    tracing::debug!(
        app = cr_plant_dashboard::APP_NAME,
        version = cr_plant_dashboard::VERSION,
        "启动"
    );

    run(cli)
}
