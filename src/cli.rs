//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_export_adapter::CsvExportAdapter;
use crate::adapters::file_config_adapter::{parse_flag, FileConfigAdapter};
use crate::adapters::statement_csv_adapter::StatementCsvAdapter;
use crate::domain::analysis::{AnalysisConfig, Overrides};
use crate::domain::error::TradeClipperError;
use crate::domain::metrics::PortfolioStats;
use crate::domain::portfolio::{load_portfolio, Portfolio};
use crate::domain::summary::{summarize, TradeSummary};
use crate::ports::config_port::ConfigPort;
use crate::ports::export_port::ExportPort;
use crate::ports::statement_port::StatementPort;

#[derive(Parser, Debug)]
#[command(
    name = "tradeclipper",
    about = "Rebuild round-trip trades from brokerage statements"
)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the statements come from and which trades to look at.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// INI config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Statement CSV file or directory of statements
    #[arg(short, long)]
    pub statements: Option<PathBuf>,
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub month: Option<u32>,
    #[arg(long)]
    pub day: Option<u32>,
    /// Include trades held overnight; `--include-swing=false` overrides the config
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = parse_bool_arg
    )]
    pub include_swing: Option<bool>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print aggregate statistics
    Summary {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// List closed trades
    Trades {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Profit per trading day
    Days {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Write closed trades to CSV
    Export {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_bool_arg(value: &str) -> Result<bool, String> {
    parse_flag(value).ok_or_else(|| format!("expected a boolean, got {value:?}"))
}

pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Summary { source } => resolve(&source, None).and_then(|c| run_summary(&c)),
        Command::Trades { source } => resolve(&source, None).and_then(|c| run_trades(&c)),
        Command::Days { source } => resolve(&source, None).and_then(|c| run_days(&c)),
        Command::Export { source, output } => {
            resolve(&source, output).and_then(|c| run_export(&c, &CsvExportAdapter::new()))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, TradeClipperError> {
    info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path).map_err(|e| TradeClipperError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Merge the optional config file with command-line values.
pub fn resolve(
    source: &SourceArgs,
    output: Option<PathBuf>,
) -> Result<AnalysisConfig, TradeClipperError> {
    let config = source.config.as_ref().map(load_config).transpose()?;
    let overrides = Overrides {
        statement_path: source.statements.clone(),
        include_swing: source.include_swing,
        year: source.year,
        month: source.month,
        day: source.day,
        export_path: output,
    };
    AnalysisConfig::resolve(config.as_ref().map(|c| c as &dyn ConfigPort), &overrides)
}

pub fn build_portfolio(
    port: &dyn StatementPort,
    config: &AnalysisConfig,
) -> Result<Portfolio, TradeClipperError> {
    Ok(load_portfolio(port)?.with_swing(config.include_swing))
}

fn open_portfolio(config: &AnalysisConfig) -> Result<Portfolio, TradeClipperError> {
    let port = StatementCsvAdapter::new(config.statement_path.clone());
    build_portfolio(&port, config)
}

pub fn run_summary(config: &AnalysisConfig) -> Result<(), TradeClipperError> {
    let portfolio = open_portfolio(config)?;
    let stats = PortfolioStats::compute(&portfolio, &config.filter);
    print!("{}", format_stats(&stats));
    Ok(())
}

pub fn run_trades(config: &AnalysisConfig) -> Result<(), TradeClipperError> {
    let portfolio = open_portfolio(config)?;
    let summaries = summarize(portfolio.filter_trades(&config.filter));
    if summaries.is_empty() {
        eprintln!("No closed trades matched");
    }
    for summary in &summaries {
        println!("{}", format_trade_line(summary));
    }
    Ok(())
}

pub fn run_days(config: &AnalysisConfig) -> Result<(), TradeClipperError> {
    let portfolio = open_portfolio(config)?;
    for day in portfolio.daily_profits(&config.filter) {
        let sign = if day.profit >= 0.0 { "+" } else { "" };
        println!("{}  {:>3} trades  {}{:.2}", day.date, day.trades, sign, day.profit);
    }
    Ok(())
}

pub fn run_export(
    config: &AnalysisConfig,
    exporter: &dyn ExportPort,
) -> Result<(), TradeClipperError> {
    let portfolio = open_portfolio(config)?;
    let summaries = summarize(portfolio.filter_trades(&config.filter));
    exporter.export(&summaries, &config.export_path)?;
    eprintln!(
        "Exported {} trades to {}",
        summaries.len(),
        config.export_path.display()
    );
    Ok(())
}

fn pct(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}%", v * 100.0))
        .unwrap_or_else(|| "n/a".to_string())
}

fn money(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "n/a".to_string())
}

pub fn format_stats(stats: &PortfolioStats) -> String {
    let hold = stats
        .avg_hold_seconds
        .map(|s| format!("{:.0}m", s / 60.0))
        .unwrap_or_else(|| "n/a".to_string());
    let mut out = String::new();
    out.push_str("=== Trade Summary ===\n");
    out.push_str(&format!("Trades:           {}\n", stats.total_trades));
    out.push_str(&format!(
        "Won / Lost:       {} / {}\n",
        stats.trades_won, stats.trades_lost
    ));
    out.push_str(&format!("Win Rate:         {}\n", pct(stats.win_rate)));
    out.push_str(&format!("Profit:           {:.2}\n", stats.profit));
    out.push_str(&format!("Avg Trade:        {}\n", money(stats.avg_trade)));
    out.push_str(&format!("Largest Win:      {:.2}\n", stats.largest_win));
    out.push_str(&format!("Largest Loss:     {:.2}\n", stats.largest_loss));
    out.push_str(&format!("Shares Traded:    {}\n", stats.shares_traded));
    out.push_str(&format!(
        "Profit / Share:   {}\n",
        stats
            .profit_per_share
            .map(|v| format!("{:.4}", v))
            .unwrap_or_else(|| "n/a".to_string())
    ));
    out.push_str(&format!("Avg Hold:         {}\n", hold));
    out.push_str(&format!("Trading Days:     {}\n", stats.trading_days));
    out.push_str(&format!(
        "Green / Red Days: {} / {}\n",
        stats.days.green, stats.days.red
    ));
    if stats.open_positions > 0 {
        out.push_str(&format!("Open Positions:   {}\n", stats.open_positions));
    }
    out
}

pub fn format_trade_line(summary: &TradeSummary) -> String {
    format!(
        "{:<6} {:<5} {} -> {}  {:>6} @ {}  exit {}  P/L {:.2} ({}){}",
        summary.ticker,
        summary.side.to_string(),
        summary.open_time.format("%Y-%m-%d %H:%M:%S"),
        summary.close_time.format("%Y-%m-%d %H:%M:%S"),
        summary.total_shares,
        summary
            .opening_avg
            .map(|p| format!("{:.3}", p))
            .unwrap_or_else(|| "-".to_string()),
        summary
            .closing_avg
            .map(|p| format!("{:.3}", p))
            .unwrap_or_else(|| "-".to_string()),
        summary.profit,
        summary
            .percent_gain
            .map(|g| format!("{:+.2}%", g * 100.0))
            .unwrap_or_else(|| "-".to_string()),
        if summary.swing { "  (swing)" } else { "" },
    )
}
