//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvDataAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::backtest::{self, SimConfig, StrategyParams};
use crate::domain::config_validation::{parse_optional_date, validate_config};
use crate::domain::error::RegimetraderError;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "regimetrader",
    about = "Hybrid regime-switching strategy backtester"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ReportFormat {
    Text,
    Csv,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Price CSV, overriding [data] csv_path
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Report destination; defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
        /// Validate config and data, stop before simulating
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the row count, date span and close range of a price CSV
    Info {
        #[arg(long)]
        csv: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            csv,
            output,
            format,
            dry_run,
        } => run_backtest(&config, csv.as_ref(), output.as_ref(), format, dry_run),
        Command::Validate { config } => run_validate(&config),
        Command::Info { csv } => run_info(&csv),
    }
}

fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

/// Reads `[strategy]` keys, falling back to defaults. Assumes
/// `validate_config` has passed.
pub fn build_strategy_params(config: &dyn ConfigPort) -> StrategyParams {
    let defaults = StrategyParams::default();
    StrategyParams {
        short_window: config.get_int("strategy", "short_window", defaults.short_window as i64)
            as usize,
        long_window: config.get_int("strategy", "long_window", defaults.long_window as i64)
            as usize,
        zscore_threshold: config.get_double(
            "strategy",
            "zscore_threshold",
            defaults.zscore_threshold,
        ),
        kill_threshold: config.get_double("strategy", "kill_threshold", defaults.kill_threshold),
    }
}

/// Reads `[simulation]` keys, falling back to defaults.
pub fn build_sim_config(config: &dyn ConfigPort) -> SimConfig {
    let defaults = SimConfig::default();
    SimConfig {
        initial_capital: config.get_double(
            "simulation",
            "initial_capital",
            defaults.initial_capital,
        ),
        risk_per_trade: config.get_double("simulation", "risk_per_trade", defaults.risk_per_trade),
        fee: config.get_double("simulation", "fee", defaults.fee),
        slippage: config.get_double("simulation", "slippage", defaults.slippage),
    }
}

/// Reads the optional `[data]` start/end dates.
pub fn build_date_filter(
    config: &dyn ConfigPort,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), RegimetraderError> {
    let start = parse_optional_date(
        config.get_string("data", "start_date").as_deref(),
        "start_date",
    )?;
    let end = parse_optional_date(config.get_string("data", "end_date").as_deref(), "end_date")?;
    Ok((start, end))
}

fn run_backtest(
    config_path: &PathBuf,
    csv_override: Option<&PathBuf>,
    output_path: Option<&PathBuf>,
    format: ReportFormat,
    dry_run: bool,
) -> ExitCode {
    // Stage 1: load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let csv_path = match csv_override {
        Some(p) => p.clone(),
        None => match adapter.get_string("data", "csv_path") {
            Some(p) => PathBuf::from(p),
            None => {
                let e = RegimetraderError::ConfigMissing {
                    section: "data".to_string(),
                    key: "csv_path".to_string(),
                };
                eprintln!("error: {e} (use --csv or set it in the config)");
                return (&e).into();
            }
        },
    };

    let (start_date, end_date) = match build_date_filter(&adapter) {
        Ok(dates) => dates,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let params = build_strategy_params(&adapter);
    let sim_config = build_sim_config(&adapter);

    // Stage 2: fetch prices
    eprintln!("Loading prices from {}", csv_path.display());
    let data_port = CsvDataAdapter::new(&csv_path);
    let bars = match data_port.fetch_closes(start_date, end_date) {
        Ok(bars) => bars,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if bars.is_empty() {
        let e = RegimetraderError::NoData {
            path: csv_path.display().to_string(),
        };
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let (Some(first), Some(last)) = (bars.first(), bars.last()) {
        eprintln!("Loaded {} bars, {} to {}", bars.len(), first.date, last.date);
    }
    if bars.len() < 2 * params.long_window {
        eprintln!(
            "warning: {} bars is short for a {}-bar long window; most columns will stay undefined",
            bars.len(),
            params.long_window
        );
    }

    if dry_run {
        eprintln!("Dry run complete: configuration and data are valid");
        return ExitCode::SUCCESS;
    }

    // Stage 3: run the pipeline
    eprintln!(
        "Running backtest: windows {}/{}, z {:.2}, kill {:.2}",
        params.short_window, params.long_window, params.zscore_threshold, params.kill_threshold
    );
    let result = backtest::run_backtest(&bars, &params, &sim_config);

    // Stage 4: write the report
    let output = match output_path {
        Some(p) => p.display().to_string(),
        None => "-".to_string(),
    };
    let report: Box<dyn ReportPort> = match format {
        ReportFormat::Text => Box::new(TextReportAdapter::new()),
        ReportFormat::Csv => Box::new(CsvReportAdapter::new()),
        ReportFormat::Json => Box::new(JsonReportAdapter::new()),
    };

    if let Err(e) = report.write(&result, &output) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if output != "-" {
        eprintln!("Report written to: {output}");
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let params = build_strategy_params(&adapter);
    let sim_config = build_sim_config(&adapter);

    eprintln!("\nStrategy parameters:");
    eprintln!("  short_window:     {}", params.short_window);
    eprintln!("  long_window:      {}", params.long_window);
    eprintln!("  zscore_threshold: {}", params.zscore_threshold);
    eprintln!("  kill_threshold:   {}", params.kill_threshold);
    eprintln!("\nSimulation parameters:");
    eprintln!("  initial_capital: {}", sim_config.initial_capital);
    eprintln!("  risk_per_trade:  {}", sim_config.risk_per_trade);
    eprintln!("  fee:             {}", sim_config.fee);
    eprintln!("  slippage:        {}", sim_config.slippage);
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn run_info(csv_path: &PathBuf) -> ExitCode {
    let data_port = CsvDataAdapter::new(csv_path);
    let bars = match data_port.fetch_closes(None, None) {
        Ok(bars) => bars,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match (bars.first(), bars.last()) {
        (Some(first), Some(last)) => {
            let lo = bars.iter().map(|b| b.close).fold(f64::INFINITY, f64::min);
            let hi = bars
                .iter()
                .map(|b| b.close)
                .fold(f64::NEG_INFINITY, f64::max);
            println!(
                "{}: {} bars, {} to {}",
                csv_path.display(),
                bars.len(),
                first.date,
                last.date
            );
            println!("closes: {:.2} to {:.2}", lo, hi);
            ExitCode::SUCCESS
        }
        _ => {
            let e = RegimetraderError::NoData {
                path: csv_path.display().to_string(),
            };
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
