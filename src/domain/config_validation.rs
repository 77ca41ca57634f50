//! Configuration validation.
//!
//! Checks every recognized key against its allowed range before a run. Keys
//! are optional; a missing key falls back to the same default the config
//! builders use, so an empty file validates clean.

use chrono::NaiveDate;

use crate::domain::backtest::{SimConfig, StrategyParams};
use crate::domain::error::RegimetraderError;
use crate::ports::config_port::ConfigPort;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), RegimetraderError> {
    validate_windows(config)?;
    validate_zscore_threshold(config)?;
    validate_kill_threshold(config)?;
    validate_initial_capital(config)?;
    validate_risk_per_trade(config)?;
    validate_cost(config, "fee", SimConfig::default().fee)?;
    validate_cost(config, "slippage", SimConfig::default().slippage)?;
    validate_dates(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> RegimetraderError {
    RegimetraderError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_windows(config: &dyn ConfigPort) -> Result<(), RegimetraderError> {
    let defaults = StrategyParams::default();
    let short = config.get_int("strategy", "short_window", defaults.short_window as i64);
    let long = config.get_int("strategy", "long_window", defaults.long_window as i64);

    if short < 2 {
        return Err(invalid("strategy", "short_window", "must be at least 2"));
    }
    if long < 2 {
        return Err(invalid("strategy", "long_window", "must be at least 2"));
    }
    if short >= long {
        return Err(invalid(
            "strategy",
            "short_window",
            "must be smaller than long_window",
        ));
    }
    Ok(())
}

fn validate_zscore_threshold(config: &dyn ConfigPort) -> Result<(), RegimetraderError> {
    let value = config.get_double(
        "strategy",
        "zscore_threshold",
        StrategyParams::default().zscore_threshold,
    );
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid("strategy", "zscore_threshold", "must be positive"));
    }
    Ok(())
}

fn validate_kill_threshold(config: &dyn ConfigPort) -> Result<(), RegimetraderError> {
    let value = config.get_double(
        "strategy",
        "kill_threshold",
        StrategyParams::default().kill_threshold,
    );
    if !value.is_finite() || value <= -1.0 || value >= 0.0 {
        return Err(invalid(
            "strategy",
            "kill_threshold",
            "must be between -1 and 0 exclusive",
        ));
    }
    Ok(())
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), RegimetraderError> {
    let value = config.get_double(
        "simulation",
        "initial_capital",
        SimConfig::default().initial_capital,
    );
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid("simulation", "initial_capital", "must be positive"));
    }
    Ok(())
}

fn validate_risk_per_trade(config: &dyn ConfigPort) -> Result<(), RegimetraderError> {
    let value = config.get_double(
        "simulation",
        "risk_per_trade",
        SimConfig::default().risk_per_trade,
    );
    if !value.is_finite() || value <= 0.0 || value > 1.0 {
        return Err(invalid(
            "simulation",
            "risk_per_trade",
            "must be between 0 exclusive and 1 inclusive",
        ));
    }
    Ok(())
}

fn validate_cost(
    config: &dyn ConfigPort,
    key: &str,
    default: f64,
) -> Result<(), RegimetraderError> {
    let value = config.get_double("simulation", key, default);
    if !value.is_finite() || value < 0.0 {
        return Err(invalid("simulation", key, "must be non-negative"));
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), RegimetraderError> {
    let start = parse_optional_date(config.get_string("data", "start_date").as_deref(), "start_date")?;
    let end = parse_optional_date(config.get_string("data", "end_date").as_deref(), "end_date")?;

    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(invalid("data", "start_date", "must not be after end_date"));
        }
    }
    Ok(())
}

pub fn parse_optional_date(
    value: Option<&str>,
    key: &str,
) -> Result<Option<NaiveDate>, RegimetraderError> {
    match value {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| invalid("data", key, "expected YYYY-MM-DD")),
    }
}
