//! Core domain types and logic.

pub mod bar;
pub mod rolling;
pub mod signal;
pub mod indicators;
pub mod regime;
pub mod switch;
pub mod kill_switch;
pub mod sizing;
pub mod simulator;
pub mod metrics;
pub mod backtest;
pub mod config_validation;
pub mod error;
