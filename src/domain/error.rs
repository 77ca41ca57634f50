//! Domain error types.

/// Top-level error type for regimetrader.
#[derive(Debug, thiserror::Error)]
pub enum RegimetraderError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("bad price data: {reason}")]
    Data { reason: String },

    #[error("report error for {path}: {reason}")]
    Report { path: String, reason: String },

    #[error("no price data in {path}")]
    NoData { path: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&RegimetraderError> for std::process::ExitCode {
    fn from(err: &RegimetraderError) -> Self {
        let code: u8 = match err {
            RegimetraderError::Io(_) => 1,
            RegimetraderError::ConfigParse { .. }
            | RegimetraderError::ConfigMissing { .. }
            | RegimetraderError::ConfigInvalid { .. } => 2,
            RegimetraderError::Data { .. } => 3,
            RegimetraderError::Report { .. } => 4,
            RegimetraderError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
