//! INI file configuration adapter.

use std::path::Path;

use configparser::ini::Ini;

use crate::domain::error::RegimetraderError;
use crate::ports::config_port::ConfigPort;

/// [`ConfigPort`] backed by an INI file parsed with `configparser`.
#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RegimetraderError> {
        let mut config = Ini::new();
        config
            .load(path.as_ref())
            .map_err(|reason| RegimetraderError::ConfigParse {
                file: path.as_ref().display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, RegimetraderError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| RegimetraderError::ConfigParse {
                file: "<inline>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[strategy]
short_window = 10
long_window = 40
zscore_threshold = 1.5

[data]
csv_path = prices.csv
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(adapter.get_int("strategy", "short_window", 7), 10);
        assert_eq!(adapter.get_double("strategy", "zscore_threshold", 2.0), 1.5);
        assert_eq!(
            adapter.get_string("data", "csv_path"),
            Some("prices.csv".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[strategy]\nshort_window = 7\n").unwrap();
        assert_eq!(adapter.get_string("strategy", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[strategy]\n").unwrap();
        assert_eq!(adapter.get_int("strategy", "long_window", 30), 30);
    }

    #[test]
    fn get_int_returns_default_for_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[strategy]\nlong_window = abc\n").unwrap();
        assert_eq!(adapter.get_int("strategy", "long_window", 30), 30);
    }

    #[test]
    fn get_double_returns_value() {
        let adapter =
            FileConfigAdapter::from_string("[simulation]\ninitial_capital = 25000.5\n").unwrap();
        assert_eq!(
            adapter.get_double("simulation", "initial_capital", 0.0),
            25000.5
        );
    }

    #[test]
    fn get_double_returns_default_for_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[simulation]\nrisk_per_trade = lots\n").unwrap();
        assert_eq!(adapter.get_double("simulation", "risk_per_trade", 0.05), 0.05);
    }

    #[test]
    fn get_bool_parses_common_spellings() {
        let adapter =
            FileConfigAdapter::from_string("[x]\na = true\nb = yes\nc = 1\nd = false\ne = no\n")
                .unwrap();
        assert!(adapter.get_bool("x", "a", false));
        assert!(adapter.get_bool("x", "b", false));
        assert!(adapter.get_bool("x", "c", false));
        assert!(!adapter.get_bool("x", "d", true));
        assert!(!adapter.get_bool("x", "e", true));
    }

    #[test]
    fn get_bool_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[x]\n").unwrap();
        assert!(adapter.get_bool("x", "missing", true));
        assert!(!adapter.get_bool("x", "missing", false));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[data]\ncsv_path = /data/spx.csv\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("data", "csv_path"),
            Some("/data/spx.csv".to_string())
        );
    }

    #[test]
    fn from_file_missing_file_is_config_parse_error() {
        let err = FileConfigAdapter::from_file("/nonexistent/config.ini").unwrap_err();
        assert!(matches!(err, RegimetraderError::ConfigParse { .. }));
    }

    #[test]
    fn handles_all_sections() {
        let content = r#"
[strategy]
short_window = 5
long_window = 20
zscore_threshold = 2.5
kill_threshold = -0.10

[simulation]
initial_capital = 50000
risk_per_trade = 0.02
fee = 0.001
slippage = 0.002

[data]
csv_path = prices.csv
start_date = 2020-01-01
end_date = 2023-12-31
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(adapter.get_int("strategy", "short_window", 7), 5);
        assert_eq!(adapter.get_int("strategy", "long_window", 30), 20);
        assert_eq!(adapter.get_double("strategy", "kill_threshold", -0.15), -0.10);
        assert_eq!(adapter.get_double("simulation", "initial_capital", 0.0), 50000.0);
        assert_eq!(adapter.get_double("simulation", "fee", 0.0), 0.001);
        assert_eq!(
            adapter.get_string("data", "start_date"),
            Some("2020-01-01".to_string())
        );
    }
}
