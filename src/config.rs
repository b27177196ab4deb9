use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{ReportError, Result};

/// Where the yearly results files live and which years to load.
///
/// Stored as a plain JSON object on disk; every key is optional:
/// ```json
/// {
///   "data_dir": "resources",
///   "file_prefix": "e8-schools-",
///   "years": [2021, 2022, 2023, 2024],
///   "trend_year": 2025
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub data_dir: PathBuf,
    pub file_prefix: String,
    pub years: Vec<i32>,
    pub trend_year: Option<i32>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("resources"),
            file_prefix: "e8-schools-".to_string(),
            years: vec![2021, 2022, 2023, 2024],
            trend_year: None,
        }
    }
}

impl ReportConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Year the trend is predicted for: the configured one, else the year
    /// after the latest loaded year.
    pub fn target_year(&self) -> Result<i32> {
        if let Some(year) = self.trend_year {
            return Ok(year);
        }
        let last = self
            .years
            .iter()
            .max()
            .ok_or_else(|| ReportError::InvalidArgument("no years configured".into()))?;
        last.checked_add(1).ok_or_else(|| {
            ReportError::InvalidArgument(format!("no year follows {last}"))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.years.is_empty() {
            return Err(ReportError::InvalidArgument("no years configured".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(name)
    }

    #[test]
    fn test_default_target_year() {
        let config = ReportConfig::default();
        assert_eq!(config.target_year().unwrap(), 2025);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_explicit_target_year() {
        let config = ReportConfig {
            trend_year: Some(2030),
            ..Default::default()
        };
        assert_eq!(config.target_year().unwrap(), 2030);
    }

    #[test]
    fn test_no_years() {
        let config = ReportConfig {
            years: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(config.target_year().is_err());
    }

    #[test]
    fn test_target_year_overflow() {
        let config = ReportConfig {
            years: vec![2021, i32::MAX],
            ..Default::default()
        };
        assert!(matches!(
            config.target_year(),
            Err(ReportError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_load_partial_file() {
        let path = temp_path("school_trends_test_config.json");
        fs::write(&path, r#"{ "years": [2019, 2020], "data_dir": "data" }"#).unwrap();

        let config = ReportConfig::load(&path).unwrap();

        assert_eq!(config.years, vec![2019, 2020]);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.file_prefix, "e8-schools-");
        assert_eq!(config.target_year().unwrap(), 2021);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let result = ReportConfig::load(&temp_path("school_trends_no_such_config.json"));
        assert!(matches!(result, Err(ReportError::Io { .. })));
    }
}
