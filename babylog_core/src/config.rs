//! Configuration file support for babylog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/babylog/config.toml`.

use crate::types::{SECONDS_PER_DAY, SECONDS_PER_MINUTE};
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub normalize: NormalizeConfig,

    #[serde(default)]
    pub derived: DerivedConfig,

    #[serde(default)]
    pub extrapolation: ExtrapolationConfig,
}

/// Data location configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Raw export; defaults to `<data_dir>/events.csv`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_path: Option<PathBuf>,

    /// Where `timeline.csv` and `aliases.json` go; defaults to `data_dir`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            input_path: None,
            output_dir: None,
        }
    }
}

impl DataConfig {
    pub fn input_path(&self) -> PathBuf {
        self.input_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("events.csv"))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.clone())
    }
}

/// Raw record normalization parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Kind labels dropped before anything else happens (case-insensitive)
    #[serde(default = "default_excluded_kinds")]
    pub excluded_kinds: Vec<String>,

    /// Length given to events logged without an end
    #[serde(default = "default_minimum_duration_secs")]
    pub min_event_duration_secs: i64,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            excluded_kinds: default_excluded_kinds(),
            min_event_duration_secs: default_minimum_duration_secs(),
        }
    }
}

/// Derived column parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DerivedConfig {
    /// Duration reported for zero-length events
    #[serde(default = "default_minimum_duration_secs")]
    pub minimum_duration_secs: i64,
}

impl Default for DerivedConfig {
    fn default() -> Self {
        Self {
            minimum_duration_secs: default_minimum_duration_secs(),
        }
    }
}

/// Sleep extrapolation parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtrapolationConfig {
    /// Gaps this many minutes or shorter are left empty
    #[serde(default = "default_threshold_minutes")]
    pub threshold_minutes: i64,

    /// Margin kept between a synthesized event and its real neighbours
    #[serde(default = "default_buffer_minutes")]
    pub buffer_minutes: i64,

    /// First date with reliable sleep logging; only earlier days are filled
    #[serde(default = "default_cutover_date")]
    pub cutover_date: NaiveDate,

    /// Date and time of birth; nothing is filled before it
    #[serde(default = "default_birth")]
    pub birth: NaiveDateTime,
}

impl Default for ExtrapolationConfig {
    fn default() -> Self {
        Self {
            threshold_minutes: default_threshold_minutes(),
            buffer_minutes: default_buffer_minutes(),
            cutover_date: default_cutover_date(),
            birth: default_birth(),
        }
    }
}

const MINUTES_PER_DAY: i64 = SECONDS_PER_DAY / SECONDS_PER_MINUTE;

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("babylog")
}

fn default_excluded_kinds() -> Vec<String> {
    vec!["pump".into()]
}

fn default_minimum_duration_secs() -> i64 {
    crate::types::DEFAULT_MINIMUM_DURATION_SECS
}

fn default_threshold_minutes() -> i64 {
    15
}

fn default_buffer_minutes() -> i64 {
    5
}

fn default_cutover_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 12, 24).unwrap_or_default()
}

fn default_birth() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 11, 2)
        .and_then(|d| d.and_hms_opt(12, 48, 0))
        .unwrap_or_default()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("babylog").join("config.toml")
    }

    /// Reject parameter combinations the pipeline cannot honour
    pub fn validate(&self) -> Result<()> {
        if !(1..=SECONDS_PER_DAY).contains(&self.normalize.min_event_duration_secs) {
            return Err(Error::Config(format!(
                "normalize.min_event_duration_secs must be within 1..={}, got {}",
                SECONDS_PER_DAY, self.normalize.min_event_duration_secs
            )));
        }
        if !(1..=SECONDS_PER_DAY).contains(&self.derived.minimum_duration_secs) {
            return Err(Error::Config(format!(
                "derived.minimum_duration_secs must be within 1..={}, got {}",
                SECONDS_PER_DAY, self.derived.minimum_duration_secs
            )));
        }

        let ex = &self.extrapolation;
        if !(1..=59).contains(&ex.threshold_minutes) {
            return Err(Error::Config(format!(
                "extrapolation.threshold_minutes must be within 1..=59, got {}",
                ex.threshold_minutes
            )));
        }
        if !(0..=MINUTES_PER_DAY).contains(&ex.buffer_minutes) {
            return Err(Error::Config(format!(
                "extrapolation.buffer_minutes must be within 0..={}, got {}",
                MINUTES_PER_DAY, ex.buffer_minutes
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.normalize.excluded_kinds, vec!["pump".to_string()]);
        assert_eq!(config.normalize.min_event_duration_secs, 300);
        assert_eq!(config.derived.minimum_duration_secs, 300);
        assert_eq!(config.extrapolation.threshold_minutes, 15);
        assert_eq!(config.extrapolation.buffer_minutes, 5);
        assert_eq!(
            config.extrapolation.cutover_date,
            NaiveDate::from_ymd_opt(2022, 12, 24).unwrap()
        );
        assert_eq!(
            config.extrapolation.birth.to_string(),
            "2022-11-02 12:48:00"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(
            config.extrapolation.cutover_date,
            parsed.extrapolation.cutover_date
        );
        assert_eq!(config.extrapolation.birth, parsed.extrapolation.birth);
        assert_eq!(config.normalize.excluded_kinds, parsed.normalize.excluded_kinds);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[extrapolation]
threshold_minutes = 20
cutover_date = "2023-01-01"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.extrapolation.threshold_minutes, 20);
        assert_eq!(config.extrapolation.buffer_minutes, 5); // default
        assert_eq!(
            config.extrapolation.cutover_date,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert_eq!(config.normalize.excluded_kinds, vec!["pump".to_string()]);
    }

    #[test]
    fn test_data_paths_default_to_data_dir() {
        let toml_str = r#"
[data]
data_dir = "/tmp/babylog-test"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.data.input_path(),
            PathBuf::from("/tmp/babylog-test/events.csv")
        );
        assert_eq!(config.data.output_dir(), PathBuf::from("/tmp/babylog-test"));
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let mut config = Config::default();
        config.extrapolation.threshold_minutes = 60;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.extrapolation.threshold_minutes = 15;
        config.extrapolation.buffer_minutes = -1;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_upper_bounds() {
        let mut config = Config::default();
        config.extrapolation.buffer_minutes = 1440;
        config.normalize.min_event_duration_secs = 86400;
        config.derived.minimum_duration_secs = 86400;
        assert!(config.validate().is_ok());

        config.extrapolation.buffer_minutes = 1441;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.extrapolation.buffer_minutes = 5;
        config.normalize.min_event_duration_secs = 86401;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.normalize.min_event_duration_secs = 300;
        config.derived.minimum_duration_secs = i64::MAX;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_rejects_oversized_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "[extrapolation]\nbuffer_minutes = 1000000000000\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));

        std::fs::write(
            &path,
            "[normalize]\nmin_event_duration_secs = 9223372036854775807\n",
        )
        .unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[normalize]\nexcluded_kinds = [\"pump\", \"brush teeth\"]\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.normalize.excluded_kinds.len(), 2);
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[derived]\nminimum_duration_secs = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
