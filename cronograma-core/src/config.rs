//! Configuration at ~/.config/cronograma/config.toml

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{CronogramaError, CronogramaResult};
use crate::filter_state::DEFAULT_DAY;
use crate::loader::ScheduleSource;
use crate::schedule::Day;
use crate::storage::FileStorage;

static DEFAULT_SITE_DIR: &str = ".";

fn default_site_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SITE_DIR)
}

fn default_day() -> Day {
    DEFAULT_DAY
}

fn default_days() -> Vec<Day> {
    vec![13, 14]
}

fn default_month() -> u32 {
    11
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CronogramaConfig {
    /// Directory holding `data/schedule.json`.
    #[serde(default = "default_site_dir")]
    pub site_dir: PathBuf,

    /// When set, the schedule is fetched from `<base_url>/data/schedule.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default = "default_day")]
    pub default_day: Day,

    /// Days offered by the day selector.
    #[serde(default = "default_days")]
    pub days: Vec<Day>,

    #[serde(default = "default_month")]
    pub month: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
}

impl Default for CronogramaConfig {
    fn default() -> Self {
        CronogramaConfig {
            site_dir: default_site_dir(),
            base_url: None,
            default_day: default_day(),
            days: default_days(),
            month: default_month(),
            year: None,
            storage_dir: None,
        }
    }
}

impl CronogramaConfig {
    pub fn config_path() -> CronogramaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CronogramaError::Config("Could not determine config directory".into()))?
            .join("cronograma");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, writing a commented-out default first if there is none.
    pub fn load() -> CronogramaResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CronogramaResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| CronogramaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CronogramaError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CronogramaResult<()> {
        let contents = format!(
            "\
# cronograma configuration

# Directory containing data/schedule.json:
# site_dir = \"{}\"

# Fetch the schedule over HTTP instead:
# base_url = \"https://example.org/muestra/\"

# Day selected on first run, and the days offered by the selector:
# default_day = {}
# days = [13, 14]

# Month and year used for day labels (\"13 Nov\"):
# month = 11
# year = 2025

# Where filter and day choices are remembered:
# storage_dir = \"~/.local/share/cronograma\"
",
            DEFAULT_SITE_DIR, DEFAULT_DAY
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CronogramaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CronogramaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// `site_dir` with `~` expanded.
    pub fn site_path(&self) -> PathBuf {
        expand(&self.site_dir)
    }

    pub fn source(&self) -> CronogramaResult<ScheduleSource> {
        match &self.base_url {
            Some(url) => ScheduleSource::remote(url),
            None => Ok(ScheduleSource::local(&self.site_path())),
        }
    }

    pub fn storage_path(&self) -> CronogramaResult<PathBuf> {
        match &self.storage_dir {
            Some(dir) => Ok(expand(dir)),
            None => dirs::data_dir()
                .map(|dir| dir.join("cronograma"))
                .ok_or_else(|| CronogramaError::Config("Could not determine data directory".into())),
        }
    }

    pub fn storage(&self) -> CronogramaResult<FileStorage> {
        Ok(FileStorage::in_dir(&self.storage_path()?))
    }

    /// Selector label for `day`, e.g. "13 Nov". Falls back to "Día 13"
    /// when the day doesn't exist in the configured month.
    pub fn day_label(&self, day: Day) -> String {
        let year = self.year.unwrap_or_else(|| chrono::Local::now().year());
        match NaiveDate::from_ymd_opt(year, self.month, day) {
            Some(date) => date.format("%-d %b").to_string(),
            None => format!("Día {}", day),
        }
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cronograma/config.toml");

        CronogramaConfig::create_default_config(&path).unwrap();
        let config = CronogramaConfig::load_from(&path).unwrap();

        assert_eq!(config, CronogramaConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "base_url = \"https://example.org/\"\ndefault_day = 14\ndays = [14, 15]\nmonth = 3\nyear = 2026\n",
        )
        .unwrap();

        let config = CronogramaConfig::load_from(&path).unwrap();
        assert_eq!(config.default_day, 14);
        assert_eq!(config.days, vec![14, 15]);
        assert_eq!(config.source().unwrap().to_string(), "https://example.org/data/schedule.json");
        assert_eq!(config.day_label(14), "14 Mar");
    }

    #[test]
    fn local_source_uses_site_dir() {
        let config = CronogramaConfig {
            site_dir: PathBuf::from("/srv/muestra"),
            ..CronogramaConfig::default()
        };
        assert_eq!(
            config.source().unwrap(),
            ScheduleSource::File(PathBuf::from("/srv/muestra/data/schedule.json"))
        );
    }

    #[test]
    fn day_label_falls_back_for_impossible_dates() {
        let config = CronogramaConfig {
            year: Some(2025),
            ..CronogramaConfig::default()
        };
        assert_eq!(config.day_label(13), "13 Nov");
        assert_eq!(config.day_label(31), "Día 31");
    }
}
