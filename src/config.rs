//! Configuration horaire (fichier JSON).
//!
//! ```json
//! {
//!   "day_start": "09:00",
//!   "day_end": "17:20",
//!   "lunch_start": "12:00",
//!   "lunch_end": "13:15",
//!   "period_minutes": 50,
//!   "break_minutes": 10,
//!   "days": ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"],
//!   "max_attempts": 100
//! }
//! ```
//! `days`, `break_minutes` et `max_attempts` sont optionnels.

use crate::model::Day;
use crate::periods::PeriodConfig;
use crate::timetable::{GenerateOptions, DEFAULT_MAX_ATTEMPTS};
use anyhow::{Context, Result};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(with = "clock")]
    pub day_start: NaiveTime,
    #[serde(with = "clock")]
    pub day_end: NaiveTime,
    #[serde(with = "clock")]
    pub lunch_start: NaiveTime,
    #[serde(with = "clock")]
    pub lunch_end: NaiveTime,
    pub period_minutes: i32,
    #[serde(default)]
    pub break_minutes: i32,
    #[serde(default = "default_days")]
    pub days: Vec<Day>,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_days() -> Vec<Day> {
    Day::WEEK.to_vec()
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for TimingConfig {
    fn default() -> Self {
        let grid = PeriodConfig::default();
        Self {
            day_start: from_minutes(grid.day_start),
            day_end: from_minutes(grid.day_end),
            lunch_start: from_minutes(grid.lunch_start),
            lunch_end: from_minutes(grid.lunch_end),
            period_minutes: grid.period_minutes,
            break_minutes: grid.break_minutes,
            days: default_days(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl TimingConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading timing configuration from: {}", path.display());
        let data =
            fs::read(path).with_context(|| format!("reading timing config {}", path.display()))?;
        let cfg: TimingConfig = serde_json::from_slice(&data)
            .with_context(|| format!("parsing timing config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Charge `path` s'il est fourni, sinon la configuration par défaut.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.period_config()
            .validate()
            .context("invalid timing configuration")?;
        if self.days.is_empty() {
            anyhow::bail!("at least one teaching day is required");
        }
        Ok(())
    }

    pub fn period_config(&self) -> PeriodConfig {
        PeriodConfig {
            day_start: minutes(self.day_start),
            day_end: minutes(self.day_end),
            lunch_start: minutes(self.lunch_start),
            lunch_end: minutes(self.lunch_end),
            period_minutes: self.period_minutes,
            break_minutes: self.break_minutes,
        }
    }

    pub fn generate_options(&self) -> GenerateOptions {
        let mut days = self.days.clone();
        days.sort();
        days.dedup();
        GenerateOptions {
            days,
            max_attempts: self.max_attempts,
        }
    }
}

fn minutes(t: NaiveTime) -> i32 {
    (t.hour() * 60 + t.minute()) as i32
}

fn from_minutes(m: i32) -> NaiveTime {
    let m = m.clamp(0, 24 * 60 - 1) as u32;
    NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap_or_default()
}

/// `HH:MM` (secondes acceptées en lecture).
mod clock {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|e| D::Error::custom(format!("invalid time {raw}: {e}")))
    }
}
