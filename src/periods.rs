//! Construction de la grille des créneaux d'une journée.
//!
//! Calcul pur : mêmes paramètres, même séquence. Les paramètres incohérents
//! donnent une séquence vide, `PeriodConfig::validate` permet de le détecter en amont.

use crate::model::Period;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Paramètres horaires, en minutes depuis minuit.
///
/// Signés pour que des valeurs négatives restent représentables (elles donnent
/// une grille vide plutôt qu'une panique).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodConfig {
    pub day_start: i32,
    pub day_end: i32,
    pub lunch_start: i32,
    pub lunch_end: i32,
    pub period_minutes: i32,
    pub break_minutes: i32,
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self {
            day_start: 9 * 60,
            day_end: 17 * 60 + 20,
            lunch_start: 12 * 60,
            lunch_end: 13 * 60 + 15,
            period_minutes: 50,
            break_minutes: 10,
        }
    }
}

const MINUTES_PER_DAY: i32 = 24 * 60;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("period duration must be > 0 (got {0})")]
    NonPositivePeriod(i32),
    #[error("break duration cannot be negative (got {0})")]
    NegativeBreak(i32),
    #[error("period and break durations must fit in a day (got {0} minutes)")]
    DurationTooLong(i32),
    #[error("day end must be after day start")]
    InvertedDay,
    #[error("lunch end must not be before lunch start")]
    InvertedLunch,
    #[error("timing values must lie within a single day (0..=1440 minutes)")]
    OutOfDay,
    #[error("configuration yields no teaching period")]
    EmptyGrid,
}

impl PeriodConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.period_minutes <= 0 {
            return Err(ConfigError::NonPositivePeriod(self.period_minutes));
        }
        if self.break_minutes < 0 {
            return Err(ConfigError::NegativeBreak(self.break_minutes));
        }
        if let Some(&m) = [self.period_minutes, self.break_minutes]
            .iter()
            .find(|m| **m > MINUTES_PER_DAY)
        {
            return Err(ConfigError::DurationTooLong(m));
        }
        let bounds = [self.day_start, self.day_end, self.lunch_start, self.lunch_end];
        if bounds.iter().any(|m| !(0..=MINUTES_PER_DAY).contains(m)) {
            return Err(ConfigError::OutOfDay);
        }
        if self.day_end <= self.day_start {
            return Err(ConfigError::InvertedDay);
        }
        if self.lunch_end < self.lunch_start {
            return Err(ConfigError::InvertedLunch);
        }
        if build_periods(self).is_empty() {
            return Err(ConfigError::EmptyGrid);
        }
        Ok(())
    }

    fn is_malformed(&self) -> bool {
        self.period_minutes <= 0
            || self.break_minutes < 0
            || self.period_minutes > MINUTES_PER_DAY
            || self.break_minutes > MINUTES_PER_DAY
            || self.day_start < 0
            || self.day_end > MINUTES_PER_DAY
            || self.lunch_end < self.lunch_start
    }
}

/// Génère les créneaux `Period 1..n` entre `day_start` et `day_end`, sans empiéter
/// sur la pause déjeuner `[lunch_start, lunch_end)`.
///
/// - un créneau qui chevaucherait le déjeuner n'est pas émis : le curseur saute à `lunch_end` ;
/// - la pause inter-créneaux est omise si elle tomberait dans le déjeuner ;
/// - le reliquat qui ne contient pas un créneau complet est ignoré.
pub fn build_periods(cfg: &PeriodConfig) -> Vec<Period> {
    let mut out = Vec::new();
    if cfg.is_malformed() {
        return out;
    }

    let mut cursor = cfg.day_start;
    while let Some(end) = cursor.checked_add(cfg.period_minutes) {
        if end > cfg.day_end {
            break;
        }
        let clear_of_lunch = end <= cfg.lunch_start || cursor >= cfg.lunch_end;
        if !clear_of_lunch {
            cursor = cfg.lunch_end;
            continue;
        }

        out.push(Period {
            name: format!("Period {}", out.len() + 1),
            time: format!("{} - {}", format_clock(cursor), format_clock(end)),
            start: cursor as u32,
            end: end as u32,
        });

        let Some(break_end) = end.checked_add(cfg.break_minutes) else {
            break;
        };
        let break_hits_lunch = end < cfg.lunch_end && break_end > cfg.lunch_start;
        cursor = if break_hits_lunch { end } else { break_end };
    }

    out
}

/// `H:MM`, 24 h, heure sans zéro initial.
pub fn format_clock(minute: i32) -> String {
    format!("{}:{:02}", minute.div_euclid(60), minute.rem_euclid(60))
}
