use super::GeneratedTimetable;
use crate::model::Day;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Budget de tirages par matière.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Options de génération
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub days: Vec<Day>,
    pub max_attempts: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            days: Day::WEEK.to_vec(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Un placement : une occurrence de matière pour une classe et un enseignant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub class: String,
    pub day: Day,
    pub period: String,
    pub subject: String,
    pub faculty: String,
}

/// Contenu d'une case (entité, jour, créneau).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Free,
    Booked { subject: String, counterpart: String },
}

impl Cell {
    pub fn is_free(&self) -> bool {
        matches!(self, Cell::Free)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Free => f.write_str("Free"),
            Cell::Booked {
                subject,
                counterpart,
            } => write!(f, "{subject} - {counterpart}"),
        }
    }
}

/// Avertissement non bloquant, une entrée par matière concernée.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacementWarning {
    #[error("{class}: subject {subject} references unknown faculty {faculty}")]
    UnresolvedFaculty {
        class: String,
        subject: String,
        faculty: String,
    },
    #[error("{class}: subject {subject} ({faculty}) placed {placed}/{requested}")]
    PartialPlacement {
        class: String,
        subject: String,
        faculty: String,
        requested: u32,
        placed: u32,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    #[error("no teaching period available: check the timing configuration")]
    NoPeriods,
    #[error("no teaching day selected")]
    NoDays,
}

/// Résultat d'une génération : meilleur effort + avertissements.
#[derive(Debug, Clone)]
pub struct Generation {
    pub timetable: GeneratedTimetable,
    pub warnings: Vec<PlacementWarning>,
}

impl Generation {
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    ClassDoubleBooked,
    FacultyDoubleBooked,
    OutsideGrid,
    UnknownClass,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::ClassDoubleBooked => "class",
            ConflictKind::FacultyDoubleBooked => "faculty",
            ConflictKind::OutsideGrid => "grid",
            ConflictKind::UnknownClass => "unknown-class",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Conflict {
    pub kind: ConflictKind,
    /// Classe ou enseignant concerné.
    pub entity: String,
    pub first: Assignment,
    pub second: Option<Assignment>,
}
