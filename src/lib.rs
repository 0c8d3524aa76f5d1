#![forbid(unsafe_code)]
//! Campus timetable : génération d'emplois du temps hebdomadaires (sans BD).
//!
//! - Grille des créneaux à partir des horaires (déjeuner et pauses compris).
//! - Placement aléatoire borné, sans double réservation classe/enseignant.
//! - Vues par classe et par enseignant dérivées d'un seul jeu de placements.
//! - Stockage fichiers (JSON/CSV), enregistrements versionnés.

pub mod config;
pub mod io;
pub mod model;
pub mod periods;
pub mod render;
pub mod storage;
pub mod timetable;

pub use config::TimingConfig;
pub use model::{
    ClassSpec, Day, Faculty, FacultyId, FacultyRoster, Period, RecordKey, Semester,
    SubjectRequirement, TimetableRecord,
};
pub use periods::{build_periods, format_clock, ConfigError, PeriodConfig};
pub use render::{GridRenderer, TextGrid};
pub use storage::{FilteredTimetable, JsonStorage, Storage, TimetableStore};
pub use timetable::{
    detect_conflicts, Assignment, Cell, Conflict, ConflictKind, FeasibilityReport, GenError,
    GenerateOptions, GeneratedTimetable, Generation, Generator, PlacementWarning, ScriptedSource,
    SlotSource, WeekGrid,
};
