mod conflicts;
mod feasibility;
mod placement;
mod random;
mod types;
mod views;

pub use feasibility::{FeasibilityReport, Load};
pub use random::{ScriptedSource, SlotSource};
pub use types::{
    Assignment, Cell, Conflict, ConflictKind, GenError, GenerateOptions, Generation,
    PlacementWarning, DEFAULT_MAX_ATTEMPTS,
};
pub use views::{GeneratedTimetable, WeekGrid};

use crate::model::{ClassSpec, FacultyRoster, Period};

/// Generator : placement aléatoire borné, sans état entre deux exécutions.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    opts: GenerateOptions,
}

impl Generator {
    pub fn new(opts: GenerateOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.opts
    }

    /// Place chaque matière de chaque classe, dans l'ordre d'entrée.
    ///
    /// Les entrées ne sont jamais modifiées. Une matière non résolue ou
    /// incomplète produit un avertissement, la génération continue.
    pub fn generate<S: SlotSource + ?Sized>(
        &self,
        classes: &[ClassSpec],
        roster: &FacultyRoster,
        periods: &[Period],
        source: &mut S,
    ) -> Result<Generation, GenError> {
        placement::generate(classes, roster, periods, &self.opts, source)
    }

    pub fn feasibility(
        &self,
        classes: &[ClassSpec],
        roster: &FacultyRoster,
        periods: &[Period],
    ) -> FeasibilityReport {
        feasibility::feasibility(classes, roster, periods, &self.opts)
    }
}

/// Détecte doubles réservations et placements hors grille.
pub fn detect_conflicts(timetable: &GeneratedTimetable) -> Vec<Conflict> {
    conflicts::detect_conflicts(timetable)
}
