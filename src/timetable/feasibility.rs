use super::types::GenerateOptions;
use crate::model::{ClassSpec, FacultyRoster, Period};
use std::collections::BTreeMap;

/// Charge hebdomadaire demandée à une entité.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Load {
    pub name: String,
    pub demand: u32,
}

/// Diagnostic préalable : demande par classe et par enseignant face aux
/// `jours × créneaux` disponibles.
///
/// Condition nécessaire seulement : une demande sous la capacité peut encore
/// échouer avec le budget de tirages. N'influence pas la génération.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeasibilityReport {
    pub capacity: u32,
    pub classes: Vec<Load>,
    pub faculty: Vec<Load>,
    /// `(classe, matière, enseignant)` non résolus.
    pub unresolved: Vec<(String, String, String)>,
}

impl FeasibilityReport {
    pub fn overloaded(&self) -> impl Iterator<Item = &Load> + '_ {
        self.classes
            .iter()
            .chain(self.faculty.iter())
            .filter(move |l| l.demand > self.capacity)
    }

    pub fn is_feasible(&self) -> bool {
        self.unresolved.is_empty() && self.overloaded().next().is_none()
    }
}

pub(super) fn feasibility(
    classes: &[ClassSpec],
    roster: &FacultyRoster,
    periods: &[Period],
    opts: &GenerateOptions,
) -> FeasibilityReport {
    let capacity = opts
        .days
        .len()
        .checked_mul(periods.len())
        .and_then(|slots| u32::try_from(slots).ok())
        .unwrap_or(u32::MAX);
    let mut class_load: BTreeMap<String, u32> = BTreeMap::new();
    let mut faculty_load: BTreeMap<String, u32> = BTreeMap::new();
    let mut unresolved = Vec::new();

    for class in classes {
        let entry = class_load.entry(class.name.clone()).or_default();
        for req in &class.subjects {
            match roster.resolve(req) {
                Some(f) => {
                    *entry = entry.saturating_add(req.classes_per_week);
                    let taught = faculty_load.entry(f.display_name()).or_default();
                    *taught = taught.saturating_add(req.classes_per_week);
                }
                None => unresolved.push((
                    class.name.clone(),
                    req.subject.clone(),
                    req.faculty.clone(),
                )),
            }
        }
    }

    let to_loads = |m: BTreeMap<String, u32>| -> Vec<Load> {
        m.into_iter()
            .map(|(name, demand)| Load { name, demand })
            .collect()
    };

    FeasibilityReport {
        capacity,
        classes: to_loads(class_load),
        faculty: to_loads(faculty_load),
        unresolved,
    }
}
