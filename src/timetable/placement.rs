use super::random::SlotSource;
use super::types::{Assignment, GenError, GenerateOptions, Generation, PlacementWarning};
use super::GeneratedTimetable;
use crate::model::{ClassSpec, Day, FacultyRoster, Period, SubjectRequirement};
use std::collections::HashSet;
use tracing::{debug, info, warn};

type SlotKey = (String, Day, String);

/// Placements en cours + index d'occupation (classe, enseignant).
///
/// Les index ne sont alimentés que par `place`, en même temps que la liste.
#[derive(Default)]
struct Board {
    assignments: Vec<Assignment>,
    class_busy: HashSet<SlotKey>,
    faculty_busy: HashSet<SlotKey>,
}

impl Board {
    fn class_free(&self, class: &str, day: Day, period: &str) -> bool {
        !self.class_busy.contains(&(class.to_string(), day, period.to_string()))
    }

    fn faculty_free(&self, faculty: &str, day: Day, period: &str) -> bool {
        !self.faculty_busy.contains(&(faculty.to_string(), day, period.to_string()))
    }

    fn place(&mut self, a: Assignment) {
        self.class_busy.insert((a.class.clone(), a.day, a.period.clone()));
        self.faculty_busy.insert((a.faculty.clone(), a.day, a.period.clone()));
        self.assignments.push(a);
    }
}

pub(super) fn generate<S: SlotSource + ?Sized>(
    classes: &[ClassSpec],
    roster: &FacultyRoster,
    periods: &[Period],
    opts: &GenerateOptions,
    source: &mut S,
) -> Result<Generation, GenError> {
    if periods.is_empty() {
        return Err(GenError::NoPeriods);
    }
    if opts.days.is_empty() {
        return Err(GenError::NoDays);
    }

    let mut board = Board::default();
    let mut warnings = Vec::new();

    for class in classes {
        for req in &class.subjects {
            let Some(faculty) = roster.resolve(req) else {
                let w = PlacementWarning::UnresolvedFaculty {
                    class: class.name.clone(),
                    subject: req.subject.clone(),
                    faculty: req.faculty.clone(),
                };
                warn!("{w}");
                warnings.push(w);
                continue;
            };
            let faculty_name = faculty.display_name();

            let placed = place_subject(
                &mut board,
                &class.name,
                req,
                &faculty_name,
                periods,
                opts,
                source,
            );
            if placed < req.classes_per_week {
                let w = PlacementWarning::PartialPlacement {
                    class: class.name.clone(),
                    subject: req.subject.clone(),
                    faculty: faculty_name,
                    requested: req.classes_per_week,
                    placed,
                };
                warn!("{w}");
                warnings.push(w);
            }
        }
    }

    let mut class_names: Vec<String> = Vec::new();
    for class in classes {
        if !class_names.contains(&class.name) {
            class_names.push(class.name.clone());
        }
    }

    info!(
        classes = class_names.len(),
        assignments = board.assignments.len(),
        warnings = warnings.len(),
        "timetable generated"
    );

    Ok(Generation {
        timetable: GeneratedTimetable::from_parts(
            opts.days.clone(),
            periods.to_vec(),
            class_names,
            board.assignments,
        ),
        warnings,
    })
}

/// Tirages aléatoires (jour puis créneau, avec remise) jusqu'à `classes_per_week`
/// placements ou épuisement du budget. Renvoie le nombre de placements obtenus.
fn place_subject<S: SlotSource + ?Sized>(
    board: &mut Board,
    class: &str,
    req: &SubjectRequirement,
    faculty: &str,
    periods: &[Period],
    opts: &GenerateOptions,
    source: &mut S,
) -> u32 {
    let mut remaining = req.classes_per_week;
    let mut attempts = 0u32;

    while remaining > 0 && attempts < opts.max_attempts {
        attempts += 1;
        let day = opts.days[source.pick(opts.days.len())];
        let period = &periods[source.pick(periods.len())];

        if !board.class_free(class, day, &period.name) {
            continue;
        }
        if !board.faculty_free(faculty, day, &period.name) {
            continue;
        }

        debug!(
            class,
            subject = %req.subject,
            faculty,
            %day,
            period = %period.name,
            attempts,
            "placed"
        );
        board.place(Assignment {
            class: class.to_string(),
            day,
            period: period.name.clone(),
            subject: req.subject.clone(),
            faculty: faculty.to_string(),
        });
        remaining -= 1;
    }

    req.classes_per_week - remaining
}
