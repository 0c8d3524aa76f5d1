use super::types::{Assignment, Conflict, ConflictKind};
use super::GeneratedTimetable;
use std::collections::HashMap;

pub(super) fn detect_conflicts(timetable: &GeneratedTimetable) -> Vec<Conflict> {
    let mut out = Vec::new();
    let mut by_class: HashMap<(&str, _, &str), &Assignment> = HashMap::new();
    let mut by_faculty: HashMap<(&str, _, &str), &Assignment> = HashMap::new();

    for a in timetable.assignments() {
        let on_grid = timetable.days().contains(&a.day) && timetable.period(&a.period).is_some();
        if !on_grid {
            out.push(Conflict {
                kind: ConflictKind::OutsideGrid,
                entity: a.class.clone(),
                first: a.clone(),
                second: None,
            });
        }
        if !timetable.classes().contains(&a.class) {
            out.push(Conflict {
                kind: ConflictKind::UnknownClass,
                entity: a.class.clone(),
                first: a.clone(),
                second: None,
            });
        }

        if let Some(prev) = by_class.insert((a.class.as_str(), a.day, a.period.as_str()), a) {
            out.push(Conflict {
                kind: ConflictKind::ClassDoubleBooked,
                entity: a.class.clone(),
                first: prev.clone(),
                second: Some(a.clone()),
            });
        }
        if let Some(prev) = by_faculty.insert((a.faculty.as_str(), a.day, a.period.as_str()), a) {
            out.push(Conflict {
                kind: ConflictKind::FacultyDoubleBooked,
                entity: a.faculty.clone(),
                first: prev.clone(),
                second: Some(a.clone()),
            });
        }
    }

    out
}
