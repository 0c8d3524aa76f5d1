use super::types::{Assignment, Cell};
use crate::model::{Day, Period};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Emploi du temps généré.
///
/// Les placements sont la seule source de vérité ; vue par classe et vue par
/// enseignant en sont deux projections calculées et ne peuvent donc pas diverger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTimetable {
    days: Vec<Day>,
    periods: Vec<Period>,
    classes: Vec<String>,
    assignments: Vec<Assignment>,
}

impl GeneratedTimetable {
    /// Assemble un emploi du temps à partir de placements existants (import, tests).
    /// Aucun contrôle ici : voir `detect_conflicts`.
    pub fn from_parts(
        days: Vec<Day>,
        periods: Vec<Period>,
        classes: Vec<String>,
        assignments: Vec<Assignment>,
    ) -> Self {
        Self {
            days,
            periods,
            classes,
            assignments,
        }
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn period(&self, name: &str) -> Option<&Period> {
        self.periods.iter().find(|p| p.name == name)
    }

    /// Enseignants ayant au moins un placement, triés.
    pub fn faculty_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.assignments.iter().map(|a| a.faculty.clone()).collect();
        names.sort();
        names.dedup();
        names
    }

    /// Vue par classe : toutes les classes, cases libres comprises.
    pub fn class_view(&self) -> BTreeMap<String, WeekGrid> {
        let mut view: BTreeMap<String, WeekGrid> = self
            .classes
            .iter()
            .map(|c| (c.clone(), self.free_grid()))
            .collect();
        for a in &self.assignments {
            view.entry(a.class.clone())
                .or_insert_with(|| self.free_grid())
                .set(a.day, &a.period, booked_cell(&a.subject, &a.faculty));
        }
        view
    }

    /// Vue par enseignant : une entrée n'existe qu'à partir du premier placement.
    pub fn faculty_view(&self) -> BTreeMap<String, WeekGrid> {
        let mut view: BTreeMap<String, WeekGrid> = BTreeMap::new();
        for a in &self.assignments {
            view.entry(a.faculty.clone())
                .or_insert_with(|| self.free_grid())
                .set(a.day, &a.period, booked_cell(&a.subject, &a.class));
        }
        view
    }

    pub fn class_timetable(&self, class: &str) -> Option<WeekGrid> {
        let known = self.classes.iter().any(|c| c == class)
            || self.assignments.iter().any(|a| a.class == class);
        if !known {
            return None;
        }
        let mut grid = self.free_grid();
        for a in self.assignments.iter().filter(|a| a.class == class) {
            grid.set(a.day, &a.period, booked_cell(&a.subject, &a.faculty));
        }
        Some(grid)
    }

    pub fn faculty_timetable(&self, faculty: &str) -> Option<WeekGrid> {
        let mut mine = self.assignments.iter().filter(|a| a.faculty == faculty).peekable();
        mine.peek()?;
        let mut grid = self.free_grid();
        for a in mine {
            grid.set(a.day, &a.period, booked_cell(&a.subject, &a.class));
        }
        Some(grid)
    }

    fn free_grid(&self) -> WeekGrid {
        WeekGrid::free(&self.days, &self.periods)
    }
}

fn booked_cell(subject: &str, counterpart: &str) -> Cell {
    Cell::Booked {
        subject: subject.to_string(),
        counterpart: counterpart.to_string(),
    }
}

/// Grille hebdomadaire d'une entité : jour → créneau → case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGrid {
    periods: Vec<String>,
    rows: BTreeMap<Day, Vec<Cell>>,
}

impl WeekGrid {
    pub fn free(days: &[Day], periods: &[Period]) -> Self {
        Self {
            periods: periods.iter().map(|p| p.name.clone()).collect(),
            rows: days
                .iter()
                .map(|d| (*d, vec![Cell::Free; periods.len()]))
                .collect(),
        }
    }

    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    pub fn days(&self) -> impl Iterator<Item = Day> + '_ {
        self.rows.keys().copied()
    }

    pub fn row(&self, day: Day) -> Option<&[Cell]> {
        self.rows.get(&day).map(Vec::as_slice)
    }

    pub fn cell(&self, day: Day, period: &str) -> Option<&Cell> {
        let idx = self.periods.iter().position(|p| p == period)?;
        self.rows.get(&day).map(|row| &row[idx])
    }

    /// Cases occupées, dans l'ordre jour puis créneau.
    pub fn booked(&self) -> impl Iterator<Item = (Day, &str, &Cell)> + '_ {
        self.rows.iter().flat_map(move |(day, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, c)| !c.is_free())
                .map(move |(i, c)| (*day, self.periods[i].as_str(), c))
        })
    }

    pub fn occupied(&self) -> usize {
        self.booked().count()
    }

    /// Hors grille (jour ou créneau inconnu) : ignoré.
    fn set(&mut self, day: Day, period: &str, cell: Cell) {
        let Some(idx) = self.periods.iter().position(|p| p == period) else {
            return;
        };
        if let Some(row) = self.rows.get_mut(&day) {
            row[idx] = cell;
        }
    }
}

/// Sérialisé comme `{ "Monday": { "Period 1": ..., ... }, ... }`, ordre des créneaux conservé.
impl Serialize for WeekGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (day, row) in &self.rows {
            map.serialize_entry(day, &DayRow { periods: &self.periods, cells: row })?;
        }
        map.end()
    }
}

struct DayRow<'a> {
    periods: &'a [String],
    cells: &'a [Cell],
}

impl Serialize for DayRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, cell) in self.periods.iter().zip(self.cells) {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}
