use crate::model::{ClassSpec, Faculty, FacultyId, FacultyRoster, Period, SubjectRequirement};
use crate::timetable::{GeneratedTimetable, WeekGrid};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Import du référentiel enseignants: header `employee_id,first_name,last_name`
///
/// Ids et noms affichés doivent être uniques : les placements sont indexés par nom affiché.
pub fn import_faculty_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<FacultyRoster> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out: Vec<Faculty> = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing employee_id")?.trim();
        let first = rec.get(1).context("missing first_name")?.trim();
        let last = rec.get(2).context("missing last_name")?.trim();
        if id.is_empty() || (first.is_empty() && last.is_empty()) {
            bail!("invalid faculty row (empty)");
        }
        if out.iter().any(|f| f.id.as_str() == id) {
            bail!("duplicate employee_id {id}");
        }
        let faculty = Faculty::new(id, first, last);
        let name = faculty.display_name();
        if let Some(other) = out.iter().find(|f| f.display_name() == name) {
            bail!(
                "employee_id {id} and {} share the display name {name}",
                other.id.as_str()
            );
        }
        out.push(faculty);
    }
    Ok(FacultyRoster::new(out))
}

/// Import des besoins: header `class,section,subject,faculty,classes_per_week[,faculty_id]`.
///
/// Les lignes sont regroupées par classe (ordre de première apparition),
/// les matières gardent l'ordre des lignes.
pub fn import_classes_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<ClassSpec>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out: Vec<ClassSpec> = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let row = line + 2;
        let class = rec.get(0).context("missing class")?.trim();
        let section = rec.get(1).context("missing section")?.trim();
        let subject = rec.get(2).context("missing subject")?.trim();
        let faculty = rec.get(3).context("missing faculty")?.trim();
        let count = rec.get(4).context("missing classes_per_week")?.trim();
        if class.is_empty() || subject.is_empty() || faculty.is_empty() {
            bail!("invalid class row {row} (empty)");
        }
        let classes_per_week: u32 = count
            .parse()
            .with_context(|| format!("invalid classes_per_week on row {row}: {count}"))?;
        if classes_per_week == 0 {
            bail!("classes_per_week must be >= 1 (row {row})");
        }

        let mut req = SubjectRequirement::new(subject, faculty, classes_per_week);
        if let Some(id) = rec.get(5).map(str::trim).filter(|s| !s.is_empty()) {
            req = req.with_faculty_id(FacultyId::new(id));
        }

        match out.iter_mut().find(|c| c.name == class) {
            Some(spec) => spec.subjects.push(req),
            None => out.push(ClassSpec::new(class, section).with_subject(req)),
        }
    }
    Ok(out)
}

/// Export JSON de l'emploi du temps avec ses deux vues (jolie mise en forme)
pub fn export_timetable_json<P: AsRef<Path>>(
    path: P,
    timetable: &GeneratedTimetable,
) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(&TimetableExport::from(timetable))?;
    fs::write(path, s)?;
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimetableExport<'a> {
    periods: &'a [Period],
    class_view: BTreeMap<String, WeekGrid>,
    faculty_view: BTreeMap<String, WeekGrid>,
}

impl<'a> From<&'a GeneratedTimetable> for TimetableExport<'a> {
    fn from(t: &'a GeneratedTimetable) -> Self {
        Self {
            periods: t.periods(),
            class_view: t.class_view(),
            faculty_view: t.faculty_view(),
        }
    }
}

/// Export CSV des placements: header `class,day,period,time,subject,faculty`
pub fn export_assignments_csv<P: AsRef<Path>>(
    path: P,
    timetable: &GeneratedTimetable,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["class", "day", "period", "time", "subject", "faculty"])?;
    let mut rows: Vec<_> = timetable.assignments().iter().collect();
    rows.sort_by(|a, b| {
        (&a.class, a.day, period_rank(timetable, &a.period))
            .cmp(&(&b.class, b.day, period_rank(timetable, &b.period)))
    });
    for a in rows {
        let time = timetable
            .period(&a.period)
            .map(|p| p.time.as_str())
            .unwrap_or("");
        w.write_record([
            a.class.as_str(),
            a.day.as_str(),
            a.period.as_str(),
            time,
            a.subject.as_str(),
            a.faculty.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

fn period_rank(timetable: &GeneratedTimetable, name: &str) -> usize {
    timetable
        .periods()
        .iter()
        .position(|p| p.name == name)
        .unwrap_or(usize::MAX)
}
