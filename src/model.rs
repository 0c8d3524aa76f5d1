use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifiant fort pour Faculty (matricule enseignant)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FacultyId(String);

impl FacultyId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Enseignant du référentiel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: FacultyId,
    pub first_name: String,
    pub last_name: String,
}

impl Faculty {
    pub fn new<I: AsRef<str>, F: Into<String>, L: Into<String>>(id: I, first: F, last: L) -> Self {
        Self {
            id: FacultyId::new(id),
            first_name: first.into(),
            last_name: last.into(),
        }
    }

    /// Nom affiché : `Prénom Nom`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// Référentiel d'enseignants fourni par l'appelant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacultyRoster {
    pub faculty: Vec<Faculty>,
}

impl FacultyRoster {
    pub fn new(faculty: Vec<Faculty>) -> Self {
        Self { faculty }
    }

    pub fn find_by_id<'a>(&'a self, id: &FacultyId) -> Option<&'a Faculty> {
        self.faculty.iter().find(|f| &f.id == id)
    }

    pub fn find_by_display_name<'a>(&'a self, name: &str) -> Option<&'a Faculty> {
        let name = name.trim();
        self.faculty.iter().find(|f| f.display_name() == name)
    }

    /// Résout l'enseignant d'une matière : par id si fourni, sinon par nom affiché.
    ///
    /// Placements et vues identifient l'enseignant par son nom affiché : deux
    /// entrées d'ids différents portant le même nom sont traitées comme une seule
    /// personne. `import_faculty_csv` refuse ce cas.
    pub fn resolve<'a>(&'a self, req: &SubjectRequirement) -> Option<&'a Faculty> {
        match &req.faculty_id {
            Some(id) => self.find_by_id(id),
            None => self.find_by_display_name(&req.faculty),
        }
    }
}

/// Matière à placer pour une classe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRequirement {
    pub subject: String,
    /// Nom affiché de l'enseignant, tel que saisi.
    pub faculty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<FacultyId>,
    pub classes_per_week: u32,
}

impl SubjectRequirement {
    pub fn new<S: Into<String>, F: Into<String>>(
        subject: S,
        faculty: F,
        classes_per_week: u32,
    ) -> Self {
        Self {
            subject: subject.into(),
            faculty: faculty.into(),
            faculty_id: None,
            classes_per_week,
        }
    }

    pub fn with_faculty_id(mut self, id: FacultyId) -> Self {
        self.faculty_id = Some(id);
        self
    }
}

/// Classe (promotion + section) et ses matières
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSpec {
    pub name: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub subjects: Vec<SubjectRequirement>,
}

impl ClassSpec {
    pub fn new<N: Into<String>, S: Into<String>>(name: N, section: S) -> Self {
        Self {
            name: name.into(),
            section: section.into(),
            subjects: Vec::new(),
        }
    }

    pub fn with_subject(mut self, subject: SubjectRequirement) -> Self {
        self.subjects.push(subject);
        self
    }
}

/// Jour ouvré. L'ordre de déclaration est l'ordre de la semaine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    pub const WEEK: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Day::WEEK
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown day: {needle}"))
    }
}

/// Créneau d'enseignement d'une journée (minutes depuis minuit, `[start, end)`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub name: String,
    pub time: String,
    pub start: u32,
    pub end: u32,
}

impl Period {
    pub fn duration_minutes(&self) -> u32 {
        self.end - self.start
    }
}

/// Semestre académique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Semester {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Semester {
    pub fn as_str(&self) -> &'static str {
        match self {
            Semester::Spring => "Spring",
            Semester::Summer => "Summer",
            Semester::Fall => "Fall",
            Semester::Winter => "Winter",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Semester {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Semester::Spring),
            "summer" => Ok(Semester::Summer),
            "fall" | "autumn" => Ok(Semester::Fall),
            "winter" => Ok(Semester::Winter),
            other => Err(format!("unknown semester: {other}")),
        }
    }
}

/// Identifiant fort pour un enregistrement d'emploi du temps
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Clé métier d'un enregistrement : `(nom, année universitaire, semestre)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub name: String,
    pub academic_year: String,
    pub semester: Semester,
}

impl RecordKey {
    pub fn new<N: Into<String>, Y: Into<String>>(
        name: N,
        academic_year: Y,
        semester: Semester,
    ) -> Self {
        Self {
            name: name.into(),
            academic_year: academic_year.into(),
            semester,
        }
    }
}

/// Emploi du temps persisté (version incrémentée à chaque sauvegarde sur la même clé).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableRecord {
    pub id: RecordId,
    pub name: String,
    pub academic_year: String,
    pub semester: Semester,
    #[serde(default)]
    pub classes: Vec<ClassSpec>,
    pub schedule: crate::timetable::GeneratedTimetable,
    #[serde(default = "first_version")]
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn first_version() -> u32 {
    1
}

impl TimetableRecord {
    pub fn new(
        key: RecordKey,
        classes: Vec<ClassSpec>,
        schedule: crate::timetable::GeneratedTimetable,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::random(),
            name: key.name,
            academic_year: key.academic_year,
            semester: key.semester,
            classes,
            schedule,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.name.clone(), self.academic_year.clone(), self.semester)
    }
}
