use crate::model::{Period, RecordKey, Semester, TimetableRecord};
use crate::timetable::WeekGrid;
use anyhow::{bail, Context};
use chrono::Utc;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

pub trait Storage {
    /// Charge un enregistrement depuis un support.
    fn load(&self) -> anyhow::Result<TimetableRecord>;
    /// Sauvegarde de manière atomique.
    fn save(&self, record: &TimetableRecord) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<TimetableRecord> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let record: TimetableRecord = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(record)
    }

    fn save(&self, record: &TimetableRecord) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(record)?;
        let mut tmp = NamedTempFile::new_in(self.path.parent().unwrap_or_else(|| Path::new(".")))
            .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

/// Vue filtrée d'un enregistrement (une classe ou un enseignant), lecture seule.
#[derive(Debug, Clone)]
pub struct FilteredTimetable {
    pub name: String,
    pub academic_year: String,
    pub semester: Semester,
    pub version: u32,
    pub periods: Vec<Period>,
    pub schedule: WeekGrid,
}

impl FilteredTimetable {
    pub fn new(record: &TimetableRecord, schedule: WeekGrid) -> Self {
        Self {
            name: record.name.clone(),
            academic_year: record.academic_year.clone(),
            semester: record.semester,
            version: record.version,
            periods: record.schedule.periods().to_vec(),
            schedule,
        }
    }
}

/// Répertoire d'emplois du temps, un fichier JSON par clé `(nom, année, semestre)`.
#[derive(Debug, Clone)]
pub struct TimetableStore {
    base_dir: PathBuf,
}

impl TimetableStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            base_dir: dir.as_ref().to_path_buf(),
        }
    }

    fn ensure_dir(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("creating store directory {}", self.base_dir.display()))
    }

    pub fn path_for(&self, key: &RecordKey) -> PathBuf {
        self.base_dir.join(format!(
            "{}__{}__{}.json",
            slug(&key.name),
            slug(&key.academic_year),
            key.semester.as_str().to_ascii_lowercase()
        ))
    }

    /// Sauvegarde ; sur une clé existante, conserve id et date de création et
    /// incrémente la version.
    pub fn save(&self, mut record: TimetableRecord) -> anyhow::Result<TimetableRecord> {
        if record.name.trim().is_empty() || record.academic_year.trim().is_empty() {
            bail!("timetable name and academic year are required");
        }
        self.ensure_dir()?;
        let storage = JsonStorage::open(self.path_for(&record.key()))?;
        if storage.path().exists() {
            let previous = storage.load()?;
            if previous.key() != record.key() {
                bail!(
                    "{} already holds {} {} {}",
                    storage.path().display(),
                    previous.name,
                    previous.academic_year,
                    previous.semester
                );
            }
            record.id = previous.id;
            record.created_at = previous.created_at;
            record.version = previous.version + 1;
        }
        record.updated_at = Utc::now();
        storage.save(&record)?;
        debug!(
            name = %record.name,
            version = record.version,
            path = %storage.path().display(),
            "timetable saved"
        );
        Ok(record)
    }

    pub fn load(&self, key: &RecordKey) -> anyhow::Result<TimetableRecord> {
        let storage = JsonStorage::open(self.path_for(key))?;
        let record = storage.load()?;
        if &record.key() != key {
            bail!(
                "{} holds {} {} {}, not the requested timetable",
                storage.path().display(),
                record.name,
                record.academic_year,
                record.semester
            );
        }
        Ok(record)
    }

    pub fn remove(&self, key: &RecordKey) -> anyhow::Result<()> {
        let path = self.path_for(key);
        fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))
    }

    pub fn list(&self) -> anyhow::Result<Vec<TimetableRecord>> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match JsonStorage::open(&path)?.load() {
                Ok(record) => out.push(record),
                Err(err) => {
                    warn!("could not parse timetable {}: {err:#}", path.display());
                    continue;
                }
            }
        }
        out.sort_by(|a, b| {
            (&a.name, &a.academic_year, a.semester.as_str())
                .cmp(&(&b.name, &b.academic_year, b.semester.as_str()))
        });
        Ok(out)
    }

    /// Emplois du temps où figure la classe.
    pub fn for_class(&self, class: &str) -> anyhow::Result<Vec<FilteredTimetable>> {
        Ok(self
            .list()?
            .iter()
            .filter_map(|r| {
                r.schedule
                    .class_timetable(class)
                    .map(|grid| FilteredTimetable::new(r, grid))
            })
            .collect())
    }

    /// Emplois du temps où l'enseignant a au moins un créneau.
    pub fn for_faculty(&self, faculty: &str) -> anyhow::Result<Vec<FilteredTimetable>> {
        Ok(self
            .list()?
            .iter()
            .filter_map(|r| {
                r.schedule
                    .faculty_timetable(faculty)
                    .map(|grid| FilteredTimetable::new(r, grid))
            })
            .collect())
    }
}

fn slug(raw: &str) -> String {
    let s: String = raw
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    if s.is_empty() {
        "_".to_string()
    } else {
        s
    }
}
