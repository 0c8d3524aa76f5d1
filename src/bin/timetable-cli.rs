#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use campus_timetable::{
    build_periods, detect_conflicts, io,
    model::{RecordKey, Semester, TimetableRecord},
    render::{GridRenderer, TextGrid},
    storage::{FilteredTimetable, TimetableStore},
    timetable::Generator,
    TimingConfig,
};
use clap::{Args, Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de génération d'emplois du temps (stockage fichiers, sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Répertoire des emplois du temps enregistrés
    #[arg(long, global = true, default_value = "timetables")]
    store: String,

    #[command(subcommand)]
    cmd: Commands,
}

/// Clé d'un emploi du temps enregistré
#[derive(Args, Debug)]
struct KeyArgs {
    #[arg(long)]
    name: String,
    /// Année universitaire, ex. 2025-2026
    #[arg(long)]
    year: String,
    /// Spring, Summer, Fall ou Winter
    #[arg(long)]
    semester: Semester,
}

impl KeyArgs {
    fn key(&self) -> RecordKey {
        RecordKey::new(self.name.clone(), self.year.clone(), self.semester)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Afficher la grille des créneaux
    Periods {
        /// Configuration horaire JSON (défaut : 9:00-17:20, déjeuner 12:00-13:15)
        #[arg(long)]
        config: Option<String>,
    },

    /// Générer et enregistrer un emploi du temps
    Generate {
        #[command(flatten)]
        key: KeyArgs,
        /// CSV `employee_id,first_name,last_name`
        #[arg(long)]
        faculty: String,
        /// CSV `class,section,subject,faculty,classes_per_week`
        #[arg(long)]
        classes: String,
        #[arg(long)]
        config: Option<String>,
        /// Graine pour un tirage reproductible
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Lister les emplois du temps enregistrés
    List,

    /// Afficher un emploi du temps (tout, une classe ou un enseignant)
    Show {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        semester: Option<Semester>,
        #[arg(long, conflicts_with = "faculty")]
        class: Option<String>,
        #[arg(long)]
        faculty: Option<String>,
    },

    /// Vérifier les conflits d'un emploi du temps enregistré
    Check {
        #[command(flatten)]
        key: KeyArgs,
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Contrôle préalable : demande hebdomadaire vs créneaux disponibles
    Feasibility {
        #[arg(long)]
        faculty: String,
        #[arg(long)]
        classes: String,
        #[arg(long)]
        config: Option<String>,
    },

    /// Exporter un emploi du temps enregistré
    Export {
        #[command(flatten)]
        key: KeyArgs,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Supprimer un emploi du temps enregistré
    Remove {
        #[command(flatten)]
        key: KeyArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let store = TimetableStore::new(&cli.store);

    let code = match cli.cmd {
        Commands::Periods { config } => {
            let cfg = TimingConfig::load_or_default(config)?;
            for p in build_periods(&cfg.period_config()) {
                println!("{} | {}", p.name, p.time);
            }
            0
        }
        Commands::Generate {
            key,
            faculty,
            classes,
            config,
            seed,
        } => {
            let cfg = TimingConfig::load_or_default(config)?;
            let periods = build_periods(&cfg.period_config());
            let roster = io::import_faculty_csv(faculty)?;
            let specs = io::import_classes_csv(classes)?;
            if specs.is_empty() {
                bail!("no class found in the requirements file");
            }

            let mut rng = match seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            };
            let generator = Generator::new(cfg.generate_options());
            let run = generator.generate(&specs, &roster, &periods, &mut rng)?;

            let record = store.save(TimetableRecord::new(key.key(), specs, run.timetable))?;
            println!(
                "Saved {} {} {} (version {}, {} placements)",
                record.name,
                record.academic_year,
                record.semester,
                record.version,
                record.schedule.assignments().len()
            );
            if run.warnings.is_empty() {
                0
            } else {
                eprintln!("{} warning(s):", run.warnings.len());
                for w in &run.warnings {
                    eprintln!("  {w}");
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::List => {
            for r in store.list()? {
                println!(
                    "{} | {} | {} | v{} | {} classes | {}",
                    r.name,
                    r.academic_year,
                    r.semester,
                    r.version,
                    r.schedule.classes().len(),
                    r.updated_at.to_rfc3339()
                );
            }
            0
        }
        Commands::Show {
            name,
            year,
            semester,
            class,
            faculty,
        } => {
            let renderer = TextGrid;
            let found: Vec<(String, FilteredTimetable)> = match (name, year, semester) {
                (Some(name), Some(year), Some(semester)) => {
                    let record = store.load(&RecordKey::new(name, year, semester))?;
                    filter_record(&record, class.as_deref(), faculty.as_deref())
                }
                (None, None, None) => match (class.as_deref(), faculty.as_deref()) {
                    (Some(c), _) => store
                        .for_class(c)?
                        .into_iter()
                        .map(|t| (c.to_string(), t))
                        .collect(),
                    (None, Some(f)) => store
                        .for_faculty(f)?
                        .into_iter()
                        .map(|t| (f.to_string(), t))
                        .collect(),
                    (None, None) => {
                        bail!("--class or --faculty required without --name/--year/--semester")
                    }
                },
                _ => bail!("--name, --year and --semester go together"),
            };
            if found.is_empty() {
                bail!("no matching timetable found");
            }
            for (title, t) in found {
                let heading = format!(
                    "{title} - {} {} {} (v{})",
                    t.name, t.academic_year, t.semester, t.version
                );
                println!("{}", renderer.render(&heading, &t.schedule, &t.periods));
            }
            0
        }
        Commands::Check { key, report } => {
            let record = store.load(&key.key())?;
            let conflicts = detect_conflicts(&record.schedule);
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                if let Some(path) = report {
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["kind", "entity", "day", "period", "first", "second"])?;
                    for c in &conflicts {
                        w.write_record([
                            c.kind.as_str(),
                            c.entity.as_str(),
                            c.first.day.as_str(),
                            c.first.period.as_str(),
                            c.first.subject.as_str(),
                            c.second.as_ref().map_or("", |s| s.subject.as_str()),
                        ])?;
                    }
                    w.flush()?;
                }
                2
            }
        }
        Commands::Feasibility {
            faculty,
            classes,
            config,
        } => {
            let cfg = TimingConfig::load_or_default(config)?;
            let periods = build_periods(&cfg.period_config());
            let roster = io::import_faculty_csv(faculty)?;
            let specs = io::import_classes_csv(classes)?;
            let report =
                Generator::new(cfg.generate_options()).feasibility(&specs, &roster, &periods);

            println!("Capacity: {} slots per class/faculty", report.capacity);
            for l in report.classes.iter().chain(report.faculty.iter()) {
                let flag = if l.demand > report.capacity { "OVER" } else { "ok" };
                println!("{:<4} {} : {}/{}", flag, l.name, l.demand, report.capacity);
            }
            for (class, subject, faculty) in &report.unresolved {
                println!("UNRESOLVED {class} : {subject} ({faculty})");
            }
            if report.is_feasible() {
                0
            } else {
                2
            }
        }
        Commands::Export {
            key,
            out_json,
            out_csv,
        } => {
            if out_json.is_none() && out_csv.is_none() {
                bail!("--out-json or --out-csv required");
            }
            let record = store.load(&key.key())?;
            if let Some(path) = out_json {
                io::export_timetable_json(path, &record.schedule)?;
            }
            if let Some(path) = out_csv {
                io::export_assignments_csv(path, &record.schedule)?;
            }
            0
        }
        Commands::Remove { key } => {
            store.remove(&key.key())?;
            println!("Removed {} {} {}", key.name, key.year, key.semester);
            0
        }
    };

    std::process::exit(code);
}

fn filter_record(
    record: &TimetableRecord,
    class: Option<&str>,
    faculty: Option<&str>,
) -> Vec<(String, FilteredTimetable)> {
    let wrap = |title: &str, grid| (title.to_string(), FilteredTimetable::new(record, grid));
    match (class, faculty) {
        (Some(c), _) => record
            .schedule
            .class_timetable(c)
            .map(|g| wrap(c, g))
            .into_iter()
            .collect(),
        (None, Some(f)) => record
            .schedule
            .faculty_timetable(f)
            .map(|g| wrap(f, g))
            .into_iter()
            .collect(),
        (None, None) => record
            .schedule
            .class_view()
            .into_iter()
            .map(|(c, g)| wrap(&c, g))
            .collect(),
    }
}
