#![forbid(unsafe_code)]
use campus_timetable::{
    build_periods, ClassSpec, Day, Faculty, FacultyRoster, Generator, PeriodConfig, RecordKey,
    ScriptedSource, Semester, SubjectRequirement, TimetableRecord, TimetableStore, TimingConfig,
};
use std::fs;
use tempfile::tempdir;

fn sample_record(name: &str) -> TimetableRecord {
    let roster = FacultyRoster::new(vec![
        Faculty::new("F1", "Ada", "Lovelace"),
        Faculty::new("F2", "Alan", "Turing"),
    ]);
    let classes = vec![
        ClassSpec::new("CSE-A", "A")
            .with_subject(SubjectRequirement::new("Math", "Ada Lovelace", 2)),
        ClassSpec::new("CSE-B", "B")
            .with_subject(SubjectRequirement::new("Logic", "Alan Turing", 1)),
    ];
    let periods = build_periods(&PeriodConfig::default());
    let mut source = ScriptedSource::new(vec![0, 0, 1, 1, 2, 2]);
    let run = Generator::default()
        .generate(&classes, &roster, &periods, &mut source)
        .unwrap();
    TimetableRecord::new(
        RecordKey::new(name, "2025-2026", Semester::Fall),
        classes,
        run.timetable,
    )
}

#[test]
fn save_twice_bumps_version_and_keeps_identity() {
    let dir = tempdir().unwrap();
    let store = TimetableStore::new(dir.path().join("store"));

    let first = store.save(sample_record("Main plan")).unwrap();
    assert_eq!(first.version, 1);

    let second = store.save(sample_record("Main plan")).unwrap();
    assert_eq!(second.version, 2);
    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);

    let loaded = store.load(&first.key()).unwrap();
    assert_eq!(loaded.version, 2);
    assert_eq!(loaded.schedule, second.schedule);
    assert_eq!(loaded.classes.len(), 2);
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn filtered_lookups_by_class_and_faculty() {
    let dir = tempdir().unwrap();
    let store = TimetableStore::new(dir.path());
    store.save(sample_record("Main plan")).unwrap();
    store.save(sample_record("Backup plan")).unwrap();

    let listed: Vec<String> = store.list().unwrap().into_iter().map(|r| r.name).collect();
    assert_eq!(listed, vec!["Backup plan", "Main plan"]);

    let for_class = store.for_class("CSE-A").unwrap();
    assert_eq!(for_class.len(), 2);
    assert_eq!(for_class[0].schedule.occupied(), 2);
    assert_eq!(for_class[0].periods.len(), 7);

    let turing = store.for_faculty("Alan Turing").unwrap();
    assert_eq!(turing.len(), 2);
    assert!(turing[0].schedule.cell(Day::Wednesday, "Period 3").is_some_and(|c| !c.is_free()));

    assert!(store.for_class("MBA-1").unwrap().is_empty());
    assert!(store.for_faculty("Grace Hopper").unwrap().is_empty());
}

#[test]
fn unreadable_files_are_skipped_by_list() {
    let dir = tempdir().unwrap();
    let store = TimetableStore::new(dir.path());
    store.save(sample_record("Main plan")).unwrap();
    fs::write(dir.path().join("garbage.json"), "{ not json").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn remove_then_load_fails() {
    let dir = tempdir().unwrap();
    let store = TimetableStore::new(dir.path());
    let saved = store.save(sample_record("Main plan")).unwrap();

    store.remove(&saved.key()).unwrap();
    assert!(store.load(&saved.key()).is_err());
    assert!(store.remove(&saved.key()).is_err());
}

#[test]
fn blank_name_is_rejected() {
    let dir = tempdir().unwrap();
    let store = TimetableStore::new(dir.path());
    assert!(store.save(sample_record("  ")).is_err());
}

#[test]
fn timing_config_from_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("timing.json");
    fs::write(
        &path,
        r#"{
            "day_start": "08:30",
            "day_end": "16:00",
            "lunch_start": "12:30",
            "lunch_end": "13:30",
            "period_minutes": 55,
            "break_minutes": 5,
            "days": ["Friday", "Monday", "Monday"]
        }"#,
    )
    .unwrap();

    let cfg = TimingConfig::load_from_file(&path).unwrap();
    let grid = cfg.period_config();
    assert_eq!(grid.day_start, 510);
    assert_eq!(grid.lunch_end, 810);
    assert_eq!(grid.period_minutes, 55);

    let opts = cfg.generate_options();
    assert_eq!(opts.days, vec![Day::Monday, Day::Friday]);
    assert_eq!(opts.max_attempts, 100);

    let periods = build_periods(&grid);
    assert_eq!(periods[0].time, "8:30 - 9:25");
}

fn timing_json(day_start: &str, period_minutes: i64) -> String {
    format!(
        r#"{{"day_start": "{day_start}", "day_end": "17:00", "lunch_start": "12:00",
            "lunch_end": "13:00", "period_minutes": {period_minutes}}}"#
    )
}

#[test]
fn timing_config_rejects_bad_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("timing.json");

    fs::write(&path, timing_json("9h", 50)).unwrap();
    assert!(TimingConfig::load_from_file(&path).is_err());

    fs::write(&path, timing_json("09:00", 0)).unwrap();
    assert!(TimingConfig::load_from_file(&path).is_err());

    fs::write(&path, timing_json("09:00", 2_147_483_640)).unwrap();
    let err = TimingConfig::load_from_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains("must fit in a day"), "{err:#}");
}

#[test]
fn default_timing_matches_default_grid() {
    let cfg = TimingConfig::default();
    assert_eq!(cfg.period_config(), PeriodConfig::default());
    assert!(cfg.validate().is_ok());
}
