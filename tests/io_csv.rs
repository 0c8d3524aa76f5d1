#![forbid(unsafe_code)]
use campus_timetable::{
    build_periods, io, ClassSpec, Faculty, FacultyRoster, GeneratedTimetable, Generator,
    PeriodConfig, ScriptedSource, SubjectRequirement,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn import_faculty_and_classes() {
    let dir = tempdir().unwrap();
    let faculty = dir.path().join("faculty.csv");
    let classes = dir.path().join("classes.csv");
    fs::write(
        &faculty,
        "employee_id,first_name,last_name\nF1,Ada,Lovelace\nF2, Alan , Turing\n",
    )
    .unwrap();
    fs::write(
        &classes,
        "class,section,subject,faculty,classes_per_week\n\
         CSE-A,A,Math,Ada Lovelace,3\n\
         CSE-B,B,Logic,Alan Turing,2\n\
         CSE-A,A,Logic,Alan Turing,1\n",
    )
    .unwrap();

    let roster = io::import_faculty_csv(&faculty).unwrap();
    assert_eq!(roster.faculty.len(), 2);
    assert_eq!(roster.faculty[1].display_name(), "Alan Turing");

    let specs = io::import_classes_csv(&classes).unwrap();
    assert_eq!(specs.len(), 2);
    assert_eq!(specs[0].name, "CSE-A");
    let subjects: Vec<&str> = specs[0].subjects.iter().map(|s| s.subject.as_str()).collect();
    assert_eq!(subjects, vec!["Math", "Logic"]);
    assert_eq!(specs[1].subjects[0].classes_per_week, 2);
    assert!(specs.iter().all(|c| c.subjects.iter().all(|s| roster.resolve(s).is_some())));
}

#[test]
fn optional_faculty_id_column() {
    let dir = tempdir().unwrap();
    let classes = dir.path().join("classes.csv");
    fs::write(
        &classes,
        "class,section,subject,faculty,classes_per_week,faculty_id\n\
         CSE-A,A,Math,Dr. Lovelace,3,F1\n\
         CSE-A,A,Logic,Alan Turing,2,\n",
    )
    .unwrap();

    let specs = io::import_classes_csv(&classes).unwrap();
    assert_eq!(specs[0].subjects[0].faculty_id.as_ref().map(|id| id.as_str()), Some("F1"));
    assert!(specs[0].subjects[1].faculty_id.is_none());
}

#[test]
fn zero_or_bad_weekly_count_is_rejected() {
    let dir = tempdir().unwrap();
    let classes = dir.path().join("classes.csv");

    fs::write(
        &classes,
        "class,section,subject,faculty,classes_per_week\nCSE-A,A,Math,Ada Lovelace,0\n",
    )
    .unwrap();
    let err = io::import_classes_csv(&classes).unwrap_err();
    assert!(err.to_string().contains("row 2"), "{err}");

    fs::write(
        &classes,
        "class,section,subject,faculty,classes_per_week\nCSE-A,A,Math,Ada Lovelace,three\n",
    )
    .unwrap();
    assert!(io::import_classes_csv(&classes).is_err());
}

#[test]
fn duplicate_faculty_id_is_rejected() {
    let dir = tempdir().unwrap();
    let faculty = dir.path().join("faculty.csv");
    fs::write(
        &faculty,
        "employee_id,first_name,last_name\nF1,Ada,Lovelace\nF1,Alan,Turing\n",
    )
    .unwrap();
    assert!(io::import_faculty_csv(&faculty).is_err());
}

#[test]
fn duplicate_display_name_is_rejected() {
    let dir = tempdir().unwrap();
    let faculty = dir.path().join("faculty.csv");
    fs::write(
        &faculty,
        "employee_id,first_name,last_name\nF1,Ada,Lovelace\nF2, Ada ,Lovelace\n",
    )
    .unwrap();
    let err = io::import_faculty_csv(&faculty).unwrap_err();
    assert!(err.to_string().contains("share the display name Ada Lovelace"), "{err}");
}

fn small_timetable() -> GeneratedTimetable {
    let roster = FacultyRoster::new(vec![Faculty::new("F1", "Ada", "Lovelace")]);
    let classes = vec![ClassSpec::new("CSE-A", "A")
        .with_subject(SubjectRequirement::new("Math", "Ada Lovelace", 2))];
    let periods = build_periods(&PeriodConfig::default());
    let mut source = ScriptedSource::new(vec![1, 3, 0, 4]);
    Generator::default()
        .generate(&classes, &roster, &periods, &mut source)
        .unwrap()
        .timetable
}

#[test]
fn export_assignments_csv_sorted_by_day() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.csv");
    io::export_assignments_csv(&out, &small_timetable()).unwrap();

    let text = fs::read_to_string(&out).unwrap().replace("\r\n", "\n");
    insta::assert_snapshot!(text, @r"
    class,day,period,time,subject,faculty
    CSE-A,Monday,Period 5,14:15 - 15:05,Math,Ada Lovelace
    CSE-A,Tuesday,Period 4,13:15 - 14:05,Math,Ada Lovelace
    ");
}

#[test]
fn export_json_has_both_views() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.json");
    io::export_timetable_json(&out, &small_timetable()).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["periods"].as_array().unwrap().len(), 7);
    assert_eq!(value["classView"]["CSE-A"]["Monday"]["Period 1"], "Free");
    assert_eq!(
        value["classView"]["CSE-A"]["Tuesday"]["Period 4"]["Booked"]["counterpart"],
        "Ada Lovelace"
    );
    assert_eq!(
        value["facultyView"]["Ada Lovelace"]["Monday"]["Period 5"]["Booked"]["counterpart"],
        "CSE-A"
    );
    assert_eq!(
        value["facultyView"].as_object().unwrap().len(),
        1,
        "only faculty with placements"
    );
}
