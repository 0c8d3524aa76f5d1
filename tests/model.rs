#![forbid(unsafe_code)]
use campus_timetable::{Day, Faculty, FacultyId, FacultyRoster, Semester, SubjectRequirement};

#[test]
fn day_and_semester_parse_case_insensitively() {
    assert_eq!("monday".parse::<Day>(), Ok(Day::Monday));
    assert_eq!(" FRIDAY ".parse::<Day>(), Ok(Day::Friday));
    assert!("Saturday".parse::<Day>().is_err());
    assert_eq!("autumn".parse::<Semester>(), Ok(Semester::Fall));
    assert_eq!(Semester::Winter.to_string(), "Winter");
    assert!(Day::Monday < Day::Friday);
}

#[test]
fn roster_resolves_by_id_then_display_name() {
    let roster = FacultyRoster::new(vec![
        Faculty::new("F1", "Ada", "Lovelace"),
        Faculty::new("F2", "Alan", "Turing"),
    ]);

    let by_name = SubjectRequirement::new("Math", " Ada Lovelace ", 2);
    assert_eq!(roster.resolve(&by_name).map(|f| f.id.as_str()), Some("F1"));

    let by_id = SubjectRequirement::new("Logic", "Ada Lovelace", 1)
        .with_faculty_id(FacultyId::new("F2"));
    assert_eq!(roster.resolve(&by_id).map(|f| f.display_name()), Some("Alan Turing".to_string()));

    let stale_id = SubjectRequirement::new("Logic", "Alan Turing", 1)
        .with_faculty_id(FacultyId::new("F9"));
    assert!(roster.resolve(&stale_id).is_none());
}
