#![forbid(unsafe_code)]
use campus_timetable::{
    Assignment, Day, GeneratedTimetable, GridRenderer, Period, TextGrid,
};

fn two_by_two() -> GeneratedTimetable {
    let periods = vec![
        Period {
            name: "Period 1".into(),
            time: "9:00 - 9:50".into(),
            start: 540,
            end: 590,
        },
        Period {
            name: "Period 2".into(),
            time: "10:00 - 10:50".into(),
            start: 600,
            end: 650,
        },
    ];
    GeneratedTimetable::from_parts(
        vec![Day::Monday, Day::Tuesday],
        periods,
        vec!["CSE-A".into()],
        vec![Assignment {
            class: "CSE-A".into(),
            day: Day::Monday,
            period: "Period 2".into(),
            subject: "Math".into(),
            faculty: "Ada Lovelace".into(),
        }],
    )
}

#[test]
fn class_grid_as_text() {
    let t = two_by_two();
    let grid = t.class_timetable("CSE-A").unwrap();
    let out = TextGrid.render("CSE-A", &grid, t.periods());
    insta::assert_snapshot!(out, @r"
CSE-A
Day     | Period 1    | Period 2
        | 9:00 - 9:50 | 10:00 - 10:50
Monday  | -           | Math - Ada Lovelace
Tuesday | -           | -
");
}

#[test]
fn faculty_grid_shows_class_as_counterpart() {
    let t = two_by_two();
    let grid = t.faculty_timetable("Ada Lovelace").unwrap();
    let out = TextGrid.render("Ada Lovelace", &grid, t.periods());
    let monday = out.lines().find(|l| l.starts_with("Monday")).unwrap();
    assert!(monday.ends_with("Math - CSE-A"), "{monday}");
    assert!(out.lines().any(|l| l == "Tuesday | -           | -"), "{out}");
}
