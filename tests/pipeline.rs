mod common;

use serde_json::json;
use std::collections::{HashMap, HashSet};

use weekly_timetable::Error;
use weekly_timetable::checkpoint::MemoryCheckpoint;
use weekly_timetable::data::{Pass, PlacedCell, SchedulingOutput, ShortfallReason};
use weekly_timetable::slots::{self, Weekday};
use weekly_timetable::solver;

fn at<'a>(output: &'a SchedulingOutput, day: Weekday, slot: &str, dept: u32, year: u8) -> Option<&'a PlacedCell> {
    output.cells.iter().find(|c| {
        c.day == day && c.slot == slot && c.department_id == dept && c.class_year == year
    })
}

fn single_program(courses: serde_json::Value, classrooms: serde_json::Value, enrolled: usize) -> serde_json::Value {
    let enrollments: Vec<serde_json::Value> = (0..enrolled)
        .map(|n| json!({ "studentNumber": format!("S{}", n), "courseId": 1 }))
        .collect();
    json!({
        "config": { "programs": [{ "departmentId": 1, "name": "Software", "classYears": 1 }] },
        "courses": courses,
        "instructors": [
            { "id": 1, "name": "Dr. Kaya", "availability": { "monday": "09:00, 13:00" } }
        ],
        "classrooms": classrooms,
        "enrollments": enrollments
    })
}

#[test]
fn availability_markers_expand_to_slot_labels() {
    assert_eq!(
        slots::expand_markers("10:00, 12:00").unwrap(),
        vec!["10:00-11:00", "11:00-12:00"]
    );
}

#[test]
fn three_hour_course_fills_monday_morning() {
    let input = common::input(single_program(
        json!([{ "id": 1, "name": "Databases", "weeklyHours": 3, "instructorId": 1,
                 "classYear": 1, "departmentId": 1 }]),
        json!([{ "id": "A", "capacity": 30 }]),
        0,
    ));
    let output = solver::solve(&input).unwrap();

    let slots: Vec<&str> = output.cells.iter().map(|c| c.slot.as_str()).collect();
    assert_eq!(slots, vec!["09:00-10:00", "10:00-11:00", "11:00-12:00"]);
    assert!(output.cells.iter().all(|c| c.day == Weekday::Monday));
    assert!(output.shortfalls.is_empty());
}

#[test]
fn remote_common_course_is_mirrored_into_both_programs() {
    let output = solver::solve(&common::input(common::paired_programs())).unwrap();

    let software = at(&output, Weekday::Monday, "10:00-11:00", 1, 1).unwrap();
    let computer = at(&output, Weekday::Monday, "10:00-11:00", 2, 1).unwrap();
    assert_eq!(software.course_name, "Ethics");
    assert_eq!(computer.course_name, "Ethics");
    assert_eq!(software.instructor_name, computer.instructor_name);
    assert!(software.remote && computer.remote);
    assert!(software.classroom.is_none());

    let ethics_hours = output
        .cells
        .iter()
        .filter(|c| c.course_name == "Ethics" && c.department_id == 1)
        .count();
    assert_eq!(ethics_hours, 2);
}

#[test]
fn smallest_sufficient_classroom_is_chosen() {
    let input = common::input(single_program(
        json!([{ "id": 1, "name": "Databases", "weeklyHours": 1, "instructorId": 1,
                 "classYear": 1, "departmentId": 1, "roomType": "NORMAL" }]),
        json!([
            { "id": "A", "capacity": 30, "roomType": "NORMAL" },
            { "id": "B", "capacity": 60, "roomType": "NORMAL" }
        ]),
        40,
    ));
    let output = solver::solve(&input).unwrap();

    assert_eq!(output.cells.len(), 1);
    assert_eq!(output.cells[0].classroom.as_deref(), Some("B"));
}

#[test]
fn full_pipeline_places_every_course() {
    let output = solver::solve(&common::input(common::paired_programs())).unwrap();

    assert!(output.shortfalls.is_empty(), "{:?}", output.shortfalls);
    assert_eq!(output.cells.len(), 13);

    // the common block sits in both year-1 sections on Tuesday afternoon
    for dept in [1, 2] {
        for slot in ["14:00-15:00", "15:00-16:00", "16:00-17:00"] {
            let cell = at(&output, Weekday::Tuesday, slot, dept, 1).unwrap();
            assert_eq!(cell.course_name, "Calculus");
            assert_eq!(cell.classroom.as_deref(), Some("B"));
        }
    }
    for slot in ["09:00-10:00", "10:00-11:00", "11:00-12:00"] {
        let cell = at(&output, Weekday::Monday, slot, 2, 2).unwrap();
        assert_eq!(cell.course_name, "Databases");
        assert_eq!(cell.classroom.as_deref(), Some("A"));
    }
}

#[test]
fn no_instructor_teaches_two_courses_at_once() {
    let output = solver::solve(&common::input(common::paired_programs())).unwrap();

    // a common course meets in several sections under one instructor
    let mut taught: HashMap<(String, Weekday, String), HashSet<String>> = HashMap::new();
    for cell in output.cells.iter().filter(|c| !c.remote) {
        taught
            .entry((cell.instructor_name.clone(), cell.day, cell.slot.clone()))
            .or_default()
            .insert(cell.course_name.clone());
    }
    assert!(taught.values().all(|courses| courses.len() == 1), "{:?}", taught);
}

#[test]
fn room_is_never_double_booked() {
    let output = solver::solve(&common::input(common::paired_programs())).unwrap();

    let mut bookings: Vec<(Weekday, String, String, String)> = output
        .cells
        .iter()
        .filter_map(|c| {
            c.classroom
                .clone()
                .map(|room| (c.day, c.slot.clone(), room, c.course_name.clone()))
        })
        .collect();
    bookings.sort();
    bookings.dedup();
    for pair in bookings.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(!(a.0 == b.0 && a.1 == b.1 && a.2 == b.2), "{:?} and {:?}", a, b);
    }
}

#[test]
fn unplaceable_course_is_reported_not_fatal() {
    let input = common::input(single_program(
        json!([
            { "id": 1, "name": "Databases", "weeklyHours": 3, "instructorId": 1,
              "classYear": 1, "departmentId": 1 },
            { "id": 2, "name": "Thesis", "weeklyHours": 6, "instructorId": 1,
              "classYear": 1, "departmentId": 1 }
        ]),
        json!([{ "id": "A", "capacity": 30 }]),
        0,
    ));
    let output = solver::solve(&input).unwrap();

    assert_eq!(output.cells.len(), 3);
    assert_eq!(output.shortfalls.len(), 1);
    let shortfall = &output.shortfalls[0];
    assert_eq!(shortfall.pass, Pass::Department);
    assert_eq!(shortfall.course_name, "Thesis");
    assert_eq!(shortfall.reason, ShortfallReason::NoFreeBlock);
}

#[test]
fn empty_instructor_list_aborts() {
    let mut value = common::paired_programs();
    value["instructors"] = json!([]);
    let result = solver::solve(&common::input(value));
    assert!(matches!(result, Err(Error::NoInstructorData)));
}

#[test]
fn availability_report_lists_busiest_day_first() {
    let output = solver::solve(&common::input(common::paired_programs())).unwrap();

    let demir = output
        .instructor_availability
        .iter()
        .find(|i| i.name == "Dr. Demir")
        .unwrap();
    assert_eq!(demir.days[0].day, Weekday::Monday);
    assert_eq!(demir.days[0].slots.len(), 4);
    assert_eq!(demir.days[1].day, Weekday::Tuesday);
    assert_eq!(demir.days[1].slots.len(), 3);
}

#[test]
fn checkpoints_capture_each_pass_and_reload_for_allocation() {
    let input = common::input(common::paired_programs());
    let mut checkpoint = MemoryCheckpoint::new();
    let full = solver::solve_with_checkpoint(&input, &mut checkpoint).unwrap();

    let passes: Vec<Pass> = checkpoint.snapshots.iter().map(|(p, _)| *p).collect();
    assert_eq!(passes, vec![Pass::Online, Pass::Shared, Pass::Department, Pass::Classroom]);

    let online = checkpoint.get(Pass::Online).unwrap();
    let online_text: String = online.rows.iter().flatten().cloned().collect();
    assert!(online_text.contains("Ethics"));
    assert!(!online_text.contains("Calculus"));

    let department = checkpoint.get(Pass::Department).unwrap();
    let allocated = solver::allocate_classrooms(&input, department).unwrap();
    assert_eq!(allocated.table, full.table);
}

fn mixed_hours_programs() -> serde_json::Value {
    json!({
        "config": {
            "programs": [
                { "departmentId": 1, "name": "Software", "classYears": 2 },
                { "departmentId": 2, "name": "Computer", "classYears": 2 }
            ],
            "sharedPairs": [[1, 2]]
        },
        "courses": [
            { "id": 1, "name": "Physics", "weeklyHours": 3, "instructorId": 8, "classYear": 1, "departmentId": 1 },
            { "id": 2, "name": "Physics", "weeklyHours": 3, "instructorId": 8, "classYear": 1, "departmentId": 2 },
            { "id": 3, "name": "Physics", "weeklyHours": 2, "instructorId": 8, "classYear": 2, "departmentId": 1 },
            { "id": 4, "name": "Ethics", "weeklyHours": 3, "instructorId": 7, "classYear": 1,
              "departmentId": 1, "isRemote": true },
            { "id": 5, "name": "Ethics", "weeklyHours": 2, "instructorId": 7, "classYear": 1,
              "departmentId": 2, "isRemote": true }
        ],
        "instructors": [
            { "id": 7, "name": "Dr. Aydin" },
            { "id": 8, "name": "Dr. Demir", "availability": { "tuesday": "09:00, 17:00" } }
        ],
        "classrooms": [{ "id": "A", "capacity": 50 }],
        "enrollments": []
    })
}

fn assert_weekly_hours_respected(input: &weekly_timetable::data::SchedulingInput, output: &SchedulingOutput) {
    let hours: HashMap<u32, u32> = input.courses.iter().map(|c| (c.id, c.weekly_hours)).collect();
    let mut counts: HashMap<(u32, u32, u8), u32> = HashMap::new();
    for cell in &output.cells {
        *counts.entry((cell.course_id, cell.department_id, cell.class_year)).or_default() += 1;
    }
    for ((course_id, dept, year), count) in counts {
        assert!(
            count <= hours[&course_id],
            "course {} has {} cells in {}/{}, weekly hours {}",
            course_id,
            count,
            dept,
            year,
            hours[&course_id]
        );
    }
}

#[test]
fn weekly_hours_are_never_exceeded() {
    for value in [common::paired_programs(), mixed_hours_programs()] {
        let input = common::input(value);
        let output = solver::solve(&input).unwrap();
        assert_weekly_hours_respected(&input, &output);
    }
}

#[test]
fn shorter_twin_gets_only_its_own_hours() {
    let output = solver::solve(&common::input(mixed_hours_programs())).unwrap();

    let ethics = |dept: u32| {
        output
            .cells
            .iter()
            .filter(|c| c.course_name == "Ethics" && c.department_id == dept)
            .count()
    };
    assert_eq!(ethics(1), 3);
    assert_eq!(ethics(2), 2);
}

#[test]
fn unpaired_year_of_a_common_course_is_still_placed() {
    let output = solver::solve(&common::input(mixed_hours_programs())).unwrap();

    assert!(output.shortfalls.is_empty(), "{:?}", output.shortfalls);
    let year_two: Vec<&str> = output
        .cells
        .iter()
        .filter(|c| c.course_id == 3)
        .map(|c| c.slot.as_str())
        .collect();
    // the shared block holds Tuesday 09:00-12:00 for the same instructor
    assert_eq!(year_two, vec!["12:00-13:00", "13:00-14:00"]);
    assert!(output
        .cells
        .iter()
        .filter(|c| c.course_id == 3)
        .all(|c| c.day == Weekday::Tuesday && c.department_id == 1 && c.class_year == 2));
}
