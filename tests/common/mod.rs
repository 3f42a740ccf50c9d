#![allow(dead_code)]

use serde_json::{Value, json};
use weekly_timetable::data::SchedulingInput;

/// Two paired programs with two class years each: a remote common course, an
/// in-person common course and a single-program course.
pub fn paired_programs() -> Value {
    let calculus_students: Vec<Value> = (0..20)
        .map(|n| json!({ "studentNumber": format!("S{}", n), "courseId": 3 }))
        .chain((20..40).map(|n| json!({ "studentNumber": format!("S{}", n), "courseId": 4 })))
        .collect();
    let database_students: Vec<Value> = (0..10)
        .map(|n| json!({ "studentNumber": format!("C{}", n), "courseId": 5 }))
        .collect();
    let enrollments: Vec<Value> = calculus_students.into_iter().chain(database_students).collect();

    json!({
        "config": {
            "programs": [
                { "departmentId": 1, "name": "Software", "classYears": 2 },
                { "departmentId": 2, "name": "Computer", "classYears": 2 }
            ],
            "sharedPairs": [[1, 2]]
        },
        "courses": [
            { "id": 1, "name": "Ethics", "weeklyHours": 2, "instructorId": 7, "classYear": 1,
              "departmentId": 1, "isRemote": true, "mandatoryWindow": "10:00,11:00" },
            { "id": 2, "name": "Ethics", "weeklyHours": 2, "instructorId": 7, "classYear": 1,
              "departmentId": 2, "isRemote": true, "mandatoryWindow": "10:00,11:00" },
            { "id": 3, "name": "Calculus", "weeklyHours": 3, "instructorId": 8, "classYear": 1,
              "departmentId": 1 },
            { "id": 4, "name": "Calculus", "weeklyHours": 3, "instructorId": 8, "classYear": 1,
              "departmentId": 2 },
            { "id": 5, "name": "Databases", "weeklyHours": 3, "instructorId": 9, "classYear": 2,
              "departmentId": 2 }
        ],
        "instructors": [
            { "id": 7, "name": "Dr. Aydin" },
            { "id": 8, "name": "Dr. Demir",
              "availability": { "monday": "09:00, 13:00", "tuesday": "14:00, 17:00" } },
            { "id": 9, "name": "Dr. Kaya", "availability": { "monday": "09:00, 12:00" } }
        ],
        "classrooms": [
            { "id": "A", "capacity": 30, "roomType": "NORMAL" },
            { "id": "B", "capacity": 60, "roomType": "NORMAL" }
        ],
        "enrollments": enrollments
    })
}

pub fn input(value: Value) -> SchedulingInput {
    serde_json::from_value(value).unwrap()
}
