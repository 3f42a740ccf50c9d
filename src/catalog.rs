//! Read-only reference data for one run, and the queries that split the
//! course list into the inputs of the three placement passes.

use itertools::Itertools;
use std::collections::{HashMap, HashSet};

use crate::config::TimetableConfig;
use crate::data::{
    ClassYear, Classroom, Course, CourseId, DepartmentId, Enrollment, Instructor, InstructorId,
    SchedulingInput,
};

/// A non-remote course taught together to paired programs.
#[derive(Debug, Clone)]
pub struct SharedCourse<'a> {
    pub course: &'a Course,
    /// Every program the course name is shared between.
    pub programs: Vec<DepartmentId>,
    /// Every class year the course name is shared in.
    pub class_years: Vec<ClassYear>,
}

pub struct Catalog<'a> {
    courses: &'a [Course],
    instructors: &'a [Instructor],
    classrooms: &'a [Classroom],
    enrollments: &'a [Enrollment],
    course_by_id: HashMap<CourseId, &'a Course>,
    instructor_by_id: HashMap<InstructorId, &'a Instructor>,
    enrolled: HashMap<CourseId, u32>,
}

impl<'a> Catalog<'a> {
    pub fn new(
        courses: &'a [Course],
        instructors: &'a [Instructor],
        classrooms: &'a [Classroom],
        enrollments: &'a [Enrollment],
    ) -> Self {
        let enrolled = enrollments
            .iter()
            .map(|e| (e.course_id, e.student_number.as_str()))
            .into_group_map()
            .into_iter()
            .map(|(course_id, students)| {
                let distinct: HashSet<&str> = students.into_iter().collect();
                (course_id, distinct.len() as u32)
            })
            .collect();

        Self {
            courses,
            instructors,
            classrooms,
            enrollments,
            course_by_id: courses.iter().map(|c| (c.id, c)).collect(),
            instructor_by_id: instructors.iter().map(|i| (i.id, i)).collect(),
            enrolled,
        }
    }

    pub fn from_input(input: &'a SchedulingInput) -> Self {
        Self::new(
            &input.courses,
            &input.instructors,
            &input.classrooms,
            &input.enrollments,
        )
    }

    pub fn courses(&self) -> &'a [Course] {
        self.courses
    }

    pub fn instructors(&self) -> &'a [Instructor] {
        self.instructors
    }

    pub fn classrooms(&self) -> &'a [Classroom] {
        self.classrooms
    }

    pub fn course(&self, id: CourseId) -> Option<&'a Course> {
        self.course_by_id.get(&id).copied()
    }

    /// Resolves a course by name, preferring one owned by `department_id`.
    pub fn course_by_name(&self, name: &str, department_id: Option<DepartmentId>) -> Option<&'a Course> {
        let name = name.trim();
        department_id
            .and_then(|dept| {
                self.courses
                    .iter()
                    .find(|c| c.name == name && c.department_id == dept)
            })
            .or_else(|| self.courses.iter().find(|c| c.name == name))
    }

    /// The course carrying `name` in one program's class year.
    pub fn course_in(&self, name: &str, department_id: DepartmentId, class_year: ClassYear) -> Option<&'a Course> {
        self.courses.iter().find(|c| {
            c.name == name && c.department_id == department_id && c.class_year == class_year
        })
    }

    pub fn instructor(&self, id: InstructorId) -> Option<&'a Instructor> {
        self.instructor_by_id.get(&id).copied()
    }

    pub fn instructor_by_name(&self, name: &str) -> Option<&'a Instructor> {
        let name = name.trim();
        self.instructor_by_id.values().copied().find(|i| i.name == name)
    }

    /// Display name for a course's instructor, or a placeholder if unknown.
    pub fn instructor_name(&self, id: InstructorId) -> String {
        self.instructor(id)
            .map(|i| i.name.clone())
            .unwrap_or_else(|| format!("Unknown instructor {}", id))
    }

    /// Distinct students enrolled in the course.
    pub fn enrolled(&self, course_id: CourseId) -> u32 {
        self.enrolled.get(&course_id).copied().unwrap_or(0)
    }

    /// Distinct students across every course carrying `name`. Common courses
    /// are listed once per program but meet as one class.
    pub fn enrolled_for_name(&self, name: &str) -> u32 {
        let ids: HashSet<CourseId> = self
            .courses
            .iter()
            .filter(|c| c.name == name)
            .map(|c| c.id)
            .collect();
        let students: HashSet<&str> = self
            .enrollments
            .iter()
            .filter(|e| ids.contains(&e.course_id))
            .map(|e| e.student_number.as_str())
            .collect();
        students.len() as u32
    }

    /// Remote courses in input order.
    pub fn remote_courses(&self) -> Vec<&'a Course> {
        self.courses.iter().filter(|c| c.is_remote).collect()
    }

    /// Non-remote courses whose name and class year appear under both programs
    /// of a configured pair. One entry per (name, hours, instructor, year),
    /// sorted by class year ascending then weekly hours descending.
    pub fn shared_courses(&self, config: &TimetableConfig) -> Vec<SharedCourse<'a>> {
        let in_person: Vec<&'a Course> = self.courses.iter().filter(|c| !c.is_remote).collect();

        let mut entries: Vec<SharedCourse<'a>> = Vec::new();
        for [a, b] in &config.shared_pairs {
            let keys_of = |dept: DepartmentId| {
                in_person
                    .iter()
                    .filter(|c| c.department_id == dept)
                    .map(|c| (c.name.as_str(), c.class_year))
                    .collect::<HashSet<_>>()
            };
            let common: HashSet<(&str, ClassYear)> =
                keys_of(*a).intersection(&keys_of(*b)).copied().collect();

            for course in in_person.iter().copied() {
                if course.department_id != *a && course.department_id != *b {
                    continue;
                }
                if !common.contains(&(course.name.as_str(), course.class_year)) {
                    continue;
                }
                let existing = entries.iter_mut().find(|e| {
                    e.course.name == course.name
                        && e.course.weekly_hours == course.weekly_hours
                        && e.course.instructor_id == course.instructor_id
                        && e.course.class_year == course.class_year
                });
                match existing {
                    Some(entry) => entry.programs.extend([*a, *b]),
                    None => entries.push(SharedCourse {
                        course,
                        programs: vec![*a, *b],
                        class_years: Vec::new(),
                    }),
                }
            }
        }

        // related cells span every program and year the name is shared in
        let by_name: HashMap<String, (Vec<DepartmentId>, Vec<ClassYear>)> = entries
            .iter()
            .map(|e| (e.course.name.clone(), (e.programs.clone(), e.course.class_year)))
            .into_group_map()
            .into_iter()
            .map(|(name, group)| {
                let programs: Vec<DepartmentId> = group
                    .iter()
                    .flat_map(|(p, _)| p.iter().copied())
                    .unique()
                    .collect();
                let years: Vec<ClassYear> = group.iter().map(|(_, y)| *y).sorted().dedup().collect();
                (name, (programs, years))
            })
            .collect();
        for entry in &mut entries {
            if let Some((programs, years)) = by_name.get(&entry.course.name) {
                entry.programs = programs.clone();
                entry.class_years = years.clone();
            }
        }

        entries.sort_by(|x, y| {
            x.course
                .class_year
                .cmp(&y.course.class_year)
                .then(y.course.weekly_hours.cmp(&x.course.weekly_hours))
        });
        entries
    }

    /// Non-remote courses not covered by a shared entry, one entry per
    /// (name, hours, instructor, year, department), in input order. A course
    /// is covered when a shared entry of its name spans its program and year.
    pub fn department_courses(&self, config: &TimetableConfig) -> Vec<&'a Course> {
        let covered: HashSet<(String, DepartmentId, ClassYear)> = self
            .shared_courses(config)
            .into_iter()
            .flat_map(|e| {
                let name = e.course.name.clone();
                e.programs
                    .iter()
                    .flat_map(|dept| e.class_years.iter().map(move |year| (*dept, *year)))
                    .map(move |(dept, year)| (name.clone(), dept, year))
                    .collect::<Vec<_>>()
            })
            .collect();
        self.courses
            .iter()
            .filter(|c| {
                !c.is_remote && !covered.contains(&(c.name.clone(), c.department_id, c.class_year))
            })
            .unique_by(|c| {
                (
                    c.name.clone(),
                    c.weekly_hours,
                    c.instructor_id,
                    c.class_year,
                    c.department_id,
                )
            })
            .collect()
    }
}
