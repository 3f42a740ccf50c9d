use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::TimetableConfig;
use crate::interchange::Table;
use crate::slots::Weekday;

// Type aliases for clarity
pub type CourseId = u32;
pub type InstructorId = u32;
pub type DepartmentId = u32;
pub type ClassroomId = String;
pub type ClassYear = u8;

/// Kind of room a course needs, and kind of room a classroom is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoomType {
    Lab,
    #[default]
    Normal,
}

/// Represents a physical classroom with a given capacity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub id: ClassroomId,
    pub capacity: u32,
    #[serde(default)]
    pub room_type: RoomType,
}

/// Represents a course to be scheduled.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub weekly_hours: u32,
    pub instructor_id: InstructorId,
    pub class_year: ClassYear,
    pub department_id: DepartmentId,
    #[serde(default)]
    pub is_remote: bool,
    /// Raw boundary markers, e.g. `"10:00, 12:00"`.
    #[serde(default)]
    pub mandatory_window: Option<String>,
    #[serde(default)]
    pub room_type: RoomType,
}

/// Represents an instructor and their raw availability markers per day.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    pub id: InstructorId,
    pub name: String,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub availability: BTreeMap<Weekday, String>,
}

/// One student taking one course.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub student_number: String,
    pub course_id: CourseId,
}

/// The complete input for one scheduling run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingInput {
    pub config: TimetableConfig,
    pub courses: Vec<Course>,
    pub instructors: Vec<Instructor>,
    #[serde(default)]
    pub classrooms: Vec<Classroom>,
    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
}

/// The four pipeline passes, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pass {
    Online,
    Shared,
    Department,
    Classroom,
}

impl Pass {
    pub fn name(self) -> &'static str {
        match self {
            Pass::Online => "online",
            Pass::Shared => "shared",
            Pass::Department => "department",
            Pass::Classroom => "classroom",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ShortfallReason {
    UnknownProgram,
    UnknownInstructor,
    UnknownCourse,
    /// The course's class year has no column in its program.
    NoSection,
    /// Not every requested hour found an empty cell.
    NoFreeSlot,
    /// No contiguous block satisfied availability and occupancy.
    NoFreeBlock,
    NoClassroom,
}

impl fmt::Display for ShortfallReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ShortfallReason::UnknownProgram => "program not configured",
            ShortfallReason::UnknownInstructor => "instructor has no availability record",
            ShortfallReason::UnknownCourse => "course not found",
            ShortfallReason::NoSection => "class year not offered by program",
            ShortfallReason::NoFreeSlot => "no empty cell left",
            ShortfallReason::NoFreeBlock => "no contiguous free block",
            ShortfallReason::NoClassroom => "no classroom available",
        };
        f.write_str(text)
    }
}

/// Demand a pass could not satisfy. The grid is left as it was.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortfall {
    pub pass: Pass,
    pub course_id: Option<CourseId>,
    pub course_name: String,
    pub requested_hours: u32,
    pub placed_hours: u32,
    pub reason: ShortfallReason,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} ({}/{} hours placed)",
            self.pass, self.course_name, self.reason, self.placed_hours, self.requested_hours
        )
    }
}

/// A single occupied cell of the final grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedCell {
    pub day: Weekday,
    pub slot: String,
    pub department_id: DepartmentId,
    pub class_year: ClassYear,
    pub course_id: CourseId,
    pub course_name: String,
    pub instructor_name: String,
    pub classroom: Option<ClassroomId>,
    pub remote: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySlots {
    pub day: Weekday,
    pub slots: Vec<String>,
}

/// An instructor's expanded availability, busiest day first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorAvailability {
    pub instructor_id: InstructorId,
    pub name: String,
    pub days: Vec<DaySlots>,
}

/// The final output of the pipeline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingOutput {
    pub cells: Vec<PlacedCell>,
    pub table: Table,
    pub shortfalls: Vec<Shortfall>,
    pub instructor_availability: Vec<InstructorAvailability>,
}
