//! Single-program courses, one contiguous block per course.

use log::{debug, info, warn};
use std::cmp::Reverse;

use crate::availability::AvailabilityIndex;
use crate::catalog::Catalog;
use crate::config::TimetableConfig;
use crate::data::{Pass, Shortfall, ShortfallReason};
use crate::grid::{CellKey, Occupant, ScheduleGrid, Section};

use super::block::find_block;

pub fn run(
    grid: &mut ScheduleGrid,
    catalog: &Catalog,
    availability: &AvailabilityIndex,
    config: &TimetableConfig,
) -> Vec<Shortfall> {
    let mut courses = catalog.department_courses(config);
    courses.sort_by_key(|c| Reverse(c.weekly_hours));
    info!("Placing {} department courses...", courses.len());

    let mut shortfalls = Vec::new();
    for course in courses {
        let report = |reason| Shortfall {
            pass: Pass::Department,
            course_id: Some(course.id),
            course_name: course.name.clone(),
            requested_hours: course.weekly_hours,
            placed_hours: 0,
            reason,
        };

        let Some(days) = availability.days_for(course.instructor_id) else {
            warn!(
                "No availability for instructor {}, skipping {}.",
                course.instructor_id, course.name
            );
            shortfalls.push(report(ShortfallReason::UnknownInstructor));
            continue;
        };

        let section = Section::new(course.department_id, course.class_year);
        if !grid.has_section(section) {
            let reason = if config.program(course.department_id).is_none() {
                ShortfallReason::UnknownProgram
            } else {
                ShortfallReason::NoSection
            };
            warn!("{}: {}, skipping.", course.name, reason);
            shortfalls.push(report(reason));
            continue;
        }

        let instructor = course.instructor_id;
        let block = find_block(days, course.weekly_hours as usize, |day, slot| {
            grid.is_empty_cell(&CellKey::new(day, slot, section))
                && !grid.instructor_busy(instructor, day, slot)
        });

        let Some(block) = block else {
            warn!(
                "No {}-hour block free for {} (program {}, year {}), dropping it.",
                course.weekly_hours, course.name, course.department_id, course.class_year
            );
            shortfalls.push(report(ShortfallReason::NoFreeBlock));
            continue;
        };

        let occupant = Occupant {
            course_id: course.id,
            course_name: course.name.clone(),
            instructor_id: Some(instructor),
            instructor_name: catalog.instructor_name(instructor),
            classroom: None,
            remote: false,
        };
        for slot in &block.slots {
            grid.place(CellKey::new(block.day, *slot, section), occupant.clone());
        }
        debug!("{} -> {} slots {:?}", course.name, block.day, block.slots);
    }

    info!("Department placement done, {} cells occupied.", grid.occupied_count());
    shortfalls
}
