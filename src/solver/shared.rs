//! Common courses, placed as one block across every related section.
//!
//! A section takes at most its own course's weekly hours of the block. Sections
//! of a shared year with no course of that name take the full block.

use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};

use crate::availability::AvailabilityIndex;
use crate::catalog::Catalog;
use crate::config::TimetableConfig;
use crate::data::{InstructorId, Pass, Shortfall, ShortfallReason};
use crate::grid::{CellKey, Occupant, ScheduleGrid, Section};
use crate::slots::{SlotIndex, Weekday};

use super::block::find_block;

/// A related section and how much of the block it still takes.
struct Target {
    section: Section,
    occupant: Occupant,
    cap: u32,
    placed: u32,
}

pub fn run(
    grid: &mut ScheduleGrid,
    catalog: &Catalog,
    availability: &AvailabilityIndex,
    config: &TimetableConfig,
) -> Vec<Shortfall> {
    let shared = catalog.shared_courses(config);
    info!("Placing {} shared courses...", shared.len());

    let mut shortfalls = Vec::new();
    // instructor commitments made by this pass
    let mut committed: HashSet<(InstructorId, Weekday, SlotIndex)> = HashSet::new();
    // hours placed per (name, section)
    let mut placed: HashMap<(&str, Section), u32> = HashMap::new();

    for entry in &shared {
        let course = entry.course;
        let own = Section::new(course.department_id, course.class_year);
        let report = |reason, placed_hours| Shortfall {
            pass: Pass::Shared,
            course_id: Some(course.id),
            course_name: course.name.clone(),
            requested_hours: course.weekly_hours,
            placed_hours,
            reason,
        };

        let related: Vec<Section> = entry
            .programs
            .iter()
            .flat_map(|dept| entry.class_years.iter().map(|year| Section::new(*dept, *year)))
            .filter(|section| grid.has_section(*section))
            .collect();
        if related.is_empty() {
            warn!("{}: no related section exists in the grid, skipping.", course.name);
            shortfalls.push(report(ShortfallReason::NoSection, 0));
            continue;
        }

        let instructor = course.instructor_id;
        let mut targets: Vec<Target> = related
            .iter()
            .map(|section| {
                let own_course = catalog.course_in(&course.name, section.department_id, section.class_year);
                let source = own_course.unwrap_or(course);
                Target {
                    section: *section,
                    occupant: Occupant {
                        course_id: source.id,
                        course_name: course.name.clone(),
                        instructor_id: Some(instructor),
                        instructor_name: catalog.instructor_name(instructor),
                        classroom: None,
                        remote: false,
                    },
                    cap: own_course.map_or(course.weekly_hours, |c| c.weekly_hours),
                    placed: placed.get(&(course.name.as_str(), *section)).copied().unwrap_or(0),
                }
            })
            .filter(|t| t.placed < t.cap)
            .collect();
        if targets.is_empty() {
            debug!("{} already placed for all related sections", course.name);
            continue;
        }

        let Some(days) = availability.days_for(instructor) else {
            warn!("No availability for instructor {}, skipping {}.", instructor, course.name);
            shortfalls.push(report(ShortfallReason::UnknownInstructor, 0));
            continue;
        };

        let block = find_block(days, course.weekly_hours as usize, |day, slot| {
            !committed.contains(&(instructor, day, slot))
                && related
                    .iter()
                    .all(|section| grid.is_empty_cell(&CellKey::new(day, slot, *section)))
        });

        let Some(block) = block else {
            warn!(
                "No {}-hour block free for {} in {} sections, skipping.",
                course.weekly_hours,
                course.name,
                related.len()
            );
            let own_placed = placed.get(&(course.name.as_str(), own)).copied().unwrap_or(0);
            shortfalls.push(report(ShortfallReason::NoFreeBlock, own_placed));
            continue;
        };

        for slot in &block.slots {
            for target in targets.iter_mut().filter(|t| t.placed < t.cap) {
                if grid.place(CellKey::new(block.day, *slot, target.section), target.occupant.clone()) {
                    target.placed += 1;
                }
            }
            committed.insert((instructor, block.day, *slot));
        }
        for target in &targets {
            placed.insert((course.name.as_str(), target.section), target.placed);
        }
        debug!(
            "{} -> {} slots {:?} across {} sections",
            course.name,
            block.day,
            block.slots,
            targets.len()
        );
    }

    info!("Shared placement done, {} cells occupied.", grid.occupied_count());
    shortfalls
}
