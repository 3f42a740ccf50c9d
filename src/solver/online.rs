//! Remote courses: mandatory window first, then any empty cell.

use log::{debug, info, warn};
use std::cmp::Reverse;
use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::config::TimetableConfig;
use crate::data::{ClassYear, Course, DepartmentId, Pass, Shortfall, ShortfallReason};
use crate::grid::{CellKey, Occupant, ScheduleGrid, Section};
use crate::slots::{self, SLOTS_PER_DAY, SlotIndex, Weekday};

pub fn run(grid: &mut ScheduleGrid, catalog: &Catalog, config: &TimetableConfig) -> Vec<Shortfall> {
    let mut courses = catalog.remote_courses();
    // largest first, stable for ties
    courses.sort_by_key(|c| Reverse(c.weekly_hours));
    info!("Placing {} remote courses...", courses.len());

    let mut shortfalls = Vec::new();
    // hours already placed per (name, year, program), mirrors included
    let mut placed: HashMap<(&str, ClassYear, DepartmentId), u32> = HashMap::new();

    for course in &courses {
        let already = placed
            .get(&(course.name.as_str(), course.class_year, course.department_id))
            .copied()
            .unwrap_or(0);
        if already >= course.weekly_hours {
            debug!("{} already placed through its shared twin", course.name);
            continue;
        }

        if config.program(course.department_id).is_none() {
            warn!("{}: program {} is not configured, skipping.", course.name, course.department_id);
            shortfalls.push(shortfall(course, already, ShortfallReason::UnknownProgram));
            continue;
        }
        let section = Section::new(course.department_id, course.class_year);
        if !grid.has_section(section) {
            warn!("{}: program {} has no year {}, skipping.", course.name, course.department_id, course.class_year);
            shortfalls.push(shortfall(course, already, ShortfallReason::NoSection));
            continue;
        }

        // sibling programs teaching the same remote course in the same year
        let mut siblings: Vec<Mirror> = config
            .partners(course.department_id)
            .into_iter()
            .filter_map(|partner| {
                courses.iter().find(|other| {
                    other.department_id == partner
                        && other.name == course.name
                        && other.class_year == course.class_year
                })
            })
            .map(|other| Mirror {
                section: Section::new(other.department_id, other.class_year),
                occupant: occupant_for(catalog, other),
                weekly_hours: other.weekly_hours,
                assigned: placed
                    .get(&(other.name.as_str(), other.class_year, other.department_id))
                    .copied()
                    .unwrap_or(0),
            })
            .collect();

        let occupant = occupant_for(catalog, course);
        let mandatory = mandatory_slots(course);
        let fallback: Vec<SlotIndex> = (0..SLOTS_PER_DAY).collect();

        let mut assigned = already;
        for candidates in [&mandatory, &fallback] {
            assigned = fill(grid, course, section, &mut siblings, &occupant, candidates, assigned);
        }

        placed.insert((course.name.as_str(), course.class_year, course.department_id), assigned);
        for sibling in &siblings {
            placed.insert(
                (course.name.as_str(), course.class_year, sibling.section.department_id),
                sibling.assigned,
            );
        }

        if assigned < course.weekly_hours {
            warn!(
                "{}: only {} of {} hours found an empty cell, dropping the rest.",
                course.name, assigned, course.weekly_hours
            );
            shortfalls.push(shortfall(course, assigned, ShortfallReason::NoFreeSlot));
        }
    }

    for rule in &config.extension_years {
        let copied = grid.apply_extension(rule);
        debug!(
            "Program {}: copied {} year-{} cells into year {}",
            rule.department_id, copied, rule.from_year, rule.to_year
        );
    }

    info!("Remote placement done, {} cells occupied.", grid.occupied_count());
    shortfalls
}

/// A sibling section receiving copies of the course being placed.
struct Mirror {
    section: Section,
    occupant: Occupant,
    weekly_hours: u32,
    assigned: u32,
}

fn occupant_for(catalog: &Catalog, course: &Course) -> Occupant {
    Occupant {
        course_id: course.id,
        course_name: course.name.clone(),
        instructor_id: Some(course.instructor_id),
        instructor_name: catalog.instructor_name(course.instructor_id),
        classroom: None,
        remote: true,
    }
}

/// Walks days then `candidates`, taking every empty cell until the course's
/// hours are met. Each placement is mirrored into siblings that still lack
/// hours. Returns the new assigned count.
fn fill(
    grid: &mut ScheduleGrid,
    course: &Course,
    section: Section,
    siblings: &mut [Mirror],
    occupant: &Occupant,
    candidates: &[SlotIndex],
    mut assigned: u32,
) -> u32 {
    for day in Weekday::ALL {
        for slot in candidates {
            if assigned >= course.weekly_hours {
                return assigned;
            }
            if grid.place(CellKey::new(day, *slot, section), occupant.clone()) {
                assigned += 1;
                for sibling in siblings.iter_mut().filter(|s| s.assigned < s.weekly_hours) {
                    // mirror only into empty cells
                    if grid.place(CellKey::new(day, *slot, sibling.section), sibling.occupant.clone()) {
                        sibling.assigned += 1;
                    }
                }
            }
        }
    }
    assigned
}

fn mandatory_slots(course: &Course) -> Vec<SlotIndex> {
    match course.mandatory_window.as_deref() {
        None => Vec::new(),
        Some(raw) => slots::expand_to_slots(raw).unwrap_or_else(|e| {
            warn!("{}: mandatory window unreadable ({}), using any slot.", course.name, e);
            Vec::new()
        }),
    }
}

fn shortfall(course: &Course, placed_hours: u32, reason: ShortfallReason) -> Shortfall {
    Shortfall {
        pass: Pass::Online,
        course_id: Some(course.id),
        course_name: course.name.clone(),
        requested_hours: course.weekly_hours,
        placed_hours,
        reason,
    }
}
