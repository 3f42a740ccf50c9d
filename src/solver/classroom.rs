//! Binds classrooms to placed, in-person occurrences.
//!
//! A course gets its room at the first occurrence that finds one free for the
//! rest of its block, and keeps that room for the rest of the week without
//! re-checking it. Each occurrence books its room from its own slot to the end
//! of the block it sits in.

use itertools::Itertools;
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};

use crate::catalog::Catalog;
use crate::data::{Classroom, ClassroomId, Course, CourseId, Pass, Shortfall, ShortfallReason};
use crate::grid::{CellKey, ScheduleGrid};
use crate::slots::{SLOTS_PER_DAY, SlotIndex, Weekday};

#[derive(Default)]
struct Tally {
    occurrences: u32,
    roomed: u32,
}

pub fn run(grid: &mut ScheduleGrid, catalog: &Catalog) -> Vec<Shortfall> {
    let cells: Vec<(CellKey, CourseId, String, bool)> = grid
        .occupied()
        .map(|(key, o)| (key, o.course_id, o.course_name.clone(), o.remote))
        .collect();
    info!(
        "Allocating classrooms for {} occupied cells from {} rooms...",
        cells.len(),
        catalog.classrooms().len()
    );

    // one room per course name for the whole week
    let mut pinned: HashMap<String, ClassroomId> = HashMap::new();
    let mut booked: HashSet<(Weekday, SlotIndex, ClassroomId)> = HashSet::new();
    let mut tallies: HashMap<String, (Option<CourseId>, Tally)> = HashMap::new();
    let mut unknown: Vec<String> = Vec::new();

    for (key, course_id, course_name, remote) in cells {
        let Some(course) = catalog.course(course_id) else {
            if !unknown.contains(&course_name) {
                warn!("{} not found in the course catalog, leaving it without a room.", course_name);
                unknown.push(course_name);
            }
            continue;
        };
        if remote || course.is_remote {
            grid.mark_remote(&key);
            continue;
        }

        let window = remaining_block(grid, &key, &course.name);

        let tally = &mut tallies
            .entry(course.name.clone())
            .or_insert_with(|| (Some(course.id), Tally::default()))
            .1;
        tally.occurrences += 1;

        let room = match pinned.get(&course.name) {
            Some(room) => Some(room.clone()),
            None => {
                let chosen = choose_room(catalog, course, key.day, &window, &booked);
                if let Some(room) = &chosen {
                    debug!("{} pinned to classroom {}", course.name, room);
                    pinned.insert(course.name.clone(), room.clone());
                }
                chosen
            }
        };

        match room {
            Some(room) => {
                for slot in &window {
                    booked.insert((key.day, *slot, room.clone()));
                }
                grid.bind_classroom(&key, room);
                tally.roomed += 1;
            }
            None => warn!(
                "No classroom available for {} on {} {}.",
                course.name,
                key.day,
                crate::slots::slot_label(key.slot)
            ),
        }
    }

    let mut shortfalls: Vec<Shortfall> = tallies
        .into_iter()
        .filter(|(_, (_, t))| t.roomed < t.occurrences)
        .map(|(name, (course_id, t))| Shortfall {
            pass: Pass::Classroom,
            course_id,
            course_name: name,
            requested_hours: t.occurrences,
            placed_hours: t.roomed,
            reason: ShortfallReason::NoClassroom,
        })
        .collect();
    shortfalls.extend(unknown.into_iter().map(|name| Shortfall {
        pass: Pass::Classroom,
        course_id: None,
        course_name: name,
        requested_hours: 0,
        placed_hours: 0,
        reason: ShortfallReason::UnknownCourse,
    }));
    shortfalls.sort_by(|a, b| a.course_name.cmp(&b.course_name));

    info!("Classroom allocation done, {} courses pinned.", pinned.len());
    shortfalls
}

/// Slots from `key` to the end of the run of `name` in the same section.
fn remaining_block(grid: &ScheduleGrid, key: &CellKey, name: &str) -> Vec<SlotIndex> {
    (key.slot..SLOTS_PER_DAY)
        .take_while(|slot| {
            grid.get(&CellKey::new(key.day, *slot, key.section))
                .is_some_and(|o| o.course_name == name)
        })
        .collect()
}

/// Smallest matching room free for every slot of `window`.
fn choose_room(
    catalog: &Catalog,
    course: &Course,
    day: Weekday,
    window: &[SlotIndex],
    booked: &HashSet<(Weekday, SlotIndex, ClassroomId)>,
) -> Option<ClassroomId> {
    let enrolled = catalog.enrolled_for_name(&course.name);
    catalog
        .classrooms()
        .iter()
        .filter(|room| room.capacity >= enrolled && room.room_type == course.room_type)
        .sorted_by_key(|room| room.capacity)
        .find(|room: &&Classroom| {
            window
                .iter()
                .all(|slot| !booked.contains(&(day, *slot, room.id.clone())))
        })
        .map(|room| room.id.clone())
}
