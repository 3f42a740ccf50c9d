//! The assignment pipeline.
//!
//! Availability index, then four passes over one grid: remote courses, shared
//! courses, department courses, classrooms. Each pass owns the grid while it
//! runs and commits it to the checkpoint before the next one starts.

pub mod block;
pub mod classroom;
pub mod department;
pub mod online;
pub mod shared;

use log::{info, warn};
use std::time::Instant;

use crate::availability::AvailabilityIndex;
use crate::catalog::Catalog;
use crate::checkpoint::{Checkpoint, NoCheckpoint};
use crate::data::{
    DaySlots, InstructorAvailability, Pass, PlacedCell, SchedulingInput, SchedulingOutput,
    Shortfall,
};
use crate::error::Result;
use crate::grid::ScheduleGrid;
use crate::interchange::Table;
use crate::slots;

/// Runs the full pipeline on `input`.
pub fn solve(input: &SchedulingInput) -> Result<SchedulingOutput> {
    solve_with_checkpoint(input, &mut NoCheckpoint)
}

/// Runs the full pipeline, committing the grid after every pass.
pub fn solve_with_checkpoint(
    input: &SchedulingInput,
    checkpoint: &mut dyn Checkpoint,
) -> Result<SchedulingOutput> {
    let start_time = Instant::now();
    input.config.validate()?;
    let availability = AvailabilityIndex::build(&input.instructors)?;
    let catalog = Catalog::from_input(input);
    let config = &input.config;
    info!(
        "Scheduling {} courses for {} programs with {} instructors and {} classrooms...",
        input.courses.len(),
        config.programs.len(),
        input.instructors.len(),
        input.classrooms.len()
    );

    let mut grid = ScheduleGrid::new(config);
    let mut shortfalls: Vec<Shortfall> = Vec::new();

    shortfalls.extend(online::run(&mut grid, &catalog, config));
    checkpoint.commit(Pass::Online, &grid)?;

    shortfalls.extend(shared::run(&mut grid, &catalog, &availability, config));
    checkpoint.commit(Pass::Shared, &grid)?;

    shortfalls.extend(department::run(&mut grid, &catalog, &availability, config));
    checkpoint.commit(Pass::Department, &grid)?;

    shortfalls.extend(classroom::run(&mut grid, &catalog));
    checkpoint.commit(Pass::Classroom, &grid)?;

    let duration = start_time.elapsed();
    info!(
        "Timetable built in {:.2?}: {} cells occupied, {} shortfalls.",
        duration,
        grid.occupied_count(),
        shortfalls.len()
    );
    for shortfall in &shortfalls {
        warn!("{}", shortfall);
    }

    Ok(build_output(&grid, shortfalls, &catalog, Some(&availability)))
}

/// Runs only the classroom pass over a grid committed by an earlier run.
pub fn allocate_classrooms(input: &SchedulingInput, table: &Table) -> Result<SchedulingOutput> {
    input.config.validate()?;
    let catalog = Catalog::from_input(input);
    let mut grid = table.to_grid(&input.config, &catalog)?;
    let shortfalls = classroom::run(&mut grid, &catalog);
    let availability = AvailabilityIndex::build(&input.instructors).ok();
    Ok(build_output(&grid, shortfalls, &catalog, availability.as_ref()))
}

fn build_output(
    grid: &ScheduleGrid,
    shortfalls: Vec<Shortfall>,
    catalog: &Catalog,
    availability: Option<&AvailabilityIndex>,
) -> SchedulingOutput {
    let cells = grid
        .occupied()
        .map(|(key, o)| PlacedCell {
            day: key.day,
            slot: slots::slot_label(key.slot).to_string(),
            department_id: key.section.department_id,
            class_year: key.section.class_year,
            course_id: o.course_id,
            course_name: o.course_name.clone(),
            instructor_name: o.instructor_name.clone(),
            classroom: o.classroom.clone(),
            remote: o.remote,
        })
        .collect();

    let instructor_availability = match availability {
        None => Vec::new(),
        Some(index) => catalog
            .instructors()
            .iter()
            .map(|instructor| InstructorAvailability {
                instructor_id: instructor.id,
                name: instructor.name.clone(),
                days: index
                    .density_sorted(instructor.id)
                    .into_iter()
                    .map(|(day, indices)| DaySlots {
                        day,
                        slots: indices.iter().map(|s| slots::slot_label(*s).to_string()).collect(),
                    })
                    .collect(),
            })
            .collect(),
    };

    SchedulingOutput {
        cells,
        table: Table::from_grid(grid),
        shortfalls,
        instructor_availability,
    }
}
