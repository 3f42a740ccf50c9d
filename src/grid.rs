//! The weekly schedule grid.
//!
//! Rows are `(day, slot)`, columns are sections `(program, class year)` in
//! configuration order. Each cell holds at most one [`Occupant`]; a filled cell
//! is never overwritten, only annotated with a classroom by the last pass.

use log::trace;
use std::collections::HashMap;

use crate::config::{ExtensionRule, TimetableConfig};
use crate::data::{ClassYear, ClassroomId, CourseId, DepartmentId, InstructorId};
use crate::slots::{SLOTS_PER_DAY, SlotIndex, Weekday};

/// One grid column: a class year of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Section {
    pub department_id: DepartmentId,
    pub class_year: ClassYear,
}

impl Section {
    pub fn new(department_id: DepartmentId, class_year: ClassYear) -> Self {
        Self { department_id, class_year }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub day: Weekday,
    pub slot: SlotIndex,
    pub section: Section,
}

impl CellKey {
    pub fn new(day: Weekday, slot: SlotIndex, section: Section) -> Self {
        Self { day, slot, section }
    }
}

/// What sits in a cell. References are structured, names are kept for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    pub course_id: CourseId,
    pub course_name: String,
    pub instructor_id: Option<InstructorId>,
    pub instructor_name: String,
    pub classroom: Option<ClassroomId>,
    pub remote: bool,
}

#[derive(Debug, Clone)]
pub struct ScheduleGrid {
    sections: Vec<Section>,
    program_names: HashMap<DepartmentId, String>,
    cells: HashMap<CellKey, Occupant>,
}

impl ScheduleGrid {
    /// An empty grid with one column per configured class year.
    pub fn new(config: &TimetableConfig) -> Self {
        let sections = config
            .programs
            .iter()
            .flat_map(|p| (1..=p.class_years).map(move |year| Section::new(p.department_id, year)))
            .collect();
        let program_names = config
            .programs
            .iter()
            .map(|p| (p.department_id, p.name.clone()))
            .collect();
        Self {
            sections,
            program_names,
            cells: HashMap::new(),
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn has_section(&self, section: Section) -> bool {
        self.sections.contains(&section)
    }

    pub fn program_name(&self, department_id: DepartmentId) -> Option<&str> {
        self.program_names.get(&department_id).map(String::as_str)
    }

    pub fn get(&self, key: &CellKey) -> Option<&Occupant> {
        self.cells.get(key)
    }

    /// `true` for an existing, unoccupied cell.
    pub fn is_empty_cell(&self, key: &CellKey) -> bool {
        self.has_section(key.section) && !self.cells.contains_key(key)
    }

    /// Puts an occupant into an empty cell. Returns `false` and leaves the grid
    /// untouched when the cell does not exist or is already taken.
    pub fn place(&mut self, key: CellKey, occupant: Occupant) -> bool {
        if !self.is_empty_cell(&key) {
            return false;
        }
        trace!(
            "{} {} {}/{} <- {}",
            key.day, key.slot, key.section.department_id, key.section.class_year, occupant.course_name
        );
        self.cells.insert(key, occupant);
        true
    }

    pub fn bind_classroom(&mut self, key: &CellKey, classroom: ClassroomId) -> bool {
        match self.cells.get_mut(key) {
            Some(occupant) => {
                occupant.classroom = Some(classroom);
                true
            }
            None => false,
        }
    }

    pub fn mark_remote(&mut self, key: &CellKey) {
        if let Some(occupant) = self.cells.get_mut(key) {
            occupant.remote = true;
        }
    }

    /// Whether the instructor teaches anywhere in the grid at `(day, slot)`.
    pub fn instructor_busy(&self, instructor: InstructorId, day: Weekday, slot: SlotIndex) -> bool {
        self.sections.iter().any(|section| {
            self.cells
                .get(&CellKey::new(day, slot, *section))
                .is_some_and(|o| o.instructor_id == Some(instructor))
        })
    }

    /// Copies `from_year` occupants into empty `to_year` cells of the same
    /// program. Returns the number of cells filled.
    pub fn apply_extension(&mut self, rule: &ExtensionRule) -> usize {
        let from = Section::new(rule.department_id, rule.from_year);
        let to = Section::new(rule.department_id, rule.to_year);
        if !self.has_section(from) || !self.has_section(to) {
            return 0;
        }
        let mut copied = 0;
        for day in Weekday::ALL {
            for slot in 0..SLOTS_PER_DAY {
                let target = CellKey::new(day, slot, to);
                if self.cells.contains_key(&target) {
                    continue;
                }
                if let Some(occupant) = self.cells.get(&CellKey::new(day, slot, from)).cloned() {
                    self.cells.insert(target, occupant);
                    copied += 1;
                }
            }
        }
        copied
    }

    /// Occupied cells in scan order: days, slots, then sections.
    pub fn occupied(&self) -> impl Iterator<Item = (CellKey, &Occupant)> + '_ {
        Weekday::ALL.into_iter().flat_map(move |day| {
            (0..SLOTS_PER_DAY).flat_map(move |slot| {
                self.sections.iter().filter_map(move |section| {
                    let key = CellKey::new(day, slot, *section);
                    self.cells.get(&key).map(|o| (key, o))
                })
            })
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.len()
    }
}
