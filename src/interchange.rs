//! The tabular form of a grid shared with report renderers and checkpoints.
//!
//! One row per `(day, slot)`, one column per section after the `Day` and `Slot`
//! columns. A cell holds `"<course>\n<instructor>"`, optionally followed by
//! ` (<annotation>)` where the annotation is `Online` or a classroom id.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;

use crate::catalog::Catalog;
use crate::config::TimetableConfig;
use crate::data::ClassroomId;
use crate::error::{Error, Result};
use crate::grid::{CellKey, Occupant, ScheduleGrid, Section};
use crate::slots::{self, SLOTS_PER_DAY, Weekday};

pub const DAY_COLUMN: &str = "Day";
pub const SLOT_COLUMN: &str = "Slot";
pub const REMOTE_MARKER: &str = "Online";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    Remote,
    Classroom(ClassroomId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCell {
    pub course_name: String,
    pub instructor_name: String,
    pub annotation: Option<Annotation>,
}

pub fn encode_cell(occupant: &Occupant) -> String {
    let annotation = if occupant.remote {
        Some(REMOTE_MARKER)
    } else {
        occupant.classroom.as_deref()
    };
    match annotation {
        Some(note) => format!(
            "{}\n{} ({})",
            occupant.course_name, occupant.instructor_name, note
        ),
        None => format!("{}\n{}", occupant.course_name, occupant.instructor_name),
    }
}

/// Splits a cell on the newline, then peels a trailing parenthetical off the
/// instructor line. Blank cells decode to `None`.
pub fn decode_cell(text: &str) -> Option<DecodedCell> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let (course, rest) = text.split_once('\n').unwrap_or((text, ""));
    let rest = rest.trim();

    let (instructor, annotation) = match (rest.rfind('('), rest.ends_with(')')) {
        (Some(open), true) => {
            let note = rest[open + 1..rest.len() - 1].trim();
            let annotation = if note.eq_ignore_ascii_case(REMOTE_MARKER) {
                Annotation::Remote
            } else {
                Annotation::Classroom(note.to_string())
            };
            (rest[..open].trim(), Some(annotation))
        }
        _ => (rest, None),
    };

    Some(DecodedCell {
        course_name: course.trim().to_string(),
        instructor_name: instructor.to_string(),
        annotation,
    })
}

fn section_label(grid: &ScheduleGrid, section: Section) -> String {
    let program = grid
        .program_name(section.department_id)
        .map(str::to_string)
        .unwrap_or_else(|| section.department_id.to_string());
    format!("{} / Year {}", program, section.class_year)
}

impl Table {
    pub fn from_grid(grid: &ScheduleGrid) -> Self {
        let mut header = vec![DAY_COLUMN.to_string(), SLOT_COLUMN.to_string()];
        header.extend(grid.sections().iter().map(|s| section_label(grid, *s)));

        let mut rows = Vec::with_capacity(Weekday::ALL.len() * SLOTS_PER_DAY);
        for day in Weekday::ALL {
            for slot in 0..SLOTS_PER_DAY {
                let mut row = vec![day.name().to_string(), slots::slot_label(slot).to_string()];
                row.extend(grid.sections().iter().map(|section| {
                    grid.get(&CellKey::new(day, slot, *section))
                        .map(encode_cell)
                        .unwrap_or_default()
                }));
                rows.push(row);
            }
        }
        Self { header, rows }
    }

    /// Rebuilds a grid, resolving occupants back to catalog entries by name.
    /// Cells naming an unknown course are dropped with a warning.
    pub fn to_grid(&self, config: &TimetableConfig, catalog: &Catalog) -> Result<ScheduleGrid> {
        let mut grid = ScheduleGrid::new(config);

        if self.header.len() < 2 || self.header[0] != DAY_COLUMN || self.header[1] != SLOT_COLUMN {
            return Err(Error::MalformedTable(format!(
                "expected the first columns to be {:?} and {:?}",
                DAY_COLUMN, SLOT_COLUMN
            )));
        }
        let columns = self.header[2..]
            .iter()
            .map(|label| {
                grid.sections()
                    .iter()
                    .copied()
                    .find(|s| section_label(&grid, *s) == *label)
                    .ok_or_else(|| Error::MalformedTable(format!("unknown column {:?}", label)))
            })
            .collect::<Result<Vec<Section>>>()?;

        for (line, row) in self.rows.iter().enumerate() {
            if row.len() != self.header.len() {
                return Err(Error::MalformedTable(format!(
                    "row {} has {} cells, expected {}",
                    line + 1,
                    row.len(),
                    self.header.len()
                )));
            }
            let day: Weekday = row[0].parse().map_err(Error::MalformedTable)?;
            let slot = slots::slot_index(&row[1]).ok_or_else(|| {
                Error::MalformedTable(format!("row {}: unknown slot {:?}", line + 1, row[1]))
            })?;

            for (section, text) in columns.iter().zip(&row[2..]) {
                let Some(cell) = decode_cell(text) else {
                    continue;
                };
                let Some(course) = catalog.course_by_name(&cell.course_name, Some(section.department_id))
                else {
                    warn!("{} {}: course {:?} is not in the catalog, dropping the cell.", day, row[1], cell.course_name);
                    continue;
                };
                let instructor_id = catalog
                    .instructor_by_name(&cell.instructor_name)
                    .map(|i| i.id)
                    .or(Some(course.instructor_id));
                let (remote, classroom) = match cell.annotation {
                    Some(Annotation::Remote) => (true, None),
                    Some(Annotation::Classroom(id)) => (course.is_remote, Some(id)),
                    None => (course.is_remote, None),
                };
                grid.place(
                    CellKey::new(day, slot, *section),
                    Occupant {
                        course_id: course.id,
                        course_name: course.name.clone(),
                        instructor_id,
                        instructor_name: cell.instructor_name,
                        classroom,
                        remote,
                    },
                );
            }
        }
        Ok(grid)
    }

    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn read_csv<R: io::Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let header = reader.headers()?.iter().map(str::to_string).collect();
        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<std::result::Result<Vec<Vec<String>>, csv::Error>>()?;
        Ok(Self { header, rows })
    }

    pub fn write_csv_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.write_csv(File::create(path)?)
    }

    pub fn read_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::read_csv(File::open(path)?)
    }
}
