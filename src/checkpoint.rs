//! Pass boundaries where the grid is committed.
//!
//! Every pass starts from the grid as the previous pass committed it. A
//! checkpoint receives that grid and either drops it, keeps a snapshot in memory
//! or writes it out as a CSV table named after the pass.

use log::info;
use std::fs;
use std::path::PathBuf;

use crate::data::Pass;
use crate::error::Result;
use crate::grid::ScheduleGrid;
use crate::interchange::Table;

pub trait Checkpoint {
    fn commit(&mut self, pass: Pass, grid: &ScheduleGrid) -> Result<()>;
}

/// Discards every commit.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCheckpoint;

impl Checkpoint for NoCheckpoint {
    fn commit(&mut self, _pass: Pass, _grid: &ScheduleGrid) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryCheckpoint {
    pub snapshots: Vec<(Pass, Table)>,
}

impl MemoryCheckpoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pass: Pass) -> Option<&Table> {
        self.snapshots
            .iter()
            .rev()
            .find(|(p, _)| *p == pass)
            .map(|(_, table)| table)
    }
}

impl Checkpoint for MemoryCheckpoint {
    fn commit(&mut self, pass: Pass, grid: &ScheduleGrid) -> Result<()> {
        self.snapshots.push((pass, Table::from_grid(grid)));
        Ok(())
    }
}

/// Writes `<dir>/<pass>.csv` at every commit.
#[derive(Debug, Clone)]
pub struct CsvCheckpoint {
    dir: PathBuf,
}

impl CsvCheckpoint {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, pass: Pass) -> PathBuf {
        self.dir.join(format!("{}.csv", pass.name()))
    }
}

impl Checkpoint for CsvCheckpoint {
    fn commit(&mut self, pass: Pass, grid: &ScheduleGrid) -> Result<()> {
        let path = self.path_for(pass);
        Table::from_grid(grid).write_csv_path(&path)?;
        info!("Committed {} pass to {}", pass, path.display());
        Ok(())
    }
}
