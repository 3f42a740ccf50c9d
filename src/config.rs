use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::data::{ClassYear, DepartmentId};
use crate::error::{Error, Result};

/// A degree program whose class years form columns of the grid.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub department_id: DepartmentId,
    pub name: String,
    /// Number of class years, columns are `1..=class_years`.
    pub class_years: ClassYear,
}

/// Fills empty `to_year` cells of a program with its `from_year` occupant.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionRule {
    pub department_id: DepartmentId,
    pub from_year: ClassYear,
    pub to_year: ClassYear,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableConfig {
    /// Column order of the grid.
    pub programs: Vec<Program>,
    /// Programs that teach common courses together.
    #[serde(default)]
    pub shared_pairs: Vec<[DepartmentId; 2]>,
    #[serde(default)]
    pub extension_years: Vec<ExtensionRule>,
}

impl TimetableConfig {
    pub fn program(&self, department_id: DepartmentId) -> Option<&Program> {
        self.programs
            .iter()
            .find(|p| p.department_id == department_id)
    }

    pub fn has_section(&self, department_id: DepartmentId, class_year: ClassYear) -> bool {
        self.program(department_id)
            .is_some_and(|p| class_year >= 1 && class_year <= p.class_years)
    }

    /// Programs paired with `department_id`, in pair order.
    pub fn partners(&self, department_id: DepartmentId) -> Vec<DepartmentId> {
        self.shared_pairs
            .iter()
            .filter_map(|[a, b]| {
                if *a == department_id {
                    Some(*b)
                } else if *b == department_id {
                    Some(*a)
                } else {
                    None
                }
            })
            .unique()
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.programs.is_empty() {
            return Err(Error::InvalidConfig("no programs configured".to_string()));
        }
        if let Some(dup) = self.programs.iter().map(|p| p.department_id).duplicates().next() {
            return Err(Error::InvalidConfig(format!(
                "program {} configured more than once",
                dup
            )));
        }
        if let Some(p) = self.programs.iter().find(|p| p.class_years == 0) {
            return Err(Error::InvalidConfig(format!(
                "program {} has no class years",
                p.department_id
            )));
        }
        for [a, b] in &self.shared_pairs {
            if a == b {
                return Err(Error::InvalidConfig(format!(
                    "program {} cannot share with itself",
                    a
                )));
            }
            for id in [a, b] {
                if self.program(*id).is_none() {
                    return Err(Error::InvalidConfig(format!(
                        "shared pair names unknown program {}",
                        id
                    )));
                }
            }
        }
        for rule in &self.extension_years {
            if !self.has_section(rule.department_id, rule.from_year)
                || !self.has_section(rule.department_id, rule.to_year)
            {
                return Err(Error::InvalidConfig(format!(
                    "extension rule {}: {} -> {} is outside the program's class years",
                    rule.department_id, rule.from_year, rule.to_year
                )));
            }
            if rule.from_year == rule.to_year {
                return Err(Error::InvalidConfig(format!(
                    "extension rule for program {} copies year {} onto itself",
                    rule.department_id, rule.from_year
                )));
            }
        }
        Ok(())
    }
}
