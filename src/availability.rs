//! Instructor availability index.
//!
//! Raw per-day boundary markers are expanded once, up front, into catalog slot
//! indices. A day whose markers cannot be read is treated as fully unavailable.

use log::{debug, info, warn};
use std::cmp::Reverse;
use std::collections::HashMap;

use crate::data::{Instructor, InstructorId};
use crate::error::{Error, Result};
use crate::slots::{self, MarkerError, SlotIndex, Weekday};

#[derive(Debug, Clone, Default)]
pub struct AvailabilityIndex {
    by_instructor: HashMap<InstructorId, Vec<(Weekday, Vec<SlotIndex>)>>,
}

impl AvailabilityIndex {
    /// Builds the index. Fails only when there is no instructor data at all.
    pub fn build(instructors: &[Instructor]) -> Result<Self> {
        if instructors.is_empty() {
            return Err(Error::NoInstructorData);
        }

        let mut by_instructor = HashMap::with_capacity(instructors.len());
        for instructor in instructors {
            let days = Weekday::ALL
                .into_iter()
                .map(|day| {
                    let slots = match instructor.availability.get(&day) {
                        None => Vec::new(),
                        Some(raw) => match Self::expand(raw) {
                            Ok(slots) => slots,
                            Err(e) => {
                                warn!(
                                    "Availability of {} on {} is malformed ({}); treating the day as unavailable.",
                                    instructor.name, day, e
                                );
                                Vec::new()
                            }
                        },
                    };
                    (day, slots)
                })
                .collect::<Vec<_>>();
            debug!(
                "{} available for {} slots this week",
                instructor.name,
                days.iter().map(|(_, s)| s.len()).sum::<usize>()
            );
            by_instructor.insert(instructor.id, days);
        }

        info!("Availability index built for {} instructors.", by_instructor.len());
        Ok(Self { by_instructor })
    }

    pub fn expand(markers: &str) -> std::result::Result<Vec<SlotIndex>, MarkerError> {
        slots::expand_to_slots(markers)
    }

    pub fn contains(&self, instructor: InstructorId) -> bool {
        self.by_instructor.contains_key(&instructor)
    }

    /// The instructor's days in the order placement searches them.
    pub fn days_for(&self, instructor: InstructorId) -> Option<&[(Weekday, Vec<SlotIndex>)]> {
        self.by_instructor.get(&instructor).map(Vec::as_slice)
    }

    pub fn slots_for(&self, instructor: InstructorId, day: Weekday) -> &[SlotIndex] {
        self.days_for(instructor)
            .and_then(|days| days.iter().find(|(d, _)| *d == day))
            .map(|(_, slots)| slots.as_slice())
            .unwrap_or(&[])
    }

    /// Days ordered by descending slot count, ties in weekday order.
    ///
    /// Reporting only; placement never uses this order.
    pub fn density_sorted(&self, instructor: InstructorId) -> Vec<(Weekday, &[SlotIndex])> {
        let mut days: Vec<(Weekday, &[SlotIndex])> = self
            .days_for(instructor)
            .unwrap_or(&[])
            .iter()
            .map(|(day, slots)| (*day, slots.as_slice()))
            .collect();
        days.sort_by_key(|(_, slots)| Reverse(slots.len()));
        days
    }
}
