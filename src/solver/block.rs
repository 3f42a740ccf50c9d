use crate::slots::{SlotIndex, Weekday};

/// A run of consecutive slots on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub day: Weekday,
    pub slots: Vec<SlotIndex>,
}

/// First window of exactly `hours` consecutive available slots for which
/// `fits` holds on every slot. Days are searched in the given order, then
/// starting positions left to right.
pub fn find_block<F>(
    availability: &[(Weekday, Vec<SlotIndex>)],
    hours: usize,
    mut fits: F,
) -> Option<Block>
where
    F: FnMut(Weekday, SlotIndex) -> bool,
{
    if hours == 0 {
        return None;
    }
    for (day, slots) in availability {
        for window in slots.windows(hours) {
            let contiguous = window.windows(2).all(|pair| pair[1] == pair[0] + 1);
            if contiguous && window.iter().all(|slot| fits(*day, *slot)) {
                return Some(Block {
                    day: *day,
                    slots: window.to_vec(),
                });
            }
        }
    }
    None
}
