//! Batch output — one result slot per posterior draw.
//!
//! Purpose
//! -------
//! Hold the outcome of a batch operation as a pre-sized, draw-indexed
//! collection of `SvarResult<T>` slots. Draw-level failures live next to the
//! successful slots so a single degenerate draw never discards the rest.
//!
//! Invariants & assumptions
//! ------------------------
//! - Slot `s` always corresponds to input draw `s`.
//! - Only draw-level errors (`SvarError::is_draw_level`) are ever stored;
//!   batch-fatal errors are returned by the operation itself.
use crate::errors::{SvarError, SvarResult};

/// Per-draw results of a batch operation.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutput<T> {
    slots: Vec<SvarResult<T>>,
}

impl<T> BatchOutput<T> {
    pub(crate) fn from_slots(slots: Vec<SvarResult<T>>) -> Self {
        BatchOutput { slots }
    }

    /// Number of draws `S`.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Result slot of draw `s`, if in range.
    pub fn get(&self, s: usize) -> Option<&SvarResult<T>> {
        self.slots.get(s)
    }

    /// Number of draws that succeeded.
    pub fn succeeded(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_ok()).count()
    }

    /// Failed draws as `(draw index, error)` pairs, in draw order.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &SvarError)> + '_ {
        self.slots.iter().enumerate().filter_map(|(s, slot)| slot.as_ref().err().map(|e| (s, e)))
    }

    /// Iterate over the slots in draw order.
    pub fn iter(&self) -> std::slice::Iter<'_, SvarResult<T>> {
        self.slots.iter()
    }

    /// All values in draw order, or the first draw-level failure.
    pub fn into_values(self) -> SvarResult<Vec<T>> {
        self.slots.into_iter().collect()
    }

    /// Give up the slot vector.
    pub fn into_slots(self) -> Vec<SvarResult<T>> {
        self.slots
    }
}

impl<'a, T> IntoIterator for &'a BatchOutput<T> {
    type Item = &'a SvarResult<T>;
    type IntoIter = std::slice::Iter<'a, SvarResult<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
