// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Producer/consumer edges between window slots.

use abi::{SlotId, WINDOW_SIZE};

/// Tracks, for every slot, which other slots it depends on.
///
/// Internally this is stored column-first: `columns[c]` is the set of
/// producer slots that consumer `c` depends on. That orientation is the one
/// the ready-bitmap computer actually needs (`dep_column(s) & UnissuedValid`
/// for a single candidate `s`), so it is the representation, not a value
/// derived from a row-first table on every query.
#[derive(Copy, Clone, Debug)]
pub struct DependencyMatrix {
    columns: [u32; WINDOW_SIZE],
}

impl DependencyMatrix {
    /// Creates a matrix with no edges, matching the scheduler's reset
    /// state.
    pub fn new() -> Self {
        DependencyMatrix {
            columns: [0; WINDOW_SIZE],
        }
    }

    /// Returns the set of producer slots that `consumer` depends on.
    pub fn dep_column(&self, consumer: SlotId) -> u32 {
        self.columns[consumer.index()]
    }

    /// Returns `true` if any other occupied slot depends on `producer`.
    ///
    /// This is an OR-reduction over every column's bit for `producer`, since
    /// edges are stored column-first and there is no row to read directly.
    pub fn has_dependents(&self, producer: SlotId) -> bool {
        let bit = producer.mask();
        self.columns.iter().any(|&col| col & bit != 0)
    }

    /// Records that `consumer` depends on `producer`.
    pub fn add_edge(&mut self, consumer: SlotId, producer: SlotId) {
        self.columns[consumer.index()] |= producer.mask();
    }

    /// Removes every edge mentioning `slot`, as either consumer or
    /// producer. Called when `slot` retires or is overwritten by `enter`.
    pub fn clear_slot(&mut self, slot: SlotId) {
        self.columns[slot.index()] = 0;
        let bit = !slot.mask();
        for col in self.columns.iter_mut() {
            *col &= bit;
        }
    }
}

impl Default for DependencyMatrix {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(i: usize) -> SlotId {
        SlotId::new(i).unwrap()
    }

    #[test]
    fn reset_has_no_edges() {
        let m = DependencyMatrix::new();
        for i in 0..WINDOW_SIZE {
            assert_eq!(m.dep_column(slot(i)), 0);
            assert!(!m.has_dependents(slot(i)));
        }
    }

    #[test]
    fn add_edge_is_visible_in_column_and_has_dependents() {
        let mut m = DependencyMatrix::new();
        m.add_edge(slot(5), slot(2));
        assert_eq!(m.dep_column(slot(5)), slot(2).mask());
        assert!(m.has_dependents(slot(2)));
        assert!(!m.has_dependents(slot(5)));
    }

    #[test]
    fn clear_slot_removes_edges_both_directions() {
        let mut m = DependencyMatrix::new();
        m.add_edge(slot(5), slot(2));
        m.add_edge(slot(7), slot(5));

        m.clear_slot(slot(5));

        assert_eq!(m.dep_column(slot(5)), 0);
        assert_eq!(m.dep_column(slot(7)), 0);
        assert!(!m.has_dependents(slot(5)));
    }

    #[test]
    fn multiple_producers_accumulate_in_one_column() {
        let mut m = DependencyMatrix::new();
        m.add_edge(slot(10), slot(1));
        m.add_edge(slot(10), slot(2));
        assert_eq!(m.dep_column(slot(10)), slot(1).mask() | slot(2).mask());
    }
}
