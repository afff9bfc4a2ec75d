// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Splits the ready bitmap into critical-path and leaf tiers.

use abi::{SlotId, WINDOW_SIZE};

use crate::depmatrix::DependencyMatrix;

/// The pipeline register captured by cycle 0 and consumed by cycle 1.
///
/// `high` and `low` are disjoint and their union is a subset of the ready
/// bitmap they were derived from.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PriorityClass {
    pub high: u32,
    pub low: u32,
}

impl PriorityClass {
    /// The empty class, produced by a cycle with nothing ready.
    pub const EMPTY: Self = PriorityClass { high: 0, low: 0 };
}

/// Returns the 32-bit `has_dependents` bitmap: bit `s` set iff some other
/// occupied slot depends on `s`.
pub fn has_dependents(matrix: &DependencyMatrix) -> u32 {
    let mut out = 0u32;
    for i in 0..WINDOW_SIZE {
        let s = SlotId::from_raw(i);
        if matrix.has_dependents(s) {
            out |= s.mask();
        }
    }
    out
}

/// Classifies `ready` into high- and low-priority tiers using the
/// dependency matrix's `has_dependents` bitmap.
pub fn classify(ready: u32, matrix: &DependencyMatrix) -> PriorityClass {
    let dependents = has_dependents(matrix);
    PriorityClass {
        high: ready & dependents,
        low: ready & !dependents,
    }
}
