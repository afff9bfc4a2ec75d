// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Storage for the 32 in-flight operation records.

use abi::{Operation, SlotId, WINDOW_SIZE};

use crate::unissued::UnissuedValid;

#[derive(Copy, Clone, Debug, Default)]
struct Entry {
    valid: bool,
    issued: bool,
    op: Operation,
}

/// Fixed array of 32 slots holding in-flight operation records, plus the
/// `UnissuedValid` cache that tracks `valid ∧ ¬issued` alongside it.
///
/// The window is deliberately narrow: besides `enter` and `retire`, the
/// only other mutation it exposes is `mark_issued`, which the issue-update
/// path uses exclusively. Nothing else may flip a slot's `issued` bit.
#[derive(Clone, Debug)]
pub struct Window {
    entries: [Entry; WINDOW_SIZE],
    unissued: UnissuedValid,
}

impl Window {
    /// Creates a window with every slot invalid, matching the scheduler's
    /// reset state.
    pub fn new() -> Self {
        Window {
            entries: [Entry::default(); WINDOW_SIZE],
            unissued: UnissuedValid::new(),
        }
    }

    pub fn is_valid(&self, s: SlotId) -> bool {
        self.entries[s.index()].valid
    }

    pub fn is_issued(&self, s: SlotId) -> bool {
        self.entries[s.index()].issued
    }

    /// Returns the operation stored in `s`. Don't-care if `s` is not valid;
    /// the window never clears a retired slot's payload.
    pub fn operation(&self, s: SlotId) -> Operation {
        self.entries[s.index()].op
    }

    /// Returns the `UnissuedValid` bitmap, for use by the ready-bitmap
    /// computer.
    pub fn unissued_valid(&self) -> u32 {
        self.unissued.bits()
    }

    /// Iterates over every slot currently occupied (`valid`, issued or
    /// not), in slot-index order.
    pub fn iter_occupied(&self) -> impl Iterator<Item = SlotId> + '_ {
        (0..WINDOW_SIZE).filter_map(move |i| {
            let s = SlotId::from_raw(i);
            if self.is_valid(s) {
                Some(s)
            } else {
                None
            }
        })
    }

    /// Installs `op` into `s`, marking it valid and not issued.
    ///
    /// If `s` was already valid, this is a "replace": the old payload is
    /// overwritten and the slot's age (its index) is unchanged. The caller
    /// (`Scheduler::enter`) is responsible for rebuilding dependency-matrix
    /// edges touching `s` when this happens, since the window has no
    /// visibility into the matrix.
    pub fn enter(&mut self, s: SlotId, op: Operation) {
        self.entries[s.index()] = Entry {
            valid: true,
            issued: false,
            op,
        };
        self.unissued.set(s);
    }

    /// Clears `s`. Idempotent on an already-empty slot. The payload is left
    /// untouched (it becomes don't-care, per `valid == false`), matching
    /// hardware, where retiring a slot does not clear its storage.
    pub fn retire(&mut self, s: SlotId) {
        self.entries[s.index()].valid = false;
        self.entries[s.index()].issued = false;
        self.unissued.clear(s);
    }

    /// Marks `s` issued. Exclusively called by issue-update.
    pub fn mark_issued(&mut self, s: SlotId) {
        self.entries[s.index()].issued = true;
        self.unissued.clear(s);
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}
