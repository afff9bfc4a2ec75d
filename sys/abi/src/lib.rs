// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared record types for the out-of-order instruction scheduler model.
//!
//! This crate carries only data: the fixed parameters of the scheduler
//! (window size, register count, issue width), the newtypes that keep slot
//! and register indices inside their documented ranges, and the payload
//! records that cross the scheduler's boundary (`Operation`, `IssueBundle`).
//! No scheduling logic lives here; see the `scheduler` crate for that.

#![no_std]

/// Panics with a message if `$cond` is false, in both debug and release
/// builds.
///
/// This is not input validation: it exists for the handful of entry points
/// that accept a raw index instead of an already-range-checked `SlotId` or
/// `RegisterId`, where an out-of-range value indicates a caller bug rather
/// than a condition the model is expected to handle. See `SlotId::from_raw`
/// and `RegisterId::from_raw`.
#[macro_export]
macro_rules! uassert {
    ($cond:expr) => {
        if !$cond {
            panic!(concat!("assertion failed: ", stringify!($cond)));
        }
    };
}

/// Number of slots in the instruction window.
pub const WINDOW_SIZE: usize = 32;

/// Number of architectural registers tracked by the scoreboard.
pub const REGISTER_COUNT: usize = 64;

/// Maximum number of operations that may issue in a single cycle.
pub const ISSUE_WIDTH: usize = 16;

/// Identifies one of the `WINDOW_SIZE` slots in the instruction window.
///
/// Slot indices double as an age proxy: a slot with a higher index is
/// defined to be older than one with a lower index. This convention is
/// fixed at the type boundary so that no component needs a separate age
/// field that could drift out of sync with slot placement.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SlotId(u8);

impl SlotId {
    /// The slot id with index zero.
    pub const ZERO: SlotId = SlotId(0);

    /// Constructs a `SlotId`, or returns `None` if `index` is outside
    /// `0..WINDOW_SIZE`.
    pub const fn new(index: usize) -> Option<Self> {
        if index < WINDOW_SIZE {
            Some(SlotId(index as u8))
        } else {
            None
        }
    }

    /// Constructs a `SlotId` from a raw index, panicking via `uassert!` if
    /// it is out of range.
    ///
    /// Use this at trusted call sites (model-internal code, literal test
    /// vectors) where an out-of-range index is a programming error. Use
    /// `new` instead when the index comes from untrusted input (e.g. a
    /// property-test generator) and an out-of-range value is a normal,
    /// handleable case.
    pub fn from_raw(index: usize) -> Self {
        uassert!(index < WINDOW_SIZE);
        SlotId(index as u8)
    }

    /// Returns the slot index, suitable for indexing a `[T; WINDOW_SIZE]`.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the single-bit mask for this slot within a 32-bit bitmap.
    pub const fn mask(self) -> u32 {
        1 << self.0
    }

    /// Returns `true` if `self` is older than `other`, i.e. `self` has the
    /// higher slot index.
    pub const fn is_older_than(self, other: Self) -> bool {
        self.0 > other.0
    }
}

/// Identifies one of the `REGISTER_COUNT` architectural registers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RegisterId(u8);

impl RegisterId {
    /// The register id with index zero.
    pub const ZERO: RegisterId = RegisterId(0);

    /// Constructs a `RegisterId`, or returns `None` if `index` is outside
    /// `0..REGISTER_COUNT`.
    pub const fn new(index: usize) -> Option<Self> {
        if index < REGISTER_COUNT {
            Some(RegisterId(index as u8))
        } else {
            None
        }
    }

    /// Constructs a `RegisterId` from a raw index, panicking via `uassert!`
    /// if it is out of range. See `SlotId::from_raw` for when to prefer
    /// this over `new`.
    pub fn from_raw(index: usize) -> Self {
        uassert!(index < REGISTER_COUNT);
        RegisterId(index as u8)
    }

    /// Returns the register index, suitable for indexing a `[T; REGISTER_COUNT]`.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the single-bit mask for this register within a 64-bit
    /// scoreboard bitmap.
    pub const fn mask(self) -> u64 {
        1 << self.0
    }
}

impl Default for SlotId {
    fn default() -> Self {
        SlotId::ZERO
    }
}

impl Default for RegisterId {
    fn default() -> Self {
        RegisterId::ZERO
    }
}

/// One in-flight operation record, as stored in a window slot.
///
/// The scheduler reads `src1`, `src2`, and `dest` to drive dependency
/// tracking; `op` and `imm` are opaque payload that the scheduler passes
/// through untouched for the execution units to interpret.
///
/// When the owning slot is invalid, an `Operation`'s fields are don't-care:
/// the scheduler never clears a retired slot's payload, it just stops
/// trusting it. Reading `Operation` out of an invalid slot is meaningless
/// but not unsafe.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Operation {
    /// First source register read by this operation.
    pub src1: RegisterId,
    /// Second source register read by this operation.
    pub src2: RegisterId,
    /// Destination register written by this operation.
    pub dest: RegisterId,
    /// Opcode, opaque to the scheduler.
    pub op: u8,
    /// Immediate value, opaque to the scheduler.
    pub imm: u16,
}

impl Operation {
    /// Convenience constructor matching the `{src1,src2,dest}` shorthand
    /// used throughout the scheduler's scenario tests. `op` and `imm` are
    /// zeroed.
    pub fn new(src1: RegisterId, src2: RegisterId, dest: RegisterId) -> Self {
        Operation {
            src1,
            src2,
            dest,
            op: 0,
            imm: 0,
        }
    }
}

/// The result of the issue selector: up to `ISSUE_WIDTH` slot indices,
/// each either valid or don't-care.
///
/// # Invariants
///
/// Entries with their bit set in `valid` name pairwise-distinct slots whose
/// operations write pairwise-distinct destination registers (see the issue
/// selector's claimed-destination mask). An entry whose bit is clear in
/// `valid` is don't-care and must not be read.
#[derive(Copy, Clone, Debug)]
pub struct IssueBundle {
    slots: [SlotId; ISSUE_WIDTH],
    valid: u16,
}

impl IssueBundle {
    /// The empty bundle: no positions valid. This is the bundle produced by
    /// a cycle in which nothing is ready to issue.
    pub const EMPTY: Self = IssueBundle {
        slots: [SlotId::ZERO; ISSUE_WIDTH],
        valid: 0,
    };

    /// Builds a bundle from raw parts. Used by the issue selector, which is
    /// the only code entitled to construct a non-empty bundle.
    pub fn from_parts(slots: [SlotId; ISSUE_WIDTH], valid: u16) -> Self {
        IssueBundle { slots, valid }
    }

    /// Returns the 16-bit valid mask, one bit per bundle position.
    pub fn valid_mask(&self) -> u16 {
        self.valid
    }

    /// Returns the number of valid entries in this bundle.
    pub fn len(&self) -> usize {
        self.valid.count_ones() as usize
    }

    /// Returns `true` if no position in this bundle is valid.
    pub fn is_empty(&self) -> bool {
        self.valid == 0
    }

    /// Returns the slot named by bundle position `i`, along with whether
    /// that position is valid.
    pub fn slot(&self, i: usize) -> (SlotId, bool) {
        (self.slots[i], self.valid & (1 << i) != 0)
    }

    /// Iterates over the valid slots in this bundle, in bundle position
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = SlotId> + '_ {
        (0..ISSUE_WIDTH).filter_map(move |i| {
            if self.valid & (1 << i) != 0 {
                Some(self.slots[i])
            } else {
                None
            }
        })
    }

    /// Returns `true` if `slot` appears, valid, anywhere in this bundle.
    pub fn contains(&self, slot: SlotId) -> bool {
        self.iter().any(|s| s == slot)
    }
}
