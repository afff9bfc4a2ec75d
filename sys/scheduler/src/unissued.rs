// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Denormalized cache of `valid ∧ ¬issued` per slot.

use abi::SlotId;

/// 32-bit cache of the set of slots that are occupied but not yet issued.
///
/// This exists purely so that the ready-bitmap computer can test "no older,
/// still-unissued producer" with a single `&` against a dependency-matrix
/// column, instead of re-deriving the set from the window on every slot.
/// Its only invariant is membership equivalence with the window: it is
/// updated in lockstep by `enter`, issue-update, and `retire`, and never
/// touched anywhere else.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct UnissuedValid(u32);

impl UnissuedValid {
    pub fn new() -> Self {
        UnissuedValid(0)
    }

    /// Sets the bit for `s`. Called by `enter`.
    pub fn set(&mut self, s: SlotId) {
        self.0 |= s.mask();
    }

    /// Clears the bit for `s`. Called by issue-update and `retire`.
    pub fn clear(&mut self, s: SlotId) {
        self.0 &= !s.mask();
    }

    /// Returns `true` if `s` is valid and not yet issued.
    pub fn get(&self, s: SlotId) -> bool {
        self.0 & s.mask() != 0
    }

    /// Returns the raw 32-bit bitmap.
    pub fn bits(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_is_empty() {
        assert_eq!(UnissuedValid::new().bits(), 0);
    }

    #[test]
    fn set_then_clear() {
        let mut u = UnissuedValid::new();
        let s = SlotId::new(7).unwrap();
        u.set(s);
        assert!(u.get(s));
        assert_eq!(u.bits(), s.mask());
        u.clear(s);
        assert!(!u.get(s));
        assert_eq!(u.bits(), 0);
    }

    #[test]
    fn clear_on_unset_bit_is_a_no_op() {
        let mut u = UnissuedValid::new();
        let s = SlotId::new(7).unwrap();
        u.clear(s);
        assert_eq!(u.bits(), 0);
    }
}
