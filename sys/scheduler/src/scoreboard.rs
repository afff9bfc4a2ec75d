// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single-bit readiness tracking for the 64 architectural registers.

use abi::RegisterId;

/// 64-bit bitmap of architectural register readiness.
///
/// A set bit means the register is *pending*: some issued-but-not-yet-
/// completed operation targets it. A clear bit means the register is
/// *ready*. Representing readiness this way, rather than the reverse, lets
/// `new` zero-initialize to "everything ready," matching reset semantics in
/// one instruction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Scoreboard {
    pending: u64,
}

impl Scoreboard {
    /// Creates a scoreboard with every register ready, matching the
    /// scheduler's reset state.
    pub fn new() -> Self {
        Scoreboard { pending: 0 }
    }

    /// Returns `true` if `r` is ready (not pending).
    pub fn is_ready(&self, r: RegisterId) -> bool {
        self.pending & r.mask() == 0
    }

    /// Marks `r` ready. Idempotent.
    pub fn mark_ready(&mut self, r: RegisterId) {
        self.pending &= !r.mask();
    }

    /// Marks `r` pending. Idempotent.
    pub fn mark_pending(&mut self, r: RegisterId) {
        self.pending |= r.mask();
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg(i: usize) -> RegisterId {
        RegisterId::new(i).unwrap()
    }

    #[test]
    fn reset_is_all_ready() {
        let sb = Scoreboard::new();
        for i in 0..abi::REGISTER_COUNT {
            assert!(sb.is_ready(reg(i)));
        }
    }

    #[test]
    fn mark_pending_then_ready() {
        let mut sb = Scoreboard::new();
        sb.mark_pending(reg(10));
        assert!(!sb.is_ready(reg(10)));
        assert!(sb.is_ready(reg(11)));
        sb.mark_ready(reg(10));
        assert!(sb.is_ready(reg(10)));
    }

    #[test]
    fn repeated_marks_are_idempotent() {
        let mut a = Scoreboard::new();
        a.mark_pending(reg(3));
        let mut b = a;
        a.mark_pending(reg(3));
        assert_eq!(a, b);

        a.mark_ready(reg(3));
        b.mark_ready(reg(3));
        let before = b;
        b.mark_ready(reg(3));
        assert_eq!(b, before);
    }
}
