// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Combinational readiness test over window, scoreboard, matrix and bypass.

use abi::{SlotId, WINDOW_SIZE};

use crate::bypass::BypassNetwork;
use crate::depmatrix::DependencyMatrix;
use crate::scoreboard::Scoreboard;
use crate::window::Window;

/// Computes the 32-bit ready bitmap: one bit per slot, set iff that slot
/// may issue this cycle.
///
/// Pure function of its four inputs. Every slot is evaluated; there is no
/// early exit, since the five-condition test models independent per-slot
/// combinational logic rather than a sequential scan.
pub fn compute_ready(
    window: &Window,
    scoreboard: &Scoreboard,
    matrix: &DependencyMatrix,
    bypass: &BypassNetwork,
) -> u32 {
    let unissued_valid = window.unissued_valid();
    let mut ready = 0u32;
    for i in 0..WINDOW_SIZE {
        let s = SlotId::from_raw(i);
        if !window.is_valid(s) || window.is_issued(s) {
            continue;
        }
        let op = window.operation(s);
        let src1_ok = scoreboard.is_ready(op.src1) || bypass.check_bypass(op.src1);
        let src2_ok = scoreboard.is_ready(op.src2) || bypass.check_bypass(op.src2);
        let dest_ok = scoreboard.is_ready(op.dest);
        let no_older_producer = matrix.dep_column(s) & unissued_valid == 0;
        if src1_ok && src2_ok && dest_ok && no_older_producer {
            ready |= s.mask();
        }
    }
    ready
}
