// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Picks up to `ISSUE_WIDTH` oldest ready slots, avoiding destination
//! collisions within the bundle.

use abi::{IssueBundle, SlotId, ISSUE_WIDTH};

use crate::priority::PriorityClass;
use crate::window::Window;

/// Selects an issue bundle from `class`, reading slot destinations out of
/// `window`.
///
/// Operates on HighPriority if it is nonempty, otherwise LowPriority; the
/// two tiers are never mixed within one call. Within the chosen tier, scans
/// from the highest-numbered set bit down (oldest slot first, since a
/// higher slot index is older), skipping any slot whose destination
/// collides with one already claimed this call.
pub fn select(class: &PriorityClass, window: &Window) -> IssueBundle {
    let mut working = if class.high != 0 { class.high } else { class.low };

    let mut slots = [SlotId::ZERO; ISSUE_WIDTH];
    let mut valid = 0u16;
    let mut claimed: u64 = 0;
    let mut position = 0usize;

    while working != 0 && position < ISSUE_WIDTH {
        let bit_index = 31 - working.leading_zeros();
        let s = SlotId::from_raw(bit_index as usize);
        working &= !s.mask();

        let dest = window.operation(s).dest;
        if claimed & dest.mask() == 0 {
            slots[position] = s;
            valid |= 1 << position;
            claimed |= dest.mask();
            position += 1;
        }
    }

    IssueBundle::from_parts(slots, valid)
}
