// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The two scheduler stages, as explicit functions over borrowed state.
//!
//! Kept separate from `Scheduler` itself so that the two-stage split is a
//! visible seam rather than something hidden behind internal mutability:
//! stage 0 only ever reads window/scoreboard/matrix/bypass and writes the
//! pipeline register; stage 1 only ever reads the pipeline register and
//! writes the bundle plus issue-side state.

use abi::IssueBundle;

use crate::bypass::BypassNetwork;
use crate::depmatrix::DependencyMatrix;
use crate::priority::{self, PriorityClass};
use crate::ready;
use crate::scoreboard::Scoreboard;
use crate::select;
use crate::window::Window;

/// Cycle 0 (analyze): derives the ready bitmap and classifies it, without
/// mutating anything but the returned pipeline register.
pub fn stage0(
    window: &Window,
    scoreboard: &Scoreboard,
    matrix: &DependencyMatrix,
    bypass: &BypassNetwork,
) -> PriorityClass {
    let ready = ready::compute_ready(window, scoreboard, matrix, bypass);
    priority::classify(ready, matrix)
}

/// Cycle 1 (select): reads the pipeline register, selects a bundle, and
/// applies issue-update (window.issued, scoreboard pending, UnissuedValid,
/// bypass capture) for every valid entry.
pub fn stage1(
    class: &PriorityClass,
    window: &mut Window,
    scoreboard: &mut Scoreboard,
    bypass: &mut BypassNetwork,
) -> IssueBundle {
    let bundle = select::select(class, window);

    bypass.clear();
    for (position, slot) in bundle.iter().enumerate() {
        window.mark_issued(slot);
        let dest = window.operation(slot).dest;
        scoreboard.mark_pending(dest);
        bypass.capture(position, dest);
    }

    bundle
}
