// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reference model of an out-of-order instruction scheduler.
//!
//! `Scheduler` owns every piece of scheduler state (window, scoreboard,
//! dependency matrix, bypass network, pipeline register) and exposes the
//! lifecycle operations through which a dispatcher and execution units
//! drive it one simulated cycle at a time: `enter`/`retire` to install and
//! remove operations, `cycle0`/`cycle1` to run the two pipeline stages, and
//! `complete_update` to report execution completions. No component may be
//! reached except through these entry points; see the per-module docs for
//! the algorithms each one runs.

#![cfg_attr(not(test), no_std)]

mod bypass;
mod depmatrix;
mod pipeline;
mod priority;
mod ready;
mod scoreboard;
mod select;
mod unissued;
mod window;

pub use abi::{IssueBundle, Operation, RegisterId, SlotId, ISSUE_WIDTH, REGISTER_COUNT, WINDOW_SIZE};

use bypass::BypassNetwork;
use depmatrix::DependencyMatrix;
use priority::PriorityClass;
use scoreboard::Scoreboard;
use window::Window;

/// The scheduler's full state, and the only type external callers touch.
#[derive(Clone, Debug)]
pub struct Scheduler {
    window: Window,
    scoreboard: Scoreboard,
    matrix: DependencyMatrix,
    bypass: BypassNetwork,
    pipeline: PriorityClass,
}

impl Scheduler {
    /// Creates a scheduler in its reset state: scoreboard all-ready,
    /// window all-invalid, matrix empty, bypass empty, pipeline register
    /// empty.
    pub fn new() -> Self {
        Scheduler {
            window: Window::new(),
            scoreboard: Scoreboard::new(),
            matrix: DependencyMatrix::new(),
            bypass: BypassNetwork::new(),
            pipeline: PriorityClass::EMPTY,
        }
    }

    /// Installs `op` into `slot`, marking it valid and not issued, and
    /// rebuilds every dependency-matrix edge touching `slot`.
    ///
    /// If `slot` is already valid this is a replace: its old edges are
    /// dropped before the new ones are computed against the operation
    /// being installed.
    pub fn enter(&mut self, slot: SlotId, op: Operation) {
        if self.window.is_valid(slot) {
            self.matrix.clear_slot(slot);
        }

        for p in self.window.iter_occupied() {
            if p == slot || self.window.is_issued(p) {
                continue;
            }
            let p_op = self.window.operation(p);
            if p_op.dest == op.src1 || p_op.dest == op.src2 {
                if p.is_older_than(slot) {
                    self.matrix.add_edge(slot, p);
                }
            }
            if op.dest == p_op.src1 || op.dest == p_op.src2 {
                if slot.is_older_than(p) {
                    self.matrix.add_edge(p, slot);
                }
            }
        }

        self.window.enter(slot, op);
    }

    /// Clears `slot`: drops it from the window and removes every
    /// dependency-matrix edge touching it. Idempotent on an empty slot.
    pub fn retire(&mut self, slot: SlotId) {
        self.matrix.clear_slot(slot);
        self.window.retire(slot);
    }

    /// Cycle 0 (analyze): computes the ready bitmap and classifies it,
    /// capturing the result into the pipeline register.
    pub fn cycle0(&mut self) {
        self.pipeline = pipeline::stage0(&self.window, &self.scoreboard, &self.matrix, &self.bypass);
    }

    /// Cycle 1 (select): selects a bundle from the pipelined priority
    /// class and applies issue-update for its valid entries.
    pub fn cycle1(&mut self) -> IssueBundle {
        pipeline::stage1(&self.pipeline, &mut self.window, &mut self.scoreboard, &mut self.bypass)
    }

    /// Marks every destination register named by a set bit in `mask`
    /// ready. `dest_regs[i]` is read only when bit `i` of `mask` is set.
    pub fn complete_update(&mut self, dest_regs: [RegisterId; ISSUE_WIDTH], mask: u16) {
        for i in 0..ISSUE_WIDTH {
            if mask & (1 << i) != 0 {
                self.scoreboard.mark_ready(dest_regs[i]);
            }
        }
    }

    /// Returns `true` if `reg` was captured by the most recently issued
    /// bundle and has not yet been superseded by a later issue-update.
    pub fn check_bypass(&self, reg: RegisterId) -> bool {
        self.bypass.check_bypass(reg)
    }

    /// Returns `true` if `slot` currently holds a valid operation.
    pub fn is_valid(&self, slot: SlotId) -> bool {
        self.window.is_valid(slot)
    }

    /// Returns `true` if `slot` has been issued and not yet retired.
    pub fn is_issued(&self, slot: SlotId) -> bool {
        self.window.is_issued(slot)
    }

    /// Returns `true` if `reg` is ready (not pending) in the scoreboard.
    pub fn is_ready(&self, reg: RegisterId) -> bool {
        self.scoreboard.is_ready(reg)
    }

    /// Returns the destination register of the operation stored in `slot`.
    /// Don't-care if `slot` is not valid.
    pub fn destination(&self, slot: SlotId) -> RegisterId {
        self.window.operation(slot).dest
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
