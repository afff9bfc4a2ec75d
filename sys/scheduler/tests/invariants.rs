// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property sweep over random call sequences, checking the universal
//! invariants and round-trip laws after every call.

use proptest::prelude::*;
use proptest_derive::Arbitrary;

use scheduler::{IssueBundle, Operation, RegisterId, Scheduler, SlotId, ISSUE_WIDTH, REGISTER_COUNT, WINDOW_SIZE};

#[derive(Debug, Clone, Arbitrary)]
enum Call {
    Enter {
        #[proptest(strategy = "0..WINDOW_SIZE")]
        slot: usize,
        #[proptest(strategy = "0..REGISTER_COUNT")]
        src1: usize,
        #[proptest(strategy = "0..REGISTER_COUNT")]
        src2: usize,
        #[proptest(strategy = "0..REGISTER_COUNT")]
        dest: usize,
    },
    Retire {
        #[proptest(strategy = "0..WINDOW_SIZE")]
        slot: usize,
    },
    Cycle,
    Complete {
        #[proptest(strategy = "0..REGISTER_COUNT")]
        reg: usize,
    },
}

fn reg(i: usize) -> RegisterId {
    RegisterId::new(i).unwrap()
}

fn slot(i: usize) -> SlotId {
    SlotId::new(i).unwrap()
}

/// Checks every universal invariant from the testable-properties list that
/// is observable through the public API, against the scheduler's current
/// state and the most recently returned bundle (if any).
fn check_invariants(s: &Scheduler, last_bundle: Option<&IssueBundle>) {
    for i in 0..WINDOW_SIZE {
        let sl = slot(i);
        if s.is_issued(sl) {
            assert!(s.is_valid(sl), "issued implies valid violated at slot {i}");
        }
    }

    if let Some(bundle) = last_bundle {
        let mut seen_slots = Vec::new();
        let mut seen_dests: Vec<RegisterId> = Vec::new();
        for sl in bundle.iter() {
            assert!(!seen_slots.contains(&sl), "duplicate slot in bundle");
            seen_slots.push(sl);

            let dest = s.destination(sl);
            assert!(!seen_dests.contains(&dest), "duplicate destination in bundle");
            seen_dests.push(dest);
        }
    }
}

proptest! {
    #[test]
    fn invariants_hold_after_every_call(calls in prop::collection::vec(any::<Call>(), 0..200)) {
        let mut s = Scheduler::new();
        let mut last_bundle: Option<IssueBundle> = None;

        for call in calls {
            match call {
                Call::Enter { slot: sl, src1, src2, dest } => {
                    s.enter(slot(sl), Operation::new(reg(src1), reg(src2), reg(dest)));
                }
                Call::Retire { slot: sl } => {
                    s.retire(slot(sl));
                }
                Call::Cycle => {
                    s.cycle0();
                    let bundle = s.cycle1();
                    last_bundle = Some(bundle);
                }
                Call::Complete { reg: r } => {
                    let mut dests = [RegisterId::default(); ISSUE_WIDTH];
                    dests[0] = reg(r);
                    s.complete_update(dests, 1);
                }
            }
            check_invariants(&s, last_bundle.as_ref());
        }
    }

    #[test]
    fn repeated_complete_update_is_idempotent(r in 0..REGISTER_COUNT) {
        let mut a = Scheduler::new();
        let mut dests = [RegisterId::default(); ISSUE_WIDTH];
        dests[0] = reg(r);
        a.complete_update(dests, 1);
        let ready_after_one = a.is_ready(reg(r));
        a.complete_update(dests, 1);
        prop_assert_eq!(a.is_ready(reg(r)), ready_after_one);
    }

    #[test]
    fn enter_then_retire_leaves_slot_invalid(
        sl in 0..WINDOW_SIZE,
        src1 in 0..REGISTER_COUNT,
        src2 in 0..REGISTER_COUNT,
        dest in 0..REGISTER_COUNT,
    ) {
        let mut s = Scheduler::new();
        s.enter(slot(sl), Operation::new(reg(src1), reg(src2), reg(dest)));
        s.retire(slot(sl));
        prop_assert!(!s.is_valid(slot(sl)));
        prop_assert!(!s.is_issued(slot(sl)));
    }

    #[test]
    fn issued_slot_never_reissues_before_retire(
        sl in 0..WINDOW_SIZE,
        src1 in 0..REGISTER_COUNT,
        src2 in 0..REGISTER_COUNT,
        dest in 0..REGISTER_COUNT,
    ) {
        let mut s = Scheduler::new();
        s.enter(slot(sl), Operation::new(reg(src1), reg(src2), reg(dest)));
        s.cycle0();
        let first = s.cycle1();
        if first.contains(slot(sl)) {
            s.cycle0();
            let second = s.cycle1();
            prop_assert!(!second.contains(slot(sl)));
        }
    }
}
