//! Property-based invariant tests for frame/timer scheduling and document flags.
//!
//! 1. Every scheduled, uncancelled timer fires exactly once.
//! 2. Timers never fire before their deadline.
//! 3. Frame batches contain exactly the uncancelled requests.
//! 4. Any interleaving of flag acquisitions and releases restores the baseline.

use std::collections::BTreeSet;
use std::time::Duration;

use folio_core::flags::{DocumentFlags, FlagBoard};
use folio_core::frame::{FrameQueue, TimerQueue};
use folio_core::listener::OwnerId;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum TimerOp {
    Schedule(u64),
    Cancel(usize),
    Advance(u64),
}

fn timer_op() -> impl Strategy<Value = TimerOp> {
    prop_oneof![
        (0u64..500).prop_map(TimerOp::Schedule),
        (0usize..16).prop_map(TimerOp::Cancel),
        (0u64..200).prop_map(TimerOp::Advance),
    ]
}

proptest! {
    #[test]
    fn timers_fire_once_and_not_early(ops in proptest::collection::vec(timer_op(), 1..64)) {
        let mut timers = TimerQueue::new();
        let mut now = Duration::ZERO;
        let mut scheduled = Vec::new();
        let mut cancelled = BTreeSet::new();
        let mut fired = Vec::new();

        for op in ops {
            match op {
                TimerOp::Schedule(ms) => {
                    let deadline = now + Duration::from_millis(ms);
                    scheduled.push((timers.schedule(now, Duration::from_millis(ms)), deadline));
                }
                TimerOp::Cancel(idx) => {
                    if let Some((id, _)) = scheduled.get(idx) {
                        if timers.cancel(*id) {
                            cancelled.insert(*id);
                        }
                    }
                }
                TimerOp::Advance(ms) => {
                    now += Duration::from_millis(ms);
                    for id in timers.take_due(now) {
                        let deadline = scheduled
                            .iter()
                            .find(|(sid, _)| *sid == id)
                            .map(|(_, d)| *d);
                        prop_assert!(deadline.is_some_and(|d| d <= now));
                        fired.push(id);
                    }
                }
            }
        }
        fired.extend(timers.take_due(Duration::MAX));

        let unique: BTreeSet<_> = fired.iter().copied().collect();
        prop_assert_eq!(unique.len(), fired.len(), "a timer fired twice");
        for (id, _) in &scheduled {
            prop_assert_eq!(unique.contains(id), !cancelled.contains(id));
        }
        prop_assert!(timers.is_empty());
    }

    #[test]
    fn frame_batch_matches_uncancelled(cancel_mask in proptest::collection::vec(any::<bool>(), 0..32)) {
        let mut frames = FrameQueue::new();
        let ids: Vec<_> = cancel_mask.iter().map(|_| frames.request()).collect();
        let mut expected = Vec::new();
        for (id, cancel) in ids.iter().zip(&cancel_mask) {
            if *cancel {
                frames.cancel(*id);
            } else {
                expected.push(*id);
            }
        }
        prop_assert_eq!(frames.len(), expected.len());
        prop_assert_eq!(frames.take_batch(), expected);
        prop_assert!(frames.is_empty());
    }

    #[test]
    fn flag_interleavings_restore_baseline(
        baseline in 0u8..4,
        steps in proptest::collection::vec((any::<bool>(), 0u32..3, any::<bool>()), 0..40),
    ) {
        let baseline = DocumentFlags::from_bits_truncate(baseline);
        let board = FlagBoard::with_initial(baseline);
        let mut guards = Vec::new();

        for (cursor_flag, owner, release) in steps {
            let flag = if cursor_flag {
                DocumentFlags::HIDE_NATIVE_CURSOR
            } else {
                DocumentFlags::NO_SELECT
            };
            if release && !guards.is_empty() {
                guards.remove(0);
            } else if let Ok(guard) = board.acquire(flag, OwnerId(owner)) {
                guards.push(guard);
            }
            for guard in &guards {
                prop_assert!(board.is_set(guard.flag()));
            }
        }
        drop(guards);
        prop_assert_eq!(board.active(), baseline);
        prop_assert_eq!(board.held_count(), 0);
    }
}
