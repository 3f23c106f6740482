#![forbid(unsafe_code)]

//! Frame and timer scheduling with generation tokens.
//!
//! The engine never loops on its own. A controller that wants to run on the
//! next display refresh asks the host for a frame and receives a
//! [`FrameTicket`]; when the host runs that frame it hands the ticket back.
//!
//! # Invariants
//!
//! 1. Every ticket captures the owner's [`Generation`] at request time.
//! 2. An owner bumps its generation on every reset, skip, freeze, or teardown.
//! 3. A ticket whose generation is not current is discarded unapplied, so a
//!    stale continuation can never mutate state that belongs to a newer
//!    instance, even if cancelling the frame raced with the host running it.
//!
//! [`FrameQueue`] and [`TimerQueue`] are the host-side bookkeeping: they hand
//! out ids, support cancellation, and report how many callbacks are still
//! outstanding (which is what leak tests assert on).

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

/// Identifier of a requested animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(u64);

impl FrameId {
    /// Raw numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Identifier of a one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Monotonic version of a controller's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// Raw numeric generation.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Owner-side generation counter.
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
    current: Generation,
}

impl GenerationCounter {
    /// Create a counter at generation zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Generation(0),
        }
    }

    /// The current generation.
    #[inline]
    #[must_use]
    pub const fn current(&self) -> Generation {
        self.current
    }

    /// Invalidate every ticket issued so far and return the new generation.
    pub fn bump(&mut self) -> Generation {
        self.current = Generation(self.current.0.wrapping_add(1));
        self.current
    }

    /// Issue a ticket for `id` stamped with the current generation.
    #[must_use]
    pub const fn ticket(&self, id: FrameId) -> FrameTicket {
        FrameTicket {
            id,
            generation: self.current,
        }
    }

    /// Whether `ticket` was issued in the current generation.
    #[inline]
    #[must_use]
    pub fn is_current(&self, ticket: FrameTicket) -> bool {
        ticket.generation == self.current
    }
}

/// A frame request together with the generation it was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTicket {
    /// The host frame id.
    pub id: FrameId,
    /// Owner generation at request time.
    pub generation: Generation,
}

/// Host-side queue of requested animation frames.
///
/// Frames requested while a batch is running land in the next batch, matching
/// `requestAnimationFrame` semantics.
#[derive(Debug, Clone, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: BTreeSet<FrameId>,
}

impl FrameQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a frame callback.
    pub fn request(&mut self) -> FrameId {
        self.next_id += 1;
        let id = FrameId(self.next_id);
        self.pending.insert(id);
        id
    }

    /// Cancel a pending frame. Returns `false` if it was not pending.
    pub fn cancel(&mut self, id: FrameId) -> bool {
        self.pending.remove(&id)
    }

    /// Take every frame due on this refresh, in request order.
    pub fn take_batch(&mut self) -> Vec<FrameId> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    /// Whether `id` is still pending.
    #[must_use]
    pub fn is_pending(&self, id: FrameId) -> bool {
        self.pending.contains(&id)
    }

    /// Number of outstanding frame requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no frames are outstanding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Host-side one-shot timer queue keyed by deadline.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    next_id: u64,
    pending: BTreeMap<TimerId, Duration>,
}

impl TimerQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timer firing `delay` after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.insert(id, now.saturating_add(delay));
        id
    }

    /// Cancel a timer. Returns `false` if it was not pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id).is_some()
    }

    /// Remove and return every timer whose deadline is at or before `now`,
    /// ordered by deadline, then by id.
    pub fn take_due(&mut self, now: Duration) -> Vec<TimerId> {
        let mut due: Vec<(Duration, TimerId)> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, deadline)| (*deadline, *id))
            .collect();
        due.sort();
        for (_, id) in &due {
            self.pending.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }

    /// Number of outstanding timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no timers are outstanding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn stale_ticket_rejected_after_bump() {
        let mut frames = FrameQueue::new();
        let mut generation = GenerationCounter::new();
        let ticket = generation.ticket(frames.request());
        assert!(generation.is_current(ticket));
        generation.bump();
        assert!(!generation.is_current(ticket));
    }

    #[test]
    fn frame_queue_batches_in_request_order() {
        let mut frames = FrameQueue::new();
        let a = frames.request();
        let b = frames.request();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames.take_batch(), vec![a, b]);
        assert!(frames.is_empty());
    }

    #[test]
    fn cancelled_frame_not_in_batch() {
        let mut frames = FrameQueue::new();
        let a = frames.request();
        let b = frames.request();
        assert!(frames.cancel(a));
        assert!(!frames.cancel(a));
        assert_eq!(frames.take_batch(), vec![b]);
    }

    #[test]
    fn frame_ids_never_reused() {
        let mut frames = FrameQueue::new();
        let a = frames.request();
        frames.take_batch();
        let b = frames.request();
        assert_ne!(a, b);
    }

    #[test]
    fn timers_fire_by_deadline() {
        let mut timers = TimerQueue::new();
        let late = timers.schedule(Duration::ZERO, MS_100 * 3);
        let early = timers.schedule(Duration::ZERO, MS_100);
        assert!(timers.take_due(Duration::from_millis(50)).is_empty());
        assert_eq!(timers.take_due(MS_100 * 5), vec![early, late]);
        assert!(timers.is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule(Duration::ZERO, MS_100);
        assert!(timers.cancel(id));
        assert!(timers.take_due(MS_100).is_empty());
    }
}
