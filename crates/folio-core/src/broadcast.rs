#![forbid(unsafe_code)]

//! Single-value broadcast cell with last-write-wins semantics.
//!
//! Any clone of a [`Broadcast`] may write; every clone observes the latest
//! value. There is no stacking or reference counting: two writers racing
//! leave whichever wrote last.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug)]
struct Slot<T: Copy> {
    value: Cell<T>,
}

/// Shared, single-threaded broadcast value.
#[derive(Debug)]
pub struct Broadcast<T: Copy> {
    slot: Rc<Slot<T>>,
}

impl<T: Copy> Clone for Broadcast<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: Copy> Broadcast<T> {
    /// Create a broadcast cell holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            slot: Rc::new(Slot {
                value: Cell::new(initial),
            }),
        }
    }

    /// Current value.
    #[inline]
    #[must_use]
    pub fn get(&self) -> T {
        self.slot.value.get()
    }

    /// Overwrite the value.
    pub fn set(&self, value: T) {
        self.slot.value.set(value);
    }
}

impl<T: Copy + Default> Default for Broadcast<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_value() {
        let a = Broadcast::new(true);
        let b = a.clone();
        b.set(false);
        assert!(!a.get());
        drop(b);
        assert!(!a.get());
    }

    #[test]
    fn last_write_wins() {
        let cursor = Broadcast::new(true);
        let video = cursor.clone();
        let gallery = cursor.clone();
        video.set(false);
        gallery.set(true);
        assert!(cursor.get());
        video.set(false);
        assert!(!gallery.get());
    }
}
