#![forbid(unsafe_code)]

//! Document-level flags with scoped acquisition.
//!
//! Some presentation state is global to the document: the class that hides
//! the native cursor, and the body-level `user-select: none` used while
//! dragging. Controllers never flip these directly. They [`acquire`] a
//! [`FlagGuard`], and dropping the guard restores the value the flag had
//! before acquisition. Every exit path (teardown, drag end, viewport
//! reclassification, panic unwinding) therefore releases the flag.
//!
//! Each flag has at most one holder. A second acquisition while the flag is
//! held fails with [`FlagError::Held`]; callers serialize through the board
//! instead of overwriting each other.
//!
//! [`acquire`]: FlagBoard::acquire

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;

use crate::listener::OwnerId;

bitflags! {
    /// Global document flags.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct DocumentFlags: u8 {
        /// Native cursor hidden at the document root.
        const HIDE_NATIVE_CURSOR = 0b01;
        /// Text selection suppressed on the body.
        const NO_SELECT          = 0b10;
    }
}

/// Errors from flag acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    /// The flag is already held.
    Held {
        /// The requested flag.
        flag: DocumentFlags,
        /// Current holder.
        holder: OwnerId,
    },
    /// Acquisition must name exactly one flag.
    NotSingleFlag(DocumentFlags),
}

impl fmt::Display for FlagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Held { flag, holder } => {
                write!(f, "document flag {flag:?} already held by owner {}", holder.0)
            }
            Self::NotSingleFlag(flags) => {
                write!(f, "expected exactly one document flag, got {flags:?}")
            }
        }
    }
}

impl std::error::Error for FlagError {}

#[derive(Debug, Clone, Copy)]
struct Holder {
    owner: OwnerId,
    previous: bool,
}

#[derive(Debug, Default)]
struct BoardState {
    active: DocumentFlags,
    holders: BTreeMap<DocumentFlags, Holder>,
}

/// Shared handle to the document flags.
///
/// Cloning the board clones the handle, not the state.
#[derive(Debug, Clone, Default)]
pub struct FlagBoard {
    state: Rc<RefCell<BoardState>>,
}

impl FlagBoard {
    /// Create a board with no flags set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board whose baseline already has `flags` set (for example,
    /// from a static stylesheet).
    #[must_use]
    pub fn with_initial(flags: DocumentFlags) -> Self {
        let board = Self::default();
        board.state.borrow_mut().active = flags;
        board
    }

    /// Currently active flags.
    #[must_use]
    pub fn active(&self) -> DocumentFlags {
        self.state.borrow().active
    }

    /// Whether `flag` is currently set.
    #[must_use]
    pub fn is_set(&self, flag: DocumentFlags) -> bool {
        self.active().contains(flag)
    }

    /// The owner currently holding `flag`, if any.
    #[must_use]
    pub fn holder(&self, flag: DocumentFlags) -> Option<OwnerId> {
        self.state.borrow().holders.get(&flag).map(|h| h.owner)
    }

    /// Number of flags currently held.
    #[must_use]
    pub fn held_count(&self) -> usize {
        self.state.borrow().holders.len()
    }

    /// Set `flag` on behalf of `owner` until the returned guard is dropped.
    pub fn acquire(&self, flag: DocumentFlags, owner: OwnerId) -> Result<FlagGuard, FlagError> {
        if flag.bits().count_ones() != 1 {
            return Err(FlagError::NotSingleFlag(flag));
        }
        if let Some(holder) = self.holder(flag) {
            return Err(FlagError::Held { flag, holder });
        }
        let mut state = self.state.borrow_mut();
        let previous = state.active.contains(flag);
        state.holders.insert(flag, Holder { owner, previous });
        state.active.insert(flag);
        tracing::debug!(flag = ?flag, owner = owner.0, "document flag acquired");
        Ok(FlagGuard {
            board: self.clone(),
            flag,
            owner,
        })
    }

    fn release(&self, flag: DocumentFlags, owner: OwnerId) {
        let mut state = self.state.borrow_mut();
        let Some(holder) = state.holders.get(&flag).copied() else {
            return;
        };
        if holder.owner != owner {
            return;
        }
        state.holders.remove(&flag);
        state.active.set(flag, holder.previous);
        tracing::debug!(flag = ?flag, owner = owner.0, "document flag released");
    }
}

/// Scoped hold on one document flag. Dropping it releases the flag.
#[derive(Debug)]
#[must_use = "dropping the guard releases the flag immediately"]
pub struct FlagGuard {
    board: FlagBoard,
    flag: DocumentFlags,
    owner: OwnerId,
}

impl FlagGuard {
    /// The held flag.
    #[must_use]
    pub fn flag(&self) -> DocumentFlags {
        self.flag
    }
}

impl Drop for FlagGuard {
    fn drop(&mut self) {
        self.board.release(self.flag, self.owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    const A: OwnerId = OwnerId(1);
    const B: OwnerId = OwnerId(2);

    #[test]
    fn guard_sets_and_restores() {
        let board = FlagBoard::new();
        {
            let _guard = board.acquire(DocumentFlags::NO_SELECT, A).unwrap();
            assert!(board.is_set(DocumentFlags::NO_SELECT));
            assert_eq!(board.holder(DocumentFlags::NO_SELECT), Some(A));
        }
        assert!(!board.is_set(DocumentFlags::NO_SELECT));
        assert_eq!(board.held_count(), 0);
    }

    #[test]
    fn release_restores_baseline_value() {
        let board = FlagBoard::with_initial(DocumentFlags::HIDE_NATIVE_CURSOR);
        let guard = board.acquire(DocumentFlags::HIDE_NATIVE_CURSOR, A).unwrap();
        drop(guard);
        assert!(board.is_set(DocumentFlags::HIDE_NATIVE_CURSOR));
    }

    #[test]
    fn second_holder_rejected() {
        let board = FlagBoard::new();
        let _guard = board.acquire(DocumentFlags::HIDE_NATIVE_CURSOR, A).unwrap();
        let err = board
            .acquire(DocumentFlags::HIDE_NATIVE_CURSOR, B)
            .unwrap_err();
        assert_eq!(
            err,
            FlagError::Held {
                flag: DocumentFlags::HIDE_NATIVE_CURSOR,
                holder: A
            }
        );
    }

    #[test]
    fn flags_are_independent() {
        let board = FlagBoard::new();
        let cursor = board.acquire(DocumentFlags::HIDE_NATIVE_CURSOR, A).unwrap();
        let select = board.acquire(DocumentFlags::NO_SELECT, B).unwrap();
        assert_eq!(board.active(), DocumentFlags::all());
        drop(cursor);
        assert_eq!(board.active(), DocumentFlags::NO_SELECT);
        drop(select);
        assert!(board.active().is_empty());
    }

    #[test]
    fn multi_flag_acquire_rejected() {
        let board = FlagBoard::new();
        let err = board.acquire(DocumentFlags::all(), A).unwrap_err();
        assert!(matches!(err, FlagError::NotSingleFlag(_)));
        assert!(board.acquire(DocumentFlags::empty(), A).is_err());
    }

    #[traced_test]
    #[test]
    fn acquire_and_release_are_logged() {
        let board = FlagBoard::new();
        drop(board.acquire(DocumentFlags::NO_SELECT, A).unwrap());
        assert!(logs_contain("document flag acquired"));
        assert!(logs_contain("document flag released"));
    }

    #[test]
    fn error_display() {
        let err = FlagError::Held {
            flag: DocumentFlags::NO_SELECT,
            holder: B,
        };
        assert!(err.to_string().contains("owner 2"));
    }
}
