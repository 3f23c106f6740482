#![forbid(unsafe_code)]

//! Host event-listener registry.
//!
//! Controllers never receive events they have not subscribed to: the host
//! routes each [`Event`](crate::event::Event) only to owners holding a
//! listener of the matching [`ListenerKind`]. The registry is also the
//! source of truth for leak checks after unmount.

use std::collections::BTreeMap;

/// DOM-level listener kinds the engine attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerKind {
    /// `pointermove` on the document.
    PointerMove,
    /// `pointerdown` on the document.
    PointerDown,
    /// `pointerup` on the document.
    PointerUp,
    /// `mousedown` on the paginated container.
    MouseDown,
    /// `mousemove` on the window (drag tracking).
    MouseMove,
    /// `mouseup` on the window (drag end).
    MouseUp,
    /// `blur` on the window.
    Blur,
    /// `scroll` on the paginated container.
    Scroll,
    /// `resize` on the window.
    Resize,
    /// `orientationchange` on the window.
    OrientationChange,
    /// `keydown` on the focused text block.
    KeyDown,
}

impl ListenerKind {
    /// Whether this kind observes the pointer (moves, presses, drags).
    #[must_use]
    pub const fn is_pointer(self) -> bool {
        matches!(
            self,
            Self::PointerMove
                | Self::PointerDown
                | Self::PointerUp
                | Self::MouseDown
                | Self::MouseMove
                | Self::MouseUp
        )
    }
}

/// Options passed with `addEventListener`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenerOptions {
    /// Passive listeners promise never to call `preventDefault`.
    pub passive: bool,
}

impl ListenerOptions {
    /// Passive listener options.
    pub const PASSIVE: Self = Self { passive: true };
}

/// Identifier of a component that owns listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerId(pub u32);

/// Identifier of one attached listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// One attached listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    /// The component that attached it.
    pub owner: OwnerId,
    /// Which event it observes.
    pub kind: ListenerKind,
    /// Options it was attached with.
    pub options: ListenerOptions,
}

/// Registry of attached listeners.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    next_id: u64,
    listeners: BTreeMap<ListenerId, Listener>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener.
    pub fn add(&mut self, owner: OwnerId, kind: ListenerKind, options: ListenerOptions) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.insert(
            id,
            Listener {
                owner,
                kind,
                options,
            },
        );
        id
    }

    /// Detach a listener. Returns the removed listener, if it was attached.
    pub fn remove(&mut self, id: ListenerId) -> Option<Listener> {
        self.listeners.remove(&id)
    }

    /// Owners with at least one listener of `kind`, deduplicated, in
    /// attachment order.
    #[must_use]
    pub fn owners_for(&self, kind: ListenerKind) -> Vec<OwnerId> {
        let mut owners = Vec::new();
        for listener in self.listeners.values() {
            if listener.kind == kind && !owners.contains(&listener.owner) {
                owners.push(listener.owner);
            }
        }
        owners
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listeners are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Number of listeners owned by `owner`.
    #[must_use]
    pub fn count_for_owner(&self, owner: OwnerId) -> usize {
        self.listeners.values().filter(|l| l.owner == owner).count()
    }

    /// Number of attached pointer-observing listeners.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.listeners.values().filter(|l| l.kind.is_pointer()).count()
    }

    /// Iterate over attached listeners.
    pub fn iter(&self) -> impl Iterator<Item = (&ListenerId, &Listener)> {
        self.listeners.iter()
    }
}
