#![forbid(unsafe_code)]

//! Custom cursor controller.
//!
//! On desktop-class viewports the native cursor is hidden (through the
//! `HIDE_NATIVE_CURSOR` document flag) and replaced by a proxy drawn at the
//! tracked pointer position. Pointer listeners are passive; the controller
//! only observes.
//!
//! Cursor visibility is a [`Broadcast<bool>`]: any component holding a
//! [`CursorVisibility`] handle may show or hide the proxy, and the last write
//! wins. A video player that hides the cursor on enter and shows it on leave
//! is the typical writer.
//!
//! Mobile-class viewports get nothing: no pointer listeners, no proxy, and the
//! native cursor is restored.

use folio_core::broadcast::Broadcast;
use folio_core::event::{Event, PointerEventKind};
use folio_core::flags::{DocumentFlags, FlagGuard};
use folio_core::geometry::{Point, Viewport};
use folio_core::listener::{ListenerKind, ListenerOptions, OwnerId};

use crate::config::CursorConfig;
use crate::host::{Host, ListenerSet};

const WATCHED: [ListenerKind; 2] = [ListenerKind::Resize, ListenerKind::OrientationChange];

const POINTER: [ListenerKind; 3] = [
    ListenerKind::PointerMove,
    ListenerKind::PointerDown,
    ListenerKind::PointerUp,
];

/// Pointer state as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorState {
    /// Last pointer position.
    pub position: Point,
    /// Whether a button is held.
    pub pressed: bool,
    /// Shared visibility flag.
    pub visible: bool,
}

/// What the host should draw in place of the native cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorProxy {
    /// Draw position.
    pub position: Point,
    /// Pressed styling.
    pub pressed: bool,
}

/// Writer handle for the shared cursor visibility flag.
#[derive(Debug, Clone)]
pub struct CursorVisibility {
    cell: Broadcast<bool>,
}

impl CursorVisibility {
    /// Show or hide the cursor proxy. Last write wins.
    pub fn set(&self, visible: bool) {
        self.cell.set(visible);
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> bool {
        self.cell.get()
    }
}

/// Tracks the pointer and owns the cursor proxy.
#[derive(Debug)]
pub struct PointerController {
    config: CursorConfig,
    watchers: ListenerSet,
    listeners: ListenerSet,
    viewport: Viewport,
    position: Point,
    pressed: bool,
    visible: Broadcast<bool>,
    hide_native: Option<FlagGuard>,
}

impl PointerController {
    /// Create an unmounted controller.
    #[must_use]
    pub fn new(owner: OwnerId, config: CursorConfig) -> Self {
        Self {
            visible: Broadcast::new(config.initially_visible),
            config,
            watchers: ListenerSet::new(owner),
            listeners: ListenerSet::new(owner),
            viewport: Viewport::default(),
            position: Point::default(),
            pressed: false,
            hide_native: None,
        }
    }

    /// Start watching the viewport; enable if desktop class.
    pub fn mount<H: Host + ?Sized>(&mut self, viewport: Viewport, host: &mut H) {
        if !self.watchers.is_empty() {
            self.unmount(host);
        }
        self.watchers.attach(host, &WATCHED, ListenerOptions::PASSIVE);
        self.viewport = viewport;
        self.refresh(host);
    }

    /// Handle a routed host event. Returns `true` if it was consumed.
    pub fn on_event<H: Host + ?Sized>(&mut self, event: &Event, host: &mut H) -> bool {
        match *event {
            Event::Resize { width, height } | Event::OrientationChange { width, height } => {
                self.viewport = Viewport::new(width, height);
                self.refresh(host);
                true
            }
            Event::Pointer(pointer) if self.is_enabled() => {
                self.position = pointer.position();
                match pointer.kind {
                    PointerEventKind::Down(_) => self.pressed = true,
                    PointerEventKind::Up(_) => self.pressed = false,
                    PointerEventKind::Drag(_) | PointerEventKind::Moved => {}
                }
                true
            }
            _ => false,
        }
    }

    /// A writer for the shared visibility flag.
    #[must_use]
    pub fn visibility(&self) -> CursorVisibility {
        CursorVisibility {
            cell: self.visible.clone(),
        }
    }

    /// The proxy to draw, if any.
    ///
    /// `None` on mobile-class viewports and while visibility is off.
    #[must_use]
    pub fn proxy(&self) -> Option<CursorProxy> {
        (self.is_enabled() && self.visible.get()).then_some(CursorProxy {
            position: self.position,
            pressed: self.pressed,
        })
    }

    /// Observed pointer state.
    #[must_use]
    pub fn state(&self) -> CursorState {
        CursorState {
            position: self.position,
            pressed: self.pressed,
            visible: self.visible.get(),
        }
    }

    /// Whether the custom cursor is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Detach everything and restore the native cursor.
    pub fn unmount<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.disable(host);
        self.watchers.detach_all(host);
        tracing::debug!(owner = self.watchers.owner().0, "cursor unmounted");
    }

    fn refresh<H: Host + ?Sized>(&mut self, host: &mut H) {
        let desktop = self.config.viewport.classify(self.viewport).is_desktop();
        match (self.is_enabled(), desktop) {
            (false, true) => self.enable(host),
            (true, false) => self.disable(host),
            _ => {}
        }
    }

    fn enable<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.listeners.attach(host, &POINTER, ListenerOptions::PASSIVE);
        let owner = self.listeners.owner();
        self.hide_native = match host.flags().acquire(DocumentFlags::HIDE_NATIVE_CURSOR, owner) {
            Ok(guard) => Some(guard),
            Err(err) => {
                tracing::warn!(error = %err, "native cursor left visible");
                None
            }
        };
        tracing::debug!(width = self.viewport.width, "cursor enabled");
    }

    fn disable<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.listeners.detach_all(host);
        self.pressed = false;
        if self.hide_native.take().is_some() {
            tracing::debug!(width = self.viewport.width, "cursor disabled");
        }
    }
}
