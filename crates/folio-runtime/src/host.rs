#![forbid(unsafe_code)]

//! The seam between controllers and the embedding environment.
//!
//! Controllers never reach for globals. Everything with an effect outside
//! their own state (listeners, frames, timers, scrolling, navigation,
//! document flags) goes through a [`Host`]. In production the host is
//! JavaScript glue around the real DOM; in tests it is
//! `folio_web::WebHost`, which records every effect deterministically.

use std::time::Duration;

use folio_core::flags::FlagBoard;
use folio_core::frame::{FrameId, TimerId};
use folio_core::listener::{ListenerId, ListenerKind, ListenerOptions, OwnerId};

/// Effects a controller may request from its environment.
pub trait Host {
    /// Monotonic time since the host's origin.
    fn now(&self) -> Duration;

    /// Attach a listener on behalf of `owner`.
    fn add_listener(
        &mut self,
        owner: OwnerId,
        kind: ListenerKind,
        options: ListenerOptions,
    ) -> ListenerId;

    /// Detach a listener. Detaching an unknown id is a no-op.
    fn remove_listener(&mut self, id: ListenerId);

    /// Request a callback on the next display refresh.
    fn request_frame(&mut self) -> FrameId;

    /// Cancel a frame request. Cancelling an unknown id is a no-op.
    fn cancel_frame(&mut self, id: FrameId);

    /// Schedule a one-shot timer.
    fn set_timeout(&mut self, delay: Duration) -> TimerId;

    /// Cancel a timer. Cancelling an unknown id is a no-op.
    fn clear_timeout(&mut self, id: TimerId);

    /// Current `scrollTop` of the paginated container.
    fn scroll_top(&self) -> f64;

    /// Jump the paginated container to `top` without animation.
    fn set_scroll_top(&mut self, top: f64);

    /// Smoothly scroll the paginated container to `top`.
    fn smooth_scroll_to(&mut self, top: f64);

    /// Document-level flags.
    fn flags(&self) -> &FlagBoard;

    /// Navigate in-app to `path`.
    fn navigate(&mut self, path: &str);

    /// Open `url` in a new browsing context.
    fn open_external(&mut self, url: &str);

    /// Set the document title.
    fn set_title(&mut self, title: &str);
}

/// Listeners attached by one owner, detached together.
#[derive(Debug, Clone)]
pub struct ListenerSet {
    owner: OwnerId,
    ids: Vec<ListenerId>,
}

impl ListenerSet {
    /// An empty set for `owner`.
    #[must_use]
    pub const fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            ids: Vec::new(),
        }
    }

    /// Attach each of `kinds` with `options`.
    pub fn attach<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        kinds: &[ListenerKind],
        options: ListenerOptions,
    ) {
        for &kind in kinds {
            self.ids.push(host.add_listener(self.owner, kind, options));
        }
    }

    /// Detach everything this set attached.
    pub fn detach_all<H: Host + ?Sized>(&mut self, host: &mut H) {
        for id in self.ids.drain(..) {
            host.remove_listener(id);
        }
    }

    /// Whether nothing is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// The owning component.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.owner
    }
}
