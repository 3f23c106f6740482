#![forbid(unsafe_code)]

//! `folio-web` provides the host-driven side of folio.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) pushes events and
//!   viewport changes.
//! - **Deterministic time**: the host advances a monotonic clock explicitly.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! [`WebHost`] implements [`folio_runtime::Host`] by recording every effect
//! instead of touching a DOM. [`step_site::StepSite`] wires the controllers to
//! it and runs them one step at a time. JavaScript glue replays the recorded
//! effects against the real page; tests assert on them directly.

pub mod content;
pub mod step_site;

use core::time::Duration;
use std::fmt;

use folio_core::flags::FlagBoard;
use folio_core::frame::{FrameId, FrameQueue, TimerId, TimerQueue};
use folio_core::listener::{ListenerId, ListenerKind, ListenerOptions, ListenerRegistry, OwnerId};
use folio_runtime::{Host, RevealError};

/// Errors surfaced by the step runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteError {
    /// [`StepSite::init`](step_site::StepSite::init) was called twice.
    AlreadyInitialized,
    /// A step was requested before `init`.
    NotInitialized,
    /// A node index outside the rendered output.
    NodeOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of rendered nodes.
        len: usize,
    },
    /// The about page is not mounted on the current route.
    OverlayNotMounted,
    /// A reveal transition was rejected.
    Reveal(RevealError),
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInitialized => write!(f, "site already initialized"),
            Self::NotInitialized => write!(f, "site not initialized"),
            Self::NodeOutOfRange { index, len } => {
                write!(f, "node {index} out of range (rendered {len})")
            }
            Self::OverlayNotMounted => write!(f, "about page is not mounted"),
            Self::Reveal(err) => write!(f, "reveal: {err}"),
        }
    }
}

impl std::error::Error for SiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Reveal(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RevealError> for SiteError {
    fn from(err: RevealError) -> Self {
        Self::Reveal(err)
    }
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time. Time never moves backwards.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }
}

/// An effect requested through [`Host`] that the page must apply.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEffect {
    /// In-app navigation.
    Navigate(String),
    /// Open a URL in a new browsing context.
    OpenExternal(String),
    /// Set `document.title`.
    SetTitle(String),
    /// Jump the paginated container.
    SetScrollTop(f64),
    /// Smooth-scroll the paginated container.
    SmoothScrollTo(f64),
}

/// Recording host.
///
/// Listeners, frames and timers are kept in registries the caller can inspect
/// and drain; every other effect is appended to an effect log. Navigations
/// are also queued separately so the router still sees them after the page
/// drained the log.
#[derive(Debug, Default)]
pub struct WebHost {
    clock: DeterministicClock,
    listeners: ListenerRegistry,
    frames: FrameQueue,
    timers: TimerQueue,
    flags: FlagBoard,
    scroll_top: f64,
    effects: Vec<HostEffect>,
    routes: Vec<String>,
}

impl WebHost {
    /// Create a host at time zero with nothing attached.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access to the clock.
    pub fn clock_mut(&mut self) -> &mut DeterministicClock {
        &mut self.clock
    }

    /// Attached listeners.
    #[must_use]
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Number of outstanding frame requests.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of scheduled timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Take every outstanding frame request, in request order.
    pub fn take_frames(&mut self) -> Vec<FrameId> {
        self.frames.take_batch()
    }

    /// Take every timer due at the current time, in deadline order.
    pub fn take_due_timers(&mut self) -> Vec<TimerId> {
        self.timers.take_due(self.clock.now())
    }

    /// The browser scrolled the paginated container.
    pub fn observe_scroll(&mut self, top: f64) {
        self.scroll_top = top;
    }

    /// Recorded effects, oldest first.
    #[must_use]
    pub fn effects(&self) -> &[HostEffect] {
        &self.effects
    }

    /// Drain recorded effects.
    pub fn take_effects(&mut self) -> Vec<HostEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Paths navigated to so far and not yet taken by the router, oldest
    /// first. Draining the effect log does not touch this queue.
    #[must_use]
    pub fn navigations(&self) -> &[String] {
        &self.routes
    }

    /// Take queued navigations for the router.
    pub fn take_navigations(&mut self) -> Vec<String> {
        std::mem::take(&mut self.routes)
    }

    /// Whether nothing is attached, scheduled, or held.
    #[must_use]
    pub fn is_quiescent(&self) -> bool {
        self.listeners.is_empty()
            && self.frames.is_empty()
            && self.timers.is_empty()
            && self.flags.held_count() == 0
    }
}

impl Host for WebHost {
    fn now(&self) -> Duration {
        self.clock.now()
    }

    fn add_listener(
        &mut self,
        owner: OwnerId,
        kind: ListenerKind,
        options: ListenerOptions,
    ) -> ListenerId {
        self.listeners.add(owner, kind, options)
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(id);
    }

    fn request_frame(&mut self) -> FrameId {
        self.frames.request()
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.frames.cancel(id);
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        self.timers.schedule(self.clock.now(), delay)
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.cancel(id);
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.scroll_top = top;
        self.effects.push(HostEffect::SetScrollTop(top));
    }

    fn smooth_scroll_to(&mut self, top: f64) {
        self.scroll_top = top;
        self.effects.push(HostEffect::SmoothScrollTo(top));
    }

    fn flags(&self) -> &FlagBoard {
        &self.flags
    }

    fn navigate(&mut self, path: &str) {
        self.effects.push(HostEffect::Navigate(path.to_owned()));
        self.routes.push(path.to_owned());
    }

    fn open_external(&mut self, url: &str) {
        self.effects.push(HostEffect::OpenExternal(url.to_owned()));
    }

    fn set_title(&mut self, title: &str) {
        self.effects.push(HostEffect::SetTitle(title.to_owned()));
    }
}
