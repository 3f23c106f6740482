#![forbid(unsafe_code)]

//! Step-based site runner.
//!
//! [`StepSite`] owns a [`WebHost`] and the three page controllers and drives
//! them without threads or blocking. The host (JavaScript) controls the loop:
//!
//! 1. Push events via [`StepSite::push_event`].
//! 2. Advance time via [`StepSite::advance_time`].
//! 3. Call [`StepSite::step`] once per display refresh.
//! 4. Apply [`WebHost::take_effects`] and read [`StepSite::nodes`] /
//!    [`StepSite::cursor_proxy`] to paint.
//!
//! Events reach a controller only through a listener it attached: a
//! controller that detached everything sees nothing, which is what the
//! desktop/mobile gating tests rely on.
//!
//! # Example
//!
//! ```
//! use core::time::Duration;
//! use folio_runtime::SiteConfig;
//! use folio_web::step_site::StepSite;
//!
//! let mut site = StepSite::new(SiteConfig::default(), 1440, 900);
//! site.init().unwrap();
//! site.set_route("/about");
//!
//! site.advance_time(Duration::from_millis(63));
//! site.step().unwrap();
//! assert_eq!(site.visible_text(), "i'm tony ");
//! ```

use core::time::Duration;
use std::collections::VecDeque;

use folio_core::event::{Event, PointerEventKind};
use folio_core::geometry::{Viewport, ViewportClass};
use folio_core::listener::{ListenerKind, OwnerId};
use folio_runtime::{
    Activation, ClickOutcome, CursorProxy, CursorVisibility, LinksList, OverlayController,
    PageState, PaginationController, PointerController, RenderNode, SiteConfig,
};

use crate::content::{ABOUT_ROUTE, ABOUT_TEXT, ABOUT_TITLE, about_keywords};
use crate::{SiteError, WebHost};

/// Owner id of the about page controller.
pub const OVERLAY_OWNER: OwnerId = OwnerId(1);
/// Owner id of the pagination controller.
pub const PAGINATION_OWNER: OwnerId = OwnerId(2);
/// Owner id of the cursor controller.
pub const CURSOR_OWNER: OwnerId = OwnerId(3);

/// Result of a single [`StepSite::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the site is still running (false after teardown).
    pub running: bool,
    /// Number of events processed during this step.
    pub events_processed: u32,
    /// Number of timers that fired.
    pub timers_fired: u32,
    /// Number of frame callbacks delivered.
    pub frames_run: u32,
    /// Current step index (monotonically increasing).
    pub frame_idx: u64,
}

/// Host-driven, non-blocking runner for the whole site.
#[derive(Debug)]
pub struct StepSite {
    host: WebHost,
    config: SiteConfig,
    route: String,
    viewport: Viewport,
    overlay: OverlayController,
    pagination: PaginationController,
    pointer: PointerController,
    queue: VecDeque<Event>,
    initialized: bool,
    running: bool,
    frame_idx: u64,
}

impl StepSite {
    /// Create a site for a `width` x `height` viewport at route `/`.
    #[must_use]
    pub fn new(config: SiteConfig, width: u32, height: u32) -> Self {
        let overlay_config = if config.overlay.title.is_some() {
            config.overlay.clone()
        } else {
            config.overlay.clone().with_title(ABOUT_TITLE)
        };
        Self {
            host: WebHost::new(),
            overlay: OverlayController::new(
                OVERLAY_OWNER,
                overlay_config,
                config.reveal(),
                config.device,
                about_keywords(),
            ),
            pagination: PaginationController::new(PAGINATION_OWNER, config.pagination()),
            pointer: PointerController::new(CURSOR_OWNER, config.cursor()),
            config,
            route: "/".to_owned(),
            viewport: Viewport::new(width, height),
            queue: VecDeque::new(),
            initialized: false,
            running: true,
            frame_idx: 0,
        }
    }

    /// Mount the controllers for the current route and viewport.
    ///
    /// Must be called exactly once before [`step`](Self::step).
    pub fn init(&mut self) -> Result<(), SiteError> {
        if self.initialized {
            return Err(SiteError::AlreadyInitialized);
        }
        self.initialized = true;
        self.pointer.mount(self.viewport, &mut self.host);
        self.pagination
            .mount(&self.route, self.viewport, &mut self.host);
        if self.route == ABOUT_ROUTE {
            self.overlay.mount(ABOUT_TEXT, &mut self.host);
        }
        tracing::debug!(
            route = %self.route,
            width = self.viewport.width,
            height = self.viewport.height,
            "site initialized"
        );
        Ok(())
    }

    /// Queue a host event for the next [`step`](Self::step).
    pub fn push_event(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Advance the deterministic clock by `dt`.
    pub fn advance_time(&mut self, dt: Duration) {
        self.host.clock_mut().advance(dt);
    }

    /// Set the deterministic clock to an absolute time.
    pub fn set_time(&mut self, now: Duration) {
        self.host.clock_mut().set(now);
    }

    /// Resize the viewport. Processed on the next [`step`](Self::step).
    pub fn resize(&mut self, width: u32, height: u32) {
        self.push_event(Event::Resize { width, height });
    }

    /// Process queued events, due timers, and one batch of frames.
    pub fn step(&mut self) -> Result<StepResult, SiteError> {
        if !self.initialized {
            return Err(SiteError::NotInitialized);
        }
        if !self.running {
            return Ok(self.result(0, 0, 0));
        }

        let mut events_processed: u32 = 0;
        while let Some(event) = self.queue.pop_front() {
            events_processed += 1;
            self.handle_event(&event);
        }

        let mut timers_fired: u32 = 0;
        for id in self.host.take_due_timers() {
            timers_fired += 1;
            self.overlay.on_timer(id, &mut self.host);
        }

        let mut frames_run: u32 = 0;
        for id in self.host.take_frames() {
            frames_run += 1;
            if !self.overlay.on_frame(id, &mut self.host) {
                self.pagination.on_frame(id, &mut self.host);
            }
        }

        self.follow_navigations();
        self.frame_idx += 1;
        Ok(self.result(events_processed, timers_fired, frames_run))
    }

    /// Change route: mounts or unmounts the about page and re-gates
    /// pagination.
    pub fn set_route(&mut self, route: &str) {
        if route == self.route {
            return;
        }
        let was_about = self.route == ABOUT_ROUTE;
        self.route = route.to_owned();
        if was_about {
            self.overlay.unmount(&mut self.host);
        }
        if self.initialized && self.running {
            if self.route == ABOUT_ROUTE {
                self.overlay.mount(ABOUT_TEXT, &mut self.host);
            }
            self.pagination.set_route(&self.route, &mut self.host);
        }
        tracing::debug!(route = %self.route, "route changed");
    }

    /// Click on the about paragraph.
    pub fn click_text(&mut self) -> Result<ClickOutcome, SiteError> {
        self.require_overlay()?;
        Ok(self.overlay.click_text(&mut self.host))
    }

    /// Activate the rendered node at `index`.
    pub fn activate(&mut self, index: usize) -> Result<Activation, SiteError> {
        self.require_overlay()?;
        let len = self.overlay.nodes().len();
        if index >= len {
            return Err(SiteError::NodeOutOfRange { index, len });
        }
        Ok(self.overlay.activate(index, &mut self.host))
    }

    /// Activate a links list entry by keyword declaration index.
    pub fn activate_link(&mut self, keyword_index: usize) -> Result<Activation, SiteError> {
        self.require_overlay()?;
        Ok(self.overlay.activate_link(keyword_index, &mut self.host))
    }

    /// Pause the about page reveal.
    pub fn pause_reveal(&mut self) -> Result<(), SiteError> {
        self.require_overlay()?;
        self.overlay.pause(&mut self.host)?;
        Ok(())
    }

    /// Resume the about page reveal.
    pub fn resume_reveal(&mut self) -> Result<(), SiteError> {
        self.require_overlay()?;
        self.overlay.resume(&mut self.host)?;
        Ok(())
    }

    /// Rendered about paragraph. Empty when the about page is not mounted.
    #[must_use]
    pub fn nodes(&self) -> Vec<RenderNode<'_>> {
        if self.overlay.is_mounted() {
            self.overlay.nodes()
        } else {
            Vec::new()
        }
    }

    /// Displayed about text.
    #[must_use]
    pub fn visible_text(&self) -> &str {
        if self.overlay.is_mounted() {
            self.overlay.reveal().visible_text()
        } else {
            ""
        }
    }

    /// Links list for the current viewport.
    #[must_use]
    pub fn links_list(&self) -> LinksList<'_> {
        self.overlay.links_list(self.viewport)
    }

    /// Cursor proxy to draw, if any.
    #[must_use]
    pub fn cursor_proxy(&self) -> Option<CursorProxy> {
        self.pointer.proxy()
    }

    /// Writer for the shared cursor visibility flag.
    #[must_use]
    pub fn cursor_visibility(&self) -> CursorVisibility {
        self.pointer.visibility()
    }

    /// Pagination state.
    #[must_use]
    pub fn page_state(&self) -> PageState {
        self.pagination.page_state()
    }

    /// Current layout class.
    #[must_use]
    pub fn viewport_class(&self) -> ViewportClass {
        self.config.viewport.classify(self.viewport)
    }

    /// Unmount everything. The site stops processing steps.
    pub fn teardown(&mut self) {
        self.overlay.unmount(&mut self.host);
        self.pagination.unmount(&mut self.host);
        self.pointer.unmount(&mut self.host);
        self.queue.clear();
        self.running = false;
        tracing::debug!("site torn down");
    }

    /// Current route.
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Access the host.
    #[must_use]
    pub fn host(&self) -> &WebHost {
        &self.host
    }

    /// Mutably access the host.
    pub fn host_mut(&mut self) -> &mut WebHost {
        &mut self.host
    }

    /// Access the about page controller.
    #[must_use]
    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    /// Access the pagination controller.
    #[must_use]
    pub fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    /// Access the cursor controller.
    #[must_use]
    pub fn pointer(&self) -> &PointerController {
        &self.pointer
    }

    /// Whether the site is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current step index.
    #[must_use]
    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    // --- Private helpers ---

    fn handle_event(&mut self, event: &Event) {
        match *event {
            Event::Resize { width, height } | Event::OrientationChange { width, height } => {
                self.viewport = Viewport::new(width, height);
            }
            Event::Scroll { top } => self.host.observe_scroll(top),
            _ => {}
        }

        let mut owners: Vec<OwnerId> = Vec::new();
        for &kind in listener_kinds(event) {
            for owner in self.host.listeners().owners_for(kind) {
                if !owners.contains(&owner) {
                    owners.push(owner);
                }
            }
        }
        for owner in owners {
            self.dispatch(owner, event);
        }
    }

    fn dispatch(&mut self, owner: OwnerId, event: &Event) {
        match owner {
            OVERLAY_OWNER => {
                if let Event::Key(key) = event {
                    self.overlay.on_key(key, &mut self.host);
                }
            }
            PAGINATION_OWNER => {
                self.pagination.on_event(event, &mut self.host);
            }
            CURSOR_OWNER => {
                self.pointer.on_event(event, &mut self.host);
            }
            _ => {
                tracing::trace!(owner = owner.0, "event for unknown owner dropped");
            }
        }
    }

    fn follow_navigations(&mut self) {
        for path in self.host.take_navigations() {
            self.set_route(&path);
        }
    }

    fn require_overlay(&self) -> Result<(), SiteError> {
        if !self.initialized {
            return Err(SiteError::NotInitialized);
        }
        if !self.overlay.is_mounted() {
            return Err(SiteError::OverlayNotMounted);
        }
        Ok(())
    }

    fn result(&self, events_processed: u32, timers_fired: u32, frames_run: u32) -> StepResult {
        StepResult {
            running: self.running,
            events_processed,
            timers_fired,
            frames_run,
            frame_idx: self.frame_idx,
        }
    }
}

/// Listener kinds that observe `event`.
fn listener_kinds(event: &Event) -> &'static [ListenerKind] {
    match event {
        Event::Key(_) => &[ListenerKind::KeyDown],
        Event::Pointer(pointer) => match pointer.kind {
            PointerEventKind::Down(_) => &[ListenerKind::PointerDown, ListenerKind::MouseDown],
            PointerEventKind::Up(_) => &[ListenerKind::PointerUp, ListenerKind::MouseUp],
            PointerEventKind::Drag(_) | PointerEventKind::Moved => {
                &[ListenerKind::PointerMove, ListenerKind::MouseMove]
            }
        },
        Event::Scroll { .. } => &[ListenerKind::Scroll],
        Event::Resize { .. } => &[ListenerKind::Resize],
        Event::OrientationChange { .. } => &[ListenerKind::OrientationChange],
        Event::Focus(false) => &[ListenerKind::Blur],
        Event::Focus(true) => &[],
    }
}
