#![forbid(unsafe_code)]

//! Scroll pagination for the works page.
//!
//! On desktop-class viewports the paginated route is laid out as a stack of
//! viewport-height pages. Free scrolling is allowed; once per frame the
//! controller rounds the scroll position to the nearest page and, if that is
//! a different page than last time, smooth-scrolls onto its boundary.
//!
//! Pressing the primary button on the container and dragging scrolls it 1:1
//! (dragging down moves the content down, so `scroll_top` decreases). Body
//! text selection is suppressed through the `NO_SELECT` document flag for the
//! duration of the drag.
//!
//! # Gating
//!
//! | viewport | route          | listeners                      |
//! |----------|----------------|--------------------------------|
//! | mobile   | any            | resize, orientationchange      |
//! | desktop  | other          | resize, orientationchange      |
//! | desktop  | paginated      | + scroll, mouse, blur          |
//!
//! Reclassification happens on every resize and orientation change.

use folio_core::event::{Event, PointerButton, PointerEvent, PointerEventKind};
use folio_core::flags::{DocumentFlags, FlagGuard};
use folio_core::frame::{FrameId, FrameTicket, GenerationCounter};
use folio_core::geometry::Viewport;
use folio_core::listener::{ListenerKind, ListenerOptions, OwnerId};

use crate::config::PaginationConfig;
use crate::host::{Host, ListenerSet};

const WATCHED: [ListenerKind; 2] = [ListenerKind::Resize, ListenerKind::OrientationChange];

const PASSIVE_ACTIVE: [ListenerKind; 1] = [ListenerKind::Scroll];

const DRAG: [ListenerKind; 4] = [
    ListenerKind::MouseDown,
    ListenerKind::MouseMove,
    ListenerKind::MouseUp,
    ListenerKind::Blur,
];

/// Snapshot of pagination state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageState {
    /// Page last snapped to.
    pub current_page: usize,
    /// Page height in CSS pixels.
    pub viewport_height_px: f64,
}

#[derive(Debug)]
struct DragState {
    last_y: f64,
    _no_select: Option<FlagGuard>,
}

/// Page of a scroll position: the nearest boundary.
#[must_use]
pub fn page_for(scroll_top: f64, viewport_height: f64) -> usize {
    if viewport_height <= 0.0 || !scroll_top.is_finite() {
        return 0;
    }
    (scroll_top / viewport_height).round().max(0.0) as usize
}

/// Snaps the paginated container to whole pages.
#[derive(Debug)]
pub struct PaginationController {
    config: PaginationConfig,
    watchers: ListenerSet,
    listeners: ListenerSet,
    route: String,
    viewport: Viewport,
    active: bool,
    current_page: usize,
    generation: GenerationCounter,
    pending: Option<FrameTicket>,
    drag: Option<DragState>,
}

impl PaginationController {
    /// Create an unmounted controller.
    #[must_use]
    pub fn new(owner: OwnerId, config: PaginationConfig) -> Self {
        Self {
            config,
            watchers: ListenerSet::new(owner),
            listeners: ListenerSet::new(owner),
            route: String::new(),
            viewport: Viewport::new(0, 0),
            active: false,
            current_page: 0,
            generation: GenerationCounter::new(),
            pending: None,
            drag: None,
        }
    }

    /// Start watching the viewport and activate if the route and size allow.
    pub fn mount<H: Host + ?Sized>(&mut self, route: &str, viewport: Viewport, host: &mut H) {
        if !self.watchers.is_empty() {
            self.unmount(host);
        }
        self.watchers
            .attach(host, &WATCHED, ListenerOptions::PASSIVE);
        self.route = route.to_owned();
        self.viewport = viewport;
        self.refresh(host);
    }

    /// The application route changed.
    pub fn set_route<H: Host + ?Sized>(&mut self, route: &str, host: &mut H) {
        self.route = route.to_owned();
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
            Event::Scroll { .. } => self.on_scroll(host),
            Event::Pointer(pointer) => self.on_pointer(&pointer, host),
            Event::Focus(false) => self.end_drag(),
            _ => false,
        }
    }

    /// Handle a frame callback. Returns `false` if the frame is not ours.
    pub fn on_frame<H: Host + ?Sized>(&mut self, id: FrameId, host: &mut H) -> bool {
        let Some(ticket) = self.pending.filter(|t| t.id == id) else {
            return false;
        };
        self.pending = None;
        if self.generation.is_current(ticket) && self.active {
            self.snap(host);
        }
        true
    }

    /// Detach everything.
    pub fn unmount<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.deactivate(host);
        self.watchers.detach_all(host);
        tracing::debug!(owner = self.watchers.owner().0, "pagination unmounted");
    }

    /// Whether pagination is currently running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Page last snapped to.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Current page state.
    #[must_use]
    pub fn page_state(&self) -> PageState {
        PageState {
            current_page: self.current_page,
            viewport_height_px: self.viewport.height_px(),
        }
    }

    /// Whether a snap frame is outstanding.
    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    fn refresh<H: Host + ?Sized>(&mut self, host: &mut H) {
        let desktop = self.config.viewport.classify(self.viewport).is_desktop();
        let wanted = desktop && self.route == self.config.paginated_route;
        match (self.active, wanted) {
            (false, true) => self.activate(host),
            (true, false) => self.deactivate(host),
            _ => {}
        }
    }

    fn activate<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.listeners
            .attach(host, &PASSIVE_ACTIVE, ListenerOptions::PASSIVE);
        self.listeners
            .attach(host, &DRAG, ListenerOptions::default());
        self.current_page = 0;
        self.active = true;
        tracing::debug!(
            route = %self.route,
            width = self.viewport.width,
            height = self.viewport.height,
            "pagination active"
        );
    }

    fn deactivate<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.end_drag();
        if let Some(ticket) = self.pending.take() {
            host.cancel_frame(ticket.id);
        }
        self.generation.bump();
        self.listeners.detach_all(host);
        if self.active {
            tracing::debug!(route = %self.route, "pagination inactive");
        }
        self.active = false;
    }

    fn on_scroll<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if !self.active {
            return false;
        }
        if self.pending.is_none() {
            let id = host.request_frame();
            self.pending = Some(self.generation.ticket(id));
        }
        true
    }

    fn snap<H: Host + ?Sized>(&mut self, host: &mut H) {
        let height = self.viewport.height_px();
        if height <= 0.0 {
            return;
        }
        let target = page_for(host.scroll_top(), height);
        if target != self.current_page {
            tracing::debug!(from = self.current_page, to = target, "page snap");
            host.smooth_scroll_to(target as f64 * height);
            self.current_page = target;
        }
    }

    fn on_pointer<H: Host + ?Sized>(&mut self, pointer: &PointerEvent, host: &mut H) -> bool {
        if !self.active {
            return false;
        }
        match pointer.kind {
            PointerEventKind::Down(PointerButton::Primary) => {
                // A missed release leaves the old drag open; its guard must go
                // before the new acquire.
                self.end_drag();
                let owner = self.listeners.owner();
                let no_select = match host.flags().acquire(DocumentFlags::NO_SELECT, owner) {
                    Ok(guard) => Some(guard),
                    Err(err) => {
                        tracing::warn!(error = %err, "drag without selection suppression");
                        None
                    }
                };
                self.drag = Some(DragState {
                    last_y: pointer.y,
                    _no_select: no_select,
                });
                true
            }
            PointerEventKind::Drag(_) => {
                let Some(drag) = self.drag.as_mut() else {
                    return false;
                };
                let dy = pointer.y - drag.last_y;
                drag.last_y = pointer.y;
                let top = (host.scroll_top() - dy).max(0.0);
                host.set_scroll_top(top);
                true
            }
            PointerEventKind::Moved | PointerEventKind::Up(_) => self.end_drag(),
            PointerEventKind::Down(_) => false,
        }
    }

    fn end_drag(&mut self) -> bool {
        if self.drag.take().is_some() {
            tracing::trace!("drag ended");
            true
        } else {
            false
        }
    }
}
