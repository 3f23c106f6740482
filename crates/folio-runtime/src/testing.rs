//! Minimal recording host for unit tests.

use std::time::Duration;

use folio_core::flags::FlagBoard;
use folio_core::frame::{FrameId, FrameQueue, TimerId, TimerQueue};
use folio_core::listener::{ListenerId, ListenerKind, ListenerOptions, ListenerRegistry, OwnerId};

use crate::host::Host;

#[derive(Debug, Default)]
pub(crate) struct TestHost {
    pub now: Duration,
    pub listeners: ListenerRegistry,
    pub frames: FrameQueue,
    pub timers: TimerQueue,
    pub flags: FlagBoard,
    pub scroll_top: f64,
    pub smooth_scrolls: Vec<f64>,
    pub navigations: Vec<String>,
    pub external: Vec<String>,
    pub titles: Vec<String>,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn take_frames(&mut self) -> Vec<FrameId> {
        self.frames.take_batch()
    }

    pub fn take_due_timers(&mut self) -> Vec<TimerId> {
        self.timers.take_due(self.now)
    }
}

impl Host for TestHost {
    fn now(&self) -> Duration {
        self.now
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
        self.timers.schedule(self.now, delay)
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.cancel(id);
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.scroll_top = top;
    }

    fn smooth_scroll_to(&mut self, top: f64) {
        self.smooth_scrolls.push(top);
        self.scroll_top = top;
    }

    fn flags(&self) -> &FlagBoard {
        &self.flags
    }

    fn navigate(&mut self, path: &str) {
        self.navigations.push(path.to_owned());
    }

    fn open_external(&mut self, url: &str) {
        self.external.push(url.to_owned());
    }

    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_owned());
    }
}
