#![forbid(unsafe_code)]

//! Keyword overlay rendering and the about-page controller.
//!
//! [`render`] turns the animator's displayed prefix into [`RenderNode`]s.
//! Keywords only become links once the reveal is complete (or frozen) and no
//! exit transition is running; before that they render as plain text, so the
//! output always concatenates back to the displayed prefix.
//!
//! [`OverlayController`] owns an animator, the keyword table, and the page's
//! interaction rules: click to skip, touch-only links list, delayed exit on
//! in-app navigation.

use std::time::Duration;

use folio_core::event::KeyEvent;
use folio_core::frame::{FrameId, TimerId};
use folio_core::geometry::{DeviceClass, Orientation, Viewport};
use folio_core::listener::{ListenerKind, ListenerOptions, OwnerId};
use folio_text::{KeywordAction, KeywordDescriptor, KeywordSet, SegmentKind, segment};

use crate::config::{OverlayConfig, RevealConfig};
use crate::host::{Host, ListenerSet};
use crate::reveal::{RevealAnimator, RevealError};

/// An interactive keyword in rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkNode<'a> {
    /// Source text of the match, original casing.
    pub content: &'a str,
    /// Matched descriptor.
    pub descriptor: &'a KeywordDescriptor,
    /// Declaration index of the descriptor.
    pub keyword_index: usize,
}

impl LinkNode<'_> {
    /// Whether the host should open this link in a new browsing context.
    #[must_use]
    pub fn opens_new_context(&self) -> bool {
        matches!(self.descriptor.action, KeywordAction::OpenExternal(_))
    }
}

/// One piece of rendered overlay text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderNode<'a> {
    /// Plain text.
    Text(&'a str),
    /// Interactive keyword.
    Link(LinkNode<'a>),
}

impl<'a> RenderNode<'a> {
    /// Text carried by the node.
    #[must_use]
    pub fn content(&self) -> &'a str {
        match self {
            Self::Text(text) => text,
            Self::Link(link) => link.content,
        }
    }

    /// The link, for interactive nodes.
    #[must_use]
    pub fn link(&self) -> Option<&LinkNode<'a>> {
        match self {
            Self::Link(link) => Some(link),
            Self::Text(_) => None,
        }
    }
}

/// Render the displayed prefix of `reveal`.
///
/// Empty text nodes are omitted; empty source text renders nothing.
#[must_use]
pub fn render<'a>(
    reveal: &'a RevealAnimator,
    keywords: &'a KeywordSet,
    exit_in_flight: bool,
) -> Vec<RenderNode<'a>> {
    let interactive = (reveal.is_complete() || reveal.is_frozen()) && !exit_in_flight;
    segment(reveal.visible_text(), keywords)
        .into_iter()
        .filter(|seg| !seg.content.is_empty())
        .map(|seg| match seg.kind {
            SegmentKind::Keyword { descriptor, index } if interactive => {
                RenderNode::Link(LinkNode {
                    content: seg.content,
                    descriptor,
                    keyword_index: index,
                })
            }
            _ => RenderNode::Text(seg.content),
        })
        .collect()
}

/// Which view of the overlay is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayView {
    /// The revealed paragraph.
    #[default]
    Text,
    /// The list of link keywords (touch devices only).
    LinksList,
}

/// Links list arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinksLayout {
    /// One link per row.
    Stacked,
    /// Links flow into rows; used for touch devices held in landscape.
    Wrapped,
}

/// One entry of the links list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkEntry<'a> {
    /// Declaration index, for [`OverlayController::activate_link`].
    pub keyword_index: usize,
    /// The keyword.
    pub descriptor: &'a KeywordDescriptor,
}

/// Link keywords in declaration order, with their layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinksList<'a> {
    /// Arrangement.
    pub layout: LinksLayout,
    /// Entries.
    pub entries: Vec<LinkEntry<'a>>,
}

/// Result of clicking (or pressing Enter/Space on) the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The reveal jumped to the full text.
    Skipped,
    /// The view changed.
    ViewToggled(OverlayView),
    /// Nothing happened.
    Ignored,
}

/// Result of activating a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Text frozen; navigation fires after `delay`.
    ExitScheduled {
        /// Destination route.
        path: String,
        /// Time until navigation.
        delay: Duration,
    },
    /// Navigated immediately (zero exit delay).
    Navigated(String),
    /// External URL opened.
    OpenedExternal(String),
    /// Inert keyword, non-link node, or interaction blocked.
    Inert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ExitState {
    Idle,
    Pending { timer: TimerId, path: String },
    Left,
}

/// The about page: revealed paragraph with keyword links.
#[derive(Debug)]
pub struct OverlayController {
    config: OverlayConfig,
    device: DeviceClass,
    reveal: RevealAnimator,
    keywords: KeywordSet,
    listeners: ListenerSet,
    exit: ExitState,
    view: OverlayView,
    mounted: bool,
}

impl OverlayController {
    /// Create an unmounted controller.
    #[must_use]
    pub fn new(
        owner: OwnerId,
        config: OverlayConfig,
        reveal: RevealConfig,
        device: DeviceClass,
        keywords: KeywordSet,
    ) -> Self {
        Self {
            config,
            device,
            reveal: RevealAnimator::new(reveal),
            keywords,
            listeners: ListenerSet::new(owner),
            exit: ExitState::Idle,
            view: OverlayView::Text,
            mounted: false,
        }
    }

    /// Attach to the page and start revealing `text`.
    pub fn mount<H: Host + ?Sized>(&mut self, text: impl Into<String>, host: &mut H) {
        if self.mounted {
            self.unmount(host);
        }
        if let Some(title) = &self.config.title {
            host.set_title(title);
        }
        self.listeners
            .attach(host, &[ListenerKind::KeyDown], ListenerOptions::default());
        self.exit = ExitState::Idle;
        self.view = OverlayView::Text;
        self.mounted = true;
        self.reveal.assign(text, host);
        tracing::debug!(owner = self.listeners.owner().0, "overlay mounted");
    }

    /// Replace the text. Cancels a pending exit and shows the text view.
    pub fn set_text<H: Host + ?Sized>(&mut self, text: impl Into<String>, host: &mut H) {
        self.cancel_exit(host);
        self.view = OverlayView::Text;
        self.reveal.assign(text, host);
    }

    /// Click on the paragraph.
    ///
    /// Skips an unfinished reveal; once complete, toggles the links list on
    /// touch devices. Ignored while an exit is in flight.
    pub fn click_text<H: Host + ?Sized>(&mut self, host: &mut H) -> ClickOutcome {
        if !self.mounted || self.exit_in_flight() || self.reveal.is_frozen() {
            return ClickOutcome::Ignored;
        }
        if !self.reveal.is_complete() {
            return if self.reveal.skip(host) {
                ClickOutcome::Skipped
            } else {
                ClickOutcome::Ignored
            };
        }
        if !self.device.is_touch() {
            return ClickOutcome::Ignored;
        }
        self.view = match self.view {
            OverlayView::Text => OverlayView::LinksList,
            OverlayView::LinksList => OverlayView::Text,
        };
        tracing::debug!(view = ?self.view, "overlay view toggled");
        ClickOutcome::ViewToggled(self.view)
    }

    /// Key press on the focused paragraph. Enter and Space act as a click.
    pub fn on_key<H: Host + ?Sized>(&mut self, key: &KeyEvent, host: &mut H) -> ClickOutcome {
        if key.is_activation() {
            self.click_text(host)
        } else {
            ClickOutcome::Ignored
        }
    }

    /// Rendered paragraph.
    #[must_use]
    pub fn nodes(&self) -> Vec<RenderNode<'_>> {
        render(&self.reveal, &self.keywords, self.exit_in_flight())
    }

    /// Activate the node at `node_index` of [`nodes`](Self::nodes).
    pub fn activate<H: Host + ?Sized>(&mut self, node_index: usize, host: &mut H) -> Activation {
        let action = match self.nodes().get(node_index) {
            Some(RenderNode::Link(link)) => link.descriptor.action.clone(),
            _ => return Activation::Inert,
        };
        self.perform(action, host)
    }

    /// Activate an entry of the links list by declaration index.
    pub fn activate_link<H: Host + ?Sized>(
        &mut self,
        keyword_index: usize,
        host: &mut H,
    ) -> Activation {
        if self.view != OverlayView::LinksList || self.exit_in_flight() {
            return Activation::Inert;
        }
        let Some(action) = self.keywords.get(keyword_index).map(|k| k.action.clone()) else {
            return Activation::Inert;
        };
        self.perform(action, host)
    }

    /// The links list for the current viewport.
    #[must_use]
    pub fn links_list(&self, viewport: Viewport) -> LinksList<'_> {
        let layout = if self.device.is_touch() && viewport.orientation() == Orientation::Landscape
        {
            LinksLayout::Wrapped
        } else {
            LinksLayout::Stacked
        };
        let entries = self
            .keywords
            .listed()
            .map(|(keyword_index, descriptor)| LinkEntry {
                keyword_index,
                descriptor,
            })
            .collect();
        LinksList { layout, entries }
    }

    /// Handle a fired timer. Returns `false` if the timer is not ours.
    pub fn on_timer<H: Host + ?Sized>(&mut self, id: TimerId, host: &mut H) -> bool {
        let ExitState::Pending { timer, path } = &self.exit else {
            return false;
        };
        if *timer != id {
            return false;
        }
        let path = path.clone();
        self.exit = ExitState::Left;
        tracing::debug!(path = %path, "overlay exit complete");
        host.navigate(&path);
        true
    }

    /// Handle a frame callback. Returns `false` if the frame is not ours.
    pub fn on_frame<H: Host + ?Sized>(&mut self, id: FrameId, host: &mut H) -> bool {
        self.reveal.on_frame(id, host)
    }

    /// Pause the reveal.
    pub fn pause<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<(), RevealError> {
        self.reveal.pause(host)
    }

    /// Resume the reveal.
    pub fn resume<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<(), RevealError> {
        self.reveal.resume(host)
    }

    /// Detach from the page, cancelling frames, timers and listeners.
    pub fn unmount<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.reveal.teardown(host);
        self.cancel_exit(host);
        self.listeners.detach_all(host);
        self.mounted = false;
        tracing::debug!(owner = self.listeners.owner().0, "overlay unmounted");
    }

    /// The animator.
    #[must_use]
    pub fn reveal(&self) -> &RevealAnimator {
        &self.reveal
    }

    /// The keyword table.
    #[must_use]
    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Current view.
    #[must_use]
    pub fn view(&self) -> OverlayView {
        self.view
    }

    /// Whether a navigation exit has started.
    #[must_use]
    pub fn exit_in_flight(&self) -> bool {
        self.exit != ExitState::Idle
    }

    /// Whether the controller is mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Owner id used for listeners.
    #[must_use]
    pub fn owner(&self) -> OwnerId {
        self.listeners.owner()
    }

    fn perform<H: Host + ?Sized>(&mut self, action: KeywordAction, host: &mut H) -> Activation {
        match action {
            KeywordAction::Navigate(path) => self.begin_exit(path, host),
            KeywordAction::OpenExternal(url) => {
                tracing::debug!(url = %url, "opening external link");
                host.open_external(&url);
                Activation::OpenedExternal(url)
            }
            KeywordAction::None => Activation::Inert,
        }
    }

    fn begin_exit<H: Host + ?Sized>(&mut self, path: String, host: &mut H) -> Activation {
        self.reveal.freeze(host);
        let delay = self.config.exit_delay;
        if delay.is_zero() {
            self.exit = ExitState::Left;
            host.navigate(&path);
            return Activation::Navigated(path);
        }
        let timer = host.set_timeout(delay);
        tracing::debug!(path = %path, delay_ms = delay.as_millis() as u64, "overlay exit started");
        self.exit = ExitState::Pending {
            timer,
            path: path.clone(),
        };
        Activation::ExitScheduled { path, delay }
    }

    fn cancel_exit<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let ExitState::Pending { timer, .. } = self.exit {
            host.clear_timeout(timer);
        }
        self.exit = ExitState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestHost;
    use folio_core::event::KeyCode;
    use pretty_assertions::assert_eq;

    const OWNER: OwnerId = OwnerId(7);

    fn keywords() -> KeywordSet {
        KeywordSet::new(vec![
            KeywordDescriptor::new("home", KeywordAction::navigate("/")),
            KeywordDescriptor::new("site", KeywordAction::open_external("https://example.com")),
            KeywordDescriptor::new("drawing", KeywordAction::None),
        ])
    }

    fn controller(device: DeviceClass) -> OverlayController {
        OverlayController::new(
            OWNER,
            OverlayConfig::default().with_title("about"),
            RevealConfig::default().with_char_duration(Duration::from_millis(1)),
            device,
            keywords(),
        )
    }

    fn finish(ctl: &mut OverlayController, host: &mut TestHost) {
        host.advance(Duration::from_secs(1));
        for id in host.take_frames() {
            ctl.on_frame(id, host);
        }
    }

    fn contents(nodes: &[RenderNode<'_>]) -> Vec<(String, bool)> {
        nodes
            .iter()
            .map(|n| (n.content().to_owned(), n.link().is_some()))
            .collect()
    }

    #[test]
    fn keywords_are_plain_until_complete() {
        let mut host = TestHost::new();
        let mut ctl = controller(DeviceClass::Desktop);
        ctl.mount("go home now", &mut host);
        host.advance(Duration::from_millis(8));
        for id in host.take_frames() {
            ctl.on_frame(id, &mut host);
        }
        assert_eq!(ctl.reveal().visible_text(), "go home ");
        assert!(ctl.nodes().iter().all(|n| n.link().is_none()));

        finish(&mut ctl, &mut host);
        assert_eq!(
            contents(&ctl.nodes()),
            vec![
                ("go ".to_owned(), false),
                ("home".to_owned(), true),
                (" now".to_owned(), false)
            ]
        );
    }

    #[test]
    fn rendered_nodes_concatenate_to_prefix() {
        let mut host = TestHost::new();
        let mut ctl = controller(DeviceClass::Desktop);
        ctl.mount("site drawing home", &mut host);
        for _ in 0..20 {
            host.advance(Duration::from_millis(1));
            for id in host.take_frames() {
                ctl.on_frame(id, &mut host);
            }
            let joined: String = ctl.nodes().iter().map(RenderNode::content).collect();
            assert_eq!(joined, ctl.reveal().visible_text());
        }
    }

    #[test]
    fn mount_sets_title_and_listens_for_keys() {
        let mut host = TestHost::new();
        let mut ctl = controller(DeviceClass::Desktop);
        ctl.mount("text", &mut host);
        assert_eq!(host.titles, vec!["about".to_owned()]);
        assert_eq!(host.listeners.count_for_owner(OWNER), 1);
    }

    #[test]
    fn click_skips_then_toggles_on_touch() {
        let mut host = TestHost::new();
        let mut ctl = controller(DeviceClass::Touch);
        ctl.mount("go home now", &mut host);
        assert_eq!(ctl.click_text(&mut host), ClickOutcome::Skipped);
        assert_eq!(ctl.reveal().visible_text(), "go home now");
        assert_eq!(
            ctl.click_text(&mut host),
            ClickOutcome::ViewToggled(OverlayView::LinksList)
        );
        assert_eq!(
            ctl.click_text(&mut host),
            ClickOutcome::ViewToggled(OverlayView::Text)
        );
    }

    #[test]
    fn click_after_completion_is_ignored_on_desktop() {
        let mut host = TestHost::new();
        let mut ctl = controller(DeviceClass::Desktop);
        ctl.mount("go home", &mut host);
        finish(&mut ctl, &mut host);
        assert_eq!(ctl.click_text(&mut host), ClickOutcome::Ignored);
        assert_eq!(ctl.view(), OverlayView::Text);
    }

    #[test]
    fn enter_and_space_act_as_click() {
        let mut host = TestHost::new();
        let mut ctl = controller(DeviceClass::Desktop);
        ctl.mount("go home", &mut host);
        assert_eq!(
            ctl.on_key(&KeyEvent::new(KeyCode::Char('x')), &mut host),
            ClickOutcome::Ignored
        );
        assert_eq!(
            ctl.on_key(&KeyEvent::new(KeyCode::Enter), &mut host),
            ClickOutcome::Skipped
        );
    }

    #[test]
    fn navigate_freezes_and_leaves_after_delay() {
        let mut host = TestHost::new();
        let mut ctl = controller(DeviceClass::Desktop);
        ctl.mount("go home", &mut host);
        finish(&mut ctl, &mut host);

        let activation = ctl.activate(1, &mut host);
        assert_eq!(
            activation,
            Activation::ExitScheduled {
                path: "/".to_owned(),
                delay: Duration::from_millis(600)
            }
        );
        assert!(ctl.reveal().is_frozen());
        assert!(ctl.exit_in_flight());
        assert!(ctl.nodes().iter().all(|n| n.link().is_none()));
        assert_eq!(ctl.activate(1, &mut host), Activation::Inert);
        assert!(host.navigations.is_empty());

        host.advance(Duration::from_millis(599));
        assert!(host.take_due_timers().is_empty());
        host.advance(Duration::from_millis(1));
        for id in host.take_due_timers() {
            assert!(ctl.on_timer(id, &mut host));
        }
        assert_eq!(host.navigations, vec!["/".to_owned()]);
    }

    #[test]
    fn external_opens_immediately_and_inert_does_nothing() {
        let mut host = TestHost::new();
        let mut ctl = controller(DeviceClass::Desktop);
        ctl.mount("site and drawing", &mut host);
        finish(&mut ctl, &mut host);
        assert_eq!(
            ctl.activate(0, &mut host),
            Activation::OpenedExternal("https://example.com".to_owned())
        );
        assert!(ctl.nodes()[0].link().is_some_and(|l| l.opens_new_context()));
        assert_eq!(ctl.activate(2, &mut host), Activation::Inert);
        assert_eq!(ctl.activate(1, &mut host), Activation::Inert);
        assert_eq!(host.external.len(), 1);
        assert!(!ctl.exit_in_flight());
    }

    #[test]
    fn links_list_layout_and_entries() {
        let touch = controller(DeviceClass::Touch);
        let list = touch.links_list(Viewport::new(800, 400));
        assert_eq!(list.layout, LinksLayout::Wrapped);
        let words: Vec<_> = list.entries.iter().map(|e| e.descriptor.word.as_str()).collect();
        assert_eq!(words, vec!["home", "site"]);
        assert_eq!(
            touch.links_list(Viewport::new(400, 800)).layout,
            LinksLayout::Stacked
        );
        let desktop = controller(DeviceClass::Desktop);
        assert_eq!(
            desktop.links_list(Viewport::new(1600, 900)).layout,
            LinksLayout::Stacked
        );
    }

    #[test]
    fn activate_link_from_list() {
        let mut host = TestHost::new();
        let mut ctl = controller(DeviceClass::Touch);
        ctl.mount("x", &mut host);
        assert_eq!(ctl.activate_link(1, &mut host), Activation::Inert);
        ctl.click_text(&mut host);
        ctl.click_text(&mut host);
        assert_eq!(ctl.view(), OverlayView::LinksList);
        assert_eq!(
            ctl.activate_link(1, &mut host),
            Activation::OpenedExternal("https://example.com".to_owned())
        );
    }

    #[test]
    fn unmount_cancels_everything() {
        let mut host = TestHost::new();
        let mut ctl = controller(DeviceClass::Desktop);
        ctl.mount("go home", &mut host);
        finish(&mut ctl, &mut host);
        ctl.activate(1, &mut host);
        ctl.unmount(&mut host);
        assert!(host.listeners.is_empty());
        assert!(host.frames.is_empty());
        assert!(host.timers.is_empty());
        assert!(!ctl.is_mounted());
    }
}
