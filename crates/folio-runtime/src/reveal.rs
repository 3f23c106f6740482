#![forbid(unsafe_code)]

//! Typewriter reveal animator.
//!
//! A [`RevealAnimator`] exposes a growing grapheme prefix of its source text.
//! Progress is a pure function of elapsed time:
//!
//! ```text
//! visible = min(len, floor((now - effective_start) / char_duration))
//! ```
//!
//! Pause and resume shift `effective_start` so the elapsed time at pause is
//! preserved exactly. Resuming after a skip shifts it so the animation picks up
//! at the grapheme count that was shown when the skip happened.
//!
//! # Frames
//!
//! While animating, the animator keeps exactly one frame request outstanding.
//! Each request is stamped with the current generation; skip, pause, freeze,
//! reassignment and teardown bump the generation and cancel the request, so a
//! callback that races any of them is discarded instead of moving the prefix.
//!
//! # Freeze
//!
//! [`freeze`](RevealAnimator::freeze) pins the currently displayed prefix.
//! While frozen every query reports the snapshot, no matter what the clock
//! says. Only reassigning the text clears it.

use std::fmt;
use std::time::Duration;

use folio_core::frame::{FrameId, FrameTicket, GenerationCounter};
use folio_text::GraphemeIndex;

use crate::config::{ResumePolicy, RevealConfig};
use crate::host::Host;

/// Animator lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealMode {
    /// Growing with time.
    Animating,
    /// Stopped with elapsed time remembered.
    Paused,
    /// Jumped to the full text before the animation finished.
    Skipped,
    /// Fully revealed by the animation itself.
    Done,
}

impl RevealMode {
    fn name(self) -> &'static str {
        match self {
            Self::Animating => "animating",
            Self::Paused => "paused",
            Self::Skipped => "skipped",
            Self::Done => "done",
        }
    }
}

/// Operations the animator may reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAction {
    /// [`RevealAnimator::pause`].
    Pause,
    /// [`RevealAnimator::resume`].
    Resume,
}

/// A rejected reveal transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealError {
    /// The action is not valid in the current mode.
    InvalidTransition {
        /// Mode at the time of the call.
        from: RevealMode,
        /// What was attempted.
        action: RevealAction,
    },
    /// Resume after skip was requested under [`ResumePolicy::SkipIsFinal`].
    SkipIsFinal,
    /// The text is frozen; only reassignment unfreezes it.
    Frozen,
}

impl fmt::Display for RevealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition { from, action } => {
                let action = match action {
                    RevealAction::Pause => "pause",
                    RevealAction::Resume => "resume",
                };
                write!(f, "cannot {action} while {}", from.name())
            }
            Self::SkipIsFinal => write!(f, "skip is final; resume is disabled"),
            Self::Frozen => write!(f, "reveal is frozen"),
        }
    }
}

impl std::error::Error for RevealError {}

/// Time-driven prefix reveal of one source text.
#[derive(Debug, Clone)]
pub struct RevealAnimator {
    config: RevealConfig,
    text: String,
    graphemes: GraphemeIndex,
    mode: RevealMode,
    effective_start: Duration,
    paused_at_elapsed: Option<Duration>,
    shown_at_skip: Option<usize>,
    visible: usize,
    frozen: Option<usize>,
    generation: GenerationCounter,
    pending: Option<FrameTicket>,
}

impl RevealAnimator {
    /// An animator with no text, already done.
    #[must_use]
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            text: String::new(),
            graphemes: GraphemeIndex::new(""),
            mode: RevealMode::Done,
            effective_start: Duration::ZERO,
            paused_at_elapsed: None,
            shown_at_skip: None,
            visible: 0,
            frozen: None,
            generation: GenerationCounter::new(),
            pending: None,
        }
    }

    /// Replace the source text and restart the reveal from zero.
    ///
    /// Clears any frozen snapshot and invalidates outstanding frames. Empty
    /// text is done immediately and requests no frame.
    pub fn assign<H: Host + ?Sized>(&mut self, text: impl Into<String>, host: &mut H) {
        self.invalidate(host);
        self.text = text.into();
        self.graphemes = GraphemeIndex::new(&self.text);
        self.effective_start = host.now();
        self.paused_at_elapsed = None;
        self.shown_at_skip = None;
        self.visible = 0;
        self.frozen = None;
        if self.graphemes.is_empty() {
            self.mode = RevealMode::Done;
        } else {
            self.mode = RevealMode::Animating;
            self.schedule(host);
        }
        tracing::debug!(
            graphemes = self.graphemes.len(),
            char_ms = self.config.char_duration.as_millis() as u64,
            "reveal assigned"
        );
    }

    /// Advance to `now` and return the visible grapheme count.
    ///
    /// Only moves the prefix while animating; never moves it backwards.
    pub fn tick(&mut self, now: Duration) -> usize {
        if let Some(frozen) = self.frozen {
            return frozen;
        }
        if self.mode == RevealMode::Animating {
            let target = self.prefix_at(now).max(self.visible);
            self.visible = target;
            if target >= self.len() {
                self.mode = RevealMode::Done;
                tracing::debug!(graphemes = target, "reveal done");
            }
        }
        self.visible
    }

    /// Handle a host frame callback.
    ///
    /// Returns `false` when `id` is not this animator's pending frame. A
    /// pending frame from a stale generation is consumed without effect.
    pub fn on_frame<H: Host + ?Sized>(&mut self, id: FrameId, host: &mut H) -> bool {
        let Some(ticket) = self.pending.filter(|t| t.id == id) else {
            return false;
        };
        self.pending = None;
        if !self.generation.is_current(ticket) {
            tracing::trace!(frame = id.get(), "stale reveal frame discarded");
            return true;
        }
        if self.mode != RevealMode::Animating || self.frozen.is_some() {
            return true;
        }
        self.tick(host.now());
        if self.mode == RevealMode::Animating {
            self.schedule(host);
        }
        true
    }

    /// Jump to the full text.
    ///
    /// Returns `true` if anything changed: only an unfinished, unfrozen
    /// reveal can be skipped.
    pub fn skip<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.frozen.is_some() {
            return false;
        }
        if self.mode == RevealMode::Animating {
            self.tick(host.now());
        }
        let skippable = matches!(self.mode, RevealMode::Animating | RevealMode::Paused);
        if !skippable || self.visible >= self.len() {
            return false;
        }
        self.invalidate(host);
        self.shown_at_skip = Some(self.visible);
        self.paused_at_elapsed = None;
        self.visible = self.len();
        self.mode = RevealMode::Skipped;
        tracing::debug!(
            shown = self.shown_at_skip.unwrap_or_default(),
            graphemes = self.len(),
            "reveal skipped"
        );
        true
    }

    /// Stop the animation, remembering the elapsed time.
    pub fn pause<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<(), RevealError> {
        if self.frozen.is_some() {
            return Err(RevealError::Frozen);
        }
        let now = host.now();
        if self.mode == RevealMode::Animating {
            self.tick(now);
        }
        if self.mode != RevealMode::Animating {
            return Err(RevealError::InvalidTransition {
                from: self.mode,
                action: RevealAction::Pause,
            });
        }
        self.invalidate(host);
        self.paused_at_elapsed = Some(now.saturating_sub(self.effective_start));
        self.mode = RevealMode::Paused;
        tracing::debug!(graphemes = self.visible, "reveal paused");
        Ok(())
    }

    /// Continue a paused or skipped reveal.
    ///
    /// From `Paused` the elapsed time is preserved exactly. From `Skipped`
    /// (when [`ResumePolicy::Resumable`]) the animation continues from the
    /// grapheme count shown at the skip.
    pub fn resume<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<(), RevealError> {
        if self.frozen.is_some() {
            return Err(RevealError::Frozen);
        }
        let now = host.now();
        match self.mode {
            RevealMode::Paused => {
                let elapsed = self.paused_at_elapsed.take().unwrap_or_default();
                self.effective_start = now.saturating_sub(elapsed);
            }
            RevealMode::Skipped => {
                if self.config.resume == ResumePolicy::SkipIsFinal {
                    return Err(RevealError::SkipIsFinal);
                }
                let shown = self.shown_at_skip.take().unwrap_or_default();
                self.effective_start = now.saturating_sub(self.duration_for(shown));
                self.visible = shown;
            }
            from => {
                return Err(RevealError::InvalidTransition {
                    from,
                    action: RevealAction::Resume,
                });
            }
        }
        self.mode = RevealMode::Animating;
        self.schedule(host);
        tracing::debug!(graphemes = self.visible, "reveal resumed");
        Ok(())
    }

    /// Pin the displayed prefix. Returns the pinned grapheme count.
    ///
    /// Freezing twice keeps the first snapshot.
    pub fn freeze<H: Host + ?Sized>(&mut self, host: &mut H) -> usize {
        if let Some(frozen) = self.frozen {
            return frozen;
        }
        self.invalidate(host);
        self.frozen = Some(self.visible);
        tracing::debug!(graphemes = self.visible, "reveal frozen");
        self.visible
    }

    /// Cancel outstanding work. The animator keeps its text and prefix.
    pub fn teardown<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.invalidate(host);
        if self.mode == RevealMode::Animating {
            self.mode = RevealMode::Paused;
            self.paused_at_elapsed = Some(host.now().saturating_sub(self.effective_start));
        }
        tracing::trace!("reveal torn down");
    }

    /// Full source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Grapheme length of the source text.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.graphemes.len()
    }

    /// Whether the source text is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graphemes.is_empty()
    }

    /// Displayed grapheme count: the frozen snapshot if any, else the prefix.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.frozen.unwrap_or(self.visible)
    }

    /// Displayed text.
    #[must_use]
    pub fn visible_text(&self) -> &str {
        self.graphemes.prefix(&self.text, self.visible_len())
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> RevealMode {
        self.mode
    }

    /// Whether the full text is shown and no longer animating.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.mode, RevealMode::Done | RevealMode::Skipped)
    }

    /// Whether a snapshot is pinned.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen.is_some()
    }

    /// Whether a frame request is outstanding.
    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    fn prefix_at(&self, now: Duration) -> usize {
        let nanos = self.config.char_duration.as_nanos();
        if nanos == 0 {
            return self.len();
        }
        let elapsed = now.saturating_sub(self.effective_start).as_nanos();
        usize::try_from(elapsed / nanos)
            .unwrap_or(usize::MAX)
            .min(self.len())
    }

    fn duration_for(&self, graphemes: usize) -> Duration {
        let count = u32::try_from(graphemes).unwrap_or(u32::MAX);
        self.config
            .char_duration
            .checked_mul(count)
            .unwrap_or(Duration::MAX)
    }

    fn schedule<H: Host + ?Sized>(&mut self, host: &mut H) {
        let id = host.request_frame();
        self.pending = Some(self.generation.ticket(id));
    }

    fn invalidate<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(ticket) = self.pending.take() {
            host.cancel_frame(ticket.id);
        }
        self.generation.bump();
    }
}
