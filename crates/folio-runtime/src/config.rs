#![forbid(unsafe_code)]

//! Static configuration for the site's controllers.
//!
//! Everything here is fixed at build time. Each struct has a [`Default`]
//! that reproduces the live site and `#[must_use]` builder methods for tests.

use std::time::Duration;

use folio_core::geometry::{DeviceClass, ViewportConfig};

/// Per-grapheme reveal pacing on desktop-class devices.
pub const DESKTOP_CHAR_DURATION: Duration = Duration::from_millis(7);

/// Per-grapheme reveal pacing on touch-class devices.
pub const TOUCH_CHAR_DURATION: Duration = Duration::from_millis(18);

/// Delay between activating a navigation keyword and leaving the page.
pub const DEFAULT_EXIT_DELAY: Duration = Duration::from_millis(600);

/// Route whose content is scroll-paginated.
pub const DEFAULT_PAGINATED_ROUTE: &str = "/works";

/// What `resume` does after a skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResumePolicy {
    /// Resume continues from the grapheme count shown when skip happened.
    #[default]
    Resumable,
    /// Skip is final; resume after skip is rejected.
    SkipIsFinal,
}

/// Reveal animator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealConfig {
    /// Time to reveal one grapheme.
    pub char_duration: Duration,
    /// Behavior of resume after skip.
    pub resume: ResumePolicy,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::for_device(DeviceClass::Desktop)
    }
}

impl RevealConfig {
    /// Pacing for a device class.
    #[must_use]
    pub const fn for_device(device: DeviceClass) -> Self {
        let char_duration = match device {
            DeviceClass::Desktop => DESKTOP_CHAR_DURATION,
            DeviceClass::Touch => TOUCH_CHAR_DURATION,
        };
        Self {
            char_duration,
            resume: ResumePolicy::Resumable,
        }
    }

    /// Override per-grapheme pacing.
    #[must_use]
    pub const fn with_char_duration(mut self, char_duration: Duration) -> Self {
        self.char_duration = char_duration;
        self
    }

    /// Override resume-after-skip behavior.
    #[must_use]
    pub const fn with_resume(mut self, resume: ResumePolicy) -> Self {
        self.resume = resume;
        self
    }
}

/// Keyword overlay page configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayConfig {
    /// Document title set on mount.
    pub title: Option<String>,
    /// Delay between a navigation activation and the navigation itself.
    pub exit_delay: Duration,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            title: None,
            exit_delay: DEFAULT_EXIT_DELAY,
        }
    }
}

impl OverlayConfig {
    /// Set the document title applied on mount.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Override the exit delay.
    #[must_use]
    pub const fn with_exit_delay(mut self, exit_delay: Duration) -> Self {
        self.exit_delay = exit_delay;
        self
    }
}

/// Scroll pagination configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Route on which pagination is active.
    pub paginated_route: String,
    /// Desktop/mobile classification.
    pub viewport: ViewportConfig,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            paginated_route: DEFAULT_PAGINATED_ROUTE.to_owned(),
            viewport: ViewportConfig::default(),
        }
    }
}

impl PaginationConfig {
    /// Override the paginated route.
    #[must_use]
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.paginated_route = route.into();
        self
    }

    /// Override the classification.
    #[must_use]
    pub const fn with_viewport(mut self, viewport: ViewportConfig) -> Self {
        self.viewport = viewport;
        self
    }
}

/// Cursor controller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorConfig {
    /// Desktop/mobile classification.
    pub viewport: ViewportConfig,
    /// Initial value of the shared visibility flag.
    pub initially_visible: bool,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            initially_visible: true,
        }
    }
}

impl CursorConfig {
    /// Override the classification.
    #[must_use]
    pub const fn with_viewport(mut self, viewport: ViewportConfig) -> Self {
        self.viewport = viewport;
        self
    }

    /// Override the initial visibility.
    #[must_use]
    pub const fn with_initially_visible(mut self, visible: bool) -> Self {
        self.initially_visible = visible;
        self
    }
}

/// Configuration for a whole site instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Desktop/mobile classification shared by every controller.
    pub viewport: ViewportConfig,
    /// Input device class. Decides reveal pacing and the links list.
    pub device: DeviceClass,
    /// Resume-after-skip behavior.
    pub resume: ResumePolicy,
    /// Overlay page settings.
    pub overlay: OverlayConfig,
    /// Paginated route.
    pub paginated_route: String,
    /// Initial cursor visibility.
    pub cursor_visible: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            device: DeviceClass::Desktop,
            resume: ResumePolicy::Resumable,
            overlay: OverlayConfig::default(),
            paginated_route: DEFAULT_PAGINATED_ROUTE.to_owned(),
            cursor_visible: true,
        }
    }
}

impl SiteConfig {
    /// Override the device class.
    #[must_use]
    pub const fn with_device(mut self, device: DeviceClass) -> Self {
        self.device = device;
        self
    }

    /// Override the classification.
    #[must_use]
    pub const fn with_viewport(mut self, viewport: ViewportConfig) -> Self {
        self.viewport = viewport;
        self
    }

    /// Override resume-after-skip behavior.
    #[must_use]
    pub const fn with_resume(mut self, resume: ResumePolicy) -> Self {
        self.resume = resume;
        self
    }

    /// Override overlay settings.
    #[must_use]
    pub fn with_overlay(mut self, overlay: OverlayConfig) -> Self {
        self.overlay = overlay;
        self
    }

    /// Override the paginated route.
    #[must_use]
    pub fn with_paginated_route(mut self, route: impl Into<String>) -> Self {
        self.paginated_route = route.into();
        self
    }

    /// Reveal settings derived from the device class.
    #[must_use]
    pub const fn reveal(&self) -> RevealConfig {
        RevealConfig::for_device(self.device).with_resume(self.resume)
    }

    /// Pagination settings.
    #[must_use]
    pub fn pagination(&self) -> PaginationConfig {
        PaginationConfig::default()
            .with_route(self.paginated_route.clone())
            .with_viewport(self.viewport)
    }

    /// Cursor settings.
    #[must_use]
    pub const fn cursor(&self) -> CursorConfig {
        CursorConfig {
            viewport: self.viewport,
            initially_visible: self.cursor_visible,
        }
    }
}
