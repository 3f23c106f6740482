#![forbid(unsafe_code)]

//! folio public facade crate.
//!
//! This crate provides the stable surface area for hosts embedding the
//! portfolio engine. It re-exports common types from the internal crates and
//! offers a lightweight prelude.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use folio_core::broadcast::Broadcast;
pub use folio_core::event::{
    Event, KeyCode, KeyEvent, Modifiers, PointerButton, PointerEvent, PointerEventKind,
};
pub use folio_core::flags::{DocumentFlags, FlagBoard, FlagError, FlagGuard};
pub use folio_core::frame::{FrameId, FrameTicket, TimerId};
pub use folio_core::geometry::{
    DeviceClass, Orientation, Point, Viewport, ViewportClass, ViewportConfig,
};

// --- Text re-exports -------------------------------------------------------

pub use folio_text::{KeywordAction, KeywordDescriptor, KeywordSet, Segment, SegmentKind, segment};

// --- Runtime re-exports ----------------------------------------------------

pub use folio_runtime::{
    Activation, ClickOutcome, CursorProxy, CursorVisibility, Host, OverlayController, PageState,
    PaginationController, PointerController, RenderNode, ResumePolicy, RevealAnimator,
    RevealConfig, RevealError, RevealMode, SiteConfig,
};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use folio_web::step_site::{StepResult, StepSite};
#[cfg(feature = "web")]
pub use folio_web::{HostEffect, SiteError, WebHost};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for folio hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A reveal transition was rejected.
    Reveal(RevealError),
    /// A document flag could not be acquired.
    Flag(FlagError),
    /// The step runner rejected a call.
    #[cfg(feature = "web")]
    Site(SiteError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reveal(err) => write!(f, "{err}"),
            Self::Flag(err) => write!(f, "{err}"),
            #[cfg(feature = "web")]
            Self::Site(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Reveal(err) => Some(err),
            Self::Flag(err) => Some(err),
            #[cfg(feature = "web")]
            Self::Site(err) => Some(err),
        }
    }
}

impl From<RevealError> for Error {
    fn from(err: RevealError) -> Self {
        Self::Reveal(err)
    }
}

impl From<FlagError> for Error {
    fn from(err: FlagError) -> Self {
        Self::Flag(err)
    }
}

#[cfg(feature = "web")]
impl From<SiteError> for Error {
    fn from(err: SiteError) -> Self {
        Self::Site(err)
    }
}

/// Standard result type for folio APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Activation, ClickOutcome, Error, Event, Host, KeyCode, KeyEvent, KeywordAction,
        KeywordDescriptor, KeywordSet, PointerEvent, PointerEventKind, RenderNode, Result,
        SiteConfig, Viewport,
    };

    #[cfg(feature = "web")]
    pub use crate::{StepSite, WebHost};

    pub use crate::{core, runtime, text};
}

pub use folio_core as core;
pub use folio_runtime as runtime;
pub use folio_text as text;
#[cfg(feature = "web")]
pub use folio_web as web;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn errors_convert_and_display() {
        let err: Error = RevealError::SkipIsFinal.into();
        assert_eq!(err.to_string(), "skip is final; resume is disabled");

        let err: Error = FlagError::NotSingleFlag(DocumentFlags::all()).into();
        assert!(std::error::Error::source(&err).is_some());
    }

    #[cfg(feature = "web")]
    #[test]
    fn site_errors_propagate_with_question_mark() {
        fn drive() -> Result<StepResult> {
            let mut site = StepSite::new(SiteConfig::default(), 1440, 900);
            site.init()?;
            site.init()?;
            Ok(site.step()?)
        }
        assert_eq!(drive(), Err(Error::Site(SiteError::AlreadyInitialized)));
    }
}
