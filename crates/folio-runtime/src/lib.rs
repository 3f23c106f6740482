#![forbid(unsafe_code)]

//! folio Runtime
//!
//! The controllers that drive the site: the typewriter reveal, the keyword
//! overlay, scroll pagination, and the custom cursor.
//!
//! # Key Components
//!
//! - [`Host`] - Effects a controller may request from its environment
//! - [`RevealAnimator`] - Time-driven prefix reveal with pause, skip and freeze
//! - [`OverlayController`] - About page: reveal plus keyword links
//! - [`PaginationController`] - Desktop-only page snapping and drag-to-scroll
//! - [`PointerController`] - Pointer tracking and the cursor proxy
//!
//! # Role in folio
//! `folio-runtime` sits between `folio-core` (events, frames, flags) and the
//! host. Every controller is a plain state machine: the host pushes events
//! and frame/timer callbacks, the controller answers through [`Host`]. No
//! controller owns a clock or a thread.

pub mod config;
pub mod host;
pub mod overlay;
pub mod pagination;
pub mod pointer;
pub mod reveal;

#[cfg(test)]
mod testing;

pub use config::{
    CursorConfig, OverlayConfig, PaginationConfig, ResumePolicy, RevealConfig, SiteConfig,
};
pub use host::{Host, ListenerSet};
pub use overlay::{
    Activation, ClickOutcome, LinkEntry, LinkNode, LinksLayout, LinksList, OverlayController,
    OverlayView, RenderNode, render,
};
pub use pagination::{PageState, PaginationController, page_for};
pub use pointer::{CursorProxy, CursorState, CursorVisibility, PointerController};
pub use reveal::{RevealAction, RevealAnimator, RevealError, RevealMode};
