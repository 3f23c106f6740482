#![forbid(unsafe_code)]

//! Core: host events, viewport classification, frame scheduling, and
//! document-level flags.
//!
//! # Role in folio
//! `folio-core` is the input layer. It owns the canonical event types the
//! host pushes, the primitives used to schedule per-frame continuations
//! safely, and the shared state (document flags, broadcast values) that
//! several controllers touch.
//!
//! # How it fits in the system
//! `folio-runtime` consumes `folio-core::event::Event` values and drives the
//! controllers. `folio-text` is independent of input, so `folio-core` is the
//! bridge between the host and the deterministic engine.

pub mod broadcast;
pub mod event;
pub mod flags;
pub mod frame;
pub mod geometry;
pub mod listener;
