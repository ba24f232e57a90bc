//! Playback utilities for the `carousel` crate.
//!
//! The `carousel` crate is UI-agnostic: its `Selector` describes each animation leg but never
//! reads a clock. This crate provides small, framework-neutral helpers commonly needed by
//! adapters:
//!
//! - A leg clock ([`Tween`]) mapping wall-clock time onto leg progress
//! - A [`Controller`] that plays whole transition chains from a `tick(now_ms)` frame loop
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![forbid(unsafe_code)]

mod controller;
mod tween;


pub use controller::Controller;
pub use tween::Tween;
