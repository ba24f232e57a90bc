//! A headless carousel geometry and transition engine.
//!
//! For frame-driven playback (a controller that plays animation legs from a clock), see the
//! `carousel-adapter` crate.
//!
//! Items sit on a circular sequence of slots. Slot 0 is the front, slots `1..=right` fan out
//! toward the right point, the last `left` slots fan out toward the left point, and any
//! remaining items park on a hidden arc between the two vanishing points. Slot indices are
//! continuous: an item's location, scale and opacity are piecewise-linear functions of its
//! (possibly fractional) shown index, built once per configuration from curved samples.
//!
//! This crate provides:
//! - the scaling curves ([`ScaleFn`]) and their sampled inverse ([`InverseLookup`])
//! - slot-index → value maps ([`InterpolationMap`], [`InterpolationMap2D`], [`CarouselMaps`])
//! - circular index math ([`index_to_position`], [`shortest_distance`], [`collate`])
//! - drag projection ([`GestureProjector`])
//! - the [`Selector`] state machine, which turns rotations, drags and expand/contract requests
//!   into animation legs ([`Animation`]) the host plays back
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the item list (keys and payloads)
//! - pointer displacement while dragging
//! - a clock to play each [`Animation`] leg, reporting progress and completion
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

mod animation;
mod circular;
mod error;
mod gesture;
mod interpolation;
mod item;
mod key;
mod maps;
mod options;
mod scale;
mod schedule;
mod selector;
mod types;

#[cfg(test)]
mod tests;

pub use animation::{Animation, AnimationKind, ItemMotion};
pub use circular::{
    Circular, checked_index, circularize, collate, index_to_position, shortest_distance,
    wrap_position,
};
pub use error::{MapError, SelectorError};
pub use gesture::{GestureProjector, ScrollDirection};
pub use interpolation::{
    ArmBounds, ArmCounts, Bounds, HiddenBounds, InterpolationMap, InterpolationMap2D,
};
pub use item::{Entry, Item};
pub use key::SelectorKey;
pub use maps::CarouselMaps;
pub use options::{MAX_VANISHING_GAP, OnChangeCallback, ScalingOptions, SelectorOptions};
pub use scale::{InverseLookup, ScaleFn, Scaling};
pub use schedule::hop_durations;
pub use selector::{Completion, Selector};
pub use types::{ArmSide, Axis, Easing, ItemFrame, ItemKey, Point, Span};
