use alloc::vec::Vec;

use crate::Easing;

/// What an animation leg is doing. Hops carry the rotation direction: `+1` moves every item
/// one slot toward the right-hand neighbor's place in front, `-1` the opposite way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationKind {
    Hop { direction: i8 },
    Settle,
    Expand,
    Contract,
}

/// One item's index animation within a leg.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemMotion {
    /// Position of the item in the selector's item list.
    pub item: usize,
    pub from: f64,
    pub to: f64,
}

impl ItemMotion {
    pub fn value_at(&self, eased: f64) -> f64 {
        self.from + (self.to - self.from) * eased
    }
}

/// A single animation leg: every item's shown index runs from `from` to `to` over the same
/// duration and easing, and the leg completes when all of them do.
///
/// Each item's location, scale and opacity are all driven by its shown index, so one motion
/// per item stands for all of its animated properties.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    id: u64,
    kind: AnimationKind,
    motions: Vec<ItemMotion>,
    duration_ms: f64,
    easing: Easing,
}

impl Animation {
    pub(crate) fn new(
        id: u64,
        kind: AnimationKind,
        motions: Vec<ItemMotion>,
        duration_ms: f64,
        easing: Easing,
    ) -> Self {
        Self {
            id,
            kind,
            motions,
            duration_ms: duration_ms.max(0.0),
            easing,
        }
    }

    /// Unique per selector; lets a driver tell a freshly started leg from the one it was running.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    pub fn motions(&self) -> &[ItemMotion] {
        &self.motions
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }
}
