use alloc::sync::Arc;

use crate::selector::Selector;
use crate::{Easing, ItemKey, Point, Scaling, ScrollDirection};

/// Upper bound for [`ScalingOptions::vanishing_gap`]. Larger gaps would let the two vanishing
/// samples around an empty arm cross each other.
pub const MAX_VANISHING_GAP: f64 = 0.45;

/// A callback fired after a transition commits to a new front item.
///
/// The second argument is the new current index.
pub type OnChangeCallback<T, K> = Arc<dyn Fn(&Selector<T, K>, usize) + Send + Sync>;

/// Curve selection and shaping for the three animated properties.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScalingOptions {
    pub size_scaling: Scaling,
    pub size_scaling_depth: i32,
    pub location_scaling: Scaling,
    pub location_scaling_depth: i32,
    pub opacity_scaling: Scaling,
    pub opacity_scaling_depth: i32,
    /// Extra samples past the last right slot, used only to shape the curve.
    pub pad_right_items: usize,
    /// Extra samples past the last left slot, used only to shape the curve.
    pub pad_left_items: usize,
    /// Offset of the vanishing sample past the last visible slot. Clamped to
    /// `[0, MAX_VANISHING_GAP]` when the maps are built.
    pub vanishing_gap: f64,
    /// Scale approached at the vanishing points (the front item has scale 1).
    pub edge_scale: f64,
    /// Opacity approached at the vanishing points (the front item is fully opaque).
    pub edge_opacity: f64,
}

impl Default for ScalingOptions {
    fn default() -> Self {
        Self {
            size_scaling: Scaling::Linear,
            size_scaling_depth: 1,
            location_scaling: Scaling::Linear,
            location_scaling_depth: 1,
            opacity_scaling: Scaling::Linear,
            opacity_scaling_depth: 1,
            pad_right_items: 0,
            pad_left_items: 0,
            vanishing_gap: 0.25,
            edge_scale: 0.0,
            edge_opacity: 0.5,
        }
    }
}

impl ScalingOptions {
    /// The vanishing gap actually used for map construction.
    pub fn clamped_vanishing_gap(&self) -> f64 {
        if self.vanishing_gap.is_nan() {
            return 0.0;
        }
        self.vanishing_gap.clamp(0.0, MAX_VANISHING_GAP)
    }
}

/// Configuration for [`crate::Selector`].
///
/// Cheap to clone: the callback is shared through an `Arc`.
pub struct SelectorOptions<T, K = ItemKey> {
    /// Visible item cap (front item included). Only applies when `hide` is set.
    pub show: usize,
    /// When false, every item is laid out on the visible arms.
    pub hide: bool,
    /// Point items approach at the end of the left arm.
    pub left_point: Point,
    /// Point items approach at the end of the right arm.
    pub right_point: Point,
    pub scaling: ScalingOptions,
    pub scroll_direction: ScrollDirection,
    /// Drag distance along the scroll axis that advances one slot.
    pub simple_scroll_distance: f64,
    /// Index of the item in front after construction.
    pub default_index: usize,
    /// Easing for single-leg animations. Multi-hop rotations use linear hops and shape the
    /// rotation through hop timing instead.
    pub easing: Easing,
    /// Default duration of `transition` / `transition_to` and of expand/contract.
    pub transition_duration_ms: f64,
    /// Duration of the settle played when a drag is released.
    pub settle_duration_ms: f64,
    /// Depth of the logarithmic curve spreading a rotation's duration over its hops.
    pub hop_timing_depth: i32,
    pub on_change: Option<OnChangeCallback<T, K>>,
}

impl<T, K> Clone for SelectorOptions<T, K> {
    fn clone(&self) -> Self {
        Self {
            show: self.show,
            hide: self.hide,
            left_point: self.left_point,
            right_point: self.right_point,
            scaling: self.scaling,
            scroll_direction: self.scroll_direction,
            simple_scroll_distance: self.simple_scroll_distance,
            default_index: self.default_index,
            easing: self.easing,
            transition_duration_ms: self.transition_duration_ms,
            settle_duration_ms: self.settle_duration_ms,
            hop_timing_depth: self.hop_timing_depth,
            on_change: self.on_change.clone(),
        }
    }
}

impl<T, K> Default for SelectorOptions<T, K> {
    fn default() -> Self {
        Self {
            show: 3,
            hide: false,
            left_point: Point::new(-150.0, 25.0),
            right_point: Point::new(150.0, 25.0),
            scaling: ScalingOptions::default(),
            scroll_direction: ScrollDirection::Horizontal,
            simple_scroll_distance: 100.0,
            default_index: 0,
            easing: Easing::default(),
            transition_duration_ms: 1000.0,
            settle_duration_ms: 150.0,
            hop_timing_depth: 1,
            on_change: None,
        }
    }
}

impl<T, K> SelectorOptions<T, K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the visible items at `show` and parks the rest on the hidden arc.
    pub fn with_show(mut self, show: usize, hide: bool) -> Self {
        self.show = show;
        self.hide = hide;
        self
    }

    pub fn with_points(mut self, left_point: Point, right_point: Point) -> Self {
        self.left_point = left_point;
        self.right_point = right_point;
        self
    }

    pub fn with_scaling(mut self, scaling: ScalingOptions) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn with_vanishing_gap(mut self, vanishing_gap: f64) -> Self {
        self.scaling.vanishing_gap = vanishing_gap;
        self
    }

    pub fn with_padding(mut self, pad_left_items: usize, pad_right_items: usize) -> Self {
        self.scaling.pad_left_items = pad_left_items;
        self.scaling.pad_right_items = pad_right_items;
        self
    }

    pub fn with_scroll_direction(mut self, scroll_direction: ScrollDirection) -> Self {
        self.scroll_direction = scroll_direction;
        self
    }

    pub fn with_simple_scroll_distance(mut self, distance: f64) -> Self {
        self.simple_scroll_distance = distance;
        self
    }

    pub fn with_default_index(mut self, default_index: usize) -> Self {
        self.default_index = default_index;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_transition_duration_ms(mut self, duration_ms: f64) -> Self {
        self.transition_duration_ms = duration_ms;
        self
    }

    pub fn with_settle_duration_ms(mut self, duration_ms: f64) -> Self {
        self.settle_duration_ms = duration_ms;
        self
    }

    pub fn with_hop_timing_depth(mut self, depth: i32) -> Self {
        self.hop_timing_depth = depth;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Selector<T, K>, usize) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl<T, K> core::fmt::Debug for SelectorOptions<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SelectorOptions")
            .field("show", &self.show)
            .field("hide", &self.hide)
            .field("left_point", &self.left_point)
            .field("right_point", &self.right_point)
            .field("scaling", &self.scaling)
            .field("scroll_direction", &self.scroll_direction)
            .field("simple_scroll_distance", &self.simple_scroll_distance)
            .field("default_index", &self.default_index)
            .field("easing", &self.easing)
            .field("transition_duration_ms", &self.transition_duration_ms)
            .field("settle_duration_ms", &self.settle_duration_ms)
            .field("hop_timing_depth", &self.hop_timing_depth)
            .finish_non_exhaustive()
    }
}
