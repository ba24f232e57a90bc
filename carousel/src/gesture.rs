use crate::{Point, wrap_position};

/// The axis along which a drag advances the carousel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    /// Dragging right increases the index.
    #[default]
    Horizontal,
    /// Dragging up increases the index.
    Vertical,
    /// Follows the line from the left vanishing point to the right one.
    Adaptive,
    Custom(Point),
}

impl ScrollDirection {
    /// Resolves to a unit vector. Degenerate inputs (coincident points, zero custom vector)
    /// fall back to horizontal.
    pub fn unit_vector(self, left_point: Point, right_point: Point) -> Point {
        const HORIZONTAL: Point = Point::new(1.0, 0.0);
        match self {
            Self::Horizontal => HORIZONTAL,
            Self::Vertical => Point::new(0.0, -1.0),
            Self::Adaptive => (right_point - left_point).normalized().unwrap_or(HORIZONTAL),
            Self::Custom(v) => v.normalized().unwrap_or(HORIZONTAL),
        }
    }
}

/// Turns drag displacements into fractional index increments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureProjector {
    unit: Point,
    scroll_distance: f64,
}

impl GestureProjector {
    /// `scroll_distance` is the displacement along `unit` that advances one full slot.
    pub fn new(unit: Point, scroll_distance: f64) -> Self {
        Self {
            unit,
            scroll_distance,
        }
    }

    pub fn unit(&self) -> Point {
        self.unit
    }

    pub fn scroll_distance(&self) -> f64 {
        self.scroll_distance
    }

    /// `dot(displacement, unit) / scroll_distance`; zero when the distance is not positive.
    pub fn increment(&self, displacement: Point) -> f64 {
        if self.scroll_distance <= 0.0 {
            return 0.0;
        }
        displacement.dot(self.unit) / self.scroll_distance
    }

    /// Where an item settled at `slot` is rendered while the drag has advanced `increment`
    /// slots, wrapped into `[0, total)`.
    pub fn dragged_position(slot: usize, increment: f64, total: usize) -> f64 {
        wrap_position(slot as f64 + increment, total)
    }
}
