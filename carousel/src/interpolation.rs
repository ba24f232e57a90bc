//! Interpolation maps: piecewise-linear tables from a (continuous) slot index to a rendered
//! property value.
//!
//! A map samples three arms of the circle:
//!
//! ```text
//! right arm           hidden arm      left arm
//! 0 1 .. R  R+gap  |  R+1 .. R+H  |  (R+H+1)-gap  R+H+1 .. N-1  N
//! center -> right     right -> left   left <- center (walked back from N)
//! ```
//!
//! Slot `N` closes the circle back onto slot 0, so the table is continuous across the wrap.
//! Padding slots are sampled past the visible ends of the arms to shape the curve near the
//! vanishing points, then spliced out of the final table.

use alloc::vec::Vec;

use crate::{ArmSide, Axis, InverseLookup, MapError, Point, ScaleFn, Scaling, Span};

/// Number of slots on each arm of the circle (excluding the front slot).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmCounts {
    pub right: usize,
    pub left: usize,
    pub hidden: usize,
}

impl ArmCounts {
    /// Splits `count` items into arms: `show` caps the visible items (front included) when
    /// `hide` is set; otherwise every item is visible. The right arm takes the odd one out.
    ///
    /// The front slot is always shown, so `show == 0` behaves like `show == 1`.
    pub fn resolve(count: usize, show: usize, hide: bool) -> Self {
        let shown = if hide { count.min(show.max(1)) } else { count };
        let arms = shown.saturating_sub(1);
        let left = arms / 2;
        Self {
            right: arms - left,
            left,
            hidden: count - shown,
        }
    }

    /// Total slot count on the circle: front + right + hidden + left.
    pub fn total(&self) -> usize {
        1 + self.right + self.hidden + self.left
    }
}

/// Geometry of one visible arm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArmBounds<V> {
    /// Value approached at the arm's vanishing point.
    pub target: V,
    pub pad_points: usize,
    pub scaling: Scaling,
    pub depth: i32,
    /// Fractional offset of the vanishing sample past the last slot.
    pub vanishing_gap: f64,
}

/// Curve used across the hidden arm.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HiddenBounds {
    pub scaling: Scaling,
    pub depth: i32,
}

/// Everything a map needs besides the arm counts. `V` is `f64` for a single property and
/// [`Point`] for a 2D property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds<V> {
    pub center: V,
    pub left: ArmBounds<V>,
    pub right: ArmBounds<V>,
    pub hidden: HiddenBounds,
}

impl<V: Copy> ArmBounds<V> {
    fn project<U>(&self, f: impl Fn(V) -> U) -> ArmBounds<U> {
        ArmBounds {
            target: f(self.target),
            pad_points: self.pad_points,
            scaling: self.scaling,
            depth: self.depth,
            vanishing_gap: self.vanishing_gap,
        }
    }
}

impl Bounds<Point> {
    /// The single-axis bounds for `axis`.
    pub fn axis(&self, axis: Axis) -> Bounds<f64> {
        Bounds {
            center: self.center.axis(axis),
            left: self.left.project(|p| p.axis(axis)),
            right: self.right.project(|p| p.axis(axis)),
            hidden: self.hidden,
        }
    }
}

/// Sample positions for the three arms.
struct ArmSamples {
    right: Vec<f64>,
    hidden: Vec<f64>,
    left: Vec<f64>,
}

impl ArmSamples {
    fn new(counts: ArmCounts, right_pad: usize, left_pad: usize, bounds: &Bounds<f64>) -> Self {
        let right_max = counts.right + right_pad;
        let mut right: Vec<f64> = (0..=right_max).map(|i| i as f64).collect();
        right.push(right_max as f64 + bounds.right.vanishing_gap);

        let next = right_max + 1;
        let hidden: Vec<f64> = (next..next + counts.hidden).map(|i| i as f64).collect();

        let next = next + counts.hidden;
        let left_max = next + left_pad + counts.left - 1;
        let mut left = Vec::with_capacity(counts.left + left_pad + 2);
        left.push(next as f64 - bounds.left.vanishing_gap);
        left.extend((next..=left_max).map(|i| i as f64));
        // Closes the circle back onto slot 0.
        left.push((left_max + 1) as f64);

        Self {
            right,
            hidden,
            left,
        }
    }

    fn concat(self) -> Vec<f64> {
        let mut out = self.right;
        out.extend(self.hidden);
        out.extend(self.left);
        out
    }
}

fn sample_arm(f: &ScaleFn, points: &[f64], out: &mut Vec<f64>) {
    if f.input().is_degenerate() {
        out.extend(points.iter().map(|_| f.output().start));
    } else {
        out.extend(points.iter().map(|&p| f.sample(p)));
    }
}

/// A piecewise-linear map from slot index to one property value.
///
/// `input_range` is strictly increasing and the same length as `output_range`.
#[derive(Clone, Debug, PartialEq)]
pub struct InterpolationMap {
    input_range: Vec<f64>,
    output_range: Vec<f64>,
    // Input extents of the right and left arms, vanishing samples included.
    right_arm: Span,
    left_arm: Span,
}

impl InterpolationMap {
    /// Builds the map for one property.
    pub fn build(bounds: &Bounds<f64>, counts: ArmCounts) -> Self {
        let padded = ArmSamples::new(
            counts,
            bounds.right.pad_points,
            bounds.left.pad_points,
            bounds,
        );

        let mut output = Vec::with_capacity(
            padded.right.len() + padded.hidden.len() + padded.left.len(),
        );

        let right_last = padded.right[padded.right.len() - 1];
        let right = ScaleFn::new(
            bounds.right.scaling,
            Span::new(padded.right[0], right_last),
            Span::new(bounds.center, bounds.right.target),
            bounds.right.depth,
        );
        sample_arm(&right, &padded.right, &mut output);

        if let (Some(&first), Some(&last)) = (padded.hidden.first(), padded.hidden.last()) {
            let span = Span::new(bounds.right.target, bounds.left.target);
            if first == last {
                output.push(span.midpoint());
            } else {
                let hidden = ScaleFn::new(
                    bounds.hidden.scaling,
                    Span::new(first, last),
                    span,
                    bounds.hidden.depth,
                );
                sample_arm(&hidden, &padded.hidden, &mut output);
            }
        }

        // Walked from the wrap slot back toward the vanishing point.
        let left = ScaleFn::new(
            bounds.left.scaling,
            Span::new(padded.left[padded.left.len() - 1], padded.left[0]),
            Span::new(bounds.center, bounds.left.target),
            bounds.left.depth,
        );
        sample_arm(&left, &padded.left, &mut output);

        strip_padding(
            &mut output,
            counts,
            bounds.right.pad_points,
            bounds.left.pad_points,
        );

        let unpadded = ArmSamples::new(counts, 0, 0, bounds);
        let right_arm = Span::new(unpadded.right[0], unpadded.right[unpadded.right.len() - 1]);
        let left_arm = Span::new(unpadded.left[0], unpadded.left[unpadded.left.len() - 1]);
        let input = unpadded.concat();
        debug_assert_eq!(input.len(), output.len());

        let (input_range, output_range) = dedup_inputs(input, output);
        Self {
            input_range,
            output_range,
            right_arm,
            left_arm,
        }
    }

    pub fn input_range(&self) -> &[f64] {
        &self.input_range
    }

    pub fn output_range(&self) -> &[f64] {
        &self.output_range
    }

    pub fn len(&self) -> usize {
        self.input_range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_range.is_empty()
    }

    /// Input extent of an arm, vanishing sample included.
    pub fn arm_span(&self, side: ArmSide) -> Span {
        match side {
            ArmSide::Right => self.right_arm,
            ArmSide::Left => self.left_arm,
        }
    }

    /// Evaluates the map at `input`, extending the edge segments beyond the sampled range.
    pub fn sample(&self, input: f64) -> f64 {
        interpolate(&self.input_range, &self.output_range, input)
    }

    /// Builds an inverse lookup over one arm.
    ///
    /// The whole map is not monotonic around the circle, so each arm gets its own inverse.
    pub fn arm_inverse(&self, side: ArmSide) -> Result<InverseLookup, MapError> {
        let span = self.arm_span(side);
        let (inputs, outputs): (Vec<f64>, Vec<f64>) = self
            .input_range
            .iter()
            .zip(&self.output_range)
            .filter(|(x, _)| span.contains(**x))
            .map(|(x, y)| (*x, *y))
            .unzip();
        InverseLookup::new(&inputs, &outputs)
    }

    /// Forces every output whose input lies outside all of `windows` (closed intervals) to
    /// `default`.
    pub fn windowed(&self, default: f64, windows: &[Span]) -> Self {
        let output_range = self
            .input_range
            .iter()
            .zip(&self.output_range)
            .map(|(x, y)| {
                if windows.iter().any(|w| w.start <= *x && *x <= w.end) {
                    *y
                } else {
                    default
                }
            })
            .collect();
        Self {
            input_range: self.input_range.clone(),
            output_range,
            right_arm: self.right_arm,
            left_arm: self.left_arm,
        }
    }
}

/// Two maps over one shared input range.
#[derive(Clone, Debug, PartialEq)]
pub struct InterpolationMap2D {
    x: InterpolationMap,
    y: InterpolationMap,
}

impl InterpolationMap2D {
    pub fn build(bounds: &Bounds<Point>, counts: ArmCounts) -> Self {
        // Deduplication only looks at inputs, so both axes end up on the same input range.
        let x = InterpolationMap::build(&bounds.axis(Axis::X), counts);
        let y = InterpolationMap::build(&bounds.axis(Axis::Y), counts);
        debug_assert_eq!(x.input_range, y.input_range);
        Self { x, y }
    }

    pub fn input_range(&self) -> &[f64] {
        self.x.input_range()
    }

    pub fn axis(&self, axis: Axis) -> &InterpolationMap {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    pub fn sample(&self, input: f64) -> Point {
        Point::new(self.x.sample(input), self.y.sample(input))
    }
}

/// Removes the padding samples from a dense output table: `right_pad` entries after the last
/// visible right slot, then symmetrically `left_pad` entries before the first visible left slot
/// counting back from the wrap slot.
fn strip_padding(output: &mut Vec<f64>, counts: ArmCounts, right_pad: usize, left_pad: usize) {
    let right_start = counts.right + 1;
    output.drain(right_start..right_start + right_pad);
    output.reverse();
    let left_start = counts.left + 1;
    output.drain(left_start..left_start + left_pad);
    output.reverse();
}

/// Drops samples whose input repeats the previous one (a zero vanishing gap).
fn dedup_inputs(input: Vec<f64>, output: Vec<f64>) -> (Vec<f64>, Vec<f64>) {
    let mut xs = Vec::with_capacity(input.len());
    let mut ys = Vec::with_capacity(output.len());
    for (x, y) in input.into_iter().zip(output) {
        if xs.last().is_some_and(|&last| x <= last) {
            continue;
        }
        xs.push(x);
        ys.push(y);
    }
    (xs, ys)
}

pub(crate) fn interpolate(inputs: &[f64], outputs: &[f64], x: f64) -> f64 {
    match inputs.len() {
        0 => return 0.0,
        1 => return outputs[0],
        _ => {}
    }
    let last = inputs.len() - 1;
    let upper = inputs.partition_point(|&i| i < x);
    let i = upper.saturating_sub(1).min(last - 1);
    let (x0, x1) = (inputs[i], inputs[i + 1]);
    let (y0, y1) = (outputs[i], outputs[i + 1]);
    y0 + (x - x0) / (x1 - x0) * (y1 - y0)
}
