use alloc::vec::Vec;
use core::f64::consts::E;

use crate::{MapError, Span};

/// The family of curves used to sample arm geometry and hop timing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scaling {
    #[default]
    Linear,
    /// `x ↦ ln(1 + (e - 1)x)`, iterated `depth` times. Motion compresses toward the far end.
    Logarithmic,
    /// `x ↦ √x`, iterated `depth` times.
    Sqrt,
}

/// A mapping from an input [`Span`] to an output [`Span`] through a [`Scaling`] curve.
///
/// The input is normalized to `[0, 1]`, the curve is applied `|depth|` times (its inverse when
/// `depth < 0`), and the result is stretched onto the output span. A depth of zero degenerates
/// to linear for every curve.
///
/// A degenerate input span (`start == end`) makes the normalization divide by zero; callers
/// avoid it by construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFn {
    scaling: Scaling,
    input: Span,
    output: Span,
    depth: i32,
}

impl ScaleFn {
    pub fn new(scaling: Scaling, input: Span, output: Span, depth: i32) -> Self {
        let scaling = if depth == 0 { Scaling::Linear } else { scaling };
        Self {
            scaling,
            input,
            output,
            depth,
        }
    }

    pub fn linear(input: Span, output: Span) -> Self {
        Self::new(Scaling::Linear, input, output, 1)
    }

    pub fn logarithmic(input: Span, output: Span, depth: i32) -> Self {
        Self::new(Scaling::Logarithmic, input, output, depth)
    }

    pub fn sqrt(input: Span, output: Span, depth: i32) -> Self {
        Self::new(Scaling::Sqrt, input, output, depth)
    }

    pub fn scaling(&self) -> Scaling {
        self.scaling
    }

    pub fn input(&self) -> Span {
        self.input
    }

    pub fn output(&self) -> Span {
        self.output
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn sample(&self, input: f64) -> f64 {
        let mut v = (input - self.input.start) / self.input.width();
        let forward = self.depth > 0;
        for _ in 0..self.depth.unsigned_abs() {
            v = match self.scaling {
                Scaling::Linear => break,
                Scaling::Logarithmic if forward => (1.0 + (E - 1.0) * v).ln(),
                Scaling::Logarithmic => (v.exp() - 1.0) / (E - 1.0),
                Scaling::Sqrt if forward => v.sqrt(),
                Scaling::Sqrt => v * v,
            };
        }
        self.output.start + v * self.output.width()
    }
}

/// Maps an output value back to the input that produced it, by local linear interpolation over
/// a monotonic sample table.
///
/// Values outside the sampled outputs are extrapolated from the nearest segment.
#[derive(Clone, Debug, PartialEq)]
pub struct InverseLookup {
    // Ascending by output.
    outputs: Vec<f64>,
    inputs: Vec<f64>,
}

impl InverseLookup {
    pub fn new(inputs: &[f64], outputs: &[f64]) -> Result<Self, MapError> {
        if inputs.len() != outputs.len() {
            return Err(MapError::LengthMismatch {
                inputs: inputs.len(),
                outputs: outputs.len(),
            });
        }
        if inputs.len() < 2 {
            return Err(MapError::TooFewSamples { len: inputs.len() });
        }

        let mut inputs = inputs.to_vec();
        let mut outputs = outputs.to_vec();
        if outputs[outputs.len() - 1] < outputs[0] {
            inputs.reverse();
            outputs.reverse();
        }
        Ok(Self { outputs, inputs })
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn lookup(&self, value: f64) -> f64 {
        let last = self.outputs.len() - 1;
        let upper = self.outputs.partition_point(|&o| o < value);
        let i = upper.saturating_sub(1).min(last - 1);

        let (o0, o1) = (self.outputs[i], self.outputs[i + 1]);
        let (x0, x1) = (self.inputs[i], self.inputs[i + 1]);
        if o1 == o0 {
            return x0;
        }
        x0 + (value - o0) / (o1 - o0) * (x1 - x0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn linear_maps_endpoints_and_midpoint() {
        let f = ScaleFn::linear(Span::new(2.0, 4.0), Span::new(10.0, 20.0));
        assert!(close(f.sample(2.0), 10.0));
        assert!(close(f.sample(3.0), 15.0));
        assert!(close(f.sample(4.0), 20.0));
    }

    #[test]
    fn logarithmic_keeps_endpoints_and_bends_upward() {
        let f = ScaleFn::logarithmic(Span::new(0.0, 1.0), Span::new(0.0, 1.0), 1);
        assert!(close(f.sample(0.0), 0.0));
        assert!(close(f.sample(1.0), 1.0));
        assert!(f.sample(0.5) > 0.5);

        let deeper = ScaleFn::logarithmic(Span::new(0.0, 1.0), Span::new(0.0, 1.0), 2);
        assert!(deeper.sample(0.5) > f.sample(0.5));
    }

    #[test]
    fn negative_depth_inverts_the_curve() {
        let fwd = ScaleFn::logarithmic(Span::new(0.0, 1.0), Span::new(0.0, 1.0), 1);
        let inv = ScaleFn::logarithmic(Span::new(0.0, 1.0), Span::new(0.0, 1.0), -1);
        for x in [0.0, 0.1, 0.3, 0.7, 1.0] {
            assert!(close(inv.sample(fwd.sample(x)), x));
        }

        let sq = ScaleFn::sqrt(Span::new(0.0, 1.0), Span::new(0.0, 1.0), -1);
        assert!(close(sq.sample(0.5), 0.25));
    }

    #[test]
    fn zero_depth_degenerates_to_linear() {
        let f = ScaleFn::logarithmic(Span::new(0.0, 10.0), Span::new(0.0, 100.0), 0);
        assert_eq!(f.scaling(), Scaling::Linear);
        assert!(close(f.sample(3.0), 30.0));

        let s = ScaleFn::sqrt(Span::new(0.0, 10.0), Span::new(0.0, 100.0), 0);
        assert!(close(s.sample(3.0), 30.0));
    }

    #[test]
    fn reversed_input_span_walks_backwards() {
        let f = ScaleFn::sqrt(Span::new(4.0, 0.0), Span::new(0.0, -100.0), 1);
        assert!(close(f.sample(4.0), 0.0));
        assert!(close(f.sample(0.0), -100.0));
        assert!(close(f.sample(3.0), -50.0));
    }

    #[test]
    fn inverse_lookup_handles_both_directions() {
        let up = InverseLookup::new(&[0.0, 1.0, 2.0], &[0.0, 10.0, 40.0]).unwrap();
        assert!(close(up.lookup(5.0), 0.5));
        assert!(close(up.lookup(25.0), 1.5));

        let down = InverseLookup::new(&[0.0, 1.0, 2.0], &[40.0, 10.0, 0.0]).unwrap();
        assert!(close(down.lookup(5.0), 1.5));
        assert!(close(down.lookup(25.0), 0.5));
        assert!(close(down.lookup(40.0), 0.0));
    }

    #[test]
    fn inverse_lookup_extrapolates_from_the_edge_segments() {
        let f = InverseLookup::new(&[0.0, 1.0, 2.0], &[0.0, 10.0, 20.0]).unwrap();
        assert!(close(f.lookup(-10.0), -1.0));
        assert!(close(f.lookup(30.0), 3.0));
    }

    #[test]
    fn inverse_lookup_rejects_degenerate_tables() {
        assert_eq!(
            InverseLookup::new(&[0.0], &[1.0]),
            Err(MapError::TooFewSamples { len: 1 })
        );
        assert_eq!(
            InverseLookup::new(&[0.0, 1.0], &[1.0]),
            Err(MapError::LengthMismatch {
                inputs: 2,
                outputs: 1
            })
        );
    }
}
