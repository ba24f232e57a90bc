use alloc::vec::Vec;

use crate::{ScaleFn, Span};

/// Splits `total_ms` across the `|distance|` hops of a rotation.
///
/// Hop boundaries are the samples of a logarithmic time curve over `[0, distance] →
/// [0, total_ms]` at each whole hop; hop `k` lasts from boundary `k` to boundary `k + 1`. With
/// a positive `depth` the curve is concave, so each hop is shorter than the one before it; a
/// negative depth reverses that, and zero spreads the time evenly.
///
/// The durations always sum to `total_ms` (up to float rounding). Returns an empty schedule
/// for `distance == 0`.
pub fn hop_durations(distance: isize, total_ms: f64, depth: i32) -> Vec<f64> {
    let hops = distance.unsigned_abs();
    if hops == 0 {
        return Vec::new();
    }

    let curve = ScaleFn::logarithmic(
        Span::new(0.0, distance as f64),
        Span::new(0.0, total_ms),
        depth,
    );
    let step = distance.signum() as f64;

    let mut out = Vec::with_capacity(hops);
    let mut prev = curve.sample(0.0);
    for k in 1..=hops {
        let at = curve.sample(k as f64 * step);
        out.push(at - prev);
        prev = at;
    }
    out
}
