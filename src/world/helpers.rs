use std::f32::consts::TAU;

// ──────────────────────────────────────────────────────────────────────────
//                         Angle normalisation
// ──────────────────────────────────────────────────────────────────────────

/// Wrap any finite angle into `[0, 2π)`.
///
/// `rem_euclid` may round a tiny negative input up to exactly `TAU`, which
/// lies outside the half-open range; that case folds back to `0.0`.
/// Non-finite input maps to `0.0` so a bad delta can never poison the
/// camera heading.
#[inline]
pub fn normalize_angle(a: f32) -> f32 {
    if !a.is_finite() {
        return 0.0;
    }
    let r = a.rem_euclid(TAU);
    if r >= TAU { 0.0 } else { r }
}
