//! Geometric helpers for normalized landmark coordinates.
//!
//! Distances come back in the same normalized units as the landmarks
//! themselves; angles are reported in degrees.

use crate::constants::EPSILON;
use crate::error::{Error, Result};
use crate::landmarks::Landmark;

/// Euclidean distance between two landmarks, in normalized units
#[must_use]
pub fn distance(a: Landmark, b: Landmark) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx.hypot(dy)
}

/// Interior angle at `vertex` formed by the rays toward `a` and `b`
///
/// Computed via the law of cosines on the triangle `a`-`vertex`-`b` and
/// returned in degrees within `[0.0, 180.0]`. The cosine is clamped to
/// `[-1.0, 1.0]` before `acos` so collinear points cannot produce NaN
/// through rounding.
///
/// # Errors
///
/// Returns [`Error::DegenerateGeometry`] when either ray has (near) zero
/// length, i.e. `a` or `b` coincides with `vertex`.
pub fn angle_between(a: Landmark, vertex: Landmark, b: Landmark) -> Result<f64> {
    let ray_a_sq = squared_distance(a, vertex);
    let ray_b_sq = squared_distance(b, vertex);

    if ray_a_sq < EPSILON || ray_b_sq < EPSILON {
        return Err(Error::DegenerateGeometry(format!(
            "angle undefined for zero-length ray at vertex ({:.4}, {:.4})",
            vertex.x, vertex.y
        )));
    }

    let opposite_sq = squared_distance(a, b);
    let cosine = (ray_a_sq + ray_b_sq - opposite_sq) / (2.0 * (ray_a_sq * ray_b_sq).sqrt());

    Ok(cosine.clamp(-1.0, 1.0).acos().to_degrees())
}

fn squared_distance(a: Landmark, b: Landmark) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}
