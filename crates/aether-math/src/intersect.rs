//! Ray/plane and ray/sphere intersection plus the interval subtraction used to
//! carve a planet out of its atmosphere shell.

use glam::Vec3;

use crate::{HALF_CHORD_FLOOR, Interval, SMALL};

/// Signed distance along the ray `a0 + t·a` to the plane through `b0` with normal `n`.
///
/// Returns `None` when the ray runs parallel to the plane (`|a·n| < SMALL`).
pub fn ray_plane_distance(a0: Vec3, a: Vec3, b0: Vec3, n: Vec3) -> Option<f32> {
    let denom = a.dot(n);
    if denom.abs() < SMALL {
        return None;
    }
    Some(-(a0 - b0).dot(n) / denom)
}

/// Ray parameters at which the ray `a0 + t·a` enters and exits the sphere of
/// radius `r` centred at `b0`.
///
/// Uses the closest-approach decomposition: `xz` is the parameter of closest
/// approach and `z` the distance from the centre at that point. `a` is
/// expected to be unit length; a longer vector scales `xz` without scaling the
/// half chord. Returns `None` unless `r² - z² > 0`.
pub fn ray_sphere_interval(a0: Vec3, a: Vec3, b0: Vec3, r: f32) -> Option<Interval> {
    let xz = (b0 - a0).dot(a);
    let z = (a0 + a * xz - b0).length();
    let y2 = r * r - z * z;
    if y2 <= 0.0 {
        return None;
    }
    let dxr = y2.max(HALF_CHORD_FLOOR).sqrt();
    Some(Interval::new(xz - dxr, xz + dxr))
}

/// Subtract an obstruction interval from a region of interest.
///
/// This is not general set subtraction. It returns the nearer remaining
/// sub-interval, `[positive.entrance, negative.entrance]` when the obstruction
/// sits inside the region. If that piece lies entirely behind the ray origin
/// while the region still extends past it, the far piece
/// `[negative.exit, positive.exit]` is returned instead. `None` when there is
/// no region, or when the obstruction strictly contains it.
pub fn interval_difference(positive: Option<Interval>, negative: Option<Interval>) -> Option<Interval> {
    let positive = positive?;
    let Some(negative) = negative else {
        return Some(positive);
    };

    if negative.entrance < positive.entrance && positive.exit < negative.exit {
        return None;
    }

    let entrance = negative.exit.min(positive.entrance);
    let exit = negative.entrance.min(positive.exit);
    if exit < 0.0 && 0.0 < positive.exit {
        return Some(Interval::new(negative.exit, positive.exit));
    }
    Some(Interval::new(entrance, exit))
}

/// Reciprocal of the sum of reciprocals, `1 / (1/a + 1/b)`.
///
/// Behaves like `min(a, b)` when the inputs differ greatly and never exceeds
/// either argument for positive inputs, which makes it useful for taming
/// terms that would otherwise blow up near zero.
pub fn oplus(a: f32, b: f32) -> f32 {
    1.0 / (1.0 / a + 1.0 / b)
}
