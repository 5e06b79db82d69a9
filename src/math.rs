use nalgebra as na;
use num_traits::Float;

#[inline]
fn lit<F: Float>(v: f64) -> F {
    F::from(v).unwrap_or_else(F::nan)
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn normalize_degrees<F: Float>(deg: F) -> F {
    let full = lit::<F>(360.0);
    let wrapped = deg % full;
    let wrapped = if wrapped < F::zero() {
        wrapped + full
    } else {
        wrapped
    };

    // -1e-9 % 360 + 360 rounds up to exactly 360
    if wrapped >= full {
        F::zero()
    } else {
        wrapped
    }
}

/// Shortest circular distance between two angles in degrees, at most 180.
pub fn angular_distance<F: Float>(a: F, b: F) -> F {
    let d = normalize_degrees(a - b);
    let half = lit::<F>(180.0);

    if d > half {
        lit::<F>(360.0) - d
    } else {
        d
    }
}

/// Direction of `from -> to` in image space, degrees in `[0, 360)`.
///
/// `None` when the two points coincide and the direction is undefined.
pub fn edge_angle<F: Float + na::Scalar>(from: &na::Point2<F>, to: &na::Point2<F>) -> Option<F> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    if dx == F::zero() && dy == F::zero() {
        return None;
    }

    Some(normalize_degrees(dy.atan2(dx).to_degrees()))
}

/// Twice the signed area of a polygon (shoelace). With image coordinates
/// (y pointing down) a clockwise-as-seen polygon has positive area.
pub fn signed_area2<F: Float + na::Scalar>(poly: &[na::Point2<F>]) -> F {
    let n = poly.len();
    let mut acc = F::zero();

    for i in 0..n {
        let p1 = &poly[i];
        let p2 = &poly[(i + 1) % n];
        acc = acc + (p1.x * p2.y - p2.x * p1.y);
    }

    acc
}

pub fn centroid(poly: &[na::Point2<f32>]) -> na::Point2<f32> {
    if poly.is_empty() {
        return na::Point2::origin();
    }

    let sum = poly
        .iter()
        .fold(na::Vector2::zeros(), |acc, p| acc + p.coords);

    (sum / poly.len() as f32).into()
}
