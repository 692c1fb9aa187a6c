/// Vector helpers on top of nalgebra
///
/// The arithmetic itself is nalgebra's. The functions here pin down the
/// policies the renderer depends on, most importantly that normalizing a
/// zero-length vector hands the input back instead of producing NaNs.
use nalgebra::{Vector2, Vector3};

pub fn add(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a + b
}

pub fn sub(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a - b
}

pub fn scale(v: &Vector3<f64>, s: f64) -> Vector3<f64> {
    v * s
}

pub fn dot(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.dot(b)
}

pub fn cross(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a.cross(b)
}

pub fn length(v: &Vector3<f64>) -> f64 {
    dot(v, v).sqrt()
}

/// Unit vector in the direction of `v`, or `v` itself when it has no length
pub fn normalize(v: &Vector3<f64>) -> Vector3<f64> {
    let len = length(v);
    if len == 0.0 {
        return *v;
    }
    scale(v, 1.0 / len)
}

pub fn scale2(v: &Vector2<f64>, s: f64) -> Vector2<f64> {
    v * s
}

/// 2D counterpart of [`normalize`] with the same zero-length policy
pub fn normalize2(v: &Vector2<f64>) -> Vector2<f64> {
    let len = v.dot(v).sqrt();
    if len == 0.0 {
        return *v;
    }
    scale2(v, 1.0 / len)
}

/// Clamp `value` into `[min, max]`
///
/// Unlike `Ord::clamp` this never panics on an inverted range; `min` wins.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
