use nalgebra::{Vector2, Vector3};
use quickcheck_macros::quickcheck;
use trishade_core::transform::{transform_point, Transform};
use trishade_core::vector::{length, normalize, normalize2};

/// Map small integers onto tame floats so every product stays finite
fn vec3(x: i16, y: i16, z: i16) -> Vector3<f64> {
    Vector3::new(f64::from(x) / 8.0, f64::from(y) / 8.0, f64::from(z) / 8.0)
}

#[quickcheck]
fn identity_transform_is_identity(x: i16, y: i16, z: i16) -> bool {
    let v = vec3(x, y, z);
    transform_point(&v, &Transform::identity()) == v
}

#[quickcheck]
fn normalize_is_unit_or_zero(x: i16, y: i16, z: i16) -> bool {
    let v = vec3(x, y, z);
    let n = normalize(&v);
    if v == Vector3::zeros() {
        n == v
    } else {
        (length(&n) - 1.0).abs() < 1e-12
    }
}

#[quickcheck]
fn normalize2_is_unit_or_zero(x: i16, y: i16) -> bool {
    let v = Vector2::new(f64::from(x), f64::from(y));
    let n = normalize2(&v);
    if v == Vector2::zeros() {
        n == v
    } else {
        (n.norm() - 1.0).abs() < 1e-12
    }
}

#[quickcheck]
fn rotation_preserves_length(x: i16, y: i16, z: i16, rx: i16, ry: i16, rz: i16) -> bool {
    let v = vec3(x, y, z);
    let turn = Transform::rotation_only(vec3(rx, ry, rz) / 64.0);
    (turn.transform_point(&v).norm() - v.norm()).abs() < 1e-9
}
