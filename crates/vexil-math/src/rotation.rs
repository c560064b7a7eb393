//! Orientation builders.

use glam::{EulerRot, Mat3, Quat, Vec3};

/// Orientation whose local +Z axis points along `forward`, with local +Y
/// as close to `up` as possible.
///
/// Falls back to an alternate up axis when `up` is parallel to `forward`,
/// and to the identity for a zero `forward`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let z = forward.normalize_or_zero();
    if z == Vec3::ZERO {
        return Quat::IDENTITY;
    }

    let mut x = up.cross(z);
    if x.length_squared() < 1e-12 {
        let alternate = if z.y.abs() < 0.99 { Vec3::Y } else { Vec3::X };
        x = alternate.cross(z);
    }
    let x = x.normalize();
    let y = z.cross(x);

    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}

/// Shortest-arc rotation taking +Z onto `normal`.
///
/// A zero or non-finite normal yields the identity.
pub fn align_z_to(normal: Vec3) -> Quat {
    let n = normal.normalize_or_zero();
    if n == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_arc(Vec3::Z, n)
}

/// Trackball-style rotation for a pointer drag.
///
/// `dx` and `dy` are drag distances normalized by the viewport size;
/// vertical motion pitches about X, horizontal motion yaws about Y.
pub fn trackball_delta(dx: f32, dy: f32, speed: f32) -> Quat {
    Quat::from_euler(EulerRot::XYZ, dy * speed, dx * speed, 0.0)
}
