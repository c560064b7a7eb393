//! Pseudo-turbulent wind field.
//!
//! Sums of sinusoids at distinct per-axis periods (7000, 5000, 3000, 2000
//! and 1500 ms at unit speed) so the pattern never visibly repeats.

use vexil_math::Vec3;

/// Wind vector at rest-plane coordinates `(x, y)` and time `time_ms`.
///
/// Magnitude and direction both vary with position and time; `speed`
/// scales how fast the pattern evolves.
pub fn turbulent_wind(x: f32, y: f32, time_ms: f64, strength: f32, speed: f32) -> Vec3 {
    // Phases stay in f64: host timestamps grow large enough to lose
    // sub-period precision in f32.
    let t = time_ms * speed as f64;
    let (x, y) = (x as f64, y as f64);

    let magnitude = strength as f64
        * ((t / 7000.0 + x * 0.1).cos() * 2.0 + 4.0)
        * (1.0 + (t / 5000.0 + y * 0.15).sin() * 0.3);

    let direction = Vec3::new(
        (t / 2000.0 + x * 0.5).sin() as f32,
        (t / 3000.0 + y * 0.8).cos() as f32,
        (t / 1500.0 + x * 0.3 + y * 0.4).sin() as f32,
    )
    .normalize_or_zero();

    direction * magnitude as f32
}

/// Component of `wind` along the surface normal.
///
/// Only the part pushing perpendicular to the local surface is kept, so
/// the cloth billows instead of translating.
#[inline]
pub fn project_on_normal(wind: Vec3, normal: Vec3) -> Vec3 {
    let n = normal.normalize_or_zero();
    n * n.dot(wind)
}
