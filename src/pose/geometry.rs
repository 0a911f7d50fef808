//! Joint angle and displacement helpers

use super::Landmark;

/// Angle in degrees at `b` formed by the segments towards `a` and `c`
///
/// Computed as `|atan2(c - b) - atan2(a - b)|` without folding into
/// [0, 180]: reflex configurations come back above 180. The knee-bend
/// threshold is calibrated against this raw value.
pub fn calculate_angle(a: &Landmark, b: &Landmark, c: &Landmark) -> f32 {
    let to_c = (c.y - b.y).atan2(c.x - b.x);
    let to_a = (a.y - b.y).atan2(a.x - b.x);
    (to_c - to_a).to_degrees().abs()
}

/// 3D Euclidean distance between the same landmark in two frames
pub fn displacement(previous: &Landmark, current: &Landmark) -> f32 {
    let dx = current.x - previous.x;
    let dy = current.y - previous.y;
    let dz = current.z - previous.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}
