mod aabb;
mod color;

pub use aabb::Aabb;
pub use color::{srgb_to_linear, Rgb};

use std::f32::consts::TAU;

/// Wraps an angle into [0, 2π)
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
