//! Even spacing of satellites around a circular orbit.

use std::f64::consts::{PI, TAU};

use super::Vec2;

/// Distance from the body centre to every satellite.
pub fn orbital_radius(body_radius: f64, altitude: f64) -> f64 {
    body_radius + altitude
}

/// Polar angle of slot `index` out of `count`, measured clockwise from +y.
/// The π offset puts slot 0 at the bottom of the plot.
pub fn slot_angle(count: u32, index: u32) -> f64 {
    PI + TAU * (f64::from(index) / f64::from(count))
}

/// Position of satellite `index` among `count` evenly spaced slots.
///
/// Callers must keep `index < count`; use [`positions`] when iterating a
/// whole ring, which handles `count == 0` by returning nothing.
pub fn position(orbital_radius: f64, count: u32, index: u32) -> Vec2 {
    debug_assert!(index < count, "satellite {index} out of {count}");
    let angle = slot_angle(count, index);
    Vec2::new(orbital_radius * angle.sin(), orbital_radius * angle.cos())
}

/// All `count` positions, indexed by satellite.
pub fn positions(orbital_radius: f64, count: u32) -> Vec<Vec2> {
    (0..count)
        .map(|index| position(orbital_radius, count, index))
        .collect()
}
