//! Line-of-sight and radio range between neighbouring satellites.

use std::f64::consts::{PI, TAU};

/// Connectivity of one adjacent pair `(from, to)` in the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: u32,
    pub to: u32,
    /// Separation is within omni range.
    pub in_range: bool,
    /// The straight path between the pair misses the body.
    pub line_of_sight: bool,
    /// Both of the above.
    pub linked: bool,
    /// Straight-line separation in km.
    pub distance: f64,
}

/// Chord length between two points on a circle of radius `r` that are `angle`
/// radians apart (law of cosines).
pub fn chord_separation(r: f64, angle: f64) -> f64 {
    let squared = 2.0 * r * r - 2.0 * r * r * angle.cos();
    squared.max(0.0).sqrt()
}

/// Distance from the body centre to the midpoint of a chord of length
/// `separation` on a circle of radius `r`. `None` when the chord is longer
/// than the diameter.
pub fn chord_clearance(r: f64, separation: f64) -> Option<f64> {
    let squared = r * r - (separation / 2.0).powi(2);
    (squared >= 0.0).then(|| squared.sqrt())
}

/// Whether the chord between two satellites `separation` apart on an orbit of
/// radius `r` stays outside the body.
pub fn has_line_of_sight(body_radius: f64, r: f64, separation: f64) -> bool {
    matches!(chord_clearance(r, separation), Some(clearance) if clearance >= body_radius)
}

/// Connectivity of satellite `index` to its clockwise neighbour.
pub fn link_between(body_radius: f64, r: f64, count: u32, omni_range: f64, index: u32) -> Link {
    let separation = chord_separation(r, TAU / f64::from(count));
    let in_range = separation <= omni_range;
    let line_of_sight = has_line_of_sight(body_radius, r, separation);
    Link {
        from: index,
        to: (index + 1) % count,
        in_range,
        line_of_sight,
        linked: in_range && line_of_sight,
        distance: separation,
    }
}

/// One [`Link`] per adjacent pair, cyclic.
///
/// Fewer than two satellites have no neighbour, so the ring is empty.
pub fn ring_links(body_radius: f64, r: f64, count: u32, omni_range: f64) -> Vec<Link> {
    if count < 2 {
        return Vec::new();
    }
    (0..count)
        .map(|index| link_between(body_radius, r, count, omni_range, index))
        .collect()
}

/// True when every adjacent pair is linked, closing the relay ring.
pub fn ring_closed(links: &[Link]) -> bool {
    !links.is_empty() && links.iter().all(|link| link.linked)
}

/// Lowest altitude at which `count` evenly spaced satellites clear the body
/// when looking at their neighbours: `R · (1/cos(π/n) − 1)`.
///
/// Two or fewer satellites can never see past the body.
pub fn min_line_of_sight_altitude(body_radius: f64, count: u32) -> Option<f64> {
    if count < 3 {
        return None;
    }
    let half_angle = PI / f64::from(count);
    Some(body_radius * (1.0 / half_angle.cos() - 1.0))
}
