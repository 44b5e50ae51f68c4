//! Regions the body hides: behind it as seen from a satellite, and on its
//! night side.

use super::Vec2;

/// Quadrilateral behind the body as seen from one satellite, ordered
/// `[tan_a, tan_b, tan_b_far, tan_a_far]`.
///
/// Used as a cut-out mask on that satellite's range disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowPolygon {
    pub vertices: [Vec2; 4],
}

impl ShadowPolygon {
    /// Point-in-polygon for the convex quad; boundary points count as inside.
    pub fn contains(&self, point: Vec2) -> bool {
        let mut positive = false;
        let mut negative = false;
        for i in 0..self.vertices.len() {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % self.vertices.len()];
            let side = (b - a).cross(point - a);
            positive |= side > 0.0;
            negative |= side < 0.0;
            if positive && negative {
                return false;
            }
        }
        true
    }
}

/// Axis-aligned rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }
}

/// Angle between the satellite-to-centre line and either tangent line.
///
/// `None` when the satellite is inside the body (`body_radius > r`) or the
/// inputs are not positive, since no tangent exists.
pub fn tangent_half_angle(body_radius: f64, r: f64) -> Option<f64> {
    if !(body_radius > 0.0 && r > 0.0) || body_radius > r {
        return None;
    }
    let theta = (body_radius / r).acos();
    theta.is_finite().then_some(theta)
}

/// Shadow cast by the body on the range disc of a satellite at `satellite`.
///
/// The far vertices are pushed `2 · view_extent` beyond the tangent points
/// along the sight lines, which is past any edge of the plot. A non-finite
/// view extent yields no polygon.
pub fn shadow_polygon(body_radius: f64, satellite: Vec2, view_extent: f64) -> Option<ShadowPolygon> {
    let theta = tangent_half_angle(body_radius, satellite.magnitude())?;

    let surface = satellite.scale(body_radius);
    let tan_a = surface.rotate(theta);
    let tan_b = surface.rotate(-theta);

    let reach = 2.0 * view_extent;
    let tan_a_far = tan_a + (tan_a - satellite).scale(reach);
    let tan_b_far = tan_b + (tan_b - satellite).scale(reach);

    let vertices = [tan_a, tan_b, tan_b_far, tan_a_far];
    vertices
        .iter()
        .all(|v| v.is_finite())
        .then_some(ShadowPolygon { vertices })
}

/// Night side of the body with light arriving from the left: a band as tall
/// as the body running from its centre line to the right edge of the plot.
pub fn night_shadow(body_radius: f64, view_extent: f64) -> Rect {
    Rect {
        min: Vec2::new(0.0, -body_radius),
        max: Vec2::new(view_extent / 2.0, body_radius),
    }
}
