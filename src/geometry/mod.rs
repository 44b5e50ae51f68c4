//! Coverage geometry: where the satellites sit, which of them can talk, what
//! the body hides, and where the ring would just close.
//!
//! Everything in here is a pure function of a [`Scene`]. A renderer calls
//! [`SceneGeometry::derive`] once per frame and paints the result.

mod placement;
mod shadow;
mod stable;
mod vec;
mod visibility;

pub use placement::{orbital_radius, positions};
pub use shadow::{night_shadow, shadow_polygon, tangent_half_angle, Rect, ShadowPolygon};
pub use stable::stable_orbit_radius;
pub use vec::Vec2;
pub use visibility::{min_line_of_sight_altitude, ring_closed, ring_links, Link};

use tracing::debug;

use crate::scene::Scene;

/// Margin around the outermost drawn element.
const VIEW_PADDING: f64 = 1.2;

/// Side of the square viewport: fits the body and every range disc.
pub fn view_extent(scene: &Scene) -> f64 {
    let body = scene.body.radius * 2.0;
    let reach = (scene.orbital_radius() + scene.satellites.omni_range) * 2.0;
    body.max(reach) * VIEW_PADDING
}

/// Render-ready geometry for one scene snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGeometry {
    /// Side of the square viewport centred on the body.
    pub view_extent: f64,
    pub body_radius: f64,
    pub orbital_radius: f64,
    pub omni_range: f64,
    /// Outer radius of the atmosphere; `None` without one.
    pub atmosphere_radius: Option<f64>,
    /// Where the atmosphere gradient starts, as a fraction of its radius.
    pub atmosphere_gradient_start: Option<f64>,
    pub satellites: Vec<Vec2>,
    pub links: Vec<Link>,
    /// One entry per satellite; `None` where no tangent exists.
    pub shadows: Vec<Option<ShadowPolygon>>,
    pub stable_radius: Option<f64>,
    pub min_line_of_sight_altitude: Option<f64>,
    pub night: Rect,
}

impl SceneGeometry {
    /// Derive everything from `scene`. The scene should already be validated;
    /// degenerate cases come back as `None` or empty collections.
    pub fn derive(scene: &Scene) -> Self {
        let view_extent = view_extent(scene);
        let body_radius = scene.body.radius;
        let count = scene.satellites.count;
        let omni_range = scene.satellites.omni_range;
        let orbital_radius = orbital_radius(body_radius, scene.satellites.altitude);

        let satellites = positions(orbital_radius, count);
        let links = ring_links(body_radius, orbital_radius, count, omni_range);
        let shadows: Vec<_> = satellites
            .iter()
            .map(|&p| shadow_polygon(body_radius, p, view_extent))
            .collect();
        if shadows.iter().any(Option::is_none) {
            debug!(body_radius, orbital_radius, "satellites inside the body, shadow skipped");
        }

        let stable_radius = stable_orbit_radius(orbital_radius, omni_range, count);
        if stable_radius.is_none() {
            debug!(count, omni_range, "no stable orbit for this configuration");
        }

        let atmosphere_radius = scene.body.atmosphere.map(|a| body_radius + a.height);

        Self {
            view_extent,
            body_radius,
            orbital_radius,
            omni_range,
            atmosphere_radius,
            atmosphere_gradient_start: atmosphere_radius.map(|outer| body_radius / outer),
            satellites,
            links,
            shadows,
            stable_radius,
            min_line_of_sight_altitude: min_line_of_sight_altitude(body_radius, count),
            night: night_shadow(body_radius, view_extent),
        }
    }

    pub fn ring_closed(&self) -> bool {
        ring_closed(&self.links)
    }

    pub fn linked_count(&self) -> usize {
        self.links.iter().filter(|l| l.linked).count()
    }

    /// Whether `point` lies in the part of satellite `index`'s range disc that
    /// the body does not hide.
    pub fn in_visible_range(&self, index: usize, point: Vec2) -> bool {
        let Some(&satellite) = self.satellites.get(index) else {
            return false;
        };
        if point.distance(satellite) > self.omni_range {
            return false;
        }
        match self.shadows.get(index).copied().flatten() {
            Some(shadow) => !shadow.contains(point),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{SceneValue, ScenePath};

    fn scene_with(updates: &[(ScenePath, SceneValue)]) -> Scene {
        Scene::default().with_all(updates.iter().copied()).unwrap()
    }

    #[test]
    fn view_extent_fits_range_discs() {
        let scene = Scene::default();
        assert!((view_extent(&scene) - (1100.0 + 3000.0) * 2.0 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn default_scene_derives_full_geometry() {
        let geometry = SceneGeometry::derive(&Scene::default());
        assert_eq!(geometry.satellites.len(), 3);
        assert_eq!(geometry.links.len(), 3);
        assert!(geometry.shadows.iter().all(Option::is_some));
        assert_eq!(geometry.atmosphere_radius, Some(670.0));
        assert!((geometry.atmosphere_gradient_start.unwrap() - 600.0 / 670.0).abs() < 1e-12);
        assert!(geometry.stable_radius.is_some());
        assert_eq!(geometry.night.min, Vec2::new(0.0, -600.0));
    }

    #[test]
    fn no_atmosphere_means_no_ring() {
        let scene = scene_with(&[(ScenePath::Atmosphere, SceneValue::Flag(false))]);
        let geometry = SceneGeometry::derive(&scene);
        assert_eq!(geometry.atmosphere_radius, None);
        assert_eq!(geometry.atmosphere_gradient_start, None);
    }

    #[test]
    fn zero_satellites_derive_empty_results() {
        let scene = scene_with(&[(ScenePath::SatelliteCount, SceneValue::Count(0))]);
        let geometry = SceneGeometry::derive(&scene);
        assert!(geometry.satellites.is_empty());
        assert!(geometry.links.is_empty());
        assert!(geometry.shadows.is_empty());
        assert_eq!(geometry.stable_radius, None);
        assert!(!geometry.ring_closed());
    }

    #[test]
    fn stable_orbit_follows_range() {
        let feasible = scene_with(&[
            (ScenePath::SatelliteAltitude, SceneValue::Number(1000.0)),
            (ScenePath::OmniRange, SceneValue::Number(2000.0)),
            (ScenePath::SatelliteCount, SceneValue::Count(4)),
        ]);
        let radius = SceneGeometry::derive(&feasible).stable_radius;
        assert!(matches!(radius, Some(r) if r.is_finite()));

        let short = feasible
            .with(ScenePath::OmniRange, SceneValue::Number(10.0))
            .unwrap();
        assert_eq!(SceneGeometry::derive(&short).stable_radius, None);
    }

    #[test]
    fn lone_satellite_has_no_stable_orbit() {
        let scene = scene_with(&[(ScenePath::SatelliteCount, SceneValue::Count(1))]);
        let geometry = SceneGeometry::derive(&scene);
        assert_eq!(geometry.satellites.len(), 1);
        assert!(geometry.links.is_empty());
        assert_eq!(geometry.stable_radius, None);
    }

    #[test]
    fn connectivity_flips_when_range_drops_below_chord() {
        let scene = scene_with(&[(ScenePath::SatelliteAltitude, SceneValue::Number(700.0))]);
        let geometry = SceneGeometry::derive(&scene);
        assert!(geometry.ring_closed());
        assert_eq!(geometry.linked_count(), 3);

        let chord = geometry.links[0].distance;
        let short = scene
            .with(ScenePath::OmniRange, SceneValue::Number(chord * 0.99))
            .unwrap();
        assert_eq!(SceneGeometry::derive(&short).linked_count(), 0);
    }

    #[test]
    fn range_disc_is_masked_behind_body() {
        let geometry = SceneGeometry::derive(&Scene::default());
        // satellite 0 sits at the bottom; straight above the body is hidden
        assert!(geometry.in_visible_range(0, Vec2::new(0.0, -1500.0)));
        assert!(!geometry.in_visible_range(0, Vec2::new(0.0, 900.0)));
        assert!(!geometry.in_visible_range(0, Vec2::new(0.0, -5000.0)));
        assert!(!geometry.in_visible_range(7, Vec2::ZERO));
    }

    #[test]
    fn derivation_is_idempotent() {
        let scene = Scene::default();
        assert_eq!(SceneGeometry::derive(&scene), SceneGeometry::derive(&scene));
    }
}
