use std::f64::consts::PI;

/// Orbital radius at which neighbouring omni ranges exactly meet, closing the
/// relay ring.
///
/// Solves the triangle with side `a` (orbital radius), side `b` (omni range)
/// and angle `π/n` opposite `b` for its third side. Returns `None` when there
/// is no neighbour to pair with (`count < 2`, where the triangle collapses),
/// when `b` is too short for the triangle to close (arcsine domain), or when
/// the result is not a finite length.
pub fn stable_orbit_radius(orbital_radius: f64, omni_range: f64, count: u32) -> Option<f64> {
    if count < 2 || !(omni_range > 0.0) || !(orbital_radius > 0.0) {
        return None;
    }
    let a = orbital_radius;
    let b = omni_range;

    let half_spacing = PI / f64::from(count);
    let sine_ratio = a * half_spacing.sin() / b;
    if !(sine_ratio.abs() <= 1.0) {
        return None;
    }

    let angle_a = sine_ratio.asin();
    let angle_c = PI - angle_a - half_spacing;
    let c = (a * a + b * b - 2.0 * a * b * angle_c.cos()).sqrt();

    c.is_finite().then_some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feasible_triangle_gives_finite_radius() {
        let c = stable_orbit_radius(1600.0, 2000.0, 4).unwrap();
        assert!(c.is_finite() && c > 0.0);
    }

    #[test]
    fn closing_angles_satisfy_law_of_sines() {
        let (a, b, n) = (1600.0, 2000.0, 4);
        let c = stable_orbit_radius(a, b, n).unwrap();
        let half = PI / f64::from(n);
        let angle_a = (a * half.sin() / b).asin();
        let angle_c = PI - angle_a - half;
        // b / sin(B) == c / sin(C)
        assert!((b / half.sin() - c / angle_c.sin()).abs() < 1e-6);
    }

    #[test]
    fn short_range_has_no_solution() {
        assert_eq!(stable_orbit_radius(1600.0, 10.0, 4), None);
    }

    #[test]
    fn zero_satellites_have_no_solution() {
        assert_eq!(stable_orbit_radius(1600.0, 2000.0, 0), None);
    }

    #[test]
    fn lone_satellite_has_no_solution() {
        // π/1 leaves a flat triangle whose third side would be |a - b|
        assert_eq!(stable_orbit_radius(1100.0, 3000.0, 1), None);
        assert_eq!(stable_orbit_radius(1100.0, 1100.0, 1), None);
        assert!(stable_orbit_radius(1100.0, 3000.0, 2).is_some());
    }

    #[test]
    fn degenerate_inputs_have_no_solution() {
        assert_eq!(stable_orbit_radius(1600.0, 0.0, 3), None);
        assert_eq!(stable_orbit_radius(1600.0, f64::NAN, 3), None);
        assert_eq!(stable_orbit_radius(0.0, 2000.0, 3), None);
    }

    #[test]
    fn solver_is_idempotent() {
        assert_eq!(
            stable_orbit_radius(1100.0, 3000.0, 3),
            stable_orbit_radius(1100.0, 3000.0, 3)
        );
    }
}
