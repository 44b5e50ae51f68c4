use crate::geometry::Vec2;

/// Maps world kilometres onto a braille dot grid and back.
///
/// A braille dot is as wide as it is tall (2x4 dots in a 1:2 cell), so one
/// scale serves both axes. World y points up; grid y points down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub cx: f64,
    pub cy: f64,
    /// Grid dots per km.
    pub scale: f64,
}

impl Viewport {
    /// Fit a square world region `view_extent` km across into a
    /// `grid_w` x `grid_h` grid, centred.
    pub fn fit(grid_w: usize, grid_h: usize, view_extent: f64) -> Self {
        let (cx, cy, max_radius) = fit_circle(grid_w, grid_h);
        let scale = if view_extent > 0.0 {
            max_radius * 2.0 / view_extent
        } else {
            0.0
        };
        Self { cx, cy, scale }
    }

    pub fn to_grid(&self, point: Vec2) -> (f64, f64) {
        (self.cx + point.x * self.scale, self.cy - point.y * self.scale)
    }

    /// World position of the centre of dot `(gx, gy)`.
    pub fn to_world(&self, gx: usize, gy: usize) -> Vec2 {
        if self.scale == 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            (gx as f64 + 0.5 - self.cx) / self.scale,
            -(gy as f64 + 0.5 - self.cy) / self.scale,
        )
    }

    /// Length in dots of `km`.
    pub fn dots(&self, km: f64) -> f64 {
        km * self.scale
    }
}

/// Largest circle that fits the grid with a small margin.
/// Returns (center_x, center_y, max_radius) in dots.
pub fn fit_circle(area_w: usize, area_h: usize) -> (f64, f64, f64) {
    let cx = area_w as f64 / 2.0;
    let cy = area_h as f64 / 2.0;
    let max_radius = (area_w.min(area_h) as f64 / 2.0) * 0.95;
    (cx, cy, max_radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_maps_to_centre() {
        let viewport = Viewport::fit(200, 100, 1000.0);
        assert_eq!(viewport.to_grid(Vec2::ZERO), (100.0, 50.0));
    }

    #[test]
    fn up_is_up() {
        let viewport = Viewport::fit(100, 100, 1000.0);
        let (_, gy) = viewport.to_grid(Vec2::new(0.0, 200.0));
        assert!(gy < viewport.cy);
    }

    #[test]
    fn extent_fits_short_side() {
        let viewport = Viewport::fit(200, 100, 1000.0);
        let (_, top) = viewport.to_grid(Vec2::new(0.0, 500.0));
        let (_, bottom) = viewport.to_grid(Vec2::new(0.0, -500.0));
        assert!(top >= 0.0 && bottom <= 100.0);
    }

    #[test]
    fn axes_share_one_scale() {
        let viewport = Viewport::fit(200, 100, 1000.0);
        let (right, _) = viewport.to_grid(Vec2::new(100.0, 0.0));
        let (_, up) = viewport.to_grid(Vec2::new(0.0, 100.0));
        assert!(((right - viewport.cx) - (viewport.cy - up)).abs() < 1e-12);
    }

    #[test]
    fn world_round_trip_is_within_a_dot() {
        let viewport = Viewport::fit(160, 96, 9840.0);
        let world = viewport.to_world(40, 30);
        let (gx, gy) = viewport.to_grid(world);
        assert!((gx - 40.5).abs() < 1e-9);
        assert!((gy - 30.5).abs() < 1e-9);
    }
}
