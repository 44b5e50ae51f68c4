use ratatui::prelude::*;

use super::braille::BrailleCanvas;
use super::viewport::Viewport;
use crate::color::{Element, Theme};
use crate::geometry::SceneGeometry;
use crate::scene::Toggles;

/// Satellites are drawn this many dots across.
const SATELLITE_DOTS: isize = 1;

/// Rasterise one frame of the cross-section onto a braille canvas.
///
/// Paint order is back to front: night side, orbit, range discs, stable
/// orbit, links, satellites, atmosphere, body.
pub fn rasterize(
    geometry: &SceneGeometry,
    toggles: &Toggles,
    char_w: usize,
    char_h: usize,
) -> BrailleCanvas {
    let mut canvas = BrailleCanvas::new(char_w, char_h);
    let viewport = Viewport::fit(canvas.grid_w, canvas.grid_h, geometry.view_extent);
    let center = viewport.to_grid(crate::geometry::Vec2::ZERO);

    if toggles.night {
        let night = geometry.night;
        canvas.fill(Element::NightShadow, |gx, gy| {
            // sparse dots read as a faint shade
            gx % 2 == 0 && gy % 2 == 0 && night.contains(viewport.to_world(gx, gy))
        });
    }

    if toggles.orbit && !geometry.satellites.is_empty() {
        canvas.circle(center, viewport.dots(geometry.orbital_radius), Element::Orbit, Some(2));
    }

    for index in 0..geometry.satellites.len() {
        canvas.fill(Element::OmniRange, |gx, gy| {
            (gx + gy) % 3 == 0 && geometry.in_visible_range(index, viewport.to_world(gx, gy))
        });
    }

    if toggles.stable {
        if let Some(radius) = geometry.stable_radius {
            canvas.circle(center, viewport.dots(radius), Element::StableOrbit, Some(4));
        }
    }

    if toggles.line_of_sight {
        for link in geometry.links.iter().filter(|l| l.linked) {
            let from = geometry.satellites[link.from as usize];
            let to = geometry.satellites[link.to as usize];
            canvas.line(viewport.to_grid(from), viewport.to_grid(to), Element::Link);
        }
    }

    for &satellite in &geometry.satellites {
        let (gx, gy) = viewport.to_grid(satellite);
        let (gx, gy) = (gx.round() as isize, gy.round() as isize);
        for dx in -SATELLITE_DOTS..=SATELLITE_DOTS {
            for dy in -SATELLITE_DOTS..=SATELLITE_DOTS {
                canvas.set(gx + dx, gy + dy, Element::Satellite);
            }
        }
    }

    if toggles.atmosphere {
        if let Some(outer) = geometry.atmosphere_radius {
            canvas.fill(Element::Atmosphere, |gx, gy| {
                let r = viewport.to_world(gx, gy).magnitude();
                (gx + gy) % 2 == 0 && r <= outer && r > geometry.body_radius
            });
        }
    }

    canvas.fill(Element::Body, |gx, gy| {
        viewport.to_world(gx, gy).magnitude() <= geometry.body_radius
    });

    canvas
}

/// The cross-section plot panel.
pub struct PlotView;

impl PlotView {
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        geometry: &SceneGeometry,
        toggles: &Toggles,
        theme: Theme,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let canvas = rasterize(geometry, toggles, area.width as usize, area.height as usize);
        canvas.render(frame, area, |element| theme.get_color(element));
    }
}
