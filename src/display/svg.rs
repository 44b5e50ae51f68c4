//! SVG export of the cross-section.
//!
//! The image uses world kilometres as user units with the body at the origin.
//! World y points up, so every y is negated on the way out.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::color::{Element, Theme};
use crate::config::Config;
use crate::geometry::{SceneGeometry, Vec2};
use crate::scene::Scene;

const ATMOSPHERE_GRADIENT: &str = "atmosphere-gradient";

fn fmt_point(p: Vec2) -> String {
    format!("{:.3},{:.3}", p.x, -p.y)
}

struct Svg {
    out: String,
}

impl Svg {
    fn line(&mut self, s: impl AsRef<str>) {
        self.out.push_str(s.as_ref());
        self.out.push('\n');
    }
}

/// Render `geometry` as a standalone SVG document `size` pixels square.
pub fn render(geometry: &SceneGeometry, scene: &Scene, theme: Theme, size: u32) -> String {
    let toggles = &scene.ui.toggles;
    let v = geometry.view_extent;
    let stroke = 0.0005 * v;
    let dash = 0.01 * v;
    let fg = theme.hex(Element::Text);

    let mut svg = Svg { out: String::new() };
    svg.line(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="{:.3} {:.3} {:.3} {:.3}">"#,
        -v / 2.0,
        -v / 2.0,
        v,
        v
    ));
    let (r, g, b) = theme.background();
    svg.line(format!(
        r#"<rect x="{:.3}" y="{:.3}" width="{v:.3}" height="{v:.3}" fill="rgb({r},{g},{b})"/>"#,
        -v / 2.0,
        -v / 2.0
    ));

    svg.line("<defs>");
    if let Some(start) = geometry.atmosphere_gradient_start {
        let atmosphere = theme.hex(Element::Atmosphere);
        svg.line(format!(r#"<radialGradient id="{ATMOSPHERE_GRADIENT}">"#));
        svg.line(format!(
            r#"<stop offset="{start:.4}" stop-color="{atmosphere}" stop-opacity="50%"/>"#
        ));
        svg.line(format!(
            r#"<stop offset="100%" stop-color="{atmosphere}" stop-opacity="10%"/>"#
        ));
        svg.line("</radialGradient>");
    }
    for (index, shadow) in geometry.shadows.iter().enumerate() {
        let Some(shadow) = shadow else { continue };
        let points: Vec<String> = shadow.vertices.iter().map(|&p| fmt_point(p)).collect();
        svg.line(format!(
            r#"<mask id="range-mask-{index}" maskUnits="userSpaceOnUse" x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}">"#,
            -2.0 * v,
            -2.0 * v,
            4.0 * v,
            4.0 * v
        ));
        svg.line(format!(
            r#"<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" fill="white"/>"#,
            -2.0 * v,
            -2.0 * v,
            4.0 * v,
            4.0 * v
        ));
        svg.line(format!(r#"<polygon points="{}" fill="black"/>"#, points.join(" ")));
        svg.line("</mask>");
    }
    svg.line("</defs>");

    if toggles.night {
        let night = geometry.night;
        svg.line(format!(
            r#"<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" fill="{}" opacity="0.1"/>"#,
            night.min.x,
            -night.max.y,
            night.width(),
            night.height(),
            theme.hex(Element::NightShadow)
        ));
    }

    if toggles.orbit && !geometry.satellites.is_empty() {
        svg.line(format!(
            r#"<circle cx="0" cy="0" r="{:.3}" fill="none" stroke="{}" stroke-width="{stroke:.3}" stroke-dasharray="{dash:.3}"/>"#,
            geometry.orbital_radius,
            theme.hex(Element::Orbit)
        ));
    }

    let omni = theme.hex(Element::OmniRange);
    for (index, &p) in geometry.satellites.iter().enumerate() {
        let mask = match geometry.shadows.get(index) {
            Some(Some(_)) => format!(r#" mask="url(#range-mask-{index})""#),
            _ => String::new(),
        };
        svg.line(format!(
            r#"<circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="{omni}" opacity="0.15"{mask}/>"#,
            p.x, -p.y, geometry.omni_range
        ));
    }

    if toggles.stable {
        if let Some(radius) = geometry.stable_radius {
            svg.line(format!(
                r#"<circle cx="0" cy="0" r="{radius:.3}" fill="none" stroke="{}" stroke-width="{stroke:.3}" stroke-dasharray="{dash:.3}"/>"#,
                theme.hex(Element::StableOrbit)
            ));
        }
    }

    if toggles.line_of_sight {
        let link = theme.hex(Element::Link);
        for l in geometry.links.iter().filter(|l| l.linked) {
            let a = geometry.satellites[l.from as usize];
            let b = geometry.satellites[l.to as usize];
            svg.line(format!(
                r#"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="{link}" stroke-width="{:.3}"/>"#,
                a.x,
                -a.y,
                b.x,
                -b.y,
                stroke * 2.0
            ));
        }
    }

    let satellite_radius = 0.003 * v;
    for p in &geometry.satellites {
        svg.line(format!(
            r#"<circle cx="{:.3}" cy="{:.3}" r="{satellite_radius:.3}" fill="{fg}"/>"#,
            p.x, -p.y
        ));
    }

    if toggles.atmosphere {
        if let Some(outer) = geometry.atmosphere_radius {
            svg.line(format!(
                r#"<circle cx="0" cy="0" r="{outer:.3}" fill="url(#{ATMOSPHERE_GRADIENT})"/>"#
            ));
        }
    }

    svg.line(format!(
        r#"<circle cx="0" cy="0" r="{:.3}" fill="{}"/>"#,
        geometry.body_radius,
        theme.hex(Element::Body)
    ));
    svg.line("</svg>");
    svg.out
}

/// Write the SVG for `scene` to `path`.
pub fn export(scene: &Scene, theme: Theme, size: u32, path: &Path) -> Result<()> {
    let geometry = SceneGeometry::derive(scene);
    std::fs::write(path, render(&geometry, scene, theme, size))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Svg display mode: one image to the configured output or stdout.
pub fn run(config: Config) -> Result<()> {
    match &config.svg.output {
        Some(path) => export(&config.scene, config.display.theme, config.svg.size, path),
        None => {
            let geometry = SceneGeometry::derive(&config.scene);
            print!(
                "{}",
                render(&geometry, &config.scene, config.display.theme, config.svg.size)
            );
            Ok(())
        }
    }
}
