use anyhow::Result;
use std::fmt::Write;

use crate::config::Config;
use crate::geometry::{tangent_half_angle, SceneGeometry};
use crate::scene::Scene;

/// Plain-text summary of the derived geometry.
pub fn report(scene: &Scene, geometry: &SceneGeometry) -> Result<String> {
    let mut out = String::new();
    let body = &scene.body;
    writeln!(out, "{} radius {:.1} km", scene.display_name(), body.radius)?;
    match body.atmosphere {
        Some(atmosphere) => writeln!(out, "atmosphere {:.1} km", atmosphere.height)?,
        None => writeln!(out, "atmosphere none")?,
    }
    writeln!(
        out,
        "{} satellites at {:.1} km (orbital radius {:.1} km), omni range {:.1} km",
        scene.satellites.count,
        scene.satellites.altitude,
        geometry.orbital_radius,
        geometry.omni_range
    )?;

    for (index, p) in geometry.satellites.iter().enumerate() {
        writeln!(out, "  sat {:>2} at ({:>10.1}, {:>10.1})", index, p.x, p.y)?;
    }
    for link in &geometry.links {
        let state = match (link.in_range, link.line_of_sight) {
            (true, true) => "linked",
            (false, true) => "out of range",
            (true, false) => "blocked by body",
            (false, false) => "out of range, blocked by body",
        };
        writeln!(
            out,
            "  link {} -> {}: {:.1} km, {}",
            link.from, link.to, link.distance, state
        )?;
    }
    if !geometry.links.is_empty() {
        let closed = if geometry.ring_closed() { "closed" } else { "open" };
        writeln!(out, "ring {}", closed)?;
    }

    match tangent_half_angle(body.radius, geometry.orbital_radius) {
        Some(theta) => writeln!(out, "shadow half angle {:.2} deg", theta.to_degrees())?,
        None => writeln!(out, "shadow half angle undefined (orbit inside body)")?,
    }
    match geometry.stable_radius {
        Some(r) => writeln!(
            out,
            "stable orbit radius {:.1} km (altitude {:.1} km)",
            r,
            r - body.radius
        )?,
        None => writeln!(out, "stable orbit none")?,
    }
    match geometry.min_line_of_sight_altitude {
        Some(alt) => writeln!(out, "min line-of-sight altitude {:.1} km", alt)?,
        None => writeln!(out, "min line-of-sight altitude none")?,
    }
    Ok(out)
}

pub fn run(config: Config) -> Result<()> {
    let geometry = SceneGeometry::derive(&config.scene);
    print!("{}", report(&config.scene, &geometry)?);
    Ok(())
}
