use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::color::Theme;
use crate::display::DisplayMode;
use crate::scene::{self, Atmosphere, Scene, ScenePath, SceneValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub scene: Scene,
    pub svg: SvgConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgConfig {
    /// Side of the square image in pixels.
    pub size: u32,
    /// Where exports go; stdout when unset in svg mode.
    pub output: Option<PathBuf>,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            size: 800,
            output: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        config
            .scene
            .validate()
            .with_context(|| format!("Invalid scene in {}", path.display()))?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/relaynet/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("relaynet").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists
    /// Returns None if file doesn't exist, logs warning on parse errors
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            match Self::load(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    warn!("{:#}; using defaults", e);
                    None
                }
            }
        } else {
            None
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, Self::generate_config_template())?;

        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r#"# Relaynet Configuration
# This file is auto-generated. Edit as needed.

[display]
# Display mode: "terminal", "svg" or "report"
mode = "terminal"
# Colour theme: "light" or "dark"
theme = "dark"

[scene.body]
name = "Kerbin"
# Radius in km
radius = 600.0

# Remove this table for a body without atmosphere
[scene.body.atmosphere]
# Height above the surface in km
height = 70.0

[scene.satellites]
count = 3
# Altitude above the surface in km
altitude = 500.0
# Communication range of each satellite in km
omniRange = 3000.0

[scene.ui.toggles]
atmosphere = true
orbit = true
stable = false
night = true
lineOfSight = true

[svg]
# Image size in pixels
size = 800
# Output file for svg mode and the export key (stdout when omitted in svg mode)
# output = "relaynet.svg"
"#
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) -> Result<()> {
        if let Some(mode) = args.mode {
            self.display.mode = mode;
        }
        if let Some(theme) = args.theme {
            self.display.theme = theme;
        }

        let mut updates: Vec<(ScenePath, SceneValue)> = Vec::new();
        if let Some(radius) = args.radius {
            updates.push((ScenePath::BodyRadius, SceneValue::Number(radius)));
        }
        if args.no_atmosphere {
            updates.push((ScenePath::Atmosphere, SceneValue::Flag(false)));
        } else if let Some(height) = args.atmosphere_height {
            if self.scene.body.atmosphere.is_none() {
                self.scene.body.atmosphere = Some(Atmosphere::default());
            }
            updates.push((ScenePath::AtmosphereHeight, SceneValue::Number(height)));
        }
        if let Some(count) = args.count {
            updates.push((ScenePath::SatelliteCount, SceneValue::Count(count)));
        }
        if let Some(altitude) = args.altitude {
            updates.push((ScenePath::SatelliteAltitude, SceneValue::Number(altitude)));
        }
        if let Some(range) = args.omni_range {
            updates.push((ScenePath::OmniRange, SceneValue::Number(range)));
        }
        for assignment in &args.set {
            updates.push(
                scene::parse_assignment(assignment)
                    .with_context(|| format!("Invalid --set '{}'", assignment))?,
            );
        }
        self.scene = self.scene.with_all(updates)?;

        if let Some(size) = args.size {
            self.svg.size = size;
        }
        if let Some(ref output) = args.output {
            self.svg.output = Some(output.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_to_defaults() {
        let config: Config = toml::from_str(&Config::generate_config_template()).unwrap();
        assert_eq!(config.scene, Scene::default());
        assert_eq!(config.display, DisplayConfig::default());
        assert_eq!(config.svg, SvgConfig::default());
    }

    #[test]
    fn empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config: Config = toml::from_str(
            r#"
            [display]
            theme = "light"
            [scene.satellites]
            count = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.display.theme, Theme::Light);
        assert_eq!(config.display.mode, DisplayMode::Terminal);
        assert_eq!(config.scene.satellites.count, 5);
        assert_eq!(config.scene.satellites.omni_range, 3000.0);
        assert_eq!(config.scene.body.radius, 600.0);
    }

    #[test]
    fn load_rejects_invalid_scene() {
        let dir = std::env::temp_dir().join(format!("relaynet-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "[scene.body]\nradius = -1.0\n").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("body.radius"));
        std::fs::write(&path, "[scene.satellites]\ncount = 4000000000\n").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("satellites.count"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
