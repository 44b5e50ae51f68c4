use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest ring the planner derives; every satellite costs a position, a
/// link and a shadow polygon per frame.
pub const MAX_SATELLITES: u32 = 1000;

/// Everything the plot is derived from. Never mutated in place: edits go
/// through [`Scene::with`] and produce a new snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub body: Body,
    pub satellites: Satellites,
    pub ui: Ui,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// km
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmosphere: Option<Atmosphere>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    /// km above the surface
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Satellites {
    pub count: u32,
    /// km above the surface
    pub altitude: f64,
    #[serde(alias = "omni_range")]
    pub omni_range: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ui {
    pub toggles: Toggles,
}

/// Display filters. They never change the geometry, only what gets drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Toggles {
    pub atmosphere: bool,
    pub orbit: bool,
    pub stable: bool,
    pub night: bool,
    #[serde(alias = "line_of_sight")]
    pub line_of_sight: bool,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            name: Some("Kerbin".to_string()),
            radius: 600.0,
            atmosphere: Some(Atmosphere::default()),
        }
    }
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self { height: 70.0 }
    }
}

impl Default for Satellites {
    fn default() -> Self {
        Self {
            count: 3,
            altitude: 500.0,
            omni_range: 3000.0,
        }
    }
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            atmosphere: true,
            orbit: true,
            stable: false,
            night: true,
            line_of_sight: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("{path} must be {rule}, got {value}")]
    Invalid {
        path: ScenePath,
        rule: &'static str,
        value: f64,
    },
    #[error("unknown scene path '{0}'")]
    UnknownPath(String),
    #[error("{path} expects {expected}, got '{input}'")]
    BadValue {
        path: ScenePath,
        expected: &'static str,
        input: String,
    },
    #[error("{0} expects {1}")]
    WrongKind(ScenePath, &'static str),
    #[error("{0} requires an atmosphere")]
    NoAtmosphere(ScenePath),
}

/// Every field of [`Scene`] that can be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenePath {
    BodyRadius,
    /// Presence of the atmosphere, not its height.
    Atmosphere,
    AtmosphereHeight,
    SatelliteCount,
    SatelliteAltitude,
    OmniRange,
    Toggle(ToggleKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleKind {
    Atmosphere,
    Orbit,
    Stable,
    Night,
    LineOfSight,
}

/// A value headed for a [`ScenePath`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneValue {
    Number(f64),
    Count(u32),
    Flag(bool),
}

impl ScenePath {
    /// Editable paths in the order the parameter panel lists them.
    pub const ALL: [ScenePath; 11] = [
        ScenePath::BodyRadius,
        ScenePath::Atmosphere,
        ScenePath::AtmosphereHeight,
        ScenePath::SatelliteCount,
        ScenePath::SatelliteAltitude,
        ScenePath::OmniRange,
        ScenePath::Toggle(ToggleKind::Atmosphere),
        ScenePath::Toggle(ToggleKind::Orbit),
        ScenePath::Toggle(ToggleKind::Stable),
        ScenePath::Toggle(ToggleKind::Night),
        ScenePath::Toggle(ToggleKind::LineOfSight),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenePath::BodyRadius => "body.radius",
            ScenePath::Atmosphere => "body.atmosphere",
            ScenePath::AtmosphereHeight => "body.atmosphere.height",
            ScenePath::SatelliteCount => "satellites.count",
            ScenePath::SatelliteAltitude => "satellites.altitude",
            ScenePath::OmniRange => "satellites.omniRange",
            ScenePath::Toggle(ToggleKind::Atmosphere) => "ui.toggles.atmosphere",
            ScenePath::Toggle(ToggleKind::Orbit) => "ui.toggles.orbit",
            ScenePath::Toggle(ToggleKind::Stable) => "ui.toggles.stable",
            ScenePath::Toggle(ToggleKind::Night) => "ui.toggles.night",
            ScenePath::Toggle(ToggleKind::LineOfSight) => "ui.toggles.lineOfSight",
        }
    }

    /// Short label for forms.
    pub fn label(&self) -> &'static str {
        match self {
            ScenePath::BodyRadius => "radius (km)",
            ScenePath::Atmosphere => "atmosphere",
            ScenePath::AtmosphereHeight => "height (km)",
            ScenePath::SatelliteCount => "count",
            ScenePath::SatelliteAltitude => "altitude (km)",
            ScenePath::OmniRange => "omni range (km)",
            ScenePath::Toggle(ToggleKind::Atmosphere) => "atmosphere",
            ScenePath::Toggle(ToggleKind::Orbit) => "orbit",
            ScenePath::Toggle(ToggleKind::Stable) => "stable",
            ScenePath::Toggle(ToggleKind::Night) => "night shadow",
            ScenePath::Toggle(ToggleKind::LineOfSight) => "line of sight",
        }
    }

    /// Form section the path belongs to.
    pub fn section(&self) -> &'static str {
        match self {
            ScenePath::BodyRadius | ScenePath::Atmosphere | ScenePath::AtmosphereHeight => {
                "Celestial Body"
            }
            ScenePath::SatelliteCount | ScenePath::SatelliteAltitude | ScenePath::OmniRange => {
                "Satellites"
            }
            ScenePath::Toggle(_) => "UI toggles",
        }
    }

    /// Whether the path currently refers to anything in `scene`.
    pub fn is_available(&self, scene: &Scene) -> bool {
        match self {
            ScenePath::AtmosphereHeight => scene.body.atmosphere.is_some(),
            _ => true,
        }
    }

    /// Parse `input` into the kind of value this path holds.
    pub fn parse_value(&self, input: &str) -> Result<SceneValue, SceneError> {
        let input = input.trim();
        let bad = |expected| SceneError::BadValue {
            path: *self,
            expected,
            input: input.to_string(),
        };
        match self {
            ScenePath::SatelliteCount => input
                .parse()
                .map(SceneValue::Count)
                .map_err(|_| bad("a whole number")),
            ScenePath::Atmosphere | ScenePath::Toggle(_) => match input.to_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => Ok(SceneValue::Flag(true)),
                "false" | "off" | "no" | "0" => Ok(SceneValue::Flag(false)),
                _ => Err(bad("true or false")),
            },
            _ => input
                .parse()
                .map(SceneValue::Number)
                .map_err(|_| bad("a number")),
        }
    }

    /// Current value at this path, `None` for an absent atmosphere height.
    pub fn get(&self, scene: &Scene) -> Option<SceneValue> {
        let toggles = &scene.ui.toggles;
        Some(match self {
            ScenePath::BodyRadius => SceneValue::Number(scene.body.radius),
            ScenePath::Atmosphere => SceneValue::Flag(scene.body.atmosphere.is_some()),
            ScenePath::AtmosphereHeight => SceneValue::Number(scene.body.atmosphere?.height),
            ScenePath::SatelliteCount => SceneValue::Count(scene.satellites.count),
            ScenePath::SatelliteAltitude => SceneValue::Number(scene.satellites.altitude),
            ScenePath::OmniRange => SceneValue::Number(scene.satellites.omni_range),
            ScenePath::Toggle(kind) => SceneValue::Flag(match kind {
                ToggleKind::Atmosphere => toggles.atmosphere,
                ToggleKind::Orbit => toggles.orbit,
                ToggleKind::Stable => toggles.stable,
                ToggleKind::Night => toggles.night,
                ToggleKind::LineOfSight => toggles.line_of_sight,
            }),
        })
    }

    /// The value one nudge away from the current one, for the interactive
    /// editor. `forward` increments numbers; flags flip either way.
    pub fn step(&self, scene: &Scene, forward: bool) -> Option<SceneValue> {
        let sign = if forward { 1.0 } else { -1.0 };
        match self.get(scene)? {
            SceneValue::Flag(on) => Some(SceneValue::Flag(!on)),
            SceneValue::Count(count) => Some(SceneValue::Count(if forward {
                count.saturating_add(1)
            } else {
                count.saturating_sub(1)
            })),
            SceneValue::Number(value) => {
                let step = match self {
                    ScenePath::AtmosphereHeight => 5.0,
                    _ => 10.0,
                };
                Some(SceneValue::Number(value + sign * step))
            }
        }
    }
}

impl fmt::Display for ScenePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenePath {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "").to_lowercase();
        ScenePath::ALL
            .into_iter()
            .find(|path| path.as_str().to_lowercase() == normalized)
            .ok_or_else(|| SceneError::UnknownPath(s.to_string()))
    }
}

impl fmt::Display for SceneValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneValue::Number(value) => write!(f, "{}", value),
            SceneValue::Count(count) => write!(f, "{}", count),
            SceneValue::Flag(true) => write!(f, "on"),
            SceneValue::Flag(false) => write!(f, "off"),
        }
    }
}

/// Parse a `path=value` assignment, as given on the command line.
pub fn parse_assignment(s: &str) -> Result<(ScenePath, SceneValue), SceneError> {
    let (path, value) = s
        .split_once('=')
        .ok_or_else(|| SceneError::UnknownPath(s.to_string()))?;
    let path: ScenePath = path.parse()?;
    let value = path.parse_value(value)?;
    Ok((path, value))
}

impl Scene {
    /// Reject values no geometry can be derived from.
    pub fn validate(&self) -> Result<(), SceneError> {
        check(ScenePath::BodyRadius, self.body.radius, "a positive number", |v| v > 0.0)?;
        if let Some(atmosphere) = self.body.atmosphere {
            check(
                ScenePath::AtmosphereHeight,
                atmosphere.height,
                "zero or more",
                |v| v >= 0.0,
            )?;
        }
        check(
            ScenePath::SatelliteCount,
            f64::from(self.satellites.count),
            "at most 1000",
            |v| v <= f64::from(MAX_SATELLITES),
        )?;
        check(
            ScenePath::SatelliteAltitude,
            self.satellites.altitude,
            "zero or more",
            |v| v >= 0.0,
        )?;
        check(
            ScenePath::OmniRange,
            self.satellites.omni_range,
            "a positive number",
            |v| v > 0.0,
        )?;
        Ok(())
    }

    /// A copy of this scene with `path` replaced by `value`, validated.
    pub fn with(&self, path: ScenePath, value: SceneValue) -> Result<Scene, SceneError> {
        let mut next = self.clone();
        match (path, value) {
            (ScenePath::BodyRadius, SceneValue::Number(v)) => next.body.radius = v,
            (ScenePath::Atmosphere, SceneValue::Flag(on)) => {
                next.body.atmosphere = match (on, self.body.atmosphere) {
                    (true, Some(existing)) => Some(existing),
                    (true, None) => Some(Atmosphere::default()),
                    (false, _) => None,
                }
            }
            (ScenePath::AtmosphereHeight, SceneValue::Number(v)) => match &mut next.body.atmosphere {
                Some(atmosphere) => atmosphere.height = v,
                None => return Err(SceneError::NoAtmosphere(path)),
            },
            (ScenePath::SatelliteCount, SceneValue::Count(n)) => next.satellites.count = n,
            (ScenePath::SatelliteAltitude, SceneValue::Number(v)) => next.satellites.altitude = v,
            (ScenePath::OmniRange, SceneValue::Number(v)) => next.satellites.omni_range = v,
            (ScenePath::Toggle(kind), SceneValue::Flag(on)) => {
                let toggles = &mut next.ui.toggles;
                match kind {
                    ToggleKind::Atmosphere => toggles.atmosphere = on,
                    ToggleKind::Orbit => toggles.orbit = on,
                    ToggleKind::Stable => toggles.stable = on,
                    ToggleKind::Night => toggles.night = on,
                    ToggleKind::LineOfSight => toggles.line_of_sight = on,
                }
            }
            (ScenePath::SatelliteCount, _) => {
                return Err(SceneError::WrongKind(path, "a whole number"))
            }
            (ScenePath::Atmosphere | ScenePath::Toggle(_), _) => {
                return Err(SceneError::WrongKind(path, "true or false"))
            }
            (_, _) => return Err(SceneError::WrongKind(path, "a number")),
        }
        next.validate()?;
        Ok(next)
    }

    /// Apply a sequence of updates, stopping at the first rejected one.
    pub fn with_all<I>(&self, updates: I) -> Result<Scene, SceneError>
    where
        I: IntoIterator<Item = (ScenePath, SceneValue)>,
    {
        updates
            .into_iter()
            .try_fold(self.clone(), |scene, (path, value)| scene.with(path, value))
    }

    pub fn orbital_radius(&self) -> f64 {
        self.body.radius + self.satellites.altitude
    }

    pub fn display_name(&self) -> &str {
        self.body.name.as_deref().unwrap_or("body")
    }
}

fn check(
    path: ScenePath,
    value: f64,
    rule: &'static str,
    ok: impl Fn(f64) -> bool,
) -> Result<(), SceneError> {
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(SceneError::Invalid { path, rule, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_is_kerbin_and_valid() {
        let scene = Scene::default();
        assert_eq!(scene.display_name(), "Kerbin");
        assert_eq!(scene.orbital_radius(), 1100.0);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn with_returns_new_snapshot() {
        let scene = Scene::default();
        let next = scene
            .with(ScenePath::SatelliteCount, SceneValue::Count(6))
            .unwrap();
        assert_eq!(next.satellites.count, 6);
        assert_eq!(scene.satellites.count, 3);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let scene = Scene::default();
        for (path, value) in [
            (ScenePath::BodyRadius, 0.0),
            (ScenePath::BodyRadius, f64::NAN),
            (ScenePath::SatelliteAltitude, -1.0),
            (ScenePath::OmniRange, 0.0),
            (ScenePath::AtmosphereHeight, -5.0),
        ] {
            let err = scene.with(path, SceneValue::Number(value)).unwrap_err();
            assert!(matches!(err, SceneError::Invalid { path: p, .. } if p == path));
        }
    }

    #[test]
    fn atmosphere_presence_round_trip() {
        let scene = Scene::default()
            .with(ScenePath::AtmosphereHeight, SceneValue::Number(90.0))
            .unwrap();
        let bare = scene
            .with(ScenePath::Atmosphere, SceneValue::Flag(false))
            .unwrap();
        assert_eq!(bare.body.atmosphere, None);
        assert_eq!(
            bare.with(ScenePath::AtmosphereHeight, SceneValue::Number(10.0)),
            Err(SceneError::NoAtmosphere(ScenePath::AtmosphereHeight))
        );
        assert!(!ScenePath::AtmosphereHeight.is_available(&bare));

        let restored = bare
            .with(ScenePath::Atmosphere, SceneValue::Flag(true))
            .unwrap();
        assert_eq!(restored.body.atmosphere, Some(Atmosphere::default()));

        let kept = scene
            .with(ScenePath::Atmosphere, SceneValue::Flag(true))
            .unwrap();
        assert_eq!(kept.body.atmosphere, Some(Atmosphere { height: 90.0 }));
    }

    #[test]
    fn oversized_ring_is_rejected() {
        let scene = Scene::default();
        assert!(scene
            .with(ScenePath::SatelliteCount, SceneValue::Count(MAX_SATELLITES))
            .is_ok());
        let err = scene
            .with(ScenePath::SatelliteCount, SceneValue::Count(4_000_000_000))
            .unwrap_err();
        assert!(matches!(
            err,
            SceneError::Invalid { path: ScenePath::SatelliteCount, .. }
        ));

        let at_limit = scene
            .with(ScenePath::SatelliteCount, SceneValue::Count(MAX_SATELLITES))
            .unwrap();
        let next = ScenePath::SatelliteCount.step(&at_limit, true).unwrap();
        assert!(at_limit.with(ScenePath::SatelliteCount, next).is_err());
    }

    #[test]
    fn wrong_value_kind_is_rejected() {
        let scene = Scene::default();
        assert!(matches!(
            scene.with(ScenePath::SatelliteCount, SceneValue::Number(2.0)),
            Err(SceneError::WrongKind(..))
        ));
        assert!(matches!(
            scene.with(ScenePath::Toggle(ToggleKind::Night), SceneValue::Count(1)),
            Err(SceneError::WrongKind(..))
        ));
    }

    #[test]
    fn paths_parse_from_dotted_names() {
        assert_eq!("satellites.omniRange".parse::<ScenePath>(), Ok(ScenePath::OmniRange));
        assert_eq!("satellites.omni_range".parse::<ScenePath>(), Ok(ScenePath::OmniRange));
        assert_eq!(
            "ui.toggles.line_of_sight".parse::<ScenePath>(),
            Ok(ScenePath::Toggle(ToggleKind::LineOfSight))
        );
        assert!(matches!(
            "satellites.mass".parse::<ScenePath>(),
            Err(SceneError::UnknownPath(_))
        ));
        for path in ScenePath::ALL {
            assert_eq!(path.as_str().parse::<ScenePath>(), Ok(path));
        }
    }

    #[test]
    fn assignments_parse_per_kind() {
        assert_eq!(
            parse_assignment("satellites.count=4"),
            Ok((ScenePath::SatelliteCount, SceneValue::Count(4)))
        );
        assert_eq!(
            parse_assignment("ui.toggles.stable=on"),
            Ok((ScenePath::Toggle(ToggleKind::Stable), SceneValue::Flag(true)))
        );
        assert!(matches!(
            parse_assignment("satellites.count=-1"),
            Err(SceneError::BadValue { .. })
        ));
        assert!(parse_assignment("body.radius").is_err());
    }

    #[test]
    fn step_nudges_and_saturates() {
        let scene = Scene::default()
            .with(ScenePath::SatelliteCount, SceneValue::Count(0))
            .unwrap();
        assert_eq!(
            ScenePath::SatelliteCount.step(&scene, false),
            Some(SceneValue::Count(0))
        );
        assert_eq!(
            ScenePath::SatelliteAltitude.step(&scene, true),
            Some(SceneValue::Number(510.0))
        );
        assert_eq!(
            ScenePath::Toggle(ToggleKind::Stable).step(&scene, true),
            Some(SceneValue::Flag(true))
        );
    }

    #[test]
    fn with_all_stops_at_first_error() {
        let scene = Scene::default();
        let result = scene.with_all([
            (ScenePath::SatelliteCount, SceneValue::Count(5)),
            (ScenePath::BodyRadius, SceneValue::Number(-1.0)),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn scene_reads_from_toml() {
        let scene: Scene = toml::from_str(
            r#"
            [body]
            radius = 200
            [satellites]
            count = 4
            altitude = 300
            omniRange = 1500
            [ui.toggles]
            stable = true
            "#,
        )
        .unwrap();
        assert_eq!(scene.body.atmosphere, None);
        assert_eq!(scene.satellites.omni_range, 1500.0);
        assert!(scene.ui.toggles.stable);
        assert!(scene.ui.toggles.orbit);
    }
}
