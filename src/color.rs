use clap::ValueEnum;
use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Things the plot paints, each with its own colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Body,
    Atmosphere,
    OmniRange,
    Orbit,
    StableOrbit,
    Satellite,
    Link,
    BrokenLink,
    NightShadow,
    Text,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

impl Theme {
    /// Colour for an element as RGB.
    pub fn get_color(&self, element: Element) -> (u8, u8, u8) {
        let (h, s, l): (f32, f32, f32) = match (self, element) {
            // Foreground grey, dark on light backgrounds and vice versa
            (Theme::Light, Element::Body | Element::Satellite | Element::Text) => (0.0, 0.0, 0.15),
            (Theme::Dark, Element::Body | Element::Satellite | Element::Text) => (0.0, 0.0, 0.85),
            (Theme::Light, Element::Orbit | Element::StableOrbit) => (0.0, 0.0, 0.35),
            (Theme::Dark, Element::Orbit | Element::StableOrbit) => (0.0, 0.0, 0.65),
            // Slate blue on light, deep sea blue on dark
            (Theme::Light, Element::Atmosphere) => (205.0, 0.15, 0.61),
            (Theme::Dark, Element::Atmosphere) => (202.0, 0.98, 0.31),
            // Yellow, paler on dark
            (Theme::Light, Element::OmniRange) => (54.0, 0.98, 0.60),
            (Theme::Dark, Element::OmniRange) => (54.0, 0.96, 0.80),
            (_, Element::Link) => (122.0, 0.45, 0.50),
            (_, Element::BrokenLink) => (4.0, 0.80, 0.55),
            (Theme::Light, Element::NightShadow) => (0.0, 0.0, 0.80),
            (Theme::Dark, Element::NightShadow) => (0.0, 0.0, 0.25),
        };

        let hsl = Hsl::new(h, s, l);
        let rgb: Srgb = hsl.into_color();

        (
            (rgb.red * 255.0).round() as u8,
            (rgb.green * 255.0).round() as u8,
            (rgb.blue * 255.0).round() as u8,
        )
    }

    /// Hex string for SVG attributes.
    pub fn hex(&self, element: Element) -> String {
        let (r, g, b) = self.get_color(element);
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    pub fn background(&self) -> (u8, u8, u8) {
        match self {
            Theme::Light => (255, 255, 255),
            Theme::Dark => (18, 18, 18),
        }
    }

    pub fn all() -> &'static [Theme] {
        &[Theme::Light, Theme::Dark]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|t| t == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greys_are_neutral() {
        let (r, g, b) = Theme::Dark.get_color(Element::Body);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert!(r > 200);
    }

    #[test]
    fn hex_is_seven_chars() {
        for theme in Theme::all() {
            let hex = theme.hex(Element::OmniRange);
            assert_eq!(hex.len(), 7);
            assert!(hex.starts_with('#'));
        }
    }

    #[test]
    fn next_cycles() {
        assert_eq!(Theme::Light.next(), Theme::Dark);
        assert_eq!(Theme::Dark.next(), Theme::Light);
        assert_eq!("LIGHT".parse::<Theme>(), Ok(Theme::Light));
    }
}
