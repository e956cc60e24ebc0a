// src/globe/color.rs
//! Farbhilfen für Arc-, Punkt- und Polygonfarben.
//!
//! Ungültige Farbangaben sind nie ein Fehler: sie werden zu `None` bzw. zu
//! einer transparenten Farbe.

use bevy::prelude::Color;

/// 8-Bit RGB-Tripel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_color(self, alpha: f32) -> Color {
        Color::rgba_u8(self.r, self.g, self.b, 255).with_a(alpha.clamp(0.0, 1.0))
    }
}

/// Wandelt `#rgb`, `#rrggbb` (mit oder ohne `#`, Groß-/Kleinschreibung egal)
/// in ein [`Rgb`] um. Alles andere liefert `None`.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match digits.len() {
        3 => {
            let mut channels = digits.chars().map(|c| {
                // Kurzform: jede Ziffer wird verdoppelt
                let v = c.to_digit(16).unwrap_or(0) as u8;
                v * 16 + v
            });
            Some(Rgb::new(channels.next()?, channels.next()?, channels.next()?))
        }
        6 => {
            let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
            Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}

/// Parst die CSS-Farbangaben, die in Konfiguration und Arc-Daten vorkommen:
/// Hex (`#rgb`, `#rrggbb`) sowie `rgb(r, g, b)` und `rgba(r, g, b, a)`.
pub fn parse_css_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(rgb) = hex_to_rgb(value) {
        return Some(rgb.to_color(1.0));
    }

    let lower = value.to_ascii_lowercase();
    let (inner, expects_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
        (rest.strip_suffix(')')?, true)
    } else if let Some(rest) = lower.strip_prefix("rgb(") {
        (rest.strip_suffix(')')?, false)
    } else {
        return None;
    };

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let expected = if expects_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }

    let channel = |s: &str| s.parse::<f32>().ok().filter(|v| (0.0..=255.0).contains(v));
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = if expects_alpha {
        parts[3].parse::<f32>().ok()?.clamp(0.0, 1.0)
    } else {
        1.0
    };

    Some(Color::rgba(r / 255.0, g / 255.0, b / 255.0, a))
}

/// Wie [`parse_css_color`], fällt aber auf `fallback` zurück.
pub fn css_color_or(value: &str, fallback: Color) -> Color {
    parse_css_color(value).unwrap_or(fallback)
}
