// src/globe/config.rs
use super::error::GlobeResult;
use bevy::prelude::*;
use serde::Deserialize;

/// Startposition der Kamera über dem Globus, in Grad.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct InitialPosition {
    pub lat: f32,
    pub lng: f32,
}

/// Vom Host gelieferte Globus-Konfiguration. Alle Felder sind optional;
/// fehlende Werte werden beim Auflösen durch die Defaults ersetzt.
#[derive(Component, Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobeConfig {
    pub point_size: Option<f32>,
    pub globe_color: Option<String>,
    pub show_atmosphere: Option<bool>,
    pub atmosphere_color: Option<String>,
    pub atmosphere_altitude: Option<f32>,
    pub emissive: Option<String>,
    pub emissive_intensity: Option<f32>,
    pub shininess: Option<f32>,
    pub polygon_color: Option<String>,
    pub ambient_light: Option<String>,
    pub directional_left_light: Option<String>,
    pub directional_top_light: Option<String>,
    pub point_light: Option<String>,
    /// Dauer einer Arc-Dash-Animation in Millisekunden
    pub arc_time: Option<f32>,
    pub arc_length: Option<f32>,
    pub rings: Option<u32>,
    pub max_rings: Option<f32>,
    pub initial_position: Option<InitialPosition>,
    pub auto_rotate: Option<bool>,
    pub auto_rotate_speed: Option<f32>,
}

impl GlobeConfig {
    pub fn from_json(payload: &str) -> GlobeResult<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Flaches Mergen über die Defaults: jeder gesetzte Wert gewinnt, jeder
    /// fehlende Wert kommt aus [`ResolvedGlobeConfig::default`].
    pub fn resolve(&self) -> ResolvedGlobeConfig {
        let d = ResolvedGlobeConfig::default();
        ResolvedGlobeConfig {
            point_size: self.point_size.unwrap_or(d.point_size),
            globe_color: self.globe_color.clone().unwrap_or(d.globe_color),
            show_atmosphere: self.show_atmosphere.unwrap_or(d.show_atmosphere),
            atmosphere_color: self.atmosphere_color.clone().unwrap_or(d.atmosphere_color),
            atmosphere_altitude: self.atmosphere_altitude.unwrap_or(d.atmosphere_altitude),
            emissive: self.emissive.clone().unwrap_or(d.emissive),
            emissive_intensity: self.emissive_intensity.unwrap_or(d.emissive_intensity),
            shininess: self.shininess.unwrap_or(d.shininess),
            polygon_color: self.polygon_color.clone().unwrap_or(d.polygon_color),
            ambient_light: self.ambient_light.clone().unwrap_or(d.ambient_light),
            directional_left_light: self
                .directional_left_light
                .clone()
                .unwrap_or(d.directional_left_light),
            directional_top_light: self
                .directional_top_light
                .clone()
                .unwrap_or(d.directional_top_light),
            point_light: self.point_light.clone().unwrap_or(d.point_light),
            arc_time: self.arc_time.unwrap_or(d.arc_time),
            arc_length: self.arc_length.unwrap_or(d.arc_length),
            rings: self.rings.unwrap_or(d.rings),
            max_rings: self.max_rings.unwrap_or(d.max_rings),
            initial_position: self.initial_position.unwrap_or(d.initial_position),
            auto_rotate: self.auto_rotate.unwrap_or(d.auto_rotate),
            auto_rotate_speed: self.auto_rotate_speed.unwrap_or(d.auto_rotate_speed),
        }
    }
}

/// Vollständig aufgelöste Konfiguration, jedes Feld hat einen Wert.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGlobeConfig {
    pub point_size: f32,
    pub globe_color: String,
    pub show_atmosphere: bool,
    pub atmosphere_color: String,
    pub atmosphere_altitude: f32,
    pub emissive: String,
    pub emissive_intensity: f32,
    pub shininess: f32,
    pub polygon_color: String,
    pub ambient_light: String,
    pub directional_left_light: String,
    pub directional_top_light: String,
    pub point_light: String,
    pub arc_time: f32,
    pub arc_length: f32,
    pub rings: u32,
    pub max_rings: f32,
    pub initial_position: InitialPosition,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
}

impl Default for ResolvedGlobeConfig {
    fn default() -> Self {
        Self {
            point_size: 1.0,
            globe_color: "#1d072e".to_string(),
            show_atmosphere: true,
            atmosphere_color: "#ffffff".to_string(),
            atmosphere_altitude: 0.1,
            emissive: "#000000".to_string(),
            emissive_intensity: 0.1,
            shininess: 0.9,
            polygon_color: "rgba(255,255,255,0.7)".to_string(),

            // Licht
            ambient_light: "#ffffff".to_string(),
            directional_left_light: "#ffffff".to_string(),
            directional_top_light: "#ffffff".to_string(),
            point_light: "#ffffff".to_string(),

            // Arcs & Ringe
            arc_time: 2000.0,
            arc_length: 0.9,
            rings: 1,
            max_rings: 3.0,

            // Kamera
            initial_position: InitialPosition::default(),
            auto_rotate: true,
            auto_rotate_speed: 1.0,
        }
    }
}

impl ResolvedGlobeConfig {
    /// Wiederholperiode der Ringe in Millisekunden: `(arcTime * arcLength) / rings`.
    pub fn ring_repeat_period(&self) -> f32 {
        super::rings::ring_repeat_period(self.arc_time, self.arc_length, self.rings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_resolves_to_defaults() {
        assert_eq!(GlobeConfig::default().resolve(), ResolvedGlobeConfig::default());
    }

    #[test]
    fn test_single_override() {
        let config = GlobeConfig {
            globe_color: Some("#0a0a0a".to_string()),
            ..default()
        };
        let resolved = config.resolve();

        assert_eq!(resolved.globe_color, "#0a0a0a");
        assert_eq!(resolved.point_size, 1.0);
        assert_eq!(resolved.arc_time, 2000.0);
        let expected = ResolvedGlobeConfig {
            globe_color: "#0a0a0a".to_string(),
            ..default()
        };
        assert_eq!(resolved, expected);
    }

    #[test]
    fn test_from_json_camel_case() {
        let config = GlobeConfig::from_json(
            r#"{
                "pointSize": 4,
                "showAtmosphere": false,
                "arcTime": 1000,
                "rings": 2,
                "initialPosition": { "lat": 22.3193, "lng": 114.1694 },
                "autoRotateSpeed": 0.5
            }"#,
        )
        .unwrap();
        let resolved = config.resolve();

        assert_eq!(resolved.point_size, 4.0);
        assert!(!resolved.show_atmosphere);
        assert_eq!(resolved.arc_time, 1000.0);
        assert_eq!(resolved.rings, 2);
        assert_eq!(resolved.initial_position.lng, 114.1694);
        assert_eq!(resolved.auto_rotate_speed, 0.5);
        // nicht gesetzt
        assert_eq!(resolved.globe_color, "#1d072e");
        assert!(resolved.auto_rotate);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(GlobeConfig::from_json("{ nope").is_err());
    }

    #[test]
    fn test_repeat_period() {
        assert_eq!(ResolvedGlobeConfig::default().ring_repeat_period(), 1800.0);
    }
}
