// src/globe/data.rs
use super::error::GlobeResult;
use bevy::prelude::*;
use serde::Deserialize;

/// Ein Bogen zwischen zwei geografischen Koordinaten (Grad).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcDescriptor {
    pub order: i32,
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    /// Scheitelhöhe relativ zum Globusradius
    pub arc_alt: f64,
    /// Hex- oder rgba()-Farbe
    pub color: String,
}

impl ArcDescriptor {
    pub fn list_from_json(payload: &str) -> GlobeResult<Vec<Self>> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Arc-Liste eines Globus. Jede Änderung an dieser Komponente stößt die
/// Neuberechnung der Punkte an.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct GlobeArcs(pub Vec<ArcDescriptor>);

impl GlobeArcs {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arc_list() {
        let arcs = ArcDescriptor::list_from_json(
            r##"[
                { "order": 1, "startLat": -19.885592, "startLng": -43.951191,
                  "endLat": -22.9068, "endLng": -43.1729, "arcAlt": 0.1, "color": "#06b6d4" },
                { "order": 2, "startLat": 28.6139, "startLng": 77.209,
                  "endLat": 3.139, "endLng": 101.6869, "arcAlt": 0.2, "color": "#3b82f6" }
            ]"##,
        )
        .unwrap();

        assert_eq!(arcs.len(), 2);
        assert_eq!(arcs[0].order, 1);
        assert_eq!(arcs[1].end_lng, 101.6869);
        assert_eq!(arcs[1].color, "#3b82f6");
    }

    #[test]
    fn test_missing_field_is_error() {
        let result = ArcDescriptor::list_from_json(r#"[{ "order": 1 }]"#);
        assert!(result.is_err());
    }
}
