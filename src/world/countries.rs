// src/world/countries.rs
//! Statischer Weltumriss-Datensatz (GeoJSON) für den Hex-Polygon-Layer.

use crate::globe::error::{GlobeError, GlobeResult};
use bevy::prelude::*;
use geo::{BoundingRect, Contains, Coord, LineString, MultiPolygon, Point, Polygon, Rect};
use serde_json::Value;
use std::sync::Arc;

/// Eingebetteter Datensatz mit vereinfachten Kontinent-/Länderumrissen.
pub const WORLD_GEOJSON: &str = include_str!("../../assets/globe.json");

#[derive(Debug, Clone, PartialEq)]
pub struct CountryFeature {
    pub name: Option<String>,
    pub shape: MultiPolygon<f64>,
    bbox: Option<Rect<f64>>,
}

impl CountryFeature {
    pub fn new(name: Option<String>, shape: MultiPolygon<f64>) -> Self {
        let bbox = shape.bounding_rect();
        Self { name, shape, bbox }
    }

    /// Punkt-in-Polygon in GeoJSON-Reihenfolge (Länge, Breite) in Grad.
    pub fn contains(&self, lng: f64, lat: f64) -> bool {
        let Some(bbox) = self.bbox else {
            return false;
        };
        let (min, max) = (bbox.min(), bbox.max());
        if lng < min.x || lng > max.x || lat < min.y || lat > max.y {
            return false;
        }
        self.shape.contains(&Point::new(lng, lat))
    }
}

/// Alle Features des Datensatzes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryPolygons {
    pub features: Vec<CountryFeature>,
}

impl CountryPolygons {
    pub fn from_geojson_str(payload: &str) -> GlobeResult<Self> {
        let value: Value = serde_json::from_str(payload)?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_value(value: &Value) -> GlobeResult<Self> {
        let obj = value.as_object().ok_or(GlobeError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(GlobeError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(GlobeError::NotAFeatureCollection);
        }
        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(GlobeError::NotAFeatureCollection)?;

        let mut features = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.iter().enumerate() {
            let feat_obj = feat_val.as_object().ok_or(GlobeError::InvalidFeature {
                index,
                reason: "feature must be an object".to_string(),
            })?;

            let name = feat_obj
                .get("properties")
                .and_then(|p| p.get("name").or_else(|| p.get("ADMIN")))
                .and_then(|n| n.as_str())
                .map(str::to_string);

            let geometry = feat_obj.get("geometry").ok_or(GlobeError::InvalidFeature {
                index,
                reason: "feature missing geometry".to_string(),
            })?;
            let geom_type = geometry.get("type").and_then(|v| v.as_str()).unwrap_or("");
            let coordinates = geometry.get("coordinates");

            let shape = match (geom_type, coordinates) {
                ("Polygon", Some(coords)) => MultiPolygon::new(vec![parse_polygon(index, coords)?]),
                ("MultiPolygon", Some(coords)) => {
                    let parts = coords.as_array().ok_or(GlobeError::InvalidGeometry {
                        index,
                        reason: "MultiPolygon coordinates must be an array".to_string(),
                    })?;
                    MultiPolygon::new(
                        parts
                            .iter()
                            .map(|part| parse_polygon(index, part))
                            .collect::<GlobeResult<Vec<_>>>()?,
                    )
                }
                (other, _) => {
                    warn!("Skipping feature {} with unsupported geometry '{}'", index, other);
                    continue;
                }
            };

            features.push(CountryFeature::new(name, shape));
        }

        Ok(Self { features })
    }

    /// Lädt den eingebetteten Datensatz.
    pub fn embedded() -> GlobeResult<Self> {
        Self::from_geojson_str(WORLD_GEOJSON)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn contains(&self, lng: f64, lat: f64) -> bool {
        self.features.iter().any(|f| f.contains(lng, lat))
    }
}

fn parse_polygon(index: usize, value: &Value) -> GlobeResult<Polygon<f64>> {
    let rings = value.as_array().ok_or(GlobeError::InvalidGeometry {
        index,
        reason: "polygon must be an array of rings".to_string(),
    })?;
    let mut rings = rings.iter().map(|ring| parse_ring(index, ring));
    let exterior = rings.next().ok_or(GlobeError::InvalidGeometry {
        index,
        reason: "polygon without exterior ring".to_string(),
    })??;
    let interiors = rings.collect::<GlobeResult<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn parse_ring(index: usize, value: &Value) -> GlobeResult<LineString<f64>> {
    let positions = value.as_array().ok_or(GlobeError::InvalidGeometry {
        index,
        reason: "ring must be an array of positions".to_string(),
    })?;
    let coords = positions
        .iter()
        .map(|pos| {
            let lng = pos.get(0).and_then(Value::as_f64);
            let lat = pos.get(1).and_then(Value::as_f64);
            match (lng, lat) {
                (Some(x), Some(y)) => Ok(Coord { x, y }),
                _ => Err(GlobeError::InvalidGeometry {
                    index,
                    reason: "position must be [lng, lat]".to_string(),
                }),
            }
        })
        .collect::<GlobeResult<Vec<_>>>()?;
    if coords.len() < 4 {
        return Err(GlobeError::InvalidGeometry {
            index,
            reason: format!("ring needs at least 4 positions, got {}", coords.len()),
        });
    }
    Ok(LineString::new(coords))
}

/// Gemeinsam genutzter Datensatz; wird einmal geladen und von allen Globen gelesen.
#[derive(Resource, Debug, Clone, Default)]
pub struct WorldDataset(pub Arc<CountryPolygons>);

impl WorldDataset {
    pub fn load_embedded() -> Self {
        match CountryPolygons::embedded() {
            Ok(polygons) => {
                info!("World dataset loaded: {} features", polygons.len());
                Self(Arc::new(polygons))
            }
            Err(err) => {
                error!("Failed to load world dataset, hex overlay disabled: {}", err);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "name": "Square" },
              "geometry": { "type": "Polygon",
                "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]] } },
            { "type": "Feature", "properties": {},
              "geometry": { "type": "MultiPolygon",
                "coordinates": [[[[20,20],[30,20],[30,30],[20,20]]]] } },
            { "type": "Feature", "properties": {},
              "geometry": { "type": "Point", "coordinates": [1, 1] } }
        ]
    }"#;

    #[test]
    fn test_parse_polygon_and_multipolygon() {
        let polygons = CountryPolygons::from_geojson_str(SQUARE).unwrap();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons.features[0].name.as_deref(), Some("Square"));
        assert_eq!(polygons.features[1].name, None);
    }

    #[test]
    fn test_contains() {
        let polygons = CountryPolygons::from_geojson_str(SQUARE).unwrap();
        assert!(polygons.contains(5.0, 5.0));
        assert!(polygons.contains(28.0, 22.0));
        assert!(!polygons.contains(15.0, 5.0));
        assert!(!polygons.contains(-5.0, 5.0));
    }

    #[test]
    fn test_rejects_non_collection() {
        let err = CountryPolygons::from_geojson_str(r#"{ "type": "Feature" }"#).unwrap_err();
        assert!(matches!(err, GlobeError::NotAFeatureCollection));
        assert!(matches!(
            CountryPolygons::from_geojson_str("[1, 2").unwrap_err(),
            GlobeError::Json(_)
        ));
    }

    #[test]
    fn test_rejects_short_ring() {
        let payload = r#"{ "type": "FeatureCollection", "features": [
            { "type": "Feature", "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,1]]] } }
        ] }"#;
        let err = CountryPolygons::from_geojson_str(payload).unwrap_err();
        assert!(matches!(err, GlobeError::InvalidGeometry { index: 0, .. }));
    }

    #[test]
    fn test_embedded_dataset_parses() {
        let polygons = CountryPolygons::embedded().unwrap();
        assert!(!polygons.is_empty());
        // Mitte Afrikas liegt auf Land, Mitte des Pazifiks nicht
        assert!(polygons.contains(20.0, 5.0));
        assert!(!polygons.contains(-150.0, 0.0));
    }
}
