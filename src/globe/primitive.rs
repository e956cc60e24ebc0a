// src/globe/primitive.rs
//! Zustand des Globus-Renderers.
//!
//! `GlobePrimitive` hält die komplette Layer-Konfiguration eines Globus:
//! Material, Atmosphäre, Hex-Polygone, Arcs, Punkte und Ringe. Die Setter
//! lassen sich verketten und überschreiben nur Werte, mehrfaches Anwenden
//! derselben Konfiguration ergibt daher denselben Zustand. Die Render-Systeme
//! lesen ausschließlich diesen Zustand.

use super::data::ArcDescriptor;
use super::points::DerivedPoint;
use crate::world::{CountryPolygons, HexOverlay, tessellate};
use bevy::prelude::*;
use std::sync::Arc;

/// Radius des Globus in Weltkoordinaten
pub const GLOBE_RADIUS: f32 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GlobeMaterial {
    pub color: Color,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub shininess: f32,
}

impl Default for GlobeMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            emissive: Color::BLACK,
            emissive_intensity: 1.0,
            shininess: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtmosphereLayer {
    pub visible: bool,
    pub color: Color,
    /// Höhe relativ zum Globusradius
    pub altitude: f32,
}

impl Default for AtmosphereLayer {
    fn default() -> Self {
        Self {
            visible: true,
            color: Color::rgb(0.68, 0.85, 0.9),
            altitude: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HexPolygonLayer {
    pub data: Arc<CountryPolygons>,
    pub resolution: u32,
    pub margin: f32,
    pub color: Color,
    overlay: Arc<HexOverlay>,
    overlay_key: Option<(usize, u32, u32)>,
}

impl Default for HexPolygonLayer {
    fn default() -> Self {
        Self {
            data: Arc::default(),
            resolution: 3,
            margin: 0.2,
            color: Color::WHITE,
            overlay: Arc::default(),
            overlay_key: None,
        }
    }
}

impl HexPolygonLayer {
    pub fn overlay(&self) -> &HexOverlay {
        &self.overlay
    }

    /// Tesselliert neu, wenn sich Datensatz, Auflösung oder Rand geändert haben.
    /// Liefert `true`, wenn neu gerechnet wurde.
    pub fn refresh_overlay(&mut self) -> bool {
        let key = (
            Arc::as_ptr(&self.data) as usize,
            self.resolution,
            self.margin.to_bits(),
        );
        if self.overlay_key == Some(key) {
            return false;
        }
        self.overlay = Arc::new(tessellate(&self.data, self.resolution, self.margin));
        self.overlay_key = Some(key);
        info!(
            "Hex overlay tessellated: {} cells (resolution {}, margin {:.2})",
            self.overlay.len(),
            self.resolution,
            self.margin
        );
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArcLayer {
    pub data: Vec<ArcDescriptor>,
    /// Dash-Länge als Anteil der Bogenlänge
    pub dash_length: f32,
    pub dash_gap: f32,
    /// Millisekunden, bis ein Dash den ganzen Bogen durchlaufen hat
    pub dash_animate_time: f32,
}

impl Default for ArcLayer {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            dash_length: 1.0,
            dash_gap: 0.0,
            dash_animate_time: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointLayer {
    pub data: Vec<DerivedPoint>,
    pub merge: bool,
    pub altitude: f32,
    /// Winkelradius in Grad (wird mit `DerivedPoint::size` skaliert)
    pub radius: f32,
}

impl Default for PointLayer {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            merge: false,
            altitude: 0.1,
            radius: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingLayer {
    pub data: Vec<DerivedPoint>,
    /// Maximaler Winkelradius in Grad
    pub max_radius: f32,
    /// Grad pro Sekunde
    pub propagation_speed: f32,
    /// Millisekunden zwischen zwei Ringen am selben Punkt
    pub repeat_period: f32,
}

impl Default for RingLayer {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            max_radius: 2.0,
            propagation_speed: 1.0,
            repeat_period: 700.0,
        }
    }
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct GlobePrimitive {
    pub material: GlobeMaterial,
    pub atmosphere: AtmosphereLayer,
    pub hex_polygons: HexPolygonLayer,
    pub arcs: ArcLayer,
    pub points: PointLayer,
    pub rings: RingLayer,
}

impl GlobePrimitive {
    pub fn globe_material(&mut self) -> &mut GlobeMaterial {
        &mut self.material
    }

    // --- Hex-Polygone ---

    pub fn hex_polygons_data(&mut self, data: Arc<CountryPolygons>) -> &mut Self {
        self.hex_polygons.data = data;
        self
    }

    pub fn hex_polygon_resolution(&mut self, resolution: u32) -> &mut Self {
        self.hex_polygons.resolution = resolution;
        self
    }

    pub fn hex_polygon_margin(&mut self, margin: f32) -> &mut Self {
        self.hex_polygons.margin = margin;
        self
    }

    pub fn hex_polygon_color(&mut self, color: Color) -> &mut Self {
        self.hex_polygons.color = color;
        self
    }

    // --- Atmosphäre ---

    pub fn show_atmosphere(&mut self, visible: bool) -> &mut Self {
        self.atmosphere.visible = visible;
        self
    }

    pub fn atmosphere_color(&mut self, color: Color) -> &mut Self {
        self.atmosphere.color = color;
        self
    }

    pub fn atmosphere_altitude(&mut self, altitude: f32) -> &mut Self {
        self.atmosphere.altitude = altitude;
        self
    }

    // --- Arcs ---

    pub fn arcs_data(&mut self, data: Vec<ArcDescriptor>) -> &mut Self {
        self.arcs.data = data;
        self
    }

    pub fn arc_dash_length(&mut self, length: f32) -> &mut Self {
        self.arcs.dash_length = length;
        self
    }

    pub fn arc_dash_gap(&mut self, gap: f32) -> &mut Self {
        self.arcs.dash_gap = gap;
        self
    }

    pub fn arc_dash_animate_time(&mut self, millis: f32) -> &mut Self {
        self.arcs.dash_animate_time = millis;
        self
    }

    // --- Punkte ---

    pub fn points_data(&mut self, data: Vec<DerivedPoint>) -> &mut Self {
        self.points.data = data;
        self
    }

    pub fn points_merge(&mut self, merge: bool) -> &mut Self {
        self.points.merge = merge;
        self
    }

    pub fn point_altitude(&mut self, altitude: f32) -> &mut Self {
        self.points.altitude = altitude;
        self
    }

    pub fn point_radius(&mut self, radius: f32) -> &mut Self {
        self.points.radius = radius;
        self
    }

    // --- Ringe ---

    pub fn rings_data(&mut self, data: Vec<DerivedPoint>) -> &mut Self {
        self.rings.data = data;
        self
    }

    pub fn ring_max_radius(&mut self, degrees: f32) -> &mut Self {
        self.rings.max_radius = degrees;
        self
    }

    pub fn ring_propagation_speed(&mut self, degrees_per_second: f32) -> &mut Self {
        self.rings.propagation_speed = degrees_per_second;
        self
    }

    pub fn ring_repeat_period(&mut self, millis: f32) -> &mut Self {
        self.rings.repeat_period = millis;
        self
    }
}
