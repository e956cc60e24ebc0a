// src/globe/points.rs
use super::color::{Rgb, hex_to_rgb};
use super::data::ArcDescriptor;
use bevy::prelude::*;

/// Farbverlauf eines Punktes: volle Deckkraft bei `t = 0`, transparent bei `t = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointColor(pub Option<Rgb>);

impl PointColor {
    /// CSS-Darstellung `rgba(r, g, b, 1 - t)`, `None` ohne gültige Farbe.
    pub fn css(&self, t: f32) -> Option<String> {
        self.0
            .map(|Rgb { r, g, b }| format!("rgba({r}, {g}, {b}, {})", 1.0 - t))
    }

    pub fn color(&self, t: f32) -> Color {
        match self.0 {
            Some(rgb) => rgb.to_color(1.0 - t),
            None => Color::NONE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedPoint {
    pub size: f32,
    pub order: i32,
    pub color: PointColor,
    pub lat: f64,
    pub lng: f64,
}

/// Punkt-Pool eines Globus, abgeleitet aus den Arc-Endpunkten.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct DerivedPoints(pub Vec<DerivedPoint>);

impl DerivedPoints {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Leitet aus den Arcs die Endpunkte ab: Start vor Ende, in Arc-Reihenfolge.
/// Punkte mit exakt gleichem (lat, lng) werden zusammengefasst, der erste gewinnt.
pub fn derive_points(arcs: &[ArcDescriptor], point_size: f32) -> Vec<DerivedPoint> {
    let mut points: Vec<DerivedPoint> = Vec::with_capacity(arcs.len() * 2);

    for arc in arcs {
        let color = PointColor(hex_to_rgb(&arc.color));
        for (lat, lng) in [(arc.start_lat, arc.start_lng), (arc.end_lat, arc.end_lng)] {
            // f64 ist nicht Hash/Eq, daher lineare Suche mit exakter Gleichheit
            if points.iter().any(|p| p.lat == lat && p.lng == lng) {
                continue;
            }
            points.push(DerivedPoint {
                size: point_size,
                order: arc.order,
                color,
                lat,
                lng,
            });
        }
    }

    points
}
