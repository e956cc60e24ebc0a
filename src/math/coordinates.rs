// src/math/coordinates.rs

use crate::math::utils::*;
use bevy::math::Vec3;
use std::f32::consts::PI;

/// Geografische Koordinaten (Lat/Lon) auf dem Globus.
///
/// Die Achsen folgen der Konvention des Globus-Renderers: `+Y` zeigt zum
/// Nordpol, `(lat 0, lng 0)` liegt auf `+Z`, positive Längengrade drehen
/// Richtung `+X`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeographicCoordinates {
    /// Breitengrad in Radiant (-π/2 bis π/2)
    pub latitude: f32,
    /// Längengrad in Radiant (-π bis π)
    pub longitude: f32,
    /// Höhe über der Oberfläche, relativ zum Globusradius
    pub altitude: f32,
}

impl GeographicCoordinates {
    pub fn new(latitude: f32, longitude: f32, altitude: f32) -> Self {
        Self {
            latitude: latitude.clamp(-PI * 0.5, PI * 0.5),
            longitude: angles::normalize_angle_signed(longitude),
            altitude,
        }
    }

    /// Erstellt aus Grad-Werten
    pub fn from_degrees(lat_deg: f32, lng_deg: f32, altitude: f32) -> Self {
        Self::new(
            angles::deg_to_rad(lat_deg),
            angles::deg_to_rad(lng_deg),
            altitude,
        )
    }

    /// Einheitsvektor vom Globuszentrum zu diesem Punkt
    pub fn direction(&self) -> Vec3 {
        let cos_lat = self.latitude.cos();
        Vec3::new(
            cos_lat * self.longitude.sin(),
            self.latitude.sin(),
            cos_lat * self.longitude.cos(),
        )
    }

    /// Konvertiert zu kartesischen Koordinaten
    pub fn to_cartesian(&self, radius: f32) -> Vec3 {
        self.direction() * radius * (1.0 + self.altitude)
    }
}

/// Sphärische Interpolation zwischen zwei Richtungen.
pub fn slerp_direction(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    let from = from.normalize();
    let to = to.normalize();
    let angle = from.dot(to).clamp(-1.0, 1.0).acos();
    if angle < constants::EPSILON {
        return from;
    }
    let sin_angle = angle.sin();
    if sin_angle.abs() < constants::EPSILON {
        // Antipoden: keine eindeutige Ebene, linear über das Zentrum
        return from.lerp(to, t).try_normalize().unwrap_or(from);
    }
    let a = ((1.0 - t) * angle).sin() / sin_angle;
    let b = (t * angle).sin() / sin_angle;
    (from * a + to * b).normalize()
}

/// Punkt eines über den Globus gewölbten Großkreisbogens bei `t` in `[0, 1]`.
///
/// Die Höhe folgt `altitude * sin(π t)`, der Scheitel liegt also bei
/// `radius * (1 + altitude)` in der Mitte des Bogens.
pub fn arc_point(
    start: GeographicCoordinates,
    end: GeographicCoordinates,
    altitude: f32,
    radius: f32,
    t: f32,
) -> Vec3 {
    let lift = 1.0 + altitude * (PI * t).sin();
    slerp_direction(start.direction(), end.direction(), t) * radius * lift
}

/// Punkt auf dem Kleinkreis mit Winkelradius `angular_radius` um `center`.
///
/// Liefert Mittelpunkt und Radius des Kreises in Weltkoordinaten; die
/// Normale ist `center` selbst.
pub fn small_circle(center: Vec3, angular_radius: f32, sphere_radius: f32) -> (Vec3, f32) {
    let dir = center.normalize_or_zero();
    (
        dir * sphere_radius * angular_radius.cos(),
        sphere_radius * angular_radius.sin(),
    )
}
