// src/render/layers.rs
//! Gizmo-Layer: Hex-Overlay, animierte Arcs, Punkte und Ringe.

use crate::globe::color::css_color_or;
use crate::globe::{GLOBE_RADIUS, GlobePrimitive};
use crate::math::{GeographicCoordinates, arc_point, small_circle, utils::angles};
use bevy::prelude::*;

/// Abtastpunkte pro ganzem Bogen
const ARC_SEGMENTS: usize = 64;
/// Leichter Versatz über der Oberfläche gegen Z-Fighting
const SURFACE_LIFT: f32 = 1.005;
const POINT_SEGMENTS: usize = 12;
const RING_SEGMENTS: usize = 48;
/// Obergrenze gleichzeitig sichtbarer Ringe pro Punkt
pub const MAX_CONCURRENT_RINGS: usize = 64;

/// Sichtbare Dash-Abschnitte `[t0, t1]` eines Bogens.
///
/// Das Muster hat die Periode `dash_length + dash_gap` (in Bogenlängen) und
/// ist um `offset` verschoben. Abschnitte werden auf `[0, 1]` beschnitten.
pub fn dash_runs(dash_length: f32, dash_gap: f32, offset: f32) -> Vec<(f32, f32)> {
    if dash_length <= 0.0 {
        return Vec::new();
    }
    let period = dash_length + dash_gap.max(0.0);
    if dash_gap <= 0.0 {
        return vec![(0.0, 1.0)];
    }

    let phase = offset.rem_euclid(period);
    let first = ((-phase - dash_length) / period).floor() as i32;
    let last = ((1.0 - phase) / period).ceil() as i32;

    (first..=last)
        .filter_map(|k| {
            let start = phase + k as f32 * period;
            let t0 = start.max(0.0);
            let t1 = (start + dash_length).min(1.0);
            (t1 > t0).then_some((t0, t1))
        })
        .collect()
}

/// Dash-Versatz zum Zeitpunkt `elapsed_ms`: ein Bogen pro `animate_time` ms.
pub fn dash_offset(elapsed_ms: f32, animate_time: f32) -> f32 {
    if animate_time <= 0.0 {
        return 0.0;
    }
    elapsed_ms / animate_time
}

/// Winkelradien (Grad) aller gerade sichtbaren Ringe eines Punktes.
///
/// Pro Punkt werden höchstens [`MAX_CONCURRENT_RINGS`] Ringe geliefert, auch
/// wenn die Periode deutlich kürzer als die Lebensdauer eines Rings ist.
pub fn ring_radii(elapsed_ms: f32, speed: f32, max_radius: f32, repeat_period: f32) -> Vec<f32> {
    if speed <= 0.0 || max_radius <= 0.0 || !repeat_period.is_finite() || repeat_period <= 0.0 {
        return Vec::new();
    }
    let lifetime_ms = max_radius / speed * 1000.0;
    let youngest = elapsed_ms.rem_euclid(repeat_period);
    // Alter per Multiplikation, nicht aufsummiert: bei winzigen Perioden
    // würde `age += period` in f32 stehen bleiben
    (0..MAX_CONCURRENT_RINGS)
        .map(|k| youngest + k as f32 * repeat_period)
        .take_while(|&age| age < lifetime_ms)
        .map(|age| speed * age / 1000.0)
        .collect()
}

fn surface_direction(lat: f64, lng: f64) -> Vec3 {
    GeographicCoordinates::from_degrees(lat as f32, lng as f32, 0.0).direction()
}

fn draw_surface_circle(
    gizmos: &mut Gizmos,
    transform: &GlobalTransform,
    dir: Vec3,
    angular_radius_deg: f32,
    segments: usize,
    color: Color,
) {
    let Ok(normal) = Direction3d::new(transform.affine().transform_vector3(dir)) else {
        return;
    };
    let (center, radius) = small_circle(
        dir,
        angles::deg_to_rad(angular_radius_deg),
        GLOBE_RADIUS * SURFACE_LIFT,
    );
    gizmos
        .circle(transform.transform_point(center), normal, radius, color)
        .segments(segments);
}

pub fn draw_hex_overlay(mut gizmos: Gizmos, query: Query<(&GlobePrimitive, &GlobalTransform)>) {
    for (primitive, transform) in query.iter() {
        let layer = &primitive.hex_polygons;
        let overlay = layer.overlay();
        if overlay.cell_radius <= 0.0 {
            continue;
        }
        let radius_deg = angles::rad_to_deg(overlay.cell_radius);
        for &dir in &overlay.cells {
            // Sechs Segmente ergeben ein Hexagon
            draw_surface_circle(&mut gizmos, transform, dir, radius_deg, 6, layer.color);
        }
    }
}

pub fn draw_arcs(
    time: Res<Time>,
    mut gizmos: Gizmos,
    query: Query<(&GlobePrimitive, &GlobalTransform)>,
) {
    let elapsed_ms = time.elapsed_seconds() * 1000.0;
    for (primitive, transform) in query.iter() {
        let layer = &primitive.arcs;
        let runs = dash_runs(
            layer.dash_length,
            layer.dash_gap,
            dash_offset(elapsed_ms, layer.dash_animate_time),
        );
        if runs.is_empty() {
            continue;
        }

        for arc in &layer.data {
            let start = GeographicCoordinates::from_degrees(
                arc.start_lat as f32,
                arc.start_lng as f32,
                0.0,
            );
            let end =
                GeographicCoordinates::from_degrees(arc.end_lat as f32, arc.end_lng as f32, 0.0);
            let color = css_color_or(&arc.color, Color::WHITE);
            let altitude = arc.arc_alt as f32;

            for &(t0, t1) in &runs {
                let steps = (((t1 - t0) * ARC_SEGMENTS as f32).ceil() as usize).max(1);
                let strip = (0..=steps).map(|i| {
                    let t = t0 + (t1 - t0) * i as f32 / steps as f32;
                    transform.transform_point(arc_point(start, end, altitude, GLOBE_RADIUS, t))
                });
                gizmos.linestrip(strip, color);
            }
        }
    }
}

pub fn draw_points(mut gizmos: Gizmos, query: Query<(&GlobePrimitive, &GlobalTransform)>) {
    for (primitive, transform) in query.iter() {
        let layer = &primitive.points;
        for point in &layer.data {
            let dir = GeographicCoordinates::from_degrees(
                point.lat as f32,
                point.lng as f32,
                layer.altitude,
            )
            .to_cartesian(1.0);
            draw_surface_circle(
                &mut gizmos,
                transform,
                dir,
                layer.radius * point.size * 0.5,
                POINT_SEGMENTS,
                point.color.color(0.0),
            );
        }
    }
}

pub fn draw_rings(
    time: Res<Time>,
    mut gizmos: Gizmos,
    query: Query<(&GlobePrimitive, &GlobalTransform)>,
) {
    let elapsed_ms = time.elapsed_seconds() * 1000.0;
    for (primitive, transform) in query.iter() {
        let layer = &primitive.rings;
        if layer.data.is_empty() {
            continue;
        }
        let radii = ring_radii(
            elapsed_ms,
            layer.propagation_speed,
            layer.max_radius,
            layer.repeat_period,
        );
        for point in &layer.data {
            let dir = surface_direction(point.lat, point.lng);
            for &radius in &radii {
                let color = point.color.color(radius / layer.max_radius);
                draw_surface_circle(&mut gizmos, transform, dir, radius, RING_SEGMENTS, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dash_runs_without_offset() {
        let runs = dash_runs(0.9, 15.0, 0.0);
        assert_eq!(runs.len(), 1);
        assert_relative_eq!(runs[0].0, 0.0);
        assert_relative_eq!(runs[0].1, 0.9, epsilon = 1e-6);
    }

    #[test]
    fn test_dash_runs_clipped_at_end() {
        let runs = dash_runs(0.9, 15.0, 0.5);
        assert_eq!(runs.len(), 1);
        assert_relative_eq!(runs[0].0, 0.5, epsilon = 1e-6);
        assert_relative_eq!(runs[0].1, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_dash_runs_wrap_around_period() {
        // Periode 15.9: bei Versatz 15.5 ragt der vorige Dash noch ins Bild
        let runs = dash_runs(0.9, 15.0, 15.5);
        assert_eq!(runs.len(), 1);
        assert_relative_eq!(runs[0].0, 0.0, epsilon = 1e-6);
        assert_relative_eq!(runs[0].1, 0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_dash_runs_degenerate() {
        assert!(dash_runs(0.0, 15.0, 0.0).is_empty());
        assert_eq!(dash_runs(0.5, 0.0, 3.0), vec![(0.0, 1.0)]);
    }

    #[test]
    fn test_dash_offset() {
        assert_relative_eq!(dash_offset(1000.0, 2000.0), 0.5);
        assert_eq!(dash_offset(1000.0, 0.0), 0.0);
    }

    #[test]
    fn test_ring_radii() {
        // 3°/s bis 3°: Lebensdauer 1000 ms, alle 1800 ms ein neuer Ring
        let radii = ring_radii(500.0, 3.0, 3.0, 1800.0);
        assert_eq!(radii.len(), 1);
        assert_relative_eq!(radii[0], 1.5, epsilon = 1e-5);

        // zwischen Ende eines Rings und dem nächsten
        assert!(ring_radii(1500.0, 3.0, 3.0, 1800.0).is_empty());

        // kurze Periode: mehrere gleichzeitig
        let radii = ring_radii(100.0, 3.0, 3.0, 250.0);
        assert_eq!(radii.len(), 4);
    }

    #[test]
    fn test_ring_radii_tiny_period_is_capped() {
        use crate::globe::rings::ring_repeat_period;

        let period = ring_repeat_period(2000.0, 0.9, 100_000_000);
        assert!(period > 0.0 && period < 1e-3);
        let radii = ring_radii(1500.0, 3.0, 3.0, period);
        assert_eq!(radii.len(), MAX_CONCURRENT_RINGS);
        assert!(radii.iter().all(|&r| (0.0..3.0).contains(&r)));
    }

    #[test]
    fn test_ring_radii_without_repeat() {
        assert!(ring_radii(100.0, 3.0, 3.0, f32::INFINITY).is_empty());
        assert!(ring_radii(100.0, 0.0, 3.0, 1800.0).is_empty());
    }
}
