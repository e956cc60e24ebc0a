// src/globe/apply.rs
use super::color::css_color_or;
use super::config::ResolvedGlobeConfig;
use super::data::ArcDescriptor;
use super::points::DerivedPoint;
use super::primitive::GlobePrimitive;
use super::rings::RING_PROPAGATION_SPEED;
use crate::world::CountryPolygons;
use bevy::prelude::*;
use std::sync::Arc;

pub const HEX_POLYGON_RESOLUTION: u32 = 3;
pub const HEX_POLYGON_MARGIN: f32 = 0.7;
pub const ARC_DASH_GAP: f32 = 15.0;
/// Punktradius in Grad
pub const POINT_RADIUS: f32 = 2.0;

/// Überträgt die aufgelöste Konfiguration samt Arcs und Punkt-Pool auf das
/// Primitive. Ist noch kein Primitive gemountet, passiert nichts und es wird
/// `false` geliefert; der nächste Durchlauf versucht es erneut.
///
/// Der Ring-Layer wird dabei geleert, die erste Auswahl kommt vom Ring-Timer.
pub fn apply_rendering_config(
    primitive: Option<&mut GlobePrimitive>,
    config: &ResolvedGlobeConfig,
    arcs: &[ArcDescriptor],
    points: &[DerivedPoint],
    polygons: &Arc<CountryPolygons>,
) -> bool {
    let Some(globe) = primitive else {
        return false;
    };

    let material = globe.globe_material();
    material.color = css_color_or(&config.globe_color, Color::BLACK);
    material.emissive = css_color_or(&config.emissive, Color::BLACK);
    material.emissive_intensity = config.emissive_intensity;
    material.shininess = config.shininess;

    globe
        .hex_polygons_data(Arc::clone(polygons))
        .hex_polygon_resolution(HEX_POLYGON_RESOLUTION)
        .hex_polygon_margin(HEX_POLYGON_MARGIN)
        .show_atmosphere(config.show_atmosphere)
        .atmosphere_color(css_color_or(&config.atmosphere_color, Color::WHITE))
        .atmosphere_altitude(config.atmosphere_altitude)
        .hex_polygon_color(css_color_or(&config.polygon_color, Color::WHITE));
    globe.hex_polygons.refresh_overlay();

    globe
        .arcs_data(arcs.to_vec())
        .arc_dash_length(config.arc_length)
        .arc_dash_gap(ARC_DASH_GAP)
        .arc_dash_animate_time(config.arc_time);

    globe
        .points_data(points.to_vec())
        .points_merge(true)
        .point_altitude(0.0)
        .point_radius(POINT_RADIUS);

    globe
        .rings_data(Vec::new())
        .ring_max_radius(config.max_rings)
        .ring_propagation_speed(RING_PROPAGATION_SPEED)
        .ring_repeat_period(config.ring_repeat_period());

    true
}
