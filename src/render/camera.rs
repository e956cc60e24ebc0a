// src/render/camera.rs
use crate::globe::ResolvedGlobeConfig;
use crate::globe::color::css_color_or;
use crate::math::utils::angles;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;
use std::f32::consts::{PI, TAU};

pub const CAMERA_FOV_DEG: f32 = 50.0;
pub const CAMERA_ASPECT: f32 = 1.2;
pub const CAMERA_NEAR: f32 = 180.0;
pub const CAMERA_FAR: f32 = 1800.0;
/// Fester Orbit-Abstand
pub const CAMERA_DISTANCE: f32 = 300.0;
/// Polarwinkel-Grenzen (von +Y gemessen)
pub const MIN_POLAR_ANGLE: f32 = PI / 3.5;
pub const MAX_POLAR_ANGLE: f32 = PI - PI / 3.0;
/// Sekunden pro Umdrehung bei Geschwindigkeit 1
const AUTO_ROTATE_PERIOD_SECS: f32 = 30.0;

const AMBIENT_INTENSITY: f32 = 0.6;
const POINT_LIGHT_INTENSITY: f32 = 0.8;

/// Auto-Rotation der Globus-Kamera
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GlobeCamera {
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
}

impl GlobeCamera {
    /// Winkelgeschwindigkeit in Radiant pro Sekunde
    pub fn angular_speed(&self) -> f32 {
        if self.auto_rotate {
            TAU / AUTO_ROTATE_PERIOD_SECS * self.auto_rotate_speed
        } else {
            0.0
        }
    }
}

/// Pan-Orbit-Pitch (0 = Horizont) aus einem Polarwinkel
fn pitch_from_polar(polar: f32) -> f32 {
    PI * 0.5 - polar
}

/// Spawnt Kamera und Lichter passend zur Konfiguration.
pub fn spawn_camera_rig(commands: &mut Commands, config: &ResolvedGlobeConfig) {
    let position = config.initial_position;

    commands.spawn((
        Camera3dBundle {
            projection: PerspectiveProjection {
                fov: angles::deg_to_rad(CAMERA_FOV_DEG),
                aspect_ratio: CAMERA_ASPECT,
                near: CAMERA_NEAR,
                far: CAMERA_FAR,
            }
            .into(),
            transform: Transform::from_xyz(0.0, 0.0, CAMERA_DISTANCE)
                .looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        FogSettings {
            color: Color::WHITE,
            falloff: FogFalloff::Linear {
                start: 400.0,
                end: 2000.0,
            },
            ..default()
        },
        PanOrbitCamera {
            yaw: Some(angles::deg_to_rad(position.lng)),
            pitch: Some(angles::deg_to_rad(position.lat)),
            radius: Some(CAMERA_DISTANCE),
            pitch_upper_limit: Some(pitch_from_polar(MIN_POLAR_ANGLE)),
            pitch_lower_limit: Some(pitch_from_polar(MAX_POLAR_ANGLE)),
            // Kein Zoom, kein Pan
            zoom_sensitivity: 0.0,
            pan_sensitivity: 0.0,
            ..default()
        },
        GlobeCamera {
            auto_rotate: config.auto_rotate,
            auto_rotate_speed: config.auto_rotate_speed,
        },
        Name::new("GlobeCamera"),
    ));

    // Licht
    commands.insert_resource(AmbientLight {
        color: css_color_or(&config.ambient_light, Color::WHITE),
        brightness: AMBIENT_INTENSITY * 1000.0,
    });
    commands.spawn((
        DirectionalLightBundle {
            directional_light: DirectionalLight {
                color: css_color_or(&config.directional_left_light, Color::WHITE),
                illuminance: 10_000.0,
                ..default()
            },
            transform: Transform::from_xyz(-400.0, 100.0, 400.0).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        Name::new("DirectionalLeftLight"),
    ));
    commands.spawn((
        DirectionalLightBundle {
            directional_light: DirectionalLight {
                color: css_color_or(&config.directional_top_light, Color::WHITE),
                illuminance: 10_000.0,
                ..default()
            },
            transform: Transform::from_xyz(-200.0, 500.0, 200.0).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        Name::new("DirectionalTopLight"),
    ));
    commands.spawn((
        PointLightBundle {
            point_light: PointLight {
                color: css_color_or(&config.point_light, Color::WHITE),
                intensity: POINT_LIGHT_INTENSITY * 10_000_000.0,
                range: 2000.0,
                ..default()
            },
            transform: Transform::from_xyz(-200.0, 500.0, 200.0),
            ..default()
        },
        Name::new("PointLight"),
    ));
}

pub fn auto_rotate_camera(time: Res<Time>, mut query: Query<(&mut PanOrbitCamera, &GlobeCamera)>) {
    for (mut orbit, camera) in query.iter_mut() {
        let speed = camera.angular_speed();
        if speed == 0.0 {
            continue;
        }
        orbit.target_yaw += speed * time.delta_seconds();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angular_speed() {
        let camera = GlobeCamera {
            auto_rotate: true,
            auto_rotate_speed: 1.0,
        };
        assert_relative_eq!(camera.angular_speed() * 30.0, TAU, epsilon = 1e-5);

        let stopped = GlobeCamera {
            auto_rotate: false,
            ..camera
        };
        assert_eq!(stopped.angular_speed(), 0.0);
    }

    #[test]
    fn test_pitch_limits() {
        assert!(pitch_from_polar(MIN_POLAR_ANGLE) > 0.0);
        assert_relative_eq!(pitch_from_polar(MAX_POLAR_ANGLE), -PI / 6.0, epsilon = 1e-6);
    }
}
