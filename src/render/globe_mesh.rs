// src/render/globe_mesh.rs
use crate::globe::primitive::{AtmosphereLayer, GlobeMaterial};
use crate::globe::{GLOBE_RADIUS, GlobePrimitive};
use bevy::prelude::*;
use bevy_render::render_resource::Face;

/// Kugeloberfläche eines Globus
#[derive(Component, Debug)]
pub struct GlobeSurface;

/// Halbtransparente Atmosphären-Hülle
#[derive(Component, Debug)]
pub struct AtmosphereShell;

const SPHERE_SECTORS: usize = 96;
const SPHERE_STACKS: usize = 48;
const ATMOSPHERE_OPACITY: f32 = 0.2;

/// Näherung Phong-Glanz → PBR-Rauheit (Blinn-Phong-Exponent nach GGX-Alpha).
pub fn shininess_to_roughness(shininess: f32) -> f32 {
    let alpha = (2.0 / (shininess.max(0.0) + 2.0)).sqrt();
    alpha.sqrt().clamp(0.089, 1.0)
}

fn scaled(color: Color, factor: f32) -> Color {
    Color::rgba(
        color.r() * factor,
        color.g() * factor,
        color.b() * factor,
        color.a(),
    )
}

pub fn surface_material(material: &GlobeMaterial) -> StandardMaterial {
    StandardMaterial {
        base_color: material.color,
        emissive: scaled(material.emissive, material.emissive_intensity),
        perceptual_roughness: shininess_to_roughness(material.shininess),
        metallic: 0.0,
        ..default()
    }
}

pub fn atmosphere_material(atmosphere: &AtmosphereLayer) -> StandardMaterial {
    StandardMaterial {
        base_color: atmosphere.color.with_a(ATMOSPHERE_OPACITY),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        // Nur die Rückseite zeichnen: Halo um den Globus
        cull_mode: Some(Face::Front),
        ..default()
    }
}

fn atmosphere_transform(atmosphere: &AtmosphereLayer) -> Transform {
    Transform::from_scale(Vec3::splat(1.0 + atmosphere.altitude.max(0.0)))
}

fn atmosphere_visibility(atmosphere: &AtmosphereLayer) -> Visibility {
    if atmosphere.visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

/// Erzeugt Oberfläche und Atmosphäre für frisch eingehängte Primitives.
pub fn spawn_globe_meshes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    query: Query<(Entity, &GlobePrimitive), Added<GlobePrimitive>>,
) {
    for (entity, primitive) in query.iter() {
        let sphere = meshes.add(
            Sphere::new(GLOBE_RADIUS)
                .mesh()
                .uv(SPHERE_SECTORS, SPHERE_STACKS),
        );
        let surface = materials.add(surface_material(&primitive.material));
        let shell = materials.add(atmosphere_material(&primitive.atmosphere));

        commands
            .entity(entity)
            .insert(SpatialBundle::default())
            .with_children(|parent| {
                parent.spawn((
                    PbrBundle {
                        mesh: sphere.clone(),
                        material: surface,
                        ..default()
                    },
                    GlobeSurface,
                    Name::new("GlobeSurface"),
                ));
                parent.spawn((
                    PbrBundle {
                        mesh: sphere,
                        material: shell,
                        transform: atmosphere_transform(&primitive.atmosphere),
                        visibility: atmosphere_visibility(&primitive.atmosphere),
                        ..default()
                    },
                    AtmosphereShell,
                    Name::new("Atmosphere"),
                ));
            });
        debug!("Spawned globe meshes for {:?}", entity);
    }
}

/// Überträgt Material- und Atmosphärenwerte des Primitives auf die Meshes.
pub fn sync_globe_meshes(
    primitives: Query<(&GlobePrimitive, &Children), Changed<GlobePrimitive>>,
    surfaces: Query<&Handle<StandardMaterial>, With<GlobeSurface>>,
    mut shells: Query<
        (&Handle<StandardMaterial>, &mut Transform, &mut Visibility),
        With<AtmosphereShell>,
    >,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (primitive, children) in primitives.iter() {
        for &child in children.iter() {
            if let Ok(handle) = surfaces.get(child) {
                if let Some(material) = materials.get_mut(handle) {
                    let target = surface_material(&primitive.material);
                    material.base_color = target.base_color;
                    material.emissive = target.emissive;
                    material.perceptual_roughness = target.perceptual_roughness;
                }
            }
            if let Ok((handle, mut transform, mut visibility)) = shells.get_mut(child) {
                if let Some(material) = materials.get_mut(handle) {
                    material.base_color = atmosphere_material(&primitive.atmosphere).base_color;
                }
                *transform = atmosphere_transform(&primitive.atmosphere);
                *visibility = atmosphere_visibility(&primitive.atmosphere);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_roughness_from_shininess() {
        let rough = shininess_to_roughness(0.9);
        let glossy = shininess_to_roughness(100.0);
        assert!(rough > glossy);
        assert!(rough <= 1.0);
        assert!(glossy >= 0.089);
    }

    #[test]
    fn test_surface_material_scales_emissive() {
        let material = GlobeMaterial {
            color: Color::rgb(0.1, 0.2, 0.3),
            emissive: Color::rgb(1.0, 1.0, 1.0),
            emissive_intensity: 0.1,
            shininess: 0.9,
        };
        let standard = surface_material(&material);
        assert_eq!(standard.base_color, material.color);
        assert_relative_eq!(standard.emissive.r(), 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_hidden_atmosphere() {
        let atmosphere = AtmosphereLayer {
            visible: false,
            color: Color::WHITE,
            altitude: 0.1,
        };
        assert_eq!(atmosphere_visibility(&atmosphere), Visibility::Hidden);
        assert_relative_eq!(atmosphere_transform(&atmosphere).scale.x, 1.1, epsilon = 1e-6);
        assert_relative_eq!(atmosphere_material(&atmosphere).base_color.a(), 0.2);
    }
}
