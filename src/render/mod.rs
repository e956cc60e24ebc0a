pub mod camera;
pub mod globe_mesh;
pub mod layers;

use crate::globe::GlobeSet;
use bevy::prelude::*;

/// Zeichnet den Zustand aller Globus-Primitives.
pub struct GlobeRenderPlugin;

impl Plugin for GlobeRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (globe_mesh::spawn_globe_meshes, globe_mesh::sync_globe_meshes)
                .chain()
                .after(GlobeSet::Animate),
        )
        .add_systems(
            Update,
            (
                layers::draw_hex_overlay,
                layers::draw_arcs,
                layers::draw_points,
                layers::draw_rings,
                camera::auto_rotate_camera,
            ),
        );
    }
}
