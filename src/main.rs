// ./src/main.rs
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_panorbit_camera::PanOrbitCameraPlugin;

// Eigene Module deklarieren
pub mod debug;
pub mod globe;
pub mod math;
pub mod render;
pub mod setup; // Kamera-Rig und Globus-Entität
pub mod world;

use debug::ui::globe_control_ui_system;
use globe::{GlobePlugin, GlobeSet};
use render::GlobeRenderPlugin;
use setup::setup_scene;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins)
        .add_plugins(EguiPlugin)
        .add_plugins(PanOrbitCameraPlugin)
        // Transparenter Hintergrund hinter dem Globus
        .insert_resource(ClearColor(Color::NONE))
        .add_plugins((GlobePlugin, GlobeRenderPlugin))
        .add_systems(Startup, setup_scene)
        // UI vor dem Teardown, damit ein Unmount-Klick im selben Frame greift
        .add_systems(Update, globe_control_ui_system.before(GlobeSet::Teardown));

    #[cfg(debug_assertions)]
    app.add_plugins(bevy_inspector_egui::quick::WorldInspectorPlugin::new());

    app.run();
}
