//! Bevy-Plugin für die Globus-Visualisierungen.
//!
//! Das Plugin verwaltet die Datenseite jeder Globus-Entität: Punkt-Ableitung,
//! Anwenden der Konfiguration, den Ring-Timer und das Aushängen. Gezeichnet
//! wird in [`crate::render::GlobeRenderPlugin`]; das Plugin läuft daher auch
//! ohne Fenster.

use super::lifecycle::*;
use crate::world::WorldDataset;
use bevy::prelude::*;
use bevy_window::PrimaryWindow;

/// System-Sets der Globus-Pipeline, in Ausführungsreihenfolge.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GlobeSet {
    /// Einhängen, Ableiten und Konfigurieren
    Prepare,
    /// Ticks des Ring-Timers
    Animate,
    /// Aushänge-Anfragen
    Teardown,
}

pub struct GlobePlugin;

impl Plugin for GlobePlugin {
    /// Registriert Weltdatensatz, Unmount-Event und die Globus-Systeme.
    fn build(&self, app: &mut App) {
        // Tests und Hosts dürfen einen eigenen Datensatz mitbringen
        if !app.world.contains_resource::<WorldDataset>() {
            app.insert_resource(WorldDataset::load_embedded());
        }

        app.add_event::<UnmountGlobe>()
            .configure_sets(
                Update,
                (GlobeSet::Prepare, GlobeSet::Animate, GlobeSet::Teardown).chain(),
            )
            .add_systems(
                Update,
                (
                    // Rendern erst, wenn es eine Oberfläche gibt
                    mount_globe_primitives.run_if(any_with_component::<PrimaryWindow>),
                    derive_globe_points,
                    apply_globe_config,
                )
                    .chain()
                    .in_set(GlobeSet::Prepare),
            )
            .add_systems(Update, tick_ring_pulses.in_set(GlobeSet::Animate))
            .add_systems(Update, unmount_globes.in_set(GlobeSet::Teardown));
    }
}
