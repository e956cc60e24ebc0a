// ./src/debug/ui.rs
use crate::globe::rings::ring_selection_size;
use crate::globe::{
    DerivedPoints, GlobeConfig, GlobePhase, GlobePrimitive, RingPulseAnimator, UnmountGlobe,
};
use crate::render::camera::GlobeCamera;
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use egui::{Slider, Window};

fn phase_label(phase: GlobePhase) -> &'static str {
    match phase {
        GlobePhase::Unmounted => "ausgehängt",
        GlobePhase::AwaitingData => "wartet auf Daten",
        GlobePhase::Running => "läuft",
    }
}

pub fn globe_control_ui_system(
    mut contexts: EguiContexts,
    mut globes: Query<(
        Entity,
        &RingPulseAnimator,
        &DerivedPoints,
        Option<&GlobePrimitive>,
        &mut GlobeConfig,
    )>,
    mut cameras: Query<&mut GlobeCamera>,
    mut unmount: EventWriter<UnmountGlobe>,
) {
    Window::new("Globus-Steuerung")
        .default_width(300.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.collapsing("Kamera", |ui| {
                for mut camera in cameras.iter_mut() {
                    ui.checkbox(&mut camera.auto_rotate, "Auto-Rotation");
                    ui.add(
                        Slider::new(&mut camera.auto_rotate_speed, 0.0..=5.0)
                            .text("Rotationsgeschwindigkeit"),
                    );
                }
                ui.separator();
                ui.label("Linke Maustaste + Ziehen: Orbit");
                ui.label("Zoom und Pan sind gesperrt.");
            });

            for (entity, animator, points, primitive, mut config) in globes.iter_mut() {
                ui.separator();
                ui.heading(format!("Globus {:?}", entity));
                ui.label(format!("Zustand: {}", phase_label(animator.phase())));
                ui.label(format!("Punkte im Pool: {}", points.len()));
                ui.label(format!(
                    "Ringe pro Tick: {} (aktuell {})",
                    ring_selection_size(points.len()),
                    animator.selection().len()
                ));

                let Some(primitive) = primitive else {
                    ui.label("Kein Primitive eingehängt.");
                    continue;
                };
                ui.label(format!(
                    "Ring-Periode: {:.0} ms, Hex-Zellen: {}",
                    primitive.rings.repeat_period,
                    primitive.hex_polygons.overlay().len()
                ));

                let mut show_atmosphere = primitive.atmosphere.visible;
                if ui.checkbox(&mut show_atmosphere, "Atmosphäre").changed() {
                    // Läuft über die Konfiguration, damit die Pipeline neu anwendet
                    config.show_atmosphere = Some(show_atmosphere);
                }

                if ui.button("Aushängen").clicked() {
                    unmount.send(UnmountGlobe(entity));
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_labels_are_distinct() {
        let labels = [
            phase_label(GlobePhase::Unmounted),
            phase_label(GlobePhase::AwaitingData),
            phase_label(GlobePhase::Running),
        ];
        assert_ne!(labels[0], labels[1]);
        assert_ne!(labels[1], labels[2]);
    }
}
