// src/globe/lifecycle.rs
//! Systeme für den Lebenszyklus eines Globus-Exemplars:
//! `Unmounted → AwaitingData → Running → Unmounted`.

use super::apply::apply_rendering_config;
use super::config::GlobeConfig;
use super::data::GlobeArcs;
use super::points::{DerivedPoints, derive_points};
use super::primitive::GlobePrimitive;
use super::rings::{RingPulseAnimator, select_ring_points};
use crate::world::WorldDataset;
use bevy::prelude::*;

/// Markiert eine Entität als Globus-Visualisierung.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct GlobeVisualization;

/// Alles, was der Host für einen Globus spawnen muss.
#[derive(Bundle, Default)]
pub struct GlobeBundle {
    pub marker: GlobeVisualization,
    pub config: GlobeConfig,
    pub arcs: GlobeArcs,
    pub points: DerivedPoints,
    pub animator: RingPulseAnimator,
}

impl GlobeBundle {
    pub fn new(config: GlobeConfig, arcs: GlobeArcs) -> Self {
        Self {
            config,
            arcs,
            ..default()
        }
    }
}

/// Fordert das Aushängen eines Globus an: Timer stoppen, Primitive und
/// Render-Kinder entfernen. Die Entität selbst bleibt für den Host bestehen.
#[derive(Event, Debug, Clone, Copy)]
pub struct UnmountGlobe(pub Entity);

/// Hängt das Render-Primitive ein. Läuft nur, wenn eine Render-Oberfläche
/// (primäres Fenster) existiert.
pub fn mount_globe_primitives(
    mut commands: Commands,
    mut query: Query<
        (Entity, &mut RingPulseAnimator),
        (With<GlobeVisualization>, Without<GlobePrimitive>),
    >,
) {
    for (entity, mut animator) in query.iter_mut() {
        commands.entity(entity).insert(GlobePrimitive::default());
        animator.mark_mounted();
        info!("Globe {:?} mounted, waiting for point data", entity);
    }
}

/// Berechnet den Punkt-Pool neu, sobald sich Arcs oder Konfiguration ändern.
/// Geschrieben wird nur, wenn sich der Pool tatsächlich unterscheidet.
pub fn derive_globe_points(
    mut query: Query<
        (Entity, &GlobeConfig, &GlobeArcs, &mut DerivedPoints),
        (
            With<GlobeVisualization>,
            Or<(Changed<GlobeArcs>, Changed<GlobeConfig>)>,
        ),
    >,
) {
    for (entity, config, arcs, mut points) in query.iter_mut() {
        let derived = derive_points(&arcs.0, config.resolve().point_size);
        if points.0 == derived {
            continue;
        }
        points.0 = derived;
        debug!(
            "Globe {:?}: derived {} points from {} arcs",
            entity,
            points.len(),
            arcs.len()
        );
    }
}

/// Überträgt die Konfiguration auf das Primitive. Der Ring-Timer wird nur für
/// einen neuen Pool (oder ein frisch eingehängtes Primitive) scharf geschaltet;
/// reine Konfigurations- oder Arc-Änderungen behalten Timer und Ringe.
/// Ohne Primitive wird der Durchlauf übersprungen, das spätere Einhängen löst
/// ihn erneut aus.
pub fn apply_globe_config(
    dataset: Res<WorldDataset>,
    mut query: Query<
        (
            Entity,
            &GlobeConfig,
            &GlobeArcs,
            Ref<DerivedPoints>,
            Option<&mut GlobePrimitive>,
            &mut RingPulseAnimator,
        ),
        (
            With<GlobeVisualization>,
            Or<(
                Changed<DerivedPoints>,
                Changed<GlobeConfig>,
                Changed<GlobeArcs>,
                Added<GlobePrimitive>,
            )>,
        ),
    >,
) {
    for (entity, config, arcs, points, mut primitive, mut animator) in query.iter_mut() {
        let rearm = points.is_changed() || primitive.as_ref().is_some_and(|p| p.is_added());
        let kept_rings = primitive
            .as_ref()
            .filter(|_| !rearm)
            .map(|p| p.rings.data.clone());

        let resolved = config.resolve();
        let applied = apply_rendering_config(
            primitive.as_deref_mut(),
            &resolved,
            &arcs.0,
            &points.0,
            &dataset.0,
        );
        if !applied {
            debug!("Globe {:?}: primitive not mounted yet, skipping config", entity);
            continue;
        }

        if let (Some(rings), Some(primitive)) = (kept_rings, primitive.as_deref_mut()) {
            primitive.rings_data(rings);
            debug!("Globe {:?}: config re-applied, ring timer kept", entity);
            continue;
        }

        animator.arm();
        info!(
            "Globe {:?}: config applied, ring timer armed for {} points",
            entity,
            points.len()
        );
    }
}

/// Tickt die Ring-Timer und setzt bei Ablauf die neue Ring-Auswahl.
pub fn tick_ring_pulses(
    time: Res<Time>,
    mut query: Query<
        (&DerivedPoints, &mut RingPulseAnimator, &mut GlobePrimitive),
        With<GlobeVisualization>,
    >,
) {
    for (points, mut animator, mut primitive) in query.iter_mut() {
        if let Some(selection) = animator.tick(time.delta(), points.len()) {
            let rings = select_ring_points(&points.0, selection);
            primitive.rings_data(rings);
        }
    }
}

pub fn unmount_globes(
    mut commands: Commands,
    mut events: EventReader<UnmountGlobe>,
    mut query: Query<&mut RingPulseAnimator>,
) {
    for UnmountGlobe(entity) in events.read() {
        let Ok(mut animator) = query.get_mut(*entity) else {
            warn!("UnmountGlobe for {:?} ignored: not a globe", entity);
            continue;
        };
        let had_timer = animator.cancel();
        commands
            .entity(*entity)
            .despawn_descendants()
            .remove::<(GlobePrimitive, GlobeVisualization)>();
        info!(
            "Globe {:?} unmounted (ring timer {})",
            entity,
            if had_timer { "cancelled" } else { "was not running" }
        );
    }
}
