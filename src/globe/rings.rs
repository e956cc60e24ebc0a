// src/globe/rings.rs
//! Ring-Puls-Animation: alle zwei Sekunden wird eine zufällige Teilmenge des
//! Punkt-Pools als Ring-Layer gesetzt.

use super::points::DerivedPoint;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::time::Duration;

pub const RING_PULSE_INTERVAL: Duration = Duration::from_millis(2000);
/// Anteil des Punkt-Pools, der pro Tick einen Ring bekommt
pub const RING_SELECTION_RATIO: f64 = 0.8;
/// Ausbreitung der Ringe in Grad pro Sekunde
pub const RING_PROPAGATION_SPEED: f32 = 3.0;

/// Anzahl der Ringe pro Tick: `floor(0.8 * pool)`.
pub fn ring_selection_size(pool_len: usize) -> usize {
    (pool_len as f64 * RING_SELECTION_RATIO).floor() as usize
}

/// `(arc_time * arc_length) / rings` in Millisekunden. Ohne Ringe gibt es
/// keine Wiederholung (unendliche Periode).
pub fn ring_repeat_period(arc_time: f32, arc_length: f32, rings: u32) -> f32 {
    if rings == 0 {
        return f32::INFINITY;
    }
    (arc_time * arc_length) / rings as f32
}

/// Zieht `count` verschiedene Indizes aus `[min, max)` per Rejection Sampling.
///
/// Die Anzahl der Züge ist begrenzt; wird die Grenze erreicht, werden die
/// restlichen Plätze mit den kleinsten noch freien Indizes aufgefüllt. Die
/// Reihenfolge der Ausgabe ist die Reihenfolge der Ziehung.
pub fn sample_distinct_indices<R: Rng + ?Sized>(
    rng: &mut R,
    min: usize,
    max: usize,
    count: usize,
) -> Vec<usize> {
    let range = max.saturating_sub(min);
    let count = count.min(range);
    if count == 0 {
        return Vec::new();
    }

    let max_draws = count * 32 + 64;
    let mut seen = HashSet::with_capacity(count);
    let mut result = Vec::with_capacity(count);

    for _ in 0..max_draws {
        if result.len() == count {
            break;
        }
        let candidate = rng.random_range(min..max);
        if seen.insert(candidate) {
            result.push(candidate);
        }
    }

    if result.len() < count {
        debug!(
            "Ring sampling hit its draw cap ({} draws), filling {} remaining slots",
            max_draws,
            count - result.len()
        );
        for candidate in min..max {
            if result.len() == count {
                break;
            }
            if seen.insert(candidate) {
                result.push(candidate);
            }
        }
    }

    result
}

/// Filtert den Pool auf die gewählten Indizes, in Pool-Reihenfolge.
pub fn select_ring_points(pool: &[DerivedPoint], indices: &[usize]) -> Vec<DerivedPoint> {
    let chosen: HashSet<usize> = indices.iter().copied().collect();
    pool.iter()
        .enumerate()
        .filter(|(i, _)| chosen.contains(i))
        .map(|(_, p)| p.clone())
        .collect()
}

/// Lebenszyklus eines Globus-Exemplars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GlobePhase {
    #[default]
    Unmounted,
    /// Primitive ist gemountet, Punkt-Pool noch nicht angewendet
    AwaitingData,
    /// Ring-Timer läuft
    Running,
}

/// Exemplar-lokaler Ring-Puls-Zustand: genau ein Timer pro Globus.
#[derive(Component, Debug)]
pub struct RingPulseAnimator {
    timer: Option<Timer>,
    rng: StdRng,
    selection: Vec<usize>,
    phase: GlobePhase,
    /// Anzahl der Neuauswahlen seit dem letzten Scharfschalten
    pub ticks: u64,
}

impl Default for RingPulseAnimator {
    fn default() -> Self {
        Self::with_seed(rand::random::<u64>())
    }
}

impl RingPulseAnimator {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            timer: None,
            rng: StdRng::seed_from_u64(seed),
            selection: Vec::new(),
            phase: GlobePhase::Unmounted,
            ticks: 0,
        }
    }

    pub fn phase(&self) -> GlobePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Primitive ist verfügbar, aber noch kein Pool angewendet.
    pub fn mark_mounted(&mut self) {
        if self.phase == GlobePhase::Unmounted {
            self.phase = GlobePhase::AwaitingData;
        }
    }

    /// Ersetzt einen laufenden Timer durch einen frischen für den neuen Pool.
    pub fn arm(&mut self) {
        self.timer = Some(Timer::new(RING_PULSE_INTERVAL, TimerMode::Repeating));
        self.selection.clear();
        self.ticks = 0;
        self.phase = GlobePhase::Running;
    }

    /// Stoppt den Timer. Liefert `true`, wenn tatsächlich einer lief.
    pub fn cancel(&mut self) -> bool {
        self.phase = GlobePhase::Unmounted;
        self.selection.clear();
        self.timer.take().is_some()
    }

    /// Tickt den Timer. Ist ein Intervall abgelaufen, wird eine neue Auswahl
    /// gezogen und zurückgegeben; mehrere verpasste Intervalle ergeben eine
    /// einzige Neuauswahl.
    pub fn tick(&mut self, delta: Duration, pool_len: usize) -> Option<&[usize]> {
        let timer = self.timer.as_mut()?;
        timer.tick(delta);
        if timer.times_finished_this_tick() == 0 {
            return None;
        }

        self.selection = sample_distinct_indices(
            &mut self.rng,
            0,
            pool_len,
            ring_selection_size(pool_len),
        );
        self.ticks += 1;
        Some(&self.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::globe::points::PointColor;
    use approx::assert_relative_eq;

    fn pool(n: usize) -> Vec<DerivedPoint> {
        (0..n)
            .map(|i| DerivedPoint {
                size: 1.0,
                order: i as i32,
                color: PointColor(None),
                lat: i as f64,
                lng: -(i as f64),
            })
            .collect()
    }

    #[test]
    fn test_selection_size() {
        assert_eq!(ring_selection_size(0), 0);
        assert_eq!(ring_selection_size(1), 0);
        assert_eq!(ring_selection_size(5), 4);
        assert_eq!(ring_selection_size(100), 80);
    }

    #[test]
    fn test_repeat_period() {
        assert_relative_eq!(ring_repeat_period(2000.0, 0.9, 1), 1800.0, epsilon = 1e-3);
        assert_relative_eq!(ring_repeat_period(1000.0, 0.5, 4), 125.0, epsilon = 1e-3);
        assert!(ring_repeat_period(2000.0, 0.9, 0).is_infinite());
    }

    #[test]
    fn test_sampling_is_distinct_and_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for &n in &[0usize, 1, 5, 100] {
            let count = ring_selection_size(n);
            let picked = sample_distinct_indices(&mut rng, 0, n, count);
            assert_eq!(picked.len(), count);
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), count);
            assert!(picked.iter().all(|&i| i < n));
        }
    }

    #[test]
    fn test_sampling_full_range_terminates() {
        let mut rng = StdRng::seed_from_u64(1);
        let picked = sample_distinct_indices(&mut rng, 10, 20, 10);
        let mut sorted = picked.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (10..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_sampling_count_clamped_to_range() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(sample_distinct_indices(&mut rng, 0, 3, 10).len(), 3);
        assert!(sample_distinct_indices(&mut rng, 5, 5, 2).is_empty());
    }

    #[test]
    fn test_select_keeps_pool_order() {
        let points = pool(6);
        let selected = select_ring_points(&points, &[4, 1, 3]);
        let orders: Vec<i32> = selected.iter().map(|p| p.order).collect();
        assert_eq!(orders, vec![1, 3, 4]);
    }

    #[test]
    fn test_animator_ticks_every_interval() {
        let mut animator = RingPulseAnimator::with_seed(42);
        assert!(animator.tick(Duration::from_secs(5), 10).is_none());

        animator.arm();
        assert_eq!(animator.phase(), GlobePhase::Running);
        assert!(animator.tick(Duration::from_millis(1999), 10).is_none());
        let selection = animator.tick(Duration::from_millis(1), 10).map(<[usize]>::len);
        assert_eq!(selection, Some(8));
        assert_eq!(animator.ticks, 1);

        // drei verpasste Intervalle ergeben eine Neuauswahl
        assert!(animator.tick(Duration::from_millis(6000), 10).is_some());
        assert_eq!(animator.ticks, 2);
    }

    #[test]
    fn test_animator_empty_pool_ticks_without_rings() {
        let mut animator = RingPulseAnimator::with_seed(42);
        animator.arm();
        let selection = animator.tick(RING_PULSE_INTERVAL, 0).map(<[usize]>::len);
        assert_eq!(selection, Some(0));
    }

    #[test]
    fn test_rearm_replaces_timer() {
        let mut animator = RingPulseAnimator::with_seed(9);
        animator.arm();
        animator.tick(Duration::from_millis(1500), 4);
        animator.arm();
        // frischer Timer: 1500 ms reichen nicht mehr
        assert!(animator.tick(Duration::from_millis(1500), 4).is_none());
        assert!(animator.tick(Duration::from_millis(500), 4).is_some());
    }

    #[test]
    fn test_cancel_clears_timer_once() {
        let mut animator = RingPulseAnimator::with_seed(9);
        animator.mark_mounted();
        assert_eq!(animator.phase(), GlobePhase::AwaitingData);
        animator.arm();

        assert!(animator.cancel());
        assert!(!animator.cancel());
        assert!(!animator.is_running());
        assert_eq!(animator.phase(), GlobePhase::Unmounted);
        assert!(animator.tick(Duration::from_secs(10), 4).is_none());
    }
}
