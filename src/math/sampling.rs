// src/math/sampling.rs

use crate::math::utils::*;
use bevy::math::Vec3;

/// Fibonacci-Spirale auf der Einheitskugel.
///
/// Liefert `count` nahezu gleichverteilte Richtungen. Für `count < 2`
/// wird nur der Nordpol bzw. nichts geliefert.
pub fn fibonacci_lattice(count: usize) -> Vec<Vec3> {
    match count {
        0 => return Vec::new(),
        1 => return vec![Vec3::Y],
        _ => {}
    }

    let golden_ratio = constants::GOLDEN_RATIO;
    let mut points = Vec::with_capacity(count);

    for i in 0..count {
        let theta = constants::TAU * (i as f32 / golden_ratio);
        let phi_cos = 1.0 - 2.0 * (i as f32 / (count - 1) as f32);
        let phi_sin = (1.0 - phi_cos * phi_cos).max(0.0).sqrt();

        // Y ist Höhe, passend zu GeographicCoordinates
        points.push(Vec3::new(
            phi_sin * theta.sin(),
            phi_cos,
            phi_sin * theta.cos(),
        ));
    }

    points
}

/// Mittlerer Winkelabstand zwischen Nachbarn eines Gitters mit `count` Zellen.
pub fn lattice_spacing(count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    // Fläche pro Zelle auf der Einheitskugel, als Kreisscheibe genähert
    (4.0 * constants::PI / count as f32).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fibonacci_sampling() {
        let points = fibonacci_lattice(50);
        assert_eq!(points.len(), 50);
        for point in &points {
            assert_relative_eq!(point.length(), 1.0, epsilon = 1e-4);
        }
        assert_relative_eq!(points[0].y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(points[49].y, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_counts() {
        assert!(fibonacci_lattice(0).is_empty());
        assert_eq!(fibonacci_lattice(1), vec![Vec3::Y]);
        assert_eq!(lattice_spacing(0), 0.0);
    }

    #[test]
    fn test_spacing_shrinks_with_count() {
        assert!(lattice_spacing(1000) < lattice_spacing(100));
    }
}
