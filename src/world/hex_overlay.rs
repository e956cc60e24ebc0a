// src/world/hex_overlay.rs
use super::countries::CountryPolygons;
use crate::math::{fibonacci_lattice, lattice_spacing, utils::angles};
use bevy::math::Vec3;

/// Obergrenze für die Auflösung; darüber wird das Gitter unhandlich groß.
pub const MAX_HEX_RESOLUTION: u32 = 4;

/// Anzahl der Zellen eines globalen Hex-Gitters: `2 + 120 * 7^resolution`.
pub fn cell_count(resolution: u32) -> usize {
    2 + 120 * 7usize.pow(resolution.min(MAX_HEX_RESOLUTION))
}

/// Tesselierte Landflächen: Zellmittelpunkte als Einheitsvektoren.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HexOverlay {
    pub cells: Vec<Vec3>,
    /// Winkelradius eines Hexagons in Radiant, nach Abzug des Randes
    pub cell_radius: f32,
}

impl HexOverlay {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Legt ein Fibonacci-Gitter über die Kugel und behält die Zellen, deren
/// Mittelpunkt in einem Polygon liegt. `margin` ist der Anteil der Zelle,
/// der frei bleibt (0 = lückenlos, 1 = unsichtbar).
pub fn tessellate(polygons: &CountryPolygons, resolution: u32, margin: f32) -> HexOverlay {
    if polygons.is_empty() {
        return HexOverlay::default();
    }

    let count = cell_count(resolution);
    let spacing = lattice_spacing(count);
    let cells = fibonacci_lattice(count)
        .into_iter()
        .filter(|dir| {
            let lat = angles::rad_to_deg(dir.y.clamp(-1.0, 1.0).asin());
            let lng = angles::rad_to_deg(dir.x.atan2(dir.z));
            polygons.contains(lng as f64, lat as f64)
        })
        .collect();

    HexOverlay {
        cells,
        cell_radius: 0.5 * spacing * (1.0 - margin.clamp(0.0, 1.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn band() -> CountryPolygons {
        // Streifen um den Äquator zwischen 0° und 90° Ost
        CountryPolygons::from_geojson_str(
            r#"{ "type": "FeatureCollection", "features": [
                { "type": "Feature", "properties": {}, "geometry": { "type": "Polygon",
                  "coordinates": [[[0,-20],[90,-20],[90,20],[0,20],[0,-20]]] } }
            ] }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_cell_count_matches_hex_grid() {
        assert_eq!(cell_count(0), 122);
        assert_eq!(cell_count(1), 842);
        assert_eq!(cell_count(3), 41_162);
    }

    #[test]
    fn test_only_cells_inside_polygon_are_kept() {
        let overlay = tessellate(&band(), 1, 0.7);
        assert!(!overlay.is_empty());
        assert!(overlay.len() < cell_count(1));
        for cell in &overlay.cells {
            let lat = angles::rad_to_deg(cell.y.asin());
            let lng = angles::rad_to_deg(cell.x.atan2(cell.z));
            assert!((-20.0..=20.0).contains(&lat));
            assert!((0.0..=90.0).contains(&lng));
        }
    }

    #[test]
    fn test_margin_shrinks_cells() {
        let full = tessellate(&band(), 1, 0.0);
        let dotted = tessellate(&band(), 1, 0.7);
        assert_eq!(full.len(), dotted.len());
        assert_relative_eq!(dotted.cell_radius, full.cell_radius * 0.3, epsilon = 1e-6);
    }

    #[test]
    fn test_empty_dataset() {
        assert!(tessellate(&CountryPolygons::default(), 3, 0.7).is_empty());
    }
}
