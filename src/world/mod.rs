pub mod countries;
pub mod hex_overlay;

pub use countries::{CountryFeature, CountryPolygons, WorldDataset};
pub use hex_overlay::{HexOverlay, tessellate};
