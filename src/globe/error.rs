// src/globe/error.rs
use thiserror::Error;

/// Fehler beim Laden von Konfiguration, Arc-Liste und Weltdatensatz.
#[derive(Error, Debug)]
pub enum GlobeError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset is not a GeoJSON FeatureCollection")]
    NotAFeatureCollection,

    #[error("Invalid feature at index {index}: {reason}")]
    InvalidFeature { index: usize, reason: String },

    #[error("Invalid geometry at feature {index}: {reason}")]
    InvalidGeometry { index: usize, reason: String },
}

pub type GlobeResult<T> = Result<T, GlobeError>;
