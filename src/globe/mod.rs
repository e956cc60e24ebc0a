pub mod apply;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod lifecycle;
pub mod plugin;
pub mod points;
pub mod primitive;
pub mod rings;

pub use config::{GlobeConfig, InitialPosition, ResolvedGlobeConfig};
pub use data::{ArcDescriptor, GlobeArcs};
pub use error::{GlobeError, GlobeResult};
pub use lifecycle::{GlobeBundle, GlobeVisualization, UnmountGlobe};
pub use plugin::{GlobePlugin, GlobeSet};
pub use points::{DerivedPoint, DerivedPoints, PointColor};
pub use primitive::{GLOBE_RADIUS, GlobePrimitive};
pub use rings::{GlobePhase, RingPulseAnimator};
