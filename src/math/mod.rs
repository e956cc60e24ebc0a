pub mod coordinates;
pub mod sampling;
pub mod utils;

pub use coordinates::{GeographicCoordinates, arc_point, slerp_direction, small_circle};
pub use sampling::{fibonacci_lattice, lattice_spacing};
