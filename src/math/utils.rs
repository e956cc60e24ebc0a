// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON: f32 = 1e-6;
    pub const GOLDEN_RATIO: f32 = 1.618033988749895;
    pub const TAU: f32 = std::f32::consts::TAU;
    pub const PI: f32 = std::f32::consts::PI;
}

/// Winkel-Hilfsfunktionen
pub mod angles {
    use super::constants::{PI, TAU};

    /// Konvertiert Grad zu Radiant
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * PI / 180.0
    }

    /// Konvertiert Radiant zu Grad
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * 180.0 / PI
    }

    /// Normalisiert einen Winkel auf [-π, π)
    pub fn normalize_angle_signed(angle: f32) -> f32 {
        let mut result = angle % TAU;
        if result > PI {
            result -= TAU;
        } else if result < -PI {
            result += TAU;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_conversion() {
        assert_relative_eq!(angles::deg_to_rad(180.0), constants::PI, epsilon = 1e-6);
        assert_relative_eq!(angles::rad_to_deg(constants::PI * 0.5), 90.0, epsilon = 1e-4);
    }

    #[test]
    fn test_normalize_signed() {
        let wrapped = angles::normalize_angle_signed(constants::PI * 1.5);
        assert_relative_eq!(wrapped, -constants::PI * 0.5, epsilon = 1e-5);
    }
}
