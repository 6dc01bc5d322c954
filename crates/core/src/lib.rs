//! Core units, constants, and shared primitives for the small-body orbit kernel.

/// Physical constants. The kernel works in AU, days, and solar masses.
pub mod constants {
    /// Gaussian gravitational constant (AU^1.5 / day).
    ///
    /// Fixes the implicit unit system of the whole kernel; rescale this value
    /// before feeding elements in any other units.
    pub const GAUSSIAN_K: f64 = 0.017_202_098_95;
    /// Kilometres per astronomical unit.
    pub const AU_KM: f64 = 149_597_870.7;
    /// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
    pub const J2000_JD: f64 = 2_451_545.0;
    /// Offset between Julian Date and Modified Julian Date.
    pub const MJD_OFFSET: f64 = 2_400_000.5;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::AU_KM;

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }

    /// Convert astronomical units to kilometres.
    #[inline]
    pub fn au_to_km(v: f64) -> f64 {
        v * AU_KM
    }
}

/// Angle reduction helpers.
pub mod angle {
    use std::f64::consts::TAU;

    /// Reduce an angle in radians into `[0, 2π)`.
    ///
    /// Uses `((x mod 2π) + 2π) mod 2π` rather than `rem_euclid`, which may
    /// round tiny negative inputs up to exactly `2π`.
    #[inline]
    pub fn reduce_radians(x: f64) -> f64 {
        ((x % TAU) + TAU) % TAU
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in AU unless stated otherwise.
    pub type Vector3 = [f64; 3];

    /// Alias for a row-major 3x3 matrix.
    pub type Matrix3 = [[f64; 3]; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Cross product of two vectors.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Multiply a matrix by a column vector.
    #[inline]
    pub fn mat_vec(m: &Matrix3, v: &Vector3) -> Vector3 {
        [dot(&m[0], v), dot(&m[1], v), dot(&m[2], v)]
    }

    /// Extract column `j` of a matrix.
    #[inline]
    pub fn column(m: &Matrix3, j: usize) -> Vector3 {
        [m[0][j], m[1][j], m[2][j]]
    }
}
