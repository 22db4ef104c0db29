/// Axis remapping from OBJ space into WebGL space
use nalgebra::Vector3;

use crate::format::round7;
use crate::geometry::{Normal, Position};

/// Unit divisor applied to positions by default (source units are 10x WebGL units)
pub const DEFAULT_POSITION_DIVISOR: f64 = 10.0;

/// Swaps the vertical and depth axes and divides by a unit divisor
///
/// `(x, y, z)` becomes `(x / d, z / d, -y / d)`, each component rounded to 7
/// decimal places. The permutation is applied component-wise rather than as a
/// matrix product so that the sign of zero survives (`-0.0` stays `-0.0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRemap {
    pub divisor: f64,
}

impl AxisRemap {
    pub fn new(divisor: f64) -> Self {
        Self { divisor }
    }

    /// Remap used for vertex positions
    pub fn positions() -> Self {
        Self::new(DEFAULT_POSITION_DIVISOR)
    }

    /// Remap used for normals; direction vectors are never rescaled
    pub fn normals() -> Self {
        Self::new(1.0)
    }

    pub fn apply(&self, v: &Vector3<f64>) -> Vector3<f64> {
        let swapped = Vector3::new(v.x, v.z, -v.y);
        (swapped / self.divisor).map(round7)
    }

    pub fn remap_position(&self, p: &Position) -> Vector3<f64> {
        self.apply(&p.coords)
    }

    pub fn remap_normal(&self, n: &Normal) -> Vector3<f64> {
        self.apply(n)
    }
}

impl Default for AxisRemap {
    fn default() -> Self {
        Self::positions()
    }
}
