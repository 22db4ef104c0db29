/// Geometry records read from an OBJ stream
use nalgebra::{Point3, Vector3};

/// A vertex position in source (OBJ) space
pub type Position = Point3<f64>;

/// A vertex normal in source (OBJ) space
pub type Normal = Vector3<f64>;

/// One face-vertex reference, kept as the 1-based OBJ index
///
/// Texture and normal sub-indices (`1/2/3`) are dropped at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRef(pub i64);

impl FaceRef {
    pub fn new(index: i64) -> Self {
        Self(index)
    }

    /// Zero-based index into the output vertex list
    pub fn zero_based(self) -> i64 {
        self.0 - 1
    }
}

/// A triangle of zero-based vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub indices: [i64; 3],
}

impl Triangle {
    pub fn new(i0: i64, i1: i64, i2: i64) -> Self {
        Self {
            indices: [i0, i1, i2],
        }
    }

    /// Largest index referenced by this triangle
    pub fn max_index(&self) -> i64 {
        self.indices.iter().copied().max().unwrap_or(0)
    }
}
