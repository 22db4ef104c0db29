/// Face triangulation for WebGL index buffers
use crate::geometry::{FaceRef, Triangle};

/// Triangles for one face, or `None` when the arity is unsupported
///
/// Triangles pass through; quads are split along the `i0`-`i2` diagonal into
/// `(i0, i1, i2)` and `(i0, i2, i3)`. Any other vertex count yields `None`.
pub fn triangulate(face: &[FaceRef]) -> Option<Vec<Triangle>> {
    match *face {
        [a, b, c] => Some(vec![Triangle::new(
            a.zero_based(),
            b.zero_based(),
            c.zero_based(),
        )]),
        [a, b, c, d] => {
            let (i0, i1, i2, i3) = (a.zero_based(), b.zero_based(), c.zero_based(), d.zero_based());
            Some(vec![Triangle::new(i0, i1, i2), Triangle::new(i0, i2, i3)])
        }
        _ => None,
    }
}

/// Flattened zero-based indices, in triangle order
pub fn flatten(triangles: &[Triangle]) -> Vec<i64> {
    triangles.iter().flat_map(|t| t.indices).collect()
}
