/// objgl Web - WASM bindings that hand converted OBJ data to a WebGL page
///
/// `WebMesh` exposes the same arrays the text converter writes, as typed
/// arrays ready for `gl.bufferData`.

use objgl_core::{ConvertOptions, MeshBuffers};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WebMesh {
    buffers: MeshBuffers,
}

#[wasm_bindgen]
impl WebMesh {
    /// Parse OBJ text with the default remapping (positions divided by 10)
    #[wasm_bindgen(constructor)]
    pub fn new(obj_text: &str) -> Result<WebMesh, JsError> {
        Self::with_scale(obj_text, objgl_core::transform::DEFAULT_POSITION_DIVISOR)
    }

    /// Parse OBJ text, dividing positions by `scale`
    #[wasm_bindgen(js_name = withScale)]
    pub fn with_scale(obj_text: &str, scale: f64) -> Result<WebMesh, JsError> {
        let options = ConvertOptions::with_position_divisor(scale);
        let buffers = MeshBuffers::from_obj_str(obj_text, &options)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(WebMesh { buffers })
    }

    /// Positions for a `Float32Array` vertex buffer
    pub fn vertices(&self) -> Vec<f32> {
        self.buffers.vertices.clone()
    }

    /// Normals for a `Float32Array` normal buffer
    pub fn normals(&self) -> Vec<f32> {
        self.buffers.normals.clone()
    }

    /// Indices for a `Uint16Array` element buffer
    pub fn indices(&self) -> Vec<u16> {
        self.buffers.indices.clone()
    }

    #[wasm_bindgen(js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.buffers.vertex_count()
    }

    #[wasm_bindgen(js_name = triangleCount)]
    pub fn triangle_count(&self) -> usize {
        self.buffers.triangle_count()
    }
}

impl WebMesh {
    pub fn buffers(&self) -> &MeshBuffers {
        &self.buffers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_mesh_arrays() {
        let mesh = WebMesh::new("v 10 20 30\nvn 0 1 0\nf 1 1 1\n")
            .unwrap_or_else(|_| panic!("valid OBJ text"));
        assert_eq!(mesh.vertices(), vec![1.0, 3.0, -2.0]);
        assert_eq!(mesh.normals(), vec![0.0, 0.0, -1.0]);
        assert_eq!(mesh.indices(), vec![0, 0, 0]);
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.buffers().indices.len(), 3);
    }
}
