/// Flat vertex, normal and index arrays ready for GPU upload
use crate::convert::ConvertOptions;
use crate::error::{ObjError, ObjResult};
use crate::geometry::{Normal, Position};
use crate::obj::{parse_record, Record};
use crate::triangulate::{flatten, triangulate};

/// A whole OBJ document converted into WebGL buffer data
///
/// `vertices` and `normals` hold 3 floats per record and map onto
/// `Float32Array`s; `indices` map onto a `Uint16Array` drawn with
/// `gl.UNSIGNED_SHORT`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u16>,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert every `v`, `vn` and `f` line of `text`
    pub fn from_obj_str(text: &str, options: &ConvertOptions) -> ObjResult<Self> {
        let mut buffers = Self::new();
        for (i, line) in text.lines().enumerate() {
            if let Some(record) = parse_record(line, i + 1)? {
                buffers.push_record(record, options)?;
            }
        }
        Ok(buffers)
    }

    pub fn push_record(&mut self, record: Record, options: &ConvertOptions) -> ObjResult<()> {
        match record {
            Record::Position(p) => self.push_position(&p, options),
            Record::Normal(n) => self.push_normal(&n, options),
            Record::Face(face) => {
                if let Some(triangles) = triangulate(&face) {
                    for index in flatten(&triangles) {
                        self.indices.push(narrow_index(index)?);
                    }
                }
            }
        }
        Ok(())
    }

    fn push_position(&mut self, p: &Position, options: &ConvertOptions) {
        let remapped = options.position_remap.remap_position(p);
        self.vertices.extend(remapped.iter().map(|&c| c as f32));
    }

    fn push_normal(&mut self, n: &Normal, options: &ConvertOptions) {
        let remapped = options.normal_remap.remap_normal(n);
        self.normals.extend(remapped.iter().map(|&c| c as f32));
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

fn narrow_index(index: i64) -> ObjResult<u16> {
    u16::try_from(index).map_err(|_| ObjError::IndexOutOfRange { index })
}
