//! objgl core library - OBJ to WebGL array conversion
//!
//! Reads the `v`, `vn` and `f` records of Wavefront OBJ text, swaps the
//! vertical and depth axes, rescales positions and splits quads into
//! triangles, producing comma-terminated numeric lines that can be pasted
//! into JavaScript array literals or flat buffers for GPU upload.

pub mod buffers;
pub mod convert;
pub mod error;
pub mod format;
pub mod geometry;
pub mod obj;
pub mod transform;
pub mod triangulate;

// Re-export commonly used types
pub use buffers::MeshBuffers;
pub use convert::{
    convert_indices, convert_indices_file, convert_vertices, convert_vertices_file,
    ConversionStats, ConvertOptions,
};
pub use error::{ObjError, ObjResult};
pub use geometry::{FaceRef, Normal, Position, Triangle};
pub use obj::{classify, parse_record, Record, RecordKind};
pub use transform::AxisRemap;
