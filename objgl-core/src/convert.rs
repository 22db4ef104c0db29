/// Line-by-line drivers that write WebGL array text
///
/// Both phases stream their input once and write one output line per
/// converted record, keeping encounter order in every output.
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{ObjError, ObjResult};
use crate::format::{format_indices, format_vector};
use crate::geometry::{Normal, Position};
use crate::obj::{classify, RecordKind};
use crate::transform::AxisRemap;
use crate::triangulate::{flatten, triangulate};

/// Default input for the vertex/normal phase
pub const DEFAULT_VERTICES_INPUT: &str = "vertices_and_normals.txt";
/// Default output for remapped positions
pub const DEFAULT_VERTICES_OUTPUT: &str = "webgl_vertices.txt";
/// Default output for remapped normals
pub const DEFAULT_NORMALS_OUTPUT: &str = "webgl_normals.txt";
/// Default input for the index phase
pub const DEFAULT_INDICES_INPUT: &str = "indices.txt";
/// Default output for triangle indices
pub const DEFAULT_INDICES_OUTPUT: &str = "webgl_indices.txt";

/// Remapping applied by the vertex/normal phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertOptions {
    pub position_remap: AxisRemap,
    pub normal_remap: AxisRemap,
}

impl ConvertOptions {
    /// Options with a custom unit divisor for positions
    pub fn with_position_divisor(divisor: f64) -> Self {
        Self {
            position_remap: AxisRemap::new(divisor),
            ..Self::default()
        }
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            position_remap: AxisRemap::positions(),
            normal_remap: AxisRemap::normals(),
        }
    }
}

/// Record counts for one conversion phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub lines: usize,
    pub positions: usize,
    pub normals: usize,
    pub faces: usize,
    pub triangles: usize,
    /// Faces with a vertex count other than 3 or 4
    pub dropped_faces: usize,
    /// Lines that produced no output in this phase
    pub skipped_lines: usize,
}

/// A destination stream, tied to the file behind it when there is one
struct Output<'a, W> {
    writer: &'a mut W,
    path: Option<&'a Path>,
}

impl<'a, W: Write> Output<'a, W> {
    fn stream(writer: &'a mut W) -> Self {
        Self { writer, path: None }
    }

    fn file(writer: &'a mut W, path: &'a Path) -> Self {
        Self {
            writer,
            path: Some(path),
        }
    }

    fn write_line(&mut self, line: &str) -> ObjResult<()> {
        writeln!(self.writer, "{}", line).map_err(|e| match self.path {
            Some(path) => ObjError::io(path, e),
            None => ObjError::Stream(e),
        })
    }
}

/// Remap every `v` and `vn` line of `input` into `vertices` and `normals`
///
/// Face lines and unknown tags are skipped without being parsed.
pub fn convert_vertices<R, V, N>(
    input: R,
    vertices: &mut V,
    normals: &mut N,
    options: &ConvertOptions,
) -> ObjResult<ConversionStats>
where
    R: BufRead,
    V: Write,
    N: Write,
{
    write_vertices(
        input,
        Output::stream(vertices),
        Output::stream(normals),
        options,
    )
}

fn write_vertices<R, V, N>(
    input: R,
    mut vertices: Output<'_, V>,
    mut normals: Output<'_, N>,
    options: &ConvertOptions,
) -> ObjResult<ConversionStats>
where
    R: BufRead,
    V: Write,
    N: Write,
{
    let mut stats = ConversionStats::default();

    for (i, line) in input.lines().enumerate() {
        let line = line?;
        stats.lines += 1;

        let Some(raw) = classify(&line) else {
            stats.skipped_lines += 1;
            continue;
        };

        match raw.kind {
            RecordKind::Position => {
                let [x, y, z] = raw.vector3(i + 1)?;
                let remapped = options
                    .position_remap
                    .remap_position(&Position::new(x, y, z));
                vertices.write_line(&format_vector(&remapped))?;
                stats.positions += 1;
            }
            RecordKind::Normal => {
                let [x, y, z] = raw.vector3(i + 1)?;
                let remapped = options.normal_remap.remap_normal(&Normal::new(x, y, z));
                normals.write_line(&format_vector(&remapped))?;
                stats.normals += 1;
            }
            RecordKind::Face => stats.skipped_lines += 1,
        }
    }

    Ok(stats)
}

/// Triangulate every `f` line of `input` into `indices`
pub fn convert_indices<R, W>(input: R, indices: &mut W) -> ObjResult<ConversionStats>
where
    R: BufRead,
    W: Write,
{
    write_indices(input, Output::stream(indices))
}

fn write_indices<R, W>(input: R, mut indices: Output<'_, W>) -> ObjResult<ConversionStats>
where
    R: BufRead,
    W: Write,
{
    let mut stats = ConversionStats::default();
    let mut warned_wide_index = false;

    for (i, line) in input.lines().enumerate() {
        let line = line?;
        stats.lines += 1;

        let face = match classify(&line) {
            Some(raw) if raw.kind == RecordKind::Face => raw.face_refs(i + 1)?,
            _ => {
                stats.skipped_lines += 1;
                continue;
            }
        };

        stats.faces += 1;
        let Some(triangles) = triangulate(&face) else {
            debug!(line = i + 1, arity = face.len(), "dropping face with unsupported arity");
            stats.dropped_faces += 1;
            stats.skipped_lines += 1;
            continue;
        };

        if !warned_wide_index
            && triangles
                .iter()
                .any(|t| t.max_index() > i64::from(u16::MAX))
        {
            warn!(
                line = i + 1,
                "index exceeds 16-bit range; the output needs an UNSIGNED_INT index buffer"
            );
            warned_wide_index = true;
        }

        indices.write_line(&format_indices(&flatten(&triangles)))?;
        stats.triangles += triangles.len();
    }

    Ok(stats)
}

/// Convert positions and normals from `input` into two output files
///
/// Both outputs are created (or truncated) before the first line is read.
pub fn convert_vertices_file(
    input: impl AsRef<Path>,
    vertices_out: impl AsRef<Path>,
    normals_out: impl AsRef<Path>,
    options: &ConvertOptions,
) -> ObjResult<ConversionStats> {
    let reader = open(input.as_ref())?;
    let mut vertices = create(vertices_out.as_ref())?;
    let mut normals = create(normals_out.as_ref())?;

    let stats = write_vertices(
        reader,
        Output::file(&mut vertices, vertices_out.as_ref()),
        Output::file(&mut normals, normals_out.as_ref()),
        options,
    )?;
    vertices
        .flush()
        .map_err(|e| ObjError::io(vertices_out.as_ref(), e))?;
    normals
        .flush()
        .map_err(|e| ObjError::io(normals_out.as_ref(), e))?;

    info!(
        input = %input.as_ref().display(),
        positions = stats.positions,
        normals = stats.normals,
        skipped = stats.skipped_lines,
        "converted vertices and normals"
    );
    Ok(stats)
}

/// Convert faces from `input` into a triangle index file
pub fn convert_indices_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> ObjResult<ConversionStats> {
    let reader = open(input.as_ref())?;
    let mut writer = create(output.as_ref())?;

    let stats = write_indices(reader, Output::file(&mut writer, output.as_ref()))?;
    writer
        .flush()
        .map_err(|e| ObjError::io(output.as_ref(), e))?;

    info!(
        input = %input.as_ref().display(),
        faces = stats.faces,
        triangles = stats.triangles,
        dropped = stats.dropped_faces,
        "converted indices"
    );
    Ok(stats)
}

fn open(path: &Path) -> ObjResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| ObjError::io(path, e))
}

fn create(path: &Path) -> ObjResult<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| ObjError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_vertices(input: &str) -> (String, String, ConversionStats) {
        let mut vertices = Vec::new();
        let mut normals = Vec::new();
        let stats = convert_vertices(
            input.as_bytes(),
            &mut vertices,
            &mut normals,
            &ConvertOptions::default(),
        )
        .unwrap();
        (
            String::from_utf8(vertices).unwrap(),
            String::from_utf8(normals).unwrap(),
            stats,
        )
    }

    fn run_indices(input: &str) -> (String, ConversionStats) {
        let mut indices = Vec::new();
        let stats = convert_indices(input.as_bytes(), &mut indices).unwrap();
        (String::from_utf8(indices).unwrap(), stats)
    }

    #[test]
    fn test_position_line() {
        let (vertices, normals, _) = run_vertices("v 10 0 0\n");
        assert_eq!(vertices, "1.0, 0.0, -0.0,\n");
        assert!(normals.is_empty());
    }

    #[test]
    fn test_position_rounding() {
        let (vertices, _, _) = run_vertices("v 1.23456789 -2.5 0.000001\n");
        assert_eq!(vertices, "0.1234568, 1e-07, 0.25,\n");
    }

    #[test]
    fn test_normal_line() {
        let (vertices, normals, _) = run_vertices("vn 0.0000 1.0000 0.0000\n");
        assert!(vertices.is_empty());
        assert_eq!(normals, "0.0, 0.0, -1.0,\n");
    }

    #[test]
    fn test_streams_keep_encounter_order() {
        let input = "v 10 20 30\nvn 1 0 0\nv 40 50 60\nvn 0 0 1\n";
        let (vertices, normals, stats) = run_vertices(input);
        assert_eq!(vertices, "1.0, 3.0, -2.0,\n4.0, 6.0, -5.0,\n");
        assert_eq!(normals, "1.0, 0.0, -0.0,\n0.0, 1.0, -0.0,\n");
        assert_eq!(stats.positions, 2);
        assert_eq!(stats.normals, 2);
    }

    #[test]
    fn test_vertex_phase_skips_other_records() {
        let input = "# cube\n\nmtllib cube.mtl\no Cube\nvt 0.5 0.5\nf 1 2 x\ns off\n";
        let (vertices, normals, stats) = run_vertices(input);
        assert!(vertices.is_empty());
        assert!(normals.is_empty());
        assert_eq!(stats.lines, 7);
        assert_eq!(stats.skipped_lines, 7);
    }

    #[test]
    fn test_vertex_phase_fails_on_malformed_position() {
        let mut vertices = Vec::new();
        let mut normals = Vec::new();
        let result = convert_vertices(
            "v 1 2 3\nv 1 2\n".as_bytes(),
            &mut vertices,
            &mut normals,
            &ConvertOptions::default(),
        );
        assert!(matches!(
            result,
            Err(ObjError::MissingField { line: 2, .. })
        ));
    }

    #[test]
    fn test_custom_position_divisor() {
        let mut vertices = Vec::new();
        let mut normals = Vec::new();
        convert_vertices(
            "v 2 4 6\nvn 2 4 6\n".as_bytes(),
            &mut vertices,
            &mut normals,
            &ConvertOptions::with_position_divisor(1.0),
        )
        .unwrap();
        assert_eq!(String::from_utf8(vertices).unwrap(), "2.0, 6.0, -4.0,\n");
        assert_eq!(String::from_utf8(normals).unwrap(), "2.0, 6.0, -4.0,\n");
    }

    #[test]
    fn test_triangle_face() {
        let (indices, stats) = run_indices("f 1 2 3\n");
        assert_eq!(indices, "0, 1, 2,\n");
        assert_eq!(stats.triangles, 1);
    }

    #[test]
    fn test_quad_face() {
        let (indices, stats) = run_indices("f 1 2 3 4\n");
        assert_eq!(indices, "0, 1, 2, 0, 2, 3,\n");
        assert_eq!(stats.triangles, 2);
    }

    #[test]
    fn test_face_sub_indices() {
        let (indices, _) = run_indices("f 1/1/1 2/2/2 3/3/3\n");
        assert_eq!(indices, "0, 1, 2,\n");
    }

    #[test]
    fn test_unsupported_arity_is_dropped() {
        let (indices, stats) = run_indices("f 1 2\nf 1 2 3 4 5\nf 4 5 6\n");
        assert_eq!(indices, "3, 4, 5,\n");
        assert_eq!(stats.faces, 3);
        assert_eq!(stats.dropped_faces, 2);
    }

    #[test]
    fn test_index_phase_skips_vertex_records() {
        let (indices, stats) = run_indices("v 1 2\nvn x y z\nf 1 2 3\n");
        assert_eq!(indices, "0, 1, 2,\n");
        assert_eq!(stats.skipped_lines, 2);
    }

    #[test]
    fn test_wide_indices_are_written() {
        let (indices, stats) = run_indices("f 1 2 70000\nf 1 2 70001\n");
        assert_eq!(indices, "0, 1, 69999,\n0, 1, 70000,\n");
        assert_eq!(stats.triangles, 2);
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no space left"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_error_names_destination_file() {
        let path = Path::new("out/webgl_indices.txt");
        let mut sink = FullDisk;
        match write_indices("f 1 2 3\n".as_bytes(), Output::file(&mut sink, path)) {
            Err(ObjError::Io { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("unexpected result: {:?}", other),
        }

        let vertices_path = Path::new("out/webgl_vertices.txt");
        let normals_path = Path::new("out/webgl_normals.txt");
        let mut vertices = Vec::new();
        let mut normals = FullDisk;
        let result = write_vertices(
            "v 1 2 3\nvn 0 1 0\n".as_bytes(),
            Output::file(&mut vertices, vertices_path),
            Output::file(&mut normals, normals_path),
            &ConvertOptions::default(),
        );
        match result {
            Err(ObjError::Io { path: failed, .. }) => assert_eq!(failed, normals_path),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_write_error_on_plain_stream() {
        let mut sink = FullDisk;
        let result = convert_indices("f 1 2 3\n".as_bytes(), &mut sink);
        assert!(matches!(result, Err(ObjError::Stream(_))));
    }

    #[test]
    fn test_index_phase_fails_on_malformed_reference() {
        let mut indices = Vec::new();
        let result = convert_indices("f 1 2 3\nf 1 two 3\n".as_bytes(), &mut indices);
        assert!(matches!(
            result,
            Err(ObjError::InvalidNumber { line: 2, .. })
        ));
    }
}
