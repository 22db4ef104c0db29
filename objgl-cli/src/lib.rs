/// Command-line front end for the OBJ to WebGL converter
use std::path::PathBuf;

use clap::Parser;
use objgl_core::convert::{
    DEFAULT_INDICES_INPUT, DEFAULT_INDICES_OUTPUT, DEFAULT_NORMALS_OUTPUT,
    DEFAULT_VERTICES_INPUT, DEFAULT_VERTICES_OUTPUT,
};
use objgl_core::transform::DEFAULT_POSITION_DIVISOR;
use objgl_core::{
    convert_indices_file, convert_vertices_file, ConversionStats, ConvertOptions, ObjResult,
};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Convert OBJ vertices, normals and faces into WebGL array text
#[derive(Parser, Debug, Clone)]
#[command(name = "objgl")]
#[command(version)]
pub struct Cli {
    /// OBJ text holding `v` and `vn` records
    #[arg(long, default_value = DEFAULT_VERTICES_INPUT)]
    pub input: PathBuf,

    /// Output for remapped positions
    #[arg(long, default_value = DEFAULT_VERTICES_OUTPUT)]
    pub vertices_out: PathBuf,

    /// Output for remapped normals
    #[arg(long, default_value = DEFAULT_NORMALS_OUTPUT)]
    pub normals_out: PathBuf,

    /// OBJ text holding `f` records
    #[arg(long, default_value = DEFAULT_INDICES_INPUT)]
    pub indices_input: PathBuf,

    /// Output for triangle indices
    #[arg(long, default_value = DEFAULT_INDICES_OUTPUT)]
    pub indices_out: PathBuf,

    /// Source units per WebGL unit; positions are divided by this
    #[arg(long, default_value_t = DEFAULT_POSITION_DIVISOR)]
    pub scale: f64,

    /// Skip the vertex/normal phase
    #[arg(long)]
    pub skip_vertices: bool,

    /// Skip the index phase
    #[arg(long)]
    pub skip_indices: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Log filter from `RUST_LOG` (`env`), falling back to `info`, or `warn` when quiet
///
/// A non-empty, parseable `RUST_LOG` wins over `--quiet`.
pub fn log_filter(quiet: bool, env: Option<&str>) -> EnvFilter {
    env.filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| {
            let default_level = if quiet { Level::WARN } else { Level::INFO };
            EnvFilter::new(default_level.as_str())
        })
}

/// Totals for a run; a phase that was skipped is `None`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub vertices: Option<ConversionStats>,
    pub indices: Option<ConversionStats>,
}

/// Runs both conversion phases in order
pub struct ConvertApp {
    cli: Cli,
    options: ConvertOptions,
}

impl ConvertApp {
    pub fn new(cli: Cli) -> Self {
        let options = ConvertOptions::with_position_divisor(cli.scale);
        Self { cli, options }
    }

    /// Vertex/normal phase first, then the index phase; the first error stops the run
    pub fn run(&self) -> ObjResult<RunSummary> {
        let mut summary = RunSummary::default();

        if !self.cli.skip_vertices {
            info!(
                input = %self.cli.input.display(),
                scale = self.cli.scale,
                "converting vertices and normals"
            );
            summary.vertices = Some(convert_vertices_file(
                &self.cli.input,
                &self.cli.vertices_out,
                &self.cli.normals_out,
                &self.options,
            )?);
        }

        if !self.cli.skip_indices {
            info!(input = %self.cli.indices_input.display(), "converting indices");
            summary.indices = Some(convert_indices_file(
                &self.cli.indices_input,
                &self.cli.indices_out,
            )?);
        }

        Ok(summary)
    }
}
