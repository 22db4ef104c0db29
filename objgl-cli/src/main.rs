/// objgl - convert OBJ geometry into WebGL array text
///
/// With no arguments, reads `vertices_and_normals.txt` and `indices.txt`
/// from the working directory and writes `webgl_vertices.txt`,
/// `webgl_normals.txt` and `webgl_indices.txt`.

use anyhow::{Context, Result};
use clap::Parser;
use objgl_cli::{log_filter, Cli, ConvertApp};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.quiet, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let summary = ConvertApp::new(cli)
        .run()
        .context("Failed to convert OBJ data")?;

    let phases = [summary.vertices, summary.indices].iter().flatten().count();
    tracing::info!(phases, "done");

    Ok(())
}
