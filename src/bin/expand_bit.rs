use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rvv_casegen::{
  init_logging, ExpandConfig, MarkerPair, Rewriter, DEFAULT_BEGIN_MARKER, DEFAULT_END_MARKER,
  DEFAULT_ROOT,
};
use tracing::info;

/// Expand width-templated test case regions in place
#[derive(Parser, Debug)]
#[command(name = "rvv-expand-bit")]
struct Cli {
  /// Directory searched recursively for template regions
  #[arg(default_value = DEFAULT_ROOT)]
  root: PathBuf,
  /// Marker opening a template region
  #[arg(long, default_value = DEFAULT_BEGIN_MARKER)]
  begin_marker: String,
  /// Marker closing a template region
  #[arg(long, default_value = DEFAULT_END_MARKER)]
  end_marker: String,
}

fn main() -> Result<()> {
  init_logging();
  let cli = Cli::parse();

  let config = ExpandConfig::new(&cli.root)
    .with_markers(MarkerPair::new(&cli.begin_marker, &cli.end_marker));
  let rewriter = Rewriter::new(config)?;
  let summary = rewriter.run();

  for report in &summary.reports {
    for diagnostic in &report.diagnostics {
      println!("{}:{}", report.path.display(), diagnostic);
    }
  }
  info!(
    visited = summary.files_visited,
    rewritten = summary.files_rewritten,
    "Expansion finished"
  );
  Ok(())
}
