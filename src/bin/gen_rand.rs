use std::fs;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rvv_casegen::{generate_data_table, init_logging, random_bytes, write_data_table, CodeWriter};
use tracing::info;

/// Print the seeded `G_DATA` byte table used by the test cases
#[derive(Parser, Debug)]
#[command(name = "rvv-gen-rand")]
struct Cli {
  /// Seed for the generator
  #[arg(default_value_t = 0)]
  seed: usize,
  /// Write the table to this file instead of stdout
  #[arg(short, long)]
  output: Option<PathBuf>,
}

fn main() -> Result<()> {
  init_logging();
  let cli = Cli::parse();
  info!(seed = cli.seed, "Generating random data table");

  match cli.output {
    Some(path) => {
      let table = generate_data_table(cli.seed)?;
      fs::write(&path, table)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;
    }
    None => {
      let stdout = io::stdout();
      let mut writer = CodeWriter::with_options(BufWriter::new(stdout.lock()), 4);
      write_data_table(&mut writer, "G_DATA", &random_bytes(cli.seed))?;
      writer.flush()?;
    }
  }
  Ok(())
}
