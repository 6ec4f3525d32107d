use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rvv_casegen::{init_logging, missing_instructions_in_files};

/// List instructions ticked in a checklist but absent from a case listing
#[derive(Parser, Debug)]
#[command(name = "rvv-missing-insts")]
struct Cli {
  /// Checklist with `[x] [x] <instruction>` lines
  #[arg(default_value = "data/1.txt")]
  checklist: PathBuf,
  /// Comma-separated listing, instruction in the first field
  #[arg(default_value = "data/2.txt")]
  listing: PathBuf,
}

fn main() -> Result<()> {
  init_logging();
  let cli = Cli::parse();

  for name in missing_instructions_in_files(&cli.checklist, &cli.listing)? {
    println!("{}", name);
  }
  Ok(())
}
