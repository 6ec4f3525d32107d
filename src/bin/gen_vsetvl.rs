use std::io::{self, BufWriter};

use anyhow::Result;
use clap::Parser;
use rvv_casegen::{init_logging, CodeWriter, VsetvlTableGenerator};

/// Print the `vsetvli` and `vsetivli` dispatch functions
#[derive(Parser, Debug)]
#[command(name = "rvv-gen-vsetvl")]
struct Cli {
  /// Spaces per nesting level
  #[arg(long, default_value_t = 2)]
  indent: usize,
}

fn main() -> Result<()> {
  init_logging();
  let cli = Cli::parse();

  let stdout = io::stdout();
  let mut writer = CodeWriter::with_options(BufWriter::new(stdout.lock()), cli.indent);
  VsetvlTableGenerator::new().write_all(&mut writer)?;
  writer.flush()?;
  Ok(())
}
