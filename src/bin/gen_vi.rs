use std::io::{self, BufWriter};

use anyhow::Result;
use clap::Parser;
use rvv_casegen::{init_logging, CodeWriter, ImmediateTableGenerator};

/// Print an `op` function dispatching each immediate to a `.vi` instruction
#[derive(Parser, Debug)]
#[command(name = "rvv-gen-vi")]
struct Cli {
  /// Instruction text; every `%imm%` is replaced by the immediate
  template: String,
  /// First immediate
  #[arg(allow_negative_numbers = true)]
  imm_begin: i64,
  /// Last immediate, inclusive
  #[arg(allow_negative_numbers = true)]
  imm_end: i64,
  /// Spaces per nesting level
  #[arg(long, default_value_t = 2)]
  indent: usize,
}

fn main() -> Result<()> {
  init_logging();
  let cli = Cli::parse();

  let generator = ImmediateTableGenerator::new(&cli.template, cli.imm_begin, cli.imm_end);
  let stdout = io::stdout();
  let mut writer = CodeWriter::with_options(BufWriter::new(stdout.lock()), cli.indent);
  generator.write(&mut writer)?;
  writer.flush()?;
  Ok(())
}
