use std::io::Write;

use rand_core::RngCore;
use rand_seeder::{Seeder, SipRng};

use crate::code_writer::CodeWriter;
use crate::error::Result;

/// Number of random bytes shared by the test cases
pub const RANDOM_DATA_LEN: usize = 512;

const BYTES_PER_LINE: usize = 16;

/// Deterministic bytes for `seed`
pub fn random_bytes(seed: usize) -> [u8; RANDOM_DATA_LEN] {
  let mut rng: SipRng = Seeder::from(seed).make_rng();
  let mut data = [0u8; RANDOM_DATA_LEN];
  rng.fill_bytes(&mut data);
  data
}

/// Write `data` as `pub static <name>: [u8; N] = [...];`, 16 bytes per line
pub fn write_data_table<W: Write>(
  writer: &mut CodeWriter<W>,
  name: &str,
  data: &[u8],
) -> Result<()> {
  writer.writeln(&format!("pub static {}: [u8; {}] = [", name, data.len()))?;
  writer.indent();
  for line in data.chunks(BYTES_PER_LINE) {
    let entries: String = line.iter().map(|b| format!("0x{:02X}, ", b)).collect();
    writer.writeln(&entries)?;
  }
  writer.dedent();
  writer.writeln("];")
}

/// Render the `G_DATA` table for `seed`
pub fn generate_data_table(seed: usize) -> Result<String> {
  let mut writer = CodeWriter::with_options(Vec::new(), 4);
  write_data_table(&mut writer, "G_DATA", &random_bytes(seed))?;
  let buffer = writer.into_inner();
  Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
  use regex::Regex;

  use super::*;

  #[test]
  fn test_write_data_table_layout() {
    let data: Vec<u8> = (0..20).map(|i| i * 13).collect();
    let mut writer = CodeWriter::with_options(Vec::new(), 4);
    write_data_table(&mut writer, "T", &data).unwrap();
    let table = String::from_utf8(writer.into_inner()).unwrap();

    assert_eq!(
      table,
      concat!(
        "pub static T: [u8; 20] = [\n",
        "    0x00, 0x0D, 0x1A, 0x27, 0x34, 0x41, 0x4E, 0x5B, ",
        "0x68, 0x75, 0x82, 0x8F, 0x9C, 0xA9, 0xB6, 0xC3, \n",
        "    0xD0, 0xDD, 0xEA, 0xF7, \n",
        "];\n",
      )
    );
  }

  #[test]
  fn test_seed_zero_table() {
    let table = generate_data_table(0).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    let entries = Regex::new(r"^    (0x[0-9A-F]{2}, ){16}$").unwrap();

    assert_eq!(lines.len(), 2 + RANDOM_DATA_LEN / BYTES_PER_LINE);
    assert_eq!(lines[0], "pub static G_DATA: [u8; 512] = [");
    assert!(lines[1..lines.len() - 1].iter().all(|l| entries.is_match(l)));
    assert_eq!(lines[lines.len() - 1], "];");
    assert!(table.ends_with("];\n"));

    let first_line: String = random_bytes(0)[..BYTES_PER_LINE]
      .iter()
      .map(|b| format!("0x{:02X}, ", b))
      .collect();
    assert_eq!(lines[1], format!("    {}", first_line));
  }

  #[test]
  fn test_seed_is_deterministic() {
    assert_eq!(generate_data_table(0).unwrap(), generate_data_table(0).unwrap());
    assert_eq!(random_bytes(7), random_bytes(7));
    assert_ne!(random_bytes(0), random_bytes(1));
  }
}
