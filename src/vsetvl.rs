//! Exhaustive `vsetvli` / `vsetivli` dispatch tables.
//!
//! The test cases pick element width, register grouping and vector length at
//! runtime, but the instructions take them as immediates. The generated
//! functions map every runtime combination to the one instruction encoding it.

use std::fmt;
use std::io::Write;

use crate::code_writer::CodeWriter;
use crate::error::Result;

/// Element widths supported by the test suite
pub const SEWS: [u32; 8] = [8, 16, 32, 64, 128, 256, 512, 1024];

/// Largest vector length `vsetivli` can encode as an immediate
pub const MAX_IMMEDIATE_AVL: u8 = 31;

/// Register grouping factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lmul {
  Mf8,
  Mf4,
  Mf2,
  M1,
  M2,
  M4,
  M8,
}

impl Lmul {
  pub const ALL: [Lmul; 7] = [
    Lmul::Mf8,
    Lmul::Mf4,
    Lmul::Mf2,
    Lmul::M1,
    Lmul::M2,
    Lmul::M4,
    Lmul::M8,
  ];

  /// Signed code used by the test cases; negative codes are fractional
  pub fn code(self) -> i64 {
    match self {
      Lmul::Mf8 => -8,
      Lmul::Mf4 => -4,
      Lmul::Mf2 => -2,
      Lmul::M1 => 1,
      Lmul::M2 => 2,
      Lmul::M4 => 4,
      Lmul::M8 => 8,
    }
  }

  pub fn from_code(code: i64) -> Option<Self> {
    Self::ALL.into_iter().find(|lmul| lmul.code() == code)
  }

  pub fn mnemonic(self) -> &'static str {
    match self {
      Lmul::Mf8 => "mf8",
      Lmul::Mf4 => "mf4",
      Lmul::Mf2 => "mf2",
      Lmul::M1 => "m1",
      Lmul::M2 => "m2",
      Lmul::M4 => "m4",
      Lmul::M8 => "m8",
    }
  }
}

impl fmt::Display for Lmul {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.mnemonic())
  }
}

/// Where the requested vector length comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Avl {
  /// Read from a register at runtime
  Runtime,
  /// Encoded as an immediate
  Immediate(u8),
}

impl Avl {
  /// The `rvv_asm!` statement configuring the vector unit
  pub fn set_vl_asm(self, sew: u32, lmul: Lmul) -> String {
    match self {
      Avl::Runtime => format!(
        "rvv_asm!(\"mv t1, {{0}}\", \"vsetvli t0, t1, e{}, {}\", \"mv {{1}}, t0\", in (reg) avl, out (reg) vl);",
        sew, lmul
      ),
      Avl::Immediate(avl) => format!(
        "rvv_asm!(\"vsetivli t0, {}, e{}, {}\", \"mv {{0}}, t0\", out (reg) vl);",
        avl, sew, lmul
      ),
    }
  }
}

/// Emits the `vsetvli` and `vsetivli` lookup functions
#[derive(Debug, Clone, Copy, Default)]
pub struct VsetvlTableGenerator;

impl VsetvlTableGenerator {
  pub fn new() -> Self {
    Self
  }

  /// `fn vsetvli(avl, sew, lmul) -> vl` dispatching over lmul then sew
  pub fn write_vsetvli<W: Write>(&self, writer: &mut CodeWriter<W>) -> Result<()> {
    self.write_prologue(writer, "vsetvli")?;
    writer.begin_match(None, "lmul")?;
    for lmul in Lmul::ALL {
      self.write_lmul_arm(writer, lmul, Avl::Runtime)?;
    }
    writer.end_match("")?;
    self.write_epilogue(writer)
  }

  /// `fn vsetivli(avl, sew, lmul) -> vl` dispatching over avl, lmul then sew
  pub fn write_vsetivli<W: Write>(&self, writer: &mut CodeWriter<W>) -> Result<()> {
    self.write_prologue(writer, "vsetivli")?;
    writer.begin_match(None, "avl")?;
    for avl in 0..=MAX_IMMEDIATE_AVL {
      writer.begin_match(Some(&avl.to_string()), "lmul")?;
      for lmul in Lmul::ALL {
        self.write_lmul_arm(writer, lmul, Avl::Immediate(avl))?;
      }
      writer.end_match(",")?;
    }
    writer.end_match("")?;
    self.write_epilogue(writer)
  }

  /// Both functions, separated by a blank line
  pub fn write_all<W: Write>(&self, writer: &mut CodeWriter<W>) -> Result<()> {
    self.write_vsetvli(writer)?;
    writer.newline()?;
    self.write_vsetivli(writer)
  }

  /// Render both functions with `indent_size` spaces per level
  pub fn generate(&self, indent_size: usize) -> Result<String> {
    let mut writer = CodeWriter::with_options(Vec::new(), indent_size);
    self.write_all(&mut writer)?;
    let buffer = writer.into_inner();
    Ok(String::from_utf8_lossy(&buffer).into_owned())
  }

  fn write_prologue<W: Write>(&self, writer: &mut CodeWriter<W>, name: &str) -> Result<()> {
    writer.begin_function(
      name,
      &[("avl", "u64"), ("sew", "u64"), ("lmul", "i64")],
      Some("u64"),
    )?;
    writer.begin_block("unsafe")?;
    writer.writeln("let mut vl: u64;")
  }

  fn write_epilogue<W: Write>(&self, writer: &mut CodeWriter<W>) -> Result<()> {
    writer.end_block("")?;
    writer.end_function()
  }

  fn write_lmul_arm<W: Write>(
    &self,
    writer: &mut CodeWriter<W>,
    lmul: Lmul,
    avl: Avl,
  ) -> Result<()> {
    writer.begin_match(Some(&lmul.code().to_string()), "sew")?;
    for sew in SEWS {
      writer.begin_arm(&sew.to_string())?;
      writer.writeln(&avl.set_vl_asm(sew, lmul))?;
      writer.writeln("vl")?;
      writer.end_block("")?;
    }
    writer.end_match(",")
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  fn render(f: impl FnOnce(&mut CodeWriter<&mut Vec<u8>>) -> Result<()>) -> String {
    let mut buffer = Vec::new();
    let mut writer = CodeWriter::new(&mut buffer);
    f(&mut writer).unwrap();
    String::from_utf8(buffer).unwrap()
  }

  /// Map each emitted `rvv_asm!` leaf to the arm patterns enclosing it
  fn leaves_by_path(code: &str) -> HashMap<Vec<String>, Vec<String>> {
    let mut stack: Vec<(usize, String)> = Vec::new();
    let mut leaves: HashMap<Vec<String>, Vec<String>> = HashMap::new();

    for line in code.lines() {
      let depth = line.len() - line.trim_start().len();
      let trimmed = line.trim();
      if let Some((pattern, _)) = trimmed.split_once(" =>") {
        if trimmed.ends_with('{') {
          stack.retain(|(d, _)| *d < depth);
          stack.push((depth, pattern.to_string()));
        }
      } else if trimmed.starts_with("rvv_asm!") {
        stack.retain(|(d, _)| *d < depth);
        let path = stack.iter().map(|(_, p)| p.clone()).collect();
        leaves.entry(path).or_default().push(trimmed.to_string());
      }
    }
    leaves
  }

  #[test]
  fn test_lmul_codes() {
    let codes: Vec<i64> = Lmul::ALL.iter().map(|l| l.code()).collect();
    assert_eq!(codes, vec![-8, -4, -2, 1, 2, 4, 8]);
    assert_eq!(Lmul::from_code(-2), Some(Lmul::Mf2));
    assert_eq!(Lmul::from_code(3), None);
    assert_eq!(Lmul::M4.to_string(), "m4");
  }

  #[test]
  fn test_vsetvli_is_exhaustive() {
    let code = render(|w| VsetvlTableGenerator::new().write_vsetvli(w));
    let leaves = leaves_by_path(&code);

    assert_eq!(leaves.len(), Lmul::ALL.len() * SEWS.len());
    for lmul in Lmul::ALL {
      for sew in SEWS {
        let path = vec![lmul.code().to_string(), sew.to_string()];
        assert_eq!(
          leaves[&path],
          vec![Avl::Runtime.set_vl_asm(sew, lmul)],
          "lmul {} sew {}",
          lmul,
          sew
        );
      }
    }
    assert_eq!(code.matches("_ => panic!(\"Abort\"),").count(), 1 + Lmul::ALL.len());
  }

  #[test]
  fn test_vsetivli_is_exhaustive() {
    let code = render(|w| VsetvlTableGenerator::new().write_vsetivli(w));
    let leaves = leaves_by_path(&code);

    assert_eq!(leaves.len(), 32 * Lmul::ALL.len() * SEWS.len());
    for avl in 0..=MAX_IMMEDIATE_AVL {
      for lmul in Lmul::ALL {
        for sew in SEWS {
          let path = vec![avl.to_string(), lmul.code().to_string(), sew.to_string()];
          assert_eq!(leaves[&path], vec![Avl::Immediate(avl).set_vl_asm(sew, lmul)]);
        }
      }
    }
    assert_eq!(
      code.matches("_ => panic!(\"Abort\"),").count(),
      1 + 32 + 32 * Lmul::ALL.len()
    );
  }

  #[test]
  fn test_vsetvli_layout() {
    let code = render(|w| VsetvlTableGenerator::new().write_vsetvli(w));
    let expected_head = "fn vsetvli(avl: u64, sew: u64, lmul: i64) -> u64 {
  unsafe {
    let mut vl: u64;
    match lmul {
      -8 => match sew {
        8 => {
          rvv_asm!(\"mv t1, {0}\", \"vsetvli t0, t1, e8, mf8\", \"mv {1}, t0\", in (reg) avl, out (reg) vl);
          vl
        }
";
    assert!(code.starts_with(expected_head), "{}", code);
    assert!(code.ends_with("      _ => panic!(\"Abort\"),\n    }\n  }\n}\n"));
  }

  #[test]
  fn test_immediate_asm() {
    assert_eq!(
      Avl::Immediate(31).set_vl_asm(1024, Lmul::M8),
      "rvv_asm!(\"vsetivli t0, 31, e1024, m8\", \"mv {0}, t0\", out (reg) vl);"
    );
  }

  #[test]
  fn test_generate_contains_both_functions() {
    let code = VsetvlTableGenerator::new().generate(4).unwrap();
    assert!(code.starts_with("fn vsetvli("));
    assert!(code.contains("}\n\nfn vsetivli("));
    assert!(code.contains("\n    unsafe {\n"));
  }
}
