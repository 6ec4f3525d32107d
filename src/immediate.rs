use std::io::Write;

use crate::code_writer::CodeWriter;
use crate::error::Result;

/// Token in an instruction template replaced by each immediate
pub const IMM_PLACEHOLDER: &str = "%imm%";

/// Emits `fn op` dispatching a runtime immediate to a `.vi` instruction
/// encoding it, under both masking modes
#[derive(Debug, Clone)]
pub struct ImmediateTableGenerator {
  template: String,
  begin: i64,
  end: i64,
}

impl ImmediateTableGenerator {
  pub fn new(template: &str, begin: i64, end: i64) -> Self {
    Self {
      template: template.to_string(),
      begin,
      end,
    }
  }

  /// Every immediate from `begin` to `end` inclusive, stepping towards `end`
  pub fn immediates(&self) -> Box<dyn Iterator<Item = i64>> {
    if self.begin <= self.end {
      Box::new(self.begin..=self.end)
    } else {
      Box::new((self.end..=self.begin).rev())
    }
  }

  /// The instruction text for one immediate
  pub fn instruction(&self, imm: i64) -> String {
    self.template.replace(IMM_PLACEHOLDER, &imm.to_string())
  }

  pub fn write<W: Write>(&self, writer: &mut CodeWriter<W>) -> Result<()> {
    writer.begin_function(
      "op",
      &[("_", "&[u8]"), ("rhs", "&[u8]"), ("mask_type", "MaskType")],
      None,
    )?;
    writer.writeln("let imm = i64::from_le_bytes(rhs.try_into().unwrap());")?;
    writer.begin_block("unsafe")?;
    writer.begin_match(None, "imm")?;

    for imm in self.immediates() {
      let instruction = self.instruction(imm);
      writer.begin_match(Some(&imm.to_string()), "mask_type")?;
      writer.write_arm(
        "MaskType::Enable",
        &format!("{{ rvv_asm!(\"{}, v0.t\"); }}", instruction),
      )?;
      writer.write_arm(
        "MaskType::Disable",
        &format!("{{ rvv_asm!(\"{}\"); }}", instruction),
      )?;
      writer.end_match(",")?;
    }

    writer.writeln("_ => { panic!(\"Abort\"); }")?;
    writer.end_block("")?;
    writer.end_block("")?;
    writer.end_function()
  }

  pub fn generate(&self, indent_size: usize) -> Result<String> {
    let mut writer = CodeWriter::with_options(Vec::new(), indent_size);
    self.write(&mut writer)?;
    let buffer = writer.into_inner();
    Ok(String::from_utf8_lossy(&buffer).into_owned())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_immediates_ascending_and_descending() {
    let immediates = |begin, end| {
      ImmediateTableGenerator::new("", begin, end)
        .immediates()
        .collect::<Vec<_>>()
    };
    assert_eq!(immediates(-2, 1), vec![-2, -1, 0, 1]);
    assert_eq!(immediates(3, 1), vec![3, 2, 1]);
    assert_eq!(immediates(7, 7), vec![7]);
  }

  #[test]
  fn test_wide_range_is_lazy() {
    let generator = ImmediateTableGenerator::new("", 0, i64::MAX);
    let mut immediates = generator.immediates();
    assert_eq!(immediates.next(), Some(0));
    assert_eq!(immediates.nth(9), Some(10));

    let generator = ImmediateTableGenerator::new("", i64::MAX, i64::MIN);
    assert_eq!(
      generator.immediates().take(2).collect::<Vec<_>>(),
      vec![i64::MAX, i64::MAX - 1]
    );
  }

  #[test]
  fn test_generate() {
    let code = ImmediateTableGenerator::new("vadd.vi v24, v8, %imm%", 0, 1)
      .generate(2)
      .unwrap();
    let expected = r#"fn op(_: &[u8], rhs: &[u8], mask_type: MaskType) {
  let imm = i64::from_le_bytes(rhs.try_into().unwrap());
  unsafe {
    match imm {
      0 => match mask_type {
        MaskType::Enable => { rvv_asm!("vadd.vi v24, v8, 0, v0.t"); },
        MaskType::Disable => { rvv_asm!("vadd.vi v24, v8, 0"); },
        _ => panic!("Abort"),
      },
      1 => match mask_type {
        MaskType::Enable => { rvv_asm!("vadd.vi v24, v8, 1, v0.t"); },
        MaskType::Disable => { rvv_asm!("vadd.vi v24, v8, 1"); },
        _ => panic!("Abort"),
      },
      _ => { panic!("Abort"); }
    }
  }
}
"#;
    assert_eq!(code, expected);
  }

  #[test]
  fn test_template_without_placeholder_is_verbatim() {
    let generator = ImmediateTableGenerator::new("vmv.v.i v8, 0", -1, -3);
    assert_eq!(generator.instruction(-2), "vmv.v.i v8, 0");
    let code = generator.generate(2).unwrap();
    assert!(code.contains("      -3 => match mask_type {\n"));
    assert!(code.find("-1 =>").unwrap() < code.find("-3 =>").unwrap());
  }
}
