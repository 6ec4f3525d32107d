use crate::config::{WidthFamily, WidthFamilyTable};
use crate::error::{Result, RvvGenError};

/// Symbolic stand-ins for the width-derived literals of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
  Sew,
  HalfSew,
  DoubleSew,
  SewMinusOne,
}

impl Placeholder {
  /// Substitution order: later tokens never match text already replaced
  pub const ALL: [Placeholder; 4] = [
    Placeholder::Sew,
    Placeholder::HalfSew,
    Placeholder::DoubleSew,
    Placeholder::SewMinusOne,
  ];

  pub fn token(self) -> &'static str {
    match self {
      Placeholder::Sew => "{@sew}",
      Placeholder::HalfSew => "{@sew/2}",
      Placeholder::DoubleSew => "{@sew*2}",
      Placeholder::SewMinusOne => "{@sew-1}",
    }
  }

  /// The number this placeholder stands for at element width `sew`
  pub fn value(self, sew: u32) -> Result<u32> {
    let value = match self {
      Placeholder::Sew => Some(sew),
      Placeholder::HalfSew => Some(sew / 2),
      Placeholder::DoubleSew => sew.checked_mul(2),
      Placeholder::SewMinusOne => sew.checked_sub(1),
    };
    value.ok_or(RvvGenError::WidthOverflow { width: sew })
  }
}

/// Parse the base width declared as `<numeral> =>` at the head of a template
pub fn declared_base_width(template: &str) -> Result<u32> {
  let head = match template.find("=>") {
    Some(i) => &template[..i],
    None => return Err(RvvGenError::MissingBaseWidth),
  };
  let head = head.trim();
  head.parse().map_err(|_| RvvGenError::InvalidBaseWidth {
    value: head.to_string(),
  })
}

/// Rewrite width-derived literals of `template` into placeholders
pub fn to_placeholders(template: &str, base: u32) -> Result<String> {
  Placeholder::ALL
    .iter()
    .try_fold(template.to_string(), |text, p| {
      Ok(text.replace(&p.value(base)?.to_string(), p.token()))
    })
}

/// Instantiate a placeholder template for element width `sew`
pub fn instantiate(placeholders: &str, sew: u32) -> Result<String> {
  Placeholder::ALL
    .iter()
    .try_fold(placeholders.to_string(), |text, p| {
      Ok(text.replace(p.token(), &p.value(sew)?.to_string()))
    })
}

/// Expands one template into a variant per member of its width family
#[derive(Debug, Clone, Default)]
pub struct WidthExpander {
  families: WidthFamilyTable,
}

impl WidthExpander {
  pub fn new(families: WidthFamilyTable) -> Self {
    Self { families }
  }

  /// Resolve the family a template declares
  pub fn family(&self, template: &str) -> Result<&WidthFamily> {
    let base = declared_base_width(template)?;
    self
      .families
      .family_for(base)
      .ok_or_else(|| RvvGenError::InvalidBaseWidth {
        value: base.to_string(),
      })
  }

  /// Expand `template` into its four variants, concatenated in family order
  ///
  /// The variant for the declared base width is the template verbatim, so
  /// literals that only coincide with another width's derived value survive.
  pub fn expand(&self, template: &str) -> Result<String> {
    let family = self.family(template)?;
    let placeholders = to_placeholders(template, family.base)?;

    let mut expanded = String::with_capacity(template.len() * family.widths.len());
    for &sew in &family.widths {
      if sew == family.base {
        expanded.push_str(template);
      } else {
        expanded.push_str(&instantiate(&placeholders, sew)?);
      }
    }
    Ok(expanded)
  }
}
