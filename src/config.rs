use std::path::{Path, PathBuf};

/// Default marker opening a template region
pub const DEFAULT_BEGIN_MARKER: &str = "// @RVV_CASES_BEGIN";
/// Default marker closing a template region
pub const DEFAULT_END_MARKER: &str = "// @RVV_CASES_END";
/// Default directory scanned by the expander
pub const DEFAULT_ROOT: &str = "cases/src";

/// The literal tokens delimiting a template region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPair {
  pub begin: String,
  pub end: String,
}

impl MarkerPair {
  pub fn new(begin: &str, end: &str) -> Self {
    Self {
      begin: begin.to_string(),
      end: end.to_string(),
    }
  }
}

impl Default for MarkerPair {
  fn default() -> Self {
    Self::new(DEFAULT_BEGIN_MARKER, DEFAULT_END_MARKER)
  }
}

/// Ordered element widths a template is instantiated for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthFamily {
  /// The width the template is written for
  pub base: u32,
  /// Widths in emission order, `base` among them
  pub widths: [u32; 4],
}

/// Mapping from a declared base width to its family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidthFamilyTable {
  families: Vec<WidthFamily>,
}

impl WidthFamilyTable {
  pub fn new(families: Vec<WidthFamily>) -> Self {
    Self { families }
  }

  /// Look up the family declared by `base`
  pub fn family_for(&self, base: u32) -> Option<&WidthFamily> {
    self.families.iter().find(|f| f.base == base)
  }
}

impl Default for WidthFamilyTable {
  fn default() -> Self {
    Self::new(vec![
      WidthFamily {
        base: 64,
        widths: [8, 16, 32, 64],
      },
      WidthFamily {
        base: 256,
        widths: [128, 256, 512, 1024],
      },
    ])
  }
}

/// Everything the template expander needs to run over a source tree
#[derive(Debug, Clone)]
pub struct ExpandConfig {
  /// Directory walked recursively for candidate files
  pub root: PathBuf,
  pub markers: MarkerPair,
  pub families: WidthFamilyTable,
}

impl ExpandConfig {
  pub fn new(root: &Path) -> Self {
    Self {
      root: root.to_path_buf(),
      ..Self::default()
    }
  }

  pub fn with_markers(mut self, markers: MarkerPair) -> Self {
    self.markers = markers;
    self
  }

  pub fn with_families(mut self, families: WidthFamilyTable) -> Self {
    self.families = families;
    self
  }
}

impl Default for ExpandConfig {
  fn default() -> Self {
    Self {
      root: PathBuf::from(DEFAULT_ROOT),
      markers: MarkerPair::default(),
      families: WidthFamilyTable::default(),
    }
  }
}
