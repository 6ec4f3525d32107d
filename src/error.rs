use thiserror::Error;

/// Errors that can occur while expanding templates or generating tables
#[derive(Error, Debug)]
pub enum RvvGenError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("invalid base width: '{value}' (expected one of the configured bases)")]
  InvalidBaseWidth { value: String },

  #[error("width {width} has no half, double or predecessor in u32")]
  WidthOverflow { width: u32 },

  #[error("template has no '=>' after its base width")]
  MissingBaseWidth,

  #[error("region begin marker at line {line} has no end marker")]
  UnterminatedRegion { line: usize },

  #[error("Regex error: {0}")]
  Regex(#[from] regex::Error),

  #[error("Other error: {0}")]
  Other(#[from] anyhow::Error),
}

/// Result type for template expansion and table generation
pub type Result<T> = std::result::Result<T, RvvGenError>;
