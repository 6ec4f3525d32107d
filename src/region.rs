use std::ops::Range;

use crate::config::MarkerPair;
use crate::error::{Result, RvvGenError};

/// A marker-delimited template region in a source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region<'a> {
  /// Byte range covering the begin marker, the template and the end marker
  pub span: Range<usize>,
  /// Byte range of the template between the markers
  pub body: Range<usize>,
  /// The template text itself
  pub template: &'a str,
  /// 1-based line of the begin marker
  pub line: usize,
}

/// Scanner over the regions of a text, left to right and non-overlapping
///
/// A begin marker with no end marker after it yields
/// [`RvvGenError::UnterminatedRegion`] and the scan resumes right after that
/// begin marker. Offsets always refer to the text the scanner was built on;
/// build a new scanner to restart.
#[derive(Debug, Clone)]
pub struct RegionScanner<'a> {
  text: &'a str,
  markers: &'a MarkerPair,
  pos: usize,
}

impl<'a> RegionScanner<'a> {
  pub fn new(text: &'a str, markers: &'a MarkerPair) -> Self {
    Self {
      text,
      markers,
      pos: 0,
    }
  }
}

impl<'a> Iterator for RegionScanner<'a> {
  type Item = Result<Region<'a>>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.pos > self.text.len() || self.markers.begin.is_empty() {
      return None;
    }

    let begin = self.pos + self.text[self.pos..].find(&self.markers.begin)?;
    let body_start = begin + self.markers.begin.len();

    match self.text[body_start..].find(&self.markers.end) {
      Some(offset) => {
        let body_end = body_start + offset;
        let span_end = body_end + self.markers.end.len();
        self.pos = span_end;
        Some(Ok(Region {
          span: begin..span_end,
          body: body_start..body_end,
          template: &self.text[body_start..body_end],
          line: line_number(self.text, begin),
        }))
      }
      None => {
        self.pos = body_start;
        Some(Err(RvvGenError::UnterminatedRegion {
          line: line_number(self.text, begin),
        }))
      }
    }
  }
}

/// 1-based line number of the byte at `offset`
pub fn line_number(text: &str, offset: usize) -> usize {
  let end = offset.min(text.len());
  1 + text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count()
}
