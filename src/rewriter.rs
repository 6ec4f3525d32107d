use std::fmt;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info, warn};

use crate::config::ExpandConfig;
use crate::error::{Result, RvvGenError};
use crate::region::RegionScanner;
use crate::width::WidthExpander;

/// A region that could not be expanded and was left as is
#[derive(Debug)]
pub struct Diagnostic {
  /// 1-based line of the region's begin marker
  pub line: usize,
  pub error: RvvGenError,
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}  {}", self.line, self.error)
  }
}

/// Result of rewriting one source text
#[derive(Debug)]
pub struct Rewrite {
  pub text: String,
  /// Whether any region was replaced
  pub changed: bool,
  pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of processing one file
#[derive(Debug)]
pub struct FileReport {
  pub path: PathBuf,
  /// The file content changed and a write back was attempted
  pub changed: bool,
  pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
  fn untouched(path: &Path) -> Self {
    Self {
      path: path.to_path_buf(),
      changed: false,
      diagnostics: Vec::new(),
    }
  }
}

/// Totals for a run over the configured root
#[derive(Debug, Default)]
pub struct RunSummary {
  pub files_visited: usize,
  pub files_rewritten: usize,
  /// Reports of files that changed or produced diagnostics
  pub reports: Vec<FileReport>,
}

/// Replaces every template region of a file with its width expansion
#[derive(Debug)]
pub struct Rewriter {
  config: ExpandConfig,
  expander: WidthExpander,
  /// Whitespace-only lines left between a closing brace and the next
  /// indented line when variants are concatenated
  blank_lines: Regex,
}

impl Rewriter {
  pub fn new(config: ExpandConfig) -> Result<Self> {
    let expander = WidthExpander::new(config.families.clone());
    let blank_lines = Regex::new(r"\}\n(?:[ \t]+\n)+ ")?;
    Ok(Self {
      config,
      expander,
      blank_lines,
    })
  }

  /// Expand all regions of `text`
  ///
  /// Regions are collected in a single scan and the output is rebuilt once
  /// from the original text, so no offset is ever invalidated.
  pub fn rewrite_text(&self, text: &str) -> Rewrite {
    let mut replacements: Vec<(Range<usize>, String)> = Vec::new();
    let mut diagnostics = Vec::new();

    for region in RegionScanner::new(text, &self.config.markers) {
      let region = match region {
        Ok(region) => region,
        Err(error) => {
          let line = match error {
            RvvGenError::UnterminatedRegion { line } => line,
            _ => 0,
          };
          diagnostics.push(Diagnostic { line, error });
          continue;
        }
      };

      match self.expander.expand(region.template) {
        Ok(expanded) => {
          if expanded != text[region.span.clone()] {
            replacements.push((region.span, expanded));
          }
        }
        Err(error) => diagnostics.push(Diagnostic {
          line: region.line,
          error,
        }),
      }
    }

    if replacements.is_empty() {
      return Rewrite {
        text: text.to_string(),
        changed: false,
        diagnostics,
      };
    }

    let mut rebuilt = String::with_capacity(text.len() * 4);
    let mut inserted = Vec::with_capacity(replacements.len());
    let mut cursor = 0;
    for (span, expanded) in &replacements {
      rebuilt.push_str(&text[cursor..span.start]);
      inserted.push(rebuilt.len()..rebuilt.len() + expanded.len());
      rebuilt.push_str(expanded);
      cursor = span.end;
    }
    rebuilt.push_str(&text[cursor..]);

    Rewrite {
      text: self.collapse_blank_lines(&rebuilt, &inserted),
      changed: true,
      diagnostics,
    }
  }

  /// Drop whitespace-only lines that concatenation leaves after a `}` line
  ///
  /// Only runs touching one of the `inserted` ranges are collapsed, which
  /// covers both seams of every expansion; text between regions is kept.
  pub fn collapse_blank_lines(&self, text: &str, inserted: &[Range<usize>]) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut cursor = 0;
    for run in self.blank_lines.find_iter(text) {
      let touches_insert = inserted
        .iter()
        .any(|range| run.start() < range.end && range.start < run.end());
      if touches_insert {
        collapsed.push_str(&text[cursor..run.start()]);
        collapsed.push_str("}\n ");
        cursor = run.end();
      }
    }
    collapsed.push_str(&text[cursor..]);
    collapsed
  }

  /// Rewrite one file in place, writing only when its content changed
  ///
  /// Unreadable files are treated as absent and failed writes as skipped.
  pub fn rewrite_file(&self, path: &Path) -> FileReport {
    let text = match fs::read_to_string(path) {
      Ok(text) => text,
      Err(e) => {
        debug!(path = %path.display(), error = %e, "Skipping unreadable file");
        return FileReport::untouched(path);
      }
    };

    let rewrite = self.rewrite_text(&text);
    if rewrite.changed {
      match fs::write(path, &rewrite.text) {
        Ok(()) => info!(path = %path.display(), "Expanded template regions"),
        Err(e) => debug!(path = %path.display(), error = %e, "Write skipped"),
      }
    }

    FileReport {
      path: path.to_path_buf(),
      changed: rewrite.changed,
      diagnostics: rewrite.diagnostics,
    }
  }

  /// Rewrite every regular file under the configured root
  pub fn run(&self) -> RunSummary {
    let mut files = Vec::new();
    find_files(&self.config.root, &mut files);
    files.sort();

    let mut summary = RunSummary::default();
    for file in &files {
      let report = self.rewrite_file(file);
      summary.files_visited += 1;
      if report.changed {
        summary.files_rewritten += 1;
      }
      if report.changed || !report.diagnostics.is_empty() {
        summary.reports.push(report);
      }
    }
    summary
  }
}

fn find_files(dir: &Path, result: &mut Vec<PathBuf>) {
  let entries = match fs::read_dir(dir) {
    Ok(entries) => entries,
    Err(e) => {
      warn!(path = %dir.display(), error = %e, "Cannot read directory");
      return;
    }
  };

  for entry in entries.flatten() {
    let path = entry.path();
    match entry.file_type() {
      Ok(file_type) if file_type.is_dir() => find_files(&path, result),
      Ok(file_type) if file_type.is_file() => result.push(path),
      _ => {}
    }
  }
}
