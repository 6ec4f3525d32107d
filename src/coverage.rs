use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::Context as AnyhowContext;

use crate::error::Result;

/// Marker of a checklist line whose instruction is both implemented and tested
pub const COVERED_MARKER: &str = "[x] [x]";

/// Instructions ticked in a checklist: the third space-separated token of
/// every line containing [`COVERED_MARKER`]
pub fn covered_instructions(text: &str) -> Vec<String> {
  text
    .lines()
    .filter(|line| !line.is_empty() && line.contains(COVERED_MARKER))
    .filter_map(|line| line.split(' ').nth(2))
    .map(String::from)
    .collect()
}

/// Instructions of a comma-separated list: the first field of every line
pub fn listed_instructions(text: &str) -> Vec<String> {
  text
    .lines()
    .filter(|line| !line.is_empty())
    .filter_map(|line| line.split(',').next())
    .map(String::from)
    .collect()
}

/// Instructions covered by `checklist` but absent from `listing`, in
/// checklist order
pub fn missing_instructions(checklist: &str, listing: &str) -> Vec<String> {
  let listed: HashSet<String> = listed_instructions(listing).into_iter().collect();
  covered_instructions(checklist)
    .into_iter()
    .filter(|name| !listed.contains(name))
    .collect()
}

pub fn missing_instructions_in_files(checklist: &Path, listing: &Path) -> Result<Vec<String>> {
  let checklist = fs::read_to_string(checklist)
    .with_context(|| format!("Failed to read file: {}", checklist.display()))?;
  let listing = fs::read_to_string(listing)
    .with_context(|| format!("Failed to read file: {}", listing.display()))?;
  Ok(missing_instructions(&checklist, &listing))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_instructions() {
    let checklist = "[x] [x] AAA extra\n[x] [x] BBB extra\n";
    let listing = "BBB,foo\n";
    assert_eq!(missing_instructions(checklist, listing), vec!["AAA"]);
  }

  #[test]
  fn test_unticked_and_short_lines_are_ignored() {
    let checklist = "[ ] [x] CCC\n\n[x] [x]\n[x] [x] DDD\n";
    assert_eq!(covered_instructions(checklist), vec!["DDD"]);
  }

  #[test]
  fn test_listing_keeps_first_field() {
    assert_eq!(listed_instructions("a,b\n\nc\n"), vec!["a", "c"]);
  }

  #[test]
  fn test_missing_instructions_in_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("1.txt");
    let b = dir.path().join("2.txt");
    fs::write(&a, "[x] [x] vadd.vv\n[x] [x] vsub.vv\n[x] [ ] vmul.vv\n").unwrap();
    fs::write(&b, "vsub.vv,done\n").unwrap();

    assert_eq!(missing_instructions_in_files(&a, &b).unwrap(), vec!["vadd.vv"]);
    assert!(missing_instructions_in_files(&dir.path().join("none"), &b).is_err());
  }
}
