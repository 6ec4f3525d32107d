use std::io::Write;

use crate::error::Result;

/// Text emitted for a dispatch arm that must never be taken
pub const UNREACHABLE_ARM: &str = "_ => panic!(\"Abort\"),";

/// Leading whitespace for nesting `depth` with `unit` spaces per level
pub fn indentation(depth: usize, unit: usize) -> String {
  " ".repeat(depth * unit)
}

/// A writer for generating Rust source with tracked nesting depth
pub struct CodeWriter<W: Write> {
  /// The underlying writer
  writer: W,
  /// Current nesting depth
  indent_level: usize,
  /// Number of spaces per nesting level
  indent_size: usize,
}

impl<W: Write> CodeWriter<W> {
  /// Create a new CodeWriter indenting by two spaces
  pub fn new(writer: W) -> Self {
    Self::with_options(writer, 2)
  }

  /// Create a new CodeWriter with a custom indentation unit
  pub fn with_options(writer: W, indent_size: usize) -> Self {
    Self {
      writer,
      indent_level: 0,
      indent_size,
    }
  }

  pub fn indent_size(&self) -> usize {
    self.indent_size
  }

  /// Increase the nesting depth
  pub fn indent(&mut self) {
    self.indent_level += 1;
  }

  /// Decrease the nesting depth
  pub fn dedent(&mut self) {
    if self.indent_level > 0 {
      self.indent_level -= 1;
    }
  }

  pub fn indent_level(&self) -> usize {
    self.indent_level
  }

  /// Write each line of `content` at the current depth, ending with a newline
  ///
  /// Empty lines are written without trailing whitespace.
  pub fn writeln(&mut self, content: &str) -> Result<()> {
    let indent = indentation(self.indent_level, self.indent_size);

    if content.is_empty() {
      return self.newline();
    }
    for line in content.lines() {
      if !line.is_empty() {
        self.writer.write_all(indent.as_bytes())?;
        self.writer.write_all(line.as_bytes())?;
      }
      self.newline()?;
    }
    Ok(())
  }

  /// Write a newline
  pub fn newline(&mut self) -> Result<()> {
    self.writer.write_all(b"\n")?;
    Ok(())
  }

  /// Write `header {` and nest one level
  pub fn begin_block(&mut self, header: &str) -> Result<()> {
    if header.is_empty() {
      self.writeln("{")?;
    } else {
      self.writeln(&format!("{} {{", header))?;
    }
    self.indent();
    Ok(())
  }

  /// Leave one level and write `}` followed by `suffix`
  pub fn end_block(&mut self, suffix: &str) -> Result<()> {
    self.dedent();
    self.writeln(&format!("}}{}", suffix))
  }

  /// Begin a function definition
  pub fn begin_function(
    &mut self,
    name: &str,
    args: &[(&str, &str)],
    ret_type: Option<&str>,
  ) -> Result<()> {
    let args_formatted: Vec<String> = args
      .iter()
      .map(|(arg_name, type_name)| format!("{}: {}", arg_name, type_name))
      .collect();
    let ret = match ret_type {
      Some(ret_type) => format!(" -> {}", ret_type),
      None => String::new(),
    };

    self.begin_block(&format!("fn {}({}){}", name, args_formatted.join(", "), ret))
  }

  /// End a function definition
  pub fn end_function(&mut self) -> Result<()> {
    self.end_block("")
  }

  /// Begin `match scrutinee {`, optionally as the body of an arm
  pub fn begin_match(&mut self, pattern: Option<&str>, scrutinee: &str) -> Result<()> {
    match pattern {
      Some(pattern) => self.begin_block(&format!("{} => match {}", pattern, scrutinee)),
      None => self.begin_block(&format!("match {}", scrutinee)),
    }
  }

  /// Close a match with its catch-all arm
  pub fn end_match(&mut self, suffix: &str) -> Result<()> {
    self.writeln(UNREACHABLE_ARM)?;
    self.end_block(suffix)
  }

  /// Begin a block-bodied match arm
  pub fn begin_arm(&mut self, pattern: &str) -> Result<()> {
    self.begin_block(&format!("{} =>", pattern))
  }

  /// Write a single-line match arm
  pub fn write_arm(&mut self, pattern: &str, body: &str) -> Result<()> {
    self.writeln(&format!("{} => {},", pattern, body))
  }

  /// Flush the underlying writer
  pub fn flush(&mut self) -> Result<()> {
    self.writer.flush()?;
    Ok(())
  }

  /// Give back the underlying writer
  pub fn into_inner(self) -> W {
    self.writer
  }
}
