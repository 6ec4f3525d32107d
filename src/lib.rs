// Template expansion and dispatch-table generation for the RVV test cases

mod code_writer;
mod config;
mod coverage;
mod error;
mod immediate;
mod logging;
mod random_data;
mod region;
mod rewriter;
mod vsetvl;
mod width;

pub use code_writer::{indentation, CodeWriter, UNREACHABLE_ARM};
pub use config::{
  ExpandConfig, MarkerPair, WidthFamily, WidthFamilyTable, DEFAULT_BEGIN_MARKER,
  DEFAULT_END_MARKER, DEFAULT_ROOT,
};
pub use coverage::{
  covered_instructions, listed_instructions, missing_instructions,
  missing_instructions_in_files, COVERED_MARKER,
};
pub use error::{Result, RvvGenError};
pub use immediate::{ImmediateTableGenerator, IMM_PLACEHOLDER};
pub use logging::init_logging;
pub use random_data::{generate_data_table, random_bytes, write_data_table, RANDOM_DATA_LEN};
pub use region::{line_number, Region, RegionScanner};
pub use rewriter::{Diagnostic, FileReport, Rewrite, Rewriter, RunSummary};
pub use vsetvl::{Avl, Lmul, VsetvlTableGenerator, MAX_IMMEDIATE_AVL, SEWS};
pub use width::{declared_base_width, instantiate, to_placeholders, Placeholder, WidthExpander};
