//! Rule parsing and normalization.
//!
//! A rule file is UTF-8 text with an optional leading YAML frontmatter block
//! delimited by `---` lines. Tier comes from the scanner, never from content.

pub mod frontmatter;
pub mod parser;
pub mod types;

pub use parser::{parse_content, parse_rule};
pub use types::{Frontmatter, Rule};
