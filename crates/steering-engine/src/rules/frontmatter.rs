//! Frontmatter block extraction.

const DELIMITER: &str = "---";

/// A rule file's content split at its frontmatter delimiters.
#[derive(Debug, PartialEq, Eq)]
pub enum Split<'a> {
    /// No opening delimiter: the whole content is body.
    Absent { body: &'a str },
    /// `yaml` is the text between the delimiters; `body` is everything after
    /// the closing delimiter line, verbatim.
    Present { yaml: &'a str, body: &'a str },
    /// An opening delimiter with no closing one.
    Unterminated,
}

/// Split `content` into frontmatter and body.
///
/// The first line must be exactly `---` (a UTF-8 BOM and trailing
/// whitespace are tolerated). The block ends at the next line that is
/// exactly `---`.
pub fn split(content: &str) -> Split<'_> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut lines = content.split_inclusive('\n');
    let first = match lines.next() {
        Some(line) => line,
        None => return Split::Absent { body: content },
    };
    if first.trim_end() != DELIMITER {
        return Split::Absent { body: content };
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Split::Present {
                yaml: &content[yaml_start..offset],
                body: &content[offset + line.len()..],
            };
        }
        offset += line.len();
    }
    Split::Unterminated
}
