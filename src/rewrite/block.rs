//! Invocation Block Boundaries
//!
//! An invocation block is a command line plus its trailing parameter list,
//! delimited by indentation. A block runs from the command keyword to the
//! next sibling entry in the workflow text, or to the end of input. What
//! counts as a sibling entry depends on the indentation conventions of the
//! workflow format, so the terminating pattern is configurable rather than
//! hard-coded.

use log::debug;
use regex::Regex;

/// Line pattern ending a block under the default workflow conventions:
/// a mapping key (`run:`, `env:`, `with:`) or a dash list item (`- name: ...`)
/// at any indentation. Parameter continuations such as `--path ./src \`
/// never match.
const DEFAULT_ENTRY_PATTERN: &str = r"^[ \t]*(?:- |[\w-]+:)";

/// Decides where an invocation block ends.
///
/// The boundary holds a line-level pattern; the first subsequent line
/// matching it terminates the block. Construct with [`BlockBoundary::new`]
/// for the default conventions or [`BlockBoundary::with_pattern`] for a
/// workflow family with different sibling-entry syntax.
///
/// # Example
///
/// ```
/// use wizflow::rewrite::BlockBoundary;
///
/// let boundary = BlockBoundary::new();
/// assert!(boundary.is_entry("      - name: Next step"));
/// assert!(boundary.is_entry("        env:"));
/// assert!(!boundary.is_entry("            --path ./src \\"));
/// ```
pub struct BlockBoundary {
    entry: Regex,
}

impl BlockBoundary {
    /// Creates a boundary using the default sibling-entry pattern.
    pub fn new() -> Self {
        Self {
            entry: Regex::new(DEFAULT_ENTRY_PATTERN).expect("default entry pattern is valid"),
        }
    }

    /// Creates a boundary from a custom line-level pattern.
    ///
    /// The pattern is matched against each line following a command keyword;
    /// the first matching line ends the block.
    pub fn with_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            entry: Regex::new(pattern)?,
        })
    }

    /// Returns true if the line starts a new sibling entry.
    pub fn is_entry(&self, line: &str) -> bool {
        self.entry.is_match(line)
    }

    /// Returns the byte offset at which the block containing `from` ends.
    ///
    /// Scans forward line by line from `from` (a position inside the command
    /// line). The block ends just before the newline that precedes the first
    /// sibling entry, or at the end of input if no entry follows.
    pub fn block_end(&self, content: &str, from: usize) -> usize {
        let mut line_end = match content[from..].find('\n') {
            Some(offset) => from + offset,
            None => return content.len(),
        };

        loop {
            let line_start = line_end + 1;
            if line_start >= content.len() {
                return content.len();
            }

            let next_end = content[line_start..]
                .find('\n')
                .map(|offset| line_start + offset)
                .unwrap_or(content.len());

            let line = &content[line_start..next_end];
            if self.is_entry(line) {
                debug!("Block ends before entry line: {:?}", line);
                return line_end;
            }

            line_end = next_end;
        }
    }
}

impl Default for BlockBoundary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_mapping_key() {
        let boundary = BlockBoundary::new();
        assert!(boundary.is_entry("env:"));
        assert!(boundary.is_entry("        run: |"));
        assert!(boundary.is_entry("  artifacts:"));
        assert!(boundary.is_entry("      runs-on: ubuntu-latest"));
    }

    #[test]
    fn test_entry_list_item() {
        let boundary = BlockBoundary::new();
        assert!(boundary.is_entry("      - name: Next step"));
        assert!(boundary.is_entry("- checkout"));
    }

    #[test]
    fn test_entry_rejects_parameter_continuations() {
        let boundary = BlockBoundary::new();
        assert!(!boundary.is_entry("            --path ./taskflow-app/src \\"));
        assert!(!boundary.is_entry("            --output result.json"));
        assert!(!boundary.is_entry("          wizcli dir scan --path ./src"));
    }

    #[test]
    fn test_block_end_stops_before_entry() {
        let boundary = BlockBoundary::new();
        let content = "          wizcli dir scan --path ./src\n      - name: Next\n";
        let from = content.find("scan").unwrap() + "scan".len();

        let end = boundary.block_end(content, from);
        assert_eq!(&content[from..end], " --path ./src");
    }

    #[test]
    fn test_block_end_spans_continuation_lines() {
        let boundary = BlockBoundary::new();
        let content = "          wizcli dir scan \\\n            --path ./src \\\n            --path ./scripts\n        env:\n";
        let from = content.find("scan").unwrap() + "scan".len();

        let end = boundary.block_end(content, from);
        assert_eq!(
            &content[from..end],
            " \\\n            --path ./src \\\n            --path ./scripts"
        );
    }

    #[test]
    fn test_block_end_reaches_end_of_input() {
        let boundary = BlockBoundary::new();
        let content = "          wizcli dir scan --path ./src";
        let from = content.find("scan").unwrap() + "scan".len();

        assert_eq!(boundary.block_end(content, from), content.len());
    }

    #[test]
    fn test_block_end_includes_trailing_newline() {
        let boundary = BlockBoundary::new();
        let content = "          wizcli dir scan --path ./src\n";
        let from = content.find("scan").unwrap() + "scan".len();

        assert_eq!(boundary.block_end(content, from), content.len());
    }

    #[test]
    fn test_custom_pattern() {
        let boundary = BlockBoundary::with_pattern(r"^#").unwrap();
        let content = "wizcli dir scan --path ./src\nmore params\n# comment\n";
        let from = content.find("scan").unwrap() + "scan".len();

        let end = boundary.block_end(content, from);
        assert_eq!(&content[from..end], " --path ./src\nmore params");
    }

    #[test]
    fn test_custom_pattern_invalid() {
        assert!(BlockBoundary::with_pattern("[unclosed").is_err());
    }
}
