//! File Round-Trip
//!
//! Reads a workflow file, applies the conversion rules, and overwrites the
//! file in place. The overwrite is the program's only side effect; a file
//! with no matching invocations is rewritten with identical content.

use std::fs;
use std::io;

use log::{debug, info};
use thiserror::Error;

use crate::rewrite::{RewriteStats, RuleSet};

/// Errors from the single read/rewrite/write cycle.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The workflow file could not be read.
    #[error("failed to read workflow file '{path}': {source}. Check that the file exists and is readable.")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The rewritten text could not be written back.
    #[error("failed to write workflow file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Reads and rewrites a workflow file without writing the result back.
///
/// Returns the transformed text and the per-rule counters. Used for dry-run
/// previews; [`convert_file`] performs the same pass and then overwrites.
pub fn preview_file(path: &str, rules: &RuleSet) -> Result<(String, RewriteStats), ConvertError> {
    let content = fs::read_to_string(path).map_err(|e| ConvertError::Read {
        path: path.to_string(),
        source: e,
    })?;

    debug!("Workflow text loaded ({} bytes)", content.len());

    Ok(rules.apply(&content))
}

/// Applies the rule set to a workflow file, overwriting it in place.
///
/// # Arguments
///
/// * `path` - Path to the workflow file
/// * `rules` - The conversion rules to apply
///
/// # Returns
///
/// * `Ok(RewriteStats)` - The file was rewritten; counters report how many
///   invocations each rule converted (all zero when nothing matched)
/// * `Err` - The file could not be read or written
///
/// # Example
///
/// ```rust,no_run
/// use wizflow::convert::convert_file;
/// use wizflow::rewrite::RuleSet;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let stats = convert_file(".github/workflows/scan.yml", &RuleSet::new())?;
///     println!("Rewrote {} invocations", stats.total());
///     Ok(())
/// }
/// ```
pub fn convert_file(path: &str, rules: &RuleSet) -> Result<RewriteStats, ConvertError> {
    let (converted, stats) = preview_file(path, rules)?;

    fs::write(path, &converted).map_err(|e| ConvertError::Write {
        path: path.to_string(),
        source: e,
    })?;

    info!("Rewrote {} invocation(s) in {}", stats.total(), path);
    Ok(stats)
}
