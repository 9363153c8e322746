//! wizflow - CI Workflow Scan Containerizer
//!
//! A command-line utility that rewrites the `wizcli` security-scan
//! invocations found in a CI workflow file into equivalent containerized
//! `docker run` invocations. Scanner credentials are injected as environment
//! variables and the working directory is bind-mounted into the container so
//! scan targets stay reachable.
//!
//! # Architecture
//!
//! The library is organized into two modules:
//!
//! - [`rewrite`]: The ordered conversion rules, block matching, and path
//!   redirection
//! - [`convert`]: The file round-trip (read, rewrite, overwrite in place)
//!
//! # Example
//!
//! ```rust,no_run
//! use wizflow::convert::convert_file;
//! use wizflow::rewrite::RuleSet;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let rules = RuleSet::new();
//!
//!     // Rewrite the workflow file in place
//!     let stats = convert_file(".github/workflows/scan.yml", &rules)?;
//!     println!("Rewrote {} invocations", stats.total());
//!     Ok(())
//! }
//! ```

pub mod convert;
pub mod rewrite;

// Re-export commonly used types
pub use convert::{convert_file, preview_file, ConvertError};
pub use rewrite::{BlockBoundary, RewriteStats, RuleSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "wizflow";
