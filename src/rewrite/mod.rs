//! Workflow Rewrite Module
//!
//! Provides the pattern rules that convert direct `wizcli` invocations in
//! CI workflow text into containerized `docker run` equivalents.
//!
//! # Structure
//!
//! - [`block`]: Invocation block extent detection (configurable boundary)
//! - [`paths`]: Mount-point redirection for scan path parameters
//! - [`rules`]: The four conversion rules and their rewrite counters

pub mod block;
pub mod paths;
pub mod rules;

pub use block::BlockBoundary;
pub use paths::MOUNT_POINT;
pub use rules::{RewriteStats, RuleSet};
