//! Conversion Rules
//!
//! The four ordered rules that rewrite direct `wizcli` invocations into
//! containerized `docker run` equivalents:
//!
//! 1. `wizcli auth` - credential-injecting container run
//! 2. `wizcli dir scan` - container run with a working-directory bind mount
//!    and redirected `--path` parameters
//! 3. `wizcli iac scan` - as above, plus `--output` redirection
//! 4. `wizcli docker scan` - as above, plus the host docker socket and
//!    `--dockerfile` redirection
//!
//! Every rule is applied to all occurrences in the document. A document with
//! no matching invocation passes through unchanged.

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::block::BlockBoundary;
use super::paths::{self, MOUNT_POINT};

/// Container image carrying the scanner CLI.
const SCANNER_IMAGE: &str = "wizcli:latest";

/// Environment injection for the scanner's client credentials.
const ENV_CLIENT_ID: &str = r#"-e WIZ_CLIENT_ID="${{ secrets.WIZ_CLIENT_ID }}""#;
const ENV_CLIENT_SECRET: &str = r#"-e WIZ_CLIENT_SECRET="${{ secrets.WIZ_CLIENT_SECRET }}""#;

/// Host docker socket passthrough, required by image scans.
const DOCKER_SOCKET_MOUNT: &str = "-v /var/run/docker.sock:/var/run/docker.sock";

/// Bind mount of the working directory at the scan mount point.
static WORKDIR_MOUNT: Lazy<String> =
    Lazy::new(|| format!(r#"--mount type=bind,src="${{PWD}}",dst={}"#, MOUNT_POINT));

/// The authentication invocation, with its fixed literal arguments.
static AUTH_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?m)^([ \t]*)wizcli auth --id "\$\{\{ secrets\.WIZ_CLIENT_ID \}\}" --secret "\$\{\{ secrets\.WIZ_CLIENT_SECRET \}\}""#,
    )
    .expect("auth pattern is valid")
});

/// Command keywords opening the three scan invocation blocks.
static DIR_SCAN_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([ \t]*)wizcli dir scan").expect("dir scan pattern is valid"));
static IAC_SCAN_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([ \t]*)wizcli iac scan").expect("iac scan pattern is valid"));
static DOCKER_SCAN_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([ \t]*)wizcli docker scan").expect("docker scan pattern is valid")
});

/// Renders a containerized invocation as backslash-continued lines.
///
/// The first line reuses the captured block indentation verbatim; every
/// continuation line is indented two spaces past it.
fn containerized(indent: &str, mounts: &[&str], subcommand: &str, params: &str) -> String {
    let mut lines = Vec::new();
    lines.push(format!("{}docker run --rm", indent));
    lines.push(format!("{}  {}", indent, ENV_CLIENT_ID));
    lines.push(format!("{}  {}", indent, ENV_CLIENT_SECRET));

    for mount in mounts {
        lines.push(format!("{}  {}", indent, mount));
    }

    lines.push(format!("{}  {} {}{}", indent, SCANNER_IMAGE, subcommand, params));
    lines.join(" \\\n")
}

/// Per-rule rewrite counters for one document pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteStats {
    /// Authentication invocations rewritten
    pub auth: usize,

    /// Directory-scan blocks rewritten
    pub dir_scan: usize,

    /// Infrastructure-scan blocks rewritten
    pub iac_scan: usize,

    /// Image-scan blocks rewritten
    pub image_scan: usize,
}

impl RewriteStats {
    /// Total invocations rewritten across all four rules.
    pub fn total(&self) -> usize {
        self.auth + self.dir_scan + self.iac_scan + self.image_scan
    }
}

/// The fixed, ordered set of conversion rules.
///
/// Rules are independent; applying the set rewrites every matching
/// invocation in the document and leaves everything else untouched.
///
/// # Example
///
/// ```
/// use wizflow::rewrite::RuleSet;
///
/// let rules = RuleSet::new();
/// let (output, stats) = rules.apply("steps:\n  - run: echo hello\n");
///
/// // No scan invocations, so the text passes through unchanged
/// assert_eq!(output, "steps:\n  - run: echo hello\n");
/// assert_eq!(stats.total(), 0);
/// ```
pub struct RuleSet {
    boundary: BlockBoundary,
}

impl RuleSet {
    /// Creates a rule set with the default block boundary.
    pub fn new() -> Self {
        Self {
            boundary: BlockBoundary::new(),
        }
    }

    /// Creates a rule set with a custom block boundary.
    pub fn with_boundary(boundary: BlockBoundary) -> Self {
        Self { boundary }
    }

    /// Applies all four rules in order and returns the rewritten text with
    /// per-rule counters.
    pub fn apply(&self, content: &str) -> (String, RewriteStats) {
        let mut stats = RewriteStats::default();

        let (content, count) = self.rewrite_auth(content);
        stats.auth = count;

        let (content, count) = self.rewrite_blocks(
            &content,
            &DIR_SCAN_START,
            &[WORKDIR_MOUNT.as_str()],
            "dir scan",
            paths::redirect_scan_paths,
        );
        stats.dir_scan = count;

        let (content, count) = self.rewrite_blocks(
            &content,
            &IAC_SCAN_START,
            &[WORKDIR_MOUNT.as_str()],
            "iac scan",
            |params| paths::redirect_output_path(&paths::redirect_scan_paths(params)),
        );
        stats.iac_scan = count;

        let (content, count) = self.rewrite_blocks(
            &content,
            &DOCKER_SCAN_START,
            &[DOCKER_SOCKET_MOUNT, WORKDIR_MOUNT.as_str()],
            "docker scan",
            |params| paths::redirect_output_path(&paths::redirect_dockerfile_path(params)),
        );
        stats.image_scan = count;

        info!(
            "Rewrote {} invocation(s): {} auth, {} dir scan, {} iac scan, {} image scan",
            stats.total(),
            stats.auth,
            stats.dir_scan,
            stats.iac_scan,
            stats.image_scan
        );

        (content, stats)
    }

    /// Rewrites every authentication invocation line.
    fn rewrite_auth(&self, content: &str) -> (String, usize) {
        let mut count = 0;
        let rewritten = AUTH_LINE.replace_all(content, |caps: &Captures| {
            count += 1;
            containerized(&caps[1], &[], "auth", "")
        });

        (rewritten.into_owned(), count)
    }

    /// Rewrites every invocation block opened by `start`.
    ///
    /// For each match, the block extends from the command keyword to the
    /// boundary; the parameter text is passed through `redirect` and
    /// re-emitted verbatim after the containerized command.
    fn rewrite_blocks(
        &self,
        content: &str,
        start: &Regex,
        mounts: &[&str],
        subcommand: &str,
        redirect: impl Fn(&str) -> String,
    ) -> (String, usize) {
        let mut rewritten = String::with_capacity(content.len());
        let mut cursor = 0;
        let mut count = 0;

        for caps in start.captures_iter(content) {
            let matched = caps.get(0).unwrap();

            // A keyword inside an already-consumed block is parameter text
            if matched.start() < cursor {
                continue;
            }

            let indent = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let end = self.boundary.block_end(content, matched.end());
            let params = redirect(&content[matched.end()..end]);

            debug!(
                "Rewriting '{}' block at byte {} ({} parameter bytes)",
                subcommand,
                matched.start(),
                end - matched.end()
            );

            rewritten.push_str(&content[cursor..matched.start()]);
            rewritten.push_str(&containerized(indent, mounts, subcommand, &params));
            cursor = end;
            count += 1;
        }

        rewritten.push_str(&content[cursor..]);
        (rewritten, count)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}
