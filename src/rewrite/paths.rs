//! Scan Path Redirection
//!
//! Containerized scans see the working directory through a bind mount at a
//! fixed in-container path. Parameters that referred to files relative to
//! the working directory must be redirected under that mount point so the
//! scanner still finds them.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// In-container path to which the host working directory is bound.
pub const MOUNT_POINT: &str = "/scan";

/// `--path` values eligible for redirection: the two project-relative
/// prefixes the scans target.
static PATH_ARG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"--path \./(taskflow-app/|scripts)").expect("path pattern is valid")
});

/// `--output` values eligible for redirection: bare relative file names.
/// Values already containing a path separator are left alone, so redirected
/// outputs are never prefixed twice.
static OUTPUT_ARG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"--output ([^/\s,]+)").expect("output pattern is valid"));

/// `--dockerfile` values eligible for redirection.
static DOCKERFILE_ARG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"--dockerfile \./(taskflow-app/)").expect("dockerfile pattern is valid")
});

/// Redirects `--path` parameters under the mount point.
///
/// # Example
///
/// ```
/// use wizflow::rewrite::paths::redirect_scan_paths;
///
/// let params = " --path ./taskflow-app/src --path ./scripts";
/// assert_eq!(
///     redirect_scan_paths(params),
///     " --path /scan/taskflow-app/src --path /scan/scripts"
/// );
/// ```
pub fn redirect_scan_paths(params: &str) -> String {
    PATH_ARG
        .replace_all(params, |caps: &Captures| {
            format!("--path {}/{}", MOUNT_POINT, &caps[1])
        })
        .into_owned()
}

/// Redirects bare `--output` file names under the mount point.
pub fn redirect_output_path(params: &str) -> String {
    OUTPUT_ARG
        .replace_all(params, |caps: &Captures| {
            format!("--output {}/{}", MOUNT_POINT, &caps[1])
        })
        .into_owned()
}

/// Redirects `--dockerfile` parameters under the mount point.
pub fn redirect_dockerfile_path(params: &str) -> String {
    DOCKERFILE_ARG
        .replace_all(params, |caps: &Captures| {
            format!("--dockerfile {}/{}", MOUNT_POINT, &caps[1])
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_app_path() {
        let result = redirect_scan_paths(" --path ./taskflow-app/src");
        assert_eq!(result, " --path /scan/taskflow-app/src");
    }

    #[test]
    fn test_redirect_scripts_path() {
        let result = redirect_scan_paths(" --path ./scripts");
        assert_eq!(result, " --path /scan/scripts");
    }

    #[test]
    fn test_redirect_scripts_subdirectory() {
        let result = redirect_scan_paths(" --path ./scripts/deploy");
        assert_eq!(result, " --path /scan/scripts/deploy");
    }

    #[test]
    fn test_redirect_multiple_paths() {
        let result = redirect_scan_paths(" --path ./taskflow-app/backend --path ./scripts");
        assert_eq!(result, " --path /scan/taskflow-app/backend --path /scan/scripts");
    }

    #[test]
    fn test_redirect_unknown_prefix_untouched() {
        let params = " --path ./vendor/lib";
        assert_eq!(redirect_scan_paths(params), params);
    }

    #[test]
    fn test_redirect_output_bare_name() {
        let result = redirect_output_path(" --output result.json");
        assert_eq!(result, " --output /scan/result.json");
    }

    #[test]
    fn test_redirect_output_already_mounted() {
        let params = " --output /scan/result.json";
        assert_eq!(redirect_output_path(params), params);
    }

    #[test]
    fn test_redirect_output_stops_at_comma() {
        let result = redirect_output_path(" --output result.json,format=sarif");
        assert_eq!(result, " --output /scan/result.json,format=sarif");
    }

    #[test]
    fn test_redirect_dockerfile() {
        let result = redirect_dockerfile_path(" --dockerfile ./taskflow-app/backend/Dockerfile");
        assert_eq!(result, " --dockerfile /scan/taskflow-app/backend/Dockerfile");
    }

    #[test]
    fn test_redirect_dockerfile_other_location_untouched() {
        let params = " --dockerfile ./docker/Dockerfile";
        assert_eq!(redirect_dockerfile_path(params), params);
    }
}
