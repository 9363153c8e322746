//! wizflow CLI Entry Point
//!
//! Rewrites the `wizcli` scan invocations in a CI workflow file into
//! containerized `docker run` invocations, in place.
//!
//! # Usage
//!
//! ```bash
//! # Rewrite a workflow file in place
//! wizflow .github/workflows/scan.yml
//!
//! # Preview the rewritten text without overwriting
//! wizflow .github/workflows/scan.yml --dry-run
//!
//! # With debug logging
//! wizflow .github/workflows/scan.yml --verbose
//! ```

use std::env;
use std::process::ExitCode;

use colored::Colorize;
use log::info;

use wizflow::convert::{convert_file, preview_file};
use wizflow::rewrite::RuleSet;
use wizflow::{APP_NAME, VERSION};

/// Command-line configuration parsed from arguments.
#[derive(Debug)]
struct Config {
    workflow_path: String,
    dry_run: bool,
    verbose: bool,
}

/// Configures the logging system with appropriate formatting.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Prints the application banner with version information.
fn print_banner() {
    println!();
    println!("{} v{}", APP_NAME, VERSION);
    println!("CI Workflow Scan Containerizer");
    println!();
}

/// Prints usage information.
fn print_usage() {
    println!("Usage: wizflow [OPTIONS] <WORKFLOW_FILE>");
    println!();
    println!("Arguments:");
    println!("  <WORKFLOW_FILE>     Workflow file to rewrite in place");
    println!();
    println!("Options:");
    println!("  --dry-run           Print the rewritten text without overwriting");
    println!("  --verbose           Enable debug logging");
    println!("  --help              Show this help message");
    println!("  --version           Show version information");
    println!();
    println!("Examples:");
    println!("  wizflow .github/workflows/scan.yml");
    println!("  wizflow .github/workflows/scan.yml --dry-run");
}

/// Parses command-line arguments into a Config struct.
fn parse_arguments(args: &[String]) -> Result<Config, String> {
    let mut workflow_path = None;
    let mut dry_run = false;
    let mut verbose = false;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("{} {}", APP_NAME, VERSION);
                std::process::exit(0);
            }
            "--dry-run" => {
                dry_run = true;
            }
            "--verbose" | "-v" => {
                verbose = true;
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ => {
                if workflow_path.is_some() {
                    return Err(format!("Unexpected argument: {}", arg));
                }
                workflow_path = Some(arg.clone());
            }
        }
    }

    let workflow_path =
        workflow_path.ok_or_else(|| "Missing required <WORKFLOW_FILE> argument".to_string())?;

    Ok(Config {
        workflow_path,
        dry_run,
        verbose,
    })
}

/// Main application entry point.
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let config = parse_arguments(&args).map_err(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        print_usage();
        e
    })?;

    // Setup logging
    setup_logging(config.verbose);

    let rules = RuleSet::new();

    // Preview mode: rewritten text goes to stdout, the file stays untouched
    if config.dry_run {
        let (converted, stats) = preview_file(&config.workflow_path, &rules)?;
        print!("{}", converted);
        info!(
            "Dry run: {} invocation(s) would be rewritten in {}",
            stats.total(),
            config.workflow_path
        );
        return Ok(());
    }

    print_banner();

    let stats = convert_file(&config.workflow_path, &rules)?;

    println!(
        "{} {} ({} invocation(s) rewritten)",
        "Converted".green().bold(),
        config.workflow_path,
        stats.total()
    );

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("wizflow")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_arguments_missing_file() {
        let result = parse_arguments(&args(&[]));

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("WORKFLOW_FILE"));
    }

    #[test]
    fn test_parse_arguments_workflow_file() {
        let config = parse_arguments(&args(&["scan.yml"])).unwrap();

        assert_eq!(config.workflow_path, "scan.yml");
        assert!(!config.dry_run);
        assert!(!config.verbose);
    }

    #[test]
    fn test_parse_arguments_flags() {
        let config = parse_arguments(&args(&["scan.yml", "--dry-run", "--verbose"])).unwrap();

        assert_eq!(config.workflow_path, "scan.yml");
        assert!(config.dry_run);
        assert!(config.verbose);
    }

    #[test]
    fn test_parse_arguments_unknown_option() {
        let result = parse_arguments(&args(&["--frobnicate", "scan.yml"]));

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("--frobnicate"));
    }

    #[test]
    fn test_parse_arguments_extra_positional() {
        let result = parse_arguments(&args(&["scan.yml", "other.yml"]));

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("other.yml"));
    }
}
