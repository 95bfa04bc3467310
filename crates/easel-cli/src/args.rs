//! Command-line argument definitions for the Easel CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, output format, and logging verbosity.

use clap::Parser;
use log::LevelFilter;

/// Command-line arguments for the Easel canvas script tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input scene file
    #[arg(help = "Path to the input scene file (TOML)")]
    pub input: String,

    /// Path to the output file; the script is written to stdout when absent
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Wrap the script in a standalone HTML page
    #[arg(long)]
    pub html: bool,

    /// Fail if any statement could not be written
    #[arg(long)]
    pub strict: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["easel", "scene.toml"]).unwrap();
        assert_eq!(args.input, "scene.toml");
        assert_eq!(args.output, None);
        assert!(!args.html);
        assert!(!args.strict);
        assert_eq!(args.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_log_level_is_parsed() {
        let args =
            Args::try_parse_from(["easel", "scene.toml", "--log-level", "TRACE"]).unwrap();
        assert_eq!(args.log_level, LevelFilter::Trace);
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        let err =
            Args::try_parse_from(["easel", "scene.toml", "--log-level", "loud"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
