use crate::config::SETTINGS_FILE_NAME;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "buildsync")]
#[command(about = "Copy build outputs into a project folder and prune stale ones", long_about = None)]
#[command(version)]
#[command(after_help = "EXAMPLES:
    # Create buildsync.json in the current directory
    buildsync init

    # Check the settings without touching any files
    buildsync validate

    # Sync bin/Release into Assets/Plugins
    buildsync run

    # Preview what would change
    buildsync run --dry-run

    # Machine-readable output
    buildsync --settings ../game/buildsync.json run --json")]
pub struct Cli {
    /// Path to the settings file
    #[arg(long, global = true, env = "BUILDSYNC_SETTINGS", default_value = SETTINGS_FILE_NAME)]
    pub settings: PathBuf,

    /// Verbose output (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only show errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Write a default settings file
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },

    /// Load and check the settings file
    Validate,

    /// Sync build outputs into the destination
    Run {
        /// Show changes without applying them
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Output NDJSON events instead of a summary
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn json(&self) -> bool {
        matches!(self.command, Command::Run { json: true, .. })
    }

    pub fn log_level(&self) -> tracing::Level {
        if self.quiet || self.json() {
            return tracing::Level::ERROR;
        }

        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("buildsync").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_settings_path() {
        let cli = parse(&["validate"]);
        // BUILDSYNC_SETTINGS may be set in the environment running the tests
        if std::env::var_os("BUILDSYNC_SETTINGS").is_none() {
            assert_eq!(cli.settings, PathBuf::from(SETTINGS_FILE_NAME));
        }
        assert_eq!(cli.command, Command::Validate);
    }

    #[test]
    fn test_run_flags() {
        let cli = parse(&["run", "--dry-run", "--json", "--settings", "x.json"]);
        assert_eq!(cli.command, Command::Run { dry_run: true, json: true });
        assert_eq!(cli.settings, PathBuf::from("x.json"));
        assert!(cli.json());
    }

    #[test]
    fn test_init_force() {
        let cli = parse(&["init", "--force"]);
        assert_eq!(cli.command, Command::Init { force: true });
    }

    #[test]
    fn test_log_level_default() {
        assert_eq!(parse(&["run"]).log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose() {
        assert_eq!(parse(&["-v", "run"]).log_level(), tracing::Level::DEBUG);
        assert_eq!(parse(&["run", "-vv"]).log_level(), tracing::Level::TRACE);
    }

    #[test]
    fn test_log_level_quiet_and_json() {
        assert_eq!(parse(&["-q", "run"]).log_level(), tracing::Level::ERROR);
        assert_eq!(parse(&["run", "--json"]).log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["buildsync", "-q", "-v", "run"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["buildsync"]).is_err());
    }
}
