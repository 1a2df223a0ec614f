//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use mydayics_core::{TimeframeError, TimeframeMode, parse_date};

/// mydayics - Export your MyDay timetable to an iCalendar file
#[derive(Debug, Parser)]
#[command(name = "mydayics")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "MYDAYICS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    // --- Fetch flags ---
    /// Bearer token copied from the MyDay web app (with or without "Bearer ")
    #[arg(long, env = "MYDAY_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Timeframe to fetch (defaults to custom when --from/--to are given, month otherwise)
    #[arg(long, short, value_enum, global = true)]
    pub timeframe: Option<TimeframeArg>,

    /// First day of a custom range (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub from: Option<String>,

    /// Day after the last day of a custom range (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub to: Option<String>,

    /// Length of the semester timeframe in days
    #[arg(long, global = true)]
    pub semester_days: Option<i64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Resolves the timeframe flags into a [`TimeframeMode`].
    ///
    /// `default_semester_days` applies when `--semester-days` is not given.
    pub fn timeframe_mode(
        &self,
        default_semester_days: i64,
    ) -> Result<TimeframeMode, TimeframeError> {
        let selected = self.timeframe.unwrap_or(if self.from.is_some() || self.to.is_some() {
            TimeframeArg::Custom
        } else {
            TimeframeArg::Month
        });

        match selected {
            TimeframeArg::Month => Ok(TimeframeMode::CurrentMonth),
            TimeframeArg::Semester => TimeframeMode::semester_of_days(
                self.semester_days.unwrap_or(default_semester_days),
            ),
            TimeframeArg::Custom => {
                let (Some(from), Some(to)) = (self.from.as_deref(), self.to.as_deref()) else {
                    return Err(TimeframeError::MissingBound);
                };
                Ok(TimeframeMode::CustomRange(parse_date(from)?, parse_date(to)?))
            }
        }
    }
}

/// Timeframe choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimeframeArg {
    /// The current calendar month
    Month,
    /// From now for the semester length
    Semester,
    /// Between --from and --to
    Custom,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch events and write them to an .ics file (default)
    Export {
        /// Output file
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Fetch events and print them without writing a file
    Preview {
        /// Maximum subject length (truncated with ellipsis)
        #[arg(long, default_value_t = 60)]
        max_subject_length: usize,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
