//! Command implementations for the CTA CLI.
//!
//! Provides subcommands for analyzing historical city temperature data
//! and for checking a live reading against the seasonal profile.

use clap::Subcommand;

pub mod analyze;
pub mod current;

#[derive(Subcommand)]
pub enum Command {
    /// Analyze historical temperature data from a CSV file
    Analyze {
        /// Path to the history CSV (timestamp, city, temperature columns)
        #[arg(short = 'f', long)]
        history_csv: String,

        /// Only analyze the named city (default: all cities)
        #[arg(short, long)]
        city: Option<String>,
    },

    /// Fetch the current temperature and classify it against the seasonal profile
    Current {
        /// Path to the history CSV (timestamp, city, temperature columns)
        #[arg(short = 'f', long)]
        history_csv: String,

        /// City to check
        #[arg(short, long)]
        city: String,

        /// OpenWeatherMap API key
        #[arg(short = 'k', long)]
        api_key: String,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Analyze { history_csv, city } => {
            analyze::run_analyze(&history_csv, city.as_deref())
        }
        Command::Current {
            history_csv,
            city,
            api_key,
        } => current::run_current(&history_csv, &city, &api_key).await,
    }
}
