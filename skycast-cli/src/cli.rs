use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::app::App;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather search with history")]
pub struct Cli {
    #[arg(long, global = true, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key used for geocoding and weather.
    Configure,

    /// Look up current weather for a city once and record it in history.
    Search {
        /// City name, e.g. "London".
        city: String,

        /// ISO country code, e.g. "GB".
        country_code: String,
    },

    /// Re-run the most recently recorded search.
    Last,

    /// Print the search history, most recent first.
    History,

    /// Remove the history entry at the given position in the displayed list.
    Remove {
        /// Position as printed by `skycast history` (0 is most recent).
        index: usize,
    },

    /// Interactive session: search, re-search and prune history in a loop.
    Interactive,
}

#[derive(ValueEnum, Copy, Clone, Debug)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

fn setup_logging(level: LogLevel) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::from(level))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        setup_logging(self.log_level);

        match self.command {
            Command::Configure => App::configure(),
            Command::Search { city, country_code } => {
                let mut app = App::init()?;
                app.search(&city, &country_code).await
            }
            Command::Last => {
                let mut app = App::init()?;
                app.replay_last().await
            }
            Command::History => {
                let app = App::init()?;
                app.print_history();
                Ok(())
            }
            Command::Remove { index } => {
                let mut app = App::init()?;
                app.remove(index)
            }
            Command::Interactive => {
                let mut app = App::init()?;
                app.run_interactive().await
            }
        }
    }
}
