use std::path::PathBuf;

mod add;
mod delete;
mod edit;
mod export;
mod form;
mod history;
mod init;
mod list;
mod sweep;
mod terminal;
mod watch;

use chrono::NaiveDate;
use clap::ArgAction;
use paboard::{ActivityLog, Board, Config, Credentials};

/// Parse a date in the board's day/month/year form.
///
/// This is a CLI boundary function; ISO (year-month-day) input is also
/// accepted for convenience.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .map_err(|e| format!("{e}"))
}

/// Today's date in the local calendar, the reference point for every
/// days-remaining computation.
fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Opens the board described by the configuration.
///
/// A missing credential file or an unreachable service is fatal for the
/// invoking command; nothing else is attempted.
async fn open_board(config: &Config) -> anyhow::Result<Board> {
    let credentials = Credentials::load(config.credentials_path())?;
    let board = Board::connect(&credentials, config.collection()).await?;
    Ok(board)
}

fn activity_log(config: &Config) -> ActivityLog {
    ActivityLog::new(config.history_path().to_path_buf())
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the board configuration file
    #[arg(short, long, default_value = "pab.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let command = self
            .command
            .unwrap_or_else(|| Command::List(list::Command::default()));

        // `init` runs before any configuration exists; everything else
        // loads the configuration first.
        match command {
            Command::Init(command) => command.run(&self.config),
            command => {
                let config =
                    Config::load_or_default(&self.config).map_err(anyhow::Error::msg)?;
                command.run(config).await
            }
        }
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            //.pretty()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// List the board records, newest first (default)
    List(list::Command),

    /// Add a new record to the board
    Add(add::Command),

    /// Edit an existing record by identifier
    Edit(edit::Command),

    /// Delete records by identifier
    Delete(delete::Command),

    /// Recompute stored deadlines and warn about overdue records
    Sweep(sweep::Command),

    /// Export the board to a CSV file
    Export(export::Command),

    /// Follow the board live, re-rendering on every remote change
    Watch(watch::Command),

    /// Show the activity history
    History(history::Command),

    /// Write a default configuration file and credential template
    Init(init::Command),
}

impl Command {
    async fn run(self, config: Config) -> anyhow::Result<()> {
        match self {
            Self::List(command) => command.run(&config).await,
            Self::Add(command) => command.run(&config).await,
            Self::Edit(command) => command.run(&config).await,
            Self::Delete(command) => command.run(&config).await,
            Self::Sweep(command) => command.run(&config).await,
            Self::Export(command) => command.run(&config).await,
            Self::Watch(command) => command.run(&config).await,
            Self::History(command) => command.run(&config),
            Self::Init(_) => unreachable!("init is dispatched before configuration is loaded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_date;
    use chrono::NaiveDate;

    #[test]
    fn dates_parse_day_first() {
        assert_eq!(
            parse_date("05/02/2024"),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 5).unwrap())
        );
    }

    #[test]
    fn iso_dates_are_accepted_too() {
        assert_eq!(
            parse_date("2024-02-05"),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 5).unwrap())
        );
    }

    #[test]
    fn nonsense_dates_are_rejected() {
        assert!(parse_date("40/40/2024").is_err());
        assert!(parse_date("soon").is_err());
    }
}
