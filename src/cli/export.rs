use std::path::PathBuf;

use paboard::Config;
use tracing::instrument;

use crate::cli::terminal::Colorize;

/// Command arguments for `pab export`.
#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Destination file
    path: PathBuf,

    /// Overwrite the destination if it already exists
    #[arg(long, short)]
    force: bool,
}

impl Command {
    #[instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    pub async fn run(self, config: &Config) -> anyhow::Result<()> {
        if self.path.exists() && !self.force {
            anyhow::bail!(
                "{} already exists; pass --force to overwrite",
                self.path.display()
            );
        }

        let board = super::open_board(config).await?;
        let records = board.snapshot().await?;

        if records.is_empty() {
            println!("No records to export.");
            return Ok(());
        }

        paboard::export::export_to_path(&records, &self.path)?;

        super::activity_log(config).append(&format!(
            "Exported {} record(s) to {}",
            records.len(),
            self.path.display()
        ));
        println!(
            "{}",
            format!(
                "Wrote {} record(s) to {}",
                records.len(),
                self.path.display()
            )
            .success()
        );
        Ok(())
    }
}
