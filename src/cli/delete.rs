use anyhow::Context;
use paboard::Config;
use tracing::instrument;

use crate::cli::{form, terminal::Colorize};

/// Command arguments for `pab delete`.
#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Identifiers of the records to delete
    #[arg(required = true)]
    ids: Vec<String>,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,
}

impl Command {
    #[instrument(level = "debug", skip_all, fields(count = self.ids.len()))]
    pub async fn run(self, config: &Config) -> anyhow::Result<()> {
        let board = super::open_board(config).await?;
        let records = board.snapshot().await?;

        // Resolve every identifier up front so a typo aborts the whole
        // operation before anything is deleted.
        let mut targets = Vec::with_capacity(self.ids.len());
        for id in &self.ids {
            let Some(record) = records
                .iter()
                .find(|record| record.id.as_deref() == Some(id.as_str()))
            else {
                anyhow::bail!("Record {id} not found on the board");
            };
            targets.push((id.clone(), record.ticket.clone()));
        }

        if !self.yes {
            println!("Will delete {} record(s):", targets.len());
            for (id, ticket) in &targets {
                println!("  • ticket {ticket} ({id})");
            }
            if !form::confirm("Delete from the shared board?")? {
                println!("{}", "Nothing deleted.".dim());
                return Ok(());
            }
        }

        let log = super::activity_log(config);
        for (id, ticket) in &targets {
            board
                .delete(id)
                .await
                .with_context(|| format!("failed to delete record {id}"))?;
            log.append(&format!("Record removed from the board – ticket {ticket}"));
        }

        println!(
            "{}",
            format!("Deleted {} record(s)", targets.len()).success()
        );
        Ok(())
    }
}
