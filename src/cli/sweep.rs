use std::process;

use anyhow::Context;
use paboard::{plan_sweep, ActivityLog, Board, Config};
use tracing::instrument;

use crate::cli::terminal::Colorize;

/// Command arguments for `pab sweep`.
#[derive(Debug, Default, clap::Parser)]
#[command(about = "Recompute stored deadlines and warn about overdue records")]
pub struct Command {}

impl Command {
    #[instrument(level = "debug", skip_all)]
    pub async fn run(self, config: &Config) -> anyhow::Result<()> {
        let board = super::open_board(config).await?;
        let log = super::activity_log(config);

        let overdue = run_sweep(&board, &log).await?;

        // Exit non-zero when the board needs attention, so scripts can act
        // on the warning.
        if overdue.is_empty() {
            Ok(())
        } else {
            process::exit(2);
        }
    }
}

/// One reconciliation pass: recompute every stored days-remaining value,
/// persist the stale ones in a single batch, and print the aggregated
/// overdue warning. Returns the overdue tickets.
pub(super) async fn run_sweep(board: &Board, log: &ActivityLog) -> anyhow::Result<Vec<String>> {
    let records = board.snapshot().await?;
    let sweep = plan_sweep(&records, super::today());

    if sweep.updates.is_empty() {
        println!("All stored deadlines are up to date.");
    } else {
        board
            .apply_deadlines(&sweep.updates)
            .await
            .context("failed to persist recomputed deadlines")?;
        log.append(&format!(
            "Deadline sweep updated {} record(s)",
            sweep.updates.len()
        ));
        println!("Updated {} stored deadline(s).", sweep.updates.len());
    }

    if !sweep.overdue.is_empty() {
        println!();
        println!(
            "{}",
            "The following records are overdue or due today:".warning()
        );
        for ticket in &sweep.overdue {
            println!("  • {ticket}");
        }
        println!("{}", "Check the board with 'pab list'.".dim());
    }

    Ok(sweep.overdue)
}
