use paboard::{BoardEvent, Config};
use tracing::instrument;

use crate::cli::{list, sweep, terminal::Colorize};

/// Command arguments for `pab watch`.
///
/// The closest thing to the original live window: a startup deadline
/// sweep, then a table re-render on every snapshot the store pushes.
#[derive(Debug, clap::Parser)]
pub struct Command {}

impl Command {
    #[instrument(level = "debug", skip_all)]
    pub async fn run(self, config: &Config) -> anyhow::Result<()> {
        let board = super::open_board(config).await?;
        let log = super::activity_log(config);

        // Opening the board reconciles deadlines first, exactly like the
        // original application start.
        sweep::run_sweep(&board, &log).await?;

        let mut subscription = board.subscribe();
        println!();
        println!("{}", "Watching the board; Ctrl-C to stop.".dim());

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                event = subscription.next_event() => match event {
                    Some(BoardEvent::Snapshot(records)) => {
                        println!();
                        list::render(&records, config.due_soon_days(), false);
                        log.append("Synchronized with the shared board.");
                    }
                    Some(BoardEvent::Lost(error)) => return Err(error.into()),
                    None => break,
                },
            }
        }

        subscription.unsubscribe();
        println!("Stopped watching.");
        Ok(())
    }
}
