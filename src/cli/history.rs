use paboard::Config;
use tracing::instrument;

/// Command arguments for `pab history`.
#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Number of lines to show
    #[arg(long, default_value_t = 20)]
    tail: usize,
}

impl Command {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let lines = super::activity_log(config).tail(self.tail)?;
        if lines.is_empty() {
            println!("No activity recorded yet.");
        } else {
            for line in lines {
                println!("{line}");
            }
        }
        Ok(())
    }
}
