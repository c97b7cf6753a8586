use clap::{Parser, ValueEnum};
use paboard::{
    domain::format_date,
    export::{row, COLUMNS},
    Config, PaRecord, Status,
};
use tracing::instrument;

use super::terminal::{is_narrow, Colorize};

/// Command arguments for `pab list`.
#[derive(Debug, Parser, Default)]
#[command(about = "List board records, newest first")]
pub struct Command {
    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format rows for scripting
    #[arg(long)]
    quiet: bool,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Command {
    #[instrument(level = "debug", skip(self, config))]
    pub async fn run(self, config: &Config) -> anyhow::Result<()> {
        let board = super::open_board(config).await?;
        let records = board.snapshot().await?;

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
            OutputFormat::Table => render(&records, config.due_soon_days(), self.quiet),
        }
        Ok(())
    }
}

/// Renders the board, choosing the layout by terminal width.
pub(super) fn render(records: &[PaRecord], due_soon_days: i64, quiet: bool) {
    if records.is_empty() {
        println!("No records on the board yet. Create one with 'pab add'.");
        return;
    }

    if is_narrow() {
        render_stacked(records, due_soon_days);
        return;
    }

    let rows: Vec<[String; 14]> = records.iter().map(row).collect();
    let widths = column_widths(&rows);

    if !quiet {
        for (header, width) in COLUMNS.iter().zip(&widths) {
            print!("{header:<width$}  ");
        }
        println!();
        for width in &widths {
            print!("{:-<width$}  ", "");
        }
        println!();
    }

    for (record, cells) in records.iter().zip(&rows) {
        for (column, (cell, width)) in cells.iter().zip(&widths).enumerate() {
            let padded = format!("{cell:<width$}");
            print!("{}  ", paint(record, column, padded, due_soon_days));
        }
        println!();
    }
}

/// Stacked output for narrow terminals.
fn render_stacked(records: &[PaRecord], due_soon_days: i64) {
    for record in records {
        let days = paint(
            record,
            DAYS_COLUMN,
            record.days_remaining.to_string(),
            due_soon_days,
        );
        println!(
            "{} {} – due {} ({days} days) {}",
            record.ticket,
            record.city,
            format_date(record.due_on),
            status_style(&record.status, record.status.to_string()),
        );
    }
}

const DAYS_COLUMN: usize = 10;
const STATUS_COLUMN: usize = 11;

fn paint(record: &PaRecord, column: usize, text: String, due_soon_days: i64) -> String {
    match column {
        DAYS_COLUMN if !record.status.is_done() => {
            if record.days_remaining <= 0 {
                text.danger()
            } else if record.days_remaining <= due_soon_days {
                text.warning()
            } else {
                text
            }
        }
        STATUS_COLUMN => status_style(&record.status, text),
        _ => text,
    }
}

fn status_style(status: &Status, text: String) -> String {
    match status {
        Status::Open => text.info(),
        Status::Analysis => text.warning(),
        Status::Done => text.success(),
        Status::Other(_) => text,
    }
}

fn column_widths(rows: &[[String; 14]]) -> [usize; 14] {
    let mut widths = COLUMNS.map(str::len);
    for cells in rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.len());
        }
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::column_widths;
    use paboard::export::COLUMNS;

    #[test]
    fn widths_never_shrink_below_the_headers() {
        let widths = column_widths(&[]);
        assert_eq!(widths, COLUMNS.map(str::len));
    }

    #[test]
    fn widths_grow_to_the_longest_cell() {
        let mut cells = COLUMNS.map(str::to_owned);
        cells[0] = "a-very-long-ticket-identifier".to_owned();

        let widths = column_widths(&[cells]);
        assert_eq!(widths[0], "a-very-long-ticket-identifier".len());
        assert_eq!(widths[1], COLUMNS[1].len());
    }
}
