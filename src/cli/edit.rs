use chrono::NaiveDate;
use paboard::{days_remaining, due_for, Completion, Config, PaRecord, RequirementKind};
use tracing::instrument;

use crate::cli::{form, parse_date, terminal::Colorize};

/// Command arguments for `pab edit`.
///
/// Prompts are pre-filled with the record's current values, mirroring the
/// original double-click-to-edit flow. The save is a full overwrite keyed
/// by the existing identifier, never an insert.
#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Identifier of the record to edit
    id: String,

    /// Ticket identifier
    #[arg(long)]
    ticket: Option<String>,

    /// City
    #[arg(long)]
    city: Option<String>,

    /// Base code
    #[arg(long)]
    base: Option<String>,

    /// Box reference on the map
    #[arg(long)]
    box_map: Option<String>,

    /// Box reference in the system
    #[arg(long)]
    box_system: Option<String>,

    /// Number of affected units
    #[arg(long)]
    quantity: Option<u32>,

    /// P.A code
    #[arg(long)]
    pa_code: Option<String>,

    /// Who opened the ticket
    #[arg(long)]
    opened_by: Option<String>,

    /// Opening date (dd/mm/yyyy)
    #[arg(long, value_parser = parse_date)]
    opened_on: Option<NaiveDate>,

    /// Due date (dd/mm/yyyy); ignored when the requirement kind forces one
    #[arg(long, value_parser = parse_date)]
    due_on: Option<NaiveDate>,

    /// Requirement kind: none, '3 days', '7 days' or '3 and 7 days'
    #[arg(long)]
    requirement: Option<RequirementKind>,

    /// Status: OPEN, ANALYSIS, DONE or free text
    #[arg(long)]
    status: Option<String>,

    /// Completion flag: yes or no
    #[arg(long)]
    completed: Option<Completion>,

    /// Keep current values instead of prompting
    #[arg(long, short)]
    yes: bool,
}

impl Command {
    #[instrument(level = "debug", skip_all, fields(id = %self.id))]
    pub async fn run(self, config: &Config) -> anyhow::Result<()> {
        let board = super::open_board(config).await?;
        let records = board.snapshot().await?;

        let Some(current) = records
            .into_iter()
            .find(|record| record.id.as_deref() == Some(self.id.as_str()))
        else {
            anyhow::bail!("Record {} not found on the board", self.id);
        };

        let today = super::today();
        let record = self.collect(current, today)?;
        record.validate()?;

        board.save(&record).await?;

        super::activity_log(config).append(&format!(
            "Record updated on the board – ticket {}",
            record.ticket
        ));
        println!(
            "{}",
            format!("Updated record (ticket {})", record.ticket).success()
        );
        Ok(())
    }

    fn collect(self, current: PaRecord, today: NaiveDate) -> anyhow::Result<PaRecord> {
        let assume = self.yes;

        let ticket = form::text(self.ticket, "Ticket", &current.ticket, assume)?;
        let city = form::text(self.city, "City", &current.city, assume)?;
        let base = form::text(self.base, "Base", &current.base, assume)?;
        let box_map = form::text(self.box_map, "Box (map)", &current.box_map, assume)?;
        let box_system = form::text(self.box_system, "Box (system)", &current.box_system, assume)?;
        let quantity = form::quantity(self.quantity, current.quantity, assume)?;
        let pa_code = form::text(self.pa_code, "P.A code", &current.pa_code, assume)?;
        let opened_by = form::text(self.opened_by, "Opened by", &current.opened_by, assume)?;
        let opened_on = form::date(self.opened_on, "Opened", current.opened_on, assume)?;
        let requirement = form::requirement(self.requirement, current.requirement, assume)?;

        let due_on = match due_for(opened_on, requirement) {
            Some(forced) => forced,
            None => form::date(self.due_on, "Due", current.due_on, assume)?,
        };

        let status = form::status(self.status, &current.status, assume)?;
        let completed = form::completion(self.completed, current.completed, assume)?;

        Ok(PaRecord {
            // The identifier and creation timestamp survive every edit.
            id: current.id,
            ticket,
            city,
            base,
            box_map,
            box_system,
            quantity,
            pa_code,
            opened_by,
            opened_on,
            due_on,
            days_remaining: days_remaining(due_on, today),
            status,
            completed,
            requirement,
            created_at: current.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use paboard::{Completion, PaRecord, RequirementKind, Status};

    use super::Command;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn current() -> PaRecord {
        PaRecord {
            id: Some("6568a1b2c3d4e5f6a7b8c9d0".to_owned()),
            ticket: "100".to_owned(),
            city: "Porto".to_owned(),
            base: "SUL".to_owned(),
            box_map: String::new(),
            box_system: String::new(),
            quantity: 4,
            pa_code: String::new(),
            opened_by: "rui".to_owned(),
            opened_on: day(1),
            due_on: day(4),
            days_remaining: 3,
            status: Status::Analysis,
            completed: Completion::No,
            requirement: RequirementKind::ThreeDays,
            created_at: Utc::now(),
        }
    }

    fn command() -> Command {
        Command {
            id: "6568a1b2c3d4e5f6a7b8c9d0".to_owned(),
            ticket: None,
            city: None,
            base: None,
            box_map: None,
            box_system: None,
            quantity: None,
            pa_code: None,
            opened_by: None,
            opened_on: None,
            due_on: None,
            requirement: None,
            status: None,
            completed: None,
            yes: true,
        }
    }

    #[test]
    fn unchanged_edit_keeps_identity_and_content() {
        let before = current();
        let record = command().collect(before.clone(), day(1)).unwrap();
        assert_eq!(record.id, before.id);
        assert_eq!(record.created_at, before.created_at);
        assert_eq!(record.ticket, before.ticket);
        assert_eq!(record.due_on, before.due_on);
    }

    #[test]
    fn changing_the_opening_date_moves_a_forced_due_date() {
        let mut cmd = command();
        cmd.opened_on = Some(day(10));

        let record = cmd.collect(current(), day(1)).unwrap();
        assert_eq!(record.due_on, day(13));
        assert_eq!(record.days_remaining, 12);
    }

    #[test]
    fn clearing_the_requirement_frees_the_due_date() {
        let mut cmd = command();
        cmd.requirement = Some(RequirementKind::None);
        cmd.due_on = Some(day(20));

        let record = cmd.collect(current(), day(1)).unwrap();
        assert_eq!(record.due_on, day(20));
    }
}
