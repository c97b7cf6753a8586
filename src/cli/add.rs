use chrono::{NaiveDate, Utc};
use paboard::{days_remaining, due_for, Completion, Config, PaRecord, RequirementKind, Status};
use tracing::instrument;

use crate::cli::{form, parse_date, terminal::Colorize};

/// Command arguments for `pab add`.
///
/// Every field can be supplied as a flag; anything left out is prompted
/// for, which makes the bare `pab add` behave like the data-entry form.
#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Ticket identifier (mandatory; prompted for when omitted)
    #[arg(long)]
    ticket: Option<String>,

    /// City (mandatory; prompted for when omitted)
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

    /// Opening date (dd/mm/yyyy; defaults to today)
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

    /// Accept defaults instead of prompting
    #[arg(long, short)]
    yes: bool,
}

impl Command {
    #[instrument(level = "debug", skip_all)]
    pub async fn run(self, config: &Config) -> anyhow::Result<()> {
        let today = super::today();
        let record = self.collect(today)?;
        record.validate()?;

        let board = super::open_board(config).await?;
        let id = board.save(&record).await?;

        super::activity_log(config).append(&format!(
            "New record saved to the board – ticket {}",
            record.ticket
        ));
        println!(
            "{}",
            format!("Added record {id} (ticket {})", record.ticket).success()
        );
        Ok(())
    }

    fn collect(self, today: NaiveDate) -> anyhow::Result<PaRecord> {
        let assume = self.yes;

        let ticket = form::text(self.ticket, "Ticket", "", assume)?;
        let city = form::text(self.city, "City", "", assume)?;
        let base = form::text(self.base, "Base", "", assume)?;
        let box_map = form::text(self.box_map, "Box (map)", "", assume)?;
        let box_system = form::text(self.box_system, "Box (system)", "", assume)?;
        let quantity = form::quantity(self.quantity, 0, assume)?;
        let pa_code = form::text(self.pa_code, "P.A code", "", assume)?;
        let opened_by = form::text(self.opened_by, "Opened by", "", assume)?;
        let opened_on = form::date(self.opened_on, "Opened", today, assume)?;
        let requirement = form::requirement(self.requirement, RequirementKind::None, assume)?;

        // A requirement kind with a fixed offset forces the due date; only
        // the empty kind leaves it free-form.
        let due_on = match due_for(opened_on, requirement) {
            Some(forced) => forced,
            None => form::date(self.due_on, "Due", opened_on, assume)?,
        };

        let status = form::status(self.status, &Status::Open, assume)?;
        let completed = form::completion(self.completed, Completion::Unset, assume)?;

        Ok(PaRecord {
            id: None,
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
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use paboard::{RequirementKind, Status};

    use super::Command;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn command() -> Command {
        Command {
            ticket: Some("100".to_owned()),
            city: Some("Porto".to_owned()),
            base: None,
            box_map: None,
            box_system: None,
            quantity: None,
            pa_code: None,
            opened_by: None,
            opened_on: Some(day(1)),
            due_on: None,
            requirement: Some(RequirementKind::None),
            status: None,
            completed: None,
            yes: true,
        }
    }

    #[test]
    fn collect_fills_defaults_without_prompting() {
        let record = command().collect(day(1)).unwrap();
        assert_eq!(record.ticket, "100");
        assert_eq!(record.status, Status::Open);
        assert_eq!(record.due_on, day(1));
        assert_eq!(record.days_remaining, 0);
        assert!(record.id.is_none());
        assert!(record.validate().is_ok());
    }

    #[test]
    fn forcing_requirement_overrides_an_explicit_due_date() {
        let mut cmd = command();
        cmd.requirement = Some(RequirementKind::ThreeDays);
        cmd.due_on = Some(day(20));

        let record = cmd.collect(day(1)).unwrap();
        assert_eq!(record.due_on, day(4));
        assert_eq!(record.days_remaining, 3);
    }

    #[test]
    fn empty_requirement_keeps_the_explicit_due_date() {
        let mut cmd = command();
        cmd.due_on = Some(day(20));

        let record = cmd.collect(day(1)).unwrap();
        assert_eq!(record.due_on, day(20));
        assert_eq!(record.days_remaining, 19);
    }

    #[test]
    fn missing_mandatory_fields_fail_validation_before_any_save() {
        let mut cmd = command();
        cmd.ticket = None;

        let record = cmd.collect(day(1)).unwrap();
        let error = record.validate().unwrap_err();
        assert_eq!(error.missing, vec!["ticket"]);
    }
}
