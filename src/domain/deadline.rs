use chrono::{Days, NaiveDate};

use super::{record::PaRecord, status::RequirementKind};

/// Date format used everywhere a date is shown: table, export, prompts.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Formats a date in the board's day/month/year convention.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Computes the due date forced by a requirement kind.
///
/// Returns `None` for [`RequirementKind::None`], meaning the due date is
/// left at whatever value it already had.
#[must_use]
pub fn due_for(opened_on: NaiveDate, kind: RequirementKind) -> Option<NaiveDate> {
    kind.offset_days()
        .and_then(|days| opened_on.checked_add_days(Days::new(days)))
}

/// Whole days from `today` until `due_on`. Negative once the due date has
/// passed.
#[must_use]
pub fn days_remaining(due_on: NaiveDate, today: NaiveDate) -> i64 {
    due_on.signed_duration_since(today).num_days()
}

/// One pending persistence update produced by the deadline sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineUpdate {
    /// Store identifier of the record to update.
    pub id: String,
    /// Freshly computed days-remaining value.
    pub days_remaining: i64,
}

/// Outcome of recomputing days-remaining across the whole board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sweep {
    /// Updates for every record whose stored value differs from the fresh
    /// one, in board order.
    pub updates: Vec<DeadlineUpdate>,
    /// Tickets of the unfinished records that are due today or overdue,
    /// judged on the fresh values.
    pub overdue: Vec<String>,
}

impl Sweep {
    /// Whether the sweep found nothing to persist and nothing overdue.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.overdue.is_empty()
    }
}

/// Recomputes days-remaining for every record against `today`.
///
/// Records without a store identifier cannot be updated remotely and are
/// skipped from the update list, though they still count towards the
/// overdue warning.
#[must_use]
pub fn plan_sweep(records: &[PaRecord], today: NaiveDate) -> Sweep {
    let mut sweep = Sweep::default();
    for record in records {
        let fresh = days_remaining(record.due_on, today);
        if fresh != record.days_remaining {
            if let Some(id) = &record.id {
                sweep.updates.push(DeadlineUpdate {
                    id: id.clone(),
                    days_remaining: fresh,
                });
            }
        }
        if !record.status.is_done() && fresh <= 0 {
            sweep.overdue.push(record.ticket.clone());
        }
    }
    sweep
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::{days_remaining, due_for, format_date, plan_sweep, DeadlineUpdate};
    use crate::domain::{Completion, PaRecord, RequirementKind, Status};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn record(id: Option<&str>, ticket: &str, due: NaiveDate, stored: i64) -> PaRecord {
        PaRecord {
            id: id.map(str::to_owned),
            ticket: ticket.to_owned(),
            city: "Porto".to_owned(),
            base: String::new(),
            box_map: String::new(),
            box_system: String::new(),
            quantity: 0,
            pa_code: String::new(),
            opened_by: String::new(),
            opened_on: day(1),
            due_on: due,
            days_remaining: stored,
            status: Status::Open,
            completed: Completion::Unset,
            requirement: RequirementKind::None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn due_offsets_match_the_requirement_kind() {
        let opened = day(1);
        assert_eq!(due_for(opened, RequirementKind::ThreeDays), Some(day(4)));
        assert_eq!(due_for(opened, RequirementKind::SevenDays), Some(day(8)));
        assert_eq!(
            due_for(opened, RequirementKind::ThreeAndSevenDays),
            Some(day(8))
        );
        assert_eq!(due_for(opened, RequirementKind::None), None);
    }

    #[test]
    fn days_remaining_may_be_negative() {
        assert_eq!(days_remaining(day(5), day(1)), 4);
        assert_eq!(days_remaining(day(1), day(1)), 0);
        assert_eq!(days_remaining(day(1), day(9)), -8);
    }

    #[test]
    fn sweep_updates_only_stale_records() {
        let records = vec![
            record(Some("a"), "100", day(5), 4), // already fresh
            record(Some("b"), "200", day(5), 10), // stale
        ];

        let sweep = plan_sweep(&records, day(1));
        assert_eq!(
            sweep.updates,
            vec![DeadlineUpdate {
                id: "b".to_owned(),
                days_remaining: 4,
            }]
        );
        assert!(sweep.overdue.is_empty());
    }

    #[test]
    fn sweep_flags_unfinished_records_due_today_or_earlier() {
        let mut done = record(Some("c"), "300", day(1), 0);
        done.status = Status::Done;

        let records = vec![
            record(Some("a"), "100", day(1), 0),  // due today
            record(Some("b"), "200", day(5), 99), // overdue by the fresh value
            done,                                 // finished, never warned
            record(Some("d"), "400", day(20), 11),
        ];

        let sweep = plan_sweep(&records, day(9));
        assert_eq!(sweep.overdue, vec!["100".to_owned(), "200".to_owned()]);
    }

    #[test]
    fn sweep_skips_updates_for_unsaved_records() {
        let records = vec![record(None, "100", day(1), 99)];
        let sweep = plan_sweep(&records, day(9));
        assert!(sweep.updates.is_empty());
        assert_eq!(sweep.overdue, vec!["100".to_owned()]);
    }

    #[test]
    fn dates_render_day_first() {
        assert_eq!(format_date(day(7)), "07/03/2024");
    }
}
