use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    deadline,
    status::{Completion, RequirementKind, Status},
};

/// A single pending-action ticket on the shared board.
///
/// The authoritative copy of every record lives in the remote collection;
/// instances of this type are either form input on their way to the store,
/// or the store's last report on its way to the screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaRecord {
    /// Opaque identifier assigned by the store on first save.
    ///
    /// Absent for a record that has never been persisted, and immutable once
    /// assigned.
    pub id: Option<String>,

    /// Ticket identifier. Mandatory.
    pub ticket: String,

    /// City the ticket belongs to. Mandatory.
    pub city: String,

    /// Base code (free text; the form suggests the common bases).
    pub base: String,

    /// Box reference as drawn on the map.
    pub box_map: String,

    /// Box reference as registered in the system.
    pub box_system: String,

    /// Number of affected units.
    pub quantity: u32,

    /// P.A code.
    pub pa_code: String,

    /// Who opened the ticket.
    pub opened_by: String,

    /// Opening date.
    pub opened_on: NaiveDate,

    /// Due date. Forced to `opened_on` plus the requirement offset whenever
    /// the requirement kind implies one; otherwise free-form.
    pub due_on: NaiveDate,

    /// Stored days-remaining value.
    ///
    /// Derived, never authoritative: it goes stale as the calendar advances
    /// and is reconciled by the deadline sweep.
    pub days_remaining: i64,

    /// Workflow status.
    pub status: Status,

    /// Completion flag.
    pub completed: Completion,

    /// Requirement category.
    pub requirement: RequirementKind,

    /// When the record was first created, used for board ordering.
    pub created_at: DateTime<Utc>,
}

impl PaRecord {
    /// Checks the mandatory fields before a save.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming every mandatory field that is
    /// empty. Callers must not issue a persistence call on failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.ticket.trim().is_empty() {
            missing.push("ticket");
        }
        if self.city.trim().is_empty() {
            missing.push("city");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }

    /// Recomputes the stored days-remaining against `today`.
    ///
    /// Returns `true` when the stored value changed.
    pub fn refresh_days_remaining(&mut self, today: NaiveDate) -> bool {
        let fresh = deadline::days_remaining(self.due_on, today);
        if fresh == self.days_remaining {
            false
        } else {
            self.days_remaining = fresh;
            true
        }
    }
}

/// The error returned when a record is missing mandatory fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("required fields missing: {}", .missing.join(", "))]
pub struct ValidationError {
    /// Names of the mandatory fields left empty.
    pub missing: Vec<&'static str>,
}
