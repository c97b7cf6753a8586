use bson::{oid::ObjectId, DateTime};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::PaRecord;

/// Wire form of a record, as stored in the remote collection.
///
/// Dates are stored as datetimes at midnight UTC; the opaque identifier
/// lives in the `_id` slot and never inside the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PaDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub ticket: String,
    pub city: String,
    pub base: String,
    pub box_map: String,
    pub box_system: String,
    pub quantity: u32,
    pub pa_code: String,
    pub opened_by: String,
    pub opened_on: DateTime,
    pub due_on: DateTime,
    pub days_remaining: i64,
    pub status: String,
    pub completed: String,
    pub requirement: String,
    pub created_at: DateTime,
}

fn midnight(date: NaiveDate) -> DateTime {
    DateTime::from_chrono(date.and_time(NaiveTime::MIN).and_utc())
}

fn date_of(datetime: DateTime) -> NaiveDate {
    datetime.to_chrono().date_naive()
}

impl From<&PaRecord> for PaDocument {
    fn from(record: &PaRecord) -> Self {
        // The identifier is carried by the operation (insert result or
        // replace filter), never by the document body.
        Self {
            id: None,
            ticket: record.ticket.clone(),
            city: record.city.clone(),
            base: record.base.clone(),
            box_map: record.box_map.clone(),
            box_system: record.box_system.clone(),
            quantity: record.quantity,
            pa_code: record.pa_code.clone(),
            opened_by: record.opened_by.clone(),
            opened_on: midnight(record.opened_on),
            due_on: midnight(record.due_on),
            days_remaining: record.days_remaining,
            status: record.status.as_str().to_owned(),
            completed: record.completed.as_str().to_owned(),
            requirement: record.requirement.as_str().to_owned(),
            created_at: DateTime::from_chrono(record.created_at),
        }
    }
}

impl From<PaDocument> for PaRecord {
    fn from(document: PaDocument) -> Self {
        Self {
            id: document.id.map(|oid| oid.to_hex()),
            ticket: document.ticket,
            city: document.city,
            base: document.base,
            box_map: document.box_map,
            box_system: document.box_system,
            quantity: document.quantity,
            pa_code: document.pa_code,
            opened_by: document.opened_by,
            opened_on: date_of(document.opened_on),
            due_on: date_of(document.due_on),
            days_remaining: document.days_remaining,
            status: document.status.into(),
            completed: document.completed.into(),
            requirement: document.requirement.into(),
            created_at: document.created_at.to_chrono(),
        }
    }
}

#[cfg(test)]
mod tests {
    use bson::oid::ObjectId;
    use chrono::{NaiveDate, Utc};

    use super::PaDocument;
    use crate::domain::{Completion, PaRecord, RequirementKind, Status};

    fn record() -> PaRecord {
        PaRecord {
            id: None,
            ticket: "55821".to_owned(),
            city: "Braga".to_owned(),
            base: "SUL".to_owned(),
            box_map: "CX-12".to_owned(),
            box_system: "CX-12-S".to_owned(),
            quantity: 16,
            pa_code: "PA-9".to_owned(),
            opened_by: "rui".to_owned(),
            opened_on: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            due_on: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            days_remaining: 7,
            status: Status::Analysis,
            completed: Completion::No,
            requirement: RequirementKind::SevenDays,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn outgoing_documents_never_carry_an_id() {
        let mut saved = record();
        saved.id = Some(ObjectId::new().to_hex());
        assert_eq!(PaDocument::from(&saved).id, None);
    }

    #[test]
    fn dates_survive_the_midnight_encoding() {
        let document = PaDocument::from(&record());
        let loaded = PaRecord::from(document);
        assert_eq!(loaded.opened_on, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(loaded.due_on, NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
    }

    #[test]
    fn loaded_id_is_the_object_id_hex() {
        let oid = ObjectId::new();
        let mut document = PaDocument::from(&record());
        document.id = Some(oid);

        let loaded = PaRecord::from(document);
        assert_eq!(loaded.id, Some(oid.to_hex()));
    }

    #[test]
    fn string_fields_reload_as_their_domain_values() {
        let document = PaDocument::from(&record());
        assert_eq!(document.status, "ANALYSIS");
        assert_eq!(document.requirement, "7 days");

        let loaded = PaRecord::from(document);
        assert_eq!(loaded.status, Status::Analysis);
        assert_eq!(loaded.completed, Completion::No);
        assert_eq!(loaded.requirement, RequirementKind::SevenDays);
    }
}
