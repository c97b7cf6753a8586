use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{
    options::{UpdateModifications, UpdateOneModel, WriteModel},
    Client, Collection,
};
use tracing::{debug, instrument};

use super::{document::PaDocument, listener, Credentials, Error, Subscription};
use crate::domain::{DeadlineUpdate, PaRecord};

/// Handle to the shared record collection.
///
/// One `Board` per process: it owns the driver client and exposes exactly
/// the operations the application consumes. Writes follow last-writer-wins
/// semantics; the store resolves concurrent edits and this client performs
/// no conflict detection.
#[derive(Debug, Clone)]
pub struct Board {
    client: Client,
    records: Collection<PaDocument>,
}

impl Board {
    /// Connects to the store and verifies it is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connect`] when the service cannot be reached.
    /// Callers treat this as fatal at startup.
    pub async fn connect(credentials: &Credentials, collection: &str) -> Result<Self, Error> {
        let client = Client::with_uri_str(&credentials.uri)
            .await
            .map_err(Error::Connect)?;
        let database = client.database(&credentials.database);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(Error::Connect)?;

        let records = database.collection(collection);
        Ok(Self { client, records })
    }

    /// Reads the full board, newest records first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] when the read fails.
    pub async fn snapshot(&self) -> Result<Vec<PaRecord>, Error> {
        fetch_all(&self.records).await
    }

    /// Persists a record: one insert when it has no identifier yet, one
    /// full overwrite by identifier otherwise.
    ///
    /// Returns the record's identifier, freshly assigned on insert.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] when the write fails, or
    /// [`Error::MalformedId`] when an existing identifier does not
    /// parse.
    pub async fn save(&self, record: &PaRecord) -> Result<String, Error> {
        match &record.id {
            None => self.insert(record).await,
            Some(id) => {
                self.replace(id, record).await?;
                Ok(id.clone())
            }
        }
    }

    /// Adds a new document and returns the identifier the store assigned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] when the write fails.
    #[instrument(level = "debug", skip_all, fields(ticket = %record.ticket))]
    pub async fn insert(&self, record: &PaRecord) -> Result<String, Error> {
        let result = self.records.insert_one(PaDocument::from(record)).await?;
        match result.inserted_id {
            bson::Bson::ObjectId(oid) => Ok(oid.to_hex()),
            _ => Err(Error::UnexpectedIdType),
        }
    }

    /// Fully overwrites the document with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedId`] when the identifier does not
    /// parse, or [`Error::Database`] when the write fails.
    #[instrument(level = "debug", skip_all, fields(id = %id))]
    pub async fn replace(&self, id: &str, record: &PaRecord) -> Result<(), Error> {
        let oid = parse_id(id)?;
        self.records
            .replace_one(doc! { "_id": oid }, PaDocument::from(record))
            .await?;
        Ok(())
    }

    /// Deletes the document with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedId`] when the identifier does not
    /// parse, or [`Error::Database`] when the delete fails.
    #[instrument(level = "debug", skip_all, fields(id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let oid = parse_id(id)?;
        self.records.delete_one(doc! { "_id": oid }).await?;
        Ok(())
    }

    /// Persists a batch of recomputed days-remaining values in one write.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedId`] when an identifier does not
    /// parse, or [`Error::Database`] when the batch fails. No retry and
    /// no rollback: the caller surfaces the error and abandons the sweep.
    pub async fn apply_deadlines(&self, updates: &[DeadlineUpdate]) -> Result<(), Error> {
        if updates.is_empty() {
            return Ok(());
        }

        let namespace = self.records.namespace();
        let mut models: Vec<WriteModel> = Vec::with_capacity(updates.len());
        for update in updates {
            let oid = parse_id(&update.id)?;
            let model = UpdateOneModel::builder()
                .namespace(namespace.clone())
                .filter(doc! { "_id": oid })
                .update(UpdateModifications::Document(
                    doc! { "$set": { "days_remaining": update.days_remaining } },
                ))
                .build();
            models.push(model.into());
        }

        debug!(count = models.len(), "writing deadline batch");
        self.client.bulk_write(models).await?;
        Ok(())
    }

    /// Subscribes to remote changes.
    ///
    /// The returned handle delivers the current board immediately, then a
    /// fresh full snapshot after every remote change, until cancelled.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        listener::spawn(self.records.clone())
    }
}

pub(crate) async fn fetch_all(
    records: &Collection<PaDocument>,
) -> Result<Vec<PaRecord>, Error> {
    let mut cursor = records
        .find(doc! {})
        .sort(doc! { "created_at": -1 })
        .await?;

    let mut snapshot = Vec::new();
    while let Some(document) = cursor.try_next().await? {
        snapshot.push(document.into());
    }
    Ok(snapshot)
}

fn parse_id(id: &str) -> Result<ObjectId, Error> {
    ObjectId::parse_str(id).map_err(|source| Error::MalformedId {
        value: id.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::parse_id;
    use crate::store::Error;

    #[test]
    fn well_formed_ids_parse() {
        let oid = bson::oid::ObjectId::new();
        assert_eq!(parse_id(&oid.to_hex()).unwrap(), oid);
    }

    #[test]
    fn malformed_ids_keep_the_offending_value() {
        let error = parse_id("not-an-id").unwrap_err();
        match error {
            Error::MalformedId { value, .. } => assert_eq!(value, "not-an-id"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
