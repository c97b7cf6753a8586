//! Client for the shared document collection that holds the board.
//!
//! The store is an external managed service consumed through its driver:
//! documents keyed by opaque identifiers, plus a change stream used as the
//! push-notification subscription. Nothing here implements any part of that
//! protocol; this module only maps records onto the driver's operations.

mod board;
mod credentials;
mod document;
mod listener;

pub use board::Board;
pub use credentials::Credentials;
pub use listener::{BoardEvent, Subscription};

use std::path::PathBuf;

use thiserror::Error;

/// The error type for store operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The credential file could not be read. Fatal at startup.
    #[error("failed to read credential file {path}: {source}")]
    CredentialsRead {
        /// Path of the credential file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The credential file exists but is not valid JSON.
    #[error("credential file {path} is not valid JSON: {source}")]
    CredentialsParse {
        /// Path of the credential file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The board database could not be reached at startup.
    #[error("failed to connect to the board database: {0}")]
    Connect(#[source] mongodb::error::Error),

    /// A store operation failed after startup.
    #[error("board operation failed: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A record identifier did not parse as a store object id.
    #[error("malformed record identifier '{value}': {source}")]
    MalformedId {
        /// The offending identifier.
        value: String,
        /// The underlying error.
        #[source]
        source: bson::error::Error,
    },

    /// The store assigned an identifier of an unexpected type on insert.
    #[error("the store returned an identifier that is not an object id")]
    UnexpectedIdType,
}
