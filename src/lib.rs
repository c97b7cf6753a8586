//! Collaborative P.A (pending-action) ticket tracking
//!
//! Records live in a shared remote document collection. Every client renders
//! whatever the store last reported; the store's change stream keeps live
//! views in sync.

pub mod domain;
pub use domain::{
    days_remaining, due_for, plan_sweep, Completion, Config, DeadlineUpdate, PaRecord,
    RequirementKind, Status, Sweep, ValidationError,
};

/// Remote document-collection client and change subscription.
pub mod store;
pub use store::{Board, BoardEvent, Credentials, Error as StoreError, Subscription};

pub mod export;
pub mod history;
pub use history::ActivityLog;
