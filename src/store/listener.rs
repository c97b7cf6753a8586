use futures::StreamExt;
use mongodb::Collection;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::debug;

use super::{board, document::PaDocument, Error};
use crate::domain::PaRecord;

/// An update pushed by the change subscription.
#[derive(Debug)]
pub enum BoardEvent {
    /// A fresh copy of the full record list, replacing any previous copy.
    Snapshot(Vec<PaRecord>),
    /// The subscription failed and will deliver nothing further.
    Lost(Error),
}

/// Cancellable handle to a change subscription.
///
/// The store's change stream runs in a background task that forwards a full
/// board snapshot over a channel: the current contents immediately, then a
/// freshly reloaded copy after every remote change. Dropping the handle (or
/// calling [`Subscription::unsubscribe`]) cancels the task.
#[derive(Debug)]
pub struct Subscription {
    task: JoinHandle<()>,
    events: mpsc::Receiver<BoardEvent>,
}

impl Subscription {
    /// Waits for the next event.
    ///
    /// Returns `None` once the subscription has ended.
    pub async fn next_event(&mut self) -> Option<BoardEvent> {
        self.events.recv().await
    }

    /// Cancels the subscription.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub(crate) fn spawn(records: Collection<PaDocument>) -> Subscription {
    let (sender, events) = mpsc::channel(8);
    let task = tokio::spawn(run(records, sender));
    Subscription { task, events }
}

async fn run(records: Collection<PaDocument>, events: mpsc::Sender<BoardEvent>) {
    // The vendor subscription fires once with the current contents before
    // any change arrives; mirror that here.
    if !push_snapshot(&records, &events).await {
        return;
    }

    let mut changes = match records.watch().await {
        Ok(stream) => stream,
        Err(error) => {
            let _ = events.send(BoardEvent::Lost(error.into())).await;
            return;
        }
    };

    while let Some(change) = changes.next().await {
        match change {
            Ok(_) => {
                debug!("remote change received, reloading the board");
                if !push_snapshot(&records, &events).await {
                    return;
                }
            }
            Err(error) => {
                let _ = events.send(BoardEvent::Lost(error.into())).await;
                return;
            }
        }
    }
}

async fn push_snapshot(
    records: &Collection<PaDocument>,
    events: &mpsc::Sender<BoardEvent>,
) -> bool {
    match board::fetch_all(records).await {
        Ok(snapshot) => events.send(BoardEvent::Snapshot(snapshot)).await.is_ok(),
        Err(error) => {
            let _ = events.send(BoardEvent::Lost(error)).await;
            false
        }
    }
}
