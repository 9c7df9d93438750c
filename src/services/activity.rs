//! Cart activity log — background consumer for cart mutation events.
//!
//! DESIGN
//! ======
//! Every session's cart is subscribed to the global activity channel at
//! creation. A single background task drains the channel and writes the
//! events into the structured log, so cart mutations never block on logging.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::cart::CartEvent;

/// One cart mutation, tagged with the owning session's short id.
#[derive(Debug, Clone)]
pub struct ActivityEvent {
    pub session: String,
    pub event: CartEvent,
}

/// Spawn the activity log task. Runs until every sender is dropped.
pub fn spawn_activity_task(mut rx: mpsc::UnboundedReceiver<ActivityEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(activity) = rx.recv().await {
            match activity.event {
                CartEvent::Added { id, quantity } => {
                    info!(session = %activity.session, product = %id, quantity, "cart add");
                }
                CartEvent::QuantitySet { id, quantity } => {
                    info!(session = %activity.session, product = %id, quantity, "cart quantity set");
                }
                CartEvent::Removed { id } => {
                    info!(session = %activity.session, product = %id, "cart remove");
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn task_drains_events_and_exits_on_close() {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = spawn_activity_task(rx);

        tx.send(ActivityEvent {
            session: "deadbeef".into(),
            event: CartEvent::Added { id: "1".into(), quantity: 2 },
        })
        .unwrap();
        tx.send(ActivityEvent {
            session: "deadbeef".into(),
            event: CartEvent::Removed { id: "1".into() },
        })
        .unwrap();

        drop(tx);
        handle.await.unwrap();
    }
}
