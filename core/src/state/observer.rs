//! Persistence observer.
//!
//! Runs after reduction, on its own task: every transition event is turned
//! into a whitelisted snapshot and handed to the engine. Failures are logged
//! and otherwise ignored.

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

use super::snapshot::encode_snapshot;
use super::types::{RootState, StateEvent, SubState};
use crate::persist::PersistenceEngine;

/// Spawns the observer. The returned receiver tracks the revision of the
/// last snapshot handed to the engine.
pub(crate) fn spawn_persistence_observer(
    mut rx: broadcast::Receiver<StateEvent>,
    engine: Arc<dyn PersistenceEngine>,
    key: String,
    whitelist: Vec<SubState>,
) -> watch::Receiver<u64> {
    let (saved_tx, saved_rx) = watch::channel(0u64);

    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let Some((revision, state)) = event.state() else {
                        continue;
                    };
                    persist(engine.as_ref(), &key, state, &whitelist).await;
                    saved_tx.send_replace(revision);
                }
                Err(RecvError::Lagged(skipped)) => {
                    // Later events carry the full state, nothing to replay.
                    debug!(skipped, "Persistence observer lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
        debug!(engine = engine.name(), "Persistence observer stopped");
    });

    saved_rx
}

async fn persist(
    engine: &dyn PersistenceEngine,
    key: &str,
    state: &Arc<RootState>,
    whitelist: &[SubState],
) {
    let json = match encode_snapshot(state, whitelist) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "Failed to encode snapshot");
            return;
        }
    };
    let bytes = json.len();
    match engine.save(key, json).await {
        Ok(()) => debug!(engine = engine.name(), key, bytes, "Snapshot saved"),
        Err(e) => warn!(engine = engine.name(), key, error = %e, "Failed to save snapshot"),
    }
}
