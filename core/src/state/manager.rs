//! 状态管理器
//!
//! The store owns the root state and applies actions one at a time under a
//! single write lock. Booting returns a [`PendingStore`]; the dispatchable
//! [`Store`] only exists once the startup snapshot has been merged.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{broadcast, watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::observer::spawn_persistence_observer;
use super::reducer::{self, RehydrateReport};
use super::snapshot::PersistedState;
use super::transitions::{StateTransition, StorePhase};
use super::types::{RootState, StateEvent, SubState};
use crate::action::Action;
use crate::cart::CartLine;
use crate::catalog::{CatalogState, Collection};
use crate::config::AppConfig;
use crate::persist::PersistenceEngine;
use crate::seed::SeedProvider;

/// Store wiring that is fixed for the lifetime of a store.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Key the snapshot is stored under.
    pub root_key: String,
    /// Sub-states that survive a restart.
    pub whitelist: Vec<SubState>,
    /// When false nothing is loaded or saved.
    pub persist: bool,
    /// Capacity of the event broadcast channel.
    pub event_capacity: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            root_key: "root".to_string(),
            whitelist: SubState::ALL.to_vec(),
            persist: true,
            event_capacity: 256,
        }
    }
}

impl StoreOptions {
    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            root_key: cfg.persistence.root_key.clone(),
            whitelist: cfg.persistence.whitelist.clone(),
            persist: cfg.persistence.enabled,
            event_capacity: cfg.store.event_capacity,
        }
    }
}

/// 状态管理器
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    current: RwLock<Current>,
    /// 事件广播通道
    event_tx: broadcast::Sender<StateEvent>,
    /// 最近一次写入的修订号
    saved_rx: Option<watch::Receiver<u64>>,
    options: StoreOptions,
}

struct Current {
    state: Arc<RootState>,
    revision: u64,
    phase: StorePhase,
}

/// A booted store whose startup snapshot is still loading.
pub struct PendingStore {
    store: Store,
    load: Option<JoinHandle<Option<PersistedState>>>,
}

impl Store {
    /// Seeds the catalogs, starts the persistence observer and kicks off the
    /// snapshot load. Must be called from within a tokio runtime.
    pub fn boot(
        seed: &dyn SeedProvider,
        engine: Arc<dyn PersistenceEngine>,
        options: StoreOptions,
    ) -> PendingStore {
        let beans = CatalogState::from_seed(seed.initial_catalog(Collection::Beans));
        let coffee = CatalogState::from_seed(seed.initial_catalog(Collection::Coffee));
        info!(
            beans = beans.items.len(),
            coffee = coffee.items.len(),
            engine = engine.name(),
            persist = options.persist,
            "Booting store"
        );

        let (event_tx, _) = broadcast::channel(options.event_capacity.max(1));

        let (saved_rx, load) = if options.persist {
            let saved_rx = spawn_persistence_observer(
                event_tx.subscribe(),
                Arc::clone(&engine),
                options.root_key.clone(),
                options.whitelist.clone(),
            );
            let key = options.root_key.clone();
            let load = tokio::spawn(async move { load_snapshot(engine.as_ref(), &key).await });
            (Some(saved_rx), Some(load))
        } else {
            (None, None)
        };

        let inner = StoreInner {
            current: RwLock::new(Current {
                state: Arc::new(RootState::new(beans, coffee)),
                revision: 0,
                phase: StorePhase::Booting,
            }),
            event_tx,
            saved_rx,
            options,
        };

        PendingStore {
            store: Store {
                inner: Arc::new(inner),
            },
            load,
        }
    }

    /// 订阅状态事件
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.inner.event_tx.subscribe()
    }

    /// 发送状态事件
    pub(crate) fn emit_event(&self, event: StateEvent) {
        let _ = self.inner.event_tx.send(event);
    }

    pub fn options(&self) -> &StoreOptions {
        &self.inner.options
    }

    /// 获取当前状态
    pub async fn state(&self) -> Arc<RootState> {
        Arc::clone(&self.inner.current.read().await.state)
    }

    pub async fn revision(&self) -> u64 {
        self.inner.current.read().await.revision
    }

    pub async fn phase(&self) -> StorePhase {
        self.inner.current.read().await.phase
    }

    /// Applies `action` and returns the resulting state.
    ///
    /// Actions are applied strictly in order; the write lock is held for the
    /// whole reduction and the event emission that follows it.
    pub async fn dispatch(&self, action: Action) -> Arc<RootState> {
        let mut current = self.inner.current.write().await;
        let kind = action.kind();

        let next = match &action {
            Action::Rehydrate(snapshot) => {
                let (next, report) = reducer::rehydrate(&current.state, snapshot);
                log_rehydrate_report(&report);
                next
            }
            _ => reducer::reduce(&current.state, &action),
        };

        if Arc::ptr_eq(&next, &current.state) {
            debug!(action = kind.as_str(), "Action left state unchanged");
            return next;
        }

        current.revision += 1;
        current.state = Arc::clone(&next);
        debug!(action = kind.as_str(), revision = current.revision, "State transition");

        self.emit_event(StateEvent::Changed {
            revision: current.revision,
            action: kind,
            state: Arc::clone(&next),
            timestamp: Utc::now(),
        });
        next
    }

    /// Adds `quantity` of the catalog item `id` in `size`. Returns `None`
    /// when the item does not exist.
    pub async fn add_item(
        &self,
        collection: Collection,
        id: &str,
        size: &str,
        quantity: u32,
    ) -> Option<Arc<RootState>> {
        let line = {
            let state = self.state().await;
            let item = state.catalog(collection).get(id)?;
            CartLine::from_item(item, size, quantity)
        };
        Some(self.dispatch(Action::AddToCart(line)).await)
    }

    /// Waits until the persistence observer has handled the latest revision.
    pub async fn flush(&self) {
        let Some(saved_rx) = self.inner.saved_rx.as_ref() else {
            return;
        };
        let target = self.revision().await;
        let mut saved_rx = saved_rx.clone();
        if saved_rx.wait_for(|saved| *saved >= target).await.is_err() {
            warn!(target, "Persistence observer stopped before flushing");
        }
    }

    async fn open_gate(&self, snapshot: PersistedState) {
        let mut current = self.inner.current.write().await;

        if let Err(e) = current.phase.advance_to(StorePhase::Rehydrating) {
            error!(error = %e, "Store rehydrated twice");
            return;
        }

        let restored = snapshot.present();
        let (next, report) = reducer::rehydrate(&current.state, &snapshot);
        log_rehydrate_report(&report);
        if !Arc::ptr_eq(&next, &current.state) {
            current.revision += 1;
            current.state = Arc::clone(&next);
        }

        if let Err(e) = current.phase.advance() {
            error!(error = %e, "Unexpected store phase");
        }
        info!(
            revision = current.revision,
            restored = ?restored,
            phase = StateTransition::phase_description(current.phase),
            "Store rehydrated"
        );

        self.emit_event(StateEvent::Rehydrated {
            revision: current.revision,
            restored,
            state: next,
            timestamp: Utc::now(),
        });
    }
}

impl PendingStore {
    /// The store as it is now, before rehydration. Read-only.
    pub async fn peek(&self) -> Arc<RootState> {
        self.store.state().await
    }

    /// Subscribe before the gate opens to observe the rehydration event.
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.store.subscribe()
    }

    /// Waits for the snapshot load, merges it, and hands out the store.
    pub async fn ready(self) -> Store {
        let snapshot = match self.load {
            Some(handle) => match handle.await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(error = %e, "Snapshot load task failed, starting from seed");
                    None
                }
            },
            None => None,
        };

        let whitelist = &self.store.inner.options.whitelist;
        let snapshot = snapshot
            .map(|s| s.restricted_to(whitelist))
            .unwrap_or_default();

        self.store.open_gate(snapshot).await;
        self.store
    }
}

async fn load_snapshot(engine: &dyn PersistenceEngine, key: &str) -> Option<PersistedState> {
    match engine.load(key).await {
        Ok(Some(json)) => match PersistedState::from_json(&json) {
            Ok(snapshot) => {
                debug!(engine = engine.name(), key, version = ?snapshot.version, "Snapshot loaded");
                Some(snapshot)
            }
            Err(e) => {
                warn!(engine = engine.name(), key, error = %e, "Discarding unreadable snapshot");
                None
            }
        },
        Ok(None) => {
            debug!(engine = engine.name(), key, "No snapshot stored");
            None
        }
        Err(e) => {
            warn!(engine = engine.name(), key, error = %e, "Snapshot load failed, starting from seed");
            None
        }
    }
}

fn log_rehydrate_report(report: &RehydrateReport) {
    for (collection, merge) in [("beans", &report.beans), ("coffee", &report.coffee)] {
        let Some(merge) = merge else { continue };
        if !merge.is_clean() {
            debug!(
                collection,
                unknown = ?merge.unknown_ids,
                skipped = merge.skipped,
                "Ignored catalog snapshot entries"
            );
        }
    }
    if let Some(cart) = &report.cart {
        for (id, size) in &cart.unresolved {
            warn!(id = %id, size = %size, "Dropping cart line whose item no longer exists");
        }
        if cart.malformed > 0 {
            warn!(count = cart.malformed, "Dropping malformed cart lines");
        }
        if cart.has_drift() {
            warn!(drift = cart.drift, "Restored cart total differs from its lines");
        }
    }
}
