//! Reorder synchronizer.
//!
//! Applies moves to the local [`OrderedCollection`] immediately, then persists
//! the full new order inside the caller's future. A rejected move is rolled
//! back and the authoritative order re-fetched.
//!
//! Every backend call passes through a single async gate, so at most one
//! request is in flight per synchronizer. A move issued while another is
//! waiting on the backend queues at the gate and is applied to whatever order
//! the earlier move resolved to.
//!
//! If a `move_item` future is dropped before the backend answers, the pending
//! move is rolled back, a [`SyncEvent::ReorderFailed`] is emitted and the
//! collection is marked stale; the next gated operation re-fetches the
//! authoritative order before doing anything else.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use quiz_order_engine::{AttachRequest, Item, ItemId, OrderedCollection, Snapshot};
use serde_json::Value;
use tokio::sync::broadcast;

use crate::backend::{BackendError, OrderBackend};
use crate::error::{Error, Result};
use crate::events::SyncEvent;

/// Capacity of the event channel. Slow subscribers lose the oldest events.
const EVENT_CAPACITY: usize = 64;

/// Reported when a move was abandoned before the backend answered.
const CANCELLED: &str = "reorder cancelled before the backend answered";

/// How a move ended once the backend answered.
#[derive(Debug)]
pub enum MoveOutcome {
    /// The backend accepted the new order.
    Persisted { order: Snapshot },
    /// The backend rejected it; the local order was reconciled.
    RolledBack {
        error: BackendError,
        /// Whether the authoritative order was re-fetched
        refetched: bool,
        order: Snapshot,
    },
}

impl MoveOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, MoveOutcome::Persisted { .. })
    }

    /// The local order after reconciliation.
    pub fn order(&self) -> &Snapshot {
        match self {
            MoveOutcome::Persisted { order } | MoveOutcome::RolledBack { order, .. } => order,
        }
    }
}

/// Keeps one ordered collection in step with its backend.
///
/// Share it behind an `Arc` to issue operations from several tasks.
pub struct Synchronizer<B> {
    backend: B,
    store: Mutex<OrderedCollection>,
    gate: tokio::sync::Mutex<()>,
    events: broadcast::Sender<SyncEvent>,
    timeout: Duration,
    disposed: AtomicBool,
    /// Set when a move was abandoned mid-flight; the backend may or may not
    /// have applied it.
    stale: AtomicBool,
}

/// Rolls back an in-flight move if its future is dropped early.
struct InFlightMove<'a, B> {
    sync: &'a Synchronizer<B>,
    armed: bool,
}

impl<B> InFlightMove<'_, B> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<B> Drop for InFlightMove<'_, B> {
    fn drop(&mut self) {
        if self.armed && !self.sync.is_disposed() {
            self.sync.abandon_move();
        }
    }
}

impl<B> Synchronizer<B> {
    /// The backend this synchronizer talks to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }

    /// Read-only view of the current local order.
    pub fn current_order(&self) -> Snapshot {
        self.store().snapshot()
    }

    /// Whether a move is waiting for the backend.
    pub fn has_pending(&self) -> bool {
        self.store().has_pending()
    }

    /// Whether the local order may differ from the backend's.
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }

    /// Tear down. Responses that arrive afterwards are discarded.
    pub fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::SeqCst) {
            tracing::debug!("Synchronizer disposed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Undo a move whose future was dropped before it resolved.
    fn abandon_move(&self) {
        let order = {
            let mut store = self.store();
            if store.has_pending() {
                // Only fails without a pending reorder
                let _ = store.rollback();
            }
            store.snapshot()
        };
        self.stale.store(true, Ordering::SeqCst);

        tracing::warn!(len = order.len(), "Move abandoned in flight, rolled back");
        self.emit(SyncEvent::ReorderFailed {
            error: CANCELLED.to_string(),
            refetched: false,
            order,
        });
    }

    fn store(&self) -> MutexGuard<'_, OrderedCollection> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_active(&self) -> Result<()> {
        if self.is_disposed() {
            tracing::debug!("Discarding work on disposed synchronizer");
            return Err(Error::Disposed);
        }
        Ok(())
    }

    fn emit(&self, event: SyncEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

impl<B: OrderBackend> Synchronizer<B> {
    /// Create a synchronizer with an empty collection.
    pub fn new(backend: B, timeout: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            backend,
            store: Mutex::new(OrderedCollection::new()),
            gate: tokio::sync::Mutex::new(()),
            events,
            timeout,
            disposed: AtomicBool::new(false),
            stale: AtomicBool::new(false),
        }
    }

    /// Create a synchronizer and load the authoritative order.
    pub async fn connect(backend: B, timeout: Duration) -> Result<Self> {
        let sync = Self::new(backend, timeout);
        sync.refresh().await?;
        Ok(sync)
    }

    /// Replace the local order with the backend's.
    pub async fn refresh(&self) -> Result<Snapshot> {
        let _gate = self.gate.lock().await;
        self.ensure_active()?;
        self.reload().await
    }

    /// Move an item to `target_index` and persist the new order.
    ///
    /// Unknown ids and no-op moves fail without any network call. A
    /// persistence failure is not an error: it is reconciled and reported as
    /// [`MoveOutcome::RolledBack`] plus a [`SyncEvent::ReorderFailed`].
    pub async fn move_item(&self, id: &str, target_index: usize) -> Result<MoveOutcome> {
        let _gate = self.gate.lock().await;
        self.ensure_active()?;
        self.reload_if_stale().await?;

        let (request, order) = {
            let mut store = self.store();
            let request = store.begin_move(id, target_index)?;
            (request, store.snapshot())
        };
        let in_flight = InFlightMove {
            sync: self,
            armed: true,
        };
        tracing::debug!(item_id = %id, target = target_index, "Applied move locally");
        self.emit(SyncEvent::Reordered { order });

        let result = self.call(self.backend.persist_order(&request)).await;
        self.ensure_active()?;

        match result {
            Ok(()) => {
                let order = {
                    let mut store = self.store();
                    store.acknowledge()?;
                    store.snapshot()
                };
                in_flight.disarm();
                tracing::info!(item_id = %id, len = order.len(), "Order persisted");
                self.emit(SyncEvent::Persisted {
                    order: order.clone(),
                });
                Ok(MoveOutcome::Persisted { order })
            }
            Err(error) => {
                tracing::warn!(item_id = %id, %error, "Persisting order failed, rolling back");
                self.store().rollback()?;

                let refetched = match self.call(self.backend.fetch_order()).await {
                    Ok(items) => {
                        self.ensure_active()?;
                        self.store().load(items);
                        true
                    }
                    Err(refetch_error) => {
                        self.ensure_active()?;
                        tracing::warn!(error = %refetch_error, "Re-fetch after rollback failed");
                        false
                    }
                };
                in_flight.disarm();

                let order = self.current_order();
                self.emit(SyncEvent::ReorderFailed {
                    error: error.to_string(),
                    refetched,
                    order: order.clone(),
                });
                Ok(MoveOutcome::RolledBack {
                    error,
                    refetched,
                    order,
                })
            }
        }
    }

    /// Delete an item at the backend, then locally.
    pub async fn remove_item(&self, id: &str) -> Result<Item> {
        let _gate = self.gate.lock().await;
        self.ensure_active()?;
        self.reload_if_stale().await?;

        if !self.store().contains(id) {
            return Err(quiz_order_engine::Error::ItemNotFound(id.to_string()).into());
        }

        let result = self.call(self.backend.delete_item(id)).await;
        self.ensure_active()?;

        match result {
            Ok(()) => {
                let (removed, order) = {
                    let mut store = self.store();
                    let removed = store.remove_item(id)?;
                    (removed, store.snapshot())
                };
                tracing::info!(item_id = %id, "Item removed");
                self.emit(SyncEvent::Removed {
                    id: removed.id.clone(),
                    order,
                });
                Ok(removed)
            }
            Err(error) => {
                tracing::warn!(item_id = %id, %error, "Removing item failed");
                self.emit(SyncEvent::RemoveFailed {
                    id: id.to_string(),
                    error: error.to_string(),
                });
                Err(Error::Persistence(error))
            }
        }
    }

    /// Create a new item at the backend and append it locally.
    ///
    /// The local collection only changes once the backend returns the stored
    /// item with its id.
    pub async fn create_item(&self, payload: Value) -> Result<Item> {
        let _gate = self.gate.lock().await;
        self.ensure_active()?;
        self.reload_if_stale().await?;

        let result = self.call(self.backend.create_item(&payload)).await;
        self.ensure_active()?;

        match result {
            Ok(item) => {
                let (created, order) = {
                    let mut store = self.store();
                    store.push_item(item.clone())?;
                    let created = store.get(&item.id).cloned().unwrap_or(item);
                    (created, store.snapshot())
                };
                tracing::info!(item_id = %created.id, rank = created.rank, "Item created");
                self.emit(SyncEvent::Created {
                    id: created.id.clone(),
                    order,
                });
                Ok(created)
            }
            Err(error) => {
                tracing::warn!(%error, "Creating item failed");
                self.emit(SyncEvent::CreateFailed {
                    error: error.to_string(),
                });
                Err(Error::Persistence(error))
            }
        }
    }

    /// Attach existing items at the backend and reload the order.
    pub async fn attach_items<I, S>(&self, ids: I) -> Result<Snapshot>
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemId>,
    {
        let request = AttachRequest::new(ids);
        let _gate = self.gate.lock().await;
        self.ensure_active()?;

        self.call(self.backend.attach_items(&request)).await?;
        self.ensure_active()?;
        tracing::info!(count = request.item_ids.len(), "Items attached");

        self.reload().await
    }

    /// Re-fetch first if an abandoned move left the order in doubt.
    async fn reload_if_stale(&self) -> Result<()> {
        if self.is_stale() {
            tracing::debug!("Collection is stale, reloading before next operation");
            self.reload().await?;
        }
        Ok(())
    }

    /// Fetch and load the backend order. Caller holds the gate.
    async fn reload(&self) -> Result<Snapshot> {
        let items = self.call(self.backend.fetch_order()).await?;
        self.ensure_active()?;

        let order = {
            let mut store = self.store();
            store.load(items);
            store.snapshot()
        };
        self.stale.store(false, Ordering::SeqCst);
        tracing::debug!(len = order.len(), "Loaded order from backend");
        self.emit(SyncEvent::Refreshed {
            order: order.clone(),
        });
        Ok(order)
    }

    /// Run a backend call under the request timeout.
    async fn call<T>(
        &self,
        request: impl Future<Output = std::result::Result<T, BackendError>>,
    ) -> std::result::Result<T, BackendError> {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(BackendError::Timeout(self.timeout)),
        }
    }
}
