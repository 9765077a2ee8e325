//! Client session state: the last resolved location and the stores fetched for it.
//!
//! [`reduce`] is the pure transition function. [`StoreHandle`] owns the live
//! state behind a `watch` channel so views can subscribe to changes instead of
//! polling.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::stores::CoffeeStore;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    pub lat_long: String,
    pub coffee_stores: Vec<CoffeeStore>,
}

/// Intents accepted by the state owner.
///
/// On the wire an action is `{"type": "SET_LAT_LONG", "payload": "51.5,-0.13"}`.
/// Any other `type` decodes as [`StoreAction::Unrecognized`] and is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreAction {
    SetLatLong(String),
    SetCoffeeStores(Vec<CoffeeStore>),
    #[serde(other)]
    Unrecognized,
}

/// Applies `action` to `state`. Each store list fully replaces the previous one.
#[must_use]
pub fn reduce(mut state: StoreState, action: StoreAction) -> StoreState {
    state.apply(action);
    state
}

impl StoreState {
    /// In-place form of [`reduce`]. Returns `false` when nothing was applied.
    pub fn apply(&mut self, action: StoreAction) -> bool {
        match action {
            StoreAction::SetLatLong(lat_long) => {
                self.lat_long = lat_long;
                true
            }
            StoreAction::SetCoffeeStores(stores) => {
                self.coffee_stores = stores;
                true
            }
            StoreAction::Unrecognized => false,
        }
    }
}

/// Single owner of a session's [`StoreState`].
///
/// Cloning the handle shares the same state. Subscribers are woken only by
/// dispatches that change something.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    tx: Arc<watch::Sender<StoreState>>,
}

impl Default for StoreHandle {
    fn default() -> Self {
        Self::new(StoreState::default())
    }
}

impl StoreHandle {
    #[must_use]
    pub fn new(initial: StoreState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Applies `action` and notifies subscribers if the state changed.
    pub fn dispatch(&self, action: StoreAction) -> bool {
        let changed = self.tx.send_if_modified(|state| state.apply(action));
        if changed {
            tracing::debug!("store state updated");
        }
        changed
    }

    #[must_use]
    pub fn snapshot(&self) -> StoreState {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn lat_long(&self) -> String {
        self.tx.borrow().lat_long.clone()
    }

    /// Looks up a store from the current list by provider id.
    #[must_use]
    pub fn find_store(&self, id: &str) -> Option<CoffeeStore> {
        self.tx
            .borrow()
            .coffee_stores
            .iter()
            .find(|store| store.id == id)
            .cloned()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.tx.subscribe()
    }
}
