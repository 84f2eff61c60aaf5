//! The inventory list widget: local collection, optimistic view patches and reconciliation
//! against the remote collection.

use shared::domain::{timestamp_now, ItemDraft, ItemId};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::{
    collection::{InventoryCollection, SyncState},
    error::InventoryError,
    gateway::{ItemsGateway, RemoveReceipt},
    view::{InventoryView, EMPTY_MESSAGE},
};

pub const MISSING_NAME_NOTICE: &str = "Please enter an item name.";
pub const ADD_FAILED_ALERT: &str = "Unable to add item. Please try again later.";
pub const DELETE_FAILED_ALERT: &str = "Unable to delete item. Please try again later.";
pub const DELETE_SUCCESS_NOTICE: &str = "Item deleted successfully!";

const EVENT_CAPACITY: usize = 64;

/// User-visible notices published by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryEvent {
    Validation(String),
    Alert(String),
    Info(String),
}

/// Owns the item collection and keeps it and the view in step with the remote collection.
///
/// Operations take `&mut self`, so one controller never has two gateway calls in flight.
/// Local ids come from a counter and are never handed out twice in a session.
pub struct InventoryListController<G, V> {
    gateway: G,
    view: V,
    collection: InventoryCollection,
    events: broadcast::Sender<InventoryEvent>,
}

impl<G: ItemsGateway, V: InventoryView> InventoryListController<G, V> {
    pub fn new(gateway: G, view: V) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            gateway,
            view,
            collection: InventoryCollection::new(),
            events,
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<InventoryEvent> {
        self.events.subscribe()
    }

    pub fn collection(&self) -> &InventoryCollection {
        &self.collection
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Loads the remote collection once and renders it. Returns the number of items loaded.
    pub async fn initialize(&mut self) -> Result<usize, InventoryError> {
        match self.gateway.list().await {
            Ok(items) => {
                let count = items.len();
                self.collection.replace_all(items);
                self.render_collection();
                info!(count, "inventory loaded");
                Ok(count)
            }
            Err(err) => {
                error!(error = %err, "failed to load inventory");
                self.notify(InventoryEvent::Alert(format!("Error: {err}")));
                self.collection.replace_all(Vec::new());
                self.view.render_empty(EMPTY_MESSAGE);
                Err(err.into())
            }
        }
    }

    /// Adds an item: the row is shown as pending straight away and settled once the remote
    /// create resolves. A failed create leaves the row in place, tagged as failed.
    pub async fn add(&mut self, draft: ItemDraft) -> Result<ItemId, InventoryError> {
        if !draft.has_name() {
            warn!("rejected item without a name");
            self.notify(InventoryEvent::Validation(MISSING_NAME_NOTICE.to_string()));
            return Err(InventoryError::Validation(MISSING_NAME_NOTICE.to_string()));
        }

        let Some(item_id) = self.collection.allocate_id() else {
            error!(name = %draft.name, "no item id left to assign");
            self.notify(InventoryEvent::Alert(ADD_FAILED_ALERT.to_string()));
            return Err(InventoryError::IdsExhausted);
        };
        let item = draft.clone().into_item(item_id, timestamp_now());
        let entry = self.collection.push_pending(item);
        if self.view.has_list() {
            self.view.append_row(entry);
        } else {
            self.view.render_list(self.collection.entries());
        }
        debug!(%item_id, name = %draft.name, "item staged");

        match self.gateway.create(&draft).await {
            Ok(created) => {
                if let Some(entry) = self.collection.confirm(item_id, created.item_id) {
                    self.view.update_row(entry);
                }
                info!(%item_id, remote_id = %created.item_id, "item added");
                Ok(item_id)
            }
            Err(err) => {
                if let Some(entry) = self.collection.mark_failed(item_id) {
                    self.view.update_row(entry);
                }
                error!(%item_id, error = %err, "failed to add item");
                self.notify(InventoryEvent::Alert(ADD_FAILED_ALERT.to_string()));
                Err(err.into())
            }
        }
    }

    /// Deletes an item: the row goes away immediately, the entry once the remote confirms.
    /// A failed remote delete puts the row back.
    pub async fn delete(
        &mut self,
        item_id: ItemId,
    ) -> Result<Option<RemoveReceipt>, InventoryError> {
        self.view.remove_row(item_id);

        let entry = self.collection.get(item_id);
        if entry.is_some_and(|entry| entry.state == SyncState::Failed) {
            self.collection.remove(item_id);
            info!(%item_id, "discarded unsaved item");
            self.show_empty_if_drained();
            return Ok(None);
        }
        let remote_id = entry.and_then(|entry| entry.remote_id).unwrap_or(item_id);

        match self.gateway.remove(remote_id).await {
            Ok(receipt) => {
                self.collection.remove(item_id);
                info!(%item_id, %remote_id, confirmed = receipt.is_some(), "item deleted");
                if receipt.is_some() {
                    self.notify(InventoryEvent::Info(DELETE_SUCCESS_NOTICE.to_string()));
                }
                self.show_empty_if_drained();
                Ok(receipt)
            }
            Err(err) => {
                error!(%item_id, %remote_id, error = %err, "failed to delete item");
                self.notify(InventoryEvent::Alert(DELETE_FAILED_ALERT.to_string()));
                self.render_collection();
                Err(err.into())
            }
        }
    }

    /// Full re-render of the current collection.
    pub fn refresh_view(&mut self) {
        self.render_collection();
    }

    fn render_collection(&mut self) {
        if self.collection.is_empty() {
            self.view.render_empty(EMPTY_MESSAGE);
        } else {
            self.view.render_list(self.collection.entries());
        }
    }

    fn show_empty_if_drained(&mut self) {
        if self.collection.is_empty() {
            self.view.render_empty(EMPTY_MESSAGE);
        }
    }

    fn notify(&self, event: InventoryEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
