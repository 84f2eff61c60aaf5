//! Client side of the inventory widget: the remote items gateway, the list controller and the
//! rendering seam it writes through.

pub mod collection;
pub mod config;
mod controller;
pub mod error;
pub mod gateway;
pub mod view;

pub use collection::{InventoryCollection, InventoryEntry, SyncState};
pub use config::{load_settings, ClientSettings};
pub use controller::{
    InventoryEvent, InventoryListController, ADD_FAILED_ALERT, DELETE_FAILED_ALERT,
    DELETE_SUCCESS_NOTICE, MISSING_NAME_NOTICE,
};
pub use error::{InventoryError, TransportError};
pub use gateway::{HttpItemsGateway, ItemsGateway, RemoveReceipt};
pub use view::{InventoryView, ViewTree, EMPTY_MESSAGE};

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod gateway_tests;
