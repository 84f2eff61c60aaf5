use serde::{Deserialize, Serialize};

use crate::domain::{ItemDraft, ItemId};

/// Body of `POST /inventory`. Only the name and status cross the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub item_name: String,
    pub status: String,
}

impl From<&ItemDraft> for CreateItemRequest {
    fn from(draft: &ItemDraft) -> Self {
        Self {
            item_name: draft.name.clone(),
            status: draft.status.clone(),
        }
    }
}

/// Path segment under the API base for the inventory collection.
pub const INVENTORY_COLLECTION: &str = "inventory";

pub fn inventory_item_path(item_id: ItemId) -> String {
    format!("{INVENTORY_COLLECTION}/{item_id}")
}
