use std::fmt;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ItemId);

/// Status labels offered by the status selector. Status is otherwise opaque text.
pub const STATUS_IN_STOCK: &str = "in stock";
pub const STATUS_PENDING: &str = "pending";

/// An inventory item as exchanged with the remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: ItemId,
    #[serde(rename = "item_name")]
    pub name: String,
    pub status: String,
    #[serde(rename = "created_date")]
    pub created_at: String,
}

/// The user-supplied part of an item, before an id and timestamp are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub status: String,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn into_item(self, item_id: ItemId, created_at: impl Into<String>) -> Item {
        Item {
            item_id,
            name: self.name,
            status: self.status,
            created_at: created_at.into(),
        }
    }
}

/// Current instant as an ISO-8601 UTC timestamp with millisecond precision.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_uses_snake_case_wire_names() {
        let item = ItemDraft::new("Corn", STATUS_IN_STOCK)
            .into_item(ItemId(3), "2020-04-14T22:50:32.000Z");
        let value = serde_json::to_value(&item).expect("json");
        assert_eq!(
            value,
            serde_json::json!({
                "item_id": 3,
                "item_name": "Corn",
                "status": "in stock",
                "created_date": "2020-04-14T22:50:32.000Z",
            })
        );
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(!ItemDraft::new("", STATUS_PENDING).has_name());
        assert!(!ItemDraft::new("   ", STATUS_PENDING).has_name());
        assert!(ItemDraft::new("Corn", STATUS_PENDING).has_name());
    }

    #[test]
    fn timestamps_are_sortable_utc() {
        let stamp = timestamp_now();
        assert!(stamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
    }
}
