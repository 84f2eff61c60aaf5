//! In-memory item collection owned by the list controller.

use shared::domain::{Item, ItemId};

/// Reconciliation state of a single entry against the remote collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Rendered locally, remote create still in flight.
    Pending,
    Confirmed,
    /// Remote create failed; the entry exists only locally.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub item: Item,
    /// Id the remote collection knows this item by, once known.
    pub remote_id: Option<ItemId>,
    pub state: SyncState,
}

impl InventoryEntry {
    pub fn item_id(&self) -> ItemId {
        self.item.item_id
    }
}

/// Ordered entries plus the id counter. Insertion order is display order.
#[derive(Debug, Default)]
pub struct InventoryCollection {
    entries: Vec<InventoryEntry>,
    next_id: i64,
    /// Set once the id space above every id seen so far is used up.
    exhausted: bool,
}

impl InventoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every entry with confirmed copies of `items`.
    ///
    /// The id counter never moves backwards, so ids handed out earlier in the session are not
    /// reassigned to different items.
    pub fn replace_all(&mut self, items: Vec<Item>) {
        if let Some(max_id) = items.iter().map(|item| item.item_id.0).max() {
            match max_id.checked_add(1) {
                Some(next) => self.next_id = self.next_id.max(next),
                None => self.exhausted = true,
            }
        }
        self.entries = items
            .into_iter()
            .map(|item| InventoryEntry {
                remote_id: Some(item.item_id),
                item,
                state: SyncState::Confirmed,
            })
            .collect();
    }

    /// Next unused local id, or `None` once no id above every id seen so far is left.
    pub fn allocate_id(&mut self) -> Option<ItemId> {
        if self.exhausted {
            return None;
        }
        let id = ItemId(self.next_id);
        match self.next_id.checked_add(1) {
            Some(next) => self.next_id = next,
            None => self.exhausted = true,
        }
        Some(id)
    }

    pub fn push_pending(&mut self, item: Item) -> &InventoryEntry {
        self.entries.push(InventoryEntry {
            item,
            remote_id: None,
            state: SyncState::Pending,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn confirm(&mut self, item_id: ItemId, remote_id: ItemId) -> Option<&InventoryEntry> {
        let entry = self.get_mut(item_id)?;
        entry.remote_id = Some(remote_id);
        entry.state = SyncState::Confirmed;
        Some(entry)
    }

    pub fn mark_failed(&mut self, item_id: ItemId) -> Option<&InventoryEntry> {
        let entry = self.get_mut(item_id)?;
        entry.state = SyncState::Failed;
        Some(entry)
    }

    pub fn remove(&mut self, item_id: ItemId) -> Option<InventoryEntry> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.item_id() == item_id)?;
        Some(self.entries.remove(index))
    }

    pub fn get(&self, item_id: ItemId) -> Option<&InventoryEntry> {
        self.entries.iter().find(|entry| entry.item_id() == item_id)
    }

    fn get_mut(&mut self, item_id: ItemId) -> Option<&mut InventoryEntry> {
        self.entries
            .iter_mut()
            .find(|entry| entry.item_id() == item_id)
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.entries.iter().map(|entry| &entry.item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
