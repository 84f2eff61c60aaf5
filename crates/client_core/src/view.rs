//! Rendering capability used by the list controller, plus a headless view tree.

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use shared::domain::ItemId;

use crate::collection::{InventoryEntry, SyncState};

/// Container slot the widget renders into.
pub const ITEMS_SLOT: &str = "items";
pub const ITEMS_LIST_SLOT: &str = "items-list";
pub const USER_MESSAGE_SLOT: &str = "user-message";
pub const LOADING_TEXT: &str = "Loading...";
pub const EMPTY_MESSAGE: &str = "Add some new items please!";
pub const DELETE_CONTROL_LABEL: &str = "X";

pub fn row_node_id(item_id: ItemId) -> String {
    format!("item-{item_id}")
}

/// Output channel of the list controller.
///
/// `render_list` and `render_empty` replace whatever the slot currently holds, so the list
/// container and the empty message are never shown together.
pub trait InventoryView {
    fn render_list(&mut self, entries: &[InventoryEntry]);
    fn render_empty(&mut self, message: &str);
    fn append_row(&mut self, entry: &InventoryEntry);
    fn remove_row(&mut self, item_id: ItemId) -> bool;
    fn update_row(&mut self, entry: &InventoryEntry) -> bool;
    fn has_list(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowNode {
    pub node_id: String,
    pub item_id: ItemId,
    pub delete_label: &'static str,
    pub name: String,
    pub status: String,
    pub created_at: String,
    pub state: SyncState,
}

impl RowNode {
    fn from_entry(entry: &InventoryEntry) -> Self {
        Self {
            node_id: row_node_id(entry.item_id()),
            item_id: entry.item_id(),
            delete_label: DELETE_CONTROL_LABEL,
            name: entry.item.name.clone(),
            status: entry.item.status.clone(),
            created_at: entry.item.created_at.clone(),
            state: entry.state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotContent {
    Loading,
    List(Vec<RowNode>),
    Message(String),
}

/// Headless stand-in for the `items` container of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTree {
    content: SlotContent,
}

impl Default for ViewTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTree {
    pub fn new() -> Self {
        Self {
            content: SlotContent::Loading,
        }
    }

    pub fn content(&self) -> &SlotContent {
        &self.content
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.content, SlotContent::Loading)
    }

    pub fn rows(&self) -> &[RowNode] {
        match &self.content {
            SlotContent::List(rows) => rows,
            _ => &[],
        }
    }

    pub fn message(&self) -> Option<&str> {
        match &self.content {
            SlotContent::Message(text) => Some(text),
            _ => None,
        }
    }

    pub fn find_row(&self, item_id: ItemId) -> Option<&RowNode> {
        self.rows().iter().find(|row| row.item_id == item_id)
    }

    /// Ids of every node currently mounted under the slot, in document order.
    pub fn node_ids(&self) -> Vec<String> {
        match &self.content {
            SlotContent::Loading => Vec::new(),
            SlotContent::Message(_) => vec![USER_MESSAGE_SLOT.to_string()],
            SlotContent::List(rows) => std::iter::once(ITEMS_LIST_SLOT.to_string())
                .chain(rows.iter().map(|row| row.node_id.clone()))
                .collect(),
        }
    }
}

impl InventoryView for ViewTree {
    fn render_list(&mut self, entries: &[InventoryEntry]) {
        self.content = SlotContent::List(entries.iter().map(RowNode::from_entry).collect());
    }

    fn render_empty(&mut self, message: &str) {
        self.content = SlotContent::Message(message.to_string());
    }

    fn append_row(&mut self, entry: &InventoryEntry) {
        let row = RowNode::from_entry(entry);
        let SlotContent::List(rows) = &mut self.content else {
            self.content = SlotContent::List(vec![row]);
            return;
        };
        match rows.iter_mut().find(|r| r.item_id == row.item_id) {
            Some(existing) => *existing = row,
            None => rows.push(row),
        }
    }

    fn remove_row(&mut self, item_id: ItemId) -> bool {
        let SlotContent::List(rows) = &mut self.content else {
            return false;
        };
        let before = rows.len();
        rows.retain(|row| row.item_id != item_id);
        rows.len() != before
    }

    fn update_row(&mut self, entry: &InventoryEntry) -> bool {
        let SlotContent::List(rows) = &mut self.content else {
            return false;
        };
        match rows.iter_mut().find(|row| row.item_id == entry.item_id()) {
            Some(row) => {
                *row = RowNode::from_entry(entry);
                true
            }
            None => false,
        }
    }

    fn has_list(&self) -> bool {
        matches!(self.content, SlotContent::List(_))
    }
}

impl fmt::Display for ViewTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#{ITEMS_SLOT}")?;
        match &self.content {
            SlotContent::Loading => writeln!(f, "  {LOADING_TEXT}"),
            SlotContent::Message(text) => writeln!(f, "  #{USER_MESSAGE_SLOT} {text}"),
            SlotContent::List(rows) => {
                writeln!(f, "  #{ITEMS_LIST_SLOT}")?;
                for row in rows {
                    write!(
                        f,
                        "    #{} [{}] {} | {} | {}",
                        row.node_id, row.delete_label, row.name, row.status, row.created_at
                    )?;
                    match row.state {
                        SyncState::Confirmed => writeln!(f)?,
                        SyncState::Pending => writeln!(f, " (saving)")?,
                        SyncState::Failed => writeln!(f, " (not saved)")?,
                    }
                }
                Ok(())
            }
        }
    }
}

fn lock<V>(view: &Mutex<V>) -> MutexGuard<'_, V> {
    view.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Lets a caller keep a handle on the view while the controller drives it.
impl<V: InventoryView> InventoryView for Arc<Mutex<V>> {
    fn render_list(&mut self, entries: &[InventoryEntry]) {
        lock(self).render_list(entries);
    }

    fn render_empty(&mut self, message: &str) {
        lock(self).render_empty(message);
    }

    fn append_row(&mut self, entry: &InventoryEntry) {
        lock(self).append_row(entry);
    }

    fn remove_row(&mut self, item_id: ItemId) -> bool {
        lock(self).remove_row(item_id)
    }

    fn update_row(&mut self, entry: &InventoryEntry) -> bool {
        lock(self).update_row(entry)
    }

    fn has_list(&self) -> bool {
        lock(self).has_list()
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::Item;

    use super::*;

    fn entry(id: i64, name: &str, state: SyncState) -> InventoryEntry {
        InventoryEntry {
            item: Item {
                item_id: ItemId(id),
                name: name.to_string(),
                status: "pending".to_string(),
                created_at: "2020-04-14T22:50:32.000Z".to_string(),
            },
            remote_id: Some(ItemId(id)),
            state,
        }
    }

    #[test]
    fn starts_with_loading_placeholder() {
        let tree = ViewTree::new();
        assert!(tree.is_loading());
        assert!(!tree.has_list());
        assert!(tree.node_ids().is_empty());
    }

    #[test]
    fn full_render_twice_keeps_one_row_per_item() {
        let entries = vec![
            entry(0, "Corn", SyncState::Confirmed),
            entry(1, "Beans", SyncState::Confirmed),
        ];
        let mut tree = ViewTree::new();
        tree.render_list(&entries);
        tree.render_list(&entries);
        assert_eq!(
            tree.node_ids(),
            vec!["items-list", "item-0", "item-1"]
        );
    }

    #[test]
    fn empty_message_replaces_list_container() {
        let mut tree = ViewTree::new();
        tree.render_list(&[entry(0, "Corn", SyncState::Confirmed)]);
        tree.render_empty(EMPTY_MESSAGE);
        tree.render_empty(EMPTY_MESSAGE);
        assert_eq!(tree.node_ids(), vec![USER_MESSAGE_SLOT]);
        assert_eq!(tree.message(), Some(EMPTY_MESSAGE));
    }

    #[test]
    fn rows_are_patched_in_place() {
        let mut tree = ViewTree::new();
        tree.render_list(&[entry(0, "Corn", SyncState::Confirmed)]);
        tree.append_row(&entry(1, "Beans", SyncState::Pending));
        assert!(tree.update_row(&entry(1, "Beans", SyncState::Failed)));
        assert_eq!(tree.find_row(ItemId(1)).map(|r| r.state), Some(SyncState::Failed));

        assert!(tree.remove_row(ItemId(0)));
        assert!(!tree.remove_row(ItemId(0)));
        assert_eq!(tree.node_ids(), vec!["items-list", "item-1"]);
    }

    #[test]
    fn display_marks_unsaved_rows() {
        let mut tree = ViewTree::new();
        tree.render_list(&[entry(3, "Corn", SyncState::Failed)]);
        let text = tree.to_string();
        assert!(text.contains("#item-3 [X] Corn | pending"));
        assert!(text.contains("(not saved)"));
    }
}
