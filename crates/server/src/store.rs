use shared::{
    domain::{timestamp_now, Item, ItemDraft, ItemId},
    error::{ApiException, ErrorCode},
    protocol::CreateItemRequest,
};

/// The remote items collection, kept in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub(crate) struct InventoryStore {
    items: Vec<Item>,
    next_id: i64,
}

impl InventoryStore {
    pub(crate) fn list(&self) -> Vec<Item> {
        self.items.clone()
    }

    pub(crate) fn create(&mut self, request: CreateItemRequest) -> Result<Item, ApiException> {
        let draft = ItemDraft::new(request.item_name, request.status);
        if !draft.has_name() {
            return Err(ApiException::new(
                ErrorCode::Validation,
                "item_name must not be blank",
            ));
        }
        let item = draft.into_item(ItemId(self.next_id), timestamp_now());
        self.next_id += 1;
        self.items.push(item.clone());
        Ok(item)
    }

    pub(crate) fn remove(&mut self, item_id: ItemId) -> Result<Item, ApiException> {
        let index = self
            .items
            .iter()
            .position(|item| item.item_id == item_id)
            .ok_or_else(|| {
                ApiException::new(ErrorCode::NotFound, format!("item {item_id} not found"))
            })?;
        Ok(self.items.remove(index))
    }
}
