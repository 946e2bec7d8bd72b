//! The storage seam.
//!
//! The engine never persists anything itself; it reads the cart wholesale
//! and issues exactly two kinds of mutation: set a row's quantity, or
//! delete a row. Anything beyond that narrow surface belongs to the
//! storage collaborator.

use crate::cart::LineItem;
use crate::error::StoreError;
use crate::ids::ItemId;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// External cart-storage collaborator.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Fetch the full snapshot of physical cart rows.
    async fn fetch_items(&self) -> Result<Vec<LineItem>, StoreError>;

    /// Set the quantity of one row. `quantity` is always > 0; rows that
    /// would reach zero are deleted instead.
    async fn set_quantity(&self, id: &ItemId, quantity: i64) -> Result<(), StoreError>;

    /// Delete one row.
    async fn delete_item(&self, id: &ItemId) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
struct MemoryInner {
    items: Vec<LineItem>,
    fail_next: bool,
}

/// In-memory [`CartStore`] for tests and embedding.
///
/// `fail_next` makes the next mutation return
/// [`StoreError::Unavailable`], for exercising failure paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    /// Create a store seeded with the given rows.
    pub fn new(items: Vec<LineItem>) -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                items,
                fail_next: false,
            }),
        }
    }

    /// Make the next mutation fail with [`StoreError::Unavailable`].
    pub async fn fail_next(&self) {
        self.inner.lock().await.fail_next = true;
    }

    /// Current rows, for assertions.
    pub async fn snapshot(&self) -> Vec<LineItem> {
        self.inner.lock().await.items.clone()
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn fetch_items(&self) -> Result<Vec<LineItem>, StoreError> {
        Ok(self.inner.lock().await.items.clone())
    }

    async fn set_quantity(&self, id: &ItemId, quantity: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_next {
            inner.fail_next = false;
            return Err(StoreError::Unavailable("injected failure".into()));
        }
        let item = inner
            .items
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        item.quantity = quantity;
        Ok(())
    }

    async fn delete_item(&self, id: &ItemId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_next {
            inner.fail_next = false;
            return Err(StoreError::Unavailable("injected failure".into()));
        }
        let before = inner.items.len();
        inner.items.retain(|i| &i.id != id);
        if inner.items.len() == before {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(())
    }
}
