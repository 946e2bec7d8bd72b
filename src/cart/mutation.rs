//! Group-level mutations fanned out over the backing physical rows.
//!
//! A user-facing increment/decrement/delete targets a *group*, but the
//! store only knows physical rows, so every operation fans out over the
//! group's contributing row ids. Each group carries its own busy marker:
//! two distinct groups may mutate concurrently, one group may not.

use crate::cart::grouping::ItemGroup;
use crate::error::CartError;
use crate::ids::{GroupKey, ItemId};
use crate::store::CartStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Maximum quantity a single row may be set to.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// The kind of in-flight mutation recorded in a busy marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationKind {
    Increment,
    Decrement,
    Delete,
}

/// Result of requesting a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The fan-out ran to completion.
    Applied,
    /// The group already had an in-flight mutation; nothing was issued.
    Busy,
}

/// Coordinates group-level mutations against the cart store.
///
/// The busy map is the only shared state; its lock is never held across a
/// store request. A marker is cleared unconditionally when the operation
/// settles, success or failure — there is no rollback across a partial
/// fan-out, and callers refetch the snapshot either way.
pub struct MutationCoordinator<S> {
    store: Arc<S>,
    busy: Mutex<HashMap<GroupKey, MutationKind>>,
}

impl<S: CartStore> MutationCoordinator<S> {
    /// Create a coordinator over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            busy: Mutex::new(HashMap::new()),
        }
    }

    /// Increase every contributing row of the group by one unit.
    pub async fn increment(&self, group: &ItemGroup) -> Result<MutationOutcome, CartError> {
        self.adjust(group, 1, MutationKind::Increment).await
    }

    /// Decrease every contributing row of the group by one unit; rows
    /// reaching zero are deleted. For a group spanning several rows the
    /// aggregate quantity drops by the row count, not by 1 — the store has
    /// no group-level operation, and the fan-out applies the delta to each
    /// row.
    pub async fn decrement(&self, group: &ItemGroup) -> Result<MutationOutcome, CartError> {
        self.adjust(group, -1, MutationKind::Decrement).await
    }

    /// Delete every contributing row of the group.
    pub async fn remove_group(&self, group: &ItemGroup) -> Result<MutationOutcome, CartError> {
        if !self.begin(&group.key, MutationKind::Delete).await {
            return Ok(MutationOutcome::Busy);
        }

        let result = self.delete_rows(&group.item_ids).await;
        self.finish(&group.key).await;
        result.map(|()| MutationOutcome::Applied)
    }

    /// Whether the group currently has an in-flight mutation.
    pub async fn is_busy(&self, key: &GroupKey) -> bool {
        self.busy.lock().await.contains_key(key)
    }

    /// The in-flight mutation kind for a group, if any. Rendering layers
    /// use this for button-level disablement.
    pub async fn busy_kind(&self, key: &GroupKey) -> Option<MutationKind> {
        self.busy.lock().await.get(key).copied()
    }

    async fn adjust(
        &self,
        group: &ItemGroup,
        delta: i64,
        kind: MutationKind,
    ) -> Result<MutationOutcome, CartError> {
        if !self.begin(&group.key, kind).await {
            return Ok(MutationOutcome::Busy);
        }

        let result = self.fan_out(&group.item_ids, delta).await;
        self.finish(&group.key).await;
        result.map(|()| MutationOutcome::Applied)
    }

    /// Set the busy marker; `false` means the group is already busy and
    /// the request must be rejected without touching the store.
    async fn begin(&self, key: &GroupKey, kind: MutationKind) -> bool {
        let mut busy = self.busy.lock().await;
        if busy.contains_key(key) {
            return false;
        }
        busy.insert(key.clone(), kind);
        true
    }

    async fn finish(&self, key: &GroupKey) {
        self.busy.lock().await.remove(key);
    }

    async fn fan_out(&self, item_ids: &[ItemId], delta: i64) -> Result<(), CartError> {
        // The fan-out works against the freshest persisted quantities, not
        // the possibly stale ones captured in the group.
        let snapshot = self.store.fetch_items().await?;
        let quantities: HashMap<&ItemId, i64> =
            snapshot.iter().map(|i| (&i.id, i.quantity)).collect();

        for id in item_ids {
            let Some(current) = quantities.get(id) else {
                tracing::warn!(row = %id, "row vanished between snapshot and fan-out; skipping");
                continue;
            };
            let new_quantity = current.saturating_add(delta);
            if new_quantity > 0 {
                self.store
                    .set_quantity(id, new_quantity.min(MAX_QUANTITY_PER_ITEM))
                    .await?;
            } else {
                self.store.delete_item(id).await?;
            }
        }
        Ok(())
    }

    async fn delete_rows(&self, item_ids: &[ItemId]) -> Result<(), CartError> {
        for id in item_ids {
            self.store.delete_item(id).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::grouping::group_items;
    use crate::cart::item::LineItem;
    use crate::error::StoreError;
    use crate::money::Money;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    fn latte(id: &str, quantity: i64) -> LineItem {
        LineItem::catalog(id, "latte", "Latte", quantity, Money::from_major(100))
    }

    async fn single_group(store: &MemoryStore) -> ItemGroup {
        let mut groups = group_items(&store.snapshot().await);
        assert_eq!(groups.len(), 1);
        groups.remove(0)
    }

    #[tokio::test]
    async fn decrement_fans_out_to_every_backing_row() {
        let store = Arc::new(MemoryStore::new(vec![latte("row-1", 3), latte("row-2", 2)]));
        let coordinator = MutationCoordinator::new(store.clone());
        let group = single_group(&store).await;
        assert_eq!(group.quantity, 5);

        let outcome = coordinator.decrement(&group).await.unwrap();
        assert_eq!(outcome, MutationOutcome::Applied);

        // Both rows dropped by one: the aggregate falls by 2, not 1.
        let items = store.snapshot().await;
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[1].quantity, 1);
        assert_eq!(single_group(&store).await.quantity, 3);
    }

    #[tokio::test]
    async fn decrement_to_zero_deletes_the_row() {
        let store = Arc::new(MemoryStore::new(vec![latte("row-1", 1)]));
        let coordinator = MutationCoordinator::new(store.clone());
        let group = single_group(&store).await;

        coordinator.decrement(&group).await.unwrap();
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn increment_raises_every_backing_row() {
        let store = Arc::new(MemoryStore::new(vec![latte("row-1", 1), latte("row-2", 4)]));
        let coordinator = MutationCoordinator::new(store.clone());
        let group = single_group(&store).await;

        coordinator.increment(&group).await.unwrap();

        let items = store.snapshot().await;
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[1].quantity, 5);
    }

    #[tokio::test]
    async fn remove_group_deletes_all_backing_rows() {
        let store = Arc::new(MemoryStore::new(vec![
            latte("row-1", 3),
            latte("row-2", 2),
            LineItem::catalog("row-3", "mocha", "Mocha", 1, Money::from_major(120)),
        ]));
        let coordinator = MutationCoordinator::new(store.clone());
        let groups = group_items(&store.snapshot().await);
        let latte_group = &groups[0];

        coordinator.remove_group(latte_group).await.unwrap();

        let items = store.snapshot().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Mocha");
    }

    #[tokio::test]
    async fn vanished_row_is_skipped_not_fatal() {
        let store = Arc::new(MemoryStore::new(vec![latte("row-1", 2)]));
        let coordinator = MutationCoordinator::new(store.clone());
        let mut group = single_group(&store).await;
        // Another session already deleted a row this group still lists.
        group.item_ids.push(ItemId::new("row-gone"));

        let outcome = coordinator.increment(&group).await.unwrap();
        assert_eq!(outcome, MutationOutcome::Applied);
        assert_eq!(store.snapshot().await[0].quantity, 3);
    }

    #[tokio::test]
    async fn failure_clears_the_busy_marker() {
        let store = Arc::new(MemoryStore::new(vec![latte("row-1", 2)]));
        let coordinator = MutationCoordinator::new(store.clone());
        let group = single_group(&store).await;

        store.fail_next().await;
        let result = coordinator.decrement(&group).await;
        assert!(matches!(result, Err(CartError::Store(StoreError::Unavailable(_)))));

        // The marker settled with the failure; the retry is not rejected.
        assert!(!coordinator.is_busy(&group.key).await);
        let outcome = coordinator.decrement(&group).await.unwrap();
        assert_eq!(outcome, MutationOutcome::Applied);
        assert_eq!(store.snapshot().await[0].quantity, 1);
    }

    /// Store that parks inside `set_quantity` until released, to hold a
    /// mutation in flight.
    struct ParkedStore {
        inner: MemoryStore,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl CartStore for ParkedStore {
        async fn fetch_items(&self) -> Result<Vec<LineItem>, StoreError> {
            self.inner.fetch_items().await
        }

        async fn set_quantity(&self, id: &ItemId, quantity: i64) -> Result<(), StoreError> {
            self.entered.notify_one();
            self.release.notified().await;
            self.inner.set_quantity(id, quantity).await
        }

        async fn delete_item(&self, id: &ItemId) -> Result<(), StoreError> {
            self.inner.delete_item(id).await
        }
    }

    #[tokio::test]
    async fn overlapping_mutation_on_same_group_is_rejected() {
        let store = Arc::new(ParkedStore {
            inner: MemoryStore::new(vec![latte("row-1", 2)]),
            entered: Notify::new(),
            release: Notify::new(),
        });
        let coordinator = Arc::new(MutationCoordinator::new(store.clone()));
        let group = {
            let mut groups = group_items(&store.inner.snapshot().await);
            groups.remove(0)
        };

        let in_flight = {
            let coordinator = coordinator.clone();
            let group = group.clone();
            tokio::spawn(async move { coordinator.increment(&group).await })
        };

        // Wait until the first mutation is parked inside the store.
        store.entered.notified().await;
        assert!(coordinator.is_busy(&group.key).await);
        assert_eq!(
            coordinator.busy_kind(&group.key).await,
            Some(MutationKind::Increment)
        );

        let outcome = coordinator.decrement(&group).await.unwrap();
        assert_eq!(outcome, MutationOutcome::Busy);
        // The rejected call issued nothing against the store.
        assert_eq!(store.inner.snapshot().await[0].quantity, 2);

        store.release.notify_one();
        let first = in_flight.await.unwrap().unwrap();
        assert_eq!(first, MutationOutcome::Applied);
        assert_eq!(store.inner.snapshot().await[0].quantity, 3);
        assert!(!coordinator.is_busy(&group.key).await);
    }

    #[tokio::test]
    async fn distinct_groups_are_independent() {
        let store = Arc::new(MemoryStore::new(vec![
            latte("row-1", 1),
            LineItem::catalog("row-2", "mocha", "Mocha", 1, Money::from_major(120)),
        ]));
        let coordinator = MutationCoordinator::new(store.clone());
        let groups = group_items(&store.snapshot().await);

        // A busy marker on one group does not affect the other.
        assert_eq!(
            coordinator.increment(&groups[0]).await.unwrap(),
            MutationOutcome::Applied
        );
        assert_eq!(
            coordinator.increment(&groups[1]).await.unwrap(),
            MutationOutcome::Applied
        );
    }
}
