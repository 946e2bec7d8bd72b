//! Checkout selection over the current grouping.
//!
//! A plain set of grouping keys with explicit operations, independent of
//! any rendering layer. Keys whose group has disappeared from the latest
//! grouping are stale: they are treated as unselected when filtering and
//! never cause an error.

use crate::cart::grouping::ItemGroup;
use crate::ids::GroupKey;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The set of groups currently marked for checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    keys: HashSet<GroupKey>,
}

impl Selection {
    /// Whether a key is currently selected.
    pub fn contains(&self, key: &GroupKey) -> bool {
        self.keys.contains(key)
    }

    /// Toggle one key in or out of the selection.
    pub fn toggle(&mut self, key: GroupKey) {
        if !self.keys.remove(&key) {
            self.keys.insert(key);
        }
    }

    /// Whether every current group is selected.
    pub fn all_selected(&self, groups: &[ItemGroup]) -> bool {
        groups.iter().all(|g| self.keys.contains(&g.key))
    }

    /// Select every current group, or clear the selection if all are
    /// already selected. The set is replaced with exactly the current
    /// keys, dropping any stale ones.
    pub fn toggle_all(&mut self, groups: &[ItemGroup]) {
        if self.all_selected(groups) {
            self.keys.clear();
        } else {
            self.keys = groups.iter().map(|g| g.key.clone()).collect();
        }
    }

    /// Apply the auto-select rule against the latest grouping: when
    /// exactly one group exists and it is not yet selected, select it.
    /// Zero or two-or-more groups leave the selection untouched.
    pub fn reconcile(&mut self, groups: &[ItemGroup]) {
        if let [only] = groups {
            if !self.keys.contains(&only.key) {
                self.keys.insert(only.key.clone());
            }
        }
    }

    /// The selected subset of the current grouping, in grouping order.
    /// Stale keys drop out silently.
    pub fn selected<'a>(&self, groups: &'a [ItemGroup]) -> Vec<&'a ItemGroup> {
        groups.iter().filter(|g| self.keys.contains(&g.key)).collect()
    }

    /// Number of selected groups present in the current grouping.
    pub fn selected_count(&self, groups: &[ItemGroup]) -> usize {
        self.selected(groups).len()
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Whether no keys are selected at all (stale or not).
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::grouping::group_items;
    use crate::cart::item::LineItem;
    use crate::money::Money;

    fn two_groups() -> Vec<ItemGroup> {
        group_items(&[
            LineItem::catalog("row-1", "latte", "Latte", 1, Money::from_major(100)),
            LineItem::catalog("row-2", "mocha", "Mocha", 1, Money::from_major(120)),
        ])
    }

    #[test]
    fn singleton_grouping_is_auto_selected() {
        let groups = group_items(&[LineItem::catalog(
            "row-1",
            "latte",
            "Latte",
            1,
            Money::from_major(100),
        )]);

        let mut selection = Selection::default();
        selection.reconcile(&groups);
        assert!(selection.contains(&groups[0].key));
        assert_eq!(selection.selected_count(&groups), 1);
    }

    #[test]
    fn reconcile_leaves_multi_group_carts_alone() {
        let groups = two_groups();
        let mut selection = Selection::default();
        selection.reconcile(&groups);
        assert!(selection.is_empty());

        selection.reconcile(&[]);
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_is_symmetric() {
        let groups = two_groups();
        let mut selection = Selection::default();

        selection.toggle(groups[0].key.clone());
        assert!(selection.contains(&groups[0].key));

        selection.toggle(groups[0].key.clone());
        assert!(!selection.contains(&groups[0].key));
    }

    #[test]
    fn toggle_all_selects_then_clears() {
        let groups = two_groups();
        let mut selection = Selection::default();

        selection.toggle_all(&groups);
        assert_eq!(selection.selected_count(&groups), 2);

        selection.toggle_all(&groups);
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_all_from_partial_selects_everything() {
        let groups = two_groups();
        let mut selection = Selection::default();
        selection.toggle(groups[0].key.clone());

        selection.toggle_all(&groups);
        assert_eq!(selection.selected_count(&groups), 2);
    }

    #[test]
    fn stale_key_drops_out_of_selected_subset() {
        let groups = two_groups();
        let mut selection = Selection::default();
        selection.toggle(groups[0].key.clone());
        selection.toggle(groups[1].key.clone());

        // The latte group was fully removed from the cart.
        let remaining = group_items(&[LineItem::catalog(
            "row-2",
            "mocha",
            "Mocha",
            1,
            Money::from_major(120),
        )]);

        let picked = selection.selected(&remaining);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].name, "Mocha");
    }
}
