//! Folding physical rows into logical display groups.
//!
//! The physical collection is the single source of truth; groups are
//! recomputed from a full snapshot on every read rather than maintained
//! incrementally. O(n) per recomputation is fine at cart scale.

use crate::cart::item::{AddOn, CustomDrink, LineItem};
use crate::cart::key::derive_group_key;
use crate::ids::{GroupKey, ItemId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A logical cart group: one displayed row backed by one or more
/// physical rows that share a grouping key.
///
/// Derived in memory only; mutations target the physical rows, and the
/// next recomputation reflects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGroup {
    /// Canonical grouping key.
    pub key: GroupKey,
    /// Catalog product reference; `None` for custom drinks.
    pub product_id: Option<ProductId>,
    /// Display name from the representative row.
    pub name: String,
    /// Image reference from the representative row.
    pub image: Option<String>,
    /// Size label from the representative row.
    pub size: Option<String>,
    /// Unit base price from the representative row.
    pub base_price: Money,
    /// Add-ons from the representative row.
    pub add_ons: Vec<AddOn>,
    /// Custom-drink payload from the representative row.
    pub custom: Option<CustomDrink>,
    /// Aggregate quantity: sum over the contributing rows.
    pub quantity: i64,
    /// Contributing physical-row identifiers, in first-seen order.
    /// Never empty.
    pub item_ids: Vec<ItemId>,
}

impl ItemGroup {
    fn seed(key: GroupKey, item: &LineItem) -> Self {
        Self {
            key,
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            image: item.image.clone(),
            size: item.size.clone(),
            base_price: item.base_price,
            add_ons: item.add_ons.clone(),
            custom: item.custom.clone(),
            quantity: 0,
            item_ids: Vec::new(),
        }
    }

    /// Whether this group is a user-composed custom drink.
    pub fn is_custom(&self) -> bool {
        self.custom.is_some()
    }

    /// Number of physical rows backing this group.
    pub fn row_count(&self) -> usize {
        self.item_ids.len()
    }
}

/// Fold a snapshot of physical rows into logical groups.
///
/// Deterministic and total: groups come out in first-seen key order, the
/// first row with a given key seeds the group's display attributes, and
/// every row adds its quantity and id. Rows that cannot be keyed are
/// skipped and logged, never fatal — one malformed row must not block the
/// whole cart from rendering.
pub fn group_items(items: &[LineItem]) -> Vec<ItemGroup> {
    let mut groups: Vec<ItemGroup> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();

    for item in items {
        let key = match derive_group_key(item) {
            Ok(key) => key,
            Err(err) => {
                tracing::warn!(row = %item.id, %err, "skipping unkeyable cart row");
                continue;
            }
        };

        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(ItemGroup::seed(key, item));
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.quantity += item.quantity;
        group.item_ids.push(item.id.clone());
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::item::{AddOn, Ingredient};

    fn latte(id: &str, quantity: i64, add_ons: Vec<AddOn>) -> LineItem {
        LineItem::catalog(id, "latte", "Latte", quantity, Money::from_major(100))
            .with_size("Large")
            .with_add_ons(add_ons)
    }

    fn shot() -> AddOn {
        AddOn::new("addon-shot", "Extra Shot", Money::from_major(10))
    }

    fn syrup() -> AddOn {
        AddOn::new("addon-syrup", "Vanilla Syrup", Money::from_major(15))
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(group_items(&[]).is_empty());
    }

    #[test]
    fn rows_with_reordered_add_ons_merge() {
        let rows = vec![
            latte("row-1", 1, vec![shot(), syrup()]),
            latte("row-2", 2, vec![syrup(), shot()]),
        ];

        let groups = group_items(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].quantity, 3);
        assert_eq!(
            groups[0].item_ids,
            vec![ItemId::new("row-1"), ItemId::new("row-2")]
        );
    }

    #[test]
    fn different_sizes_do_not_merge() {
        let rows = vec![
            latte("row-1", 1, vec![]),
            latte("row-2", 1, vec![]).with_size("Small"),
        ];
        assert_eq!(group_items(&rows).len(), 2);
    }

    #[test]
    fn custom_rows_merge_across_ingredient_quantities() {
        let rows = vec![
            LineItem::custom_drink(
                "row-1",
                "My Blend",
                1,
                vec![
                    Ingredient::new("ing-espresso", "Espresso", Money::from_major(5), 2),
                    Ingredient::new("ing-milk", "Milk", Money::from_major(3), 1),
                ],
            ),
            LineItem::custom_drink(
                "row-2",
                "My Blend",
                2,
                vec![
                    Ingredient::new("ing-milk", "Milk", Money::from_major(3), 3),
                    Ingredient::new("ing-espresso", "Espresso", Money::from_major(5), 1),
                ],
            ),
        ];

        let groups = group_items(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].quantity, 3);
        assert_eq!(groups[0].row_count(), 2);
    }

    #[test]
    fn output_order_is_first_seen() {
        let rows = vec![
            latte("row-1", 1, vec![]),
            LineItem::catalog("row-2", "mocha", "Mocha", 1, Money::from_major(120)),
            latte("row-3", 1, vec![]),
        ];

        let groups = group_items(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Latte");
        assert_eq!(groups[1].name, "Mocha");
    }

    #[test]
    fn malformed_row_is_skipped_not_fatal() {
        let mut broken = latte("row-2", 5, vec![]);
        broken.product_id = None;

        let rows = vec![latte("row-1", 1, vec![]), broken];
        let groups = group_items(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].quantity, 1);
    }
}
