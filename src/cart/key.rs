//! Canonical grouping keys.
//!
//! Two physical rows represent "the same selection" iff their keys are
//! equal. The key is built from the row's semantic identity only:
//! product + size + add-on set for catalog products, or drink name +
//! ingredient set + size for custom drinks.

use crate::cart::item::LineItem;
use crate::error::DerivationError;
use crate::ids::GroupKey;

/// Field separator inside a grouping key.
///
/// Must never appear in identifiers, names, or size labels, so segments
/// from different fields cannot collide.
pub const KEY_SEP: char = '|';

/// Derive the canonical grouping key for one physical row.
///
/// Custom drinks key on `custom|name|<sorted ingredient ids>|<size>`;
/// per-ingredient quantities are deliberately excluded, so two custom
/// drinks with the same ingredient set but different per-ingredient
/// quantities still merge. Catalog products key on
/// `<product id>|<size>|<sorted add-on ids>`, making the add-on set
/// order-insensitive. Empty segments are valid.
///
/// A row with neither a product reference nor a custom-drink marker has
/// no identity to key on and yields a [`DerivationError`].
pub fn derive_group_key(item: &LineItem) -> Result<GroupKey, DerivationError> {
    if let Some(custom) = &item.custom {
        let ingredient_key = sorted_id_list(custom.ingredients.iter().map(|i| i.id.as_str()));
        let size = custom
            .size_label
            .as_deref()
            .or(item.size.as_deref())
            .unwrap_or("");
        return Ok(GroupKey::new(format!(
            "custom{sep}{name}{sep}{ingredient_key}{sep}{size}",
            sep = KEY_SEP,
            name = custom.name,
        )));
    }

    let Some(product_id) = &item.product_id else {
        return Err(DerivationError::MissingIdentity(item.id.clone()));
    };

    let add_on_key = sorted_id_list(item.add_ons.iter().map(|a| a.id.as_str()));
    let size = item.size.as_deref().unwrap_or("");
    Ok(GroupKey::new(format!(
        "{product_id}{sep}{size}{sep}{add_on_key}",
        sep = KEY_SEP,
    )))
}

/// Sort identifiers ascending and comma-join them, so set-equal inputs
/// produce identical segments regardless of stored order.
fn sorted_id_list<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    let mut ids: Vec<&str> = ids.collect();
    ids.sort_unstable();
    ids.join(",")
}
