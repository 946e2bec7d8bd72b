//! Physical cart rows as persisted by the storage collaborator.

use crate::ids::{AddOnId, IngredientId, ItemId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A drink size tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl Size {
    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Small => "Small",
            Size::Medium => "Medium",
            Size::Large => "Large",
            Size::ExtraLarge => "Extra Large",
        }
    }

    /// Parse a size label, case-insensitively. Unrecognized labels return
    /// `None`; callers fall back to [`Size::Medium`] for tariff lookups.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "small" => Some(Size::Small),
            "medium" => Some(Size::Medium),
            "large" => Some(Size::Large),
            "extra large" | "extra-large" | "xl" => Some(Size::ExtraLarge),
            _ => None,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A selected add-on on a catalog product (e.g., "Extra Shot").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOn {
    /// Add-on identifier.
    pub id: AddOnId,
    /// Display name.
    pub name: String,
    /// Price added to the product's unit price.
    pub price: Money,
}

impl AddOn {
    pub fn new(id: impl Into<AddOnId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

/// One chosen ingredient of a user-composed custom drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient identifier.
    pub id: IngredientId,
    /// Display name.
    pub name: String,
    /// Price per unit of the ingredient.
    pub price: Money,
    /// Units of this ingredient in the drink.
    pub quantity: i64,
}

impl Ingredient {
    pub fn new(
        id: impl Into<IngredientId>,
        name: impl Into<String>,
        price: Money,
        quantity: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
        }
    }
}

/// The custom-drink half of a cart row.
///
/// Present iff the row represents a user-composed drink rather than a
/// catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDrink {
    /// User-chosen drink name.
    pub name: String,
    /// Drink image.
    pub image: Option<String>,
    /// Optional blend image.
    pub blend_image: Option<String>,
    /// Chosen ingredients with per-ingredient quantities.
    pub ingredients: Vec<Ingredient>,
    /// Free-form size label (may differ from the catalog size tiers).
    pub size_label: Option<String>,
}

/// One persisted cart row.
///
/// One row is written per add-to-cart action, so the same logical
/// selection may be spread across several rows; see [`crate::cart::group_items`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Row identifier, assigned by the backing store.
    pub id: ItemId,
    /// Catalog product reference; `None` for custom drinks.
    pub product_id: Option<ProductId>,
    /// Product or drink name (denormalized for display).
    pub name: String,
    /// Image reference.
    pub image: Option<String>,
    /// Selected size label, if any.
    pub size: Option<String>,
    /// Ordered quantity. Always >= 1; a row decremented to 0 is deleted,
    /// never stored at zero.
    pub quantity: i64,
    /// Unit base price (0 for custom drinks, which price by ingredients).
    pub base_price: Money,
    /// Selected add-ons.
    pub add_ons: Vec<AddOn>,
    /// Custom-drink payload; `Some` marks the row as a custom drink.
    pub custom: Option<CustomDrink>,
}

impl LineItem {
    /// Create a catalog-product row.
    pub fn catalog(
        id: impl Into<ItemId>,
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        quantity: i64,
        base_price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            product_id: Some(product_id.into()),
            name: name.into(),
            image: None,
            size: None,
            quantity,
            base_price,
            add_ons: Vec::new(),
            custom: None,
        }
    }

    /// Create a custom-drink row.
    pub fn custom_drink(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        quantity: i64,
        ingredients: Vec<Ingredient>,
    ) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            product_id: None,
            name: name.clone(),
            image: None,
            size: None,
            quantity,
            base_price: Money::zero(),
            add_ons: Vec::new(),
            custom: Some(CustomDrink {
                name,
                image: None,
                blend_image: None,
                ingredients,
                size_label: None,
            }),
        }
    }

    /// Set the size label.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the add-ons.
    pub fn with_add_ons(mut self, add_ons: Vec<AddOn>) -> Self {
        self.add_ons = add_ons;
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the custom size label (custom drinks only; no-op otherwise).
    pub fn with_custom_size(mut self, label: impl Into<String>) -> Self {
        if let Some(custom) = self.custom.as_mut() {
            custom.size_label = Some(label.into());
        }
        self
    }

    /// Whether this row is a user-composed custom drink.
    pub fn is_custom(&self) -> bool {
        self.custom.is_some()
    }

    /// The size label used for pricing: the custom label when present,
    /// otherwise the regular size field.
    pub fn effective_size(&self) -> Option<&str> {
        self.custom
            .as_ref()
            .and_then(|c| c.size_label.as_deref())
            .or(self.size.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_label_parsing() {
        assert_eq!(Size::from_label("large"), Some(Size::Large));
        assert_eq!(Size::from_label(" Extra Large "), Some(Size::ExtraLarge));
        assert_eq!(Size::from_label("venti"), None);
    }

    #[test]
    fn effective_size_prefers_custom_label() {
        let item = LineItem::custom_drink("row-1", "My Blend", 1, vec![])
            .with_size("Medium")
            .with_custom_size("Large");
        assert_eq!(item.effective_size(), Some("Large"));
    }

    #[test]
    fn effective_size_falls_back_to_row_size() {
        let item = LineItem::custom_drink("row-1", "My Blend", 1, vec![]).with_size("Small");
        assert_eq!(item.effective_size(), Some("Small"));
    }
}
