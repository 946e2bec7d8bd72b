//! Unit prices, line totals, and the selected-subset subtotal.
//!
//! Two mutually exclusive pricing models, selected by the custom-drink
//! marker:
//!
//! - catalog product: `base price + Σ add-on prices`
//! - custom drink: `Σ ingredient price × ingredient quantity + size tariff`
//!
//! All arithmetic is checked integer minor-unit math; rounding only ever
//! happens at display boundaries (see [`crate::money::Money`]).

use crate::cart::grouping::ItemGroup;
use crate::cart::item::Size;
use crate::error::CartError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Fixed surcharge per size tier, used in custom-drink pricing.
///
/// Unknown or absent size labels fall back to the Medium tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeTariffs {
    pub small: Money,
    pub medium: Money,
    pub large: Money,
    pub extra_large: Money,
}

impl Default for SizeTariffs {
    fn default() -> Self {
        Self {
            small: Money::from_major(15),
            medium: Money::from_major(20),
            large: Money::from_major(25),
            extra_large: Money::from_major(30),
        }
    }
}

impl SizeTariffs {
    /// Tariff for a size tier.
    pub fn for_size(&self, size: Size) -> Money {
        match size {
            Size::Small => self.small,
            Size::Medium => self.medium,
            Size::Large => self.large,
            Size::ExtraLarge => self.extra_large,
        }
    }

    /// Tariff for a free-form size label, falling back to Medium when the
    /// label is unrecognized or absent.
    pub fn for_label(&self, label: Option<&str>) -> Money {
        let size = label.and_then(Size::from_label).unwrap_or(Size::Medium);
        self.for_size(size)
    }
}

/// Compute the unit price of one group.
pub fn unit_price(group: &ItemGroup, tariffs: &SizeTariffs) -> Result<Money, CartError> {
    if let Some(custom) = &group.custom {
        let mut ingredients = Money::zero();
        for ingredient in &custom.ingredients {
            let cost = ingredient
                .price
                .try_multiply(ingredient.quantity)
                .ok_or(CartError::Overflow)?;
            ingredients = ingredients.try_add(cost).ok_or(CartError::Overflow)?;
        }

        let label = custom.size_label.as_deref().or(group.size.as_deref());
        return ingredients
            .try_add(tariffs.for_label(label))
            .ok_or(CartError::Overflow);
    }

    let add_ons =
        Money::try_sum(group.add_ons.iter().map(|a| a.price)).ok_or(CartError::Overflow)?;
    group.base_price.try_add(add_ons).ok_or(CartError::Overflow)
}

/// Compute the line total of one group: unit price × aggregate quantity.
pub fn line_total(group: &ItemGroup, tariffs: &SizeTariffs) -> Result<Money, CartError> {
    unit_price(group, tariffs)?
        .try_multiply(group.quantity)
        .ok_or(CartError::Overflow)
}

/// Sum the line totals of the given groups (typically the selected
/// subset).
pub fn subtotal<'a>(
    groups: impl IntoIterator<Item = &'a ItemGroup>,
    tariffs: &SizeTariffs,
) -> Result<Money, CartError> {
    let mut total = Money::zero();
    for group in groups {
        total = total
            .try_add(line_total(group, tariffs)?)
            .ok_or(CartError::Overflow)?;
    }
    Ok(total)
}
