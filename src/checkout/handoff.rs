//! The payload handed to the external order-placement step.
//!
//! A snapshot of the selected groups with their computed prices, plus the
//! evaluated totals. Order placement, payment, and delivery are outside
//! this engine; the payload serializes to whatever the checkout step
//! requires via serde.

use crate::cart::{line_total, subtotal, unit_price, ItemGroup};
use crate::checkout::CheckoutTotals;
use crate::config::CartConfig;
use crate::error::CartError;
use crate::ids::GroupKey;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One selected group, priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffLine {
    /// Grouping key.
    pub key: GroupKey,
    /// Display name.
    pub name: String,
    /// Size label shown to the shopper.
    pub size: Option<String>,
    /// Whether the line is a custom drink.
    pub custom: bool,
    /// Aggregate quantity.
    pub quantity: i64,
    /// Computed unit price.
    pub unit_price: Money,
    /// `unit_price * quantity`.
    pub line_total: Money,
}

/// Everything the checkout step needs about the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutHandoff {
    /// Selected groups in display order.
    pub lines: Vec<HandoffLine>,
    /// Evaluated totals and admission verdict.
    pub totals: CheckoutTotals,
}

impl CheckoutHandoff {
    /// Price the selected groups and evaluate the admission gate.
    ///
    /// Building the payload does not itself enforce admission; callers
    /// check [`CheckoutTotals::can_checkout`] before handing it off.
    pub fn build(selected: &[&ItemGroup], config: &CartConfig) -> Result<Self, CartError> {
        let mut lines = Vec::with_capacity(selected.len());
        for group in selected {
            lines.push(HandoffLine {
                key: group.key.clone(),
                name: group.name.clone(),
                size: group
                    .custom
                    .as_ref()
                    .and_then(|c| c.size_label.clone())
                    .or_else(|| group.size.clone()),
                custom: group.is_custom(),
                quantity: group.quantity,
                unit_price: unit_price(group, &config.tariffs)?,
                line_total: line_total(group, &config.tariffs)?,
            });
        }

        let subtotal = subtotal(selected.iter().copied(), &config.tariffs)?;
        let totals = CheckoutTotals::evaluate(config, subtotal, selected.len());

        Ok(Self { lines, totals })
    }
}
