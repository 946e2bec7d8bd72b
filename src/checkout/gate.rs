//! Minimum-order admission gate.
//!
//! Failing the gate is an expected, user-visible state (disabled checkout
//! button, shortfall message), never an error: evaluation is total and
//! uses saturating arithmetic throughout.

use crate::config::CartConfig;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Totals and admission verdict for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutTotals {
    /// Subtotal of the selected groups.
    pub subtotal: Money,
    /// Discount. Always zero in the current scope.
    pub discount: Money,
    /// Flat shipping fee; zero when nothing is selected.
    pub shipping_fee: Money,
    /// `subtotal - discount + shipping_fee`.
    pub total: Money,
    /// Number of selected groups.
    pub selected_count: usize,
    /// Whether the subtotal meets the minimum-order rule.
    pub meets_minimum: bool,
    /// Amount missing to reach the minimum; zero once met.
    pub shortfall: Money,
}

impl CheckoutTotals {
    /// Evaluate the admission rule for a selection subtotal.
    pub fn evaluate(config: &CartConfig, subtotal: Money, selected_count: usize) -> Self {
        let discount = Money::zero();
        let shipping_fee = if selected_count > 0 {
            config.shipping_fee
        } else {
            Money::zero()
        };
        let total = subtotal
            .saturating_minus(discount)
            .saturating_plus(shipping_fee);
        let meets_minimum = subtotal >= config.minimum_order;
        let shortfall = config.minimum_order.saturating_minus(subtotal);

        Self {
            subtotal,
            discount,
            shipping_fee,
            total,
            selected_count,
            meets_minimum,
            shortfall,
        }
    }

    /// Checkout is permitted only with a non-empty selection that meets
    /// the minimum.
    pub fn can_checkout(&self) -> bool {
        self.selected_count > 0 && self.meets_minimum
    }
}
