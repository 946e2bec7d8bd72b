//! Engine configuration.
//!
//! The admission and pricing constants are configuration, not code: the
//! storefront deploys with one set of values today but they are expected
//! to change without a code release.

use crate::cart::SizeTariffs;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Configuration for the cart engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Minimum subtotal required before checkout is admitted.
    pub minimum_order: Money,
    /// Flat shipping fee applied whenever at least one group is selected.
    pub shipping_fee: Money,
    /// Size-tariff table for custom-drink pricing.
    pub tariffs: SizeTariffs,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            minimum_order: Money::from_major(150),
            shipping_fee: Money::from_major(15),
            tariffs: SizeTariffs::default(),
        }
    }
}

impl CartConfig {
    /// Set the minimum order subtotal.
    pub fn with_minimum_order(mut self, minimum: Money) -> Self {
        self.minimum_order = minimum;
        self
    }

    /// Set the flat shipping fee.
    pub fn with_shipping_fee(mut self, fee: Money) -> Self {
        self.shipping_fee = fee;
        self
    }

    /// Set the size-tariff table.
    pub fn with_tariffs(mut self, tariffs: SizeTariffs) -> Self {
        self.tariffs = tariffs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constants() {
        let config = CartConfig::default();
        assert_eq!(config.minimum_order, Money::from_major(150));
        assert_eq!(config.shipping_fee, Money::from_major(15));
    }

    #[test]
    fn builder_overrides() {
        let config = CartConfig::default()
            .with_minimum_order(Money::from_major(200))
            .with_shipping_fee(Money::zero());
        assert_eq!(config.minimum_order, Money::from_major(200));
        assert!(config.shipping_fee.is_zero());
    }
}
