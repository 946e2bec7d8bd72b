//! Cart aggregation and pricing engine for a drink-ordering storefront.
//!
//! The backing store keeps the cart as a flat collection of physical rows,
//! one per add-to-cart action, so a single logical selection ("Large Iced
//! Coffee + Extra Shot") may be spread across several rows. This crate:
//!
//! - **Grouping**: derives a canonical key per row and folds semantically
//!   identical rows into one displayed group with a summed quantity
//! - **Pricing**: computes unit prices under two models — catalog product
//!   (base price + add-ons) or custom drink (ingredients + size tariff)
//! - **Mutation**: fans a group-level increment/decrement/delete out over
//!   the backing rows, with a per-group busy marker against overlap
//! - **Checkout**: partial selection of groups plus a minimum-order
//!   admission gate
//!
//! # Example
//!
//! ```rust,ignore
//! use brew_cart::prelude::*;
//!
//! let config = CartConfig::default();
//! let items = store.fetch_items().await?;
//! let groups = group_items(&items);
//!
//! let mut selection = Selection::default();
//! selection.reconcile(&groups);
//!
//! let picked = selection.selected(&groups);
//! let subtotal = subtotal(picked.iter().copied(), &config.tariffs)?;
//! let totals = CheckoutTotals::evaluate(&config, subtotal, picked.len());
//! if totals.can_checkout() {
//!     let handoff = CheckoutHandoff::build(&picked, &config)?;
//!     // hand off to the order-placement step
//! }
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod checkout;
pub mod config;
pub mod store;

pub use config::CartConfig;
pub use error::{CartError, DerivationError, StoreError};
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::CartConfig;
    pub use crate::error::{CartError, DerivationError, StoreError};
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Cart
    pub use crate::cart::{
        derive_group_key, group_items, line_total, subtotal, unit_price, AddOn, CustomDrink,
        Ingredient, ItemGroup, LineItem, MutationCoordinator, MutationKind, MutationOutcome,
        Selection, Size, SizeTariffs,
    };

    // Checkout
    pub use crate::checkout::{CheckoutHandoff, CheckoutTotals, HandoffLine};

    // Storage seam
    pub use crate::store::{CartStore, MemoryStore};
}
