//! Cart module.
//!
//! Physical line items, canonical grouping, pricing, checkout selection,
//! and group-level mutation fan-out.

mod grouping;
mod item;
mod key;
mod mutation;
mod pricing;
mod selection;

pub use grouping::{group_items, ItemGroup};
pub use item::{AddOn, CustomDrink, Ingredient, LineItem, Size};
pub use key::{derive_group_key, KEY_SEP};
pub use mutation::{MutationCoordinator, MutationKind, MutationOutcome, MAX_QUANTITY_PER_ITEM};
pub use pricing::{line_total, subtotal, unit_price, SizeTariffs};
pub use selection::Selection;
