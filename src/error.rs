//! Cart engine error types.

use crate::ids::ItemId;
use thiserror::Error;

/// Errors surfaced by the cart engine.
#[derive(Error, Debug)]
pub enum CartError {
    /// Arithmetic overflow in a price calculation.
    #[error("arithmetic overflow in price calculation")]
    Overflow,

    /// A storage request failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors from the external cart-storage collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The referenced cart row does not exist.
    #[error("cart row not found: {0}")]
    NotFound(ItemId),

    /// The store could not be reached or rejected the request.
    #[error("cart store unavailable: {0}")]
    Unavailable(String),
}

/// A physical row that cannot be given a canonical grouping key.
///
/// Never fatal: grouping skips the row and logs the anomaly, so one
/// malformed row cannot block the whole cart from rendering.
#[derive(Error, Debug)]
pub enum DerivationError {
    /// Neither a product reference nor a custom-drink marker is present.
    #[error("cart row {0} has no product reference and no custom-drink marker")]
    MissingIdentity(ItemId),
}
