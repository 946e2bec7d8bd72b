//! Checkout module.
//!
//! The minimum-order admission gate and the payload handed to the
//! external order-placement step.

mod gate;
mod handoff;

pub use gate::CheckoutTotals;
pub use handoff::{CheckoutHandoff, HandoffLine};
