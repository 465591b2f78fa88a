//! Supporting utilities shared across models.
//!
//! - [`constraint`]: Type-level numeric constraints.
//! - [`units`]: Exact Celsius temperatures that convert to and from [`uom`].

pub mod constraint;
pub mod units;
