//! Products domain module.
//!
//! This crate contains business rules for products (stock, activation,
//! purchase pricing), implemented purely as deterministic domain logic
//! (no IO, no logging).

pub mod product;

pub use product::{Product, ProductKind, StockLevel};
