//! Store domain module.
//!
//! The store is the aggregate that holds the product catalog and processes
//! orders by delegating each line to `Product::buy`. Pure domain logic: no
//! IO, no logging.

pub mod store;

pub use store::{OrderLine, Store};
