//! `bestbuy-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the promotion,
//! product and store crates (no IO, no logging).

pub mod entity;
pub mod error;
pub mod id;
pub mod validation;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, ErrorKind};
pub use id::ProductId;
pub use value_object::ValueObject;
