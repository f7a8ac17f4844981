//! Promotions domain module.
//!
//! A promotion is a named pricing strategy: given a unit price and a
//! quantity it computes the total to charge. It never touches inventory.

pub mod promotion;

pub use promotion::{Promotion, PromotionRule, SharedPromotion};
