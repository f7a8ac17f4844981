use std::sync::Arc;

use serde::{Deserialize, Serialize};

use bestbuy_core::validation::require_name;
use bestbuy_core::{DomainError, DomainResult, ValueObject};

/// A promotion shared between any number of products.
pub type SharedPromotion = Arc<Promotion>;

/// Pricing strategy of a promotion (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionRule {
    /// `price * quantity * (1 - percent / 100)`.
    PercentDiscount { percent: f64 },
    /// Every pair costs 1.5 unit prices, an odd leftover costs full price.
    SecondHalfPrice,
    /// Every group of three costs 2 unit prices, leftovers cost full price.
    ThirdOneFree,
}

/// Value object: Promotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    name: String,
    rule: PromotionRule,
}

impl ValueObject for Promotion {}

impl Promotion {
    /// Builds a promotion from a name and a rule, validating both.
    pub fn new(name: impl Into<String>, rule: PromotionRule) -> DomainResult<Self> {
        let name = require_name(name)?;
        if let PromotionRule::PercentDiscount { percent } = rule {
            if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
                return Err(DomainError::invalid_argument(format!(
                    "percent must be between 0 and 100, got {percent}"
                )));
            }
        }
        Ok(Self { name, rule })
    }

    pub fn percent_discount(name: impl Into<String>, percent: f64) -> DomainResult<Self> {
        Self::new(name, PromotionRule::PercentDiscount { percent })
    }

    pub fn second_half_price(name: impl Into<String>) -> DomainResult<Self> {
        Self::new(name, PromotionRule::SecondHalfPrice)
    }

    pub fn third_one_free(name: impl Into<String>) -> DomainResult<Self> {
        Self::new(name, PromotionRule::ThirdOneFree)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> PromotionRule {
        self.rule
    }

    /// Wraps the promotion for sharing between products.
    pub fn shared(self) -> SharedPromotion {
        Arc::new(self)
    }

    /// Total price for `quantity` units at `unit_price`.
    ///
    /// Pure: the same inputs always give the same total. Grouping uses floor
    /// division and the remainder is charged at the full unit price.
    pub fn apply_promotion(&self, unit_price: f64, quantity: u64) -> f64 {
        match self.rule {
            PromotionRule::PercentDiscount { percent } => {
                unit_price * quantity as f64 * (1.0 - percent / 100.0)
            }
            PromotionRule::SecondHalfPrice => {
                let pairs = quantity / 2;
                let remainder = quantity % 2;
                (pairs as f64 * 1.5 + remainder as f64) * unit_price
            }
            PromotionRule::ThirdOneFree => {
                let groups = quantity / 3;
                let remainder = quantity % 3;
                (groups as f64 * 2.0 + remainder as f64) * unit_price
            }
        }
    }
}

impl core::fmt::Display for Promotion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}
