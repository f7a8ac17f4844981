use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use bestbuy_core::validation::require_quantity;
use bestbuy_core::{DomainError, DomainResult, ProductId};
use bestbuy_products::{Product, StockLevel};

/// Order line: which product, how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// Aggregate root: Store.
///
/// Keeps one state per product, keyed by [`ProductId`], and an ordered list
/// of entries referring to those states. Adding a product that is already
/// held appends another entry for the held state, so every entry of a
/// duplicated product always shows the same stock and active flag.
#[derive(Debug, Clone, Default)]
pub struct Store {
    entries: Vec<ProductId>,
    products: HashMap<ProductId, Product>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut store = Self::new();
        for product in products {
            store.add_product(product);
        }
        store
    }

    /// Appends `product`. If its id is already held, the held state is kept
    /// and `product` is dropped.
    pub fn add_product(&mut self, product: Product) {
        let id = product.id_typed();
        self.products.entry(id).or_insert(product);
        self.entries.push(id);
    }

    /// Removes the first entry for `id` and returns the product.
    ///
    /// The state itself is dropped with the last entry referring to it.
    pub fn remove_product(&mut self, id: &ProductId) -> DomainResult<Product> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry == id)
            .ok_or_else(|| DomainError::not_found(format!("product {id} is not in the store")))?;
        self.entries.remove(index);

        let removed = if self.entries.contains(id) {
            self.products.get(id).cloned()
        } else {
            self.products.remove(id)
        };
        removed.ok_or_else(|| DomainError::not_found(format!("product {id} is not in the store")))
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn product_mut(&mut self, id: &ProductId) -> Option<&mut Product> {
        self.products.get_mut(id)
    }

    /// Every entry, active or not, in insertion order.
    pub fn products(&self) -> Vec<&Product> {
        self.entries
            .iter()
            .filter_map(|id| self.products.get(id))
            .collect()
    }

    /// Active entries only, in insertion order.
    pub fn active_products(&self) -> Vec<&Product> {
        self.products().into_iter().filter(|p| p.is_active()).collect()
    }

    /// Sum of stock over all entries; non-stocked products contribute zero.
    /// Saturates at `u64::MAX`.
    pub fn total_quantity(&self) -> u64 {
        self.products()
            .into_iter()
            .fold(0u64, |total, p| total.saturating_add(p.quantity().as_count()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Buys every line in order and returns the grand total.
    ///
    /// Stops at the first failing line. Lines before it stay bought: each
    /// `buy` commits on its own and nothing is rolled back. Per-order
    /// maximums are not checked here, see [`Store::check_line`].
    pub fn order(&mut self, lines: &[OrderLine]) -> DomainResult<f64> {
        let mut total = 0.0;
        for line in lines {
            let product = self.product_mut(&line.product_id).ok_or_else(|| {
                DomainError::invalid_argument(format!(
                    "order line references product {} which is not in the store",
                    line.product_id
                ))
            })?;
            total += product.buy(line.quantity)?;
        }
        Ok(total)
    }

    /// Business pre-checks for a prospective order line, without buying.
    ///
    /// Covers what `order` leaves to its caller (the `Limited` maximum) plus
    /// the checks `buy` would fail on, so a front end can reject a line before
    /// it becomes part of an order.
    pub fn check_line(&self, line: &OrderLine) -> DomainResult<()> {
        let product = self.product(&line.product_id).ok_or_else(|| {
            DomainError::invalid_argument(format!("product {} is not in the store", line.product_id))
        })?;
        let quantity = require_quantity(line.quantity)?;

        if let Some(maximum) = product.maximum() {
            if quantity > maximum {
                return Err(DomainError::invalid_argument(format!(
                    "quantity exceeds maximum allowed ({maximum})"
                )));
            }
        }
        if let StockLevel::Count(available) = product.quantity() {
            if quantity > available {
                return Err(DomainError::invalid_argument(format!(
                    "just {available} left in stock"
                )));
            }
        }
        Ok(())
    }
}
