use serde::{Deserialize, Serialize};

use bestbuy_core::validation::{require_name, require_price, require_quantity};
use bestbuy_core::{DomainError, DomainResult, Entity, ProductId};
use bestbuy_promotions::SharedPromotion;

/// Product variant (closed set).
///
/// The variant decides what "quantity" means for the product and which
/// purchase rules apply on top of the common ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductKind {
    /// Stock is tracked and decremented on purchase.
    Standard,
    /// No inventory concept (digital goods, licenses). Always purchasable.
    NonStocked,
    /// Tracked like `Standard`, with a per-order maximum that the caller
    /// enforces before buying.
    Limited { maximum: u64 },
}

impl ProductKind {
    pub fn is_stocked(self) -> bool {
        !matches!(self, ProductKind::NonStocked)
    }
}

/// Result of asking a product for its quantity.
///
/// Keeps "zero in stock" and "stock does not apply" apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    Count(u64),
    NotApplicable,
}

impl StockLevel {
    /// Numeric contribution to aggregates: `NotApplicable` counts as zero.
    pub fn as_count(self) -> u64 {
        match self {
            StockLevel::Count(n) => n,
            StockLevel::NotApplicable => 0,
        }
    }

    pub fn count(self) -> Option<u64> {
        match self {
            StockLevel::Count(n) => Some(n),
            StockLevel::NotApplicable => None,
        }
    }
}

/// Entity: Product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    stock: u64,
    active: bool,
    promotion: Option<SharedPromotion>,
    kind: ProductKind,
}

impl Product {
    /// Standard product with tracked stock.
    pub fn new(name: impl Into<String>, price: f64, quantity: i64) -> DomainResult<Self> {
        Self::build(name.into(), price, quantity, ProductKind::Standard)
    }

    /// Product without inventory; its quantity is not applicable.
    pub fn non_stocked(name: impl Into<String>, price: f64) -> DomainResult<Self> {
        Self::build(name.into(), price, 0, ProductKind::NonStocked)
    }

    /// Stocked product that may be ordered at most `maximum` at a time.
    pub fn limited(
        name: impl Into<String>,
        price: f64,
        quantity: i64,
        maximum: i64,
    ) -> DomainResult<Self> {
        let maximum = u64::try_from(maximum)
            .ok()
            .filter(|m| *m > 0)
            .ok_or_else(|| {
                DomainError::invalid_argument(format!("maximum must be greater than 0, got {maximum}"))
            })?;
        Self::build(name.into(), price, quantity, ProductKind::Limited { maximum })
    }

    fn build(name: String, price: f64, quantity: i64, kind: ProductKind) -> DomainResult<Self> {
        let name = require_name(name)?;
        let price = require_price(price)?;
        let stock = if kind.is_stocked() {
            require_quantity(quantity)?
        } else {
            0
        };

        Ok(Self {
            id: ProductId::new(),
            name,
            price,
            stock,
            // A stocked product created empty starts out deactivated, the same
            // as one that later sells out.
            active: !kind.is_stocked() || stock > 0,
            promotion: None,
            kind,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    /// Per-order limit of a `Limited` product.
    pub fn maximum(&self) -> Option<u64> {
        match self.kind {
            ProductKind::Limited { maximum } => Some(maximum),
            _ => None,
        }
    }

    pub fn promotion(&self) -> Option<&SharedPromotion> {
        self.promotion.as_ref()
    }

    /// Attaches `promotion`, replacing any previous one.
    pub fn set_promotion(&mut self, promotion: SharedPromotion) {
        self.promotion = Some(promotion);
    }

    pub fn clear_promotion(&mut self) {
        self.promotion = None;
    }

    pub fn quantity(&self) -> StockLevel {
        if self.kind.is_stocked() {
            StockLevel::Count(self.stock)
        } else {
            StockLevel::NotApplicable
        }
    }

    /// Overwrites the stock. Reaching zero deactivates the product; a
    /// positive value does not reactivate it.
    pub fn set_quantity(&mut self, quantity: i64) -> DomainResult<()> {
        if !self.kind.is_stocked() {
            return Err(DomainError::unsupported(format!(
                "quantity cannot be set for non-stocked product {}",
                self.name
            )));
        }
        let quantity = require_quantity(quantity)?;
        self.set_stock(quantity);
        Ok(())
    }

    fn set_stock(&mut self, stock: u64) {
        self.stock = stock;
        if stock == 0 {
            self.deactivate();
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Total price of `quantity` units, without touching the stock.
    ///
    /// Uses the attached promotion if there is one.
    pub fn quote(&self, quantity: u64) -> f64 {
        match &self.promotion {
            Some(promotion) => promotion.apply_promotion(self.price, quantity),
            None => self.price * quantity as f64,
        }
    }

    /// Buys `quantity` units and returns what they cost.
    ///
    /// Stocked products lose exactly `quantity` units of stock on success,
    /// promotion or not. The `Limited` maximum is not checked here.
    pub fn buy(&mut self, quantity: i64) -> DomainResult<f64> {
        let quantity = require_quantity(quantity)?;

        if self.kind.is_stocked() && quantity > self.stock {
            return Err(DomainError::invalid_argument(format!(
                "quantity is too high for {}: requested {}, in stock {}",
                self.name, quantity, self.stock
            )));
        }

        let total = self.quote(quantity);
        if self.kind.is_stocked() {
            self.set_stock(self.stock - quantity);
        }
        Ok(total)
    }

    /// Human-readable one-line summary.
    pub fn show(&self) -> String {
        self.to_string()
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}, Price: ${:.2}", self.name, self.price)?;
        match self.kind {
            ProductKind::Standard => write!(f, ", Quantity: {}", self.stock)?,
            ProductKind::Limited { maximum } => {
                write!(f, ", Quantity: {}, Maximum: {}", self.stock, maximum)?
            }
            ProductKind::NonStocked => {}
        }
        if let Some(promotion) = &self.promotion {
            write!(f, ", Promotion: {promotion}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bestbuy_core::ErrorKind;
    use bestbuy_promotions::Promotion;

    fn bose() -> Product {
        Product::new("Bose", 500.0, 200).unwrap()
    }

    #[test]
    fn create_product() {
        let product = bose();
        assert_eq!(product.name(), "Bose");
        assert_eq!(product.price(), 500.0);
        assert_eq!(product.quantity(), StockLevel::Count(200));
        assert!(product.is_active());
        assert!(product.promotion().is_none());
    }

    #[test]
    fn create_product_rejects_empty_name() {
        let err = Product::new("", 500.0, 200).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn create_product_rejects_negative_price() {
        let err = Product::new("Bose", -500.0, 200).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn create_product_rejects_negative_quantity() {
        let err = Product::new("Bose", 500.0, -1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn create_product_with_zero_quantity_is_inactive() {
        let product = Product::new("Bose", 500.0, 0).unwrap();
        assert!(!product.is_active());
    }

    #[test]
    fn zero_quantity_deactivates() {
        let mut product = bose();
        product.set_quantity(0).unwrap();
        assert!(!product.is_active());
    }

    #[test]
    fn restocking_does_not_reactivate() {
        let mut product = bose();
        product.set_quantity(0).unwrap();
        product.set_quantity(10).unwrap();
        assert!(!product.is_active());

        product.activate();
        assert!(product.is_active());
    }

    #[test]
    fn set_quantity_rejects_negative() {
        let mut product = bose();
        let err = product.set_quantity(-5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(product.quantity(), StockLevel::Count(200));
    }

    #[test]
    fn purchase_modifies_quantity_and_returns_price() {
        let mut product = bose();
        assert_eq!(product.buy(10).unwrap(), 5000.0);
        assert_eq!(product.quantity(), StockLevel::Count(190));
    }

    #[test]
    fn bought_quantity_too_big() {
        let mut product = bose();
        let err = product.buy(300).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(product.quantity(), StockLevel::Count(200));
    }

    #[test]
    fn buying_entire_stock_deactivates() {
        let mut product = bose();
        assert_eq!(product.buy(200).unwrap(), 100_000.0);
        assert_eq!(product.quantity(), StockLevel::Count(0));
        assert!(!product.is_active());
    }

    #[test]
    fn negative_purchase_is_rejected_for_every_kind() {
        let mut products = vec![
            bose(),
            Product::non_stocked("Windows License", 125.0).unwrap(),
            Product::limited("Shipping", 10.0, 250, 1).unwrap(),
        ];
        for product in &mut products {
            let before = product.clone();
            let err = product.buy(-1).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert_eq!(product, &before);
        }
    }

    #[test]
    fn promotion_changes_price_but_still_decrements_stock() {
        let mut product = Product::new("MacBook Air M2", 1450.0, 100).unwrap();
        product.set_promotion(Promotion::second_half_price("Second Half price!").unwrap().shared());

        assert_eq!(product.buy(3).unwrap(), 2.5 * 1450.0);
        assert_eq!(product.quantity(), StockLevel::Count(97));
    }

    #[test]
    fn set_promotion_replaces_previous() {
        let mut product = bose();
        product.set_promotion(Promotion::third_one_free("Third One Free!").unwrap().shared());
        product.set_promotion(Promotion::percent_discount("50% off!", 50.0).unwrap().shared());

        assert_eq!(product.promotion().unwrap().name(), "50% off!");
        assert_eq!(product.buy(2).unwrap(), 500.0);

        product.clear_promotion();
        assert_eq!(product.buy(2).unwrap(), 1000.0);
    }

    #[test]
    fn promotion_is_shared_between_products() {
        let promo = Promotion::third_one_free("Third One Free!").unwrap().shared();
        let mut a = Product::new("A", 10.0, 10).unwrap();
        let mut b = Product::new("B", 20.0, 10).unwrap();
        a.set_promotion(promo.clone());
        b.set_promotion(promo.clone());

        assert!(std::sync::Arc::ptr_eq(a.promotion().unwrap(), &promo));
        assert_eq!(a.buy(3).unwrap(), 20.0);
        assert_eq!(b.buy(3).unwrap(), 40.0);
    }

    #[test]
    fn non_stocked_quantity_is_not_applicable() {
        let product = Product::non_stocked("Windows License", 125.0).unwrap();
        assert_eq!(product.quantity(), StockLevel::NotApplicable);
        assert_eq!(product.quantity().as_count(), 0);
        assert!(product.is_active());
    }

    #[test]
    fn non_stocked_rejects_set_quantity() {
        let mut product = Product::non_stocked("Windows License", 125.0).unwrap();
        for q in [0, 5, -5] {
            let err = product.set_quantity(q).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Unsupported);
        }
        assert!(product.is_active());
    }

    #[test]
    fn non_stocked_buy_does_not_change_state() {
        let mut product = Product::non_stocked("Windows License", 125.0).unwrap();
        let before = product.clone();
        assert_eq!(product.buy(1_000).unwrap(), 125_000.0);
        assert_eq!(product, before);
    }

    #[test]
    fn non_stocked_with_percent_discount() {
        let mut product = Product::non_stocked("Windows License", 125.0).unwrap();
        product.set_promotion(Promotion::percent_discount("30% off!", 30.0).unwrap().shared());
        assert!((product.buy(2).unwrap() - 175.0).abs() < 1e-9);
    }

    #[test]
    fn limited_exposes_maximum_without_enforcing_it() {
        let mut product = Product::limited("Shipping", 10.0, 250, 1).unwrap();
        assert_eq!(product.maximum(), Some(1));
        assert_eq!(product.buy(5).unwrap(), 50.0);
        assert_eq!(product.quantity(), StockLevel::Count(245));
        assert_eq!(bose().maximum(), None);
    }

    #[test]
    fn limited_rejects_non_positive_maximum() {
        for maximum in [0, -1] {
            let err = Product::limited("Shipping", 10.0, 250, maximum).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn show_per_kind() {
        let mut mac = Product::new("MacBook Air M2", 1450.0, 100).unwrap();
        assert_eq!(mac.show(), "MacBook Air M2, Price: $1450.00, Quantity: 100");

        mac.set_promotion(Promotion::second_half_price("Second Half price!").unwrap().shared());
        assert_eq!(
            mac.show(),
            "MacBook Air M2, Price: $1450.00, Quantity: 100, Promotion: Second Half price!"
        );

        let license = Product::non_stocked("Windows License", 125.0).unwrap();
        assert_eq!(license.show(), "Windows License, Price: $125.00");

        let shipping = Product::limited("Shipping", 10.0, 250, 1).unwrap();
        assert_eq!(shipping.show(), "Shipping, Price: $10.00, Quantity: 250, Maximum: 1");
    }

    #[test]
    fn clones_are_the_same_entity() {
        let product = bose();
        let other = Product::new("Bose", 500.0, 200).unwrap();
        assert!(product.same_entity(&product.clone()));
        assert!(!product.same_entity(&other));
    }

    #[test]
    fn kind_and_stock_level_wire_form() {
        let kind = ProductKind::Limited { maximum: 1 };
        let json = serde_json::to_value(kind).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "limited", "maximum": 1 }));
        assert_eq!(serde_json::from_value::<ProductKind>(json).unwrap(), kind);
        assert_eq!(
            serde_json::to_value(ProductKind::NonStocked).unwrap(),
            serde_json::json!({ "type": "non_stocked" })
        );

        assert_eq!(
            serde_json::to_value(StockLevel::Count(5)).unwrap(),
            serde_json::json!({ "count": 5 })
        );
        let level: StockLevel = serde_json::from_str("\"not_applicable\"").unwrap();
        assert_eq!(level, StockLevel::NotApplicable);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: a fresh standard product is active iff it has stock.
            #[test]
            fn active_iff_stocked(name in "[A-Za-z][A-Za-z0-9 ]{0,40}", cents in 0u32..1_000_000, quantity in 0i64..10_000) {
                let product = Product::new(name, cents as f64 / 100.0, quantity).unwrap();
                prop_assert_eq!(product.is_active(), quantity > 0);
            }

            /// Property: set_quantity(0) always deactivates a stocked product.
            #[test]
            fn zero_always_deactivates(quantity in 0i64..10_000, was_active in any::<bool>(), limited in any::<bool>()) {
                let mut product = if limited {
                    Product::limited("L", 1.0, quantity, 3).unwrap()
                } else {
                    Product::new("S", 1.0, quantity).unwrap()
                };
                if was_active { product.activate() } else { product.deactivate() }
                product.set_quantity(0).unwrap();
                prop_assert!(!product.is_active());
            }

            /// Property: buying within stock removes exactly that many units and
            /// charges price * quantity when no promotion is attached.
            #[test]
            fn buy_within_stock(stock in 0u32..10_000, pick in 0u32..10_000, cents in 0u32..100_000) {
                let q = pick % (stock + 1);
                let price = cents as f64 / 100.0;
                let mut product = Product::new("P", price, stock as i64).unwrap();
                let total = product.buy(q as i64).unwrap();
                prop_assert_eq!(total, price * q as f64);
                prop_assert_eq!(product.quantity(), StockLevel::Count((stock - q) as u64));
            }

            /// Property: buying beyond stock fails and leaves the stock alone.
            #[test]
            fn buy_beyond_stock(stock in 0u32..10_000, extra in 1u32..1_000) {
                let mut product = Product::new("P", 3.0, stock as i64).unwrap();
                let err = product.buy(stock as i64 + extra as i64).unwrap_err();
                prop_assert_eq!(err.kind(), ErrorKind::InvalidArgument);
                prop_assert_eq!(product.quantity(), StockLevel::Count(stock as u64));
            }

            /// Property: non-stocked purchases never change observable state.
            #[test]
            fn non_stocked_buy_is_pure(q in 0i64..100_000, cents in 0u32..100_000) {
                let price = cents as f64 / 100.0;
                let mut product = Product::non_stocked("N", price).unwrap();
                let before = product.clone();
                prop_assert_eq!(product.buy(q).unwrap(), price * q as f64);
                prop_assert_eq!(&product, &before);
                prop_assert_eq!(product.set_quantity(q).unwrap_err().kind(), ErrorKind::Unsupported);
            }
        }
    }
}
