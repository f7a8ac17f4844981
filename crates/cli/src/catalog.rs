//! Initial inventory the store opens with.

use bestbuy_core::DomainResult;
use bestbuy_products::Product;
use bestbuy_promotions::Promotion;
use bestbuy_store::Store;

pub fn seed_store() -> DomainResult<Store> {
    let second_half_price = Promotion::second_half_price("Second Half price!")?.shared();
    let third_one_free = Promotion::third_one_free("Third One Free!")?.shared();
    let thirty_percent = Promotion::percent_discount("30% off!", 30.0)?.shared();

    let mut macbook = Product::new("MacBook Air M2", 1450.0, 100)?;
    macbook.set_promotion(second_half_price);

    let mut earbuds = Product::new("Bose QuietComfort Earbuds", 250.0, 500)?;
    earbuds.set_promotion(third_one_free);

    let pixel = Product::new("Google Pixel 7", 500.0, 250)?;

    let mut license = Product::non_stocked("Windows License", 125.0)?;
    license.set_promotion(thirty_percent);

    let shipping = Product::limited("Shipping", 10.0, 250, 1)?;

    Ok(Store::with_products([macbook, earbuds, pixel, license, shipping]))
}
