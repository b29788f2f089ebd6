//! Fixed-roster wishlist/cart job.
//!
//! Emits wishlist and cart rows for a small hardcoded set of known-good
//! buyers, products and SKUs, in multi-row VALUES format. This job does not
//! compose with `generate` output; the roster stands alone.

use crate::sql::SqlValue;
use crate::writer::ScriptWriter;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Buyers known to exist in the target database.
pub const ROSTER_BUYERS: &[&str] = &[
    "oskar64@aol.com",
    "argono11@aol.com",
    "jindra4@protonmail.com",
    "tantri37@outlook.com",
    "rini38@outlook.com",
    "bakidin22@hotmail.com",
    "asirwada33@aol.com",
    "jaiman22@mail.com",
    "ajiono27@mail.com",
    "maria7@hotmail.com",
    "jarwi97@mail.com",
    "harimurti20@yahoo.com",
    "unjani96@hotmail.com",
    "jagapati36@gmail.com",
    "halim35@protonmail.com",
];

/// Product ids 1..=ROSTER_PRODUCT_COUNT are assumed present.
pub const ROSTER_PRODUCT_COUNT: usize = 10;

/// Known (product, SKU) pairs for cart items.
pub const ROSTER_VARIANTS: &[(i64, &str)] = &[
    (1, "1-BLUE-S"),
    (1, "1-BLUE-M"),
    (1, "1-BLUE-L"),
    (2, "2-BLACK-28"),
    (2, "2-NAVY-30"),
    (3, "3-WHITE-41"),
    (4, "4-NAVY"),
    (5, "5-GOLD"),
];

pub fn run(seed: u64, w: &mut ScriptWriter) -> anyhow::Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut wishlist_rows = Vec::with_capacity(ROSTER_BUYERS.len());
    let mut cart_rows = Vec::with_capacity(ROSTER_BUYERS.len());
    let mut wishlist_item_rows = Vec::new();
    let mut cart_item_rows = Vec::new();

    // One wishlist and one cart per buyer, ids follow roster order.
    for (i, email) in ROSTER_BUYERS.iter().enumerate() {
        let id = (i + 1) as i64;
        wishlist_rows.push(vec![SqlValue::Int(id), SqlValue::Str(email.to_string())]);
        cart_rows.push(vec![SqlValue::Int(id), SqlValue::Str(email.to_string())]);

        let product_count = rng.random_range(1..=3);
        for idx in index::sample(&mut rng, ROSTER_PRODUCT_COUNT, product_count) {
            wishlist_item_rows.push(vec![SqlValue::Int(id), SqlValue::Int(idx as i64 + 1)]);
        }

        let variant_count = rng.random_range(1..=3);
        for idx in index::sample(&mut rng, ROSTER_VARIANTS.len(), variant_count) {
            let (product_id, sku) = ROSTER_VARIANTS[idx];
            cart_item_rows.push(vec![
                SqlValue::Int(id),
                SqlValue::Int(product_id),
                SqlValue::Str(sku.to_string()),
            ]);
        }
    }

    w.write_comment("WISHLIST")?;
    w.write_rows("wishlists", &["wishlist_id", "buyer_email"], &wishlist_rows)?;
    w.write_blank()?;

    w.write_comment("CART")?;
    w.write_rows("carts", &["cart_id", "buyer_email"], &cart_rows)?;
    w.write_blank()?;

    w.write_comment("WISHLIST_ITEMS")?;
    w.write_rows(
        "wishlist_items",
        &["wishlist_id", "product_id"],
        &wishlist_item_rows,
    )?;
    w.write_blank()?;

    w.write_comment("CART_ITEMS")?;
    w.write_rows(
        "cart_items",
        &["cart_id", "product_id", "sku"],
        &cart_item_rows,
    )?;

    Ok(())
}
