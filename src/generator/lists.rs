//! Per-buyer wishlist and cart batches with their line items.

use super::Generator;
use crate::pool::Pools;
use crate::sql::SqlValue;
use crate::writer::ScriptWriter;
use rand::seq::index;
use rand::Rng;

const WISHLISTS_COLUMNS: &[&str] = &["wishlist_id", "buyer_email", "name"];

const CARTS_COLUMNS: &[&str] = &["cart_id", "buyer_email", "name"];

const WISHLIST_ITEMS_COLUMNS: &[&str] = &["wishlist_id", "product_id"];

const CART_ITEMS_COLUMNS: &[&str] = &["cart_id", "product_id", "sku", "quantity"];

impl Generator {
    pub(crate) fn wishlists(
        &mut self,
        pools: &mut Pools,
        w: &mut ScriptWriter,
    ) -> anyhow::Result<()> {
        w.write_comment("INSERT INTO wishlists")?;
        let mut next_id: i64 = 1;
        for buyer in pools.buyer_emails.keys().to_vec() {
            for _ in 0..self.rng.random_range(1..=3) {
                let name = self.fake.list_name("Wishlist");
                pools.wishlist_ids.register(next_id)?;

                w.write_insert(
                    "wishlists",
                    WISHLISTS_COLUMNS,
                    &[
                        SqlValue::Int(next_id),
                        SqlValue::Str(buyer.clone()),
                        SqlValue::opt_str(name),
                    ],
                )?;
                next_id += 1;
            }
        }
        Self::finish_batch(w, "wishlists")
    }

    pub(crate) fn carts(&mut self, pools: &mut Pools, w: &mut ScriptWriter) -> anyhow::Result<()> {
        w.write_comment("INSERT INTO carts")?;
        let mut next_id: i64 = 1;
        for buyer in pools.buyer_emails.keys().to_vec() {
            for _ in 0..self.rng.random_range(1..=3) {
                let name = self.fake.list_name("Cart");
                pools.cart_ids.register(next_id)?;

                w.write_insert(
                    "carts",
                    CARTS_COLUMNS,
                    &[
                        SqlValue::Int(next_id),
                        SqlValue::Str(buyer.clone()),
                        SqlValue::opt_str(name),
                    ],
                )?;
                next_id += 1;
            }
        }
        Self::finish_batch(w, "carts")
    }

    pub(crate) fn wishlist_items(
        &mut self,
        pools: &mut Pools,
        w: &mut ScriptWriter,
    ) -> anyhow::Result<()> {
        w.write_comment("INSERT INTO wishlist_items")?;
        if pools.product_ids.is_empty() {
            if !pools.wishlist_ids.is_empty() {
                w.write_skip("no products generated; wishlist item rows skipped")?;
            }
            return Self::finish_batch(w, "wishlist_items");
        }
        for wishlist_id in pools.wishlist_ids.keys().to_vec() {
            let item_count = self.rng.random_range(1..=5).min(pools.product_ids.len());
            for product_id in pools.product_ids.sample_many(&mut self.rng, item_count)? {
                pools
                    .wishlist_item_pairs
                    .register((wishlist_id, product_id))?;

                w.write_insert(
                    "wishlist_items",
                    WISHLIST_ITEMS_COLUMNS,
                    &[SqlValue::Int(wishlist_id), SqlValue::Int(product_id)],
                )?;
            }
        }
        Self::finish_batch(w, "wishlist_items")
    }

    pub(crate) fn cart_items(
        &mut self,
        pools: &mut Pools,
        w: &mut ScriptWriter,
    ) -> anyhow::Result<()> {
        w.write_comment("INSERT INTO cart_items")?;
        let all_variants = pools.all_variants();
        if all_variants.is_empty() {
            if !pools.cart_ids.is_empty() {
                w.write_skip("no variants generated; cart item rows skipped")?;
            }
            return Self::finish_batch(w, "cart_items");
        }
        for cart_id in pools.cart_ids.keys().to_vec() {
            let item_count = self.rng.random_range(1..=3).min(all_variants.len());
            for idx in index::sample(&mut self.rng, all_variants.len(), item_count) {
                let (product_id, sku) = all_variants[idx].clone();
                let quantity = self.rng.random_range(1..=5);
                pools
                    .cart_item_keys
                    .register((cart_id, product_id, sku.clone()))?;

                w.write_insert(
                    "cart_items",
                    CART_ITEMS_COLUMNS,
                    &[
                        SqlValue::Int(cart_id),
                        SqlValue::Int(product_id),
                        SqlValue::Str(sku),
                        SqlValue::Int(quantity),
                    ],
                )?;
            }
        }
        Self::finish_batch(w, "cart_items")
    }
}
