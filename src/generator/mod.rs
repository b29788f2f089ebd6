//! Batch generators for the marketplace dataset.
//!
//! One generation run walks the table dependency graph in a fixed
//! topological order: every batch only samples foreign keys from pools that
//! earlier batches have already filled.

mod catalog;
mod lists;
mod orders;
pub mod roster;
mod users;

use crate::fake::MarketFaker;
use crate::pool::Pools;
use crate::profile::RowCounts;
use crate::writer::ScriptWriter;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Batches in emission order (parents before children).
pub const BATCH_ORDER: &[&str] = &[
    "users",
    "addresses",
    "buyers",
    "sellers",
    "follows",
    "alternate_addresses",
    "products",
    "product_images",
    "product_tags",
    "variants",
    "orders",
    "order_lines",
    "reviews",
    "wishlists",
    "carts",
    "wishlist_items",
    "cart_items",
];

/// Seeded dataset generator.
///
/// Control RNG and faker RNG are seeded separately (seed, seed + 1) so that
/// structural decisions and content generation do not interleave streams.
pub struct Generator {
    pub(crate) rng: ChaCha8Rng,
    pub(crate) fake: MarketFaker<ChaCha8Rng>,
    pub(crate) counts: RowCounts,
    pub(crate) email_serial: u32,
}

impl Generator {
    pub fn new(seed: u64, counts: RowCounts) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        let fake_rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
        Self {
            rng,
            fake: MarketFaker::new(fake_rng),
            counts,
            email_serial: 99,
        }
    }

    /// Run every batch in dependency order and return the filled pools.
    ///
    /// `on_batch` is called with each batch name before it starts (used for
    /// progress reporting).
    pub fn run<F>(&mut self, w: &mut ScriptWriter, mut on_batch: F) -> anyhow::Result<Pools>
    where
        F: FnMut(&'static str),
    {
        let mut pools = Pools::new();

        on_batch("users");
        self.users(&mut pools, w)?;
        on_batch("addresses");
        self.addresses(&mut pools, w)?;
        on_batch("buyers");
        self.buyers(&mut pools, w)?;
        on_batch("sellers");
        self.sellers(&mut pools, w)?;
        on_batch("follows");
        self.follows(&mut pools, w)?;
        on_batch("alternate_addresses");
        self.alternate_addresses(&mut pools, w)?;
        on_batch("products");
        self.products(&mut pools, w)?;
        on_batch("product_images");
        self.product_images(&mut pools, w)?;
        on_batch("product_tags");
        self.product_tags(&mut pools, w)?;
        on_batch("variants");
        self.variants(&mut pools, w)?;
        on_batch("orders");
        self.orders(&mut pools, w)?;
        on_batch("order_lines");
        self.order_lines(&mut pools, w)?;
        on_batch("reviews");
        self.reviews(&mut pools, w)?;
        on_batch("wishlists");
        self.wishlists(&mut pools, w)?;
        on_batch("carts");
        self.carts(&mut pools, w)?;
        on_batch("wishlist_items");
        self.wishlist_items(&mut pools, w)?;
        on_batch("cart_items");
        self.cart_items(&mut pools, w)?;

        Ok(pools)
    }

    /// Write the per-table trailer comment and a separating blank line.
    pub(crate) fn finish_batch(w: &mut ScriptWriter, table: &str) -> anyhow::Result<()> {
        let rows = w.rows_written(table);
        w.write_comment(&format!("Total {}: {}", table, rows))?;
        w.write_blank()?;
        Ok(())
    }
}
