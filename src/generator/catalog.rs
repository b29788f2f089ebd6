//! Product catalog batches: products, images, tags and variants.

use super::Generator;
use crate::fake::MarketFaker;
use crate::pool::Pools;
use crate::sql::SqlValue;
use crate::writer::ScriptWriter;
use rand::seq::index;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

const PRODUCTS_COLUMNS: &[&str] = &["product_id", "name", "description", "seller_email"];

const IMAGES_COLUMNS: &[&str] = &["product_id", "image_path"];

const TAGS_COLUMNS: &[&str] = &["product_id", "tag"];

const VARIANTS_COLUMNS: &[&str] = &["product_id", "sku", "variant_name", "stock", "price"];

/// Minimum products assigned to each verified seller.
const MIN_PRODUCTS_PER_SELLER: usize = 5;

impl Generator {
    pub(crate) fn products(
        &mut self,
        pools: &mut Pools,
        w: &mut ScriptWriter,
    ) -> anyhow::Result<()> {
        w.write_comment("INSERT INTO products")?;
        let sellers = pools.verified_seller_emails.keys().to_vec();
        if sellers.is_empty() {
            w.write_skip("no verified sellers; product rows skipped")?;
            return Self::finish_batch(w, "products");
        }

        // Spread the total evenly, at least MIN_PRODUCTS_PER_SELLER each.
        let total = self.counts.products;
        let per_seller = MIN_PRODUCTS_PER_SELLER.max(total / sellers.len());
        let mut next_id: i64 = 1;

        'sellers: for seller in &sellers {
            for _ in 0..per_seller {
                if next_id as usize > total {
                    break 'sellers;
                }
                let name = self.fake.product_name();
                let description = self.fake.product_description();
                pools.product_ids.register(next_id)?;
                pools
                    .products_by_seller
                    .entry(seller.clone())
                    .or_default()
                    .push(next_id);

                w.write_insert(
                    "products",
                    PRODUCTS_COLUMNS,
                    &[
                        SqlValue::Int(next_id),
                        SqlValue::Str(name),
                        SqlValue::Str(description.to_string()),
                        SqlValue::Str(seller.clone()),
                    ],
                )?;
                next_id += 1;
            }
        }
        Self::finish_batch(w, "products")
    }

    pub(crate) fn product_images(
        &mut self,
        pools: &mut Pools,
        w: &mut ScriptWriter,
    ) -> anyhow::Result<()> {
        w.write_comment("INSERT INTO product_images")?;
        for product_id in pools.product_ids.keys().to_vec() {
            let image_count = self.rng.random_range(1..=3);
            for _ in 0..image_count {
                let image_path = self.fake.upload_path("products");
                pools
                    .image_pairs
                    .register((product_id, image_path.clone()))?;

                w.write_insert(
                    "product_images",
                    IMAGES_COLUMNS,
                    &[SqlValue::Int(product_id), SqlValue::Str(image_path)],
                )?;
            }
        }
        Self::finish_batch(w, "product_images")
    }

    pub(crate) fn product_tags(
        &mut self,
        pools: &mut Pools,
        w: &mut ScriptWriter,
    ) -> anyhow::Result<()> {
        w.write_comment("INSERT INTO product_tags")?;
        let tags = MarketFaker::<ChaCha8Rng>::all_tags();
        for product_id in pools.product_ids.keys().to_vec() {
            let tag_count = self.rng.random_range(1..=3);
            for idx in index::sample(&mut self.rng, tags.len(), tag_count) {
                let tag = tags[idx];
                pools.tag_pairs.register((product_id, tag.to_string()))?;

                w.write_insert(
                    "product_tags",
                    TAGS_COLUMNS,
                    &[SqlValue::Int(product_id), SqlValue::Str(tag.to_string())],
                )?;
            }
        }
        Self::finish_batch(w, "product_tags")
    }

    pub(crate) fn variants(
        &mut self,
        pools: &mut Pools,
        w: &mut ScriptWriter,
    ) -> anyhow::Result<()> {
        w.write_comment("INSERT INTO variants")?;

        // Finite combination space per product: a color alone, or color + size.
        let colors = MarketFaker::<ChaCha8Rng>::all_colors();
        let sizes = MarketFaker::<ChaCha8Rng>::all_sizes();
        let mut combos: Vec<(&str, Option<&str>)> = Vec::with_capacity(colors.len() * (sizes.len() + 1));
        for &color in colors {
            combos.push((color, None));
            for &size in sizes {
                combos.push((color, Some(size)));
            }
        }

        for product_id in pools.product_ids.keys().to_vec() {
            let variant_count = self.rng.random_range(2..=5);
            for idx in index::sample(&mut self.rng, combos.len(), variant_count) {
                let (color, size) = combos[idx];
                let (sku, variant_name) = match size {
                    Some(size) => (
                        format!("{}-{}-{}", product_id, color, size),
                        format!("Color: {}, Size: {}", color, size),
                    ),
                    None => (
                        format!("{}-{}", product_id, color),
                        format!("Color: {}", color),
                    ),
                };
                let stock = self.rng.random_range(0..=100);
                let price = self.fake.price(50_000.0, 1_000_000.0);
                pools.variant_skus.register((product_id, sku.clone()))?;
                pools
                    .variants_by_product
                    .entry(product_id)
                    .or_default()
                    .push((sku.clone(), price));

                w.write_insert(
                    "variants",
                    VARIANTS_COLUMNS,
                    &[
                        SqlValue::Int(product_id),
                        SqlValue::Str(sku),
                        SqlValue::Str(variant_name),
                        SqlValue::Int(stock),
                        SqlValue::Float(price),
                    ],
                )?;
            }
        }
        Self::finish_batch(w, "variants")
    }
}
