//! Order, order line and review batches.

use super::Generator;
use crate::pool::{sample_pairs, Pools};
use crate::sql::SqlValue;
use crate::writer::ScriptWriter;
use rand::seq::index;
use rand::Rng;

const ORDERS_COLUMNS: &[&str] = &[
    "order_id",
    "status",
    "total_price",
    "payment_method",
    "note",
    "ordered_at",
    "shipping_method",
    "buyer_email",
    "address_id",
    "seller_email",
];

const ORDER_LINES_COLUMNS: &[&str] = &["order_id", "product_id", "sku", "quantity"];

const REVIEWS_COLUMNS: &[&str] = &["buyer_email", "order_id", "content", "rating"];

impl Generator {
    pub(crate) fn orders(&mut self, pools: &mut Pools, w: &mut ScriptWriter) -> anyhow::Result<()> {
        w.write_comment("INSERT INTO orders")?;

        // Eligibility is fixed for the whole batch: the catalog no longer
        // changes once orders start.
        let eligible = pools.eligible_sellers();

        for order_id in 1..=self.counts.orders as i64 {
            if eligible.is_empty() {
                w.write_skip(&format!(
                    "no verified seller with products for order {}",
                    order_id
                ))?;
                continue;
            }
            let buyer_email = match pools.buyer_emails.sample_one(&mut self.rng) {
                Ok(email) => email,
                Err(_) => {
                    w.write_skip(&format!("no buyers available for order {}", order_id))?;
                    continue;
                }
            };
            let address_id = match pools.address_ids.sample_one(&mut self.rng) {
                Ok(id) => id,
                Err(_) => {
                    w.write_skip(&format!("no addresses available for order {}", order_id))?;
                    continue;
                }
            };
            let seller_email = eligible[self.rng.random_range(0..eligible.len())].clone();

            let status = self.fake.order_status();
            let total_price = self.fake.price(100_000.0, 5_000_000.0);
            let payment_method = self.fake.payment_method();
            let note = if self.rng.random_bool(0.5) {
                Some(self.fake.sentence())
            } else {
                None
            };
            let ordered_at = self.fake.recent_datetime();
            let shipping_method = self.fake.shipping_method();

            pools.order_ids.register(order_id)?;
            pools.order_seller.insert(order_id, seller_email.clone());

            w.write_insert(
                "orders",
                ORDERS_COLUMNS,
                &[
                    SqlValue::Int(order_id),
                    SqlValue::Str(status.to_string()),
                    SqlValue::Float(total_price),
                    SqlValue::Str(payment_method.to_string()),
                    SqlValue::opt_str(note),
                    SqlValue::Str(ordered_at),
                    SqlValue::Str(shipping_method.to_string()),
                    SqlValue::Str(buyer_email),
                    SqlValue::Int(address_id),
                    SqlValue::Str(seller_email),
                ],
            )?;
        }
        Self::finish_batch(w, "orders")
    }

    pub(crate) fn order_lines(
        &mut self,
        pools: &mut Pools,
        w: &mut ScriptWriter,
    ) -> anyhow::Result<()> {
        w.write_comment("INSERT INTO order_lines")?;
        for order_id in pools.order_ids.keys().to_vec() {
            let Some(seller) = pools.order_seller.get(&order_id).cloned() else {
                continue;
            };
            let catalog = pools.seller_catalog(&seller);
            if catalog.is_empty() {
                w.write_skip(&format!(
                    "no sellable variants for seller {} on order {}",
                    seller, order_id
                ))?;
                continue;
            }
            let line_count = self.rng.random_range(1..=3).min(catalog.len());
            for idx in index::sample(&mut self.rng, catalog.len(), line_count) {
                let (product_id, sku) = catalog[idx].clone();
                let quantity = self.rng.random_range(1..=5);
                pools
                    .order_line_keys
                    .register((order_id, product_id, sku.clone()))?;

                w.write_insert(
                    "order_lines",
                    ORDER_LINES_COLUMNS,
                    &[
                        SqlValue::Int(order_id),
                        SqlValue::Int(product_id),
                        SqlValue::Str(sku),
                        SqlValue::Int(quantity),
                    ],
                )?;
            }
        }
        Self::finish_batch(w, "order_lines")
    }

    pub(crate) fn reviews(
        &mut self,
        pools: &mut Pools,
        w: &mut ScriptWriter,
    ) -> anyhow::Result<()> {
        w.write_comment("INSERT INTO reviews")?;
        let buyers = pools.buyer_emails.keys().to_vec();
        let orders = pools.order_ids.keys().to_vec();
        let space = buyers.len() * orders.len();
        let mut count = self.counts.reviews;
        if count > space {
            w.write_comment(&format!(
                "requested {} reviews but only {} distinct (buyer, order) pairs exist",
                count, space
            ))?;
            count = space;
        }
        for (b, o) in sample_pairs(&mut self.rng, buyers.len(), orders.len(), count) {
            let buyer_email = buyers[b].clone();
            let order_id = orders[o];
            let content = if self.rng.random_bool(0.5) {
                Some(self.fake.paragraph())
            } else {
                None
            };
            let rating = self.fake.rating();
            pools
                .review_pairs
                .register((buyer_email.clone(), order_id))?;

            w.write_insert(
                "reviews",
                REVIEWS_COLUMNS,
                &[
                    SqlValue::Str(buyer_email),
                    SqlValue::Int(order_id),
                    SqlValue::opt_str(content),
                    SqlValue::Float(rating),
                ],
            )?;
        }
        Self::finish_batch(w, "reviews")
    }
}
