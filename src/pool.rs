//! Identifier pools and composite-unique registries.
//!
//! Every batch generator samples its foreign keys from here and registers the
//! keys it emits, so a key can only be referenced after its row exists in the
//! output. Sampling is index-based and without replacement: there are no
//! retry-until-unique loops anywhere.

use ahash::{AHashMap, AHashSet};
use rand::seq::index;
use rand::Rng;
use std::fmt;
use std::hash::Hash;

/// Errors raised by pool operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PoolError {
    /// A dependent sample had no eligible candidates. Callers handle this
    /// locally by skipping the row and writing a comment.
    Exhausted { table: &'static str },
    /// A key was registered twice for a table requiring uniqueness.
    DuplicateKey { table: &'static str, key: String },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::Exhausted { table } => {
                write!(f, "no eligible candidates in pool '{}'", table)
            }
            PoolError::DuplicateKey { table, key } => {
                write!(f, "duplicate key {} in pool '{}'", key, table)
            }
        }
    }
}

impl std::error::Error for PoolError {}

/// Append-only pool of generated keys with a uniqueness index.
#[derive(Debug, Clone)]
pub struct KeyPool<K> {
    table: &'static str,
    keys: Vec<K>,
    index: AHashSet<K>,
}

impl<K> KeyPool<K>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            keys: Vec::new(),
            index: AHashSet::new(),
        }
    }

    /// Append a key, failing if it is already present.
    pub fn register(&mut self, key: K) -> Result<(), PoolError> {
        if !self.index.insert(key.clone()) {
            return Err(PoolError::DuplicateKey {
                table: self.table,
                key: format!("{:?}", key),
            });
        }
        self.keys.push(key);
        Ok(())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// One key chosen uniformly at random.
    pub fn sample_one<R: Rng>(&self, rng: &mut R) -> Result<K, PoolError> {
        if self.keys.is_empty() {
            return Err(PoolError::Exhausted { table: self.table });
        }
        let idx = rng.random_range(0..self.keys.len());
        Ok(self.keys[idx].clone())
    }

    /// `k` distinct keys chosen uniformly at random, without replacement.
    pub fn sample_many<R: Rng>(&self, rng: &mut R, k: usize) -> Result<Vec<K>, PoolError> {
        if self.keys.len() < k {
            return Err(PoolError::Exhausted { table: self.table });
        }
        Ok(index::sample(rng, self.keys.len(), k)
            .into_iter()
            .map(|i| self.keys[i].clone())
            .collect())
    }
}

/// Registry for composite-unique tuples (tag pairs, SKU pairs, review pairs).
#[derive(Debug, Clone)]
pub struct UniqueSet<T> {
    table: &'static str,
    seen: AHashSet<T>,
}

impl<T> UniqueSet<T>
where
    T: Clone + Eq + Hash + fmt::Debug,
{
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            seen: AHashSet::new(),
        }
    }

    /// Record a tuple, failing if it was already recorded this run.
    pub fn register(&mut self, tuple: T) -> Result<(), PoolError> {
        if !self.seen.insert(tuple.clone()) {
            return Err(PoolError::DuplicateKey {
                table: self.table,
                key: format!("{:?}", tuple),
            });
        }
        Ok(())
    }

    pub fn contains(&self, tuple: &T) -> bool {
        self.seen.contains(tuple)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.seen.iter()
    }
}

/// `k` distinct index pairs from the `left × right` cross product.
///
/// Permutation sampling over the flattened index space, so uniqueness is
/// structural rather than enforced by rejection.
pub fn sample_pairs<R: Rng>(
    rng: &mut R,
    left: usize,
    right: usize,
    k: usize,
) -> Vec<(usize, usize)> {
    let space = left * right;
    debug_assert!(k <= space);
    index::sample(rng, space, k)
        .into_iter()
        .map(|i| (i / right, i % right))
        .collect()
}

/// `k` distinct ordered pairs `(a, b)` with `a != b` from `0..n`.
///
/// The diagonal is excluded arithmetically by sampling from the
/// `n * (n - 1)` off-diagonal space.
pub fn sample_distinct_ordered_pairs<R: Rng>(
    rng: &mut R,
    n: usize,
    k: usize,
) -> Vec<(usize, usize)> {
    let space = n.saturating_mul(n.saturating_sub(1));
    debug_assert!(k <= space);
    index::sample(rng, space, k)
        .into_iter()
        .map(|i| {
            let a = i / (n - 1);
            let mut b = i % (n - 1);
            if b >= a {
                b += 1;
            }
            (a, b)
        })
        .collect()
}

/// All pools and auxiliary indexes for one generation run.
///
/// Passed explicitly into every batch step; a pool only ever contains keys
/// whose rows have been written.
#[derive(Debug)]
pub struct Pools {
    pub user_emails: KeyPool<String>,
    pub buyer_emails: KeyPool<String>,
    pub seller_emails: KeyPool<String>,
    pub verified_seller_emails: KeyPool<String>,
    pub address_ids: KeyPool<i64>,
    pub product_ids: KeyPool<i64>,
    pub order_ids: KeyPool<i64>,
    pub wishlist_ids: KeyPool<i64>,
    pub cart_ids: KeyPool<i64>,

    /// Users flagged buyer/seller during the users batch; promoted into the
    /// buyer/seller pools only once their extension rows are actually emitted.
    pub buyer_flagged: Vec<String>,
    pub seller_flagged: Vec<String>,

    /// seller email -> product ids owned by that seller
    pub products_by_seller: AHashMap<String, Vec<i64>>,
    /// product id -> (sku, price) of its variants
    pub variants_by_product: AHashMap<i64, Vec<(String, f64)>>,
    /// order id -> seller email the order was placed with
    pub order_seller: AHashMap<i64, String>,

    pub variant_skus: UniqueSet<(i64, String)>,
    pub image_pairs: UniqueSet<(i64, String)>,
    pub tag_pairs: UniqueSet<(i64, String)>,
    pub follow_pairs: UniqueSet<(String, String)>,
    pub alt_address_pairs: UniqueSet<(String, i64)>,
    pub review_pairs: UniqueSet<(String, i64)>,
    pub order_line_keys: UniqueSet<(i64, i64, String)>,
    pub wishlist_item_pairs: UniqueSet<(i64, i64)>,
    pub cart_item_keys: UniqueSet<(i64, i64, String)>,
}

impl Pools {
    pub fn new() -> Self {
        Self {
            user_emails: KeyPool::new("users"),
            buyer_emails: KeyPool::new("buyers"),
            seller_emails: KeyPool::new("sellers"),
            verified_seller_emails: KeyPool::new("verified sellers"),
            address_ids: KeyPool::new("addresses"),
            product_ids: KeyPool::new("products"),
            order_ids: KeyPool::new("orders"),
            wishlist_ids: KeyPool::new("wishlists"),
            cart_ids: KeyPool::new("carts"),
            buyer_flagged: Vec::new(),
            seller_flagged: Vec::new(),
            products_by_seller: AHashMap::new(),
            variants_by_product: AHashMap::new(),
            order_seller: AHashMap::new(),
            variant_skus: UniqueSet::new("variants"),
            image_pairs: UniqueSet::new("product_images"),
            tag_pairs: UniqueSet::new("product_tags"),
            follow_pairs: UniqueSet::new("follows"),
            alt_address_pairs: UniqueSet::new("alternate_addresses"),
            review_pairs: UniqueSet::new("reviews"),
            order_line_keys: UniqueSet::new("order_lines"),
            wishlist_item_pairs: UniqueSet::new("wishlist_items"),
            cart_item_keys: UniqueSet::new("cart_items"),
        }
    }

    /// Verified sellers that own at least one product (order eligibility).
    pub fn eligible_sellers(&self) -> Vec<String> {
        self.verified_seller_emails
            .keys()
            .iter()
            .filter(|email| {
                self.products_by_seller
                    .get(*email)
                    .is_some_and(|products| !products.is_empty())
            })
            .cloned()
            .collect()
    }

    /// All sellable (product, sku) pairs belonging to one seller.
    pub fn seller_catalog(&self, seller: &str) -> Vec<(i64, String)> {
        let mut catalog = Vec::new();
        if let Some(products) = self.products_by_seller.get(seller) {
            for &product_id in products {
                if let Some(variants) = self.variants_by_product.get(&product_id) {
                    for (sku, _) in variants {
                        catalog.push((product_id, sku.clone()));
                    }
                }
            }
        }
        catalog
    }

    /// All emitted (product, sku) pairs across the whole catalog.
    pub fn all_variants(&self) -> Vec<(i64, String)> {
        let mut all = Vec::new();
        for &product_id in self.product_ids.keys() {
            if let Some(variants) = self.variants_by_product.get(&product_id) {
                for (sku, _) in variants {
                    all.push((product_id, sku.clone()));
                }
            }
        }
        all
    }
}

impl Default for Pools {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_register_rejects_duplicates() {
        let mut pool: KeyPool<String> = KeyPool::new("users");
        pool.register("a@x.com".to_string()).unwrap();
        let err = pool.register("a@x.com".to_string()).unwrap_err();
        assert!(matches!(err, PoolError::DuplicateKey { table: "users", .. }));
    }

    #[test]
    fn test_sample_one_empty_pool() {
        let pool: KeyPool<i64> = KeyPool::new("orders");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            pool.sample_one(&mut rng),
            Err(PoolError::Exhausted { table: "orders" })
        ));
    }

    #[test]
    fn test_sample_many_is_distinct() {
        let mut pool: KeyPool<i64> = KeyPool::new("products");
        for i in 1..=20 {
            pool.register(i).unwrap();
        }
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let sampled = pool.sample_many(&mut rng, 15).unwrap();
        let distinct: AHashSet<i64> = sampled.iter().copied().collect();
        assert_eq!(distinct.len(), 15);
        assert!(sampled.iter().all(|k| pool.contains(k)));
    }

    #[test]
    fn test_sample_many_too_large() {
        let mut pool: KeyPool<i64> = KeyPool::new("products");
        pool.register(1).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(pool.sample_many(&mut rng, 2).is_err());
    }

    #[test]
    fn test_sample_pairs_distinct_and_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let pairs = sample_pairs(&mut rng, 5, 8, 30);
        let distinct: AHashSet<(usize, usize)> = pairs.iter().copied().collect();
        assert_eq!(distinct.len(), 30);
        assert!(pairs.iter().all(|&(a, b)| a < 5 && b < 8));
    }

    #[test]
    fn test_ordered_pairs_exclude_diagonal() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        // Exhaust the whole space to prove the diagonal never appears.
        let pairs = sample_distinct_ordered_pairs(&mut rng, 6, 30);
        let distinct: AHashSet<(usize, usize)> = pairs.iter().copied().collect();
        assert_eq!(distinct.len(), 30);
        assert!(pairs.iter().all(|&(a, b)| a != b && a < 6 && b < 6));
    }

    #[test]
    fn test_unique_set_register() {
        let mut set: UniqueSet<(i64, String)> = UniqueSet::new("product_tags");
        set.register((1, "Casual".to_string())).unwrap();
        assert!(set.register((1, "Casual".to_string())).is_err());
        set.register((2, "Casual".to_string())).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_eligible_sellers_filter() {
        let mut pools = Pools::new();
        pools
            .verified_seller_emails
            .register("with@x.com".to_string())
            .unwrap();
        pools
            .verified_seller_emails
            .register("without@x.com".to_string())
            .unwrap();
        pools
            .products_by_seller
            .insert("with@x.com".to_string(), vec![1, 2]);
        pools
            .products_by_seller
            .insert("without@x.com".to_string(), vec![]);

        let eligible = pools.eligible_sellers();
        assert_eq!(eligible, vec!["with@x.com".to_string()]);
    }
}
