//! Full-run invariant tests: referential integrity, composite uniqueness,
//! seller eligibility, and trailer counts over seeded generation runs.

use sql_seeder::generator::{Generator, BATCH_ORDER};
use sql_seeder::pool::Pools;
use sql_seeder::profile::{CountOverrides, RowCounts, Scale};
use sql_seeder::writer::{RunStats, ScriptWriter};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Vec sink that survives the writer so the output can be inspected.
#[derive(Clone, Default)]
struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn run_seeded(seed: u64, counts: RowCounts) -> (String, Pools, RunStats) {
    let sink = SharedSink::default();
    let mut writer = ScriptWriter::new(Box::new(sink.clone()));
    let mut generator = Generator::new(seed, counts);
    let pools = generator.run(&mut writer, |_| {}).unwrap();
    let stats = writer.finish().unwrap();
    let text = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
    (text, pools, stats)
}

fn insert_count(text: &str, table: &str) -> usize {
    let prefix = format!("INSERT INTO {} (", table);
    text.lines().filter(|l| l.starts_with(&prefix)).count()
}

/// Parse `-- Total <table>: N` (the sellers trailer carries a suffix).
fn trailer_count(text: &str, table: &str) -> usize {
    let prefix = format!("-- Total {}: ", table);
    let line = text
        .lines()
        .find(|l| l.starts_with(&prefix))
        .unwrap_or_else(|| panic!("missing trailer for {}", table));
    line[prefix.len()..]
        .split(',')
        .next()
        .unwrap()
        .trim()
        .parse()
        .unwrap()
}

fn assert_invariants(pools: &Pools) {
    // Every order's seller is verified and owns at least one product.
    for (order_id, seller) in &pools.order_seller {
        assert!(
            pools.verified_seller_emails.contains(seller),
            "order {} placed with unverified seller {}",
            order_id,
            seller
        );
        assert!(
            pools
                .products_by_seller
                .get(seller)
                .is_some_and(|p| !p.is_empty()),
            "order {} placed with productless seller {}",
            order_id,
            seller
        );
    }

    // Every order line's (product, sku) belongs to the order's seller.
    for (order_id, product_id, sku) in pools.order_line_keys.iter() {
        let seller = pools
            .order_seller
            .get(order_id)
            .expect("order line references unknown order");
        assert!(
            pools.products_by_seller[seller].contains(product_id),
            "order {} line references product {} not owned by {}",
            order_id,
            product_id,
            seller
        );
        assert!(
            pools.variants_by_product[product_id]
                .iter()
                .any(|(s, _)| s == sku),
            "order {} line references unknown sku {}",
            order_id,
            sku
        );
    }

    // Cart items reference emitted variants only.
    for (cart_id, product_id, sku) in pools.cart_item_keys.iter() {
        assert!(pools.cart_ids.contains(cart_id));
        assert!(
            pools
                .variants_by_product
                .get(product_id)
                .is_some_and(|v| v.iter().any(|(s, _)| s == sku)),
            "cart {} references sku {} never emitted for product {}",
            cart_id,
            sku,
            product_id
        );
    }

    // Wishlist items reference emitted wishlists and products.
    for (wishlist_id, product_id) in pools.wishlist_item_pairs.iter() {
        assert!(pools.wishlist_ids.contains(wishlist_id));
        assert!(pools.product_ids.contains(product_id));
    }

    // Reviews pair emitted buyers with emitted orders.
    for (buyer, order_id) in pools.review_pairs.iter() {
        assert!(pools.buyer_emails.contains(buyer));
        assert!(pools.order_ids.contains(order_id));
    }

    // Follows connect distinct existing users.
    for (a, b) in pools.follow_pairs.iter() {
        assert_ne!(a, b);
        assert!(pools.user_emails.contains(a));
        assert!(pools.user_emails.contains(b));
    }

    // Alternate addresses pair emitted buyers with emitted addresses.
    for (buyer, address_id) in pools.alt_address_pairs.iter() {
        assert!(pools.buyer_emails.contains(buyer));
        assert!(pools.address_ids.contains(address_id));
    }
}

#[test]
fn test_same_seed_is_deterministic() {
    let (a, _, _) = run_seeded(42, RowCounts::for_scale(Scale::Small));
    let (b, _, _) = run_seeded(42, RowCounts::for_scale(Scale::Small));
    assert_eq!(a, b);
}

#[test]
fn test_different_seeds_each_satisfy_invariants() {
    for seed in [7, 99, 12345] {
        let (_, pools, _) = run_seeded(seed, RowCounts::for_scale(Scale::Small));
        assert_invariants(&pools);
    }
}

#[test]
fn test_trailer_counts_match_statements() {
    let (text, _, stats) = run_seeded(42, RowCounts::for_scale(Scale::Small));
    for &table in BATCH_ORDER {
        let inserted = insert_count(&text, table);
        assert_eq!(
            trailer_count(&text, table),
            inserted,
            "trailer mismatch for {}",
            table
        );
        assert_eq!(
            stats.rows_for(table),
            inserted,
            "stats mismatch for {}",
            table
        );
    }
}

#[test]
fn test_profile_counts_respected() {
    let counts = RowCounts::for_scale(Scale::Small);
    let (text, pools, _) = run_seeded(42, counts);

    assert_eq!(pools.user_emails.len(), counts.users);
    assert_eq!(insert_count(&text, "users"), counts.users);
    assert_eq!(pools.address_ids.len(), counts.addresses);
    assert_eq!(insert_count(&text, "follows"), counts.follows);

    // Buyer and seller extension rows partition the users.
    assert_eq!(
        pools.buyer_emails.len() + pools.seller_emails.len(),
        counts.users
    );

    // With seed 42 the run has verified sellers, so the catalog fills up to
    // the even-split total (at most one product per seller short of the
    // requested count).
    let verified = pools.verified_seller_emails.len();
    assert!(verified > 0);
    let products = pools.product_ids.len();
    assert!(products <= counts.products);
    assert!(products + verified > counts.products);

    // Orders plus skipped orders account for the requested count.
    assert!(insert_count(&text, "orders") <= counts.orders);
}

#[test]
fn test_yaml_overrides_change_row_counts() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "users: 12\naddresses: 9").unwrap();
    file.flush().unwrap();

    let overrides = CountOverrides::load(file.path()).unwrap();
    let mut counts = RowCounts::for_scale(Scale::Small);
    counts.apply(&overrides);

    let (text, pools, _) = run_seeded(5, counts);
    assert_eq!(pools.user_emails.len(), 12);
    assert_eq!(insert_count(&text, "addresses"), 9);
}

#[test]
fn test_empty_profile_skips_without_failing() {
    // No users at all: every dependent batch must degrade to comments,
    // never abort.
    let counts = RowCounts {
        users: 0,
        addresses: 0,
        follows: 10,
        alternate_addresses: 10,
        products: 10,
        orders: 5,
        reviews: 5,
    };
    let (text, pools, stats) = run_seeded(1, counts);

    assert_eq!(stats.total_rows(), 0);
    assert!(stats.skipped_rows > 0);
    assert!(text.contains("no verified seller"));
    assert!(pools.order_ids.is_empty());
}

#[test]
fn test_output_is_well_formed() {
    let (text, _, _) = run_seeded(42, RowCounts::for_scale(Scale::Small));
    for line in text.lines() {
        if line.is_empty() || line.starts_with("-- ") {
            continue;
        }
        assert!(
            line.starts_with("INSERT INTO ") && line.ends_with(';'),
            "unexpected line: {}",
            line
        );
    }
}
