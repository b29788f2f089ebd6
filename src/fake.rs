//! Randomized-content provider for the marketplace domain.
//!
//! Wraps the `fake` crate for locale-appropriate names, addresses and prose,
//! and adds the domain formats the schema needs: `+62` phone numbers,
//! name-derived passwords, upload paths, SKU parts and date strings.

use chrono::Utc;
use fake::faker::address::en::{CityName, StateName, StreetName};
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::Rng;

/// Email providers used for generated accounts.
const DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "aol.com",
    "mail.com",
    "protonmail.com",
];

/// Base product names, suffixed with a random word.
const PRODUCT_BASES: &[&str] = &[
    "Plain Tee",
    "Hoodie Jacket",
    "Denim Jeans",
    "Sneakers",
    "Backpack",
    "Formal Shirt",
    "Midi Dress",
    "Baseball Cap",
];

const PRODUCT_DESCRIPTIONS: &[&str] = &[
    "High quality product",
    "Comfortable to wear",
    "Modern design",
    "Long lasting",
];

const TAGS: &[&str] = &[
    "Fashion",
    "Casual",
    "Formal",
    "Sport",
    "Accessories",
    "Men",
    "Women",
];

const COLORS: &[&str] = &["BLACK", "BLUE", "RED", "WHITE", "NAVY", "GREEN", "GREY"];

const SIZES: &[&str] = &["S", "M", "L", "28", "30", "32"];

const ORDER_STATUSES: &[&str] = &[
    "awaiting_payment",
    "processing",
    "shipped",
    "completed",
    "cancelled",
];

const PAYMENT_METHODS: &[&str] = &["bank_transfer", "cod", "e_wallet", "credit_card"];

const SHIPPING_METHODS: &[&str] = &["standard_courier", "same_day", "pickup", "instant_courier"];

const PASSWORD_CHARS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*_-+";

/// Fake data generator driven by a caller-supplied RNG.
pub struct MarketFaker<R: Rng> {
    rng: R,
}

impl<R: Rng> MarketFaker<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn first_name(&mut self) -> String {
        FirstName().fake_with_rng(&mut self.rng)
    }

    pub fn last_name(&mut self) -> String {
        LastName().fake_with_rng(&mut self.rng)
    }

    pub fn domain(&mut self) -> &'static str {
        DOMAINS[self.rng.random_range(0..DOMAINS.len())]
    }

    /// Password derived from the account name: first three alphanumeric
    /// characters lowercased, padded with random charset characters to
    /// ten total.
    pub fn password(&mut self, full_name: &str) -> String {
        let base: String = full_name
            .chars()
            .filter(|c| c.is_alphanumeric())
            .take(3)
            .collect::<String>()
            .to_lowercase();
        let tail: String = (0..10 - base.len())
            .map(|_| PASSWORD_CHARS[self.rng.random_range(0..PASSWORD_CHARS.len())] as char)
            .collect();
        format!("{}{}", base, tail)
    }

    /// Phone number in `+62-XXX-XXX-XXX` format.
    pub fn phone(&mut self) -> String {
        let digits: u32 = self.rng.random_range(0..1_000_000_000);
        format!(
            "+62-{:03}-{:03}-{:03}",
            digits / 1_000_000,
            digits / 1_000 % 1_000,
            digits % 1_000
        )
    }

    /// Birth date for a person aged 15 to 80 today, `YYYY-MM-DD`.
    pub fn birth_date(&mut self) -> String {
        let days_old = self.rng.random_range(15 * 365..=80 * 365);
        let date = Utc::now().date_naive() - chrono::Days::new(days_old);
        date.format("%Y-%m-%d").to_string()
    }

    /// Timestamp within the past year, `YYYY-MM-DD HH:MM:SS`.
    pub fn recent_datetime(&mut self) -> String {
        let date = Utc::now().date_naive() - chrono::Days::new(self.rng.random_range(1..=365));
        format!(
            "{} {:02}:{:02}:{:02}",
            date.format("%Y-%m-%d"),
            self.rng.random_range(0..24),
            self.rng.random_range(0..60),
            self.rng.random_range(0..60)
        )
    }

    /// Upload path `prefix/<uuid>.jpg`.
    pub fn upload_path(&mut self, prefix: &str) -> String {
        format!("{}/{}.jpg", prefix, self.uuid())
    }

    /// Version-4-shaped UUID string.
    pub fn uuid(&mut self) -> String {
        format!(
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            self.rng.random::<u32>(),
            self.rng.random::<u16>(),
            (self.rng.random::<u16>() & 0x0FFF) | 0x4000,
            (self.rng.random::<u16>() & 0x3FFF) | 0x8000,
            self.rng.random::<u64>() & 0xFFFF_FFFF_FFFF_u64
        )
    }

    pub fn province(&mut self) -> String {
        StateName().fake_with_rng(&mut self.rng)
    }

    pub fn city(&mut self) -> String {
        CityName().fake_with_rng(&mut self.rng)
    }

    pub fn street_address(&mut self) -> String {
        let street: String = StreetName().fake_with_rng(&mut self.rng);
        format!("{} {}", self.rng.random_range(1..999), street)
    }

    pub fn product_name(&mut self) -> String {
        let base = PRODUCT_BASES[self.rng.random_range(0..PRODUCT_BASES.len())];
        let mut word: String = Word().fake_with_rng(&mut self.rng);
        if let Some(first) = word.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        format!("{} {}", base, word)
    }

    pub fn product_description(&mut self) -> &'static str {
        PRODUCT_DESCRIPTIONS[self.rng.random_range(0..PRODUCT_DESCRIPTIONS.len())]
    }

    pub fn order_status(&mut self) -> &'static str {
        ORDER_STATUSES[self.rng.random_range(0..ORDER_STATUSES.len())]
    }

    pub fn payment_method(&mut self) -> &'static str {
        PAYMENT_METHODS[self.rng.random_range(0..PAYMENT_METHODS.len())]
    }

    pub fn shipping_method(&mut self) -> &'static str {
        SHIPPING_METHODS[self.rng.random_range(0..SHIPPING_METHODS.len())]
    }

    /// Price rounded to two decimal places.
    pub fn price(&mut self, min: f64, max: f64) -> f64 {
        let value = self.rng.random_range(min..max);
        (value * 100.0).round() / 100.0
    }

    /// Review rating 0.0 to 5.0, one decimal place.
    pub fn rating(&mut self) -> f64 {
        let value: f64 = self.rng.random_range(0.0..5.0);
        (value * 10.0).round() / 10.0
    }

    pub fn sentence(&mut self) -> String {
        Sentence(5..10).fake_with_rng(&mut self.rng)
    }

    pub fn paragraph(&mut self) -> String {
        Paragraph(3..5).fake_with_rng(&mut self.rng)
    }

    /// Optional list name, `"<prefix> <1..10>"` half the time.
    pub fn list_name(&mut self, prefix: &str) -> Option<String> {
        if self.rng.random_bool(0.5) {
            Some(format!("{} {}", prefix, self.rng.random_range(1..=10)))
        } else {
            None
        }
    }

    pub fn all_tags() -> &'static [&'static str] {
        TAGS
    }

    pub fn all_colors() -> &'static [&'static str] {
        COLORS
    }

    pub fn all_sizes() -> &'static [&'static str] {
        SIZES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn faker() -> MarketFaker<ChaCha8Rng> {
        MarketFaker::new(ChaCha8Rng::seed_from_u64(42))
    }

    #[test]
    fn test_deterministic_for_same_seed() {
        let mut a = faker();
        let mut b = faker();
        assert_eq!(a.first_name(), b.first_name());
        assert_eq!(a.phone(), b.phone());
        assert_eq!(a.uuid(), b.uuid());
    }

    #[test]
    fn test_phone_format() {
        let phone = faker().phone();
        assert!(phone.starts_with("+62-"));
        assert_eq!(phone.len(), "+62-123-456-789".len());
    }

    #[test]
    fn test_password_starts_with_name_base() {
        let password = faker().password("Maya Thompson");
        assert!(password.starts_with("may"));
        assert_eq!(password.len(), 10);
    }

    #[test]
    fn test_upload_path_shape() {
        let path = faker().upload_path("products");
        assert!(path.starts_with("products/"));
        assert!(path.ends_with(".jpg"));
        // prefix + '/' + 36-char uuid + ".jpg"
        assert_eq!(path.len(), "products/".len() + 36 + 4);
    }

    #[test]
    fn test_price_two_decimals() {
        let mut f = faker();
        for _ in 0..50 {
            let price = f.price(50_000.0, 1_000_000.0);
            assert_eq!(price, (price * 100.0).round() / 100.0);
            assert!((50_000.0..1_000_000.0).contains(&price));
        }
    }

    #[test]
    fn test_rating_range() {
        let mut f = faker();
        for _ in 0..50 {
            let rating = f.rating();
            assert!((0.0..=5.0).contains(&rating));
            assert_eq!(rating, (rating * 10.0).round() / 10.0);
        }
    }

    #[test]
    fn test_list_name_prefix() {
        let mut f = faker();
        let mut saw_some = false;
        let mut saw_none = false;
        for _ in 0..100 {
            match f.list_name("Wishlist") {
                Some(name) => {
                    assert!(name.starts_with("Wishlist "));
                    saw_some = true;
                }
                None => saw_none = true,
            }
        }
        assert!(saw_some && saw_none);
    }
}
