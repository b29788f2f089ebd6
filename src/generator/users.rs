//! User, address and role-extension batches.

use super::Generator;
use crate::pool::{sample_distinct_ordered_pairs, sample_pairs, Pools};
use crate::sql::SqlValue;
use crate::writer::ScriptWriter;
use rand::Rng;

const USERS_COLUMNS: &[&str] = &[
    "email",
    "password",
    "full_name",
    "phone",
    "birth_date",
    "profile_photo",
    "is_buyer",
    "is_seller",
];

const ADDRESSES_COLUMNS: &[&str] = &["address_id", "province", "city", "street"];

const BUYERS_COLUMNS: &[&str] = &["email", "main_address_id"];

const SELLERS_COLUMNS: &[&str] = &["email", "id_card_photo", "selfie_photo", "is_verified"];

const FOLLOWS_COLUMNS: &[&str] = &["email", "email_following"];

const ALT_ADDRESSES_COLUMNS: &[&str] = &["email", "address_id"];

impl Generator {
    pub(crate) fn users(&mut self, pools: &mut Pools, w: &mut ScriptWriter) -> anyhow::Result<()> {
        w.write_comment("INSERT INTO users")?;
        for _ in 0..self.counts.users {
            let first = self.fake.first_name();
            let last = self.fake.last_name();
            let full_name = format!("{} {}", first, last);
            let email = self.unique_email(&first, pools);
            pools.user_emails.register(email.clone())?;

            // Two in three users are buyers, the rest are sellers.
            let is_buyer = self.rng.random_range(0..3) < 2;
            if is_buyer {
                pools.buyer_flagged.push(email.clone());
            } else {
                pools.seller_flagged.push(email.clone());
            }

            let password = self.fake.password(&full_name);
            let phone = self.fake.phone();
            let birth_date = self.fake.birth_date();

            w.write_insert(
                "users",
                USERS_COLUMNS,
                &[
                    SqlValue::Str(email),
                    SqlValue::Str(password),
                    SqlValue::Str(full_name),
                    SqlValue::Str(phone),
                    SqlValue::Str(birth_date),
                    SqlValue::Null,
                    SqlValue::Bool(is_buyer),
                    SqlValue::Bool(!is_buyer),
                ],
            )?;
        }
        Self::finish_batch(w, "users")
    }

    /// Pick an email nobody holds yet. A handful of random attempts, then a
    /// monotonically increasing serial so termination is structural.
    fn unique_email(&mut self, first: &str, pools: &Pools) -> String {
        let local: String = first
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        for _ in 0..8 {
            let candidate = format!(
                "{}{}@{}",
                local,
                self.rng.random_range(1..100),
                self.fake.domain()
            );
            if !pools.user_emails.contains(&candidate) {
                return candidate;
            }
        }
        loop {
            self.email_serial += 1;
            let candidate = format!("{}{}@{}", local, self.email_serial, self.fake.domain());
            if !pools.user_emails.contains(&candidate) {
                return candidate;
            }
        }
    }

    pub(crate) fn addresses(
        &mut self,
        pools: &mut Pools,
        w: &mut ScriptWriter,
    ) -> anyhow::Result<()> {
        w.write_comment("INSERT INTO addresses")?;
        for id in 1..=self.counts.addresses as i64 {
            let province = self.fake.province();
            let city = self.fake.city();
            let street = self.fake.street_address();
            pools.address_ids.register(id)?;

            w.write_insert(
                "addresses",
                ADDRESSES_COLUMNS,
                &[
                    SqlValue::Int(id),
                    SqlValue::Str(province),
                    SqlValue::Str(city),
                    SqlValue::Str(street),
                ],
            )?;
        }
        Self::finish_batch(w, "addresses")
    }

    pub(crate) fn buyers(&mut self, pools: &mut Pools, w: &mut ScriptWriter) -> anyhow::Result<()> {
        w.write_comment("INSERT INTO buyers")?;
        let flagged = std::mem::take(&mut pools.buyer_flagged);
        if pools.address_ids.is_empty() {
            for email in &flagged {
                w.write_skip(&format!("no addresses for buyer {}; row skipped", email))?;
            }
            return Self::finish_batch(w, "buyers");
        }
        for email in flagged {
            let main_address_id = pools.address_ids.sample_one(&mut self.rng)?;
            pools.buyer_emails.register(email.clone())?;

            w.write_insert(
                "buyers",
                BUYERS_COLUMNS,
                &[SqlValue::Str(email), SqlValue::Int(main_address_id)],
            )?;
        }
        Self::finish_batch(w, "buyers")
    }

    pub(crate) fn sellers(
        &mut self,
        pools: &mut Pools,
        w: &mut ScriptWriter,
    ) -> anyhow::Result<()> {
        w.write_comment("INSERT INTO sellers")?;
        for email in std::mem::take(&mut pools.seller_flagged) {
            let id_card_photo = self.fake.upload_path("id-cards");
            let selfie_photo = self.fake.upload_path("selfies");
            let is_verified = self.rng.random_bool(0.5);
            pools.seller_emails.register(email.clone())?;
            if is_verified {
                pools.verified_seller_emails.register(email.clone())?;
                pools.products_by_seller.insert(email.clone(), Vec::new());
            }

            w.write_insert(
                "sellers",
                SELLERS_COLUMNS,
                &[
                    SqlValue::Str(email),
                    SqlValue::Str(id_card_photo),
                    SqlValue::Str(selfie_photo),
                    SqlValue::Bool(is_verified),
                ],
            )?;
        }
        w.write_comment(&format!(
            "Total sellers: {}, verified: {}",
            w.rows_written("sellers"),
            pools.verified_seller_emails.len()
        ))?;
        w.write_blank()?;
        Ok(())
    }

    pub(crate) fn follows(
        &mut self,
        pools: &mut Pools,
        w: &mut ScriptWriter,
    ) -> anyhow::Result<()> {
        w.write_comment("INSERT INTO follows")?;
        let users = pools.user_emails.keys().to_vec();
        let space = users.len().saturating_mul(users.len().saturating_sub(1));
        let mut count = self.counts.follows;
        if count > space {
            w.write_comment(&format!(
                "requested {} follows but only {} distinct pairs exist",
                count, space
            ))?;
            count = space;
        }
        for (a, b) in sample_distinct_ordered_pairs(&mut self.rng, users.len(), count) {
            let email = users[a].clone();
            let email_following = users[b].clone();
            pools
                .follow_pairs
                .register((email.clone(), email_following.clone()))?;

            w.write_insert(
                "follows",
                FOLLOWS_COLUMNS,
                &[SqlValue::Str(email), SqlValue::Str(email_following)],
            )?;
        }
        Self::finish_batch(w, "follows")
    }

    pub(crate) fn alternate_addresses(
        &mut self,
        pools: &mut Pools,
        w: &mut ScriptWriter,
    ) -> anyhow::Result<()> {
        w.write_comment("INSERT INTO alternate_addresses")?;
        let buyers = pools.buyer_emails.keys().to_vec();
        let addresses = pools.address_ids.keys().to_vec();
        let space = buyers.len() * addresses.len();
        let mut count = self.counts.alternate_addresses;
        if count > space {
            w.write_comment(&format!(
                "requested {} alternate addresses but only {} distinct pairs exist",
                count, space
            ))?;
            count = space;
        }
        for (b, a) in sample_pairs(&mut self.rng, buyers.len(), addresses.len(), count) {
            let email = buyers[b].clone();
            let address_id = addresses[a];
            pools
                .alt_address_pairs
                .register((email.clone(), address_id))?;

            w.write_insert(
                "alternate_addresses",
                ALT_ADDRESSES_COLUMNS,
                &[SqlValue::Str(email), SqlValue::Int(address_id)],
            )?;
        }
        Self::finish_batch(w, "alternate_addresses")
    }
}
