//! Row-count profiles for a generation run.
//!
//! Scale presets cover the common cases; a YAML file can override individual
//! counts. Per-parent ranges (images per product, lines per order) are fixed
//! in the batch generators.

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Generation scale presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// ~2,500 total rows
    Small,
    /// ~25,000 total rows
    Medium,
    /// ~125,000 total rows
    Large,
}

impl std::str::FromStr for Scale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" | "s" => Ok(Scale::Small),
            "medium" | "m" => Ok(Scale::Medium),
            "large" | "l" => Ok(Scale::Large),
            _ => Err(format!("Unknown scale: {}. Use small, medium, or large", s)),
        }
    }
}

impl std::fmt::Display for Scale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scale::Small => write!(f, "small"),
            Scale::Medium => write!(f, "medium"),
            Scale::Large => write!(f, "large"),
        }
    }
}

/// Fixed row counts for the tables that are not derived from a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCounts {
    pub users: usize,
    pub addresses: usize,
    pub follows: usize,
    pub alternate_addresses: usize,
    pub products: usize,
    pub orders: usize,
    pub reviews: usize,
}

impl RowCounts {
    pub fn for_scale(scale: Scale) -> Self {
        let base = Self {
            users: 50,
            addresses: 100,
            follows: 100,
            alternate_addresses: 50,
            products: 200,
            orders: 100,
            reviews: 50,
        };
        match scale {
            Scale::Small => base,
            Scale::Medium => base.scaled(10),
            Scale::Large => base.scaled(50),
        }
    }

    fn scaled(self, factor: usize) -> Self {
        Self {
            users: self.users * factor,
            addresses: self.addresses * factor,
            follows: self.follows * factor,
            alternate_addresses: self.alternate_addresses * factor,
            products: self.products * factor,
            orders: self.orders * factor,
            reviews: self.reviews * factor,
        }
    }

    pub fn apply(&mut self, overrides: &CountOverrides) {
        if let Some(n) = overrides.users {
            self.users = n;
        }
        if let Some(n) = overrides.addresses {
            self.addresses = n;
        }
        if let Some(n) = overrides.follows {
            self.follows = n;
        }
        if let Some(n) = overrides.alternate_addresses {
            self.alternate_addresses = n;
        }
        if let Some(n) = overrides.products {
            self.products = n;
        }
        if let Some(n) = overrides.orders {
            self.orders = n;
        }
        if let Some(n) = overrides.reviews {
            self.reviews = n;
        }
    }
}

/// Per-table overrides loaded from a YAML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CountOverrides {
    pub users: Option<usize>,
    pub addresses: Option<usize>,
    pub follows: Option<usize>,
    pub alternate_addresses: Option<usize>,
    pub products: Option<usize>,
    pub orders: Option<usize>,
    pub reviews: Option<usize>,
}

impl CountOverrides {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read counts file: {}", path.display()))?;
        serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse counts file: {}", path.display()))
    }
}
