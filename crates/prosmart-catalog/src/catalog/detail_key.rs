//! Detail keys: the product-page path segment.
//!
//! A detail key identifies a product by `(product_id, category_id)`. Two
//! encodings exist in the wild:
//!
//! - current: `<product_id>--<category_id>`
//! - legacy: `<product_id><category_id>`, where category ids start with
//!   `cat_`. Old links and bookmarks still use this form, so it stays
//!   decodable.
//!
//! New links are always written in the current form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::ids::{CategoryId, ProductId};

/// Separator of the current encoding.
pub const CURRENT_SEPARATOR: &str = "--";

/// Prefix every category id carries; the split point of legacy keys.
pub const LEGACY_CATEGORY_MARKER: &str = "cat_";

/// Composite identifier of a product detail view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetailKey {
    /// Product identifier.
    pub product_id: ProductId,
    /// Category the product is nested under.
    pub category_id: CategoryId,
}

impl DetailKey {
    /// Create a detail key.
    pub fn new(product_id: ProductId, category_id: CategoryId) -> Self {
        Self {
            product_id,
            category_id,
        }
    }

    /// Encode in the current format.
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.product_id, CURRENT_SEPARATOR, self.category_id)
    }

    /// Decode either format.
    pub fn decode(raw: &str) -> Result<DecodedKey, CatalogError> {
        DecodedKey::from_str(raw)
    }
}

impl fmt::Display for DetailKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// A decoded key, tagged with the format it arrived in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedKey {
    /// `<product_id>--<category_id>`.
    Current(DetailKey),
    /// `<product_id>cat_<n>`.
    Legacy(DetailKey),
}

impl DecodedKey {
    /// The key, regardless of format.
    pub fn key(&self) -> &DetailKey {
        match self {
            Self::Current(key) | Self::Legacy(key) => key,
        }
    }

    /// Consume and return the key.
    pub fn into_key(self) -> DetailKey {
        match self {
            Self::Current(key) | Self::Legacy(key) => key,
        }
    }

    /// Check if the key used the legacy encoding.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }
}

impl FromStr for DecodedKey {
    type Err = CatalogError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidDetailKey(raw.to_string());

        // The separator decides the format; legacy is only tried without it.
        if let Some((product, category)) = raw.split_once(CURRENT_SEPARATOR) {
            if product.is_empty() || category.is_empty() {
                return Err(invalid());
            }
            return Ok(Self::Current(DetailKey::new(product.into(), category.into())));
        }

        let split = raw.rfind(LEGACY_CATEGORY_MARKER).ok_or_else(invalid)?;
        let (product, category) = raw.split_at(split);
        if product.is_empty() {
            return Err(invalid());
        }
        Ok(Self::Legacy(DetailKey::new(product.into(), category.into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(product: &str, category: &str) -> DetailKey {
        DetailKey::new(ProductId::new(product), CategoryId::new(category))
    }

    #[test]
    fn test_encode_current() {
        assert_eq!(key("prod_0001", "cat_001").encode(), "prod_0001--cat_001");
        assert_eq!(key("p1", "c1").to_string(), "p1--c1");
    }

    #[test]
    fn test_decode_current() {
        let decoded = DetailKey::decode("prod_0001--cat_001").unwrap();
        assert!(!decoded.is_legacy());
        assert_eq!(decoded.key(), &key("prod_0001", "cat_001"));
    }

    #[test]
    fn test_decode_current_keeps_tail_after_first_separator() {
        let decoded = DetailKey::decode("p1--c--1").unwrap();
        assert_eq!(decoded.into_key(), key("p1", "c--1"));
    }

    #[test]
    fn test_decode_legacy() {
        let decoded = DetailKey::decode("prod_0001cat_001").unwrap();
        assert!(decoded.is_legacy());
        assert_eq!(decoded.key(), &key("prod_0001", "cat_001"));
    }

    #[test]
    fn test_decode_legacy_splits_at_last_marker() {
        let decoded = DetailKey::decode("cat_toycat_012").unwrap();
        assert_eq!(decoded.into_key(), key("cat_toy", "cat_012"));
    }

    #[test]
    fn test_decode_invalid() {
        for raw in ["", "prod_0001", "--cat_001", "prod_0001--", "cat_001"] {
            assert!(
                matches!(DetailKey::decode(raw), Err(CatalogError::InvalidDetailKey(_))),
                "{:?} should not decode",
                raw
            );
        }
    }

    #[test]
    fn test_round_trip() {
        let pairs = [
            ("prod_0001", "cat_001"),
            ("p1", "c1"),
            ("SKU-7", "cat_042"),
            ("x", "y-z"),
        ];
        for (p, c) in pairs {
            let original = key(p, c);
            let decoded = DetailKey::decode(&original.encode()).unwrap();
            assert_eq!(decoded, DecodedKey::Current(original));
        }
    }
}
