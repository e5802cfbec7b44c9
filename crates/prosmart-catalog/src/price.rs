//! Display pricing for catalog products.
//!
//! The catalog is priced in Indian rupees. Amounts are held in paise (the
//! smallest unit) so that decimal prices coming from the API never go
//! through repeated float arithmetic.
//!
//! Not every product carries a price. Those that don't get a stable
//! pseudo-price derived from their id, so the same product always shows the
//! same number.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::Product;

/// Currency symbol used for every displayed price.
pub const RUPEE_SYMBOL: &str = "\u{20b9}";

/// Fixed percentage shown on discounted products.
pub const DISCOUNT_PERCENT: u8 = 20;

/// Message shown instead of a checkout flow.
pub const PURCHASE_CONTACT_MESSAGE: &str =
    "Please contact us via email or phone to purchase this product.";

const FALLBACK_SPAN: i32 = 15_000;
const FALLBACK_FLOOR: i64 = 1_000;

/// A rupee amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Price {
    /// Amount in paise.
    pub paise: i64,
}

impl Price {
    /// Create a price from paise.
    pub fn from_paise(paise: i64) -> Self {
        Self { paise }
    }

    /// Create a price from whole rupees.
    pub fn from_rupees(rupees: i64) -> Self {
        Self {
            paise: rupees.saturating_mul(100),
        }
    }

    /// Create a price from a decimal rupee amount.
    ///
    /// ```
    /// use prosmart_catalog::price::Price;
    /// let price = Price::from_decimal(1299.5);
    /// assert_eq!(price.paise, 129950);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self {
            paise: (amount * 100.0).round() as i64,
        }
    }

    /// Parse a price the way the storefront reads `product_price`.
    ///
    /// Surrounding whitespace is ignored. Empty, non-numeric and non-finite
    /// values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let amount: f64 = trimmed.parse().ok()?;
        if !amount.is_finite() {
            return None;
        }
        Some(Self::from_decimal(amount))
    }

    /// Whole rupees, rounded half away from zero.
    pub fn rupees_rounded(&self) -> i64 {
        (self.paise as f64 / 100.0).round() as i64
    }

    /// The pre-discount price shown next to a discounted one.
    ///
    /// Mirrors the storefront's `floor(price * 1.25)` in whole rupees.
    pub fn marked_up(&self) -> Self {
        let rupees = (self.paise as i128 * 125).div_euclid(10_000);
        Self::from_rupees(rupees as i64)
    }

    /// Format as `₹1,23,456` with no fraction digits.
    pub fn display(&self) -> String {
        let rupees = self.rupees_rounded();
        let grouped = group_indian(rupees.unsigned_abs());
        if rupees < 0 {
            format!("-{}{}", RUPEE_SYMBOL, grouped)
        } else {
            format!("{}{}", RUPEE_SYMBOL, grouped)
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Price information as shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPrice {
    /// The selling price.
    pub price: Price,
    /// Crossed-out original price, when discounted.
    pub original: Option<Price>,
    /// Discount percentage badge, when discounted.
    pub discount_percent: Option<u8>,
    /// Whether `price` came from the API rather than the fallback.
    pub listed: bool,
}

impl DisplayPrice {
    /// Compute the display price for a product.
    pub fn for_product(product: &Product) -> Self {
        let listed = product.product_price.as_deref().and_then(Price::parse);
        let price = listed.unwrap_or_else(|| fallback_price(product.product_id.as_str()));

        let (original, discount_percent) = if has_discount(product.product_id.as_str()) {
            (Some(price.marked_up()), Some(DISCOUNT_PERCENT))
        } else {
            (None, None)
        };

        Self {
            price,
            original,
            discount_percent,
            listed: listed.is_some(),
        }
    }

    /// Check if the product is shown as discounted.
    pub fn is_discounted(&self) -> bool {
        self.discount_percent.is_some()
    }
}

/// Stable pseudo-price for products without a listed price.
///
/// Uses the classic 31-multiplier string hash over UTF-16 code units with
/// 32-bit wrapping, so ids price identically to the web storefront.
pub fn fallback_price(product_id: &str) -> Price {
    let hash = product_id.encode_utf16().fold(0i32, |acc, unit| {
        acc.wrapping_shl(5)
            .wrapping_sub(acc)
            .wrapping_add(i32::from(unit))
    });
    let rupees = i64::from((hash % FALLBACK_SPAN).abs()) + FALLBACK_FLOOR;
    Price::from_rupees(rupees)
}

/// Whether a product id falls in the discounted bucket.
pub fn has_discount(product_id: &str) -> bool {
    product_id
        .encode_utf16()
        .next()
        .is_some_and(|unit| unit % 3 == 0)
}

/// Indian digit grouping: last three digits, then groups of two.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while head.len() > 2 {
        let (rest, group) = head.split_at(head.len() - 2);
        groups.push(group);
        head = rest;
    }
    groups.push(head);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
