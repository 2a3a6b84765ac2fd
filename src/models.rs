use serde::Deserialize;
use tracing::warn;

use crate::error::{Result, StoreError};

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

/// A customer review. Display order is the order in the catalog data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Review {
    pub id: String,
    pub user: String,
    pub rating: u8,
    pub comment: String,
    /// Display string only, never parsed.
    pub date: String,
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: u64,
    pub description: String,
    /// Opaque key into the asset map.
    pub image: String,
    pub rating: f64,
    pub reviews_count: u64,
    /// Human readable magnitude such as `"2.1k"` or `"890"`.
    pub sold_count: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Numeric value of `sold_count`, used by the "Top Sales" ordering.
    pub fn sales_volume(&self) -> f64 {
        parse_sold_count(&self.sold_count)
    }
}

/// Parse a sold-count label: `"2.1k"` is 2100, `"890"` is 890.
///
/// Labels that do not parse count as zero.
pub fn parse_sold_count(label: &str) -> f64 {
    let label = label.trim();
    let (digits, multiplier) = match label.strip_suffix(['k', 'K']) {
        Some(rest) => (rest, 1000.0),
        None => (label, 1.0),
    };
    digits
        .trim()
        .parse::<f64>()
        .map(|n| n * multiplier)
        .unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Cart items
// ---------------------------------------------------------------------------

/// A product snapshot taken when it was added, plus cart bookkeeping.
///
/// `quantity` is never zero for an item held by a [`Cart`](crate::Cart).
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
    pub selected: bool,
}

impl CartItem {
    /// New line for `product`, selected by default.
    pub fn new(product: Product, quantity: u32) -> Self {
        Self {
            product,
            quantity,
            selected: true,
        }
    }

    pub fn id(&self) -> &str {
        &self.product.id
    }

    /// `price * quantity`.
    pub fn line_total(&self) -> u64 {
        self.product.price.saturating_mul(u64::from(self.quantity))
    }
}

// ---------------------------------------------------------------------------
// Quantities
// ---------------------------------------------------------------------------

/// Validate a requested unit count.
pub fn checked_quantity(quantity: i64) -> Result<u32> {
    if quantity < 1 {
        return Err(StoreError::InvalidQuantity { quantity });
    }
    Ok(u32::try_from(quantity).unwrap_or(u32::MAX))
}

/// Like [`checked_quantity`], but anything below one becomes one.
pub fn clamp_quantity(quantity: i64) -> u32 {
    checked_quantity(quantity).unwrap_or_else(|e| {
        warn!(error = %e, "clamping quantity to 1");
        1
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sold_count_with_k_suffix() {
        assert_eq!(parse_sold_count("2.1k"), 2100.0);
        assert_eq!(parse_sold_count("5.4K"), 5400.0);
    }

    #[test]
    fn sold_count_plain_number() {
        assert_eq!(parse_sold_count("890"), 890.0);
        assert_eq!(parse_sold_count(" 412 "), 412.0);
    }

    #[test]
    fn sold_count_garbage_is_zero() {
        assert_eq!(parse_sold_count("lots"), 0.0);
        assert_eq!(parse_sold_count(""), 0.0);
        assert_eq!(parse_sold_count("k"), 0.0);
    }

    #[test]
    fn quantity_clamping() {
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(-5), 1);
        assert_eq!(clamp_quantity(3), 3);
        assert_eq!(clamp_quantity(i64::MAX), u32::MAX);
        assert!(matches!(
            checked_quantity(0),
            Err(StoreError::InvalidQuantity { quantity: 0 })
        ));
    }
}
