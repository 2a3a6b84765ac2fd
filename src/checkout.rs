//! Checkout sessions and order confirmation.
//!
//! A checkout either covers the selected cart lines or a single "Buy Now"
//! product. Placing an order is a local state transition only.

use tracing::info;

use crate::cart::{cart_total, Cart};
use crate::catalog::Catalog;
use crate::error::{Result, StoreError};
use crate::models::{clamp_quantity, CartItem};

/// Navigation parameter for buying one product straight from its detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectPurchase {
    pub product_id: String,
    pub quantity: u32,
}

impl DirectPurchase {
    /// A requested quantity below one becomes one.
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity: clamp_quantity(quantity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutSource {
    /// The cart's selected lines.
    SelectedCart,
    /// A product that never went through the cart.
    Direct(DirectPurchase),
}

/// Result of placing an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    pub lines: Vec<CartItem>,
    pub total: u64,
    pub direct: bool,
}

/// An in-progress checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    source: CheckoutSource,
}

impl Checkout {
    pub fn from_cart() -> Self {
        Self {
            source: CheckoutSource::SelectedCart,
        }
    }

    pub fn direct(purchase: DirectPurchase) -> Self {
        Self {
            source: CheckoutSource::Direct(purchase),
        }
    }

    pub fn source(&self) -> &CheckoutSource {
        &self.source
    }

    pub fn is_direct(&self) -> bool {
        matches!(self.source, CheckoutSource::Direct(_))
    }

    /// Lines being bought, recomputed from the current catalog and cart.
    ///
    /// A direct purchase of an unknown product has no lines.
    pub fn lines(&self, catalog: &Catalog, cart: &Cart) -> Vec<CartItem> {
        match &self.source {
            CheckoutSource::SelectedCart => cart.selected_items().into_iter().cloned().collect(),
            CheckoutSource::Direct(purchase) => catalog
                .find_product(&purchase.product_id)
                .map(|p| vec![CartItem::new(p.clone(), purchase.quantity)])
                .unwrap_or_default(),
        }
    }

    pub fn total(&self, catalog: &Catalog, cart: &Cart) -> u64 {
        cart_total(&self.lines(catalog, cart))
    }

    /// Change the quantity of one line by `delta`.
    ///
    /// Direct purchases keep their own count, never below one. Cart lines go
    /// through [`Cart::update_quantity`], so they can drop out of the order.
    pub fn adjust_quantity(&mut self, cart: &mut Cart, id: &str, delta: i64) {
        match &mut self.source {
            CheckoutSource::Direct(purchase) => {
                if purchase.product_id == id {
                    let next = i64::from(purchase.quantity).saturating_add(delta);
                    purchase.quantity = clamp_quantity(next.max(1));
                }
            }
            CheckoutSource::SelectedCart => cart.update_quantity(id, delta),
        }
    }

    /// Place the order.
    ///
    /// Cart checkouts remove the ordered lines from the cart; direct
    /// purchases leave it untouched.
    pub fn confirm(self, catalog: &Catalog, cart: &mut Cart) -> Result<OrderReceipt> {
        let lines = self.lines(catalog, cart);
        if lines.is_empty() {
            return Err(StoreError::EmptyCheckout);
        }
        let total = cart_total(&lines);
        let direct = self.is_direct();
        if !direct {
            let ids: Vec<&str> = lines.iter().map(CartItem::id).collect();
            cart.confirm_checkout(&ids);
        }
        info!(lines = lines.len(), total, direct, "order placed");
        Ok(OrderReceipt {
            lines,
            total,
            direct,
        })
    }
}
