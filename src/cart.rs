//! The shopping cart.
//!
//! Each product id appears at most once. An item lives as
//! `absent -> present(quantity >= 1, selected) -> absent`; quantity and
//! selection changes keep it in place, and a quantity that would drop to zero
//! or below removes it instead.

use tracing::debug;

use crate::models::{clamp_quantity, CartItem, Product};

/// Ordered cart contents and the operations that mutate them.
///
/// Lookups by an id that is not in the cart are no-ops.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `qty` units of `product`.
    ///
    /// An existing line grows and keeps its position and selection. A new
    /// line is appended, selected. Quantities below one are clamped to one.
    pub fn add_to_cart(&mut self, product: &Product, qty: i64) {
        let qty = clamp_quantity(qty);
        if let Some(item) = self.item_mut(&product.id) {
            item.quantity = item.quantity.saturating_add(qty);
            debug!(id = %product.id, quantity = item.quantity, "cart line increased");
            return;
        }
        self.items.push(CartItem::new(product.clone(), qty));
        debug!(id = %product.id, quantity = qty, "cart line added");
    }

    /// Shift the quantity of `id` by `delta`, removing the line at zero.
    pub fn update_quantity(&mut self, id: &str, delta: i64) {
        let Some(pos) = self.position(id) else {
            return;
        };
        let next = i64::from(self.items[pos].quantity).saturating_add(delta);
        if next <= 0 {
            self.items.remove(pos);
            debug!(id, "cart line removed");
        } else {
            let quantity = u32::try_from(next).unwrap_or(u32::MAX);
            self.items[pos].quantity = quantity;
            debug!(id, quantity, "cart line quantity changed");
        }
    }

    pub fn toggle_select(&mut self, id: &str) {
        if let Some(item) = self.item_mut(id) {
            item.selected = !item.selected;
            debug!(id, selected = item.selected, "cart line selection toggled");
        }
    }

    /// Set every line's selection to `select`.
    pub fn toggle_all(&mut self, select: bool) {
        for item in &mut self.items {
            item.selected = select;
        }
        debug!(select, "cart selection set for all lines");
    }

    /// Select-all checkbox: clears everything when all lines are selected,
    /// otherwise selects everything.
    pub fn toggle_select_all(&mut self) {
        let select = !self.is_all_selected();
        self.toggle_all(select);
    }

    /// Remove every selected line. Returns how many were removed.
    ///
    /// Callers ask for confirmation first; this removes unconditionally.
    pub fn delete_selected(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.selected);
        let removed = before - self.items.len();
        debug!(removed, "selected cart lines deleted");
        removed
    }

    /// Drop the lines that were just ordered. Ids not in the cart are ignored.
    pub fn confirm_checkout<S: AsRef<str>>(&mut self, item_ids: &[S]) -> usize {
        let before = self.items.len();
        self.items
            .retain(|item| !item_ids.iter().any(|id| id.as_ref() == item.id()));
        let removed = before - self.items.len();
        debug!(removed, "checked-out lines removed from cart");
        removed
    }

    // -----------------------------------------------------------------------
    // Derived reads
    // -----------------------------------------------------------------------

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Selected lines, in cart order.
    pub fn selected_items(&self) -> Vec<&CartItem> {
        self.items.iter().filter(|item| item.selected).collect()
    }

    pub fn selected_count(&self) -> usize {
        self.items.iter().filter(|item| item.selected).count()
    }

    /// Total of the selected lines.
    pub fn selected_total(&self) -> u64 {
        cart_total(self.items.iter().filter(|item| item.selected))
    }

    /// True when the cart has lines and all of them are selected.
    pub fn is_all_selected(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|item| item.selected)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn item_mut(&mut self, id: &str) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }
}

/// Sum of `price * quantity` over `items`.
pub fn cart_total<'a, I>(items: I) -> u64
where
    I: IntoIterator<Item = &'a CartItem>,
{
    items
        .into_iter()
        .fold(0u64, |sum, item| sum.saturating_add(item.line_total()))
}
