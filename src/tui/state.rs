use crate::{
    filter_and_sort, CartItem, Checkout, OrderReceipt, Product, SortState, Storefront,
};

/// Represents the current screen being displayed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AppScreen {
    /// Product grid with sort bar.
    Catalog,
    /// Editing the catalog search query.
    SearchInput,
    /// Product detail modal over the catalog.
    ProductDetail,
    /// Cart lines with selection and quantity controls.
    Cart,
    /// Confirmation prompt before removing selected cart lines.
    ConfirmDelete,
    /// Order review, from the cart or a direct purchase.
    Checkout,
    /// Order placed notice.
    OrderPlaced,
}

/// Main application state.
pub struct AppState {
    /// Current screen being displayed.
    pub(crate) screen: AppScreen,
    /// Catalog, cart and theme for this session.
    pub(crate) store: Storefront,
    /// Should the application quit?
    pub should_quit: bool,
    /// Error message to display.
    pub(crate) error_message: Option<String>,
    /// Non-error status message (e.g. item added).
    pub(crate) success_message: Option<String>,

    // Catalog state
    /// Search query string.
    pub(crate) search_query: String,
    /// Active sort option and remembered price direction.
    pub(crate) sort: SortState,
    /// Highlighted row in the product grid.
    pub(crate) selected_row: usize,

    // Detail modal state
    /// Product shown in the detail modal.
    pub(crate) detail_product: Option<String>,
    /// Quantity picked in the detail modal.
    pub(crate) detail_qty: u32,

    // Cart state
    /// Highlighted cart line.
    pub(crate) cart_row: usize,

    // Checkout state
    /// Checkout in progress.
    pub(crate) checkout: Option<Checkout>,
    /// Highlighted checkout line.
    pub(crate) checkout_row: usize,
    /// Receipt of the order just placed.
    pub(crate) last_order: Option<OrderReceipt>,
}

impl AppState {
    /// Create the application state around a storefront session.
    pub fn new(store: Storefront) -> Self {
        Self {
            screen: AppScreen::Catalog,
            store,
            should_quit: false,
            error_message: None,
            success_message: None,
            search_query: String::new(),
            sort: SortState::default(),
            selected_row: 0,
            detail_product: None,
            detail_qty: 1,
            cart_row: 0,
            checkout: None,
            checkout_row: 0,
            last_order: None,
        }
    }

    /// Products currently shown in the grid.
    pub(crate) fn visible_products(&self) -> Vec<&Product> {
        filter_and_sort(
            self.store.catalog().list_products(),
            &self.search_query,
            &self.sort,
        )
    }

    pub(crate) fn highlighted_product(&self) -> Option<&Product> {
        self.visible_products().get(self.selected_row).copied()
    }

    pub(crate) fn detail(&self) -> Option<&Product> {
        self.detail_product
            .as_deref()
            .and_then(|id| self.store.catalog().find_product(id))
    }

    pub(crate) fn highlighted_cart_item(&self) -> Option<&CartItem> {
        self.store.cart().items().get(self.cart_row)
    }

    /// Lines of the checkout in progress, recomputed from the session.
    pub(crate) fn checkout_lines(&self) -> Vec<CartItem> {
        self.checkout
            .as_ref()
            .map(|c| self.store.checkout_lines(c))
            .unwrap_or_default()
    }

    pub(crate) fn checkout_total(&self) -> u64 {
        self.checkout
            .as_ref()
            .map(|c| self.store.checkout_total(c))
            .unwrap_or(0)
    }

    /// Open the detail modal for the highlighted product.
    pub(crate) fn open_detail(&mut self) {
        match self.highlighted_product().map(|p| p.id.clone()) {
            Some(id) => {
                self.detail_product = Some(id);
                self.detail_qty = 1;
                self.screen = AppScreen::ProductDetail;
            }
            None => self.set_error("No product selected".to_string()),
        }
    }

    pub(crate) fn close_detail(&mut self) {
        self.detail_product = None;
        self.screen = AppScreen::Catalog;
    }

    /// Add the modal's product and quantity to the cart, then close it.
    pub(crate) fn add_detail_to_cart(&mut self) {
        if let Some(id) = self.detail_product.clone() {
            let qty = i64::from(self.detail_qty);
            if self.store.add_to_cart_by_id(&id, qty) {
                let name = self.detail().map(|p| p.name.clone()).unwrap_or(id);
                self.set_success(format!("Added {qty} x {name} to cart"));
            }
        }
        self.close_detail();
    }

    /// Start a direct purchase of the modal's product.
    pub(crate) fn buy_detail_now(&mut self) {
        if let Some(id) = self.detail_product.take() {
            self.checkout = Some(self.store.buy_now(&id, i64::from(self.detail_qty)));
            self.checkout_row = 0;
            self.screen = AppScreen::Checkout;
        }
    }

    /// Start checking out the selected cart lines.
    pub(crate) fn begin_cart_checkout(&mut self) {
        if self.store.cart().selected_count() == 0 {
            self.set_error("Select at least one item to check out".to_string());
            return;
        }
        self.checkout = Some(self.store.begin_checkout());
        self.checkout_row = 0;
        self.clear_error();
        self.screen = AppScreen::Checkout;
    }

    /// Change the highlighted checkout line's quantity.
    pub(crate) fn adjust_checkout_quantity(&mut self, delta: i64) {
        let Some(id) = self
            .checkout_lines()
            .get(self.checkout_row)
            .map(|line| line.id().to_string())
        else {
            return;
        };
        if let Some(checkout) = self.checkout.as_mut() {
            self.store.adjust_checkout_quantity(checkout, &id, delta);
        }
    }

    /// Place the order for the checkout in progress.
    pub(crate) fn confirm_order(&mut self) {
        let Some(checkout) = self.checkout.take() else {
            return;
        };
        match self.store.place_order(checkout.clone()) {
            Ok(receipt) => {
                self.last_order = Some(receipt);
                self.screen = AppScreen::OrderPlaced;
            }
            Err(e) => {
                self.checkout = Some(checkout);
                self.set_error(e.to_string());
            }
        }
    }

    /// Leave the checkout: direct purchases return to the catalog, cart
    /// checkouts to the cart.
    pub(crate) fn leave_checkout(&mut self) {
        let direct = self.checkout.as_ref().is_some_and(Checkout::is_direct);
        self.checkout = None;
        self.screen = if direct {
            AppScreen::Catalog
        } else {
            AppScreen::Cart
        };
    }

    /// Ask for confirmation when something is selected for deletion.
    pub(crate) fn request_delete(&mut self) {
        if self.store.cart().selected_count() > 0 {
            self.screen = AppScreen::ConfirmDelete;
        }
    }

    pub(crate) fn delete_selected(&mut self) {
        let removed = self.store.cart_mut().delete_selected();
        self.set_success(format!("Removed {removed} item(s)"));
        self.screen = AppScreen::Cart;
    }

    /// Clear any error message.
    pub(crate) fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Set an error message.
    pub(crate) fn set_error(&mut self, message: String) {
        self.success_message = None;
        self.error_message = Some(message);
    }

    /// Clear any success message.
    pub(crate) fn clear_success(&mut self) {
        self.success_message = None;
    }

    /// Set a success message.
    pub(crate) fn set_success(&mut self, message: String) {
        self.error_message = None;
        self.success_message = Some(message);
    }
}
