use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use crate::cart::Cart;
use crate::catalog::{AssetMap, Catalog};
use crate::checkout::{Checkout, DirectPurchase, OrderReceipt};
use crate::config::Config;
use crate::error::Result;
use crate::models::CartItem;

/// Color scheme of the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("expected 'light' or 'dark', got '{other}'")),
        }
    }
}

/// Everything one shopping session owns: catalog, cart, assets and theme.
///
/// Screens receive it by reference; there is no global instance.
#[derive(Debug, Clone)]
pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    assets: AssetMap,
    theme: Theme,
}

impl Storefront {
    /// Fresh session with an empty cart.
    pub fn new(catalog: Catalog, assets: AssetMap, theme: Theme) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            assets,
            theme,
        }
    }

    /// Seed from configuration: the configured catalog file, or the built-in one.
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin()?,
        };
        let assets = AssetMap::for_catalog(&catalog, &config.asset_dir);
        info!(
            products = catalog.len(),
            theme = %config.theme,
            "storefront ready"
        );
        Ok(Self::new(catalog, assets, config.theme))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn assets(&self) -> &AssetMap {
        &self.assets
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        debug!(theme = %self.theme, "theme toggled");
    }

    /// Add a catalog product by id. Unknown ids do nothing.
    ///
    /// Returns whether the product was found.
    pub fn add_to_cart_by_id(&mut self, id: &str, qty: i64) -> bool {
        match self.catalog.find_product(id) {
            Some(product) => {
                self.cart.add_to_cart(product, qty);
                true
            }
            None => {
                debug!(id, "add to cart ignored: unknown product");
                false
            }
        }
    }

    /// Checkout over the selected cart lines.
    pub fn begin_checkout(&self) -> Checkout {
        Checkout::from_cart()
    }

    /// Checkout for a single product that bypasses the cart.
    pub fn buy_now(&self, id: &str, qty: i64) -> Checkout {
        Checkout::direct(DirectPurchase::new(id, qty))
    }

    /// Recompute the lines of `checkout` against this session.
    pub fn checkout_lines(&self, checkout: &Checkout) -> Vec<CartItem> {
        checkout.lines(&self.catalog, &self.cart)
    }

    pub fn checkout_total(&self, checkout: &Checkout) -> u64 {
        checkout.total(&self.catalog, &self.cart)
    }

    pub fn adjust_checkout_quantity(&mut self, checkout: &mut Checkout, id: &str, delta: i64) {
        checkout.adjust_quantity(&mut self.cart, id, delta);
    }

    pub fn place_order(&mut self, checkout: Checkout) -> Result<OrderReceipt> {
        checkout.confirm(&self.catalog, &mut self.cart)
    }
}
