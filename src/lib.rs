//! In-memory storefront core.
//!
//! A fixed product catalog, a shopping cart with per-line selection, catalog
//! search and ordering, and a checkout flow that either drains the selected
//! cart lines or buys a single product directly. Nothing is persisted; state
//! lives for as long as the [`Storefront`] value that owns it.
//!
//! # Quick Start
//!
//! ```
//! use storefront::{Config, SortState, Storefront};
//!
//! let mut store = Storefront::from_config(&Config::default()).unwrap();
//! store.add_to_cart_by_id("1", 1);
//! store.add_to_cart_by_id("2", 2);
//! assert_eq!(store.cart().selected_total(), 55_000 + 2 * 12_500);
//!
//! let grid = storefront::filter_and_sort(
//!     store.catalog().list_products(),
//!     "mouse",
//!     &SortState::default(),
//! );
//! assert_eq!(grid[0].name, "Gaming Mouse");
//! ```

pub mod browse;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tui;

// Re-export the main public types at the crate root for convenience.
pub use browse::{filter_and_sort, PriceDirection, SortKey, SortState};
pub use cart::{cart_total, Cart};
pub use catalog::{AssetMap, Catalog};
pub use checkout::{Checkout, CheckoutSource, DirectPurchase, OrderReceipt};
pub use config::Config;
pub use error::{Result, StoreError};
pub use models::{parse_sold_count, CartItem, Product, Review};
pub use store::{Storefront, Theme};
