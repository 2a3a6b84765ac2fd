use thiserror::Error;

/// Error type for storefront operations.
///
/// Cart mutations never fail; these variants surface from catalog seeding,
/// configuration and checkout confirmation.
///
/// - `NotFound`: lookup of an unknown product id
/// - `InvalidQuantity`: a quantity below one (cart operations clamp it instead)
/// - `DuplicateProduct`: two catalog entries share an id
/// - `EmptyCheckout`: confirming an order with no lines
/// - `Catalog`: malformed catalog JSON (wraps `serde_json::Error`)
/// - `Io`: file I/O (wraps `std::io::Error`)
/// - `Config`: an environment variable holds an unusable value
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Product not found: {id}")]
    NotFound { id: String },

    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: i64 },

    #[error("Duplicate product id in catalog: {id}")]
    DuplicateProduct { id: String },

    #[error("Nothing to check out")]
    EmptyCheckout,

    #[error("Catalog parse failed: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value for {key}: {message}")]
    Config { key: String, message: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;
