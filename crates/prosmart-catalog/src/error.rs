//! Catalog error types.

use thiserror::Error;

/// Errors that can occur in catalog operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A product detail key could not be decoded.
    #[error("Invalid detail key: {0}")]
    InvalidDetailKey(String),

    /// No product matches the decoded detail key.
    #[error("Product not found: {product_id} in category {category_id}")]
    ProductNotFound {
        product_id: String,
        category_id: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::SerializationError(e.to_string())
    }
}
