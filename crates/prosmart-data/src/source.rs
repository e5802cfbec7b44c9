//! The seam between load orchestration and transport.

use std::sync::Arc;

use async_trait::async_trait;
use prosmart_catalog::catalog::CategoryTree;

use crate::error::FetchError;

/// Something that can produce the full category tree.
///
/// [`CatalogClient`](crate::CatalogClient) is the HTTP implementation.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every category with its subcategories and products.
    async fn categories_with_products(&self) -> Result<CategoryTree, FetchError>;
}

#[async_trait]
impl<S: CatalogSource + ?Sized> CatalogSource for Arc<S> {
    async fn categories_with_products(&self) -> Result<CategoryTree, FetchError> {
        (**self).categories_with_products().await
    }
}
