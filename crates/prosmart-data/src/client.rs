//! HTTP client for the catalog API.

use std::time::Duration;

use async_trait::async_trait;
use prosmart_catalog::catalog::{CategoryTree, Product};
use prosmart_catalog::ids::{CategoryId, ProductId, SubcategoryId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::envelope::{decode_envelope, TreePayload};
use crate::error::FetchError;
use crate::policy::DEFAULT_CEILING;
use crate::source::CatalogSource;

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://prosmart-concepts.vercel.app/api";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "PROSMART_API_BASE_URL";

/// A category without its subtree, as returned by `/categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category_id: CategoryId,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub main_category: Option<String>,
}

/// A subcategory without its products, as returned by `/subcategories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategorySummary {
    pub subcategory_id: SubcategoryId,
    #[serde(default)]
    pub subcategory_name: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

/// Query string filters for `/products`.
///
/// Filters with empty values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    filters: Vec<(String, String)>,
}

impl ProductQuery {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Key/value pairs that will be sent.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

/// Catalog API client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl CatalogClient {
    /// Create a client for `base_url` with the default ceiling.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, DEFAULT_CEILING)
    }

    /// Create a client whose transport gives up after `timeout`.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Create a client for [`BASE_URL_ENV`], falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Result<Self, FetchError> {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// The base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET /categories-with-products`.
    pub async fn categories_with_products(&self) -> Result<CategoryTree, FetchError> {
        let payload: TreePayload = self.get("categories-with-products", &[]).await?;
        let tree = payload.into_tree();
        debug!(
            categories = tree.len(),
            products = tree.product_count(),
            "decoded category tree"
        );
        Ok(tree)
    }

    /// `GET /products`.
    pub async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, FetchError> {
        self.get("products", &query.pairs()).await
    }

    /// `GET /products/{id}`.
    pub async fn product(&self, id: &ProductId) -> Result<Product, FetchError> {
        self.get(&format!("products/{}", id), &[]).await
    }

    /// `GET /categories`.
    pub async fn categories(&self) -> Result<Vec<CategorySummary>, FetchError> {
        self.get("categories", &[]).await
    }

    /// `GET /subcategories`, optionally for one category.
    pub async fn subcategories(
        &self,
        category_id: Option<&CategoryId>,
    ) -> Result<Vec<SubcategorySummary>, FetchError> {
        match category_id {
            Some(id) => self.get("subcategories", &[("category_id", id.as_str())]).await,
            None => self.get("subcategories", &[]).await,
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = self.url(path);
        debug!(%url, ?query, "GET");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        debug!(%url, status, bytes = body.len(), "response received");

        decode_envelope(status, &body)
    }

    fn transport_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn categories_with_products(&self) -> Result<CategoryTree, FetchError> {
        CatalogClient::categories_with_products(self).await
    }
}
