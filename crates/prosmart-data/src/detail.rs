//! Product detail loading.
//!
//! The detail view re-fetches the whole tree (nothing is shared with the
//! listing) and looks the product up by its detail key. Every failure sends
//! the user back to the listing; the reason is logged.

use std::fmt;

use prosmart_catalog::catalog::{DetailKey, Listing};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::LoadErrorKind;
use crate::orchestrator::{LoadOrchestrator, LoadPhase};
use crate::policy::LoadPolicy;
use crate::source::CatalogSource;

/// Route of the listing view.
pub const LISTING_PATH: &str = "/products";

/// Why the detail view gave up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectReason {
    /// No key in the route.
    MissingKey,
    /// The key is in neither format.
    UndecodableKey(String),
    /// The tree has no such product under that category.
    NotFound(DetailKey),
    /// The tree could not be loaded.
    FetchFailed(LoadErrorKind),
}

impl fmt::Display for RedirectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectReason::MissingKey => f.write_str("no product key given"),
            RedirectReason::UndecodableKey(raw) => write!(f, "unrecognized product key {:?}", raw),
            RedirectReason::NotFound(key) => write!(
                f,
                "product {} not found in category {}",
                key.product_id, key.category_id
            ),
            RedirectReason::FetchFailed(kind) => {
                write!(f, "catalog unavailable ({})", kind.user_message())
            }
        }
    }
}

/// Result of opening a detail view.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    /// Show this product.
    Found(Listing),
    /// Go back to [`LISTING_PATH`].
    RedirectToListing(RedirectReason),
}

impl DetailOutcome {
    /// The listing, if found.
    pub fn listing(&self) -> Option<&Listing> {
        match self {
            DetailOutcome::Found(listing) => Some(listing),
            DetailOutcome::RedirectToListing(_) => None,
        }
    }
}

/// Loads the product behind a detail key.
pub struct DetailLoader<S> {
    orchestrator: LoadOrchestrator<S>,
}

impl<S: CatalogSource> DetailLoader<S> {
    /// Create a loader with the detail view's timing.
    pub fn new(source: S) -> Self {
        Self::with_policy(source, LoadPolicy::detail())
    }

    /// Create a loader with explicit timing.
    pub fn with_policy(source: S, policy: LoadPolicy) -> Self {
        Self {
            orchestrator: LoadOrchestrator::new(source, policy),
        }
    }

    /// Watch the loading phase.
    pub fn subscribe(&self) -> watch::Receiver<LoadPhase> {
        self.orchestrator.subscribe()
    }

    /// Wait for the loading state to clear.
    pub async fn settled(&self) -> LoadPhase {
        self.orchestrator.settled().await
    }

    /// Open the detail view for a raw route key.
    ///
    /// Keys that cannot be decoded redirect without fetching.
    pub async fn open(&self, raw_key: Option<&str>) -> DetailOutcome {
        let Some(raw) = raw_key.map(str::trim).filter(|k| !k.is_empty()) else {
            return redirect(RedirectReason::MissingKey);
        };

        let decoded = match DetailKey::decode(raw) {
            Ok(decoded) => decoded,
            Err(_) => return redirect(RedirectReason::UndecodableKey(raw.to_string())),
        };
        if decoded.is_legacy() {
            debug!(key = raw, "legacy detail key");
        }
        let key = decoded.into_key();

        let tree = match self.orchestrator.load().await {
            Ok(tree) => tree,
            Err(failure) => return redirect(RedirectReason::FetchFailed(failure.kind)),
        };

        match tree.find_listing(&key) {
            Ok(listing) => {
                debug!(key = %key, "detail found");
                DetailOutcome::Found(listing)
            }
            Err(_) => redirect(RedirectReason::NotFound(key)),
        }
    }

    /// Cancel the pending loading-state timer.
    pub fn teardown(&self) {
        self.orchestrator.teardown();
    }
}

fn redirect(reason: RedirectReason) -> DetailOutcome {
    warn!(%reason, redirect_to = LISTING_PATH, "redirecting to listing");
    DetailOutcome::RedirectToListing(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use async_trait::async_trait;
    use prosmart_catalog::catalog::{Category, CategoryTree, Product, Subcategory};
    use prosmart_catalog::ids::{ProductId, SubcategoryId};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::{self, Instant};

    struct FixedSource {
        result: Result<CategoryTree, FetchError>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogSource for FixedSource {
        async fn categories_with_products(&self) -> Result<CategoryTree, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            time::sleep(Duration::from_millis(50)).await;
            self.result.clone()
        }
    }

    fn source(result: Result<CategoryTree, FetchError>) -> Arc<FixedSource> {
        Arc::new(FixedSource {
            result,
            calls: AtomicUsize::new(0),
        })
    }

    fn tree() -> CategoryTree {
        CategoryTree::new().with_category(
            Category::new("cat_001", "Cookware")
                .with_main_category("Home & Kitchen")
                .with_subcategory(Subcategory {
                    subcategory_id: SubcategoryId::new("subcat_001"),
                    subcategory_name: "Pans".to_string(),
                    products: vec![Product {
                        product_id: ProductId::new("prod_0001"),
                        product_name: "Steel Pan".to_string(),
                        ..Product::default()
                    }],
                }),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_found_current_and_legacy() {
        let source = source(Ok(tree()));
        let loader = DetailLoader::new(Arc::clone(&source));

        for raw in ["prod_0001--cat_001", "prod_0001cat_001"] {
            let outcome = loader.open(Some(raw)).await;
            let listing = outcome.listing().unwrap();
            assert_eq!(listing.product.product_name, "Steel Pan");
            assert_eq!(listing.placement.subcategory_name, "Pans");
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_detail_floor_is_two_seconds() {
        let loader = DetailLoader::new(source(Ok(tree())));
        let start = Instant::now();

        loader.open(Some("prod_0001--cat_001")).await;
        assert_eq!(loader.settled().await, LoadPhase::Ready);
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bad_keys_redirect_without_fetching() {
        let source = source(Ok(tree()));
        let loader = DetailLoader::new(Arc::clone(&source));

        assert_eq!(
            loader.open(None).await,
            DetailOutcome::RedirectToListing(RedirectReason::MissingKey)
        );
        assert_eq!(
            loader.open(Some("  ")).await,
            DetailOutcome::RedirectToListing(RedirectReason::MissingKey)
        );
        assert_eq!(
            loader.open(Some("prod_0001")).await,
            DetailOutcome::RedirectToListing(RedirectReason::UndecodableKey(
                "prod_0001".to_string()
            ))
        );
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_product_redirects() {
        let loader = DetailLoader::new(source(Ok(tree())));

        let outcome = loader.open(Some("prod_0001--cat_002")).await;
        match outcome {
            DetailOutcome::RedirectToListing(RedirectReason::NotFound(key)) => {
                assert_eq!(key.category_id.as_str(), "cat_002");
            }
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_redirects() {
        let loader = DetailLoader::new(source(Err(FetchError::Request("offline".into()))));

        assert_eq!(
            loader.open(Some("prod_0001--cat_001")).await,
            DetailOutcome::RedirectToListing(RedirectReason::FetchFailed(LoadErrorKind::Fetch))
        );
    }

    #[test]
    fn test_reason_display() {
        let reason = RedirectReason::FetchFailed(LoadErrorKind::Timeout);
        assert_eq!(
            reason.to_string(),
            "catalog unavailable (Request timed out. Please retry.)"
        );
    }
}
