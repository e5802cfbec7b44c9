//! Catalog domain types and logic for the ProSmart storefront.
//!
//! Everything here is pure: no I/O, no clocks. The data crate fetches a
//! [`CategoryTree`](catalog::CategoryTree); this crate turns it into
//! something a listing or detail view can render.
//!
//! - **Catalog**: the category tree, normalized listings, detail keys
//! - **Facets**: tab scoping, filter state, multi-facet filtering, paging
//! - **Price**: rupee display prices with fallback and discount
//!
//! # Example
//!
//! ```rust,ignore
//! use prosmart_catalog::prelude::*;
//!
//! let index = CatalogIndex::build(Some(&tree));
//!
//! let state = FilterState::replay(
//!     [
//!         FilterAction::SelectTab(Tab::from_label("Home & Kitchen")),
//!         FilterAction::ToggleCategory("Cookware".to_string()),
//!     ],
//!     Some(&tree),
//! );
//!
//! for listing in filter_products(&index.all_products, &state) {
//!     println!("{} -> /product/{}", listing.product.display_title(), listing.detail_key());
//! }
//! ```

pub mod error;
pub mod ids;
pub mod price;

pub mod catalog;
pub mod facets;

pub use error::CatalogError;
pub use ids::*;
pub use price::{DisplayPrice, Price};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;
    pub use crate::price::{DisplayPrice, Price};

    // Catalog
    pub use crate::catalog::{
        CatalogIndex, Category, CategoryTree, DecodedKey, DetailKey, Listing, Placement, Product,
        Subcategory,
    };

    // Facets
    pub use crate::facets::{
        filter_products, resolve_category_param, FilterAction, FilterState, Page, Tab, TabScope,
        PAGE_SIZE,
    };
}
