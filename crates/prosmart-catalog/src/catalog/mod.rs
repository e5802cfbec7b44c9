//! Product catalog module.
//!
//! Contains the category tree as delivered by the API, its flattened index,
//! and detail keys.

mod category;
mod detail_key;
mod index;
mod product;

pub use category::{Category, CategoryTree, Subcategory};
pub use detail_key::{DecodedKey, DetailKey, CURRENT_SEPARATOR, LEGACY_CATEGORY_MARKER};
pub use index::CatalogIndex;
pub(crate) use index::push_unique;
pub use product::{Listing, Placement, Product};
