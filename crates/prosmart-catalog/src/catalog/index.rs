//! Flattened view of the category tree.

use serde::Serialize;

use crate::catalog::{CategoryTree, Listing};

/// Lists derived from a category tree.
///
/// `all_products` follows category-then-subcategory traversal order; the
/// name lists hold each distinct name once, in order of first sight.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogIndex {
    /// Every product with its placement.
    pub all_products: Vec<Listing>,
    /// Distinct main categories.
    pub main_categories: Vec<String>,
    /// Distinct category names.
    pub categories: Vec<String>,
    /// Distinct subcategory names.
    pub subcategories: Vec<String>,
}

impl CatalogIndex {
    /// Normalize a tree that may not be loaded yet.
    ///
    /// An absent tree yields empty lists.
    pub fn build(tree: Option<&CategoryTree>) -> Self {
        tree.map(Self::from_tree).unwrap_or_default()
    }

    /// Normalize a loaded tree.
    pub fn from_tree(tree: &CategoryTree) -> Self {
        let mut index = Self::default();

        for category in tree.categories() {
            push_unique(&mut index.categories, &category.category_name);
            if let Some(main) = &category.main_category {
                push_unique(&mut index.main_categories, main);
            }

            for subcategory in category.subcategories.values() {
                push_unique(&mut index.subcategories, &subcategory.subcategory_name);

                let placement = category.placement(subcategory);
                index
                    .all_products
                    .extend(subcategory.products.iter().map(|product| Listing {
                        product: product.clone(),
                        placement: placement.clone(),
                    }));
            }
        }

        index
    }

    /// Check if there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.all_products.is_empty()
    }
}

/// Append `name` unless already present.
pub(crate) fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}
