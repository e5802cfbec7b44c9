//! Facet lists visible under a tab.

use serde::Serialize;

use crate::catalog::{push_unique, CatalogIndex, CategoryTree};
use crate::facets::Tab;

/// Category and subcategory names offered while a tab is active.
///
/// Under [`Tab::AllItems`] these are the full lists of the index. Under a
/// main-category tab only categories carrying that main category, and the
/// subcategories nested in them, are offered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TabScope {
    /// Tab the lists were derived for.
    pub tab: Tab,
    /// Category names, in traversal order.
    pub categories: Vec<String>,
    /// Subcategory names, in traversal order.
    pub subcategories: Vec<String>,
}

impl TabScope {
    /// Derive the lists for `tab`. An absent tree yields empty lists.
    pub fn derive(tree: Option<&CategoryTree>, tab: &Tab) -> Self {
        let mut scope = Self {
            tab: tab.clone(),
            ..Self::default()
        };
        let Some(tree) = tree else {
            return scope;
        };

        if *tab == Tab::AllItems {
            let index = CatalogIndex::from_tree(tree);
            scope.categories = index.categories;
            scope.subcategories = index.subcategories;
            return scope;
        }

        for category in tree
            .categories()
            .filter(|c| tab.admits(c.main_category.as_deref()))
        {
            push_unique(&mut scope.categories, &category.category_name);
            for subcategory in category.subcategories.values() {
                push_unique(&mut scope.subcategories, &subcategory.subcategory_name);
            }
        }
        scope
    }

    /// Check if a category name is offered.
    pub fn contains_category(&self, name: &str) -> bool {
        self.categories.iter().any(|n| n == name)
    }

    /// Check if a subcategory name is offered.
    pub fn contains_subcategory(&self, name: &str) -> bool {
        self.subcategories.iter().any(|n| n == name)
    }
}
