//! Category tree types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{DetailKey, Listing, Placement, Product};
use crate::error::CatalogError;
use crate::ids::{CategoryId, SubcategoryId};

/// A second-level grouping holding products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Subcategory {
    /// Unique subcategory identifier.
    pub subcategory_id: SubcategoryId,
    /// Subcategory name.
    #[serde(default)]
    pub subcategory_name: String,
    /// Products, in the order the API sent them.
    #[serde(default)]
    pub products: Vec<Product>,
}

/// A product category, optionally grouped under a main category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Category {
    /// Unique category identifier.
    pub category_id: CategoryId,
    /// Category name.
    #[serde(default)]
    pub category_name: String,
    /// Top-level grouping (e.g. "Home & Kitchen"). Not every category has one.
    #[serde(default)]
    pub main_category: Option<String>,
    /// Subcategories keyed by id.
    #[serde(default)]
    pub subcategories: BTreeMap<SubcategoryId, Subcategory>,
}

impl Category {
    /// Create an empty category.
    pub fn new(category_id: impl Into<CategoryId>, category_name: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            category_name: category_name.into(),
            main_category: None,
            subcategories: BTreeMap::new(),
        }
    }

    /// Set the main category.
    pub fn with_main_category(mut self, main_category: impl Into<String>) -> Self {
        self.main_category = Some(main_category.into());
        self
    }

    /// Add a subcategory, replacing any with the same id.
    pub fn with_subcategory(mut self, subcategory: Subcategory) -> Self {
        self.subcategories
            .insert(subcategory.subcategory_id.clone(), subcategory);
        self
    }

    /// Placement for products of the given subcategory.
    pub fn placement(&self, subcategory: &Subcategory) -> Placement {
        Placement {
            category_id: self.category_id.clone(),
            category_name: self.category_name.clone(),
            main_category: self.main_category.clone(),
            subcategory_id: subcategory.subcategory_id.clone(),
            subcategory_name: subcategory.subcategory_name.clone(),
        }
    }
}

/// The full catalog: categories keyed by id.
///
/// Iteration is in id order, which keeps every derived list deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct CategoryTree(BTreeMap<CategoryId, Category>);

impl CategoryTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Parse a tree from its JSON mapping form.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a category, replacing any with the same id.
    pub fn insert(&mut self, category: Category) {
        self.0.insert(category.category_id.clone(), category);
    }

    /// Builder-style [`CategoryTree::insert`].
    pub fn with_category(mut self, category: Category) -> Self {
        self.insert(category);
        self
    }

    /// Get a category by id.
    pub fn get(&self, id: &CategoryId) -> Option<&Category> {
        self.0.get(id)
    }

    /// Iterate categories in id order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.0.values()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the tree has no categories.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of products across all subcategories.
    pub fn product_count(&self) -> usize {
        self.categories()
            .flat_map(|c| c.subcategories.values())
            .map(|s| s.products.len())
            .sum()
    }

    /// Find the product a detail key points at.
    ///
    /// Scans for categories whose `category_id` field matches (the map key the
    /// payload uses may differ), then their subcategories for a product with
    /// the matching id. A product nested under a different category is not
    /// found, even if its embedded `category_id` agrees.
    pub fn find_listing(&self, key: &DetailKey) -> Result<Listing, CatalogError> {
        self.categories()
            .filter(|c| c.category_id == key.category_id)
            .find_map(|category| {
                category.subcategories.values().find_map(|sub| {
                    sub.products
                        .iter()
                        .find(|p| p.product_id == key.product_id)
                        .map(|p| Listing {
                            product: p.clone(),
                            placement: category.placement(sub),
                        })
                })
            })
            .ok_or_else(|| CatalogError::ProductNotFound {
                product_id: key.product_id.to_string(),
                category_id: key.category_id.to_string(),
            })
    }
}

impl FromIterator<Category> for CategoryTree {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut tree = Self::new();
        for category in iter {
            tree.insert(category);
        }
        tree
    }
}
