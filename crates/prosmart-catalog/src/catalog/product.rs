//! Product types.

use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::DetailKey;
use crate::ids::{CategoryId, ProductId, SubcategoryId};
use crate::price::DisplayPrice;

/// A product as delivered inside the category tree.
///
/// `category_id`, `subcategory` and `main_category` are denormalized copies
/// of the product's position. Filtering never reads them; see [`Placement`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Product {
    /// Unique product identifier.
    pub product_id: ProductId,
    /// Product name.
    #[serde(default)]
    pub product_name: String,
    /// Price as sent by the API (string or number on the wire).
    #[serde(default, deserialize_with = "string_or_number")]
    pub product_price: Option<String>,
    /// Category the product claims to belong to.
    #[serde(default)]
    pub category_id: CategoryId,
    /// Subcategory display name.
    #[serde(default)]
    pub subcategory: String,
    /// Main category display name.
    #[serde(default)]
    pub main_category: Option<String>,
    /// Product images, first is the cover.
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// Marketing title.
    #[serde(default)]
    pub product_title: Option<String>,
    /// Long description.
    #[serde(default)]
    pub product_description: Option<String>,
}

impl Product {
    /// Cover image, if any.
    pub fn cover_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// Title to show, falling back to the product name.
    pub fn display_title(&self) -> &str {
        self.product_title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.product_name)
    }

    /// Price as shown on a product card.
    pub fn display_price(&self) -> DisplayPrice {
        DisplayPrice::for_product(self)
    }
}

/// Where a product sits in the category tree.
///
/// This is the canonical source for facet filtering and detail links.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    /// Owning category id.
    pub category_id: CategoryId,
    /// Owning category name.
    pub category_name: String,
    /// Main category of the owning category.
    pub main_category: Option<String>,
    /// Owning subcategory id.
    pub subcategory_id: SubcategoryId,
    /// Owning subcategory name.
    pub subcategory_name: String,
}

/// A product together with its placement in the tree.
///
/// Produced by normalization for the listing, and by detail lookup for the
/// detail view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    /// The product as sent by the API.
    pub product: Product,
    /// Where the product was found.
    pub placement: Placement,
}

impl Listing {
    /// Key used to link this listing to its detail view.
    pub fn detail_key(&self) -> DetailKey {
        DetailKey::new(
            self.product.product_id.clone(),
            self.placement.category_id.clone(),
        )
    }

    /// Breadcrumb label: category name, or the subcategory when unnamed.
    pub fn breadcrumb(&self) -> &str {
        if self.placement.category_name.is_empty() {
            &self.placement.subcategory_name
        } else {
            &self.placement.category_name
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
