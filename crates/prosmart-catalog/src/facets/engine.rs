//! Multi-facet filtering of listings.

use crate::catalog::Listing;
use crate::facets::{FilterState, Tab};

/// Filter listings by the active tab and the selected facets.
///
/// Three passes, each skipped when its facet is inactive:
///
/// 1. main category equals the active tab (unless [`Tab::AllItems`])
/// 2. category name is one of the selected categories
/// 3. subcategory name is one of the selected subcategories
///
/// Every pass reads the listing's [`Placement`](crate::catalog::Placement),
/// never the fields embedded in the product. Input order is kept.
pub fn filter_products<'a>(listings: &'a [Listing], state: &FilterState) -> Vec<&'a Listing> {
    let mut filtered: Vec<&Listing> = listings.iter().collect();

    if state.active_tab != Tab::AllItems {
        filtered.retain(|l| state.active_tab.admits(l.placement.main_category.as_deref()));
    }

    if !state.selected_categories.is_empty() {
        filtered.retain(|l| {
            state
                .selected_categories
                .iter()
                .any(|n| *n == l.placement.category_name)
        });
    }

    if !state.selected_subcategories.is_empty() {
        filtered.retain(|l| {
            state
                .selected_subcategories
                .iter()
                .any(|n| *n == l.placement.subcategory_name)
        });
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Placement, Product};
    use crate::ids::{CategoryId, ProductId, SubcategoryId};

    fn listing(id: &str, main: Option<&str>, category: &str, subcategory: &str) -> Listing {
        Listing {
            product: Product {
                product_id: ProductId::new(id),
                ..Product::default()
            },
            placement: Placement {
                category_id: CategoryId::new(format!("cat_{}", category)),
                category_name: category.to_string(),
                main_category: main.map(str::to_string),
                subcategory_id: SubcategoryId::new(format!("sub_{}", subcategory)),
                subcategory_name: subcategory.to_string(),
            },
        }
    }

    fn ids(listings: &[&Listing]) -> Vec<String> {
        listings
            .iter()
            .map(|l| l.product.product_id.to_string())
            .collect()
    }

    fn listings() -> Vec<Listing> {
        vec![
            listing("p1", Some("Home"), "Kitchen", "Pans"),
            listing("p2", Some("Home"), "Kitchen", "Knives"),
            listing("p3", Some("Home"), "Bath", "Towels"),
            listing("p4", Some("Office"), "Desks", "Standing"),
            listing("p5", None, "Loose", "Misc"),
        ]
    }

    #[test]
    fn test_default_state_is_identity() {
        let all = listings();
        let filtered = filter_products(&all, &FilterState::default());
        assert_eq!(ids(&filtered), vec!["p1", "p2", "p3", "p4", "p5"]);
    }

    #[test]
    fn test_tab_pass() {
        let all = listings();
        let state = FilterState {
            active_tab: Tab::from_label("Home"),
            ..FilterState::default()
        };
        assert_eq!(ids(&filter_products(&all, &state)), vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_categories_are_or_within_facet() {
        let all = listings();
        let state = FilterState {
            selected_categories: vec!["Bath".to_string(), "Desks".to_string()],
            ..FilterState::default()
        };
        assert_eq!(ids(&filter_products(&all, &state)), vec!["p3", "p4"]);
    }

    #[test]
    fn test_facets_are_and_across() {
        let all = listings();
        let state = FilterState {
            active_tab: Tab::from_label("Home"),
            selected_categories: vec!["Kitchen".to_string()],
            selected_subcategories: vec!["Knives".to_string(), "Standing".to_string()],
        };
        assert_eq!(ids(&filter_products(&all, &state)), vec!["p2"]);
    }

    #[test]
    fn test_product_without_main_category_only_under_all_items() {
        let all = listings();
        let state = FilterState {
            active_tab: Tab::from_label("Office"),
            ..FilterState::default()
        };
        assert_eq!(ids(&filter_products(&all, &state)), vec!["p4"]);
    }

    #[test]
    fn test_embedded_fields_are_ignored() {
        let mut item = listing("p1", Some("Home"), "Kitchen", "Pans");
        item.product.main_category = Some("Office".to_string());
        item.product.subcategory = "Standing".to_string();
        let all = vec![item];

        let state = FilterState {
            active_tab: Tab::from_label("Office"),
            ..FilterState::default()
        };
        assert!(filter_products(&all, &state).is_empty());

        let state = FilterState {
            selected_subcategories: vec!["Pans".to_string()],
            ..FilterState::default()
        };
        assert_eq!(filter_products(&all, &state).len(), 1);
    }
}
