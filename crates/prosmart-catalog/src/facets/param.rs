//! The `?category=` deep-link parameter.

use crate::catalog::CatalogIndex;
use crate::facets::{FilterAction, Tab};

/// Turn a `category` query value into the action the listing applies on load.
///
/// A main-category name opens that tab; a category name focuses that
/// category. Main categories win when a name is both. Anything else is
/// ignored.
pub fn resolve_category_param(index: &CatalogIndex, param: &str) -> Option<FilterAction> {
    let param = param.trim();
    if param.is_empty() {
        return None;
    }

    if index.main_categories.iter().any(|m| m == param) {
        return Some(FilterAction::SelectTab(Tab::Main(param.to_string())));
    }
    if index.categories.iter().any(|c| c == param) {
        return Some(FilterAction::FocusCategory(param.to_string()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> CatalogIndex {
        CatalogIndex {
            main_categories: vec!["Home".to_string(), "Office".to_string()],
            categories: vec!["Kitchen".to_string(), "Office".to_string()],
            ..CatalogIndex::default()
        }
    }

    #[test]
    fn test_main_category_selects_tab() {
        assert_eq!(
            resolve_category_param(&index(), "Home"),
            Some(FilterAction::SelectTab(Tab::Main("Home".to_string())))
        );
    }

    #[test]
    fn test_category_is_focused() {
        assert_eq!(
            resolve_category_param(&index(), " Kitchen "),
            Some(FilterAction::FocusCategory("Kitchen".to_string()))
        );
    }

    #[test]
    fn test_main_category_wins() {
        assert!(matches!(
            resolve_category_param(&index(), "Office"),
            Some(FilterAction::SelectTab(_))
        ));
    }

    #[test]
    fn test_unknown_is_ignored() {
        assert_eq!(resolve_category_param(&index(), "Garden"), None);
        assert_eq!(resolve_category_param(&index(), ""), None);
    }
}
