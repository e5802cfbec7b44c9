//! Filter state and its transitions.
//!
//! The listing view owns one [`FilterState`]. It only changes through
//! [`FilterAction`]s, so any sequence of user interactions can be replayed
//! against a tree and lands on the same state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::CategoryTree;
use crate::facets::TabScope;

/// Label of the tab that shows every main category.
pub const ALL_ITEMS: &str = "All Items";

/// The selected main-category tab.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tab {
    /// No main-category restriction.
    #[default]
    AllItems,
    /// Restrict to one main category.
    Main(String),
}

impl Tab {
    /// Parse a tab label; [`ALL_ITEMS`] maps to [`Tab::AllItems`].
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        if label == ALL_ITEMS {
            Tab::AllItems
        } else {
            Tab::Main(label)
        }
    }

    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            Tab::AllItems => ALL_ITEMS,
            Tab::Main(main) => main,
        }
    }

    /// Check if a main category passes this tab.
    pub fn admits(&self, main_category: Option<&str>) -> bool {
        match self {
            Tab::AllItems => true,
            Tab::Main(main) => main_category == Some(main.as_str()),
        }
    }

    /// Check if this tab exists for the given tree.
    fn exists_in(&self, tree: Option<&CategoryTree>) -> bool {
        match self {
            Tab::AllItems => true,
            Tab::Main(_) => tree.is_some_and(|tree| {
                tree.categories()
                    .any(|c| self.admits(c.main_category.as_deref()))
            }),
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Tab {
    fn from(label: String) -> Self {
        Tab::from_label(label)
    }
}

impl From<Tab> for String {
    fn from(tab: Tab) -> Self {
        match tab {
            Tab::AllItems => ALL_ITEMS.to_string(),
            Tab::Main(main) => main,
        }
    }
}

/// A user interaction with the filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterAction {
    /// Switch tab. Always clears both selections.
    SelectTab(Tab),
    /// Add or remove a category name.
    ToggleCategory(String),
    /// Add or remove a subcategory name.
    ToggleSubcategory(String),
    /// Replace the category selection with a single name.
    FocusCategory(String),
    /// Back to defaults.
    Reset,
}

/// Current facet selections of the listing view.
///
/// Selections keep the order they were made in, which is the order the
/// active-filter chips are shown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Selected main-category tab.
    pub active_tab: Tab,
    /// Selected category names.
    pub selected_categories: Vec<String>,
    /// Selected subcategory names.
    pub selected_subcategories: Vec<String>,
}

impl FilterState {
    /// Default state: all items, nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action.
    ///
    /// Names outside the current tab's scope cannot be selected, and tabs
    /// the tree does not contain cannot be entered; such actions are no-ops.
    pub fn apply(&mut self, action: FilterAction, tree: Option<&CategoryTree>) {
        match action {
            FilterAction::SelectTab(tab) => {
                if tab.exists_in(tree) {
                    self.active_tab = tab;
                    self.selected_categories.clear();
                    self.selected_subcategories.clear();
                }
            }
            FilterAction::ToggleCategory(name) => {
                let scope = self.scope(tree);
                toggle(&mut self.selected_categories, name, |n| {
                    scope.contains_category(n)
                });
            }
            FilterAction::ToggleSubcategory(name) => {
                let scope = self.scope(tree);
                toggle(&mut self.selected_subcategories, name, |n| {
                    scope.contains_subcategory(n)
                });
            }
            FilterAction::FocusCategory(name) => {
                if self.scope(tree).contains_category(&name) {
                    self.selected_categories = vec![name];
                }
            }
            FilterAction::Reset => *self = Self::default(),
        }
    }

    /// Consuming form of [`FilterState::apply`].
    pub fn reduce(mut self, action: FilterAction, tree: Option<&CategoryTree>) -> Self {
        self.apply(action, tree);
        self
    }

    /// Replay actions from the default state.
    pub fn replay<I>(actions: I, tree: Option<&CategoryTree>) -> Self
    where
        I: IntoIterator<Item = FilterAction>,
    {
        actions
            .into_iter()
            .fold(Self::default(), |state, action| state.reduce(action, tree))
    }

    /// Drop selections the tree no longer offers.
    ///
    /// Used after the tree is re-fetched. A tab that disappeared falls back
    /// to [`Tab::AllItems`] and clears everything.
    pub fn prune(&mut self, tree: Option<&CategoryTree>) {
        if !self.active_tab.exists_in(tree) {
            *self = Self::default();
            return;
        }
        let scope = self.scope(tree);
        self.selected_categories
            .retain(|n| scope.contains_category(n));
        self.selected_subcategories
            .retain(|n| scope.contains_subcategory(n));
    }

    /// Facet lists visible under the active tab.
    pub fn scope(&self, tree: Option<&CategoryTree>) -> TabScope {
        TabScope::derive(tree, &self.active_tab)
    }

    /// Number shown on the filters badge.
    pub fn active_filter_count(&self) -> usize {
        self.selected_categories.len() + self.selected_subcategories.len()
    }

    /// Check if no facet is restricting the listing.
    pub fn is_default(&self) -> bool {
        self.active_tab == Tab::AllItems
            && self.selected_categories.is_empty()
            && self.selected_subcategories.is_empty()
    }
}

fn toggle(selected: &mut Vec<String>, name: String, in_scope: impl Fn(&str) -> bool) {
    if let Some(pos) = selected.iter().position(|n| *n == name) {
        selected.remove(pos);
    } else if in_scope(&name) {
        selected.push(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Subcategory};
    use crate::ids::SubcategoryId;

    fn sub(id: &str, name: &str) -> Subcategory {
        Subcategory {
            subcategory_id: SubcategoryId::new(id),
            subcategory_name: name.to_string(),
            products: Vec::new(),
        }
    }

    fn tree() -> CategoryTree {
        CategoryTree::new()
            .with_category(
                Category::new("c1", "Kitchen")
                    .with_main_category("Home")
                    .with_subcategory(sub("s1", "Pans")),
            )
            .with_category(
                Category::new("c2", "Desks")
                    .with_main_category("Office")
                    .with_subcategory(sub("s2", "Standing")),
            )
    }

    #[test]
    fn test_tab_labels() {
        assert_eq!(Tab::from_label("All Items"), Tab::AllItems);
        assert_eq!(Tab::from_label("Home"), Tab::Main("Home".to_string()));
        assert_eq!(Tab::Main("Home".to_string()).to_string(), "Home");
        assert_eq!(serde_json::to_string(&Tab::AllItems).unwrap(), r#""All Items""#);
    }

    #[test]
    fn test_toggle_in_and_out() {
        let tree = tree();
        let mut state = FilterState::new();
        state.apply(FilterAction::ToggleCategory("Kitchen".into()), Some(&tree));
        state.apply(FilterAction::ToggleCategory("Desks".into()), Some(&tree));
        assert_eq!(state.selected_categories, vec!["Kitchen", "Desks"]);

        state.apply(FilterAction::ToggleCategory("Kitchen".into()), Some(&tree));
        assert_eq!(state.selected_categories, vec!["Desks"]);
        assert_eq!(state.active_filter_count(), 1);
    }

    #[test]
    fn test_toggle_outside_scope_is_ignored() {
        let tree = tree();
        let mut state = FilterState::new();
        state.apply(FilterAction::SelectTab(Tab::from_label("Home")), Some(&tree));
        state.apply(FilterAction::ToggleSubcategory("Standing".into()), Some(&tree));
        state.apply(FilterAction::ToggleCategory("Nope".into()), Some(&tree));
        assert!(state.selected_subcategories.is_empty());
        assert!(state.selected_categories.is_empty());
    }

    #[test]
    fn test_tab_change_clears_selections() {
        let tree = tree();
        let state = FilterState::replay(
            [
                FilterAction::ToggleCategory("Kitchen".into()),
                FilterAction::ToggleSubcategory("Pans".into()),
                FilterAction::SelectTab(Tab::from_label("Office")),
            ],
            Some(&tree),
        );
        assert_eq!(state.active_tab, Tab::Main("Office".to_string()));
        assert_eq!(state.active_filter_count(), 0);
    }

    #[test]
    fn test_unknown_tab_is_ignored() {
        let tree = tree();
        let state = FilterState::replay(
            [
                FilterAction::ToggleCategory("Kitchen".into()),
                FilterAction::SelectTab(Tab::from_label("Garden")),
            ],
            Some(&tree),
        );
        assert_eq!(state.active_tab, Tab::AllItems);
        assert_eq!(state.selected_categories, vec!["Kitchen"]);
    }

    #[test]
    fn test_nothing_selectable_without_tree() {
        let state = FilterState::replay(
            [
                FilterAction::SelectTab(Tab::from_label("Home")),
                FilterAction::ToggleCategory("Kitchen".into()),
            ],
            None,
        );
        assert!(state.is_default());
    }

    #[test]
    fn test_focus_and_reset() {
        let tree = tree();
        let mut state = FilterState::replay(
            [
                FilterAction::ToggleCategory("Kitchen".into()),
                FilterAction::FocusCategory("Desks".into()),
            ],
            Some(&tree),
        );
        assert_eq!(state.selected_categories, vec!["Desks"]);

        state.apply(FilterAction::Reset, Some(&tree));
        assert!(state.is_default());
    }

    #[test]
    fn test_replay_is_deterministic() {
        let tree = tree();
        let actions = vec![
            FilterAction::SelectTab(Tab::from_label("Home")),
            FilterAction::ToggleCategory("Kitchen".into()),
            FilterAction::ToggleSubcategory("Pans".into()),
            FilterAction::ToggleCategory("Kitchen".into()),
        ];
        let a = FilterState::replay(actions.clone(), Some(&tree));
        let b = FilterState::replay(actions, Some(&tree));
        assert_eq!(a, b);
        assert_eq!(a.selected_subcategories, vec!["Pans"]);
    }

    #[test]
    fn test_prune_after_refresh() {
        let tree = tree();
        let mut state = FilterState::replay(
            [
                FilterAction::ToggleCategory("Kitchen".into()),
                FilterAction::ToggleCategory("Desks".into()),
            ],
            Some(&tree),
        );

        let refreshed = CategoryTree::new().with_category(
            Category::new("c2", "Desks")
                .with_main_category("Office")
                .with_subcategory(sub("s2", "Standing")),
        );
        state.prune(Some(&refreshed));
        assert_eq!(state.selected_categories, vec!["Desks"]);
    }

    #[test]
    fn test_prune_resets_vanished_tab() {
        let tree = tree();
        let mut state = FilterState::new().reduce(
            FilterAction::SelectTab(Tab::from_label("Home")),
            Some(&tree),
        );
        state.prune(Some(&CategoryTree::new()));
        assert!(state.is_default());
    }
}
