//! End-to-end checks of the listing pipeline: tree -> index -> scope -> filter.

use prosmart_catalog::prelude::*;

const HOME_TREE: &str = r#"{
    "c1": {
        "category_id": "c1",
        "category_name": "Kitchen",
        "main_category": "Home",
        "subcategories": {
            "s1": {
                "subcategory_id": "s1",
                "subcategory_name": "Pans",
                "products": [
                    {"product_id": "p1", "category_id": "c1", "subcategory": "Pans", "main_category": "Home"}
                ]
            }
        }
    }
}"#;

fn product(id: &str) -> Product {
    Product {
        product_id: ProductId::new(id),
        product_name: format!("Product {}", id),
        ..Product::default()
    }
}

fn sub(id: &str, name: &str, products: &[&str]) -> Subcategory {
    Subcategory {
        subcategory_id: SubcategoryId::new(id),
        subcategory_name: name.to_string(),
        products: products.iter().map(|p| product(p)).collect(),
    }
}

fn storefront() -> CategoryTree {
    CategoryTree::new()
        .with_category(
            Category::new("cat_001", "Cookware")
                .with_main_category("Home & Kitchen")
                .with_subcategory(sub("subcat_001", "Pans", &["prod_0001", "prod_0002"]))
                .with_subcategory(sub("subcat_002", "Storage", &["prod_0003"])),
        )
        .with_category(
            Category::new("cat_002", "Bath")
                .with_main_category("Home & Kitchen")
                .with_subcategory(sub("subcat_003", "Storage", &["prod_0004"])),
        )
        .with_category(
            Category::new("cat_003", "Desks")
                .with_main_category("Office")
                .with_subcategory(sub("subcat_004", "Standing", &["prod_0005", "prod_0006"])),
        )
        .with_category(
            Category::new("cat_004", "Clearance")
                .with_subcategory(sub("subcat_005", "Misc", &["prod_0007"])),
        )
}

fn ids(listings: &[&Listing]) -> Vec<String> {
    listings
        .iter()
        .map(|l| l.product.product_id.to_string())
        .collect()
}

fn is_subsequence(part: &[&Listing], whole: &[Listing]) -> bool {
    let mut rest = whole.iter();
    part.iter().all(|p| rest.any(|w| w == *p))
}

#[test]
fn test_home_scenario() {
    let tree = CategoryTree::from_json(HOME_TREE).unwrap();
    let index = CatalogIndex::build(Some(&tree));

    let home =
        FilterState::new().reduce(FilterAction::SelectTab(Tab::from_label("Home")), Some(&tree));
    assert_eq!(ids(&filter_products(&index.all_products, &home)), vec!["p1"]);

    let office = FilterState {
        active_tab: Tab::from_label("Office"),
        ..FilterState::default()
    };
    assert!(filter_products(&index.all_products, &office).is_empty());
}

#[test]
fn test_normalization_is_idempotent() {
    let tree = storefront();
    let first = CatalogIndex::build(Some(&tree));
    let second = CatalogIndex::build(Some(&tree));
    assert_eq!(first, second);
    assert_eq!(first.all_products.len(), tree.product_count());
}

#[test]
fn test_filter_output_is_monotone_subsequence() {
    let tree = storefront();
    let index = CatalogIndex::build(Some(&tree));

    // Each step activates a facet that was empty; results may only shrink.
    let steps = [
        FilterAction::ToggleSubcategory("Storage".to_string()),
        FilterAction::ToggleCategory("Cookware".to_string()),
    ];

    let mut state = FilterState::new();
    let mut previous = filter_products(&index.all_products, &state);
    assert_eq!(previous.len(), index.all_products.len());

    for action in steps {
        state.apply(action, Some(&tree));
        let filtered = filter_products(&index.all_products, &state);
        assert!(is_subsequence(&filtered, &index.all_products));
        assert!(filtered.iter().all(|l| previous.contains(l)));
        previous = filtered;
    }
    assert_eq!(ids(&previous), vec!["prod_0003"]);

    // A second value in the same facet widens it again.
    state.apply(FilterAction::ToggleSubcategory("Pans".to_string()), Some(&tree));
    assert_eq!(
        ids(&filter_products(&index.all_products, &state)),
        vec!["prod_0001", "prod_0002", "prod_0003"]
    );
}

#[test]
fn test_adding_a_tab_never_grows_results() {
    let tree = storefront();
    let index = CatalogIndex::build(Some(&tree));

    for tab in &index.main_categories {
        let base = FilterState::new();
        let scoped = base
            .clone()
            .reduce(FilterAction::SelectTab(Tab::Main(tab.clone())), Some(&tree));
        let all = filter_products(&index.all_products, &base);
        let within = filter_products(&index.all_products, &scoped);
        assert!(within.len() <= all.len());
        assert!(is_subsequence(&within, &index.all_products));
    }
}

#[test]
fn test_tab_scope_containment() {
    let tree = storefront();
    let index = CatalogIndex::build(Some(&tree));

    for main in &index.main_categories {
        let scope = TabScope::derive(Some(&tree), &Tab::Main(main.clone()));
        for name in &scope.categories {
            assert!(tree
                .categories()
                .any(|c| &c.category_name == name && c.main_category.as_deref() == Some(main)));
        }
    }

    let office = TabScope::derive(Some(&tree), &Tab::from_label("Office"));
    assert_eq!(office.categories, vec!["Desks"]);
    assert_eq!(office.subcategories, vec!["Standing"]);
}

#[test]
fn test_every_listed_key_resolves() {
    let tree = storefront();
    let index = CatalogIndex::build(Some(&tree));

    for listing in &index.all_products {
        let raw = listing.detail_key().encode();
        let decoded = DetailKey::decode(&raw).unwrap();
        assert!(!decoded.is_legacy());
        let found = tree.find_listing(decoded.key()).unwrap();
        assert_eq!(&found, listing);
    }
}

#[test]
fn test_legacy_key_resolves() {
    let tree = storefront();
    let decoded = DetailKey::decode("prod_0005cat_003").unwrap();
    assert!(decoded.is_legacy());

    let found = tree.find_listing(decoded.key()).unwrap();
    assert_eq!(found.placement.category_name, "Desks");
}

#[test]
fn test_placement_wins_over_embedded_fields() {
    let mut stray = product("prod_0099");
    stray.category_id = CategoryId::new("cat_404");
    stray.subcategory = "Standing".to_string();
    stray.main_category = Some("Office".to_string());

    let tree = CategoryTree::new().with_category(
        Category::new("cat_001", "Cookware")
            .with_main_category("Home & Kitchen")
            .with_subcategory(Subcategory {
                subcategory_id: SubcategoryId::new("subcat_001"),
                subcategory_name: "Pans".to_string(),
                products: vec![stray],
            }),
    );
    let index = CatalogIndex::build(Some(&tree));

    let state = FilterState::replay(
        [
            FilterAction::SelectTab(Tab::from_label("Home & Kitchen")),
            FilterAction::ToggleCategory("Cookware".to_string()),
            FilterAction::ToggleSubcategory("Pans".to_string()),
        ],
        Some(&tree),
    );
    let filtered = filter_products(&index.all_products, &state);
    assert_eq!(ids(&filtered), vec!["prod_0099"]);
    assert_eq!(filtered[0].detail_key().encode(), "prod_0099--cat_001");
}

#[test]
fn test_category_param_then_paging() {
    let tree = storefront();
    let index = CatalogIndex::build(Some(&tree));

    let action = resolve_category_param(&index, "Desks").unwrap();
    let state = FilterState::new().reduce(action, Some(&tree));
    assert_eq!(state.active_filter_count(), 1);

    let filtered = filter_products(&index.all_products, &state);
    let page = Page::paginate(filtered, 1, 1);
    assert_eq!(page.len(), 1);
    assert_eq!(page.total, 2);
    assert!(page.has_more);
}
