//! Product listing command.

use anyhow::Result;
use prosmart_catalog::catalog::{CatalogIndex, CategoryTree, Listing};
use prosmart_catalog::facets::{
    filter_products, resolve_category_param, FilterAction, FilterState, Page, Tab, TabScope,
    ALL_ITEMS,
};
use prosmart_data::LoadOrchestrator;
use serde::Serialize;

use super::ProductsArgs;
use crate::context::Context;
use crate::output::{format_price, truncate, Output};

/// One product row of the listing.
#[derive(Debug, Serialize)]
struct ProductRow {
    detail_key: String,
    name: String,
    title: String,
    main_category: Option<String>,
    category: String,
    subcategory: String,
    price: String,
    original_price: Option<String>,
    discount_percent: Option<u8>,
    image: Option<String>,
}

impl From<&Listing> for ProductRow {
    fn from(listing: &Listing) -> Self {
        let price = listing.product.display_price();
        Self {
            detail_key: listing.detail_key().encode(),
            name: listing.product.product_name.clone(),
            title: listing.product.display_title().to_string(),
            main_category: listing.placement.main_category.clone(),
            category: listing.placement.category_name.clone(),
            subcategory: listing.placement.subcategory_name.clone(),
            price: price.price.display(),
            original_price: price.original.map(|p| p.display()),
            discount_percent: price.discount_percent,
            image: listing.product.cover_image().map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
struct ListingReport<'a> {
    tabs: Vec<String>,
    filters: &'a FilterState,
    active_filter_count: usize,
    scope: &'a TabScope,
    total: usize,
    page: usize,
    has_more: bool,
    products: Vec<ProductRow>,
}

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let orchestrator = LoadOrchestrator::new(ctx.client()?, ctx.config.api.listing_policy());
    let spinner = ctx
        .output
        .phase_spinner(orchestrator.subscribe(), "Loading products...");

    let loaded = orchestrator.load().await;
    orchestrator.settled().await;
    spinner.finish();

    let tree = match loaded {
        Ok(tree) => tree,
        Err(failure) => {
            ctx.output.warn("Run the command again to retry.");
            return Err(failure.into());
        }
    };

    let index = CatalogIndex::from_tree(&tree);
    let state = apply_args(&args, &index, &tree, &ctx.output);
    let scope = state.scope(Some(&tree));

    let filtered = filter_products(&index.all_products, &state);
    let page = Page::paginate(filtered, args.page, ctx.config.display.page_size);

    let mut tabs = vec![ALL_ITEMS.to_string()];
    tabs.extend(index.main_categories.iter().cloned());

    if ctx.output.is_json() {
        ctx.output.json(&ListingReport {
            tabs,
            filters: &state,
            active_filter_count: state.active_filter_count(),
            scope: &scope,
            total: page.total,
            page: args.page.max(1),
            has_more: page.has_more,
            products: page.items.iter().map(|l| ProductRow::from(*l)).collect(),
        });
        return Ok(());
    }

    ctx.output.header(&format!("Products - {}", state.active_tab));

    if args.facets {
        ctx.output.info("Tabs:");
        for tab in &tabs {
            let marker = if *tab == state.active_tab.label() { "*" } else { " " };
            ctx.output.list_item(&format!("{} {}", marker, tab));
        }
        ctx.output.info("Categories:");
        for name in &scope.categories {
            ctx.output.list_item(&facet_label(name, &state.selected_categories));
        }
        ctx.output.info("Subcategories:");
        for name in &scope.subcategories {
            ctx.output.list_item(&facet_label(name, &state.selected_subcategories));
        }
    }

    if state.active_filter_count() > 0 {
        ctx.output.kv("Filters", &state.active_filter_count().to_string());
    }

    if page.is_empty() {
        ctx.output.info("No products match these filters.");
        return Ok(());
    }

    ctx.output.table_row(&["KEY", "PRODUCT", "CATEGORY", "PRICE"], &[24, 36, 24, 12]);
    for listing in &page.items {
        let price = format_price(&listing.product.display_price());
        let key = listing.detail_key().encode();
        let title = truncate(listing.product.display_title(), 36);
        let category = truncate(
            &format!("{} / {}", listing.breadcrumb(), listing.placement.subcategory_name),
            24,
        );
        ctx.output
            .table_row(&[&key, &title, &category, &price], &[24, 36, 24, 12]);
    }

    ctx.output.info(&format!("Showing {} of {} products", page.len(), page.total));
    if page.has_more {
        ctx.output
            .info(&format!("Use --page {} to load more", args.page.max(1) + 1));
    }

    Ok(())
}

/// Replay command-line filters through the reducer, reporting ignored ones.
///
/// A tab missing from the catalog still restricts the listing, which is then
/// empty.
fn apply_args(
    args: &ProductsArgs,
    index: &CatalogIndex,
    tree: &CategoryTree,
    output: &Output,
) -> FilterState {
    let mut state = FilterState::new();

    if let Some(param) = &args.param {
        match resolve_category_param(index, param) {
            Some(action) => {
                output.debug(&format!("category param -> {:?}", action));
                state.apply(action, Some(tree));
            }
            None => output.warn(&format!("Unknown category '{}', ignored", param)),
        }
    }

    if let Some(label) = &args.tab {
        let tab = Tab::from_label(label.as_str());
        state.apply(FilterAction::SelectTab(tab.clone()), Some(tree));
        if state.active_tab != tab {
            output.warn(&format!("No products under tab '{}'", label));
            state = FilterState {
                active_tab: tab,
                ..FilterState::new()
            };
        }
    }

    for name in &args.categories {
        state.apply(FilterAction::ToggleCategory(name.clone()), Some(tree));
        if !state.selected_categories.contains(name) {
            output.warn(&format!(
                "Category '{}' is not available under {}",
                name, state.active_tab
            ));
        }
    }

    for name in &args.subcategories {
        state.apply(FilterAction::ToggleSubcategory(name.clone()), Some(tree));
        if !state.selected_subcategories.contains(name) {
            output.warn(&format!(
                "Subcategory '{}' is not available under {}",
                name, state.active_tab
            ));
        }
    }

    state
}

fn facet_label(name: &str, selected: &[String]) -> String {
    if selected.iter().any(|s| s == name) {
        format!("[x] {}", name)
    } else {
        format!("[ ] {}", name)
    }
}
