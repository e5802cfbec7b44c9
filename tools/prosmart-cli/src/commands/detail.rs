//! Product detail command.

use anyhow::Result;
use prosmart_catalog::catalog::Listing;
use prosmart_catalog::price::PURCHASE_CONTACT_MESSAGE;
use prosmart_data::{DetailLoader, DetailOutcome, LISTING_PATH};
use serde_json::json;

use super::DetailArgs;
use crate::context::Context;
use crate::output::format_price;

/// Run the detail command.
pub async fn run(args: DetailArgs, ctx: &Context) -> Result<()> {
    let loader = DetailLoader::with_policy(ctx.client()?, ctx.config.api.detail_policy());
    let spinner = ctx
        .output
        .phase_spinner(loader.subscribe(), "Loading product...");

    let outcome = loader.open(args.key.as_deref()).await;
    loader.settled().await;
    spinner.finish();

    match outcome {
        DetailOutcome::Found(listing) => show_listing(&listing, ctx),
        DetailOutcome::RedirectToListing(reason) => {
            if ctx.output.is_json() {
                ctx.output.json(&json!({
                    "redirect": LISTING_PATH,
                    "reason": reason.to_string(),
                }));
            } else {
                ctx.output.warn(&format!("Product unavailable: {}", reason));
                ctx.output.info("Showing the listing instead: run `prosmart products`");
            }
        }
    }

    Ok(())
}

fn show_listing(listing: &Listing, ctx: &Context) {
    let product = &listing.product;
    let price = product.display_price();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "detail_key": listing.detail_key().encode(),
            "product": product,
            "placement": &listing.placement,
            "price": {
                "display": price.price.display(),
                "original": price.original.map(|p| p.display()),
                "discount_percent": price.discount_percent,
                "listed": price.listed,
            },
            "purchase": PURCHASE_CONTACT_MESSAGE,
        }));
        return;
    }

    ctx.output.header(product.display_title());
    ctx.output
        .kv("Path", &format!("Products / {}", listing.breadcrumb()));
    if let Some(main) = &listing.placement.main_category {
        ctx.output.kv("Main category", main);
    }
    ctx.output.kv("Category", &listing.placement.category_name);
    ctx.output.kv("Subcategory", &listing.placement.subcategory_name);
    ctx.output.kv("Price", &format_price(&price));
    if !price.listed {
        ctx.output.debug("no listed price, showing the estimated price");
    }
    ctx.output.kv("Key", &listing.detail_key().encode());

    if let Some(description) = product
        .product_description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
    {
        ctx.output.info("");
        ctx.output.info(description);
    }

    if !product.image_urls.is_empty() {
        ctx.output.info("Images:");
        for url in &product.image_urls {
            ctx.output.list_item(url);
        }
    }

    ctx.output.info("");
    ctx.output.info(PURCHASE_CONTACT_MESSAGE);
}
