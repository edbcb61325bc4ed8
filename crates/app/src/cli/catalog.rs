use carta::{categories::CategoryId, coupons::CouponScope, products::MenuFilter};
use carta_app::storefront::Storefront;
use clap::Args;

use super::table::{price, render};

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// Only show products in this category
    #[arg(long)]
    category: Option<u64>,

    /// Only show products whose name contains this term
    #[arg(long)]
    search: Option<String>,
}

async fn loaded(mut storefront: Storefront) -> Storefront {
    for resource in storefront.refresh().await {
        eprintln!("warning: {resource} unavailable");
    }

    storefront
}

pub(crate) async fn menu(storefront: Storefront, args: MenuArgs) -> Result<(), String> {
    let storefront = loaded(storefront).await;
    let filter = MenuFilter::new(args.category.map(CategoryId::new), args.search.as_deref());

    let entries = storefront.menu(filter);

    if entries.is_empty() {
        println!("no products found");
        return Ok(());
    }

    let rows = entries
        .into_iter()
        .map(|entry| {
            [
                entry.product.id.to_string(),
                entry.product.name.clone(),
                price(entry.product.price),
                entry.promotional_price.map(price).unwrap_or_default(),
                entry
                    .promotion
                    .map(|coupon| coupon.code.clone())
                    .unwrap_or_default(),
            ]
        })
        .collect();

    println!(
        "{}",
        render(["id", "product", "price", "promo price", "promotion"], rows)
    );

    Ok(())
}

pub(crate) async fn categories(storefront: Storefront) -> Result<(), String> {
    let storefront = loaded(storefront).await;

    let rows = storefront
        .catalog()
        .categories
        .iter()
        .map(|category| {
            [
                category.id.to_string(),
                category.name.clone(),
                category.description.clone().unwrap_or_default(),
                if category.active { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();

    println!("{}", render(["id", "category", "description", "active"], rows));

    Ok(())
}

pub(crate) async fn coupons(storefront: Storefront) -> Result<(), String> {
    let storefront = loaded(storefront).await;
    let today = storefront.today();

    let rows = storefront
        .catalog()
        .coupons
        .iter()
        .map(|coupon| {
            let scope = match coupon.scope() {
                CouponScope::Any => String::new(),
                scope => scope.to_string(),
            };

            [
                coupon.code.clone(),
                coupon.kind.to_string(),
                coupon.value.normalize().to_string(),
                scope,
                format!("{} .. {}", coupon.starts_on, coupon.ends_on),
                if coupon.active && coupon.is_valid_on(today) {
                    "yes"
                } else {
                    "no"
                }
                .to_string(),
            ]
        })
        .collect();

    println!(
        "{}",
        render(["code", "kind", "value", "scope", "valid", "usable today"], rows)
    );

    Ok(())
}
