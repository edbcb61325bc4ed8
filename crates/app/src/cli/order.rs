use std::path::PathBuf;

use carta::pricing::display_price;
use carta_app::storefront::{OrderRequest, Storefront};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    /// YAML file with the customer details and the lines to order
    file: PathBuf,
}

pub(crate) async fn run(mut storefront: Storefront, args: OrderArgs) -> Result<(), String> {
    let contents = tokio::fs::read_to_string(&args.file)
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let request: OrderRequest = serde_norway::from_str(&contents)
        .map_err(|error| format!("failed to parse {}: {error}", args.file.display()))?;

    for resource in storefront.refresh().await {
        eprintln!("warning: {resource} unavailable");
    }

    for error in storefront.load_order(&request) {
        eprintln!("warning: {error}");
    }

    let discount = display_price(storefront.cart().total_discount())
        .map_err(|error| format!("failed to price order: {error}"))?;

    let checkout = storefront
        .checkout(&request.customer)
        .map_err(|error| format!("failed to build order: {error}"))?;

    println!("{}", checkout.summary);
    println!();
    println!("Descuento total: {discount}");
    println!();
    println!("{}", checkout.link);

    Ok(())
}
