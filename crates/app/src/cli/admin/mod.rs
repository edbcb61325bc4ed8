use carta_app::{admin::Admin, context::AppContext};
use clap::{Args, Subcommand};

use super::table::render;

mod category;
mod coupon;
mod product;

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// Show dashboard counts
    Stats,

    /// List coupons with their scope and usage
    Coupons(ListCouponsArgs),

    /// Create, update or delete a coupon
    Coupon(coupon::CouponCommand),

    /// Create, update or delete a category
    Category(category::CategoryCommand),

    /// Create, update or delete a product
    Product(product::ProductCommand),
}

#[derive(Debug, Args)]
struct ListCouponsArgs {
    /// Only show coupons whose code contains this term
    #[arg(long)]
    search: Option<String>,
}

pub(crate) async fn run(context: AppContext, command: AdminCommand) -> Result<(), String> {
    let admin = Admin::new(context);

    match command.command {
        AdminSubcommand::Stats => stats(&admin).await,
        AdminSubcommand::Coupons(args) => coupons(&admin, args).await,
        AdminSubcommand::Coupon(command) => coupon::run(&admin, command).await,
        AdminSubcommand::Category(command) => category::run(&admin, command).await,
        AdminSubcommand::Product(command) => product::run(&admin, command).await,
    }
}

async fn stats(admin: &Admin) -> Result<(), String> {
    let stats = admin
        .stats()
        .await
        .map_err(|error| format!("failed to load dashboard: {error}"))?;

    println!("products: {}", stats.products);
    println!("categories: {}", stats.categories);
    println!("active_categories: {}", stats.active_categories);
    println!("coupons: {}", stats.coupons);

    Ok(())
}

async fn coupons(admin: &Admin, args: ListCouponsArgs) -> Result<(), String> {
    let rows = admin
        .coupon_rows(args.search.as_deref())
        .await
        .map_err(|error| format!("failed to list coupons: {error}"))?;

    if rows.is_empty() {
        println!("no coupons found");
        return Ok(());
    }

    let rows = rows
        .into_iter()
        .map(|row| {
            [
                row.id.map(|id| id.to_string()).unwrap_or_default(),
                row.code,
                row.kind,
                row.value,
                row.product,
                row.category,
                row.starts_on.to_string(),
                row.ends_on.to_string(),
                if row.active { "active" } else { "inactive" }.to_string(),
                row.usage,
            ]
        })
        .collect();

    println!(
        "{}",
        render(
            [
                "id", "code", "kind", "value", "product", "category", "from", "to", "state",
                "used",
            ],
            rows,
        )
    );

    Ok(())
}
