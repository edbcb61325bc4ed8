use carta::{
    categories::CategoryId,
    coupons::{Coupon, CouponId, CouponKind},
    products::ProductId,
};
use carta_app::admin::Admin;
use clap::{Args, Subcommand, ValueEnum};
use jiff::civil::Date;
use rust_decimal::Decimal;

#[derive(Debug, Args)]
pub(crate) struct CouponCommand {
    #[command(subcommand)]
    command: CouponSubcommand,
}

#[derive(Debug, Subcommand)]
enum CouponSubcommand {
    Create(CouponArgs),
    Update(UpdateCouponArgs),
    Delete(DeleteCouponArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    /// Percentage of the unit price
    Percentage,

    /// Fixed amount off the line
    Fixed,
}

#[derive(Debug, Args)]
struct CouponArgs {
    /// Code customers type at checkout
    #[arg(long)]
    code: String,

    /// How the value is applied
    #[arg(long, value_enum)]
    kind: KindArg,

    /// Percentage (0-100) or amount
    #[arg(long)]
    value: Decimal,

    /// First valid day (YYYY-MM-DD)
    #[arg(long)]
    starts_on: Date,

    /// Last valid day (YYYY-MM-DD)
    #[arg(long)]
    ends_on: Date,

    /// Restrict to one product
    #[arg(long)]
    product: Option<u64>,

    /// Restrict to one category
    #[arg(long)]
    category: Option<u64>,

    /// Number of redemptions allowed
    #[arg(long)]
    total: Option<u32>,

    /// Create the coupon switched off
    #[arg(long)]
    inactive: bool,
}

impl From<CouponArgs> for Coupon {
    fn from(args: CouponArgs) -> Self {
        let kind = match args.kind {
            KindArg::Percentage => CouponKind::Percentage,
            KindArg::Fixed => CouponKind::FixedAmount,
        };

        Coupon {
            product_id: args.product.map(ProductId::new),
            category_id: args.category.map(CategoryId::new),
            total_quantity: args.total,
            ..Coupon::new(args.code, kind, args.value, args.starts_on, args.ends_on)
                .with_active(!args.inactive)
        }
    }
}

#[derive(Debug, Args)]
struct UpdateCouponArgs {
    /// Coupon id
    id: u64,

    #[command(flatten)]
    coupon: CouponArgs,
}

#[derive(Debug, Args)]
struct DeleteCouponArgs {
    /// Coupon id
    id: u64,
}

pub(crate) async fn run(admin: &Admin, command: CouponCommand) -> Result<(), String> {
    match command.command {
        CouponSubcommand::Create(args) => {
            admin
                .create_coupon(args.into())
                .await
                .map_err(|error| format!("failed to create coupon: {error}"))?;

            println!("coupon created");
        }
        CouponSubcommand::Update(args) => {
            admin
                .update_coupon(CouponId::new(args.id), args.coupon.into())
                .await
                .map_err(|error| format!("failed to update coupon: {error}"))?;

            println!("coupon {} updated", args.id);
        }
        CouponSubcommand::Delete(args) => {
            admin
                .delete_coupon(CouponId::new(args.id))
                .await
                .map_err(|error| format!("failed to delete coupon: {error}"))?;

            println!("coupon {} deleted", args.id);
        }
    }

    Ok(())
}
