use carta_app::{
    config::{ApiSettings, LoggingConfig, OrderSettings},
    context::AppContext,
    messaging::WhatsAppLink,
    storefront::Storefront,
};
use clap::{Parser, Subcommand};

mod admin;
mod catalog;
mod order;
mod table;

#[derive(Debug, Parser)]
#[command(name = "carta", about = "Carta storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(flatten)]
    api: ApiSettings,

    #[command(flatten)]
    order: OrderSettings,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the menu with current promotions
    Menu(catalog::MenuArgs),

    /// List menu categories
    Categories,

    /// List coupons
    Coupons,

    /// Build an order from a YAML file and print the WhatsApp link
    Order(order::OrderArgs),

    /// Catalog maintenance
    Admin(admin::AdminCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let config = self
            .api
            .api_config()
            .ok_or_else(|| "missing API host: pass --api-url or set CARTA_API_URL".to_string())?;

        let context = AppContext::from_api_config(config)
            .map_err(|error| format!("failed to initialise: {error}"))?;

        match self.command {
            Commands::Menu(args) => catalog::menu(storefront(context, &self.order), args).await,
            Commands::Categories => catalog::categories(storefront(context, &self.order)).await,
            Commands::Coupons => catalog::coupons(storefront(context, &self.order)).await,
            Commands::Order(args) => {
                let phone = self
                    .order
                    .order_phone
                    .as_deref()
                    .ok_or_else(|| {
                        "missing order phone: pass --order-phone or set CARTA_ORDER_PHONE"
                            .to_string()
                    })?;

                order::run(Storefront::new(context, WhatsAppLink::new(phone)), args).await
            }
            Commands::Admin(command) => admin::run(context, command).await,
        }
    }
}

fn storefront(context: AppContext, order: &OrderSettings) -> Storefront {
    let link = WhatsAppLink::new(order.order_phone.as_deref().unwrap_or_default());

    Storefront::new(context, link)
}
