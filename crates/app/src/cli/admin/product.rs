use std::path::PathBuf;

use carta::{categories::CategoryId, products::ProductId};
use carta_app::{
    admin::Admin,
    domain::{products::models::ProductDraft, uploads::ImageUpload},
};
use clap::{Args, Subcommand};
use rust_decimal::Decimal;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    Create(ProductArgs),
    Update(UpdateProductArgs),
    Delete(DeleteProductArgs),
}

#[derive(Debug, Args)]
struct ProductArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Unit price
    #[arg(long)]
    price: Decimal,

    /// Category the product is listed under
    #[arg(long)]
    category: Option<u64>,

    /// Long description
    #[arg(long)]
    description: Option<String>,

    /// Image file to upload
    #[arg(long)]
    image: Option<PathBuf>,
}

impl ProductArgs {
    async fn into_draft(self) -> Result<ProductDraft, String> {
        let image = match self.image {
            Some(path) => Some(
                ImageUpload::from_path(&path)
                    .await
                    .map_err(|error| format!("failed to read {}: {error}", path.display()))?,
            ),
            None => None,
        };

        Ok(ProductDraft {
            name: self.name,
            description: self.description,
            price: self.price,
            category_id: self.category.map(CategoryId::new),
            image,
        })
    }
}

#[derive(Debug, Args)]
struct UpdateProductArgs {
    /// Product id
    id: u64,

    #[command(flatten)]
    product: ProductArgs,
}

#[derive(Debug, Args)]
struct DeleteProductArgs {
    /// Product id
    id: u64,
}

pub(crate) async fn run(admin: &Admin, command: ProductCommand) -> Result<(), String> {
    match command.command {
        ProductSubcommand::Create(args) => {
            admin
                .create_product(args.into_draft().await?)
                .await
                .map_err(|error| format!("failed to create product: {error}"))?;

            println!("product created");
        }
        ProductSubcommand::Update(args) => {
            admin
                .update_product(ProductId::new(args.id), args.product.into_draft().await?)
                .await
                .map_err(|error| format!("failed to update product: {error}"))?;

            println!("product {} updated", args.id);
        }
        ProductSubcommand::Delete(args) => {
            admin
                .delete_product(ProductId::new(args.id))
                .await
                .map_err(|error| format!("failed to delete product: {error}"))?;

            println!("product {} deleted", args.id);
        }
    }

    Ok(())
}
