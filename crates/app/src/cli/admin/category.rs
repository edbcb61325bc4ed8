use std::path::PathBuf;

use carta::categories::CategoryId;
use carta_app::{
    admin::Admin,
    domain::{categories::models::CategoryDraft, uploads::ImageUpload},
};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub(crate) struct CategoryCommand {
    #[command(subcommand)]
    command: CategorySubcommand,
}

#[derive(Debug, Subcommand)]
enum CategorySubcommand {
    Create(CategoryArgs),
    Update(UpdateCategoryArgs),
    Delete(DeleteCategoryArgs),
}

#[derive(Debug, Args)]
struct CategoryArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Banner text
    #[arg(long)]
    description: Option<String>,

    /// Image file to upload
    #[arg(long)]
    image: Option<PathBuf>,
}

impl CategoryArgs {
    async fn into_draft(self) -> Result<CategoryDraft, String> {
        let image = match self.image {
            Some(path) => Some(
                ImageUpload::from_path(&path)
                    .await
                    .map_err(|error| format!("failed to read {}: {error}", path.display()))?,
            ),
            None => None,
        };

        Ok(CategoryDraft {
            name: self.name,
            description: self.description,
            image,
        })
    }
}

#[derive(Debug, Args)]
struct UpdateCategoryArgs {
    /// Category id
    id: u64,

    #[command(flatten)]
    category: CategoryArgs,
}

#[derive(Debug, Args)]
struct DeleteCategoryArgs {
    /// Category id
    id: u64,
}

pub(crate) async fn run(admin: &Admin, command: CategoryCommand) -> Result<(), String> {
    match command.command {
        CategorySubcommand::Create(args) => {
            admin
                .create_category(args.into_draft().await?)
                .await
                .map_err(|error| format!("failed to create category: {error}"))?;

            println!("category created");
        }
        CategorySubcommand::Update(args) => {
            admin
                .update_category(CategoryId::new(args.id), args.category.into_draft().await?)
                .await
                .map_err(|error| format!("failed to update category: {error}"))?;

            println!("category {} updated", args.id);
        }
        CategorySubcommand::Delete(args) => {
            admin
                .delete_category(CategoryId::new(args.id))
                .await
                .map_err(|error| format!("failed to delete category: {error}"))?;

            println!("category {} deleted", args.id);
        }
    }

    Ok(())
}
