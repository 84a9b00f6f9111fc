//! Workshop inventory CLI
//!
//! Mirrors the remote inventory table: list/search, add (with photo),
//! update, delete, CSV import/export with photo archiving, and an
//! optional local JSON API.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::sync::RwLock;

use workshop_inventory::backend::guess_content_type;
use workshop_inventory::{
    web, BackendClient, BackendConfig, Inventory, InventoryError, Item, ItemFilter, PhotoUpload,
    Result,
};

/// Workshop inventory sync - mirrors a remote inventory table
#[derive(Parser, Debug)]
#[command(name = "workshop_inventory")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List items, with optional search and filters
    List {
        /// Free-text search over name, brand, model and notes
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        condition: Option<String>,
    },
    /// Add one item, optionally with a photo attachment
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        subcategory: String,
        #[arg(long, default_value = "")]
        brand: String,
        #[arg(long, default_value = "")]
        model: String,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        #[arg(long, default_value = "")]
        unit: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        condition: String,
        #[arg(long, default_value = "")]
        notes: String,
        /// Photo file to upload to object storage
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Update fields of an existing item (only changed fields are sent)
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        subcategory: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        quantity: Option<u32>,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        condition: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        photo_ref: Option<String>,
    },
    /// Delete an item by id
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Import a CSV snapshot (one bulk insert)
    Import { file: PathBuf },
    /// Export a CSV snapshot, optionally bundling photos into a zip
    Export {
        file: PathBuf,
        /// Also write referenced photos into this zip archive
        #[arg(long)]
        archive: Option<PathBuf>,
    },
    /// Verify credentials against the backend (password sign-in)
    Login { email: String },
    /// Serve the local JSON API
    Serve {
        #[arg(long, default_value_t = 8087)]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match BackendConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let mut client = BackendClient::new(&config);

    // Session gate: sign in up front when credentials are configured,
    // otherwise requests carry the API key alone.
    if let (Ok(email), Ok(password)) = (
        std::env::var("SUPABASE_EMAIL"),
        std::env::var("SUPABASE_PASSWORD"),
    ) {
        if let Err(e) = client.sign_in(&email, &password).await {
            log::warn!("Sign-in failed, continuing with the API key: {}", e);
        }
    }

    let inventory = Inventory::new(client);
    if let Err(e) = run(cli.command, inventory).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(command: Command, mut inventory: Inventory) -> Result<()> {
    match command {
        Command::List {
            search,
            category,
            location,
            condition,
        } => {
            // Fails open: an unreachable backend leaves an empty list.
            if let Err(e) = inventory.load().await {
                log::error!("Load failed: {}", e);
            }
            let filter = ItemFilter {
                search,
                category,
                location,
                condition,
            };
            let matches = inventory.search(&filter);
            for item in &matches {
                let photo = inventory.photo_url(item).unwrap_or_default();
                println!(
                    "{:>5}  {:<28} {:<16} {:>4} {:<6} {:<14} {:<10} {}",
                    item.id.unwrap_or_default(),
                    item.name,
                    item.category,
                    item.quantity,
                    item.unit,
                    item.location,
                    item.condition,
                    photo
                );
            }
            println!("{} item(s)", matches.len());
        }

        Command::Add {
            name,
            category,
            subcategory,
            brand,
            model,
            quantity,
            unit,
            location,
            condition,
            notes,
            photo,
        } => {
            let draft = Item {
                name,
                category,
                subcategory,
                brand,
                model,
                quantity,
                unit,
                location,
                condition,
                notes,
                ..Default::default()
            };
            let upload = match photo {
                Some(path) => Some(read_photo(&path)?),
                None => None,
            };

            let created = inventory.add(draft, upload).await?;
            println!(
                "Added '{}' (id {})",
                created.name,
                created.id.unwrap_or_default()
            );
        }

        Command::Update {
            id,
            name,
            category,
            subcategory,
            brand,
            model,
            quantity,
            unit,
            location,
            condition,
            notes,
            photo_ref,
        } => {
            inventory.load().await?;
            let mut fields = inventory
                .items()
                .iter()
                .find(|item| item.id == Some(id))
                .ok_or(InventoryError::UnknownItem(id))?
                .clone();

            if let Some(name) = name {
                fields.name = name;
            }
            if let Some(category) = category {
                fields.category = category;
            }
            if let Some(subcategory) = subcategory {
                fields.subcategory = subcategory;
            }
            if let Some(brand) = brand {
                fields.brand = brand;
            }
            if let Some(model) = model {
                fields.model = model;
            }
            if let Some(quantity) = quantity {
                fields.quantity = quantity;
            }
            if let Some(unit) = unit {
                fields.unit = unit;
            }
            if let Some(location) = location {
                fields.location = location;
            }
            if let Some(condition) = condition {
                fields.condition = condition;
            }
            if let Some(notes) = notes {
                fields.notes = notes;
            }
            if let Some(photo_ref) = photo_ref {
                fields.photo_ref = photo_ref;
            }

            inventory.update(id, fields).await?;
            println!("Updated item {}", id);
        }

        Command::Delete { id, yes } => {
            inventory.load().await?;
            let name = inventory
                .items()
                .iter()
                .find(|item| item.id == Some(id))
                .map(|item| item.name.clone())
                .ok_or(InventoryError::UnknownItem(id))?;

            if !yes && !confirm(&format!("Delete item {} ('{}')?", id, name)) {
                println!("Aborted.");
                return Ok(());
            }

            inventory.delete(id).await?;
            println!("Deleted item {}", id);
        }

        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)?;
            let imported = inventory.import_csv(&text).await?;
            println!("Imported {} item(s) from {}", imported, file.display());
        }

        Command::Export { file, archive } => {
            inventory.load().await?;
            let csv = inventory.export_csv()?;
            std::fs::write(&file, csv)?;
            println!(
                "Exported {} item(s) to {}",
                inventory.items().len(),
                file.display()
            );

            if let Some(archive_path) = archive {
                let writer = std::fs::File::create(&archive_path)?;
                let bundled = inventory.export_archive(writer).await?;
                println!("Bundled {} photo(s) into {}", bundled, archive_path.display());
            }
        }

        Command::Login { email } => {
            let password = match std::env::var("SUPABASE_PASSWORD") {
                Ok(password) => password,
                Err(_) => prompt("Password: ")?,
            };
            inventory.client_mut().sign_in(&email, &password).await?;
            println!("Signed in as {}", email);
        }

        Command::Serve { port } => {
            if let Err(e) = inventory.load().await {
                log::error!("Initial load failed: {}", e);
            }
            let shared = Arc::new(RwLock::new(inventory));
            web::serve(shared, port).await?;
        }
    }

    Ok(())
}

/// Reads a photo file into an upload, with the content type taken from
/// the file extension.
fn read_photo(path: &std::path::Path) -> Result<PhotoUpload> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());
    let content_type = guess_content_type(&file_name).to_string();
    Ok(PhotoUpload {
        file_name,
        bytes,
        content_type,
    })
}

fn confirm(question: &str) -> bool {
    print!("{} [y/N] ", question);
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

fn prompt(question: &str) -> Result<String> {
    print!("{}", question);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}
