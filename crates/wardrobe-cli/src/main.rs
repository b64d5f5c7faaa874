//! `wardrobe`: command-line front end for the wardrobe catalog.
//!
//! # Usage
//!
//! ```text
//! wardrobe login --email me@example.com --password secret
//! wardrobe add --name "Blue Denim Jacket" --category top --front jacket.jpg
//! wardrobe upload IMG_0001.jpg IMG_0002.jpg
//! wardrobe outfit create <ID>...
//! ```

mod capture;
mod commands;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wardrobe_store_sqlite::SqliteStore;

use settings::Settings;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "wardrobe", version, about = "Catalog clothes and compose outfits")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "wardrobe.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Sign in. Any non-empty email and password are accepted.
  Login {
    #[arg(long)]
    email:    String,
    #[arg(long)]
    password: String,
  },
  /// Create an account and sign in.
  Register {
    #[arg(long)]
    email:    String,
    #[arg(long)]
    password: String,
  },
  /// Sign out.
  Logout,
  /// Show whether you are signed in.
  Status,
  /// Add one item with its photos.
  Add {
    #[arg(long)]
    name:     String,
    /// top, bottom, dress, accessory, footwear or other.
    #[arg(long)]
    category: Option<String>,
    /// available, in-wash, ironed or damaged.
    #[arg(long, default_value = "available")]
    status:   String,
    /// Front photo (required).
    #[arg(long, value_name = "FILE")]
    front:    Option<PathBuf>,
    /// Back photo.
    #[arg(long, value_name = "FILE")]
    back:     Option<PathBuf>,
  },
  /// Add several photos at once as uncategorised items.
  Upload {
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,
  },
  /// List the wardrobe, newest first.
  List,
  /// Delete an item. Saved outfits keep their copy.
  Remove {
    id:  String,
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    yes: bool,
  },
  /// Create or list outfits.
  Outfit {
    #[command(subcommand)]
    action: OutfitCommand,
  },
}

#[derive(Subcommand, Debug)]
pub enum OutfitCommand {
  /// Save the given items as an outfit.
  Create {
    #[arg(value_name = "ID")]
    ids: Vec<String>,
  },
  /// List saved outfits, newest first.
  List,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  if let Some(dir) = settings.store_path.parent() {
    std::fs::create_dir_all(dir)
      .with_context(|| format!("failed to create {}", dir.display()))?;
  }
  let store = SqliteStore::open(&settings.store_path).with_context(|| {
    format!("failed to open store at {}", settings.store_path.display())
  })?;
  tracing::debug!(path = %settings.store_path.display(), "store opened");

  commands::run(store, cli.command, &settings).await
}
