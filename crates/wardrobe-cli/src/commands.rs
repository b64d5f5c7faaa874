//! Subcommand implementations. Each one drives the core over any
//! [`KeyValueStore`].

use std::{
  io::{self, BufRead as _, Write as _},
  path::PathBuf,
  time::Duration,
};

use anyhow::{Result, bail};
use chrono::Utc;
use wardrobe_core::{
  Wardrobe,
  item::{Category, ClothingItem, ItemId, ItemStatus},
  kv::KeyValueStore,
  lifecycle::NewItem,
  session::{Credentials, Session},
  wardrobe::CreateOutfitError,
};

use crate::{
  Command, OutfitCommand,
  capture::{read_image, read_uploads},
  settings::Settings,
};

/// Outfit tiles show this many items.
const OUTFIT_PREVIEW_LEN: usize = 4;

pub async fn run<S: KeyValueStore>(
  store: S,
  command: Command,
  settings: &Settings,
) -> Result<()> {
  let session = Session::new(&store);

  match command {
    Command::Login { email, password } => {
      if session.is_authenticated() {
        println!("Already signed in.");
        return Ok(());
      }
      session.log_in(&Credentials { email, password })?;
      println!("Signed in.");
      return Ok(());
    }
    Command::Register { email, password } => {
      if session.is_authenticated() {
        println!("Already signed in.");
        return Ok(());
      }
      session.register(&Credentials { email, password })?;
      println!("Account created. Signed in.");
      return Ok(());
    }
    Command::Status => {
      if session.is_authenticated() {
        println!("Signed in.");
      } else {
        println!("Signed out.");
      }
      return Ok(());
    }
    Command::Logout => {
      session.log_out()?;
      println!("Signed out.");
      return Ok(());
    }
    _ => {}
  }

  if !session.is_authenticated() {
    bail!("not signed in; run `wardrobe login` first");
  }

  let wardrobe = Wardrobe::new(&store);
  match command {
    Command::Add { name, category, status, front, back } => {
      add(&wardrobe, name, category, status, front, back, settings).await?;
    }
    Command::Upload { files } => {
      let uploads = read_uploads(&files).await;
      if let Ok(added) = wardrobe.quick_upload(uploads) {
        println!("Uploaded {} of {} file(s).", added.len(), files.len());
      }
    }
    Command::List => list_items(&wardrobe),
    Command::Remove { id, yes } => remove(&wardrobe, ItemId::from(id), yes)?,
    Command::Outfit { action: OutfitCommand::Create { ids } } => {
      let selection: Vec<ItemId> = ids.into_iter().map(ItemId::from).collect();
      match wardrobe.create_outfit(&selection) {
        Ok(outfit) => {
          println!("Outfit saved locally to My Outfits ({}).", outfit.id);
        }
        Err(CreateOutfitError::Rejected(rejection)) => bail!("{rejection}"),
        // Already logged by the adapter.
        Err(CreateOutfitError::Storage(_)) => {}
      }
    }
    Command::Outfit { action: OutfitCommand::List } => list_outfits(&wardrobe),
    // Answered before the sign-in gate.
    Command::Login { .. }
    | Command::Register { .. }
    | Command::Status
    | Command::Logout => {}
  }
  Ok(())
}

async fn add<S: KeyValueStore>(
  wardrobe: &Wardrobe<S>,
  name: String,
  category: Option<String>,
  status: String,
  front: Option<PathBuf>,
  back: Option<PathBuf>,
  settings: &Settings,
) -> Result<()> {
  let front_image = match front {
    Some(path) => Some(read_image(&path).await?),
    None => None,
  };
  let back_image = match back {
    Some(path) => Some(read_image(&path).await?),
    None => None,
  };

  let form = NewItem {
    name,
    category: category.as_deref().map(Category::parse),
    status: ItemStatus::parse(&status),
    front_image,
    back_image,
  };
  let item = form.into_item(Utc::now())?;

  let saved = wardrobe.save_item(item.clone()).is_ok();
  println!("Saving...");
  tokio::time::sleep(Duration::from_millis(settings.save_delay_ms)).await;
  if saved {
    println!("Added {} ({}).", item.name, item.id);
  }
  Ok(())
}

fn list_items<S: KeyValueStore>(wardrobe: &Wardrobe<S>) {
  let items = wardrobe.load_items().into_vec();
  let noun = if items.len() == 1 { "item" } else { "items" };
  println!("{} {noun}", items.len());
  for item in &items {
    print_item(item);
  }
}

fn print_item(item: &ClothingItem) {
  let back = if item.back_image.is_empty() { "" } else { "  [back]" };
  println!(
    "{}  {}  category: {}  status: {}{back}",
    item.id, item.name, item.category, item.status
  );
}

fn remove<S: KeyValueStore>(
  wardrobe: &Wardrobe<S>,
  id: ItemId,
  yes: bool,
) -> Result<()> {
  let name = wardrobe
    .find_item(&id)
    .map(|i| i.name)
    .unwrap_or_else(|| "this item".to_owned());

  if !yes && !confirm(&format!("Delete \"{name}\"?"))? {
    return Ok(());
  }
  if wardrobe.remove_item(&id).is_ok() {
    println!("Deleted {id}.");
  }
  Ok(())
}

fn list_outfits<S: KeyValueStore>(wardrobe: &Wardrobe<S>) {
  let outfits = wardrobe.load_outfits().into_vec();
  if outfits.is_empty() {
    println!("No Outfits Yet");
    return;
  }
  for (i, outfit) in outfits.iter().enumerate() {
    let names: Vec<&str> = outfit
      .preview(OUTFIT_PREVIEW_LEN)
      .iter()
      .map(|item| item.name.as_str())
      .collect();
    println!(
      "Outfit #{}  {} items  [{}]",
      i + 1,
      outfit.items.len(),
      names.join(", ")
    );
  }
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` is no.
fn confirm(prompt: &str) -> Result<bool> {
  print!("{prompt} [y/N] ");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
