//! `screenfit profiles`: list display profiles or save a new one.

use crate::commands::load_config;
use clap::Subcommand;
use screenfit_config::{ProfileStore, builtin_profile};
use screenfit_core::DisplayProfile;

#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all available profiles (the default)
    List,

    /// Save a profile as JSON in the profile directory
    Add {
        name: String,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        #[arg(long, default_value_t = 14)]
        font_size: u32,
        #[arg(long, default_value_t = 80)]
        columns: u32,
        #[arg(long, default_value_t = 0.9)]
        buffer: f64,
    },
}

pub fn run(action: Option<ProfileAction>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    let store = ProfileStore::from_config(&config);

    match action.unwrap_or(ProfileAction::List) {
        ProfileAction::List => list(&store),
        ProfileAction::Add {
            name,
            width,
            height,
            font_size,
            columns,
            buffer,
        } => {
            if builtin_profile(&name).is_some() {
                return Err(format!("'{name}' is a built-in profile and cannot be replaced").into());
            }
            let profile = DisplayProfile::new(name, width, height, font_size, columns, buffer)?;
            let path = store.save_profile(&profile, None)?;
            println!("✅ Saved profile '{}' to {}", profile.name(), path.display());
            Ok(())
        }
    }
}

fn list(store: &ProfileStore) -> Result<(), Box<dyn std::error::Error>> {
    println!("🖥️  Display profiles");
    println!("===================");
    println!();
    for name in store.list_profiles() {
        match store.load_profile(&name) {
            Ok(p) => println!(
                "  {:<12} {:>5}x{:<5} font {:>2}px  cols {:>3}  buffer {:.2}",
                p.name(),
                p.width_px(),
                p.height_px(),
                p.font_size_px(),
                p.ruler_columns(),
                p.buffer()
            ),
            Err(e) => tracing::warn!("Skipping profile '{name}': {e}"),
        }
    }
    println!();
    println!("  Profile directory: {}", store.profile_dir().display());
    Ok(())
}
