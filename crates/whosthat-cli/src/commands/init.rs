//! The `whosthat init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_sample(Path::new("whosthat.toml"))?;

    println!("\nNext steps:");
    println!("  1. Edit whosthat.toml to pick a source and batch size");
    println!("  2. Run: whosthat catalog");
    println!("  3. Run: whosthat play");

    Ok(())
}

fn write_sample(path: &Path) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, SAMPLE_CONFIG)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# whosthat configuration

# Number of Pokémon fetched at startup (ids 1..=batch_size)
batch_size = 50

# Fixed seed for reproducible games
# seed = 42

[source]
type = "pokeapi"
base_url = "https://pokeapi.co/api/v2"

# Or play offline from a JSON array of PokéAPI-shaped records:
# [source]
# type = "file"
# path = "pokemon.json"
"#;
