//! The `whosthat catalog` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use whosthat_core::Catalog;

use super::{fetch_catalog, resolve_config, LOAD_FAILED_MESSAGE};
use crate::CatalogArgs;

pub async fn execute(args: CatalogArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    println!("Loading your Pokémon...");
    let Ok(catalog) = fetch_catalog(&config).await? else {
        anyhow::bail!(LOAD_FAILED_MESSAGE);
    };

    println!("{}", catalog_table(&catalog));
    println!(
        "{} Pokémon, {} distinct names",
        catalog.len(),
        catalog.distinct_names()
    );
    Ok(())
}

fn catalog_table(catalog: &Catalog) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Name", "Artwork"]);

    for (i, entry) in catalog.entries().iter().enumerate() {
        let artwork = if entry.image_url.is_empty() {
            "-"
        } else {
            entry.image_url.as_str()
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&entry.name),
            Cell::new(artwork),
        ]);
    }
    table
}
