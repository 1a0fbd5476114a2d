use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;

use crate::catalog::{Catalog, CatalogImport};
use crate::cli::CatalogCmd;
use crate::models::CatalogItem;
use crate::store::Store;
use crate::types::{best_category_suggestion, canonical_category};

pub fn handle(cmd: CatalogCmd, store: &Store) -> Result<()> {
    match cmd {
        CatalogCmd::List { category } => list(store, category.as_deref()),
        CatalogCmd::Import { file } => import(store, &file),
    }
}

fn list(store: &Store, category: Option<&str>) -> Result<()> {
    let catalog = Catalog::assemble(&store.load_imported_catalog()?);

    // Normalize the filter through the known-category list so `--category
    // Shooting` and `--category shooting` behave the same.
    let filter = category.map(|c| canonical_category(c).unwrap_or_else(|| c.to_lowercase()));
    let matches = |item: &CatalogItem| match &filter {
        Some(c) => item.category.to_lowercase() == *c,
        None => true,
    };

    let sections: [(&str, &[CatalogItem]); 3] = [
        ("Drills", &catalog.drills),
        ("Exercises", &catalog.exercises),
        ("Stretches", &catalog.stretches),
    ];

    let mut printed = 0;
    for (title, items) in sections {
        let filtered: Vec<&CatalogItem> = items.iter().filter(|i| matches(i)).collect();
        if filtered.is_empty() {
            continue;
        }

        println!("{}", format!("{}:", title).cyan().bold());
        for item in filtered {
            let minutes = item
                .minutes
                .map(|m| format!("{}m", m))
                .unwrap_or_else(|| "-".into());
            let equipment = item
                .equipment
                .as_deref()
                .map(|e| format!(" [{}]", e))
                .unwrap_or_default();
            println!(
                "  • {} ({}, {}, {}){}",
                item.name.bold(),
                item.category.yellow(),
                item.difficulty,
                minutes,
                equipment.dimmed()
            );
            printed += 1;
        }
    }

    if printed == 0 {
        match category.and_then(best_category_suggestion) {
            Some(suggestion) => println!(
                "{} no items in category `{}`, did you mean `{}`?",
                "warning:".yellow().bold(),
                category.unwrap_or_default(),
                suggestion.green()
            ),
            None => println!("{}", "  (no catalog items found)".dimmed()),
        }
    }

    Ok(())
}

fn import(store: &Store, file: &str) -> Result<()> {
    let content =
        fs::read_to_string(file).with_context(|| format!("Catalog file '{}' not found", file))?;

    let parsed: CatalogImport =
        toml::from_str(&content).with_context(|| format!("Invalid catalog file: {}", file))?;

    let mut imported = store.load_imported_catalog()?;
    let before = imported.len();

    imported.drills.extend(parsed.drill.into_iter().map(Into::into));
    imported
        .exercises
        .extend(parsed.exercise.into_iter().map(Into::into));
    imported
        .stretches
        .extend(parsed.stretch.into_iter().map(Into::into));

    // Re-imports of the same file keep the last copy of each id.
    dedup_by_id(&mut imported.drills);
    dedup_by_id(&mut imported.exercises);
    dedup_by_id(&mut imported.stretches);

    store.save_imported_catalog(&imported)?;

    println!(
        "{} imported {} catalog items",
        "ok:".green().bold(),
        imported.len().saturating_sub(before)
    );
    Ok(())
}

fn dedup_by_id(items: &mut Vec<CatalogItem>) {
    let mut seen = std::collections::HashSet::new();
    // Iterate from the tail so the newest copy of a duplicate id wins.
    let mut keep: Vec<CatalogItem> = items
        .drain(..)
        .rev()
        .filter(|item| seen.insert(item.id.clone()))
        .collect();
    keep.reverse();
    *items = keep;
}
