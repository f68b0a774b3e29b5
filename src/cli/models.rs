//! `devagent models` command handlers

use std::path::Path;

use anyhow::{Context, Result, bail};
use devagent_catalog::{CatalogLoader, ConfigManager, LoadedCatalog, ModelCatalog, ModelEntry};

use super::args::{Cli, ModelCommands};
use super::style::Palette;

pub fn handle_models_command(
    cli: &Cli,
    config: &ConfigManager,
    command: &ModelCommands,
) -> Result<()> {
    let palette = Palette::detect(cli.no_color);
    match command {
        ModelCommands::List { json } => {
            let loaded = load_catalog(cli, config)?;
            if *json {
                println!("{}", loaded.catalog.to_json_string()?);
            } else {
                print!("{}", render_listing(&loaded, palette));
            }
            Ok(())
        }
        ModelCommands::Info { id } => {
            let loaded = load_catalog(cli, config)?;
            let entry = find_entry(&loaded.catalog, id)?;
            print!("{}", render_entry(entry, palette));
            Ok(())
        }
        ModelCommands::Dump => {
            let loaded = load_catalog(cli, config)?;
            println!("{}", loaded.catalog.to_json_string_pretty()?);
            Ok(())
        }
        ModelCommands::Check { path } => handle_check(cli, config, path.as_deref(), palette),
        ModelCommands::Schema => {
            let schema = devagent_catalog::catalog_schema_pretty()
                .context("failed to render catalog schema")?;
            println!("{schema}");
            Ok(())
        }
    }
}

fn load_catalog(cli: &Cli, config: &ConfigManager) -> Result<LoadedCatalog> {
    let loader = CatalogLoader::new()
        .with_config(config)
        .with_optional_path(cli.catalog.clone());
    let source = loader.resolve();
    loader
        .load()
        .with_context(|| format!("failed to load model catalog from {source}"))
}

fn handle_check(
    cli: &Cli,
    config: &ConfigManager,
    path: Option<&Path>,
    palette: Palette,
) -> Result<()> {
    let (catalog, origin) = match path {
        Some(path) => {
            let catalog = ModelCatalog::from_path(path)
                .with_context(|| format!("{} is not a valid catalog", path.display()))?;
            (catalog, path.display().to_string())
        }
        None => {
            let loaded = load_catalog(cli, config)?;
            (loaded.catalog, loaded.source.to_string())
        }
    };

    println!(
        "{} {}: {} entries valid",
        palette.green("✓"),
        palette.bold(&origin),
        catalog.len()
    );
    Ok(())
}

fn find_entry<'a>(catalog: &'a ModelCatalog, id: &str) -> Result<&'a ModelEntry> {
    match catalog.get(id) {
        Some(entry) => Ok(entry),
        None => {
            let known: Vec<&str> = catalog.ids().collect();
            bail!("Unknown model '{}'. Available: {}", id, known.join(", "))
        }
    }
}

fn render_listing(loaded: &LoadedCatalog, palette: Palette) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        palette.heading("Model catalog"),
        palette.dimmed(&format!("({})", loaded.source))
    ));

    if loaded.catalog.is_empty() {
        out.push_str(&format!("\n  {}\n", palette.yellow("No models listed")));
        return out;
    }

    let id_width = loaded
        .catalog
        .ids()
        .map(|id| id.chars().count())
        .max()
        .unwrap_or(0);
    for (category, entries) in loaded.catalog.by_category() {
        out.push_str(&format!("\n{}\n", palette.bold(category)));
        for entry in entries {
            out.push_str(&format!(
                "  {}  {} {}\n",
                palette.cyan(&format!("{:<id_width$}", entry.id)),
                entry.name,
                palette.dimmed(&format!("· {}", entry.source))
            ));
        }
    }
    out
}

fn render_entry(entry: &ModelEntry, palette: Palette) -> String {
    let requirements = &entry.requirements;
    let parsed = |raw: &str, size: Option<devagent_catalog::MemorySize>| match size {
        Some(size) => format!("{raw} {}", palette.dimmed(&format!("({size})"))),
        None => raw.to_string(),
    };

    let mut out = String::new();
    out.push_str(&format!("{}\n", palette.heading(&entry.name)));
    out.push_str(&format!("ID: {}\n", palette.cyan(&entry.id)));
    out.push_str(&format!("Source: {}\n", entry.source));
    out.push_str(&format!("Category: {}\n", entry.category));
    out.push_str(&format!("Description: {}\n", entry.description));
    out.push('\n');
    out.push_str(&format!("{}\n", palette.bold("Requirements")));
    out.push_str(&format!(
        "  RAM: {}\n",
        parsed(&requirements.ram, requirements.ram_size())
    ));
    out.push_str(&format!(
        "  Disk: {}\n",
        parsed(&requirements.disk, requirements.disk_size())
    ));
    out.push_str(&format!(
        "  GPU: {} {}\n",
        requirements.gpu,
        palette.dimmed(&format!("({})", requirements.gpu_policy()))
    ));
    out.push('\n');
    out.push_str(&format!("Install: {}\n", palette.green(&entry.install_command)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use devagent_catalog::CatalogSource;

    fn bundled() -> LoadedCatalog {
        LoadedCatalog {
            catalog: ModelCatalog::bundled().expect("bundled catalog"),
            source: CatalogSource::Bundled,
        }
    }

    #[test]
    fn listing_groups_entries_under_categories() {
        let listing = render_listing(&bundled(), Palette::plain());
        assert!(listing.starts_with("Model catalog (bundled catalog)\n"));

        let coding = listing.find("\nПрограммирование\n").expect("coding group");
        let codellama = listing.find("codellama").expect("codellama row");
        let dialogue = listing.find("\nДиалоговая модель\n").expect("dialogue group");
        assert!(coding < codellama && codellama < dialogue);
        assert!(listing.contains("Code Llama · Meta"));
    }

    #[test]
    fn listing_aligns_non_ascii_ids() {
        let catalog = ModelCatalog::from_json_str(
            r#"{"models": [
                {"id": "сайга", "name": "Saiga", "description": "d", "source": "s",
                 "category": "Диалоговая модель",
                 "requirements": {"ram": "8 ГБ", "disk": "4 ГБ", "gpu": "Опционально"},
                 "install_command": "ollama pull saiga"},
                {"id": "phi", "name": "Phi", "description": "d", "source": "s",
                 "category": "Диалоговая модель",
                 "requirements": {"ram": "4 ГБ", "disk": "2 ГБ", "gpu": "Опционально"},
                 "install_command": "ollama pull phi"}
            ]}"#,
        )
        .expect("catalog");
        let loaded = LoadedCatalog {
            catalog,
            source: CatalogSource::Bundled,
        };
        let listing = render_listing(&loaded, Palette::plain());

        let column = |name: &str| {
            listing
                .lines()
                .find(|line| line.contains(name))
                .and_then(|line| {
                    let byte = line.find(name)?;
                    line.get(..byte).map(|prefix| prefix.chars().count())
                })
                .expect("row present")
        };
        assert_eq!(column("Saiga"), column("Phi"));
    }

    #[test]
    fn entry_view_shows_parsed_requirements() {
        let loaded = bundled();
        let entry = find_entry(&loaded.catalog, "mixtral").expect("mixtral");
        let view = render_entry(entry, Palette::plain());
        assert!(view.contains("RAM: 16 ГБ (16 GiB)"));
        assert!(view.contains("GPU: Рекомендуется (>8GB VRAM) (recommended (>8 GiB VRAM))"));
        assert!(view.contains("Install: ollama pull mixtral"));
    }

    #[test]
    fn unknown_id_lists_known_ids() {
        let loaded = bundled();
        let error = find_entry(&loaded.catalog, "gpt-5").unwrap_err();
        let message = error.to_string();
        assert!(message.starts_with("Unknown model 'gpt-5'"));
        assert!(message.contains("qwen3, llama3.1, codellama"));
    }
}
