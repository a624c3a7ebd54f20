mod fetcher;
mod parser;
mod pipeline;
mod record;
mod rename;
mod settings;
mod store;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use fetcher::HttpFetcher;
use settings::Settings;
use store::JsonStore;

#[derive(Parser)]
#[command(name = "cr_catalog", about = "Clash Royale card catalog scraper")]
struct Cli {
    /// Settings file (default: ./cr_catalog.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch category pages and write one link file per category
    Links,
    /// Fetch every linked card page and write the catalog
    Details {
        /// Max cards to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Links + details in one go
    Run {
        /// Max cards to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Normalize card image file names to match record ids
    Rename {
        /// Directory to rename in (default: asset_dir setting)
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    info!(settings = ?settings, "Settings loaded");

    let store = JsonStore::new(&settings.link_dir, &settings.catalog_path);

    let result = match cli.command {
        Commands::Links => {
            let fetcher = HttpFetcher::new(settings.timeout(), &settings.user_agent)?;
            let stats =
                pipeline::collect_links(&fetcher, &store, &settings.categories, &settings.origin)?;
            println!(
                "Found {} cards in {} categories ({} failed).",
                stats.links, stats.categories, stats.failed
            );
            Ok(())
        }
        Commands::Details { limit } => {
            let fetcher = HttpFetcher::new(settings.timeout(), &settings.user_agent)?;
            let stats = pipeline::collect_details(&fetcher, &store, limit)?;
            stats.print();
            Ok(())
        }
        Commands::Run { limit } => {
            let fetcher = HttpFetcher::new(settings.timeout(), &settings.user_agent)?;

            let t_links = Instant::now();
            let links =
                pipeline::collect_links(&fetcher, &store, &settings.categories, &settings.origin)?;
            println!(
                "Found {} cards in {} categories in {:.1}s",
                links.links,
                links.categories,
                t_links.elapsed().as_secs_f64()
            );
            if links.links == 0 {
                println!("No card links found, nothing to extract.");
                return Ok(());
            }

            let stats = pipeline::collect_details(&fetcher, &store, limit)?;
            stats.print();
            Ok(())
        }
        Commands::Rename { dir } => {
            let dir = dir.unwrap_or_else(|| settings.asset_dir.clone());
            let renamed = rename::rename_assets(&dir)?;
            println!("Renamed {} files in {:?}", renamed, dir);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
