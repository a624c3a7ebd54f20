use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::fetcher::PageFetcher;
use crate::parser::{self, document::HtmlDocument};
use crate::record::Record;
use crate::store::CatalogStore;

/// Link phase totals.
pub struct LinkStats {
    pub categories: usize,
    pub links: usize,
    pub failed: usize,
}

/// Detail phase totals.
pub struct DetailStats {
    pub total: usize,
    pub ok: usize,
    pub skipped: usize,
    pub per_category: Vec<(String, usize)>,
    /// Set when `limit` left linked cards out of the catalog.
    pub truncated: bool,
}

impl DetailStats {
    pub fn print(&self) {
        for (category, ok) in &self.per_category {
            println!("  {:<20} {} cards", category, ok);
        }
        println!(
            "Saved {} of {} cards ({} skipped).",
            self.ok, self.total, self.skipped
        );
        if self.truncated {
            println!("Catalog is partial: run without --limit for the full set.");
        }
    }
}

/// Fetch each category page and write its card links to one link file.
pub fn collect_links(
    fetcher: &impl PageFetcher,
    store: &impl CatalogStore,
    categories: &[String],
    origin: &str,
) -> Result<LinkStats> {
    let mut stats = LinkStats {
        categories: 0,
        links: 0,
        failed: 0,
    };

    for url in categories {
        let Some(category) = parser::links::category_name(url) else {
            warn!(url = %url, "Not a category URL, skipping");
            stats.failed += 1;
            continue;
        };

        let markup = match fetcher.fetch(url) {
            Ok(m) => m,
            Err(e) => {
                warn!(category = %category, "Skipping category: {}", e);
                stats.failed += 1;
                continue;
            }
        };

        let links = parser::links::extract(&HtmlDocument::parse(&markup), origin);
        let path = store.write_links(&category, &links)?;
        info!(path = ?path, "Total {} found: {}", category, links.len());

        stats.categories += 1;
        stats.links += links.len();
    }

    info!("Overall total cards found: {}", stats.links);
    Ok(stats)
}

/// Fetch and extract every linked card page, then write the catalog once.
pub fn collect_details(
    fetcher: &impl PageFetcher,
    store: &impl CatalogStore,
    limit: Option<usize>,
) -> Result<DetailStats> {
    let link_files = store.load_links()?;
    let available: usize = link_files.iter().map(|f| f.entries.len()).sum();
    let total = limit.map_or(available, |n| n.min(available));
    let truncated = total < available;
    if truncated {
        warn!(
            "Limit {} of {} linked cards: the catalog will be partial",
            total, available
        );
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let mut records: Vec<Record> = Vec::with_capacity(total);
    let mut stats = DetailStats {
        total,
        ok: 0,
        skipped: 0,
        per_category: Vec::with_capacity(link_files.len()),
        truncated,
    };
    let mut processed = 0usize;

    for file in &link_files {
        if processed == total {
            break;
        }
        let mut ok = 0usize;
        let count = file.entries.len();

        for (i, entry) in file.entries.iter().enumerate() {
            if processed == total {
                break;
            }
            processed += 1;

            pb.suspend(|| {
                info!(
                    "({:>3}/{}) - {:<20} from {}",
                    i + 1,
                    count,
                    entry.name,
                    entry.link
                )
            });

            match fetcher.fetch(&entry.link) {
                Ok(markup) => {
                    let doc = HtmlDocument::parse(&markup);
                    records.push(parser::details::extract(&entry.name, &doc));
                    ok += 1;
                }
                Err(e) => {
                    pb.suspend(|| warn!(card = %entry.name, "Skipping: {}", e));
                    stats.skipped += 1;
                }
            }
            pb.inc(1);
        }

        stats.per_category.push((file.category.clone(), ok));
    }

    pb.finish_and_clear();
    stats.ok = records.len();

    let path = store.write_catalog(&records)?;
    info!(path = ?path, "Wrote {} records ({} skipped)", stats.ok, stats.skipped);
    Ok(stats)
}
