use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const DEFAULT_ORIGIN: &str = "https://clashroyale.fandom.com";
const DEFAULT_CATEGORIES: &[&str] = &[
    "https://clashroyale.fandom.com/wiki/Category:Troop_Cards",
    "https://clashroyale.fandom.com/wiki/Category:Spell_Cards",
    "https://clashroyale.fandom.com/wiki/Category:Building_Cards",
];
const DEFAULT_CONFIG_FILE: &str = "cr_catalog";
const ENV_PREFIX: &str = "CR_CATALOG";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Prefix for relative card links.
    pub origin: String,
    /// Category listing pages, one link file each.
    pub categories: Vec<String>,
    pub link_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub asset_dir: PathBuf,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Settings {
    /// Defaults, then `cr_catalog.toml` (or `path`), then `CR_CATALOG_*` env vars.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Config::builder()
            .set_default("origin", DEFAULT_ORIGIN)?
            .set_default("categories", DEFAULT_CATEGORIES.to_vec())?
            .set_default("link_dir", "data/card_urls")?
            .set_default("catalog_path", "data/card_details.json")?
            .set_default("asset_dir", "images/cards")?
            .set_default("timeout_secs", 30_i64)?
            .set_default("user_agent", concat!("cr_catalog/", env!("CARGO_PKG_VERSION")))?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("categories"),
            )
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Invalid settings")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
