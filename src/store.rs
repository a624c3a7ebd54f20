use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;

use crate::record::{LinkEntry, Record};

/// Links of one category, named after its file stem.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkFile {
    pub category: String,
    pub entries: Vec<LinkEntry>,
}

/// Persistence for link lists and the final catalog.
pub trait CatalogStore {
    fn write_links(&self, category: &str, links: &[LinkEntry]) -> Result<PathBuf>;
    fn load_links(&self) -> Result<Vec<LinkFile>>;
    fn write_catalog(&self, records: &[Record]) -> Result<PathBuf>;
}

pub struct JsonStore {
    link_dir: PathBuf,
    catalog_path: PathBuf,
}

impl JsonStore {
    pub fn new(link_dir: impl Into<PathBuf>, catalog_path: impl Into<PathBuf>) -> Self {
        JsonStore {
            link_dir: link_dir.into(),
            catalog_path: catalog_path.into(),
        }
    }
}

impl CatalogStore for JsonStore {
    fn write_links(&self, category: &str, links: &[LinkEntry]) -> Result<PathBuf> {
        let path = self.link_dir.join(format!("{}.json", category));
        write_json(&path, links, b"  ")?;
        Ok(path)
    }

    /// Every `*.json` in the link directory, ordered by file name.
    fn load_links(&self) -> Result<Vec<LinkFile>> {
        let mut paths = Vec::new();
        let entries = fs::read_dir(&self.link_dir)
            .with_context(|| format!("Failed to read link directory {:?}", self.link_dir))?;
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        paths
            .iter()
            .map(|path| {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {:?}", path))?;
                let entries: Vec<LinkEntry> = serde_json::from_str(&text)
                    .with_context(|| format!("Malformed link file {:?}", path))?;
                let category = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default()
                    .to_string();
                Ok(LinkFile { category, entries })
            })
            .collect()
    }

    fn write_catalog(&self, records: &[Record]) -> Result<PathBuf> {
        write_json(&self.catalog_path, records, b"    ")?;
        Ok(self.catalog_path.clone())
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, indent: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
    }

    let file = fs::File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    let mut ser = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(indent));
    value
        .serialize(&mut ser)
        .with_context(|| format!("Failed to write {:?}", path))?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordBuilder;

    fn entry(name: &str) -> LinkEntry {
        LinkEntry {
            name: name.to_string(),
            link: format!("https://clashroyale.fandom.com/wiki/{}", name),
        }
    }

    #[test]
    fn links_round_trip_in_file_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("links"), dir.path().join("catalog.json"));
        store.write_links("troop_cards", &[entry("Knight"), entry("Archers")]).unwrap();
        store.write_links("building_cards", &[entry("Cannon")]).unwrap();
        fs::write(dir.path().join("links/notes.txt"), "ignored").unwrap();

        let files = store.load_links().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].category, "building_cards");
        assert_eq!(files[1].category, "troop_cards");
        assert_eq!(files[1].entries, vec![entry("Knight"), entry("Archers")]);
    }

    #[test]
    fn link_file_format() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path(), dir.path().join("catalog.json"));
        let path = store.write_links("spell_cards", &[entry("Zap")]).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("\n  {\n    \"name\": \"Zap\""));
    }

    #[test]
    fn catalog_is_a_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path(), dir.path().join("out/card_details.json"));
        let records = vec![
            RecordBuilder::new("P.E.K.K.A").build(),
            RecordBuilder::new("Électro Wizard").build(),
        ];
        let path = store.write_catalog(&records).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("Électro Wizard"));
        let back: Vec<Record> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn missing_link_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("nope"), dir.path().join("c.json"));
        assert!(store.load_links().is_err());
    }
}
