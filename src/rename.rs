use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Applied in order to the lowercased file name.
const REPLACEMENTS: &[(&str, &str)] = &[
    (" ", "_"),
    (".", ""),
    ("card_", ""),
    ("_alpha", ""),
    ("_glow", ""),
    ("_frameepic", ""),
    ("_purple", ""),
    ("_frame", ""),
    ("_01", ""),
    ("_2025", ""),
    ("png", ".png"),
];

/// `"Card_Mini P.E.K.K.A_alpha.png"` → `"mini_pekka.png"`, matching record ids.
pub fn normalize_asset_name(file_name: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(file_name.to_lowercase(), |name, &(from, to)| {
            name.replace(from, to)
        })
}

/// Rename every entry in `dir` whose normalized name differs and is not taken.
/// Returns the count.
pub fn rename_assets(dir: &Path) -> Result<usize> {
    let mut renamed = 0;
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read asset directory {:?}", dir))?;

    for entry in entries {
        let entry = entry?;
        let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        let target = normalize_asset_name(&file_name);
        if target == file_name {
            continue;
        }

        let dst = dir.join(&target);
        if dst.exists() {
            warn!("Skipped: {} -> {} (target exists)", file_name, target);
            continue;
        }
        fs::rename(entry.path(), &dst)
            .with_context(|| format!("Failed to rename {} -> {}", file_name, target))?;
        info!("Renamed: {} -> {}", file_name, target);
        renamed += 1;
    }

    Ok(renamed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_names() {
        assert_eq!(normalize_asset_name("Card_Mini P.E.K.K.A_alpha.png"), "mini_pekka.png");
        assert_eq!(normalize_asset_name("Hog_Rider_Glow_01.png"), "hog_rider.png");
        assert_eq!(normalize_asset_name("Mega Knight_FrameEpic.png"), "mega_knight.png");
        assert_eq!(normalize_asset_name("Archer Queen_2025.png"), "archer_queen.png");
        assert_eq!(normalize_asset_name("knight.png"), "knight.png");
    }

    #[test]
    fn renames_only_changed_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Card_Zap_Frame.png"), b"").unwrap();
        fs::write(dir.path().join("knight.png"), b"").unwrap();

        assert_eq!(rename_assets(dir.path()).unwrap(), 1);
        assert!(dir.path().join("zap.png").exists());
        assert!(dir.path().join("knight.png").exists());
        assert!(!dir.path().join("Card_Zap_Frame.png").exists());
    }

    #[test]
    fn existing_target_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("knight.png"), "ORIGINAL").unwrap();
        fs::write(dir.path().join("Knight_Glow.png"), "GLOW").unwrap();

        assert_eq!(rename_assets(dir.path()).unwrap(), 0);
        assert_eq!(fs::read_to_string(dir.path().join("knight.png")).unwrap(), "ORIGINAL");
        assert_eq!(fs::read_to_string(dir.path().join("Knight_Glow.png")).unwrap(), "GLOW");
    }
}
