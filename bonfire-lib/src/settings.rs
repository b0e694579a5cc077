//! Front-end preferences (`~/.config/bonfire/settings.toml`).
//!
//! Kept next to the API config file but separate from it, so the client
//! crate never has to know about presentation settings.

use std::io;
use std::path::{Path, PathBuf};

use bonfire_core::Variant;

/// Canonical path to the settings file: `~/.config/bonfire/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("bonfire").join("settings.toml")
}

/// Resolve the storefront variant using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `storefront.variant` in `settings.toml`
/// 3. Bonfire
pub fn resolve_variant(cli_override: Option<Variant>) -> Variant {
    cli_override
        .or_else(|| load_variant_from(&settings_path()))
        .unwrap_or_default()
}

/// Read `storefront.variant` from a settings file, if set and valid.
pub fn load_variant_from(path: &Path) -> Option<Variant> {
    let contents = std::fs::read_to_string(path).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    let raw = doc.get("storefront")?.get("variant")?.as_str()?;
    match raw.parse() {
        Ok(variant) => Some(variant),
        Err(e) => {
            log::warn!("Ignoring storefront.variant in {}: {}", path.display(), e);
            None
        }
    }
}

/// Save (or clear) the variant in `settings.toml`.
pub fn save_variant(variant: Option<Variant>) -> io::Result<PathBuf> {
    let path = settings_path();
    save_variant_to(&path, variant)?;
    Ok(path)
}

/// Uses `toml::Value` for a surgical update so other keys are preserved.
pub fn save_variant_to(path: &Path, variant: Option<Variant>) -> io::Result<()> {
    let mut doc: toml::Value = if let Ok(contents) = std::fs::read_to_string(path) {
        contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default()))
    } else {
        toml::Value::Table(Default::default())
    };

    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let storefront = table
        .entry("storefront")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let storefront = storefront
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[storefront] is not a table"))?;

    match variant {
        Some(v) => {
            storefront.insert(
                "variant".to_string(),
                toml::Value::String(v.short_name().to_string()),
            );
        }
        None => {
            storefront.remove("variant");
        }
    }

    // Write atomically
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;

    Ok(())
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load_variant() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bonfire").join("settings.toml");
        assert_eq!(load_variant_from(&path), None);

        save_variant_to(&path, Some(Variant::Nexus)).unwrap();
        assert_eq!(load_variant_from(&path), Some(Variant::Nexus));

        save_variant_to(&path, None).unwrap();
        assert_eq!(load_variant_from(&path), None);
    }

    #[test]
    fn other_keys_survive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[shell]\nhistory = 50\n").unwrap();

        save_variant_to(&path, Some(Variant::Bonfire)).unwrap();
        let doc: toml::Value = std::fs::read_to_string(&path).unwrap().parse().unwrap();
        assert_eq!(doc["shell"]["history"].as_integer(), Some(50));
        assert_eq!(doc["storefront"]["variant"].as_str(), Some("bonfire"));
    }

    #[test]
    fn invalid_variant_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[storefront]\nvariant = \"steam\"\n").unwrap();
        assert_eq!(load_variant_from(&path), None);
    }

    #[test]
    fn override_wins() {
        assert_eq!(resolve_variant(Some(Variant::Nexus)), Variant::Nexus);
    }
}
