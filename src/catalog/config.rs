//! Loading a button catalog from TOML.
//!
//! ```toml
//! [[button]]
//! key = "0"
//! name = "zero"
//! display = "0"
//! kind = "digit"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{ButtonCatalog, ButtonSpec, CatalogError};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    button: Vec<ButtonSpec>,
}

impl ButtonCatalog {
    /// Parse and validate a catalog from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::new(file.button)
    }

    /// Read a catalog file from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), buttons = catalog.len(), "loaded button catalog");
        Ok(catalog)
    }

    /// Resolve the catalog a front end should use.
    ///
    /// An `explicit` path must load. Otherwise the `user` file is tried if it
    /// exists, and a user file that fails to load is skipped with a warning.
    /// The built-in keypad is the last resort.
    pub fn load_or_default(
        explicit: Option<&Path>,
        user: Option<PathBuf>,
    ) -> Result<Self, CatalogError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Some(path) = user
            && path.exists()
        {
            match Self::load(&path) {
                Ok(catalog) => return Ok(catalog),
                Err(e) => {
                    tracing::warn!("Ignoring {}: {e}; using built-in keypad", path.display())
                }
            }
        }

        Ok(Self::default())
    }
}

/// Per-user catalog location: `<config_dir>/calc-input/buttons.toml`.
pub fn default_catalog_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("calc-input").join("buttons.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Press, SemanticType};

    fn default_catalog_toml() -> String {
        let mut text = String::new();
        for button in ButtonCatalog::default().iter() {
            text.push_str(&format!(
                "[[button]]\nkey = {:?}\nname = {:?}\ndisplay = {:?}\nkind = \"{}\"\n\n",
                button.key, button.name, button.display, button.semantic_type
            ));
        }
        text
    }

    #[test]
    fn test_parse_full_catalog() {
        let catalog = ButtonCatalog::from_toml_str(&default_catalog_toml()).unwrap();
        assert_eq!(catalog.len(), 17);
        assert_eq!(catalog.resolve("del"), Some(Press::Clear));
        assert_eq!(catalog.get("*").map(|b| b.display.as_str()), Some("×"));
    }

    #[test]
    fn test_custom_clear_key() {
        let text = default_catalog_toml().replace("key = \"del\"", "key = \"AC\"");
        let catalog = ButtonCatalog::from_toml_str(&text).unwrap();
        assert_eq!(catalog.clear_key(), "AC");
        assert_eq!(catalog.resolve("del"), None);
        assert_eq!(
            catalog.get("AC").map(|b| b.semantic_type),
            Some(SemanticType::Clear)
        );
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let text = "[[button]]\nkey = \"s\"\nname = \"sin\"\ndisplay = \"sin\"\nkind = \"function\"\n";
        assert!(matches!(
            ButtonCatalog::from_toml_str(text),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_file_rejected() {
        assert!(matches!(
            ButtonCatalog::from_toml_str(""),
            Err(CatalogError::MissingDigit(0))
        ));
    }

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("calc-input-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_explicit_path_must_load() {
        let missing = Path::new("/nonexistent/calc-input/explicit.toml");
        let result = ButtonCatalog::load_or_default(Some(missing), None);
        assert!(matches!(result, Err(CatalogError::Io { .. })));

        let malformed = write_temp("explicit-bad.toml", "[[button]]\nkey = 1\n");
        let result = ButtonCatalog::load_or_default(Some(&malformed), None);
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_explicit_path_wins_over_user_file() {
        let custom = default_catalog_toml().replace("key = \"del\"", "key = \"C\"");
        let explicit = write_temp("explicit-good.toml", &custom);
        let user = write_temp("user-good.toml", &default_catalog_toml());
        let catalog = ButtonCatalog::load_or_default(Some(&explicit), Some(user)).unwrap();
        assert_eq!(catalog.clear_key(), "C");
    }

    #[test]
    fn test_user_file_is_used() {
        let custom = default_catalog_toml().replace("key = \"del\"", "key = \"AC\"");
        let user = write_temp("user-custom.toml", &custom);
        let catalog = ButtonCatalog::load_or_default(None, Some(user)).unwrap();
        assert_eq!(catalog.clear_key(), "AC");
    }

    #[test]
    fn test_malformed_user_file_falls_back() {
        let user = write_temp("user-bad.toml", "this is not toml = = =");
        let catalog = ButtonCatalog::load_or_default(None, Some(user)).unwrap();
        assert_eq!(catalog.clear_key(), "del");
        assert_eq!(catalog.len(), 17);
    }

    #[test]
    fn test_invalid_user_catalog_falls_back() {
        let user = write_temp("user-incomplete.toml", "");
        let catalog = ButtonCatalog::load_or_default(None, Some(user)).unwrap();
        assert_eq!(catalog.len(), 17);
    }

    #[test]
    fn test_missing_user_file_falls_back() {
        let user = PathBuf::from("/nonexistent/calc-input/buttons.toml");
        let catalog = ButtonCatalog::load_or_default(None, Some(user)).unwrap();
        assert_eq!(catalog.clear_key(), "del");

        let catalog = ButtonCatalog::load_or_default(None, None).unwrap();
        assert_eq!(catalog.len(), 17);
    }

    #[test]
    fn test_missing_file() {
        let err = ButtonCatalog::load(Path::new("/nonexistent/calc-input/buttons.toml"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
