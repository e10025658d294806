pub mod build;
pub mod completions;
pub mod explain;

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use kanjideck_catalog::{Catalog, CatalogError, JsonDictionary};
use kanjideck_core::config::{EffectiveConfig, resolve_config};
use kanjideck_core::error::ErrorCode;
use tracing::info;

use crate::output::{CodedError, WithCode};

/// Catalog and dictionary flags shared by every command that reads the
/// catalog. Flags win over config.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// JSON catalog index (`character_lookup` + `subjects`).
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Fallback dictionary for words missing from the catalog.
    #[arg(long, value_name = "PATH")]
    pub dictionary: Option<PathBuf>,
}

/// Project config merged with user config.
pub fn load_config(project_root: &Path) -> Result<EffectiveConfig> {
    resolve_config(project_root).with_code(ErrorCode::ConfigParseError)
}

fn catalog_error(err: CatalogError, fallback: ErrorCode) -> anyhow::Error {
    let code = match err.code() {
        ErrorCode::CatalogParseError => fallback,
        code => code,
    };
    CodedError {
        code,
        source: err.into(),
    }
    .into()
}

/// Load the catalog, attaching the fallback dictionary when one is set.
pub fn open_catalog(args: &CatalogArgs, config: &EffectiveConfig) -> Result<Catalog> {
    let path = args
        .catalog
        .clone()
        .or_else(|| config.catalog.clone())
        .ok_or_else(|| anyhow!("no catalog configured"))
        .with_code(ErrorCode::CatalogNotFound)?;

    let catalog = Catalog::from_path(&path)
        .map_err(|err| catalog_error(err, ErrorCode::CatalogParseError))?;
    info!(path = %path.display(), subjects = catalog.len(), "catalog loaded");

    let Some(dictionary_path) = args.dictionary.clone().or_else(|| config.dictionary.clone())
    else {
        return Ok(catalog);
    };
    let dictionary = JsonDictionary::from_path(&dictionary_path)
        .map_err(|err| catalog_error(err, ErrorCode::DictionaryParseError))?;
    info!(path = %dictionary_path.display(), entries = dictionary.len(), "dictionary loaded");

    Ok(catalog.with_dictionary(dictionary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::CliError;
    use kanjideck_core::DeckOrder;
    use tempfile::TempDir;

    fn config(catalog: Option<PathBuf>) -> EffectiveConfig {
        EffectiveConfig {
            catalog,
            dictionary: None,
            deck_name: "Test".to_string(),
            order: DeckOrder::Riffled,
        }
    }

    #[test]
    fn missing_catalog_setting_is_not_found() {
        let err = open_catalog(&CatalogArgs::default(), &config(None)).unwrap_err();
        assert_eq!(CliError::from(&err).error_code.as_deref(), Some("E1002"));
    }

    #[test]
    fn flag_overrides_config() {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("catalog.json");
        std::fs::write(&catalog, r#"{"character_lookup": {}, "subjects": {}}"#).unwrap();

        let args = CatalogArgs {
            catalog: Some(catalog),
            dictionary: None,
        };
        let loaded = open_catalog(&args, &config(Some(dir.path().join("missing.json")))).unwrap();
        assert!(loaded.is_empty());
        assert!(!loaded.has_dictionary());
    }

    #[test]
    fn unreadable_catalog_has_catalog_code() {
        let dir = TempDir::new().unwrap();
        let args = CatalogArgs {
            catalog: Some(dir.path().to_path_buf()),
            dictionary: None,
        };
        let err = open_catalog(&args, &config(None)).unwrap_err();
        let cli = CliError::from(&err);
        assert_eq!(cli.error_code.as_deref(), Some("E1005"));
        assert!(!cli.suggestion.unwrap_or_default().contains("source file"));
    }

    #[test]
    fn bad_dictionary_has_its_own_code() {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("catalog.json");
        let dictionary = dir.path().join("dictionary.json");
        std::fs::write(&catalog, r#"{"character_lookup": {}, "subjects": {}}"#).unwrap();
        std::fs::write(&dictionary, "not json").unwrap();

        let args = CatalogArgs {
            catalog: Some(catalog),
            dictionary: Some(dictionary),
        };
        let err = open_catalog(&args, &config(None)).unwrap_err();
        assert_eq!(CliError::from(&err).error_code.as_deref(), Some("E1004"));
    }
}
