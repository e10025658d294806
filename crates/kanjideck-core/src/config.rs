use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::graph::DeckOrder;

/// Relative location of the project config file.
pub const PROJECT_CONFIG: &str = ".kanjideck/config.toml";

/// Deck name used when neither config nor flags provide one.
pub const DEFAULT_DECK_NAME: &str = "Kanji deck";

/// Contents of one config file. Every key is optional so that a project
/// file can override a single value of the user file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub deck: DeckConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// JSON catalog index.
    pub path: Option<PathBuf>,
    /// Optional fallback dictionary.
    pub dictionary: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeckConfig {
    pub name: Option<String>,
    pub order: Option<DeckOrder>,
}

impl ConfigFile {
    /// Resolve relative paths against `base`, the directory the file's
    /// paths are meant relative to.
    #[must_use]
    pub fn rooted_at(mut self, base: &Path) -> Self {
        let root = |path: PathBuf| {
            if path.is_relative() {
                base.join(path)
            } else {
                path
            }
        };
        self.catalog.path = self.catalog.path.map(root);
        self.catalog.dictionary = self.catalog.dictionary.map(root);
        self
    }

    /// Keys set in `self` win; the rest come from `lower`.
    #[must_use]
    pub fn over(self, lower: Self) -> Self {
        Self {
            catalog: CatalogConfig {
                path: self.catalog.path.or(lower.catalog.path),
                dictionary: self.catalog.dictionary.or(lower.catalog.dictionary),
            },
            deck: DeckConfig {
                name: self.deck.name.or(lower.deck.name),
                order: self.deck.order.or(lower.deck.order),
            },
        }
    }
}

/// Settings after merging project and user config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub catalog: Option<PathBuf>,
    pub dictionary: Option<PathBuf>,
    pub deck_name: String,
    pub order: DeckOrder,
}

impl From<ConfigFile> for EffectiveConfig {
    fn from(file: ConfigFile) -> Self {
        Self {
            catalog: file.catalog.path,
            dictionary: file.catalog.dictionary,
            deck_name: file
                .deck
                .name
                .unwrap_or_else(|| DEFAULT_DECK_NAME.to_string()),
            order: file.deck.order.unwrap_or_default(),
        }
    }
}

/// Read one config file; a missing file is an empty config.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ConfigFile>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_project_config(project_root: &Path) -> Result<ConfigFile> {
    let config = load_config_file(&project_root.join(PROJECT_CONFIG))?;
    Ok(config.rooted_at(project_root))
}

pub fn load_user_config() -> Result<ConfigFile> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(ConfigFile::default());
    };

    let dir = config_dir.join("kanjideck");
    let config = load_config_file(&dir.join("config.toml"))?;
    Ok(config.rooted_at(&dir))
}

/// Project config over user config over defaults.
pub fn resolve_config(project_root: &Path) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;
    Ok(project.over(user).into())
}
