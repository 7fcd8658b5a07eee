//! Conversion options and their YAML representation.

use crate::paths::is_basename;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("replace_page_paths entry '{from}: {to}' must map a basename onto a basename")]
    InvalidRename { from: String, to: String },
}

/// Basename → replacement basename overrides.
pub type RenameMap = BTreeMap<String, String>;

/// Options controlling a conversion run (matches the site2wiki.yml schema)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Selector for the region of each page that holds its content
    #[serde(default = "default_content_selector")]
    pub content_selector: String,

    /// Selector used when `content_selector` matches nothing
    #[serde(default = "default_fall_back_content_selector")]
    pub fall_back_content_selector: String,

    /// Write a `_Sidebar.md` into every output folder holding pages
    #[serde(default)]
    pub create_sidebars: bool,

    #[serde(default)]
    pub replace_page_paths: RenameMap,

    #[serde(default)]
    pub debug: bool,
}

fn default_content_selector() -> String {
    String::from(".sites-layout-name-one-column")
}

fn default_fall_back_content_selector() -> String {
    String::from("body")
}

impl Default for Options {
    fn default() -> Self {
        Self {
            content_selector: default_content_selector(),
            fall_back_content_selector: default_fall_back_content_selector(),
            create_sidebars: false,
            replace_page_paths: RenameMap::new(),
            debug: false,
        }
    }
}

impl Options {
    /// Load options from a YAML file; missing keys take their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let options: Self = serde_yaml::from_str(contents)?;

        if let Some((from, to)) = options
            .replace_page_paths
            .iter()
            .find(|(from, to)| !is_basename(from) || !is_basename(to))
        {
            return Err(ConfigError::InvalidRename {
                from: from.clone(),
                to: to.clone(),
            });
        }
        Ok(options)
    }

    /// Add a basename override, returning the updated options
    pub fn with_rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.replace_page_paths.insert(from.into(), to.into());
        self
    }

    pub fn with_sidebars(mut self, enabled: bool) -> Self {
        self.create_sidebars = enabled;
        self
    }
}
