//! Init command implementation.

use super::convert::DEFAULT_CONFIG_FILE;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# site2wiki configuration

# Region of each page that holds its content
content_selector: ".sites-layout-name-one-column"

# Used when content_selector matches nothing
fall_back_content_selector: "body"

# Write a _Sidebar.md into every folder holding pages
create_sidebars: false

# Basename overrides applied to output paths
replace_page_paths:
  index.html: Home.md

debug: false
"#;

/// Write a starter config into `path` (or the current directory)
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    let config_path = root.join(DEFAULT_CONFIG_FILE);
    if config_path.exists() {
        println!("{} already exists at {:?}", DEFAULT_CONFIG_FILE, config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("✓ Created {:?}", config_path);
    Ok(())
}
