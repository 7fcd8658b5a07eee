//! Convert command implementation.

use anyhow::{bail, Context, Result};
use site2wiki_core::paths::is_basename;
use site2wiki_core::{Options, Pipeline};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "site2wiki.yml";

/// Command-line values layered over the loaded options
#[derive(Debug, Default)]
pub struct ConvertOverrides {
    pub content_selector: Option<String>,
    pub fallback_selector: Option<String>,
    pub sidebars: bool,
    pub renames: Vec<(String, String)>,
    pub debug: bool,
}

/// Convert `source` into `output` and report what was written
pub fn convert_site(
    config_path: Option<&Path>,
    source: &Path,
    output: &Path,
    overrides: ConvertOverrides,
) -> Result<()> {
    let options = apply_overrides(load_options(config_path)?, overrides);
    super::init_tracing(options.debug)?;

    if !source.is_dir() {
        bail!("Source directory {:?} does not exist", source);
    }

    tracing::debug!("Converting {:?} into {:?} with {:?}", source, output, options);

    let mut pipeline = Pipeline::new(source, output, options);
    let report = pipeline
        .convert()
        .with_context(|| format!("Failed to convert {:?}", source))?;

    tracing::info!(
        "Converted {} pages, copied {} assets, wrote {} sidebars into {:?}",
        report.pages_written,
        report.assets_copied,
        report.sidebars_written,
        output
    );
    Ok(())
}

/// Explicit `--config` must exist; otherwise `site2wiki.yml` is used when present
fn load_options(config_path: Option<&Path>) -> Result<Options> {
    match config_path {
        Some(path) => Options::from_file(path)
            .with_context(|| format!("Failed to load configuration from {:?}", path)),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                Options::from_file(default_path).context("Failed to load configuration")
            } else {
                Ok(Options::default())
            }
        }
    }
}

fn apply_overrides(mut options: Options, overrides: ConvertOverrides) -> Options {
    if let Some(selector) = overrides.content_selector {
        options.content_selector = selector;
    }
    if let Some(selector) = overrides.fallback_selector {
        options.fall_back_content_selector = selector;
    }
    options.create_sidebars |= overrides.sidebars;
    options.debug |= overrides.debug;
    for (from, to) in overrides.renames {
        options = options.with_rename(from, to);
    }
    options
}

/// Parse a `FROM=TO` rename argument
pub fn parse_rename(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((from, to)) if is_basename(from) && is_basename(to) => {
            Ok((from.to_string(), to.to_string()))
        }
        _ => Err(format!("expected FROM=TO with two basenames, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rename() {
        assert_eq!(
            parse_rename("index.html=Home.md").unwrap(),
            ("index.html".to_string(), "Home.md".to_string())
        );
        assert!(parse_rename("index.html").is_err());
        assert!(parse_rename("=Home.md").is_err());
        assert!(parse_rename("index.html=docs/Home.md").is_err());
        assert!(parse_rename("index.html=../Home.md").is_err());
        assert!(parse_rename("index.html=..").is_err());
    }

    #[test]
    fn test_overrides_layer_over_file_options() {
        let base = Options {
            content_selector: "#from-file".into(),
            create_sidebars: true,
            ..Options::default()
        }
        .with_rename("a.html", "b.md");

        let options = apply_overrides(
            base,
            ConvertOverrides {
                fallback_selector: Some("main".into()),
                renames: vec![("index.html".into(), "Home.md".into())],
                ..ConvertOverrides::default()
            },
        );

        assert_eq!(options.content_selector, "#from-file");
        assert_eq!(options.fall_back_content_selector, "main");
        assert!(options.create_sidebars);
        assert_eq!(options.replace_page_paths.len(), 2);
        assert!(!options.debug);
    }
}
