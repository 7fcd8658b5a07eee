//! Mapping of source paths onto the output tree.

use crate::config::RenameMap;
use crate::error::{ConvertError, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Maps paths under a source root onto the matching paths under an output root.
///
/// Basename overrides only ever touch the trailing path segment; intermediate
/// directories are mapped unchanged.
#[derive(Debug, Clone)]
pub struct PathMapper {
    source_root: PathBuf,
    output_root: PathBuf,
    renames: RenameMap,
}

impl PathMapper {
    pub fn new(
        source_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        renames: RenameMap,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            output_root: output_root.into(),
            renames,
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Reject any basename override whose name or replacement is not a plain basename
    pub fn check_renames(&self) -> Result<()> {
        match self
            .renames
            .iter()
            .find(|(from, to)| !is_basename(from) || !is_basename(to))
        {
            Some((from, to)) => Err(ConvertError::InvalidRename {
                from: from.clone(),
                to: to.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Path of `source` relative to the source root
    pub fn relative_path<'a>(&self, source: &'a Path) -> Result<&'a Path> {
        source
            .strip_prefix(&self.source_root)
            .map_err(|_| ConvertError::OutsideSourceRoot {
                path: source.to_path_buf(),
                root: self.source_root.clone(),
            })
    }

    /// Destination of `source` under the output root, with any basename override applied.
    pub fn destination_path(&self, source: &Path) -> Result<PathBuf> {
        let relative = self.relative_path(source)?;
        let mut destination = self.output_root.join(relative);

        if relative.as_os_str().is_empty() {
            return Ok(destination);
        }

        if let Some((name, replacement)) = source
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| self.renames.get_key_value(name))
        {
            if !is_basename(replacement) {
                return Err(ConvertError::InvalidRename {
                    from: name.clone(),
                    to: replacement.clone(),
                });
            }
            tracing::debug!("Replacing {:?} with {:?}", name, replacement);
            destination.set_file_name(replacement);
        }

        Ok(destination)
    }

    /// Destination of a page: `destination_path` with an `.html`/`.htm` extension swapped for `.md`.
    pub fn destination_markdown_path(&self, source: &Path) -> Result<PathBuf> {
        let mut destination = self.destination_path(source)?;
        if has_html_extension(&destination) {
            destination.set_extension("md");
        }
        Ok(destination)
    }
}

/// Whether the path carries an `html` or `htm` extension (ASCII case-insensitive)
pub fn has_html_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
        .unwrap_or(false)
}

/// Whether `name` is a single path segment, so joining it never leaves its directory.
///
/// ```
/// use site2wiki_core::paths::is_basename;
///
/// assert!(is_basename("Home.md"));
/// assert!(!is_basename("../Home.md"));
/// assert!(!is_basename("docs/Home.md"));
/// assert!(!is_basename(".."));
/// assert!(!is_basename(""));
/// ```
pub fn is_basename(name: &str) -> bool {
    Path::new(name).file_name() == Some(OsStr::new(name))
}

/// Basename without its final extension
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
