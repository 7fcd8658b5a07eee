//! Materializing converted output on disk.

use crate::error::{ConvertError, Result};
use std::fs;
use std::path::Path;

/// What [`Writer::copy_asset`] did with an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    SkippedDirectory,
}

/// Blocking filesystem writes for the output tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct Writer;

impl Writer {
    pub fn new() -> Self {
        Self
    }

    /// Create every missing directory above `destination`
    pub fn ensure_parent_dir(&self, destination: &Path) -> Result<()> {
        match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|err| ConvertError::io(parent, err))
            }
            _ => Ok(()),
        }
    }

    /// Write `content` to `destination`, replacing any existing file
    pub fn write_text(&self, destination: &Path, content: &str) -> Result<()> {
        fs::write(destination, content).map_err(|err| ConvertError::io(destination, err))
    }

    /// Byte-for-byte copy of a file; directories are skipped.
    pub fn copy_asset(&self, source: &Path, destination: &Path) -> Result<CopyOutcome> {
        if source.is_dir() {
            return Ok(CopyOutcome::SkippedDirectory);
        }

        match fs::copy(source, destination) {
            Ok(_) => Ok(CopyOutcome::Copied),
            Err(error) => {
                tracing::debug!("Copy failed: source {:?}", source);
                tracing::debug!("Copy failed: destination {:?}", destination);
                Err(ConvertError::AssetCopy {
                    source_path: source.to_path_buf(),
                    destination: destination.to_path_buf(),
                    error,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_parent_dir_creates_chain() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("a/b/c/page.md");

        Writer::new().ensure_parent_dir(&target).unwrap();
        assert!(dir.path().join("a/b/c").is_dir());

        // Already present is fine
        Writer::new().ensure_parent_dir(&target).unwrap();
    }

    #[test]
    fn test_write_text_overwrites() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("page.md");
        let writer = Writer::new();

        writer.write_text(&target, "first version").unwrap();
        writer.write_text(&target, "second").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
    }

    #[test]
    fn test_copy_asset_is_byte_identical() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("logo.bin");
        let bytes: Vec<u8> = (0..=255u8).rev().collect();
        fs::write(&source, &bytes).unwrap();

        let destination = dir.path().join("copy.bin");
        let outcome = Writer::new().copy_asset(&source, &destination).unwrap();

        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(fs::read(&destination).unwrap(), bytes);
    }

    #[test]
    fn test_copy_asset_skips_directories() {
        let dir = tempdir().unwrap();
        let outcome = Writer::new()
            .copy_asset(dir.path(), &dir.path().join("elsewhere"))
            .unwrap();

        assert_eq!(outcome, CopyOutcome::SkippedDirectory);
        assert!(!dir.path().join("elsewhere").exists());
    }

    #[test]
    fn test_copy_failure_reports_both_paths() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("missing.png");
        let destination = dir.path().join("out/missing.png");

        let err = Writer::new().copy_asset(&source, &destination).unwrap_err();
        match err {
            ConvertError::AssetCopy {
                source_path,
                destination: dest,
                ..
            } => {
                assert_eq!(source_path, source);
                assert_eq!(dest, destination);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
