//! End-to-end conversion of a source tree into a wiki tree.
//!
//! Flow: Walk (once) → Pages → Assets → Sidebars (optional)
//!
//! A failure in any phase stops the run; whatever earlier phases wrote stays
//! on disk.

use crate::config::Options;
use crate::error::Result;
use crate::markdown::{HtmdConverter, MarkdownConverter};
use crate::page::PageConverter;
use crate::paths::PathMapper;
use crate::sidebar::{SidebarBuilder, SidebarIndex};
use crate::walker::{Collection, Walker};
use crate::writer::{CopyOutcome, Writer};
use std::path::{Path, PathBuf};

/// Where a [`Pipeline`] is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineState {
    Uncollected,
    Collected,
    PagesWritten,
    AssetsWritten,
    SidebarsWritten,
    Done,
}

/// Counts of what a [`Pipeline::convert`] run produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub pages_written: usize,
    pub assets_copied: usize,
    pub directories_skipped: usize,
    pub sidebars_written: usize,
}

/// Converts one source tree into one output tree.
pub struct Pipeline {
    options: Options,
    mapper: PathMapper,
    markdown: Box<dyn MarkdownConverter>,
    writer: Writer,
    state: PipelineState,
    collection: Option<Collection>,
}

impl Pipeline {
    /// Create a pipeline using the default `htmd` Markdown converter
    pub fn new(
        source_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        options: Options,
    ) -> Self {
        Self::with_converter(source_root, output_root, options, Box::new(HtmdConverter::new()))
    }

    /// Create a pipeline with a caller-supplied Markdown converter
    pub fn with_converter(
        source_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        options: Options,
        markdown: Box<dyn MarkdownConverter>,
    ) -> Self {
        let mapper = PathMapper::new(
            source_root,
            output_root,
            options.replace_page_paths.clone(),
        );
        Self {
            options,
            mapper,
            markdown,
            writer: Writer::new(),
            state: PipelineState::Uncollected,
            collection: None,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn mapper(&self) -> &PathMapper {
        &self.mapper
    }

    pub fn source_root(&self) -> &Path {
        self.mapper.source_root()
    }

    pub fn output_root(&self) -> &Path {
        self.mapper.output_root()
    }

    /// Walk the source tree, or return what the first walk found
    pub fn collect(&mut self) -> Result<&Collection> {
        let collection = self.take_collection()?;
        let collection: &Collection = self.collection.insert(collection);
        Ok(collection)
    }

    /// Move the memoized walk out of the pipeline, walking first if needed
    fn take_collection(&mut self) -> Result<Collection> {
        match self.collection.take() {
            Some(collection) => Ok(collection),
            None => {
                let collection = Walker::new(&self.mapper).walk()?;
                self.state = PipelineState::Collected;
                Ok(collection)
            }
        }
    }

    pub fn page_paths(&mut self) -> Result<&[PathBuf]> {
        Ok(self.collect()?.pages.as_slice())
    }

    pub fn asset_paths(&mut self) -> Result<&[PathBuf]> {
        Ok(self.collect()?.assets.as_slice())
    }

    pub fn sidebar_index(&mut self) -> Result<&SidebarIndex> {
        Ok(&self.collect()?.sidebars)
    }

    /// Run every phase: pages, then assets, then sidebars when enabled
    pub fn convert(&mut self) -> Result<ConversionReport> {
        self.mapper.check_renames()?;
        let collection = self.take_collection()?;
        let outcome = self.run_phases(&collection);
        self.collection = Some(collection);
        outcome
    }

    fn run_phases(&mut self, collection: &Collection) -> Result<ConversionReport> {
        let mut report = ConversionReport::default();

        report.pages_written = self.write_pages(&collection.pages)?;
        self.state = PipelineState::PagesWritten;
        tracing::info!("Wrote {} pages", report.pages_written);

        let (copied, skipped) = self.write_assets(&collection.assets)?;
        report.assets_copied = copied;
        report.directories_skipped = skipped;
        self.state = PipelineState::AssetsWritten;
        tracing::info!("Copied {} assets", report.assets_copied);

        if self.options.create_sidebars {
            report.sidebars_written = self.write_sidebars(&collection.sidebars)?;
            self.state = PipelineState::SidebarsWritten;
            tracing::info!("Wrote {} sidebars", report.sidebars_written);
        }

        self.state = PipelineState::Done;
        Ok(report)
    }

    fn write_pages(&self, pages: &[PathBuf]) -> Result<usize> {
        let converter = PageConverter::new(&self.options, &self.mapper, &*self.markdown)?;

        for page in pages {
            let markdown = converter.convert(page)?;
            let destination = self.mapper.destination_markdown_path(page)?;
            tracing::debug!("Writing {:?} -> {:?}", page, destination);

            self.writer.ensure_parent_dir(&destination)?;
            self.writer.write_text(&destination, &markdown)?;
        }

        Ok(pages.len())
    }

    fn write_assets(&self, assets: &[PathBuf]) -> Result<(usize, usize)> {
        let mut copied = 0;
        let mut skipped = 0;

        for asset in assets {
            let destination = self.mapper.destination_path(asset)?;
            self.writer.ensure_parent_dir(&destination)?;

            match self.writer.copy_asset(asset, &destination)? {
                CopyOutcome::Copied => copied += 1,
                CopyOutcome::SkippedDirectory => skipped += 1,
            }
        }

        Ok((copied, skipped))
    }

    fn write_sidebars(&self, index: &SidebarIndex) -> Result<usize> {
        let sidebars = SidebarBuilder::new(self.mapper.output_root()).build(index);

        for sidebar in &sidebars {
            self.writer.ensure_parent_dir(&sidebar.path)?;
            self.writer.write_text(&sidebar.path, &sidebar.content)?;
        }

        Ok(sidebars.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use std::fs;
    use tempfile::tempdir;

    fn site_with_pages(root: &Path) {
        fs::create_dir_all(root.join("guide")).unwrap();
        fs::write(root.join("index.html"), "<body><p>Home</p></body>").unwrap();
        fs::write(root.join("guide/setup.html"), "<body><p>Setup</p></body>").unwrap();
        fs::write(root.join("guide/logo.png"), [0u8, 1, 2, 3]).unwrap();
    }

    #[test]
    fn test_state_machine_progression() {
        let dir = tempdir().unwrap();
        let site = dir.path().join("site");
        site_with_pages(&site);

        let mut pipeline = Pipeline::new(&site, dir.path().join("wiki"), Options::default());
        assert_eq!(pipeline.state(), PipelineState::Uncollected);

        pipeline.collect().unwrap();
        assert_eq!(pipeline.state(), PipelineState::Collected);

        let report = pipeline.convert().unwrap();
        assert_eq!(pipeline.state(), PipelineState::Done);
        assert_eq!(
            report,
            ConversionReport {
                pages_written: 2,
                assets_copied: 1,
                directories_skipped: 1,
                sidebars_written: 0,
            }
        );
    }

    #[test]
    fn test_walks_only_once() {
        let dir = tempdir().unwrap();
        let site = dir.path().join("site");
        site_with_pages(&site);

        let mut pipeline = Pipeline::new(&site, dir.path().join("wiki"), Options::default());
        assert_eq!(pipeline.page_paths().unwrap().len(), 2);

        // Files added after the walk are not picked up by later phases.
        fs::write(site.join("late.html"), "<body>late</body>").unwrap();
        assert_eq!(pipeline.page_paths().unwrap().len(), 2);

        pipeline.convert().unwrap();
        assert!(!dir.path().join("wiki/late.md").exists());
    }

    #[test]
    fn test_bad_rename_fails_before_writing() {
        let dir = tempdir().unwrap();
        let site = dir.path().join("site");
        let wiki = dir.path().join("wiki");
        site_with_pages(&site);

        let options = Options::default().with_rename("index.html", "../Home.md");
        let mut pipeline = Pipeline::new(&site, &wiki, options);
        let err = pipeline.convert().unwrap_err();

        assert!(matches!(err, ConvertError::InvalidRename { .. }));
        assert_eq!(pipeline.state(), PipelineState::Uncollected);
        assert!(!wiki.exists());
        assert!(!dir.path().join("Home.md").exists());
    }

    #[test]
    fn test_sidebars_written_when_enabled() {
        let dir = tempdir().unwrap();
        let site = dir.path().join("site");
        let wiki = dir.path().join("wiki");
        site_with_pages(&site);

        let options = Options::default().with_sidebars(true);
        let mut pipeline = Pipeline::new(&site, &wiki, options);
        let report = pipeline.convert().unwrap();

        assert_eq!(report.sidebars_written, 2);
        assert_eq!(
            fs::read_to_string(wiki.join("_Sidebar.md")).unwrap(),
            "* [Index](index)"
        );
        assert_eq!(
            fs::read_to_string(wiki.join("guide/_Sidebar.md")).unwrap(),
            "Guide\n* [Setup](setup)"
        );
    }

    #[test]
    fn test_sidebar_index_filled_even_without_sidebars() {
        let dir = tempdir().unwrap();
        let site = dir.path().join("site");
        let wiki = dir.path().join("wiki");
        site_with_pages(&site);

        let mut pipeline = Pipeline::new(&site, &wiki, Options::default());
        pipeline.convert().unwrap();

        assert_eq!(pipeline.sidebar_index().unwrap().len(), 2);
        assert!(!wiki.join("_Sidebar.md").exists());
    }
}
