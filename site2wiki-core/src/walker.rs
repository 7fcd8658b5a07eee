//! Source tree traversal and page/asset classification.

use crate::error::Result;
use crate::paths::{file_stem, has_html_extension, PathMapper};
use crate::sidebar::SidebarIndex;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Everything a single traversal of the source tree found
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// HTML files, in traversal order
    pub pages: Vec<PathBuf>,
    /// Every other entry (files and directories), in traversal order
    pub assets: Vec<PathBuf>,
    pub sidebars: SidebarIndex,
}

/// Walks a source root once and classifies what it finds.
pub struct Walker<'a> {
    mapper: &'a PathMapper,
}

impl<'a> Walker<'a> {
    pub fn new(mapper: &'a PathMapper) -> Self {
        Self { mapper }
    }

    /// Depth-first, name-sorted walk of the source root.
    ///
    /// Every page is also recorded into the sidebar index under its
    /// destination folder, whether or not sidebars end up being written.
    pub fn walk(&self) -> Result<Collection> {
        let mut collection = Collection::default();

        for entry in WalkDir::new(self.mapper.source_root())
            .min_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type().is_file() && has_html_extension(path) {
                self.record_page(&mut collection, path.to_path_buf())?;
            } else {
                collection.assets.push(path.to_path_buf());
            }
        }

        tracing::info!(
            "Found {} pages and {} other entries",
            collection.pages.len(),
            collection.assets.len()
        );

        Ok(collection)
    }

    fn record_page(&self, collection: &mut Collection, path: PathBuf) -> Result<()> {
        let destination = self.mapper.destination_path(&path)?;
        let folder = destination
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| self.mapper.output_root().to_path_buf());

        collection.sidebars.record(folder, file_stem(&path));
        collection.pages.push(path);
        Ok(())
    }
}
