//! Per-folder navigation documents (`_Sidebar.md`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const SIDEBAR_FILE_NAME: &str = "_Sidebar.md";

/// Page slugs seen during traversal, grouped by destination folder.
///
/// Slugs keep the order they were recorded in; duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidebarIndex {
    folders: BTreeMap<PathBuf, Vec<String>>,
}

impl SidebarIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, folder: impl Into<PathBuf>, slug: impl Into<String>) {
        self.folders.entry(folder.into()).or_default().push(slug.into());
    }

    pub fn slugs(&self, folder: &Path) -> Option<&[String]> {
        self.folders.get(folder).map(Vec::as_slice)
    }

    pub fn folders(&self) -> impl Iterator<Item = (&Path, &[String])> {
        self.folders
            .iter()
            .map(|(folder, slugs)| (folder.as_path(), slugs.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}

/// A rendered sidebar and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
    pub path: PathBuf,
    pub content: String,
}

/// Renders a [`SidebarIndex`] into one navigation document per folder.
pub struct SidebarBuilder<'a> {
    output_root: &'a Path,
}

impl<'a> SidebarBuilder<'a> {
    pub fn new(output_root: &'a Path) -> Self {
        Self { output_root }
    }

    pub fn build(&self, index: &SidebarIndex) -> Vec<Sidebar> {
        index
            .folders()
            .map(|(folder, slugs)| Sidebar {
                path: folder.join(SIDEBAR_FILE_NAME),
                content: self.render(folder, slugs),
            })
            .collect()
    }

    /// Title line (skipped for the output root) followed by one bullet per slug
    pub fn render(&self, folder: &Path, slugs: &[String]) -> String {
        let mut lines = Vec::with_capacity(slugs.len() + 1);

        if folder != self.output_root {
            let name = folder
                .file_name()
                .map(|name| name.to_string_lossy())
                .unwrap_or_default();
            lines.push(clean(&name));
        }

        for slug in slugs {
            lines.push(format!("* [{}]({})", clean(slug), slug));
        }

        lines.join("\n")
    }
}

/// Human label for a slug or folder name: hyphens become spaces and only the
/// first character stays upper case.
///
/// ```
/// use site2wiki_core::sidebar::clean;
///
/// assert_eq!(clean("my-section"), "My section");
/// assert_eq!(clean("FAQ"), "Faq");
/// ```
pub fn clean(word: &str) -> String {
    let spaced = word.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
