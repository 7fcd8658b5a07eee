//! # site2wiki-core
//!
//! Core library for converting an exported static site into a wiki tree.
//!
//! HTML pages become Markdown documents with wiki-style links, every other
//! file is copied verbatim, and each output folder can get a `_Sidebar.md`
//! listing its pages.

pub mod config;
pub mod error;
pub mod html;
pub mod markdown;
pub mod page;
pub mod paths;
pub mod pipeline;
pub mod sidebar;
pub mod walker;
pub mod writer;

pub use config::{ConfigError, Options, RenameMap};
pub use error::{ConvertError, Result};
pub use markdown::{HtmdConverter, MarkdownConverter};
pub use page::PageConverter;
pub use paths::PathMapper;
pub use pipeline::{ConversionReport, Pipeline, PipelineState};
pub use sidebar::{Sidebar, SidebarBuilder, SidebarIndex};
pub use walker::{Collection, Walker};
pub use writer::{CopyOutcome, Writer};
