//! Conversion of a single HTML page into wiki Markdown.

use crate::config::Options;
use crate::error::{ConvertError, Result};
use crate::html::{content_with_wiki_links, parse_selector};
use crate::markdown::MarkdownConverter;
use crate::paths::{file_stem, PathMapper};
use scraper::{Html, Selector};
use std::fs;
use std::path::{Component, Path};

/// Converts pages of one source tree, with the selectors parsed once up front.
pub struct PageConverter<'a> {
    mapper: &'a PathMapper,
    markdown: &'a dyn MarkdownConverter,
    content_selector: Selector,
    fall_back_selector: Selector,
    options: &'a Options,
}

impl<'a> PageConverter<'a> {
    pub fn new(
        options: &'a Options,
        mapper: &'a PathMapper,
        markdown: &'a dyn MarkdownConverter,
    ) -> Result<Self> {
        Ok(Self {
            mapper,
            markdown,
            content_selector: parse_selector(&options.content_selector)?,
            fall_back_selector: parse_selector(&options.fall_back_content_selector)?,
            options,
        })
    }

    /// Read `page` from disk and convert it
    pub fn convert(&self, page: &Path) -> Result<String> {
        let bytes = fs::read(page).map_err(|err| ConvertError::io(page, err))?;
        self.convert_source(page, &String::from_utf8_lossy(&bytes))
    }

    /// Convert already-loaded page markup; `page` locates it in the source tree
    pub fn convert_source(&self, page: &Path, source: &str) -> Result<String> {
        let mut document = Html::parse_document(source);

        let html = match content_with_wiki_links(&mut document, &self.content_selector) {
            Some(html) => html,
            None => {
                tracing::debug!(
                    "Content not found for {:?}, converting '{}' instead",
                    page,
                    self.options.fall_back_content_selector
                );
                content_with_wiki_links(&mut document, &self.fall_back_selector).ok_or_else(
                    || ConvertError::ContentNotFound {
                        path: page.to_path_buf(),
                        selector: self.options.content_selector.clone(),
                        fall_back: self.options.fall_back_content_selector.clone(),
                    },
                )?
            }
        };

        let markdown = self
            .markdown
            .to_markdown(&html)
            .map_err(|source| ConvertError::Markdown {
                path: page.to_path_buf(),
                source,
            })?;

        self.substitute_self_references(page, markdown)
    }

    /// Point `<stem>/` references at the page's own location in the wiki.
    ///
    /// A page `a/Foo.html` that links into `Foo/...` gets those links
    /// rewritten to `a/Foo/...`. Only tokens not already preceded by a word or
    /// path character are touched.
    fn substitute_self_references(&self, page: &Path, markdown: String) -> Result<String> {
        let filename = file_stem(page);
        if filename.is_empty() {
            return Ok(markdown);
        }

        let relative = self.mapper.relative_path(page)?.with_extension("");
        let mut replace = wiki_path(&relative);
        replace.push('/');

        let token = format!("{filename}/");
        if replace == token {
            return Ok(markdown);
        }

        Ok(replace_token(&markdown, &token, &replace))
    }
}

/// Replace each `token` in `text` that does not directly follow a word or path character
fn replace_token(text: &str, token: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for (start, _) in text.match_indices(token) {
        let bounded = text[..start]
            .chars()
            .next_back()
            .map_or(true, |prev| !(prev.is_alphanumeric() || "_./-".contains(prev)));
        if bounded {
            out.push_str(&text[last..start]);
            out.push_str(replacement);
            last = start + token.len();
        }
    }

    out.push_str(&text[last..]);
    out
}

/// `/`-joined form of a relative path, whatever the platform separator
fn wiki_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
