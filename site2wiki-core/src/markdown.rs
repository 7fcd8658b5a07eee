//! HTML fragment to Markdown conversion.

use htmd::HtmlToMarkdown;

/// Converts an HTML fragment into Markdown text.
pub trait MarkdownConverter {
    fn to_markdown(&self, html: &str) -> std::io::Result<String>;
}

/// Default converter backed by `htmd`; script and style contents are dropped.
pub struct HtmdConverter {
    inner: HtmlToMarkdown,
}

impl HtmdConverter {
    pub fn new() -> Self {
        Self {
            inner: HtmlToMarkdown::builder()
                .skip_tags(vec!["script", "style"])
                .build(),
        }
    }
}

impl Default for HtmdConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownConverter for HtmdConverter {
    fn to_markdown(&self, html: &str) -> std::io::Result<String> {
        self.inner.convert(html)
    }
}
