//! Content selection and anchor rewriting over a parsed page.
//!
//! Anchor `href`s are rewritten in the parsed tree itself; serialization is
//! left to scraper.

use crate::error::{ConvertError, Result};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector, StrTendril};
use std::borrow::Cow;

pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|err| ConvertError::InvalidSelector {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

/// First element in `document` matching `selector`
pub fn select_first<'a>(document: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
    document.select(selector).next()
}

/// Turn a same-site page link into a bare wiki link.
///
/// Links ending in `.html` without a query string become the file stem;
/// everything else is returned unchanged.
///
/// ```
/// use site2wiki_core::html::rewrite_href;
///
/// assert_eq!(rewrite_href("../guide/setup.html"), "setup");
/// assert_eq!(rewrite_href("search.html?q=rust"), "search.html?q=rust");
/// assert_eq!(rewrite_href("notes.html#top"), "notes.html#top");
/// ```
pub fn rewrite_href(href: &str) -> Cow<'_, str> {
    if !href.ends_with(".html") || href.contains('?') {
        return Cow::Borrowed(href);
    }

    let name = href.rsplit('/').next().unwrap_or(href);
    match name.strip_suffix(".html") {
        Some(stem) if !stem.is_empty() => Cow::Borrowed(stem),
        _ => Cow::Borrowed(name),
    }
}

/// Inner HTML of the first element matching `selector`, with the `href` of
/// every anchor inside it passed through [`rewrite_href`].
///
/// Only unprefixed `href` attributes are touched; `xlink:href` and friends
/// keep their value. Returns `None` when nothing matches.
pub fn content_with_wiki_links(document: &mut Html, selector: &Selector) -> Option<String> {
    let (content, anchors) = {
        let content = select_first(document, selector)?;
        let anchors: Vec<_> = content
            .descendants()
            .filter(|node| {
                node.value()
                    .as_element()
                    .is_some_and(|element| element.name() == "a")
            })
            .map(|node| node.id())
            .collect();
        (content.id(), anchors)
    };

    for id in anchors {
        let Some(mut node) = document.tree.get_mut(id) else {
            continue;
        };
        let Node::Element(element) = node.value() else {
            continue;
        };

        for (name, value) in element.attrs.iter_mut() {
            if name.prefix.is_some() || &*name.local != "href" {
                continue;
            }
            let rewritten = match rewrite_href(value) {
                Cow::Borrowed(href) if href != &**value => StrTendril::from_slice(href),
                _ => continue,
            };
            *value = rewritten;
        }
    }

    document
        .tree
        .get(content)
        .and_then(ElementRef::wrap)
        .map(|element| element.inner_html())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_of(source: &str, selector: &str) -> String {
        let mut document = Html::parse_document(source);
        let selector = parse_selector(selector).unwrap();
        content_with_wiki_links(&mut document, &selector).unwrap()
    }

    #[test]
    fn test_rewrite_href() {
        assert_eq!(rewrite_href("foo.html"), "foo");
        assert_eq!(rewrite_href("a/b/foo.html"), "foo");
        assert_eq!(rewrite_href("foo.html?x=1"), "foo.html?x=1");
        assert_eq!(rewrite_href("foo.HTML"), "foo.HTML");
        assert_eq!(rewrite_href("image.png"), "image.png");
        assert_eq!(rewrite_href(".html"), ".html");
    }

    #[test]
    fn test_anchors_are_rewritten() {
        let html = content_of(
            r#"<html><body><div id="main"><p>See <a href="guide/setup.html">setup</a> and <a href="find.html?q=1">search</a>.</p></div></body></html>"#,
            "#main",
        );

        assert_eq!(
            html,
            r#"<p>See <a href="setup">setup</a> and <a href="find.html?q=1">search</a>.</p>"#
        );
    }

    #[test]
    fn test_anchors_outside_content_are_untouched() {
        let mut document = Html::parse_document(
            r#"<body><nav><a href="index.html">home</a></nav><main><a href="a.html">a</a></main></body>"#,
        );
        let selector = parse_selector("main").unwrap();
        let html = content_with_wiki_links(&mut document, &selector).unwrap();
        assert_eq!(html, r#"<a href="a">a</a>"#);

        let nav = parse_selector("nav").unwrap();
        let nav = select_first(&document, &nav).unwrap();
        assert_eq!(nav.inner_html(), r#"<a href="index.html">home</a>"#);
    }

    #[test]
    fn test_raw_text_elements_survive() {
        let html = content_of(
            "<body><iframe><b>x</b></iframe><xmp><b>y</b></xmp><p>1 &lt; 2 &amp; 3</p></body>",
            "body",
        );

        assert_eq!(
            html,
            "<iframe><b>x</b></iframe><xmp><b>y</b></xmp><p>1 &lt; 2 &amp; 3</p>"
        );
    }

    #[test]
    fn test_prefixed_href_is_preserved() {
        let html = content_of(
            r#"<body><svg><a xlink:href="a.html"><text>a</text></a></svg></body>"#,
            "body",
        );

        assert!(html.contains(r#"xlink:href="a.html""#), "{html}");
    }

    #[test]
    fn test_missing_match_is_none() {
        let mut document = Html::parse_document("<body><p>hi</p></body>");
        let selector = parse_selector(".sites-layout-name-one-column").unwrap();
        assert!(select_first(&document, &selector).is_none());
        assert!(content_with_wiki_links(&mut document, &selector).is_none());
    }

    #[test]
    fn test_invalid_selector() {
        let err = parse_selector("div[").unwrap_err();
        assert!(matches!(err, ConvertError::InvalidSelector { .. }));
    }
}
