//! Article body parser
//!
//! This module turns a rendered Wikipedia article into a [`Markup`] stream:
//! - Only the article body is read (not navigation, sidebars or footers)
//! - Boxes, tables, hatnotes, thumbnails and reference markers are skipped
//! - `<i>`/`<em>` produce italic open/close markers, as do links whose
//!   whole text is italic
//! - `(` and `)` in running text produce parenthesis markers
//! - Paragraphs, list items and headings end with a block marker
//! - Anchors pointing at same-host articles become links; every other
//!   anchor only contributes its text

use crate::content::{annotate, Markup, PageContent};
use crate::title::PageId;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Candidate containers for the article body, most specific first
const BODY_SELECTORS: &[&str] = &[
    "#mw-content-text .mw-parser-output",
    "#mw-content-text",
    ".mw-body-content",
    "body",
];

/// Elements whose whole subtree is ignored
const SKIPPED_TAGS: &[&str] = &[
    "table", "sup", "style", "script", "noscript", "figure", "img", "math", "link", "meta",
];

/// Classes marking non-prose blocks inside the body
const SKIPPED_CLASSES: &[&str] = &[
    "infobox",
    "navbox",
    "vertical-navbox",
    "sidebar",
    "hatnote",
    "dablink",
    "thumb",
    "metadata",
    "ambox",
    "noprint",
    "mw-editsection",
    "reference",
    "reflist",
    "mw-references-wrap",
    "shortdescription",
    "toc",
    "mw-empty-elt",
];

const SKIPPED_IDS: &[&str] = &["coordinates", "toc"];

const ITALIC_TAGS: &[&str] = &["i", "em"];

/// Elements after which an unclosed parenthesis no longer applies
const BLOCK_TAGS: &[&str] = &[
    "p", "li", "dd", "dt", "blockquote", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Parses an article and annotates its body
///
/// # Arguments
///
/// * `html` - The rendered article HTML
/// * `base_url` - The URL the article was served from, for resolving links
///
/// # Example
///
/// ```
/// use philosophy_walk::content::parse_article;
/// use url::Url;
///
/// let html = r#"<html><body><div id="mw-content-text"><div class="mw-parser-output">
///     <p><i><a href="/wiki/Italic_link">x</a></i> (see <a href="/wiki/Aside">aside</a>)
///     is a <a href="/wiki/Game">game</a>.</p>
/// </div></div></body></html>"#;
/// let base = Url::parse("https://en.wikipedia.org/wiki/Sport").unwrap();
/// let content = parse_article(html, &base);
/// let plain: Vec<&str> = content
///     .links()
///     .filter(|n| n.flags().is_plain())
///     .filter_map(|n| n.target().map(|t| t.as_str()))
///     .collect();
/// assert_eq!(plain, vec!["Game"]);
/// ```
pub fn parse_article(html: &str, base_url: &Url) -> PageContent {
    let document = Html::parse_document(html);
    let content = annotate(&body_markup(&document, base_url));

    match served_title(&document, base_url) {
        Some(title) => content.with_title(title),
        None => content,
    }
}

/// Extracts the markup stream of the article body without annotating it
pub fn article_markup(html: &str, base_url: &Url) -> Vec<Markup> {
    body_markup(&Html::parse_document(html), base_url)
}

fn body_markup(document: &Html, base_url: &Url) -> Vec<Markup> {
    let mut markup = Vec::new();

    match find_body(document) {
        Some(body) => walk(body, base_url, &mut markup),
        None => tracing::debug!("No article body found in {}", base_url),
    }

    markup
}

/// Splits running text into text segments and parenthesis markers
///
/// # Example
///
/// ```
/// use philosophy_walk::content::{split_parentheses, Markup};
///
/// assert_eq!(
///     split_parentheses("a (b) c"),
///     vec![
///         Markup::text("a "),
///         Markup::ParenOpen,
///         Markup::text("b"),
///         Markup::ParenClose,
///         Markup::text(" c"),
///     ]
/// );
/// ```
pub fn split_parentheses(text: &str) -> Vec<Markup> {
    let mut markup = Vec::new();
    push_text(text, &mut markup);
    markup
}

/// Title the page was served under: the canonical link if it names an
/// article on the same wiki, else the article path of `base_url`
fn served_title(document: &Html, base_url: &Url) -> Option<PageId> {
    canonical_title(document, base_url).or_else(|| PageId::from_href(base_url.as_str(), base_url))
}

fn canonical_title(document: &Html, base_url: &Url) -> Option<PageId> {
    let selector = Selector::parse(r#"link[rel="canonical"]"#).ok()?;
    let href = document.select(&selector).next()?.value().attr("href")?;
    PageId::from_href(href, base_url)
}

fn find_body(document: &Html) -> Option<ElementRef<'_>> {
    BODY_SELECTORS.iter().find_map(|css| {
        let selector = Selector::parse(css).ok()?;
        document.select(&selector).next()
    })
}

fn walk(element: ElementRef<'_>, base_url: &Url, markup: &mut Vec<Markup>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_text(text, markup),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    visit_element(child, base_url, markup);
                }
            }
            _ => {}
        }
    }
}

fn visit_element(element: ElementRef<'_>, base_url: &Url, markup: &mut Vec<Markup>) {
    if is_skipped(element) {
        return;
    }

    let name = element.value().name();

    if name == "a" {
        let target = element
            .value()
            .attr("href")
            .and_then(|href| PageId::from_href(href, base_url));

        if let Some(target) = target {
            let text = collapse_whitespace(&element.text().collect::<String>());
            let italic = has_only_italic_text(element);
            if italic {
                markup.push(Markup::ItalicOpen);
            }
            markup.push(Markup::Link { target, text });
            if italic {
                markup.push(Markup::ItalicClose);
            }
            return;
        }
    }

    let italic = ITALIC_TAGS.contains(&name);
    if italic {
        markup.push(Markup::ItalicOpen);
    }

    walk(element, base_url, markup);

    if italic {
        markup.push(Markup::ItalicClose);
    }

    if BLOCK_TAGS.contains(&name) {
        markup.push(Markup::BlockEnd);
    }
}

/// True if the element has visible text and all of it sits inside `<i>`/`<em>`
fn has_only_italic_text(element: ElementRef<'_>) -> bool {
    let mut seen_text = false;
    italic_text_only(element, false, &mut seen_text) && seen_text
}

fn italic_text_only(element: ElementRef<'_>, italic: bool, seen_text: &mut bool) -> bool {
    element.children().all(|child| match child.value() {
        Node::Text(text) if text.trim().is_empty() => true,
        Node::Text(_) => {
            *seen_text = true;
            italic
        }
        Node::Element(_) => ElementRef::wrap(child).map_or(true, |child| {
            let italic = italic || ITALIC_TAGS.contains(&child.value().name());
            italic_text_only(child, italic, seen_text)
        }),
        _ => true,
    })
}

fn is_skipped(element: ElementRef<'_>) -> bool {
    let value = element.value();

    SKIPPED_TAGS.contains(&value.name())
        || value.classes().any(|class| SKIPPED_CLASSES.contains(&class))
        || value.id().map_or(false, |id| SKIPPED_IDS.contains(&id))
}

fn push_text(text: &str, markup: &mut Vec<Markup>) {
    let mut segment = String::new();

    for c in text.chars() {
        let marker = match c {
            '(' => Markup::ParenOpen,
            ')' => Markup::ParenClose,
            _ => {
                segment.push(c);
                continue;
            }
        };

        if !segment.is_empty() {
            markup.push(Markup::Text(std::mem::take(&mut segment)));
        }
        markup.push(marker);
    }

    if !segment.is_empty() {
        markup.push(Markup::Text(segment));
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
