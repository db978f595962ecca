//! Page content model for Philosophy Walk
//!
//! A fetched article goes through two stages:
//!
//! 1. `parse_article` turns the HTML of the article body into a flat
//!    [`Markup`] stream: text, links, open/close markers for italic
//!    and parenthesized spans, and block ends.
//! 2. [`annotate`] makes a single forward pass over that stream and
//!    produces a [`PageContent`], where every node carries the
//!    [`StyleFlags`] of its position.
//!
//! Keeping the stages apart lets the link selector be tested on
//! hand-built marker sequences without any HTML.

mod node;
mod parser;

pub use node::{annotate, ContentNode, Markup, PageContent, StyleFlags};
pub use parser::{article_markup, parse_article, split_parentheses};
