use crate::title::PageId;

/// One token of an article body, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Text(String),
    Link { target: PageId, text: String },
    ItalicOpen,
    ItalicClose,
    ParenOpen,
    ParenClose,
    /// End of a paragraph or list item; parentheses do not carry past it
    BlockEnd,
}

impl Markup {
    /// Shorthand for a link token whose text is the target's title
    pub fn link(target: PageId) -> Self {
        let text = target.display_title();
        Self::Link { target, text }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// Style context of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleFlags {
    /// Inside at least one italic span
    pub italic: bool,
    /// Inside at least one parenthetical span
    pub parenthesized: bool,
}

impl StyleFlags {
    /// Returns true if the node sits in plain running text
    pub fn is_plain(&self) -> bool {
        !self.italic && !self.parenthesized
    }
}

/// A text or link node with the style flags of its position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    Text {
        text: String,
        flags: StyleFlags,
    },
    Link {
        target: PageId,
        text: String,
        flags: StyleFlags,
    },
}

impl ContentNode {
    pub fn flags(&self) -> StyleFlags {
        match self {
            Self::Text { flags, .. } | Self::Link { flags, .. } => *flags,
        }
    }

    /// Returns the link target, if this is a link node
    pub fn target(&self) -> Option<&PageId> {
        match self {
            Self::Link { target, .. } => Some(target),
            Self::Text { .. } => None,
        }
    }
}

/// The annotated body of one fetched article
///
/// Produced fresh for every fetch and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    nodes: Vec<ContentNode>,
    title: Option<PageId>,
}

impl PageContent {
    pub fn new(nodes: Vec<ContentNode>) -> Self {
        Self { nodes, title: None }
    }

    /// Records the title the page was actually served under
    pub fn with_title(mut self, title: PageId) -> Self {
        self.title = Some(title);
        self
    }

    /// The title the page was served under, when the source reports one
    ///
    /// Differs from the requested title when the request was redirected.
    pub fn title(&self) -> Option<&PageId> {
        self.title.as_ref()
    }

    pub fn nodes(&self) -> &[ContentNode] {
        &self.nodes
    }

    /// Iterates over the link nodes in document order
    pub fn links(&self) -> impl Iterator<Item = &ContentNode> {
        self.nodes.iter().filter(|n| n.target().is_some())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl From<Vec<Markup>> for PageContent {
    fn from(markup: Vec<Markup>) -> Self {
        annotate(&markup)
    }
}

/// Computes style flags for a markup stream
///
/// One forward scan with an italic depth and a parenthesis depth. A node is
/// italic if the italic depth is above zero at its position, and likewise
/// for parentheses, so nesting of any depth is covered. A close marker at
/// depth zero is unbalanced markup; the depth stays at zero. A block end
/// resets the parenthesis depth.
///
/// # Examples
///
/// ```
/// use philosophy_walk::content::{annotate, Markup};
/// use philosophy_walk::title::PageId;
///
/// let content = annotate(&[
///     Markup::ItalicOpen,
///     Markup::link(PageId::parse("B").unwrap()),
///     Markup::ItalicClose,
///     Markup::link(PageId::parse("C").unwrap()),
/// ]);
/// let flags: Vec<bool> = content.links().map(|n| n.flags().italic).collect();
/// assert_eq!(flags, vec![true, false]);
/// ```
pub fn annotate(markup: &[Markup]) -> PageContent {
    let mut italic_depth: u32 = 0;
    let mut paren_depth: u32 = 0;
    let mut nodes = Vec::with_capacity(markup.len());

    for token in markup {
        let flags = StyleFlags {
            italic: italic_depth > 0,
            parenthesized: paren_depth > 0,
        };

        match token {
            Markup::ItalicOpen => italic_depth += 1,
            Markup::ItalicClose => italic_depth = close(italic_depth, "italic"),
            Markup::ParenOpen => paren_depth += 1,
            Markup::ParenClose => paren_depth = close(paren_depth, "parenthesis"),
            Markup::BlockEnd => {
                if paren_depth > 0 {
                    tracing::trace!("{} unclosed parenthesis at block end", paren_depth);
                }
                paren_depth = 0;
            }
            Markup::Text(text) => nodes.push(ContentNode::Text {
                text: text.clone(),
                flags,
            }),
            Markup::Link { target, text } => nodes.push(ContentNode::Link {
                target: target.clone(),
                text: text.clone(),
                flags,
            }),
        }
    }

    PageContent::new(nodes)
}

fn close(depth: u32, kind: &str) -> u32 {
    if depth == 0 {
        tracing::trace!("Unbalanced {} close marker, clamping depth at zero", kind);
    }
    depth.saturating_sub(1)
}
