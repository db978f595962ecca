use crate::{TitleError, TitleResult};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Path prefix MediaWiki serves articles under
const ARTICLE_PATH: &str = "/wiki/";

/// A normalized article title
///
/// Two `PageId`s are equal only if their normalized titles match exactly
/// (case-sensitive, no fuzzy matching).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(String);

impl PageId {
    /// Creates a `PageId` from any article reference
    ///
    /// Accepts a bare title (`"Ancient Greek"`), an article path
    /// (`"/wiki/Ancient_Greek"`) or an absolute article URL
    /// (`"https://en.wikipedia.org/wiki/Ancient_Greek"`).
    ///
    /// # Examples
    ///
    /// ```
    /// use philosophy_walk::title::PageId;
    ///
    /// let a = PageId::parse("ancient Greek").unwrap();
    /// let b = PageId::parse("/wiki/Ancient_Greek").unwrap();
    /// let c = PageId::parse("https://en.wikipedia.org/wiki/Ancient_Greek#History").unwrap();
    /// assert_eq!(a, b);
    /// assert_eq!(b, c);
    /// assert_eq!(a.as_str(), "Ancient_Greek");
    /// ```
    pub fn parse(reference: &str) -> TitleResult<Self> {
        let reference = reference.trim();

        if reference.starts_with("http://") || reference.starts_with("https://") {
            let url = Url::parse(reference)
                .map_err(|_| TitleError::NotAnArticle(reference.to_string()))?;
            let title = url
                .path()
                .strip_prefix(ARTICLE_PATH)
                .ok_or_else(|| TitleError::NotAnArticle(reference.to_string()))?;
            return normalize_title(title).map(Self);
        }

        let title = reference.strip_prefix(ARTICLE_PATH).unwrap_or(reference);
        normalize_title(title).map(Self)
    }

    /// Resolves an anchor `href` found on a page served from `base`
    ///
    /// Returns `None` unless the link points at an article on the same
    /// host: external links, red links (`/w/index.php?...`), fragment-only
    /// anchors and non-HTTP schemes are not article references.
    pub fn from_href(href: &str, base: &Url) -> Option<Self> {
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            return None;
        }

        let resolved = base.join(href).ok()?;
        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            return None;
        }
        if resolved.host_str() != base.host_str() || resolved.port() != base.port() {
            return None;
        }
        if resolved.query().is_some() {
            return None;
        }

        let title = resolved.path().strip_prefix(ARTICLE_PATH)?;
        normalize_title(title).ok().map(Self)
    }

    /// Returns the normalized title (underscores for spaces)
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the human-readable title (spaces instead of underscores)
    pub fn display_title(&self) -> String {
        self.0.replace('_', " ")
    }

    /// Builds the article URL for this page under `base`
    pub fn article_url(&self, base: &Url) -> Result<Url, url::ParseError> {
        base.join(&format!("{}{}", ARTICLE_PATH, urlencoding::encode(&self.0)))
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_title())
    }
}

impl FromStr for PageId {
    type Err = TitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes a raw article title
///
/// # Normalization Steps
///
/// 1. Drop the fragment (everything after `#`)
/// 2. Percent-decode (left as-is if the result is not UTF-8)
/// 3. Spaces become underscores, runs of underscores collapse to one
/// 4. Trim surrounding underscores and whitespace
/// 5. Uppercase the first character, as MediaWiki does
///
/// # Returns
///
/// * `Ok(String)` - The normalized title
/// * `Err(TitleError::Empty)` - Nothing was left after normalization
pub fn normalize_title(raw: &str) -> TitleResult<String> {
    let without_fragment = raw.split('#').next().unwrap_or_default();

    let decoded = urlencoding::decode(without_fragment)
        .map(|d| d.into_owned())
        .unwrap_or_else(|_| without_fragment.to_string());

    let mut collapsed = String::with_capacity(decoded.len());
    for c in decoded.chars() {
        let c = if c.is_whitespace() { '_' } else { c };
        if c == '_' && collapsed.ends_with('_') {
            continue;
        }
        collapsed.push(c);
    }

    let trimmed = collapsed.trim_matches('_');
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => Ok(first.to_uppercase().chain(chars).collect()),
        None => Err(TitleError::Empty),
    }
}
