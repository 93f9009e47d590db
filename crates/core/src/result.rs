// ABOUTME: Output records handed to the render sink: links, images, and article fragments.
// ABOUTME: Every URL field is absolute or the placeholder sentinel, never a raw relative path.

use serde::{Deserialize, Serialize};

/// A navigable link: trimmed visible text plus its (normalized) target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub href: String,
}

/// An image reference; `src` is resolved to absolute form or the placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub alt: String,
    pub src: String,
}

/// One paragraph's flattened content, trimmed, with inline anchors and
/// superscripts preserved as markup.
pub type ArticleFragment = String;

/// The three collections produced by one extraction pass, in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extraction {
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    pub articles: Vec<ArticleFragment>,
}

impl Extraction {
    /// Returns true if the pass found nothing to report.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.images.is_empty() && self.articles.is_empty()
    }
}

/// A normalized page: the originally requested URL (passed through for
/// display) plus the extracted collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizedPage {
    pub url: String,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    pub articles: Vec<ArticleFragment>,
}

impl NormalizedPage {
    pub fn new(url: impl Into<String>, extraction: Extraction) -> Self {
        Self {
            url: url.into(),
            links: extraction.links,
            images: extraction.images,
            articles: extraction.articles,
        }
    }

    /// Returns true if the page produced no collections at all.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.images.is_empty() && self.articles.is_empty()
    }
}
