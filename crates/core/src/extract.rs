// ABOUTME: The rewriter/extractor: normalizes reference attributes in place and collects links, images, and article fragments.
// ABOUTME: One dom_query Document per call; built, mutated, and discarded inside a single extraction pass.

use dom_query::{Document, Matcher, NodeRef, Selection};
use once_cell::sync::Lazy;
use url::Url;

use crate::probe::ReachabilityProbe;
use crate::resolve::{needs_rewrite, resolve};
use crate::result::{Extraction, Image, Link};

/// Elements collected into the three output views.
static COLLECT_MATCHER: Lazy<Matcher> =
    Lazy::new(|| Matcher::new("a, img, p").expect("static selector"));

/// Elements whose reference attributes are normalized in place.
static NORMALIZE_MATCHER: Lazy<Matcher> =
    Lazy::new(|| Matcher::new("a, link, script, img, iframe").expect("static selector"));

/// Reference-bearing attributes, checked in this order on every element.
const REF_ATTRS: [&str; 2] = ["href", "src"];

/// Rewrites a page's reference attributes against a base URL and extracts
/// links, images, and paragraph fragments in a single pass.
///
/// The base URL must be the final URL of the fetched document, after
/// redirects. The probe is consulted once per `img`/`iframe` reference
/// attribute; unreachable targets are replaced with the placeholder.
///
/// Parsing is permissive: tag soup degrades to a best-effort tree and never
/// fails the extraction.
pub struct Extractor<'a> {
    base: &'a Url,
    probe: &'a dyn ReachabilityProbe,
}

impl<'a> Extractor<'a> {
    pub fn new(base: &'a Url, probe: &'a dyn ReachabilityProbe) -> Self {
        Self { base, probe }
    }

    /// Run one extraction pass over `html` and return the three collections.
    pub fn extract(&self, html: &str) -> Extraction {
        self.run(html).1
    }

    /// Like [`extract`](Self::extract), additionally serializing the
    /// normalized document for renderers that want the rewritten markup.
    pub fn rewrite(&self, html: &str) -> (String, Extraction) {
        let (doc, extraction) = self.run(html);
        (doc.html().to_string(), extraction)
    }

    fn run(&self, html: &str) -> (Document, Extraction) {
        let doc = Document::from(html);
        self.normalize_attributes(&doc);
        let extraction = self.collect(&doc);
        (doc, extraction)
    }

    /// Rewrite `/`- and `#`-prefixed href/src values to absolute form, then
    /// route every `img`/`iframe` target through the reachability probe.
    ///
    /// Runs before collection so the recorded sources mirror the live
    /// attributes and each embed target is probed exactly once.
    fn normalize_attributes(&self, doc: &Document) {
        for el in doc.select_matcher(&NORMALIZE_MATCHER).iter() {
            let tag = tag_name(&el);
            let probed = matches!(tag.as_str(), "img" | "iframe");
            for name in REF_ATTRS {
                let Some(value) = el.attr(name) else { continue };
                let mut current = value.to_string();
                if needs_rewrite(&current) {
                    // A reference the resolver cannot interpret is kept verbatim.
                    if let Ok(url) = resolve(self.base, &current) {
                        current = url.to_string();
                        el.set_attr(name, &current);
                    }
                }
                if probed {
                    // Embed targets are resolved in full before probing;
                    // joining an absolute URL with itself is a no-op.
                    if let Ok(url) = resolve(self.base, &current) {
                        current = url.to_string();
                    }
                    let checked = self.probe.check(&current);
                    el.set_attr(name, &checked);
                }
            }
        }
    }

    /// Visit every `a`, `img`, and `p` element in document order and build
    /// the three collections. Anchors nested inside paragraphs are recorded
    /// both as links and inside the paragraph's fragment.
    fn collect(&self, doc: &Document) -> Extraction {
        let mut extraction = Extraction::default();
        for el in doc.select_matcher(&COLLECT_MATCHER).iter() {
            match tag_name(&el).as_str() {
                "a" => extraction.links.push(collect_link(&el)),
                "img" => extraction.images.push(self.collect_image(&el)),
                "p" => extraction.articles.push(flatten_paragraph(&el)),
                _ => {}
            }
        }
        extraction
    }

    /// A missing or empty source resolves to the base URL itself.
    fn collect_image(&self, el: &Selection) -> Image {
        let raw = attr_or_default(el, "src");
        let src = resolve(self.base, &raw).map_or(raw, |url| url.to_string());
        Image {
            alt: attr_or_default(el, "alt"),
            src,
        }
    }
}

fn collect_link(el: &Selection) -> Link {
    Link {
        text: el.text().trim().to_string(),
        href: attr_or_default(el, "href"),
    }
}

/// Flatten one paragraph into a single markup fragment, child by child.
fn flatten_paragraph(p: &Selection) -> String {
    let mut out = String::new();
    let Some(node) = p.nodes().first() else {
        return out;
    };
    for child in node.children() {
        match ParagraphChild::classify(child) {
            ParagraphChild::Anchor { href, text } => {
                out.push_str(&format!(
                    " <a href=\"{href}\" target=\"_blank\">{text}</a>"
                ));
            }
            ParagraphChild::Sup { text } => {
                out.push_str(&format!(" <sup>{text}</sup>"));
            }
            ParagraphChild::Text(raw) => {
                out.push(' ');
                out.push_str(&raw);
            }
            ParagraphChild::Other(markup) => out.push_str(&markup),
        }
    }
    out.trim().to_string()
}

/// The closed set of paragraph children the flattener understands.
///
/// Anything that is not an anchor, a superscript, or a text node falls
/// through to `Other` and is serialized unchanged.
enum ParagraphChild {
    Anchor { href: String, text: String },
    Sup { text: String },
    Text(String),
    Other(String),
}

impl ParagraphChild {
    fn classify(node: NodeRef<'_>) -> Self {
        if node.is_text() {
            return ParagraphChild::Text(node.text().to_string());
        }
        let el = Selection::from(node);
        match tag_name(&el).as_str() {
            "a" => ParagraphChild::Anchor {
                href: attr_or_default(&el, "href"),
                text: el.text().trim().to_string(),
            },
            "sup" => ParagraphChild::Sup {
                text: el.text().trim().to_string(),
            },
            _ => ParagraphChild::Other(el.html().to_string()),
        }
    }
}

fn tag_name(el: &Selection) -> String {
    el.nodes()
        .first()
        .and_then(NodeRef::node_name)
        .map(|name| name.to_lowercase())
        .unwrap_or_default()
}

fn attr_or_default(el: &Selection, name: &str) -> String {
    el.attr(name)
        .map(|value| value.to_string())
        .unwrap_or_default()
}
