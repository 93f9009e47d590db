// ABOUTME: Main library entry point for the pagelens HTML normalization engine.
// ABOUTME: Re-exports the public API: Client, Extractor, probes, output records, and errors.

//! pagelens - rewrites a fetched page's relative references against its final
//! (post-redirect) URL and extracts three structured views of the page:
//! navigable links, image references, and paragraph-level article fragments.
//!
//! Unreachable iframe/image targets are replaced with an `about:blank`
//! placeholder instead of surfacing a load error.
//!
//! # Example
//!
//! ```no_run
//! use pagelens_core::{Client, NormalizeError};
//!
//! fn main() -> Result<(), NormalizeError> {
//!     let client = Client::builder().build();
//!     let page = client.normalize("https://example.com/article")?;
//!     for link in &page.links {
//!         println!("{} -> {}", link.text, link.href);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod extract;
pub mod options;
pub mod probe;
pub mod resolve;
pub mod resource;
pub mod result;

pub use crate::client::Client;
pub use crate::error::{ErrorCode, NormalizeError, ResolveError};
pub use crate::extract::Extractor;
pub use crate::options::{ClientBuilder, Options};
pub use crate::probe::{HttpProbe, PassthroughProbe, ReachabilityProbe, PLACEHOLDER_URL};
pub use crate::resolve::{needs_rewrite, resolve};
pub use crate::result::{ArticleFragment, Extraction, Image, Link, NormalizedPage};
