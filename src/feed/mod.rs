//! Article feed loading from the remote news API.
//!
//! - [`endpoint`] - category to endpoint-name mapping and URL building
//! - [`loader`] - HTTP fetch, decoding, and failure collapse
//! - [`types`] - [`Article`] wire model and the featured/items [`FeedState`]
//!
//! # Example
//!
//! ```ignore
//! let loader = FeedLoader::new(base_url, DEFAULT_TIMEOUT)?;
//! let state = loader.load("sports", "english").await;
//! ```

mod endpoint;
mod loader;
mod types;

pub use endpoint::{endpoint_url, resolve_endpoint, SPORTS_ENDPOINT};
pub use loader::{FeedLoader, FetchError, DEFAULT_TIMEOUT};
pub use types::{Article, FeedState};
