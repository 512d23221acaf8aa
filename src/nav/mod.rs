//! Navigation state: the query string and the selection derived from it.
//!
//! - [`query`] - ordered, form-encoded query parameters
//! - [`selection`] - category/language domains and [`ViewSelection`]
//! - [`navigator`] - the state owner that publishes selection changes

mod navigator;
mod query;
mod selection;

pub use navigator::Navigator;
pub use query::QueryString;
pub use selection::{Category, Language, ViewSelection, CATEGORY_PARAM, LANGUAGE_PARAM};
