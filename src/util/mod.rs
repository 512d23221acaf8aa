//! Utility functions for common operations.
//!
//! - **URL validation**: scheme checks for links opened in the browser and
//!   for the configured API base URL
//! - **Text processing**: Unicode-aware width, truncation, wrapping, and
//!   control-character stripping for remote text shown in the terminal

mod text;
mod url_validator;

pub use text::{display_width, strip_control_chars, truncate_to_width, wrap_text};
pub use url_validator::{validate_api_base, validate_url_for_open, UrlValidationError};
