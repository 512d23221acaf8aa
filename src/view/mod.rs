//! Terminal-independent view model.
//!
//! Everything here is a pure function of the feed and the expansion flags;
//! the `ui` module only paints what these types describe.

mod expansion;
pub mod layout;
mod page;

pub use expansion::{CardKey, ExpansionState};
pub use layout::{body_lines, card_height, grid_columns, grid_rows, BodyLines, PREVIEW_LINES};
pub use page::{accent_for, heading, split_paragraphs, Accent, CardView, PageView, ACCENT_COUNT};
