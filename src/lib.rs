//! Terminal news dashboard.
//!
//! The query string (`category`, `language`) is the single source of truth
//! for what is on screen. [`nav`] owns it, [`feed`] loads articles for the
//! current selection, [`view`] turns a loaded feed into cards, and [`ui`]
//! draws them.

pub mod app;
pub mod config;
pub mod feed;
pub mod keybindings;
pub mod nav;
pub mod theme;
pub mod ui;
pub mod util;
pub mod view;
