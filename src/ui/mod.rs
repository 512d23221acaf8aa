//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - Layout and overlay dispatch
//! - `helpers` - Task spawning and panic containment
//! - `cards` - Featured story and card grid
//! - `sidebar` - Category links
//! - `picker` - Language selector overlay
//! - `help` - Keybinding overlay
//! - `status` - Status bar widget

mod cards;
mod events;
mod help;
mod helpers;
mod input;
mod loop_runner;
mod picker;
mod render;
mod sidebar;
mod status;

pub use events::handle_app_event;
pub use helpers::{handle_selection_change, spawn_feed_load};
pub use loop_runner::{run, Action};
