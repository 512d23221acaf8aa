//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

use crate::view::{Accent, ACCENT_COUNT};

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Accent gradients
// ============================================================================

/// Two-stop gradient drawn along the top edge of a card.
pub type Gradient = (Color, Color);

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Muted gray/stone gradients cycled across grid cards.
const CARD_ACCENTS: [Gradient; ACCENT_COUNT] = [
    (rgb(0x6b7280), rgb(0x475569)),
    (rgb(0x94a3b8), rgb(0x6b7280)),
    (rgb(0xa3a3a3), rgb(0x78716c)),
    (rgb(0xa1a1aa), rgb(0x6b7280)),
    (rgb(0xa8a29e), rgb(0x737373)),
];

/// Blue to purple, reserved for the featured story.
const FEATURED_ACCENT: Gradient = (rgb(0x3b82f6), rgb(0x9333ea));

// ============================================================================
// Color Palette: semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Header --
    pub heading: Style,
    pub header_meta: Style,

    // -- Sidebar --
    pub sidebar_item: Style,
    pub sidebar_selected: Style,
    pub sidebar_active: Style,

    // -- Cards --
    pub card_title: Style,
    pub card_body: Style,
    pub card_action: Style,
    pub card_link: Style,
    pub featured_badge: Style,
    pub empty_state: Style,
    pub spinner: Style,

    // -- Language picker --
    pub picker_item: Style,
    pub picker_selected: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,

    pub card_accents: [Gradient; ACCENT_COUNT],
    pub featured_accent: Gradient,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            heading: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            header_meta: Style::default().fg(Color::DarkGray),

            sidebar_item: Style::default(),
            sidebar_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            sidebar_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_body: Style::default().fg(Color::Gray),
            card_action: Style::default().fg(Color::Cyan),
            card_link: Style::default().fg(Color::Blue),
            featured_badge: Style::default()
                .fg(Color::White)
                .bg(rgb(0x3b82f6))
                .add_modifier(Modifier::BOLD),
            empty_state: Style::default().fg(Color::DarkGray),
            spinner: Style::default().fg(Color::Cyan),

            picker_item: Style::default(),
            picker_selected: Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Cyan),

            card_accents: CARD_ACCENTS,
            featured_accent: FEATURED_ACCENT,
        }
    }

    /// Adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            heading: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            header_meta: Style::default().fg(Color::DarkGray),

            sidebar_item: Style::default().fg(Color::Black),
            sidebar_selected: Style::default().bg(Color::Blue).fg(Color::White),
            sidebar_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_body: Style::default().fg(Color::DarkGray),
            card_action: Style::default().fg(Color::Blue),
            card_link: Style::default().fg(Color::Magenta),
            featured_badge: Style::default()
                .fg(Color::White)
                .bg(rgb(0x9333ea))
                .add_modifier(Modifier::BOLD),
            empty_state: Style::default().fg(Color::DarkGray),
            spinner: Style::default().fg(Color::Blue),

            picker_item: Style::default().fg(Color::Black),
            picker_selected: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),

            card_accents: CARD_ACCENTS,
            featured_accent: FEATURED_ACCENT,
        }
    }

    /// Gradient for a card accent.
    pub fn gradient(&self, accent: Accent) -> Gradient {
        match accent {
            Accent::Featured => self.featured_accent,
            Accent::Cycle(i) => self.card_accents[i % ACCENT_COUNT],
        }
    }
}

/// Linear blend between the two stops of `gradient` at `t` in `[0, 1]`.
///
/// Non-RGB stops cannot be blended; the nearer stop is returned.
pub fn blend(gradient: Gradient, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match gradient {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        (start, _) if t < 0.5 => start,
        (_, end) => end,
    }
}

// ============================================================================
// Style Map: string-keyed lookup
// ============================================================================

/// String-keyed style lookup, so draw code can name roles (e.g.
/// `"card_title"`) without reaching into the palette struct.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 17] = [
    "heading",
    "header_meta",
    "sidebar_item",
    "sidebar_selected",
    "sidebar_active",
    "card_title",
    "card_body",
    "card_action",
    "card_link",
    "featured_badge",
    "empty_state",
    "spinner",
    "picker_item",
    "picker_selected",
    "status_bar",
    "panel_border",
    "panel_border_focused",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 17] = [
            p.heading,
            p.header_meta,
            p.sidebar_item,
            p.sidebar_selected,
            p.sidebar_active,
            p.card_title,
            p.card_body,
            p.card_action,
            p.card_link,
            p.featured_badge,
            p.empty_state,
            p.spinner,
            p.picker_item,
            p.picker_selected,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_accents_cycle_five_distinct_gradients() {
        let palette = ThemeVariant::Dark.palette();
        assert_eq!(palette.gradient(Accent::Cycle(0)), palette.gradient(Accent::Cycle(5)));
        for i in 0..ACCENT_COUNT {
            for j in (i + 1)..ACCENT_COUNT {
                assert_ne!(palette.card_accents[i], palette.card_accents[j]);
            }
        }
    }

    #[test]
    fn featured_accent_is_blue_to_purple() {
        let palette = ThemeVariant::Light.palette();
        assert_eq!(
            palette.gradient(Accent::Featured),
            (Color::Rgb(0x3b, 0x82, 0xf6), Color::Rgb(0x93, 0x33, 0xea))
        );
    }

    #[test]
    fn blend_endpoints_and_midpoint() {
        let g = (Color::Rgb(0, 0, 0), Color::Rgb(200, 100, 50));
        assert_eq!(blend(g, 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(blend(g, 1.0), Color::Rgb(200, 100, 50));
        assert_eq!(blend(g, 0.5), Color::Rgb(100, 50, 25));
        assert_eq!(blend(g, 7.0), Color::Rgb(200, 100, 50));
    }

    #[test]
    fn blend_named_colors_picks_nearer_stop() {
        let g = (Color::Red, Color::Blue);
        assert_eq!(blend(g, 0.2), Color::Red);
        assert_eq!(blend(g, 0.8), Color::Blue);
    }

    #[test]
    fn light_palette_differs_from_dark() {
        let dark = ThemeVariant::Dark.palette();
        let light = ThemeVariant::Light.palette();
        assert_ne!(dark.sidebar_selected, light.sidebar_selected);
        assert_ne!(dark.status_bar, light.status_bar);
    }

    #[test]
    fn variant_from_str_name() {
        assert_eq!(ThemeVariant::from_str_name("dark"), Some(ThemeVariant::Dark));
        assert_eq!(ThemeVariant::from_str_name("Light"), Some(ThemeVariant::Light));
        assert_eq!(ThemeVariant::from_str_name("neon"), None);
        assert_eq!(ThemeVariant::Dark.next().next(), ThemeVariant::Dark);
    }

    #[test]
    fn style_map_resolves_known_roles() {
        let palette = ThemeVariant::Dark.palette();
        let sm = StyleMap::from_palette(&palette);
        assert_eq!(sm.resolve("card_title"), palette.card_title);
        assert_eq!(sm.resolve("status_bar"), palette.status_bar);
        assert_eq!(sm.resolve("nonexistent_role"), Style::default());
    }

    #[test]
    fn style_map_has_all_roles() {
        let sm = StyleMap::from_palette(&ThemeVariant::Dark.palette());
        assert_eq!(sm.map.len(), ROLE_NAMES.len());
        for name in ROLE_NAMES {
            assert!(sm.map.contains_key(name), "Role '{}' missing from StyleMap", name);
        }
    }
}
