//! Help overlay.
//!
//! Lists the active bindings (user overrides included), then the category
//! shortcuts and the seven languages with the current ones marked.

use crate::app::App;
use crate::keybindings::{Action, Context};
use crate::nav::{Category, Language};
use crate::util::display_width;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::render::centered_rect;

/// Width of the key column.
const KEY_COLUMN: usize = 14;

/// One row of the help overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HelpRow {
    Section(&'static str),
    Entry { key: String, text: String, current: bool },
    Blank,
}

/// Panels whose bindings are listed, in display order. Category jumps get
/// their own section instead of cluttering "Dashboard".
const PANELS: [(Context, &str); 4] = [
    (Context::Global, "Dashboard"),
    (Context::Cards, "Cards"),
    (Context::Sidebar, "Sidebar"),
    (Context::LanguagePicker, "Language picker"),
];

fn help_rows(app: &App) -> Vec<HelpRow> {
    let bindings = app.keybindings.all_bindings();
    let selection = app.selection();
    let mut rows = Vec::new();

    for (ctx, title) in PANELS {
        let entries: Vec<HelpRow> = bindings
            .iter()
            .filter(|(c, _, action, _)| {
                *c == ctx && !matches!(action, Action::SelectCategory(_))
            })
            .map(|(_, key, _, text)| HelpRow::Entry {
                key: key.clone(),
                text: text.to_string(),
                current: false,
            })
            .collect();
        if entries.is_empty() {
            continue;
        }
        rows.push(HelpRow::Section(title));
        rows.extend(entries);
        rows.push(HelpRow::Blank);
    }

    rows.push(HelpRow::Section("Categories"));
    let active = selection.category_kind();
    for (i, category) in Category::ALL.iter().enumerate() {
        let keys: Vec<&str> = bindings
            .iter()
            .filter(|(_, _, action, _)| *action == Action::SelectCategory(i))
            .map(|(_, key, _, _)| key.as_str())
            .collect();
        rows.push(HelpRow::Entry {
            key: if keys.is_empty() {
                "-".to_string()
            } else {
                keys.join(", ")
            },
            text: category.label().to_string(),
            current: active == Some(*category),
        });
    }
    rows.push(HelpRow::Blank);

    rows.push(HelpRow::Section("Languages"));
    let current = selection.language_kind();
    for language in Language::ALL {
        rows.push(HelpRow::Entry {
            key: String::new(),
            text: language.label().to_string(),
            current: current == Some(language),
        });
    }

    rows
}

fn to_line(app: &App, row: HelpRow) -> Line<'static> {
    match row {
        HelpRow::Section(title) => Line::from(Span::styled(
            title,
            app.style("heading").add_modifier(Modifier::BOLD),
        )),
        HelpRow::Blank => Line::default(),
        HelpRow::Entry { key, text, current } => {
            let pad = KEY_COLUMN.saturating_sub(display_width(&key));
            let text_style = if current {
                app.style("sidebar_active")
            } else {
                app.style("card_body")
            };
            let marker = if current { "  ●" } else { "" };
            Line::from(vec![
                Span::styled(format!("  {}{}", key, " ".repeat(pad)), app.style("header_meta")),
                Span::styled(format!("{}{}", text, marker), text_style),
            ])
        }
    }
}

/// Render the help overlay on top of the dashboard.
pub fn render(f: &mut Frame, app: &App) {
    let overlay = centered_rect(70, 80, f.area());
    if overlay.width < 20 || overlay.height < 5 {
        return;
    }

    let lines: Vec<Line> = help_rows(app)
        .into_iter()
        .map(|row| to_line(app, row))
        .collect();

    let visible = usize::from(overlay.height.saturating_sub(2));
    let max_scroll = lines.len().saturating_sub(visible);
    let scroll = app.help_scroll_offset.min(max_scroll);

    let title = if max_scroll > 0 {
        format!(" Help ({}/{}) j/k scroll ", scroll + 1, max_scroll + 1)
    } else {
        " Help (? to close) ".to_string()
    };

    f.render_widget(Clear, overlay);
    f.render_widget(
        Paragraph::new(lines)
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(app.style("panel_border_focused"))
                    .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))),
            ),
        overlay,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::feed::FeedLoader;
    use crate::nav::QueryString;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::time::Duration;
    use url::Url;

    fn test_app(config: &Config, query: &str) -> App {
        let base = Url::parse("http://127.0.0.1:9").unwrap();
        let loader = FeedLoader::new(base, Duration::from_secs(1)).unwrap();
        App::new(config, loader, QueryString::parse(query))
    }

    fn section(rows: &[HelpRow], title: &str) -> Vec<(String, String, bool)> {
        rows.iter()
            .skip_while(|r| !matches!(r, HelpRow::Section(t) if *t == title))
            .skip(1)
            .take_while(|r| matches!(r, HelpRow::Entry { .. }))
            .filter_map(|r| match r {
                HelpRow::Entry { key, text, current } => Some((key.clone(), text.clone(), *current)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_category_section_lists_shortcuts_and_active() {
        let app = test_app(&Config::default(), "?category=sports");
        let rows = help_rows(&app);
        let categories = section(&rows, "Categories");

        assert_eq!(categories.len(), Category::ALL.len());
        assert_eq!(categories[0].0, "1");
        let active: Vec<_> = categories.iter().filter(|c| c.2).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].1, Category::Sports.label());
    }

    #[test]
    fn test_language_section_marks_current() {
        let app = test_app(&Config::default(), "?language=korean");
        let languages = section(&help_rows(&app), "Languages");

        assert_eq!(languages.len(), 7);
        let current: Vec<_> = languages.iter().filter(|l| l.2).map(|l| l.1.as_str()).collect();
        assert_eq!(current, vec!["Korean"]);
    }

    #[test]
    fn test_category_jumps_not_repeated_in_dashboard_section() {
        let app = test_app(&Config::default(), "");
        let dashboard = section(&help_rows(&app), "Dashboard");
        assert!(!dashboard.is_empty());
        let jumps: Vec<&str> = (0..Category::ALL.len())
            .map(|i| Action::SelectCategory(i).describe())
            .collect();
        assert!(dashboard.iter().all(|(_, text, _)| !jumps.contains(&text.as_str())));
    }

    #[test]
    fn test_overridden_category_key_shown() {
        let mut overrides = HashMap::new();
        overrides.insert("category_1".to_string(), "w".to_string());
        let config = Config {
            keybindings: overrides,
            ..Config::default()
        };
        let app = test_app(&config, "");
        let categories = section(&help_rows(&app), "Categories");
        assert!(categories[0].0.contains('w'));
    }
}
