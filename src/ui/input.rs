//! Input handling for the TUI.
//!
//! Keys are resolved to actions through the keybinding registry and
//! dispatched against the application state. Navigation never fetches
//! directly: it changes the query string, and the event loop reacts to the
//! resulting selection change.

use crate::app::{App, Focus};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::nav::Category;
use crossterm::event::{KeyCode, KeyModifiers};

use super::helpers::open_selected_link;
use super::Action;

/// Map the current focus panel to a keybinding context.
fn focus_to_context(focus: Focus) -> KbContext {
    match focus {
        Focus::Sidebar => KbContext::Sidebar,
        Focus::Cards => KbContext::Cards,
    }
}

/// Main input dispatch function.
///
/// Overlays capture input first: help, then the language picker.
pub(super) fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    if app.show_help {
        return handle_help_input(app, code);
    }

    if app.language_picker.is_some() {
        return handle_picker_input(app, code, modifiers);
    }

    handle_dashboard_input(app, code, modifiers)
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

fn handle_picker_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    let action = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::LanguagePicker);

    match action {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::NavUp) => app.picker_up(),
        Some(KbAction::NavDown) => app.picker_down(),
        Some(KbAction::Select) | Some(KbAction::ToggleExpand) => {
            if let Some(language) = app.commit_language_picker() {
                app.set_status(format!("Language: {}", language.label()));
            }
        }
        Some(KbAction::Back) | Some(KbAction::ChooseLanguage) => app.close_language_picker(),
        _ => {}
    }
    Action::Continue
}

fn handle_dashboard_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    let context = focus_to_context(app.focus);
    let Some(action) = app.keybindings.action_for_key(code, modifiers, context) else {
        return Action::Continue;
    };

    match action {
        KbAction::Quit => return Action::Quit,
        KbAction::Back => {
            if app.focus == Focus::Sidebar {
                app.focus = Focus::Cards;
            }
        }
        KbAction::NavUp => app.nav_up(),
        KbAction::NavDown => app.nav_down(),
        KbAction::NavLeft => app.nav_left(),
        KbAction::NavRight => app.nav_right(),
        KbAction::CycleFocus => app.cycle_focus(),
        KbAction::Select => match app.focus {
            Focus::Sidebar => {
                app.follow_sidebar_selection();
            }
            Focus::Cards => {
                app.toggle_selected();
            }
        },
        KbAction::ToggleExpand => {
            app.toggle_selected();
        }
        KbAction::OpenOriginal => open_selected_link(app),
        KbAction::ToggleSidebar => {
            app.toggle_sidebar();
        }
        KbAction::ChooseLanguage => app.open_language_picker(),
        KbAction::SelectCategory(i) => {
            if let Some(category) = Category::ALL.get(i) {
                app.follow_category(*category);
            }
        }
        KbAction::CycleTheme => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        KbAction::ShowHelp => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
    }
    Action::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::feed::{Article, FeedLoader, FeedState};
    use crate::nav::{QueryString, ViewSelection};
    use crate::view::CardKey;
    use std::time::Duration;
    use url::Url;

    fn test_app(query: &str) -> App {
        let base = Url::parse("http://127.0.0.1:9").unwrap();
        let loader = FeedLoader::new(base, Duration::from_secs(1)).unwrap();
        App::new(&Config::default(), loader, QueryString::parse(query))
    }

    fn loaded_app(query: &str) -> App {
        let mut app = test_app(query);
        let (sel, gen) = app.begin_load();
        let articles = ["A", "B", "C"]
            .iter()
            .map(|t| Article {
                title: t.to_string(),
                body: "text".to_string(),
                link: "not a url".to_string(),
            })
            .collect();
        app.apply_feed_loaded(&sel, gen, FeedState::from_articles(articles));
        app
    }

    fn press(app: &mut App, c: char) -> Action {
        handle_input(app, KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_quit() {
        let mut app = test_app("");
        assert!(matches!(press(&mut app, 'q'), Action::Quit));
    }

    #[tokio::test]
    async fn test_space_toggles_focused_card() {
        let mut app = loaded_app("");
        press(&mut app, 'j');
        assert_eq!(app.selected_card, CardKey::Item(0));
        press(&mut app, ' ');
        assert!(app.expansion.is_expanded(CardKey::Item(0)));
        assert!(!app.expansion.is_expanded(CardKey::Featured));
        press(&mut app, ' ');
        assert!(app.expansion.is_empty());
    }

    #[tokio::test]
    async fn test_open_leaves_expansion_and_selection_alone() {
        let mut app = loaded_app("");
        press(&mut app, ' ');
        let before = app.expansion.clone();
        let generation = app.load_generation;

        press(&mut app, 'o');

        assert_eq!(app.expansion, before);
        assert_eq!(app.load_generation, generation);
        assert_eq!(app.selection(), ViewSelection::default());
        // Invalid link is reported, not opened
        assert!(app.status_message.is_some());
    }

    #[tokio::test]
    async fn test_digit_follows_category_preserving_language() {
        let mut app = test_app("language=korean");
        press(&mut app, '1');
        assert_eq!(app.selection(), ViewSelection::new("tech", "korean"));
    }

    #[tokio::test]
    async fn test_language_picker_via_keys() {
        let mut app = test_app("category=finance");
        press(&mut app, 'L');
        assert_eq!(app.language_picker, Some(0));
        press(&mut app, 'j');
        handle_input(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.language_picker.is_none());
        assert_eq!(app.selection(), ViewSelection::new("finance", "spanish"));
    }

    #[tokio::test]
    async fn test_picker_q_closes_instead_of_quitting() {
        let mut app = test_app("");
        press(&mut app, 'L');
        assert!(matches!(press(&mut app, 'q'), Action::Continue));
        assert!(app.language_picker.is_none());
        assert_eq!(app.selection(), ViewSelection::default());
    }

    #[tokio::test]
    async fn test_sidebar_enter_follows_link() {
        let mut app = test_app("");
        app.sidebar_pref = Some(true);
        handle_input(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.focus, Focus::Sidebar);
        press(&mut app, 'k');
        handle_input(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.selection().category, "finance");
        handle_input(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.focus, Focus::Cards);
    }

    #[tokio::test]
    async fn test_help_captures_keys() {
        let mut app = test_app("");
        press(&mut app, '?');
        assert!(app.show_help);
        assert!(matches!(press(&mut app, 'q'), Action::Continue));
        assert!(!app.show_help);
    }
}
