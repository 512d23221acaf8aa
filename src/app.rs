use crate::config::Config;
use crate::feed::{Article, FeedLoader, FeedState};
use crate::keybindings::KeybindingRegistry;
use crate::nav::{Category, Language, Navigator, QueryString, ViewSelection};
use crate::theme::{ColorPalette, Gradient, StyleMap, ThemeVariant};
use crate::view::{grid_rows, layout, Accent, CardKey, ExpansionState};
use chrono::{DateTime, Local};
use ratatui::style::Style;
use std::borrow::Cow;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// How long a status message stays in the status bar.
const STATUS_TTL_SECS: u64 = 3;

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Cards,
}

/// Events from background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// A feed load finished (successfully or collapsed to the empty state).
    ///
    /// Fields:
    /// - `selection`: The category/language the load was dispatched for
    /// - `generation`: The load generation when this task was spawned
    /// - `state`: The resulting feed
    FeedLoaded {
        selection: ViewSelection,
        generation: u64,
        state: FeedState,
    },
    /// A background task panicked.
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state
pub struct App {
    pub loader: Arc<FeedLoader>,
    pub navigator: Navigator,

    // Data
    pub feed: FeedState,
    pub expansion: ExpansionState,
    /// When the displayed feed was applied.
    pub last_loaded_at: Option<DateTime<Local>>,

    // Theme
    pub theme_variant: ThemeVariant,
    pub palette: ColorPalette,
    pub theme: StyleMap,

    pub keybindings: KeybindingRegistry,

    // UI State
    pub focus: Focus,
    pub selected_card: CardKey,
    /// First visible grid row.
    pub scroll_offset: usize,
    /// Columns used by the last drawn frame.
    pub grid_columns: usize,
    /// Width of the last drawn frame.
    pub terminal_width: u16,

    pub sidebar_selected: usize,
    /// Explicit sidebar visibility; `None` follows the terminal width.
    pub sidebar_pref: Option<bool>,

    /// Cursor in the language picker overlay, when it is open.
    pub language_picker: Option<usize>,

    pub show_help: bool,
    pub help_scroll_offset: usize,

    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders
    pub needs_redraw: bool,

    /// Current frame of the loading spinner animation.
    pub spinner_frame: usize,

    /// Generation counter for feed loads.
    ///
    /// Incremented for every dispatched load. Results normally apply in the
    /// order they resolve; with `discard_stale` set, only the result carrying
    /// the latest generation is applied.
    pub load_generation: u64,
    pub discard_stale: bool,

    /// Outstanding load tasks. Never cancelled on navigation; aborted when
    /// the App drops.
    pub load_handles: Vec<JoinHandle<()>>,
}

impl App {
    pub fn new(config: &Config, loader: FeedLoader, query: QueryString) -> Self {
        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme, using dark");
            ThemeVariant::Dark
        });

        let mut keybindings = KeybindingRegistry::new();
        for warning in keybindings.apply_overrides(&config.keybindings) {
            tracing::warn!(%warning, "Keybinding override skipped");
        }

        let navigator = Navigator::new(query);
        let sidebar_selected = navigator
            .selection()
            .category_kind()
            .and_then(|c| Category::ALL.iter().position(|x| *x == c))
            .unwrap_or(0);

        let palette = theme_variant.palette();
        Self {
            loader: Arc::new(loader),
            navigator,
            // The first load is dispatched as soon as the loop starts
            feed: FeedState::loading(),
            expansion: ExpansionState::new(),
            last_loaded_at: None,
            theme_variant,
            theme: StyleMap::from_palette(&palette),
            palette,
            keybindings,
            focus: Focus::Cards,
            selected_card: CardKey::Featured,
            scroll_offset: 0,
            grid_columns: 1,
            terminal_width: 0,
            sidebar_selected,
            sidebar_pref: None,
            language_picker: None,
            show_help: false,
            help_scroll_offset: 0,
            status_message: None,
            needs_redraw: true,
            spinner_frame: 0,
            load_generation: 0,
            discard_stale: config.discard_stale_responses,
            load_handles: Vec::new(),
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn gradient(&self, accent: Accent) -> Gradient {
        self.palette.gradient(accent)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.palette = variant.palette();
        self.theme = StyleMap::from_palette(&self.palette);
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant. Returns its name for status display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    pub fn selection(&self) -> ViewSelection {
        self.navigator.selection()
    }

    // ------------------------------------------------------------------
    // Feed loading
    // ------------------------------------------------------------------

    /// Mark a load as in flight and return what the spawned task should
    /// fetch, tagged with its generation.
    pub fn begin_load(&mut self) -> (ViewSelection, u64) {
        self.load_generation = self.load_generation.wrapping_add(1);
        self.feed.is_loading = true;
        self.needs_redraw = true;
        (self.selection(), self.load_generation)
    }

    /// Keep a handle to a spawned load so it can be aborted on shutdown.
    pub fn track_load(&mut self, handle: JoinHandle<()>) {
        self.load_handles.retain(|h| !h.is_finished());
        self.load_handles.push(handle);
    }

    /// Replace the feed with a finished load.
    ///
    /// Any resolution clears the loading flag and the expansion state, even
    /// when other loads are still in flight. Returns false when the result
    /// was discarded as stale.
    pub fn apply_feed_loaded(
        &mut self,
        selection: &ViewSelection,
        generation: u64,
        state: FeedState,
    ) -> bool {
        if self.discard_stale && generation != self.load_generation {
            tracing::debug!(
                category = %selection.category,
                language = %selection.language,
                generation,
                latest = self.load_generation,
                "Discarding stale feed result"
            );
            return false;
        }

        tracing::debug!(
            category = %selection.category,
            language = %selection.language,
            generation,
            articles = state.len(),
            "Applying feed result"
        );

        self.feed = FeedState {
            is_loading: false,
            ..state
        };
        self.expansion.clear();
        self.selected_card = self.card_keys().first().copied().unwrap_or(CardKey::Featured);
        self.scroll_offset = 0;
        self.last_loaded_at = Some(Local::now());
        self.needs_redraw = true;
        true
    }

    // ------------------------------------------------------------------
    // Cards
    // ------------------------------------------------------------------

    /// Card keys in display order.
    pub fn card_keys(&self) -> Vec<CardKey> {
        self.feed
            .featured
            .iter()
            .map(|_| CardKey::Featured)
            .chain((0..self.feed.items.len()).map(CardKey::Item))
            .collect()
    }

    pub fn card_rows(&self) -> Vec<Vec<CardKey>> {
        grid_rows(
            self.feed.featured.is_some(),
            self.feed.items.len(),
            self.grid_columns,
        )
    }

    pub fn article_for(&self, key: CardKey) -> Option<&Article> {
        match key {
            CardKey::Featured => self.feed.featured.as_ref(),
            CardKey::Item(i) => self.feed.items.get(i),
        }
    }

    pub fn selected_article(&self) -> Option<&Article> {
        if self.feed.is_loading {
            return None;
        }
        self.article_for(self.selected_card)
    }

    /// Flip the focused card. Returns the new expanded flag, or `None` when
    /// no card is focused.
    pub fn toggle_selected(&mut self) -> Option<bool> {
        self.selected_article()?;
        let expanded = self.expansion.toggle(self.selected_card);
        self.needs_redraw = true;
        Some(expanded)
    }

    fn cursor(&self, rows: &[Vec<CardKey>]) -> Option<(usize, usize)> {
        let row = layout::row_of(rows, self.selected_card)?;
        let col = rows[row].iter().position(|k| *k == self.selected_card)?;
        Some((row, col))
    }

    fn move_to_row(&mut self, rows: &[Vec<CardKey>], row: usize, col: usize) {
        if let Some(target) = rows.get(row) {
            if let Some(key) = target.get(col.min(target.len().saturating_sub(1))) {
                self.selected_card = *key;
            }
        }
    }

    /// Record the column count of the last drawn frame.
    pub fn set_grid_columns(&mut self, columns: usize) {
        if self.grid_columns != columns {
            self.grid_columns = columns.max(1);
            self.needs_redraw = true;
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn nav_up(&mut self) {
        match self.focus {
            Focus::Sidebar => self.sidebar_selected = self.sidebar_selected.saturating_sub(1),
            Focus::Cards => {
                let rows = self.card_rows();
                if let Some((row, col)) = self.cursor(&rows) {
                    if row > 0 {
                        self.move_to_row(&rows, row - 1, col);
                    }
                }
            }
        }
    }

    pub fn nav_down(&mut self) {
        match self.focus {
            Focus::Sidebar => {
                self.sidebar_selected = (self.sidebar_selected + 1).min(Category::ALL.len() - 1);
            }
            Focus::Cards => {
                let rows = self.card_rows();
                if let Some((row, col)) = self.cursor(&rows) {
                    self.move_to_row(&rows, row + 1, col);
                }
            }
        }
    }

    pub fn nav_left(&mut self) {
        match self.focus {
            Focus::Sidebar => {}
            Focus::Cards => {
                let rows = self.card_rows();
                match self.cursor(&rows) {
                    Some((row, col)) if col > 0 => self.move_to_row(&rows, row, col - 1),
                    _ if self.sidebar_visible() => self.focus = Focus::Sidebar,
                    _ => {}
                }
            }
        }
    }

    pub fn nav_right(&mut self) {
        match self.focus {
            Focus::Sidebar => self.focus = Focus::Cards,
            Focus::Cards => {
                let rows = self.card_rows();
                if let Some((row, col)) = self.cursor(&rows) {
                    if col + 1 < rows[row].len() {
                        self.move_to_row(&rows, row, col + 1);
                    }
                }
            }
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Cards if self.sidebar_visible() => Focus::Sidebar,
            _ => Focus::Cards,
        };
    }

    /// Navigate to a category. The language and any other query keys are
    /// kept. Returns whether the view selection changed.
    pub fn follow_category(&mut self, category: Category) -> bool {
        if let Some(pos) = Category::ALL.iter().position(|c| *c == category) {
            self.sidebar_selected = pos;
        }
        let link = self.navigator.category_link(category);
        let changed = self.navigator.follow(link);
        tracing::debug!(category = category.as_str(), changed, "Followed category link");
        self.needs_redraw = true;
        changed
    }

    /// Follow the category under the sidebar cursor.
    pub fn follow_sidebar_selection(&mut self) -> bool {
        match Category::ALL.get(self.sidebar_selected) {
            Some(category) => self.follow_category(*category),
            None => false,
        }
    }

    pub fn set_language(&mut self, language: Language) -> bool {
        let changed = self.navigator.set_language(language.as_str());
        tracing::debug!(language = language.as_str(), changed, "Language selected");
        self.needs_redraw = true;
        changed
    }

    // ------------------------------------------------------------------
    // Sidebar
    // ------------------------------------------------------------------

    pub fn sidebar_visible(&self) -> bool {
        self.sidebar_pref
            .unwrap_or(self.terminal_width >= layout::NARROW_BREAKPOINT)
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        let visible = !self.sidebar_visible();
        self.sidebar_pref = Some(visible);
        if !visible {
            self.focus = Focus::Cards;
        }
        self.needs_redraw = true;
        visible
    }

    // ------------------------------------------------------------------
    // Language picker
    // ------------------------------------------------------------------

    pub fn open_language_picker(&mut self) {
        let current = self
            .selection()
            .language_kind()
            .and_then(|l| Language::ALL.iter().position(|x| *x == l))
            .unwrap_or(0);
        self.language_picker = Some(current);
        self.needs_redraw = true;
    }

    pub fn close_language_picker(&mut self) {
        self.language_picker = None;
        self.needs_redraw = true;
    }

    pub fn picker_up(&mut self) {
        if let Some(i) = self.language_picker.as_mut() {
            *i = i.saturating_sub(1);
        }
    }

    pub fn picker_down(&mut self) {
        if let Some(i) = self.language_picker.as_mut() {
            *i = (*i + 1).min(Language::ALL.len() - 1);
        }
    }

    /// Apply the highlighted language and close the picker.
    pub fn commit_language_picker(&mut self) -> Option<Language> {
        let language = Language::ALL.get(self.language_picker.take()?).copied()?;
        self.set_language(language);
        Some(language)
    }

    // ------------------------------------------------------------------
    // Status & ticks
    // ------------------------------------------------------------------

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clear status message if expired. Returns true if a message was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

/// Abort in-flight loads so no task outlives the event loop.
impl Drop for App {
    fn drop(&mut self) {
        let pending = self.load_handles.len();
        for handle in self.load_handles.drain(..) {
            handle.abort();
        }
        if pending > 0 {
            tracing::debug!(pending, "Aborted outstanding feed loads on App drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tokio::time;
    use url::Url;

    fn test_app_with(config: &Config, query: &str) -> App {
        let base = Url::parse("http://127.0.0.1:9").unwrap();
        let loader = FeedLoader::new(base, Duration::from_secs(1)).unwrap();
        App::new(config, loader, QueryString::parse(query))
    }

    fn test_app(query: &str) -> App {
        test_app_with(&Config::default(), query)
    }

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            body: format!("{} body", title),
            link: format!("https://example.com/{}", title),
        }
    }

    fn feed(titles: &[&str]) -> FeedState {
        FeedState::from_articles(titles.iter().map(|t| article(t)).collect())
    }

    #[test]
    fn test_initial_state() {
        let app = test_app("");
        assert_eq!(app.selection(), ViewSelection::new("world", "english"));
        assert_eq!(app.sidebar_selected, 2);
        assert!(app.card_keys().is_empty());
        assert!(app.selected_article().is_none());
        assert!(app.feed.is_loading);
    }

    #[test]
    fn test_begin_load_marks_loading() {
        let mut app = test_app("category=tech");
        let (selection, generation) = app.begin_load();
        assert_eq!(selection.category, "tech");
        assert_eq!(generation, 1);
        assert!(app.feed.is_loading);
        assert_eq!(app.begin_load().1, 2);
    }

    #[test]
    fn test_apply_replaces_feed_and_resets_view_state() {
        let mut app = test_app("");
        let (sel, gen) = app.begin_load();
        app.apply_feed_loaded(&sel, gen, feed(&["A", "B", "C"]));

        app.selected_card = CardKey::Item(1);
        app.toggle_selected();
        app.scroll_offset = 3;
        assert!(app.expansion.is_expanded(CardKey::Item(1)));

        let (sel, gen) = app.begin_load();
        assert!(app.apply_feed_loaded(&sel, gen, feed(&["X"])));

        assert!(!app.feed.is_loading);
        assert!(app.expansion.is_empty());
        assert_eq!(app.selected_card, CardKey::Featured);
        assert_eq!(app.scroll_offset, 0);
        assert_eq!(app.feed.featured.as_ref().unwrap().title, "X");
        assert!(app.last_loaded_at.is_some());
    }

    #[test]
    fn test_last_resolved_wins_by_default() {
        let mut app = test_app("");
        app.follow_category(Category::Tech);
        let (tech_sel, tech_gen) = app.begin_load();
        app.follow_category(Category::Finance);
        let (fin_sel, fin_gen) = app.begin_load();

        // Finance resolves first, tech second
        assert!(app.apply_feed_loaded(&fin_sel, fin_gen, feed(&["finance"])));
        assert!(app.apply_feed_loaded(&tech_sel, tech_gen, feed(&["tech"])));

        assert_eq!(app.feed.featured.as_ref().unwrap().title, "tech");
        assert_eq!(app.selection().category, "finance");
    }

    #[test]
    fn test_stale_guard_discards_superseded_results() {
        let config = Config {
            discard_stale_responses: true,
            ..Config::default()
        };
        let mut app = test_app_with(&config, "");
        let (tech_sel, tech_gen) = app.begin_load();
        let (fin_sel, fin_gen) = app.begin_load();

        assert!(app.apply_feed_loaded(&fin_sel, fin_gen, feed(&["finance"])));
        assert!(!app.apply_feed_loaded(&tech_sel, tech_gen, feed(&["tech"])));
        assert_eq!(app.feed.featured.as_ref().unwrap().title, "finance");
    }

    #[test]
    fn test_toggle_without_cards_is_noop() {
        let mut app = test_app("");
        assert_eq!(app.toggle_selected(), None);
        assert!(app.expansion.is_empty());
    }

    #[test]
    fn test_grid_navigation() {
        let mut app = test_app("");
        let (sel, gen) = app.begin_load();
        app.apply_feed_loaded(&sel, gen, feed(&["F", "a", "b", "c", "d"]));
        app.grid_columns = 3;
        // Rows: [F], [a b c], [d]

        app.nav_down();
        assert_eq!(app.selected_card, CardKey::Item(0));
        app.nav_right();
        app.nav_right();
        assert_eq!(app.selected_card, CardKey::Item(2));
        app.nav_right();
        assert_eq!(app.selected_card, CardKey::Item(2));
        app.nav_down();
        assert_eq!(app.selected_card, CardKey::Item(3));
        app.nav_down();
        assert_eq!(app.selected_card, CardKey::Item(3));
        app.nav_up();
        assert_eq!(app.selected_card, CardKey::Item(0));
        app.nav_up();
        assert_eq!(app.selected_card, CardKey::Featured);
        app.nav_up();
        assert_eq!(app.selected_card, CardKey::Featured);
    }

    #[test]
    fn test_nav_left_from_first_column_moves_to_sidebar() {
        let mut app = test_app("");
        app.terminal_width = 120;
        let (sel, gen) = app.begin_load();
        app.apply_feed_loaded(&sel, gen, feed(&["F", "a"]));
        app.nav_left();
        assert_eq!(app.focus, Focus::Sidebar);
        app.nav_right();
        assert_eq!(app.focus, Focus::Cards);
    }

    #[test]
    fn test_sidebar_hidden_on_narrow_terminal_until_toggled() {
        let mut app = test_app("");
        app.terminal_width = 60;
        assert!(!app.sidebar_visible());
        app.cycle_focus();
        assert_eq!(app.focus, Focus::Cards);

        assert!(app.toggle_sidebar());
        assert!(app.sidebar_visible());
        app.cycle_focus();
        assert_eq!(app.focus, Focus::Sidebar);

        assert!(!app.toggle_sidebar());
        assert_eq!(app.focus, Focus::Cards);
    }

    #[test]
    fn test_follow_category_keeps_language() {
        let mut app = test_app("language=german&category=world");
        assert!(app.follow_category(Category::Sports));
        assert_eq!(app.selection(), ViewSelection::new("sports", "german"));
        assert_eq!(app.sidebar_selected, 4);
        assert!(!app.follow_category(Category::Sports));
    }

    #[test]
    fn test_sidebar_cursor_bounds() {
        let mut app = test_app("");
        app.focus = Focus::Sidebar;
        for _ in 0..10 {
            app.nav_down();
        }
        assert_eq!(app.sidebar_selected, Category::ALL.len() - 1);
        assert!(app.follow_sidebar_selection());
        assert_eq!(app.selection().category, "weather");
    }

    #[test]
    fn test_language_picker_flow() {
        let mut app = test_app("category=tech&language=spanish");
        app.open_language_picker();
        assert_eq!(app.language_picker, Some(1));
        app.picker_down();
        app.picker_down();
        assert_eq!(app.commit_language_picker(), Some(Language::Japanese));
        assert!(app.language_picker.is_none());
        assert_eq!(app.selection(), ViewSelection::new("tech", "japanese"));
        assert_eq!(app.navigator.query().get("category"), Some("tech"));
    }

    #[test]
    fn test_picker_bounds() {
        let mut app = test_app("");
        app.open_language_picker();
        app.picker_up();
        assert_eq!(app.language_picker, Some(0));
        for _ in 0..20 {
            app.picker_down();
        }
        assert_eq!(app.language_picker, Some(Language::ALL.len() - 1));
    }

    #[test]
    fn test_theme_from_config_and_cycle() {
        let config = Config {
            theme: "light".to_string(),
            ..Config::default()
        };
        let mut app = test_app_with(&config, "");
        assert_eq!(app.theme_variant, ThemeVariant::Light);
        assert_eq!(app.cycle_theme(), "Dark");
        assert_eq!(app.style("status_bar"), ThemeVariant::Dark.palette().status_bar);
    }

    #[tokio::test]
    async fn test_status_expires_after_3_seconds() {
        let mut app = test_app("");
        time::pause();
        app.set_status("Test message");

        time::advance(Duration::from_secs(2)).await;
        assert!(!app.clear_expired_status());
        assert!(app.status_message.is_some());

        time::advance(Duration::from_secs(2)).await;
        assert!(app.clear_expired_status());
        assert!(app.status_message.is_none());
    }
}
