//! Render functions for the TUI.
//!
//! Lays out the sidebar, header, card grid and status bar, then draws any
//! overlays on top.

use crate::app::App;
use crate::nav::Language;
use crate::view::{heading, PageView};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::loop_runner::SPINNER_FRAMES;
use super::{cards, help, picker, sidebar, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Width of the category sidebar, borders included.
const SIDEBAR_WIDTH: u16 = 24;

const SPINNER: [&str; SPINNER_FRAMES] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Guard against zero-size frames
    if area.width < 1 || area.height < 1 {
        return;
    }
    app.terminal_width = area.width;

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let [main, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let content = if app.sidebar_visible() {
        let [side, content] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)]).areas(main);
        sidebar::render(f, app, side);
        content
    } else {
        main
    };

    // While loading the main area holds the spinner and nothing else
    if app.feed.is_loading {
        render_body(f, app, content);
    } else {
        let [header_area, body_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(content);
        render_header(f, app, header_area);
        render_body(f, app, body_area);
    }
    status::render(f, app, status_area);

    if app.language_picker.is_some() {
        picker::render(f, app);
    }

    if app.show_help {
        help::render(f, app);
    }
}

/// Heading, language and the shareable query string.
fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let selection = app.selection();
    let language = selection
        .language_kind()
        .map(Language::label)
        .unwrap_or(selection.language.as_str());

    let mut title = vec![Span::styled(heading(&selection.category), app.style("heading"))];
    if let Some(at) = app.last_loaded_at {
        title.push(Span::styled(
            format!("  updated {}", at.format("%H:%M")),
            app.style("header_meta"),
        ));
    }

    let lines = vec![
        Line::from(title),
        Line::from(Span::styled(
            format!("Language: {}   {}", language, app.navigator.query()),
            app.style("header_meta"),
        )),
    ];

    let inner = Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    };
    f.render_widget(Paragraph::new(lines), inner);
}

fn render_body(f: &mut Frame, app: &mut App, area: Rect) {
    match PageView::build(&app.feed, &app.expansion) {
        PageView::Loading => {
            let spinner = SPINNER[app.spinner_frame % SPINNER_FRAMES];
            let text = Line::from(vec![
                Span::styled(spinner, app.style("spinner")),
                Span::raw(" Loading news..."),
            ]);
            f.render_widget(
                Paragraph::new(text).alignment(Alignment::Center),
                centered_line(area),
            );
        }
        page if page.is_empty() => {
            f.render_widget(
                Paragraph::new(Span::styled("No articles", app.style("empty_state")))
                    .alignment(Alignment::Center),
                centered_line(area),
            );
        }
        PageView::Ready { featured, cards } => {
            cards::render(f, app, area, featured, cards);
        }
    }
}

/// One-line rect vertically centered in `area`.
fn centered_line(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    }
}

/// Create a centered rectangle with the given percentage of the parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
