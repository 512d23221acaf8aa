//! Language selector overlay.

use crate::app::App;
use crate::nav::Language;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

/// Overlay width, borders included.
const WIDTH: u16 = 28;

/// Render the seven-language picker centered over the dashboard.
pub fn render(f: &mut Frame, app: &App) {
    let Some(cursor) = app.language_picker else {
        return;
    };

    let area = f.area();
    // Languages plus borders and a hint row
    let height = u16::try_from(Language::ALL.len()).unwrap_or(u16::MAX) + 3;
    let overlay = Rect {
        x: area.x + area.width.saturating_sub(WIDTH) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: WIDTH.min(area.width),
        height: height.min(area.height),
    };
    if overlay.height < 3 {
        return;
    }

    f.render_widget(Clear, overlay);

    let current = app.selection().language_kind();
    let mut items: Vec<ListItem> = Language::ALL
        .iter()
        .map(|language| {
            let mark = if Some(*language) == current { "✓ " } else { "  " };
            ListItem::new(Line::from(Span::styled(
                format!("{}{}", mark, language.label()),
                app.style("picker_item"),
            )))
        })
        .collect();
    items.push(ListItem::new(Line::from(Span::styled(
        "Enter select · Esc cancel",
        app.style("header_meta"),
    ))));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(" Language "),
        )
        .highlight_style(app.style("picker_selected"));

    let mut state = ListState::default();
    state.select(Some(cursor));
    f.render_stateful_widget(list, overlay, &mut state);
}
