use crate::app::{App, Focus};
use crate::nav::{Category, Language};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the category links and the current language.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 4 || area.height < 3 {
        return;
    }

    let selection = app.selection();
    let active = selection.category_kind();
    let focused = app.focus == Focus::Sidebar;

    let mut items: Vec<ListItem> = Category::ALL
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let marker = if Some(*category) == active { "● " } else { "  " };
            let style = if Some(*category) == active {
                app.style("sidebar_active")
            } else {
                app.style("sidebar_item")
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}{}", marker, category.label()), style),
                Span::styled(format!("  {}", i + 1), app.style("header_meta")),
            ]))
        })
        .collect();

    let language = selection
        .language_kind()
        .map(Language::label)
        .unwrap_or(selection.language.as_str());
    items.push(ListItem::new(Line::default()));
    items.push(ListItem::new(Line::from(Span::styled(
        format!("Language: {}", language),
        app.style("header_meta"),
    ))));
    items.push(ListItem::new(Line::from(Span::styled(
        "  [L] change",
        app.style("header_meta"),
    ))));

    let border_style = if focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let highlight = if focused {
        app.style("sidebar_selected")
    } else {
        app.style("sidebar_item")
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Categories "),
        )
        .highlight_style(highlight);

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.sidebar_selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}
