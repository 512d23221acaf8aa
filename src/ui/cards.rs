//! Featured story and card grid.

use crate::app::{App, Focus};
use crate::theme::blend;
use crate::view::{body_lines, card_height, grid_columns, layout, CardView};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the grid rows that fit in `area`, scrolled so the focused card is
/// visible.
pub(super) fn render(
    f: &mut Frame,
    app: &mut App,
    area: Rect,
    featured: Option<CardView>,
    cards: Vec<CardView>,
) {
    if area.width < 4 || area.height < 3 {
        return;
    }

    let columns = grid_columns(area.width);
    app.set_grid_columns(columns);

    let mut rows: Vec<Vec<CardView>> = Vec::new();
    if let Some(card) = featured {
        rows.push(vec![card]);
    }
    let mut grid = cards.into_iter().peekable();
    while grid.peek().is_some() {
        rows.push(grid.by_ref().take(columns).collect());
    }

    let heights: Vec<u16> = rows
        .iter()
        .map(|row| {
            let width = column_width(area.width, row_columns(row, columns));
            row.iter().map(|c| card_height(c, width)).max().unwrap_or(0)
        })
        .collect();

    let selected_row = rows
        .iter()
        .position(|row| row.iter().any(|c| c.key == app.selected_card))
        .unwrap_or(0);
    app.scroll_offset = layout::scroll_to_show(&heights, area.height, app.scroll_offset, selected_row);

    let bottom = area.y + area.height;
    let mut y = area.y;
    for (row, height) in rows.iter().zip(&heights).skip(app.scroll_offset) {
        if y >= bottom {
            break;
        }
        let height = (*height).min(bottom - y);
        let slots = row_columns(row, columns);
        let width = column_width(area.width, slots);
        for (i, card) in row.iter().enumerate() {
            let rect = Rect::new(area.x + width * i as u16, y, width, height);
            let focused = app.focus == Focus::Cards && card.key == app.selected_card;
            render_card(f, app, card, rect, focused);
        }
        y += height;
    }
}

/// The featured row always spans the full width.
fn row_columns(row: &[CardView], columns: usize) -> usize {
    if row.first().is_some_and(CardView::is_featured) {
        1
    } else {
        columns
    }
}

fn column_width(total: u16, columns: usize) -> u16 {
    total / u16::try_from(columns.max(1)).unwrap_or(1)
}

fn render_card(f: &mut Frame, app: &App, card: &CardView, area: Rect, focused: bool) {
    let border = if focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = usize::from(inner.width).max(1);
    let mut lines: Vec<Line> = Vec::new();

    lines.push(accent_bar(app, card, inner.width));

    if card.is_featured() {
        lines.push(Line::from(Span::styled(" Featured ", app.style("featured_badge"))));
    }

    for title in layout::title_lines(card, width) {
        lines.push(Line::from(Span::styled(title, app.style("card_title"))));
    }

    let body = body_lines(&card.paragraphs, width, card.expanded);
    for line in body.lines {
        lines.push(Line::from(Span::styled(line, app.style("card_body"))));
    }

    lines.push(Line::default());
    lines.push(action_line(app, card, focused));

    f.render_widget(Paragraph::new(lines), inner);
}

/// One row of half blocks shaded across the card's accent gradient.
fn accent_bar(app: &App, card: &CardView, width: u16) -> Line<'static> {
    let gradient = app.gradient(card.accent);
    let span = f32::from(width.saturating_sub(1).max(1));
    let spans: Vec<Span> = (0..width)
        .map(|x| {
            let color = blend(gradient, f32::from(x) / span);
            Span::styled("▀", Style::default().fg(color))
        })
        .collect();
    Line::from(spans)
}

fn action_line(app: &App, card: &CardView, focused: bool) -> Line<'static> {
    let action = app.style("card_action");
    let mut spans = vec![Span::styled(card.toggle_label(), action)];
    if !card.link.is_empty() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled("Original ↗", app.style("card_link")));
    }
    if focused {
        let hint = if card.link.is_empty() {
            "  [Enter]"
        } else {
            "  [Enter] [o]"
        };
        spans.push(Span::styled(hint, app.style("header_meta")));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Accent, CardKey};

    fn card(key: CardKey) -> CardView {
        CardView {
            key,
            title: "T".to_string(),
            paragraphs: vec!["p".to_string()],
            link: "https://example.com".to_string(),
            expanded: false,
            accent: Accent::Cycle(0),
        }
    }

    #[test]
    fn test_featured_row_spans_full_width() {
        assert_eq!(row_columns(&[card(CardKey::Featured)], 3), 1);
        assert_eq!(row_columns(&[card(CardKey::Item(0))], 3), 3);
        assert_eq!(row_columns(&[], 2), 2);
    }

    #[test]
    fn test_column_width() {
        assert_eq!(column_width(120, 3), 40);
        assert_eq!(column_width(100, 2), 50);
        assert_eq!(column_width(50, 0), 50);
    }
}
