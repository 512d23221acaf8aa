use super::expansion::CardKey;
use super::page::CardView;
use crate::util::{truncate_to_width, wrap_text};

/// Lines of body text shown by a collapsed card.
pub const PREVIEW_LINES: usize = 3;

/// Terminal width below which the grid drops to two columns.
pub const WIDE_BREAKPOINT: u16 = 120;
/// Terminal width below which the grid is a single column.
pub const NARROW_BREAKPOINT: u16 = 80;

/// Fixed rows in every card: top/bottom border, accent bar, blank spacer,
/// action hints.
const CARD_CHROME_ROWS: usize = 5;

/// Grid columns for a main-area width: 1 narrow, 2 medium, 3 wide.
pub fn grid_columns(width: u16) -> usize {
    if width < NARROW_BREAKPOINT {
        1
    } else if width < WIDE_BREAKPOINT {
        2
    } else {
        3
    }
}

/// Body text of a card after wrapping and (when collapsed) clamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyLines {
    pub lines: Vec<String>,
    /// True when the preview hid part of the text.
    pub truncated: bool,
}

/// Wrap paragraphs to `width`, separating them with a blank line.
///
/// Collapsed cards keep the first [`PREVIEW_LINES`] lines and mark the cut
/// with an ellipsis.
pub fn body_lines(paragraphs: &[String], width: usize, expanded: bool) -> BodyLines {
    let mut lines = Vec::new();
    for (i, paragraph) in paragraphs.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(wrap_text(paragraph, width));
    }

    if expanded || lines.len() <= PREVIEW_LINES {
        return BodyLines {
            lines,
            truncated: false,
        };
    }

    lines.truncate(PREVIEW_LINES);
    if let Some(last) = lines.last_mut() {
        let marked = format!("{} ...", last);
        *last = truncate_to_width(&marked, width).into_owned();
    }
    BodyLines {
        lines,
        truncated: true,
    }
}

/// Wrapped title lines for a card.
pub fn title_lines(card: &CardView, width: usize) -> Vec<String> {
    wrap_text(&card.title, width)
}

/// Total height of a card drawn `width` columns wide, borders included.
pub fn card_height(card: &CardView, width: u16) -> u16 {
    let inner = usize::from(width.saturating_sub(2)).max(1);
    let badge = usize::from(card.is_featured());
    let rows = CARD_CHROME_ROWS
        + badge
        + title_lines(card, inner).len()
        + body_lines(&card.paragraphs, inner, card.expanded).lines.len();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Arrange card keys into rows: the featured card alone on top, then the
/// grid cards `columns` per row in order.
pub fn grid_rows(has_featured: bool, card_count: usize, columns: usize) -> Vec<Vec<CardKey>> {
    let columns = columns.max(1);
    let mut rows = Vec::new();
    if has_featured {
        rows.push(vec![CardKey::Featured]);
    }
    let keys: Vec<CardKey> = (0..card_count).map(CardKey::Item).collect();
    rows.extend(keys.chunks(columns).map(<[CardKey]>::to_vec));
    rows
}

/// Row containing `key`, if any.
pub fn row_of(rows: &[Vec<CardKey>], key: CardKey) -> Option<usize> {
    rows.iter().position(|row| row.contains(&key))
}

/// Smallest adjustment of `scroll` (first visible row) that keeps
/// `selected` on screen given per-row heights and the viewport height.
pub fn scroll_to_show(heights: &[u16], viewport: u16, scroll: usize, selected: usize) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let selected = selected.min(heights.len() - 1);
    if selected < scroll {
        return selected;
    }
    let mut top = scroll.min(selected);
    loop {
        let used: u32 = heights[top..=selected].iter().map(|h| u32::from(*h)).sum();
        if used <= u32::from(viewport) || top == selected {
            return top;
        }
        top += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::page::Accent;
    use pretty_assertions::assert_eq;

    fn card(key: CardKey, title: &str, paragraphs: &[&str], expanded: bool) -> CardView {
        CardView {
            key,
            title: title.to_string(),
            paragraphs: paragraphs.iter().map(|p| p.to_string()).collect(),
            link: String::new(),
            expanded,
            accent: Accent::Cycle(0),
        }
    }

    #[test]
    fn test_grid_columns_breakpoints() {
        assert_eq!(grid_columns(40), 1);
        assert_eq!(grid_columns(79), 1);
        assert_eq!(grid_columns(80), 2);
        assert_eq!(grid_columns(119), 2);
        assert_eq!(grid_columns(120), 3);
        assert_eq!(grid_columns(300), 3);
    }

    #[test]
    fn test_body_lines_separate_paragraphs() {
        let body = body_lines(&["p1".to_string(), "p2".to_string()], 20, false);
        assert_eq!(body.lines, vec!["p1", "", "p2"]);
        assert!(!body.truncated);
    }

    #[test]
    fn test_collapsed_body_clamped_to_three_lines() {
        let paragraphs = vec!["one two three four five six seven eight".to_string()];
        let body = body_lines(&paragraphs, 10, false);
        assert_eq!(body.lines.len(), PREVIEW_LINES);
        assert!(body.truncated);
        assert!(body.lines[2].ends_with("..."));
    }

    #[test]
    fn test_expanded_body_shows_everything() {
        let paragraphs = vec!["one two three four five six seven eight".to_string()];
        let body = body_lines(&paragraphs, 10, true);
        assert_eq!(
            body.lines,
            vec!["one two", "three four", "five six", "seven", "eight"]
        );
        assert!(!body.truncated);
    }

    #[test]
    fn test_card_height_grows_when_expanded() {
        let text = ["a b c d e f g h i j k l m n o p q r s t u v w x y z"];
        let collapsed = card(CardKey::Item(0), "Title", &text, false);
        let expanded = card(CardKey::Item(0), "Title", &text, true);
        assert_eq!(card_height(&collapsed, 12), 5 + 1 + 3);
        assert!(card_height(&expanded, 12) > card_height(&collapsed, 12));
    }

    #[test]
    fn test_featured_card_has_badge_row() {
        let plain = card(CardKey::Item(0), "T", &["x"], false);
        let featured = card(CardKey::Featured, "T", &["x"], false);
        assert_eq!(card_height(&featured, 30), card_height(&plain, 30) + 1);
    }

    #[test]
    fn test_grid_rows_layout() {
        let rows = grid_rows(true, 5, 2);
        assert_eq!(
            rows,
            vec![
                vec![CardKey::Featured],
                vec![CardKey::Item(0), CardKey::Item(1)],
                vec![CardKey::Item(2), CardKey::Item(3)],
                vec![CardKey::Item(4)],
            ]
        );
        assert_eq!(row_of(&rows, CardKey::Item(3)), Some(2));
        assert_eq!(row_of(&rows, CardKey::Item(9)), None);
        assert!(grid_rows(false, 0, 3).is_empty());
    }

    #[test]
    fn test_scroll_to_show() {
        let heights = [10, 10, 10, 10];
        // Already visible
        assert_eq!(scroll_to_show(&heights, 25, 0, 1), 0);
        // Scroll down just enough
        assert_eq!(scroll_to_show(&heights, 25, 0, 3), 2);
        // Scroll up to selection
        assert_eq!(scroll_to_show(&heights, 25, 3, 1), 1);
        // Row taller than viewport still becomes the top row
        assert_eq!(scroll_to_show(&[50, 50], 10, 0, 1), 1);
        assert_eq!(scroll_to_show(&[], 10, 4, 2), 0);
    }
}
