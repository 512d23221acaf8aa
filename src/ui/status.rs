use crate::app::{App, Focus};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.language_picker.is_some() {
        Cow::Borrowed("[j/k]choose [Enter]select [Esc]cancel")
    } else {
        match app.focus {
            Focus::Sidebar => {
                Cow::Borrowed("[j/k]move [Enter]open category [Tab]articles [L]anguage [?]help [q]uit")
            }
            Focus::Cards => Cow::Borrowed(
                "[hjkl]move [Enter]read more [o]riginal [1-6]category [L]anguage [c]ategories [?]help [q]uit",
            ),
        }
    };

    f.render_widget(Paragraph::new(text).style(app.style("status_bar")), area);
}
