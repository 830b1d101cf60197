//! Form field component for user input

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::form::{FieldKind, FormField};
use crate::tui::ui::Styles;

/// Rows a field occupies, borders included
pub fn height(field: &FormField) -> u16 {
    match field.spec.kind {
        FieldKind::TextArea => 5,
        _ => 3,
    }
}

/// Display column of the cursor, relative to the start of the value
pub fn cursor_column(field: &FormField) -> u16 {
    let shown = field.display_value();
    let before: String = shown.chars().take(field.cursor_position).collect();
    before.width() as u16
}

/// Render the form field
pub fn render(field: &FormField, focused: bool, f: &mut Frame, area: Rect) {
    let value = field.display_value();
    let showing_placeholder = value.is_empty() && !field.spec.placeholder.is_empty();
    let display_text = if showing_placeholder {
        field.spec.placeholder.to_string()
    } else {
        value
    };

    let border_style = if focused {
        Styles::active_border()
    } else {
        Styles::inactive_border()
    };

    let title = match field.spec.kind {
        FieldKind::Select(_) => format!("{} (↑/↓ to choose)", field.spec.label),
        _ => field.spec.label.to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let text_style = if showing_placeholder {
        Styles::inactive()
    } else {
        Styles::default()
    };

    let mut paragraph = Paragraph::new(display_text)
        .style(text_style)
        .block(block);
    if field.spec.kind == FieldKind::TextArea {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }

    f.render_widget(paragraph, area);

    // Render cursor if focused and typing is possible
    if focused && !matches!(field.spec.kind, FieldKind::Select(_)) {
        let cursor_x = area.x + 1 + cursor_column(field);
        let cursor_y = area.y + 1;
        if cursor_x < area.x + area.width.saturating_sub(1) {
            f.set_cursor(cursor_x, cursor_y);
        }
    }
}
