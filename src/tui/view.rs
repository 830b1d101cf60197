//! Drawing of a resource screen: create form, error line, submit button and card list

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::resource::Resource;
use crate::screen::ResourceScreen;
use crate::tui::components::form_field;
use crate::tui::ui::Styles;

/// Draw a resource screen; `scroll` is the number of cards skipped at the top of the list.
pub fn draw<R: Resource>(f: &mut Frame, area: Rect, screen: &ResourceScreen<R>, scroll: usize) {
    let form = &screen.state.form;

    let mut constraints: Vec<Constraint> = form
        .fields
        .iter()
        .map(|field| Constraint::Length(form_field::height(field)))
        .collect();
    constraints.push(Constraint::Length(1)); // Error line
    constraints.push(Constraint::Length(3)); // Submit button
    constraints.push(Constraint::Min(0)); // List

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in form.fields.iter().enumerate() {
        form_field::render(field, i == form.current_field, f, chunks[i]);
    }

    let n = form.fields.len();
    draw_error_line(f, chunks[n], screen.state.error.as_deref());
    draw_submit_button(f, chunks[n + 1], screen);
    draw_list(f, chunks[n + 2], screen, scroll);
}

fn draw_error_line(f: &mut Frame, area: Rect, error: Option<&str>) {
    if let Some(error) = error {
        let line = Paragraph::new(error.to_string())
            .style(Styles::error())
            .alignment(Alignment::Center);
        f.render_widget(line, area);
    }
}

fn draw_submit_button<R: Resource>(f: &mut Frame, area: Rect, screen: &ResourceScreen<R>) {
    let style = if screen.submit_disabled() {
        Styles::disabled()
    } else {
        Styles::button()
    };

    let button = Paragraph::new(format!("+ {} (Enter)", screen.submit_label()))
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Styles::inactive_border()));

    f.render_widget(button, area);
}

fn draw_list<R: Resource>(f: &mut Frame, area: Rect, screen: &ResourceScreen<R>, scroll: usize) {
    let items = &screen.state.items;
    let block = Block::default()
        .title(format!("Existing {} ({})", R::KIND.title(), items.len()))
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::inactive_border());

    let placeholder = match R::MESSAGES.loading_list {
        Some(loading) if screen.state.is_loading() => Some(loading),
        _ if items.is_empty() => R::MESSAGES.empty_list,
        _ => None,
    };

    if let Some(text) = placeholder {
        let paragraph = Paragraph::new(text)
            .style(Styles::inactive())
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let cards: Vec<ListItem> = items
        .iter()
        .skip(scroll)
        .map(|entity| {
            let mut lines = R::card(entity);
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    f.render_widget(List::new(cards).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Orders, Users};
    use crate::state::{Action, Effect};
    use ratatui::{backend::TestBackend, Terminal};

    fn render<R: Resource>(screen: &ResourceScreen<R>) -> String {
        let backend = TestBackend::new(60, 50);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                draw(f, area, screen, 0)
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_orders_screen_renders_one_card() {
        let mut screen = ResourceScreen::<Orders>::new();
        let orders = serde_json::from_value(serde_json::json!([{
            "order_id": 1,
            "user_id": 2,
            "total_amount": 9.99,
            "status": "shipped",
            "order_date": "2024-01-01T00:00:00Z"
        }]))
        .unwrap();
        screen.apply(Action::Fetched(orders));

        let text = render(&screen);
        assert!(text.contains("User ID: 2"));
        assert!(text.contains("Total: $9.99"));
        assert!(text.contains("Status: shipped"));
        assert!(text.contains("Create Order"));
    }

    #[test]
    fn test_empty_orders_placeholder() {
        let screen = ResourceScreen::<Orders>::new();
        assert!(render(&screen).contains("No orders found"));
    }

    #[test]
    fn test_users_loading_shows_processing() {
        let mut screen = ResourceScreen::<Users>::new();
        screen.begin(&Effect::Fetch);
        let text = render(&screen);
        assert!(text.contains("Processing..."));
        assert!(text.contains("Loading..."));
    }

    #[test]
    fn test_error_line_is_drawn() {
        let mut screen = ResourceScreen::<Users>::new();
        screen.submit();
        assert!(render(&screen).contains("All fields are required"));
    }
}
