//! Main TUI application state and logic

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame, Terminal,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use super::events::AppEvent;
use super::ui::{centered_rect, Styles};
use super::view;
use crate::client::{DataClient, HttpDataClient};
use crate::config::Config;
use crate::form::FieldKind;
use crate::resource::{Orders, Products, Resource, ResourceKind, Reviews, Users};
use crate::screen::ResourceScreen;
use crate::state::{Action, Effect};

/// Connects a resource to its slot in the app and its event variant
pub trait Routed: Resource + Sized {
    fn event(action: Action<Self::Entity>) -> AppEvent;
    fn screen(app: &mut App) -> &mut ResourceScreen<Self>;
}

impl Routed for Orders {
    fn event(action: Action<Self::Entity>) -> AppEvent {
        AppEvent::Orders(action)
    }

    fn screen(app: &mut App) -> &mut ResourceScreen<Self> {
        &mut app.orders
    }
}

impl Routed for Products {
    fn event(action: Action<Self::Entity>) -> AppEvent {
        AppEvent::Products(action)
    }

    fn screen(app: &mut App) -> &mut ResourceScreen<Self> {
        &mut app.products
    }
}

impl Routed for Reviews {
    fn event(action: Action<Self::Entity>) -> AppEvent {
        AppEvent::Reviews(action)
    }

    fn screen(app: &mut App) -> &mut ResourceScreen<Self> {
        &mut app.reviews
    }
}

impl Routed for Users {
    fn event(action: Action<Self::Entity>) -> AppEvent {
        AppEvent::Users(action)
    }

    fn screen(app: &mut App) -> &mut ResourceScreen<Self> {
        &mut app.users
    }
}

/// Main TUI application state
pub struct App {
    /// Current active screen
    pub current_screen: ResourceKind,
    /// Application configuration
    pub config: Config,

    // Screen states
    pub orders: ResourceScreen<Orders>,
    pub products: ResourceScreen<Products>,
    pub reviews: ResourceScreen<Reviews>,
    pub users: ResourceScreen<Users>,

    // Global application state
    pub should_quit: bool,
    pub show_help_popup: bool,
    /// Cards skipped at the top of each screen's list
    pub list_scroll: [usize; 4],

    client: Arc<dyn DataClient>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl App {
    /// Create a new TUI application talking to the configured API
    pub fn new(config: Config) -> Result<Self> {
        let client = HttpDataClient::new(&config)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    pub fn with_client(config: Config, client: Arc<dyn DataClient>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            current_screen: ResourceKind::Orders,
            config,

            orders: ResourceScreen::new(),
            products: ResourceScreen::new(),
            reviews: ResourceScreen::new(),
            users: ResourceScreen::new(),

            should_quit: false,
            show_help_popup: false,
            list_scroll: [0; 4],

            client,
            events_tx,
            events_rx,
        }
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.navigate_to_screen(self.current_screen);

        loop {
            // Draw the UI
            terminal.draw(|f| self.draw(f))?;

            // Handle events
            if crossterm::event::poll(Duration::from_millis(50))? {
                if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
                    self.handle_key_event(key).await?;
                }
            }

            while let Ok(event) = self.events_rx.try_recv() {
                self.handle_app_event(event);
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Switch screens, loading the list on a screen's first display
    pub fn navigate_to_screen(&mut self, screen: ResourceKind) {
        debug!("Switching to {} screen", screen);
        self.current_screen = screen;
        match screen {
            ResourceKind::Orders => self.mount::<Orders>(),
            ResourceKind::Products => self.mount::<Products>(),
            ResourceKind::Reviews => self.mount::<Reviews>(),
            ResourceKind::Users => self.mount::<Users>(),
        }
    }

    fn mount<R: Routed>(&mut self) {
        if let Some(effect) = R::screen(self).mount() {
            self.dispatch::<R>(effect);
        }
    }

    /// Start an effect's request on a background task
    fn dispatch<R: Routed>(&mut self, effect: Effect) {
        R::screen(self).begin(&effect);

        let client = Arc::clone(&self.client);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let action = ResourceScreen::<R>::execute(client.as_ref(), effect).await;
            // The receiver is gone only once the app has shut down
            let _ = events.send(R::event(action));
        });
    }

    /// Apply the outcome of a background request
    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Orders(action) => self.settle::<Orders>(action),
            AppEvent::Products(action) => self.settle::<Products>(action),
            AppEvent::Reviews(action) => self.settle::<Reviews>(action),
            AppEvent::Users(action) => self.settle::<Users>(action),
        }
    }

    fn settle<R: Routed>(&mut self, action: Action<R::Entity>) {
        let next = R::screen(self).apply(action);

        // A reload may have shortened the list
        let last = R::screen(self).state.items.len().saturating_sub(1);
        let slot = R::KIND.index();
        self.list_scroll[slot] = self.list_scroll[slot].min(last);

        if let Some(next) = next {
            self.dispatch::<R>(next);
        }
    }

    /// Handle keyboard input events
    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global shortcuts
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::F(1) => {
                self.show_help_popup = !self.show_help_popup;
                return Ok(());
            }
            // '?' is typed into fields that take it, and toggles help everywhere else
            KeyCode::Char('?') if self.show_help_popup || !self.focused_field_accepts('?') => {
                self.show_help_popup = !self.show_help_popup;
                return Ok(());
            }
            KeyCode::Esc => {
                if self.show_help_popup {
                    self.show_help_popup = false;
                } else {
                    info!("Quit requested");
                    self.should_quit = true;
                }
                return Ok(());
            }
            KeyCode::F(n @ 2..=5) => {
                self.navigate_to_screen(ResourceKind::ALL[usize::from(n - 2)]);
                return Ok(());
            }
            KeyCode::Right if ctrl => {
                self.navigate_to_screen(self.current_screen.next());
                return Ok(());
            }
            KeyCode::Left if ctrl => {
                self.navigate_to_screen(self.current_screen.previous());
                return Ok(());
            }
            _ => {}
        }

        // Screen-specific event handling
        if !self.show_help_popup {
            match self.current_screen {
                ResourceKind::Orders => self.handle_screen_event::<Orders>(key),
                ResourceKind::Products => self.handle_screen_event::<Products>(key),
                ResourceKind::Reviews => self.handle_screen_event::<Reviews>(key),
                ResourceKind::Users => self.handle_screen_event::<Users>(key),
            }
        }

        Ok(())
    }

    fn handle_screen_event<R: Routed>(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let slot = R::KIND.index();

        match key.code {
            KeyCode::Char('r') if ctrl => {
                self.dispatch::<R>(Effect::Fetch);
            }
            KeyCode::Enter => {
                if let Some(effect) = R::screen(self).submit() {
                    self.dispatch::<R>(effect);
                }
            }
            KeyCode::PageDown => {
                let count = R::screen(self).state.items.len();
                if self.list_scroll[slot] + 1 < count {
                    self.list_scroll[slot] += 1;
                }
            }
            KeyCode::PageUp => {
                self.list_scroll[slot] = self.list_scroll[slot].saturating_sub(1);
            }
            _ => Self::handle_form_key(R::screen(self), key),
        }
    }

    fn handle_form_key<R: Resource>(screen: &mut ResourceScreen<R>, key: KeyEvent) {
        let form = &mut screen.state.form;
        let on_select = matches!(
            form.current().map(|f| f.spec.kind),
            Some(FieldKind::Select(_))
        );

        match key.code {
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.previous_field(),
            KeyCode::Down if on_select => {
                if let Some(field) = form.current_mut() {
                    field.select_next();
                }
            }
            KeyCode::Up if on_select => {
                if let Some(field) = form.current_mut() {
                    field.select_previous();
                }
            }
            KeyCode::Down => form.next_field(),
            KeyCode::Up => form.previous_field(),
            _ => {
                let Some(field) = form.current_mut() else {
                    return;
                };
                match key.code {
                    KeyCode::Char(c) => field.insert_char(c),
                    KeyCode::Backspace => field.delete_char(),
                    KeyCode::Delete => field.delete_char_forward(),
                    KeyCode::Left => field.move_cursor_left(),
                    KeyCode::Right => field.move_cursor_right(),
                    KeyCode::Home => field.move_cursor_to_start(),
                    KeyCode::End => field.move_cursor_to_end(),
                    _ => {}
                }
            }
        }
    }

    fn focused_field_accepts(&self, c: char) -> bool {
        let form = match self.current_screen {
            ResourceKind::Orders => &self.orders.state.form,
            ResourceKind::Products => &self.products.state.form,
            ResourceKind::Reviews => &self.reviews.state.form,
            ResourceKind::Users => &self.users.state.form,
        };
        form.current().is_some_and(|field| field.accepts(c))
    }

    fn current_is_loading(&self) -> bool {
        match self.current_screen {
            ResourceKind::Orders => self.orders.state.is_loading(),
            ResourceKind::Products => self.products.state.is_loading(),
            ResourceKind::Reviews => self.reviews.state.is_loading(),
            ResourceKind::Users => self.users.state.is_loading(),
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        // Main layout: tabs on top, status bar at bottom, content area between
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_tabs(f, chunks[0]);

        let scroll = self.list_scroll[self.current_screen.index()];
        match self.current_screen {
            ResourceKind::Orders => view::draw(f, chunks[1], &self.orders, scroll),
            ResourceKind::Products => view::draw(f, chunks[1], &self.products, scroll),
            ResourceKind::Reviews => view::draw(f, chunks[1], &self.reviews, scroll),
            ResourceKind::Users => view::draw(f, chunks[1], &self.users, scroll),
        }

        self.draw_status_bar(f, chunks[2]);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    fn draw_tabs(&self, f: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ResourceKind::ALL
            .iter()
            .enumerate()
            .map(|(i, kind)| Line::from(format!("F{} {}", i + 2, kind.title())))
            .collect();

        let tabs = Tabs::new(titles)
            .select(self.current_screen.index())
            .highlight_style(Styles::selected())
            .block(
                Block::default()
                    .title("Back Office")
                    .title_style(Styles::title())
                    .borders(Borders::ALL),
            );

        f.render_widget(tabs, area);
    }

    /// Draw status bar with current screen info and shortcuts
    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let (status_text, style) = if self.current_is_loading() {
            (
                format!("⟳ Loading {}...", self.current_screen),
                Styles::warning(),
            )
        } else {
            (
                format!(
                    "{} | {} | Tab: Next field | Enter: Submit | Ctrl+R: Refresh | F1: Help | Esc: Quit",
                    self.current_screen.title(),
                    self.config.base_url
                ),
                Style::default().fg(Color::Gray),
            )
        };

        let status_bar = Paragraph::new(status_text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(status_bar, area);
    }

    /// Draw help popup with shortcuts
    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 60, area);

        f.render_widget(Clear, popup_area);

        let help_content = "Screens:\n\
            F2 Orders | F3 Products | F4 Reviews | F5 Users\n\
            Ctrl+←/→ - Previous/next screen\n\n\
            Form:\n\
            Tab / Shift+Tab - Next/previous field\n\
            ↑/↓ - Move between fields, or choose an option\n\
            Enter - Submit the form\n\n\
            List:\n\
            PgUp/PgDn - Scroll cards\n\
            Ctrl+R - Reload from the server\n\n\
            F1 or ? (outside text fields) - Toggle this help\n\
            Esc / Ctrl+C - Quit";

        let help_popup = Paragraph::new(help_content)
            .block(
                Block::default()
                    .title("Help - Shortcuts")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        f.render_widget(help_popup, popup_area);
    }

    /// Whether any screen still has a request in flight
    pub fn any_loading(&self) -> bool {
        self.orders.state.is_loading()
            || self.products.state.is_loading()
            || self.reviews.state.is_loading()
            || self.users.state.is_loading()
    }

    /// Apply background results until no request is left in flight
    pub async fn settle_pending(&mut self) {
        while self.any_loading() {
            match self.events_rx.recv().await {
                Some(event) => self.handle_app_event(event),
                None => break,
            }
        }
    }
}
