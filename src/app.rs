//! Application struct and event loop.
//!
//! Owns the terminal, the view state and the fetch dispatcher. Fetch
//! completions arrive over a channel and are applied between input events,
//! on the same context as user actions.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info};

use policy_history::config::Config;
use policy_history::constants::*;
use policy_history::history::{FetchCompletion, FetchOutcome, FetchRequest};
use policy_history::source::FetchDispatcher;
use policy_history::store::AlertStore;
use policy_history::ui::layout::{body_width, rows_area};
use policy_history::ui::{self, AppState, Theme};

pub struct App {
    state: AppState,
    dispatcher: FetchDispatcher,
    fetch_rx: mpsc::UnboundedReceiver<FetchCompletion>,
    /// Screen area of the last drawn frame, for mouse hit-testing.
    viewport: Rect,
    last_tick: Instant,
    /// Policy to open once the loop starts.
    initial_policy: Option<String>,
}

impl App {
    pub fn new(config: &Config, store: AlertStore, initial_policy: Option<&str>) -> Result<Self> {
        let policies = store.list_policies().context("failed to list policies")?;
        info!(count = policies.len(), "loaded policies");

        let theme = Theme::by_name(&config.theme).unwrap_or_default();
        let state = AppState::new(theme, config.date_format.clone(), policies);

        let timeout = Duration::from_secs(config.fetch_timeout_secs.max(MIN_FETCH_TIMEOUT_SECS));
        let (dispatcher, fetch_rx) = FetchDispatcher::new(Arc::new(store), timeout);

        Ok(Self {
            state,
            dispatcher,
            fetch_rx,
            viewport: Rect::default(),
            last_tick: Instant::now(),
            initial_policy: initial_policy.map(str::to_string),
        })
    }

    /// Run the main event loop. Returns when the user quits.
    pub async fn run(&mut self) -> Result<()> {
        // Terminal init
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let size = terminal.size()?;
        self.viewport = Rect::new(0, 0, size.width, size.height);

        // Initial policy: --policy, else the first known one
        let request = match self.initial_policy.take() {
            Some(id) => self.state.open_policy(&id),
            None => self.state.next_policy(),
        };
        self.submit(request);

        let result = self.event_loop(&mut terminal);

        // Cleanup
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.keep_selection_visible();
            let frame = terminal.draw(|frame| ui::render(frame, &self.state))?;
            self.viewport = frame.area;

            self.drain_fetches();

            if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
                match event::read()? {
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key)? {
                            return Ok(()); // quit requested
                        }
                    }
                    _ => {}
                }
            }

            self.tick();
        }
    }

    // ── Fetching ─────────────────────────────────────────────────

    fn submit(&self, request: Option<FetchRequest>) {
        if let Some(request) = request {
            self.dispatcher.dispatch(request);
        }
    }

    fn drain_fetches(&mut self) {
        while let Ok(completion) = self.fetch_rx.try_recv() {
            if let FetchOutcome::Stale = self.state.apply_fetch(completion) {
                debug!("dropped superseded fetch");
            }
        }
    }

    fn tick(&mut self) {
        if self.last_tick.elapsed() >= Duration::from_millis(SPINNER_TICK_MS) {
            self.state.tick_count = self.state.tick_count.wrapping_add(1);
            self.last_tick = Instant::now();
        }
    }

    // ── Geometry ─────────────────────────────────────────────────

    fn keep_selection_visible(&mut self) {
        let rows = rows_area(self.viewport);
        self.state
            .ensure_selected_visible(body_width(rows.width), rows.height as usize);
    }

    // ── Mouse handling ───────────────────────────────────────────

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.state.select_prev(1),
            MouseEventKind::ScrollDown => self.state.select_next(1),
            MouseEventKind::Down(MouseButton::Left) => {
                let rows = rows_area(self.viewport);
                let inside = mouse.column >= rows.x
                    && mouse.column < rows.x + rows.width
                    && mouse.row >= rows.y
                    && mouse.row < rows.y + rows.height;
                if !inside {
                    return;
                }
                let line = (mouse.row - rows.y) as usize;
                if let Some(index) = self.state.row_at(line, body_width(rows.width)) {
                    self.state.selected_row = index;
                    self.state.toggle(index);
                }
            }
            _ => {}
        }
    }

    // ── Keyboard handling ────────────────────────────────────────

    /// Handle a key event. Returns `true` if the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),

            // Cursor
            KeyCode::Up | KeyCode::Char('k') => self.state.select_prev(1),
            KeyCode::Down | KeyCode::Char('j') => self.state.select_next(1),
            KeyCode::PageUp => self.state.select_prev(PAGE_STEP),
            KeyCode::PageDown => self.state.select_next(PAGE_STEP),
            KeyCode::Home => self.state.select_first(),
            KeyCode::End => self.state.select_last(),

            // Rows
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.state.toggle_selected();
            }

            // Time window
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                let request = self.state.select_window(index)?;
                self.submit(request);
            }
            KeyCode::Tab => {
                let request = self.state.next_window();
                self.submit(request);
            }

            // Policy
            KeyCode::Char('r') => {
                let request = self.state.refresh();
                self.submit(request);
            }
            KeyCode::Char('n') => {
                let request = self.state.next_policy();
                self.submit(request);
            }
            KeyCode::Char('p') => {
                let request = self.state.prev_policy();
                self.submit(request);
            }
            KeyCode::Char('c') => {
                let request = self.state.detach();
                self.submit(request);
            }

            // Presentation
            KeyCode::Char('t') => self.state.cycle_theme(),
            KeyCode::Char('l') => self.state.cycle_lang(),

            _ => {}
        }
        Ok(false)
    }
}
