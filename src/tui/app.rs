use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use strum::IntoEnumIterator;
use tracing::{info, warn};

use resmap::config::{WeightAxis, WEIGHT_STEP};
use resmap::error::RmResult;
use resmap::sync::SessionState;

use super::ui::{draw_ui, UiState};

pub struct DashApp {
    terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    state: SessionState,
    ui_state: UiState,
    log_receiver: Receiver<String>,
}

impl DashApp {
    pub fn new(state: SessionState, log_receiver: Receiver<String>) -> RmResult<Self> {
        let stdout = std::io::stdout();
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        crossterm::terminal::enable_raw_mode()?;
        terminal.clear()?;
        terminal.hide_cursor()?;
        Ok(Self {
            terminal,
            state,
            ui_state: UiState::default(),
            log_receiver,
        })
    }

    pub fn run(mut self) -> RmResult<()> {
        let mut last_draw = Instant::now();

        loop {
            while let Ok(line) = self.log_receiver.try_recv() {
                self.ui_state.push_log(line);
            }

            if last_draw.elapsed() >= Duration::from_millis(100) {
                self.terminal
                    .draw(|frame| draw_ui(frame, &self.state, &self.ui_state))?;
                last_draw = Instant::now();
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char('1') => self.ui_state.select_axis(0),
                        KeyCode::Char('2') => self.ui_state.select_axis(1),
                        KeyCode::Char('3') => self.ui_state.select_axis(2),
                        KeyCode::Char('4') => self.ui_state.select_axis(3),
                        KeyCode::Char('=') | KeyCode::Char('+') => {
                            self.adjust_selected(WEIGHT_STEP);
                        }
                        KeyCode::Char('-') | KeyCode::Char('_') => {
                            self.adjust_selected(-WEIGHT_STEP);
                        }
                        KeyCode::Char('0') => self.reset_weights(),
                        KeyCode::Up => self.state.select_prev(),
                        KeyCode::Down => self.state.select_next(),
                        _ => {}
                    }
                }
            }
        }

        self.terminal.show_cursor()?;
        crossterm::terminal::disable_raw_mode()?;
        Ok(())
    }

    fn adjust_selected(&mut self, delta: i32) {
        let Some(axis) = WeightAxis::iter().nth(self.ui_state.selected_axis) else {
            return;
        };
        match self.state.adjust_weight(axis, delta) {
            Ok(value) => info!("Weight {} set to {}%", axis, value),
            Err(err) => {
                // The previous scores and orderings are still on screen; the
                // refresh was rejected before touching them.
                warn!("Refresh rejected: {}", err);
                self.ui_state.push_log(format!("Refresh rejected: {}", err));
            }
        }
    }

    fn reset_weights(&mut self) {
        match self.state.reset_weights() {
            Ok(()) => info!("Weights reset to defaults"),
            Err(err) => warn!("Reset failed: {}", err),
        }
    }
}
