use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;
use tracing::debug;

use crate::app::{App, Message, Model, update};

use super::effects::run_pending_effects;
use super::input::handle_event;

/// Idle poll interval; toasts expire on this tick.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized or the event
    /// loop hits an I/O failure.
    pub fn run(self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - mdbrowse requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new(self.browser, (size.width, size.height));
        model.config_global_path = self.config_global_path;
        model.config_local_path = self.config_local_path;

        let result = event_loop(&mut terminal, model);
        ratatui::restore();
        result
    }
}

fn event_loop(terminal: &mut DefaultTerminal, mut model: Model) -> Result<()> {
    let mut needs_render = true;

    loop {
        if model.expire_toast(Instant::now()) {
            needs_render = true;
        }

        let poll = if needs_render {
            Duration::ZERO
        } else {
            POLL_INTERVAL
        };
        if event::poll(poll)? {
            // Coalesce key repeat bursts into a single render.
            loop {
                if let Some(msg) = handle_event(&event::read()?, &model) {
                    debug!(?msg, "message");
                    if msg == Message::Redraw {
                        terminal.clear()?;
                    }
                    model = update(model, msg);
                    run_pending_effects(&mut model);
                    needs_render = true;
                }
                if model.should_quit || !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        if needs_render {
            terminal.draw(|frame| crate::ui::render(&mut model, frame))?;
            needs_render = false;
        }

        if model.should_quit {
            break;
        }
    }
    Ok(())
}
