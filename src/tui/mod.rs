// TUI module - the terminal code canvas
mod terminal;
mod view;

use crate::core::{canvas::Canvas, shortcuts::Shortcuts};
use crossterm::event::{poll, read, Event, KeyEventKind};
use std::time::{Duration, Instant};
use terminal::Terminal;
use view::{Flow, View};

// Idle wake-up so the copy flash can expire without input
const TICK: Duration = Duration::from_millis(50);

pub struct TerminalViewer {
    view: View,
    quit_program: bool,
}

impl TerminalViewer {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            view: View::new(canvas),
            quit_program: false,
        }
    }

    pub fn run(&mut self) -> Result<(), std::io::Error> {
        Terminal::initialize()?;
        tracing::info!("terminal viewer started");

        let result = self.main_loop();
        if let Err(error) = &result {
            tracing::error!(%error, "terminal viewer stopped");
        }
        if let Err(error) = Terminal::terminate() {
            eprintln!("Terminal Termination Failed: {:?}", error);
        }
        result
    }

    fn main_loop(&mut self) -> Result<(), std::io::Error> {
        // Bring a restored selection on screen before the first frame
        if let Some(head) = self.view.canvas.controller.selection().head() {
            let size = Terminal::get_size()?;
            self.view.reveal_line(head, size);
        }

        self.view.render_if_needed()?;
        Terminal::execute()?;

        while !self.quit_program {
            if !poll(TICK)? {
                self.view.tick(Instant::now());
                self.view.render_if_needed()?;
                Terminal::execute()?;
                continue;
            }

            let action = match read()? {
                Event::Key(event) if event.kind == KeyEventKind::Press => Shortcuts::resolve(&event),
                Event::Mouse(event) => Shortcuts::resolve_mouse(&event),
                Event::Resize(_, _) => {
                    self.view.handle_resize()?;
                    None
                }
                _ => None,
            };

            if let Some(action) = action {
                tracing::trace!(?action, "action");
                if self.view.handle_action(action)? == Flow::Quit {
                    self.quit_program = true;
                }
            }

            self.view.render_if_needed()?;
            Terminal::execute()?;
        }
        Ok(())
    }
}
