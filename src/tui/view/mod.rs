// view module - the terminal code canvas: header, gutter, code and footer
mod graphemes;
mod keyboard;
mod mouse;
mod prompt;
mod render;

use crate::core::actions::Action;
use crate::core::canvas::Canvas;
use crate::tui::terminal::{Size, Terminal};
use std::io::Error;
use std::time::Instant;

pub use keyboard::Flow;

// Prompt kind describes the intent of the footer prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptKind {
    GoToLine,
}

// Prompt state shown in the footer when active.
pub struct Prompt {
    pub kind: PromptKind,
    pub message: String,
    pub input: String,
}

pub struct View {
    pub canvas: Canvas,
    pub scroll_offset: usize, // index of the first visible line, 0-based
    pub show_shortcuts: bool,
    pub needs_redraw: bool,
    pub(in crate::tui) prompt: Option<Prompt>,
}

impl View {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            scroll_offset: 0,
            show_shortcuts: false,
            needs_redraw: true,
            prompt: None,
        }
    }

    // Gutter width in columns: the numbers plus one space on each side
    pub fn margin(&self) -> u16 {
        self.canvas.document.gutter_width() as u16 + 2
    }

    pub fn show_prompt(&mut self, kind: PromptKind, message: String) {
        self.prompt = Some(Prompt {
            kind,
            message,
            input: String::new(),
        });
        self.needs_redraw = true;
    }

    // Append a character to the current prompt input
    pub fn append_prompt_char(&mut self, ch: char) {
        if let Some(p) = &mut self.prompt {
            p.input.push(ch);
            self.needs_redraw = true;
        }
    }

    pub fn backspace_prompt(&mut self) {
        if let Some(p) = &mut self.prompt {
            p.input.pop();
            self.needs_redraw = true;
        }
    }

    // Takes the prompt down and hands back what was typed
    pub fn take_prompt(&mut self) -> Option<Prompt> {
        self.needs_redraw = true;
        self.prompt.take()
    }

    pub fn toggle_ctrl_shortcuts(&mut self) {
        self.show_shortcuts = !self.show_shortcuts;
        self.needs_redraw = true;
    }

    pub fn handle_action(&mut self, action: Action) -> Result<Flow, Error> {
        keyboard::handle_action(self, action)
    }

    // Rendering
    pub fn render(&self) -> Result<(), Error> {
        render::render_view(self, Instant::now())
    }

    // render only if needed and clear the flag
    pub fn render_if_needed(&mut self) -> Result<(), Error> {
        if self.needs_redraw {
            self.render()?;
            self.needs_redraw = false;
        }
        Ok(())
    }

    // Called on every idle tick so the "copied" flash can revert on its own
    pub fn tick(&mut self, now: Instant) {
        if self.canvas.expire_flash(now) {
            self.needs_redraw = true;
        }
    }

    pub fn handle_resize(&mut self) -> Result<(), Error> {
        let size = Terminal::get_size()?;
        self.clamp_scroll(size);
        self.needs_redraw = true;
        self.render_if_needed()
    }

    pub fn scroll_by(&mut self, delta: isize) -> Result<(), Error> {
        let size = Terminal::get_size()?;
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
        self.clamp_scroll(size);
        self.needs_redraw = true;
        Ok(())
    }

    pub fn page(&mut self, direction: isize) -> Result<(), Error> {
        let rows = Terminal::get_size()?.visible_rows().max(1) as isize;
        self.scroll_by(direction * rows)
    }

    // Keep the last line reachable but never scroll past it
    fn clamp_scroll(&mut self, size: Size) {
        let max_offset = self
            .canvas
            .document
            .line_count()
            .saturating_sub(size.visible_rows().max(1));
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    /// Brings `line` on screen, centering it when it was off screen.
    /// Lines past the end of the document have nothing to show and are skipped.
    pub fn reveal_line(&mut self, line: usize, size: Size) {
        if line == 0 || line > self.canvas.document.line_count() {
            return;
        }
        let rows = size.visible_rows().max(1);
        let idx = line - 1;
        if idx < self.scroll_offset || idx >= self.scroll_offset + rows {
            self.scroll_offset = idx.saturating_sub(rows / 2);
            self.clamp_scroll(size);
        }
    }
}

// Helper functions used across modules
pub mod helpers {
    use super::*;

    /// 1-based document line shown on a terminal row, if that row shows one.
    pub fn row_to_line(view: &View, row: u16, size: Size) -> Option<usize> {
        if row < Terminal::HEADER || row >= size.footer_row() {
            return None;
        }
        let line = (row - Terminal::HEADER) as usize + view.scroll_offset + 1;
        (line <= view.canvas.document.line_count()).then_some(line)
    }

    pub fn in_gutter(view: &View, column: u16) -> bool {
        column < view.margin()
    }
}
