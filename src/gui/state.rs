// state - adapter between the canvas and egui, holding what only the window needs
use crate::core::{
    actions::Action,
    canvas::Canvas,
    controller::Effect,
};

pub const ROW_HEIGHT: f32 = 20.0;
pub const CHAR_WIDTH: f32 = 8.4;

pub struct CanvasState {
    pub canvas: Canvas,
    pub scroll_line: usize, // index of the first visible line, 0-based
    pub visible_rows: usize,
    pub goto_input: String,
    pub show_shortcuts: bool,
    pub quit_requested: bool,
    wheel_residue: f32, // wheel distance not yet worth a whole row
}

impl CanvasState {
    pub fn new(canvas: Canvas) -> Self {
        let mut state = Self {
            canvas,
            scroll_line: 0,
            visible_rows: 30,
            goto_input: String::new(),
            show_shortcuts: false,
            quit_requested: false,
            wheel_residue: 0.0,
        };
        state.follow_head();
        state
    }

    // Same dispatch as the terminal; only the prompt and the viewport differ
    pub fn handle_action(&mut self, action: Action) {
        let effect = self.canvas.controller.dispatch(action);
        match effect {
            Effect::None => {}
            Effect::Redraw => self.follow_head(),
            Effect::CopyText(_) | Effect::CopyLink(_) => {
                self.canvas.run_effect(effect);
            }
            Effect::PromptGoto => self.goto_input.clear(),
            Effect::Unhandled(action) => match action {
                Action::Quit => self.quit_requested = true,
                Action::ToggleShortcuts => self.show_shortcuts = !self.show_shortcuts,
                Action::PageDown => self.scroll_by(self.visible_rows as isize),
                Action::PageUp => self.scroll_by(-(self.visible_rows as isize)),
                // wheel and gutter clicks arrive through the painted canvas instead
                _ => {}
            },
        }
    }

    pub fn click_line(&mut self, line: usize, extend: bool) {
        if line <= self.canvas.document.line_count() {
            self.canvas.controller.click(line, extend);
        }
    }

    // The goto window stays open while the controller waits for an answer
    pub fn goto_open(&self) -> bool {
        self.canvas.controller.awaiting_goto()
    }

    pub fn finish_goto(&mut self, confirmed: bool) {
        let input = std::mem::take(&mut self.goto_input);
        let answer = confirmed.then_some(input.as_str());
        if self.canvas.controller.finish_goto(answer).is_some() {
            self.follow_head();
        }
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll_line = self.scroll_line.saturating_add_signed(delta);
        self.clamp_scroll();
    }

    // egui spreads one notch over several frames, so the delta is summed
    // and only whole rows are scrolled. A positive delta scrolls up.
    pub fn wheel(&mut self, delta_y: f32) {
        self.wheel_residue -= delta_y;
        let rows = (self.wheel_residue / ROW_HEIGHT).trunc();
        if rows != 0.0 {
            self.wheel_residue -= rows * ROW_HEIGHT;
            self.scroll_by(rows as isize);
        }
    }

    fn clamp_scroll(&mut self) {
        let max = self
            .canvas
            .document
            .line_count()
            .saturating_sub(self.visible_rows.max(1));
        self.scroll_line = self.scroll_line.min(max);
    }

    pub fn follow_head(&mut self) {
        if let Some(head) = self.canvas.controller.selection().head() {
            self.reveal_line(head);
        }
    }

    // Centers `line` when it is off screen; lines past the end are skipped
    pub fn reveal_line(&mut self, line: usize) {
        if line == 0 || line > self.canvas.document.line_count() {
            return;
        }
        let rows = self.visible_rows.max(1);
        let idx = line - 1;
        if idx < self.scroll_line || idx >= self.scroll_line + rows {
            self.scroll_line = idx.saturating_sub(rows / 2);
            self.clamp_scroll();
        }
    }

    /// 1-based line under a vertical offset from the top of the canvas.
    pub fn line_at(&self, y_offset: f32) -> Option<usize> {
        if y_offset < 0.0 {
            return None;
        }
        let line = (y_offset / ROW_HEIGHT) as usize + self.scroll_line + 1;
        (line <= self.canvas.document.line_count()).then_some(line)
    }

    pub fn gutter_width(&self) -> f32 {
        (self.canvas.document.gutter_width() + 2) as f32 * CHAR_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clipboard::testing::MemoryClipboard;
    use crate::core::controller::SelectionController;
    use crate::core::document::Document;
    use crate::core::location::Location;
    use crate::core::selection::Selection;

    fn state(lines: usize, url: &str) -> CanvasState {
        let text: Vec<String> = (1..=lines).map(|n| format!("fn f{n}() {{}}")).collect();
        let mut state = CanvasState::new(Canvas::new(
            Document::from_string(&text.join("\n")),
            SelectionController::new(Location::parse(url).unwrap()),
            "lib.rs".into(),
            Box::new(MemoryClipboard::default()),
        ));
        state.visible_rows = 10;
        state
    }

    #[test]
    fn goto_window_resumes_the_controller() {
        let mut state = state(100, "https://example.com/view");
        state.handle_action(Action::GoToLine);
        assert!(state.goto_open());

        state.goto_input = "60".into();
        state.finish_goto(true);
        assert!(!state.goto_open());
        assert_eq!(state.canvas.controller.selection(), Selection::single(60));
        assert_eq!(state.scroll_line, 54);
    }

    #[test]
    fn cancelled_goto_keeps_the_selection() {
        let mut state = state(100, "https://example.com/view?L=4");
        state.handle_action(Action::GoToLine);
        state.goto_input = "60".into();
        state.finish_goto(false);
        assert_eq!(state.canvas.controller.selection(), Selection::single(4));
        assert!(!state.goto_open());
    }

    #[test]
    fn clicks_past_the_document_are_ignored() {
        let mut state = state(5, "https://example.com/view");
        state.click_line(9, false);
        assert!(state.canvas.controller.selection().is_empty());
        assert_eq!(state.line_at(ROW_HEIGHT * 4.5), Some(5));
        assert_eq!(state.line_at(ROW_HEIGHT * 5.5), None);
    }

    #[test]
    fn shift_click_on_an_empty_canvas_selects_the_line() {
        let mut state = state(20, "https://example.com/view");
        state.click_line(9, true);
        assert_eq!(state.canvas.controller.selection(), Selection::single(9));
        assert_eq!(state.canvas.controller.location().range_param().as_deref(), Some("9"));

        state.click_line(12, true);
        assert_eq!(state.canvas.controller.location().range_param().as_deref(), Some("9-12"));
    }

    #[test]
    fn wheel_scrolls_whole_rows_once_enough_delta_builds_up() {
        let mut state = state(100, "https://example.com/view");
        state.wheel(-ROW_HEIGHT * 0.5);
        assert_eq!(state.scroll_line, 0);
        state.wheel(-ROW_HEIGHT * 0.5);
        assert_eq!(state.scroll_line, 1);

        state.wheel(-ROW_HEIGHT * 3.0);
        assert_eq!(state.scroll_line, 4);
        state.wheel(ROW_HEIGHT * 2.0);
        assert_eq!(state.scroll_line, 2);
    }

    #[test]
    fn paging_stays_inside_the_document() {
        let mut state = state(25, "https://example.com/view");
        state.handle_action(Action::PageDown);
        state.handle_action(Action::PageDown);
        assert_eq!(state.scroll_line, 15);
        state.handle_action(Action::PageUp);
        assert_eq!(state.scroll_line, 5);
    }

    #[test]
    fn quit_is_only_a_request() {
        let mut state = state(5, "https://example.com/view");
        state.handle_action(Action::Quit);
        assert!(state.quit_requested);
    }
}
