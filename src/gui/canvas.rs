// src/gui/canvas.rs - painted gutter and code with line selection
use super::state::{CanvasState, CHAR_WIDTH, ROW_HEIGHT};
use super::themes;
use egui::{Align2, Pos2, Rect, Response, Sense, Ui, Vec2};

pub struct CanvasPanel<'a> {
    state: &'a mut CanvasState,
    accepts_input: bool,
}

impl<'a> CanvasPanel<'a> {
    pub fn new(state: &'a mut CanvasState, accepts_input: bool) -> Self {
        Self { state, accepts_input }
    }

    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let available_rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(available_rect, Sense::click());

        self.state.visible_rows = ((available_rect.height() / ROW_HEIGHT) as usize).max(1);

        if self.accepts_input {
            self.handle_pointer(ui, &response, available_rect);
        }
        self.render_content(ui, available_rect);

        response
    }

    fn handle_pointer(&mut self, ui: &Ui, response: &Response, rect: Rect) {
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.state.wheel(scroll);
            }
        }

        if !response.clicked() {
            return;
        }
        let Some(pointer) = response.interact_pointer_pos() else {
            return;
        };
        // Only the gutter selects
        if pointer.x - rect.left() > self.state.gutter_width() {
            return;
        }
        if let Some(line) = self.state.line_at(pointer.y - rect.top()) {
            let extend = ui.input(|i| i.modifiers.shift);
            self.state.click_line(line, extend);
        }
    }

    fn render_content(&self, ui: &Ui, rect: Rect) {
        let painter = ui.painter_at(rect);
        let font_id = themes::code_font();
        let gutter_width = self.state.gutter_width();
        let document = &self.state.canvas.document;
        let selected = self.state.canvas.controller.selection().range();
        let digits = document.gutter_width();

        let gutter_rect = Rect::from_min_size(rect.min, Vec2::new(gutter_width, rect.height()));
        painter.rect_filled(gutter_rect, 0.0, themes::GUTTER_BG);

        let shown = document
            .lines()
            .skip(self.state.scroll_line)
            .take(self.state.visible_rows + 1);

        for (visual_idx, (line, text)) in shown.enumerate() {
            let y_pos = rect.top() + visual_idx as f32 * ROW_HEIGHT;

            if selected.is_some_and(|range| range.contains(line)) {
                let row = Rect::from_min_size(Pos2::new(rect.left(), y_pos), Vec2::new(rect.width(), ROW_HEIGHT));
                painter.rect_filled(row, 0.0, themes::SELECTED_LINE_BG);
            }

            painter.text(
                Pos2::new(rect.left() + CHAR_WIDTH, y_pos),
                Align2::LEFT_TOP,
                format!("{:>digits$}", line),
                font_id.clone(),
                themes::LINE_NUMBER,
            );
            painter.text(
                Pos2::new(rect.left() + gutter_width + CHAR_WIDTH, y_pos),
                Align2::LEFT_TOP,
                text.replace('\t', "    "),
                font_id.clone(),
                themes::CODE_TEXT,
            );
        }
    }
}
