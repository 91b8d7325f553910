// mouse module responsible for handling mouse events
use super::{
    helpers::{in_gutter, row_to_line},
    View,
};
use crate::tui::terminal::Terminal;
use std::io::Error;

// Only the gutter selects; clicks on code or past the last line do nothing
pub fn handle_gutter_click(view: &mut View, column: u16, row: u16, extend: bool) -> Result<(), Error> {
    if view.prompt.is_some() || !in_gutter(view, column) {
        return Ok(());
    }
    let size = Terminal::get_size()?;
    let Some(line) = row_to_line(view, row, size) else {
        return Ok(());
    };

    if view.canvas.controller.click(line, extend).is_some() {
        view.needs_redraw = true;
    }
    Ok(())
}
