// keyboard logic - runs key actions through the selection controller
use super::View;
use crate::core::{actions::Action, controller::Effect};
use crate::tui::terminal::Terminal;
use std::io::Error;

// Lines moved per mouse wheel notch
pub const SCROLL_STEP: isize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn handle_action(view: &mut View, action: Action) -> Result<Flow, Error> {
    // While the footer shows shortcuts, any key first puts the location back
    if view.show_shortcuts && action != Action::ToggleShortcuts {
        view.toggle_ctrl_shortcuts();
    }

    let effect = view.canvas.controller.dispatch(action);
    match effect {
        Effect::None => {}
        Effect::Redraw => {
            follow_head(view)?;
            view.needs_redraw = true;
        }
        Effect::CopyText(_) | Effect::CopyLink(_) => {
            if view.canvas.run_effect(effect) {
                view.needs_redraw = true;
            }
        }
        Effect::PromptGoto => {
            super::prompt::goto_line(view)?;
            follow_head(view)?;
        }
        Effect::Unhandled(action) => return handle_view_action(view, action),
    }
    Ok(Flow::Continue)
}

// Actions that only move the viewport or leave the program
fn handle_view_action(view: &mut View, action: Action) -> Result<Flow, Error> {
    match action {
        Action::Quit => return Ok(Flow::Quit),
        Action::ToggleShortcuts => view.toggle_ctrl_shortcuts(),
        Action::PageDown => view.page(1)?,
        Action::PageUp => view.page(-1)?,
        Action::ScrollDown => view.scroll_by(SCROLL_STEP)?,
        Action::ScrollUp => view.scroll_by(-SCROLL_STEP)?,
        Action::GutterClick(column, row) => {
            super::mouse::handle_gutter_click(view, column, row, false)?
        }
        Action::GutterShiftClick(column, row) => {
            super::mouse::handle_gutter_click(view, column, row, true)?
        }
        _ => {}
    }
    Ok(Flow::Continue)
}

// Keeps the moving end of the selection on screen
fn follow_head(view: &mut View) -> Result<(), Error> {
    if let Some(head) = view.canvas.controller.selection().head() {
        let size = Terminal::get_size()?;
        view.reveal_line(head, size);
    }
    Ok(())
}
