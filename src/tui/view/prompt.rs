// prompt module - the "go to line" prompt in the footer
use super::{PromptKind, View};
use crate::tui::terminal::Terminal;
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::Error;
use std::time::{Duration, Instant};

// Blocks until the prompt is answered or cancelled; the controller stays
// in its awaiting state the whole time, so a second prompt cannot open.
pub fn goto_line(view: &mut View) -> Result<(), Error> {
    view.show_prompt(PromptKind::GoToLine, "Go to line:".to_string());
    view.render_if_needed()?;
    Terminal::execute()?;

    let answer = loop {
        if !poll(Duration::from_millis(50))? {
            view.tick(Instant::now());
            view.render_if_needed()?;
            Terminal::execute()?;
            continue;
        }

        match read()? {
            Event::Key(event) if event.kind == KeyEventKind::Press => match event.code {
                KeyCode::Char(_) => {
                    if let Some(c) = typed_char(&event) {
                        view.append_prompt_char(c);
                    }
                }
                KeyCode::Backspace => view.backspace_prompt(),
                KeyCode::Enter => break view.take_prompt().map(|prompt| prompt.input),
                KeyCode::Esc => {
                    view.take_prompt();
                    break None;
                }
                _ => {}
            },
            Event::Resize(_, _) => view.handle_resize()?,
            _ => {}
        }
        view.render_if_needed()?;
        Terminal::execute()?;
    };

    if view.canvas.controller.finish_goto(answer.as_deref()).is_some() {
        view.needs_redraw = true;
    }
    Ok(())
}

// Only plain or shifted characters are typed; Ctrl and Alt chords are not text
fn typed_char(event: &KeyEvent) -> Option<char> {
    match event.code {
        KeyCode::Char(c) if event.modifiers.difference(KeyModifiers::SHIFT).is_empty() => Some(c),
        _ => None,
    }
}
