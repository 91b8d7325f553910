// render module responsible for all the render logic
use super::graphemes::{expand_tabs, truncate_to_width, visual_width};
use super::{PromptKind, View};
use crate::tui::terminal::{Size, Terminal};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use std::io::{stdout, Error};
use std::time::Instant;

pub fn render_view(view: &View, now: Instant) -> Result<(), Error> {
    let size = Terminal::get_size()?;
    let selected = view.canvas.controller.selection().range();

    draw_header(view, size, now)?;

    let rows = size.visible_rows();
    let max_width = size.width.saturating_sub(view.margin()) as usize;
    let mut shown = view.canvas.document.lines().skip(view.scroll_offset).take(rows);

    for row in 0..rows {
        queue!(stdout(), MoveTo(0, row as u16 + Terminal::HEADER))?;
        Terminal::clear_rest_of_line()?;

        // rows past the last line stay blank
        if let Some((line, text)) = shown.next() {
            let in_selection = selected.is_some_and(|range| range.contains(line));
            draw_margin_line(view, line, in_selection)?;
            draw_code_line(text, max_width, in_selection)?;
        }
    }

    draw_footer(view, size)?;

    // The caret is only visible while the goto prompt takes input
    match &view.prompt {
        Some(prompt) => {
            let column = 1 + visual_width(&prompt.message) + 1 + visual_width(&prompt.input);
            queue!(stdout(), MoveTo(column as u16, size.footer_row()), Show)?;
        }
        None => queue!(stdout(), Hide)?,
    }
    Ok(())
}

fn draw_header(view: &View, size: Size, now: Instant) -> Result<(), Error> {
    queue!(
        stdout(),
        MoveTo(0, 0),
        SetForegroundColor(Color::Yellow),
        SetAttribute(Attribute::Bold),
        Print(format!(" {} ", view.canvas.file_label)),
        SetAttribute(Attribute::Reset),
        ResetColor
    )?;
    Terminal::clear_rest_of_line()?;

    if let Some(text) = view.canvas.header_text(now) {
        let color = if view.canvas.flash.is_some() { Color::Green } else { Color::White };
        let column = size.width.saturating_sub(visual_width(&text) as u16 + 2);
        queue!(
            stdout(),
            MoveTo(column, 0),
            SetForegroundColor(color),
            Print(&text),
            ResetColor
        )?;
    }
    Ok(())
}

fn draw_margin_line(view: &View, line: usize, in_selection: bool) -> Result<(), Error> {
    let number = format!(" {:>width$} ", line, width = view.canvas.document.gutter_width());
    if in_selection {
        queue!(
            stdout(),
            SetBackgroundColor(Color::DarkBlue),
            SetForegroundColor(Color::White),
            SetAttribute(Attribute::Bold),
            Print(number),
            SetAttribute(Attribute::Reset),
            ResetColor
        )?;
    } else {
        queue!(stdout(), SetForegroundColor(Color::Yellow), Print(number), ResetColor)?;
    }
    Ok(())
}

fn draw_code_line(text: &str, max_width: usize, in_selection: bool) -> Result<(), Error> {
    let expanded = expand_tabs(text);
    let visible = truncate_to_width(&expanded, max_width);
    if in_selection {
        // Pad so the highlight spans the full row like a line highlight
        let padding = max_width.saturating_sub(visual_width(visible));
        queue!(
            stdout(),
            SetBackgroundColor(Color::DarkBlue),
            SetForegroundColor(Color::White),
            Print(visible),
            Print(" ".repeat(padding)),
            ResetColor
        )?;
    } else {
        queue!(stdout(), Print(visible))?;
    }
    Ok(())
}

pub fn draw_footer(view: &View, size: Size) -> Result<(), Error> {
    let footer_row = size.footer_row();

    queue!(stdout(), MoveTo(0, footer_row), SetBackgroundColor(Color::Black))?;
    Terminal::clear_rest_of_line()?;
    queue!(stdout(), MoveTo(0, footer_row))?;

    // A pending prompt wins over the shortcut list
    if view.prompt.is_some() {
        draw_prompt_footer(view, size)?;
    } else if view.show_shortcuts {
        draw_shortcuts_footer(size)?;
    } else {
        draw_info_footer(view, size)?;
    }

    queue!(stdout(), ResetColor)?;
    Ok(())
}

fn draw_info_footer(view: &View, size: Size) -> Result<(), Error> {
    let footer_row = size.footer_row();
    let hint = " Ctrl+g for shortcuts ";
    let hint_width = hint.len() as u16;

    let location = view.canvas.controller.location().as_str();
    let room = size.width.saturating_sub(hint_width + 3) as usize;
    queue!(
        stdout(),
        MoveTo(1, footer_row),
        SetBackgroundColor(Color::Black),
        SetForegroundColor(Color::White),
        Print(truncate_to_width(location, room)),
    )?;

    let hint_pos = size.width.saturating_sub(hint_width + 1);
    queue!(
        stdout(),
        MoveTo(hint_pos, footer_row),
        SetForegroundColor(Color::DarkYellow),
        SetAttribute(Attribute::Italic),
        Print(hint),
        SetAttribute(Attribute::Reset),
    )?;
    Ok(())
}

fn draw_shortcuts_footer(size: Size) -> Result<(), Error> {
    use crate::core::shortcuts::Shortcuts;

    let footer_row = size.footer_row();
    queue!(stdout(), MoveTo(1, footer_row), SetBackgroundColor(Color::Black))?;

    let shortcuts = Shortcuts::get_shortcut_hints();

    let mut current_x = 1;
    for (i, (key, desc)) in shortcuts.iter().enumerate() {
        let entry_width = key.len() + desc.len() + 4;
        if current_x + entry_width as u16 > size.width.saturating_sub(2) {
            break;
        }

        queue!(
            stdout(),
            MoveTo(current_x, footer_row),
            SetForegroundColor(Color::DarkYellow),
            SetAttribute(Attribute::Bold),
            Print(key),
            SetAttribute(Attribute::Reset),
        )?;
        current_x += key.len() as u16;

        queue!(
            stdout(),
            MoveTo(current_x, footer_row),
            SetForegroundColor(Color::White),
            Print(format!(" {} ", desc)),
        )?;
        current_x += desc.len() as u16 + 1;

        if i < shortcuts.len() - 1 {
            queue!(stdout(), SetForegroundColor(Color::DarkGrey), Print("│ "))?;
            current_x += 2;
        }
    }
    Ok(())
}

fn draw_prompt_footer(view: &View, size: Size) -> Result<(), Error> {
    let footer_row = size.footer_row();
    queue!(stdout(), MoveTo(1, footer_row))?;

    if let Some(prompt) = &view.prompt {
        match prompt.kind {
            PromptKind::GoToLine => {
                queue!(
                    stdout(),
                    SetForegroundColor(Color::DarkYellow),
                    SetAttribute(Attribute::Bold),
                    Print(format!("{} ", prompt.message)),
                    SetAttribute(Attribute::Reset),
                    SetBackgroundColor(Color::Black),
                    SetForegroundColor(Color::White),
                    Print(&prompt.input),
                )?;
                draw_esc_hint(size.width, footer_row)?;
            }
        }
    }
    Ok(())
}

// Helper function to draw the Esc hint on the right side of the footer
fn draw_esc_hint(screen_width: u16, footer_row: u16) -> Result<(), Error> {
    let hint = " Enter to jump, Esc to cancel ";
    let hint_width = hint.len() as u16;
    let hint_pos = screen_width.saturating_sub(hint_width + 1);
    queue!(
        stdout(),
        MoveTo(hint_pos, footer_row),
        SetForegroundColor(Color::DarkYellow),
        SetAttribute(Attribute::Italic),
        Print(hint),
        SetAttribute(Attribute::Reset),
    )?;
    Ok(())
}
