// terminal module handles terminal related operations
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, DisableLineWrap,
        EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{stdout, Error, Write};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

pub struct Terminal;

impl Terminal {
    pub const HEADER: u16 = 1; // Height of the header
    pub const FOOTER: u16 = 1; // Height of the footer

    pub fn initialize() -> Result<(), Error> {
        enable_raw_mode()?;
        execute!(
            stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All),
            MoveTo(0, 0)
        )?;
        Ok(())
    }

    // Best effort: every step runs even if an earlier one failed
    pub fn terminate() -> Result<(), Error> {
        let screen = execute!(
            stdout(),
            Show,
            EnableLineWrap,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let raw = disable_raw_mode();
        screen.and(raw)
    }

    pub fn get_size() -> Result<Size, Error> {
        let (width, height) = size()?;
        Ok(Size { width, height })
    }

    pub fn clear_rest_of_line() -> Result<(), Error> {
        queue!(stdout(), Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    // flush everything queued since the last frame
    pub fn execute() -> Result<(), Error> {
        stdout().flush()?;
        Ok(())
    }
}

impl Size {
    // Rows between header and footer
    pub fn visible_rows(&self) -> usize {
        self.height
            .saturating_sub(Terminal::HEADER + Terminal::FOOTER) as usize
    }

    pub fn footer_row(&self) -> u16 {
        self.height.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_rows_exclude_header_and_footer() {
        let size = Size { width: 80, height: 24 };
        assert_eq!(size.visible_rows(), 22);
        assert_eq!(size.footer_row(), 23);
        assert_eq!(Size { width: 80, height: 1 }.visible_rows(), 0);
    }
}
