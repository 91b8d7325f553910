// shortcuts module - maps terminal key and mouse events to actions
use crate::core::actions::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

pub struct Shortcuts;

impl Shortcuts {
    /// THE ONE PLACE TO CHANGE SHORTCUTS
    /// Format: (KeyCode, Modifiers, Action, Description)
    /// More specific modifier sets must come before plainer ones.
    fn get_mappings() -> Vec<(KeyCode, KeyModifiers, Action, &'static str)> {
        vec![
            (KeyCode::Char('q'), KeyModifiers::CONTROL, Action::Quit, "Quit"),
            (KeyCode::Char('g'), KeyModifiers::CONTROL, Action::ToggleShortcuts, "Shortcuts"),
            (KeyCode::Down, KeyModifiers::SHIFT, Action::ExtendNext, "Extend down"),
            (KeyCode::Up, KeyModifiers::SHIFT, Action::ExtendPrevious, "Extend up"),
            (KeyCode::Char('J'), KeyModifiers::empty(), Action::ExtendNext, "Extend down"),
            (KeyCode::Char('K'), KeyModifiers::empty(), Action::ExtendPrevious, "Extend up"),
            (KeyCode::Char('j'), KeyModifiers::empty(), Action::NextLine, "Next line"),
            (KeyCode::Char('k'), KeyModifiers::empty(), Action::PreviousLine, "Previous line"),
            (KeyCode::Down, KeyModifiers::empty(), Action::NextLine, "Next line"),
            (KeyCode::Up, KeyModifiers::empty(), Action::PreviousLine, "Previous line"),
            (KeyCode::PageDown, KeyModifiers::empty(), Action::PageDown, "Page down"),
            (KeyCode::PageUp, KeyModifiers::empty(), Action::PageUp, "Page up"),
            (KeyCode::Char('Y'), KeyModifiers::empty(), Action::CopyLink, "Copy link"),
            (KeyCode::Char('y'), KeyModifiers::empty(), Action::Copy, "Copy lines"),
            (KeyCode::Esc, KeyModifiers::empty(), Action::Cancel, "Clear selection"),
            (KeyCode::Char('g'), KeyModifiers::empty(), Action::GoToLine, "Go to line"),
            (KeyCode::Char('q'), KeyModifiers::empty(), Action::Quit, "Quit"),
        ]
    }

    pub fn resolve(event: &KeyEvent) -> Option<Action> {
        // Shift is implied by an upper case character, so it is not part of the match
        let modifiers = match event.code {
            KeyCode::Char(_) => event.modifiers.difference(KeyModifiers::SHIFT),
            _ => event.modifiers,
        };

        Self::get_mappings()
            .into_iter()
            .find(|(code, mods, _, _)| event.code == *code && modifiers == *mods)
            .map(|(_, _, action, _)| action)
    }

    pub fn resolve_mouse(event: &MouseEvent) -> Option<Action> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if event.modifiers.contains(KeyModifiers::SHIFT) {
                    Some(Action::GutterShiftClick(event.column, event.row))
                } else {
                    Some(Action::GutterClick(event.column, event.row))
                }
            }
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    // (key, description) pairs for the footer and the GUI shortcut window
    pub fn get_shortcut_hints() -> Vec<(String, &'static str)> {
        let mut hints: Vec<(String, &'static str)> = Vec::new();
        for (code, mods, _, desc) in Self::get_mappings() {
            if hints.iter().any(|(_, seen)| *seen == desc) {
                continue;
            }
            hints.push((Self::key_to_string(code, mods), desc));
        }
        hints
    }

    // print all shortcuts
    pub fn print_all() {
        for (key, desc) in Self::get_shortcut_hints() {
            println!("  {:<15} : {}", key, desc);
        }
        println!("  {:<15} : {}", "Click", "Select line in gutter");
        println!("  {:<15} : {}", "Shift+Click", "Extend selection");
    }

    fn key_to_string(code: KeyCode, mods: KeyModifiers) -> String {
        let mut s = String::new();
        if mods.contains(KeyModifiers::CONTROL) { s.push_str("Ctrl+"); }
        if mods.contains(KeyModifiers::ALT) { s.push_str("Alt+"); }
        if mods.contains(KeyModifiers::SHIFT) { s.push_str("Shift+"); }

        match code {
            KeyCode::Char(c) => s.push(c),
            KeyCode::Up => s.push_str("Up"),
            KeyCode::Down => s.push_str("Down"),
            KeyCode::PageUp => s.push_str("PgUp"),
            KeyCode::PageDown => s.push_str("PgDn"),
            KeyCode::Esc => s.push_str("Esc"),
            _ => s.push_str("Unknown"),
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, modifiers: KeyModifiers) -> MouseEvent {
        MouseEvent { kind, column: 2, row: 7, modifiers }
    }

    #[test]
    fn vim_keys_navigate_and_extend() {
        assert_eq!(Shortcuts::resolve(&key(KeyCode::Char('j'), KeyModifiers::empty())), Some(Action::NextLine));
        assert_eq!(Shortcuts::resolve(&key(KeyCode::Char('J'), KeyModifiers::SHIFT)), Some(Action::ExtendNext));
        assert_eq!(Shortcuts::resolve(&key(KeyCode::Up, KeyModifiers::SHIFT)), Some(Action::ExtendPrevious));
        assert_eq!(Shortcuts::resolve(&key(KeyCode::Up, KeyModifiers::empty())), Some(Action::PreviousLine));
    }

    #[test]
    fn control_variants_do_not_fall_through_to_plain_keys() {
        assert_eq!(Shortcuts::resolve(&key(KeyCode::Char('g'), KeyModifiers::CONTROL)), Some(Action::ToggleShortcuts));
        assert_eq!(Shortcuts::resolve(&key(KeyCode::Char('g'), KeyModifiers::empty())), Some(Action::GoToLine));
        assert_eq!(Shortcuts::resolve(&key(KeyCode::Char('y'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn copy_keys_and_escape() {
        assert_eq!(Shortcuts::resolve(&key(KeyCode::Char('y'), KeyModifiers::empty())), Some(Action::Copy));
        assert_eq!(Shortcuts::resolve(&key(KeyCode::Char('Y'), KeyModifiers::SHIFT)), Some(Action::CopyLink));
        assert_eq!(Shortcuts::resolve(&key(KeyCode::Char('Y'), KeyModifiers::empty())), Some(Action::CopyLink));
        assert_eq!(Shortcuts::resolve(&key(KeyCode::Esc, KeyModifiers::empty())), Some(Action::Cancel));
        assert_eq!(Shortcuts::resolve(&key(KeyCode::Esc, KeyModifiers::SHIFT)), None);
    }

    #[test]
    fn unmapped_keys_resolve_to_nothing() {
        assert_eq!(Shortcuts::resolve(&key(KeyCode::Char('x'), KeyModifiers::empty())), None);
        assert_eq!(Shortcuts::resolve(&key(KeyCode::Tab, KeyModifiers::empty())), None);
    }

    #[test]
    fn shift_click_extends() {
        assert_eq!(
            Shortcuts::resolve_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), KeyModifiers::SHIFT)),
            Some(Action::GutterShiftClick(2, 7))
        );
        assert_eq!(
            Shortcuts::resolve_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), KeyModifiers::empty())),
            Some(Action::GutterClick(2, 7))
        );
        assert_eq!(Shortcuts::resolve_mouse(&mouse(MouseEventKind::Moved, KeyModifiers::empty())), None);
    }

    #[test]
    fn hints_are_deduplicated_by_description() {
        let hints = Shortcuts::get_shortcut_hints();
        let next: Vec<_> = hints.iter().filter(|(_, desc)| *desc == "Next line").collect();
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].0, "j");
    }
}
