// actions module - everything a key press or a mouse event can ask the viewer to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    // Keyboard navigation
    NextLine,
    PreviousLine,
    ExtendNext,
    ExtendPrevious,
    PageDown,
    PageUp,

    // Gutter mouse gestures (screen column, screen row)
    GutterClick(u16, u16),
    GutterShiftClick(u16, u16),
    ScrollUp,
    ScrollDown,

    // Selection operations
    Copy,
    CopyLink,
    Cancel,
    GoToLine,

    ToggleShortcuts,
    Quit,
}

impl Action {
    // Actions that only make sense once a selection exists
    pub fn needs_selection(&self) -> bool {
        matches!(self, Action::Copy | Action::CopyLink | Action::Cancel)
    }
}
