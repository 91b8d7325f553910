// controller module - owns one view's selection and keeps its location in sync
//
// The controller runs the pure transitions from the selection module and then
// performs the side effects that belong to the selection itself: rewriting the
// `L` parameter and telling subscribed observers. Rendering, clipboard writes and
// prompts are left to the front-end through the returned Effect.
use super::actions::Action;
use super::location::Location;
use super::selection::{parse_line, transition, Command, LineRange, Selection};

/// One applied change, handed to every observer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub before: Selection,
    pub after: Selection,
    pub cause: Command,
}

pub trait SelectionObserver {
    fn selection_changed(&mut self, transition: &Transition, location: &Location);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// What the front-end has to do after an action was dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    Redraw,
    CopyText(LineRange),
    CopyLink(LineRange),
    PromptGoto,
    // Not a selection action; the front-end handles it itself
    Unhandled(Action),
}

pub struct SelectionController {
    selection: Selection,
    awaiting_goto: bool,
    location: Location,
    observers: Vec<(SubscriptionId, Box<dyn SelectionObserver>)>,
    next_subscription: u64,
}

impl SelectionController {
    // Seeds the selection from the location without writing it back
    pub fn new(location: Location) -> Self {
        let selection = location.selection();
        if let Some(range) = selection.range() {
            tracing::debug!(%range, "selection restored from location");
        }

        Self {
            selection,
            awaiting_goto: false,
            location,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn awaiting_goto(&self) -> bool {
        self.awaiting_goto
    }

    pub fn subscribe(&mut self, observer: Box<dyn SelectionObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        id
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(subscribed, _)| *subscribed != id);
        self.observers.len() != before
    }

    /// Applies a command. Returns `None` when the command leaves nothing to do:
    /// extending without a selection, or a goto whose input is not a line number.
    pub fn apply(&mut self, command: Command) -> Option<Transition> {
        match &command {
            Command::ExtendClick(_) if self.selection.is_empty() => return None,
            Command::GotoLine(input) if parse_line(input).is_none() => {
                tracing::debug!(input = %input, "goto input ignored");
                return None;
            }
            _ => {}
        }

        let before = self.selection;
        let after = transition(before, &command);
        self.selection = after;

        match after.range() {
            Some(range) => self.location.replace_range(range),
            None => self.location.remove_range(),
        }

        tracing::debug!(
            command = command.name(),
            anchor = ?after.anchor(),
            head = ?after.head(),
            revision = self.location.revision(),
            location = %self.location,
            "selection changed"
        );

        let change = Transition { before, after, cause: command };
        for (_, observer) in self.observers.iter_mut() {
            observer.selection_changed(&change, &self.location);
        }
        Some(change)
    }

    // A shift-click with nothing selected starts a fresh selection
    pub fn click(&mut self, line: usize, extend: bool) -> Option<Transition> {
        if extend && !self.selection.is_empty() {
            self.apply(Command::ExtendClick(line))
        } else {
            self.apply(Command::PrimaryClick(line))
        }
    }

    /// Opens the goto prompt. Returns false while a prompt is already pending,
    /// so a held or repeated key cannot stack prompts.
    pub fn begin_goto(&mut self) -> bool {
        if self.awaiting_goto {
            return false;
        }
        self.awaiting_goto = true;
        true
    }

    // Resumes after the prompt; None means the prompt was cancelled
    pub fn finish_goto(&mut self, input: Option<&str>) -> Option<Transition> {
        self.awaiting_goto = false;
        input.and_then(|input| self.apply(Command::GotoLine(input.to_string())))
    }

    /// Keyboard dispatch for one key press. Navigation may start a selection
    /// from nothing; copying and cancelling need an existing one.
    pub fn dispatch(&mut self, action: Action) -> Effect {
        if action.needs_selection() && self.selection.is_empty() {
            return Effect::None;
        }

        match action {
            Action::NextLine => self.step(1, false),
            Action::PreviousLine => self.step(-1, false),
            Action::ExtendNext => self.step(1, true),
            Action::ExtendPrevious => self.step(-1, true),
            Action::Copy => Effect::CopyText(self.selection.normalized_range()),
            Action::CopyLink => Effect::CopyLink(self.selection.normalized_range()),
            Action::Cancel => {
                self.apply(Command::Clear);
                Effect::Redraw
            }
            Action::GoToLine => {
                if self.begin_goto() {
                    Effect::PromptGoto
                } else {
                    Effect::None
                }
            }
            other => Effect::Unhandled(other),
        }
    }

    fn step(&mut self, delta: isize, extend: bool) -> Effect {
        match self.apply(Command::MoveBy { delta, extend }) {
            Some(_) => Effect::Redraw,
            None => Effect::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder {
        seen: Rc<RefCell<Vec<(Transition, String)>>>,
    }

    impl SelectionObserver for Recorder {
        fn selection_changed(&mut self, transition: &Transition, location: &Location) {
            self.seen.borrow_mut().push((transition.clone(), location.to_string()));
        }
    }

    fn controller(url: &str) -> SelectionController {
        SelectionController::new(Location::parse(url).unwrap())
    }

    #[test]
    fn click_shift_click_and_cancel_keep_the_location_in_sync() {
        let mut ctl = controller("https://example.com/view?file=app.py");

        ctl.click(20, false);
        assert_eq!(ctl.selection().normalized_range(), LineRange::single(20));
        assert_eq!(ctl.location().range_param().as_deref(), Some("20"));

        ctl.click(15, true);
        assert_eq!(ctl.selection().normalized_range(), LineRange::new(15, 20));
        assert_eq!(ctl.location().range_param().as_deref(), Some("15-20"));

        assert_eq!(ctl.dispatch(Action::Cancel), Effect::Redraw);
        assert_eq!(ctl.selection(), Selection::Empty);
        assert_eq!(ctl.location().range_param(), None);
        assert_eq!(ctl.location().as_str(), "https://example.com/view?file=app.py");
    }

    #[test]
    fn selection_is_seeded_from_the_location() {
        let ctl = controller("https://example.com/view?L=10-25");
        assert_eq!(ctl.selection(), Selection::from_parts(10, 25));
        assert_eq!(ctl.location().revision(), 0);
    }

    #[test]
    fn malformed_location_seeds_nothing() {
        let ctl = controller("https://example.com/view?L=ten");
        assert_eq!(ctl.selection(), Selection::Empty);
    }

    #[test]
    fn failed_goto_changes_nothing() {
        let mut ctl = controller("https://example.com/view");
        ctl.click(5, false);
        let revision = ctl.location().revision();

        assert_eq!(ctl.dispatch(Action::GoToLine), Effect::PromptGoto);
        assert!(ctl.finish_goto(Some("five")).is_none());
        assert_eq!(ctl.selection(), Selection::single(5));
        assert_eq!(ctl.location().revision(), revision);
        assert!(!ctl.awaiting_goto());
    }

    #[test]
    fn cancelled_goto_changes_nothing() {
        let mut ctl = controller("https://example.com/view");
        ctl.click(5, false);
        assert!(ctl.begin_goto());
        assert!(ctl.finish_goto(None).is_none());
        assert_eq!(ctl.selection(), Selection::single(5));
    }

    #[test]
    fn goto_prompt_does_not_stack() {
        let mut ctl = controller("https://example.com/view");
        assert_eq!(ctl.dispatch(Action::GoToLine), Effect::PromptGoto);
        assert_eq!(ctl.dispatch(Action::GoToLine), Effect::None);

        let change = ctl.finish_goto(Some("42")).unwrap();
        assert_eq!(change.after, Selection::single(42));
        assert_eq!(ctl.location().range_param().as_deref(), Some("42"));
        assert_eq!(ctl.dispatch(Action::GoToLine), Effect::PromptGoto);
    }

    #[test]
    fn navigation_starts_a_selection_from_nothing() {
        let mut ctl = controller("https://example.com/view");
        assert_eq!(ctl.dispatch(Action::NextLine), Effect::Redraw);
        assert_eq!(ctl.selection(), Selection::single(1));
        assert_eq!(ctl.location().range_param().as_deref(), Some("1"));
    }

    #[test]
    fn copy_and_cancel_need_a_selection() {
        let mut ctl = controller("https://example.com/view");
        assert_eq!(ctl.dispatch(Action::Copy), Effect::None);
        assert_eq!(ctl.dispatch(Action::CopyLink), Effect::None);
        assert_eq!(ctl.dispatch(Action::Cancel), Effect::None);

        ctl.click(8, false);
        ctl.click(5, true);
        assert_eq!(ctl.dispatch(Action::Copy), Effect::CopyText(LineRange::new(5, 8)));
        assert_eq!(ctl.dispatch(Action::CopyLink), Effect::CopyLink(LineRange::new(5, 8)));
    }

    #[test]
    fn keyboard_moves_clamp_at_line_one() {
        let mut ctl = controller("https://example.com/view");
        ctl.click(1, false);
        ctl.dispatch(Action::PreviousLine);
        assert_eq!(ctl.selection(), Selection::single(1));
        ctl.dispatch(Action::ExtendNext);
        ctl.dispatch(Action::ExtendNext);
        assert_eq!(ctl.location().range_param().as_deref(), Some("1-3"));
    }

    #[test]
    fn shift_click_without_selection_starts_one() {
        let mut ctl = controller("https://example.com/view");
        let change = ctl.click(9, true).unwrap();
        assert_eq!(change.cause, Command::PrimaryClick(9));
        assert_eq!(ctl.selection(), Selection::single(9));
        assert_eq!(ctl.location().range_param().as_deref(), Some("9"));
    }

    #[test]
    fn extend_command_without_selection_is_ignored() {
        let mut ctl = controller("https://example.com/view");
        assert!(ctl.apply(Command::ExtendClick(9)).is_none());
        assert_eq!(ctl.location().revision(), 0);
    }

    #[test]
    fn front_end_actions_are_passed_back() {
        let mut ctl = controller("https://example.com/view");
        assert_eq!(ctl.dispatch(Action::Quit), Effect::Unhandled(Action::Quit));
        assert_eq!(ctl.dispatch(Action::PageDown), Effect::Unhandled(Action::PageDown));
    }

    #[test]
    fn observers_see_every_transition_until_unsubscribed() {
        let mut ctl = controller("https://example.com/view");
        let recorder = Recorder::default();
        let id = ctl.subscribe(Box::new(recorder.clone()));

        ctl.click(3, false);
        ctl.click(6, true);
        {
            let seen = recorder.seen.borrow();
            assert_eq!(seen.len(), 2);
            assert_eq!(seen[1].0.before, Selection::single(3));
            assert_eq!(seen[1].0.after, Selection::from_parts(3, 6));
            assert_eq!(seen[1].0.cause, Command::ExtendClick(6));
            assert_eq!(seen[1].1, "https://example.com/view?L=3-6");
        }

        assert!(ctl.unsubscribe(id));
        assert!(!ctl.unsubscribe(id));
        ctl.click(1, false);
        assert_eq!(recorder.seen.borrow().len(), 2);
    }
}
