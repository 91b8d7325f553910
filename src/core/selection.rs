// selection module - the line selection state machine
//
// Every transition consumes a Selection and returns the next one. Nothing here
// touches the screen, the location or the clipboard; the controller does that
// after a transition has been computed.
use std::fmt;

/// Inclusive, 1-based range of lines with `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    // Orders the two ends, so callers may pass anchor and head in any order
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn single(line: usize) -> Self {
        Self { start: line, end: line }
    }

    pub fn contains(&self, line: usize) -> bool {
        line >= self.start && line <= self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Empty,
    Lines {
        anchor: usize, // where the gesture began, fixed while extending
        head: usize,   // where the selection currently ends
    },
}

impl Selection {
    pub fn single(line: usize) -> Self {
        let line = line.max(1);
        Self::Lines { anchor: line, head: line }
    }

    // Used when restoring from a location: the stored order is trusted as-is
    pub fn from_parts(anchor: usize, head: usize) -> Self {
        Self::Lines {
            anchor: anchor.max(1),
            head: head.max(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn anchor(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::Lines { anchor, .. } => Some(*anchor),
        }
    }

    pub fn head(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::Lines { head, .. } => Some(*head),
        }
    }

    pub fn range(&self) -> Option<LineRange> {
        match self {
            Self::Empty => None,
            Self::Lines { anchor, head } => Some(LineRange::new(*anchor, *head)),
        }
    }

    /// Ordered range of the selection. An empty selection falls back to line 1
    /// so that range consumers (copy, share) always have something to work with.
    pub fn normalized_range(&self) -> LineRange {
        self.range().unwrap_or(LineRange::single(1))
    }

    pub fn primary_click(self, line: usize) -> Self {
        Self::single(line)
    }

    // Extending needs an existing anchor; on an empty selection this is a no-op
    pub fn extend_click(self, line: usize) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Lines { anchor, .. } => Self::Lines {
                anchor,
                head: line.max(1),
            },
        }
    }

    pub fn move_by(self, delta: isize, extend: bool) -> Self {
        match self {
            Self::Empty => Self::single(1),
            Self::Lines { anchor, head } if extend => Self::Lines {
                anchor,
                head: offset_line(head, delta),
            },
            Self::Lines { anchor, .. } => Self::single(offset_line(anchor, delta)),
        }
    }

    pub fn goto_line(self, input: &str) -> Self {
        match parse_line(input) {
            Some(line) => Self::single(line),
            None => self,
        }
    }

    pub fn clear(self) -> Self {
        Self::Empty
    }
}

// No upper bound: a line past the end of the document simply has nothing to show
fn offset_line(line: usize, delta: isize) -> usize {
    line.saturating_add_signed(delta).max(1)
}

/// Parses a positive, 1-based line number. Surrounding whitespace is allowed.
pub fn parse_line(input: &str) -> Option<usize> {
    input.trim().parse::<usize>().ok().filter(|line| *line >= 1)
}

/// Everything that can change a selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    PrimaryClick(usize),
    ExtendClick(usize),
    MoveBy { delta: isize, extend: bool },
    GotoLine(String),
    Clear,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PrimaryClick(_) => "primary_click",
            Self::ExtendClick(_) => "extend_click",
            Self::MoveBy { .. } => "move_by",
            Self::GotoLine(_) => "goto_line",
            Self::Clear => "clear",
        }
    }
}

/// The pure state-transition function.
pub fn transition(selection: Selection, command: &Command) -> Selection {
    match command {
        Command::PrimaryClick(line) => selection.primary_click(*line),
        Command::ExtendClick(line) => selection.extend_click(*line),
        Command::MoveBy { delta, extend } => selection.move_by(*delta, *extend),
        Command::GotoLine(input) => selection.goto_line(input),
        Command::Clear => selection.clear(),
    }
}
