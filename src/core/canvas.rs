// canvas module - one opened document with its own selection controller
//
// Both front-ends hold a Canvas per document view. It owns everything the view
// needs besides drawing: the document, the controller, the clipboard and the
// transient copy feedback. Dropping the canvas drops its observers.
use super::clipboard::{self, ClipboardSink, SystemClipboard};
use super::controller::{Effect, SelectionController};
use super::document::Document;
use super::error::Result;
use super::feedback::{self, Flash};
use super::location::Location;
use super::selection::LineRange;
use super::session::{SessionRecorder, SessionStore};
use crate::cli::ViewerOptions;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub struct Canvas {
    pub document: Document,
    pub controller: SelectionController,
    pub file_label: String,
    pub git_ref: Option<String>,
    pub flash: Option<Flash>,
    clipboard: Box<dyn ClipboardSink>,
}

impl Canvas {
    pub fn new(
        document: Document,
        controller: SelectionController,
        file_label: String,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        Self {
            document,
            controller,
            file_label,
            git_ref: None,
            flash: None,
            clipboard,
        }
    }

    /// Opens the file named by the options and works out the starting location.
    /// Precedence for the first selection: `--lines`, then the `L` of
    /// `--location`, then the session, then nothing.
    pub fn open(options: &ViewerOptions, path: &Path) -> Result<Self> {
        let document = Document::open(path)?;
        let session_key = session_key(path);

        let session = if options.no_session {
            None
        } else {
            match SessionStore::load(&SessionStore::default_path()) {
                Ok(store) => Some(store),
                Err(error) => {
                    tracing::warn!(%error, "session unavailable, starting fresh");
                    None
                }
            }
        };

        let mut location = match (&options.location, &session) {
            (Some(url), _) => Location::parse(url)?,
            (None, Some(store)) => match store.location_for(&session_key) {
                Some(location) => location,
                None => Location::for_file(path)?,
            },
            (None, None) => Location::for_file(path)?,
        };
        if let Some((anchor, head)) = options.lines {
            location.replace_range(LineRange::new(anchor, head));
        }

        let mut controller = SelectionController::new(location);
        if let Some(store) = session {
            controller.subscribe(Box::new(SessionRecorder::new(store, session_key)));
        }

        tracing::info!(
            path = %path.display(),
            lines = document.line_count(),
            location = %controller.location(),
            "canvas opened"
        );

        let mut canvas = Self::new(
            document,
            controller,
            path.display().to_string(),
            Box::new(SystemClipboard::new()),
        );
        canvas.git_ref = options.git_ref.clone();
        Ok(canvas)
    }

    /// Carries out the parts of an effect that do not depend on the front-end.
    /// Returns true when the view has to be redrawn.
    pub fn run_effect(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::Redraw => true,
            Effect::CopyText(range) => self.copy_range(range),
            Effect::CopyLink(range) => self.copy_link(range),
            Effect::None | Effect::PromptGoto | Effect::Unhandled(_) => false,
        }
    }

    pub fn copy_range(&mut self, range: LineRange) -> bool {
        let copied = clipboard::copy_range(&self.document, range, self.clipboard.as_mut());
        if copied {
            self.flash = Some(Flash::copied());
        }
        copied
    }

    pub fn copy_link(&mut self, range: LineRange) -> bool {
        let copied = clipboard::copy_link(
            self.controller.location(),
            &self.file_label,
            range,
            self.git_ref.as_deref(),
            self.clipboard.as_mut(),
        );
        if copied {
            self.flash = Some(Flash::link_copied());
        }
        copied
    }

    pub fn header_text(&self, now: Instant) -> Option<String> {
        feedback::header_text(&self.controller.selection(), self.flash.as_ref(), now)
    }

    // Drops an expired flash; true when the indicator has to be repainted
    pub fn expire_flash(&mut self, now: Instant) -> bool {
        if self.flash.as_ref().is_some_and(|flash| flash.is_expired(now)) {
            self.flash = None;
            return true;
        }
        false
    }
}

// Sessions are keyed by absolute path so the same file matches from any cwd
fn session_key(path: &Path) -> String {
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .display()
        .to_string()
}
