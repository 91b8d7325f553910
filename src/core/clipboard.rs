// clipboard module - copies the selected lines or a link to them
//
// Clipboard failures never reach the caller: they are logged and the caller
// simply does not show the "copied" flash.
use super::document::Document;
use super::error::Result;
use super::location::Location;
use super::selection::LineRange;

pub trait ClipboardSink {
    fn set_text(&mut self, text: String) -> Result<()>;
}

/// The system clipboard. The handle is opened on first use and kept for the
/// life of the viewer, since on Wayland the copied text is lost once it drops.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: String) -> Result<()> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()?,
        };
        self.inner.insert(clipboard).set_text(text)?;
        Ok(())
    }
}

pub fn copy_range(document: &Document, range: LineRange, sink: &mut dyn ClipboardSink) -> bool {
    let text = document.slice(range);
    match sink.set_text(text) {
        Ok(()) => {
            tracing::info!(%range, lines = range.len(), "lines copied");
            true
        }
        Err(error) => {
            tracing::warn!(%range, %error, "failed to copy lines");
            false
        }
    }
}

pub fn copy_link(
    location: &Location,
    file: &str,
    range: LineRange,
    git_ref: Option<&str>,
    sink: &mut dyn ClipboardSink,
) -> bool {
    let link = location.share_link(file, range, git_ref);
    match sink.set_text(link.to_string()) {
        Ok(()) => {
            tracing::info!(link = %link, "link copied");
            true
        }
        Err(error) => {
            tracing::warn!(%error, "failed to copy link");
            false
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MemoryClipboard;
    use super::*;
    use crate::core::selection::Selection;

    fn thirty_lines() -> Document {
        let text: Vec<String> = (1..=30).map(|n| format!("row {n}")).collect();
        Document::from_string(&text.join("\n"))
    }

    #[test]
    fn copies_exactly_the_selected_lines_in_either_order() {
        let doc = thirty_lines();
        for selection in [Selection::from_parts(5, 8), Selection::from_parts(8, 5)] {
            let mut sink = MemoryClipboard::default();
            assert!(copy_range(&doc, selection.normalized_range(), &mut sink));
            assert_eq!(sink.contents, vec!["row 5\nrow 6\nrow 7\nrow 8".to_string()]);
        }
    }

    #[test]
    fn failures_are_absorbed() {
        let doc = thirty_lines();
        let mut sink = MemoryClipboard { fail: true, ..Default::default() };
        assert!(!copy_range(&doc, LineRange::single(1), &mut sink));
        assert!(sink.contents.is_empty());
    }

    #[test]
    fn link_carries_file_and_range() {
        let location = Location::parse("https://example.com/view?L=2").unwrap();
        let mut sink = MemoryClipboard::default();
        assert!(copy_link(&location, "app.py", LineRange::new(3, 4), None, &mut sink));
        assert_eq!(sink.contents, vec!["https://example.com/view?L=3-4&file=app.py".to_string()]);
    }
}
