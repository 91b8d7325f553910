// location module - keeps the line selection in a shareable URL
//
// The `L` query parameter carries the normalized range: `L=42` for one line,
// `L=10-25` for several. The location is always rewritten in place, never
// appended, so there is no history of past selections to walk back through.
use super::error::{CanvasError, Result};
use super::selection::{parse_line, LineRange, Selection};
use std::fmt;
use std::path::Path;
use url::Url;

pub const RANGE_PARAM: &str = "L";
pub const FILE_PARAM: &str = "file";
pub const REF_PARAM: &str = "ref";

pub fn encode_range(range: LineRange) -> String {
    range.to_string()
}

/// Decodes an `L` value into `(anchor, head)`. The stored order is kept as-is;
/// anything that is not a positive line number yields `None`.
pub fn decode_range(value: &str) -> Option<(usize, usize)> {
    match value.split_once('-') {
        None => parse_line(value).map(|line| (line, line)),
        Some((first, second)) => Some((parse_line(first)?, parse_line(second)?)),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    url: Url,
    revision: u64,
}

impl Location {
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input).map_err(|source| CanvasError::InvalidLocation {
            input: input.to_string(),
            source,
        })?;
        Ok(Self::from_url(url))
    }

    // The path must be absolute; relative paths are resolved against the cwd first
    pub fn for_file(path: &Path) -> Result<Self> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        let url = Url::from_file_path(&absolute)
            .map_err(|_| CanvasError::NotAFileLocation(absolute.display().to_string()))?;
        Ok(Self::from_url(url))
    }

    pub fn from_url(url: Url) -> Self {
        Self { url, revision: 0 }
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    // Number of writes since the location was created
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    pub fn range_param(&self) -> Option<String> {
        self.param(RANGE_PARAM)
    }

    /// Selection stored in the location, `Empty` when `L` is absent or malformed.
    pub fn selection(&self) -> Selection {
        self.range_param()
            .as_deref()
            .and_then(decode_range)
            .map(|(anchor, head)| Selection::from_parts(anchor, head))
            .unwrap_or_default()
    }

    pub fn replace_range(&mut self, range: LineRange) {
        set_param(&mut self.url, RANGE_PARAM, &encode_range(range));
        self.revision += 1;
    }

    // Drops the parameter entirely instead of leaving `L=` behind
    pub fn remove_range(&mut self) {
        remove_param(&mut self.url, RANGE_PARAM);
        self.revision += 1;
    }

    /// Link that reopens `file` with `range` selected, pinned to `git_ref` when given.
    pub fn share_link(&self, file: &str, range: LineRange, git_ref: Option<&str>) -> Url {
        let mut url = self.url.clone();
        set_param(&mut url, FILE_PARAM, file);
        set_param(&mut url, RANGE_PARAM, &encode_range(range));
        if let Some(git_ref) = git_ref {
            set_param(&mut url, REF_PARAM, git_ref);
        }
        url
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

// Replaces the first occurrence in place and keeps every other pair in order
fn set_param(url: &mut Url, name: &str, value: &str) {
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let mut replaced = false;
    pairs.retain_mut(|(key, current)| {
        if key != name {
            return true;
        }
        if replaced {
            return false;
        }
        *current = value.to_string();
        replaced = true;
        true
    });
    if !replaced {
        pairs.push((name.to_string(), value.to_string()));
    }
    write_pairs(url, &pairs);
}

fn remove_param(url: &mut Url, name: &str) {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .into_owned()
        .filter(|(key, _)| key != name)
        .collect();
    write_pairs(url, &pairs);
}

fn write_pairs(url: &mut Url, pairs: &[(String, String)]) {
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(input: &str) -> Location {
        Location::parse(input).unwrap()
    }

    #[test]
    fn single_line_encodes_without_separator() {
        assert_eq!(encode_range(LineRange::single(42)), "42");
        assert_eq!(encode_range(LineRange::new(10, 25)), "10-25");
    }

    #[test]
    fn decode_reverses_encode() {
        for (a, b) in [(1, 1), (1, 2), (10, 25), (42, 42), (999, 1000)] {
            let range = LineRange::new(a, b);
            assert_eq!(decode_range(&encode_range(range)), Some((a, b)));
        }
    }

    #[test]
    fn decode_keeps_stored_order() {
        assert_eq!(decode_range("20-15"), Some((20, 15)));
        assert_eq!(Selection::from_parts(20, 15).normalized_range(), LineRange::new(15, 20));
    }

    #[test]
    fn decode_rejects_malformed_values() {
        for value in ["", "abc", "10-", "-5", "3-x", "0", "0-4", "1-2-3"] {
            assert_eq!(decode_range(value), None, "value {value:?}");
        }
    }

    #[test]
    fn replace_range_keeps_other_params() {
        let mut loc = location("https://example.com/view?file=src%2Fmain.rs&L=3&theme=dark");
        loc.replace_range(LineRange::new(10, 12));
        assert_eq!(loc.as_str(), "https://example.com/view?file=src%2Fmain.rs&L=10-12&theme=dark");
        assert_eq!(loc.revision(), 1);
    }

    #[test]
    fn replace_range_appends_when_missing() {
        let mut loc = location("https://example.com/view");
        loc.replace_range(LineRange::single(20));
        assert_eq!(loc.as_str(), "https://example.com/view?L=20");
    }

    #[test]
    fn remove_range_drops_the_parameter() {
        let mut loc = location("https://example.com/view?L=4-9&file=a.rs");
        loc.remove_range();
        assert_eq!(loc.range_param(), None);
        assert_eq!(loc.as_str(), "https://example.com/view?file=a.rs");

        let mut loc = location("https://example.com/view?L=4");
        loc.remove_range();
        assert_eq!(loc.as_str(), "https://example.com/view");
    }

    #[test]
    fn selection_is_read_back_from_the_location() {
        assert_eq!(location("https://e.com/?L=7").selection(), Selection::single(7));
        assert_eq!(location("https://e.com/?L=9-2").selection(), Selection::from_parts(9, 2));
        assert_eq!(location("https://e.com/?L=oops").selection(), Selection::Empty);
        assert_eq!(location("https://e.com/").selection(), Selection::Empty);
    }

    #[test]
    fn share_link_combines_file_range_and_ref() {
        let loc = location("https://example.com/view?L=1");
        let link = loc.share_link("src/lib.rs", LineRange::new(5, 8), Some("abc123"));
        assert_eq!(link.as_str(), "https://example.com/view?L=5-8&file=src%2Flib.rs&ref=abc123");
    }

    #[test]
    fn file_locations_are_absolute() {
        let loc = Location::for_file(Path::new("notes.txt")).unwrap();
        assert!(loc.as_str().starts_with("file:///"));
        assert!(loc.as_str().ends_with("/notes.txt"));
    }

    #[test]
    fn malformed_location_is_an_error() {
        assert!(matches!(
            Location::parse("not a url"),
            Err(CanvasError::InvalidLocation { .. })
        ));
    }
}
