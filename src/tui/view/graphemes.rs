// module handling graphemes
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

// Get visual width of string (accounts for wide characters like emojis)
pub fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

// Cut a line to fit `max_width` columns without splitting a grapheme
pub fn truncate_to_width(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (idx, grapheme) in s.grapheme_indices(true) {
        let g_width = visual_width(grapheme);
        if width + g_width > max_width {
            return &s[..idx];
        }
        width += g_width;
    }
    s
}

// Tabs would break column counting; show them as spaces
pub fn expand_tabs(s: &str) -> String {
    s.replace('\t', "    ")
}
