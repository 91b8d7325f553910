// cli module - command line options for both front-ends
use crate::core::location::decode_range;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "canvas", version, about = "Line-selecting code viewer for terminal and GUI")]
pub struct ViewerOptions {
    /// File to open
    #[arg(required_unless_present = "print_shortcuts")]
    pub path: Option<PathBuf>,

    /// Lines to select on startup, e.g. `42` or `10-25`
    #[arg(short = 'L', long = "lines", value_name = "RANGE", value_parser = parse_lines)]
    pub lines: Option<(usize, usize)>,

    /// Location URL to start from; its `L` parameter seeds the selection
    #[arg(long, value_name = "URL", env = "CODE_CANVAS_LOCATION")]
    pub location: Option<String>,

    /// Commit the copied link should point at
    #[arg(long = "ref", value_name = "SHA")]
    pub git_ref: Option<String>,

    /// Open the desktop window instead of the terminal viewer
    #[arg(long)]
    pub gui: bool,

    /// Neither restore nor record the selection in the session file
    #[arg(long)]
    pub no_session: bool,

    /// Write logs here instead of the data directory
    #[arg(long, value_name = "PATH", env = "CODE_CANVAS_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Print the key bindings and exit
    #[arg(long)]
    pub print_shortcuts: bool,
}

fn parse_lines(value: &str) -> Result<(usize, usize), String> {
    decode_range(value).ok_or_else(|| format!("`{value}` is not a line or a range like 10-25"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_range_and_flags() {
        let opts = ViewerOptions::try_parse_from([
            "canvas", "src/main.rs", "-L", "10-25", "--ref", "abc123", "--no-session",
        ])
        .unwrap();
        assert_eq!(opts.path, Some(PathBuf::from("src/main.rs")));
        assert_eq!(opts.lines, Some((10, 25)));
        assert_eq!(opts.git_ref.as_deref(), Some("abc123"));
        assert!(opts.no_session);
        assert!(!opts.gui);
    }

    #[test]
    fn rejects_malformed_range() {
        assert!(ViewerOptions::try_parse_from(["canvas", "a.rs", "-L", "ten"]).is_err());
    }

    #[test]
    fn path_is_optional_when_printing_shortcuts() {
        let opts = ViewerOptions::try_parse_from(["canvas", "--print-shortcuts"]).unwrap();
        assert!(opts.path.is_none());
        assert!(ViewerOptions::try_parse_from(["canvas"]).is_err());
    }
}
