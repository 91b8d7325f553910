mod cli;
mod core;
mod gui;
mod logging;
mod tui;

use clap::Parser;
use cli::ViewerOptions;
use crate::core::{canvas::Canvas, error::CanvasError, shortcuts::Shortcuts};
use std::process::ExitCode;
use tui::TerminalViewer;

fn main() -> ExitCode {
    let options = ViewerOptions::parse();

    if options.print_shortcuts {
        Shortcuts::print_all();
        return ExitCode::SUCCESS;
    }

    let log_guard = match logging::init(options.log_file.as_deref()) {
        Ok(guard) => Some(guard),
        Err(error) => {
            eprintln!("Logging disabled: {error}");
            None
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "viewer failed");
            eprintln!("Error: {error}");
            if let Some(guard) = &log_guard {
                eprintln!("Log: {}", guard.log_file.display());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(options: &ViewerOptions) -> Result<(), CanvasError> {
    // clap only lets a missing path through together with --print-shortcuts
    let Some(path) = options.path.as_deref() else {
        return Ok(());
    };

    let canvas = Canvas::open(options, path)?;
    if options.gui {
        gui::run(canvas)
    } else {
        TerminalViewer::new(canvas).run()?;
        Ok(())
    }
}
