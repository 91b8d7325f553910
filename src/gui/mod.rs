mod app;
mod canvas;
mod state;
mod themes;

use crate::core::{canvas::Canvas, error::CanvasError};
use app::CodeCanvasApp;

/// Entry point for GUI mode
pub fn run(canvas: Canvas) -> Result<(), CanvasError> {
    let title = format!("Code Canvas - {}", canvas.file_label);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    tracing::info!("window viewer started");
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(CodeCanvasApp::new(cc, canvas)))),
    )
    .map_err(|error| CanvasError::Gui(error.to_string()))
}
