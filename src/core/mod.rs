// core module - front-end independent selection logic shared by the TUI and the GUI
pub mod actions;
pub mod canvas;
pub mod clipboard;
pub mod controller;
pub mod document;
pub mod error;
pub mod feedback;
pub mod location;
pub mod selection;
pub mod session;
pub mod shortcuts;
