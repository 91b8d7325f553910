// app module - window layout, menus and keyboard for the code canvas
use super::{canvas::CanvasPanel, state::CanvasState, themes};
use crate::core::{actions::Action, canvas::Canvas};
use egui::{Context, Key, KeyboardShortcut, Modifiers, ViewportCommand};
use std::time::Instant;

pub struct CodeCanvasApp {
    state: CanvasState,
    goto_has_focus: bool,
}

// Shift variants first: a plain pattern also matches a shifted key
fn key_bindings() -> Vec<(KeyboardShortcut, Action)> {
    vec![
        (KeyboardShortcut::new(Modifiers::CTRL, Key::Q), Action::Quit),
        (KeyboardShortcut::new(Modifiers::CTRL, Key::G), Action::ToggleShortcuts),
        (KeyboardShortcut::new(Modifiers::SHIFT, Key::J), Action::ExtendNext),
        (KeyboardShortcut::new(Modifiers::SHIFT, Key::ArrowDown), Action::ExtendNext),
        (KeyboardShortcut::new(Modifiers::SHIFT, Key::K), Action::ExtendPrevious),
        (KeyboardShortcut::new(Modifiers::SHIFT, Key::ArrowUp), Action::ExtendPrevious),
        (KeyboardShortcut::new(Modifiers::SHIFT, Key::Y), Action::CopyLink),
        (KeyboardShortcut::new(Modifiers::NONE, Key::J), Action::NextLine),
        (KeyboardShortcut::new(Modifiers::NONE, Key::ArrowDown), Action::NextLine),
        (KeyboardShortcut::new(Modifiers::NONE, Key::K), Action::PreviousLine),
        (KeyboardShortcut::new(Modifiers::NONE, Key::ArrowUp), Action::PreviousLine),
        (KeyboardShortcut::new(Modifiers::NONE, Key::PageDown), Action::PageDown),
        (KeyboardShortcut::new(Modifiers::NONE, Key::PageUp), Action::PageUp),
        (KeyboardShortcut::new(Modifiers::NONE, Key::Y), Action::Copy),
        (KeyboardShortcut::new(Modifiers::NONE, Key::Escape), Action::Cancel),
        (KeyboardShortcut::new(Modifiers::NONE, Key::G), Action::GoToLine),
        (KeyboardShortcut::new(Modifiers::NONE, Key::Q), Action::Quit),
    ]
}

impl CodeCanvasApp {
    pub fn new(cc: &eframe::CreationContext<'_>, canvas: Canvas) -> Self {
        themes::apply_theme(&cc.egui_ctx);
        Self {
            state: CanvasState::new(canvas),
            goto_has_focus: false,
        }
    }

    fn menu_bar(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("❌ Quit (Ctrl+Q)").clicked() {
                        self.run_action(Action::Quit);
                        ui.close();
                    }
                });

                ui.menu_button("Selection", |ui| {
                    if ui.button("📋 Copy lines (y)").clicked() {
                        self.run_action(Action::Copy);
                        ui.close();
                    }

                    if ui.button("🔗 Copy link (Y)").clicked() {
                        self.run_action(Action::CopyLink);
                        ui.close();
                    }

                    ui.separator();

                    if ui.button("↧ Go to line (g)").clicked() {
                        self.run_action(Action::GoToLine);
                        ui.close();
                    }

                    if ui.button("✕ Clear selection (Esc)").clicked() {
                        self.run_action(Action::Cancel);
                        ui.close();
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("⌨ Shortcuts (Ctrl+G)").clicked() {
                        self.run_action(Action::ToggleShortcuts);
                        ui.close();
                    }
                });
            });
        });
    }

    fn status_bar(&mut self, ctx: &Context, now: Instant) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.state.canvas.file_label.as_str());
                ui.separator();
                ui.monospace(self.state.canvas.controller.location().as_str());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(text) = self.state.canvas.header_text(now) {
                        if self.state.canvas.flash.is_some() {
                            ui.colored_label(themes::FLASH_TEXT, text);
                        } else {
                            ui.label(text);
                        }
                    }
                });
            });
        });
    }

    fn handle_shortcuts(&mut self, ctx: &Context) {
        if self.state.goto_open() {
            return;
        }

        let mut triggered = Vec::new();
        ctx.input_mut(|i| {
            for (shortcut, action) in key_bindings() {
                if i.consume_shortcut(&shortcut) {
                    triggered.push(action);
                }
            }
        });

        for action in triggered {
            self.run_action(action);
        }
    }

    fn run_action(&mut self, action: Action) {
        let was_open = self.state.goto_open();
        self.state.handle_action(action);
        if self.state.goto_open() && !was_open {
            self.goto_has_focus = true;
        }
    }

    fn show_goto_dialog(&mut self, ctx: &Context) {
        let mut outcome: Option<bool> = None;

        egui::Window::new("Go to line")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Line:");
                    let response = ui.text_edit_singleline(&mut self.state.goto_input);

                    if self.goto_has_focus {
                        response.request_focus();
                        self.goto_has_focus = false;
                    }

                    if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                        outcome = Some(true);
                    }
                });

                ui.horizontal(|ui| {
                    if ui.button("Go").clicked() {
                        outcome = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        outcome = Some(false);
                    }
                });

                if ui.input(|i| i.key_pressed(Key::Escape)) {
                    outcome = Some(false);
                }
            });

        if let Some(confirmed) = outcome {
            self.state.finish_goto(confirmed);
        }
    }

    fn show_shortcuts_window(&mut self, ctx: &Context) {
        use crate::core::shortcuts::Shortcuts;

        egui::Window::new("Keyboard Shortcuts")
            .collapsible(true)
            .resizable(true)
            .show(ctx, |ui| {
                egui::Grid::new("shortcuts_grid").striped(true).show(ui, |ui| {
                    ui.label("Action");
                    ui.label("Shortcut");
                    ui.end_row();

                    for (shortcut, description) in Shortcuts::get_shortcut_hints() {
                        ui.label(description);
                        ui.label(shortcut);
                        ui.end_row();
                    }

                    ui.label("Select line");
                    ui.label("Click number");
                    ui.end_row();
                    ui.label("Extend selection");
                    ui.label("Shift+Click number");
                    ui.end_row();
                });

                if ui.button("Close").clicked() {
                    self.state.show_shortcuts = false;
                }
            });
    }
}

impl eframe::App for CodeCanvasApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.state.canvas.expire_flash(now);

        self.handle_shortcuts(ctx);
        self.menu_bar(ctx);
        self.status_bar(ctx, now);

        let accepts_input = !self.state.goto_open();
        egui::CentralPanel::default().show(ctx, |ui| {
            CanvasPanel::new(&mut self.state, accepts_input).show(ui);
        });

        if self.state.goto_open() {
            self.show_goto_dialog(ctx);
        }

        if self.state.show_shortcuts {
            self.show_shortcuts_window(ctx);
        }

        // Wake up again when the copy flash has to disappear
        if let Some(flash) = &self.state.canvas.flash {
            ctx.request_repaint_after(flash.remaining(now));
        }

        if self.state.quit_requested {
            ctx.send_viewport_cmd(ViewportCommand::Close);
        }
    }
}
