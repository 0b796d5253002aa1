use eframe::egui::{self, RichText};
use taskpad_core::app::{ConfirmAction, Dialog};

use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResponse {
    Dismissed,
    Answered(ConfirmAction, bool),
}

/// Draws `dialog` centred over the window. Returns `None` while it stays open.
pub fn show(ctx: &egui::Context, dialog: &Dialog) -> Option<DialogResponse> {
    let mut response = None;

    egui::Window::new(dialog.title())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.label(RichText::new(dialog.message()).font(theme::font(theme::NORMAL_SIZE)));
            ui.add_space(10.0);

            ui.horizontal(|ui| match dialog {
                Dialog::Confirm(action, _) => {
                    if ui.add(button("Yes")).clicked() {
                        response = Some(DialogResponse::Answered(*action, true));
                    }
                    if ui.add(button("No")).clicked() {
                        response = Some(DialogResponse::Answered(*action, false));
                    }
                }
                Dialog::Warning(_) | Dialog::Info(_) | Dialog::Success(_) => {
                    if ui.add(button("OK")).clicked() {
                        response = Some(DialogResponse::Dismissed);
                    }
                }
            });
        });

    if response.is_none() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        response = Some(match dialog {
            Dialog::Confirm(action, _) => DialogResponse::Answered(*action, false),
            _ => DialogResponse::Dismissed,
        });
    }

    response
}

pub fn button(text: &str) -> egui::Button<'static> {
    egui::Button::new(
        RichText::new(text.to_string())
            .font(theme::font(theme::NORMAL_SIZE))
            .color(theme::LIGHT_TEXT),
    )
    .fill(theme::PRIMARY)
}
