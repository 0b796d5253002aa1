use std::path::PathBuf;

use eframe::egui::{self, RichText};
use taskpad_core::app::{AppState, Dialog, Outcome};
use taskpad_core::clock;
use taskpad_core::task;
use tracing::{error, info};

use crate::background::Background;
use crate::dialogs::{self, DialogResponse};
use crate::theme;

pub const WINDOW_TITLE: &str = "Task Manager";

#[derive(Debug, Clone, Copy)]
enum Action {
    Add,
    Remove,
    Toggle,
    Clear,
    Save,
    Load,
}

const BUTTON_ROW: [(&str, Action); 5] = [
    ("Remove Selected", Action::Remove),
    ("Mark as Complete", Action::Toggle),
    ("Clear All Tasks", Action::Clear),
    ("Save Tasks", Action::Save),
    ("Load Tasks", Action::Load),
];

/// Action dispatch and the open dialog, kept apart from the widgets so
/// it runs without a window.
struct Session {
    state: AppState,
    dialog: Option<Dialog>,
}

impl Session {
    fn new(state: AppState) -> Self {
        Self {
            state,
            dialog: None,
        }
    }

    fn run(&mut self, action: Action) {
        info!(?action, "ui action");
        let result = match action {
            Action::Add => self.state.add_task(),
            Action::Remove => self.state.remove_selected(),
            Action::Toggle => self.state.toggle_selected(),
            Action::Clear => Ok(self.state.request_clear()),
            Action::Save => self.state.save_tasks(),
            Action::Load => self.state.load_tasks(),
        };

        match result {
            Ok(Outcome { dialog }) => self.dialog = dialog,
            Err(err) => {
                let message = format!("{err:#}");
                error!(?action, error = %message, "action failed");
                self.state.set_status(format!("Error: {message}"));
            }
        }
    }

    fn answer(&mut self, response: DialogResponse) {
        self.dialog = None;
        if let DialogResponse::Answered(_, confirmed) = response {
            self.dialog = self.state.confirm_clear(confirmed).dialog;
        }
    }
}

pub struct TaskpadApp {
    session: Session,
    background: Option<Background>,
    header_date: String,
}

impl TaskpadApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        state: AppState,
        background_candidates: &[PathBuf],
    ) -> Self {
        theme::apply(&cc.egui_ctx);

        let background = Background::load(&cc.egui_ctx, background_candidates);
        let header_date = clock::header_date(state.clock());

        let mut session = Session::new(state);
        session.run(Action::Load);
        Self {
            session,
            background,
            header_date,
        }
    }

    fn header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .exact_height(theme::HEADER_HEIGHT)
            .frame(egui::Frame::none().fill(theme::PRIMARY))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(15.0);
                    ui.label(
                        RichText::new(WINDOW_TITLE)
                            .font(theme::font(theme::HEADER_SIZE))
                            .strong()
                            .color(theme::LIGHT_TEXT),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::BOTTOM), |ui| {
                    ui.add_space(10.0);
                    ui.label(
                        RichText::new(&self.header_date)
                            .font(theme::font(theme::STATUS_SIZE))
                            .color(theme::LIGHT_TEXT),
                    );
                });
            });
    }

    fn status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status")
            .exact_height(theme::STATUS_HEIGHT)
            .frame(
                egui::Frame::none()
                    .fill(theme::PRIMARY)
                    .inner_margin(egui::Margin::symmetric(10.0, 5.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        RichText::new(self.session.state.status())
                            .font(theme::font(theme::STATUS_SIZE))
                            .color(theme::LIGHT_TEXT),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(self.session.state.counter_text())
                                .font(theme::font(theme::STATUS_SIZE))
                                .color(theme::LIGHT_TEXT),
                        );
                    });
                });
            });
    }

    fn button_row(&self, ctx: &egui::Context, enabled: bool) -> Option<Action> {
        let mut clicked = None;
        let fill = if self.background.is_some() {
            egui::Color32::TRANSPARENT
        } else {
            theme::BACKGROUND
        };

        egui::TopBottomPanel::bottom("buttons")
            .exact_height(theme::BUTTON_ROW_HEIGHT)
            .frame(
                egui::Frame::none()
                    .fill(fill)
                    .inner_margin(egui::Margin::symmetric(20.0, 10.0)),
            )
            .show(ctx, |ui| {
                ui.add_enabled_ui(enabled, |ui| {
                    ui.columns(BUTTON_ROW.len(), |columns| {
                        for (column, (label, action)) in columns.iter_mut().zip(BUTTON_ROW) {
                            let size = egui::vec2(column.available_width(), 40.0);
                            if column.add_sized(size, dialogs::button(label)).clicked() {
                                clicked = Some(action);
                            }
                        }
                    });
                });
            });

        clicked
    }

    fn content(&mut self, ctx: &egui::Context, enabled: bool) -> Option<Action> {
        let mut clicked = None;
        let fill = if self.background.is_some() {
            egui::Color32::TRANSPARENT
        } else {
            theme::BACKGROUND
        };

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(fill)
                    .inner_margin(egui::Margin::symmetric(20.0, 10.0)),
            )
            .show(ctx, |ui| {
                ui.add_enabled_ui(enabled, |ui| {
                    egui::Frame::none()
                        .fill(theme::ACCENT)
                        .inner_margin(egui::Margin::same(10.0))
                        .show(ui, |ui| {
                            if self.input_row(ui) {
                                clicked = Some(Action::Add);
                            }

                            ui.add_space(10.0);
                            let (rect, _) = ui.allocate_exact_size(
                                egui::vec2(ui.available_width(), 2.0),
                                egui::Sense::hover(),
                            );
                            ui.painter().rect_filled(rect, 0.0, theme::SECONDARY);
                            ui.add_space(10.0);

                            self.task_list(ui);
                        });
                });
            });

        clicked
    }

    /// Returns true when the user submitted the entry.
    fn input_row(&mut self, ui: &mut egui::Ui) -> bool {
        let mut submitted = false;
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("New Task:")
                    .font(theme::font(theme::NORMAL_SIZE))
                    .color(theme::DARK_TEXT),
            );

            let add_width = 110.0;
            let entry = ui.add_sized(
                [ui.available_width() - add_width, 24.0],
                egui::TextEdit::singleline(&mut self.session.state.input)
                    .font(theme::font(theme::NORMAL_SIZE)),
            );
            if entry.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submitted = true;
                entry.request_focus();
            }

            if ui.add(dialogs::button("Add Task")).clicked() {
                submitted = true;
            }
        });
        submitted
    }

    fn task_list(&mut self, ui: &mut egui::Ui) {
        let mut picked = None;

        egui::Frame::none()
            .fill(theme::LIST_FILL)
            .inner_margin(egui::Margin::same(4.0))
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        for (idx, entry) in self.session.state.tasks().iter().enumerate() {
                            let selected = self.session.state.selection() == Some(idx);
                            let color = if selected {
                                theme::LIGHT_TEXT
                            } else if task::is_completed(entry) {
                                theme::DONE_TEXT
                            } else {
                                theme::DARK_TEXT
                            };
                            let text = RichText::new(entry)
                                .font(theme::font(theme::LIST_SIZE))
                                .color(color);
                            let row = ui.add_sized(
                                [ui.available_width(), theme::LIST_SIZE + 10.0],
                                egui::SelectableLabel::new(selected, text),
                            );
                            if row.clicked() {
                                picked = Some(idx);
                            }
                        }
                    });
            });

        if let Some(idx) = picked {
            self.session.state.select(Some(idx));
        }
    }
}

impl eframe::App for TaskpadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(background) = &self.background {
            background.paint(ctx);
        }

        let enabled = self.session.dialog.is_none();

        self.header(ctx);
        self.status_bar(ctx);
        let from_buttons = self.button_row(ctx, enabled);
        let from_content = self.content(ctx, enabled);

        if let Some(action) = from_content.or(from_buttons) {
            self.session.run(action);
        }

        if let Some(dialog) = self.session.dialog.clone()
            && let Some(response) = dialogs::show(ctx, &dialog)
        {
            self.session.answer(response);
        }
    }
}
