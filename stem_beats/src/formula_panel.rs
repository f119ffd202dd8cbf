//! Formula sidebar: entry field, discovered formulas, sliders and notices

use egui::{Color32, Context, RichText};
use stem_beats::{FormulaDefinition, Notice, Session};

const ACCENT: Color32 = Color32::from_rgb(0x9b, 0x59, 0xb6);
const MUTED: Color32 = Color32::from_rgb(0xb8, 0xb8, 0xb8);

/// Widget state the session does not own
#[derive(Default)]
pub struct FormulaPanel {
    input: String,
    notice: Option<Notice>,
}

impl FormulaPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ctx: &Context, session: &mut Session) {
        egui::SidePanel::left("formula_panel")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                ui.heading(RichText::new("StemBeats").color(ACCENT));
                ui.label(RichText::new("Discover physics formulas").small().italics());
                ui.separator();

                self.entry(ui, session);
                ui.add_space(8.0);
                controls(ui, session);
                ui.separator();

                ui.label(RichText::new("Discovered Formulas").strong());
                egui::ScrollArea::vertical().show(ui, |ui| {
                    // 'static definitions, so the session is free for the buttons
                    let discovered: Vec<&'static FormulaDefinition> = session.discovered().collect();
                    if discovered.is_empty() {
                        ui.label(RichText::new("Nothing yet").color(MUTED));
                    }
                    for definition in discovered {
                        formula_item(ui, session, definition);
                        ui.add_space(4.0);
                    }
                });
            });

        if let Some(notice) = session.take_notice() {
            self.notice = Some(notice);
        }
        self.notice_window(ctx);
    }

    fn entry(&mut self, ui: &mut egui::Ui, session: &mut Session) {
        ui.label("Enter a formula:");
        let mut submit = false;
        ui.horizontal(|ui| {
            let field = ui.add(
                egui::TextEdit::singleline(&mut self.input)
                    .hint_text("e.g. F = ma")
                    .desired_width(220.0),
            );
            if field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = true;
                field.request_focus();
            }
            if ui.button("Submit").clicked() {
                submit = true;
            }
        });
        if submit {
            session.submit(&self.input);
            self.input.clear();
        }
        if ui.button("Help").clicked() {
            session.show_help();
        }
    }

    fn notice_window(&mut self, ctx: &Context) {
        let Some(notice) = &self.notice else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new(notice.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(notice.body);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.notice = None;
        }
    }
}

fn controls(ui: &mut egui::Ui, session: &mut Session) {
    egui::Grid::new("sliders")
        .num_columns(3)
        .spacing([10.0, 4.0])
        .show(ui, |ui| {
            let mut volume = session.volume();
            ui.label("Volume");
            if ui
                .add(egui::Slider::new(&mut volume, 0.0..=100.0).show_value(false))
                .changed()
            {
                session.set_volume(volume);
            }
            ui.label(format!("{volume:.0}%"));
            ui.end_row();

            let mut tempo = session.tempo();
            ui.label("Tempo");
            if ui
                .add(egui::Slider::new(&mut tempo, 0.0..=100.0).show_value(false))
                .changed()
            {
                session.set_tempo(tempo);
            }
            ui.label(format!("{:.0} BPM", session.tempo_bpm()));
            ui.end_row();
        });
}

fn formula_item(ui: &mut egui::Ui, session: &mut Session, definition: &'static FormulaDefinition) {
    let key = definition.key();
    ui.group(|ui| {
        ui.label(
            RichText::new(format!("{}: {}", definition.name, definition.canonical))
                .strong()
                .color(Color32::WHITE),
        );
        ui.label(RichText::new(definition.description).small().color(MUTED));
        ui.horizontal(|ui| {
            if ui.button("Visualize").clicked() {
                session.visualize(key);
            }
            if definition.sound.is_some() {
                let label = if session.is_sound_playing(key) {
                    "Stop Sound"
                } else {
                    "Play Sound"
                };
                if ui.button(label).clicked() {
                    session.toggle_sound_loop(key);
                }
            }
        });
    });
}
