use chrono::{DateTime, Local};
use eframe::egui;
use egui::{Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::controller::{Event, RequestKind, ViewState};
use crate::models::{Exercise, TrainingMaxesResponse};
use crate::render::{render_workout, set_line, status_marker, SetStatus, WorkoutView};
use crate::weight::format_weight;

pub fn configure_style(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::new(18.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::new(18.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(28.0, egui::FontFamily::Proportional),
    );
    ctx.set_style(style);
}

fn submitted(ui: &Ui, response: &egui::Response) -> bool {
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

pub fn show_login(ui: &mut Ui, state: &mut ViewState) -> Option<Event> {
    ui.add_space(40.0);
    ui.label(RichText::new("Log in").heading().strong());
    ui.add_space(10.0);

    let response = ui.add(
        egui::TextEdit::singleline(&mut state.login.password)
            .password(true)
            .hint_text("Password"),
    );
    let enter = submitted(ui, &response);

    let busy = state.is_pending(RequestKind::Login) || state.is_pending(RequestKind::User);
    let clicked = ui.add_enabled(!busy, egui::Button::new("Log in")).clicked();

    (clicked || (enter && !busy)).then_some(Event::LoginSubmitted)
}

pub fn show_training_maxes(ui: &mut Ui, state: &mut ViewState) -> Option<Event> {
    ui.label(RichText::new("Training maxes").heading().strong());
    ui.label("Enter each max in pounds, e.g. 177.5");
    ui.add_space(10.0);

    let mut enter = false;
    egui::Grid::new("training_max_form")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            for exercise in Exercise::ALL {
                ui.label(exercise.label());
                let field = state.training_max_form.field_mut(exercise);
                let response = ui.add(egui::TextEdit::singleline(field).desired_width(120.0));
                enter |= submitted(ui, &response);
                ui.end_row();
            }

            ui.label("Smallest plate step");
            let response = ui.add(
                egui::TextEdit::singleline(&mut state.training_max_form.smallest_denom)
                    .desired_width(120.0)
                    .hint_text("optional"),
            );
            enter |= submitted(ui, &response);
            ui.end_row();
        });

    ui.add_space(10.0);
    let busy = state.is_pending(RequestKind::SetTrainingMaxes);
    let clicked = ui.add_enabled(!busy, egui::Button::new("Save")).clicked();

    if let Some(current) = &state.training_maxes {
        ui.add_space(20.0);
        ui.label(RichText::new("Current").strong());
        show_training_max_table(ui, current);
    }

    (clicked || (enter && !busy)).then_some(Event::TrainingMaxesSubmitted)
}

fn show_training_max_table(ui: &mut Ui, maxes: &TrainingMaxesResponse) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(160.0))
        .column(Column::remainder())
        .header(24.0, |mut header| {
            header.col(|ui| {
                ui.strong("Exercise");
            });
            header.col(|ui| {
                ui.strong("Max");
            });
        })
        .body(|mut body| {
            for exercise in Exercise::ALL {
                let Some(max) = maxes.max_for(exercise) else {
                    continue;
                };
                body.row(22.0, |mut row| {
                    row.col(|ui| {
                        ui.label(exercise.label());
                    });
                    row.col(|ui| {
                        ui.label(format_weight(max));
                    });
                });
            }
            if let Some(denom) = &maxes.smallest_denom {
                body.row(22.0, |mut row| {
                    row.col(|ui| {
                        ui.label("Smallest plate step");
                    });
                    row.col(|ui| {
                        ui.label(format_weight(denom));
                    });
                });
            }
        });
}

pub fn show_lifts(ui: &mut Ui, state: &mut ViewState) -> Option<Event> {
    let mut event = None;
    ui.horizontal(|ui| {
        if ui.button("Refresh").clicked() {
            event = Some(Event::Refresh);
        }
        if ui.button("Edit training maxes").clicked() {
            event = Some(Event::EditTrainingMaxes);
        }
    });
    ui.separator();

    let Some(workout) = &state.workout else {
        if state.is_pending(RequestKind::NextLift) {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading workout...");
            });
        } else {
            ui.label("No workout loaded.");
        }
        return event;
    };

    let view = render_workout(workout);
    let next = workout.next_set().map(|(movement, set)| {
        format!(
            "{} ({}): {} at {}",
            movement.exercise,
            movement.set_type,
            set_line(set),
            format_weight(&set.weight_target)
        )
    });

    ScrollArea::vertical()
        .max_height((ui.available_height() - 180.0).max(120.0))
        .show(ui, |ui| show_workout(ui, &view));

    ui.separator();
    match next {
        Some(next) => {
            ui.label(RichText::new(format!("Next: {next}")).strong());
            ui.horizontal(|ui| {
                ui.label("Reps");
                ui.add(egui::TextEdit::singleline(&mut state.lift_entry.reps).desired_width(50.0));
                ui.label("Note");
                ui.add(egui::TextEdit::singleline(&mut state.lift_entry.note).desired_width(180.0));
            });
            let busy = state.is_pending(RequestKind::RecordLift);
            if ui.add_enabled(!busy, egui::Button::new("Record set")).clicked() {
                event = Some(Event::LiftSubmitted);
            }
        }
        None => {
            ui.label(RichText::new("Workout complete.").strong().color(Color32::GREEN));
        }
    }

    if view.optional_week {
        ui.add_space(10.0);
        ui.label("This week is optional.");
        let busy = state.is_pending(RequestKind::SkipOptionalWeek);
        ui.horizontal(|ui| {
            ui.label("Note");
            ui.add(egui::TextEdit::singleline(&mut state.skip_note).desired_width(180.0));
            if ui.add_enabled(!busy, egui::Button::new("Skip week")).clicked() {
                event = Some(Event::SkipOptionalWeekSubmitted);
            }
        });
    }

    event
}

fn show_workout(ui: &mut Ui, view: &WorkoutView) {
    ui.label(RichText::new(&view.header).heading().strong());
    for line in &view.comparables {
        ui.label(RichText::new(line).weak());
    }
    ui.add_space(10.0);

    for movement in &view.movements {
        ui.label(RichText::new(&movement.title).size(22.0).strong());
        for set in &movement.sets {
            let color = match set.status {
                SetStatus::Done => Color32::GRAY,
                SetStatus::Next => Color32::GREEN,
                SetStatus::Upcoming => ui.visuals().text_color(),
            };
            ui.horizontal(|ui| {
                ui.label(RichText::new(status_marker(set.status)).color(color));
                ui.label(RichText::new(&set.line).color(color).strong());
                ui.label(RichText::new(&set.weight).color(color));
            });
            for line in &set.comparables {
                ui.label(RichText::new(format!("    {line}")).small().weak());
            }
        }
        ui.add_space(8.0);
    }
}

pub fn show_status(ui: &mut Ui, state: &ViewState, last_sync: Option<DateTime<Local>>) {
    ui.horizontal(|ui| {
        if state.is_busy() {
            ui.spinner();
        }
        if let Some(message) = &state.message {
            ui.colored_label(Color32::RED, message.as_str());
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(at) = last_sync {
                ui.label(RichText::new(format!("Synced {}", at.format("%H:%M:%S"))).weak());
            }
        });
    });
}
