use chrono::{DateTime, Local};
use eframe::{egui, App, CreationContext, Frame};
use egui::RichText;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use crate::api::ApiClient;
use crate::controller::{Event, Page, ViewState};
use crate::dispatch::Dispatcher;
use crate::ui;

pub struct LiftTrackerApp {
    state: ViewState,
    dispatcher: Dispatcher,
    events: UnboundedReceiver<Event>,
    last_sync: Option<DateTime<Local>>,
}

impl LiftTrackerApp {
    pub fn new(cc: &CreationContext, client: ApiClient, runtime: Handle) -> Self {
        ui::configure_style(&cc.egui_ctx);

        let (tx, rx) = unbounded_channel();
        let ctx = cc.egui_ctx.clone();
        let dispatcher =
            Dispatcher::new(client, runtime, tx).with_notify(move || ctx.request_repaint());

        let mut app = LiftTrackerApp {
            state: ViewState::new(),
            dispatcher,
            events: rx,
            last_sync: None,
        };
        app.apply(Event::Started);
        app
    }

    fn apply(&mut self, event: Event) {
        let effects = self.state.handle(event);
        self.dispatcher.dispatch_all(effects);
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.last_sync = Some(Local::now());
            self.apply(event);
        }
    }
}

impl App for LiftTrackerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.drain_events();

        let mut triggered = Vec::new();

        egui::TopBottomPanel::top("nav").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(self.state.page().label()).size(22.0).strong());
                if let Some(user) = &self.state.user {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Log out").clicked() {
                            triggered.push(Event::Logout);
                        }
                        ui.label(user.name.as_str());
                    });
                }
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui::show_status(ui, &self.state, self.last_sync);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let event = match self.state.page() {
                Page::Login => ui::show_login(ui, &mut self.state),
                Page::TrainingMaxes => ui::show_training_maxes(ui, &mut self.state),
                Page::Lifts => ui::show_lifts(ui, &mut self.state),
            };
            triggered.extend(event);
        });

        for event in triggered {
            self.apply(event);
        }
    }
}

impl Drop for LiftTrackerApp {
    fn drop(&mut self) {
        self.dispatcher.cancel_all();
    }
}
