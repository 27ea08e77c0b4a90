//! Runs controller effects as tasks on the tokio runtime.
//!
//! Each request gets its own cancellation token. A new request of the same
//! kind supersedes the one in flight, and `Effect::Cancel` stops it outright.
//! Cancelled requests never report back.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::ApiClient;
use crate::controller::{Effect, Event, RequestKind};
use crate::loader;

type Notify = Arc<dyn Fn() + Send + Sync>;

pub struct Dispatcher {
    client: ApiClient,
    runtime: Handle,
    events: UnboundedSender<Event>,
    in_flight: HashMap<RequestKind, CancellationToken>,
    notify: Notify,
}

impl Dispatcher {
    pub fn new(client: ApiClient, runtime: Handle, events: UnboundedSender<Event>) -> Self {
        Self {
            client,
            runtime,
            events,
            in_flight: HashMap::new(),
            notify: Arc::new(|| {}),
        }
    }

    /// Called after every completion event is queued, e.g. to wake the UI.
    pub fn with_notify(mut self, notify: impl Fn() + Send + Sync + 'static) -> Self {
        self.notify = Arc::new(notify);
        self
    }

    pub fn dispatch(&mut self, effect: Effect) {
        let kind = effect.kind();

        if let Effect::Cancel(_) = effect {
            if let Some(token) = self.in_flight.remove(&kind) {
                debug!(?kind, "cancelling request");
                token.cancel();
            }
            return;
        }

        let token = CancellationToken::new();
        if let Some(previous) = self.in_flight.insert(kind, token.clone()) {
            if !previous.is_cancelled() {
                debug!(?kind, "superseding in-flight request");
                previous.cancel();
            }
        }

        let client = self.client.clone();
        let events = self.events.clone();
        let notify = self.notify.clone();
        self.runtime.spawn(async move {
            let Some(event) = run(&client, effect, &token).await else {
                return;
            };
            if token.is_cancelled() {
                return;
            }
            // The token stays in the map; cancelling a finished request is a no-op.
            token.cancel();
            if events.send(event).is_ok() {
                notify();
            }
        });
    }

    pub fn dispatch_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.dispatch(effect);
        }
    }

    /// Stop everything in flight, e.g. on shutdown.
    pub fn cancel_all(&mut self) {
        for (_, token) in self.in_flight.drain() {
            token.cancel();
        }
    }
}

async fn run(client: &ApiClient, effect: Effect, cancel: &CancellationToken) -> Option<Event> {
    let event = match effect {
        Effect::FetchUser => Event::UserLoaded(client.user(cancel).await),
        Effect::Login { password } => Event::LoginCompleted(client.login(&password, cancel).await),
        Effect::SetTrainingMaxes(req) => {
            Event::TrainingMaxesSaved(client.set_training_maxes(&req, cancel).await)
        }
        Effect::Load(route) => Event::PageLoaded(route, loader::load(client, route, cancel).await),
        Effect::RecordLift(req) => Event::LiftRecorded(client.record_lift(&req, cancel).await),
        Effect::SkipOptionalWeek(req) => {
            Event::OptionalWeekSkipped(client.skip_optional_week(&req, cancel).await)
        }
        Effect::Cancel(_) => return None,
    };
    Some(event)
}
