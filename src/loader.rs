//! Per-route data loading.
//!
//! Each route needs exactly one GET before its page is shown. Failures are
//! handed back untouched; deciding where to go next is the controller's job.

use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{NextLiftResponse, TrainingMaxesResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Lifts,
    TrainingMaxes,
}

impl Route {
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Route::Home),
            "/lifts" => Some(Route::Lifts),
            "/training-maxes" => Some(Route::TrainingMaxes),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Lifts => "/lifts",
            Route::TrainingMaxes => "/training-maxes",
        }
    }
}

/// The view-model a route's page renders.
#[derive(Debug, Clone, PartialEq)]
pub enum PageData {
    NextLift(NextLiftResponse),
    TrainingMaxes(TrainingMaxesResponse),
}

pub async fn load(
    client: &ApiClient,
    route: Route,
    cancel: &CancellationToken,
) -> Result<PageData, ApiError> {
    match route {
        Route::Home | Route::Lifts => client.next_lift(cancel).await.map(PageData::NextLift),
        Route::TrainingMaxes => client
            .training_maxes(cancel)
            .await
            .map(PageData::TrainingMaxes),
    }
}
