#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use url::Url;

use lift_tracker::config::{Environment, Settings};
use lift_tracker::ApiClient;

pub const PASSWORD: &str = "hunter2";
const SESSION: &str = "auth=abc123";

#[derive(Default)]
pub struct Recorded {
    pub content_types: Vec<String>,
    pub posts: Vec<(String, Value)>,
    pub query: HashMap<String, String>,
    pub has_maxes: bool,
    pub user_calls: usize,
}

#[derive(Clone, Default)]
pub struct FakeApi {
    pub recorded: Arc<Mutex<Recorded>>,
}

impl FakeApi {
    pub fn with_maxes() -> Self {
        let api = FakeApi::default();
        api.recorded.lock().unwrap().has_maxes = true;
        api
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.recorded.lock().unwrap().posts.clone()
    }

    pub fn content_types(&self) -> Vec<String> {
        self.recorded.lock().unwrap().content_types.clone()
    }

    fn record(&self, headers: &HeaderMap) {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.recorded.lock().unwrap().content_types.push(content_type);
    }

    fn record_post(&self, path: &str, body: Value) {
        self.recorded.lock().unwrap().posts.push((path.to_string(), body));
    }
}

fn logged_in(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|c| c.contains(SESSION))
}

pub fn next_lift_json() -> Value {
    json!({
        "DayNumber": 0,
        "WeekNumber": 1,
        "IterationNumber": 0,
        "DayName": "Squat Day",
        "WeekName": "3s Week",
        "Workout": [
            {
                "Exercise": "SQUAT",
                "SetType": "WARMUP",
                "Sets": [
                    {"RepTarget": 5, "ToFailure": false, "TrainingMaxPercentage": 40,
                     "WeightTarget": {"Unit": "DECI_POUNDS", "Value": 1200}},
                    {"RepTarget": 5, "ToFailure": false, "TrainingMaxPercentage": 50,
                     "WeightTarget": {"Unit": "DECI_POUNDS", "Value": 1500}}
                ]
            },
            {
                "Exercise": "SQUAT",
                "SetType": "MAIN",
                "Sets": [
                    {"RepTarget": 3, "ToFailure": true, "TrainingMaxPercentage": 90,
                     "WeightTarget": {"Unit": "DECI_POUNDS", "Value": 2700}}
                ]
            }
        ],
        "NextMovementIndex": 0,
        "NextSetIndex": 0,
        "OptionalWeek": false
    })
}

async fn login(State(api): State<FakeApi>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    api.record(&headers);
    api.record_post("/api/login", body.clone());
    if body["password"] != PASSWORD {
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }
    let cookie = format!("{SESSION}; Path=/; HttpOnly");
    ([(header::SET_COOKIE, cookie)], "").into_response()
}

async fn user(State(api): State<FakeApi>, headers: HeaderMap) -> Response {
    api.record(&headers);
    api.recorded.lock().unwrap().user_calls += 1;
    if !logged_in(&headers) {
        return (StatusCode::UNAUTHORIZED, "not logged in").into_response();
    }
    let maxes = if api.recorded.lock().unwrap().has_maxes {
        json!([{"Exercise": "SQUAT", "Max": {"Unit": "DECI_POUNDS", "Value": 3000}}])
    } else {
        Value::Null
    };
    Json(json!({"User": {"ID": 1, "Name": "brandon"}, "TrainingMaxes": maxes})).into_response()
}

async fn next_lift(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    api.record(&headers);
    api.recorded.lock().unwrap().query = query;
    if !logged_in(&headers) {
        return (StatusCode::UNAUTHORIZED, "not logged in").into_response();
    }
    Json(next_lift_json()).into_response()
}

async fn training_maxes(State(api): State<FakeApi>, headers: HeaderMap) -> Response {
    api.record(&headers);
    Json(json!({
        "TrainingMaxes": [
            {"Exercise": "OVERHEAD_PRESS", "Max": {"Unit": "DECI_POUNDS", "Value": 1000}},
            {"Exercise": "SQUAT", "Max": {"Unit": "DECI_POUNDS", "Value": 3000}}
        ],
        "SmallestDenom": {"Unit": "DECI_POUNDS", "Value": 50}
    }))
    .into_response()
}

async fn set_training_maxes(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    api.record(&headers);
    api.record_post("/api/setTrainingMaxes", body);
    api.recorded.lock().unwrap().has_maxes = true;
    StatusCode::OK.into_response()
}

async fn record_lift(State(api): State<FakeApi>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    api.record(&headers);
    api.record_post("/api/record-lift", body);
    StatusCode::OK.into_response()
}

async fn skip_optional_week(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    api.record(&headers);
    api.record_post("/api/skip-optional-week", body);
    (StatusCode::BAD_REQUEST, "not an optional week").into_response()
}

async fn slow() -> Response {
    tokio::time::sleep(Duration::from_secs(5)).await;
    StatusCode::OK.into_response()
}

async fn broken_next_lift() -> Response {
    let mut body = next_lift_json();
    body["NextMovementIndex"] = json!(9);
    Json(body).into_response()
}

pub fn router(api: FakeApi) -> Router {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/user", get(user))
        .route("/api/nextLift", get(next_lift))
        .route("/api/trainingMaxes", get(training_maxes))
        .route("/api/setTrainingMaxes", post(set_training_maxes))
        .route("/api/record-lift", post(record_lift))
        .route("/api/skip-optional-week", post(skip_optional_week))
        .route("/api/slow", get(slow))
        .route("/broken/api/nextLift", get(broken_next_lift))
        .with_state(api)
}

/// Serve the fake API on a random local port and return its origin.
pub async fn spawn(api: FakeApi) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind random port");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(api)).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn client_for(origin: &str) -> ApiClient {
    let settings = Settings {
        environment: Environment::Production,
        server_origin: Url::parse(origin).unwrap(),
        request_timeout: Duration::from_secs(10),
        ..Settings::default()
    };
    ApiClient::new(&settings).unwrap()
}

pub fn dev_client(origin: &str, api_base: &str) -> ApiClient {
    let settings = Settings {
        environment: Environment::Development,
        server_origin: Url::parse(origin).unwrap(),
        api_base_url: api_base.to_string(),
        ..Settings::default()
    };
    ApiClient::new(&settings).unwrap()
}
