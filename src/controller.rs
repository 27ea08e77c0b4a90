//! Page state machine.
//!
//! `ViewState` owns the one active page and the form contents. Events come
//! from the UI and from finished API calls; `handle` updates the state and
//! returns the effects (API calls, cancellations) the dispatcher should run.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::loader::{PageData, Route};
use crate::models::{
    Exercise, NextLiftResponse, RecordLiftRequest, SetTrainingMaxesRequest,
    SkipOptionalWeekRequest, TrainingMaxesResponse, User, UserResponse,
};
use crate::weight::{parse_training_max, pounds_string};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    TrainingMaxes,
    Lifts,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Login, Page::TrainingMaxes, Page::Lifts];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Login => "Log in",
            Page::TrainingMaxes => "Training maxes",
            Page::Lifts => "Lifts",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequestKind {
    User,
    Login,
    SetTrainingMaxes,
    NextLift,
    TrainingMaxes,
    RecordLift,
    SkipOptionalWeek,
}

impl RequestKind {
    /// Form submissions; a second one while the first is pending is dropped.
    pub fn is_submission(&self) -> bool {
        matches!(
            self,
            RequestKind::Login
                | RequestKind::SetTrainingMaxes
                | RequestKind::RecordLift
                | RequestKind::SkipOptionalWeek
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchUser,
    Login { password: String },
    SetTrainingMaxes(SetTrainingMaxesRequest),
    Load(Route),
    RecordLift(RecordLiftRequest),
    SkipOptionalWeek(SkipOptionalWeekRequest),
    Cancel(RequestKind),
}

impl Effect {
    pub fn kind(&self) -> RequestKind {
        match self {
            Effect::FetchUser => RequestKind::User,
            Effect::Login { .. } => RequestKind::Login,
            Effect::SetTrainingMaxes(_) => RequestKind::SetTrainingMaxes,
            Effect::Load(Route::Home | Route::Lifts) => RequestKind::NextLift,
            Effect::Load(Route::TrainingMaxes) => RequestKind::TrainingMaxes,
            Effect::RecordLift(_) => RequestKind::RecordLift,
            Effect::SkipOptionalWeek(_) => RequestKind::SkipOptionalWeek,
            Effect::Cancel(kind) => *kind,
        }
    }
}

#[derive(Debug)]
pub enum Event {
    Started,
    UserLoaded(Result<UserResponse, ApiError>),
    LoginSubmitted,
    LoginCompleted(Result<(), ApiError>),
    TrainingMaxesSubmitted,
    TrainingMaxesSaved(Result<Option<TrainingMaxesResponse>, ApiError>),
    PageLoaded(Route, Result<PageData, ApiError>),
    EditTrainingMaxes,
    Refresh,
    LiftSubmitted,
    LiftRecorded(Result<(), ApiError>),
    SkipOptionalWeekSubmitted,
    OptionalWeekSkipped(Result<(), ApiError>),
    Logout,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub password: String,
}

/// Raw text of the training-max inputs, in pounds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingMaxForm {
    pub overhead_press: String,
    pub squat: String,
    pub bench_press: String,
    pub deadlift: String,
    pub smallest_denom: String,
}

impl TrainingMaxForm {
    pub fn field_mut(&mut self, exercise: Exercise) -> &mut String {
        match exercise {
            Exercise::OverheadPress => &mut self.overhead_press,
            Exercise::Squat => &mut self.squat,
            Exercise::BenchPress => &mut self.bench_press,
            Exercise::Deadlift => &mut self.deadlift,
        }
    }

    fn fill_from(&mut self, resp: &TrainingMaxesResponse) {
        for tm in &resp.training_maxes {
            *self.field_mut(tm.exercise) = pounds_string(&tm.max);
        }
        if let Some(denom) = &resp.smallest_denom {
            self.smallest_denom = pounds_string(denom);
        }
    }

    /// Checks every field before anything is sent. The first bad field wins.
    pub fn to_request(&self) -> Result<SetTrainingMaxesRequest, String> {
        let check = |exercise: Exercise, value: &str| -> Result<String, String> {
            parse_training_max(value).map_err(|e| format!("{exercise}: {e}"))?;
            Ok(value.trim().to_string())
        };

        let overhead_press = check(Exercise::OverheadPress, &self.overhead_press)?;
        let squat = check(Exercise::Squat, &self.squat)?;
        let bench_press = check(Exercise::BenchPress, &self.bench_press)?;
        let deadlift = check(Exercise::Deadlift, &self.deadlift)?;

        let smallest_denom = match self.smallest_denom.trim() {
            "" => None,
            denom => {
                parse_training_max(denom).map_err(|e| format!("Smallest denomination: {e}"))?;
                Some(denom.to_string())
            }
        };

        Ok(SetTrainingMaxesRequest {
            overhead_press,
            squat,
            bench_press,
            deadlift,
            smallest_denom,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiftEntryForm {
    pub reps: String,
    pub note: String,
}

#[derive(Debug)]
pub struct ViewState {
    page: Page,
    pending: BTreeSet<RequestKind>,
    pub user: Option<User>,
    pub workout: Option<NextLiftResponse>,
    pub training_maxes: Option<TrainingMaxesResponse>,
    pub login: LoginForm,
    pub training_max_form: TrainingMaxForm,
    pub lift_entry: LiftEntryForm,
    pub skip_note: String,
    /// Last failure worth showing to the lifter.
    pub message: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            page: Page::Login,
            pending: BTreeSet::new(),
            user: None,
            workout: None,
            training_maxes: None,
            login: LoginForm::default(),
            training_max_form: TrainingMaxForm::default(),
            lift_entry: LiftEntryForm::default(),
            skip_note: String::new(),
            message: None,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn is_active(&self, page: Page) -> bool {
        self.page == page
    }

    pub fn is_pending(&self, kind: RequestKind) -> bool {
        self.pending.contains(&kind)
    }

    pub fn is_busy(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Switch pages. Entering `lifts` always loads the next workout; leaving a
    /// page cancels the fetch only that page needed.
    pub fn set_active_page(&mut self, page: Page) -> Vec<Effect> {
        let mut effects = Vec::new();
        let previous = self.page;
        if previous != page {
            info!(from = %previous, to = %page, "switching page");
            let abandoned = match previous {
                Page::Lifts => Some(RequestKind::NextLift),
                Page::TrainingMaxes => Some(RequestKind::TrainingMaxes),
                Page::Login => None,
            };
            if let Some(kind) = abandoned.filter(|k| self.pending.contains(k)) {
                effects.push(Effect::Cancel(kind));
            }
        }
        self.page = page;

        if page == Page::Lifts {
            effects.push(Effect::Load(Route::Lifts));
        }
        self.track(effects)
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Started => self.track(vec![Effect::FetchUser]),

            Event::UserLoaded(result) => {
                if !self.finish(RequestKind::User) {
                    return Vec::new();
                }
                match result {
                    Ok(resp) => {
                        let has_maxes = resp.has_training_maxes();
                        self.user = Some(resp.user);
                        self.message = None;
                        if has_maxes {
                            self.set_active_page(Page::Lifts)
                        } else {
                            self.set_active_page(Page::TrainingMaxes)
                        }
                    }
                    Err(e) if e.is_status() => {
                        info!(error = %e, "not logged in");
                        self.user = None;
                        self.set_active_page(Page::Login)
                    }
                    Err(e) => self.fail("Couldn't load your account", e),
                }
            }

            Event::LoginSubmitted => {
                if self.submission_in_flight(RequestKind::Login) {
                    return Vec::new();
                }
                let password = self.login.password.clone();
                self.track(vec![Effect::Login { password }])
            }

            Event::LoginCompleted(result) => {
                if !self.finish(RequestKind::Login) {
                    return Vec::new();
                }
                match result {
                    Ok(()) => {
                        self.login.password.clear();
                        self.message = None;
                        self.track(vec![Effect::FetchUser])
                    }
                    Err(e) => self.fail("Login failed", e),
                }
            }

            Event::TrainingMaxesSubmitted => {
                if self.submission_in_flight(RequestKind::SetTrainingMaxes) {
                    return Vec::new();
                }
                match self.training_max_form.to_request() {
                    Ok(req) => self.track(vec![Effect::SetTrainingMaxes(req)]),
                    Err(msg) => {
                        self.message = Some(msg);
                        Vec::new()
                    }
                }
            }

            Event::TrainingMaxesSaved(result) => {
                if !self.finish(RequestKind::SetTrainingMaxes) {
                    return Vec::new();
                }
                match result {
                    Ok(saved) => {
                        if saved.is_some() {
                            self.training_maxes = saved;
                        }
                        self.message = None;
                        self.set_active_page(Page::Lifts)
                    }
                    Err(e) => self.fail("Couldn't save training maxes", e),
                }
            }

            Event::PageLoaded(route, result) => {
                if !self.finish(Effect::Load(route).kind()) {
                    return Vec::new();
                }
                match result {
                    Ok(PageData::NextLift(workout)) => {
                        self.workout = Some(workout);
                        Vec::new()
                    }
                    Ok(PageData::TrainingMaxes(maxes)) => {
                        self.training_max_form.fill_from(&maxes);
                        self.training_maxes = Some(maxes);
                        Vec::new()
                    }
                    Err(e) => self.fail("Couldn't load page data", e),
                }
            }

            Event::EditTrainingMaxes => {
                let mut effects = self.set_active_page(Page::TrainingMaxes);
                effects.extend(self.track(vec![Effect::Load(Route::TrainingMaxes)]));
                effects
            }

            Event::Refresh => match self.page {
                Page::Lifts => self.track(vec![Effect::Load(Route::Lifts)]),
                Page::TrainingMaxes => self.track(vec![Effect::Load(Route::TrainingMaxes)]),
                Page::Login => self.track(vec![Effect::FetchUser]),
            },

            Event::LiftSubmitted => {
                if self.submission_in_flight(RequestKind::RecordLift) {
                    return Vec::new();
                }
                match self.record_lift_request() {
                    Ok(req) => self.track(vec![Effect::RecordLift(req)]),
                    Err(msg) => {
                        self.message = Some(msg);
                        Vec::new()
                    }
                }
            }

            Event::LiftRecorded(result) => {
                if !self.finish(RequestKind::RecordLift) {
                    return Vec::new();
                }
                match result {
                    Ok(()) => {
                        self.lift_entry = LiftEntryForm::default();
                        self.message = None;
                        self.track(vec![Effect::Load(Route::Lifts)])
                    }
                    Err(e) => self.fail("Couldn't record lift", e),
                }
            }

            Event::SkipOptionalWeekSubmitted => {
                if self.submission_in_flight(RequestKind::SkipOptionalWeek) {
                    return Vec::new();
                }
                let Some(workout) = self.workout.as_ref().filter(|w| w.optional_week) else {
                    self.message = Some("This week isn't optional".to_string());
                    return Vec::new();
                };
                let req = SkipOptionalWeekRequest {
                    week: workout.week_number,
                    iteration: workout.iteration_number,
                    note: self.skip_note.trim().to_string(),
                };
                self.track(vec![Effect::SkipOptionalWeek(req)])
            }

            Event::OptionalWeekSkipped(result) => {
                if !self.finish(RequestKind::SkipOptionalWeek) {
                    return Vec::new();
                }
                match result {
                    Ok(()) => {
                        self.skip_note.clear();
                        self.message = None;
                        self.track(vec![Effect::Load(Route::Lifts)])
                    }
                    Err(e) => self.fail("Couldn't skip the optional week", e),
                }
            }

            Event::Logout => {
                let mut effects: Vec<Effect> =
                    self.pending.iter().copied().map(Effect::Cancel).collect();
                self.pending.clear();
                self.user = None;
                self.workout = None;
                self.training_maxes = None;
                self.lift_entry = LiftEntryForm::default();
                self.skip_note.clear();
                self.message = None;
                effects.extend(self.set_active_page(Page::Login));
                effects
            }
        }
    }

    fn record_lift_request(&self) -> Result<RecordLiftRequest, String> {
        let workout = self
            .workout
            .as_ref()
            .ok_or_else(|| "No workout loaded".to_string())?;
        let (movement, next) = workout
            .next_set()
            .ok_or_else(|| "Workout complete, nothing left to record".to_string())?;
        let set = u32::try_from(workout.next_set_index)
            .map_err(|_| format!("Set index {} is out of range", workout.next_set_index))?;
        let reps: u32 = self
            .lift_entry
            .reps
            .trim()
            .parse()
            .map_err(|_| format!("Reps must be a whole number, was {:?}", self.lift_entry.reps))?;

        Ok(RecordLiftRequest {
            exercise: movement.exercise,
            set_type: movement.set_type,
            weight: pounds_string(&next.weight_target),
            set,
            reps,
            note: self.lift_entry.note.trim().to_string(),
            day: workout.day_number,
            week: workout.week_number,
            iteration: workout.iteration_number,
            to_failure: next.to_failure,
        })
    }

    fn submission_in_flight(&self, kind: RequestKind) -> bool {
        kind.is_submission() && self.is_pending(kind)
    }

    /// Clears the pending mark for a finished request. A completion nobody is
    /// waiting for (cancelled, or outlived a logout) is dropped.
    fn finish(&mut self, kind: RequestKind) -> bool {
        let expected = self.pending.remove(&kind);
        if !expected {
            debug!(?kind, "ignoring stale completion");
        }
        expected
    }

    /// Marks outgoing requests as pending; cancellations clear the mark since
    /// a cancelled request never reports back.
    fn track(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        for effect in &effects {
            match effect {
                Effect::Cancel(kind) => {
                    self.pending.remove(kind);
                }
                other => {
                    self.pending.insert(other.kind());
                }
            }
        }
        effects
    }

    fn fail(&mut self, context: &str, err: ApiError) -> Vec<Effect> {
        warn!(page = %self.page, error = %err, "{context}");
        self.message = Some(format!("{context}: {err}"));
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Movement, Set, SetType, TrainingMax, Weight};
    use reqwest::StatusCode;

    fn user(training_maxes: Option<Vec<TrainingMax>>) -> UserResponse {
        UserResponse {
            user: User {
                id: 1,
                name: "brandon".to_string(),
            },
            training_maxes,
        }
    }

    fn squat_max() -> TrainingMax {
        TrainingMax {
            exercise: Exercise::Squat,
            max: Weight::deci_pounds(3000),
        }
    }

    fn status(code: StatusCode) -> ApiError {
        ApiError::Status {
            status: code,
            message: String::new(),
        }
    }

    fn workout(optional_week: bool) -> NextLiftResponse {
        NextLiftResponse {
            day_number: 2,
            week_number: 3,
            iteration_number: 1,
            day_name: "Bench Day".to_string(),
            week_name: "5/3/1 Week".to_string(),
            workout: vec![Movement {
                exercise: Exercise::BenchPress,
                set_type: SetType::Main,
                sets: vec![
                    Set {
                        rep_target: 5,
                        to_failure: false,
                        training_max_percentage: 75,
                        weight_target: Weight::deci_pounds(1500),
                        failure_comparables: None,
                    },
                    Set {
                        rep_target: 1,
                        to_failure: true,
                        training_max_percentage: 95,
                        weight_target: Weight::deci_pounds(1775),
                        failure_comparables: None,
                    },
                ],
            }],
            next_movement_index: 0,
            next_set_index: 1,
            optional_week,
            comparables: None,
        }
    }

    fn valid_form() -> TrainingMaxForm {
        TrainingMaxForm {
            overhead_press: "100".to_string(),
            squat: "300".to_string(),
            bench_press: "200".to_string(),
            deadlift: "400".to_string(),
            smallest_denom: String::new(),
        }
    }

    fn active_count(state: &ViewState) -> usize {
        Page::ALL.iter().filter(|p| state.is_active(**p)).count()
    }

    #[test]
    fn test_start_fetches_user() {
        let mut state = ViewState::new();
        assert_eq!(state.page(), Page::Login);
        assert_eq!(state.handle(Event::Started), vec![Effect::FetchUser]);
        assert!(state.is_pending(RequestKind::User));
    }

    #[test]
    fn test_user_without_maxes_goes_to_setup() {
        for maxes in [None, Some(Vec::new())] {
            let mut state = ViewState::new();
            state.handle(Event::Started);
            let effects = state.handle(Event::UserLoaded(Ok(user(maxes))));
            assert_eq!(state.page(), Page::TrainingMaxes);
            assert!(effects.is_empty());
            assert!(!state.is_pending(RequestKind::User));
        }
    }

    #[test]
    fn test_user_with_maxes_goes_to_lifts() {
        let mut state = ViewState::new();
        state.handle(Event::Started);
        let effects = state.handle(Event::UserLoaded(Ok(user(Some(vec![squat_max()])))));
        assert_eq!(state.page(), Page::Lifts);
        assert_eq!(effects, vec![Effect::Load(Route::Lifts)]);
        assert_eq!(state.user.as_ref().unwrap().name, "brandon");
    }

    #[test]
    fn test_user_error_status_goes_to_login() {
        for code in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN, StatusCode::INTERNAL_SERVER_ERROR] {
            let mut state = ViewState::new();
            state.set_active_page(Page::Lifts);
            state.handle(Event::Started);
            state.handle(Event::UserLoaded(Err(status(code))));
            assert_eq!(state.page(), Page::Login);
        }
    }

    #[test]
    fn test_user_transport_error_keeps_page() {
        let mut state = ViewState::new();
        state.set_active_page(Page::TrainingMaxes);
        state.handle(Event::Started);
        let effects = state.handle(Event::UserLoaded(Err(ApiError::Connection("refused".to_string()))));
        assert!(effects.is_empty());
        assert_eq!(state.page(), Page::TrainingMaxes);
        assert!(state.message.as_ref().unwrap().contains("refused"));
    }

    #[test]
    fn test_login_reruns_initialization() {
        let mut state = ViewState::new();
        state.login.password = "hunter2".to_string();
        assert_eq!(
            state.handle(Event::LoginSubmitted),
            vec![Effect::Login {
                password: "hunter2".to_string()
            }]
        );
        assert_eq!(state.page(), Page::Login);

        let effects = state.handle(Event::LoginCompleted(Ok(())));
        assert_eq!(effects, vec![Effect::FetchUser]);
        assert_eq!(state.page(), Page::Login);
        assert!(state.login.password.is_empty());
    }

    #[test]
    fn test_login_failure_stays_on_login() {
        let mut state = ViewState::new();
        state.login.password = "wrong".to_string();
        state.handle(Event::LoginSubmitted);
        let effects = state.handle(Event::LoginCompleted(Err(status(StatusCode::FORBIDDEN))));
        assert!(effects.is_empty());
        assert_eq!(state.page(), Page::Login);
        assert!(state.message.as_ref().unwrap().starts_with("Login failed"));
    }

    #[test]
    fn test_double_login_submit_is_ignored() {
        let mut state = ViewState::new();
        state.login.password = "pw".to_string();
        assert_eq!(state.handle(Event::LoginSubmitted).len(), 1);
        assert!(state.handle(Event::LoginSubmitted).is_empty());
        state.handle(Event::LoginCompleted(Err(status(StatusCode::FORBIDDEN))));
        assert_eq!(state.handle(Event::LoginSubmitted).len(), 1);
    }

    #[test]
    fn test_training_maxes_submit() {
        let mut state = ViewState::new();
        state.set_active_page(Page::TrainingMaxes);
        state.training_max_form = TrainingMaxForm {
            overhead_press: "100".to_string(),
            squat: "225.5".to_string(),
            bench_press: " 150 ".to_string(),
            deadlift: "300".to_string(),
            smallest_denom: "2.5".to_string(),
        };
        let effects = state.handle(Event::TrainingMaxesSubmitted);
        assert_eq!(
            effects,
            vec![Effect::SetTrainingMaxes(SetTrainingMaxesRequest {
                overhead_press: "100".to_string(),
                squat: "225.5".to_string(),
                bench_press: "150".to_string(),
                deadlift: "300".to_string(),
                smallest_denom: Some("2.5".to_string()),
            })]
        );

        let effects = state.handle(Event::TrainingMaxesSaved(Ok(None)));
        assert_eq!(state.page(), Page::Lifts);
        assert_eq!(effects, vec![Effect::Load(Route::Lifts)]);
    }

    #[test]
    fn test_training_maxes_invalid_input_sends_nothing() {
        let mut state = ViewState::new();
        state.set_active_page(Page::TrainingMaxes);
        state.training_max_form = TrainingMaxForm {
            overhead_press: "100".to_string(),
            squat: "225.25".to_string(),
            bench_press: "150".to_string(),
            deadlift: "300".to_string(),
            smallest_denom: String::new(),
        };
        assert!(state.handle(Event::TrainingMaxesSubmitted).is_empty());
        assert!(state.message.as_ref().unwrap().starts_with("Squat"));
        assert_eq!(state.page(), Page::TrainingMaxes);
    }

    #[test]
    fn test_training_maxes_save_failure_keeps_page() {
        let mut state = ViewState::new();
        state.set_active_page(Page::TrainingMaxes);
        state.training_max_form = valid_form();
        assert_eq!(state.handle(Event::TrainingMaxesSubmitted).len(), 1);
        let effects = state.handle(Event::TrainingMaxesSaved(Err(status(StatusCode::BAD_REQUEST))));
        assert!(effects.is_empty());
        assert_eq!(state.page(), Page::TrainingMaxes);
    }

    #[test]
    fn test_next_lift_replaces_workout() {
        let mut state = ViewState::new();
        state.set_active_page(Page::Lifts);
        assert!(state.is_pending(RequestKind::NextLift));
        state.handle(Event::PageLoaded(Route::Lifts, Ok(PageData::NextLift(workout(false)))));
        assert!(!state.is_pending(RequestKind::NextLift));

        let mut later = workout(false);
        later.next_set_index = 0;
        assert_eq!(state.handle(Event::Refresh), vec![Effect::Load(Route::Lifts)]);
        state.handle(Event::PageLoaded(Route::Lifts, Ok(PageData::NextLift(later.clone()))));
        assert_eq!(state.workout, Some(later));
    }

    #[test]
    fn test_edit_training_maxes_prefills_form() {
        let mut state = ViewState::new();
        state.set_active_page(Page::Lifts);
        let effects = state.handle(Event::EditTrainingMaxes);
        assert_eq!(
            effects,
            vec![
                Effect::Cancel(RequestKind::NextLift),
                Effect::Load(Route::TrainingMaxes)
            ]
        );
        assert_eq!(state.page(), Page::TrainingMaxes);

        let maxes = TrainingMaxesResponse {
            training_maxes: vec![squat_max()],
            smallest_denom: Some(Weight::deci_pounds(25)),
        };
        state.handle(Event::PageLoaded(Route::TrainingMaxes, Ok(PageData::TrainingMaxes(maxes))));
        assert_eq!(state.training_max_form.squat, "300");
        assert_eq!(state.training_max_form.smallest_denom, "2.5");
        assert!(state.training_max_form.deadlift.is_empty());
    }

    #[test]
    fn test_record_lift() {
        let mut state = ViewState::new();
        state.workout = Some(workout(false));
        state.lift_entry.reps = "4".to_string();
        state.lift_entry.note = " felt heavy ".to_string();

        let effects = state.handle(Event::LiftSubmitted);
        assert_eq!(
            effects,
            vec![Effect::RecordLift(RecordLiftRequest {
                exercise: Exercise::BenchPress,
                set_type: SetType::Main,
                weight: "177.5".to_string(),
                set: 1,
                reps: 4,
                note: "felt heavy".to_string(),
                day: 2,
                week: 3,
                iteration: 1,
                to_failure: true,
            })]
        );
        assert!(state.handle(Event::LiftSubmitted).is_empty());

        let effects = state.handle(Event::LiftRecorded(Ok(())));
        assert_eq!(effects, vec![Effect::Load(Route::Lifts)]);
        assert!(state.lift_entry.reps.is_empty());
    }

    #[test]
    fn test_record_lift_bad_reps() {
        let mut state = ViewState::new();
        state.workout = Some(workout(false));
        state.lift_entry.reps = "four".to_string();
        assert!(state.handle(Event::LiftSubmitted).is_empty());
        assert!(state.message.is_some());
    }

    #[test]
    fn test_skip_optional_week() {
        let mut state = ViewState::new();
        state.workout = Some(workout(false));
        assert!(state.handle(Event::SkipOptionalWeekSubmitted).is_empty());

        state.workout = Some(workout(true));
        state.skip_note = "deload".to_string();
        assert_eq!(
            state.handle(Event::SkipOptionalWeekSubmitted),
            vec![Effect::SkipOptionalWeek(SkipOptionalWeekRequest {
                week: 3,
                iteration: 1,
                note: "deload".to_string(),
            })]
        );
        let effects = state.handle(Event::OptionalWeekSkipped(Ok(())));
        assert_eq!(effects, vec![Effect::Load(Route::Lifts)]);
    }

    #[test]
    fn test_logout() {
        let mut state = ViewState::new();
        state.handle(Event::Started);
        state.handle(Event::UserLoaded(Ok(user(Some(vec![squat_max()])))));
        state.workout = Some(workout(false));
        state.handle(Event::Logout);
        assert_eq!(state.page(), Page::Login);
        assert!(state.workout.is_none());
        assert!(state.user.is_none());
    }

    #[test]
    fn test_logout_cancels_in_flight_and_drops_late_results() {
        let mut state = ViewState::new();
        state.handle(Event::Started);
        state.handle(Event::UserLoaded(Ok(user(Some(vec![squat_max()])))));
        state.handle(Event::PageLoaded(Route::Lifts, Ok(PageData::NextLift(workout(false)))));
        state.lift_entry.reps = "3".to_string();
        assert_eq!(state.handle(Event::LiftSubmitted).len(), 1);

        let effects = state.handle(Event::Logout);
        assert_eq!(effects, vec![Effect::Cancel(RequestKind::RecordLift)]);
        assert!(!state.is_busy());
        assert_eq!(state.page(), Page::Login);

        assert!(state.handle(Event::LiftRecorded(Ok(()))).is_empty());
        assert!(state.handle(Event::OptionalWeekSkipped(Ok(()))).is_empty());
        assert!(state
            .handle(Event::PageLoaded(Route::Lifts, Ok(PageData::NextLift(workout(false)))))
            .is_empty());
        assert!(state.workout.is_none());
        assert_eq!(state.page(), Page::Login);
    }

    #[test]
    fn test_user_fetch_outlived_by_logout() {
        let mut state = ViewState::new();
        state.handle(Event::Started);
        state.set_active_page(Page::Lifts);
        let effects = state.handle(Event::Logout);
        assert_eq!(
            effects,
            vec![
                Effect::Cancel(RequestKind::User),
                Effect::Cancel(RequestKind::NextLift)
            ]
        );

        let effects = state.handle(Event::UserLoaded(Ok(user(Some(vec![squat_max()])))));
        assert!(effects.is_empty());
        assert_eq!(state.page(), Page::Login);
        assert!(state.user.is_none());
    }

    #[test]
    fn test_exactly_one_active_page() {
        let mut state = ViewState::new();
        assert_eq!(active_count(&state), 1);
        let sequence = [
            Page::Lifts,
            Page::Lifts,
            Page::Login,
            Page::TrainingMaxes,
            Page::TrainingMaxes,
            Page::Lifts,
            Page::Login,
            Page::Login,
        ];
        for page in sequence {
            state.set_active_page(page);
            assert_eq!(active_count(&state), 1);
            assert!(state.is_active(page));
        }
    }

    #[test]
    fn test_effect_kinds() {
        assert_eq!(Effect::Load(Route::Home).kind(), RequestKind::NextLift);
        assert_eq!(Effect::Load(Route::TrainingMaxes).kind(), RequestKind::TrainingMaxes);
        assert!(RequestKind::RecordLift.is_submission());
        assert!(!RequestKind::NextLift.is_submission());
    }

    #[test]
    fn test_reads_are_never_blocked_by_pending() {
        let mut state = ViewState::new();
        state.set_active_page(Page::Lifts);
        assert_eq!(state.handle(Event::Refresh), vec![Effect::Load(Route::Lifts)]);
        assert!(state.is_pending(RequestKind::NextLift));
    }
}
