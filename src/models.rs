use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    #[serde(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "Value")]
    pub value: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Exercise {
    OverheadPress,
    Squat,
    BenchPress,
    Deadlift,
}

impl Exercise {
    pub const ALL: [Exercise; 4] = [
        Exercise::OverheadPress,
        Exercise::Squat,
        Exercise::BenchPress,
        Exercise::Deadlift,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Exercise::OverheadPress => "Overhead Press",
            Exercise::Squat => "Squat",
            Exercise::BenchPress => "Bench Press",
            Exercise::Deadlift => "Deadlift",
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SetType {
    Warmup,
    Main,
    Assistance,
}

impl SetType {
    pub fn label(&self) -> &'static str {
        match self {
            SetType::Warmup => "Warmup",
            SetType::Main => "Main",
            SetType::Assistance => "Assistance",
        }
    }
}

impl fmt::Display for SetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Set {
    #[serde(rename = "RepTarget")]
    pub rep_target: u32,
    #[serde(rename = "ToFailure")]
    pub to_failure: bool,
    #[serde(rename = "TrainingMaxPercentage")]
    pub training_max_percentage: u32,
    #[serde(rename = "WeightTarget")]
    pub weight_target: Weight,
    #[serde(rename = "FailureComparables", default, skip_serializing_if = "Option::is_none")]
    pub failure_comparables: Option<ComparableLifts>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    #[serde(rename = "Exercise")]
    pub exercise: Exercise,
    #[serde(rename = "SetType")]
    pub set_type: SetType,
    #[serde(rename = "Sets")]
    pub sets: Vec<Set>,
}

/// A performed set as the server stores it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lift {
    #[serde(rename = "Exercise")]
    pub exercise: Exercise,
    #[serde(rename = "SetType")]
    pub set_type: SetType,
    #[serde(rename = "Weight")]
    pub weight: Weight,
    #[serde(rename = "SetNumber")]
    pub set_number: u32,
    #[serde(rename = "Reps")]
    pub reps: u32,
    #[serde(rename = "Note", default)]
    pub note: String,
    #[serde(rename = "DayNumber", default)]
    pub day_number: u32,
    #[serde(rename = "WeekNumber", default)]
    pub week_number: u32,
    #[serde(rename = "IterationNumber", default)]
    pub iteration_number: u32,
    #[serde(rename = "ToFailure", default)]
    pub to_failure: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparableLifts {
    #[serde(rename = "ClosestWeight", default, skip_serializing_if = "Option::is_none")]
    pub closest_weight: Option<Lift>,
    #[serde(rename = "PersonalRecord", default, skip_serializing_if = "Option::is_none")]
    pub personal_record: Option<Lift>,
    #[serde(rename = "PREquivalentReps", default)]
    pub pr_equivalent_reps: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NextLiftResponse {
    #[serde(rename = "DayNumber")]
    pub day_number: u32,
    #[serde(rename = "WeekNumber")]
    pub week_number: u32,
    #[serde(rename = "IterationNumber")]
    pub iteration_number: u32,
    #[serde(rename = "DayName")]
    pub day_name: String,
    #[serde(rename = "WeekName")]
    pub week_name: String,
    #[serde(rename = "Workout")]
    pub workout: Vec<Movement>,
    #[serde(rename = "NextMovementIndex")]
    pub next_movement_index: usize,
    #[serde(rename = "NextSetIndex")]
    pub next_set_index: usize,
    #[serde(rename = "OptionalWeek", default)]
    pub optional_week: bool,
    #[serde(rename = "Comparables", default, skip_serializing_if = "Option::is_none")]
    pub comparables: Option<ComparableLifts>,
}

impl NextLiftResponse {
    /// The movement and set the lifter should perform next, if the workout
    /// isn't finished.
    pub fn next_set(&self) -> Option<(&Movement, &Set)> {
        let movement = self.workout.get(self.next_movement_index)?;
        let set = movement.sets.get(self.next_set_index)?;
        Some((movement, set))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingMax {
    #[serde(rename = "Exercise")]
    pub exercise: Exercise,
    #[serde(rename = "Max")]
    pub max: Weight,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingMaxesResponse {
    #[serde(rename = "TrainingMaxes", default)]
    pub training_maxes: Vec<TrainingMax>,
    #[serde(rename = "SmallestDenom", default, skip_serializing_if = "Option::is_none")]
    pub smallest_denom: Option<Weight>,
}

impl TrainingMaxesResponse {
    pub fn max_for(&self, exercise: Exercise) -> Option<&Weight> {
        self.training_maxes
            .iter()
            .find(|tm| tm.exercise == exercise)
            .map(|tm| &tm.max)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "User")]
    pub user: User,
    #[serde(rename = "TrainingMaxes", default)]
    pub training_maxes: Option<Vec<TrainingMax>>,
}

impl UserResponse {
    /// A null list and an empty list both mean the user hasn't set up yet.
    pub fn has_training_maxes(&self) -> bool {
        self.training_maxes
            .as_ref()
            .is_some_and(|tms| !tms.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Weights are decimal pound strings, e.g. "177.5".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SetTrainingMaxesRequest {
    pub overhead_press: String,
    pub squat: String,
    pub bench_press: String,
    pub deadlift: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smallest_denom: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordLiftRequest {
    pub exercise: Exercise,
    pub set_type: SetType,
    pub weight: String,
    pub set: u32,
    pub reps: u32,
    pub note: String,
    pub day: u32,
    pub week: u32,
    pub iteration: u32,
    pub to_failure: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SkipOptionalWeekRequest {
    pub week: u32,
    pub iteration: u32,
    pub note: String,
}

/// Shape rules serde can't express. Run on every decoded response.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for Weight {
    fn validate(&self) -> Result<(), String> {
        if !self.value.is_finite() || self.value < 0.0 {
            return Err(format!("weight value must be a non-negative number, was {}", self.value));
        }
        Ok(())
    }
}

impl Validate for Lift {
    fn validate(&self) -> Result<(), String> {
        self.weight.validate()
    }
}

impl Validate for ComparableLifts {
    fn validate(&self) -> Result<(), String> {
        if let Some(lift) = &self.closest_weight {
            lift.validate()?;
        }
        if let Some(lift) = &self.personal_record {
            lift.validate()?;
        }
        Ok(())
    }
}

impl Validate for Set {
    fn validate(&self) -> Result<(), String> {
        if self.rep_target == 0 {
            return Err("rep target must be positive".to_string());
        }
        if self.training_max_percentage > 100 {
            return Err(format!(
                "training max percentage must be within 0..=100, was {}",
                self.training_max_percentage
            ));
        }
        self.weight_target.validate()?;
        if let Some(comparables) = &self.failure_comparables {
            comparables.validate()?;
        }
        Ok(())
    }
}

impl Validate for NextLiftResponse {
    fn validate(&self) -> Result<(), String> {
        for movement in &self.workout {
            for set in &movement.sets {
                set.validate()
                    .map_err(|e| format!("{} {}: {e}", movement.exercise, movement.set_type))?;
            }
        }

        if self.next_movement_index > self.workout.len() {
            return Err(format!(
                "next movement index {} is past the {} movements",
                self.next_movement_index,
                self.workout.len()
            ));
        }
        if let Some(movement) = self.workout.get(self.next_movement_index) {
            if self.next_set_index > movement.sets.len() {
                return Err(format!(
                    "next set index {} is past the {} sets of {}",
                    self.next_set_index,
                    movement.sets.len(),
                    movement.exercise
                ));
            }
        }

        if let Some(comparables) = &self.comparables {
            comparables.validate()?;
        }
        Ok(())
    }
}

impl Validate for TrainingMaxesResponse {
    fn validate(&self) -> Result<(), String> {
        for tm in &self.training_maxes {
            tm.max.validate().map_err(|e| format!("{}: {e}", tm.exercise))?;
        }
        if let Some(denom) = &self.smallest_denom {
            denom.validate()?;
        }
        Ok(())
    }
}

impl Validate for UserResponse {
    fn validate(&self) -> Result<(), String> {
        for tm in self.training_maxes.iter().flatten() {
            tm.max.validate().map_err(|e| format!("{}: {e}", tm.exercise))?;
        }
        Ok(())
    }
}
