//! Turns a `NextLiftResponse` into display lines.
//!
//! The result is a fresh value on every call; the UI draws it from scratch
//! each frame, so showing the same workout twice never duplicates entries.

use crate::models::{ComparableLifts, Lift, NextLiftResponse, Set};
use crate::weight::format_weight;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetStatus {
    Done,
    Next,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetView {
    pub line: String,
    pub weight: String,
    pub status: SetStatus,
    pub comparables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovementView {
    pub title: String,
    pub sets: Vec<SetView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutView {
    pub header: String,
    pub movements: Vec<MovementView>,
    pub comparables: Vec<String>,
    pub optional_week: bool,
}

pub fn status_marker(status: SetStatus) -> &'static str {
    match status {
        SetStatus::Done => "✓",
        SetStatus::Next => "▶",
        SetStatus::Upcoming => "•",
    }
}

/// "5+ @ 90%" for a to-failure set, "5 @ 90%" otherwise.
pub fn set_line(set: &Set) -> String {
    let suffix = if set.to_failure { "+" } else { "" };
    format!("{}{} @ {}%", set.rep_target, suffix, set.training_max_percentage)
}

fn lift_line(label: &str, lift: &Lift) -> String {
    format!("{label}: {} @ {}", lift.reps, format_weight(&lift.weight))
}

pub fn comparable_lines(comparables: &ComparableLifts) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(pr) = &comparables.personal_record {
        lines.push(lift_line("PR", pr));
    }
    if let Some(closest) = &comparables.closest_weight {
        lines.push(lift_line("Closest", closest));
    }
    if comparables.pr_equivalent_reps > 0 {
        lines.push(format!("PR-equivalent reps: {}", comparables.pr_equivalent_reps));
    }
    lines
}

pub fn render_workout(resp: &NextLiftResponse) -> WorkoutView {
    let next = (resp.next_movement_index, resp.next_set_index);

    let movements = resp
        .workout
        .iter()
        .enumerate()
        .map(|(m_idx, movement)| MovementView {
            title: format!("{} ({})", movement.exercise, movement.set_type),
            sets: movement
                .sets
                .iter()
                .enumerate()
                .map(|(s_idx, set)| SetView {
                    line: set_line(set),
                    weight: format_weight(&set.weight_target),
                    status: match (m_idx, s_idx).cmp(&next) {
                        std::cmp::Ordering::Less => SetStatus::Done,
                        std::cmp::Ordering::Equal => SetStatus::Next,
                        std::cmp::Ordering::Greater => SetStatus::Upcoming,
                    },
                    comparables: set
                        .failure_comparables
                        .as_ref()
                        .map(comparable_lines)
                        .unwrap_or_default(),
                })
                .collect(),
        })
        .collect();

    WorkoutView {
        header: format!("{} - {}", resp.week_name, resp.day_name),
        movements,
        comparables: resp
            .comparables
            .as_ref()
            .map(comparable_lines)
            .unwrap_or_default(),
        optional_week: resp.optional_week,
    }
}
