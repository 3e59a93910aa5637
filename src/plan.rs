use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::{ActionType, WorkoutAction};

pub const DEFAULT_ACTIVE_SECS: u64 = 30;
pub const DEFAULT_REST_SECS: u64 = 10;

pub const DEFAULT_EXERCISES: [&str; 8] = [
    "Jumping Jacks",
    "Push Ups",
    "Wall Sit",
    "Lunges",
    "Chair Dips",
    "Plank",
    "Burpees",
    "Push Up with Rotation",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("a plan needs at least a start and a finish action, got {len} action(s)")]
    TooShort { len: usize },
    #[error("the first action must be a START marker with a zero timer")]
    MissingStart,
    #[error("the last action must be a FINISH marker with a zero timer")]
    MissingFinish,
    #[error("action {index} is a {kind} marker inside the plan body")]
    MarkerInBody { index: usize, kind: ActionType },
    #[error("actions {index} and {} are both breaks", .index + 1)]
    AdjacentBreaks { index: usize },
    #[error("action {index} (`{name}`) has a zero duration")]
    ZeroDuration { index: usize, name: String },
    #[error("no exercises configured")]
    NoExercises,
    #[error("no non-break action found within one pass of the plan")]
    NoDisplayableAction,
}

/// Knobs used to build a plan from a list of exercise names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    pub active_secs: u64,
    pub rest_secs: u64,
    /// Insert a break between the start marker and the first exercise
    pub leading_break: bool,
    pub exercises: Vec<String>,
    pub start_label: String,
    pub break_label: String,
    pub finish_label: String,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            active_secs: DEFAULT_ACTIVE_SECS,
            rest_secs: DEFAULT_REST_SECS,
            leading_break: false,
            exercises: DEFAULT_EXERCISES.iter().map(|s| s.to_string()).collect(),
            start_label: "Start".to_string(),
            break_label: "Break".to_string(),
            finish_label: "Complete!".to_string(),
        }
    }
}

/// Validated, immutable sequence of workout actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutPlan {
    actions: Vec<WorkoutAction>,
}

impl WorkoutPlan {
    pub fn new(actions: Vec<WorkoutAction>) -> Result<Self, PlanError> {
        validate(&actions)?;
        Ok(Self { actions })
    }

    pub fn from_config(config: &PlanConfig) -> Result<Self, PlanError> {
        if config.exercises.is_empty() {
            return Err(PlanError::NoExercises);
        }

        let mut actions = vec![WorkoutAction::start(&config.start_label)];
        if config.leading_break {
            actions.push(WorkoutAction::rest(&config.break_label, config.rest_secs));
        }

        let rest = || WorkoutAction::rest(&config.break_label, config.rest_secs);
        let exercises = config
            .exercises
            .iter()
            .map(|name| WorkoutAction::active(name, config.active_secs));
        actions.extend(Itertools::intersperse_with(exercises, rest));

        actions.push(WorkoutAction::finish(&config.finish_label));

        Self::new(actions)
    }

    pub fn actions(&self) -> &[WorkoutAction] {
        &self.actions
    }

    pub fn get(&self, index: usize) -> Option<&WorkoutAction> {
        self.actions.get(index)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Sum of every action's timer in seconds, clamped at `u64::MAX`
    pub fn total_duration(&self) -> u64 {
        self.actions
            .iter()
            .fold(0u64, |acc, a| acc.saturating_add(a.timer()))
    }

    pub fn exercise_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| a.kind() == ActionType::Active)
            .count()
    }
}

fn validate(actions: &[WorkoutAction]) -> Result<(), PlanError> {
    if actions.len() < 2 {
        return Err(PlanError::TooShort { len: actions.len() });
    }

    let first = &actions[0];
    if first.kind() != ActionType::Start || first.timer() != 0 {
        return Err(PlanError::MissingStart);
    }
    let last = &actions[actions.len() - 1];
    if last.kind() != ActionType::Finish || last.timer() != 0 {
        return Err(PlanError::MissingFinish);
    }

    let body = &actions[1..actions.len() - 1];
    for (offset, action) in body.iter().enumerate() {
        let index = offset + 1;
        if action.kind().is_marker() {
            return Err(PlanError::MarkerInBody {
                index,
                kind: action.kind(),
            });
        }
        if action.timer() == 0 {
            return Err(PlanError::ZeroDuration {
                index,
                name: action.name().to_string(),
            });
        }
    }

    // The wrap-around pair is always FINISH -> START, so only interior pairs matter
    if let Some(((index, _), _)) = actions
        .iter()
        .enumerate()
        .tuple_windows()
        .find(|((_, a), (_, b))| a.is_break() && b.is_break())
    {
        return Err(PlanError::AdjacentBreaks { index });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_plan_layout() {
        let plan = WorkoutPlan::from_config(&PlanConfig::default()).unwrap();

        // start + 8 exercises + 7 breaks + finish
        assert_eq!(plan.len(), 17);
        assert_eq!(plan.exercise_count(), 8);
        assert_eq!(plan.actions()[0].kind(), ActionType::Start);
        assert_eq!(plan.actions()[1].name(), "Jumping Jacks");
        assert_eq!(plan.actions()[2].kind(), ActionType::Break);
        assert_eq!(plan.actions()[15].name(), "Push Up with Rotation");
        assert_eq!(plan.actions()[16].name(), "Complete!");
        assert_eq!(plan.total_duration(), 8 * 30 + 7 * 10);
    }

    #[test]
    fn test_leading_break_variant() {
        let config = PlanConfig {
            active_secs: 4,
            rest_secs: 15,
            leading_break: true,
            exercises: vec!["Plank".into(), "Lunges".into()],
            ..PlanConfig::default()
        };
        let plan = WorkoutPlan::from_config(&config).unwrap();
        let kinds: Vec<ActionType> = plan.actions().iter().map(|a| a.kind()).collect();

        assert_eq!(
            kinds,
            vec![
                ActionType::Start,
                ActionType::Break,
                ActionType::Active,
                ActionType::Break,
                ActionType::Active,
                ActionType::Finish,
            ]
        );
        assert_eq!(plan.total_duration(), 4 * 2 + 15 * 2);
    }

    #[test]
    fn test_no_exercises() {
        let config = PlanConfig {
            exercises: vec![],
            ..PlanConfig::default()
        };
        assert_eq!(
            WorkoutPlan::from_config(&config),
            Err(PlanError::NoExercises)
        );
    }

    #[test]
    fn test_zero_rest_is_rejected() {
        let config = PlanConfig {
            rest_secs: 0,
            ..PlanConfig::default()
        };
        assert_matches!(
            WorkoutPlan::from_config(&config),
            Err(PlanError::ZeroDuration { index: 2, .. })
        );
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            WorkoutPlan::new(vec![WorkoutAction::start("Start")]),
            Err(PlanError::TooShort { len: 1 })
        );
    }

    #[test]
    fn test_missing_markers() {
        let no_start = vec![
            WorkoutAction::active("Plank", 30),
            WorkoutAction::finish("Done"),
        ];
        assert_eq!(WorkoutPlan::new(no_start), Err(PlanError::MissingStart));

        let timed_finish = vec![
            WorkoutAction::start("Start"),
            WorkoutAction::new("Done", 5, ActionType::Finish),
        ];
        assert_eq!(WorkoutPlan::new(timed_finish), Err(PlanError::MissingFinish));
    }

    #[test]
    fn test_marker_in_body() {
        let actions = vec![
            WorkoutAction::start("Start"),
            WorkoutAction::start("Again"),
            WorkoutAction::finish("Done"),
        ];
        assert_eq!(
            WorkoutPlan::new(actions),
            Err(PlanError::MarkerInBody {
                index: 1,
                kind: ActionType::Start
            })
        );
    }

    #[test]
    fn test_adjacent_breaks() {
        let actions = vec![
            WorkoutAction::start("Start"),
            WorkoutAction::active("Plank", 30),
            WorkoutAction::rest("Break", 10),
            WorkoutAction::rest("Break", 10),
            WorkoutAction::finish("Done"),
        ];
        assert_eq!(
            WorkoutPlan::new(actions),
            Err(PlanError::AdjacentBreaks { index: 2 })
        );
    }

    #[test]
    fn test_markers_only_plan_is_valid() {
        let plan = WorkoutPlan::new(vec![
            WorkoutAction::start("Start"),
            WorkoutAction::finish("Done"),
        ])
        .unwrap();
        assert_eq!(plan.exercise_count(), 0);
        assert_eq!(plan.total_duration(), 0);
    }

    #[test]
    fn test_huge_durations_saturate_total() {
        let plan = WorkoutPlan::from_config(&PlanConfig {
            active_secs: u64::MAX,
            ..PlanConfig::default()
        })
        .unwrap();
        assert_eq!(plan.total_duration(), u64::MAX);
    }
}
