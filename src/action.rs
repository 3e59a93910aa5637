use serde::{Deserialize, Serialize};

/// Kind of entry in a workout plan
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ActionType {
    Start,
    Active,
    Break,
    Finish,
}

impl ActionType {
    /// Start and finish markers bracket the plan and wait for user input
    pub fn is_marker(self) -> bool {
        matches!(self, ActionType::Start | ActionType::Finish)
    }
}

/// One entry in the workout sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutAction {
    name: String,
    timer: u64,
    #[serde(rename = "type")]
    kind: ActionType,
}

impl WorkoutAction {
    pub fn new(name: impl Into<String>, timer: u64, kind: ActionType) -> Self {
        Self {
            name: name.into(),
            timer,
            kind,
        }
    }

    pub fn start(name: impl Into<String>) -> Self {
        Self::new(name, 0, ActionType::Start)
    }

    pub fn active(name: impl Into<String>, timer: u64) -> Self {
        Self::new(name, timer, ActionType::Active)
    }

    pub fn rest(name: impl Into<String>, timer: u64) -> Self {
        Self::new(name, timer, ActionType::Break)
    }

    pub fn finish(name: impl Into<String>) -> Self {
        Self::new(name, 0, ActionType::Finish)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured duration in seconds; zero for start/finish markers
    pub fn timer(&self) -> u64 {
        self.timer
    }

    pub fn kind(&self) -> ActionType {
        self.kind
    }

    pub fn is_break(&self) -> bool {
        self.kind == ActionType::Break
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_type_display_is_uppercase() {
        assert_eq!(ActionType::Start.to_string(), "START");
        assert_eq!(ActionType::Active.to_string(), "ACTIVE");
        assert_eq!(ActionType::Break.to_string(), "BREAK");
        assert_eq!(ActionType::Finish.to_string(), "FINISH");
    }

    #[test]
    fn test_markers() {
        assert!(ActionType::Start.is_marker());
        assert!(ActionType::Finish.is_marker());
        assert!(!ActionType::Active.is_marker());
        assert!(!ActionType::Break.is_marker());
    }

    #[test]
    fn test_constructors() {
        let start = WorkoutAction::start("Start");
        assert_eq!(start.timer(), 0);
        assert_eq!(start.kind(), ActionType::Start);

        let pushups = WorkoutAction::active("Push Ups", 30);
        assert_eq!(pushups.name(), "Push Ups");
        assert_eq!(pushups.timer(), 30);
        assert!(!pushups.is_break());

        let rest = WorkoutAction::rest("Break", 10);
        assert!(rest.is_break());
    }

    #[test]
    fn test_deserialize_from_json() {
        let action: WorkoutAction =
            serde_json::from_str(r#"{"name":"Plank","timer":30,"type":"ACTIVE"}"#).unwrap();
        assert_eq!(action, WorkoutAction::active("Plank", 30));
    }
}
