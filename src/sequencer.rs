use crate::action::WorkoutAction;
use crate::plan::{PlanError, WorkoutPlan};

/// Position within a workout plan
#[derive(Debug, Clone)]
pub struct Sequencer {
    plan: WorkoutPlan,
    current_index: usize,
}

impl Sequencer {
    pub fn new(plan: WorkoutPlan) -> Self {
        Self {
            plan,
            current_index: 0,
        }
    }

    /// Move to the next action, wrapping back to the start marker after finish
    pub fn advance(&mut self) -> &WorkoutAction {
        self.current_index = (self.current_index + 1) % self.plan.len();
        self.current()
    }

    pub fn reset(&mut self) {
        self.current_index = 0;
    }

    pub fn current(&self) -> &WorkoutAction {
        &self.plan.actions()[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Upcoming action to preview, skipping breaks.
    ///
    /// The scan covers at most one full pass of the plan. A plan made only of
    /// breaks cannot be constructed, so the error is an invariant violation.
    pub fn peek_next_display_action(&self) -> Result<&WorkoutAction, PlanError> {
        let len = self.plan.len();
        (1..=len)
            .map(|step| &self.plan.actions()[(self.current_index + step) % len])
            .find(|action| !action.is_break())
            .ok_or(PlanError::NoDisplayableAction)
    }

    pub fn len(&self) -> usize {
        self.plan.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plan.is_empty()
    }

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }
}
