use tracing::{debug, info};

use crate::action::{ActionType, WorkoutAction};
use crate::chime::Chime;
use crate::plan::{PlanError, WorkoutPlan};
use crate::sequencer::Sequencer;
use crate::timer::{IntervalTimer, TickOutcome, TimerPhase};

/// Emitted when a tick ran the current action out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutEvent {
    Advanced { from: usize, to: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutStatus {
    /// Sitting on the start marker
    Ready,
    Running,
    Paused,
    /// Sitting on the finish marker
    Complete,
}

/// A workout being displayed to the user
pub struct Workout {
    sequencer: Sequencer,
    timer: IntervalTimer,
    paused: bool,
    chime: Box<dyn Chime>,
}

impl Workout {
    pub fn new(plan: WorkoutPlan, chime: Box<dyn Chime>) -> Self {
        Self {
            sequencer: Sequencer::new(plan),
            timer: IntervalTimer::new(),
            paused: false,
            chime,
        }
    }

    /// Move on to the next action and start its countdown.
    ///
    /// Markers have no duration, so landing on one leaves the timer idle
    /// until the user advances again.
    pub fn start_next_action(&mut self) -> &WorkoutAction {
        let from = self.sequencer.current_index();
        self.paused = false;

        self.sequencer.advance();
        let action = self.sequencer.current();
        if action.timer() > 0 {
            self.timer.start(action.timer());
        } else {
            self.timer.reset();
        }

        info!(
            from,
            to = self.sequencer.current_index(),
            action = action.name(),
            kind = %action.kind(),
            secs = action.timer(),
            "started action"
        );
        action
    }

    pub fn pause_toggle(&mut self) {
        self.paused = !self.paused;
        info!(paused = self.paused, "pause toggled");
    }

    /// Back to the start marker without chiming
    pub fn reset(&mut self) {
        if self.timer.is_running() {
            debug!(elapsed = self.timer.elapsed(), "cancelling running interval");
        }
        self.timer.reset();
        self.sequencer.reset();
        self.paused = false;
        info!("workout reset");
    }

    /// Advance the clock by one tick, moving on when the action runs out
    pub fn on_tick(&mut self) -> Option<WorkoutEvent> {
        match self.timer.tick(self.paused) {
            TickOutcome::Expired => {
                let from = self.sequencer.current_index();
                self.start_next_action();
                self.chime.play();
                Some(WorkoutEvent::Advanced {
                    from,
                    to: self.sequencer.current_index(),
                })
            }
            TickOutcome::Counted => {
                debug!(
                    elapsed = self.timer.elapsed(),
                    remaining = self.timer.display_remaining(),
                    "tick"
                );
                None
            }
            TickOutcome::Paused | TickOutcome::Inactive => None,
        }
    }

    pub fn current_action(&self) -> &WorkoutAction {
        self.sequencer.current()
    }

    pub fn current_index(&self) -> usize {
        self.sequencer.current_index()
    }

    pub fn next_display_action(&self) -> Result<&WorkoutAction, PlanError> {
        self.sequencer.peek_next_display_action()
    }

    pub fn display_remaining(&self) -> u64 {
        self.timer.display_remaining()
    }

    pub fn elapsed(&self) -> u64 {
        self.timer.elapsed()
    }

    pub fn timer_phase(&self) -> TimerPhase {
        self.timer.phase()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True when the current action needs the user to move on
    pub fn awaiting_input(&self) -> bool {
        self.current_action().timer() == 0
    }

    pub fn status(&self) -> WorkoutStatus {
        match self.current_action().kind() {
            ActionType::Start => WorkoutStatus::Ready,
            ActionType::Finish => WorkoutStatus::Complete,
            ActionType::Active | ActionType::Break if self.paused => WorkoutStatus::Paused,
            ActionType::Active | ActionType::Break => WorkoutStatus::Running,
        }
    }

    /// Exercises completed so far and the total number of exercises
    pub fn progress(&self) -> (usize, usize) {
        let plan = self.sequencer.plan();
        let total = plan.exercise_count();
        let done = plan.actions()[..self.current_index()]
            .iter()
            .filter(|a| a.kind() == ActionType::Active)
            .count();

        if self.status() == WorkoutStatus::Complete {
            (total, total)
        } else {
            (done, total)
        }
    }

    pub fn total_duration(&self) -> u64 {
        self.sequencer.plan().total_duration()
    }

    pub fn plan(&self) -> &WorkoutPlan {
        self.sequencer.plan()
    }
}

impl std::fmt::Debug for Workout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workout")
            .field("sequencer", &self.sequencer)
            .field("timer", &self.timer)
            .field("paused", &self.paused)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chime::CountingChime;

    fn scenario() -> (Workout, CountingChime) {
        let plan = WorkoutPlan::new(vec![
            WorkoutAction::start("Start"),
            WorkoutAction::active("Jumping Jacks", 30),
            WorkoutAction::rest("Get ready", 10),
            WorkoutAction::active("Push Ups", 30),
            WorkoutAction::finish("Complete!"),
        ])
        .unwrap();
        let chime = CountingChime::new();
        (Workout::new(plan, Box::new(chime.clone())), chime)
    }

    #[test]
    fn test_new_workout_waits_on_start() {
        let (mut workout, chime) = scenario();

        assert_eq!(workout.status(), WorkoutStatus::Ready);
        assert!(workout.awaiting_input());
        assert_eq!(workout.display_remaining(), 0);

        for _ in 0..100 {
            assert_eq!(workout.on_tick(), None);
        }
        assert_eq!(workout.current_index(), 0);
        assert_eq!(chime.plays(), 0);
    }

    #[test]
    fn test_jumping_jacks_scenario() {
        let (mut workout, chime) = scenario();

        let action = workout.start_next_action();
        assert_eq!(action.name(), "Jumping Jacks");
        assert_eq!(workout.current_index(), 1);
        assert_eq!(workout.timer_phase(), TimerPhase::Running);
        assert_eq!(workout.display_remaining(), 30);
        assert_eq!(workout.next_display_action().unwrap().name(), "Push Ups");

        for tick in 1..=30 {
            assert_eq!(workout.on_tick(), None, "expired early on tick {tick}");
        }
        assert_eq!(workout.display_remaining(), 0);
        assert_eq!(chime.plays(), 0);

        assert_eq!(
            workout.on_tick(),
            Some(WorkoutEvent::Advanced { from: 1, to: 2 })
        );
        assert_eq!(chime.plays(), 1);
        assert_eq!(workout.current_action().name(), "Get ready");
        assert_eq!(workout.display_remaining(), 10);
        assert_eq!(workout.elapsed(), 0);
        assert_eq!(workout.next_display_action().unwrap().name(), "Push Ups");
    }

    #[test]
    fn test_full_run_lands_on_finish_and_stays() {
        let (mut workout, chime) = scenario();
        workout.start_next_action();

        // 31 + 11 + 31 ticks to run out all three timed actions
        for _ in 0..73 {
            workout.on_tick();
        }
        assert_eq!(workout.status(), WorkoutStatus::Complete);
        assert_eq!(chime.plays(), 3);
        assert_eq!(workout.progress(), (2, 2));

        for _ in 0..10 {
            assert_eq!(workout.on_tick(), None);
        }
        assert_eq!(chime.plays(), 3);

        // finish wraps to start on manual advance
        workout.start_next_action();
        assert_eq!(workout.status(), WorkoutStatus::Ready);
    }

    #[test]
    fn test_pause_freezes_countdown() {
        let (mut workout, _chime) = scenario();
        workout.start_next_action();
        workout.on_tick();
        workout.on_tick();

        workout.pause_toggle();
        assert_eq!(workout.status(), WorkoutStatus::Paused);
        for _ in 0..50 {
            assert_eq!(workout.on_tick(), None);
        }
        assert_eq!(workout.elapsed(), 2);
        assert_eq!(workout.display_remaining(), 28);

        workout.pause_toggle();
        assert_eq!(workout.status(), WorkoutStatus::Running);
        workout.on_tick();
        assert_eq!(workout.elapsed(), 3);
    }

    #[test]
    fn test_advance_clears_pause() {
        let (mut workout, _chime) = scenario();
        workout.start_next_action();
        workout.pause_toggle();
        assert!(workout.is_paused());

        workout.start_next_action();
        assert!(!workout.is_paused());
        assert_eq!(workout.current_action().name(), "Get ready");
    }

    #[test]
    fn test_reset_from_running_is_silent() {
        let (mut workout, chime) = scenario();
        workout.start_next_action();
        workout.on_tick();
        workout.pause_toggle();

        workout.reset();

        assert_eq!(workout.current_index(), 0);
        assert!(!workout.is_paused());
        assert_eq!(workout.timer_phase(), TimerPhase::Idle);
        assert_eq!(chime.plays(), 0);
        for _ in 0..40 {
            assert_eq!(workout.on_tick(), None);
        }
        assert_eq!(chime.plays(), 0);
    }

    #[test]
    fn test_progress_counts_finished_exercises() {
        let (mut workout, _chime) = scenario();
        assert_eq!(workout.progress(), (0, 2));

        workout.start_next_action();
        assert_eq!(workout.progress(), (0, 2));

        workout.start_next_action();
        assert_eq!(workout.progress(), (1, 2));

        workout.start_next_action();
        assert_eq!(workout.progress(), (1, 2));
    }

    #[test]
    fn test_total_duration() {
        let (workout, _chime) = scenario();
        assert_eq!(workout.total_duration(), 70);
    }
}
