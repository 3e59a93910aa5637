/// Lifecycle of a single countdown run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Expired,
    Stopped,
}

/// What a single tick did to the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No run in progress
    Inactive,
    /// Run in progress but paused, elapsed left untouched
    Paused,
    Counted,
    /// Elapsed time went past the duration on this tick
    Expired,
}

/// One-second resolution counter for the current action.
///
/// Only one run exists at a time: starting a new run stops the previous one
/// without reporting an expiry.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    phase: TimerPhase,
    duration: u64,
    elapsed: u64,
}

impl IntervalTimer {
    pub fn new() -> Self {
        Self {
            phase: TimerPhase::Idle,
            duration: 0,
            elapsed: 0,
        }
    }

    /// Begin a run for `duration` seconds. A zero duration leaves the timer idle.
    pub fn start(&mut self, duration: u64) {
        self.stop();
        self.elapsed = 0;
        self.duration = duration;
        self.phase = if duration > 0 {
            TimerPhase::Running
        } else {
            TimerPhase::Idle
        };
    }

    /// Cancel the current run; never reports expiry
    pub fn stop(&mut self) {
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Stopped;
        }
    }

    /// Cancel the current run and return to idle
    pub fn reset(&mut self) {
        self.stop();
        self.phase = TimerPhase::Idle;
        self.duration = 0;
        self.elapsed = 0;
    }

    pub fn tick(&mut self, paused: bool) -> TickOutcome {
        if self.phase != TimerPhase::Running {
            return TickOutcome::Inactive;
        }
        if paused {
            return TickOutcome::Paused;
        }

        self.elapsed += 1;
        if self.duration > 0 && self.elapsed > self.duration {
            self.phase = TimerPhase::Expired;
            TickOutcome::Expired
        } else {
            TickOutcome::Counted
        }
    }

    /// Seconds left on the clock, clamped at zero
    pub fn display_remaining(&self) -> u64 {
        self.duration.saturating_sub(self.elapsed)
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }
}

impl Default for IntervalTimer {
    fn default() -> Self {
        Self::new()
    }
}
