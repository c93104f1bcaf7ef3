//! Micro-break Scheduling
//!
//! Decides when a learner with a focus-related challenge should be offered a
//! short break. Breaks are forced by a run of wrong answers, and otherwise
//! follow a cadence of at most one every three steps.

/// Consecutive incorrect answers that force a break.
pub const STRUGGLE_STREAK: u32 = 2;

/// Minimum number of steps between cadence breaks.
pub const CADENCE: usize = 3;

/// Returns `true` if a break should be offered after the step at `step_index`.
///
/// Rule order matters: a struggle streak is checked before the first-step
/// guard, so a streak can trigger a break even at index 0.
pub fn should_break(
    has_focus_challenge: bool,
    step_index: usize,
    incorrect_streak: u32,
    last_break_step: Option<usize>,
) -> bool {
    if !has_focus_challenge {
        return false;
    }

    if incorrect_streak >= STRUGGLE_STREAK {
        return true;
    }

    if step_index == 0 {
        return false;
    }

    match last_break_step {
        None => (step_index + 1) % CADENCE == 0,
        Some(last) => step_index.saturating_sub(last) >= CADENCE,
    }
}

/// Transient break bookkeeping held by the session loop for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulerState {
    pub incorrect_streak: u32,
    pub last_break_step: Option<usize>,
    pub focus_breaks: bool,
}

impl SchedulerState {
    pub fn new(focus_breaks: bool) -> Self {
        Self {
            focus_breaks,
            ..Default::default()
        }
    }

    /// Resets the streak on a correct answer, extends it otherwise.
    pub fn record(&mut self, correct: bool) {
        if correct {
            self.incorrect_streak = 0;
        } else {
            self.incorrect_streak += 1;
        }
    }

    pub fn should_break(&self, step_index: usize) -> bool {
        should_break(
            self.focus_breaks,
            step_index,
            self.incorrect_streak,
            self.last_break_step,
        )
    }

    pub fn mark_break(&mut self, step_index: usize) {
        self.last_break_step = Some(step_index);
    }
}
