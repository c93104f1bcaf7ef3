//! Tutoring Session Loop
//!
//! Drives one lesson for one learner. The lesson is generated once and split
//! into steps; each step then walks a small state machine:
//!
//! `Present -> AwaitFirstFeedback -> [AwaitHintChoice -> [AwaitSecondFeedback]] -> Logged -> MaybeBreak`
//!
//! All learner interaction goes through [`LearnerIo`], which is where the loop
//! suspends for input.

use crate::{
    break_scheduler::SchedulerState,
    content::ContentService,
    feedback::{Feedback, interpret},
    profile::{LearnerProfile, Modality},
    session_log::SessionLog,
    tts, visual_aid,
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

/// Weight at or above which a modality's side material is shown.
pub const SIDE_MATERIAL_THRESHOLD: f64 = 0.5;

const FIRST_CHECK_PROMPT: &str =
    "Did you understand this step? (Enter = yes, or type no/incorrect if not): ";
const HINT_OFFER_PROMPT: &str =
    "Would you like a short hint or simpler explanation? (Enter = yes, type no if you want to skip): ";
const SECOND_CHECK_PROMPT: &str =
    "Does this hint help you understand the step now? (Enter = yes, type no if still confused): ";
const BREAK_PROMPT: &str = "Press Enter when you're ready to continue...";

/// The learner-facing side of a session.
///
/// `ask` blocks until the learner replies; `None` means input has ended and
/// is treated like an empty reply.
#[async_trait]
pub trait LearnerIo: Send {
    fn say(&mut self, text: &str);

    async fn ask(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Where a single step currently is in its feedback cycle.
#[derive(Debug, Clone, PartialEq)]
enum StepPhase {
    Present,
    AwaitFirstFeedback,
    AwaitHintChoice,
    AwaitSecondFeedback,
    Logged { feedback: Feedback, hint_used: bool },
    MaybeBreak,
    Done,
}

/// Runs tutoring sessions against a content service for one learner.
pub struct TutorSession<'a> {
    content: &'a dyn ContentService,
    profile: &'a LearnerProfile,
}

impl<'a> TutorSession<'a> {
    pub fn new(content: &'a dyn ContentService, profile: &'a LearnerProfile) -> Self {
        Self { content, profile }
    }

    /// Runs a full lesson on `topic` and returns the step log.
    ///
    /// A failure from the content service aborts the session.
    pub async fn run(&self, topic: &str, io: &mut dyn LearnerIo) -> Result<SessionLog> {
        io.say(&format!(
            "\nHello {}! Today we'll learn about: {}\n",
            self.profile.name, topic
        ));

        let lesson = self.content.generate_lesson(topic, self.profile).await?;
        let steps = split_steps(&lesson);
        info!(student_id = %self.profile.student_id, %topic, steps = steps.len(), "Lesson ready");

        let mut log = SessionLog::new();
        let mut scheduler = SchedulerState::new(self.profile.needs_focus_breaks());

        for (index, step) in steps.iter().enumerate() {
            self.run_step(topic, index, step, io, &mut log, &mut scheduler)
                .await?;
        }

        info!(student_id = %self.profile.student_id, logged = log.len(), "Session finished");
        Ok(log)
    }

    async fn run_step(
        &self,
        topic: &str,
        index: usize,
        step: &str,
        io: &mut dyn LearnerIo,
        log: &mut SessionLog,
        scheduler: &mut SchedulerState,
    ) -> Result<()> {
        let mut phase = StepPhase::Present;
        let mut first_raw: Option<String> = None;

        loop {
            phase = match phase {
                StepPhase::Present => {
                    self.present(topic, index, step, io);
                    StepPhase::AwaitFirstFeedback
                }
                StepPhase::AwaitFirstFeedback => {
                    first_raw = io.ask(FIRST_CHECK_PROMPT).await?;
                    match interpret(first_raw.as_deref(), true) {
                        Feedback::Correct => {
                            io.say("Awesome! Let's keep going.\n");
                            StepPhase::Logged {
                                feedback: Feedback::Correct,
                                hint_used: false,
                            }
                        }
                        Feedback::Incorrect => {
                            io.say("Thanks for letting me know. That's totally okay!");
                            StepPhase::AwaitHintChoice
                        }
                    }
                }
                StepPhase::AwaitHintChoice => {
                    let reply = io.ask(HINT_OFFER_PROMPT).await?;
                    match interpret(reply.as_deref(), true) {
                        Feedback::Correct => {
                            let hint = self.content.generate_hint(step, self.profile).await?;
                            io.say(&format!("\nHere's a hint:\n{hint}\n"));
                            StepPhase::AwaitSecondFeedback
                        }
                        Feedback::Incorrect => {
                            io.say("Okay, we'll move on for now and can come back later.\n");
                            StepPhase::Logged {
                                feedback: Feedback::Incorrect,
                                hint_used: false,
                            }
                        }
                    }
                }
                StepPhase::AwaitSecondFeedback => {
                    let reply = io.ask(SECOND_CHECK_PROMPT).await?;
                    let feedback = interpret(reply.as_deref(), true);
                    if feedback.is_correct() {
                        io.say("Great, happy that helped!\n");
                    } else {
                        io.say("No problem, we can revisit this in a future session.\n");
                    }
                    StepPhase::Logged {
                        feedback,
                        hint_used: true,
                    }
                }
                StepPhase::Logged {
                    feedback,
                    hint_used,
                } => {
                    scheduler.record(feedback.is_correct());
                    let record = log.log_interaction(step, feedback, first_raw.as_deref(), hint_used);
                    debug!(
                        step_id = record.step_id,
                        %feedback,
                        hint_used,
                        streak = scheduler.incorrect_streak,
                        "Step logged"
                    );
                    StepPhase::MaybeBreak
                }
                StepPhase::MaybeBreak => {
                    if scheduler.should_break(index) {
                        info!(step_index = index, streak = scheduler.incorrect_streak, "Focus break");
                        io.say("Quick focus break!");
                        io.say("Stand up, stretch, look away from the screen for a few seconds.");
                        io.ask(BREAK_PROMPT).await?;
                        scheduler.mark_break(index);
                    }
                    StepPhase::Done
                }
                StepPhase::Done => return Ok(()),
            };
        }
    }

    fn present(&self, topic: &str, index: usize, step: &str, io: &mut dyn LearnerIo) {
        io.say(&format!("Step {}: {}", index + 1, step));

        let preferences = &self.profile.preferences;
        if preferences.get(Modality::Visual) >= SIDE_MATERIAL_THRESHOLD {
            io.say(&format!("Visual support: {}", visual_aid::describe(topic, step)));
        }
        if preferences.get(Modality::Audio) >= SIDE_MATERIAL_THRESHOLD {
            io.say(&tts::describe(step));
        }
    }
}

/// Splits lesson text into steps, one per non-blank line.
pub fn split_steps(lesson: &str) -> Vec<String> {
    lesson
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
