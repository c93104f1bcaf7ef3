//! Session Step Log
//!
//! An append-only, ordered record of what happened at each lesson step. The
//! log is filled by the tutoring loop and read afterwards by analytics, the
//! report renderer and persistence.

use crate::feedback::Feedback;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stored in place of the raw reply when the learner just pressed Enter.
pub const EMPTY_INPUT_SENTINEL: &str = "<enter>";

/// The outcome of a single lesson step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SessionStepRecord {
    /// 1-based position of the step in the lesson.
    pub step_id: usize,
    /// The step text as shown to the learner.
    pub content: String,
    pub feedback: Feedback,
    /// The first reply typed for this step, or [`EMPTY_INPUT_SENTINEL`].
    pub raw_feedback: String,
    pub hint_used: bool,
}

/// Ordered log of step outcomes for one session.
///
/// Records can only be appended, and step ids are assigned by the log so they
/// stay sequential with no gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SessionLog {
    records: Vec<SessionStepRecord>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the outcome of the next step and returns the stored record.
    pub fn log_interaction(
        &mut self,
        content: impl Into<String>,
        feedback: Feedback,
        raw_feedback: Option<&str>,
        hint_used: bool,
    ) -> &SessionStepRecord {
        let raw_feedback = match raw_feedback {
            Some(raw) if !raw.is_empty() => raw.to_string(),
            _ => EMPTY_INPUT_SENTINEL.to_string(),
        };
        self.records.push(SessionStepRecord {
            step_id: self.records.len() + 1,
            content: content.into(),
            feedback,
            raw_feedback,
            hint_used,
        });
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[SessionStepRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SessionStepRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a SessionLog {
    type Item = &'a SessionStepRecord;
    type IntoIter = std::slice::Iter<'a, SessionStepRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_ids_are_sequential() {
        let mut log = SessionLog::new();
        log.log_interaction("Step 1: a", Feedback::Correct, Some("y"), false);
        log.log_interaction("Step 2: b", Feedback::Incorrect, Some("no"), true);
        log.log_interaction("Step 3: c", Feedback::Correct, None, false);

        let ids: Vec<usize> = log.iter().map(|r| r.step_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_empty_reply_uses_sentinel() {
        let mut log = SessionLog::new();
        let record = log.log_interaction("x", Feedback::Correct, Some(""), false);
        assert_eq!(record.raw_feedback, EMPTY_INPUT_SENTINEL);
        let record = log.log_interaction("y", Feedback::Correct, None, false);
        assert_eq!(record.raw_feedback, EMPTY_INPUT_SENTINEL);
        let record = log.log_interaction("z", Feedback::Incorrect, Some("Nope"), false);
        assert_eq!(record.raw_feedback, "Nope");
    }

    #[test]
    fn test_log_serializes_as_plain_array() {
        let mut log = SessionLog::new();
        log.log_interaction("Step 1: halves", Feedback::Incorrect, Some("no"), true);

        let value = serde_json::to_value(&log).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "step_id": 1,
                "content": "Step 1: halves",
                "feedback": "incorrect",
                "raw_feedback": "no",
                "hint_used": true
            }])
        );

        let parsed: SessionLog = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, log);
    }
}
