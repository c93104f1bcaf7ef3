//! Learner Feedback Interpretation
//!
//! Turns whatever the learner typed at a comprehension prompt into a binary
//! outcome. Anything that is not clearly affirmative counts as not understood.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Replies accepted as "yes, I understood".
const AFFIRMATIVE: &[&str] = &[
    "correct",
    "c",
    "yes",
    "y",
    "understood",
    "ok",
    "okay",
    "true",
    "got it",
];

/// Replies accepted as "no, I did not understand".
const NEGATIVE: &[&str] = &[
    "incorrect",
    "i",
    "no",
    "n",
    "confused",
    "idk",
    "don't know",
    "false",
];

/// The interpreted outcome of a single comprehension check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Correct,
    Incorrect,
}

impl Feedback {
    pub fn is_correct(self) -> bool {
        matches!(self, Feedback::Correct)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Correct => write!(f, "correct"),
            Feedback::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// Maps free-form learner input to [`Feedback`].
///
/// Input is trimmed and lower-cased before matching. An empty reply counts as
/// `Correct` only when `default_positive` is set. Unrecognized text is always
/// `Incorrect`, so ambiguous replies are never mistaken for understanding.
pub fn interpret(raw: Option<&str>, default_positive: bool) -> Feedback {
    let normalized = raw.unwrap_or_default().trim().to_lowercase();

    if normalized.is_empty() && default_positive {
        return Feedback::Correct;
    }

    match normalized.as_str() {
        reply if AFFIRMATIVE.contains(&reply) => Feedback::Correct,
        reply if NEGATIVE.contains(&reply) => Feedback::Incorrect,
        _ => Feedback::Incorrect,
    }
}
