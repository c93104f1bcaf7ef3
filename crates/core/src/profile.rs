//! Learner Profile
//!
//! The profile carries who the learner is, how strongly they respond to each
//! presentation modality, and any declared learning challenges. Preferences
//! are only changed by [`Preferences::adjust`] at the end of a session, which
//! keeps the vector non-negative and normalized to a sum of 1.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Score at or above which the current presentation style is reinforced.
pub const REINFORCE_THRESHOLD: f64 = 0.8;

/// Challenge tags that shift weight towards visual material after a weak session.
const READING_FOCUS_CHALLENGES: &[&str] = &["dyslexia", "adhd"];

/// Challenge tag that enables micro-breaks during a session.
pub const FOCUS_CHALLENGE: &str = "adhd";

/// Validation failures for profile data.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProfileError {
    #[error("Missing required profile field: {0}")]
    MissingField(&'static str),
    #[error("Preference for {0} is negative: {1}")]
    NegativePreference(Modality, f64),
    #[error("Preference for {0} is not a finite number")]
    NonFinitePreference(Modality),
    #[error("Preferences have no positive weight and cannot be normalized")]
    DegeneratePreferences,
}

/// A sensory channel that lesson material can be presented through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Visual,
    Audio,
    Text,
}

impl Modality {
    /// Canonical order, also used to break ties between equal weights.
    pub const ALL: [Modality; 3] = [Modality::Visual, Modality::Audio, Modality::Text];
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modality::Visual => write!(f, "visual"),
            Modality::Audio => write!(f, "audio"),
            Modality::Text => write!(f, "text"),
        }
    }
}

/// Per-modality preference weights.
///
/// Missing keys default to `0.0`; unknown keys are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Preferences {
    #[serde(default)]
    pub visual: f64,
    #[serde(default)]
    pub audio: f64,
    #[serde(default)]
    pub text: f64,
}

impl Preferences {
    pub fn new(visual: f64, audio: f64, text: f64) -> Self {
        Self {
            visual,
            audio,
            text,
        }
    }

    pub fn get(&self, modality: Modality) -> f64 {
        match modality {
            Modality::Visual => self.visual,
            Modality::Audio => self.audio,
            Modality::Text => self.text,
        }
    }

    fn get_mut(&mut self, modality: Modality) -> &mut f64 {
        match modality {
            Modality::Visual => &mut self.visual,
            Modality::Audio => &mut self.audio,
            Modality::Text => &mut self.text,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Modality, f64)> + '_ {
        Modality::ALL.into_iter().map(|m| (m, self.get(m)))
    }

    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum()
    }

    /// The modality with the highest weight; the first in canonical order wins ties.
    pub fn dominant(&self) -> Modality {
        let mut best = Modality::Visual;
        for (modality, value) in self.iter() {
            if value > self.get(best) {
                best = modality;
            }
        }
        best
    }

    /// Checks that every weight is finite and non-negative and at least one is positive.
    pub fn validate(&self) -> Result<(), ProfileError> {
        for (modality, value) in self.iter() {
            if !value.is_finite() {
                return Err(ProfileError::NonFinitePreference(modality));
            }
            if value < 0.0 {
                return Err(ProfileError::NegativePreference(modality, value));
            }
        }
        if self.sum() <= 0.0 {
            return Err(ProfileError::DegeneratePreferences);
        }
        Ok(())
    }

    /// Applies per-modality deltas, clamps each weight to `[0, 1]` and
    /// renormalizes so the weights sum to 1.
    ///
    /// The update is computed on a copy; if the clamped weights sum to zero the
    /// preferences are left untouched and an error is returned.
    pub fn apply_delta(&mut self, delta: &Preferences) -> Result<(), ProfileError> {
        let mut updated = *self;
        for (modality, change) in delta.iter() {
            let value = updated.get_mut(modality);
            *value = (*value + change).clamp(0.0, 1.0);
        }

        let total = updated.sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(ProfileError::DegeneratePreferences);
        }
        for modality in Modality::ALL {
            *updated.get_mut(modality) /= total;
        }

        *self = updated;
        Ok(())
    }

    /// Computes the end-of-session delta for the given score and challenges.
    pub fn feedback_delta(&self, effective_score: f64, challenges: &[String]) -> Preferences {
        let mut delta = Preferences::default();
        if effective_score >= REINFORCE_THRESHOLD {
            *delta.get_mut(self.dominant()) += 0.05;
        } else if has_any_challenge(challenges, READING_FOCUS_CHALLENGES) {
            delta.visual += 0.05;
            delta.text -= 0.05;
        } else {
            delta.audio += 0.03;
            delta.visual += 0.02;
            delta.text -= 0.05;
        }
        delta
    }

    /// Shifts weights based on how well the session went.
    ///
    /// A strong session reinforces the dominant modality. A weak session moves
    /// weight away from text: towards visual for reading or focus challenges,
    /// towards audio and visual otherwise.
    pub fn adjust(
        &mut self,
        effective_score: f64,
        challenges: &[String],
    ) -> Result<Preferences, ProfileError> {
        let delta = self.feedback_delta(effective_score, challenges);
        self.apply_delta(&delta)?;
        info!(
            effective_score,
            delta = %delta,
            preferences = %self,
            "Preferences adjusted"
        );
        Ok(delta)
    }
}

impl fmt::Display for Preferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "visual={:.2}, audio={:.2}, text={:.2}",
            self.visual, self.audio, self.text
        )
    }
}

/// Case-insensitive membership test against a set of challenge tags.
pub fn has_any_challenge(challenges: &[String], wanted: &[&str]) -> bool {
    challenges
        .iter()
        .any(|c| wanted.iter().any(|w| c.eq_ignore_ascii_case(w)))
}

/// A learner's persistent profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LearnerProfile {
    /// Unique learner identifier, also used to name persisted files.
    pub student_id: String,
    /// Display name used when addressing the learner.
    pub name: String,
    /// Modality preference weights.
    pub preferences: Preferences,
    /// Declared learning challenges such as "dyslexia" or "ADHD".
    #[serde(default)]
    pub learning_challenges: Vec<String>,
    /// Free-text notes for teachers.
    #[serde(default)]
    pub notes: String,
}

impl LearnerProfile {
    /// The profile used when no profile file is supplied.
    pub fn with_defaults(student_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            name: name.into(),
            preferences: Preferences::new(0.6, 0.3, 0.1),
            learning_challenges: vec!["dyslexia".to_string()],
            notes: "Prefers short explanations and visual aids".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.student_id.trim().is_empty() {
            return Err(ProfileError::MissingField("student_id"));
        }
        if self.name.trim().is_empty() {
            return Err(ProfileError::MissingField("name"));
        }
        self.preferences.validate()
    }

    pub fn has_challenge(&self, tag: &str) -> bool {
        has_any_challenge(&self.learning_challenges, &[tag])
    }

    /// Whether micro-breaks should be scheduled for this learner.
    pub fn needs_focus_breaks(&self) -> bool {
        self.has_challenge(FOCUS_CHALLENGE)
    }

    /// Applies the end-of-session preference update.
    pub fn adjust_preferences(&mut self, effective_score: f64) -> Result<Preferences, ProfileError> {
        self.preferences
            .adjust(effective_score, &self.learning_challenges)
    }
}

impl fmt::Display for LearnerProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LearnerProfile({}, Preferences={})",
            self.student_id, self.preferences
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn assert_normalized(prefs: &Preferences) {
        assert_relative_eq!(prefs.sum(), 1.0, epsilon = 1e-9);
        for (_, value) in prefs.iter() {
            assert!(value >= 0.0);
        }
    }

    #[test]
    fn test_strong_session_reinforces_dominant() {
        let mut prefs = Preferences::new(0.2, 0.5, 0.3);
        let delta = prefs.adjust(0.9, &[]).unwrap();

        assert_eq!(delta, Preferences::new(0.0, 0.05, 0.0));
        assert_relative_eq!(prefs.audio, 0.55 / 1.05, epsilon = 1e-9);
        assert_relative_eq!(prefs.visual, 0.2 / 1.05, epsilon = 1e-9);
        assert_normalized(&prefs);
    }

    #[test]
    fn test_dominant_tie_uses_canonical_order() {
        assert_eq!(Preferences::new(0.4, 0.4, 0.2).dominant(), Modality::Visual);
        assert_eq!(Preferences::new(0.1, 0.45, 0.45).dominant(), Modality::Audio);
        assert_eq!(Preferences::new(0.0, 0.0, 1.0).dominant(), Modality::Text);
    }

    #[test]
    fn test_weak_session_with_reading_challenge_moves_to_visual() {
        let mut prefs = Preferences::new(0.6, 0.3, 0.1);
        let delta = prefs.adjust(0.5, &tags(&["Dyslexia"])).unwrap();

        assert_eq!(delta.visual, 0.05);
        assert_eq!(delta.text, -0.05);
        assert_eq!(delta.audio, 0.0);
        assert_relative_eq!(prefs.visual, 0.65, epsilon = 1e-9);
        assert_relative_eq!(prefs.text, 0.05, epsilon = 1e-9);
        assert_normalized(&prefs);

        let mut prefs = Preferences::new(0.3, 0.3, 0.4);
        let delta = prefs.adjust(0.0, &tags(&["ADHD"])).unwrap();
        assert_eq!(delta.visual, 0.05);
    }

    #[test]
    fn test_weak_session_without_challenges() {
        let mut prefs = Preferences::new(0.2, 0.3, 0.5);
        let delta = prefs.adjust(0.79, &tags(&["autism"])).unwrap();

        assert_eq!(delta, Preferences::new(0.02, 0.03, -0.05));
        assert_relative_eq!(prefs.visual, 0.22, epsilon = 1e-9);
        assert_relative_eq!(prefs.audio, 0.33, epsilon = 1e-9);
        assert_relative_eq!(prefs.text, 0.45, epsilon = 1e-9);
        assert_normalized(&prefs);
    }

    #[test]
    fn test_clamping_keeps_weights_non_negative() {
        let mut prefs = Preferences::new(0.97, 0.0, 0.03);
        prefs.adjust(0.1, &tags(&["dyslexia"])).unwrap();
        assert_eq!(prefs.text, 0.0);
        assert_relative_eq!(prefs.visual, 1.0, epsilon = 1e-9);
        assert_normalized(&prefs);
    }

    #[test]
    fn test_every_adjustment_stays_normalized() {
        let starts = [
            Preferences::new(0.6, 0.3, 0.1),
            Preferences::new(1.0, 0.0, 0.0),
            Preferences::new(0.0, 0.0, 1.0),
            Preferences::new(0.2, 0.7, 0.9),
        ];
        let challenge_sets = [tags(&[]), tags(&["adhd"]), tags(&["other"])];
        for start in starts {
            for score in [0.0, 0.5, 0.8, 1.0] {
                for challenges in &challenge_sets {
                    let mut prefs = start;
                    prefs.adjust(score, challenges).unwrap();
                    assert_normalized(&prefs);
                }
            }
        }
    }

    #[test]
    fn test_degenerate_vector_is_rejected_unchanged() {
        let mut prefs = Preferences::new(0.0, 0.0, 0.02);
        let delta = Preferences::new(0.0, 0.0, -0.05);
        assert_eq!(
            prefs.apply_delta(&delta),
            Err(ProfileError::DegeneratePreferences)
        );
        assert_eq!(prefs, Preferences::new(0.0, 0.0, 0.02));
    }

    #[test]
    fn test_validate_profile() {
        let profile = LearnerProfile::with_defaults("s1", "Alex");
        assert!(profile.validate().is_ok());

        let mut bad = profile.clone();
        bad.preferences.audio = -0.1;
        assert_eq!(
            bad.validate(),
            Err(ProfileError::NegativePreference(Modality::Audio, -0.1))
        );

        let mut bad = profile.clone();
        bad.preferences = Preferences::default();
        assert_eq!(bad.validate(), Err(ProfileError::DegeneratePreferences));

        let mut bad = profile.clone();
        bad.preferences.text = f64::NAN;
        assert_eq!(
            bad.validate(),
            Err(ProfileError::NonFinitePreference(Modality::Text))
        );

        let mut bad = profile;
        bad.name = "  ".to_string();
        assert_eq!(bad.validate(), Err(ProfileError::MissingField("name")));
    }

    #[test]
    fn test_profile_json_defaults_optional_fields() {
        let profile: LearnerProfile = serde_json::from_str(
            r#"{"student_id": "s9", "name": "Sam", "preferences": {"visual": 0.5, "text": 0.5}}"#,
        )
        .unwrap();
        assert!(profile.learning_challenges.is_empty());
        assert_eq!(profile.notes, "");
        assert_eq!(profile.preferences.audio, 0.0);
    }

    #[test]
    fn test_profile_json_rejects_unknown_modality() {
        let result: Result<LearnerProfile, _> = serde_json::from_str(
            r#"{"student_id": "s9", "name": "Sam", "preferences": {"smell": 1.0}}"#,
        );
        assert!(result.is_err());

        let result: Result<LearnerProfile, _> =
            serde_json::from_str(r#"{"name": "Sam", "preferences": {"visual": 1.0}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_focus_breaks_from_challenges() {
        let mut profile = LearnerProfile::with_defaults("s1", "Alex");
        assert!(!profile.needs_focus_breaks());
        profile.learning_challenges.push(" adhd ".to_string());
        assert!(!profile.needs_focus_breaks());
        profile.learning_challenges.push("ADHD".to_string());
        assert!(profile.needs_focus_breaks());
        assert!(profile.has_challenge("dyslexia"));
    }

    #[test]
    fn test_display() {
        let profile = LearnerProfile::with_defaults("s1", "Alex");
        assert_eq!(
            profile.to_string(),
            "LearnerProfile(s1, Preferences=visual=0.60, audio=0.30, text=0.10)"
        );
    }
}
