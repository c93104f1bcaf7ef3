//! Session Analytics
//!
//! Summarizes a finished session. The effective score is what drives the
//! preference update at the end of a session.

use crate::session_log::SessionLog;

/// Weight of hint reliance subtracted from raw accuracy.
pub const HINT_PENALTY: f64 = 0.3;

/// Aggregate counts over a session log.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionStats {
    pub total: usize,
    pub correct: usize,
    pub hinted: usize,
}

impl SessionStats {
    pub fn from_log(log: &SessionLog) -> Self {
        log.iter().fold(Self::default(), |mut stats, record| {
            stats.total += 1;
            if record.feedback.is_correct() {
                stats.correct += 1;
            }
            if record.hint_used {
                stats.hinted += 1;
            }
            stats
        })
    }

    /// Fraction of steps understood, `0.0` for an empty session.
    pub fn accuracy(&self) -> f64 {
        ratio(self.correct, self.total)
    }

    /// Fraction of steps where a hint was shown, `0.0` for an empty session.
    pub fn hint_rate(&self) -> f64 {
        ratio(self.hinted, self.total)
    }
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

/// Accuracy discounted by hint reliance, floored at zero.
///
/// An empty log scores `0.0`.
pub fn effective_score(log: &SessionLog) -> f64 {
    let stats = SessionStats::from_log(log);
    if stats.total == 0 {
        return 0.0;
    }
    (stats.accuracy() - HINT_PENALTY * stats.hint_rate()).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Feedback;
    use approx::assert_relative_eq;

    fn log_of(entries: &[(Feedback, bool)]) -> SessionLog {
        let mut log = SessionLog::new();
        for (i, (feedback, hint)) in entries.iter().enumerate() {
            log.log_interaction(format!("Step {}", i + 1), *feedback, Some("x"), *hint);
        }
        log
    }

    #[test]
    fn test_empty_log_scores_zero() {
        assert_eq!(effective_score(&SessionLog::new()), 0.0);
        let stats = SessionStats::from_log(&SessionLog::new());
        assert_eq!(stats.accuracy(), 0.0);
        assert_eq!(stats.hint_rate(), 0.0);
    }

    #[test]
    fn test_hints_discount_accuracy() {
        let mut entries = vec![(Feedback::Correct, false); 8];
        entries.extend([(Feedback::Incorrect, true); 2]);
        let log = log_of(&entries);

        assert_relative_eq!(effective_score(&log), 0.74, epsilon = 1e-9);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let log = log_of(&[(Feedback::Incorrect, true), (Feedback::Incorrect, true)]);
        assert_eq!(effective_score(&log), 0.0);
    }

    #[test]
    fn test_perfect_session_without_hints() {
        let log = log_of(&[(Feedback::Correct, false); 4]);
        assert_relative_eq!(effective_score(&log), 1.0);
    }

    #[test]
    fn test_stats_counts() {
        let log = log_of(&[
            (Feedback::Correct, true),
            (Feedback::Incorrect, false),
            (Feedback::Correct, false),
            (Feedback::Incorrect, true),
        ]);
        let stats = SessionStats::from_log(&log);
        assert_eq!(
            stats,
            SessionStats {
                total: 4,
                correct: 2,
                hinted: 2
            }
        );
        assert_relative_eq!(stats.accuracy(), 0.5);
        assert_relative_eq!(stats.hint_rate(), 0.5);
        assert_relative_eq!(effective_score(&log), 0.35, epsilon = 1e-9);
    }
}
