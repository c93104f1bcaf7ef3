//! Session Report
//!
//! Renders a plain-text summary of a session for parents and teachers.

use crate::{
    analytics::SessionStats,
    profile::{LearnerProfile, Modality},
    session_log::SessionLog,
};

/// Longest excerpt quoted from a difficult step.
const SNIPPET_CHARS: usize = 200;

pub fn render_report(profile: &LearnerProfile, log: &SessionLog) -> String {
    let stats = SessionStats::from_log(log);
    let accuracy = stats.accuracy() * 100.0;
    let hint_rate = stats.hint_rate() * 100.0;
    let name = &profile.name;

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("Report for {} (ID: {})", name, profile.student_id));
    lines.push("-".repeat(60));

    lines.push("Session Overview".to_string());
    let challenges = if profile.learning_challenges.is_empty() {
        "None reported".to_string()
    } else {
        profile.learning_challenges.join(", ")
    };
    lines.push(format!("- Learning challenges: {challenges}"));
    lines.push(format!("- Modality preferences: {}", profile.preferences));
    lines.push(format!(
        "- Steps marked understood: {}/{} ({:.1}%)",
        stats.correct, stats.total, accuracy
    ));
    lines.push(format!(
        "- Steps where a hint was used: {}/{} ({:.1}%)",
        stats.hinted, stats.total, hint_rate
    ));
    lines.push(String::new());

    lines.push("Strengths".to_string());
    if accuracy >= 80.0 {
        lines.push(format!(
            "- {name} understood most of the steps. The current explanation style seems effective."
        ));
    } else {
        lines.push(format!(
            "- {name} stayed engaged even when some steps were difficult. This persistence is a strength."
        ));
    }
    if profile.preferences.get(Modality::Visual) >= 0.5 {
        lines.push("- Visual explanations (diagrams, imagery) are likely especially helpful.".to_string());
    }
    if profile.preferences.get(Modality::Audio) >= 0.5 {
        lines.push(
            "- Hearing explanations aloud or via read-aloud tools may further support understanding."
                .to_string(),
        );
    }
    lines.push(String::new());

    lines.push("Challenges Observed".to_string());
    match log.iter().find(|r| !r.feedback.is_correct()) {
        Some(hardest) => {
            let snippet: String = hardest.content.chars().take(SNIPPET_CHARS).collect();
            lines.push(format!(
                "- At least one step was marked as difficult. Here is an example of a challenging step:\n  \"{snippet}...\""
            ));
        }
        None => lines.push("- No specific steps were marked as difficult in this session.".to_string()),
    }
    lines.push(String::new());

    lines.push("Suggestions for Parents / Teachers".to_string());
    if profile.has_challenge("dyslexia") {
        lines.push(
            "- Continue using short, well-spaced text with clear structure. \
             Pair reading with visuals such as fraction circles or number lines."
                .to_string(),
        );
    }
    if profile.has_challenge("adhd") {
        lines.push(
            "- Short learning blocks with frequent micro-breaks are likely helpful. \
             Consider 10-15 minute focused sessions with movement breaks in between."
                .to_string(),
        );
    }
    if profile.has_challenge("autism") {
        lines.push(
            "- Keep explanations precise and consistent. \
             Avoid ambiguous phrasing and sudden changes in routine."
                .to_string(),
        );
    }
    if profile.learning_challenges.is_empty() {
        lines.push(
            "- Reinforce the key ideas from this session with a quick review later in the day."
                .to_string(),
        );
    }
    lines.push(
        "- Ask the learner to explain the concept back in their own words; \
         this often reveals their depth of understanding."
            .to_string(),
    );
    lines.push(String::new());

    lines.push("Session Step Log".to_string());
    for record in log {
        let mut line = format!("- Step {}: {}", record.step_id, record.feedback);
        if record.hint_used {
            line.push_str(" (hint used)");
        }
        lines.push(line);
    }

    lines.join("\n")
}
