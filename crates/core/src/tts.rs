//! Read-aloud marker for learners with a strong audio preference.
//!
//! No speech is synthesized; the marker shows where audio would be played.

/// Longest text read aloud before truncation.
const MAX_SPOKEN_CHARS: usize = 120;

pub fn describe(text: &str) -> String {
    let first_line = text.trim().lines().next().unwrap_or_default();
    let spoken = if first_line.chars().count() > MAX_SPOKEN_CHARS {
        let head: String = first_line.chars().take(MAX_SPOKEN_CHARS - 3).collect();
        format!("{head}...")
    } else {
        first_line.to_string()
    };
    format!("[TTS] Would read aloud: \"{spoken}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_read_whole() {
        assert_eq!(
            describe("  Step 1: Halves  "),
            "[TTS] Would read aloud: \"Step 1: Halves\""
        );
    }

    #[test]
    fn test_only_first_line_is_read() {
        assert_eq!(
            describe("first\nsecond"),
            "[TTS] Would read aloud: \"first\""
        );
    }

    #[test]
    fn test_long_text_is_truncated() {
        let long = "é".repeat(150);
        let marker = describe(&long);
        let expected = format!("[TTS] Would read aloud: \"{}...\"", "é".repeat(117));
        assert_eq!(marker, expected);

        let exact = "a".repeat(120);
        assert_eq!(describe(&exact), format!("[TTS] Would read aloud: \"{exact}\""));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(describe("   "), "[TTS] Would read aloud: \"\"");
    }
}
