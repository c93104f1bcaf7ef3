//! Visual aid suggestions for learners who respond well to imagery.

/// Returns a short picture the learner can draw or imagine for a step.
///
/// Topic keywords take precedence over step keywords.
pub fn describe(topic: &str, step_text: &str) -> &'static str {
    if topic.to_lowercase().contains("fraction") {
        return "Visual idea: Imagine a pizza cut into equal slices. \
                Shade the slices that the fraction is talking about.";
    }
    if step_text.to_lowercase().contains("number line") {
        return "Visual idea: Draw a straight line, mark 0 at the left, 1 at the right, \
                and place evenly spaced tick marks in between.";
    }
    "Visual idea: Draw a simple picture or diagram that shows this idea. \
     Labels should be large and clear, with plenty of space between words."
}
