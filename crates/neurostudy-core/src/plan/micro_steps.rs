//! Fixed micro-step templates for a study task.

/// Break a task into micro-steps.
///
/// The short template has 5 steps and the detailed one has 16. The title is
/// substituted into the step that names the materials. The output is
/// deterministic.
pub fn generate_micro_steps(title: &str, detailed: bool) -> Vec<String> {
    let open = format!("Open {title} materials");

    if detailed {
        return vec![
            "Find a quiet spot to study".to_string(),
            open,
            "Take 3 deep breaths".to_string(),
            "Read the first paragraph of the summary".to_string(),
            "Pause and think about what you read".to_string(),
            "Continue reading the rest of the summary".to_string(),
            "Look at the first key point".to_string(),
            "Try to explain it in your own words".to_string(),
            "Continue with remaining key points".to_string(),
            "Open the practice questions".to_string(),
            "Read the first question carefully".to_string(),
            "Try to answer without looking at options".to_string(),
            "Check your answer".to_string(),
            "Continue with remaining questions".to_string(),
            "Write down any concepts you need to revisit".to_string(),
            "Take a moment to celebrate your progress!".to_string(),
        ];
    }

    vec![
        open,
        "Read the summary".to_string(),
        "Review key points".to_string(),
        "Attempt practice questions".to_string(),
        "Note any doubts".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_template() {
        let steps = generate_micro_steps("Algebra", false);
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0], "Open Algebra materials");
        assert_eq!(steps[4], "Note any doubts");
    }

    #[test]
    fn detailed_template() {
        let steps = generate_micro_steps("Algebra", true);
        assert_eq!(steps.len(), 16);
        assert_eq!(steps[1], "Open Algebra materials");
        assert_eq!(steps[15], "Take a moment to celebrate your progress!");
    }

    #[test]
    fn deterministic() {
        assert_eq!(
            generate_micro_steps("The Tsunami", true),
            generate_micro_steps("The Tsunami", true)
        );
    }
}
