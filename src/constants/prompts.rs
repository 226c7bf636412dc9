use crate::models::domain::Difficulty;

pub const STRUCTURED_CHECKLIST_SUFFIX: &str =
    "Respond with a JSON object of the form {\"items\": [\"...\"]} and nothing else.";

pub const STRUCTURED_QUESTION_SUFFIX: &str = "Respond with a JSON object of the form {\"question\": \"...\", \"options\": [\"...\", \"...\", \"...\", \"...\"], \"correct\": \"<letter>\"} and nothing else.";

/// Prompt asking for 8-12 actionable study items for `topic`.
pub fn checklist_prompt(topic: &str) -> String {
    format!(
        "Generate a comprehensive checklist (8-12 items) of key topics for studying {}. \
         Make each item specific and actionable.",
        topic
    )
}

/// Prompt asking for one four-option multiple choice question about `subtopic`.
///
/// The reply format below is what `parse_quiz_question` understands:
/// line 0 is the question, the next four non-blank lines are `A) `-style
/// options and a `Correct: <letter>` line names the answer.
pub fn quiz_question_prompt(topic: &str, subtopic: &str, difficulty: Difficulty) -> String {
    format!(
        "Create a {difficulty}-difficulty multiple choice question about '{subtopic}' in the context of {topic}.\n\
         Make it educational and relevant. Return in this exact format:\n\
         Question: [question text]\n\
         A) [option 1]\n\
         B) [option 2]\n\
         C) [option 3]\n\
         D) [option 4]\n\
         Correct: [correct option letter]"
    )
}

pub fn with_structured_suffix(prompt: String, suffix: &str) -> String {
    format!("{}\n\n{}", prompt, suffix)
}
