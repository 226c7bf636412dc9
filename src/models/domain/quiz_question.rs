use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_QUESTION: &str = "Sample question";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct: String, // one of `options`, never an index
    pub topic: String,   // checklist item the question was generated from
}

impl QuizQuestion {
    pub fn new(question: String, options: Vec<String>, correct: String, topic: &str) -> Self {
        QuizQuestion {
            question,
            options,
            correct,
            topic: topic.to_string(),
        }
    }

    /// Stand-in used when generating or parsing a question fails.
    pub fn placeholder(topic: &str) -> Self {
        QuizQuestion {
            question: PLACEHOLDER_QUESTION.to_string(),
            options: ["A", "B", "C", "D"].iter().map(|o| o.to_string()).collect(),
            correct: "A".to_string(),
            topic: topic.to_string(),
        }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct == answer
    }
}
