use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    Excellent,
    Good,
    KeepStudying,
}

impl PerformanceBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            PerformanceBand::Excellent
        } else if percentage >= 60.0 {
            PerformanceBand::Good
        } else {
            PerformanceBand::KeepStudying
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PerformanceBand::Excellent => "Excellent!",
            PerformanceBand::Good => "Good job!",
            PerformanceBand::KeepStudying => "Keep studying!",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub band: PerformanceBand,
    pub questions: Vec<QuestionResult>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionResult {
    pub position: usize,
    pub question: String,
    pub topic: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}
