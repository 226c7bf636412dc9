use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{
    difficulty::Difficulty, quiz_attempt::QuizResult, quiz_question::QuizQuestion,
};

/// Selected option per question, keyed by 1-based position.
pub type AnswerSet = BTreeMap<usize, String>;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: Uuid,
    pub topic: String,
    pub difficulty: Difficulty,
    pub questions: Vec<QuizQuestion>,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    pub fn new(topic: &str, difficulty: Difficulty, questions: Vec<QuizQuestion>) -> Self {
        Quiz {
            id: Uuid::new_v4(),
            topic: topic.to_string(),
            difficulty,
            questions,
            created_at: Utc::now(),
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Question at a 1-based position.
    pub fn question_at(&self, position: usize) -> Option<&QuizQuestion> {
        position
            .checked_sub(1)
            .and_then(|index| self.questions.get(index))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    NoQuiz,
    InProgress,
    Submitted,
}

/// The quiz currently shown to a session together with its answers.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ActiveQuiz {
    pub quiz: Quiz,
    pub answers: AnswerSet,
    pub result: Option<QuizResult>,
}

impl ActiveQuiz {
    pub fn new(quiz: Quiz) -> Self {
        ActiveQuiz {
            quiz,
            answers: AnswerSet::new(),
            result: None,
        }
    }

    pub fn submitted(&self) -> bool {
        self.result.is_some()
    }

    pub fn answered_count(&self) -> usize {
        (1..=self.quiz.question_count())
            .filter(|position| self.answers.contains_key(position))
            .count()
    }

    pub fn is_fully_answered(&self) -> bool {
        self.answered_count() == self.quiz.question_count()
    }
}
