use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{
    difficulty::Difficulty,
    quiz::{ActiveQuiz, QuizPhase},
};

/// Everything one user session knows. Lives in memory only.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SessionState {
    pub id: Uuid,
    pub topic: String,
    pub difficulty: Difficulty,
    pub checklist: Vec<String>,
    pub progress: HashMap<String, bool>,
    pub video_links: HashMap<String, String>,
    pub quiz: Option<ActiveQuiz>,
    pub quiz_scores: Vec<f64>,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        let now = Utc::now();
        SessionState {
            id: Uuid::new_v4(),
            topic: String::new(),
            difficulty: Difficulty::default(),
            checklist: Vec::new(),
            progress: HashMap::new(),
            video_links: HashMap::new(),
            quiz: None,
            quiz_scores: Vec::new(),
            created_at: now,
            last_active_at: now,
        }
    }

    pub fn has_checklist(&self) -> bool {
        !self.checklist.is_empty()
    }

    pub fn is_completed(&self, item: &str) -> bool {
        self.progress.get(item).copied().unwrap_or(false)
    }

    pub fn completed_count(&self) -> usize {
        self.progress.values().filter(|done| **done).count()
    }

    /// Items not yet marked complete, in checklist order.
    pub fn incomplete_items(&self) -> Vec<String> {
        self.checklist
            .iter()
            .filter(|item| !self.is_completed(item))
            .cloned()
            .collect()
    }

    pub fn progress_percent(&self) -> f64 {
        let total = self.progress.len();
        if total == 0 {
            return 0.0;
        }
        self.completed_count() as f64 / total as f64 * 100.0
    }

    pub fn quiz_phase(&self) -> QuizPhase {
        match &self.quiz {
            None => QuizPhase::NoQuiz,
            Some(active) if active.submitted() => QuizPhase::Submitted,
            Some(_) => QuizPhase::InProgress,
        }
    }

    pub fn average_quiz_score(&self) -> Option<f64> {
        if self.quiz_scores.is_empty() {
            return None;
        }
        Some(self.quiz_scores.iter().sum::<f64>() / self.quiz_scores.len() as f64)
    }

    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
