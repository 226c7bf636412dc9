use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    models::domain::{
        ActiveQuiz, Difficulty, Notice, PerformanceBand, QuizPhase, QuizResult, SessionState,
    },
    services::session_service::ActionOutcome,
};

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistItemView {
    pub item: String,
    pub completed: bool,
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressView {
    pub completed: usize,
    pub remaining: usize,
    pub total: usize,
    pub percent: f64,
}

impl From<&SessionState> for ProgressView {
    fn from(session: &SessionState) -> Self {
        let total = session.progress.len();
        let completed = session.completed_count();
        ProgressView {
            completed,
            remaining: total - completed,
            total,
            percent: session.progress_percent(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub topic: String,
    pub difficulty: Difficulty,
    pub checklist: Vec<ChecklistItemView>,
    pub progress: ProgressView,
    pub quiz_phase: QuizPhase,
    pub quiz_scores: Vec<f64>,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl From<&SessionState> for SessionView {
    fn from(session: &SessionState) -> Self {
        SessionView {
            id: session.id,
            topic: session.topic.clone(),
            difficulty: session.difficulty,
            checklist: session
                .checklist
                .iter()
                .map(|item| ChecklistItemView {
                    item: item.clone(),
                    completed: session.is_completed(item),
                    video_url: session.video_links.get(item).cloned(),
                })
                .collect(),
            progress: ProgressView::from(session),
            quiz_phase: session.quiz_phase(),
            quiz_scores: session.quiz_scores.clone(),
            created_at: session.created_at,
            last_active_at: session.last_active_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestionView {
    pub position: usize,
    pub question: String,
    pub options: Vec<String>,
    pub topic: String,
    pub selected: Option<String>,
    /// Only present once the quiz has been submitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizView {
    pub id: Uuid,
    pub topic: String,
    pub difficulty: Difficulty,
    pub phase: QuizPhase,
    pub questions: Vec<QuizQuestionView>,
    pub answered: usize,
    pub total: usize,
    pub result: Option<QuizResult>,
}

impl From<&ActiveQuiz> for QuizView {
    fn from(active: &ActiveQuiz) -> Self {
        let submitted = active.submitted();
        QuizView {
            id: active.quiz.id,
            topic: active.quiz.topic.clone(),
            difficulty: active.quiz.difficulty,
            phase: if submitted {
                QuizPhase::Submitted
            } else {
                QuizPhase::InProgress
            },
            questions: active
                .quiz
                .questions
                .iter()
                .enumerate()
                .map(|(index, question)| QuizQuestionView {
                    position: index + 1,
                    question: question.question.clone(),
                    options: question.options.clone(),
                    topic: question.topic.clone(),
                    selected: active.answers.get(&(index + 1)).cloned(),
                    correct: submitted.then(|| question.correct.clone()),
                })
                .collect(),
            answered: active.answered_count(),
            total: active.quiz.question_count(),
            result: active.result.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizStateResponse {
    pub phase: QuizPhase,
    pub quiz: Option<QuizView>,
}

impl From<&SessionState> for QuizStateResponse {
    fn from(session: &SessionState) -> Self {
        QuizStateResponse {
            phase: session.quiz_phase(),
            quiz: session.quiz.as_ref().map(QuizView::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    pub session: SessionView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz: Option<QuizView>,
    pub notices: Vec<Notice>,
}

impl From<ActionOutcome> for ActionResponse {
    fn from(outcome: ActionOutcome) -> Self {
        ActionResponse {
            session: SessionView::from(&outcome.session),
            quiz: outcome.session.quiz.as_ref().map(QuizView::from),
            notices: outcome.notices,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardItemView {
    pub topic: String,
    pub completed: bool,
    pub progress: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePoint {
    pub quiz_number: usize,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizPerformanceView {
    pub quizzes_taken: usize,
    pub average_score: f64,
    pub band: PerformanceBand,
    pub trend: Vec<ScorePoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub topic: String,
    pub progress: ProgressView,
    pub items: Vec<DashboardItemView>,
    pub quiz_performance: Option<QuizPerformanceView>,
    pub notices: Vec<Notice>,
}

impl From<&SessionState> for DashboardView {
    fn from(session: &SessionState) -> Self {
        let notices = if session.has_checklist() {
            Vec::new()
        } else {
            vec![Notice::info(
                "Please generate a study checklist first to view your progress!",
            )]
        };

        let quiz_performance = session.average_quiz_score().map(|average| QuizPerformanceView {
            quizzes_taken: session.quiz_scores.len(),
            average_score: average,
            band: PerformanceBand::from_percentage(average),
            trend: session
                .quiz_scores
                .iter()
                .enumerate()
                .map(|(index, score)| ScorePoint {
                    quiz_number: index + 1,
                    score: *score,
                })
                .collect(),
        });

        DashboardView {
            topic: session.topic.clone(),
            progress: ProgressView::from(session),
            items: session
                .checklist
                .iter()
                .map(|item| {
                    let completed = session.is_completed(item);
                    DashboardItemView {
                        topic: item.clone(),
                        completed,
                        progress: if completed { "100%" } else { "0%" },
                    }
                })
                .collect(),
            quiz_performance,
            notices,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}
