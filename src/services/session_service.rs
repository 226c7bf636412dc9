use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    constants::DEFAULT_QUESTION_COUNT,
    errors::{AppError, AppResult},
    models::domain::{Difficulty, Notice, QuizSource, SessionState},
    repositories::{SessionRepository, SharedSession},
    services::{
        checklist_service::ChecklistService,
        quiz_service::{select_items, source_pool, QuizService},
        session_transitions::{apply, SessionAction},
    },
};

/// Session after an action plus the messages to show for it.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub session: SessionState,
    pub notices: Vec<Notice>,
}

impl ActionOutcome {
    fn quiet(session: SessionState) -> Self {
        Self {
            session,
            notices: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOptions {
    pub difficulty: Difficulty,
    pub question_count: usize,
    pub source: QuizSource,
}

impl Default for QuizOptions {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            question_count: DEFAULT_QUESTION_COUNT,
            source: QuizSource::default(),
        }
    }
}

/// Runs session actions: performs the external calls an action needs, then
/// applies the matching pure transition under the session's lock.
pub struct SessionService {
    repository: Arc<dyn SessionRepository>,
    checklist_service: Arc<ChecklistService>,
    quiz_service: Arc<QuizService>,
}

impl SessionService {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        checklist_service: Arc<ChecklistService>,
        quiz_service: Arc<QuizService>,
    ) -> Self {
        Self {
            repository,
            checklist_service,
            quiz_service,
        }
    }

    pub async fn create_session(&self) -> AppResult<SessionState> {
        self.repository.create(SessionState::new()).await
    }

    pub async fn get_session(&self, id: &Uuid) -> AppResult<SessionState> {
        let handle = self.handle(id).await?;
        let state = handle.lock().await;
        Ok(state.clone())
    }

    pub async fn end_session(&self, id: &Uuid) -> AppResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(session_not_found(id))
        }
    }

    pub async fn generate_checklist(&self, id: &Uuid, topic: &str) -> AppResult<ActionOutcome> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AppError::ValidationError("Please enter a topic.".to_string()));
        }

        let handle = self.handle(id).await?;
        let mut state = handle.lock().await;

        let draft = self.checklist_service.draft_checklist(topic).await;
        if draft.items.is_empty() {
            // Previous checklist stays as it was
            state.touch();
            return Ok(ActionOutcome {
                session: state.clone(),
                notices: draft.notices,
            });
        }

        let session = commit(
            &mut state,
            SessionAction::ChecklistGenerated {
                topic: topic.to_string(),
                items: draft.items,
                video_links: draft.video_links,
            },
        )?;
        Ok(ActionOutcome {
            session,
            notices: draft.notices,
        })
    }

    pub async fn set_item_completed(
        &self,
        id: &Uuid,
        item: &str,
        completed: bool,
    ) -> AppResult<ActionOutcome> {
        self.transition(
            id,
            SessionAction::SetItemCompleted {
                item: item.to_string(),
                completed,
            },
        )
        .await
        .map(ActionOutcome::quiet)
    }

    pub async fn reset_progress(&self, id: &Uuid) -> AppResult<ActionOutcome> {
        let session = self.transition(id, SessionAction::ResetProgress).await?;
        Ok(ActionOutcome {
            session,
            notices: vec![Notice::success("Progress reset successfully!")],
        })
    }

    pub async fn clear_checklist(&self, id: &Uuid) -> AppResult<ActionOutcome> {
        self.transition(id, SessionAction::ClearChecklist)
            .await
            .map(ActionOutcome::quiet)
    }

    pub async fn generate_quiz(&self, id: &Uuid, options: QuizOptions) -> AppResult<ActionOutcome> {
        let handle = self.handle(id).await?;
        let mut state = handle.lock().await;

        if !state.has_checklist() {
            return Err(AppError::InvalidState(
                "Please generate a study checklist first to take quizzes!".to_string(),
            ));
        }

        let pool = source_pool(&state.checklist, state.incomplete_items(), options.source);
        if pool.is_empty() {
            return Err(AppError::InvalidState(
                "No topics available for this quiz type!".to_string(),
            ));
        }

        let items = {
            let mut rng = rand::rng();
            select_items(&pool, options.question_count, options.source, &mut rng)
        };

        let topic = state.topic.clone();
        let (quiz, notices) = self
            .quiz_service
            .generate_quiz(&topic, &items, options.difficulty)
            .await;

        let session = commit(
            &mut state,
            SessionAction::StartQuiz {
                quiz,
                difficulty: options.difficulty,
            },
        )?;
        Ok(ActionOutcome { session, notices })
    }

    pub async fn select_answer(
        &self,
        id: &Uuid,
        position: usize,
        option: &str,
    ) -> AppResult<ActionOutcome> {
        self.transition(
            id,
            SessionAction::SelectAnswer {
                position,
                option: option.to_string(),
            },
        )
        .await
        .map(ActionOutcome::quiet)
    }

    pub async fn submit_quiz(&self, id: &Uuid) -> AppResult<ActionOutcome> {
        let session = self.transition(id, SessionAction::SubmitQuiz).await?;
        let notices = session
            .quiz
            .as_ref()
            .and_then(|active| active.result.as_ref())
            .map(|result| {
                vec![Notice::info(format!(
                    "Your Score: {}/{} ({:.1}%) {}",
                    result.score,
                    result.total,
                    result.percentage,
                    result.band.message()
                ))]
            })
            .unwrap_or_default();
        Ok(ActionOutcome { session, notices })
    }

    pub async fn retake_quiz(&self, id: &Uuid) -> AppResult<ActionOutcome> {
        let handle = self.handle(id).await?;
        let mut state = handle.lock().await;

        let question_count = match &state.quiz {
            Some(active) if active.submitted() => active.quiz.question_count(),
            Some(_) => {
                return Err(AppError::InvalidState(
                    "Submit the current quiz before retaking it".to_string(),
                ))
            }
            None => return Err(AppError::InvalidState("No quiz to retake".to_string())),
        };
        if !state.has_checklist() {
            return Err(AppError::InvalidState(
                "Please generate a study checklist first to take quizzes!".to_string(),
            ));
        }

        let items = {
            let mut rng = rand::rng();
            select_items(&state.checklist, question_count, QuizSource::Random, &mut rng)
        };

        let topic = state.topic.clone();
        let (quiz, notices) = self
            .quiz_service
            .generate_quiz(&topic, &items, state.difficulty)
            .await;

        let session = commit(&mut state, SessionAction::RetakeQuiz { quiz })?;
        Ok(ActionOutcome { session, notices })
    }

    pub async fn close_quiz(&self, id: &Uuid) -> AppResult<ActionOutcome> {
        self.transition(id, SessionAction::CloseQuiz)
            .await
            .map(ActionOutcome::quiet)
    }

    pub async fn purge_idle_sessions(&self, idle_minutes: i64) -> AppResult<usize> {
        let cutoff = Utc::now() - Duration::minutes(idle_minutes);
        self.repository.purge_idle(cutoff).await
    }

    async fn handle(&self, id: &Uuid) -> AppResult<SharedSession> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| session_not_found(id))
    }

    async fn transition(&self, id: &Uuid, action: SessionAction) -> AppResult<SessionState> {
        let handle = self.handle(id).await?;
        let mut state = handle.lock().await;
        commit(&mut state, action)
    }
}

/// Apply `action` to a copy and only store it when the transition succeeds.
fn commit(state: &mut SessionState, action: SessionAction) -> AppResult<SessionState> {
    let mut next = apply(state.clone(), action)?;
    next.touch();
    *state = next.clone();
    Ok(next)
}

fn session_not_found(id: &Uuid) -> AppError {
    AppError::NotFound(format!("Session '{}' not found", id))
}
