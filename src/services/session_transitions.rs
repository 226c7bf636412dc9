//! Session state machine as pure `(SessionState, SessionAction) -> SessionState`
//! functions. External calls happen before an action is built; a rejected
//! action returns an error and the caller keeps the previous state.

use std::collections::HashMap;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{ActiveQuiz, Difficulty, Quiz, SessionState},
    services::quiz_attempt_service::QuizAttemptService,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    ChecklistGenerated {
        topic: String,
        items: Vec<String>,
        video_links: HashMap<String, String>,
    },
    SetItemCompleted {
        item: String,
        completed: bool,
    },
    ResetProgress,
    ClearChecklist,
    StartQuiz {
        quiz: Quiz,
        difficulty: Difficulty,
    },
    SelectAnswer {
        position: usize,
        option: String,
    },
    SubmitQuiz,
    RetakeQuiz {
        quiz: Quiz,
    },
    CloseQuiz,
}

pub fn apply(state: SessionState, action: SessionAction) -> AppResult<SessionState> {
    match action {
        SessionAction::ChecklistGenerated {
            topic,
            items,
            video_links,
        } => replace_checklist(state, topic, items, video_links),
        SessionAction::SetItemCompleted { item, completed } => {
            set_item_completed(state, &item, completed)
        }
        SessionAction::ResetProgress => Ok(reset_progress(state)),
        SessionAction::ClearChecklist => Ok(clear_checklist(state)),
        SessionAction::StartQuiz { quiz, difficulty } => start_quiz(state, quiz, difficulty),
        SessionAction::SelectAnswer { position, option } => select_answer(state, position, option),
        SessionAction::SubmitQuiz => submit_quiz(state),
        SessionAction::RetakeQuiz { quiz } => retake_quiz(state, quiz),
        SessionAction::CloseQuiz => Ok(close_quiz(state)),
    }
}

fn replace_checklist(
    mut state: SessionState,
    topic: String,
    items: Vec<String>,
    video_links: HashMap<String, String>,
) -> AppResult<SessionState> {
    if items.is_empty() {
        return Err(AppError::InvalidState(
            "Cannot replace the checklist with an empty one".to_string(),
        ));
    }

    state.progress = items.iter().map(|item| (item.clone(), false)).collect();
    state.video_links = video_links
        .into_iter()
        .filter(|(item, _)| state.progress.contains_key(item))
        .collect();
    state.checklist = items;
    state.topic = topic;
    state.quiz = None;
    Ok(state)
}

fn set_item_completed(
    mut state: SessionState,
    item: &str,
    completed: bool,
) -> AppResult<SessionState> {
    let flag = state
        .progress
        .get_mut(item)
        .ok_or_else(|| AppError::NotFound(format!("Checklist item '{}' not found", item)))?;
    *flag = completed;
    Ok(state)
}

fn reset_progress(mut state: SessionState) -> SessionState {
    state.progress = state
        .checklist
        .iter()
        .map(|item| (item.clone(), false))
        .collect();
    state
}

fn clear_checklist(mut state: SessionState) -> SessionState {
    state.checklist.clear();
    state.progress.clear();
    state.video_links.clear();
    state
}

fn start_quiz(
    mut state: SessionState,
    quiz: Quiz,
    difficulty: Difficulty,
) -> AppResult<SessionState> {
    if !state.has_checklist() {
        return Err(AppError::InvalidState(
            "Please generate a study checklist first to take quizzes!".to_string(),
        ));
    }
    if quiz.questions.is_empty() {
        return Err(AppError::InvalidState("Quiz has no questions".to_string()));
    }

    state.difficulty = difficulty;
    state.quiz = Some(ActiveQuiz::new(quiz));
    Ok(state)
}

fn select_answer(
    mut state: SessionState,
    position: usize,
    option: String,
) -> AppResult<SessionState> {
    let active = in_progress_quiz(&mut state)?;

    let question = active.quiz.question_at(position).ok_or_else(|| {
        AppError::ValidationError(format!(
            "Question {} does not exist (quiz has {} questions)",
            position,
            active.quiz.question_count()
        ))
    })?;
    if !question.has_option(&option) {
        return Err(AppError::ValidationError(format!(
            "'{}' is not an option for question {}",
            option, position
        )));
    }

    active.answers.insert(position, option);
    Ok(state)
}

fn submit_quiz(mut state: SessionState) -> AppResult<SessionState> {
    let active = in_progress_quiz(&mut state)?;

    if !active.is_fully_answered() {
        return Err(AppError::IncompleteSubmission {
            answered: active.answered_count(),
            total: active.quiz.question_count(),
        });
    }

    let result = QuizAttemptService::grade_attempt(&active.quiz, &active.answers)?;
    let percentage = result.percentage;
    active.result = Some(result);
    state.quiz_scores.push(percentage);
    Ok(state)
}

fn retake_quiz(mut state: SessionState, quiz: Quiz) -> AppResult<SessionState> {
    match &state.quiz {
        Some(active) if active.submitted() => {}
        Some(_) => {
            return Err(AppError::InvalidState(
                "Submit the current quiz before retaking it".to_string(),
            ))
        }
        None => return Err(AppError::InvalidState("No quiz to retake".to_string())),
    }
    if quiz.questions.is_empty() {
        return Err(AppError::InvalidState("Quiz has no questions".to_string()));
    }

    state.quiz = Some(ActiveQuiz::new(quiz));
    Ok(state)
}

fn close_quiz(mut state: SessionState) -> SessionState {
    state.quiz = None;
    state
}

fn in_progress_quiz(state: &mut SessionState) -> AppResult<&mut ActiveQuiz> {
    let active = state
        .quiz
        .as_mut()
        .ok_or_else(|| AppError::InvalidState("No quiz in progress".to_string()))?;
    if active.submitted() {
        return Err(AppError::InvalidState("Quiz already submitted".to_string()));
    }
    Ok(active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::domain::QuizPhase, test_utils::fixtures};

    fn with_checklist(count: usize) -> SessionState {
        let items = fixtures::checklist_items(count);
        apply(
            SessionState::new(),
            SessionAction::ChecklistGenerated {
                topic: "Linear Algebra".to_string(),
                items,
                video_links: HashMap::new(),
            },
        )
        .expect("checklist should apply")
    }

    fn with_quiz(questions: usize) -> SessionState {
        apply(
            with_checklist(10),
            SessionAction::StartQuiz {
                quiz: fixtures::quiz_with_questions(questions),
                difficulty: Difficulty::Hard,
            },
        )
        .expect("quiz should start")
    }

    fn answer(state: SessionState, position: usize, option: &str) -> SessionState {
        apply(
            state,
            SessionAction::SelectAnswer {
                position,
                option: option.to_string(),
            },
        )
        .expect("answer should apply")
    }

    #[test]
    fn test_checklist_generation_resets_progress_and_clears_quiz() {
        let mut links = HashMap::new();
        links.insert("Checklist item 1".to_string(), "https://v/1".to_string());
        links.insert("Stale item".to_string(), "https://v/stale".to_string());

        let state = with_quiz(3);
        let state = apply(
            state,
            SessionAction::ChecklistGenerated {
                topic: "Calculus".to_string(),
                items: fixtures::checklist_items(4),
                video_links: links,
            },
        )
        .expect("should apply");

        assert_eq!(state.topic, "Calculus");
        assert_eq!(state.checklist.len(), 4);
        assert_eq!(state.progress.len(), 4);
        assert!(state.checklist.iter().all(|item| state.progress.get(item) == Some(&false)));
        assert_eq!(state.video_links.len(), 1);
        assert_eq!(state.quiz_phase(), QuizPhase::NoQuiz);
    }

    #[test]
    fn test_empty_checklist_is_rejected() {
        let result = apply(
            with_checklist(3),
            SessionAction::ChecklistGenerated {
                topic: "Other".to_string(),
                items: vec![],
                video_links: HashMap::new(),
            },
        );

        assert!(matches!(result, Err(AppError::InvalidState(_))));
    }

    #[test]
    fn test_toggle_is_idempotent_and_leaves_everything_else() {
        let state = with_quiz(2);
        let item = state.checklist[2].clone();
        let action = SessionAction::SetItemCompleted {
            item: item.clone(),
            completed: true,
        };

        let once = apply(state.clone(), action.clone()).expect("toggle");
        let twice = apply(once.clone(), action).expect("toggle again");

        assert_eq!(once, twice);
        assert!(twice.is_completed(&item));
        assert_eq!(twice.checklist, state.checklist);
        assert_eq!(twice.quiz, state.quiz);
    }

    #[test]
    fn test_toggle_unknown_item_is_not_found() {
        let result = apply(
            with_checklist(2),
            SessionAction::SetItemCompleted {
                item: "Not on the list".to_string(),
                completed: true,
            },
        );

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_reset_then_regenerate_scenario() {
        let state = with_checklist(10);
        let third = state.checklist[2].clone();
        let state = apply(
            state,
            SessionAction::SetItemCompleted {
                item: third.clone(),
                completed: true,
            },
        )
        .expect("toggle");
        assert!(state.is_completed(&third));
        let checklist_before = state.checklist.clone();

        let state = apply(state, SessionAction::ResetProgress).expect("reset");
        assert_eq!(state.checklist, checklist_before);
        assert_eq!(state.progress.len(), 10);
        assert!(state.progress.values().all(|done| !done));

        let state = apply(state, SessionAction::ClearChecklist).expect("clear");
        assert!(state.checklist.is_empty());
        assert!(state.progress.is_empty());
    }

    #[test]
    fn test_start_quiz_requires_checklist() {
        let result = apply(
            SessionState::new(),
            SessionAction::StartQuiz {
                quiz: fixtures::quiz_with_questions(3),
                difficulty: Difficulty::Easy,
            },
        );

        assert!(matches!(result, Err(AppError::InvalidState(_))));
    }

    #[test]
    fn test_start_quiz_resets_answers_and_remembers_difficulty() {
        let state = answer(with_quiz(2), 1, "right");
        let state = apply(
            state,
            SessionAction::StartQuiz {
                quiz: fixtures::quiz_with_questions(3),
                difficulty: Difficulty::Easy,
            },
        )
        .expect("restart");

        let active = state.quiz.as_ref().expect("active quiz");
        assert!(active.answers.is_empty());
        assert!(!active.submitted());
        assert_eq!(state.difficulty, Difficulty::Easy);
        assert_eq!(state.quiz_phase(), QuizPhase::InProgress);
    }

    #[test]
    fn test_select_answer_upserts() {
        let state = answer(with_quiz(2), 1, "wrong");
        let state = answer(state, 1, "right");

        let active = state.quiz.as_ref().expect("active quiz");
        assert_eq!(active.answers.get(&1).map(String::as_str), Some("right"));
        assert_eq!(active.answered_count(), 1);
    }

    #[test]
    fn test_select_answer_validates_position_and_option() {
        let state = with_quiz(2);

        let bad_position = apply(
            state.clone(),
            SessionAction::SelectAnswer {
                position: 3,
                option: "right".to_string(),
            },
        );
        assert!(matches!(bad_position, Err(AppError::ValidationError(_))));

        let zero = apply(
            state.clone(),
            SessionAction::SelectAnswer {
                position: 0,
                option: "right".to_string(),
            },
        );
        assert!(matches!(zero, Err(AppError::ValidationError(_))));

        let bad_option = apply(
            state,
            SessionAction::SelectAnswer {
                position: 1,
                option: "maybe".to_string(),
            },
        );
        assert!(matches!(bad_option, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_partial_submission_is_rejected_with_count() {
        let mut state = with_quiz(5);
        for position in 1..=4 {
            state = answer(state, position, "right");
        }

        let result = apply(state, SessionAction::SubmitQuiz);

        match result {
            Err(err @ AppError::IncompleteSubmission { .. }) => {
                assert_eq!(
                    err.to_string(),
                    "Please answer all questions before submitting! (4/5 answered)"
                );
            }
            other => panic!("expected incomplete submission, got {:?}", other),
        }
    }

    #[test]
    fn test_submission_scores_and_appends_once() {
        let mut state = with_quiz(5);
        for position in 1..=5 {
            let option = if position <= 3 { "right" } else { "wrong" };
            state = answer(state, position, option);
        }

        let state = apply(state, SessionAction::SubmitQuiz).expect("submit");

        assert_eq!(state.quiz_phase(), QuizPhase::Submitted);
        assert_eq!(state.quiz_scores, vec![60.0]);
        let result = state
            .quiz
            .as_ref()
            .and_then(|q| q.result.as_ref())
            .expect("result");
        assert_eq!(result.score, 3);

        let again = apply(state.clone(), SessionAction::SubmitQuiz);
        assert!(matches!(again, Err(AppError::InvalidState(_))));
        assert_eq!(state.quiz_scores.len(), 1);

        let late_answer = apply(
            state,
            SessionAction::SelectAnswer {
                position: 1,
                option: "wrong".to_string(),
            },
        );
        assert!(matches!(late_answer, Err(AppError::InvalidState(_))));
    }

    #[test]
    fn test_retake_only_after_submission() {
        let state = with_quiz(2);
        let early = apply(
            state.clone(),
            SessionAction::RetakeQuiz {
                quiz: fixtures::quiz_with_questions(2),
            },
        );
        assert!(matches!(early, Err(AppError::InvalidState(_))));

        let state = answer(answer(state, 1, "right"), 2, "right");
        let state = apply(state, SessionAction::SubmitQuiz).expect("submit");
        let state = apply(
            state,
            SessionAction::RetakeQuiz {
                quiz: fixtures::quiz_with_questions(2),
            },
        )
        .expect("retake");

        assert_eq!(state.quiz_phase(), QuizPhase::InProgress);
        assert!(state.quiz.as_ref().is_some_and(|q| q.answers.is_empty()));
        assert_eq!(state.quiz_scores, vec![100.0]);
    }

    #[test]
    fn test_close_quiz_keeps_checklist_and_progress() {
        let state = with_quiz(2);
        let item = state.checklist[0].clone();
        let state = apply(
            state,
            SessionAction::SetItemCompleted {
                item: item.clone(),
                completed: true,
            },
        )
        .expect("toggle");

        let state = apply(state, SessionAction::CloseQuiz).expect("close");

        assert_eq!(state.quiz_phase(), QuizPhase::NoQuiz);
        assert_eq!(state.checklist.len(), 10);
        assert!(state.is_completed(&item));
    }
}
