use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{DEFAULT_QUESTION_COUNT, MAX_QUESTION_COUNT},
    models::domain::{Difficulty, QuizSource},
    services::session_service::QuizOptions,
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateChecklistRequest {
    #[validate(length(max = 200))]
    pub topic: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProgressRequest {
    #[validate(length(min = 1, max = 500))]
    pub item: String,

    pub completed: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    pub difficulty: Option<Difficulty>,

    #[validate(range(min = 1, max = 10))]
    pub question_count: Option<usize>,

    pub source: Option<QuizSource>,
}

impl GenerateQuizRequest {
    pub fn into_options(self) -> QuizOptions {
        QuizOptions {
            difficulty: self.difficulty.unwrap_or_default(),
            question_count: self
                .question_count
                .unwrap_or(DEFAULT_QUESTION_COUNT)
                .min(MAX_QUESTION_COUNT),
            source: self.source.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SelectAnswerRequest {
    #[validate(length(min = 1, max = 1000))]
    pub option: String,
}
