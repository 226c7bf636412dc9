use chrono::Utc;

use crate::errors::{AppError, AppResult};
use crate::models::domain::quiz::{AnswerSet, Quiz};
use crate::models::domain::quiz_attempt::{PerformanceBand, QuestionResult, QuizResult};

pub struct QuizAttemptService;

impl QuizAttemptService {
    /// Grade a fully answered quiz
    pub fn grade_attempt(quiz: &Quiz, answers: &AnswerSet) -> AppResult<QuizResult> {
        let total = quiz.question_count();
        if total == 0 {
            return Err(AppError::InvalidState("Quiz has no questions".to_string()));
        }

        let mut score = 0;
        let mut questions = Vec::with_capacity(total);

        for (index, question) in quiz.questions.iter().enumerate() {
            let position = index + 1;
            let user_answer = answers
                .get(&position)
                .ok_or_else(|| {
                    AppError::IncompleteSubmission {
                        answered: Self::answered_count(quiz, answers),
                        total,
                    }
                })?
                .clone();

            // Compared by option text, not index
            let is_correct = question.is_correct(&user_answer);
            if is_correct {
                score += 1;
            }

            questions.push(QuestionResult {
                position,
                question: question.question.clone(),
                topic: question.topic.clone(),
                user_answer,
                correct_answer: question.correct.clone(),
                is_correct,
            });
        }

        let percentage = Self::percentage(score, total);

        Ok(QuizResult {
            score,
            total,
            percentage,
            band: PerformanceBand::from_percentage(percentage),
            questions,
            submitted_at: Utc::now(),
        })
    }

    pub fn percentage(score: usize, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        100.0 * score as f64 / total as f64
    }

    fn answered_count(quiz: &Quiz, answers: &AnswerSet) -> usize {
        (1..=quiz.question_count())
            .filter(|position| answers.contains_key(position))
            .count()
    }
}
