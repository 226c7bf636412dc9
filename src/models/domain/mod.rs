pub mod difficulty;
pub mod notice;
pub mod quiz;
pub mod quiz_attempt;
pub mod quiz_question;
pub mod session;
pub use difficulty::{Difficulty, QuizSource};
pub use notice::{Notice, NoticeLevel};
pub use quiz::{ActiveQuiz, AnswerSet, Quiz, QuizPhase};
pub use quiz_attempt::{PerformanceBand, QuestionResult, QuizResult};
pub use quiz_question::QuizQuestion;
pub use session::SessionState;
