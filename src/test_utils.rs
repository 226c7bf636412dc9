use crate::models::domain::{Difficulty, Quiz, QuizQuestion, SessionState};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Checklist reply with a preamble, mixed list markers and more than ten usable lines
    pub const CHECKLIST_REPLY: &str = "Here's a comprehensive checklist for studying Linear Algebra:

1. Vectors and vector spaces
2. Matrix multiplication rules
3. Determinants and their properties
- Systems of linear equations
- Gaussian elimination
* Eigenvalues and eigenvectors
7. Linear transformations
8. Inner product spaces
9. Orthogonality and projections
10. Singular value decomposition
11. Applications of linear algebra in data science
Rank
";

    pub const QUESTION_REPLY: &str = "Question: What is the determinant of the identity matrix?
A) 0
B) 1
C) -1
D) It depends on the size
Correct: B";

    /// Distinct checklist items named "Checklist item N"
    pub fn checklist_items(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("Checklist item {}", i)).collect()
    }

    /// A fresh session holding `count` checklist items, none completed
    pub fn session_with_checklist(count: usize) -> SessionState {
        let mut session = SessionState::new();
        session.topic = "Linear Algebra".to_string();
        session.checklist = checklist_items(count);
        for item in &session.checklist {
            session.progress.insert(item.clone(), false);
        }
        session
    }

    /// Quiz whose questions all offer "right" and "wrong", with "right" correct
    pub fn quiz_with_questions(count: usize) -> Quiz {
        let questions = (0..count)
            .map(|i| {
                QuizQuestion::new(
                    format!("Question {}?", i + 1),
                    vec!["right".to_string(), "wrong".to_string()],
                    "right".to_string(),
                    &format!("Checklist item {}", i),
                )
            })
            .collect();
        Quiz::new("Linear Algebra", Difficulty::Medium, questions)
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_checklist_items_are_distinct() {
        let items = checklist_items(3);
        assert_eq!(items, vec!["Checklist item 0", "Checklist item 1", "Checklist item 2"]);
    }

    #[test]
    fn test_session_with_checklist_tracks_every_item() {
        let session = session_with_checklist(4);
        assert_eq!(session.checklist.len(), 4);
        assert_eq!(session.progress.len(), 4);
        assert_eq!(session.completed_count(), 0);
    }

    #[test]
    fn test_quiz_with_questions() {
        let quiz = quiz_with_questions(3);
        assert_eq!(quiz.question_count(), 3);
        assert!(quiz.questions.iter().all(|q| q.is_correct("right")));
    }
}
