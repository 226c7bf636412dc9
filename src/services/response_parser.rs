//! Turns free-text LLM replies into checklists and quiz questions.
//!
//! The text format is only a convention agreed through the prompt, so these
//! rules are the whole compatibility contract with the model. When structured
//! output is enabled the JSON shapes below are tried first and the text rules
//! run as the fallback on the same reply.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{MAX_CHECKLIST_ITEMS, MIN_CHECKLIST_ITEM_CHARS},
    errors::{AppError, AppResult},
    models::domain::QuizQuestion,
};

const CONVERSATIONAL_PREAMBLES: [&str; 3] = ["here's", "here\u{2019}s", "here is"];
const QUESTION_PREFIX: &str = "Question: ";
const CORRECT_MARKER: &str = "Correct:";
const OPTION_MARKER_CHARS: usize = 3;
const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct StructuredChecklist {
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct StructuredQuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Letter of the correct option, `A` for the first.
    pub correct: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl ParsedQuestion {
    pub fn into_question(self, topic: &str) -> QuizQuestion {
        let correct = self
            .options
            .get(self.correct_index)
            .or_else(|| self.options.first())
            .cloned()
            .unwrap_or_default();
        QuizQuestion::new(self.question, self.options, correct, topic)
    }
}

/// In structured mode a reply that parses as JSON is final, even when none of
/// its items survive cleanup. Only a JSON or shape failure falls back to the
/// text rules, and then JSON syntax lines are ignored.
pub fn parse_checklist_reply(reply: &str, structured: bool) -> Vec<String> {
    if !structured {
        return parse_checklist(reply);
    }

    match parse_structured_checklist(reply) {
        Ok(items) => items,
        Err(e) => {
            log::warn!(
                "Structured checklist reply rejected ({}), using text parser",
                e
            );
            clean_checklist_lines(reply.lines().filter(|line| !is_json_syntax(line)))
        }
    }
}

/// Text checklist rules: one item per line, preambles and short lines dropped,
/// leading numbering/bullets stripped, at most ten items.
pub fn parse_checklist(reply: &str) -> Vec<String> {
    clean_checklist_lines(reply.lines())
}

pub fn parse_structured_checklist(reply: &str) -> AppResult<Vec<String>> {
    let parsed: StructuredChecklist = serde_json::from_str(reply.trim())?;
    Ok(clean_checklist_lines(parsed.items.iter().map(String::as_str)))
}

fn clean_checklist_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !is_preamble(line))
        .map(strip_list_prefix)
        .filter(|item| item.chars().count() >= MIN_CHECKLIST_ITEM_CHARS)
        .take(MAX_CHECKLIST_ITEMS)
        .map(str::to_string)
        .collect()
}

fn is_preamble(line: &str) -> bool {
    let lowered = line.to_lowercase();
    CONVERSATIONAL_PREAMBLES
        .iter()
        .any(|preamble| lowered.starts_with(preamble))
}

fn is_json_syntax(line: &str) -> bool {
    line.trim_start()
        .starts_with(|c: char| matches!(c, '{' | '}' | '[' | ']' | '"'))
}

fn strip_list_prefix(line: &str) -> &str {
    line.trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | '*' | ' '))
}

pub fn parse_question_reply(reply: &str, structured: bool) -> AppResult<ParsedQuestion> {
    if structured {
        match parse_structured_question(reply) {
            Ok(parsed) => return Ok(parsed),
            Err(e) => log::warn!(
                "Structured question reply rejected ({}), using text parser",
                e
            ),
        }
    }
    parse_quiz_question(reply)
}

/// Text question rules.
///
/// Line 0 is the question. The next four non-blank lines are options whose
/// first three characters (`A) `) are cut off by position, not by pattern.
/// The letter after `Correct:` picks the answer; a missing or out-of-range
/// letter falls back to the first option.
pub fn parse_quiz_question(reply: &str) -> AppResult<ParsedQuestion> {
    let lines: Vec<&str> = reply
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .collect();

    // Line 0 is the question even when blank; a blank line 0 is a parse error.
    let first = lines.first().copied().unwrap_or_default();
    let question = first.strip_prefix(QUESTION_PREFIX).unwrap_or(first).trim();
    if question.is_empty() {
        return Err(AppError::ParseError(
            "reply does not start with a question".to_string(),
        ));
    }

    let options: Vec<String> = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .take(OPTIONS_PER_QUESTION)
        .map(|line| strip_option_marker(line))
        .collect();

    if options.len() < 2 {
        return Err(AppError::ParseError(format!(
            "expected {} options, found {}",
            OPTIONS_PER_QUESTION,
            options.len()
        )));
    }

    let correct_index = lines
        .iter()
        .find_map(|line| line.trim_start().strip_prefix(CORRECT_MARKER))
        .and_then(letter_index)
        .filter(|index| *index < options.len())
        .unwrap_or(0);

    Ok(ParsedQuestion {
        question: question.to_string(),
        options,
        correct_index,
    })
}

pub fn parse_structured_question(reply: &str) -> AppResult<ParsedQuestion> {
    let parsed: StructuredQuizQuestion = serde_json::from_str(reply.trim())?;

    let question = parsed.question.trim().to_string();
    let options: Vec<String> = parsed
        .options
        .iter()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();

    if question.is_empty() || options.len() < 2 {
        return Err(AppError::ParseError(
            "structured question is missing its text or options".to_string(),
        ));
    }

    let correct_index = letter_index(&parsed.correct)
        .or_else(|| options.iter().position(|o| o == parsed.correct.trim()))
        .filter(|index| *index < options.len())
        .unwrap_or(0);

    Ok(ParsedQuestion {
        question,
        options,
        correct_index,
    })
}

fn strip_option_marker(line: &str) -> String {
    line.chars()
        .skip(OPTION_MARKER_CHARS)
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// `A` -> 0 ... `Z` -> 25. Accepts a bare letter or a letter followed by
/// punctuation such as `B)`; anything else is not a letter answer.
fn letter_index(value: &str) -> Option<usize> {
    let value = value.trim().to_uppercase();
    let mut chars = value.chars();
    let letter = chars.next()?;
    if chars.next().is_some_and(|next| next.is_alphanumeric()) {
        return None;
    }
    if !letter.is_ascii_uppercase() {
        return None;
    }
    Some((letter as u8 - b'A') as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn test_checklist_strips_bullets_and_numbers() {
        let items = parse_checklist(fixtures::CHECKLIST_REPLY);

        assert_eq!(items.len(), 10);
        assert_eq!(items[0], "Vectors and vector spaces");
        assert_eq!(items[1], "Matrix multiplication rules");
        assert!(items.iter().all(|item| {
            !item.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | '*' | ' '))
        }));
    }

    #[test]
    fn test_checklist_drops_preamble_blank_and_short_lines() {
        let reply = "Here's a checklist for you:\n\n1. Short\n- Gaussian elimination steps\n\nHERE IS more chatter\n* Determinants and their properties\n";
        let items = parse_checklist(reply);

        assert_eq!(
            items,
            vec![
                "Gaussian elimination steps".to_string(),
                "Determinants and their properties".to_string(),
            ]
        );
    }

    #[test]
    fn test_checklist_keeps_items_of_exactly_min_length() {
        let items = parse_checklist("1. abcdefghij\n2. abcdefghi");

        assert_eq!(items, vec!["abcdefghij".to_string()]);
    }

    #[test]
    fn test_checklist_truncates_to_ten_items() {
        let reply = (1..=14)
            .map(|i| format!("{}. Study subtopic number {}", i, i))
            .collect::<Vec<_>>()
            .join("\n");
        let items = parse_checklist(&reply);

        assert_eq!(items.len(), 10);
        assert_eq!(items[9], "Study subtopic number 10");
    }

    #[test]
    fn test_checklist_min_of_candidates_and_ten_with_noise() {
        for candidates in [0usize, 3, 9, 10, 12] {
            let mut lines = vec!["Here's what to study:".to_string()];
            for i in 0..candidates {
                lines.push(format!("{}) Candidate topic {}", i + 1, i));
                lines.push("---".to_string());
                lines.push(String::new());
            }
            let items = parse_checklist(&lines.join("\n"));
            assert_eq!(items.len(), candidates.min(10));
        }
    }

    #[test]
    fn test_checklist_of_empty_reply_is_empty() {
        assert!(parse_checklist("").is_empty());
        assert!(parse_checklist("Here's nothing useful").is_empty());
    }

    #[test]
    fn test_structured_checklist_reuses_text_cleanup() {
        let reply = r#"{"items": ["1. Vectors and vector spaces", "tiny", "- Orthogonal projections"]}"#;
        let items = parse_checklist_reply(reply, true);

        assert_eq!(
            items,
            vec![
                "Vectors and vector spaces".to_string(),
                "Orthogonal projections".to_string()
            ]
        );
    }

    #[test]
    fn test_structured_checklist_without_usable_items_is_empty() {
        assert!(parse_checklist_reply(r#"{"items": ["tiny", "short"]}"#, true).is_empty());

        let pretty = "{\n  \"items\": [\n    \"tiny\"\n  ]\n}";
        assert!(parse_checklist_reply(pretty, true).is_empty());
    }

    #[test]
    fn test_structured_fallback_ignores_json_lines() {
        let wrong_shape = r#"{"checklist": ["Vectors and vector spaces", "Eigenvalue problems"]}"#;
        assert!(parse_checklist_reply(wrong_shape, true).is_empty());

        let pretty = "{\n  \"checklist\": [\n    \"Vectors and vector spaces\"\n  ]\n}";
        assert!(parse_checklist_reply(pretty, true).is_empty());
    }

    #[test]
    fn test_structured_checklist_falls_back_to_text() {
        let items =
            parse_checklist_reply("1. Vectors and vector spaces\n2. Eigenvalue problems", true);

        assert_eq!(items.len(), 2);
        assert!(parse_structured_checklist("not json").is_err());
    }

    #[test]
    fn test_question_parses_well_formed_reply() {
        let parsed = parse_quiz_question(fixtures::QUESTION_REPLY).expect("should parse");

        assert_eq!(parsed.question, "What is the determinant of the identity matrix?");
        assert_eq!(parsed.options, vec!["0", "1", "-1", "It depends on the size"]);
        assert_eq!(parsed.correct_index, 1);

        let question = parsed.into_question("Determinants");
        assert_eq!(question.correct, "1");
        assert_eq!(question.topic, "Determinants");
    }

    #[test]
    fn test_question_correct_letter_is_case_insensitive() {
        let reply = "Question: Pick one\nA) alpha\nB) beta\nC) gamma\nD) delta\nCorrect: d";
        let parsed = parse_quiz_question(reply).expect("should parse");

        assert_eq!(parsed.correct_index, 3);
    }

    #[test]
    fn test_question_correct_letter_with_trailing_text() {
        let reply = "Question: Pick one\nA) alpha\nB) beta\nC) gamma\nD) delta\nCorrect: C) gamma";
        let parsed = parse_quiz_question(reply).expect("should parse");

        assert_eq!(parsed.correct_index, 2);
    }

    #[test]
    fn test_question_defaults_to_first_option_without_valid_letter() {
        let missing = "Question: Pick one\nA) alpha\nB) beta\nC) gamma\nD) delta";
        assert_eq!(parse_quiz_question(missing).expect("parse").correct_index, 0);

        let out_of_range = "Question: Pick one\nA) alpha\nB) beta\nC) gamma\nD) delta\nCorrect: F";
        assert_eq!(parse_quiz_question(out_of_range).expect("parse").correct_index, 0);

        let not_a_letter = "Question: Pick one\nA) alpha\nB) beta\nC) gamma\nD) delta\nCorrect: 2";
        assert_eq!(parse_quiz_question(not_a_letter).expect("parse").correct_index, 0);
    }

    #[test]
    fn test_question_skips_blank_lines_between_options() {
        let reply = "Question: Pick one\n\nA) alpha\n\nB) beta\nC) gamma\n\nD) delta\n\nCorrect: B";
        let parsed = parse_quiz_question(reply).expect("should parse");

        assert_eq!(parsed.options, vec!["alpha", "beta", "gamma", "delta"]);
        assert_eq!(parsed.correct_index, 1);
    }

    #[test]
    fn test_question_prefix_strip_is_positional() {
        // A wider marker keeps its leftover character.
        let reply = "Question: Pick one\n(A) alpha\n(B) beta\n(C) gamma\n(D) delta\nCorrect: A";
        let parsed = parse_quiz_question(reply).expect("should parse");

        assert_eq!(parsed.options[0], " alpha");
    }

    #[test]
    fn test_question_without_prefix_uses_whole_first_line() {
        let reply = "Which matrix is orthogonal?\nA) one\nB) two\nC) three\nD) four\nCorrect: B";
        let parsed = parse_quiz_question(reply).expect("should parse");

        assert_eq!(parsed.question, "Which matrix is orthogonal?");
    }

    #[test]
    fn test_question_with_blank_first_line_is_rejected() {
        let reply = format!("\n{}", fixtures::QUESTION_REPLY);
        assert!(matches!(
            parse_quiz_question(&reply),
            Err(AppError::ParseError(_))
        ));
    }

    #[test]
    fn test_question_rejects_replies_without_options() {
        assert!(parse_quiz_question("").is_err());
        assert!(parse_quiz_question("Question: lonely question").is_err());
    }

    #[test]
    fn test_structured_question_maps_letter() {
        let reply = r#"{"question": "Pick one", "options": ["alpha", "beta", "gamma", "delta"], "correct": "c"}"#;
        let parsed = parse_question_reply(reply, true).expect("should parse");

        assert_eq!(parsed.correct_index, 2);
        assert_eq!(parsed.options.len(), 4);
    }

    #[test]
    fn test_structured_question_falls_back_to_text() {
        let parsed = parse_question_reply(fixtures::QUESTION_REPLY, true).expect("should parse");

        assert_eq!(parsed.correct_index, 1);
    }

    #[test]
    fn test_letter_index() {
        assert_eq!(letter_index("A"), Some(0));
        assert_eq!(letter_index(" d "), Some(3));
        assert_eq!(letter_index("B)"), Some(1));
        assert_eq!(letter_index("Answer"), None);
        assert_eq!(letter_index(""), None);
    }
}
