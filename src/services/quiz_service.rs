use std::sync::Arc;

use rand::{seq::SliceRandom, Rng};

use crate::{
    constants::prompts::{
        quiz_question_prompt, with_structured_suffix, STRUCTURED_QUESTION_SUFFIX,
    },
    errors::AppResult,
    models::domain::{Difficulty, Notice, Quiz, QuizQuestion, QuizSource},
    services::{
        generation_settings::GenerationSettings,
        llm_client::{CompletionRequest, LlmClient, ResponseSchema},
        response_parser::{parse_question_reply, StructuredQuizQuestion},
    },
};

pub struct QuizService {
    llm: Arc<dyn LlmClient>,
    settings: GenerationSettings,
}

impl QuizService {
    pub fn new(llm: Arc<dyn LlmClient>, settings: GenerationSettings) -> Self {
        Self { llm, settings }
    }

    /// One question per item, generated in order. Failed questions become
    /// placeholders and add an error notice.
    pub async fn generate_quiz(
        &self,
        topic: &str,
        items: &[String],
        difficulty: Difficulty,
    ) -> (Quiz, Vec<Notice>) {
        let mut questions = Vec::with_capacity(items.len());
        let mut notices = Vec::new();

        for item in items {
            let (question, notice) = self.generate_question(topic, item, difficulty).await;
            questions.push(question);
            notices.extend(notice);
        }

        log::info!(
            "Generated {}-difficulty quiz with {} questions for '{}'",
            difficulty,
            questions.len(),
            topic
        );
        (Quiz::new(topic, difficulty, questions), notices)
    }

    pub async fn generate_question(
        &self,
        topic: &str,
        item: &str,
        difficulty: Difficulty,
    ) -> (QuizQuestion, Option<Notice>) {
        match self.request_question(topic, item, difficulty).await {
            Ok(question) => (question, None),
            Err(e) => {
                log::warn!("Using placeholder question for '{}': {}", item, e);
                (
                    QuizQuestion::placeholder(item),
                    Some(Notice::error(format!("Error generating quiz question: {}", e))),
                )
            }
        }
    }

    async fn request_question(
        &self,
        topic: &str,
        item: &str,
        difficulty: Difficulty,
    ) -> AppResult<QuizQuestion> {
        let structured = self.settings.structured_output;
        let mut prompt = quiz_question_prompt(topic, item, difficulty);
        if structured {
            prompt = with_structured_suffix(prompt, STRUCTURED_QUESTION_SUFFIX);
        }

        let mut request = CompletionRequest::new(prompt, self.settings.question_max_tokens);
        if structured {
            request = request
                .with_schema(ResponseSchema::for_type::<StructuredQuizQuestion>("quiz_question")?);
        }

        let reply = self.llm.complete(request).await?;
        let parsed = parse_question_reply(&reply, structured)?;
        Ok(parsed.into_question(item))
    }
}

/// Items a quiz may draw from for the given source.
pub fn source_pool(
    checklist: &[String],
    incomplete: Vec<String>,
    source: QuizSource,
) -> Vec<String> {
    match source {
        QuizSource::Random | QuizSource::All => checklist.to_vec(),
        QuizSource::Incomplete => incomplete,
    }
}

/// Sample `min(count, pool.len())` items without replacement.
/// `All` keeps the chosen items in checklist order.
pub fn select_items<R: Rng + ?Sized>(
    pool: &[String],
    count: usize,
    source: QuizSource,
    rng: &mut R,
) -> Vec<String> {
    let mut indices: Vec<usize> = (0..pool.len()).collect();
    indices.shuffle(rng);
    indices.truncate(count.min(pool.len()));

    if source == QuizSource::All {
        indices.sort_unstable();
    }

    indices.into_iter().map(|i| pool[i].clone()).collect()
}
