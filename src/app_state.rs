use std::sync::Arc;

use crate::{
    config::Config,
    repositories::{InMemorySessionRepository, SessionRepository},
    services::{
        checklist_service::ChecklistService,
        generation_settings::GenerationSettings,
        llm_client::{LlmClient, OpenAiLlmClient},
        quiz_service::QuizService,
        session_service::SessionService,
        video_search::{VideoSearch, YouTubeVideoSearch},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let llm = Arc::new(OpenAiLlmClient::from_config(&config));
        let videos = Arc::new(YouTubeVideoSearch::from_config(&config));
        Self::from_parts(config, llm, videos)
    }

    /// Wire the services around the given external clients.
    pub fn from_parts(
        config: Config,
        llm: Arc<dyn LlmClient>,
        videos: Arc<dyn VideoSearch>,
    ) -> Self {
        let settings = GenerationSettings::from_config(&config);
        let repository: Arc<dyn SessionRepository> = Arc::new(InMemorySessionRepository::new());

        let checklist_service = Arc::new(ChecklistService::new(llm.clone(), videos, settings));
        let quiz_service = Arc::new(QuizService::new(llm, settings));
        let session_service = Arc::new(SessionService::new(
            repository,
            checklist_service,
            quiz_service,
        ));

        Self {
            session_service,
            config: Arc::new(config),
        }
    }
}
