pub mod checklist_service;
pub mod generation_settings;
pub mod llm_client;
pub mod quiz_attempt_service;
pub mod quiz_service;
pub mod response_parser;
pub mod session_service;
pub mod session_transitions;
pub mod video_search;
