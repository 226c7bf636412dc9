use crate::config::Config;

/// Per-request knobs shared by checklist and quiz generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSettings {
    pub checklist_max_tokens: u32,
    pub question_max_tokens: u32,
    pub structured_output: bool,
}

impl GenerationSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            checklist_max_tokens: config.checklist_max_tokens,
            question_max_tokens: config.question_max_tokens,
            structured_output: config.llm_structured_output,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            checklist_max_tokens: 1000,
            question_max_tokens: 500,
            structured_output: false,
        }
    }
}
