use std::{collections::HashMap, sync::Arc};

use crate::{
    constants::prompts::{checklist_prompt, with_structured_suffix, STRUCTURED_CHECKLIST_SUFFIX},
    errors::AppResult,
    models::domain::Notice,
    services::{
        generation_settings::GenerationSettings,
        llm_client::{CompletionRequest, LlmClient, ResponseSchema},
        response_parser::{parse_checklist_reply, StructuredChecklist},
        video_search::VideoSearch,
    },
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChecklistDraft {
    pub items: Vec<String>,
    pub video_links: HashMap<String, String>,
    pub notices: Vec<Notice>,
}

pub struct ChecklistService {
    llm: Arc<dyn LlmClient>,
    videos: Arc<dyn VideoSearch>,
    settings: GenerationSettings,
}

impl ChecklistService {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        videos: Arc<dyn VideoSearch>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            llm,
            videos,
            settings,
        }
    }

    /// Ask for a checklist and, when one comes back, look up a video per item.
    /// Never fails: problems end up as notices and an empty item list.
    pub async fn draft_checklist(&self, topic: &str) -> ChecklistDraft {
        let mut notices = Vec::new();

        let items = match self.request_checklist(topic).await {
            Ok(items) => items,
            Err(e) => {
                log::error!("Checklist generation for '{}' failed: {}", topic, e);
                notices.push(Notice::error(format!("Error generating checklist: {}", e)));
                Vec::new()
            }
        };

        if items.is_empty() {
            notices.push(Notice::error("Failed to generate checklist. Please try again."));
            return ChecklistDraft {
                items,
                video_links: HashMap::new(),
                notices,
            };
        }

        notices.push(Notice::success("Checklist generated successfully!"));
        let (video_links, video_notices) = self.find_video_links(&items).await;
        notices.extend(video_notices);

        ChecklistDraft {
            items,
            video_links,
            notices,
        }
    }

    async fn request_checklist(&self, topic: &str) -> AppResult<Vec<String>> {
        let structured = self.settings.structured_output;
        let mut prompt = checklist_prompt(topic);
        if structured {
            prompt = with_structured_suffix(prompt, STRUCTURED_CHECKLIST_SUFFIX);
        }

        let mut request = CompletionRequest::new(prompt, self.settings.checklist_max_tokens);
        if structured {
            request = request.with_schema(ResponseSchema::for_type::<StructuredChecklist>(
                "study_checklist",
            )?);
        }

        let reply = self.llm.complete(request).await?;
        let items = parse_checklist_reply(&reply, structured);
        log::info!("Parsed {} checklist items for '{}'", items.len(), topic);
        Ok(items)
    }

    /// One lookup per item, in order. A failed lookup leaves that item without a link.
    pub async fn find_video_links(
        &self,
        items: &[String],
    ) -> (HashMap<String, String>, Vec<Notice>) {
        let mut links = HashMap::new();
        let mut notices = Vec::new();
        let total = items.len();

        for (index, item) in items.iter().enumerate() {
            match self.videos.best_video_url(item).await {
                Ok(Some(url)) => {
                    links.insert(item.clone(), url);
                }
                Ok(None) => log::warn!("No video found for '{}'", item),
                Err(e) => {
                    log::error!("Video lookup for '{}' failed: {}", item, e);
                    notices.push(Notice::warning(format!(
                        "Error fetching YouTube video for '{}': {}",
                        item, e
                    )));
                }
            }
            log::info!("Finding videos for: {} ({}/{})", item, index + 1, total);
        }

        log::info!("Video search complete: {}/{} items linked", links.len(), total);
        (links, notices)
    }
}
