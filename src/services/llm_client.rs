use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use schemars::JsonSchema;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// JSON schema attached to a request when structured output is wanted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    pub name: String,
    pub schema: serde_json::Value,
}

impl ResponseSchema {
    pub fn for_type<T: JsonSchema>(name: &str) -> AppResult<Self> {
        let schema = schemars::schema_for!(T);
        let schema = serde_json::to_value(&schema).map_err(|e| {
            AppError::InternalError(format!("schema '{}' did not serialize: {}", name, e))
        })?;
        Ok(Self {
            name: name.to_string(),
            schema,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub response_schema: Option<ResponseSchema>,
}

impl CompletionRequest {
    pub fn new(prompt: String, max_tokens: u32) -> Self {
        Self {
            prompt,
            max_tokens,
            response_schema: None,
        }
    }

    pub fn with_schema(mut self, schema: ResponseSchema) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one user message and return the first choice's text.
    async fn complete(&self, request: CompletionRequest) -> AppResult<String>;
}

/// Chat-completions client for any OpenAI-compatible endpoint (Groq by default).
pub struct OpenAiLlmClient {
    client: Option<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiLlmClient {
    pub fn new(api_key: Option<&SecretString>, api_base: &str, model: &str) -> Self {
        let client = api_key.map(|key| {
            let config = OpenAIConfig::new()
                .with_api_key(key.expose_secret())
                .with_api_base(api_base);
            Client::with_config(config)
        });

        Self {
            client,
            model: model.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.llm_api_key.as_ref(),
            &config.llm_api_base,
            &config.llm_model,
        )
    }

    fn build_body(&self, request: CompletionRequest) -> ChatCompletionBody {
        ChatCompletionBody {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: request.prompt,
            }],
            max_tokens: request.max_tokens,
            stream: false,
            response_format: request.response_schema.map(|schema| ResponseFormat {
                kind: "json_schema".to_string(),
                json_schema: JsonSchemaFormat {
                    name: schema.name,
                    schema: schema.schema,
                },
            }),
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiLlmClient {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
        let client = self.client.as_ref().ok_or_else(|| {
            AppError::Configuration("GROQ_API_KEY is not set".to_string())
        })?;

        let prompt_len = request.prompt.len();
        let body = self.build_body(request);
        log::info!(
            "Requesting completion from model {} (prompt {} chars, max {} tokens)",
            body.model,
            prompt_len,
            body.max_tokens
        );

        let reply: ChatCompletionReply = client.chat().create_byot(body).await?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::ExternalService("LLM returned an empty reply".to_string()))?;

        log::debug!("Completion received ({} chars)", content.len());
        Ok(content)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
    json_schema: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat {
    name: String,
    schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionReply {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::response_parser::StructuredQuizQuestion;

    fn client() -> OpenAiLlmClient {
        let key = SecretString::from("key".to_string());
        OpenAiLlmClient::new(Some(&key), "http://localhost:1/v1", "llama-3.3-70b-versatile")
    }

    #[test]
    fn test_body_is_single_user_message_without_streaming() {
        let body = client().build_body(CompletionRequest::new("Hello".to_string(), 500));
        let json = serde_json::to_value(&body).expect("body should serialize");

        assert_eq!(json["model"], "llama-3.3-70b-versatile");
        assert_eq!(json["max_tokens"], 500);
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"].as_array().map(|m| m.len()), Some(1));
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Hello");
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn test_body_carries_json_schema_when_requested() {
        let schema = ResponseSchema::for_type::<StructuredQuizQuestion>("quiz_question")
            .expect("schema should build");
        let request = CompletionRequest::new("Hello".to_string(), 500).with_schema(schema);
        let json = serde_json::to_value(client().build_body(request)).expect("serialize");

        assert_eq!(json["response_format"]["type"], "json_schema");
        assert_eq!(json["response_format"]["json_schema"]["name"], "quiz_question");
        assert!(json["response_format"]["json_schema"]["schema"]["properties"]
            .get("options")
            .is_some());
    }

    #[test]
    fn test_reply_without_content_is_detected() {
        let reply: ChatCompletionReply =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#)
                .expect("reply should deserialize");

        assert!(reply.choices[0].message.content.is_none());
    }

    #[actix_web::test]
    async fn test_missing_api_key_fails_per_call() {
        let client = OpenAiLlmClient::new(None, "http://localhost:1/v1", "model");
        let result = client
            .complete(CompletionRequest::new("Hello".to_string(), 10))
            .await;

        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
