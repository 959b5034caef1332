use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

pub const MISSING_CREDENTIAL: &str = "Error: API Key missing.";
pub const GENERATION_FAILED: &str = "Failed to generate description via AI. Please try again.";
pub const NO_CONTENT: &str = "No description generated.";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const API_KEY_VAR: &str = "API_KEY";

/// Produces marketing copy for a product. Always answers with a string;
/// failures come back as one of the fixed fallback messages above.
#[async_trait]
pub trait DescriptionGenerator: Send + Sync {
    async fn generate(&self, name: &str, category: &str) -> String;
}

/// Where the API key comes from. Environment lookups happen on every call.
#[derive(Debug, Clone)]
pub enum ApiKeySource {
    Env(String),
    Static(String),
}

impl ApiKeySource {
    fn resolve(&self) -> Option<String> {
        let key = match self {
            ApiKeySource::Env(var) => std::env::var(var).ok()?,
            ApiKeySource::Static(key) => key.clone(),
        };
        (!key.trim().is_empty()).then_some(key)
    }
}

impl Default for ApiKeySource {
    fn default() -> Self {
        ApiKeySource::Env(API_KEY_VAR.to_string())
    }
}

/// Calls the Gemini `generateContent` REST endpoint.
#[derive(Debug, Clone)]
pub struct GeminiDescriptionGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: ApiKeySource,
}

impl GeminiDescriptionGenerator {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            api_key: ApiKeySource::default(),
        }
    }

    pub fn with_api_key(mut self, api_key: ApiKeySource) -> Self {
        self.api_key = api_key;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn request(&self, api_key: &str, prompt: String) -> Result<Option<String>, reqwest::Error> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });
        let response: GenerateContentResponse = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.text())
    }
}

impl Default for GeminiDescriptionGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_MODEL)
    }
}

#[async_trait]
impl DescriptionGenerator for GeminiDescriptionGenerator {
    async fn generate(&self, name: &str, category: &str) -> String {
        let Some(api_key) = self.api_key.resolve() else {
            tracing::warn!("API key is not configured");
            return MISSING_CREDENTIAL.to_string();
        };

        match self.request(&api_key, build_prompt(name, category)).await {
            Ok(Some(text)) => text,
            Ok(None) => NO_CONTENT.to_string(),
            Err(err) => {
                tracing::error!(error = %err, model = %self.model, "description generation failed");
                GENERATION_FAILED.to_string()
            }
        }
    }
}

pub fn build_prompt(name: &str, category: &str) -> String {
    format!(
        "Write a compelling and professional e-commerce product description for a product named \"{name}\" in the category \"{category}\". \
         Keep it under 60 words. Highlight key features and benefits. Do not use markdown formatting like bolding or headers."
    )
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    // Text of the first candidate, parts concatenated.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.is_empty()).then_some(text)
    }
}
