pub mod error;
pub mod llm;
pub mod normalizer;
pub mod prompt;
pub mod schema;

pub use error::{ModelError, ParseError};
pub use llm::{ChatModel, ModelConfig, OllamaClient};
pub use normalizer::{Platform, SocialLabel, clean_social_reply, is_social_url, split_unique_links};
pub use schema::{DecodingOptions, ExtractedData, Message, ModelPrompt, ModelResponse, Role};

use crawl::truncate_chars;
use tracing::debug;

/// Prompts a [`ChatModel`] for company facts and social links, keeping every prompt
/// within the configured size cap.
pub struct Extractor {
    model: Box<dyn ChatModel>,
    num_ctx: u32,
    max_prompt_chars: usize,
}

impl Extractor {
    pub fn new(model: Box<dyn ChatModel>, num_ctx: u32, max_prompt_chars: usize) -> Self {
        Self {
            model,
            num_ctx,
            max_prompt_chars,
        }
    }

    pub fn from_config(model: Box<dyn ChatModel>, config: &ModelConfig) -> Self {
        Self::new(model, config.num_ctx, config.max_prompt_chars)
    }

    /// Ask the model for the company's description, location and social links.
    /// The raw content is returned unparsed.
    pub async fn extract_company(
        &self,
        model_id: &str,
        company: &str,
        html: &str,
    ) -> Result<ModelResponse, ModelError> {
        let page = truncate_chars(html, self.max_prompt_chars);
        if page.len() < html.len() {
            debug!(
                company,
                original_bytes = html.len(),
                kept_bytes = page.len(),
                "Page truncated for prompt"
            );
        }

        let prompt = prompt::build_extraction_prompt(company, page, self.num_ctx);
        self.model.prompt_model(model_id, &prompt).await
    }

    /// Ask the model which social links appear in `excerpt`; returns the cleaned,
    /// comma-joined list (possibly empty).
    pub async fn find_social_links(
        &self,
        model_id: &str,
        excerpt: &str,
    ) -> Result<String, ModelError> {
        let excerpt = truncate_chars(excerpt, self.max_prompt_chars);
        let prompt = prompt::build_social_links_prompt(excerpt);

        let reply = self
            .model
            .complete(model_id, &prompt, &DecodingOptions::low_temperature())
            .await?;
        debug!(reply = %truncate_chars(&reply, 200), "Social link reply");

        Ok(clean_social_reply(&reply))
    }
}
