use crate::schema::{DecodingOptions, ExtractedData, Message, ModelPrompt};

const EXTRACTION_SYSTEM_PROMPT: &str = "You are a helpful assistant that extracts important company information from the HTML of its website. You must respond in JSON format.\n\
DO NOT comment on the website layout, HTML, javascript, markup, code, issues, fixes or any other technical implementation details.\n\
Carefully obey the given JSON schema and do not include any additional information or comments. For any fields that are not present in the HTML, return an empty string.\n";

/// System + user messages asking for description, location and social links of
/// `company`, constrained by the [`ExtractedData`] schema.
pub fn build_extraction_prompt(company: &str, html: &str, num_ctx: u32) -> ModelPrompt {
    let messages = vec![
        Message::system(EXTRACTION_SYSTEM_PROMPT),
        Message::user(format!(
            "Extract information in JSON format about the company {} from the HTML of its website:\n\n{}.",
            company, html
        )),
    ];

    ModelPrompt {
        messages,
        schema: Some(ExtractedData::json_schema()),
        options: DecodingOptions::deterministic(num_ctx),
    }
}

pub fn build_social_links_prompt(content: &str) -> String {
    format!(
        r#"Find all social media links in this content. Look for Instagram, Twitter/X, Facebook, LinkedIn, YouTube, and TikTok links. Return only the URLs as a comma-separated list, or return 'none' if no social media links are found.

Content:
{}"#,
        content
    )
}
