use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ParseError;

/// Company facts the model pulls out of a website.
///
/// Deserializing is lenient: missing fields, `null` and `""` where a list belongs all
/// read as empty. Only content that is not a JSON object is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    /// A description of the company based on the information found on its website, e.g.
    /// 'Aficionado Seeds is a cannabis breeder that specializes in breeding cannabis seeds
    /// and strains.'
    pub description: String,
    /// The city, state and country where the company is located based on the information
    /// found on its website, e.g. 'Los Angeles, CA, USA' or 'California, USA' or 'USA'
    pub location: String,
    /// An array of URLs, without prefix, labels or other text, to any of the company's
    /// social media profiles based on the information found on its website, e.g.
    /// '["https://www.instagram.com/aficionadoestates"]'
    pub social_media: Vec<String>,
}

impl ExtractedData {
    /// JSON schema handed to the model as its structured-output constraint.
    pub fn json_schema() -> Value {
        serde_json::to_value(schemars::schema_for!(ExtractedData)).unwrap_or_default()
    }

    pub fn parse(content: &str) -> Result<Self, ParseError> {
        serde_json::from_str(content).map_err(|source| ParseError {
            target: "company data",
            source,
        })
    }
}

impl<'de> Deserialize<'de> for ExtractedData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let reply = ReplyFields::deserialize(deserializer)?;
        Ok(Self {
            description: text_field(reply.description),
            location: text_field(reply.location),
            social_media: link_list(reply.social_media),
        })
    }
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ReplyFields {
    description: Value,
    location: Value,
    social_media: Value,
}

fn text_field(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null | Value::Object(_) => String::new(),
    }
}

fn link_list(value: Value) -> Vec<String> {
    let links: Vec<String> = match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(link) => Some(link),
                _ => None,
            })
            .collect(),
        Value::String(joined) => joined.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };

    links
        .into_iter()
        .map(|link| link.trim().to_string())
        .filter(|link| !link.is_empty())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Sampling options, serialized as Ollama's `options` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodingOptions {
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_ctx: Option<u32>,
}

impl DecodingOptions {
    /// Greedy decoding with a context window large enough for whole pages.
    pub fn deterministic(num_ctx: u32) -> Self {
        Self {
            temperature: 0.0,
            top_p: None,
            num_ctx: Some(num_ctx),
        }
    }

    /// Slight sampling for short keyword/summary answers.
    pub fn low_temperature() -> Self {
        Self {
            temperature: 0.1,
            top_p: Some(0.9),
            num_ctx: None,
        }
    }
}

impl Default for DecodingOptions {
    fn default() -> Self {
        Self::deterministic(32768)
    }
}

/// A chat request: ordered messages plus an optional output schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPrompt {
    pub messages: Vec<Message>,
    pub schema: Option<Value>,
    pub options: DecodingOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Raw generated text; JSON when a schema was supplied, but not validated here
    pub content: String,
    /// Seconds, as measured by the serving endpoint
    pub duration: f64,
}
