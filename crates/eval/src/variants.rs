use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::relevance::{BRAND_PROFILE, BREEDER_PROFILE, KeywordProfile};

const NAME_SLOT: &str = "{name}";
const PATTERN_SLOT: &str = "[NAME]";

const BREEDER_TEMPLATES: [&str; 4] = [
    "{name} cannabis seeds official website",
    "{name} cannabis breeder official website",
    "{name} seed company official website",
    "{name} official website",
];

const BRAND_TEMPLATES: [&str; 4] = [
    "{name} cannabis cultivation official website",
    "{name} cannabis grow official website",
    "{name} cannabis nutrients official website",
    "{name} hydroponic official website",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalMode {
    Breeders,
    Brands,
}

impl EvalMode {
    pub fn templates(&self) -> &'static [&'static str] {
        match self {
            EvalMode::Breeders => &BREEDER_TEMPLATES,
            EvalMode::Brands => &BRAND_TEMPLATES,
        }
    }

    pub fn profile(&self) -> &'static KeywordProfile {
        match self {
            EvalMode::Breeders => &BREEDER_PROFILE,
            EvalMode::Brands => &BRAND_PROFILE,
        }
    }

    /// Every query to try for `name`, paired with its name-free pattern.
    pub fn variants(&self, name: &str) -> Vec<QueryVariant> {
        self.templates()
            .iter()
            .map(|template| QueryVariant {
                query: template.replace(NAME_SLOT, name),
                pattern: template.replace(NAME_SLOT, PATTERN_SLOT),
            })
            .collect()
    }
}

impl FromStr for EvalMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "breeders" | "breeder" => Ok(EvalMode::Breeders),
            "brands" | "brand" => Ok(EvalMode::Brands),
            other => Err(format!("unknown mode '{}', expected breeders or brands", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryVariant {
    pub query: String,
    /// e.g. "[NAME] official website"
    pub pattern: String,
}
