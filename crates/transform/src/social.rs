use anyhow::{Context, Result, bail};
use crawl::JsonFile;
use enrich::SocialLinks;
use extract::{Platform, SocialLabel, split_unique_links};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

const LINKS_FIELD: &str = "socialMediaLinks";

/// Output shape for normalized social links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SocialFormat {
    /// `[{network, label}]`
    #[default]
    Labels,
    /// `{platform: [url]}`
    Platforms,
}

impl SocialFormat {
    pub fn normalize(&self, raw: &str) -> SocialLinks {
        match self {
            SocialFormat::Labels => SocialLinks::Labeled(normalize_labeled(raw)),
            SocialFormat::Platforms => SocialLinks::ByPlatform(normalize_by_platform(raw)),
        }
    }
}

/// Classified `{network, label}` pairs in source order. Unknown domains and URLs without a
/// usable label are dropped.
pub fn normalize_labeled(raw: &str) -> Vec<SocialLabel> {
    split_unique_links(raw)
        .into_iter()
        .filter_map(|url| {
            let network = Platform::classify(url)?;
            let label = network.label_for(url);
            if label.is_empty() {
                debug!(url, "Dropping social link without a label");
                return None;
            }
            Some(SocialLabel { network, label })
        })
        .collect()
}

/// Unique URLs grouped by platform. A repeated platform accumulates; nothing is overwritten.
pub fn normalize_by_platform(raw: &str) -> IndexMap<Platform, Vec<String>> {
    let mut by_platform: IndexMap<Platform, Vec<String>> = IndexMap::new();
    for url in split_unique_links(raw) {
        if let Some(platform) = Platform::classify(url) {
            by_platform.entry(platform).or_default().push(url.to_string());
        }
    }
    by_platform
}

/// Normalize one record in place. Returns false when the links were already normalized.
pub fn normalize_record(record: &mut Value, format: SocialFormat) -> Result<bool> {
    let Some(fields) = record.as_object_mut() else {
        bail!("Expected a JSON object, found {}", record);
    };

    let raw = match fields.get(LINKS_FIELD) {
        Some(Value::String(raw)) => raw.clone(),
        None | Some(Value::Null) => String::new(),
        Some(_) => return Ok(false),
    };

    let normalized = serde_json::to_value(format.normalize(&raw))?;
    fields.insert(LINKS_FIELD.to_string(), normalized);
    Ok(true)
}

/// Normalize every record of a JSON array, keeping all other fields as they are.
pub async fn normalize_file(input: &Path, output: &Path, format: SocialFormat) -> Result<usize> {
    let mut records: Vec<Value> = JsonFile::read(input).await?;

    let mut changed = 0;
    for (i, record) in records.iter_mut().enumerate() {
        if normalize_record(record, format).with_context(|| format!("Record {} in {:?}", i, input))? {
            changed += 1;
        }
    }

    JsonFile::write(output, &records).await?;
    info!(total = records.len(), changed, ?format, "Normalized social links");
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_domains_are_dropped() {
        let labels = normalize_labeled("https://www.instagram.com/foo, https://example.com/bar");
        assert_eq!(
            labels,
            vec![SocialLabel {
                network: Platform::Instagram,
                label: "@foo".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_path_excluded_from_labels() {
        let labels = normalize_labeled("https://facebook.com, https://twitter.com/acme/");
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].network, Platform::Twitter);
        assert_eq!(labels[0].label, "@acme");

        let map = normalize_by_platform("https://facebook.com");
        assert_eq!(map[&Platform::Facebook], vec!["https://facebook.com"]);
    }

    #[test]
    fn test_labels_keep_source_order() {
        let raw = "https://www.instagram.com/advancednutrientsofficial/, https://www.facebook.com/advancednutrients, https://www01.linkedin.com/company/advanced-nutrients-ltd-, https://www.youtube.com/user/advancednutrientsco";
        let labels: Vec<(Platform, String)> = normalize_labeled(raw)
            .into_iter()
            .map(|l| (l.network, l.label))
            .collect();

        assert_eq!(
            labels,
            vec![
                (Platform::Instagram, "@advancednutrientsofficial".to_string()),
                (Platform::Facebook, "advancednutrients".to_string()),
                (Platform::Linkedin, "advanced-nutrients-ltd-".to_string()),
                (Platform::Youtube, "advancednutrientsco".to_string()),
            ]
        );
    }

    #[test]
    fn test_repeated_platforms_accumulate() {
        let raw = "https://www.facebook.com/AgeOldOrganics, https://twitter.com/ageoldorganics, https://www.facebook.com/AgeOldOrganics, https://x.com/ageold";
        let map = normalize_by_platform(raw);

        assert_eq!(map.keys().collect::<Vec<_>>(), vec![&Platform::Facebook, &Platform::Twitter]);
        assert_eq!(map[&Platform::Facebook], vec!["https://www.facebook.com/AgeOldOrganics"]);
        assert_eq!(
            map[&Platform::Twitter],
            vec!["https://twitter.com/ageoldorganics", "https://x.com/ageold"]
        );
        assert!(normalize_by_platform("").is_empty());
    }

    #[test]
    fn test_record_fields_keep_their_place() {
        let mut record = json!({
            "name": "Acme",
            "socialMediaLinks": "https://www.instagram.com/acme",
            "link": "https://acme.com"
        });

        assert!(normalize_record(&mut record, SocialFormat::Platforms).unwrap());

        let keys: Vec<&String> = record.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["name", "socialMediaLinks", "link"]);
        assert_eq!(
            record["socialMediaLinks"],
            json!({ "instagram": ["https://www.instagram.com/acme"] })
        );
    }

    #[test]
    fn test_normalized_records_pass_through() {
        let mut record = json!({
            "name": "Acme",
            "socialMediaLinks": [{ "network": "instagram", "label": "@acme" }]
        });
        let before = record.clone();

        assert!(!normalize_record(&mut record, SocialFormat::Labels).unwrap());
        assert_eq!(record, before);

    }

    #[test]
    fn test_non_object_record_is_an_error() {
        let mut not_object = json!("Acme");
        let err = normalize_record(&mut not_object, SocialFormat::Labels).unwrap_err();

        assert!(err.to_string().contains("Expected a JSON object"));
        assert_eq!(not_object, json!("Acme"));
    }

    #[tokio::test]
    async fn test_normalize_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("brands.json");
        let output = dir.path().join("brands_social.json");
        std::fs::write(
            &input,
            r#"[
                {"name": "A", "socialMediaLinks": "https://www.tiktok.com/@agrow, https://example.com"},
                {"name": "B", "socialMediaLinks": ""}
            ]"#,
        )
        .unwrap();

        let changed = normalize_file(&input, &output, SocialFormat::Labels).await.unwrap();
        assert_eq!(changed, 2);

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(
            written,
            json!([
                {"name": "A", "socialMediaLinks": [{"network": "tiktok", "label": "@agrow"}]},
                {"name": "B", "socialMediaLinks": []}
            ])
        );
    }
}
