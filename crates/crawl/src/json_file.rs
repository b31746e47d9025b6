use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Reading and writing the pretty-printed JSON files passed between stages.
pub struct JsonFile;

impl JsonFile {
    pub async fn read<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let content = fs::read_to_string(path)
            .await
            .context(format!("Failed to read file: {:?}", path))?;

        serde_json::from_str(&content).context(format!("Malformed JSON in {:?}", path))
    }

    pub async fn write<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json)
            .await
            .context(format!("Failed to write file: {:?}", path))
    }

    /// Write through a sibling temp file and rename it over `path`, so readers only ever
    /// see the previous complete document or the new one.
    pub async fn write_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        let staging = staging_path(path);

        fs::write(&staging, json)
            .await
            .context(format!("Failed to write file: {:?}", staging))?;
        fs::rename(&staging, path)
            .await
            .context(format!("Failed to replace {:?}", path))
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}
