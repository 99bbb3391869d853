//! JSON output for the data files the site reads at build time.
//!
//! # Output Structure
//!
//! ```text
//! data_dir/
//! ├── articles.json
//! ├── navigation.json
//! └── category-stats.json
//! ```

use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize `value` as 2-space indented JSON and write it to `path`.
///
/// The parent directory is created when missing.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(value)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(path, json).await?;
    info!("Wrote JSON file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_write_pretty_json_creates_parent() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("navigation.json");

        write_pretty_json(&path, &json!({"mainMenu": [{"name": "Home"}]}))
            .await
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("{\n  \"mainMenu\""));
    }
}
