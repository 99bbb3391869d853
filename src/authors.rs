//! Author persona loading.
//!
//! Personas live under the authors directory:
//!
//! ```text
//! authors/
//! ├── index.json             # {"authors": [{"id": "maya-chen", "profilePath": "profiles/maya-chen.json"}]}
//! └── profiles/
//!     └── maya-chen.json     # full AuthorProfile
//! ```
//!
//! An entry without `profilePath` resolves to `profiles/<id>.json`.

use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument, warn};

use crate::models::{AuthorProfile, AuthorRef, AuthorsIndex};

fn profile_path(authors_dir: &Path, author: &AuthorRef) -> PathBuf {
    match &author.profile_path {
        Some(rel) => authors_dir.join(rel),
        None => authors_dir.join("profiles").join(format!("{}.json", author.id)),
    }
}

/// Load every author listed in `index.json`, in index order.
///
/// # Arguments
///
/// * `authors_dir` - Directory holding `index.json` and the profile files
///
/// # Returns
///
/// The parsed profiles. Entries whose profile is missing are left out, so
/// the result may be shorter than the index.
///
/// # Errors
///
/// Fails if the index itself is missing or malformed. A profile that cannot
/// be read or parsed is logged and skipped.
#[instrument(level = "info", skip_all, fields(authors_dir = %authors_dir.display()))]
pub async fn load_authors(authors_dir: &Path) -> Result<Vec<AuthorProfile>, Box<dyn Error>> {
    let index_path = authors_dir.join("index.json");
    let raw = fs::read_to_string(&index_path)
        .await
        .map_err(|e| format!("cannot read authors index {}: {e}", index_path.display()))?;
    let index: AuthorsIndex = serde_json::from_str(&raw)?;

    let mut authors = Vec::with_capacity(index.authors.len());
    for author in &index.authors {
        let path = profile_path(authors_dir, author);
        let profile = match fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str::<AuthorProfile>(&raw),
            Err(e) => {
                warn!(id = %author.id, path = %path.display(), error = %e, "Author profile unreadable; skipping");
                continue;
            }
        };
        match profile {
            Ok(profile) => authors.push(profile),
            Err(e) => {
                warn!(id = %author.id, path = %path.display(), error = %e, "Author profile malformed; skipping")
            }
        }
    }

    info!(count = authors.len(), "Loaded authors");
    Ok(authors)
}
