use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

use crate::models::{EpisodeRecord, MetadataFile};

/// Cap on sanitized output filenames (without extension)
const MAX_FILENAME_LEN: usize = 200;

/// Write any serializable value as pretty-printed JSON
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file =
        std::fs::File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, value).context("Failed to write JSON")?;
    Ok(())
}

/// Save the metadata document (also serves as the AI-run checkpoint)
pub fn save_metadata(path: &Path, episodes: &[EpisodeRecord]) -> Result<()> {
    write_json_pretty(path, &MetadataFile::new(episodes.to_vec()))
}

/// Load previously written metadata as a map keyed by episode name.
///
/// Used for resumption: a missing or unreadable file just means a fresh
/// start, so both cases return an empty map with a warning.
pub fn load_existing_episodes(path: &Path) -> HashMap<String, EpisodeRecord> {
    if !path.exists() {
        return HashMap::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Could not read existing metadata {:?}: {}", path, e);
            return HashMap::new();
        }
    };

    match serde_json::from_str::<MetadataFile>(&content) {
        Ok(metadata) => metadata
            .episodes
            .into_iter()
            .map(|ep| (ep.episode_name.clone(), ep))
            .collect(),
        Err(e) => {
            warn!("Could not parse existing metadata {:?}: {}", path, e);
            HashMap::new()
        }
    }
}

/// Make an identifier filesystem-safe: replace illegal characters,
/// trim leading/trailing spaces and dots, cap the length.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            other => other,
        })
        .collect();
    let trimmed = replaced.trim_matches(|c| c == ' ' || c == '.');
    trimmed.chars().take(MAX_FILENAME_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EpisodeRecord;

    fn sample_record(name: &str) -> EpisodeRecord {
        EpisodeRecord::new(
            name.to_string(),
            name.to_string(),
            vec![],
            vec![],
            format!("{name}.txt"),
        )
    }

    #[test]
    fn test_sanitize_replaces_illegal_chars() {
        assert_eq!(sanitize_filename("a/b:c?d"), "a_b_c_d");
        assert_eq!(sanitize_filename("  .name. "), "name");
    }

    #[test]
    fn test_sanitize_caps_length() {
        let long = "x".repeat(300);
        assert_eq!(sanitize_filename(&long).chars().count(), 200);
    }

    #[test]
    fn test_metadata_round_trip_and_resume_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("episodes_metadata.json");

        let episodes = vec![sample_record("Ep One"), sample_record("Ep Two")];
        save_metadata(&path, &episodes).unwrap();

        let existing = load_existing_episodes(&path);
        assert_eq!(existing.len(), 2);
        assert!(existing.contains_key("Ep One"));
        assert!(existing.contains_key("Ep Two"));
    }

    #[test]
    fn test_missing_metadata_is_empty_map() {
        let existing = load_existing_episodes(Path::new("/nonexistent/metadata.json"));
        assert!(existing.is_empty());
    }
}
