use serde::{Deserialize, Serialize};

/// Minimum number of takeaways/tags guaranteed after padding
pub const MIN_FIELD_COUNT: usize = 3;
/// Maximum number of takeaways/tags kept per episode
pub const MAX_FIELD_COUNT: usize = 5;

/// Default tags appended when scoring finds fewer than three themes
pub const DEFAULT_TAGS: [&str; 3] = ["Product Management", "Leadership", "Strategy"];

/// Structured metadata for one podcast episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Unique key, derived from the transcript file stem
    pub episode_name: String,
    /// Best-effort guest name; falls back to the episode name
    pub guest_name: String,
    /// At most five, at least three (after padding)
    pub key_takeaways: Vec<String>,
    /// At most five, at least three (after padding)
    pub metadata_tags: Vec<String>,
    /// Source transcript file
    pub file_path: String,
}

impl EpisodeRecord {
    /// Build a record from raw extraction results, enforcing the
    /// 3-to-5 bounds on takeaways and tags.
    pub fn new(
        episode_name: String,
        guest_name: String,
        mut key_takeaways: Vec<String>,
        mut metadata_tags: Vec<String>,
        file_path: String,
    ) -> Self {
        if key_takeaways.len() < MIN_FIELD_COUNT {
            key_takeaways.extend(filler_takeaways(&episode_name));
        }
        key_takeaways.truncate(MAX_FIELD_COUNT);

        if metadata_tags.len() < MIN_FIELD_COUNT {
            metadata_tags.extend(DEFAULT_TAGS.iter().map(|t| t.to_string()));
        }
        metadata_tags.truncate(MAX_FIELD_COUNT);

        Self {
            episode_name,
            guest_name,
            key_takeaways,
            metadata_tags,
            file_path,
        }
    }
}

/// Template takeaways used when heuristic extraction comes up short
fn filler_takeaways(episode_name: &str) -> Vec<String> {
    vec![
        format!("Insights on {episode_name}'s approach to product and technology"),
        format!("Key lessons from {episode_name}'s experience"),
        "Practical advice for product and tech leaders".to_string(),
    ]
}

/// Top-level metadata document: the extraction output and the
/// resumption checkpoint for AI runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataFile {
    pub total_episodes: usize,
    pub episodes: Vec<EpisodeRecord>,
}

impl MetadataFile {
    pub fn new(episodes: Vec<EpisodeRecord>) -> Self {
        Self {
            total_episodes: episodes.len(),
            episodes,
        }
    }
}
