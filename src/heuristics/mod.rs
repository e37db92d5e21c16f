pub mod insights;
pub mod segmenter;
pub mod tags;

pub use insights::*;
pub use segmenter::*;
pub use tags::*;

use crate::models::{EpisodeRecord, MAX_FIELD_COUNT};

/// Run the full heuristic pipeline over one transcript's text and build
/// its episode record: guest-name detection, insight extraction and
/// theme scoring, with the record constructor enforcing the 3-to-5
/// bounds on both lists.
pub fn build_episode(episode_name: &str, content: &str, file_path: &str) -> EpisodeRecord {
    let guest_name = detect_guest_name(content).unwrap_or_else(|| episode_name.to_string());
    let takeaways = extract_key_takeaways(content, MAX_FIELD_COUNT);
    let tags = extract_metadata_tags(content, MAX_FIELD_COUNT);

    EpisodeRecord::new(
        episode_name.to_string(),
        guest_name,
        takeaways,
        tags,
        file_path.to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MIN_FIELD_COUNT;

    #[test]
    fn test_build_episode_bounds_hold() {
        let content = "Lenny (00:00): Welcome.\n\
                       Jane Doe (00:10): The key lesson is that roadmap planning beats guessing.";
        let record = build_episode("Jane Doe Interview", content, "Jane Doe Interview.txt");

        assert_eq!(record.guest_name, "Jane Doe");
        assert!(record.key_takeaways.len() >= MIN_FIELD_COUNT);
        assert!(record.key_takeaways.len() <= MAX_FIELD_COUNT);
        assert!(record.metadata_tags.len() >= MIN_FIELD_COUNT);
        assert!(record.metadata_tags.len() <= MAX_FIELD_COUNT);
    }

    #[test]
    fn test_build_episode_guest_falls_back_to_episode_name() {
        let record = build_episode("Solo Episode", "Lenny (00:00): Just me today.", "Solo.txt");
        assert_eq!(record.guest_name, "Solo Episode");
    }
}
