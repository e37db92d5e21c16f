use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::heuristics::build_episode;
use crate::io::{episode_name, list_transcripts, read_transcript, save_metadata};
use crate::models::EpisodeRecord;

/// Result of a heuristic extraction run
#[derive(Debug)]
pub struct ExtractResult {
    pub processed: usize,
    pub failed: usize,
}

/// Run heuristic metadata extraction over every transcript in a
/// directory and write the aggregate metadata JSON.
///
/// Unreadable files are logged and skipped; they never abort the batch.
pub fn run_extract(input_dir: &Path, output: &Path) -> Result<ExtractResult> {
    let files = list_transcripts(input_dir)?;
    info!("Found {} transcript files", files.len());

    let mut episodes: Vec<EpisodeRecord> = Vec::new();
    let mut failed = 0;

    for (i, path) in files.iter().enumerate() {
        let name = episode_name(path);
        info!("Processing {}/{}: {}", i + 1, files.len(), name);

        let content = match read_transcript(path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Error processing {:?}: {}", path, e);
                failed += 1;
                continue;
            }
        };

        episodes.push(build_episode(&name, &content, &path.to_string_lossy()));
    }

    save_metadata(output, &episodes)?;
    info!("Processed {} episodes", episodes.len());
    info!("Metadata saved to {:?}", output);

    Ok(ExtractResult {
        processed: episodes.len(),
        failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetadataFile;
    use std::fs;

    #[test]
    fn test_extract_writes_metadata_document() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("episodes_metadata.json");

        fs::write(
            dir.path().join("Jane Doe.txt"),
            "Lenny (00:00): Welcome to the show.\n\
             Jane Doe (00:10): The key lesson is that roadmap planning beats guessing every time.",
        )
        .unwrap();

        let result = run_extract(dir.path(), &out).unwrap();
        assert_eq!(result.processed, 1);
        assert_eq!(result.failed, 0);

        let metadata: MetadataFile =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(metadata.total_episodes, 1);
        assert_eq!(metadata.episodes[0].episode_name, "Jane Doe");
        assert_eq!(metadata.episodes[0].guest_name, "Jane Doe");
        assert!(metadata.episodes[0].key_takeaways.len() >= 3);
        assert!(metadata.episodes[0].metadata_tags.len() >= 3);
    }

    #[test]
    fn test_extract_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("meta.json");
        let result = run_extract(dir.path(), &out).unwrap();
        assert_eq!(result.processed, 0);
    }
}
