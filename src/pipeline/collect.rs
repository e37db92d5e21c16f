use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use crate::io::{read_jsonl, write_json_pretty, write_jsonl};
use crate::models::{ExtractedEpisode, MetadataFile};

/// Output layout for the joined records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectFormat {
    /// One compact object per line
    Jsonl,
    /// A single `{total_episodes, episodes}` document
    Json,
}

impl CollectFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(Self::Jsonl),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown output format: {other} (expected json or jsonl)"),
        }
    }
}

#[derive(Debug, Serialize)]
struct CollectedDocument {
    total_episodes: usize,
    episodes: Vec<ExtractedEpisode>,
}

/// Result of the metadata JOIN
#[derive(Debug)]
pub struct CollectResult {
    pub processed: usize,
    pub skipped: usize,
}

/// Join a batch JSONL file with extracted metadata, keyed by episode
/// identifier, and emit one `ExtractedEpisode` per batch row.
///
/// A missing metadata file is a warning, not an error: the rows are
/// still emitted with empty takeaways and tags.
pub fn run_collect(
    input: &Path,
    output: &Path,
    metadata_file: Option<&Path>,
    format: CollectFormat,
) -> Result<CollectResult> {
    let lookup = metadata_file.map(load_metadata_lookup).unwrap_or_default();
    if !lookup.is_empty() {
        info!("Loaded metadata for {} episodes", lookup.len());
    }

    let scan = read_jsonl(input)?;
    let mut episodes: Vec<ExtractedEpisode> = Vec::new();

    for (line_num, row) in &scan.rows {
        let custom_id = row
            .get("custom_id")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("episode-{line_num}"));

        let (takeaways, tags) = lookup
            .get(&custom_id)
            .map(|(t, g)| (t.clone(), g.clone()))
            .unwrap_or_default();

        episodes.push(ExtractedEpisode {
            custom_id,
            key_insights: takeaways.clone(),
            takeaways,
            metadata_tags: tags,
        });
    }

    match format {
        CollectFormat::Jsonl => write_jsonl(output, &episodes)?,
        CollectFormat::Json => {
            let document = CollectedDocument {
                total_episodes: episodes.len(),
                episodes,
            };
            write_json_pretty(output, &document)?;
            return finish(document.total_episodes, scan.skipped, output);
        }
    }

    finish(episodes.len(), scan.skipped, output)
}

fn finish(processed: usize, skipped: usize, output: &Path) -> Result<CollectResult> {
    info!("Processed: {} episodes", processed);
    info!("Skipped: {} episodes", skipped);
    info!("Output file: {:?}", output);
    Ok(CollectResult { processed, skipped })
}

type MetadataLookup = HashMap<String, (Vec<String>, Vec<String>)>;

/// Load `(key_takeaways, metadata_tags)` per episode name from a
/// metadata JSON document
fn load_metadata_lookup(path: &Path) -> MetadataLookup {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(
                "Metadata file {:?} not found ({}). Continuing without metadata.",
                path, e
            );
            return HashMap::new();
        }
    };

    match serde_json::from_str::<MetadataFile>(&content) {
        Ok(metadata) => metadata
            .episodes
            .into_iter()
            .map(|ep| (ep.episode_name, (ep.key_takeaways, ep.metadata_tags)))
            .collect(),
        Err(e) => {
            warn!("Could not parse metadata file {:?}: {}", path, e);
            HashMap::new()
        }
    }
}
