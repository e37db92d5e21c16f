use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use crate::heuristics::{clean_transcript, detect_guest_name};
use crate::io::{episode_name, list_transcripts, load_existing_episodes, read_transcript, save_metadata};
use crate::llm::{build_extraction_prompt, parse_model_json, InferenceClient};
use crate::models::{ChatMessage, EpisodeRecord};

/// Knobs for an AI extraction run
#[derive(Debug, Clone)]
pub struct ExtractAiConfig {
    /// Delay between consecutive API requests (rate limiting)
    pub request_delay: Duration,
    /// Incremental checkpoint interval, in newly processed episodes
    pub checkpoint_every: usize,
}

impl Default for ExtractAiConfig {
    fn default() -> Self {
        Self {
            request_delay: Duration::from_secs(1),
            checkpoint_every: 10,
        }
    }
}

/// Result of an AI extraction run
#[derive(Debug)]
pub struct ExtractAiResult {
    pub total: usize,
    pub newly_processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Extract episode metadata with the hosted model, resuming from a
/// previous run's output file.
///
/// The output file doubles as the checkpoint: episodes already present
/// in it are carried over without another API call, and progress is
/// flushed every `checkpoint_every` new episodes so an interrupted run
/// loses at most one batch.
pub async fn run_extract_ai(
    client: &InferenceClient,
    input_dir: &Path,
    output: &Path,
    config: &ExtractAiConfig,
) -> Result<ExtractAiResult> {
    let files = list_transcripts(input_dir)?;
    info!("Found {} transcript files", files.len());
    info!("Using model: {}", client.model());

    let existing = load_existing_episodes(output);
    if !existing.is_empty() {
        info!(
            "Loaded {} existing episodes (will skip if already processed)",
            existing.len()
        );
    }

    let mut episodes: Vec<EpisodeRecord> = Vec::new();
    let mut newly_processed = 0;
    let mut skipped = 0;
    let mut failed = 0;

    for (i, path) in files.iter().enumerate() {
        let name = episode_name(path);

        if let Some(record) = existing.get(&name) {
            info!(
                "[{}/{}] Skipping (already processed): {}",
                i + 1,
                files.len(),
                name
            );
            episodes.push(record.clone());
            skipped += 1;
            continue;
        }

        info!("[{}/{}] Processing: {}", i + 1, files.len(), name);

        match process_one(client, path, &name).await {
            Ok(record) => {
                episodes.push(record);
                newly_processed += 1;

                if newly_processed % config.checkpoint_every == 0 {
                    save_metadata(output, &episodes)?;
                    info!("Saved progress ({} new episodes processed)", newly_processed);
                }
            }
            Err(e) => {
                warn!("Failed to extract metadata for {}: {}", name, e);
                failed += 1;
            }
        }

        if i + 1 < files.len() {
            tokio::time::sleep(config.request_delay).await;
        }
    }

    save_metadata(output, &episodes)?;

    info!("Processing complete!");
    info!("Total episodes: {}", episodes.len());
    info!("Newly processed: {}", newly_processed);
    info!("Skipped (already processed): {}", skipped);
    info!("Failed: {}", failed);
    info!("Metadata saved to {:?}", output);

    Ok(ExtractAiResult {
        total: episodes.len(),
        newly_processed,
        skipped,
        failed,
    })
}

/// One episode: clean the guest content, call the model, parse its JSON
async fn process_one(
    client: &InferenceClient,
    path: &Path,
    name: &str,
) -> Result<EpisodeRecord> {
    let content = read_transcript(path)?;
    let guest_name = detect_guest_name(&content);

    let cleaned = clean_transcript(&content, guest_name.as_deref().unwrap_or(""));
    let prompt = build_extraction_prompt(name, guest_name.as_deref(), &cleaned);

    let reply = client.chat(vec![ChatMessage::user(prompt)]).await?;
    let extraction = parse_model_json(&reply)?;

    Ok(EpisodeRecord::new(
        name.to_string(),
        guest_name.unwrap_or_else(|| name.to_string()),
        extraction.key_takeaways,
        extraction.metadata_tags,
        path.to_string_lossy().into_owned(),
    ))
}
