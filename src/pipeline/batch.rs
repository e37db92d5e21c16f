use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::io::{episode_name, list_transcripts, read_jsonl, read_transcript, write_jsonl};
use crate::models::{BatchRequest, ChatMessage};

/// Result of building a batch submission file
#[derive(Debug)]
pub struct BatchResult {
    pub processed: usize,
    pub skipped: usize,
}

/// Build batch-inference requests from a transcript JSONL file.
///
/// Each input row needs an `id` (falling back to `episode-<line>`) and
/// a non-empty `text`. The optional system prompt is prepended as its
/// own message; the optional user template replaces `{transcript}` with
/// the text, otherwise the text is the user message verbatim.
pub fn run_batch(
    input: &Path,
    output: &Path,
    model: &str,
    max_tokens: u32,
    system_prompt: Option<&str>,
    user_template: Option<&str>,
) -> Result<BatchResult> {
    let scan = read_jsonl(input)?;
    let mut requests: Vec<BatchRequest> = Vec::new();
    let mut skipped = scan.skipped;

    for (line_num, row) in &scan.rows {
        let custom_id = row
            .get("id")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("episode-{line_num}"));

        let text = row.get("text").and_then(|v| v.as_str()).unwrap_or("");
        if text.is_empty() {
            warn!("Line {} has no text, skipping...", line_num);
            skipped += 1;
            continue;
        }

        let mut messages = Vec::new();
        if let Some(prompt) = system_prompt {
            messages.push(ChatMessage::system(prompt));
        }
        let user_content = match user_template {
            Some(template) => template.replace("{transcript}", text),
            None => text.to_string(),
        };
        messages.push(ChatMessage::user(user_content));

        requests.push(BatchRequest::new(&custom_id, model, messages, max_tokens));
    }

    write_jsonl(output, &requests)?;
    info!("Processed: {} episodes", requests.len());
    info!("Skipped: {} episodes", skipped);
    info!("Output file: {:?}", output);

    Ok(BatchResult {
        processed: requests.len(),
        skipped,
    })
}

/// Build batch-inference requests straight from a transcript directory.
///
/// Unlike [`run_batch`], the system prompt file is required here and its
/// absence is fatal.
pub fn run_batch_dir(
    input_dir: &Path,
    system_prompt_file: &Path,
    output: &Path,
    model: &str,
    max_tokens: u32,
) -> Result<BatchResult> {
    let system_prompt = std::fs::read_to_string(system_prompt_file)
        .with_context(|| format!("System prompt file {:?} not found", system_prompt_file))?;
    let system_prompt = system_prompt.trim().to_string();
    info!(
        "System prompt loaded ({} characters)",
        system_prompt.chars().count()
    );

    let files = list_transcripts(input_dir)?;
    info!("Found {} transcript files", files.len());
    info!("Model: {}", model);
    info!("Max tokens: {}", max_tokens);

    let mut requests: Vec<BatchRequest> = Vec::new();
    let mut skipped = 0;

    for (i, path) in files.iter().enumerate() {
        let name = episode_name(path);
        info!("Processing {}/{}: {}", i + 1, files.len(), name);

        let text = match read_transcript(path) {
            Ok(t) => t,
            Err(e) => {
                warn!("Error processing {:?}: {}", path, e);
                skipped += 1;
                continue;
            }
        };

        let messages = vec![
            ChatMessage::system(system_prompt.clone()),
            ChatMessage::user(text),
        ];
        requests.push(BatchRequest::new(&name, model, messages, max_tokens));
    }

    write_jsonl(output, &requests)?;
    info!("Processed: {} episodes", requests.len());
    info!("Skipped: {} episodes", skipped);
    info!("Output file: {:?}", output);

    Ok(BatchResult {
        processed: requests.len(),
        skipped,
    })
}
