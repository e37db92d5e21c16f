use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::heuristics::detect_guest_name;
use crate::io::{episode_name, list_transcripts, read_transcript, write_jsonl};
use crate::models::TranscriptRecord;

/// Result of a directory-to-JSONL conversion
#[derive(Debug)]
pub struct ConvertResult {
    pub processed: usize,
    pub failed: usize,
}

/// Convert every transcript in a directory into one JSONL row each,
/// carrying the raw text plus the detected guest name.
pub fn run_convert(input_dir: &Path, output: &Path) -> Result<ConvertResult> {
    let files = list_transcripts(input_dir)?;
    info!("Found {} transcript files", files.len());

    let mut records: Vec<TranscriptRecord> = Vec::new();
    let mut failed = 0;

    for (i, path) in files.iter().enumerate() {
        let name = episode_name(path);
        info!("Processing {}/{}: {}", i + 1, files.len(), name);

        let text = match read_transcript(path) {
            Ok(t) => t,
            Err(e) => {
                warn!("Error processing {:?}: {}", path, e);
                failed += 1;
                continue;
            }
        };

        let guest_name = detect_guest_name(&text).unwrap_or_else(|| name.clone());
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        records.push(TranscriptRecord {
            id: name.clone(),
            episode_name: name,
            guest_name,
            text,
            file_path: file_name,
        });
    }

    write_jsonl(output, &records)?;
    info!("Total episodes processed: {}", records.len());
    info!("Output saved to {:?}", output);

    Ok(ConvertResult {
        processed: records.len(),
        failed,
    })
}
