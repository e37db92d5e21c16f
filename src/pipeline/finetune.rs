use std::path::Path;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use regex::Regex;
use tracing::{info, warn};

use crate::io::{episode_name, list_transcripts, read_transcript, write_jsonl};
use crate::models::FinetuneExample;

/// Fixed seed so train/validation splits are reproducible
const SHUFFLE_SEED: u64 = 42;

/// Transcripts shorter than this are skipped entirely
const MIN_TRANSCRIPT_CHARS: usize = 500;

/// Chunking bounds for instruction-completion pairs
#[derive(Debug, Clone)]
pub struct FinetuneConfig {
    pub min_chunk_chars: usize,
    pub max_chunk_chars: usize,
    /// Fraction of examples held out for validation
    pub val_split: f64,
}

impl Default for FinetuneConfig {
    fn default() -> Self {
        Self {
            min_chunk_chars: 200,
            max_chunk_chars: 2000,
            val_split: 0.1,
        }
    }
}

/// Result of fine-tuning data preparation
#[derive(Debug)]
pub struct FinetuneResult {
    pub processed: usize,
    pub skipped: usize,
    pub train_examples: usize,
    pub val_examples: usize,
}

/// Build instruction-completion pairs from a transcript directory and
/// write shuffled train/validation JSONL files.
pub fn run_finetune(
    input_dir: &Path,
    train_output: &Path,
    val_output: &Path,
    config: &FinetuneConfig,
) -> Result<FinetuneResult> {
    let files = list_transcripts(input_dir)?;
    info!("Found {} transcript files", files.len());

    let mut examples: Vec<FinetuneExample> = Vec::new();
    let mut processed = 0;
    let mut skipped = 0;

    for (i, path) in files.iter().enumerate() {
        let name = episode_name(path);
        info!("Processing {}/{}: {}", i + 1, files.len(), name);

        let transcript = match read_transcript(path) {
            Ok(t) => t,
            Err(e) => {
                warn!("Error processing {:?}: {}", path, e);
                skipped += 1;
                continue;
            }
        };

        if transcript.chars().count() < MIN_TRANSCRIPT_CHARS {
            skipped += 1;
            continue;
        }

        let chunks = chunk_transcript(&transcript, config.min_chunk_chars, config.max_chunk_chars);
        if chunks.is_empty() {
            skipped += 1;
            continue;
        }

        for chunk in chunks {
            examples.push(FinetuneExample {
                prompt: format!(
                    "Based on insights from the podcast episode with {name}, \
                     share key product management advice and frameworks discussed."
                ),
                completion: clean_for_finetuning(&chunk),
            });
        }
        processed += 1;
    }

    info!("Total examples created: {}", examples.len());

    let mut rng = StdRng::seed_from_u64(SHUFFLE_SEED);
    examples.shuffle(&mut rng);

    let split_idx = (examples.len() as f64 * (1.0 - config.val_split)) as usize;
    let val_examples = examples.split_off(split_idx);
    let train_examples = examples;

    write_jsonl(train_output, &train_examples)?;
    write_jsonl(val_output, &val_examples)?;

    info!("Training examples: {}", train_examples.len());
    info!("Validation examples: {}", val_examples.len());

    Ok(FinetuneResult {
        processed,
        skipped,
        train_examples: train_examples.len(),
        val_examples: val_examples.len(),
    })
}

/// Group paragraphs into chunks within the [min, max] character bounds.
/// Chunks that never reach the minimum are dropped.
fn chunk_transcript(transcript: &str, min_chars: usize, max_chars: usize) -> Vec<String> {
    let paragraphs: Vec<&str> = transcript
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut chunks: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for para in paragraphs {
        let para_len = para.chars().count();
        if current_len + para_len > max_chars && !current.is_empty() {
            let chunk = current.join("\n\n");
            if chunk.chars().count() >= min_chars {
                chunks.push(chunk);
            }
            current = vec![para];
            current_len = para_len;
        } else {
            current.push(para);
            current_len += para_len + 2;
        }
    }

    if !current.is_empty() {
        let chunk = current.join("\n\n");
        if chunk.chars().count() >= min_chars {
            chunks.push(chunk);
        }
    }

    chunks
}

/// Strip timestamps, speaker labels and stray whitespace from a chunk
fn clean_for_finetuning(text: &str) -> String {
    let timestamp = Regex::new(r"\(\d{2}:\d{2}:\d{2}\)").expect("static pattern");
    let text = timestamp.replace_all(text, "");

    let labeled_line =
        Regex::new(r"(?m)^[A-Za-z \t&.]+ ?(?:\([^)]+\))?:\s*").expect("static pattern");
    let text = labeled_line.replace_all(&text, "");

    let bare_colon = Regex::new(r"(?m)^:\s*$").expect("static pattern");
    let text = bare_colon.replace_all(&text, "");

    let blank_runs = Regex::new(r"\n\s*\n\s*\n+").expect("static pattern");
    let text = blank_runs.replace_all(&text, "\n\n");

    let spaces = Regex::new(r"[ \t]+").expect("static pattern");
    let text = spaces.replace_all(&text, " ");

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_jsonl;
    use std::fs;

    #[test]
    fn test_chunking_respects_bounds() {
        let para = "word ".repeat(100); // ~500 chars
        let transcript = format!("{para}\n\n{para}\n\n{para}\n\n{para}");
        let chunks = chunk_transcript(&transcript, 200, 1200);

        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            assert!(chunk.chars().count() >= 200);
        }
    }

    #[test]
    fn test_short_chunks_dropped() {
        let chunks = chunk_transcript("tiny paragraph", 200, 2000);
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_clean_strips_labels_and_timestamps() {
        let text = "Ada Chen (00:00:00): We shipped it.\n(00:01:02)\nLenny Rachitsky : Nice.";
        let cleaned = clean_for_finetuning(text);
        assert!(!cleaned.contains("Ada Chen"));
        assert!(!cleaned.contains("(00:01:02)"));
        assert!(cleaned.contains("We shipped it."));
        assert!(cleaned.contains("Nice."));
    }

    #[test]
    fn test_finetune_split_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let train = dir.path().join("train_data.jsonl");
        let val = dir.path().join("val_data.jsonl");

        let para = "Jane said something insightful about product work here. ".repeat(10);
        let mut transcript = String::new();
        for _ in 0..12 {
            transcript.push_str(&para);
            transcript.push_str("\n\n");
        }
        fs::write(dir.path().join("Ep.txt"), &transcript).unwrap();

        let config = FinetuneConfig {
            val_split: 0.25,
            ..Default::default()
        };
        let first = run_finetune(dir.path(), &train, &val, &config).unwrap();
        let first_train = fs::read_to_string(&train).unwrap();

        let second = run_finetune(dir.path(), &train, &val, &config).unwrap();
        let second_train = fs::read_to_string(&train).unwrap();

        assert_eq!(first.train_examples, second.train_examples);
        assert_eq!(first_train, second_train);
        assert_eq!(
            first.train_examples + first.val_examples,
            second.train_examples + second.val_examples
        );
    }

    #[test]
    fn test_short_transcripts_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let train = dir.path().join("train.jsonl");
        let val = dir.path().join("val.jsonl");

        fs::write(dir.path().join("Short.txt"), "too short").unwrap();

        let result = run_finetune(dir.path(), &train, &val, &FinetuneConfig::default()).unwrap();
        assert_eq!(result.processed, 0);
        assert_eq!(result.skipped, 1);

        let scan = read_jsonl(&train).unwrap();
        assert!(scan.rows.is_empty());
    }
}
