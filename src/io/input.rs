use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Files that live next to transcripts but are not episodes
pub const SKIP_FILES: &[&str] = &[
    "requirements.txt",
    "EXTRACTION_INSTRUCTIONS.md",
    "example_system_prompt.txt",
    "example_user_prompt_template.txt",
];

/// List `*.txt` transcript files in a directory, excluding the known
/// non-transcript files, sorted by name for deterministic runs.
pub fn list_transcripts(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read transcript directory: {:?}", dir))?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {:?}", dir))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        if SKIP_FILES.contains(&name) {
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}

/// Episode name: the transcript file stem
pub fn episode_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Read a whole transcript file
pub fn read_transcript(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
}
