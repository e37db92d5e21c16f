//! Cue-word sentence scan for "key takeaway" extraction.

use std::collections::HashSet;

use regex::Regex;

/// Cue substrings that mark a sentence as a candidate insight
const INSIGHT_KEYWORDS: &[&str] = &[
    "important",
    "key",
    "critical",
    "essential",
    "should",
    "must",
    "need to",
    "learned",
    "discovered",
    "realized",
    "found that",
    "the key",
    "the most",
    "principle",
    "framework",
    "strategy",
    "approach",
    "method",
    "way to",
    "difference between",
    "better",
    "best",
    "effective",
    "successful",
];

/// Host-intro openings that disqualify a sentence
const INTRO_PREFIXES: &[&str] = &["This episode", "Today my guest"];

const MIN_SENTENCE_CHARS: usize = 30;
const MAX_SENTENCE_CHARS: usize = 300;

/// Dedup window: candidates are compared on their first 200 chars
const DEDUP_PREFIX_CHARS: usize = 200;

/// Extract at most `num_takeaways` insight strings from transcript text.
///
/// Two passes feed the candidate list in order: cue-word sentences from
/// the parenthetical-stripped text, then bullet/numbered list items from
/// the original text. Candidates are de-duplicated case-insensitively
/// on their first 200 characters.
pub fn extract_key_takeaways(text: &str, num_takeaways: usize) -> Vec<String> {
    // Strip speaker tags "(...)": and bare parentheticals before splitting
    let speaker_tag = Regex::new(r"\([^)]+\):").expect("static pattern");
    let parenthetical = Regex::new(r"\([^)]+\)").expect("static pattern");
    let cleaned = speaker_tag.replace_all(text, "");
    let cleaned = parenthetical.replace_all(&cleaned, "");

    let mut candidates: Vec<String> = Vec::new();

    for sentence in cleaned.split(['.', '!', '?']) {
        let sentence = sentence.trim();
        let len = sentence.chars().count();
        if !(MIN_SENTENCE_CHARS..=MAX_SENTENCE_CHARS).contains(&len) {
            continue;
        }

        let lower = sentence.to_lowercase();
        if !INSIGHT_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            continue;
        }
        if INTRO_PREFIXES.iter().any(|p| sentence.starts_with(p)) {
            continue;
        }

        candidates.push(sentence.to_string());
    }

    // Numbered and bulleted list items from the original text
    let list_item = Regex::new(r"(?m)^\s*(?:\d+\.|[-*])\s+([^\n]+)").expect("static pattern");
    for capture in list_item.captures_iter(text) {
        candidates.push(capture[1].to_string());
    }

    // De-duplicate, preserving first-seen order
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique: Vec<String> = Vec::new();
    for candidate in candidates {
        let clipped: String = candidate.trim().chars().take(DEDUP_PREFIX_CHARS).collect();
        if clipped.is_empty() {
            continue;
        }
        if seen.insert(clipped.to_lowercase()) {
            unique.push(clipped);
        }
    }

    unique.truncate(num_takeaways);
    unique
}
