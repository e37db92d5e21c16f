//! Guest/host speaker segmentation over labeled transcript lines.

use regex::{Regex, RegexBuilder};

/// Substrings identifying the recurring host in a speaker label
pub const HOST_PATTERNS: &[&str] = &["lenny", "lennie", "host"];

/// Character budget for cleaned guest text, for downstream token limits
const MAX_CLEANED_CHARS: usize = 15_000;
const TRUNCATION_MARKER: &str = "... [truncated]";

/// Who the unlabeled continuation lines currently belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Speaker {
    Unknown,
    Host,
    Guest,
}

/// Regexes used by segmentation and cleanup, compiled once per call site
struct Patterns {
    /// `<label>[ (timestamp)]: <content>`
    speaker_line: Regex,
    /// Capitalized label followed by a colon, i.e. "looks like a new speaker"
    unlabeled_speaker: Regex,
}

impl Patterns {
    fn new() -> Self {
        Self {
            speaker_line: Regex::new(r"^([^:(]+)(?:\([^)]+\))?:\s*(.*)").expect("static pattern"),
            unlabeled_speaker: Regex::new(r"^[A-Z][^:]*:\s*").expect("static pattern"),
        }
    }
}

fn is_host_label(label: &str) -> bool {
    let lower = label.to_lowercase();
    HOST_PATTERNS.iter().any(|p| lower.contains(p))
}

fn is_guest_label(label: &str, guest_name: &str) -> bool {
    let label_lower = label.to_lowercase();
    let guest_lower = guest_name.to_lowercase();
    guest_lower.contains(&label_lower)
        || label_lower.contains(&guest_lower)
        || guest_name
            .split_whitespace()
            .filter(|word| word.len() > 3)
            .any(|word| label_lower.contains(&word.to_lowercase()))
}

/// Keep only lines attributable to the guest, dropping the host's lines
/// and ambiguous labels.
///
/// Unlabeled lines inherit the last classified speaker, so once in guest
/// state the guest's multi-line answers are kept intact. With no guest
/// hint, every non-host labeled line counts as guest content.
pub fn filter_guest_content(text: &str, guest_name: &str) -> String {
    let patterns = Patterns::new();
    let mut guest_lines: Vec<String> = Vec::new();
    let mut current = Speaker::Unknown;

    for line in text.lines() {
        if let Some(captures) = patterns.speaker_line.captures(line) {
            let label = captures[1].trim().to_string();
            let content = captures[2].trim().to_string();

            if is_host_label(&label) {
                current = Speaker::Host;
                continue;
            }

            if !guest_name.is_empty() {
                if is_guest_label(&label, guest_name) {
                    current = Speaker::Guest;
                    if !content.is_empty() {
                        guest_lines.push(content);
                    }
                } else if current == Speaker::Guest && !content.is_empty() {
                    // Ambiguous label mid-answer: assume the guest kept talking
                    guest_lines.push(content);
                }
            } else if !content.is_empty() {
                current = Speaker::Guest;
                guest_lines.push(content);
            }
        } else if current == Speaker::Guest && !line.trim().is_empty() {
            // Continuation line, unless it reads like a new speaker header
            if !patterns.unlabeled_speaker.is_match(line) {
                guest_lines.push(line.trim().to_string());
            }
        }
    }

    guest_lines.join("\n")
}

/// Segment to guest-only content, then scrub residual timestamps,
/// sponsor/intro boilerplate and host-question lines, and truncate to
/// the character budget.
pub fn clean_transcript(text: &str, guest_name: &str) -> String {
    let mut text = filter_guest_content(text, guest_name);

    let timestamp = Regex::new(r"\([^)]*:\d{2}:\d{2}[^)]*\)").expect("static pattern");
    text = timestamp.replace_all(&text, "").into_owned();

    let leading_label = Regex::new(r"(?m)^[^:(\n]+(?:\([^)]+\))?:\s*").expect("static pattern");
    text = leading_label.replace_all(&text, "").into_owned();

    for opener in [
        r"This episode is brought to you by.*?\.",
        r"Today my guest is.*?\.",
        r"In our conversation.*?\.",
    ] {
        let boilerplate = RegexBuilder::new(opener)
            .dot_matches_new_line(true)
            .case_insensitive(true)
            .build()
            .expect("static pattern");
        text = boilerplate.replace_all(&text, "").into_owned();
    }

    // Interviewer questions that slipped past attribution
    let question = RegexBuilder::new(
        r"^.*(?:what|how|why|when|where|tell me|can you|would you).*\?.*$",
    )
    .multi_line(true)
    .case_insensitive(true)
    .build()
    .expect("static pattern");
    text = question.replace_all(&text, "").into_owned();

    let blank_runs = Regex::new(r"\n\s*\n\s*\n+").expect("static pattern");
    text = blank_runs.replace_all(&text, "\n\n").into_owned();

    let mut text = text.trim().to_string();
    if text.chars().count() > MAX_CLEANED_CHARS {
        text = text.chars().take(MAX_CLEANED_CHARS).collect();
        text.push_str(TRUNCATION_MARKER);
    }
    text
}

/// Best-effort guest name: the first labeled, parenthesized,
/// non-host line among the first 20. Returns None when nothing matches;
/// callers fall back to the episode name.
pub fn detect_guest_name(text: &str) -> Option<String> {
    for line in text.lines().take(20) {
        if !line.contains(':') || !line.contains('(') {
            continue;
        }
        let lower = line.to_lowercase();
        if HOST_PATTERNS.iter().any(|p| lower.contains(p)) {
            continue;
        }
        let label = line.split('(').next().unwrap_or("").trim();
        if !label.is_empty() {
            return Some(label.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_line_excluded_guest_kept() {
        let text = "Lenny (01:00): What do you think?\nJane Doe (01:05): I think iteration matters.";
        let filtered = filter_guest_content(text, "Jane Doe");
        assert!(!filtered.contains("What do you think"));
        assert!(filtered.contains("I think iteration matters."));
    }

    #[test]
    fn test_continuation_lines_inherit_guest() {
        let text = "Jane Doe (01:05): First part of the answer.\n\
                    And this continues the same thought.\n\
                    Lenny (01:30): Next question.";
        let filtered = filter_guest_content(text, "Jane Doe");
        assert!(filtered.contains("First part of the answer."));
        assert!(filtered.contains("And this continues the same thought."));
        assert!(!filtered.contains("Next question."));
    }

    #[test]
    fn test_partial_guest_name_match() {
        // A >3-char word of the hint appearing in the label is enough
        let text = "Doe (01:05): Matched by surname only.";
        let filtered = filter_guest_content(text, "Jane Doe Smithson");
        assert!(filtered.contains("Matched by surname only."));
    }

    #[test]
    fn test_no_hint_keeps_all_non_host_lines() {
        let text = "Lenny (01:00): Question here.\nSomeone (01:05): An unattributed answer.";
        let filtered = filter_guest_content(text, "");
        assert_eq!(filtered, "An unattributed answer.");
    }

    #[test]
    fn test_ambiguous_label_only_kept_mid_answer() {
        let text = "Narrator (00:01): Opening words.\n\
                    Jane (00:10): My main point.\n\
                    Narrator (00:20): Still the guest talking here.";
        let filtered = filter_guest_content(text, "Jane");
        // First Narrator line precedes any guest state, second follows it
        assert!(!filtered.contains("Opening words."));
        assert!(filtered.contains("My main point."));
        assert!(filtered.contains("Still the guest talking here."));
    }

    #[test]
    fn test_clean_strips_questions_and_boilerplate() {
        let text = "Jane (00:05): This episode is brought to you by Acme. \
                    The real lesson is focus.\n\
                    Jane (00:15): So how would you even start?\n\
                    Jane (00:20): You start by writing it down.";
        let cleaned = clean_transcript(text, "Jane");
        assert!(!cleaned.contains("brought to you by"));
        assert!(!cleaned.contains("how would you even start"));
        assert!(cleaned.contains("The real lesson is focus."));
        assert!(cleaned.contains("You start by writing it down."));
    }

    #[test]
    fn test_clean_truncates_long_text() {
        let line = "Jane (00:05): All substance here with plenty of words to fill space.\n";
        let text = line.repeat(400);
        let cleaned = clean_transcript(&text, "Jane");
        assert!(cleaned.ends_with(TRUNCATION_MARKER));
        assert!(cleaned.chars().count() <= MAX_CLEANED_CHARS + TRUNCATION_MARKER.len());
    }

    #[test]
    fn test_detect_guest_name() {
        let text = "Lenny (00:00): Welcome to the show.\nAda Chen (00:12): Thanks for having me.";
        assert_eq!(detect_guest_name(text), Some("Ada Chen".to_string()));
    }

    #[test]
    fn test_detect_guest_name_none_when_only_host() {
        let text = "Lenny (00:00): Welcome.\nLenny (00:10): Still just me.";
        assert_eq!(detect_guest_name(text), None);
    }
}
