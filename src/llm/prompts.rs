use regex::RegexBuilder;
use serde::Deserialize;
use thiserror::Error;

/// Metadata object the model is asked to return
#[derive(Debug, Clone, Deserialize)]
pub struct AiExtraction {
    #[serde(default)]
    pub key_takeaways: Vec<String>,
    #[serde(default)]
    pub metadata_tags: Vec<String>,
}

/// Failures turning a model reply into an `AiExtraction`
#[derive(Debug, Error)]
pub enum ResponseParseError {
    #[error("no JSON object found in model response")]
    NoJsonObject,
    #[error("could not parse JSON from model response: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Build the analysis prompt for one episode's cleaned guest transcript
pub fn build_extraction_prompt(
    episode_name: &str,
    guest_name: Option<&str>,
    cleaned_transcript: &str,
) -> String {
    let guest_context = match guest_name {
        Some(name) => format!("Guest: {name}"),
        None => "Guest speaker".to_string(),
    };

    format!(
        r#"You are analyzing a podcast transcript from a product management and technology interview show.

Episode: {episode_name}
{guest_context}

IMPORTANT: This transcript contains ONLY the guest's responses and insights. The host's questions and comments have been excluded. Focus on extracting insights from the guest's expertise and experience.

Transcript (guest content only):
{cleaned_transcript}

Please analyze this transcript and provide:

1. **3-5 Key Takeaways** - The most important insights, lessons, frameworks, or actionable advice from the GUEST. Each takeaway should be:
   - Specific and concrete (not generic)
   - Actionable or insightful
   - 1-2 sentences long
   - Focused on product management, technology, leadership, or business strategy
   - Based on the guest's actual words and insights, not the host's questions

2. **3-5 Metadata Tags** - Categorize this episode using these possible tags (choose the most relevant):
   - Product Management
   - Leadership
   - Growth
   - Design
   - Engineering
   - Strategy
   - Marketing
   - Data & Analytics
   - Customer Research
   - Startup
   - AI/ML
   - Monetization
   - Hiring
   - Communication
   - Product-Market Fit
   - Experimentation
   - User Experience
   - Team Dynamics
   - Metrics & KPIs
   - Innovation
   - B2B
   - B2C
   - SaaS
   - Marketplace
   - Mobile
   - Web

Please respond in JSON format:
{{
  "key_takeaways": [
    "Takeaway 1",
    "Takeaway 2",
    "Takeaway 3"
  ],
  "metadata_tags": [
    "Tag1",
    "Tag2",
    "Tag3"
  ]
}}"#
    )
}

/// Pull the metadata JSON object out of a model reply.
///
/// Reasoning models wrap their answer in prose and often fence it in a
/// ```json code block; try the fenced form first, then the first bare
/// object in the text.
pub fn parse_model_json(content: &str) -> Result<AiExtraction, ResponseParseError> {
    let fenced = RegexBuilder::new(r"```(?:json)?\s*(\{.*?\})\s*```")
        .dot_matches_new_line(true)
        .build()
        .expect("static pattern");

    let json_text = if let Some(captures) = fenced.captures(content) {
        captures.get(1).map(|m| m.as_str()).unwrap_or_default()
    } else {
        let bare = RegexBuilder::new(r"\{.*\}")
            .dot_matches_new_line(true)
            .build()
            .expect("static pattern");
        bare.find(content)
            .map(|m| m.as_str())
            .ok_or(ResponseParseError::NoJsonObject)?
    };

    Ok(serde_json::from_str(json_text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fenced_json() {
        let content = "Here is the analysis:\n```json\n{\"key_takeaways\": [\"a\"], \"metadata_tags\": [\"Growth\"]}\n```\nDone.";
        let extraction = parse_model_json(content).unwrap();
        assert_eq!(extraction.key_takeaways, vec!["a"]);
        assert_eq!(extraction.metadata_tags, vec!["Growth"]);
    }

    #[test]
    fn test_parse_bare_json() {
        let content = "Sure: {\"key_takeaways\": [\"x\", \"y\"], \"metadata_tags\": []} hope that helps";
        let extraction = parse_model_json(content).unwrap();
        assert_eq!(extraction.key_takeaways.len(), 2);
    }

    #[test]
    fn test_parse_no_object_is_error() {
        let err = parse_model_json("no structured output here").unwrap_err();
        assert!(matches!(err, ResponseParseError::NoJsonObject));
    }

    #[test]
    fn test_parse_invalid_json_is_error() {
        let err = parse_model_json("{not valid json}").unwrap_err();
        assert!(matches!(err, ResponseParseError::InvalidJson(_)));
    }

    #[test]
    fn test_prompt_includes_episode_and_guest() {
        let prompt = build_extraction_prompt("Ep 1", Some("Jane Doe"), "cleaned text");
        assert!(prompt.contains("Episode: Ep 1"));
        assert!(prompt.contains("Guest: Jane Doe"));
        assert!(prompt.contains("cleaned text"));
    }
}
