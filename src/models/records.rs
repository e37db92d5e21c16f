use serde::{Deserialize, Serialize};

/// Maximum length of a batch request custom_id, per the batch API
pub const MAX_CUSTOM_ID_LEN: usize = 64;

/// One transcript as a flat JSONL row, ready for batch preparation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub id: String,
    pub episode_name: String,
    pub guest_name: String,
    pub text: String,
    pub file_path: String,
}

/// A single chat message in a batch request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body in the hosted batch API's chat-completions shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchBody {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

/// One line of a batch submission JSONL file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    pub custom_id: String,
    pub body: BatchBody,
}

impl BatchRequest {
    /// Build a request, truncating the identifier to the API's 64-char cap
    pub fn new(custom_id: &str, model: &str, messages: Vec<ChatMessage>, max_tokens: u32) -> Self {
        Self {
            custom_id: truncate_custom_id(custom_id),
            body: BatchBody {
                model: model.to_string(),
                messages,
                max_tokens,
            },
        }
    }
}

/// Truncate an identifier to MAX_CUSTOM_ID_LEN characters
pub fn truncate_custom_id(id: &str) -> String {
    id.chars().take(MAX_CUSTOM_ID_LEN).collect()
}

/// Joined output row: batch identifier plus extracted metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedEpisode {
    pub custom_id: String,
    pub key_insights: Vec<String>,
    pub takeaways: Vec<String>,
    pub metadata_tags: Vec<String>,
}

/// One prompt/completion pair for fine-tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinetuneExample {
    pub prompt: String,
    pub completion: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_id_truncated_to_64() {
        let long_name = "a".repeat(100);
        let request = BatchRequest::new(&long_name, "test-model", vec![], 1000);
        assert_eq!(request.custom_id.chars().count(), MAX_CUSTOM_ID_LEN);
    }

    #[test]
    fn test_short_custom_id_unchanged() {
        let request = BatchRequest::new("short-id", "test-model", vec![], 1000);
        assert_eq!(request.custom_id, "short-id");
    }

    #[test]
    fn test_batch_request_serializes_expected_shape() {
        let request = BatchRequest::new(
            "ep-1",
            "meta-llama/Meta-Llama-3.1-70B-Instruct-Turbo",
            vec![ChatMessage::system("sys"), ChatMessage::user("hello")],
            4000,
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["custom_id"], "ep-1");
        assert_eq!(json["body"]["max_tokens"], 4000);
        assert_eq!(json["body"]["messages"][0]["role"], "system");
        assert_eq!(json["body"]["messages"][1]["content"], "hello");
    }
}
