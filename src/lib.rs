pub mod heuristics;
pub mod io;
pub mod llm;
pub mod models;
pub mod pipeline;

pub use heuristics::{
    build_episode, clean_transcript, detect_guest_name, extract_key_takeaways,
    extract_metadata_tags, filter_guest_content,
};
pub use io::{list_transcripts, load_existing_episodes, read_jsonl, sanitize_filename, write_jsonl};
pub use llm::{build_extraction_prompt, parse_model_json, InferenceClient, InferenceConfig};
pub use models::{BatchRequest, ChatMessage, EpisodeRecord, MetadataFile, TranscriptRecord};
pub use pipeline::{
    run_batch, run_batch_dir, run_collect, run_convert, run_extract, run_extract_ai, run_finetune,
    run_split, CollectFormat, ExtractAiConfig, FinetuneConfig,
};
