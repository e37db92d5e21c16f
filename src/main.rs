use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use podmeta::{
    run_batch, run_batch_dir, run_collect, run_convert, run_extract, run_extract_ai,
    run_finetune, run_split, CollectFormat, ExtractAiConfig, FinetuneConfig, InferenceClient,
    InferenceConfig,
};

#[derive(Parser)]
#[command(name = "podmeta")]
#[command(author, version, about = "Podcast transcript metadata extraction and batch-inference preparation", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract metadata from transcripts with the built-in heuristics
    Extract {
        /// Directory containing transcript .txt files
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Output metadata JSON file
        #[arg(short, long, default_value = "episodes_metadata.json")]
        output: PathBuf,
    },

    /// Extract metadata using the hosted inference model (resumable)
    ExtractAi {
        /// Directory containing transcript .txt files
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Output metadata JSON file, also used as the resume checkpoint
        #[arg(short, long, default_value = "episodes_metadata.json")]
        output: PathBuf,

        /// Model identifier (defaults to the configured extraction model)
        #[arg(long)]
        model: Option<String>,

        /// Delay between API requests, in milliseconds
        #[arg(long, default_value = "1000")]
        request_delay_ms: u64,
    },

    /// Convert a transcript directory to a JSONL file
    Convert {
        /// Directory containing transcript .txt files
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Output JSONL file
        #[arg(short, long, default_value = "transcripts_batch.jsonl")]
        output: PathBuf,
    },

    /// Build batch-inference requests from a transcript JSONL file
    Batch {
        /// Input transcript JSONL file
        #[arg(short, long, default_value = "transcripts_batch.jsonl")]
        input: PathBuf,

        /// Output batch JSONL file
        #[arg(short, long, default_value = "together_batch_input.jsonl")]
        output: PathBuf,

        /// Model identifier for the batch requests
        #[arg(long, default_value = "meta-llama/Meta-Llama-3.1-70B-Instruct-Turbo")]
        model: String,

        /// Maximum response tokens
        #[arg(long, default_value = "4000")]
        max_tokens: u32,

        /// Optional system prompt file
        #[arg(long)]
        system_prompt: Option<PathBuf>,

        /// Optional user prompt template file ({transcript} placeholder)
        #[arg(long)]
        user_template: Option<PathBuf>,
    },

    /// Build batch-inference requests straight from a transcript directory
    BatchDir {
        /// Directory containing transcript .txt files
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// System prompt file (required)
        #[arg(short, long)]
        system_prompt: PathBuf,

        /// Output batch JSONL file
        #[arg(short, long, default_value = "batch_inference.jsonl")]
        output: PathBuf,

        /// Model identifier for the batch requests
        #[arg(long, default_value = "Qwen/Qwen3-Next-80B-A3B-Thinking")]
        model: String,

        /// Maximum response tokens
        #[arg(long, default_value = "4000")]
        max_tokens: u32,
    },

    /// Split a JSONL file into one JSON file per episode
    Split {
        /// Input JSONL file
        #[arg(short, long, default_value = "together_batch_input.jsonl")]
        input: PathBuf,

        /// Output directory for per-episode JSON files
        #[arg(short, long, default_value = "episodes_json")]
        output_dir: PathBuf,
    },

    /// Join a batch JSONL file with extracted metadata
    Collect {
        /// Input batch JSONL file
        #[arg(short, long, default_value = "together_batch_input.jsonl")]
        input: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "episodes_extracted.jsonl")]
        output: PathBuf,

        /// Metadata JSON file to join against
        #[arg(short, long)]
        metadata: Option<PathBuf>,

        /// Output format: jsonl or json
        #[arg(short, long, default_value = "jsonl")]
        format: String,
    },

    /// Prepare fine-tuning instruction-completion pairs
    Finetune {
        /// Directory containing transcript .txt files
        #[arg(short, long, default_value = ".")]
        input: PathBuf,

        /// Training data output file
        #[arg(long, default_value = "train_data.jsonl")]
        train_output: PathBuf,

        /// Validation data output file
        #[arg(long, default_value = "val_data.jsonl")]
        val_output: PathBuf,

        /// Fraction of examples held out for validation
        #[arg(long, default_value = "0.1")]
        val_split: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Extract { input, output } => {
            run_extract(&input, &output)?;
        }
        Commands::ExtractAi {
            input,
            output,
            model,
            request_delay_ms,
        } => {
            let mut api_config = InferenceConfig::from_env()?;
            if let Some(model) = model {
                api_config.model = model;
            }
            let client = InferenceClient::new(api_config);
            let config = ExtractAiConfig {
                request_delay: std::time::Duration::from_millis(request_delay_ms),
                ..Default::default()
            };
            run_extract_ai(&client, &input, &output, &config).await?;
        }
        Commands::Convert { input, output } => {
            run_convert(&input, &output)?;
        }
        Commands::Batch {
            input,
            output,
            model,
            max_tokens,
            system_prompt,
            user_template,
        } => {
            let system_prompt = read_optional_prompt(system_prompt.as_deref())?;
            let user_template = read_optional_prompt(user_template.as_deref())?;
            run_batch(
                &input,
                &output,
                &model,
                max_tokens,
                system_prompt.as_deref(),
                user_template.as_deref(),
            )?;
        }
        Commands::BatchDir {
            input,
            system_prompt,
            output,
            model,
            max_tokens,
        } => {
            run_batch_dir(&input, &system_prompt, &output, &model, max_tokens)?;
        }
        Commands::Split { input, output_dir } => {
            run_split(&input, &output_dir)?;
        }
        Commands::Collect {
            input,
            output,
            metadata,
            format,
        } => {
            let format = CollectFormat::parse(&format)?;
            run_collect(&input, &output, metadata.as_deref(), format)?;
        }
        Commands::Finetune {
            input,
            train_output,
            val_output,
            val_split,
        } => {
            let config = FinetuneConfig {
                val_split,
                ..Default::default()
            };
            run_finetune(&input, &train_output, &val_output, &config)?;
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn read_optional_prompt(path: Option<&std::path::Path>) -> Result<Option<String>> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read prompt file: {:?}", path))?;
            Ok(Some(content.trim().to_string()))
        }
        None => Ok(None),
    }
}
