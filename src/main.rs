use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use manualforge::config::{load_config, Config};
use manualforge::index::VectorIndexer;
use manualforge::llm::GeminiGenerator;
use manualforge::models::UseCase;
use manualforge::pipeline::Pipeline;
use manualforge::server::run_server;
use manualforge::storage::S3ObjectStore;

#[derive(Parser)]
#[command(name = "manualforge")]
#[command(about = "Turn uploaded technical manuals into checksheets and work instructions")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "./config/manualforge.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve,

    /// Generate an artifact from already-uploaded documents
    Generate {
        /// Storage key of an uploaded document (repeatable)
        #[arg(long = "key", required = true)]
        keys: Vec<String>,

        /// Output use case: checksheet or workinstruction
        #[arg(long, default_value = "checksheet")]
        use_case: String,
    },

    /// Issue a presigned upload URL for a filename
    UploadUrl {
        /// Filename the client will upload as
        filename: String,
    },
}

fn build_pipeline(config: &Config) -> Arc<Pipeline> {
    let store = Arc::new(S3ObjectStore::new(&config.storage));
    let index = Arc::new(VectorIndexer::new(
        config.embedding.clone(),
        config.index.clone(),
    ));
    let llm = Arc::new(GeminiGenerator::new(&config.llm));
    Arc::new(Pipeline::new(store, index, llm))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            let pipeline = build_pipeline(&config);
            run_server(&config, pipeline).await?;
        }
        Commands::Generate { keys, use_case } => {
            let pipeline = build_pipeline(&config);
            let url = pipeline.generate(&keys, UseCase::parse(&use_case)).await?;
            println!("{}", url);
        }
        Commands::UploadUrl { filename } => {
            let pipeline = build_pipeline(&config);
            let grant = pipeline.prepare_upload(&filename).await?;
            println!("{}", serde_json::to_string_pretty(&grant)?);
        }
    }

    Ok(())
}
