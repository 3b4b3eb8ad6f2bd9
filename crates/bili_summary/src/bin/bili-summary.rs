use std::{path::PathBuf, sync::Arc, time::Duration};

use bili_summary::{
    bili::YtDlpFetcher, server, tracing::init_tracing_subscriber, ChatClient, SummaryPipeline,
    SummaryPipelineBuilder, WhisperClient,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bili-summary", about = "Bilibili video summarization service")]
struct Cli {
    /// Base URL of the whisper ASR service
    #[arg(long, env = "WHISPER_BASE_URL")]
    whisper_base_url: String,

    /// Whisper request timeout in seconds
    #[arg(long, env = "WHISPER_TIMEOUT_SECS", default_value = "300")]
    whisper_timeout: u64,

    /// Base URL of the chat-completion service
    #[arg(long, env = "LLM_BASE_URL")]
    llm_base_url: String,

    /// API key for the chat-completion service
    #[arg(long, env = "LLM_API_KEY")]
    llm_api_key: String,

    /// Model identifier used for summarization
    #[arg(long, env = "LLM_MODEL", default_value = "gpt-4o")]
    llm_model: String,

    /// Chat-completion request timeout in seconds
    #[arg(long, env = "LLM_TIMEOUT_SECS", default_value = "60")]
    llm_timeout: u64,

    /// Override for the default summarization persona
    #[arg(long, env = "SUMMARY_SYSTEM_PROMPT")]
    system_prompt: Option<String>,

    /// Path to the external audio downloader binary
    #[arg(long, env = "DOWNLOADER_PATH", default_value = "yt-dlp")]
    downloader_path: PathBuf,

    /// Downloader timeout in seconds
    #[arg(long, env = "DOWNLOAD_TIMEOUT_SECS", default_value = "600")]
    download_timeout: u64,

    /// Working directory for per-run scratch space
    #[arg(long, env = "WORKDIR", default_value = "/var/tmp/bili-summary")]
    workdir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API server
    Serve {
        #[arg(long, env = "PORT", default_value = "5000")]
        port: u16,
    },
    /// Summarize a single video URL and print the result
    Video {
        url: String,
        /// Custom summarization instruction
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Summarize a local audio file and print the result
    Audio {
        path: PathBuf,
        /// Custom summarization instruction
        #[arg(long)]
        prompt: Option<String>,
    },
}

fn build_pipeline(
    cli: &Cli,
) -> anyhow::Result<SummaryPipeline<YtDlpFetcher, WhisperClient, ChatClient>> {
    let whisper = WhisperClient::new(
        cli.whisper_base_url.clone(),
        Duration::from_secs(cli.whisper_timeout),
    )?;

    let mut chat = ChatClient::new(
        cli.llm_base_url.clone(),
        cli.llm_api_key.clone(),
        cli.llm_model.clone(),
        Duration::from_secs(cli.llm_timeout),
    )?;
    if let Some(prompt) = &cli.system_prompt {
        chat = chat.with_default_prompt(prompt.clone());
    }

    let fetcher = YtDlpFetcher::new(
        &cli.downloader_path,
        Duration::from_secs(cli.download_timeout),
    );

    Ok(SummaryPipelineBuilder::new(&cli.workdir)
        .fetcher(fetcher)
        .transcriber(whisper)
        .summarizer(chat)
        .build())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let pipeline = build_pipeline(&cli)?;

    match cli.command {
        Command::Serve { port } => {
            tracing::info!(port, "Starting API server...");
            server::serve(Arc::new(pipeline), port).await?;
        }
        Command::Video { url, prompt } => {
            let summary = pipeline.summarize_video(&url, prompt.as_deref()).await?;
            println!("{summary}");
        }
        Command::Audio { path, prompt } => {
            let summary = pipeline.summarize_audio(&path, prompt.as_deref()).await?;
            println!("{summary}");
        }
    }

    Ok(())
}
