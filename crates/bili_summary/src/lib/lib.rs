pub mod bili;
mod error;
mod llm;
mod pipeline;
pub mod server;
pub mod tracing;

pub use error::PipelineError;
pub use llm::chat::{ChatClient, ChatError, ChatMessage};
pub use llm::whisper::{WhisperClient, WhisperError};
pub use llm::{Summarizer, Transcriber};
pub use pipeline::{builder::SummaryPipelineBuilder, SummaryPipeline};
