pub mod chat;
pub mod summarizer;
pub mod transcriber;
pub mod whisper;

pub use summarizer::Summarizer;
pub use transcriber::Transcriber;
