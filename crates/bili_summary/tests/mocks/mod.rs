pub mod fetcher;
pub mod summarizer;
pub mod transcriber;
