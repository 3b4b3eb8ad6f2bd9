use std::{fmt::Debug, future::Future};

/// Condenses a transcript into a shorter text.
///
/// `custom_prompt` lets the caller steer *how* to summarize without changing
/// what is being summarized; implementations fall back to their configured
/// default instruction when it is `None`.
pub trait Summarizer {
    type Error: Debug;

    fn summarize(
        &self,
        text: &str,
        custom_prompt: Option<&str>,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
