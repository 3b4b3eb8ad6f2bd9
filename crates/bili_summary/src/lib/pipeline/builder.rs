use std::path::PathBuf;

use crate::{bili::AudioFetcher, Summarizer, SummaryPipeline, Transcriber};

pub struct SummaryPipelineBuilder<F = (), T = (), S = ()> {
    workdir: PathBuf,
    fetcher: F,
    transcriber: T,
    summarizer: S,
}

impl SummaryPipelineBuilder {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            fetcher: (),
            transcriber: (),
            summarizer: (),
        }
    }
}

impl<F, T, S> SummaryPipelineBuilder<F, T, S> {
    pub fn fetcher<F2: AudioFetcher + Send + Sync + 'static>(
        self,
        fetcher: F2,
    ) -> SummaryPipelineBuilder<F2, T, S> {
        SummaryPipelineBuilder {
            workdir: self.workdir,
            fetcher,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
        }
    }

    pub fn transcriber<T2: Transcriber + Send + Sync + 'static>(
        self,
        transcriber: T2,
    ) -> SummaryPipelineBuilder<F, T2, S> {
        SummaryPipelineBuilder {
            workdir: self.workdir,
            fetcher: self.fetcher,
            transcriber,
            summarizer: self.summarizer,
        }
    }

    pub fn summarizer<S2: Summarizer + Send + Sync + 'static>(
        self,
        summarizer: S2,
    ) -> SummaryPipelineBuilder<F, T, S2> {
        SummaryPipelineBuilder {
            workdir: self.workdir,
            fetcher: self.fetcher,
            transcriber: self.transcriber,
            summarizer,
        }
    }
}

impl<F, T, S> SummaryPipelineBuilder<F, T, S>
where
    F: AudioFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    pub fn build(self) -> SummaryPipeline<F, T, S> {
        SummaryPipeline {
            workdir: self.workdir,
            fetcher: self.fetcher,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
        }
    }
}
