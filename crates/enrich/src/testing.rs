//! In-memory stand-ins for the search, fetch and model services.

use async_trait::async_trait;
use crawl::{FetchError, PageSource, SearchError, SearchResult, WebSearch};
use extract::{ChatModel, DecodingOptions, Extractor, ModelError, ModelPrompt, ModelResponse};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::pipeline::EnrichmentPipeline;

type SearchFn = dyn Fn(&str) -> Result<Vec<SearchResult>, SearchError> + Send + Sync;
type FetchFn = dyn Fn(&str) -> Result<String, FetchError> + Send + Sync;
type ChatFn = dyn Fn(&ModelPrompt) -> Result<ModelResponse, ModelError> + Send + Sync;
type CompleteFn = dyn Fn(&str) -> Result<String, ModelError> + Send + Sync;

#[derive(Clone, Default)]
pub struct Calls {
    pub search: Arc<AtomicUsize>,
    pub fetch: Arc<AtomicUsize>,
    pub model: Arc<AtomicUsize>,
}

impl Calls {
    pub fn search(&self) -> usize {
        self.search.load(Ordering::SeqCst)
    }

    pub fn fetch(&self) -> usize {
        self.fetch.load(Ordering::SeqCst)
    }

    pub fn model(&self) -> usize {
        self.model.load(Ordering::SeqCst)
    }
}

pub struct MockSearch {
    respond: Box<SearchFn>,
    calls: Arc<AtomicUsize>,
}

impl MockSearch {
    pub fn new(
        respond: impl Fn(&str) -> Result<Vec<SearchResult>, SearchError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            calls: Arc::default(),
        }
    }

    pub fn returning(results: Vec<SearchResult>) -> Self {
        Self::new(move |_| Ok(results.clone()))
    }
}

#[async_trait]
impl WebSearch for MockSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.respond)(query)
    }
}

pub struct MockFetcher {
    respond: Box<FetchFn>,
    calls: Arc<AtomicUsize>,
}

impl MockFetcher {
    pub fn new(
        respond: impl Fn(&str) -> Result<String, FetchError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            calls: Arc::default(),
        }
    }

    pub fn returning(html: &str) -> Self {
        let html = html.to_string();
        Self::new(move |_| Ok(html.clone()))
    }
}

#[async_trait]
impl PageSource for MockFetcher {
    async fn fetch_page(&self, url: &str, _scrub: bool) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.respond)(url)
    }
}

pub struct MockModel {
    chat: Box<ChatFn>,
    complete: Box<CompleteFn>,
    calls: Arc<AtomicUsize>,
}

impl MockModel {
    pub fn new(
        chat: impl Fn(&ModelPrompt) -> Result<ModelResponse, ModelError> + Send + Sync + 'static,
        complete: impl Fn(&str) -> Result<String, ModelError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            chat: Box::new(chat),
            complete: Box::new(complete),
            calls: Arc::default(),
        }
    }

    /// Answers every chat prompt with `content`.
    pub fn replying(content: &str) -> Self {
        let content = content.to_string();
        Self::new(
            move |_| {
                Ok(ModelResponse {
                    content: content.clone(),
                    duration: 0.25,
                })
            },
            |_| Ok(String::new()),
        )
    }

    /// Answers every completion with `reply`.
    pub fn completing(reply: &str) -> Self {
        let reply = reply.to_string();
        Self::new(
            |_| Err(ModelError::Decode("chat not expected".to_string())),
            move |_| Ok(reply.clone()),
        )
    }
}

#[async_trait]
impl ChatModel for MockModel {
    async fn prompt_model(
        &self,
        _model_id: &str,
        prompt: &ModelPrompt,
    ) -> Result<ModelResponse, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.chat)(prompt)
    }

    async fn complete(
        &self,
        _model_id: &str,
        prompt: &str,
        _options: &DecodingOptions,
    ) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.complete)(prompt)
    }
}

pub fn model_failure() -> ModelError {
    ModelError::Api {
        status: 503,
        message: "model is loading".to_string(),
    }
}

/// Wire the mocks into a pipeline, keeping handles on their call counters.
pub fn pipeline(search: MockSearch, fetcher: MockFetcher, model: MockModel) -> (EnrichmentPipeline, Calls) {
    let calls = Calls {
        search: search.calls.clone(),
        fetch: fetcher.calls.clone(),
        model: model.calls.clone(),
    };

    let extractor = Extractor::new(Box::new(model), 32768, 60_000);
    let pipeline = EnrichmentPipeline::new(Box::new(search), Box::new(fetcher), extractor);

    (pipeline, calls)
}
