use crate::domain::error::WattsonError;
use crate::domain::model::{GenerationOptions, InsightKind, InsightSource};
use crate::domain::traits::Generator;
use crate::infrastructure::storage::cache::ResponseCache;
use serde::Serialize;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

/// What callers see when every attempt against the upstream failed.
pub const FALLBACK_MESSAGE: &str =
    "Unable to generate insights at the moment. Please try again later.";

/// Cap on inlined payload text for the general prompt.
const MAX_INLINE_PAYLOAD: usize = 1000;

#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Minimum spacing between consecutive upstream call starts.
    pub min_request_interval: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub cache_ttl: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            min_request_interval: Duration::from_secs(2),
            max_retries: 3,
            retry_delay: Duration::from_secs(5),
            cache_ttl: Duration::from_secs(300),
        }
    }
}

struct Job {
    payload: Value,
    kind: InsightKind,
    cache_key: String,
    use_cache: bool,
    reply: oneshot::Sender<String>,
}

/// Client for the upstream insights backend.
///
/// Owns a response cache and a FIFO job queue drained by a single
/// scheduler task, so at most one upstream call is in flight at any
/// time no matter how many callers submit concurrently. Each instance
/// is independent; cloning shares the queue and cache.
#[derive(Clone)]
pub struct InsightsClient {
    tx: mpsc::UnboundedSender<Job>,
    cache: Arc<ResponseCache>,
}

impl InsightsClient {
    /// Must be called from within a tokio runtime; the scheduler task
    /// is spawned here and exits when the last clone is dropped.
    pub fn new(backend: Arc<dyn Generator>, options: ClientOptions) -> Self {
        let cache = Arc::new(ResponseCache::new(options.cache_ttl));
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_scheduler(rx, backend, Arc::clone(&cache), options));
        Self { tx, cache }
    }

    /// Request an insights summary for `data`.
    ///
    /// Returns a cached summary when one is fresh; otherwise queues the
    /// request and waits for the scheduler. Upstream failure is absorbed
    /// into [`FALLBACK_MESSAGE`]; the only error paths here are a
    /// non-serializable payload and a stopped scheduler.
    pub async fn request<T: Serialize + ?Sized>(
        &self,
        data: &T,
        kind: &str,
    ) -> Result<String, WattsonError> {
        self.request_opts(data, kind, true).await
    }

    /// Like [`request`](Self::request) but skips the cache lookup.
    /// The fresh result still replaces the cached entry.
    pub async fn request_uncached<T: Serialize + ?Sized>(
        &self,
        data: &T,
        kind: &str,
    ) -> Result<String, WattsonError> {
        self.request_opts(data, kind, false).await
    }

    /// Fresh cached summary for `data`, if any.
    pub fn cached<T: Serialize + ?Sized>(
        &self,
        data: &T,
        kind: &str,
    ) -> Result<Option<String>, WattsonError> {
        let payload = serde_json::to_value(data)?;
        let kind = InsightKind::from_name(kind);
        Ok(self.cache.get(&cache_key(&payload, kind)?))
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    async fn request_opts<T: Serialize + ?Sized>(
        &self,
        data: &T,
        kind: &str,
        use_cache: bool,
    ) -> Result<String, WattsonError> {
        // Caller misuse fails fast, before anything is queued
        let payload = serde_json::to_value(data)?;
        let kind = InsightKind::from_name(kind);
        let cache_key = cache_key(&payload, kind)?;

        if use_cache {
            if let Some(text) = self.cache.get(&cache_key) {
                return Ok(text);
            }
        }

        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Job {
                payload,
                kind,
                cache_key,
                use_cache,
                reply,
            })
            .map_err(|_| WattsonError::ChannelClosed)?;

        rx.await.map_err(|_| WattsonError::ChannelClosed)
    }
}

/// Label where a result string came from. Degraded output carries the
/// fixed fallback text, so it is distinguishable from model output.
pub fn classify_source(text: &str, from_cache: bool) -> InsightSource {
    if from_cache {
        InsightSource::Cache
    } else if text == FALLBACK_MESSAGE {
        InsightSource::Fallback
    } else {
        InsightSource::Generated
    }
}

/// Deterministic key for `(payload, kind)`.
///
/// `serde_json::Value` maps are ordered by key, so structurally equal
/// payloads hash identically regardless of property insertion order.
pub fn cache_key(payload: &Value, kind: InsightKind) -> Result<String, WattsonError> {
    let canonical = serde_json::to_string(&json!({
        "kind": kind.as_str(),
        "payload": payload,
    }))?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

async fn run_scheduler(
    mut rx: mpsc::UnboundedReceiver<Job>,
    backend: Arc<dyn Generator>,
    cache: Arc<ResponseCache>,
    options: ClientOptions,
) {
    let mut last_call: Option<Instant> = None;

    while let Some(job) = rx.recv().await {
        // An identical request processed moments ago may already have
        // populated the cache; resolve this waiter without another
        // upstream call and without burning a spacing interval.
        if job.use_cache {
            if let Some(text) = cache.get(&job.cache_key) {
                let _ = job.reply.send(text);
                continue;
            }
        }

        if let Some(started) = last_call {
            let elapsed = started.elapsed();
            if elapsed < options.min_request_interval {
                tokio::time::sleep(options.min_request_interval - elapsed).await;
            }
        }
        last_call = Some(Instant::now());

        let text = make_request(backend.as_ref(), &job.payload, job.kind, &options).await;
        cache.insert(job.cache_key, text.clone());
        let _ = job.reply.send(text);
    }
}

/// Upstream call with bounded retries. Never fails past this boundary:
/// exhausted or non-retryable errors become the fallback string.
async fn make_request(
    backend: &dyn Generator,
    payload: &Value,
    kind: InsightKind,
    options: &ClientOptions,
) -> String {
    let request_id = Uuid::new_v4();
    let prompt = build_prompt(payload, kind);
    let generation = GenerationOptions::default();

    let mut attempt = 0;
    loop {
        attempt += 1;
        match backend.generate(&prompt, &generation).await {
            Ok(text) => {
                debug!(%request_id, attempt, kind = kind.as_str(), "insights generated");
                return text;
            }
            Err(e) => {
                warn!(
                    %request_id,
                    attempt,
                    max_retries = options.max_retries,
                    error = %e,
                    "upstream attempt failed"
                );
                if !e.is_retryable() || attempt >= options.max_retries {
                    return FALLBACK_MESSAGE.to_string();
                }
            }
        }

        // Exponential backoff: delay, 2x delay, ...
        tokio::time::sleep(options.retry_delay * 2u32.pow(attempt - 1)).await;
    }
}

/// Reduce the payload before it goes upstream: recent points for the
/// series kinds, a size-capped serialization otherwise.
fn shape_payload(payload: &Value, kind: InsightKind) -> Value {
    let summary = match kind {
        InsightKind::CurrentLoad => json!({ "load": last_three(payload.get("hourlyLoad")) }),
        InsightKind::Pricing => json!({ "price": last_three(payload.get("prices")) }),
        InsightKind::General => {
            let raw = payload.to_string();
            let capped: String = raw.chars().take(MAX_INLINE_PAYLOAD).collect();
            json!({ "data": capped })
        }
    };

    json!({ "type": kind.as_str(), "summary": summary })
}

fn last_three(series: Option<&Value>) -> Value {
    match series.and_then(Value::as_array) {
        Some(items) => {
            let skip = items.len().saturating_sub(3);
            Value::Array(items[skip..].to_vec())
        }
        None => Value::Null,
    }
}

pub fn build_prompt(payload: &Value, kind: InsightKind) -> String {
    let relevant = shape_payload(payload, kind);
    match kind {
        InsightKind::General => format!(
            "Examine this electricity data and identify 3 important points in bullet form and explain them in a way that is easy to understand: {}",
            relevant
        ),
        InsightKind::CurrentLoad => format!(
            "Study this energy usage data and highlight 3 key findings in bullet points and explain them in a way that is easy to understand: {}",
            relevant
        ),
        InsightKind::Pricing => format!(
            "Review this electricity pricing data and summarize 3 significant insights in bullet points and explain them in a way that is easy to understand: {}",
            relevant
        ),
    }
}
