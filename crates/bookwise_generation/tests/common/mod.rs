//! In-memory doubles for the coordinator's collaborator seams.

use async_trait::async_trait;
use bookwise_core::{BookRecord, CacheKey, SectionKind};
use bookwise_error::{CatalogError, CatalogErrorKind, DatabaseError, ProducerError, ProducerErrorKind};
use bookwise_interface::{
    AttemptToken, BookResolver, ClaimOutcome, DiagnosticEvent, Diagnostics, FinishOutcome,
    GenerationOutcome, GenerationRecord, GenerationStatus, GenerationStore, SectionGenerator,
};
use chrono::Utc;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Generation store over a mutex-guarded map, honoring the claim/finish
/// protocol the way the Postgres store does.
#[derive(Default)]
pub struct MemoryGenerationStore {
    rows: Mutex<HashMap<CacheKey, GenerationRecord>>,
}

impl MemoryGenerationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the row for a key.
    pub fn record(&self, key: &CacheKey) -> Option<GenerationRecord> {
        self.rows.lock().unwrap().get(key).cloned()
    }

    /// Seed a complete row, as if an earlier request generated it.
    pub fn insert_complete(&self, key: &CacheKey, content: Value) {
        let mut record = pending_record(key, "v1");
        record.status = GenerationStatus::Complete;
        record.content = Some(content);
        record.finished_at = Some(Utc::now());
        self.rows.lock().unwrap().insert(key.clone(), record);
    }

    /// Seed a failed row with a recorded category.
    pub fn insert_failed(&self, key: &CacheKey, code: bookwise_core::FailureCode) {
        let mut record = pending_record(key, "v1");
        record.status = GenerationStatus::Failed;
        record.error_code = Some(code);
        record.error_message = Some("seeded failure".to_string());
        record.finished_at = Some(Utc::now());
        self.rows.lock().unwrap().insert(key.clone(), record);
    }

    /// Simulate a forced reclaim landing from another actor: the row goes
    /// back to pending with a higher attempt count.
    pub fn supersede(&self, key: &CacheKey) {
        let mut rows = self.rows.lock().unwrap();
        if let Some(record) = rows.get_mut(key) {
            record.status = GenerationStatus::Pending;
            record.attempt_count += 1;
            record.content = None;
            record.error_code = None;
            record.error_message = None;
            record.started_at = Some(Utc::now());
            record.finished_at = None;
        }
    }
}

fn pending_record(key: &CacheKey, schema_version: &str) -> GenerationRecord {
    let now = Utc::now();
    GenerationRecord {
        book_id: key.book_id.clone(),
        section: key.section,
        provider: key.provider.clone(),
        model: key.model.clone(),
        prompt_version: key.prompt_version.clone(),
        schema_version: schema_version.to_string(),
        status: GenerationStatus::Pending,
        content: None,
        error_code: None,
        error_message: None,
        attempt_count: 1,
        started_at: Some(now),
        finished_at: None,
        created_at: now,
        updated_at: now,
    }
}

impl GenerationStore for MemoryGenerationStore {
    fn lookup(&self, key: &CacheKey) -> Result<Option<GenerationRecord>, DatabaseError> {
        Ok(self.rows.lock().unwrap().get(key).cloned())
    }

    fn claim_new(
        &self,
        key: &CacheKey,
        schema_version: &str,
    ) -> Result<ClaimOutcome, DatabaseError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(key) {
            return Ok(ClaimOutcome::AlreadyExists);
        }
        let record = pending_record(key, schema_version);
        rows.insert(key.clone(), record.clone());
        Ok(ClaimOutcome::Claimed(record))
    }

    fn claim_retry(
        &self,
        key: &CacheKey,
        expected: GenerationStatus,
    ) -> Result<ClaimOutcome, DatabaseError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(record) = rows.get_mut(key) else {
            return Ok(ClaimOutcome::Conflict);
        };
        if record.status != expected {
            return Ok(ClaimOutcome::Conflict);
        }
        record.status = GenerationStatus::Pending;
        record.attempt_count += 1;
        record.content = None;
        record.error_code = None;
        record.error_message = None;
        record.started_at = Some(Utc::now());
        record.finished_at = None;
        record.updated_at = Utc::now();
        Ok(ClaimOutcome::Claimed(record.clone()))
    }

    fn finish(
        &self,
        key: &CacheKey,
        token: AttemptToken,
        outcome: GenerationOutcome,
    ) -> Result<FinishOutcome, DatabaseError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(record) = rows.get_mut(key) else {
            return Ok(FinishOutcome::StaleAttempt);
        };
        if record.status != GenerationStatus::Pending || record.attempt_count != token.0 {
            return Ok(FinishOutcome::StaleAttempt);
        }
        let now = Utc::now();
        match outcome {
            GenerationOutcome::Complete(content) => {
                record.status = GenerationStatus::Complete;
                record.content = Some(content.to_value());
                record.error_code = None;
                record.error_message = None;
            }
            GenerationOutcome::Failed { code, message } => {
                record.status = GenerationStatus::Failed;
                record.content = None;
                record.error_code = Some(code);
                record.error_message = Some(message);
            }
        }
        record.finished_at = Some(now);
        record.updated_at = now;
        Ok(FinishOutcome::Committed(record.clone()))
    }
}

/// Store wrapper that injects a competing reclaim right before every
/// finish, forcing the stale-attempt path.
pub struct SupersedingStore {
    pub inner: MemoryGenerationStore,
}

impl SupersedingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryGenerationStore::new(),
        }
    }
}

impl GenerationStore for SupersedingStore {
    fn lookup(&self, key: &CacheKey) -> Result<Option<GenerationRecord>, DatabaseError> {
        self.inner.lookup(key)
    }

    fn claim_new(
        &self,
        key: &CacheKey,
        schema_version: &str,
    ) -> Result<ClaimOutcome, DatabaseError> {
        self.inner.claim_new(key, schema_version)
    }

    fn claim_retry(
        &self,
        key: &CacheKey,
        expected: GenerationStatus,
    ) -> Result<ClaimOutcome, DatabaseError> {
        self.inner.claim_retry(key, expected)
    }

    fn finish(
        &self,
        key: &CacheKey,
        token: AttemptToken,
        outcome: GenerationOutcome,
    ) -> Result<FinishOutcome, DatabaseError> {
        self.inner.supersede(key);
        self.inner.finish(key, token, outcome)
    }
}

/// One scripted producer reply.
pub enum Script {
    Payload(Value),
    Fail(ProducerErrorKind),
}

/// Producer double that pops scripted replies and counts invocations.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Script>>,
    calls: AtomicUsize,
    delay: Duration,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Script>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    pub fn returning(payload: Value) -> Self {
        Self::new(vec![Script::Payload(payload)])
    }

    pub fn failing(kind: ProducerErrorKind) -> Self {
        Self::new(vec![Script::Fail(kind)])
    }

    /// Make every call take this long before replying.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SectionGenerator for ScriptedGenerator {
    async fn generate_json(
        &self,
        _prompt: &str,
        _schema: &Value,
    ) -> Result<Value, ProducerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Script::Payload(payload)) => Ok(payload),
            Some(Script::Fail(kind)) => Err(ProducerError::new(kind)),
            None => Err(ProducerError::new(ProducerErrorKind::Output(
                "script exhausted".to_string(),
            ))),
        }
    }
}

/// Resolver double serving one known book.
pub struct StaticResolver {
    book: BookRecord,
}

impl StaticResolver {
    pub fn new(book: BookRecord) -> Self {
        Self { book }
    }
}

#[async_trait]
impl BookResolver for StaticResolver {
    async fn ensure_book(&self, work_id: &str) -> Result<BookRecord, CatalogError> {
        if work_id == self.book.id {
            Ok(self.book.clone())
        } else {
            Err(CatalogError::new(CatalogErrorKind::NotFound(
                work_id.to_string(),
            )))
        }
    }
}

/// Diagnostics sink that records every event for assertions.
#[derive(Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn saw(&self, predicate: impl Fn(&DiagnosticEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(predicate)
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn emit(&self, event: DiagnosticEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// A book record for "OL1W", enough for prompt construction.
pub fn sample_book() -> BookRecord {
    let now = Utc::now();
    BookRecord {
        id: "OL1W".to_string(),
        title: "The Structure of Scientific Revolutions".to_string(),
        authors: "Thomas S. Kuhn".to_string(),
        first_publish_year: Some(1962),
        cover_url: None,
        openlibrary_url: "https://openlibrary.org/works/OL1W".to_string(),
        created_at: now,
        updated_at: now,
    }
}

/// A payload satisfying the overview contract.
pub fn valid_overview() -> Value {
    serde_json::json!({
        "overview": "A landmark account of how scientific paradigms form, persist, and get overthrown.",
        "reading_time_minutes": 12
    })
}

/// An overview payload violating the reading-time bound.
pub fn out_of_bounds_overview() -> Value {
    serde_json::json!({
        "overview": "A landmark account of how scientific paradigms form, persist, and get overthrown.",
        "reading_time_minutes": 0
    })
}

/// The cache key the default test configuration produces for a section.
pub fn test_key(section: SectionKind) -> CacheKey {
    CacheKey::compose("OL1W", section, "openai", "gpt-5-mini", "v1")
}
