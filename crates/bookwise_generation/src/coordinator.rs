//! The single-flight generation coordinator.

use crate::diagnostics::bounded_tail;
use crate::response::{GenerationResponse, RETRY_AFTER_MS};
use bookwise_core::{
    build_prompt, section_json_schema, validate_section, BookRecord, CacheKey, FailureCode,
    GenerationConfig, SectionKind,
};
use bookwise_error::{BookwiseResult, ProducerErrorKind};
use bookwise_interface::{
    BookResolver, ClaimOutcome, DiagnosticEvent, Diagnostics, FinishOutcome, GenerationOutcome,
    GenerationRecord, GenerationStatus, GenerationStore, SectionGenerator,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

/// What the claim phase decided for this request.
enum Claim {
    /// This request won a claim and must run one attempt.
    Run(GenerationRecord),
    /// The request is satisfied without generating.
    Respond(GenerationResponse),
}

/// Orchestrates one generation request through the decision table.
///
/// Generic over the store, producer, resolver, and diagnostics seams so
/// the whole table is testable with in-memory doubles. The coordinator
/// holds no locks; single-flight falls out of the store's atomic claim
/// operations.
///
/// Generation failures are outcomes, not errors: a failed attempt is
/// recorded and returned as [`GenerationResponse::Failed`]. The `Err`
/// channel is reserved for resolver failures and store failures outside
/// the generate phase.
pub struct GenerationCoordinator<S, G, R, D> {
    store: Arc<S>,
    generator: Arc<G>,
    resolver: Arc<R>,
    diagnostics: Arc<D>,
    config: GenerationConfig,
}

impl<S, G, R, D> GenerationCoordinator<S, G, R, D>
where
    S: GenerationStore,
    G: SectionGenerator,
    R: BookResolver,
    D: Diagnostics,
{
    /// Wire a coordinator from its collaborators.
    pub fn new(
        store: Arc<S>,
        generator: Arc<G>,
        resolver: Arc<R>,
        diagnostics: Arc<D>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            store,
            generator,
            resolver,
            diagnostics,
            config,
        }
    }

    /// The generation configuration this coordinator runs with.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Compose the cache key this coordinator would use for a request.
    pub fn cache_key(&self, book_id: &str, section: SectionKind) -> CacheKey {
        CacheKey::compose(
            book_id,
            section,
            self.config.provider.clone(),
            self.config.model.clone(),
            self.config.prompt_version.clone(),
        )
    }

    /// Handle one generation request.
    ///
    /// Resolves the book, then walks the decision table: serve a complete
    /// row, report an in-flight attempt, serve a recorded failure, or
    /// claim and run exactly one attempt. With `force`, a terminal row is
    /// reclaimed instead of served.
    ///
    /// # Errors
    ///
    /// Returns an error when the book cannot be resolved or the store
    /// fails outside the generate phase. Producer and validation failures
    /// are recorded on the row and returned as
    /// [`GenerationResponse::Failed`].
    #[instrument(skip(self), fields(provider = %self.config.provider, model = %self.config.model))]
    pub async fn request_generation(
        &self,
        work_id: &str,
        section: SectionKind,
        force: bool,
    ) -> BookwiseResult<GenerationResponse> {
        let book = self.resolver.ensure_book(work_id).await?;
        let key = self.cache_key(&book.id, section);

        match self.claim(&key, force)? {
            Claim::Respond(response) => Ok(response),
            Claim::Run(record) => self.run_attempt(&key, &book, section, record).await,
        }
    }

    /// Decide whether this request serves a row, observes pending, or
    /// claims an attempt.
    fn claim(&self, key: &CacheKey, force: bool) -> BookwiseResult<Claim> {
        let Some(record) = self.store.lookup(key)? else {
            self.diagnostics
                .emit(DiagnosticEvent::CacheMiss { key: key.to_string() });
            return match self.store.claim_new(key, &self.config.schema_version)? {
                ClaimOutcome::Claimed(record) => {
                    self.diagnostics.emit(DiagnosticEvent::Claimed {
                        key: key.to_string(),
                        attempt: record.attempt_count,
                    });
                    Ok(Claim::Run(record))
                }
                ClaimOutcome::AlreadyExists | ClaimOutcome::Conflict => {
                    self.diagnostics
                        .emit(DiagnosticEvent::ClaimLost { key: key.to_string() });
                    Ok(Claim::Respond(GenerationResponse::pending(key)))
                }
            };
        };

        match (record.status, force) {
            (GenerationStatus::Pending, _) => {
                self.diagnostics.emit(DiagnosticEvent::PendingObserved {
                    key: key.to_string(),
                    retry_after_ms: RETRY_AFTER_MS,
                });
                Ok(Claim::Respond(GenerationResponse::pending(key)))
            }
            (GenerationStatus::Complete, false) => {
                self.diagnostics
                    .emit(DiagnosticEvent::CacheHit { key: key.to_string() });
                Ok(Claim::Respond(GenerationResponse::complete(record, true)))
            }
            (GenerationStatus::Failed, false) => {
                self.diagnostics.emit(DiagnosticEvent::FailureObserved {
                    key: key.to_string(),
                    error_code: record.error_code,
                });
                Ok(Claim::Respond(GenerationResponse::failed(&record)))
            }
            (status, true) => match self.store.claim_retry(key, status)? {
                ClaimOutcome::Claimed(record) => {
                    self.diagnostics.emit(DiagnosticEvent::Claimed {
                        key: key.to_string(),
                        attempt: record.attempt_count,
                    });
                    Ok(Claim::Run(record))
                }
                ClaimOutcome::Conflict | ClaimOutcome::AlreadyExists => {
                    self.diagnostics
                        .emit(DiagnosticEvent::ClaimLost { key: key.to_string() });
                    Ok(Claim::Respond(GenerationResponse::pending(key)))
                }
            },
        }
    }

    /// Run one claimed attempt end to end and persist its outcome.
    async fn run_attempt(
        &self,
        key: &CacheKey,
        book: &BookRecord,
        section: SectionKind,
        claimed: GenerationRecord,
    ) -> BookwiseResult<GenerationResponse> {
        let token = claimed.attempt_token();
        let prompt = build_prompt(section, &book.context());
        let schema = section_json_schema(section);

        self.diagnostics
            .emit(DiagnosticEvent::ProducerStarted { key: key.to_string() });
        let started = Instant::now();
        let produced = tokio::time::timeout(
            self.config.timeout,
            self.generator.generate_json(&prompt, &schema),
        )
        .await;
        self.diagnostics.emit(DiagnosticEvent::ProducerFinished {
            key: key.to_string(),
            latency_ms: elapsed_ms(started),
        });

        let outcome = match produced {
            Err(_elapsed) => GenerationOutcome::Failed {
                code: FailureCode::Timeout,
                message: format!(
                    "producer exceeded the {}ms deadline",
                    self.config.timeout.as_millis()
                ),
            },
            Ok(Err(error)) if error.is_timeout() => GenerationOutcome::Failed {
                code: FailureCode::Timeout,
                message: error.summary(),
            },
            Ok(Err(error)) => {
                // Raw provider output goes to diagnostics only; the
                // recorded message carries the category summary.
                if let ProducerErrorKind::Output(raw) = &error.kind {
                    self.diagnostics.emit(DiagnosticEvent::OutputUndecodable {
                        key: key.to_string(),
                        tail: bounded_tail(raw),
                        len: raw.len(),
                    });
                }
                GenerationOutcome::Failed {
                    code: FailureCode::ProviderError,
                    message: error.summary(),
                }
            }
            Ok(Ok(payload)) => match validate_section(section, &payload) {
                Ok(content) => GenerationOutcome::Complete(content),
                Err(violation) => {
                    self.diagnostics.emit(DiagnosticEvent::ValidationFailed {
                        key: key.to_string(),
                        detail: violation.to_string(),
                    });
                    GenerationOutcome::Failed {
                        code: FailureCode::SchemaValidation,
                        message: violation.to_string(),
                    }
                }
            },
        };

        match self.store.finish(key, token, outcome)? {
            FinishOutcome::Committed(record) => {
                self.diagnostics.emit(DiagnosticEvent::AttemptFinished {
                    key: key.to_string(),
                    error_code: record.error_code,
                    latency_ms: elapsed_ms(started),
                });
                Ok(match record.status {
                    GenerationStatus::Complete => GenerationResponse::complete(record, false),
                    _ => GenerationResponse::failed(&record),
                })
            }
            FinishOutcome::StaleAttempt => {
                self.diagnostics
                    .emit(DiagnosticEvent::StaleAttemptDiscarded { key: key.to_string() });
                // A newer claim owns the row now; report its state instead
                // of the discarded result.
                Ok(match self.store.lookup(key)? {
                    Some(record) if record.status == GenerationStatus::Complete => {
                        GenerationResponse::complete(record, true)
                    }
                    Some(record) if record.status == GenerationStatus::Failed => {
                        GenerationResponse::failed(&record)
                    }
                    _ => GenerationResponse::pending(key),
                })
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
