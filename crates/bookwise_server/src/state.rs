//! Concrete wiring of the engine behind the HTTP surface.

use crate::config::{openai_api_key, AppConfig};
use bookwise_catalog::{CatalogBookResolver, OpenLibraryClient};
use bookwise_database::{PgPool, PostgresBookRepository, PostgresGenerationStore};
use bookwise_error::BookwiseResult;
use bookwise_generation::{GenerationCoordinator, StatusService, TracingDiagnostics};
use bookwise_models::OpenAiClient;
use std::sync::Arc;

/// The coordinator with its production collaborators.
pub type Coordinator = GenerationCoordinator<
    PostgresGenerationStore,
    OpenAiClient,
    CatalogBookResolver<PostgresBookRepository>,
    TracingDiagnostics,
>;

/// Shared state handed to every route handler.
#[derive(Clone)]
pub struct AppState {
    /// The generation engine
    pub coordinator: Arc<Coordinator>,
    /// Read-only status projection
    pub status: Arc<StatusService<PostgresGenerationStore>>,
    /// Book metadata resolution
    pub resolver: Arc<CatalogBookResolver<PostgresBookRepository>>,
}

impl AppState {
    /// Wire the engine from configuration and a connection pool.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the producer API key is unset.
    pub fn from_config(config: &AppConfig, pool: PgPool) -> BookwiseResult<Self> {
        let generation = config.generation();

        let store = Arc::new(PostgresGenerationStore::new(pool.clone()));
        let books = Arc::new(PostgresBookRepository::new(pool));
        let resolver = Arc::new(CatalogBookResolver::new(books, OpenLibraryClient::new()));

        let mut client = OpenAiClient::new(openai_api_key()?, &generation.model)
            .with_timeout(generation.timeout);
        if let Some(temperature) = generation.temperature {
            client = client.with_temperature(temperature);
        }
        if let Some(max_output_tokens) = generation.max_output_tokens {
            client = client.with_max_output_tokens(max_output_tokens);
        }

        let coordinator = Arc::new(GenerationCoordinator::new(
            store.clone(),
            Arc::new(client),
            resolver.clone(),
            Arc::new(TracingDiagnostics),
            generation,
        ));

        Ok(Self {
            coordinator,
            status: Arc::new(StatusService::new(store)),
            resolver,
        })
    }
}
