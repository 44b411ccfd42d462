//! BookWise API server entry point.

use bookwise_database::{create_pool, run_migrations};
use bookwise_error::{BookwiseResult, DatabaseError, ServerError, ServerErrorKind};
use bookwise_server::{init_observability, router, AppConfig, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> BookwiseResult<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_observability(&config.log_level, config.json_logs)?;

    let pool = create_pool(&config.database_url)?;
    let mut conn = pool.get().map_err(DatabaseError::from)?;
    run_migrations(&mut conn)?;
    drop(conn);

    let state = AppState::from_config(&config, pool)?;
    let app = router(state, config.server.frontend_origin.as_deref());

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Bind(e.to_string())))?;
    info!(%addr, "BookWise API listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Bind(e.to_string())))?;

    Ok(())
}
