use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

mod adapters;
mod app_state;
mod auth;
mod config;
mod domain;
mod factory;
mod router;
mod routes;
mod telemetry;

use app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = config::read_config().context("Failed to read configuration")?;
    telemetry::init(&settings.application.log_level)?;

    let pool = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy_with(settings.database.with_db());

    let app_state = factory::build_state(pool, &settings)?;
    let app = router::create(app_state);

    let address = format!("{}:{}", settings.application.host, settings.application.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!("Listening on {}", address);

    axum::serve(listener, app).await?;
    Ok(())
}
