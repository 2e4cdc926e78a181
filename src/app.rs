/*
 * Responsibility
 * - Config loading → dependency construction → Router assembly
 * - Middleware application (perimeter gate, security headers, CORS, HTTP)
 * - axum::serve() startup
 */
use std::sync::Arc;
use std::{panic, process};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::auth::{PgIdentityProvider, build_ledger, build_session_service};
use crate::services::mailer::TracingMailer;
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex: RUST_LOG=info,wms_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Surface panics via tracing so they are not lost when stderr is
        // hidden by the launcher.
        tracing::error!(?info, "panic");

        // Development: fail fast. Production: default behavior, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("configuration")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting wms-api in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .context("bind listener")?;
    axum::serve(listener, app).await.context("serve")?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("connect postgres")?;

    let sessions = build_session_service(config);
    let ledger = build_ledger(config).await.context("attempt ledger")?;
    let identity = Arc::new(PgIdentityProvider::new(db.clone()));
    let mailer = Arc::new(TracingMailer::new(config.mail_sender.clone()));

    Ok(AppState::new(
        db,
        sessions,
        identity,
        ledger,
        mailer,
        config.paths.clone(),
    ))
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .with_state(state.clone());

    // The gate wraps the root router so it sees full request paths. Outer
    // layers run first on the way in; keep the gate innermost so tracing and
    // request ids cover redirected requests too.
    let router = middleware::route_guard::apply(router, state);
    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}
