use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use configuration::Settings;
use database::{ConnectionProvider, DbRepository, ImovelStore};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod links;

pub use links::LinkBuilder;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ImovelStore>,
    pub links: LinkBuilder,
}

/// Binds the seven `/imoveis` routes to their handlers.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route(
            "/imoveis",
            get(handlers::list_imoveis).post(handlers::create_imovel),
        )
        .route(
            "/imoveis/:id",
            get(handlers::get_imovel)
                .put(handlers::update_imovel)
                .delete(handlers::delete_imovel),
        )
        .route("/imoveis/tipo/:tipo", get(handlers::list_by_tipo))
        .route("/imoveis/cidade/:cidade", get(handlers::list_by_cidade))
        .with_state(Arc::new(state))
        .layer(cors)
        // Logs every incoming request and its response status.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024))
}

/// Configures and runs the web server until Ctrl-C.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let provider = ConnectionProvider::new(&settings.database);
    let state = AppState {
        store: Arc::new(DbRepository::new(provider)),
        links: LinkBuilder::new(&settings.server.public_url),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.bind_address()).await?;
    tracing::info!(
        database = %settings.database.host,
        "Web server listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received."),
        Err(e) => {
            tracing::error!(error = %e, "Could not listen for Ctrl-C; running until killed.");
            std::future::pending::<()>().await;
        }
    }
}
