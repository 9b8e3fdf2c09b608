// --- File: crates/services/encore_backend/src/app.rs ---
use axum::{extract::OriginalUri, routing::get, Router};
use encore_common::EncoreError;
use encore_config::AppConfig;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Failures that stop the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to load config: {0}")]
    Config(String),

    #[cfg(feature = "contact")]
    #[error("Contact store unavailable: {0}")]
    Database(#[from] encore_db::DbError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// All enabled feature routers, meant to be nested under `/api`.
pub async fn api_router(config: Arc<AppConfig>) -> Result<Router, StartupError> {
    #[allow(unused_mut)] // for the features it needs to be mutable
    let mut router = Router::new().route("/", get(|| async { "Welcome to the Encore API!" }));

    #[cfg(feature = "calendly")]
    if encore_common::is_calendly_enabled(&config) {
        info!("Mounting Calendly proxy at /api/calendly");
        router = router.merge(encore_calendly::routes(config.clone()));
    }

    #[cfg(feature = "contact")]
    if encore_common::is_contact_enabled(&config) {
        let repository = contact_repository(&config).await?;
        info!("Mounting contact form at /api/contact");
        router = router.merge(encore_contact::routes(config.clone(), repository));
    }

    #[cfg(feature = "chat")]
    if encore_common::is_chat_enabled(&config) {
        info!("Mounting chat proxy at /api/chat");
        router = router.merge(encore_chat::routes(config.clone()));
    }

    Ok(router.fallback(api_not_found))
}

/// Unknown `/api` paths, including disabled features, answer with the
/// shared JSON error body instead of falling through to the static files.
async fn api_not_found(OriginalUri(uri): OriginalUri) -> EncoreError {
    EncoreError::NotFoundError(uri.path().to_string())
}

#[cfg(feature = "contact")]
async fn contact_repository(
    config: &AppConfig,
) -> Result<Arc<dyn encore_db::ContactRepository>, StartupError> {
    use encore_db::{ContactRepository, ContactRepositoryFactory, DbClient, RepositoryFactory};

    let client = DbClient::new(config).await?;
    let repository = ContactRepositoryFactory::new().create_repository(client);
    repository.init_schema().await?;
    Ok(Arc::new(repository))
}

/// The complete application: `/api`, Swagger UI and, in debug builds, the
/// static front-end.
pub async fn build_app(config: Arc<AppConfig>) -> Result<Router, StartupError> {
    let mut app = Router::new().nest("/api", api_router(config.clone()).await?);

    #[cfg(feature = "openapi")]
    {
        app = app.merge(swagger_ui());
    }

    // Serve the built front-end in dev mode
    if cfg!(debug_assertions) {
        let static_dir: PathBuf = config
            .server
            .static_dir
            .clone()
            .unwrap_or_else(|| "dist".to_string())
            .into();
        info!("Serving static files from {}", static_dir.display());
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    Ok(app.layer(TraceLayer::new_for_http()))
}

#[cfg(feature = "openapi")]
fn swagger_ui() -> utoipa_swagger_ui::SwaggerUi {
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Encore API",
            version = "0.1.0",
            description = "Artist site backend: Calendly proxy, contact form and chat",
            license(name = "MIT", url = "https://opensource.org/licenses/MIT")
        ),
        tags((name = "Encore", description = "Core service endpoints")),
        servers((url = "/api", description = "Main API Prefix")),
    )]
    struct ApiDoc;

    #[allow(unused_mut)] // for the features it needs to be mutable
    let mut openapi_doc = ApiDoc::openapi();
    #[cfg(feature = "calendly")]
    openapi_doc.merge(encore_calendly::doc::CalendlyApiDoc::openapi());
    #[cfg(feature = "contact")]
    openapi_doc.merge(encore_contact::doc::ContactApiDoc::openapi());
    #[cfg(feature = "chat")]
    openapi_doc.merge(encore_chat::doc::ChatApiDoc::openapi());

    info!("Adding Swagger UI at /api/docs");
    SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc)
}
