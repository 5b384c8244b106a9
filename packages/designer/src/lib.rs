//! # Pagebuilder Designer
//!
//! The admin page as an HTTP service. Serves the mobile preview and a JSON
//! API for selecting, editing and publishing the home page.

pub mod error;
pub mod routes;
pub mod script;
pub mod state;

pub use error::DesignerError;
pub use routes::router;
pub use state::{AppState, DesignerConfig};

/// Load the session and serve until the listener fails
pub async fn serve(config: DesignerConfig) -> Result<(), DesignerError> {
    let state = AppState::load(&config).await?;
    let app = router(state);

    let addr = format!("127.0.0.1:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("designer listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
