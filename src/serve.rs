use std::path::PathBuf;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Serves the trunk build of the web app. Unknown paths get `index.html` so
/// client-side routes like `/city/Rome` survive a reload.
pub async fn serve(dist: PathBuf, port: u16) -> anyhow::Result<()> {
    let index = dist.join("index.html");
    if !index.exists() {
        warn!("{} not found; run `trunk build` in frontend/ first", index.display());
    }

    let app = Router::new()
        .fallback_service(ServeDir::new(&dist).not_found_service(ServeFile::new(index)))
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Serving {} on http://{addr}/", dist.display());

    axum::serve(listener, app).await?;
    Ok(())
}
