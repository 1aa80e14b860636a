// src/server.rs
// =============================================================================
// This module is the thin HTTP wrapper around the search engine.
//
// One real route: GET /<starting_page> runs a search from that article and
// answers with JSON. The engine result maps onto the response like this:
//   - found        -> {"starting_page": ..., "result": [path...]} (or a
//                     hop count, when the server runs in hops mode)
//   - unreachable  -> {"starting_page": ..., "result": "unreachable"}
//   - engine error -> HTTP 500
// Browsers also ask for /favicon.ico; that gets a plain 404 instead of a
// very confused Wikipedia crawl for an article named "favicon.ico".
//
// Every request gets a fresh Crawler, so searches never share state.
// =============================================================================

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};

use crate::cli::Mode;
use crate::crawl::{Crawler, Tracking};
use crate::fetch::WikiClient;
use crate::links::Strategy;

// Everything a request handler needs to build a crawler
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub target: String,
    pub contact: String,
    pub strategy: Strategy,
    pub tracking: Tracking,
    pub mode: Mode,
}

/// Binds the listener and serves until the process is stopped.
pub async fn serve(config: ServerConfig, port: u16) -> Result<()> {
    let app = router(config);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    println!("🚀 Server running on port {}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

// Builds the router; split out so tests could drive it without a socket
fn router(config: ServerConfig) -> Router {
    Router::new()
        // The static route wins over the catch-all path parameter
        .route("/favicon.ico", get(favicon))
        .route("/:starting_page", get(search))
        .with_state(config)
}

// Handles GET /<starting_page>
async fn search(
    State(config): State<ServerConfig>,
    Path(starting_page): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    println!("🔍 Request: search from '{}'", starting_page);

    let client = WikiClient::new(&config.contact).map_err(|error| {
        eprintln!("Error: could not build HTTP client: {}", error);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let source = config.strategy.into_source(client);
    let crawler = Crawler::new(source, &config.target, config.tracking);

    let result = match config.mode {
        Mode::Hops => match crawler.min_hops(&starting_page).await {
            Some(hops) => json!(hops),
            None => json!("unreachable"),
        },
        Mode::Path => match crawler.find_path(&starting_page).await {
            Ok(Some(path)) => json!(path),
            Ok(None) => json!("unreachable"),
            Err(error) => {
                // A broken engine invariant is an internal error,
                // not something to dress up as a result
                eprintln!("Error: {}", error);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        },
    };

    Ok(Json(json!({
        "starting_page": starting_page,
        "result": result,
    })))
}

// Handles GET /favicon.ico
async fn favicon() -> StatusCode {
    StatusCode::NOT_FOUND
}
