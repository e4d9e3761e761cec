// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use studydeck_core::error::Fallible;
use tokio::net::TcpListener;
use tokio::signal;

use crate::cmd::build::render_site;
use crate::collection::Collection;
use crate::site::APP_JS;
use crate::site::INDEX_HTML;
use crate::site::STYLE_CSS;
use crate::site::Site;

// max-age is one week in seconds.
const CACHE_CONTROL_IMMUTABLE: &str = "public, max-age=604800, immutable";
const CACHE_CONTROL_NO_CACHE: &str = "no-cache";

pub struct ServerConfig {
    pub directory: Option<String>,
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
struct ServerState {
    site: Arc<Site>,
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let collection = Collection::new(config.directory)?;
    let site = render_site(&collection)?;
    log::debug!("Serving {} cards", collection.cards.len());

    let state = ServerState {
        site: Arc::new(site),
    };
    let app = Router::new();
    let app = app.route("/", get(index_handler));
    let app = app.route("/{name}", get(asset_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("{}:{}", config.host, config.port);

    // Start the server with graceful shutdown on Ctrl+C.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn index_handler(State(state): State<ServerState>) -> Response {
    serve_asset(&state.site, INDEX_HTML)
}

async fn asset_handler(State(state): State<ServerState>, Path(name): Path<String>) -> Response {
    serve_asset(&state.site, &name)
}

fn serve_asset(site: &Site, name: &str) -> Response {
    match site.get(name) {
        Some(asset) => {
            // The viewer script and stylesheet only change with the binary.
            let cache_control = if asset.name == APP_JS || asset.name == STYLE_CSS {
                CACHE_CONTROL_IMMUTABLE
            } else {
                CACHE_CONTROL_NO_CACHE
            };
            let headers: [(HeaderName, &'static str); 2] = [
                (CONTENT_TYPE, asset.content_type),
                (CACHE_CONTROL, cache_control),
            ];
            (StatusCode::OK, headers, asset.body.clone()).into_response()
        }
        None => not_found().into_response(),
    }
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    not_found()
}

fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => log::debug!("Received Ctrl+C, shutting down gracefully"),
        Err(e) => {
            log::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    }
}
