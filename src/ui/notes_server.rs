use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use futures::StreamExt;
use serde_json::json;
use tokio::sync::oneshot;
use warp::http::{Response, StatusCode};
use warp::hyper::Body;
use warp::Filter;

use crate::config::constants::{
    DEFAULT_SERVER_PORT_RANGE_END, DEFAULT_SERVER_PORT_RANGE_START, SERVER_SHUTDOWN_GRACE_PERIOD_MS,
};
use crate::errors::{RelnotesError, RelnotesResult};
use crate::services::github::GitHubClient;
use crate::services::stream_bridge::{fragment_stream, StreamBridge};
use crate::structs::config::config::Config;
use crate::structs::diffs_query::DiffsQuery;
use crate::structs::generate_notes_request::GenerateNotesRequest;

pub struct NotesServer {
    config: Arc<Config>,
    github: Arc<GitHubClient>,
    bridge: Arc<StreamBridge>,
    port: Option<u16>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl NotesServer {
    pub fn new(config: Arc<Config>, github: Arc<GitHubClient>, bridge: Arc<StreamBridge>) -> Self {
        Self {
            config,
            github,
            bridge,
            port: None,
            shutdown_tx: None,
        }
    }

    pub async fn start(&mut self, port: Option<u16>) -> RelnotesResult<u16> {
        let port = match port.or(self.config.server.port) {
            Some(port) => port,
            None => Self::find_available_port().await?,
        };
        self.port = Some(port);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        self.shutdown_tx = Some(shutdown_tx);

        let routes = self.routes();
        let addr: SocketAddr = ([127, 0, 0, 1], port).into();
        let (_, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
            shutdown_rx.await.ok();
        });

        tokio::spawn(server);

        log::info!("🌐 Notes server started on port {}", port);
        Ok(port)
    }

    pub fn routes(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let config = Arc::clone(&self.config);
        let github = Arc::clone(&self.github);
        let bridge = Arc::clone(&self.bridge);

        let index = warp::path::end()
            .and(warp::get())
            .map(|| warp::reply::html(include_str!("static/index.html")));

        let config_filter = warp::any().map(move || Arc::clone(&config));
        let github_filter = warp::any().map(move || Arc::clone(&github));
        let bridge_filter = warp::any().map(move || Arc::clone(&bridge));

        let diffs = warp::path!("api" / "diffs")
            .and(warp::get())
            .and(warp::query::<DiffsQuery>())
            .and(config_filter)
            .and(github_filter)
            .and_then(fetch_diffs_handler);

        let notes = warp::path!("api" / "generate-notes")
            .and(warp::post())
            .and(warp::body::json())
            .and(bridge_filter)
            .and_then(generate_notes_handler);

        index.or(diffs).or(notes).with(
            warp::cors()
                .allow_origin("http://127.0.0.1")
                .allow_origin("http://localhost")
                .allow_headers(vec!["content-type"])
                .allow_methods(vec!["GET", "POST"]),
        )
    }

    pub async fn shutdown(&mut self) -> RelnotesResult<()> {
        log::info!("🛑 Shutting down notes server...");

        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            shutdown_tx.send(()).map_err(|_| {
                RelnotesError::system_error("shutdown", "Failed to send shutdown signal")
            })?;
        }

        tokio::time::sleep(std::time::Duration::from_millis(SERVER_SHUTDOWN_GRACE_PERIOD_MS)).await;
        log::info!("✅ Notes server shutdown complete");

        Ok(())
    }

    async fn find_available_port() -> RelnotesResult<u16> {
        for port in DEFAULT_SERVER_PORT_RANGE_START..DEFAULT_SERVER_PORT_RANGE_END {
            if let Ok(listener) = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await {
                drop(listener);
                return Ok(port);
            }
        }
        Err(RelnotesError::system_error(
            "bind server port",
            "no available ports in the configured range",
        ))
    }
}

async fn fetch_diffs_handler(
    query: DiffsQuery,
    config: Arc<Config>,
    github: Arc<GitHubClient>,
) -> Result<impl warp::Reply, Infallible> {
    let owner = query.owner.unwrap_or_else(|| config.github.owner.clone());
    let repo = query.repo.unwrap_or_else(|| config.github.repo.clone());
    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(config.github.per_page);

    match github.fetch_merged_page(&owner, &repo, page, per_page).await {
        Ok(diffs_page) => Ok(warp::reply::with_status(
            warp::reply::json(&diffs_page),
            StatusCode::OK,
        )),
        Err(e) => {
            let status = match &e {
                RelnotesError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                RelnotesError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
                RelnotesError::GithubError { .. } | RelnotesError::NetworkError { .. } => {
                    StatusCode::BAD_GATEWAY
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            Ok(warp::reply::with_status(
                warp::reply::json(&json!({ "error": e.user_message() })),
                status,
            ))
        }
    }
}

/// Streams the generated notes. Headers are committed before the first
/// provider call, so a later failure shows up only as early stream end;
/// only a request rejected up front (bad batch config) gets an HTTP
/// error.
async fn generate_notes_handler(
    request: GenerateNotesRequest,
    bridge: Arc<StreamBridge>,
) -> Result<Response<Body>, Infallible> {
    match bridge.open(request.diffs) {
        Ok(rx) => {
            let body = Body::wrap_stream(fragment_stream(rx).map(Ok::<_, Infallible>));
            let response = Response::builder()
                .status(StatusCode::OK)
                .header("Content-Type", "text/event-stream")
                .header("Cache-Control", "no-cache, no-transform")
                .header("Connection", "keep-alive")
                .body(body);
            Ok(response.unwrap_or_else(|_| Response::new(Body::empty())))
        }
        Err(e) => {
            let payload = json!({ "error": e.user_message() }).to_string();
            let response = Response::builder()
                .status(StatusCode::BAD_REQUEST)
                .header("Content-Type", "application/json")
                .body(Body::from(payload));
            Ok(response.unwrap_or_else(|_| Response::new(Body::empty())))
        }
    }
}
