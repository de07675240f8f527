//! Development server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::services::ServeDir;

use garland_site::{AssetPipeline, BuildConfig, SiteBuilder, SiteBundle};

use crate::watcher::{FileWatcher, WatchEvent, WatchTargets};
use crate::websocket::{hmr_client_script, HmrHub, HmrMessage};

const HMR_PATH: &str = "/__hmr";
const HMR_SCRIPT_PATH: &str = "/__hmr.js";

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Site content file
    pub content_path: PathBuf,

    /// Price table file
    pub prices_path: PathBuf,

    /// Directory served under /static
    pub static_dir: Option<PathBuf>,

    /// Site title override
    pub title: Option<String>,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            content_path: PathBuf::from("content/site.toml"),
            prices_path: PathBuf::from("content/prices.toml"),
            static_dir: None,
            title: None,
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error("Failed to load site: {0}")]
    LoadError(String),
}

/// Shared server state.
struct ServerState {
    builder: SiteBuilder,
    bundle: ArcSwap<SiteBundle>,
    hmr: HmrHub,
}

impl ServerState {
    fn new(builder: SiteBuilder, bundle: SiteBundle) -> Self {
        Self {
            builder,
            bundle: ArcSwap::from_pointee(bundle),
            hmr: HmrHub::new(),
        }
    }

    /// Reload content and prices and swap them in whole.
    ///
    /// On failure the previous bundle stays active.
    fn reload(&self) -> HmrMessage {
        match self.builder.load_bundle() {
            Ok(bundle) => {
                self.bundle.store(Arc::new(bundle));
                tracing::info!("Reloaded site content and prices");
                HmrMessage::Reload
            }
            Err(e) => {
                tracing::warn!("Keeping previous site, reload failed: {}", e);
                HmrMessage::Error {
                    message: e.to_string(),
                }
            }
        }
    }
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    fn build_config(&self) -> BuildConfig {
        BuildConfig {
            content_path: self.config.content_path.clone(),
            prices_path: self.config.prices_path.clone(),
            static_dir: self.config.static_dir.clone(),
            minify: false,
            title: self.config.title.clone(),
            ..Default::default()
        }
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ServerError::InvalidAddress(format!("{}:{}", self.config.host, self.config.port))
            })?;

        let builder = SiteBuilder::new(self.build_config());
        let bundle = builder
            .load_bundle()
            .map_err(|e| ServerError::LoadError(e.to_string()))?;
        let state = Arc::new(ServerState::new(builder, bundle));

        // Set up file watcher
        let targets = WatchTargets {
            content: self.config.content_path.clone(),
            prices: self.config.prices_path.clone(),
        };
        let mut watch_paths = targets.directories();
        if let Some(dir) = &self.config.static_dir {
            watch_paths.push(dir.clone());
        }

        let (watcher, mut rx) = FileWatcher::new(&watch_paths, targets)
            .map_err(|e| ServerError::WatchError(e.to_string()))?;

        // Spawn file watch handler
        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&state_clone, event);
            }
            // Keep watcher alive
            drop(watcher);
        });

        let mut app = Router::new()
            .route("/", get(index_handler))
            .route("/index.html", get(index_handler))
            .route("/assets/main.css", get(css_handler))
            .route("/assets/main.js", get(js_handler))
            .route("/prices.json", get(prices_handler))
            .route(HMR_PATH, get(ws_handler))
            .route(HMR_SCRIPT_PATH, get(hmr_script_handler));

        if let Some(dir) = &self.config.static_dir {
            app = app.nest_service("/static", ServeDir::new(dir));
        }

        let app = app.with_state(state);

        tracing::info!("Starting dev server at http://{}", addr);

        // Open browser if configured
        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Handle file watch events.
fn handle_watch_event(state: &ServerState, event: WatchEvent) {
    match event {
        WatchEvent::PricesModified(path) => {
            tracing::info!("Price table modified: {}", path.display());
            state.hmr.send(state.reload());
        }

        WatchEvent::ContentModified(path) => {
            tracing::info!("Site content modified: {}", path.display());
            state.hmr.send(state.reload());
        }

        WatchEvent::Created(_) | WatchEvent::Deleted(_) | WatchEvent::Modified(_) => {
            // Static files are served from disk, a reload picks them up
            state.hmr.send(HmrMessage::Reload);
        }
    }
}

fn internal_error(message: String) -> Response {
    tracing::error!("{}", message);
    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}

/// Handler for the storefront page.
async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    let bundle = state.bundle.load();
    match state
        .builder
        .render_index(&bundle, &[HMR_SCRIPT_PATH.to_string()])
    {
        Ok(html) => Html(html).into_response(),
        Err(e) => internal_error(e.to_string()),
    }
}

async fn css_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], state.builder.css())
}

async fn js_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        AssetPipeline::generate_js(),
    )
}

async fn prices_handler(State(state): State<Arc<ServerState>>) -> Response {
    match state.bundle.load().pricing_json() {
        Ok(json) => ([(header::CONTENT_TYPE, "application/json")], json).into_response(),
        Err(e) => internal_error(e.to_string()),
    }
}

/// Handler for the reload WebSocket endpoint.
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Handle a WebSocket connection.
async fn handle_ws(mut socket: WebSocket, state: Arc<ServerState>) {
    let mut rx = state.hmr.subscribe();

    if send_json(&mut socket, &HmrMessage::Connected).await.is_err() {
        return;
    }

    // Forward reload messages to the client
    while let Ok(msg) = rx.recv().await {
        if send_json(&mut socket, &msg).await.is_err() {
            break;
        }
    }
}

async fn send_json(socket: &mut WebSocket, msg: &HmrMessage) -> Result<(), ()> {
    let json = serde_json::to_string(msg).map_err(|e| {
        tracing::warn!("Failed to encode reload message: {}", e);
    })?;
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| ())
}

/// Handler for the reload client script.
async fn hmr_script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        hmr_client_script(HMR_PATH),
    )
}
