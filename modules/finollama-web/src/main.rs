use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{Html, IntoResponse},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use ai_client::Gemini;
use finollama_archive::{PageFetcher, PgContentStore};
use finollama_common::{AppConfig, FactCheckPayload};
use finollama_core::{ExploreError, Exploration, Explorer, LlmFactExtractor, ReadabilityExtractor};

mod templates;
use templates::*;

/// Added on top of `RUST_LOG`. tower_http carries the per-request status and latency lines.
const DEFAULT_LOG_DIRECTIVES: &[&str] = &["finollama=info", "tower_http=info"];

// --- App State ---

struct AppState {
    explorer: Explorer,
}

/// What the explore page shows. Every field is optional so the empty form,
/// a failed submission and a result all render through one template.
#[derive(Debug, Default)]
pub struct ExploreView {
    pub url: String,
    pub content: String,
    pub facts: Option<FactCheckPayload>,
    pub error: Option<String>,
    pub source: Option<&'static str>,
}

impl From<Exploration> for ExploreView {
    fn from(e: Exploration) -> Self {
        Self {
            url: e.url,
            content: e.content,
            facts: e.facts,
            error: None,
            source: Some(e.source.as_str()),
        }
    }
}

// --- Main ---

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(log_filter()?).init();

    let config = AppConfig::from_env()?;

    let store = PgContentStore::connect(&config.database_url).await?;
    store.migrate().await?;

    let fetcher = PageFetcher::new(config.fetch_timeout)?;
    let model = Gemini::builder(config.google_api_key.as_str(), config.gemini_model.as_str())
        .base_url(config.gemini_base_url.as_str())
        .timeout(config.llm_timeout)
        .build()?;
    let facts = LlmFactExtractor::new(model, config.max_article_bytes);

    let explorer = Explorer::new(
        Arc::new(fetcher),
        Arc::new(ReadabilityExtractor),
        Arc::new(facts),
        Arc::new(store),
    )
    .with_freshness(config.freshness);

    let app = build_router(Arc::new(AppState { explorer }));

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Finollama web server starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn log_filter() -> Result<EnvFilter> {
    let mut filter = EnvFilter::from_default_env();
    for directive in DEFAULT_LOG_DIRECTIVES {
        filter = filter.add_directive(directive.parse()?);
    }
    Ok(filter)
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/explore", get(explore_form).post(explore_submit))
        .route("/health", get(health))
        .with_state(state)
        // No caching
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path + status + latency only
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

// --- Handlers ---

async fn home_page() -> impl IntoResponse {
    Html(render_home())
}

async fn explore_form() -> impl IntoResponse {
    Html(render_explore(&ExploreView::default()))
}

#[derive(Deserialize)]
struct ExploreForm {
    #[serde(default)]
    url: String,
}

async fn explore_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ExploreForm>,
) -> impl IntoResponse {
    let view = match state.explorer.explore(&form.url).await {
        Ok(exploration) => ExploreView::from(exploration),
        Err(e) => {
            // Store failures are already logged at error level by the explorer
            if !matches!(e, ExploreError::Store(_)) {
                warn!(error = %e, "Explore request failed");
            }
            ExploreView {
                url: form.url.trim().to_string(),
                error: Some(e.to_string()),
                ..Default::default()
            }
        }
    };
    Html(render_explore(&view))
}

async fn health() -> &'static str {
    "ok"
}
