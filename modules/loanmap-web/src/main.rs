use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use loanmap_common::Config;
use loanmap_data::{aggregate, DashboardView, LoanDataset};

mod auth;
mod templates;

// --- App State ---

pub struct AppState {
    dataset: LoanDataset,
    config: Config,
}

// --- Main ---

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("loanmap_web=info".parse()?)
                .add_directive("loanmap_data=info".parse()?),
        )
        .init();

    let config = Config::from_env();
    let dataset = LoanDataset::load(&config)?;

    info!(
        overall_amount = aggregate::overall_total(dataset.loans()),
        overall_applications = aggregate::overall_volume(dataset.loans()),
        "Loan dataset ready"
    );

    let addr = format!("{}:{}", config.web_host, config.web_port);
    let state = Arc::new(AppState { dataset, config });

    let app = Router::new()
        .route("/", get(dashboard_page))
        .route("/api/dashboard", get(api_dashboard))
        // The whole page sits behind the static credential pair
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_basic_auth,
        ))
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path + status + latency only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    info!("Loan dashboard starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

async fn dashboard_page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match DashboardView::build(&state.dataset, state.config.default_year) {
        Ok(view) => Html(templates::render_dashboard(&view)).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to render dashboard");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Deserialize)]
struct DashboardQuery {
    year: Option<i32>,
}

async fn api_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardQuery>,
) -> impl IntoResponse {
    let year = params.year.unwrap_or(state.config.default_year);
    match DashboardView::build(&state.dataset, year) {
        Ok(view) => Json(view).into_response(),
        Err(e) => {
            warn!(error = %e, year, "Failed to build dashboard view");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
