#[cfg(feature = "swagger")]
pub mod openapi;
pub mod v1;
pub mod error;
pub mod health;
pub mod power_quality;

use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Config;
use crate::power_quality::{FormDefaults, HarmonicAnalysisEngine};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub engine: HarmonicAnalysisEngine,
    pub form_defaults: FormDefaults,
}

impl AppState {
    pub fn new(cfg: Config) -> Self {
        Self {
            engine: cfg.analysis.engine(),
            form_defaults: cfg.analysis.form_defaults(),
            cfg: Arc::new(cfg),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cfg = state.cfg.clone();
    let mut router = Router::new()
        .nest("/api/v1", v1::router(state.clone()))
        .merge(v1::health_router(state));

    if cfg.server.enable_cors {
        use tower_http::cors::Any;
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers([axum::http::header::CONTENT_TYPE]);
        router = router.layer(cors);
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(axum::extract::DefaultBodyLimit::max(64 * 1024))
                .layer(TimeoutLayer::new(Duration::from_secs(cfg.server.request_timeout_secs))),
        )
        .layer(TraceLayer::new_for_http())
}

#[cfg(feature = "swagger")]
pub fn with_swagger(app: Router) -> Router {
    use crate::api::openapi::ApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;
    app.merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
}

#[cfg(feature = "metrics")]
pub fn with_metrics(app: Router) -> Router {
    use axum_prometheus::PrometheusMetricLayer;
    let (layer, handle) = PrometheusMetricLayer::pair();

    let metrics_router =
        Router::new().route("/metrics", axum::routing::get(move || async move { handle.render() }));

    app.layer(layer).merge(metrics_router)
}
