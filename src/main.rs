use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use xpat_jobs_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let public_api = Router::new()
        .route("/api/jobs", get(routes::jobs::list_jobs))
        .route("/api/jobs/:id", get(routes::jobs::get_job))
        .route("/api/jobs/:id/view", post(routes::jobs::record_view))
        .route("/api/requests", post(routes::requests::submit_request))
        .route(
            "/api/requests/seeker",
            get(routes::requests::list_seeker_requests),
        )
        .route(
            "/api/requests/employer",
            get(routes::requests::list_employer_requests),
        )
        .route(
            "/api/requests/:id/status",
            post(routes::requests::update_request_status),
        )
        .route("/api/wizard", post(routes::wizard::start_wizard))
        .route("/api/wizard/:id", get(routes::wizard::get_wizard))
        .route("/api/wizard/:id/answer", post(routes::wizard::answer))
        .route("/api/wizard/:id/skip", post(routes::wizard::skip))
        .route("/api/wizard/:id/retry", post(routes::wizard::retry))
        .layer(axum::middleware::from_fn_with_state(
            xpat_jobs_backend::middleware::rate_limit::new_rps_state(config.public_rps),
            xpat_jobs_backend::middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(public_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
