use axum::{routing::get, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use visa_stats_backend::{
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

    let mut app = Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/api/visa-stats",
            get(routes::visa_stats::list_stats).post(routes::visa_stats::submit_stat),
        )
        .route(
            "/api/visa-stats/summary",
            get(routes::visa_stats::summary_stats),
        )
        .route("/api/export", get(routes::export::export_stats))
        .with_state(app_state);

    if let Some(static_dir) = &config.static_dir {
        info!("Serving static form from: {}", static_dir);
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    let app = app
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
