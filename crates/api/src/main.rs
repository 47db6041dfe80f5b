use sqlx::postgres::PgPoolOptions;

use astar_api::app::build_app;
use astar_api::config::ApiConfig;

#[tokio::main]
async fn main() {
    astar_observability::init();

    let config = ApiConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    let app = build_app(pool, &config.jwt_secret);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("failed to bind listen address");
    tracing::info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app).await.expect("server error");
}
