use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use wedding_planner::database::schema;
use wedding_planner::services::upstream_cache::UpstreamCache;
use wedding_planner::web::{app, AppState};

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt::init();

    // 2. Connect to the database
    let db_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://wedding.db".to_string());
    println!("Connecting to database: {}", db_url);

    let connect_options = SqliteConnectOptions::from_str(&db_url)
        .expect("DATABASE_URL is not a valid sqlite URL")
        .create_if_missing(true)
        // guest_changes rows cascade away with their guest
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(connect_options)
        .await
        .expect("Cannot connect to the database");

    schema::init(&pool).await.expect("Cannot initialize schema");

    // 3. Build the application
    let state = AppState {
        pool,
        upstream_cache: Arc::new(UpstreamCache::from_env()),
    };
    let router = app(state);

    // 4. Start the server
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Cannot parse host/port");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Cannot bind listener");
    let bound_addr = listener.local_addr().unwrap();
    println!("🚀 Server running on http://{}", bound_addr);
    println!("📍 Admin dashboard at http://{}/admin", bound_addr);

    axum::serve(listener, router).await.unwrap();
}
