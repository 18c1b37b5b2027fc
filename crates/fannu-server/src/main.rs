use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use fannu_api::auth::{self, AppState, AppStateInner};
use fannu_api::middleware::require_auth;
use fannu_api::{broadcasts, creators, drops, earnings, vip};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fannu=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("FANNU_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("FANNU_DB_PATH").unwrap_or_else(|_| "fannu.db".into());
    let host = std::env::var("FANNU_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("FANNU_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init database
    let db = fannu_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let state: AppState = Arc::new(AppStateInner { db, jwt_secret });

    // Public routes: auth, fan-facing pages, VIP join
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/creators/{slug}", get(creators::get_creator_page))
        .route("/creators/{slug}/vip/subscribe", post(vip::subscribe))
        .route("/creators/{slug}/vip/unsubscribe", post(vip::unsubscribe))
        .route("/drops/{drop_id}", get(drops::get_public_drop))
        .route("/receipts/{booking_id}", get(earnings::get_receipt))
        .with_state(state.clone());

    // Creator dashboard routes behind JWT auth
    let protected_routes = Router::new()
        .route(
            "/me/creator",
            get(creators::get_my_creator)
                .post(creators::create_my_creator)
                .put(creators::update_my_creator),
        )
        .route("/me/drops", get(drops::list_my_drops).post(drops::create_drop))
        .route("/me/drops/{drop_id}", put(drops::update_drop).delete(drops::delete_drop))
        .route("/me/drops/{drop_id}/publish", post(drops::publish_drop))
        .route(
            "/me/broadcasts",
            get(broadcasts::list_my_broadcasts).post(broadcasts::create_broadcast),
        )
        .route(
            "/me/broadcasts/{broadcast_id}",
            axum::routing::delete(broadcasts::delete_broadcast),
        )
        .route(
            "/me/broadcasts/{broadcast_id}/cancel",
            post(broadcasts::cancel_broadcast),
        )
        .route("/me/vip", get(vip::list_my_subscribers))
        .route("/me/bookings", get(earnings::list_my_bookings))
        .route("/me/earnings", get(earnings::get_my_earnings))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("FanNu server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
