//! Storefront API for the Zahra perfume shop.
//!
//! The RTL frontend calls these routes, each products page view builds its own
//! [`filter::FilterEngine`] over the shared catalog snapshot.
//!
//! # Routes
//! - `GET /products`: filtered listing, query keys `category`, `perfume_type`, `search`, `min_price`, `max_price`
//! - `GET /products/{id}`: product, related products, WhatsApp inquiry link
//! - `GET /home`: best sellers, new arrivals, carousel slides
//! - `GET /banners`: carousel slides
//! - `GET /contact`: WhatsApp chat link
//! - `POST /catalog/refresh`: reload the catalog after an edit made outside this server
//! - `GET|POST /admin/products`, `PUT|DELETE /admin/products/{id}`: dashboard product edits
//! - `GET|POST /admin/banners`, `PUT|DELETE /admin/banners/{id}`: dashboard banner edits
//!
//! # Environment
//! - `RUST_PORT`: defaults to 1111
//! - `CATALOG_PATH`: serve a JSON snapshot instead of the hosted backend
//! - `CATALOG_URL`: hosted backend base url, key read from `/run/secrets/CATALOG_API_KEY`
//! - `WHATSAPP_NUMBER`: shop number for chat links
//! - `ADMIN_TOKEN` secret: bearer token required by the admin routes when present
//! - `RUST_LOG`: tracing filter
use std::{sync::Arc, time::Duration};

use anyhow::Error;
use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post, put},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod admin;
pub mod config;
pub mod contact;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use admin::{
    create_banner_handler, create_product_handler, delete_banner_handler, delete_product_handler,
    list_banners_handler, list_products_handler, update_banner_handler, update_product_handler,
};
use routes::{
    banners_handler, contact_handler, home_handler, product_handler, products_handler,
    refresh_handler,
};
use state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/products", get(products_handler))
        .route("/products/{id}", get(product_handler))
        .route("/home", get(home_handler))
        .route("/banners", get(banners_handler))
        .route("/contact", get(contact_handler))
        .route("/catalog/refresh", post(refresh_handler))
        .route(
            "/admin/products",
            get(list_products_handler).post(create_product_handler),
        )
        .route(
            "/admin/products/{id}",
            put(update_product_handler).delete(delete_product_handler),
        )
        .route(
            "/admin/banners",
            get(list_banners_handler).post(create_banner_handler),
        )
        .route(
            "/admin/banners/{id}",
            put(update_banner_handler).delete(delete_banner_handler),
        )
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> Result<(), Error> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
