//! Dashboard routes for editing products and banners.
//!
//! Product writes reload the shared catalog so the storefront routes see them right away, banners
//! are read live anyway.
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
};
use catalog::{
    admin::{BannerForm, ProductForm},
    products::{Banner, Product},
};
use tracing::info;

use crate::{error::AppError, state::AppState};

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let Some(token) = &state.config.admin_token else {
        return Ok(());
    };

    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match bearer {
        Some(bearer) if bearer == token => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}

/// GET /admin/products
pub async fn list_products_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Product>>, AppError> {
    authorize(&state, &headers)?;

    Ok(Json(state.store().list_products().await?))
}

/// POST /admin/products
pub async fn create_product_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(form): Json<ProductForm>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    authorize(&state, &headers)?;
    form.validate()?;

    let product = state.store().insert_product(form).await?;
    state.catalog_changed().await;

    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /admin/products/{id}
pub async fn update_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(form): Json<ProductForm>,
) -> Result<Json<Product>, AppError> {
    authorize(&state, &headers)?;
    form.validate()?;

    let product = state
        .store()
        .update_product(id, form)
        .await?
        .ok_or(AppError::NotFound(id))?;
    info!("Updated product {id}");
    state.catalog_changed().await;

    Ok(Json(product))
}

/// DELETE /admin/products/{id}
pub async fn delete_product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    authorize(&state, &headers)?;

    if !state.store().delete_product(id).await? {
        return Err(AppError::NotFound(id));
    }
    info!("Deleted product {id}");
    state.catalog_changed().await;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /admin/banners, inactive ones included.
pub async fn list_banners_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Banner>>, AppError> {
    authorize(&state, &headers)?;

    Ok(Json(state.store().list_banners().await?))
}

pub async fn create_banner_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(form): Json<BannerForm>,
) -> Result<(StatusCode, Json<Banner>), AppError> {
    authorize(&state, &headers)?;
    form.validate()?;

    let banner = state.store().insert_banner(form).await?;

    Ok((StatusCode::CREATED, Json(banner)))
}

pub async fn update_banner_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(form): Json<BannerForm>,
) -> Result<Json<Banner>, AppError> {
    authorize(&state, &headers)?;
    form.validate()?;

    let banner = state
        .store()
        .update_banner(id, form)
        .await?
        .ok_or(AppError::BannerNotFound(id))?;
    info!("Updated banner {id}");

    Ok(Json(banner))
}

pub async fn delete_banner_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    authorize(&state, &headers)?;

    if !state.store().delete_banner(id).await? {
        return Err(AppError::BannerNotFound(id));
    }
    info!("Deleted banner {id}");

    Ok(StatusCode::NO_CONTENT)
}
