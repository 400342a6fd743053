use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, RawQuery, State},
};
use catalog::products::{Product, Slide};
use filter::{
    Facets, FilterEngine, PriceRange, QueryNavigator,
    highlights::{BEST_SELLING_LIMIT, NEW_ARRIVALS_LIMIT, best_selling, new_arrivals},
    related::{RELATED_LIMIT, related_products},
};
use serde::Serialize;

use crate::{
    contact::{inquiry_link, whatsapp_link},
    error::AppError,
    state::AppState,
    utils::price_bounds,
};

#[derive(Serialize)]
pub struct ProductsPage {
    pub products: Vec<Product>,
    pub facets: Facets,
    pub price_range: PriceRange,
    pub query: String,
}

#[derive(Serialize)]
pub struct ProductDetail {
    pub product: Product,
    pub related: Vec<Product>,
    pub whatsapp_url: String,
}

#[derive(Serialize)]
pub struct HomePage {
    pub best_selling: Vec<Product>,
    pub new_arrivals: Vec<Product>,
    pub slides: Vec<Slide>,
}

#[derive(Serialize)]
pub struct ContactLink {
    pub whatsapp_url: String,
}

#[derive(Serialize)]
pub struct RefreshReport {
    pub products: usize,
}

pub async fn products_handler(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Json<ProductsPage> {
    let query = query.unwrap_or_default();
    let products = state.products().await;
    let mut engine = FilterEngine::initialize(products, QueryNavigator::new(&query));

    if let Some((min, max)) = price_bounds(&query) {
        engine.set_price_range(min, max);
    }

    Json(ProductsPage {
        products: owned(engine.filtered_products()),
        facets: engine.facets().clone(),
        price_range: engine.state().price_range,
        query: engine.query().to_string(),
    })
}

pub async fn product_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<ProductDetail>, AppError> {
    let products = state.products().await;
    let product = products
        .iter()
        .find(|product| product.id == id)
        .ok_or(AppError::NotFound(id))?;

    let whatsapp_url = inquiry_link(&state.config.whatsapp_number, product)
        .map_err(|e| AppError::InternalError(Box::new(e)))?;

    Ok(Json(ProductDetail {
        product: product.clone(),
        related: owned(related_products(&products, product, RELATED_LIMIT)),
        whatsapp_url: whatsapp_url.into(),
    }))
}

pub async fn home_handler(State(state): State<Arc<AppState>>) -> Json<HomePage> {
    let products = state.products().await;

    Json(HomePage {
        best_selling: owned(best_selling(&products, BEST_SELLING_LIMIT)),
        new_arrivals: owned(new_arrivals(&products, NEW_ARRIVALS_LIMIT)),
        slides: state.slides().await,
    })
}

pub async fn banners_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Slide>> {
    Json(state.slides().await)
}

pub async fn contact_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ContactLink>, AppError> {
    let link = whatsapp_link(&state.config.whatsapp_number, "")
        .map_err(|e| AppError::InternalError(Box::new(e)))?;

    Ok(Json(ContactLink {
        whatsapp_url: link.into(),
    }))
}

pub async fn refresh_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RefreshReport>, AppError> {
    let products = state.refresh().await?;

    Ok(Json(RefreshReport { products }))
}

fn owned(products: Vec<&Product>) -> Vec<Product> {
    products.into_iter().cloned().collect()
}
