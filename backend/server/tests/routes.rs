use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use anyhow::{Error, anyhow};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use catalog::{
    CatalogFile, CatalogSource,
    admin::{BannerForm, CatalogStore, ProductForm, newest_first, next_id},
    products::{Banner, Product, default_slides},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use storefront::{
    app,
    config::{CatalogConfig, Config},
    state::AppState,
};
use tower::ServiceExt;

struct MemoryCatalog {
    catalog: Mutex<CatalogFile>,
    offline: AtomicBool,
}

impl MemoryCatalog {
    fn new(products: Value, banners: Value) -> Self {
        Self {
            catalog: Mutex::new(CatalogFile {
                products: serde_json::from_value(products).unwrap(),
                banners: serde_json::from_value(banners).unwrap(),
            }),
            offline: AtomicBool::new(false),
        }
    }

    fn snapshot(&self) -> Result<CatalogFile, Error> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(anyhow!("connection refused"));
        }

        Ok(self.catalog.lock().unwrap().clone())
    }
}

#[async_trait]
impl CatalogSource for MemoryCatalog {
    async fn fetch_all_products(&self) -> Result<Vec<Product>, Error> {
        Ok(self.snapshot()?.products)
    }

    async fn fetch_active_banners(&self) -> Result<Vec<Banner>, Error> {
        Ok(self.snapshot()?.active_banners())
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, Error> {
        let mut products = self.snapshot()?.products;
        newest_first(&mut products, |product| product.created_at);
        Ok(products)
    }

    async fn insert_product(&self, form: ProductForm) -> Result<Product, Error> {
        let mut catalog = self.catalog.lock().unwrap();
        let id = next_id(catalog.products.iter().map(|product| product.id));
        let product = form.into_product(id, None, Some(chrono::Utc::now()));
        catalog.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: u64, form: ProductForm) -> Result<Option<Product>, Error> {
        let mut catalog = self.catalog.lock().unwrap();
        let Some(slot) = catalog.products.iter_mut().find(|product| product.id == id) else {
            return Ok(None);
        };
        *slot = form.into_product(id, slot.rating, slot.created_at);
        Ok(Some(slot.clone()))
    }

    async fn delete_product(&self, id: u64) -> Result<bool, Error> {
        let mut catalog = self.catalog.lock().unwrap();
        let before = catalog.products.len();
        catalog.products.retain(|product| product.id != id);
        Ok(catalog.products.len() != before)
    }

    async fn list_banners(&self) -> Result<Vec<Banner>, Error> {
        let mut banners = self.snapshot()?.banners;
        newest_first(&mut banners, |banner| banner.created_at);
        Ok(banners)
    }

    async fn insert_banner(&self, form: BannerForm) -> Result<Banner, Error> {
        let mut catalog = self.catalog.lock().unwrap();
        let id = next_id(catalog.banners.iter().map(|banner| banner.id));
        let banner = form.into_banner(id, Some(chrono::Utc::now()));
        catalog.banners.push(banner.clone());
        Ok(banner)
    }

    async fn update_banner(&self, id: u64, form: BannerForm) -> Result<Option<Banner>, Error> {
        let mut catalog = self.catalog.lock().unwrap();
        let Some(slot) = catalog.banners.iter_mut().find(|banner| banner.id == id) else {
            return Ok(None);
        };
        *slot = form.into_banner(id, slot.created_at);
        Ok(Some(slot.clone()))
    }

    async fn delete_banner(&self, id: u64) -> Result<bool, Error> {
        let mut catalog = self.catalog.lock().unwrap();
        let before = catalog.banners.len();
        catalog.banners.retain(|banner| banner.id != id);
        Ok(catalog.banners.len() != before)
    }
}

fn config() -> Config {
    Config {
        port: 0,
        catalog: CatalogConfig::Local("catalog.json".into()),
        whatsapp_number: "+968 7634 7266".to_string(),
        admin_token: None,
    }
}

fn products() -> Value {
    json!([
        { "id": 1, "name": "Rose", "category": "نسائي", "perfume_type": "مسك", "price": 10, "rating": 4.5, "created_at": "2025-02-01T00:00:00Z" },
        { "id": 2, "name": "Oud", "category": "رجالي", "perfume_type": "عود", "price": 50, "rating": 4.9, "created_at": "2025-01-01T00:00:00Z" },
        { "id": 3, "name": "Amber", "category": "نسائي", "price": 25 }
    ])
}

async fn server(source: Arc<MemoryCatalog>) -> axum::Router {
    app(AppState::with_source(config(), source).await)
}

async fn send(router: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        Value::String(String::from_utf8_lossy(&bytes).into_owned())
    });

    (status, body)
}

async fn call(router: axum::Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(router, request).await
}

async fn call_json(
    router: axum::Router,
    method: Method,
    uri: &str,
    body: Value,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(router, request).await
}

fn ids(body: &Value, key: &str) -> Vec<u64> {
    let rows = if key.is_empty() { body } else { &body[key] };

    rows.as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn lists_everything_without_filters() {
    let router = server(Arc::new(MemoryCatalog::new(products(), json!([])))).await;

    let (status, body) = call(router, Method::GET, "/products").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body, "products"), vec![1, 2, 3]);
    assert_eq!(body["facets"]["categories"], json!(["رجالي", "نسائي"]));
    assert_eq!(body["facets"]["max_price"], json!(50.0));
    assert_eq!(body["query"], "");
}

#[tokio::test]
async fn filters_by_query_and_price() {
    let router = server(Arc::new(MemoryCatalog::new(products(), json!([])))).await;

    let (status, body) = call(
        router,
        Method::GET,
        "/products?category=%D9%86%D8%B3%D8%A7%D8%A6%D9%8A,unknownCat&min_price=20&utm=x",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body, "products"), vec![3]);
    assert_eq!(body["price_range"], json!({ "min": 20.0, "max": 50.0 }));
    assert_eq!(body["query"], "category=%D9%86%D8%B3%D8%A7%D8%A6%D9%8A");
}

#[tokio::test]
async fn searches_case_insensitively() {
    let router = server(Arc::new(MemoryCatalog::new(products(), json!([])))).await;

    let (_, body) = call(router, Method::GET, "/products?search=%20OUD%20").await;

    assert_eq!(ids(&body, "products"), vec![2]);
    assert_eq!(body["query"], "search=OUD");
}

#[tokio::test]
async fn product_detail() {
    let router = server(Arc::new(MemoryCatalog::new(products(), json!([])))).await;

    let (status, body) = call(router, Method::GET, "/products/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["name"], "Rose");
    assert_eq!(ids(&body, "related"), vec![3]);
    assert!(
        body["whatsapp_url"]
            .as_str()
            .unwrap()
            .starts_with("https://wa.me/96876347266?text=")
    );
}

#[tokio::test]
async fn unknown_product() {
    let router = server(Arc::new(MemoryCatalog::new(products(), json!([])))).await;

    let (status, _) = call(router, Method::GET, "/products/99").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn home_sections() {
    let banners = json!([
        { "id": 1, "image_url": "sale.webp", "title": "تخفيضات", "subtitle": "", "is_active": true }
    ]);
    let router = server(Arc::new(MemoryCatalog::new(products(), banners))).await;

    let (status, body) = call(router, Method::GET, "/home").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body, "best_selling"), vec![2, 1, 3]);
    assert_eq!(ids(&body, "new_arrivals"), vec![1, 2, 3]);
    assert_eq!(body["slides"][0]["link_to"], "/products");
}

#[tokio::test]
async fn default_slides_when_offline() {
    let source = Arc::new(MemoryCatalog::new(products(), json!([])));
    let router = server(source.clone()).await;
    source.offline.store(true, Ordering::SeqCst);

    let (status, body) = call(router, Method::GET, "/banners").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::to_value(default_slides()).unwrap());
}

#[tokio::test]
async fn contact_link() {
    let router = server(Arc::new(MemoryCatalog::new(products(), json!([])))).await;

    let (_, body) = call(router, Method::GET, "/contact").await;

    assert_eq!(body["whatsapp_url"], "https://wa.me/96876347266?text=");
}

#[tokio::test]
async fn starts_empty_when_catalog_fails() {
    let source = Arc::new(MemoryCatalog::new(products(), json!([])));
    source.offline.store(true, Ordering::SeqCst);
    let router = server(source.clone()).await;

    let (status, body) = call(router.clone(), Method::GET, "/products").await;
    assert_eq!(status, StatusCode::OK);
    assert!(ids(&body, "products").is_empty());
    assert_eq!(body["facets"]["max_price"], json!(500.0));

    source.offline.store(false, Ordering::SeqCst);
    let (status, body) = call(router.clone(), Method::POST, "/catalog/refresh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"], 3);

    let (_, body) = call(router, Method::GET, "/products").await;
    assert_eq!(ids(&body, "products"), vec![1, 2, 3]);
}

#[tokio::test]
async fn failed_refresh_keeps_catalog() {
    let source = Arc::new(MemoryCatalog::new(products(), json!([])));
    let router = server(source.clone()).await;
    source.offline.store(true, Ordering::SeqCst);

    let (status, _) = call(router.clone(), Method::POST, "/catalog/refresh").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (_, body) = call(router, Method::GET, "/products").await;
    assert_eq!(ids(&body, "products"), vec![1, 2, 3]);
}

#[tokio::test]
async fn admin_product_edits_reach_the_storefront() {
    let router = server(Arc::new(MemoryCatalog::new(products(), json!([])))).await;
    let form = json!({ "name": "Musk", "price": 15, "category": "للجنسين", "perfume_type": "مسك" });

    let (status, created) = call_json(router.clone(), Method::POST, "/admin/products", form).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 4);

    let (_, body) = call(router.clone(), Method::GET, "/products").await;
    assert_eq!(ids(&body, "products"), vec![1, 2, 3, 4]);
    assert_eq!(body["facets"]["categories"], json!(["رجالي", "للجنسين", "نسائي"]));

    let (_, listed) = call(router.clone(), Method::GET, "/admin/products").await;
    assert_eq!(ids(&listed, ""), vec![4, 1, 2, 3]);

    let renamed = json!({ "name": "White Musk", "price": 18, "category": "للجنسين" });
    let (status, updated) =
        call_json(router.clone(), Method::PUT, "/admin/products/4", renamed).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "White Musk");
    assert_eq!(updated["created_at"], created["created_at"]);

    let (status, _) = call(router.clone(), Method::DELETE, "/admin/products/2").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(router.clone(), Method::DELETE, "/admin/products/2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = call(router, Method::GET, "/products?search=white").await;
    assert_eq!(ids(&body, "products"), vec![4]);
}

#[tokio::test]
async fn admin_update_unknown_product() {
    let router = server(Arc::new(MemoryCatalog::new(products(), json!([])))).await;
    let form = json!({ "name": "Musk", "price": 15, "category": "نسائي" });

    let (status, _) = call_json(router, Method::PUT, "/admin/products/99", form).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_rejects_invalid_forms() {
    let source = Arc::new(MemoryCatalog::new(products(), json!([])));
    let router = server(source.clone()).await;

    for form in [
        json!({ "name": "", "price": 15, "category": "نسائي" }),
        json!({ "name": "Musk", "price": -1, "category": "نسائي" }),
        json!({ "name": "Musk", "price": 15, "category": "نسائي,رجالي" }),
    ] {
        let (status, _) = call_json(router.clone(), Method::POST, "/admin/products", form).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    let banner = json!({ "image_url": "sale.webp", "title": " " });
    let (status, _) = call_json(router, Method::POST, "/admin/banners", banner).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(source.snapshot().unwrap().products.len(), 3);
}

#[tokio::test]
async fn admin_banner_edits() {
    let banners = json!([
        { "id": 1, "image_url": "old.webp", "title": "قديم", "is_active": true, "created_at": "2025-01-01T00:00:00Z" }
    ]);
    let router = server(Arc::new(MemoryCatalog::new(products(), banners))).await;
    let form = json!({ "image_url": "eid.webp", "title": "عروض العيد", "is_active": false });

    let (status, created) = call_json(router.clone(), Method::POST, "/admin/banners", form).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 2);
    assert_eq!(created["link_to"], "/products");

    let (_, listed) = call(router.clone(), Method::GET, "/admin/banners").await;
    assert_eq!(ids(&listed, ""), vec![2, 1]);

    let (_, slides) = call(router.clone(), Method::GET, "/banners").await;
    assert_eq!(slides.as_array().unwrap().len(), 1);
    assert_eq!(slides[0]["image_url"], "old.webp");

    let shown = json!({ "image_url": "eid.webp", "title": "عروض العيد", "link_to": "/products?category=نسائي" });
    let (status, _) = call_json(router.clone(), Method::PUT, "/admin/banners/2", shown).await;
    assert_eq!(status, StatusCode::OK);

    let (_, slides) = call(router.clone(), Method::GET, "/banners").await;
    assert_eq!(slides[0]["image_url"], "eid.webp");

    let (status, _) = call(router.clone(), Method::DELETE, "/admin/banners/1").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(router, Method::DELETE, "/admin/banners/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_routes_require_token_when_configured() {
    let config = Config {
        admin_token: Some("s3cret".to_string()),
        ..config()
    };
    let source = Arc::new(MemoryCatalog::new(products(), json!([])));
    let router = app(AppState::with_source(config, source).await);

    let (status, _) = call(router.clone(), Method::GET, "/admin/products").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let wrong = Request::builder()
        .uri("/admin/products")
        .header(header::AUTHORIZATION, "Bearer nope")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(router.clone(), wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let authorized = Request::builder()
        .uri("/admin/products")
        .header(header::AUTHORIZATION, "Bearer s3cret")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(router.clone(), authorized).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body, ""), vec![1, 2, 3]);

    let (status, _) = call(router, Method::GET, "/products").await;
    assert_eq!(status, StatusCode::OK);
}
