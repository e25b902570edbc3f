use http::Method;

use crate::handlers::product::{
    get_products, get_product, create_product, update_product, delete_product
};
use crate::routes::matcher::PathMatcher;
use crate::routes::RouteTable;

const COLLECTION: &str = "/api/products";
const ITEM: &str = r"/api/products/([0-9]+)";

pub fn routes() -> Result<RouteTable, regex::Error> {
    let item = PathMatcher::pattern(ITEM)?;

    Ok(RouteTable::new()
        .route(Method::GET, PathMatcher::exact(COLLECTION), get_products)
        .route(Method::GET, item.clone(), get_product)
        .route(Method::POST, PathMatcher::exact(COLLECTION), create_product)
        .route(Method::PUT, item.clone(), update_product)
        .route(Method::DELETE, item, delete_product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::product::ProductResponse;
    use crate::routes::create_router;
    use crate::state::AppState;
    use crate::store::ProductStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(AppState::new(ProductStore::memory())).unwrap()
    }

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        call_raw(app, method, uri, body.map(|b| b.to_string()).unwrap_or_default()).await
    }

    async fn call_raw(
        app: &Router,
        method: Method,
        uri: &str,
        body: String,
    ) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(Request::builder().method(method).uri(uri).body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn create(app: &Router, name: &str, price: f64) -> ProductResponse {
        let (status, body) = call(
            app,
            Method::POST,
            "/api/products",
            Some(json!({ "name": name, "description": "fresh", "price": price })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn table_resolves_each_route_in_order() {
        let table = routes().unwrap();
        let cases = [
            (Method::GET, "/api/products", None),
            (Method::GET, "/api/products/42", Some("42")),
            (Method::POST, "/api/products", None),
            (Method::PUT, "/api/products/7", Some("7")),
            (Method::DELETE, "/api/products/13", Some("13")),
        ];
        for (method, path, id) in cases {
            let m = table.resolve(&method, path).unwrap();
            assert_eq!(m.route.method, method);
            assert_eq!(m.params.id(), id, "{method} {path}");
        }

        assert!(table.resolve(&Method::GET, "/api/products/abc").is_none());
        assert!(table.resolve(&Method::POST, "/api/products/1").is_none());
        assert!(table.resolve(&Method::PATCH, "/api/products/1").is_none());
        assert!(table.resolve(&Method::DELETE, "/api/products").is_none());
    }

    #[tokio::test]
    async fn fallback_response_is_exact() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/api/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"message":"Rout Not Found"}"#);
    }

    #[tokio::test]
    async fn non_numeric_id_is_route_not_found() {
        let app = app();
        for (method, uri) in [
            (Method::GET, "/api/products/abc"),
            (Method::PUT, "/api/products/abc"),
            (Method::GET, "/api/products/"),
            (Method::PATCH, "/api/products/1"),
            (Method::GET, "/"),
        ] {
            let (status, body) = call(&app, method, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, json!({ "message": "Rout Not Found" }));
        }
    }

    #[tokio::test]
    async fn get_one_reaches_handler_for_missing_product() {
        let (status, body) = call(&app(), Method::GET, "/api/products/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Product Not Found" }));
    }

    #[tokio::test]
    async fn oversized_id_is_product_not_found() {
        let uri = "/api/products/99999999999999999999999";
        let (status, body) = call(&app(), Method::DELETE, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Product Not Found" }));
    }

    #[tokio::test]
    async fn list_starts_empty_and_grows() {
        let app = app();
        let (status, body) = call(&app, Method::GET, "/api/products", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        create(&app, "Milk", 1.5).await;
        create(&app, "Butter", 4.0).await;

        let (_, body) = call(&app, Method::GET, "/api/products", None).await;
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["Milk", "Butter"]);
    }

    #[tokio::test]
    async fn create_get_update_delete() {
        let app = app();
        let created = create(&app, "Milk", 1.5).await;
        let uri = format!("/api/products/{}", created.id);

        let (status, body) = call(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Milk");
        assert_eq!(body["description"], "fresh");

        let (status, body) = call(&app, Method::PUT, &uri, Some(json!({ "price": 2.25 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Milk");
        assert_eq!(body["price"], 2.25);

        let (status, body) = call(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": format!("Product {} removed", created.id) }));

        let (status, body) = call(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Product Not Found" }));
    }

    #[tokio::test]
    async fn create_fills_missing_description_and_price() {
        let body = Some(json!({ "name": "x" }));
        let (status, body) = call(&app(), Method::POST, "/api/products", body).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "x");
        assert_eq!(body["description"], "");
        assert_eq!(body["price"], 0.0);
    }

    #[tokio::test]
    async fn update_with_malformed_body_is_bad_request() {
        let app = app();
        let created = create(&app, "Milk", 1.5).await;
        let uri = format!("/api/products/{}", created.id);

        let (status, body) = call_raw(&app, Method::PUT, &uri, "{bad".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid product payload"));

        let (_, body) = call(&app, Method::GET, &uri, None).await;
        assert_eq!(body["price"], 1.5);
    }

    #[tokio::test]
    async fn update_with_oversized_id_is_product_not_found() {
        let uri = "/api/products/99999999999999999999999";
        let (status, body) = call(&app(), Method::PUT, uri, Some(json!({ "name": "x" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Product Not Found" }));
    }

    #[tokio::test]
    async fn update_missing_product_is_not_found() {
        let body = Some(json!({ "name": "x" }));
        let (status, _) = call(&app(), Method::PUT, "/api/products/5", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_with_malformed_body_is_rejected_by_handler() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/products")
                    .body(Body::from("{ not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
