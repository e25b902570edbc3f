// src/handlers/product.rs
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use crate::dtos::product::{
    CreateProductRequest, UpdateProductRequest, ProductResponse, MessageResponse,
};
use crate::routes::extract::PathId;
use crate::state::AppState;
use crate::error::AppError;
use tracing::instrument;

const PRODUCT_NOT_FOUND: &str = "Product Not Found";

// Digits that overflow i64 cannot name a stored product.
fn product_id(PathId(raw): &PathId) -> Result<i64, AppError> {
    raw.parse().map_err(|_| AppError::not_found(PRODUCT_NOT_FOUND))
}

// Bodies are parsed whatever the Content-Type says.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::validation(format!("Invalid product payload: {e}")))
}

// GET /api/products - List all products
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.products.list().await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

// GET /api/products/{id} - Get single product
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    id: PathId,
) -> Result<Json<ProductResponse>, AppError> {
    let id = product_id(&id)?;
    let product = state
        .products
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found(PRODUCT_NOT_FOUND))?;

    Ok(Json(ProductResponse::from(product)))
}

// POST /api/products - Create new product
#[instrument(skip(state, body))]
pub async fn create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let payload: CreateProductRequest = parse_body(&body)?;
    let product = state.products.create(payload).await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

// PUT /api/products/{id} - Update product
#[instrument(skip(state, body))]
pub async fn update_product(
    State(state): State<AppState>,
    id: PathId,
    body: Bytes,
) -> Result<Json<ProductResponse>, AppError> {
    let id = product_id(&id)?;
    let payload: UpdateProductRequest = parse_body(&body)?;
    let product = state
        .products
        .update(id, payload)
        .await?
        .ok_or_else(|| AppError::not_found(PRODUCT_NOT_FOUND))?;

    Ok(Json(ProductResponse::from(product)))
}

// DELETE /api/products/{id} - Delete product
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    id: PathId,
) -> Result<Json<MessageResponse>, AppError> {
    let id = product_id(&id)?;
    if !state.products.delete(id).await? {
        return Err(AppError::not_found(PRODUCT_NOT_FOUND));
    }

    Ok(Json(MessageResponse {
        message: format!("Product {id} removed"),
    }))
}
