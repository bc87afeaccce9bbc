//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{ProductDetail, ProductSummary};
use crate::db::repository::ProductRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/products - 获取所有商品 (含代表变体)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ProductSummary>>> {
    let repo = ProductRepository::new(state.pool.clone());
    let products = repo
        .find_all_with_main()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(products))
}

/// GET /api/products/{id} - 获取单个商品 (含全部变体)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ProductDetail>> {
    let repo = ProductRepository::new(state.pool.clone());
    let product = repo
        .find_by_id_full(id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(Json(product))
}
