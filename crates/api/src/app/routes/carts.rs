use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use shop_catalog::ShopCatalog;
use shop_core::{CartId, Entity, ItemId};

use crate::app::routes::common::{created, parse_id};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/cart", post(create_cart).get(list_carts))
        .route("/cart/:id", get(get_cart))
        .route("/cart/:cart_id/add/:item_id", post(add_item_to_cart))
}

pub async fn create_cart(Extension(catalog): Extension<Arc<ShopCatalog>>) -> axum::response::Response {
    let cart = catalog.create_cart();
    created(
        format!("/cart/{}", cart.id()),
        serde_json::json!({ "id": cart.id() }),
    )
}

pub async fn get_cart(
    Extension(catalog): Extension<Arc<ShopCatalog>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CartId = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match catalog.get_cart(id) {
        Ok(cart) => (StatusCode::OK, Json(dto::cart_to_json(&cart))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_carts(
    Extension(catalog): Extension<Arc<ShopCatalog>>,
    query: Result<Query<dto::ListCartsQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(v) => v,
        Err(e) => return errors::query_rejection(e),
    };
    let (filter, page) = match query.into_parts() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let carts = catalog
        .list_carts(&filter, page)
        .iter()
        .map(dto::cart_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(carts)).into_response()
}

pub async fn add_item_to_cart(
    Extension(catalog): Extension<Arc<ShopCatalog>>,
    Path((cart_id, item_id)): Path<(String, String)>,
) -> axum::response::Response {
    let cart_id: CartId = match parse_id(&cart_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let item_id: ItemId = match parse_id(&item_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match catalog.add_item_to_cart(cart_id, item_id) {
        Ok(()) => (StatusCode::OK, Json(dto::message_json("item added to cart"))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
