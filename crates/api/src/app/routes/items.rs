use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use shop_catalog::{ItemPatch, ShopCatalog};
use shop_core::{Entity, ItemId};

use crate::app::routes::common::{created, parse_id};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/item", post(create_item).get(list_items))
        .route(
            "/item/:id",
            get(get_item)
                .put(replace_item)
                .patch(update_item)
                .delete(delete_item),
        )
}

pub async fn create_item(
    Extension(catalog): Extension<Arc<ShopCatalog>>,
    body: Result<Json<dto::ItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(e) => return errors::json_rejection(e),
    };

    match catalog.create_item(body.name, body.price) {
        Ok(item) => created(format!("/item/{}", item.id()), dto::item_to_json(&item)),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(catalog): Extension<Arc<ShopCatalog>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match catalog.get_item(id) {
        Ok(item) => (StatusCode::OK, Json(dto::item_to_json(&item))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_items(
    Extension(catalog): Extension<Arc<ShopCatalog>>,
    query: Result<Query<dto::ListItemsQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(v) => v,
        Err(e) => return errors::query_rejection(e),
    };
    let (filter, page) = match query.into_parts() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let items = catalog
        .list_items(&filter, page)
        .iter()
        .map(dto::item_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(items)).into_response()
}

pub async fn replace_item(
    Extension(catalog): Extension<Arc<ShopCatalog>>,
    Path(id): Path<String>,
    body: Result<Json<dto::ItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: ItemId = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(v) => v,
        Err(e) => return errors::json_rejection(e),
    };

    match catalog.replace_item(id, body.name, body.price) {
        Ok(item) => (StatusCode::OK, Json(dto::item_to_json(&item))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_item(
    Extension(catalog): Extension<Arc<ShopCatalog>>,
    Path(id): Path<String>,
    body: Result<Json<ItemPatch>, JsonRejection>,
) -> axum::response::Response {
    let id: ItemId = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(patch) = match body {
        Ok(v) => v,
        Err(e) => return errors::json_rejection(e),
    };

    match catalog.update_item(id, patch) {
        Ok(item) => (StatusCode::OK, Json(dto::item_to_json(&item))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(catalog): Extension<Arc<ShopCatalog>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match catalog.delete_item(id) {
        Ok(()) => (StatusCode::OK, Json(dto::message_json("item deleted"))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
