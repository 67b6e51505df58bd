use axum::Router;

pub mod carts;
pub mod common;
pub mod items;
pub mod system;

/// Router for all shop endpoints.
pub fn router() -> Router {
    Router::new().merge(items::router()).merge(carts::router())
}
