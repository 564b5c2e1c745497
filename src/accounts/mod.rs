pub mod dto;
pub mod handlers;
pub mod models;
pub mod repo;

#[cfg(test)]
mod tests;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::me_routes())
        .merge(handlers::invite_routes())
}
