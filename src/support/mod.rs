pub mod dto;
pub mod handlers;
pub mod models;
pub mod repo;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::ticket_routes()
}
