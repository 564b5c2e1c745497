pub mod dto;
pub mod handlers;
pub mod models;
pub mod repo;


use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::school_routes())
        .merge(handlers::calendar_routes())
        .merge(handlers::student_routes())
}
