use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod password;
pub mod services;

pub use services::AuthUser;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
