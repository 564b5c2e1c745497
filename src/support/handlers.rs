use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    error::AppError,
    state::AppState,
    support::{dto::CreateTicketRequest, models::SupportTicket, repo::SupportRepo},
};

pub fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route("/support/tickets", post(create_ticket))
        .route("/support/tickets/:id", get(get_ticket))
}

#[instrument(skip(state, payload))]
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(payload): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<SupportTicket>), AppError> {
    if payload.subject.trim().is_empty() || payload.message.trim().is_empty() {
        return Err(AppError::BadRequest("Subject and message are required".into()));
    }
    let ticket = SupportTicket::new(payload.subject, payload.message);
    state.store.insert_ticket(&ticket).await?;
    info!(ticket_id = %ticket.id, subject = %ticket, "support ticket opened");
    Ok((StatusCode::CREATED, Json(ticket)))
}

#[instrument(skip(state))]
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SupportTicket>, AppError> {
    state
        .store
        .find_ticket(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Ticket not found".into()))
}
