use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    accounts::{
        dto::{InviteRequest, MeResponse},
        models::{InviteEmail, Profile, ProfileUpdate},
        repo::AccountsRepo,
    },
    auth::{dto::PublicUser, handlers::load_user, AuthUser},
    error::AppError,
    state::AppState,
    validation::{is_valid_email, normalize_email},
};

pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/me/profile", patch(update_profile))
}

pub fn invite_routes() -> Router<AppState> {
    Router::new().route("/invites", get(list_invites).post(create_invite))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    let user = load_user(&state, user_id).await?;
    let profile = state.store.find_profile(user.id).await?;
    Ok(Json(MeResponse {
        user: PublicUser::from(user),
        profile,
    }))
}

#[instrument(skip(state, update))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Profile>, AppError> {
    let profile = state.store.update_profile(user_id, update).await?;
    info!(user_id = %user_id, "profile updated");
    Ok(Json(profile))
}

#[instrument(skip(state, payload))]
pub async fn create_invite(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<InviteRequest>,
) -> Result<(StatusCode, Json<InviteEmail>), AppError> {
    let email = normalize_email(&payload.email);
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid invite email");
        return Err(AppError::BadRequest("Invalid email".into()));
    }
    let invite = InviteEmail::new(email);
    state.store.insert_invite_email(&invite).await?;
    info!(invited_by = %user_id, email = %invite.email, "invite recorded");
    Ok((StatusCode::CREATED, Json(invite)))
}

#[instrument(skip(state))]
pub async fn list_invites(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<Vec<InviteEmail>>, AppError> {
    Ok(Json(state.store.list_invite_emails().await?))
}
