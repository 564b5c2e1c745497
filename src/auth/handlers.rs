use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    accounts::{
        models::{User, USERS_EMAIL_KEY, USERS_USERNAME_KEY},
        repo::AccountsRepo,
    },
    auth::{
        dto::{
            AuthResponse, JwtKeys, LoginRequest, PublicUser, RefreshRequest, RegisterRequest,
            TokenKind,
        },
    },
    error::{AppError, RepoError},
    state::AppState,
    validation::{is_valid_email, normalize_email},
};

const MIN_PASSWORD_LEN: usize = 8;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

fn issue_tokens(state: &AppState, user: User) -> Result<AuthResponse, AppError> {
    let tokens = JwtKeys::from_ref(state).issue(user.id)?;
    Ok(AuthResponse {
        access_token: tokens.access,
        refresh_token: tokens.refresh,
        user: PublicUser::from(user),
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = normalize_email(&payload.email);
    let username = payload.username.trim().to_string();

    if username.is_empty() {
        return Err(AppError::BadRequest("Username is required".into()));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::BadRequest("Invalid email".into()));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::BadRequest("Password too short".into()));
    }

    let mut user = User::new(username, email);
    user.set_password(&payload.password)?;

    if let Err(e) = state.store.insert_user(&user).await {
        let constraint = e.constraint().map(str::to_owned);
        return Err(match constraint.as_deref() {
            Some(USERS_EMAIL_KEY) => {
                warn!(email = %user.email, "email already registered");
                AppError::Conflict("Email already registered".into())
            }
            Some(USERS_USERNAME_KEY) => {
                warn!(username = %user.username, "username already taken");
                AppError::Conflict("Username already taken".into())
            }
            _ => e.into(),
        });
    }

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(issue_tokens(&state, user)?))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = normalize_email(&payload.email);
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::BadRequest("Invalid email".into()));
    }

    let Some(user) = state.store.find_user_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    };

    // an unreadable stored hash counts as a mismatch
    let ok = user.check_password(&payload.password).unwrap_or_else(|e| {
        warn!(user_id = %user.id, error = %e, "stored password hash unreadable");
        false
    });
    if !ok {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(issue_tokens(&state, user)?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let claims = JwtKeys::from_ref(&state)
        .decode_as(&payload.refresh_token, TokenKind::Refresh)
        .map_err(|e| {
            warn!(error = %e, "rejected refresh token");
            AppError::Unauthorized("Invalid refresh token".into())
        })?;

    let user = load_user(&state, claims.sub).await?;
    Ok(Json(issue_tokens(&state, user)?))
}

pub(crate) async fn load_user(state: &AppState, user_id: Uuid) -> Result<User, AppError> {
    match state.store.find_user_by_id(user_id).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) | Err(RepoError::NotFound) => {
            warn!(user_id = %user_id, "user not found");
            Err(AppError::Unauthorized("User not found".into()))
        }
        Err(e) => Err(e.into()),
    }
}
