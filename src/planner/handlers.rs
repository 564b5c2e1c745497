use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::AuthUser,
    error::AppError,
    planner::{
        dto::{
            CreateMilestoneRequest, CreateSchoolRequest, CreateSemesterRequest,
            CreateStudentRequest, SemesterFilter,
        },
        models::{Milestone, School, Semester, Student, SCHOOLS_SLUG_KEY, SCHOOLS_URL_KEY},
        repo::PlannerRepo,
    },
    state::AppState,
    validation::{is_valid_slug, is_valid_url},
};

pub fn school_routes() -> Router<AppState> {
    Router::new()
        .route("/schools", get(list_schools).post(create_school))
        .route("/schools/:slug", get(get_school))
}

pub fn calendar_routes() -> Router<AppState> {
    Router::new()
        .route("/milestones", get(list_milestones).post(create_milestone))
        .route("/semesters", get(list_semesters).post(create_semester))
}

pub fn student_routes() -> Router<AppState> {
    Router::new().route("/students", get(list_students).post(create_student))
}

#[instrument(skip(state))]
pub async fn list_schools(State(state): State<AppState>) -> Result<Json<Vec<School>>, AppError> {
    Ok(Json(state.store.list_schools().await?))
}

#[instrument(skip(state))]
pub async fn get_school(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<School>, AppError> {
    state
        .store
        .find_school_by_slug(&slug)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("School not found".into()))
}

#[instrument(skip(state, payload))]
pub async fn create_school(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<CreateSchoolRequest>,
) -> Result<(StatusCode, Json<School>), AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".into()));
    }
    if !is_valid_slug(&payload.slug) {
        warn!(slug = %payload.slug, "invalid slug");
        return Err(AppError::BadRequest("Invalid slug".into()));
    }
    if !is_valid_url(&payload.url) || !is_valid_url(&payload.milestones_url) {
        return Err(AppError::BadRequest("Invalid URL".into()));
    }

    let school = School::new(payload.name, payload.slug, payload.url, payload.milestones_url);
    if let Err(e) = state.store.insert_school(&school).await {
        let constraint = e.constraint().map(str::to_owned);
        return Err(match constraint.as_deref() {
            Some(SCHOOLS_SLUG_KEY) => AppError::Conflict("Slug already in use".into()),
            Some(SCHOOLS_URL_KEY) => AppError::Conflict("URL already in use".into()),
            _ => e.into(),
        });
    }

    info!(school_id = %school.id, slug = %school.slug, "school created");
    Ok((StatusCode::CREATED, Json(school)))
}

#[instrument(skip(state))]
pub async fn list_milestones(
    State(state): State<AppState>,
) -> Result<Json<Vec<Milestone>>, AppError> {
    Ok(Json(state.store.list_milestones().await?))
}

#[instrument(skip(state, payload))]
pub async fn create_milestone(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<CreateMilestoneRequest>,
) -> Result<(StatusCode, Json<Milestone>), AppError> {
    let milestone = Milestone::new(payload.date);
    state.store.insert_milestone(&milestone).await?;
    Ok((StatusCode::CREATED, Json(milestone)))
}

#[instrument(skip(state))]
pub async fn list_semesters(
    State(state): State<AppState>,
    Query(filter): Query<SemesterFilter>,
) -> Result<Json<Vec<Semester>>, AppError> {
    Ok(Json(state.store.list_semesters(filter.active).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_semester(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<CreateSemesterRequest>,
) -> Result<(StatusCode, Json<Semester>), AppError> {
    let mut semester = Semester::new(payload.date);
    semester.active = payload.active;
    state.store.insert_semester(&semester).await?;
    Ok((StatusCode::CREATED, Json(semester)))
}

#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Student>>, AppError> {
    Ok(Json(state.store.list_students(user_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_student(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    if payload.first_name.trim().is_empty() || payload.last_name.trim().is_empty() {
        return Err(AppError::BadRequest("First and last name are required".into()));
    }
    let mut student = Student::new(user_id, payload.first_name, payload.last_name);
    if let Some(class_year) = payload.class_year {
        student.class_year = class_year;
    }
    state.store.insert_student(&student).await?;
    info!(student_id = %student.id, user_id = %user_id, "student added");
    Ok((StatusCode::CREATED, Json(student)))
}
