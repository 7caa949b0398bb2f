//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! scheduling engine or the directory repository. Mutating handlers resolve
//! the caller's edit permission from the `X-Role` header and pass it into
//! the engine explicitly.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use super::auth;
use super::dto::{
    CreateEntryRequest, CreateNameRequest, EntryDto, HealthResponse, TimetableListResponse,
    TimetableQuery, UpdateEntryRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{ClassId, EntryFilter, EntryId, SchoolClass, Subject, SubjectId, Teacher, TeacherId};
use crate::models::Weekday;
use crate::scheduler::ScheduleError;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Timetable CRUD
// =============================================================================

/// GET /v1/timetable
///
/// List timetable entries, optionally filtered by class, teacher, and day.
pub async fn list_timetable(
    State(state): State<AppState>,
    Query(query): Query<TimetableQuery>,
) -> HandlerResult<TimetableListResponse> {
    let day = query
        .day
        .map(Weekday::try_from)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let filter = EntryFilter {
        class_id: query.class_id.map(ClassId::new),
        teacher_id: query.teacher_id.map(TeacherId::new),
        day,
    };

    let entries = state.service.list_entries(&filter).await?;
    let entries: Vec<EntryDto> = entries.into_iter().map(Into::into).collect();
    let total = entries.len();

    Ok(Json(TimetableListResponse { entries, total }))
}

/// POST /v1/timetable
///
/// Create a timetable entry. Returns 409 with a conflict description when
/// the proposed slot collides with an existing entry for the same teacher
/// or class.
pub async fn create_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<EntryDto>), AppError> {
    let access = auth::edit_access(&headers);
    let fields = request.into_fields()?;

    let entry = state.service.create_entry(access, fields).await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// GET /v1/timetable/{id}
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<EntryDto> {
    let entry = state.service.get_entry(EntryId::new(id)).await?;
    Ok(Json(entry.into()))
}

/// PUT /v1/timetable/{id}
///
/// Partially update an entry; absent fields retain their stored values.
/// The entry being edited never conflicts with itself.
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<UpdateEntryRequest>,
) -> HandlerResult<EntryDto> {
    let access = auth::edit_access(&headers);
    let patch = request.into_patch()?;
    if patch.is_empty() {
        return Err(ScheduleError::Validation("empty update".to_string()).into());
    }

    let entry = state
        .service
        .update_entry(access, EntryId::new(id), patch)
        .await?;
    Ok(Json(entry.into()))
}

/// DELETE /v1/timetable/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let access = auth::edit_access(&headers);
    state.service.delete_entry(access, EntryId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Directory
// =============================================================================

/// GET /v1/classes
pub async fn list_classes(State(state): State<AppState>) -> HandlerResult<Vec<SchoolClass>> {
    Ok(Json(state.repository.list_classes().await?))
}

/// POST /v1/classes
pub async fn create_class(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateNameRequest>,
) -> Result<(StatusCode, Json<SchoolClass>), AppError> {
    require_edit(&headers)?;
    let name = request.into_name()?;
    let class = state.repository.create_class(&name).await?;
    Ok((StatusCode::CREATED, Json(class)))
}

/// GET /v1/classes/{id}
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<SchoolClass> {
    Ok(Json(state.repository.get_class(ClassId::new(id)).await?))
}

/// GET /v1/teachers
pub async fn list_teachers(State(state): State<AppState>) -> HandlerResult<Vec<Teacher>> {
    Ok(Json(state.repository.list_teachers().await?))
}

/// POST /v1/teachers
pub async fn create_teacher(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateNameRequest>,
) -> Result<(StatusCode, Json<Teacher>), AppError> {
    require_edit(&headers)?;
    let name = request.into_name()?;
    let teacher = state.repository.create_teacher(&name).await?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

/// GET /v1/teachers/{id}
pub async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Teacher> {
    Ok(Json(
        state.repository.get_teacher(TeacherId::new(id)).await?,
    ))
}

/// GET /v1/subjects
pub async fn list_subjects(State(state): State<AppState>) -> HandlerResult<Vec<Subject>> {
    Ok(Json(state.repository.list_subjects().await?))
}

/// POST /v1/subjects
pub async fn create_subject(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateNameRequest>,
) -> Result<(StatusCode, Json<Subject>), AppError> {
    require_edit(&headers)?;
    let name = request.into_name()?;
    let subject = state.repository.create_subject(&name).await?;
    Ok((StatusCode::CREATED, Json(subject)))
}

/// GET /v1/subjects/{id}
pub async fn get_subject(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Subject> {
    Ok(Json(
        state.repository.get_subject(SubjectId::new(id)).await?,
    ))
}

fn require_edit(headers: &HeaderMap) -> Result<(), AppError> {
    if auth::edit_access(headers).allows_edit() {
        Ok(())
    } else {
        Err(ScheduleError::Forbidden.into())
    }
}
