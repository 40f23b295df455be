use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use rapid_console_application::{CreateClientInput, CreateUserInput};
use rapid_console_core::SubjectId;
use rapid_console_domain::SubjectKind;

use crate::dto::{
    CreateClientRequest, CreateUserRequest, CreatedClientResponse, CreatedUserResponse,
    DeleteUserQuery, MessageResponse, SubjectListQuery, SubjectPermissionsResponse,
    SubjectResponse, UpdateSubjectPermissionsRequest, UpdatedSubjectPermissionsResponse,
    parse_selections,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_subjects_handler(
    State(state): State<AppState>,
    Query(query): Query<SubjectListQuery>,
) -> ApiResult<Json<Vec<SubjectResponse>>> {
    let kind = SubjectKind::from_str(query.kind.trim())?;
    let subjects = state
        .subject_service
        .list_subjects(kind)
        .await?
        .into_iter()
        .map(SubjectResponse::from)
        .collect();

    Ok(Json(subjects))
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<CreatedUserResponse>)> {
    let user = state
        .subject_service
        .create_user(CreateUserInput {
            username: payload.username,
            email: payload.email,
            permissions: parse_selections(payload.permissions)?,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedUserResponse::from(user))))
}

pub async fn create_client_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateClientRequest>,
) -> ApiResult<(StatusCode, Json<CreatedClientResponse>)> {
    let client = state
        .subject_service
        .create_client(CreateClientInput {
            client_name: payload.client_name,
            permissions: parse_selections(payload.permissions)?,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedClientResponse::from(client))))
}

pub async fn subject_permissions_handler(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
) -> ApiResult<Json<SubjectPermissionsResponse>> {
    let subject_id = SubjectId::new(subject_id)?;
    let permissions = state
        .subject_service
        .subject_permissions(&subject_id)
        .await?;

    Ok(Json(SubjectPermissionsResponse::from(permissions)))
}

pub async fn update_subject_permissions_handler(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
    Json(payload): Json<UpdateSubjectPermissionsRequest>,
) -> ApiResult<Json<UpdatedSubjectPermissionsResponse>> {
    let subject_id = SubjectId::new(subject_id)?;
    let permissions = parse_selections(payload.permissions)?;
    let updated = state
        .subject_service
        .update_subject_permissions(&subject_id, &permissions)
        .await?;

    Ok(Json(UpdatedSubjectPermissionsResponse::from(updated)))
}

pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<DeleteUserQuery>,
) -> ApiResult<Json<MessageResponse>> {
    let user_id = SubjectId::new(user_id)?;
    let message = state
        .subject_service
        .delete_user(&user_id, &query.username)
        .await?;

    Ok(Json(MessageResponse { message }))
}

pub async fn delete_client_handler(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let client_id = SubjectId::new(client_id)?;
    let message = state.subject_service.delete_client(&client_id).await?;

    Ok(Json(MessageResponse { message }))
}
