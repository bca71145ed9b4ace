//! # REST API for the Student Surface
//!
//! Endpoints students use directly: logging in with an index number and
//! editing their own profile. These routes are open; the index number is
//! the only credential the system knows about.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use crate::backend::io::rest::mappers::StudentMapper;
use crate::backend::AppState;
use shared::{StudentLoginRequest, UpdateProfileRequest};

/// Log a student in by index number
pub async fn student_login(
    State(state): State<AppState>,
    Json(request): Json<StudentLoginRequest>,
) -> impl IntoResponse {
    info!("POST /api/students/login - request: {:?}", request);

    match state
        .student_service
        .get_profile_by_index(request.index.trim())
        .await
    {
        Ok(Some(profile)) => (
            StatusCode::OK,
            Json(StudentMapper::to_student_response_dto(
                profile,
                "Login successful",
            )),
        )
            .into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Student not found").into_response(),
        Err(e) => {
            error!("Student login failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving student").into_response()
        }
    }
}

/// Update a student's own profile fields
pub async fn update_profile(
    State(state): State<AppState>,
    axum::extract::Path(student_id): axum::extract::Path<String>,
    Json(request): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/students/{}/profile - request: {:?}",
        student_id, request
    );

    let command = StudentMapper::to_profile_command(request);

    match state
        .student_service
        .update_profile(&student_id, command)
        .await
    {
        // Re-read with marks attached for the response
        Ok(_) => match state.student_service.get_profile(&student_id).await {
            Ok(Some(profile)) => (
                StatusCode::OK,
                Json(StudentMapper::to_student_response_dto(
                    profile,
                    "Profile updated successfully",
                )),
            )
                .into_response(),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error retrieving student",
            )
                .into_response(),
        },
        Err(e) => {
            error!("Failed to update profile: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}
