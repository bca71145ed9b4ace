//! # REST API for the Admin Surface
//!
//! Endpoints for admin login, student management, fee status control,
//! mark entry, and the on-demand reconciliation sweep. Everything except
//! login sits behind the bearer token guard in `auth`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use crate::backend::domain::commands::admins::LoginAdminCommand;
use crate::backend::domain::fee_service::FeeLedgerError;
use crate::backend::domain::models::StudentProfile;
use crate::backend::io::rest::auth::ADMIN_TOKEN;
use crate::backend::io::rest::mappers::{AdminMapper, StudentMapper};
use crate::backend::AppState;
use shared::{
    AddMarkRequest, AdminLoginRequest, CreateStudentRequest, MarkListResponse, MessageResponse,
    ReconcileResponse, SetFeeStatusRequest, UpdateStudentRequest,
};

/// Log an admin in and hand out the access token
pub async fn login_admin(
    State(state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> impl IntoResponse {
    info!("POST /api/admin/login - request: {:?}", request);

    let command = LoginAdminCommand {
        mobile: request.mobile,
    };

    match state.admin_service.login_admin(command).await {
        Ok(result) => (
            StatusCode::OK,
            Json(AdminMapper::to_login_response_dto(result.admin, ADMIN_TOKEN)),
        )
            .into_response(),
        Err(e) => {
            error!("Admin login failed: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Register a new student
pub async fn create_student(
    State(state): State<AppState>,
    Json(request): Json<CreateStudentRequest>,
) -> impl IntoResponse {
    info!("POST /api/admin/students - request: {:?}", request);

    let command = StudentMapper::to_create_command(request);

    match state.student_service.create_student(command).await {
        Ok(student) => {
            // A freshly registered student has no marks yet
            let profile = StudentProfile {
                student,
                marks: Vec::new(),
            };
            (
                StatusCode::CREATED,
                Json(StudentMapper::to_student_response_dto(
                    profile,
                    "Student created successfully",
                )),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to create student: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// List all students with their marks
pub async fn list_students(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/admin/students");

    match state.student_service.list_profiles().await {
        Ok(profiles) => (
            StatusCode::OK,
            Json(StudentMapper::to_student_list_dto(profiles)),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to list students: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing students").into_response()
        }
    }
}

/// Update a student's enrolment details
pub async fn update_student(
    State(state): State<AppState>,
    axum::extract::Path(student_id): axum::extract::Path<String>,
    Json(request): Json<UpdateStudentRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/admin/students/{} - request: {:?}",
        student_id, request
    );

    let command = StudentMapper::to_update_command(request);

    match state
        .student_service
        .update_student(&student_id, command)
        .await
    {
        // Re-read with marks attached for the response
        Ok(_) => match state.student_service.get_profile(&student_id).await {
            Ok(Some(profile)) => (
                StatusCode::OK,
                Json(StudentMapper::to_student_response_dto(
                    profile,
                    "Student updated successfully",
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
            error!("Failed to update student: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Delete a student and their marks
pub async fn delete_student(
    State(state): State<AppState>,
    axum::extract::Path(student_id): axum::extract::Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/admin/students/{}", student_id);

    match state.student_service.delete_student(&student_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Student removed".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete student: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Override a student's fee status
pub async fn set_fee_status(
    State(state): State<AppState>,
    axum::extract::Path(student_id): axum::extract::Path<String>,
    Json(request): Json<SetFeeStatusRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/admin/students/{}/fee - request: {:?}",
        student_id, request
    );

    // Admin routes address students by ID; the fee ledger is keyed by
    // index number.
    let profile = match state.student_service.get_profile(&student_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => return (StatusCode::NOT_FOUND, "Student not found").into_response(),
        Err(e) => {
            error!("Failed to load student {}: {}", student_id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error retrieving student",
            )
                .into_response();
        }
    };

    match state
        .fee_service
        .set_fee_status(&profile.student.index, &request.fee_status)
        .await
    {
        Ok(student) => {
            let profile = StudentProfile {
                student,
                marks: profile.marks,
            };
            (
                StatusCode::OK,
                Json(StudentMapper::to_student_response_dto(
                    profile,
                    "Fee status updated successfully",
                )),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to set fee status for {}: {}", student_id, e);
            let status = match e {
                FeeLedgerError::NotFound(_) => StatusCode::NOT_FOUND,
                FeeLedgerError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
                FeeLedgerError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Record an exam mark for a student
pub async fn add_mark(
    State(state): State<AppState>,
    axum::extract::Path(student_id): axum::extract::Path<String>,
    Json(request): Json<AddMarkRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/admin/students/{}/marks - request: {:?}",
        student_id, request
    );

    let command = StudentMapper::to_mark_command(request);

    match state.student_service.add_mark(&student_id, command).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(MarkListResponse {
                marks: result
                    .marks
                    .into_iter()
                    .map(StudentMapper::mark_to_dto)
                    .collect(),
                success_message: result.success_message,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to add mark: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Run a reconciliation sweep against the current billing period
pub async fn reconcile_fees(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/admin/fees/reconcile");

    match state.fee_service.reconcile().await {
        Ok(reset_count) => {
            (StatusCode::OK, Json(ReconcileResponse { reset_count })).into_response()
        }
        Err(e) => {
            error!("Reconciliation failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
