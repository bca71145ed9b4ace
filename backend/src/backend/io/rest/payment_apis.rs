//! # REST API for Fee Payments
//!
//! Single endpoint driving the mock payment flow. A successful charge
//! settles the current billing period on the student's record.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use crate::backend::domain::commands::payments::PayFeeCommand;
use crate::backend::io::rest::mappers::StudentMapper;
use crate::backend::AppState;
use shared::{PayFeeRequest, PayFeeResponse};

/// Charge the fee for a student
pub async fn pay_fee(
    State(state): State<AppState>,
    Json(request): Json<PayFeeRequest>,
) -> impl IntoResponse {
    info!("POST /api/payments/fee - request: {:?}", request);

    let command = PayFeeCommand {
        index: request.index,
        amount: request.amount,
    };

    match state.payment_service.pay_fee(command).await {
        Ok(result) => (
            StatusCode::OK,
            Json(PayFeeResponse {
                success: true,
                message: result.message,
                transaction_id: result.transaction_id,
                student: StudentMapper::to_paid_summary_dto(&result.student),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Fee payment failed: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}
