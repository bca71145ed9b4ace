//! Fee payment flow with a mock gateway.
//!
//! No real processor is wired in. The gateway simulates one: it waits a
//! bit, approves most charges, and declines the rest at random. Approved
//! charges settle the current billing period on the student's record
//! through the fee ledger service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::{info, warn};
use rand::Rng;

use crate::backend::domain::commands::payments::{PayFeeCommand, PayFeeResult};
use crate::backend::domain::fee_service::FeeLedgerService;
use crate::backend::storage::{CsvConnection, StudentRepository, StudentStorage};

/// Simulated card processor. Charges succeed with a fixed probability
/// after a fixed delay; no money moves anywhere.
#[derive(Clone)]
pub struct PaymentGateway {
    success_rate: f64,
    latency: Duration,
}

impl PaymentGateway {
    /// Production-shaped behavior: roughly 9 in 10 charges approved,
    /// after a short processing delay.
    pub fn new() -> Self {
        Self {
            success_rate: 0.9,
            latency: Duration::from_millis(1500),
        }
    }

    /// Gateway with fixed behavior, for tests.
    pub fn with_behavior(success_rate: f64, latency: Duration) -> Self {
        Self {
            success_rate,
            latency,
        }
    }

    /// Attempt a charge. Returns the transaction id on approval.
    pub async fn charge(&self, index: &str, amount: f64) -> Result<String> {
        tokio::time::sleep(self.latency).await;

        let approved = rand::rng().random_bool(self.success_rate);
        if !approved {
            warn!(
                "Mock gateway declined payment of {} for student {}",
                amount, index
            );
            return Err(anyhow::anyhow!("Payment failed due to mock bank rejection"));
        }

        let transaction_id = format!("TXN-{}", uuid::Uuid::new_v4());
        info!(
            "Mock gateway approved payment of {} for student {}: {}",
            amount, index, transaction_id
        );

        Ok(transaction_id)
    }
}

/// Service handling student fee payments
#[derive(Clone)]
pub struct PaymentService {
    gateway: PaymentGateway,
    fee_service: FeeLedgerService<CsvConnection>,
    student_repository: StudentRepository,
}

impl PaymentService {
    /// Create a new PaymentService with the default mock gateway
    pub fn new(
        connection: Arc<CsvConnection>,
        fee_service: FeeLedgerService<CsvConnection>,
    ) -> Self {
        Self::with_gateway(connection, fee_service, PaymentGateway::new())
    }

    /// Create a new PaymentService with a specific gateway
    pub fn with_gateway(
        connection: Arc<CsvConnection>,
        fee_service: FeeLedgerService<CsvConnection>,
        gateway: PaymentGateway,
    ) -> Self {
        Self {
            gateway,
            fee_service,
            student_repository: StudentRepository::new(connection),
        }
    }

    /// Charge the fee for the student with the given index number. On
    /// approval the current billing period is settled on their record; a
    /// declined charge leaves the record untouched.
    pub async fn pay_fee(&self, command: PayFeeCommand) -> Result<PayFeeResult> {
        let index = command.index.trim();

        if index.is_empty() {
            return Err(anyhow::anyhow!("Student index cannot be empty"));
        }

        if command.amount <= 0.0 {
            return Err(anyhow::anyhow!(
                "Payment amount must be positive, got: {}",
                command.amount
            ));
        }

        info!(
            "Processing fee payment of {} for student {}",
            command.amount, index
        );

        // Only known students can be charged
        self.student_repository
            .get_student_by_index(index)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Student not found: {}", index))?;

        let transaction_id = self.gateway.charge(index, command.amount).await?;

        let student = self.fee_service.mark_paid_now(index).await?;

        info!(
            "Fee payment settled for student {}: {}",
            index, transaction_id
        );

        Ok(PayFeeResult {
            message: "Payment Successful".to_string(),
            transaction_id,
            student,
        })
    }
}
