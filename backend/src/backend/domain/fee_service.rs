//! Fee ledger service.
//!
//! Owns the fee lifecycle on student records: settling a period
//! (`mark_paid`), administrative status overrides (`set_fee_status`), and
//! the reconciliation sweep that flips stale PAID records back to UNPAID
//! when a new billing period begins (`reconcile`).
//!
//! The sweep is serialized through an internal mutex. The file store
//! rewrites one student at a time, so two overlapping sweeps could
//! interleave their read-modify-write cycles; taking the lock keeps each
//! sweep's view consistent.

use std::sync::Arc;

use log::info;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::backend::domain::models::{BillingCalendar, FeeStatus, Period, Student};
use crate::backend::storage::{Connection, StudentStorage};

/// Errors surfaced by fee ledger operations.
#[derive(Debug, Error)]
pub enum FeeLedgerError {
    #[error("Student not found: {0}")]
    NotFound(String),

    #[error("Invalid fee status: {0}")]
    InvalidStatus(String),

    #[error("Fee store unavailable: {0}")]
    StoreUnavailable(#[from] anyhow::Error),
}

/// Service handling fee settlement and reconciliation
#[derive(Clone)]
pub struct FeeLedgerService<C: Connection> {
    student_repository: C::StudentRepository,
    calendar: BillingCalendar,
    sweep_lock: Arc<Mutex<()>>,
}

impl<C: Connection> FeeLedgerService<C> {
    pub fn new(connection: Arc<C>, calendar: BillingCalendar) -> Self {
        let student_repository = connection.create_student_repository();
        Self {
            student_repository,
            calendar,
            sweep_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn calendar(&self) -> &BillingCalendar {
        &self.calendar
    }

    /// Record that the student settled the fee for the given period.
    ///
    /// Idempotent: a student already PAID for that period is returned
    /// unchanged without touching the store.
    pub async fn mark_paid(
        &self,
        index: &str,
        period: Period,
    ) -> Result<Student, FeeLedgerError> {
        let mut student = self
            .student_repository
            .get_student_by_index(index)
            .await?
            .ok_or_else(|| FeeLedgerError::NotFound(index.to_string()))?;

        if student.is_paid_for(period) {
            info!(
                "Student {} already settled for period {}, nothing to do",
                index, period
            );
            return Ok(student);
        }

        student.fee_status = FeeStatus::Paid;
        student.last_paid_period = Some(period);
        student.updated_at = chrono::Utc::now();

        self.student_repository.update_student(&student).await?;

        info!("Marked student {} paid for period {}", index, period);
        Ok(student)
    }

    /// Settle the fee for the period the calendar is currently in.
    pub async fn mark_paid_now(&self, index: &str) -> Result<Student, FeeLedgerError> {
        self.mark_paid(index, self.calendar.current_period()).await
    }

    /// Administrative status override. Accepts the wire values "PAID" and
    /// "UNPAID"; anything else is rejected before the store is touched.
    ///
    /// Setting PAID settles the current period. Setting UNPAID flips the
    /// status only; `last_paid_period` keeps recording the last period the
    /// student actually settled.
    pub async fn set_fee_status(
        &self,
        index: &str,
        status: &str,
    ) -> Result<Student, FeeLedgerError> {
        let status = FeeStatus::parse(status)
            .ok_or_else(|| FeeLedgerError::InvalidStatus(status.to_string()))?;

        match status {
            FeeStatus::Paid => self.mark_paid(index, self.calendar.current_period()).await,
            FeeStatus::Unpaid => {
                let mut student = self
                    .student_repository
                    .get_student_by_index(index)
                    .await?
                    .ok_or_else(|| FeeLedgerError::NotFound(index.to_string()))?;

                if student.fee_status == FeeStatus::Unpaid {
                    return Ok(student);
                }

                student.fee_status = FeeStatus::Unpaid;
                student.updated_at = chrono::Utc::now();

                self.student_repository.update_student(&student).await?;

                info!("Set student {} fee status to UNPAID", index);
                Ok(student)
            }
        }
    }

    /// Reconcile the ledger against the period the calendar reports now.
    ///
    /// The period is sampled once, before the sweep starts; every record
    /// in the sweep is judged against that single cutoff.
    pub async fn reconcile(&self) -> Result<usize, FeeLedgerError> {
        let current_period = self.calendar.current_period();
        self.reconcile_at(current_period).await
    }

    /// Flip every student who is PAID for some earlier period back to
    /// UNPAID. Students whose `last_paid_period` equals `current_period`
    /// and students already UNPAID are left alone. Returns how many
    /// records were changed.
    pub async fn reconcile_at(&self, current_period: Period) -> Result<usize, FeeLedgerError> {
        let _sweep = self.sweep_lock.lock().await;

        info!("Reconciling fee statuses for period {}", current_period);
        let reset_count = self
            .student_repository
            .reset_overdue_fee_statuses(current_period)
            .await?;

        if reset_count > 0 {
            info!(
                "Reconciliation reset {} student(s) to UNPAID for period {}",
                reset_count, current_period
            );
        }
        Ok(reset_count)
    }
}
