//! Student management service.
//!
//! Handles student registration, lookup, profile updates, mark entry and
//! removal. Fee settlement is owned by the fee ledger service; this
//! service only reads the fee fields when assembling profiles.

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::backend::domain::commands::marks::{AddMarkCommand, AddMarkResult};
use crate::backend::domain::commands::students::{
    CreateStudentCommand, UpdateProfileCommand, UpdateStudentCommand,
};
use crate::backend::domain::models::{FeeStatus, Mark, Student, StudentProfile};
use crate::backend::storage::{
    CsvConnection, MarkRepository, MarkStorage, StudentRepository, StudentStorage,
};

/// Service for managing students in the fee tracking system
#[derive(Clone)]
pub struct StudentService {
    student_repository: StudentRepository,
    mark_repository: MarkRepository,
}

impl StudentService {
    /// Create a new StudentService
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        let student_repository = StudentRepository::new(connection.clone());
        let mark_repository = MarkRepository::new(connection);
        Self {
            student_repository,
            mark_repository,
        }
    }

    /// Register a new student. The index number must be unique; new
    /// students start UNPAID with no settled period on record.
    pub async fn create_student(&self, command: CreateStudentCommand) -> Result<Student> {
        info!(
            "Creating student: index={}, name={}",
            command.index, command.name
        );

        // Validate the command
        self.validate_create_command(&command)?;

        let index = command.index.trim().to_string();
        if self
            .student_repository
            .get_student_by_index(&index)
            .await?
            .is_some()
        {
            return Err(anyhow::anyhow!("Student already exists: {}", index));
        }

        let now = Utc::now();
        let student = Student {
            id: Student::generate_id(now.timestamp_millis() as u64),
            index,
            name: command.name.trim().to_string(),
            school: command.school.trim().to_string(),
            badge: command.badge.trim().to_string(),
            grade: command.grade.trim().to_string(),
            exam_type: command.exam_type.trim().to_string(),
            description: command
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            email: None,
            about_me: None,
            fee_status: FeeStatus::Unpaid,
            last_paid_period: None,
            created_at: now,
            updated_at: now,
        };

        // Store in the student directory
        self.student_repository.store_student(&student).await?;

        info!("Created student: {} with ID: {}", student.index, student.id);

        Ok(student)
    }

    /// Get a student by ID
    pub async fn get_student(&self, student_id: &str) -> Result<Option<Student>> {
        info!("Getting student: {}", student_id);

        let student = self.student_repository.get_student(student_id).await?;

        if student.is_none() {
            warn!("Student not found: {}", student_id);
        }

        Ok(student)
    }

    /// Get a student by index number
    pub async fn get_student_by_index(&self, index: &str) -> Result<Option<Student>> {
        info!("Getting student by index: {}", index);

        let student = self.student_repository.get_student_by_index(index).await?;

        if student.is_none() {
            warn!("Student not found for index: {}", index);
        }

        Ok(student)
    }

    /// List all students, ordered by index number
    pub async fn list_students(&self) -> Result<Vec<Student>> {
        info!("Listing all students");

        let students = self.student_repository.list_students().await?;

        info!("Found {} students", students.len());

        Ok(students)
    }

    /// Fetch a student by ID with their marks attached
    pub async fn get_profile(&self, student_id: &str) -> Result<Option<StudentProfile>> {
        let student = match self.student_repository.get_student(student_id).await? {
            Some(student) => student,
            None => {
                warn!("Student not found: {}", student_id);
                return Ok(None);
            }
        };

        let marks = self.mark_repository.list_marks(&student.index).await?;

        Ok(Some(StudentProfile { student, marks }))
    }

    /// Fetch a student by index number with their marks attached. This is
    /// the lookup behind the student login.
    pub async fn get_profile_by_index(&self, index: &str) -> Result<Option<StudentProfile>> {
        let student = match self.student_repository.get_student_by_index(index).await? {
            Some(student) => student,
            None => {
                warn!("Student not found for index: {}", index);
                return Ok(None);
            }
        };

        let marks = self.mark_repository.list_marks(&student.index).await?;

        Ok(Some(StudentProfile { student, marks }))
    }

    /// List all students with their marks attached
    pub async fn list_profiles(&self) -> Result<Vec<StudentProfile>> {
        let students = self.student_repository.list_students().await?;

        let mut profiles = Vec::with_capacity(students.len());
        for student in students {
            let marks = self.mark_repository.list_marks(&student.index).await?;
            profiles.push(StudentProfile { student, marks });
        }

        Ok(profiles)
    }

    /// Update an existing student's enrolment details. The index number is
    /// the storage key and cannot change.
    pub async fn update_student(
        &self,
        student_id: &str,
        command: UpdateStudentCommand,
    ) -> Result<Student> {
        info!("Updating student: {}", student_id);

        // Get the existing student
        let mut student = self
            .student_repository
            .get_student(student_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Student not found: {}", student_id))?;

        // Validate the update command
        self.validate_update_command(&command)?;

        // Update fields if provided
        if let Some(name) = command.name {
            student.name = name.trim().to_string();
        }
        if let Some(school) = command.school {
            student.school = school.trim().to_string();
        }
        if let Some(badge) = command.badge {
            student.badge = badge.trim().to_string();
        }
        if let Some(grade) = command.grade {
            student.grade = grade.trim().to_string();
        }
        if let Some(exam_type) = command.exam_type {
            student.exam_type = exam_type.trim().to_string();
        }
        if let Some(description) = command.description {
            student.description = description.trim().to_string();
        }

        student.updated_at = Utc::now();

        self.student_repository.update_student(&student).await?;

        info!("Updated student: {} with ID: {}", student.index, student.id);

        Ok(student)
    }

    /// Apply the student-editable profile fields. An empty email clears
    /// the stored address.
    pub async fn update_profile(
        &self,
        student_id: &str,
        command: UpdateProfileCommand,
    ) -> Result<Student> {
        info!("Updating profile for student: {}", student_id);

        let mut student = self
            .student_repository
            .get_student(student_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Student not found: {}", student_id))?;

        self.validate_profile_command(&command)?;

        if let Some(email) = command.email {
            let email = email.trim().to_string();
            student.email = if email.is_empty() { None } else { Some(email) };
        }
        if let Some(about_me) = command.about_me {
            student.about_me = Some(about_me.trim().to_string());
        }

        student.updated_at = Utc::now();

        self.student_repository.update_student(&student).await?;

        info!("Updated profile for student: {}", student.index);

        Ok(student)
    }

    /// Delete a student. The student's marks are stored inside their
    /// directory and are removed along with it.
    pub async fn delete_student(&self, student_id: &str) -> Result<()> {
        info!("Deleting student: {}", student_id);

        // Verify student exists
        let student = self
            .student_repository
            .get_student(student_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Student not found: {}", student_id))?;

        self.student_repository.delete_student(student_id).await?;

        info!("Deleted student: {} with ID: {}", student.index, student.id);

        Ok(())
    }

    /// Record an exam mark for a student and return the refreshed list
    pub async fn add_mark(
        &self,
        student_id: &str,
        command: AddMarkCommand,
    ) -> Result<AddMarkResult> {
        info!(
            "Adding mark for student {}: term={}, subject={}, score={}",
            student_id, command.term, command.subject, command.score
        );

        let student = self
            .student_repository
            .get_student(student_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Student not found: {}", student_id))?;

        self.validate_mark_command(&command)?;

        let mark = Mark {
            term: command.term.trim().to_string(),
            subject: command.subject.trim().to_string(),
            score: command.score,
            date: Utc::now(),
        };

        self.mark_repository
            .append_mark(&student.index, &mark)
            .await?;

        let marks = self.mark_repository.list_marks(&student.index).await?;

        info!(
            "Recorded mark for student {}: {} marks on file",
            student.index,
            marks.len()
        );

        Ok(AddMarkResult {
            marks,
            success_message: "Mark added successfully".to_string(),
        })
    }

    /// Validate create student command
    fn validate_create_command(&self, command: &CreateStudentCommand) -> Result<()> {
        if command.index.trim().is_empty() {
            return Err(anyhow::anyhow!("Student index cannot be empty"));
        }

        if command.name.trim().is_empty() {
            return Err(anyhow::anyhow!("Student name cannot be empty"));
        }

        if command.name.len() > 100 {
            return Err(anyhow::anyhow!("Student name cannot exceed 100 characters"));
        }

        if command.school.trim().is_empty() {
            return Err(anyhow::anyhow!("School cannot be empty"));
        }

        if command.badge.trim().is_empty() {
            return Err(anyhow::anyhow!("Badge cannot be empty"));
        }

        if command.grade.trim().is_empty() {
            return Err(anyhow::anyhow!("Grade cannot be empty"));
        }

        self.validate_exam_type(command.exam_type.trim())?;

        Ok(())
    }

    /// Validate update student command
    fn validate_update_command(&self, command: &UpdateStudentCommand) -> Result<()> {
        if let Some(ref name) = command.name {
            if name.trim().is_empty() {
                return Err(anyhow::anyhow!("Student name cannot be empty"));
            }

            if name.len() > 100 {
                return Err(anyhow::anyhow!("Student name cannot exceed 100 characters"));
            }
        }

        if let Some(ref school) = command.school {
            if school.trim().is_empty() {
                return Err(anyhow::anyhow!("School cannot be empty"));
            }
        }

        if let Some(ref badge) = command.badge {
            if badge.trim().is_empty() {
                return Err(anyhow::anyhow!("Badge cannot be empty"));
            }
        }

        if let Some(ref grade) = command.grade {
            if grade.trim().is_empty() {
                return Err(anyhow::anyhow!("Grade cannot be empty"));
            }
        }

        if let Some(ref exam_type) = command.exam_type {
            self.validate_exam_type(exam_type.trim())?;
        }

        Ok(())
    }

    /// Validate profile update command
    fn validate_profile_command(&self, command: &UpdateProfileCommand) -> Result<()> {
        if let Some(ref email) = command.email {
            let email = email.trim();
            if !email.is_empty() && !email.contains('@') {
                return Err(anyhow::anyhow!("Invalid email address: {}", email));
            }
        }

        Ok(())
    }

    /// Validate mark entry command
    fn validate_mark_command(&self, command: &AddMarkCommand) -> Result<()> {
        if command.term.trim().is_empty() {
            return Err(anyhow::anyhow!("Term cannot be empty"));
        }

        if command.subject.trim().is_empty() {
            return Err(anyhow::anyhow!("Subject cannot be empty"));
        }

        if !(0.0..=100.0).contains(&command.score) {
            return Err(anyhow::anyhow!(
                "Score must be between 0 and 100, got: {}",
                command.score
            ));
        }

        Ok(())
    }

    /// Validate examination stream
    fn validate_exam_type(&self, exam_type: &str) -> Result<()> {
        if exam_type != "OL" && exam_type != "AL" {
            return Err(anyhow::anyhow!(
                "Exam type must be OL or AL, got: {}",
                exam_type
            ));
        }

        Ok(())
    }
}
