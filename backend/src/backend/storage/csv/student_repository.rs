use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use super::connection::CsvConnection;
use crate::backend::domain::models::period::Period;
use crate::backend::domain::models::student::{FeeStatus, Student};
use crate::backend::storage::traits::StudentStorage;

/// Intermediate struct for YAML serialization with string date fields
#[derive(Debug, Clone, Serialize, Deserialize)]
struct YamlStudent {
    id: String,
    index: String,
    name: String,
    school: String,
    badge: String,
    grade: String,
    exam_type: String,
    description: String,
    email: Option<String>,
    about_me: Option<String>,
    fee_status: String, // "PAID" / "UNPAID"
    last_paid_period: Option<u32>,
    created_at: String, // RFC 3339
    updated_at: String, // RFC 3339
}

/// YAML-based student repository using filesystem discovery.
/// Each student lives in their own directory named after the index number.
#[derive(Clone)]
pub struct StudentRepository {
    connection: Arc<CsvConnection>,
}

impl StudentRepository {
    /// Create a new student repository
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self { connection }
    }

    /// Generate a safe filesystem identifier from an index number.
    /// Converts "ST 2001" -> "st_2001", "OL/2024-17" -> "ol_2024_17", etc.
    pub fn generate_safe_directory_name(index: &str) -> String {
        let mapped = index
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect::<String>();

        // Collapse consecutive underscores into single underscores
        let mut collapsed = String::new();
        let mut last_was_underscore = false;
        for c in mapped.chars() {
            if c == '_' {
                if !last_was_underscore {
                    collapsed.push('_');
                }
                last_was_underscore = true;
            } else {
                collapsed.push(c);
                last_was_underscore = false;
            }
        }

        collapsed.trim_matches('_').to_string()
    }

    /// Get the path to a student's YAML file
    fn get_student_yaml_path(&self, directory_name: &str) -> PathBuf {
        self.connection
            .get_student_directory(directory_name)
            .join("student.yaml")
    }

    fn yaml_to_domain(yaml: YamlStudent) -> Result<Student> {
        let fee_status = FeeStatus::parse(&yaml.fee_status).ok_or_else(|| {
            anyhow::anyhow!("Invalid fee status in student file: {}", yaml.fee_status)
        })?;

        Ok(Student {
            id: yaml.id,
            index: yaml.index,
            name: yaml.name,
            school: yaml.school,
            badge: yaml.badge,
            grade: yaml.grade,
            exam_type: yaml.exam_type,
            description: yaml.description,
            email: yaml.email,
            about_me: yaml.about_me,
            fee_status,
            last_paid_period: yaml.last_paid_period.map(Period),
            created_at: chrono::DateTime::parse_from_rfc3339(&yaml.created_at)
                .context("Failed to parse created_at from student file")?
                .with_timezone(&chrono::Utc),
            updated_at: chrono::DateTime::parse_from_rfc3339(&yaml.updated_at)
                .context("Failed to parse updated_at from student file")?
                .with_timezone(&chrono::Utc),
        })
    }

    fn domain_to_yaml(student: &Student) -> YamlStudent {
        YamlStudent {
            id: student.id.clone(),
            index: student.index.clone(),
            name: student.name.clone(),
            school: student.school.clone(),
            badge: student.badge.clone(),
            grade: student.grade.clone(),
            exam_type: student.exam_type.clone(),
            description: student.description.clone(),
            email: student.email.clone(),
            about_me: student.about_me.clone(),
            fee_status: student.fee_status.as_str().to_string(),
            last_paid_period: student.last_paid_period.map(|p| p.0),
            created_at: student.created_at.to_rfc3339(),
            updated_at: student.updated_at.to_rfc3339(),
        }
    }

    /// Load a student from a specific directory
    fn load_student_from_directory(&self, directory_name: &str) -> Result<Option<Student>> {
        let yaml_path = self.get_student_yaml_path(directory_name);

        if !yaml_path.exists() {
            return Ok(None);
        }

        let yaml_content = fs::read_to_string(&yaml_path)?;
        let yaml_student: YamlStudent = serde_yaml::from_str(&yaml_content)?;

        Ok(Some(Self::yaml_to_domain(yaml_student)?))
    }

    /// Save a student to their directory with an atomic replace
    fn save_student_to_directory(&self, student: &Student, directory_name: &str) -> Result<()> {
        let student_dir = self.connection.get_student_directory(directory_name);
        if !student_dir.exists() {
            fs::create_dir_all(&student_dir)?;
            info!("Created student directory: {:?}", student_dir);
        }

        let yaml_student = Self::domain_to_yaml(student);
        let yaml_content = serde_yaml::to_string(&yaml_student)?;

        let yaml_path = self.get_student_yaml_path(directory_name);
        let temp_path = yaml_path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &yaml_path)?;

        Ok(())
    }

    /// Iterate the student directory names under the base directory
    fn student_directory_names(&self) -> Result<Vec<String>> {
        let students_dir = self.connection.students_directory();

        if !students_dir.exists() {
            debug!("Students directory doesn't exist, returning empty list");
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(students_dir)? {
            let entry = entry?;
            let path = entry.path();

            if !path.is_dir() {
                continue;
            }

            match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => names.push(name.to_string()),
                None => warn!("Skipping directory with invalid name: {:?}", path),
            }
        }

        Ok(names)
    }

    /// Discover all students by scanning directories
    fn discover_students(&self) -> Result<Vec<Student>> {
        let mut students = Vec::new();

        for dir_name in self.student_directory_names()? {
            match self.load_student_from_directory(&dir_name) {
                Ok(Some(student)) => {
                    debug!("Discovered student {} in directory {}", student.index, dir_name);
                    students.push(student);
                }
                Ok(None) => {
                    debug!("Directory {} doesn't contain a valid student", dir_name);
                }
                Err(e) => {
                    warn!("Error loading student from directory {}: {}", dir_name, e);
                }
            }
        }

        // Sort by index number for consistent ordering
        students.sort_by(|a, b| a.index.cmp(&b.index));

        Ok(students)
    }

    /// Find the directory name for a student by ID
    fn find_directory_by_student_id(&self, student_id: &str) -> Result<Option<String>> {
        for dir_name in self.student_directory_names()? {
            if let Ok(Some(student)) = self.load_student_from_directory(&dir_name) {
                if student.id == student_id {
                    return Ok(Some(dir_name));
                }
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl StudentStorage for StudentRepository {
    /// Store a new student
    async fn store_student(&self, student: &Student) -> Result<()> {
        let dir_name = Self::generate_safe_directory_name(&student.index);

        // The directory name is lossy: "ST-001" and "ST 001" both map to
        // st_001. Refuse to clobber a record that belongs to a different
        // index rather than silently absorbing their marks file.
        if let Some(existing) = self.load_student_from_directory(&dir_name)? {
            if existing.index != student.index {
                warn!(
                    "Directory {} already holds student {}, refusing to store {}",
                    dir_name, existing.index, student.index
                );
                return Err(anyhow::anyhow!(
                    "Student already exists: {} and {} share directory {}",
                    existing.index,
                    student.index,
                    dir_name
                ));
            }
        }

        self.save_student_to_directory(student, &dir_name)
    }

    /// Retrieve a specific student by ID
    async fn get_student(&self, student_id: &str) -> Result<Option<Student>> {
        let students = self.discover_students()?;
        Ok(students.into_iter().find(|s| s.id == student_id))
    }

    /// Retrieve a specific student by index number
    async fn get_student_by_index(&self, index: &str) -> Result<Option<Student>> {
        let dir_name = Self::generate_safe_directory_name(index);
        match self.load_student_from_directory(&dir_name)? {
            // The directory name is lossy, so confirm the loaded record
            // really carries the requested index
            Some(student) if student.index == index => Ok(Some(student)),
            _ => Ok(None),
        }
    }

    /// List all students ordered by index number
    async fn list_students(&self) -> Result<Vec<Student>> {
        self.discover_students()
    }

    /// Update an existing student
    async fn update_student(&self, student: &Student) -> Result<()> {
        if let Some(dir_name) = self.find_directory_by_student_id(&student.id)? {
            self.save_student_to_directory(student, &dir_name)
        } else {
            warn!("Attempted to update a non-existent student: {}", student.id);
            Err(anyhow::anyhow!("Student not found for update"))
        }
    }

    /// Delete a student by ID, along with their marks
    async fn delete_student(&self, student_id: &str) -> Result<()> {
        if let Some(dir_name) = self.find_directory_by_student_id(student_id)? {
            let student_dir = self.connection.get_student_directory(&dir_name);
            if student_dir.exists() {
                fs::remove_dir_all(&student_dir)?;
                info!("Deleted student directory: {:?}", student_dir);
            }
        } else {
            warn!("Attempted to delete a non-existent student: {}", student_id);
        }
        Ok(())
    }

    /// Downgrade stale PAID records for the given period.
    async fn reset_overdue_fee_statuses(&self, current_period: Period) -> Result<usize> {
        let mut reset_count = 0;

        for dir_name in self.student_directory_names()? {
            // Corrupt entries are skipped here just like in discovery; the
            // sweep is idempotent, so a later pass picks up anything missed
            let mut student = match self.load_student_from_directory(&dir_name) {
                Ok(Some(student)) => student,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Skipping student directory {} during fee sweep: {}", dir_name, e);
                    continue;
                }
            };

            if student.fee_status == FeeStatus::Paid
                && student.last_paid_period != Some(current_period)
            {
                student.fee_status = FeeStatus::Unpaid;
                student.updated_at = chrono::Utc::now();
                self.save_student_to_directory(&student, &dir_name)?;
                debug!(
                    "Reset fee status for student {} (paid in period {:?}, current {})",
                    student.index, student.last_paid_period, current_period
                );
                reset_count += 1;
            }
        }

        Ok(reset_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn setup_test_repo() -> (StudentRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let repo = StudentRepository::new(Arc::new(connection));
        (repo, temp_dir)
    }

    fn test_student(index: &str, id: &str) -> Student {
        let now = Utc::now();
        Student {
            id: id.to_string(),
            index: index.to_string(),
            name: "Test Student".to_string(),
            school: "Central College".to_string(),
            badge: "Blue".to_string(),
            grade: "10".to_string(),
            exam_type: "OL".to_string(),
            description: String::new(),
            email: None,
            about_me: None,
            fee_status: FeeStatus::Unpaid,
            last_paid_period: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_generate_safe_directory_name() {
        assert_eq!(StudentRepository::generate_safe_directory_name("ST 2001"), "st_2001");
        assert_eq!(StudentRepository::generate_safe_directory_name("OL/2024-17"), "ol_2024_17");
        assert_eq!(StudentRepository::generate_safe_directory_name("  4402  "), "4402");
    }

    #[tokio::test]
    async fn test_store_and_discover_student() {
        let (repo, _temp_dir) = setup_test_repo();

        let student = test_student("2001", "student::123");
        repo.store_student(&student).await.expect("Failed to store student");

        let students = repo.list_students().await.expect("Failed to list students");
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].index, "2001");
        assert_eq!(students[0].fee_status, FeeStatus::Unpaid);
        assert_eq!(students[0].last_paid_period, None);

        let by_id = repo.get_student("student::123").await.expect("Failed to get student");
        assert!(by_id.is_some());

        let by_index = repo
            .get_student_by_index("2001")
            .await
            .expect("Failed to get student by index");
        assert_eq!(by_index.unwrap().id, "student::123");
    }

    #[tokio::test]
    async fn test_store_refuses_indexes_sharing_a_directory_name() {
        let (repo, _temp_dir) = setup_test_repo();

        repo.store_student(&test_student("ST-001", "student::first"))
            .await
            .expect("Failed to store student");

        // "ST 001" sanitizes to the same st_001 directory as "ST-001"
        let result = repo
            .store_student(&test_student("ST 001", "student::second"))
            .await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already exists"));

        // The first record survives untouched
        let students = repo.list_students().await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].index, "ST-001");
        assert_eq!(students[0].id, "student::first");
    }

    #[tokio::test]
    async fn test_store_same_index_twice_overwrites_in_place() {
        let (repo, _temp_dir) = setup_test_repo();

        repo.store_student(&test_student("ST-001", "student::first"))
            .await
            .unwrap();

        // Same index is the same record slot, not a collision
        let mut replacement = test_student("ST-001", "student::first");
        replacement.name = "Renamed Student".to_string();
        repo.store_student(&replacement).await.unwrap();

        let students = repo.list_students().await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].name, "Renamed Student");
    }

    #[tokio::test]
    async fn test_fee_fields_round_trip() {
        let (repo, _temp_dir) = setup_test_repo();

        let mut student = test_student("2002", "student::124");
        student.fee_status = FeeStatus::Paid;
        student.last_paid_period = Some(Period(7));
        repo.store_student(&student).await.unwrap();

        let loaded = repo.get_student_by_index("2002").await.unwrap().unwrap();
        assert_eq!(loaded.fee_status, FeeStatus::Paid);
        assert_eq!(loaded.last_paid_period, Some(Period(7)));
    }

    #[tokio::test]
    async fn test_list_students_orders_by_index() {
        let (repo, _temp_dir) = setup_test_repo();

        repo.store_student(&test_student("3005", "student::3")).await.unwrap();
        repo.store_student(&test_student("1001", "student::1")).await.unwrap();
        repo.store_student(&test_student("2002", "student::2")).await.unwrap();

        let students = repo.list_students().await.unwrap();
        let indexes: Vec<&str> = students.iter().map(|s| s.index.as_str()).collect();
        assert_eq!(indexes, vec!["1001", "2002", "3005"]);
    }

    #[tokio::test]
    async fn test_update_nonexistent_student_fails() {
        let (repo, _temp_dir) = setup_test_repo();

        let student = test_student("9999", "student::missing");
        let result = repo.update_student(&student).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_student_removes_directory_and_marks() {
        let (repo, temp_dir) = setup_test_repo();

        let student = test_student("2003", "student::125");
        repo.store_student(&student).await.unwrap();

        // Simulate an existing marks file inside the student directory
        let marks_path = temp_dir
            .path()
            .join("students")
            .join("2003")
            .join("marks.csv");
        std::fs::write(&marks_path, "term,subject,score,date\n").unwrap();

        repo.delete_student("student::125").await.unwrap();

        assert!(!marks_path.exists());
        assert!(repo.get_student("student::125").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reset_overdue_fee_statuses_only_touches_stale_paid() {
        let (repo, _temp_dir) = setup_test_repo();

        // Paid for the current period: untouched
        let mut current = test_student("1001", "student::a");
        current.fee_status = FeeStatus::Paid;
        current.last_paid_period = Some(Period(4));
        repo.store_student(&current).await.unwrap();

        // Paid for an earlier period: downgraded
        let mut stale = test_student("1002", "student::b");
        stale.fee_status = FeeStatus::Paid;
        stale.last_paid_period = Some(Period(3));
        repo.store_student(&stale).await.unwrap();

        // Never paid: untouched
        repo.store_student(&test_student("1003", "student::c")).await.unwrap();

        let reset = repo.reset_overdue_fee_statuses(Period(4)).await.unwrap();
        assert_eq!(reset, 1);

        let a = repo.get_student_by_index("1001").await.unwrap().unwrap();
        assert_eq!(a.fee_status, FeeStatus::Paid);
        assert_eq!(a.last_paid_period, Some(Period(4)));

        let b = repo.get_student_by_index("1002").await.unwrap().unwrap();
        assert_eq!(b.fee_status, FeeStatus::Unpaid);
        // The paid period marker survives the downgrade
        assert_eq!(b.last_paid_period, Some(Period(3)));

        let c = repo.get_student_by_index("1003").await.unwrap().unwrap();
        assert_eq!(c.fee_status, FeeStatus::Unpaid);
        assert_eq!(c.last_paid_period, None);
    }

    #[tokio::test]
    async fn test_reset_treats_paid_without_period_as_stale() {
        let (repo, _temp_dir) = setup_test_repo();

        // PAID with no recorded period cannot match the current period
        let mut odd = test_student("1004", "student::d");
        odd.fee_status = FeeStatus::Paid;
        odd.last_paid_period = None;
        repo.store_student(&odd).await.unwrap();

        let reset = repo.reset_overdue_fee_statuses(Period(0)).await.unwrap();
        assert_eq!(reset, 1);

        let d = repo.get_student_by_index("1004").await.unwrap().unwrap();
        assert_eq!(d.fee_status, FeeStatus::Unpaid);
    }

    #[tokio::test]
    async fn test_reset_on_empty_store_changes_nothing() {
        let (repo, _temp_dir) = setup_test_repo();
        let reset = repo.reset_overdue_fee_statuses(Period(5)).await.unwrap();
        assert_eq!(reset, 0);
    }
}
