use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::backend::storage::traits::Connection;

/// Environment variable overriding the data directory location.
pub const DATA_DIR_ENV: &str = "FEE_TRACKER_DATA_DIR";

/// CsvConnection manages file paths and ensures data files exist for each
/// student. Layout under the base directory:
///
/// ```text
/// <base>/admins.csv
/// <base>/students/<safe-index>/student.yaml
/// <base>/students/<safe-index>/marks.csv
/// ```
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: Arc<Mutex<PathBuf>>,
}

impl CsvConnection {
    /// Create a new connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // First run on a fresh machine: create the tree
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: Arc::new(Mutex::new(base_path)),
        })
    }

    /// Create a new connection in the default data directory.
    /// Honours FEE_TRACKER_DATA_DIR, falling back to
    /// ~/Documents/Fee Tracker.
    pub fn new_default() -> Result<Self> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            let path = PathBuf::from(dir);
            info!(
                "Using data directory from {}: {}",
                DATA_DIR_ENV,
                path.display()
            );
            return Self::new(path);
        }

        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = PathBuf::from(home_dir).join("Documents").join("Fee Tracker");
        info!("Using default data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Base directory all stores live under
    pub fn base_directory(&self) -> PathBuf {
        let base_dir = self.base_directory.lock().unwrap();
        base_dir.clone()
    }

    /// Get the directory that holds all student subdirectories
    pub fn students_directory(&self) -> PathBuf {
        self.base_directory().join("students")
    }

    /// Get the directory path for a student's data
    pub fn get_student_directory(&self, directory_name: &str) -> PathBuf {
        self.students_directory().join(directory_name)
    }

    /// Get the file path for a student's marks
    pub fn get_marks_file_path(&self, directory_name: &str) -> PathBuf {
        self.get_student_directory(directory_name).join("marks.csv")
    }

    /// Ensure a marks CSV file exists with the proper header
    pub fn ensure_marks_file_exists(&self, directory_name: &str) -> Result<()> {
        let student_dir = self.get_student_directory(directory_name);

        if !student_dir.exists() {
            fs::create_dir_all(&student_dir)?;
        }

        let file_path = student_dir.join("marks.csv");

        if !file_path.exists() {
            let header = "term,subject,score,date\n";
            fs::write(&file_path, header)?;
        }

        Ok(())
    }

    /// Get the file path for the admin records
    pub fn get_admins_file_path(&self) -> PathBuf {
        self.base_directory().join("admins.csv")
    }

    /// Ensure the admins CSV file exists with the proper header
    pub fn ensure_admins_file_exists(&self) -> Result<()> {
        let file_path = self.get_admins_file_path();

        if !file_path.exists() {
            let header = "id,mobile,created_at\n";
            fs::write(&file_path, header)?;
        }

        Ok(())
    }

    /// Wipe the data directory
    #[cfg(test)]
    pub fn cleanup(&self) -> Result<()> {
        let base_dir = self.base_directory.lock().unwrap();
        if base_dir.exists() {
            fs::remove_dir_all(&*base_dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("data");

        let connection = CsvConnection::new(&base).unwrap();

        assert!(base.exists());
        assert_eq!(connection.base_directory(), base);
    }

    #[test]
    fn test_ensure_marks_file_creates_directory_and_header() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();

        connection.ensure_marks_file_exists("s2001").unwrap();

        let path = connection.get_marks_file_path("s2001");
        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "term,subject,score,date\n");
    }

    #[test]
    fn test_ensure_admins_file_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();

        connection.ensure_admins_file_exists().unwrap();
        std::fs::write(
            connection.get_admins_file_path(),
            "id,mobile,created_at\nadmin::1,0771234567,2024-01-01T00:00:00Z\n",
        )
        .unwrap();

        // A second call must not truncate existing data
        connection.ensure_admins_file_exists().unwrap();
        let content = std::fs::read_to_string(connection.get_admins_file_path()).unwrap();
        assert!(content.contains("0771234567"));
    }
}

impl Connection for CsvConnection {
    type StudentRepository = super::student_repository::StudentRepository;

    fn create_student_repository(&self) -> Self::StudentRepository {
        super::student_repository::StudentRepository::new(Arc::new(self.clone()))
    }
}
