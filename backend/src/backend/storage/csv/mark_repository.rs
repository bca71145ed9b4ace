use anyhow::{Context, Result};
use async_trait::async_trait;
use csv::{Reader, Writer};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::sync::Arc;

use super::connection::CsvConnection;
use super::student_repository::StudentRepository;
use crate::backend::domain::models::mark::Mark;
use crate::backend::storage::traits::MarkStorage;

/// CSV-based mark repository. Marks are kept per student in a marks.csv
/// file inside the student's directory, oldest first.
#[derive(Clone)]
pub struct MarkRepository {
    connection: Arc<CsvConnection>,
}

impl MarkRepository {
    /// Create a new CSV mark repository
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self { connection }
    }

    fn directory_name(index: &str) -> String {
        StudentRepository::generate_safe_directory_name(index)
    }

    /// Read all marks for a student from their CSV file
    fn read_marks(&self, index: &str) -> Result<Vec<Mark>> {
        let dir_name = Self::directory_name(index);
        self.connection.ensure_marks_file_exists(&dir_name)?;

        let file_path = self.connection.get_marks_file_path(&dir_name);
        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut marks = Vec::new();

        for result in csv_reader.records() {
            let record = result?;

            let date = chrono::DateTime::parse_from_rfc3339(record.get(3).unwrap_or(""))
                .context("Failed to parse mark date")?
                .with_timezone(&chrono::Utc);

            let mark = Mark {
                term: record.get(0).unwrap_or("").to_string(),
                subject: record.get(1).unwrap_or("").to_string(),
                score: record.get(2).unwrap_or("0").parse::<f64>().unwrap_or(0.0),
                date,
            };

            marks.push(mark);
        }

        Ok(marks)
    }

    /// Write all marks for a student to their CSV file
    fn write_marks(&self, index: &str, marks: &[Mark]) -> Result<()> {
        let dir_name = Self::directory_name(index);
        self.connection.ensure_marks_file_exists(&dir_name)?;

        let file_path = self.connection.get_marks_file_path(&dir_name);

        // Write to a temporary file, then swap it in atomically
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let writer = BufWriter::new(file);
            let mut csv_writer = Writer::from_writer(writer);

            csv_writer.write_record(&["term", "subject", "score", "date"])?;

            for mark in marks {
                csv_writer.write_record(&[
                    &mark.term,
                    &mark.subject,
                    &mark.score.to_string(),
                    &mark.date.to_rfc3339(),
                ])?;
            }

            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;

        Ok(())
    }
}

#[async_trait]
impl MarkStorage for MarkRepository {
    /// Append a mark to a student's record
    async fn append_mark(&self, index: &str, mark: &Mark) -> Result<()> {
        let mut marks = self.read_marks(index)?;
        marks.push(mark.clone());
        self.write_marks(index, &marks)
    }

    /// List all marks for a student, oldest first
    async fn list_marks(&self, index: &str) -> Result<Vec<Mark>> {
        self.read_marks(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn setup_test_repo() -> (MarkRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let repo = MarkRepository::new(Arc::new(connection));
        (repo, temp_dir)
    }

    fn mark(term: &str, subject: &str, score: f64) -> Mark {
        Mark {
            term: term.to_string(),
            subject: subject.to_string(),
            score,
            date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_marks_on_fresh_student_is_empty() {
        let (repo, _temp_dir) = setup_test_repo();
        let marks = repo.list_marks("2001").await.unwrap();
        assert!(marks.is_empty());
    }

    #[tokio::test]
    async fn test_append_and_list_preserves_order() {
        let (repo, _temp_dir) = setup_test_repo();

        repo.append_mark("2001", &mark("Term 1", "Maths", 72.0)).await.unwrap();
        repo.append_mark("2001", &mark("Term 1", "Science", 88.5)).await.unwrap();
        repo.append_mark("2001", &mark("Term 2", "Maths", 79.0)).await.unwrap();

        let marks = repo.list_marks("2001").await.unwrap();
        assert_eq!(marks.len(), 3);
        assert_eq!(marks[0].subject, "Maths");
        assert_eq!(marks[1].score, 88.5);
        assert_eq!(marks[2].term, "Term 2");
    }

    #[tokio::test]
    async fn test_marks_are_isolated_per_student() {
        let (repo, _temp_dir) = setup_test_repo();

        repo.append_mark("2001", &mark("Term 1", "Maths", 72.0)).await.unwrap();
        repo.append_mark("2002", &mark("Term 1", "History", 64.0)).await.unwrap();

        let first = repo.list_marks("2001").await.unwrap();
        let second = repo.list_marks("2002").await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].subject, "History");
    }
}
