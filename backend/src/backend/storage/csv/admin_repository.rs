use anyhow::{Context, Result};
use async_trait::async_trait;
use csv::{Reader, Writer};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::sync::Arc;

use super::connection::CsvConnection;
use crate::backend::domain::models::admin::Admin;
use crate::backend::storage::traits::AdminStorage;

/// CSV-based admin repository over a single admins.csv file in the base
/// data directory.
#[derive(Clone)]
pub struct AdminRepository {
    connection: Arc<CsvConnection>,
}

impl AdminRepository {
    /// Create a new CSV admin repository
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self { connection }
    }

    /// Read all admins from the CSV file
    fn read_admins(&self) -> Result<Vec<Admin>> {
        self.connection.ensure_admins_file_exists()?;

        let file_path = self.connection.get_admins_file_path();
        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut admins = Vec::new();

        for result in csv_reader.records() {
            let record = result?;

            let created_at = chrono::DateTime::parse_from_rfc3339(record.get(2).unwrap_or(""))
                .context("Failed to parse admin created_at")?
                .with_timezone(&chrono::Utc);

            admins.push(Admin {
                id: record.get(0).unwrap_or("").to_string(),
                mobile: record.get(1).unwrap_or("").to_string(),
                created_at,
            });
        }

        Ok(admins)
    }

    /// Write all admins to the CSV file with an atomic replace
    fn write_admins(&self, admins: &[Admin]) -> Result<()> {
        let file_path = self.connection.get_admins_file_path();
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let writer = BufWriter::new(file);
            let mut csv_writer = Writer::from_writer(writer);

            csv_writer.write_record(&["id", "mobile", "created_at"])?;

            for admin in admins {
                csv_writer.write_record(&[
                    &admin.id,
                    &admin.mobile,
                    &admin.created_at.to_rfc3339(),
                ])?;
            }

            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;

        Ok(())
    }

    /// All stored admins in file order
    #[cfg(test)]
    pub fn list_admins(&self) -> Result<Vec<Admin>> {
        self.read_admins()
    }
}

#[async_trait]
impl AdminStorage for AdminRepository {
    /// Find an admin by mobile number
    async fn find_admin_by_mobile(&self, mobile: &str) -> Result<Option<Admin>> {
        let admins = self.read_admins()?;
        Ok(admins.into_iter().find(|a| a.mobile == mobile))
    }

    /// Store a new admin
    async fn store_admin(&self, admin: &Admin) -> Result<()> {
        let mut admins = self.read_admins()?;
        admins.push(admin.clone());
        self.write_admins(&admins)
    }
}
