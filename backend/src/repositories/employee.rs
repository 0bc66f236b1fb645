use async_trait::async_trait;
use serde_json::Value;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::io::AsyncWriteExt;

use crate::{
    error::RepositoryError, models::employee::StoredEmployee,
    repositories::employee_repository::EmployeeRepository,
};

/// Employee records stored as a single JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileEmployeeRepository {
    path: PathBuf,
}

impl JsonFileEmployeeRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn io_error(&self, source: std::io::Error) -> RepositoryError {
        RepositoryError::Io {
            path: self.path.clone(),
            source,
        }
    }

    async fn write_staged(&self, staging: &Path, body: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::File::create(staging).await?;
        file.write_all(body).await?;
        file.sync_all().await?;
        tokio::fs::rename(staging, &self.path).await
    }
}

#[async_trait]
impl EmployeeRepository for JsonFileEmployeeRepository {
    async fn find_all(&self) -> Result<Vec<StoredEmployee>, RepositoryError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    path = %self.path.display(),
                    "employee store missing, starting empty"
                );
                return Ok(Vec::new());
            }
            Err(err) => return Err(self.io_error(err)),
        };

        // Only the array itself has to parse; each element is checked on its own.
        let values: Vec<Value> =
            serde_json::from_slice(&bytes).map_err(|source| RepositoryError::Serialization {
                path: self.path.clone(),
                source,
            })?;
        let records: Vec<StoredEmployee> =
            values.into_iter().map(StoredEmployee::from_value).collect();

        tracing::debug!(
            path = %self.path.display(),
            count = records.len(),
            unreadable = records.iter().filter(|r| r.employee().is_none()).count(),
            "loaded employee records"
        );
        Ok(records)
    }

    async fn save_all(&self, records: &[StoredEmployee]) -> Result<(), RepositoryError> {
        let body =
            serde_json::to_vec_pretty(records).map_err(|source| RepositoryError::Serialization {
                path: self.path.clone(),
                source,
            })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| self.io_error(err))?;
        }

        // The staged file is flushed to disk before it replaces the target.
        let staging = self.staging_path();
        if let Err(err) = self.write_staged(&staging, &body).await {
            if let Err(cleanup) = tokio::fs::remove_file(&staging).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    tracing::warn!(
                        path = %staging.display(),
                        error = %cleanup,
                        "failed to remove staged employee store"
                    );
                }
            }
            return Err(self.io_error(err));
        }

        tracing::debug!(
            path = %self.path.display(),
            count = records.len(),
            "saved employee records"
        );
        Ok(())
    }
}
