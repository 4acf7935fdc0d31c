use std::error::Error;
use std::fmt;
use std::fmt::Formatter;

use diesel::result::{ConnectionError, Error as QueryError};
use diesel_migrations::RunMigrationsError;

#[derive(Debug)]
pub enum StorageError {
    ConnectionError(ConnectionError),
    QueryError(QueryError),
    MigrationError(RunMigrationsError),
}

impl From<ConnectionError> for StorageError {
    fn from(error: ConnectionError) -> Self {
        StorageError::ConnectionError(error)
    }
}

impl From<QueryError> for StorageError {
    fn from(error: QueryError) -> Self {
        StorageError::QueryError(error)
    }
}

impl From<RunMigrationsError> for StorageError {
    fn from(error: RunMigrationsError) -> Self {
        StorageError::MigrationError(error)
    }
}

impl Error for StorageError {}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ConnectionError(err) => err.fmt(f),
            StorageError::QueryError(err) => err.fmt(f),
            StorageError::MigrationError(err) => err.fmt(f),
        }
    }
}
