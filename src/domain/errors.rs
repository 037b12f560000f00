/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use std::fmt;

/// Domain-level errors that don't expose infrastructure details
#[derive(Debug, Clone)]
pub enum DomainError {
    /// Inventory collection failed
    InventoryCollectionFailed(String),
    /// A management-interface table is unavailable on this machine
    TableUnavailable(String),
    /// Insufficient privileges to query the management interface
    InsufficientPrivileges(String),
    /// Invalid configuration provided
    InvalidConfiguration(String),
    /// Record conversion failed
    ConversionFailed(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::InventoryCollectionFailed(msg) => {
                write!(f, "Inventory collection failed: {}", msg)
            }
            DomainError::TableUnavailable(msg) => {
                write!(f, "Inventory table unavailable: {}", msg)
            }
            DomainError::InsufficientPrivileges(msg) => {
                write!(f, "Insufficient privileges: {}", msg)
            }
            DomainError::InvalidConfiguration(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
            DomainError::ConversionFailed(msg) => {
                write!(f, "Record conversion failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for DomainError {}

/// Errors specific to report assembly
#[derive(Debug, Clone)]
pub enum ReportError {
    /// Domain operation failed
    Domain(DomainError),
    /// A pipeline stage could not produce its report section
    StageFailed(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Domain(err) => write!(f, "{}", err),
            ReportError::StageFailed(msg) => write!(f, "Report stage failed: {}", msg),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<DomainError> for ReportError {
    fn from(err: DomainError) -> Self {
        ReportError::Domain(err)
    }
}

/// Errors specific to writing the report file
#[derive(Debug, Clone)]
pub enum OutputError {
    /// Domain operation failed
    Domain(DomainError),
    /// Filesystem operation failed
    IoFailed(String),
    /// Serialization failed
    SerializationFailed(String),
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::Domain(err) => write!(f, "{}", err),
            OutputError::IoFailed(msg) => write!(f, "Filesystem operation failed: {}", msg),
            OutputError::SerializationFailed(msg) => write!(f, "Serialization failed: {}", msg),
        }
    }
}

impl std::error::Error for OutputError {}

impl From<DomainError> for OutputError {
    fn from(err: DomainError) -> Self {
        OutputError::Domain(err)
    }
}

/// System-level errors for adapters (not exposed to domain)
#[derive(Debug, Clone)]
pub enum SystemError {
    /// A management-interface query failed
    QueryFailed { table: String, detail: String },
    /// The queried table does not exist on this machine
    TableMissing(String),
    /// Permission denied
    PermissionDenied(String),
    /// Connecting to the management interface failed
    ConnectionFailed(String),
    /// I/O operation failed
    IoError(String),
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemError::QueryFailed { table, detail } => {
                write!(f, "Query against '{}' failed", table)?;
                if !detail.is_empty() {
                    write!(f, ": {}", detail)?;
                }
                Ok(())
            }
            SystemError::TableMissing(table) => write!(f, "Table not present: {}", table),
            SystemError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            SystemError::ConnectionFailed(msg) => {
                write!(f, "Management interface connection failed: {}", msg)
            }
            SystemError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for SystemError {}

/// Convert system errors to domain errors (with context loss for abstraction)
impl From<SystemError> for DomainError {
    fn from(err: SystemError) -> Self {
        match err {
            SystemError::QueryFailed { table, .. } => {
                DomainError::InventoryCollectionFailed(format!("query failed: {}", table))
            }
            SystemError::TableMissing(table) => DomainError::TableUnavailable(table),
            SystemError::PermissionDenied(_) => DomainError::InsufficientPrivileges(
                "management interface access denied".to_string(),
            ),
            SystemError::ConnectionFailed(msg) => {
                DomainError::InventoryCollectionFailed(format!("connection failed: {}", msg))
            }
            SystemError::IoError(msg) => {
                DomainError::InventoryCollectionFailed(format!("I/O error: {}", msg))
            }
        }
    }
}

impl From<SystemError> for ReportError {
    fn from(err: SystemError) -> Self {
        ReportError::Domain(err.into())
    }
}
