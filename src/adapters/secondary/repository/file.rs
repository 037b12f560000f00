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

//! File-based repository for saving QC reports as pretty-printed JSON

use crate::domain::{OutputError, QcReport};
use crate::ports::ReportRepository;
use async_trait::async_trait;
use std::path::Path;
use tokio::fs;

/// Filesystem repository writing one JSON document per run
pub struct JsonReportRepository;

impl JsonReportRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReportRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportRepository for JsonReportRepository {
    async fn save_json(&self, report: &QcReport, path: &Path) -> Result<(), OutputError> {
        // Pretty-printed so reports stay human-diffable in review tooling.
        let json_string = serde_json::to_string_pretty(report).map_err(|e| {
            OutputError::SerializationFailed(format!("JSON serialization failed: {}", e))
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| OutputError::IoFailed(format!("failed to create directory: {}", e)))?;
        }

        fs::write(path, json_string)
            .await
            .map_err(|e| OutputError::IoFailed(format!("failed to write report file: {}", e)))?;

        Ok(())
    }

    async fn load_json(&self, path: &Path) -> Result<QcReport, OutputError> {
        let json_string = fs::read_to_string(path)
            .await
            .map_err(|e| OutputError::IoFailed(format!("failed to read report file: {}", e)))?;

        serde_json::from_str(&json_string).map_err(|e| {
            OutputError::SerializationFailed(format!("JSON deserialization failed: {}", e))
        })
    }

    async fn file_exists(&self, path: &Path) -> Result<bool, OutputError> {
        Ok(path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Battery, Connectivity, Identity, ManualInspection, Meta, SpecSection, SystemCheck,
    };
    use assert_fs::prelude::*;
    use predicates::prelude::*;
    use tempfile::tempdir;

    fn create_test_report() -> QcReport {
        QcReport {
            meta: Meta {
                scan_timestamp: "2024-06-01T10:00:00+07:00".to_string(),
                script_version: "2.2.0".to_string(),
            },
            identity: Identity {
                brand: "LENOVO".to_string(),
                model: "ThinkPad T480".to_string(),
                serial_number: "PF0ABCDE".to_string(),
                bios_version: "N24ET65W".to_string(),
            },
            specs: SpecSection::default(),
            battery: Battery::not_present(),
            connectivity: Connectivity::default(),
            system_check: SystemCheck::default(),
            manual_inspection: ManualInspection::default(),
            error: None,
        }
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("QC_PF0ABCDE.json");

        let repository = JsonReportRepository::new();
        let original = create_test_report();

        repository.save_json(&original, &file_path).await.unwrap();
        assert!(repository.file_exists(&file_path).await.unwrap());

        let loaded = repository.load_json(&file_path).await.unwrap();
        assert_eq!(loaded.identity.serial_number, original.identity.serial_number);
        assert_eq!(loaded.meta.scan_timestamp, original.meta.scan_timestamp);
        assert!(!loaded.battery.present);
    }

    #[tokio::test]
    async fn test_output_is_pretty_printed() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("QC_PF0ABCDE.json");

        let repository = JsonReportRepository::new();
        repository
            .save_json(&create_test_report(), file.path())
            .await
            .unwrap();

        file.assert(predicate::str::contains("\"serial_number\": \"PF0ABCDE\""));
        file.assert(predicate::str::contains("\"manual_inspection\""));
        // Pretty printing means multi-line output, not one compact line.
        file.assert(predicate::str::contains("\n"));
    }

    #[tokio::test]
    async fn test_create_parent_directory() {
        let temp_dir = tempdir().unwrap();
        let nested_path = temp_dir.path().join("reports").join("QC_PF0ABCDE.json");

        let repository = JsonReportRepository::new();
        repository
            .save_json(&create_test_report(), &nested_path)
            .await
            .unwrap();

        assert!(nested_path.exists());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("QC_NOPE.json");

        let repository = JsonReportRepository::new();
        match repository.load_json(&missing).await {
            Err(OutputError::IoFailed(_)) => {}
            other => panic!("expected IoFailed, got {:?}", other.err()),
        }
    }
}
