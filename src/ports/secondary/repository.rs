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

use crate::domain::{OutputError, QcReport};
use async_trait::async_trait;
use std::path::Path;

/// Secondary port - report file persistence
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Save a report as pretty-printed UTF-8 JSON
    ///
    /// # Returns
    /// * `Ok(())` - Report written
    /// * `Err(OutputError)` - Serialization or filesystem failure
    async fn save_json(&self, report: &QcReport, path: &Path) -> Result<(), OutputError>;

    /// Load a previously written report
    async fn load_json(&self, path: &Path) -> Result<QcReport, OutputError>;

    /// Check whether a report file exists
    async fn file_exists(&self, path: &Path) -> Result<bool, OutputError>;
}
