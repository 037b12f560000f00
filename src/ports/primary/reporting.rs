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

use crate::domain::QcReport;
use async_trait::async_trait;

/// Primary port - main interface offered by the QC collection domain
///
/// This is what external consumers (the CLI, library users) call to run a
/// scan.
#[async_trait]
pub trait QcReportingService: Send + Sync {
    /// Run the full collection pipeline and assemble the report
    ///
    /// Infallible: every failure mode folds into the report itself.
    /// Identity/spec failures populate the `error` field with a fallback
    /// identity, a missing battery source yields the defined not-present
    /// value, and classifier failures yield default sections.
    async fn assemble_report(&self) -> QcReport;
}
