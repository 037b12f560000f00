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

//! QC Collector Library
//!
//! Point-in-time hardware inventory and health-diagnostic collection for
//! laptop QC audits, using a Ports and Adapters (Hexagonal) architecture
//! for maintainability and testability.
//!
//! # Architecture
//!
//! - **Domain**: report schema, pure readers, and the assembly service
//! - **Ports**: interfaces for the inventory source and report persistence
//! - **Adapters**: platform-specific implementations (WMI on Windows, a
//!   best-effort portable probe elsewhere)
//!
//! # Usage
//!
//! ```rust,no_run
//! use qc_collector::{ContainerConfig, ServiceContainer};
//!
//! async fn example() {
//!     let container = ServiceContainer::new(ContainerConfig::default());
//!     let service = container.create_reporting_service();
//!
//!     // The pipeline always yields a complete report; partial failures
//!     // surface through the report's error field.
//!     let report = service.assemble_report().await;
//!     println!("Scanned {} ({})", report.identity.model, report.identity.serial_number);
//! }
//! ```

pub mod adapters;
pub mod container;
pub mod domain;
pub mod ports;

// Re-export the public API surface
pub use adapters::{JsonReportRepository, PortableInventorySource};
#[cfg(windows)]
pub use adapters::WmiInventorySource;
pub use container::{ContainerConfig, ContainerConfigBuilder, ServiceContainer};
pub use domain::{
    Battery, Connectivity, Identity, OutputError, QcReport, ReportAssemblyService, ReportConfig,
    ReportError, SystemCheck,
};
pub use ports::{InventorySource, QcReportingService, ReportRepository};
